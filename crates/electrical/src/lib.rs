pub mod battery;

pub use battery::{Battery, gauge_voltage};
