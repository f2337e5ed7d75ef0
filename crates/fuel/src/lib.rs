pub mod economy;
pub mod metering;

pub use economy::{instant_l_per_100km, range_km, smooth_average};
pub use metering::{FuelSystem, Mixture};
