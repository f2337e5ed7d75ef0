pub mod governor;

pub use governor::{GovernorConfig, IdleGovernor};
