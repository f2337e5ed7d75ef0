pub mod intake;
pub mod network;
pub mod oil;

pub use intake::relax_intake_temp;
pub use network::{HeatFlows, ThermalNetwork, thermostat_opening};
pub use oil::{oil_pressure_bar, oil_viscosity};
