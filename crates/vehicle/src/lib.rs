pub mod simulator;
pub mod snapshot;

#[cfg(test)]
mod frame_properties;

pub use simulator::VehicleSimulator;
pub use snapshot::DashboardSnapshot;
