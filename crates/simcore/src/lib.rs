pub mod config;
pub mod error;
pub mod state;
pub mod traits;
pub mod units;

pub use config::{
    ChassisConfig, ConverterConfig, ElectricalConfig, EngineConfig, FuelConfig, ThermalConfig,
    TorqueCurve, TransmissionConfig, VehicleConfig,
};
pub use error::ConfigError;
pub use state::{
    BatteryState, ChassisState, Coupling, DriverInputs, DrivetrainState, EngineState, FuelState,
    PerformanceState, ThermalState, VehicleState,
};
pub use traits::{
    ChassisModel, DrivetrainModel, ElectricalModel, FuelModel, Model, SimContext, ThermalModel,
};
