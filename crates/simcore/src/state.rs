use serde::Serialize;

use crate::config::VehicleConfig;

/// Torque-converter coupling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Coupling {
    /// Lockup clutch engaged: engine speed follows the transmission input.
    Locked,
    /// Fluid coupling: torque transfer depends on slip.
    #[default]
    Slipping,
}

impl Coupling {
    pub fn is_locked(self) -> bool {
        self == Coupling::Locked
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DriverInputs {
    pub throttle: f64,
    pub brake: f64,
    /// Throttle of the previous frame, for tip-in and cutoff detection
    pub prev_throttle: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EngineState {
    pub rpm: f64,
    /// Combustion minus friction minus converter load (N·m)
    pub torque_net_nm: f64,
    pub power_hp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrivetrainState {
    /// Current gear, 1-based
    pub gear: u8,
    pub coupling: Coupling,
    pub converter_slip_rpm: f64,
    /// Tractive force at the contact patch produced this frame (N)
    pub drive_force_n: f64,
}

impl Default for DrivetrainState {
    fn default() -> Self {
        DrivetrainState {
            gear: 1,
            coupling: Coupling::Slipping,
            converter_slip_rpm: 0.0,
            drive_force_n: 0.0,
        }
    }
}

impl DrivetrainState {
    pub fn lockup_active(&self) -> bool {
        self.coupling.is_locked()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChassisState {
    pub speed_mps: f64,
    pub accel_g: f64,
    pub odometer_km: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerformanceState {
    pub timer_0_100: f64,
    /// Time of the most recently completed 0-100 km/h run, 0 until one completes
    pub best_0_100: f64,
    pub is_doing_0_100: bool,
}

/// Temperatures in °C.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ThermalState {
    pub block_c: f64,
    pub coolant_c: f64,
    pub oil_c: f64,
    pub trans_c: f64,
    pub cabin_c: f64,
    pub intake_c: f64,
    pub oil_pressure_bar: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FuelState {
    pub fuel_liters: f64,
    pub fuel_rate_l_h: f64,
    /// Exponentially smoothed economy (L/100km)
    pub avg_consumption_l_100km: f64,
    pub afr: f64,
    pub volumetric_efficiency: f64,
    pub range_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryState {
    pub charge_pct: f64,
}

impl Default for BatteryState {
    fn default() -> Self {
        BatteryState { charge_pct: 100.0 }
    }
}

/// Everything that changes from frame to frame, shared by all models.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleState {
    pub inputs: DriverInputs,
    pub engine: EngineState,
    pub drivetrain: DrivetrainState,
    pub chassis: ChassisState,
    pub performance: PerformanceState,
    pub thermal: ThermalState,
    pub fuel: FuelState,
    pub battery: BatteryState,
}

impl VehicleState {
    /// Cold, stationary vehicle with the engine idling in first and a full tank.
    pub fn initial(config: &VehicleConfig) -> Self {
        let cold = config.thermal.cold_start_c;
        VehicleState {
            inputs: DriverInputs::default(),
            engine: EngineState {
                rpm: config.engine.start_rpm,
                ..Default::default()
            },
            drivetrain: DrivetrainState::default(),
            chassis: ChassisState::default(),
            performance: PerformanceState::default(),
            thermal: ThermalState {
                block_c: cold,
                coolant_c: cold,
                oil_c: cold,
                trans_c: cold,
                cabin_c: cold,
                intake_c: config.thermal.ambient_c,
                oil_pressure_bar: 0.0,
            },
            fuel: FuelState {
                fuel_liters: config.fuel.tank_capacity_l,
                fuel_rate_l_h: 0.0,
                avg_consumption_l_100km: config.fuel.initial_avg_l_100km,
                afr: config.fuel.stoich_afr,
                volumetric_efficiency: 0.0,
                range_km: 0.0,
            },
            battery: BatteryState::default(),
        }
    }
}
