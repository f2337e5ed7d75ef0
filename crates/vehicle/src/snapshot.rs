//! Read-only record handed to the instrument cluster after every frame.

use fuel::instant_l_per_100km;
use serde::Serialize;
use simcore::VehicleState;
use simcore::units::{mps_to_kmh, round_to};

/// Display values, already truncated or rounded the way the gauges show them.
/// Integer fields are truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub rpm: i32,
    pub speed_kmh: i32,
    pub gear: u8,
    /// Coolant temperature (°C)
    pub engine_temp: f64,
    pub oil_temp: f64,
    /// bar
    pub oil_pressure: f64,
    pub trans_temp: f64,
    pub fuel_liters: f64,
    pub battery_pct: f64,
    /// Instantaneous consumption, capped at 99.9
    pub fuel_usage_l100km: f64,
    pub range_km: i32,
    pub odometer_km: f64,
    pub afr: f64,
    pub power_hp: i32,
    pub torque_nm: i32,
    pub accel_g: f64,
    pub timer_0to100: f64,
    pub best_0to100: f64,
    /// Intake air temperature (°C)
    pub iat_temp: f64,
    pub ve_pct: i32,
    pub slip_rpm: i32,
    pub lockup: bool,
}

impl DashboardSnapshot {
    pub fn from_state(state: &VehicleState) -> Self {
        let speed_kmh = mps_to_kmh(state.chassis.speed_mps);
        let thermal = &state.thermal;
        let fuel = &state.fuel;

        DashboardSnapshot {
            rpm: state.engine.rpm as i32,
            speed_kmh: speed_kmh as i32,
            gear: state.drivetrain.gear,
            engine_temp: round_to(thermal.coolant_c, 1),
            oil_temp: round_to(thermal.oil_c, 1),
            oil_pressure: round_to(thermal.oil_pressure_bar, 2),
            trans_temp: round_to(thermal.trans_c, 1),
            fuel_liters: round_to(fuel.fuel_liters, 2),
            battery_pct: round_to(state.battery.charge_pct, 1),
            fuel_usage_l100km: round_to(instant_l_per_100km(fuel.fuel_rate_l_h, speed_kmh), 1),
            range_km: fuel.range_km as i32,
            odometer_km: round_to(state.chassis.odometer_km, 1),
            afr: round_to(fuel.afr, 1),
            power_hp: state.engine.power_hp as i32,
            torque_nm: state.engine.torque_net_nm as i32,
            accel_g: round_to(state.chassis.accel_g, 2),
            timer_0to100: round_to(state.performance.timer_0_100, 1),
            best_0to100: round_to(state.performance.best_0_100, 2),
            iat_temp: round_to(thermal.intake_c, 1),
            ve_pct: (fuel.volumetric_efficiency * 100.0) as i32,
            slip_rpm: state.drivetrain.converter_slip_rpm as i32,
            lockup: state.drivetrain.lockup_active(),
        }
    }
}
