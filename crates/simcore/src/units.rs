//! Unit conversions and atmosphere helpers shared by every model.

use std::f64::consts::PI;

pub const GRAVITY: f64 = 9.81;

/// Sea-level standard density (kg/m³) at the reference temperature below.
pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;
pub const REFERENCE_AIR_TEMP_K: f64 = 288.15;
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

pub fn mps_to_kmh(speed_mps: f64) -> f64 {
    speed_mps * 3.6
}

pub fn rpm_to_rad_s(rpm: f64) -> f64 {
    rpm * 2.0 * PI / 60.0
}

pub fn rad_s_to_rpm(omega: f64) -> f64 {
    omega * 60.0 / (2.0 * PI)
}

/// Ideal-gas density of intake air at constant pressure.
pub fn air_density(intake_temp_c: f64) -> f64 {
    let temp_kelvin = intake_temp_c + CELSIUS_TO_KELVIN;
    SEA_LEVEL_AIR_DENSITY * (REFERENCE_AIR_TEMP_K / temp_kelvin)
}

/// Rounds to a fixed number of decimal places for display.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
