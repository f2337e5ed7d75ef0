//! Torque converter
//!
//! Two states, selected fresh every frame from gear and road speed alone:
//! `Locked` when the lockup clutch may engage, `Slipping` otherwise. There is no
//! hysteresis band, so a vehicle hovering at the lockup speed can toggle every frame.

use simcore::{ConverterConfig, Coupling};

/// Pure lockup predicate.
pub fn coupling_for(gear: u8, speed_mps: f64, config: &ConverterConfig) -> Coupling {
    if gear >= config.lockup_min_gear && speed_mps > config.lockup_min_speed_mps {
        Coupling::Locked
    } else {
        Coupling::Slipping
    }
}

/// Torque carried across the fluid coupling for a given slip (engine rpm minus
/// transmission input rpm). Grows with slip², keeps the sign of the slip, and is
/// limited to a multiple of what the engine can produce at its current speed.
pub fn transfer_torque(slip_rpm: f64, engine_max_torque_nm: f64, config: &ConverterConfig) -> f64 {
    let raw = slip_rpm.signum() * slip_rpm.powi(2) * config.coupling_coeff;
    let limit = engine_max_torque_nm * config.max_torque_multiple;
    raw.max(-limit).min(limit)
}
