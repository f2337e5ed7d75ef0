//! Engine model
//!
//! Provides:
//! - The full-load torque map and volumetric efficiency (pure functions of rpm/throttle)
//! - Friction and closed-throttle vacuum drag
//! - Crank speed integration against an external load torque

use simcore::units::rad_s_to_rpm;
use simcore::{EngineConfig, EngineState, TorqueCurve};

const BASE_FRICTION_NM: f64 = 20.0;
/// Speed-dependent friction reaches this at `FRICTION_REF_RPM`, growing with rpm²
const SPEED_FRICTION_NM: f64 = 60.0;
const FRICTION_REF_RPM: f64 = 6000.0;

/// Pumping loss against a closed throttle plate, linear in rpm
const VACUUM_DRAG_NM: f64 = 40.0;
const VACUUM_REF_RPM: f64 = 3000.0;
const VACUUM_DRAG_MAX_THROTTLE: f64 = 0.05;

/// Below this throttle a locked driveline sees engine braking instead of drive
const OVERRUN_MAX_THROTTLE: f64 = 0.01;
const OVERRUN_BASE_NM: f64 = 40.0;
const OVERRUN_RPM_PER_NM: f64 = 100.0;

/// N·m × rpm → hp
const HP_DIVISOR: f64 = 7120.0;

/// Full-load torque (N·m) at the given engine speed.
pub fn torque_curve(curve: &TorqueCurve, rpm: f64) -> f64 {
    if rpm < curve.stall_rpm {
        return curve.stall_floor_nm;
    }
    if rpm < curve.peak_start_rpm {
        let factor = (rpm - curve.stall_rpm) / (curve.peak_start_rpm - curve.stall_rpm);
        curve.ramp_start_nm + (curve.peak_nm - curve.ramp_start_nm) * factor
    } else if rpm <= curve.peak_end_rpm {
        curve.peak_nm
    } else if rpm <= curve.cutoff_rpm {
        let factor = (rpm - curve.peak_end_rpm) / (curve.cutoff_rpm - curve.peak_end_rpm);
        curve.peak_nm - (curve.peak_nm - curve.fade_end_nm) * factor
    } else {
        0.0
    }
}

/// Fraction of the swept volume actually filled per intake stroke.
///
/// Parabolic in rpm with its peak at 4000 rpm, scaled by throttle opening,
/// never below 0.1.
pub fn volumetric_efficiency(rpm: f64, throttle: f64) -> f64 {
    let ve_rpm = 0.85 + 0.15 * (1.0 - ((rpm - 4000.0) / 3500.0).powi(2));
    let ve_load = 0.15 + 0.85 * throttle;
    (ve_rpm * ve_load).max(0.1)
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn idle_rpm(&self) -> f64 {
        self.config.idle_rpm
    }

    pub fn max_torque(&self, rpm: f64) -> f64 {
        torque_curve(&self.config.torque_curve, rpm)
    }

    /// Internal friction (N·m), plus vacuum drag when the throttle is shut.
    pub fn friction_torque(rpm: f64, throttle: f64) -> f64 {
        let mut friction = BASE_FRICTION_NM + (rpm / FRICTION_REF_RPM).powi(2) * SPEED_FRICTION_NM;
        if throttle < VACUUM_DRAG_MAX_THROTTLE {
            friction += (rpm / VACUUM_REF_RPM) * VACUUM_DRAG_NM;
        }
        friction
    }

    /// Crank torque delivered into a locked driveline. Negative (engine braking)
    /// on a closed throttle.
    pub fn locked_drive_torque(&self, rpm: f64, throttle: f64) -> f64 {
        if throttle < OVERRUN_MAX_THROTTLE {
            -OVERRUN_BASE_NM - rpm / OVERRUN_RPM_PER_NM
        } else {
            self.max_torque(rpm) * throttle
        }
    }

    /// Integrates crank speed over `dt` against `load_torque_nm` and updates
    /// net torque and power. Speed is clamped to `[0, redline + 200]`.
    pub fn integrate(&self, dt: f64, throttle: f64, load_torque_nm: f64, state: &mut EngineState) {
        let combustion = self.max_torque(state.rpm) * throttle;
        let friction = Self::friction_torque(state.rpm, throttle);

        state.torque_net_nm = combustion - friction - load_torque_nm;

        let alpha = state.torque_net_nm / self.config.inertia_kg_m2;
        state.rpm += rad_s_to_rpm(alpha * dt);
        state.rpm = state.rpm.clamp(0.0, self.config.max_rpm());

        state.power_hp = combustion * state.rpm / HP_DIVISOR;
    }
}
