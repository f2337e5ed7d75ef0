//! Idle governor
//!
//! Proportional controller that pulls engine speed back up toward idle while the
//! converter is slipping, so a closed throttle under load can't stall the engine.
//! It only ever acts from below: above the target it leaves the speed alone.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernorConfig {
    /// Idle speed the governor defends (rpm)
    pub target_rpm: f64,
    /// Proportional gain (1/s): fraction of the deficit recovered per second
    pub kp: f64,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            target_rpm: 600.0,
            kp: 2.0,
        }
    }
}

impl GovernorConfig {
    pub fn p(target_rpm: f64, kp: f64) -> Self {
        Self { target_rpm, kp }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdleGovernor {
    config: GovernorConfig,
}

impl IdleGovernor {
    pub fn new(config: GovernorConfig) -> Self {
        Self { config }
    }

    /// Speed-rate demand (rpm/s) for the given engine speed; zero at or above idle.
    pub fn demand(&self, rpm: f64) -> f64 {
        let deficit = self.config.target_rpm - rpm;
        if deficit > 0.0 {
            self.config.kp * deficit
        } else {
            0.0
        }
    }

    /// Applies one step of the governor and returns the corrected engine speed.
    pub fn correct(&self, rpm: f64, dt: f64) -> f64 {
        rpm + self.demand(rpm) * dt
    }

    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }
}
