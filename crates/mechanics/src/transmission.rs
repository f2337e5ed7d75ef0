//! Stepped automatic gearbox: ratio table and threshold shift schedule.

use simcore::TransmissionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDecision {
    Hold,
    Up,
    /// Downshift; the engine gets a fixed rev-match bump
    Down,
}

#[derive(Debug, Clone)]
pub struct Transmission {
    config: TransmissionConfig,
}

impl Transmission {
    pub fn new(config: TransmissionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransmissionConfig {
        &self.config
    }

    pub fn top_gear(&self) -> u8 {
        self.config.top_gear()
    }

    /// Ratio of a 1-based gear; out-of-range gears read as the nearest valid one.
    pub fn ratio(&self, gear: u8) -> f64 {
        let index = gear.clamp(1, self.top_gear()) as usize - 1;
        self.config.gear_ratios[index]
    }

    /// Gear ratio times final drive.
    pub fn total_ratio(&self, gear: u8) -> f64 {
        self.ratio(gear) * self.config.final_drive
    }

    /// Road speed reflected back through the gearbox, in engine rpm.
    pub fn output_rpm(&self, speed_mps: f64, gear: u8, tire_circumference_m: f64) -> f64 {
        (speed_mps / tire_circumference_m) * 60.0 * self.total_ratio(gear)
    }

    /// Threshold schedule. The gap between the up and down points is the only
    /// thing keeping the box from hunting.
    pub fn decide(&self, rpm: f64, gear: u8) -> ShiftDecision {
        if rpm > self.config.shift_up_rpm && gear < self.top_gear() {
            ShiftDecision::Up
        } else if rpm < self.config.shift_down_rpm && gear > 1 {
            ShiftDecision::Down
        } else {
            ShiftDecision::Hold
        }
    }

    pub fn downshift_bump_rpm(&self) -> f64 {
        self.config.downshift_bump_rpm
    }
}
