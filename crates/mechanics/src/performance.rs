//! 0-100 km/h launch timer.

use simcore::PerformanceState;

/// Below this speed the timer resets and waits for a new launch.
pub const LAUNCH_RESET_KMH: f64 = 1.0;
pub const LAUNCH_TARGET_KMH: f64 = 100.0;
/// Longitudinal acceleration that starts the clock once rolling.
pub const LAUNCH_ARM_G: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPhase {
    /// Stopped; timer held at zero
    Idle,
    /// Rolling below 100 km/h but the clock hasn't started
    Armed,
    Running,
    /// At or past 100 km/h with no run in progress
    Done,
}

impl LaunchPhase {
    pub fn of(perf: &PerformanceState, speed_kmh: f64) -> Self {
        if speed_kmh < LAUNCH_RESET_KMH {
            LaunchPhase::Idle
        } else if perf.is_doing_0_100 {
            LaunchPhase::Running
        } else if speed_kmh >= LAUNCH_TARGET_KMH {
            LaunchPhase::Done
        } else {
            LaunchPhase::Armed
        }
    }
}

/// Advances the timer by one frame. Returns the run time when a run completes.
///
/// A completed run always replaces `best_0_100`, even when it is slower than
/// the previous one.
pub fn update_launch_timer(
    perf: &mut PerformanceState,
    speed_kmh: f64,
    accel_g: f64,
    dt: f64,
) -> Option<f64> {
    if speed_kmh < LAUNCH_RESET_KMH {
        perf.is_doing_0_100 = false;
        perf.timer_0_100 = 0.0;
    } else if speed_kmh > LAUNCH_RESET_KMH && speed_kmh < LAUNCH_TARGET_KMH {
        if !perf.is_doing_0_100 && accel_g > LAUNCH_ARM_G {
            perf.is_doing_0_100 = true;
        }
        if perf.is_doing_0_100 {
            perf.timer_0_100 += dt;
        }
    } else if speed_kmh >= LAUNCH_TARGET_KMH && perf.is_doing_0_100 {
        perf.best_0_100 = perf.timer_0_100;
        perf.is_doing_0_100 = false;
        return Some(perf.best_0_100);
    }
    None
}
