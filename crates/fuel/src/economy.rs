//! Consumption figures derived from the metered fuel rate.

use simcore::FuelConfig;

/// Instantaneous reading never exceeds this on the gauge (L/100km)
pub const INSTANT_DISPLAY_MAX: f64 = 99.9;
/// Below this speed the instantaneous reading is zero rather than a division by ~0
pub const INSTANT_MIN_SPEED_KMH: f64 = 1.0;

/// Instantaneous consumption for display.
pub fn instant_l_per_100km(fuel_rate_l_h: f64, speed_kmh: f64) -> f64 {
    if speed_kmh > INSTANT_MIN_SPEED_KMH {
        (fuel_rate_l_h / speed_kmh * 100.0).min(INSTANT_DISPLAY_MAX)
    } else {
        0.0
    }
}

/// Folds one sample into the exponentially weighted economy average. The
/// average is left alone at low speed and while fuel is cut.
pub fn smooth_average(
    average: f64,
    fuel_rate_l_h: f64,
    speed_kmh: f64,
    config: &FuelConfig,
) -> f64 {
    if speed_kmh > config.avg_min_speed_kmh && fuel_rate_l_h > 0.0 {
        let sample = fuel_rate_l_h / speed_kmh * 100.0;
        average * (1.0 - config.avg_weight) + sample * config.avg_weight
    } else {
        average
    }
}

/// Distance to empty at the smoothed average (km).
pub fn range_km(fuel_liters: f64, average_l_100km: f64, config: &FuelConfig) -> f64 {
    if average_l_100km > 0.1 {
        fuel_liters / average_l_100km * 100.0
    } else {
        config.range_sentinel_km
    }
}
