//! Fuel metering
//!
//! Speed-density: airflow from displacement, engine speed and volumetric
//! efficiency; fuel from the target air/fuel ratio. Handles deceleration cutoff,
//! full-load and tip-in enrichment, and keeps the tank and economy figures.

use log::{info, warn};
use mechanics::volumetric_efficiency;
use simcore::units::{air_density, mps_to_kmh};
use simcore::{FuelConfig, FuelModel, Model, SimContext, VehicleState};

use crate::economy::{range_km, smooth_average};

/// Four-stroke: one intake stroke per cylinder every two revolutions
const REVS_PER_INTAKE_CYCLE: f64 = 120.0;

/// Mixture commanded for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixture {
    /// Ratio shown on the gauge; the cutoff display value while fuel is cut
    pub afr: f64,
    /// Fuel mass flow (kg/s)
    pub fuel_mass_kg_s: f64,
}

#[derive(Debug, Clone)]
pub struct FuelSystem {
    config: FuelConfig,
    displacement_l: f64,
    tank_dry: bool,
}

impl FuelSystem {
    pub fn new(config: FuelConfig, displacement_l: f64) -> Self {
        Self {
            config,
            displacement_l,
            tank_dry: false,
        }
    }

    pub fn config(&self) -> &FuelConfig {
        &self.config
    }

    /// Air mass flow (kg/s) into the engine.
    pub fn air_mass_flow(&self, rpm: f64, ve: f64, intake_c: f64) -> f64 {
        let intake_l_s = rpm / REVS_PER_INTAKE_CYCLE * self.displacement_l * ve;
        intake_l_s / 1000.0 * air_density(intake_c)
    }

    pub fn fuel_cut(&self, throttle: f64, rpm: f64) -> bool {
        throttle < self.config.cutoff_max_throttle && rpm > self.config.cutoff_min_rpm
    }

    pub fn mixture(&self, air_mass_kg_s: f64, throttle: f64, prev_throttle: f64, rpm: f64) -> Mixture {
        let mut mixture = if self.fuel_cut(throttle, rpm) {
            Mixture {
                afr: self.config.cutoff_afr_display,
                fuel_mass_kg_s: 0.0,
            }
        } else {
            let afr = if throttle > self.config.power_enrichment_throttle {
                self.config.power_afr
            } else {
                self.config.stoich_afr
            };
            Mixture {
                afr,
                fuel_mass_kg_s: air_mass_kg_s / afr,
            }
        };

        // Accelerator-pump shot on a sharp tip-in; the displayed AFR is unchanged
        if throttle - prev_throttle > self.config.tip_in_threshold {
            mixture.fuel_mass_kg_s *= self.config.tip_in_multiplier;
        }
        mixture
    }

    fn note_tank_level(&mut self, fuel_liters: f64, t: f64) {
        if fuel_liters <= 0.0 {
            if !self.tank_dry {
                warn!("fuel tank empty at t = {:.1} s", t);
                self.tank_dry = true;
            }
        } else if self.tank_dry {
            info!("fuel tank refilled ({:.1} L)", fuel_liters);
            self.tank_dry = false;
        }
    }
}

impl Model for FuelSystem {
    fn reset(&mut self) {
        self.tank_dry = false;
    }
}

impl FuelModel for FuelSystem {
    fn step_fuel(&mut self, ctx: SimContext, state: &mut VehicleState) {
        let dt = ctx.dt;
        let rpm = state.engine.rpm;
        let inputs = state.inputs;

        let ve = volumetric_efficiency(rpm, inputs.throttle);
        let air = self.air_mass_flow(rpm, ve, state.thermal.intake_c);
        let mixture = self.mixture(air, inputs.throttle, inputs.prev_throttle, rpm);

        let fuel_l_s = mixture.fuel_mass_kg_s / self.config.density_kg_per_l;

        let fuel = &mut state.fuel;
        fuel.volumetric_efficiency = ve;
        fuel.afr = mixture.afr;
        fuel.fuel_rate_l_h = fuel_l_s * 3600.0;
        fuel.fuel_liters = (fuel.fuel_liters - (fuel_l_s * dt).max(0.0)).max(0.0);

        let speed_kmh = mps_to_kmh(state.chassis.speed_mps);
        fuel.avg_consumption_l_100km = smooth_average(
            fuel.avg_consumption_l_100km,
            fuel.fuel_rate_l_h,
            speed_kmh,
            &self.config,
        );
        fuel.range_km = range_km(fuel.fuel_liters, fuel.avg_consumption_l_100km, &self.config);

        let level = fuel.fuel_liters;
        self.note_tank_level(level, ctx.t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use simcore::VehicleConfig;

    const CTX: SimContext = SimContext { dt: 0.1, t: 0.0 };

    fn system() -> (FuelSystem, VehicleState) {
        let config = VehicleConfig::default();
        let fuel = FuelSystem::new(config.fuel.clone(), config.engine.displacement_l);
        let mut state = VehicleState::initial(&config);
        state.thermal.intake_c = 15.0;
        (fuel, state)
    }

    #[test]
    fn test_air_mass_flow_at_peak_ve() {
        let (fuel, _) = system();
        // 4000/120 · 6 L · 1.0 = 200 L/s
        assert_abs_diff_eq!(fuel.air_mass_flow(4000.0, 1.0, 15.0), 0.2 * 1.225, epsilon = 1e-9);
    }

    #[test]
    fn test_stoich_and_power_targets() {
        let (fuel, _) = system();
        assert_eq!(fuel.mixture(0.1, 0.5, 0.5, 3000.0).afr, 14.7);
        assert_eq!(fuel.mixture(0.1, 0.71, 0.71, 3000.0).afr, 12.5);
        assert_abs_diff_eq!(
            fuel.mixture(0.1, 0.71, 0.71, 3000.0).fuel_mass_kg_s,
            0.1 / 12.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_overrun_cutoff() {
        let (fuel, _) = system();
        let cut = fuel.mixture(0.05, 0.0, 0.0, 2500.0);
        assert_eq!(cut.afr, 99.9);
        assert_eq!(cut.fuel_mass_kg_s, 0.0);

        // at idle speed the engine keeps fuelling
        let idle = fuel.mixture(0.05, 0.0, 0.0, 1100.0);
        assert_eq!(idle.afr, 14.7);
        assert!(idle.fuel_mass_kg_s > 0.0);
    }

    #[test]
    fn test_tip_in_enrichment() {
        let (fuel, _) = system();
        let steady = fuel.mixture(0.1, 0.5, 0.45, 3000.0);
        let stab = fuel.mixture(0.1, 0.5, 0.2, 3000.0);
        assert_eq!(stab.afr, steady.afr);
        assert_abs_diff_eq!(stab.fuel_mass_kg_s, steady.fuel_mass_kg_s * 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_step_burns_fuel_and_updates_gauges() {
        let (mut fuel, mut state) = system();
        state.engine.rpm = 3000.0;
        state.inputs.throttle = 0.5;
        state.inputs.prev_throttle = 0.5;

        fuel.step_fuel(CTX, &mut state);

        let ve = volumetric_efficiency(3000.0, 0.5);
        let l_s = 3000.0 / 120.0 * 6.0 * ve / 1000.0 * 1.225 / 14.7 / 0.74;
        assert_abs_diff_eq!(state.fuel.volumetric_efficiency, ve, epsilon = 1e-12);
        assert_abs_diff_eq!(state.fuel.fuel_rate_l_h, l_s * 3600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(state.fuel.fuel_liters, 90.0 - l_s * 0.1, epsilon = 1e-12);
        // stationary: the average holds and range follows it
        assert_eq!(state.fuel.avg_consumption_l_100km, 15.0);
        assert_abs_diff_eq!(state.fuel.range_km, state.fuel.fuel_liters / 15.0 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tank_never_goes_negative() {
        let (mut fuel, mut state) = system();
        state.fuel.fuel_liters = 0.001;
        state.engine.rpm = 5000.0;
        state.inputs.throttle = 1.0;
        state.inputs.prev_throttle = 1.0;

        for _ in 0..10 {
            fuel.step_fuel(CTX, &mut state);
            assert!(state.fuel.fuel_liters >= 0.0);
        }
        assert_eq!(state.fuel.fuel_liters, 0.0);
        assert_eq!(state.fuel.range_km, 0.0);
        assert!(fuel.tank_dry);

        fuel.reset();
        assert!(!fuel.tank_dry);
    }

    #[test]
    fn test_negative_dt_does_not_refill() {
        let (mut fuel, mut state) = system();
        state.engine.rpm = 3000.0;
        state.inputs.throttle = 0.5;

        fuel.step_fuel(SimContext { dt: -0.1, t: 0.0 }, &mut state);

        assert_eq!(state.fuel.fuel_liters, 90.0);
    }
}
