//! Longitudinal chassis dynamics
//!
//! Single-track point mass: drive force from the drivetrain against aero drag,
//! rolling resistance, brakes and a lumped mechanical loss. Also owns the
//! odometer and the 0-100 timer since both are pure functions of road speed.

use log::info;
use simcore::units::{GRAVITY, air_density, mps_to_kmh};
use simcore::{ChassisConfig, ChassisModel, Model, SimContext, VehicleState};

use crate::performance::update_launch_timer;

/// At or below this speed resistive forces may hold the car but never push it backwards.
const STANDSTILL_MPS: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct Chassis {
    config: ChassisConfig,
}

impl Chassis {
    pub fn new(config: ChassisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChassisConfig {
        &self.config
    }

    pub fn aero_drag(&self, speed_mps: f64, intake_temp_c: f64) -> f64 {
        let rho = air_density(intake_temp_c);
        0.5 * rho * self.config.drag_coeff * self.config.frontal_area_m2 * speed_mps.powi(2)
    }

    pub fn rolling_resistance(&self) -> f64 {
        self.config.rolling_resistance * self.config.mass_kg * GRAVITY
    }

    /// Sum of all forces opposing motion (N).
    pub fn resistive_force(&self, speed_mps: f64, brake: f64, intake_temp_c: f64) -> f64 {
        self.aero_drag(speed_mps, intake_temp_c)
            + self.rolling_resistance()
            + brake * self.config.max_brake_force_n
            + speed_mps * self.config.mechanical_loss_coeff
    }
}

impl Model for Chassis {
    fn reset(&mut self) {
        // Chassis keeps no state of its own
    }
}

impl ChassisModel for Chassis {
    fn step_chassis(&mut self, ctx: SimContext, state: &mut VehicleState) {
        let dt = ctx.dt;
        let chassis = &mut state.chassis;

        let mut net_force = state.drivetrain.drive_force_n
            - self.resistive_force(chassis.speed_mps, state.inputs.brake, state.thermal.intake_c);

        if chassis.speed_mps <= STANDSTILL_MPS && net_force < 0.0 {
            net_force = 0.0;
            chassis.speed_mps = 0.0;
        }

        let accel = net_force / self.config.mass_kg;
        chassis.speed_mps = (chassis.speed_mps + accel * dt).max(0.0);
        chassis.accel_g = accel / GRAVITY;

        let distance_km = chassis.speed_mps * dt / 1000.0;
        chassis.odometer_km += distance_km.max(0.0);

        let speed_kmh = mps_to_kmh(chassis.speed_mps);
        if let Some(run_time) =
            update_launch_timer(&mut state.performance, speed_kmh, chassis.accel_g, dt)
        {
            info!("0-100 km/h in {:.2} s (t = {:.2} s)", run_time, ctx.t);
        }
    }
}
