//! The whole vehicle, advanced one frame at a time.

use electrical::Battery;
use fuel::FuelSystem;
use log::debug;
use mechanics::{Chassis, Drivetrain};
use simcore::{
    ChassisModel, ConfigError, DrivetrainModel, ElectricalModel, FuelModel, Model, SimContext,
    ThermalModel, VehicleConfig, VehicleState,
};
use thermal::ThermalNetwork;

use crate::snapshot::DashboardSnapshot;

/// Pedal positions outside [0, 1] are clamped; NaN reads as released.
fn pedal(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Owns every model plus the shared state they advance.
///
/// `update` integrates with whatever `dt` it is handed, with no sub-stepping, so
/// long frames carry proportionally larger integration error. A zero or negative
/// `dt` does not panic, and the odometer and fuel tank still never run backwards.
#[derive(Debug, Clone)]
pub struct VehicleSimulator {
    config: VehicleConfig,
    state: VehicleState,
    drivetrain: Drivetrain,
    chassis: Chassis,
    thermal: ThermalNetwork,
    fuel: FuelSystem,
    battery: Battery,
    elapsed: f64,
}

impl VehicleSimulator {
    /// Cold, stationary vehicle in first gear with the engine at its start speed.
    pub fn new(config: VehicleConfig) -> Result<Self, ConfigError> {
        let state = VehicleState::initial(&config);
        Self::with_state(config, state)
    }

    /// Starts from an arbitrary state. The gear is pulled into the ratio table.
    pub fn with_state(config: VehicleConfig, mut state: VehicleState) -> Result<Self, ConfigError> {
        config.validate()?;
        state.drivetrain.gear = state.drivetrain.gear.clamp(1, config.transmission.top_gear());

        debug!(
            "vehicle simulator: {:.0} kg, {} gears, {:.1} L",
            config.chassis.mass_kg,
            config.transmission.top_gear(),
            config.engine.displacement_l
        );
        Ok(Self::assemble(config, state))
    }

    fn assemble(config: VehicleConfig, state: VehicleState) -> Self {
        Self {
            drivetrain: Drivetrain::new(&config),
            chassis: Chassis::new(config.chassis.clone()),
            thermal: ThermalNetwork::new(config.thermal.clone()),
            fuel: FuelSystem::new(config.fuel.clone(), config.engine.displacement_l),
            battery: Battery::new(config.electrical.clone()),
            config,
            state,
            elapsed: 0.0,
        }
    }

    /// Latches pedal positions for the next frame. The throttle it replaces becomes
    /// the previous-frame throttle seen by tip-in detection.
    pub fn set_inputs(&mut self, throttle: f64, brake: f64) {
        let inputs = &mut self.state.inputs;
        inputs.prev_throttle = inputs.throttle;
        inputs.throttle = pedal(throttle);
        inputs.brake = pedal(brake);
    }

    /// Advances every model by `dt` seconds and returns what the gauges show.
    pub fn update(&mut self, dt: f64) -> DashboardSnapshot {
        let ctx = SimContext { dt, t: self.elapsed };

        self.drivetrain.step_drivetrain(ctx, &mut self.state);
        self.chassis.step_chassis(ctx, &mut self.state);
        self.drivetrain.step_shift(ctx, &mut self.state);
        self.thermal.step_thermal(ctx, &mut self.state);
        self.fuel.step_fuel(ctx, &mut self.state);
        self.battery.step_electrical(ctx, &mut self.state);

        self.elapsed += dt;
        self.snapshot()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::from_state(&self.state)
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Simulated time since construction or the last reset (s).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Back to the cold-start state, as if freshly constructed.
    pub fn reset(&mut self) {
        self.state = VehicleState::initial(&self.config);
        self.elapsed = 0.0;
        self.drivetrain.reset();
        self.chassis.reset();
        self.thermal.reset();
        self.fuel.reset();
        self.battery.reset();
    }
}

impl Default for VehicleSimulator {
    fn default() -> Self {
        let config = VehicleConfig::default();
        let state = VehicleState::initial(&config);
        Self::assemble(config, state)
    }
}
