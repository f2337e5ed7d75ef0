//! Engine, torque converter and gearbox coupled into one driveline.
//!
//! Each frame picks the converter mode, moves the engine speed and produces the
//! tractive force the chassis sees. Shifting runs later in the frame, after the
//! chassis has integrated, through `step_shift`.

use control::{GovernorConfig, IdleGovernor};
use log::debug;
use simcore::{
    ConverterConfig, Coupling, DrivetrainModel, Model, SimContext, VehicleConfig, VehicleState,
};

use crate::converter::{coupling_for, transfer_torque};
use crate::engine::Engine;
use crate::transmission::{ShiftDecision, Transmission};

#[derive(Debug, Clone)]
pub struct Drivetrain {
    engine: Engine,
    transmission: Transmission,
    converter: ConverterConfig,
    governor: IdleGovernor,
    tire_radius_m: f64,
    tire_circumference_m: f64,
    last_coupling: Option<Coupling>,
}

impl Drivetrain {
    pub fn new(config: &VehicleConfig) -> Self {
        let governor = IdleGovernor::new(GovernorConfig::p(
            config.engine.idle_rpm,
            config.engine.idle_governor_gain,
        ));
        Self {
            engine: Engine::new(config.engine.clone()),
            transmission: Transmission::new(config.transmission.clone()),
            converter: config.converter.clone(),
            governor,
            tire_radius_m: config.chassis.tire_radius_m,
            tire_circumference_m: config.chassis.tire_circumference_m(),
            last_coupling: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn transmission(&self) -> &Transmission {
        &self.transmission
    }

    /// Converter mode chosen on the most recent frame, if any frame has run.
    pub fn last_coupling(&self) -> Option<Coupling> {
        self.last_coupling
    }

    fn note_coupling(&mut self, coupling: Coupling, gear: u8, speed_mps: f64) {
        if self.last_coupling != Some(coupling) {
            if self.last_coupling.is_some() {
                debug!("converter {:?} (gear {}, {:.1} m/s)", coupling, gear, speed_mps);
            }
            self.last_coupling = Some(coupling);
        }
    }
}

impl Model for Drivetrain {
    fn reset(&mut self) {
        self.last_coupling = None;
    }
}

impl DrivetrainModel for Drivetrain {
    fn step_drivetrain(&mut self, ctx: SimContext, state: &mut VehicleState) {
        let dt = ctx.dt;
        let throttle = state.inputs.throttle;
        let gear = state.drivetrain.gear;
        let speed_mps = state.chassis.speed_mps;

        let total_ratio = self.transmission.total_ratio(gear);
        let trans_out_rpm = self
            .transmission
            .output_rpm(speed_mps, gear, self.tire_circumference_m);

        let coupling = coupling_for(gear, speed_mps, &self.converter);
        self.note_coupling(coupling, gear, speed_mps);
        state.drivetrain.coupling = coupling;

        match coupling {
            Coupling::Locked => {
                // Engine speed is dictated by the road
                state.engine.rpm = trans_out_rpm.max(self.engine.idle_rpm());
                state.drivetrain.converter_slip_rpm = 0.0;

                let crank_torque = self.engine.locked_drive_torque(state.engine.rpm, throttle);
                state.drivetrain.drive_force_n = crank_torque * total_ratio / self.tire_radius_m;

                self.engine.integrate(dt, throttle, 0.0, &mut state.engine);
            }
            Coupling::Slipping => {
                let slip_rpm = state.engine.rpm - trans_out_rpm;
                state.drivetrain.converter_slip_rpm = slip_rpm;

                let load_nm = transfer_torque(
                    slip_rpm,
                    self.engine.max_torque(state.engine.rpm),
                    &self.converter,
                );
                state.drivetrain.drive_force_n = load_nm * total_ratio / self.tire_radius_m;

                self.engine.integrate(dt, throttle, load_nm, &mut state.engine);
                state.engine.rpm = self.governor.correct(state.engine.rpm, dt).max(0.0);
            }
        }
    }

    fn step_shift(&mut self, ctx: SimContext, state: &mut VehicleState) {
        let gear = state.drivetrain.gear;
        let rpm = state.engine.rpm;

        match self.transmission.decide(rpm, gear) {
            ShiftDecision::Up => {
                state.drivetrain.gear = gear + 1;
                debug!("upshift {} -> {} at {:.0} rpm (t = {:.2} s)", gear, gear + 1, rpm, ctx.t);
            }
            ShiftDecision::Down => {
                state.drivetrain.gear = gear - 1;
                state.engine.rpm += self.transmission.downshift_bump_rpm();
                debug!("downshift {} -> {} at {:.0} rpm (t = {:.2} s)", gear, gear - 1, rpm, ctx.t);
            }
            ShiftDecision::Hold => {}
        }
    }
}
