use crate::state::VehicleState;

#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}

pub trait Model {
    fn reset(&mut self);
}

pub trait DrivetrainModel: Model {
    /// Couples engine and wheels through the converter, integrates engine speed
    /// and publishes the tractive force for the chassis step.
    fn step_drivetrain(&mut self, ctx: SimContext, state: &mut VehicleState);

    /// Discrete gear changes, evaluated after the chassis has moved.
    fn step_shift(&mut self, ctx: SimContext, state: &mut VehicleState);
}

pub trait ChassisModel: Model {
    fn step_chassis(&mut self, ctx: SimContext, state: &mut VehicleState);
}

pub trait ThermalModel: Model {
    fn step_thermal(&mut self, ctx: SimContext, state: &mut VehicleState);
}

pub trait FuelModel: Model {
    fn step_fuel(&mut self, ctx: SimContext, state: &mut VehicleState);
}

pub trait ElectricalModel: Model {
    fn step_electrical(&mut self, ctx: SimContext, state: &mut VehicleState);
}
