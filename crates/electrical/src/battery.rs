use simcore::ElectricalModel;
use simcore::{ElectricalConfig, Model, SimContext, VehicleState};

/// Gauge needle range: a flat battery reads this...
const GAUGE_EMPTY_V: f64 = 11.5;
/// ...and a full one this much higher
const GAUGE_SPAN_V: f64 = 3.0;

/// Voltage shown by the battery gauge for a state of charge in percent.
pub fn gauge_voltage(charge_pct: f64) -> f64 {
    GAUGE_EMPTY_V + charge_pct / 100.0 * GAUGE_SPAN_V
}

/// Net change of charge (percent) over `dt`: a constant accessory drain,
/// offset by the alternator once the engine turns fast enough.
fn charge_delta(dt: f64, rpm: f64, constants: &ElectricalConfig) -> f64 {
    let draw = constants.drain_pct_per_s * dt;
    let generated = if rpm > constants.charge_min_rpm {
        constants.charge_pct_per_s * dt
    } else {
        0.0
    };
    generated - draw
}

#[derive(Debug, Clone, Default)]
pub struct Battery {
    pub constants: ElectricalConfig,
}

impl Battery {
    pub fn new(constants: ElectricalConfig) -> Self {
        Battery { constants }
    }
}

impl Model for Battery {
    fn reset(&mut self) {
        // No internal state to reset in this simple model
    }
}

impl ElectricalModel for Battery {
    fn step_electrical(&mut self, ctx: SimContext, state: &mut VehicleState) {
        let battery = &mut state.battery;
        let delta = charge_delta(ctx.dt, state.engine.rpm, &self.constants);
        battery.charge_pct = (battery.charge_pct + delta).clamp(0.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn step(battery: &mut Battery, state: &mut VehicleState, dt: f64) {
        battery.step_electrical(SimContext { dt, t: 0.0 }, state);
    }

    #[test]
    fn test_drains_with_engine_stopped() {
        let mut battery = Battery::default();
        let mut state = VehicleState::default();
        state.battery.charge_pct = 50.0;

        step(&mut battery, &mut state, 10.0);

        assert_abs_diff_eq!(state.battery.charge_pct, 49.8, epsilon = 1e-12);
    }

    #[test]
    fn test_alternator_charges_above_threshold() {
        let mut battery = Battery::default();
        let mut state = VehicleState::default();
        state.battery.charge_pct = 50.0;
        state.engine.rpm = 2000.0;

        step(&mut battery, &mut state, 10.0);

        assert_abs_diff_eq!(state.battery.charge_pct, 50.4, epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_abs_diff_eq!(charge_delta(1.0, 800.0, &ElectricalConfig::default()), -0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_charge_stays_in_range() {
        let mut battery = Battery::default();
        let mut state = VehicleState::default();
        state.engine.rpm = 3000.0;
        step(&mut battery, &mut state, 5.0);
        assert_eq!(state.battery.charge_pct, 100.0);

        state.engine.rpm = 0.0;
        state.battery.charge_pct = 0.01;
        step(&mut battery, &mut state, 5.0);
        assert_eq!(state.battery.charge_pct, 0.0);
    }

    #[test]
    fn test_gauge_voltage_span() {
        assert_abs_diff_eq!(gauge_voltage(0.0), 11.5, epsilon = 1e-12);
        assert_abs_diff_eq!(gauge_voltage(100.0), 14.5, epsilon = 1e-12);
        assert_abs_diff_eq!(gauge_voltage(50.0), 13.0, epsilon = 1e-12);
    }
}
