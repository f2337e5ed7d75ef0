//! Lumped-capacitance thermal network
//!
//! Four masses exchange heat through speed-dependent conductances:
//!
//! ```text
//!   fuel ──► block ──► coolant ──► radiator ──► ambient
//!              │          ▲
//!              ▼          │ oil cooler
//!             oil ────────┘
//!
//!   converter slip ──► ATF ──► ambient
//! ```
//!
//! All flows of a frame are evaluated from the temperatures at the start of the
//! frame, then every mass is advanced with one explicit Euler step.

use simcore::units::rpm_to_rad_s;
use simcore::{Model, SimContext, ThermalConfig, ThermalModel, ThermalState, VehicleState};

use crate::intake::relax_intake_temp;
use crate::oil::oil_pressure_bar;

/// Conductances (W/K) scale linearly from their base value to base + span at this speed
const CONDUCTANCE_REF_RPM: f64 = 6000.0;
const BLOCK_COOLANT_BASE: f64 = 50.0;
const BLOCK_COOLANT_SPAN: f64 = 300.0;
const BLOCK_OIL_BASE: f64 = 20.0;
const BLOCK_OIL_SPAN: f64 = 80.0;

/// Radiator airflow: fan baseline plus ram air
const FAN_AIRFLOW: f64 = 5.0;
const RAM_AIRFLOW_PER_MPS: f64 = 2.0;
const RADIATOR_W_PER_K_PER_AIRFLOW: f64 = 50.0;

const OIL_COOLER_W_PER_K: f64 = 15.0;

/// Fraction of converter slip power that ends up in the fluid
const SLIP_HEAT_FRACTION: f64 = 0.5;
const ATF_COOLING_W_PER_K: f64 = 20.0;
const ATF_COOLING_SPEED_REF_MPS: f64 = 10.0;

const CABIN_RELAX_RATE: f64 = 0.05;

/// Radiator share of the coolant flow for a given coolant temperature.
pub fn thermostat_opening(coolant_c: f64, config: &ThermalConfig) -> f64 {
    ((coolant_c - config.thermostat_open_c) / config.thermostat_span_c)
        .clamp(config.thermostat_min_open, 1.0)
}

/// Heat flows (W) for one frame. Positive in the direction of the name.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeatFlows {
    pub combustion_to_block: f64,
    pub block_to_coolant: f64,
    pub block_to_oil: f64,
    pub coolant_to_air: f64,
    pub oil_to_coolant: f64,
    pub slip_to_atf: f64,
    pub atf_to_air: f64,
}

#[derive(Debug, Clone)]
pub struct ThermalNetwork {
    config: ThermalConfig,
}

impl ThermalNetwork {
    pub fn new(config: ThermalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }

    pub fn heat_flows(&self, state: &VehicleState) -> HeatFlows {
        let temps = &state.thermal;
        let ambient = self.config.ambient_c;
        let rpm = state.engine.rpm;
        let speed = state.chassis.speed_mps;
        let load = rpm / CONDUCTANCE_REF_RPM;

        let k_block_coolant = BLOCK_COOLANT_BASE + load * BLOCK_COOLANT_SPAN;
        let k_block_oil = BLOCK_OIL_BASE + load * BLOCK_OIL_SPAN;

        let airflow = FAN_AIRFLOW + speed * RAM_AIRFLOW_PER_MPS;
        let k_radiator =
            thermostat_opening(temps.coolant_c, &self.config) * airflow * RADIATOR_W_PER_K_PER_AIRFLOW;

        let slip_rad_s = rpm_to_rad_s(state.drivetrain.converter_slip_rpm);

        HeatFlows {
            // previous frame's fuel rate; fuel metering runs after this step
            combustion_to_block: state.fuel.fuel_rate_l_h * self.config.heat_per_fuel_lph,
            block_to_coolant: k_block_coolant * (temps.block_c - temps.coolant_c),
            block_to_oil: k_block_oil * (temps.block_c - temps.oil_c),
            coolant_to_air: k_radiator * (temps.coolant_c - ambient),
            oil_to_coolant: OIL_COOLER_W_PER_K * (temps.oil_c - temps.coolant_c),
            slip_to_atf: (state.engine.torque_net_nm * slip_rad_s).abs() * SLIP_HEAT_FRACTION,
            atf_to_air: ATF_COOLING_W_PER_K
                * (temps.trans_c - ambient)
                * (1.0 + speed / ATF_COOLING_SPEED_REF_MPS),
        }
    }

    fn block_capacity(&self) -> f64 {
        self.config.block_mass_kg * self.config.block_specific_heat
    }

    fn coolant_capacity(&self) -> f64 {
        self.config.coolant_mass_kg * self.config.coolant_specific_heat
    }

    fn oil_capacity(&self) -> f64 {
        self.config.oil_mass_kg * self.config.oil_specific_heat
    }

    fn atf_capacity(&self) -> f64 {
        self.config.atf_mass_kg * self.config.atf_specific_heat
    }

    fn integrate(&self, flows: &HeatFlows, dt: f64, temps: &mut ThermalState) {
        temps.block_c += (flows.combustion_to_block - flows.block_to_coolant - flows.block_to_oil)
            / self.block_capacity()
            * dt;
        temps.coolant_c += (flows.block_to_coolant + flows.oil_to_coolant - flows.coolant_to_air)
            / self.coolant_capacity()
            * dt;
        temps.oil_c += (flows.block_to_oil - flows.oil_to_coolant) / self.oil_capacity() * dt;
        temps.trans_c += (flows.slip_to_atf - flows.atf_to_air) / self.atf_capacity() * dt;
    }
}

impl Model for ThermalNetwork {
    fn reset(&mut self) {}
}

impl ThermalModel for ThermalNetwork {
    fn step_thermal(&mut self, ctx: SimContext, state: &mut VehicleState) {
        let dt = ctx.dt;
        let flows = self.heat_flows(state);
        let rpm = state.engine.rpm;
        let speed = state.chassis.speed_mps;
        let temps = &mut state.thermal;

        temps.intake_c =
            relax_intake_temp(temps.intake_c, self.config.ambient_c, temps.block_c, speed, dt);

        self.integrate(&flows, dt, temps);

        temps.oil_pressure_bar = oil_pressure_bar(rpm, temps.oil_c);
        temps.cabin_c += (self.config.cabin_target_c - temps.cabin_c) * CABIN_RELAX_RATE * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const CTX: SimContext = SimContext { dt: 0.1, t: 0.0 };

    fn soaked(temp_c: f64) -> VehicleState {
        let mut state = VehicleState::default();
        state.thermal = ThermalState {
            block_c: temp_c,
            coolant_c: temp_c,
            oil_c: temp_c,
            trans_c: temp_c,
            cabin_c: 22.0,
            intake_c: temp_c,
            oil_pressure_bar: 0.0,
        };
        state
    }

    #[test]
    fn test_thermostat_window() {
        let config = ThermalConfig::default();
        assert_eq!(thermostat_opening(20.0, &config), 0.05);
        assert_abs_diff_eq!(thermostat_opening(87.0, &config), 0.5, epsilon = 1e-12);
        assert_eq!(thermostat_opening(110.0, &config), 1.0);
    }

    #[test]
    fn test_cold_engine_off_at_ambient_is_steady() {
        let mut network = ThermalNetwork::new(ThermalConfig::default());
        let mut state = soaked(15.0);
        let before = state.thermal;

        for _ in 0..100 {
            network.step_thermal(CTX, &mut state);
        }

        assert_eq!(state.thermal, before);
    }

    #[test]
    fn test_combustion_heats_the_block() {
        let mut network = ThermalNetwork::new(ThermalConfig::default());
        let mut state = soaked(20.0);
        state.fuel.fuel_rate_l_h = 40.0;

        let flows = network.heat_flows(&state);
        assert_eq!(flows.combustion_to_block, 6000.0);

        network.step_thermal(CTX, &mut state);
        assert_abs_diff_eq!(state.thermal.block_c, 20.0 + 6000.0 / 90_000.0 * 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_coolant_warms_steadily_from_a_hot_block() {
        let mut network = ThermalNetwork::new(ThermalConfig::default());
        let mut state = soaked(20.0);
        state.thermal.block_c = 90.0;
        state.engine.rpm = 800.0;

        let mut last = state.thermal.coolant_c;
        for _ in 0..600 {
            network.step_thermal(CTX, &mut state);
            assert!(state.thermal.coolant_c > last);
            last = state.thermal.coolant_c;
        }
        assert!(state.thermal.block_c < 90.0);
        assert!(state.thermal.oil_c > 20.0);
    }

    #[test]
    fn test_converter_slip_heats_atf() {
        let mut network = ThermalNetwork::new(ThermalConfig::default());
        let mut state = soaked(15.0);
        state.engine.torque_net_nm = 100.0;
        state.drivetrain.converter_slip_rpm = -1000.0;

        network.step_thermal(CTX, &mut state);

        let slip_watts = 100.0 * rpm_to_rad_s(1000.0) * 0.5;
        assert_abs_diff_eq!(state.thermal.trans_c, 15.0 + slip_watts / 20_000.0 * 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_airflow_opens_radiator_capacity() {
        let network = ThermalNetwork::new(ThermalConfig::default());
        let mut state = soaked(95.0);
        let parked = network.heat_flows(&state).coolant_to_air;
        state.chassis.speed_mps = 30.0;
        let moving = network.heat_flows(&state).coolant_to_air;

        // fully open: 1.0 × 5 × 50 × 80 K
        assert_abs_diff_eq!(parked, 20_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(moving, 13.0 * parked, epsilon = 1e-6);
    }

    #[test]
    fn test_cabin_drifts_to_setpoint() {
        let mut network = ThermalNetwork::new(ThermalConfig::default());
        let mut state = soaked(15.0);
        state.thermal.cabin_c = 12.0;

        network.step_thermal(SimContext { dt: 1.0, t: 0.0 }, &mut state);

        assert_abs_diff_eq!(state.thermal.cabin_c, 12.5, epsilon = 1e-12);
    }

    #[test]
    fn test_oil_pressure_follows_engine_speed() {
        let mut network = ThermalNetwork::new(ThermalConfig::default());
        let mut state = soaked(15.0);
        network.step_thermal(CTX, &mut state);
        assert_eq!(state.thermal.oil_pressure_bar, 0.0);

        state.engine.rpm = 800.0;
        network.step_thermal(CTX, &mut state);
        assert_eq!(state.thermal.oil_pressure_bar, 7.0);
    }
}
