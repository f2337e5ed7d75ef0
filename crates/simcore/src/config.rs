//! Vehicle configuration
//!
//! Every constant that stays fixed for the lifetime of a simulator lives here,
//! grouped by the model that consumes it. `Default` is a 2005 VW Phaeton W12 LWB
//! with the ZF 5HP24A five-speed automatic.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Full-load torque map of the engine.
///
/// Below `stall_rpm` a flat anti-stall floor applies, then a linear ramp up to
/// `peak_start_rpm`, a flat plateau until `peak_end_rpm`, a linear fade until
/// `cutoff_rpm`, and nothing above that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TorqueCurve {
    /// Torque returned below `stall_rpm` (N·m)
    pub stall_floor_nm: f64,
    pub stall_rpm: f64,
    /// Torque at the start of the ramp (N·m)
    pub ramp_start_nm: f64,
    pub peak_start_rpm: f64,
    /// Plateau torque (N·m)
    pub peak_nm: f64,
    pub peak_end_rpm: f64,
    /// Torque reached at `cutoff_rpm` at the end of the fade (N·m)
    pub fade_end_nm: f64,
    pub cutoff_rpm: f64,
}

impl Default for TorqueCurve {
    fn default() -> Self {
        TorqueCurve {
            stall_floor_nm: 200.0,
            stall_rpm: 600.0,
            ramp_start_nm: 300.0,
            peak_start_rpm: 2750.0,
            peak_nm: 560.0,
            peak_end_rpm: 5200.0,
            fade_end_nm: 460.0,
            cutoff_rpm: 6500.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChassisConfig {
    /// Vehicle mass (kg)
    pub mass_kg: f64,
    pub drag_coeff: f64,
    /// Frontal area (m²)
    pub frontal_area_m2: f64,
    /// Rolling radius of the driven tires (m)
    pub tire_radius_m: f64,
    pub rolling_resistance: f64,
    /// Braking force at full pedal (N)
    pub max_brake_force_n: f64,
    /// Lumped driveline/bearing loss, proportional to speed (N·s/m)
    pub mechanical_loss_coeff: f64,
}

impl Default for ChassisConfig {
    fn default() -> Self {
        ChassisConfig {
            mass_kg: 2450.0,
            drag_coeff: 0.32,
            frontal_area_m2: 2.40,
            tire_radius_m: 0.35,
            rolling_resistance: 0.012,
            max_brake_force_n: 18000.0,
            mechanical_loss_coeff: 10.0,
        }
    }
}

impl ChassisConfig {
    pub fn tire_circumference_m(&self) -> f64 {
        2.0 * PI * self.tire_radius_m
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Swept volume (L)
    pub displacement_l: f64,
    pub idle_rpm: f64,
    pub redline_rpm: f64,
    /// Speed the engine is running at when the simulator is built
    pub start_rpm: f64,
    /// Crank, flywheel and converter fluid inertia (kg·m²). Kept heavy so low
    /// gears don't oscillate.
    pub inertia_kg_m2: f64,
    /// Proportional gain of the idle governor (1/s)
    pub idle_governor_gain: f64,
    pub torque_curve: TorqueCurve,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            displacement_l: 6.0,
            idle_rpm: 600.0,
            redline_rpm: 6200.0,
            start_rpm: 800.0,
            inertia_kg_m2: 0.65,
            idle_governor_gain: 2.0,
            torque_curve: TorqueCurve::default(),
        }
    }
}

impl EngineConfig {
    /// Hard ceiling on engine speed: redline plus a small overrun margin.
    pub fn max_rpm(&self) -> f64 {
        self.redline_rpm + 200.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransmissionConfig {
    /// Ratios of gears 1..=N, in order
    pub gear_ratios: Vec<f64>,
    pub final_drive: f64,
    pub shift_up_rpm: f64,
    pub shift_down_rpm: f64,
    /// RPM added on a downshift to match the lower gear
    pub downshift_bump_rpm: f64,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        TransmissionConfig {
            gear_ratios: vec![3.57, 2.20, 1.51, 1.00, 0.80],
            final_drive: 3.07,
            shift_up_rpm: 5900.0,
            shift_down_rpm: 1100.0,
            downshift_bump_rpm: 500.0,
        }
    }
}

impl TransmissionConfig {
    pub fn top_gear(&self) -> u8 {
        self.gear_ratios.len().min(u8::MAX as usize) as u8
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConverterConfig {
    /// Transfer torque per slip rpm squared (N·m/rpm²)
    pub coupling_coeff: f64,
    /// Transfer torque is limited to this multiple of available engine torque
    pub max_torque_multiple: f64,
    /// Lowest gear in which the lockup clutch may engage
    pub lockup_min_gear: u8,
    /// Road speed above which the lockup clutch engages (m/s)
    pub lockup_min_speed_mps: f64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            coupling_coeff: 0.0045,
            max_torque_multiple: 2.5,
            lockup_min_gear: 3,
            lockup_min_speed_mps: 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThermalConfig {
    pub ambient_c: f64,
    /// Temperature of every thermal mass at construction
    pub cold_start_c: f64,
    pub block_mass_kg: f64,
    /// Specific heat of the block (J/kg·K)
    pub block_specific_heat: f64,
    pub coolant_mass_kg: f64,
    pub coolant_specific_heat: f64,
    pub oil_mass_kg: f64,
    pub oil_specific_heat: f64,
    pub atf_mass_kg: f64,
    pub atf_specific_heat: f64,
    /// Heat released into the block per litre/hour of fuel burned (W per L/h)
    pub heat_per_fuel_lph: f64,
    /// Coolant temperature at which the thermostat starts to open
    pub thermostat_open_c: f64,
    /// Span over which the thermostat goes from closed to fully open
    pub thermostat_span_c: f64,
    /// Bypass fraction that always reaches the radiator
    pub thermostat_min_open: f64,
    /// Cabin climate setpoint
    pub cabin_target_c: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        ThermalConfig {
            ambient_c: 15.0,
            cold_start_c: 20.0,
            block_mass_kg: 200.0,
            block_specific_heat: 450.0,
            coolant_mass_kg: 15.0,
            coolant_specific_heat: 4184.0,
            oil_mass_kg: 12.0,
            oil_specific_heat: 1800.0,
            atf_mass_kg: 10.0,
            atf_specific_heat: 2000.0,
            heat_per_fuel_lph: 150.0,
            thermostat_open_c: 82.0,
            thermostat_span_c: 10.0,
            thermostat_min_open: 0.05,
            cabin_target_c: 22.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FuelConfig {
    pub tank_capacity_l: f64,
    /// Fuel density (kg/L)
    pub density_kg_per_l: f64,
    pub stoich_afr: f64,
    pub power_afr: f64,
    /// Throttle above which the mixture is enriched to `power_afr`
    pub power_enrichment_throttle: f64,
    /// Deceleration fuel cutoff engages below this throttle...
    pub cutoff_max_throttle: f64,
    /// ...and above this engine speed
    pub cutoff_min_rpm: f64,
    /// AFR reported while fuel is cut
    pub cutoff_afr_display: f64,
    /// Throttle increase within one frame that triggers transient enrichment
    pub tip_in_threshold: f64,
    pub tip_in_multiplier: f64,
    /// Economy average assumed before any driving (L/100km)
    pub initial_avg_l_100km: f64,
    /// Weight of the newest sample in the economy average
    pub avg_weight: f64,
    /// Economy is only sampled above this road speed (km/h)
    pub avg_min_speed_kmh: f64,
    /// Range shown when the average is too small to divide by (km)
    pub range_sentinel_km: f64,
}

impl Default for FuelConfig {
    fn default() -> Self {
        FuelConfig {
            tank_capacity_l: 90.0,
            density_kg_per_l: 0.74,
            stoich_afr: 14.7,
            power_afr: 12.5,
            power_enrichment_throttle: 0.7,
            cutoff_max_throttle: 0.01,
            cutoff_min_rpm: 1200.0,
            cutoff_afr_display: 99.9,
            tip_in_threshold: 0.1,
            tip_in_multiplier: 1.5,
            initial_avg_l_100km: 15.0,
            avg_weight: 0.005,
            avg_min_speed_kmh: 10.0,
            range_sentinel_km: 999.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElectricalConfig {
    /// Constant accessory drain (%/s)
    pub drain_pct_per_s: f64,
    /// Alternator charge while running (%/s)
    pub charge_pct_per_s: f64,
    /// Engine speed above which the alternator charges
    pub charge_min_rpm: f64,
}

impl Default for ElectricalConfig {
    fn default() -> Self {
        ElectricalConfig {
            drain_pct_per_s: 0.02,
            charge_pct_per_s: 0.06,
            charge_min_rpm: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VehicleConfig {
    pub chassis: ChassisConfig,
    pub engine: EngineConfig,
    pub transmission: TransmissionConfig,
    pub converter: ConverterConfig,
    pub thermal: ThermalConfig,
    pub fuel: FuelConfig,
    pub electrical: ElectricalConfig,
}

impl VehicleConfig {
    /// Parses a (possibly partial) JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: VehicleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        debug!("loaded vehicle config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let chassis = &self.chassis;
        positive("chassis.mass_kg", chassis.mass_kg)?;
        positive("chassis.drag_coeff", chassis.drag_coeff)?;
        positive("chassis.frontal_area_m2", chassis.frontal_area_m2)?;
        positive("chassis.tire_radius_m", chassis.tire_radius_m)?;
        non_negative("chassis.rolling_resistance", chassis.rolling_resistance)?;
        non_negative("chassis.max_brake_force_n", chassis.max_brake_force_n)?;
        non_negative("chassis.mechanical_loss_coeff", chassis.mechanical_loss_coeff)?;

        let engine = &self.engine;
        positive("engine.displacement_l", engine.displacement_l)?;
        positive("engine.idle_rpm", engine.idle_rpm)?;
        positive("engine.redline_rpm", engine.redline_rpm)?;
        non_negative("engine.start_rpm", engine.start_rpm)?;
        positive("engine.inertia_kg_m2", engine.inertia_kg_m2)?;
        non_negative("engine.idle_governor_gain", engine.idle_governor_gain)?;
        let curve = &engine.torque_curve;
        for (field, value) in [
            ("engine.torque_curve.stall_floor_nm", curve.stall_floor_nm),
            ("engine.torque_curve.stall_rpm", curve.stall_rpm),
            ("engine.torque_curve.ramp_start_nm", curve.ramp_start_nm),
            ("engine.torque_curve.peak_start_rpm", curve.peak_start_rpm),
            ("engine.torque_curve.peak_nm", curve.peak_nm),
            ("engine.torque_curve.peak_end_rpm", curve.peak_end_rpm),
            ("engine.torque_curve.fade_end_nm", curve.fade_end_nm),
            ("engine.torque_curve.cutoff_rpm", curve.cutoff_rpm),
        ] {
            non_negative(field, value)?;
        }
        if !(curve.stall_rpm < curve.peak_start_rpm
            && curve.peak_start_rpm <= curve.peak_end_rpm
            && curve.peak_end_rpm < curve.cutoff_rpm)
        {
            return Err(ConfigError::TorqueCurveOrder);
        }

        let transmission = &self.transmission;
        if transmission.gear_ratios.is_empty() {
            return Err(ConfigError::EmptyGearTable);
        }
        for ratio in &transmission.gear_ratios {
            positive("transmission.gear_ratios", *ratio)?;
        }
        positive("transmission.final_drive", transmission.final_drive)?;
        positive("transmission.shift_up_rpm", transmission.shift_up_rpm)?;
        non_negative("transmission.shift_down_rpm", transmission.shift_down_rpm)?;
        non_negative("transmission.downshift_bump_rpm", transmission.downshift_bump_rpm)?;
        if transmission.shift_down_rpm >= transmission.shift_up_rpm {
            return Err(ConfigError::ShiftBand {
                up: transmission.shift_up_rpm,
                down: transmission.shift_down_rpm,
            });
        }

        let converter = &self.converter;
        positive("converter.coupling_coeff", converter.coupling_coeff)?;
        positive("converter.max_torque_multiple", converter.max_torque_multiple)?;
        non_negative("converter.lockup_min_speed_mps", converter.lockup_min_speed_mps)?;
        if converter.lockup_min_gear == 0 {
            return Err(ConfigError::LockupGear {
                gear: converter.lockup_min_gear,
                gears: transmission.gear_ratios.len(),
            });
        }

        let thermal = &self.thermal;
        finite("thermal.ambient_c", thermal.ambient_c)?;
        finite("thermal.cold_start_c", thermal.cold_start_c)?;
        finite("thermal.cabin_target_c", thermal.cabin_target_c)?;
        finite("thermal.thermostat_open_c", thermal.thermostat_open_c)?;
        for (field, value) in [
            ("thermal.block_mass_kg", thermal.block_mass_kg),
            ("thermal.block_specific_heat", thermal.block_specific_heat),
            ("thermal.coolant_mass_kg", thermal.coolant_mass_kg),
            ("thermal.coolant_specific_heat", thermal.coolant_specific_heat),
            ("thermal.oil_mass_kg", thermal.oil_mass_kg),
            ("thermal.oil_specific_heat", thermal.oil_specific_heat),
            ("thermal.atf_mass_kg", thermal.atf_mass_kg),
            ("thermal.atf_specific_heat", thermal.atf_specific_heat),
            ("thermal.thermostat_span_c", thermal.thermostat_span_c),
        ] {
            positive(field, value)?;
        }
        non_negative("thermal.heat_per_fuel_lph", thermal.heat_per_fuel_lph)?;
        non_negative("thermal.thermostat_min_open", thermal.thermostat_min_open)?;

        let fuel = &self.fuel;
        positive("fuel.tank_capacity_l", fuel.tank_capacity_l)?;
        positive("fuel.density_kg_per_l", fuel.density_kg_per_l)?;
        positive("fuel.stoich_afr", fuel.stoich_afr)?;
        positive("fuel.power_afr", fuel.power_afr)?;
        positive("fuel.tip_in_multiplier", fuel.tip_in_multiplier)?;
        non_negative("fuel.initial_avg_l_100km", fuel.initial_avg_l_100km)?;
        non_negative("fuel.avg_weight", fuel.avg_weight)?;
        finite("fuel.cutoff_afr_display", fuel.cutoff_afr_display)?;
        finite("fuel.range_sentinel_km", fuel.range_sentinel_km)?;

        let electrical = &self.electrical;
        non_negative("electrical.drain_pct_per_s", electrical.drain_pct_per_s)?;
        non_negative("electrical.charge_pct_per_s", electrical.charge_pct_per_s)?;
        non_negative("electrical.charge_min_rpm", electrical.charge_min_rpm)?;

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
