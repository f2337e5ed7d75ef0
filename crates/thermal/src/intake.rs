//! Intake air temperature.
//!
//! The intake charge picks up a fraction of the block's excess heat and is cooled
//! by ram air. It relaxes toward that target with a 10 s time constant and never
//! reads colder than ambient.

const BLOCK_SOAK_FRACTION: f64 = 0.15;
const RAM_COOLING_PER_MPS: f64 = 0.1;
const RELAX_RATE: f64 = 0.1;

pub fn relax_intake_temp(intake_c: f64, ambient_c: f64, block_c: f64, speed_mps: f64, dt: f64) -> f64 {
    let target = ambient_c + (block_c - ambient_c) * BLOCK_SOAK_FRACTION;
    let ram_cooling = (speed_mps + 1.0) * RAM_COOLING_PER_MPS;
    let next = intake_c + (target - intake_c - ram_cooling) * RELAX_RATE * dt;
    next.max(ambient_c)
}
