//! Oil viscosity and pump pressure.

/// Relative viscosity, 100 at 20 °C and falling exponentially as the oil warms.
pub fn oil_viscosity(oil_c: f64) -> f64 {
    100.0 * (-0.03 * (oil_c - 20.0)).exp()
}

/// Gallery pressure (bar) from a crank-driven pump. Zero with the engine below
/// 300 rpm, otherwise held inside the relief/minimum band of 0.5 to 7 bar.
pub fn oil_pressure_bar(rpm: f64, oil_c: f64) -> f64 {
    if rpm <= 300.0 {
        return 0.0;
    }
    let raw = rpm * 0.002 * oil_viscosity(oil_c) * 0.05;
    raw.clamp(0.5, 7.0)
}
