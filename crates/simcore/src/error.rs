use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read vehicle config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse vehicle config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("transmission needs at least one gear ratio")]
    EmptyGearTable,
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("downshift point {down} rpm must sit below upshift point {up} rpm")]
    ShiftBand { up: f64, down: f64 },
    #[error("torque curve breakpoints must increase with rpm")]
    TorqueCurveOrder,
    #[error("lockup gear {gear} is outside the {gears}-speed gearbox")]
    LockupGear { gear: u8, gears: usize },
}
