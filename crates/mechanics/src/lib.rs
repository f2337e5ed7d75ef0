pub mod chassis;
pub mod converter;
pub mod drivetrain;
pub mod engine;
pub mod performance;
pub mod transmission;

pub use chassis::Chassis;
pub use converter::{coupling_for, transfer_torque};
pub use drivetrain::Drivetrain;
pub use engine::{Engine, volumetric_efficiency};
pub use performance::{LaunchPhase, update_launch_timer};
pub use transmission::{ShiftDecision, Transmission};
