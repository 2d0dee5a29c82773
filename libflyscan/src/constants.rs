//! Numeric constants shared across the planning modules.

/// Degrees in one full stage rotation
pub const FULL_ROTATION_DEG: f64 = 360.0;
/// Degrees in the standard tomography sweep
pub const HALF_ROTATION_DEG: f64 = 180.0;

/// How far (in encoder counts) a requested step may sit from an integer count
/// before the quantizer reports a correction warning. Matches the tolerance
/// used by the beamline PSO setup code.
pub const ENCODER_COUNT_TOLERANCE: f64 = 1e-4;

/// Slack (in degrees) applied when comparing adjacent angle spacings against
/// the blur/readout limit, so exactly-at-the-limit lists pass.
pub const ANGLE_SPACING_TOLERANCE: f64 = 1e-6;
