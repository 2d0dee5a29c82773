//! Encoder step quantization.
//!
//! Position-synchronized output (PSO) triggering fires on encoder ticks, so
//! the angular spacing between projections must be an integer number of
//! encoder counts. The quantizer snaps a requested step to the nearest count
//! and reports the corrected step, which every downstream stop-angle and
//! position computation must use in place of the request.
use super::constants::{ENCODER_COUNT_TOLERANCE, FULL_ROTATION_DEG};
use super::error::QuantizeError;

/// Resolution of the rotary encoder on the rotation stage.
///
/// `counts_per_rotation` is a hardware constant (7 200 000 for the tomography
/// stage this library was written against); it is integer-valued but carried
/// as a float since that is how the motor record reports it.
#[derive(Debug, Clone, Copy)]
pub struct EncoderSpec {
    pub counts_per_rotation: f64,
}

impl EncoderSpec {
    pub fn counts_per_degree(&self) -> f64 {
        self.counts_per_rotation / FULL_ROTATION_DEG
    }
}

/// Emitted when the requested step did not sit on an integer encoder count
/// and had to be corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct StepWarning {
    pub requested_step_deg: f64,
    /// Fractional encoder counts the request would have needed
    pub raw_counts: f64,
    pub corrected_step_deg: f64,
}

impl std::fmt::Display for StepWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Requested step of {} deg would have used a non-integer number of encoder counts ({:.4}); using {} deg instead",
            self.requested_step_deg, self.raw_counts, self.corrected_step_deg
        )
    }
}

/// A rotation step snapped to the encoder grid.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedStep {
    pub corrected_step_deg: f64,
    /// Signed; negative steps rotate the stage backwards
    pub encoder_counts_per_step: i64,
    pub warning: Option<StepWarning>,
}

/// Snap `requested_step_deg` to the nearest integer number of encoder counts.
///
/// A warning is attached when the request was more than
/// [`ENCODER_COUNT_TOLERANCE`] counts away from the nearest integer; the
/// corrected step is still returned and usable either way.
pub fn quantize_step(
    requested_step_deg: f64,
    encoder: &EncoderSpec,
) -> Result<QuantizedStep, QuantizeError> {
    if encoder.counts_per_rotation <= 0.0 || !encoder.counts_per_rotation.is_finite() {
        return Err(QuantizeError::BadCountsPerRotation(
            encoder.counts_per_rotation,
        ));
    }
    if requested_step_deg == 0.0 || !requested_step_deg.is_finite() {
        return Err(QuantizeError::ZeroStep);
    }

    let counts_per_degree = encoder.counts_per_degree();
    let raw_counts = requested_step_deg * counts_per_degree;
    let encoder_counts_per_step = raw_counts.round() as i64;
    if encoder_counts_per_step == 0 {
        return Err(QuantizeError::StepBelowResolution(requested_step_deg));
    }
    let corrected_step_deg = encoder_counts_per_step as f64 / counts_per_degree;

    let warning = if (raw_counts - encoder_counts_per_step as f64).abs() > ENCODER_COUNT_TOLERANCE {
        Some(StepWarning {
            requested_step_deg,
            raw_counts,
            corrected_step_deg,
        })
    } else {
        None
    };

    Ok(QuantizedStep {
        corrected_step_deg,
        encoder_counts_per_step,
        warning,
    })
}
