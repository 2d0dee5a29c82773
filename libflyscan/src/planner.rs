//! Scan planning.
//!
//! The planner ties the leaf computations together: the requested step is
//! snapped to the encoder grid first, the blur-limited speed check runs
//! against the corrected step, and only then is the motion profile or the
//! interlaced angle sequence assembled. A failed check never returns a
//! partial plan.
use super::blur::{
    compute_motion_limits, BlurTolerance, DetectorGeometry, MotionProfile, TimingParameters,
};
use super::encoder::{quantize_step, EncoderSpec, QuantizedStep};
use super::error::{PlanError, SequenceError};
use super::sequence::{generate_sequence, AngleSequence};

/// Sign bookkeeping for the rotation axis.
///
/// `user_direction` is the direction of travel in user coordinates (+1 when
/// the stop angle is past the start angle); `overall_sense` folds in the
/// motor and encoder directions and tells whether encoder counts increase or
/// decrease during the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationSense {
    pub user_direction: i8,
    pub overall_sense: i8,
}

/// Either a scalar fly-scan motion profile or an explicit interlaced angle
/// sequence; a plan never carries both.
#[derive(Debug, Clone)]
pub enum MotionPlan {
    Fly(MotionProfile),
    Interlaced(AngleSequence),
}

/// A validated scan ready to hand to the motion and acquisition layers.
///
/// Immutable once computed; plans are cheap and are recomputed from scratch
/// whenever a scan parameter changes.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    pub step: QuantizedStep,
    pub rotation_start_deg: f64,
    pub rotation_stop_deg: f64,
    pub motion: MotionPlan,
}

impl ScanPlan {
    /// Speed of the stage during acquisition: one corrected step per frame
    pub fn motor_speed_deg_s(&self, timing: &TimingParameters) -> f64 {
        self.step.corrected_step_deg.abs() / timing.time_per_frame_s()
    }
}

/// Compute the direction of travel in user coordinates and the overall
/// encoder sense for a scan from `rotation_start_deg` to `rotation_stop_deg`.
pub fn compute_senses(
    rotation_start_deg: f64,
    rotation_stop_deg: f64,
    motor_direction_positive: bool,
    encoder_counts_per_step: i64,
) -> RotationSense {
    let encoder_dir: i8 = if encoder_counts_per_step >= 0 { 1 } else { -1 };
    let motor_dir: i8 = if motor_direction_positive { 1 } else { -1 };
    let user_direction: i8 = if rotation_stop_deg > rotation_start_deg {
        1
    } else {
        -1
    };
    RotationSense {
        user_direction,
        overall_sense: user_direction * motor_dir * encoder_dir,
    }
}

/// Distance the stage needs before the scan window to reach speed.
///
/// The acceleration distance (`accel_time / 2 * speed`) is rounded up to an
/// integer number of measurement steps, plus half a step to make sure the
/// stage is really up to speed when the first trigger fires.
pub fn taxi_distance_deg(
    accel_time_s: f64,
    speed_deg_s: f64,
    step_deg: f64,
) -> Result<f64, PlanError> {
    if accel_time_s < 0.0 {
        return Err(PlanError::BadAccelTime(accel_time_s));
    }
    let step = step_deg.abs();
    let accel_dist = accel_time_s / 2.0 * speed_deg_s;
    Ok(((accel_dist / step).ceil() + 0.5) * step)
}

/// The angular position of every projection in a fixed-step fly scan.
pub fn fly_scan_angles(
    rotation_start_deg: f64,
    step_deg: f64,
    num_angles: usize,
    user_direction: i8,
) -> Vec<f64> {
    (0..num_angles)
        .map(|k| rotation_start_deg + k as f64 * step_deg * user_direction as f64)
        .collect()
}

/// Checks shared by both scan modes: quantize the step, verify the implied
/// speed against the blur limit, and compute the corrected stop angle.
fn validate_request(
    rotation_start_deg: f64,
    rotation_step_deg: f64,
    num_angles: usize,
    encoder: &EncoderSpec,
    timing: &TimingParameters,
    geometry: &DetectorGeometry,
    blur: &BlurTolerance,
) -> Result<(QuantizedStep, MotionProfile, f64), PlanError> {
    if num_angles == 0 {
        return Err(PlanError::BadAngleCount(num_angles));
    }

    let step = quantize_step(rotation_step_deg, encoder)?;
    if let Some(warning) = &step.warning {
        log::warn!("{warning}");
    }

    let profile = compute_motion_limits(geometry, blur, timing)?;
    let requested_deg_s = step.corrected_step_deg.abs() / timing.time_per_frame_s();
    if requested_deg_s > profile.max_angular_speed_deg_s {
        return Err(PlanError::BlurConstraintViolated {
            requested_deg_s,
            limit_deg_s: profile.max_angular_speed_deg_s,
        });
    }

    // Always the corrected step; the requested one may not sit on the
    // encoder grid.
    let rotation_stop_deg =
        rotation_start_deg + step.corrected_step_deg * (num_angles as f64 - 1.0);

    Ok((step, profile, rotation_stop_deg))
}

/// Plan a continuous-rotation fly scan.
///
/// The quantizer's warning, if any, is logged and carried in the returned
/// plan; a corrected step is always usable. A step that would drive the
/// stage past the blur-limited speed fails with
/// [`PlanError::BlurConstraintViolated`].
pub fn plan_fly_scan(
    rotation_start_deg: f64,
    rotation_step_deg: f64,
    num_angles: usize,
    encoder: &EncoderSpec,
    timing: &TimingParameters,
    geometry: &DetectorGeometry,
    blur: &BlurTolerance,
) -> Result<ScanPlan, PlanError> {
    let (step, profile, rotation_stop_deg) = validate_request(
        rotation_start_deg,
        rotation_step_deg,
        num_angles,
        encoder,
        timing,
        geometry,
        blur,
    )?;

    Ok(ScanPlan {
        step,
        rotation_start_deg,
        rotation_stop_deg,
        motion: MotionPlan::Fly(profile),
    })
}

/// Plan an interlaced scan of `num_angles` projections with
/// `per_rotation_count` projections per rotation.
///
/// The nominal step between projections within one rotation
/// (`360 / per_rotation_count`) is quantized and blur-checked exactly like a
/// fly-scan step; the emitted angle sequence is offset by
/// `rotation_start_deg`.
pub fn plan_interlaced_scan(
    rotation_start_deg: f64,
    num_angles: usize,
    per_rotation_count: usize,
    radix: u32,
    continuous: bool,
    encoder: &EncoderSpec,
    timing: &TimingParameters,
    geometry: &DetectorGeometry,
    blur: &BlurTolerance,
) -> Result<ScanPlan, PlanError> {
    if per_rotation_count == 0 {
        return Err(PlanError::SequenceError(SequenceError::BadPerRotationCount(
            per_rotation_count,
        )));
    }
    let nominal_step = 360.0 / per_rotation_count as f64;
    let (step, _profile, rotation_stop_deg) = validate_request(
        rotation_start_deg,
        nominal_step,
        num_angles,
        encoder,
        timing,
        geometry,
        blur,
    )?;

    let mut sequence = generate_sequence(num_angles, per_rotation_count, radix, continuous)?;
    if rotation_start_deg != 0.0 {
        for angle in &mut sequence.angles {
            *angle += rotation_start_deg;
        }
    }

    Ok(ScanPlan {
        step,
        rotation_start_deg,
        rotation_stop_deg,
        motion: MotionPlan::Interlaced(sequence),
    })
}
