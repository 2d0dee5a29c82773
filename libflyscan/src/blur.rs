//! Blur-limited speed model.
//!
//! A point on the outer edge of the sensor moves along a chord of length
//! `r * (1 - cos(theta))` pixels when the stage rotates by `theta` during one
//! exposure. Inverting that relation for the allowed blur gives the largest
//! rotation per exposure, and dividing by the exposure time gives the maximum
//! angular speed of the stage.
use super::constants::HALF_ROTATION_DEG;
use super::error::MotionLimitError;

/// Horizontal geometry of the detector, reduced to the sensor radius in
/// pixels. Supplied once per run by the scan configuration.
#[derive(Debug, Clone, Copy)]
pub struct DetectorGeometry {
    pub sensor_radius_px: f64,
}

impl DetectorGeometry {
    /// Construct from the full horizontal pixel count of the sensor
    pub fn from_sensor_width_px(width_px: f64) -> Self {
        Self {
            sensor_radius_px: width_px / 2.0,
        }
    }
}

/// Time cost of acquiring one frame: the exposure itself plus the fixed
/// readout overhead before the next trigger can fire.
#[derive(Debug, Clone, Copy)]
pub struct TimingParameters {
    pub exposure_time_s: f64,
    pub readout_time_s: f64,
}

impl TimingParameters {
    /// The readout time is measured as the inverse of the frame rate at zero
    /// exposure time; this should be re-measured for each detector
    /// configuration.
    pub fn from_frame_rate(exposure_time_s: f64, frame_rate_zero_exposure_hz: f64) -> Self {
        Self {
            exposure_time_s,
            readout_time_s: 1.0 / frame_rate_zero_exposure_hz,
        }
    }

    pub fn time_per_frame_s(&self) -> f64 {
        self.exposure_time_s + self.readout_time_s
    }
}

/// Upper bound on acceptable motion smear during one exposure, in pixels.
#[derive(Debug, Clone, Copy)]
pub struct BlurTolerance {
    pub max_blur_px: f64,
}

/// Motion limits for a fly scan at a given blur tolerance.
///
/// `frames_per_180deg` may be fractional; callers that need a hard frame
/// budget should round down.
#[derive(Debug, Clone, Copy)]
pub struct MotionProfile {
    /// Largest rotation (deg) the stage may cover during one exposure
    pub theta_max_deg: f64,
    pub max_angular_speed_deg_s: f64,
    pub frames_per_180deg: f64,
}

impl MotionProfile {
    /// Duration of a 180 deg sweep at the maximum speed
    pub fn sweep_time_s(&self) -> f64 {
        HALF_ROTATION_DEG / self.max_angular_speed_deg_s
    }
}

/// Trigger geometry for a sweep at a fixed angular speed: where exposures and
/// readouts land on the circle, and how many frames fit in 180 deg.
#[derive(Debug, Clone, Copy)]
pub struct TriggerPattern {
    pub exposure_arc_deg: f64,
    pub readout_arc_deg: f64,
    /// Angular step between triggers: exposure arc plus readout arc
    pub spacing_deg: f64,
    pub frames_in_180: u64,
}

/// Compute the maximum blur-safe angular speed and the 180 deg frame budget.
///
/// The `acos` argument `(r - b) / r` is clamped to `[-1, 1]` before the call.
/// With the preconditions enforced here the argument is always in `(0, 1)`,
/// but the clamp is kept so floating-point edge inputs can never produce NaN.
pub fn compute_motion_limits(
    geometry: &DetectorGeometry,
    blur: &BlurTolerance,
    timing: &TimingParameters,
) -> Result<MotionProfile, MotionLimitError> {
    let r = geometry.sensor_radius_px;
    let b = blur.max_blur_px;
    if r <= 0.0 || !r.is_finite() {
        return Err(MotionLimitError::BadSensorRadius(r));
    }
    if b <= 0.0 || b >= r {
        return Err(MotionLimitError::BadBlurTolerance(b, r));
    }
    if timing.exposure_time_s <= 0.0 {
        return Err(MotionLimitError::BadExposureTime(timing.exposure_time_s));
    }
    if timing.readout_time_s < 0.0 {
        return Err(MotionLimitError::BadReadoutTime(timing.readout_time_s));
    }

    let theta_max_deg = ((r - b) / r).clamp(-1.0, 1.0).acos().to_degrees();
    let max_angular_speed_deg_s = theta_max_deg / timing.exposure_time_s;
    let frames_per_180deg = HALF_ROTATION_DEG * timing.exposure_time_s
        / (timing.time_per_frame_s() * theta_max_deg);

    Ok(MotionProfile {
        theta_max_deg,
        max_angular_speed_deg_s,
        frames_per_180deg,
    })
}

/// Blur (px) actually accumulated at the sensor edge when rotating at
/// `speed_deg_s` for one exposure. Useful for reporting the effective blur of
/// a scan that runs below the maximum speed.
pub fn effective_blur_px(
    geometry: &DetectorGeometry,
    speed_deg_s: f64,
    exposure_time_s: f64,
) -> f64 {
    let theta_rad = (speed_deg_s * exposure_time_s).to_radians();
    geometry.sensor_radius_px * (1.0 - theta_rad.cos())
}

/// Lay out the trigger pattern for a sweep at `speed_deg_s`.
///
/// Fails when the spacing is so coarse that not even one frame fits in the
/// 180 deg sweep.
pub fn trigger_pattern(
    speed_deg_s: f64,
    timing: &TimingParameters,
) -> Result<TriggerPattern, MotionLimitError> {
    if speed_deg_s <= 0.0 {
        return Err(MotionLimitError::BadAngularSpeed(speed_deg_s));
    }
    if timing.exposure_time_s <= 0.0 {
        return Err(MotionLimitError::BadExposureTime(timing.exposure_time_s));
    }
    if timing.readout_time_s < 0.0 {
        return Err(MotionLimitError::BadReadoutTime(timing.readout_time_s));
    }

    let exposure_arc_deg = speed_deg_s * timing.exposure_time_s;
    let readout_arc_deg = speed_deg_s * timing.readout_time_s;
    let spacing_deg = exposure_arc_deg + readout_arc_deg;
    let frames_in_180 = (HALF_ROTATION_DEG / spacing_deg).floor();
    if frames_in_180 < 1.0 {
        return Err(MotionLimitError::NoFramesFit(spacing_deg));
    }

    Ok(TriggerPattern {
        exposure_arc_deg,
        readout_arc_deg,
        spacing_deg,
        frames_in_180: frames_in_180 as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry_2048() -> DetectorGeometry {
        DetectorGeometry::from_sensor_width_px(2048.0)
    }

    #[test]
    fn test_known_limits() {
        // 2048 px sensor, 1 px blur, 0.1 s exposure:
        // theta_max = degrees(acos(1023/1024)) ~ 2.5322 deg, speed ~ 25.32 deg/s
        let geometry = geometry_2048();
        let blur = BlurTolerance { max_blur_px: 1.0 };
        let timing = TimingParameters {
            exposure_time_s: 0.1,
            readout_time_s: 0.0,
        };
        let profile = compute_motion_limits(&geometry, &blur, &timing).unwrap();
        let expected_theta = (1023.0f64 / 1024.0).acos().to_degrees();
        assert!((profile.theta_max_deg - expected_theta).abs() < 1e-12);
        assert!((profile.theta_max_deg - 2.5322).abs() < 1e-3);
        assert!((profile.max_angular_speed_deg_s - expected_theta / 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_speed_decreases_with_exposure() {
        let geometry = geometry_2048();
        let blur = BlurTolerance { max_blur_px: 1.0 };
        let mut last_speed = f64::INFINITY;
        for exposure in [0.01, 0.05, 0.1, 0.2, 0.5] {
            let timing = TimingParameters::from_frame_rate(exposure, 160.0);
            let profile = compute_motion_limits(&geometry, &blur, &timing).unwrap();
            assert!(profile.max_angular_speed_deg_s > 0.0);
            assert!(profile.max_angular_speed_deg_s < last_speed);
            last_speed = profile.max_angular_speed_deg_s;
        }
    }

    #[test]
    fn test_frame_budget() {
        // With zero readout the whole sweep is exposure, so the budget is
        // exactly 180 / theta_max.
        let geometry = geometry_2048();
        let blur = BlurTolerance { max_blur_px: 1.0 };
        let timing = TimingParameters {
            exposure_time_s: 0.1,
            readout_time_s: 0.0,
        };
        let profile = compute_motion_limits(&geometry, &blur, &timing).unwrap();
        assert!((profile.frames_per_180deg - 180.0 / profile.theta_max_deg).abs() < 1e-9);

        // Nonzero readout shrinks the budget
        let timing_ro = TimingParameters::from_frame_rate(0.1, 160.0);
        let profile_ro = compute_motion_limits(&geometry, &blur, &timing_ro).unwrap();
        assert!(profile_ro.frames_per_180deg < profile.frames_per_180deg);
    }

    #[test]
    fn test_bad_parameters() {
        let geometry = geometry_2048();
        let timing = TimingParameters::from_frame_rate(0.1, 160.0);
        let too_big = BlurTolerance {
            max_blur_px: 1024.0,
        };
        match compute_motion_limits(&geometry, &too_big, &timing) {
            Err(MotionLimitError::BadBlurTolerance(_, _)) => (),
            other => panic!("expected blur tolerance error, got {other:?}"),
        }
        let blur = BlurTolerance { max_blur_px: 1.0 };
        let bad_exposure = TimingParameters {
            exposure_time_s: 0.0,
            readout_time_s: 0.1,
        };
        match compute_motion_limits(&geometry, &blur, &bad_exposure) {
            Err(MotionLimitError::BadExposureTime(_)) => (),
            other => panic!("expected exposure error, got {other:?}"),
        }
        let bad_readout = TimingParameters {
            exposure_time_s: 0.1,
            readout_time_s: -1.0,
        };
        match compute_motion_limits(&geometry, &blur, &bad_readout) {
            Err(MotionLimitError::BadReadoutTime(_)) => (),
            other => panic!("expected readout error, got {other:?}"),
        }
    }

    #[test]
    fn test_effective_blur_matches_tolerance_at_limit() {
        // Rotating at exactly the blur-limited speed for one exposure must
        // smear the edge by exactly the tolerance.
        let geometry = geometry_2048();
        let blur = BlurTolerance { max_blur_px: 1.0 };
        let timing = TimingParameters::from_frame_rate(0.1, 160.0);
        let profile = compute_motion_limits(&geometry, &blur, &timing).unwrap();
        let smear = effective_blur_px(&geometry, profile.max_angular_speed_deg_s, 0.1);
        assert!((smear - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trigger_pattern() {
        let timing = TimingParameters {
            exposure_time_s: 0.1,
            readout_time_s: 0.025,
        };
        let pattern = trigger_pattern(20.0, &timing).unwrap();
        assert!((pattern.exposure_arc_deg - 2.0).abs() < 1e-12);
        assert!((pattern.readout_arc_deg - 0.5).abs() < 1e-12);
        assert!((pattern.spacing_deg - 2.5).abs() < 1e-12);
        assert_eq!(pattern.frames_in_180, 72);
    }

    #[test]
    fn test_trigger_pattern_no_frames() {
        // 200 deg between triggers; nothing fits in 180
        let timing = TimingParameters {
            exposure_time_s: 1.0,
            readout_time_s: 1.0,
        };
        match trigger_pattern(100.0, &timing) {
            Err(MotionLimitError::NoFramesFit(_)) => (),
            other => panic!("expected no-frames error, got {other:?}"),
        }
    }
}
