//! Validation of user-supplied angle lists.
//!
//! Some experiments hand the planner an arbitrary list of projection angles
//! instead of a uniform step. Such a list is only acquirable in a single
//! continuous rotation if every adjacent pair of angles is at least the
//! blur/readout trigger spacing apart. The checker reports each violating
//! pair and proposes a repaired list that keeps as many of the requested
//! angles as possible.
use super::blur::{MotionProfile, TimingParameters};
use super::constants::{ANGLE_SPACING_TOLERANCE, HALF_ROTATION_DEG};

/// One adjacent pair of requested angles closer together than the minimum
/// trigger spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingViolation {
    pub from_deg: f64,
    pub to_deg: f64,
    pub spacing_deg: f64,
}

/// Result of checking a user angle list against the trigger-spacing limit.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleListReport {
    /// Minimum allowed spacing between adjacent angles
    pub min_spacing_deg: f64,
    pub violations: Vec<SpacingViolation>,
    /// The requested list if acceptable, otherwise a repaired list: the
    /// greedily kept subset of the request, extended with limit-spaced
    /// angles up to 180 deg
    pub proposed: Vec<f64>,
}

impl AngleListReport {
    pub fn is_acceptable(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check a list of projection angles against the minimum trigger spacing
/// implied by the blur-limited speed and the per-frame time.
///
/// The list is sorted before checking; the empty and single-angle lists are
/// trivially acceptable.
pub fn validate_angle_list(
    angles: &[f64],
    profile: &MotionProfile,
    timing: &TimingParameters,
) -> AngleListReport {
    let min_spacing_deg = profile.max_angular_speed_deg_s * timing.time_per_frame_s();

    let mut sorted = angles.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut violations = Vec::new();
    for pair in sorted.windows(2) {
        let spacing = pair[1] - pair[0];
        if spacing < min_spacing_deg - ANGLE_SPACING_TOLERANCE {
            violations.push(SpacingViolation {
                from_deg: pair[0],
                to_deg: pair[1],
                spacing_deg: spacing,
            });
        }
    }

    let proposed = if violations.is_empty() {
        sorted
    } else {
        repair_angle_list(&sorted, min_spacing_deg)
    };

    AngleListReport {
        min_spacing_deg,
        violations,
        proposed,
    }
}

/// Keep each requested angle that clears the spacing limit against the last
/// kept one, then fill the remainder of the 180 deg sweep with limit-spaced
/// angles.
fn repair_angle_list(sorted: &[f64], min_spacing_deg: f64) -> Vec<f64> {
    let mut kept = Vec::with_capacity(sorted.len());
    if let Some(first) = sorted.first() {
        kept.push(*first);
        for angle in &sorted[1..] {
            if angle - kept[kept.len() - 1] >= min_spacing_deg - ANGLE_SPACING_TOLERANCE {
                kept.push(*angle);
            }
        }
        while kept[kept.len() - 1] + min_spacing_deg <= HALF_ROTATION_DEG {
            let next = kept[kept.len() - 1] + min_spacing_deg;
            kept.push(next);
        }
    }
    kept
}
