//! Interlaced angle sequencing.
//!
//! An interlaced scan collects full rotations in phases. Every rotation emits
//! `per_rotation_count` equally spaced projections, but each rotation's
//! pattern is shifted by a phase derived from the van der Corput radical
//! inverse of the rotation index: reflecting the index's base-`radix` digits
//! about the radix point gives a fraction in [0, 1) that subdivides the gaps
//! left by all earlier rotations. Early prefixes of the sequence therefore
//! already cover the circle roughly uniformly, which is what makes an
//! interrupted or progressively reconstructed scan useful.
use super::constants::FULL_ROTATION_DEG;
use super::error::SequenceError;

/// Projection angles in acquisition order.
///
/// The ordering is the deliverable: index `n` of `angles` is the stage
/// position for the `n`-th trigger. With `continuous` set the angles are
/// cumulative stage positions (monotonically increasing past 360 deg) rather
/// than values wrapped into a single rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleSequence {
    pub angles: Vec<f64>,
    pub per_rotation_count: usize,
    pub radix: u32,
    pub continuous: bool,
}

impl AngleSequence {
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Radical inverse of `index` in the given radix: the digits of `index`
/// mirrored about the radix point, as a fraction in [0, 1).
fn radix_fraction(mut index: u64, radix: u64) -> f64 {
    let mut fraction = 0.0;
    let mut place = 1.0 / radix as f64;
    while index != 0 {
        fraction += (index % radix) as f64 * place;
        place /= radix as f64;
        index /= radix;
    }
    fraction
}

/// Generate `total_count` projection angles for an interlaced scan.
///
/// Rotation `i` is offset from the base pattern `0, s, 2s, ...`
/// (`s = 360 / per_rotation_count`) by `radix_fraction(i) * s`, so no two
/// rotations repeat an angle until the radix expansion cycles. If
/// `total_count` is not a multiple of `per_rotation_count` the final rotation
/// is truncated, never padded.
pub fn generate_sequence(
    total_count: usize,
    per_rotation_count: usize,
    radix: u32,
    continuous: bool,
) -> Result<AngleSequence, SequenceError> {
    if total_count == 0 {
        return Err(SequenceError::BadTotalCount(total_count));
    }
    if per_rotation_count == 0 {
        return Err(SequenceError::BadPerRotationCount(per_rotation_count));
    }
    if radix < 2 {
        return Err(SequenceError::BadRadix(radix));
    }

    let base_step = FULL_ROTATION_DEG / per_rotation_count as f64;
    let mut angles = Vec::with_capacity(total_count);
    let mut rotation_index: u64 = 0;

    while angles.len() < total_count {
        let offset = radix_fraction(rotation_index, radix as u64) * base_step;
        let wrap_offset = if continuous {
            rotation_index as f64 * FULL_ROTATION_DEG
        } else {
            0.0
        };
        let mut k = 0;
        while angles.len() < total_count && k < per_rotation_count {
            angles.push(wrap_offset + offset + k as f64 * base_step);
            k += 1;
        }
        rotation_index += 1;
    }

    Ok(AngleSequence {
        angles,
        per_rotation_count,
        radix,
        continuous,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_radix_fraction() {
        // Base 2: 1 -> 0.5, 2 -> 0.25, 3 -> 0.75, 4 -> 0.125
        assert_close(radix_fraction(0, 2), 0.0);
        assert_close(radix_fraction(1, 2), 0.5);
        assert_close(radix_fraction(2, 2), 0.25);
        assert_close(radix_fraction(3, 2), 0.75);
        assert_close(radix_fraction(4, 2), 0.125);
        // Base 3: 1 -> 1/3, 2 -> 2/3, 3 -> 1/9
        assert_close(radix_fraction(1, 3), 1.0 / 3.0);
        assert_close(radix_fraction(2, 3), 2.0 / 3.0);
        assert_close(radix_fraction(3, 3), 1.0 / 9.0);
    }

    #[test]
    fn test_first_rotation_is_uniform() {
        // A single rotation covers the circle with the plain uniform grid
        let seq = generate_sequence(8, 8, 2, false).unwrap();
        for (k, angle) in seq.angles.iter().enumerate() {
            assert_close(*angle, k as f64 * 45.0);
        }
    }

    #[test]
    fn test_two_rotations_interlace() {
        // radix 3, 3 per rotation: second rotation shifted by (1/3)*120 = 40
        let seq = generate_sequence(6, 3, 3, false).unwrap();
        let expected = [0.0, 120.0, 240.0, 40.0, 160.0, 280.0];
        assert_eq!(seq.len(), 6);
        for (angle, want) in seq.angles.iter().zip(expected) {
            assert_close(*angle, want);
        }
    }

    #[test]
    fn test_rotations_do_not_repeat_angles() {
        // With radix 2 the first 4 rotations have distinct phases, so all
        // angles are unique.
        let per_rot = 10;
        let seq = generate_sequence(4 * per_rot, per_rot, 2, false).unwrap();
        let mut sorted = seq.angles.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in sorted.windows(2) {
            assert!(pair[1] - pair[0] > 1e-9);
        }
    }

    #[test]
    fn test_partial_final_rotation_truncated() {
        let seq = generate_sequence(7, 3, 2, false).unwrap();
        assert_eq!(seq.len(), 7);
        // Third rotation (index 2, phase 1/4) contributes only one angle
        assert_close(seq.angles[6], 0.25 * 120.0);
    }

    #[test]
    fn test_continuous_unwraps_rotations() {
        let seq = generate_sequence(6, 3, 3, true).unwrap();
        let expected = [0.0, 120.0, 240.0, 400.0, 520.0, 640.0];
        for (angle, want) in seq.angles.iter().zip(expected) {
            assert_close(*angle, want);
        }
        // Cumulative stage positions must be strictly increasing
        for pair in seq.angles.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_bad_inputs() {
        match generate_sequence(0, 3, 2, false) {
            Err(SequenceError::BadTotalCount(0)) => (),
            other => panic!("expected total-count error, got {other:?}"),
        }
        match generate_sequence(10, 0, 2, false) {
            Err(SequenceError::BadPerRotationCount(0)) => (),
            other => panic!("expected per-rotation error, got {other:?}"),
        }
        match generate_sequence(10, 3, 1, false) {
            Err(SequenceError::BadRadix(1)) => (),
            other => panic!("expected radix error, got {other:?}"),
        }
    }
}
