//! # flyscan
//!
//! flyscan is the scan-planning library for a synchrotron tomography beamline,
//! written in Rust. It computes the timing and angle sequences for
//! continuous-rotation (fly) scans and interlaced scans: given the detector
//! exposure and readout times, the allowed motion blur, and the rotation-stage
//! encoder resolution, it produces a validated rotation speed or a
//! low-discrepancy list of projection angles ready to hand to the motion and
//! acquisition layers.
//!
//! ## What it does
//!
//! - **Blur-limited speed**: the maximum angular velocity at which a point on
//!   the edge of the sensor smears by no more than the allowed number of
//!   pixels during one exposure, and the number of frames that fit in a 180°
//!   sweep at that speed.
//! - **Encoder quantization**: snapping a requested angular step to an integer
//!   number of encoder counts, so that position-synchronized output (PSO)
//!   triggering fires on exact encoder ticks. The corrected step is carried
//!   through every downstream computation.
//! - **Interlaced angle sequences**: van der Corput style radix expansions
//!   that spread consecutive rotations across the gaps left by earlier ones,
//!   so an interrupted scan still has roughly uniform angular coverage.
//! - **Scan planning**: combining the above into a single validated plan,
//!   rejecting configurations that would exceed the blur-safe speed.
//!
//! All of this is pure computation over scalars and vectors. Hardware control,
//! EPICS process variables, and data file I/O live in the calling
//! applications, which consume the plans produced here.
//!
//! ## Configuration
//!
//! Scan requests can be described in a YAML file read by [`config::ScanConfig`]
//! (this is what the `flyscan_cli` binary consumes). The format is:
//!
//! ```yml
//! rotation_start: 0.0
//! rotation_step: 0.12
//! num_angles: 1500
//! sensor_width_px: 2048.0
//! exposure_time: 0.1
//! frame_rate_zero_exposure: 160.0
//! max_blur_px: 1.0
//! counts_per_rotation: 7200000.0
//! accel_time: 3.0
//! mode: fly
//! per_rotation_count: 10
//! radix: 2
//! continuous_angle: false
//! ```
//!
//! `mode` is either `fly` or `interlaced`; the `per_rotation_count`, `radix`,
//! and `continuous_angle` fields only matter for interlaced scans.
pub mod angle_list;
pub mod blur;
pub mod config;
pub mod constants;
pub mod encoder;
pub mod error;
pub mod planner;
pub mod sequence;
