use std::path::PathBuf;
use thiserror::Error;

/// Precondition violations for the blur-limited speed model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionLimitError {
    #[error("Invalid sensor radius {0} px; must be positive")]
    BadSensorRadius(f64),
    #[error("Invalid blur tolerance {0} px; must be positive and smaller than the sensor radius {1} px")]
    BadBlurTolerance(f64, f64),
    #[error("Invalid exposure time {0} s; must be positive")]
    BadExposureTime(f64),
    #[error("Invalid readout time {0} s; must not be negative")]
    BadReadoutTime(f64),
    #[error("Invalid angular speed {0} deg/s; must be positive")]
    BadAngularSpeed(f64),
    #[error("No frames fit in a 180 deg sweep; trigger spacing is {0} deg. Reduce exposure or readout time, or increase the allowed blur")]
    NoFramesFit(f64),
}

/// Precondition violations for the encoder step quantizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantizeError {
    #[error("Invalid encoder resolution {0} counts per rotation; must be positive")]
    BadCountsPerRotation(f64),
    #[error("Requested rotation step is zero; a scan cannot stand still")]
    ZeroStep,
    #[error("Requested rotation step {0} deg rounds to zero encoder counts; below the encoder resolution")]
    StepBelowResolution(f64),
}

/// Precondition violations for the interlaced angle sequencer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
    #[error("Invalid total projection count {0}; must be positive")]
    BadTotalCount(usize),
    #[error("Invalid projections-per-rotation count {0}; must be positive")]
    BadPerRotationCount(usize),
    #[error("Invalid radix {0}; must be at least 2")]
    BadRadix(u32),
}

/// Errors raised while assembling a complete scan plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Scan plan failed due to motion limit error: {0}")]
    LimitError(#[from] MotionLimitError),
    #[error("Scan plan failed due to quantizer error: {0}")]
    QuantizeError(#[from] QuantizeError),
    #[error("Scan plan failed due to sequence error: {0}")]
    SequenceError(#[from] SequenceError),
    #[error("Requested speed {requested_deg_s} deg/s exceeds the blur-limited speed {limit_deg_s} deg/s")]
    BlurConstraintViolated {
        requested_deg_s: f64,
        limit_deg_s: f64,
    },
    #[error("Invalid number of angles {0}; must be positive")]
    BadAngleCount(usize),
    #[error("Invalid acceleration time {0} s; must not be negative")]
    BadAccelTime(f64),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
    #[error("Config failed due to scan plan error: {0}")]
    PlanError(#[from] PlanError),
}
