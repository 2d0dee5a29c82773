use serde::{Deserialize, Serialize};
use std::path::Path;

use super::blur::{BlurTolerance, DetectorGeometry, TimingParameters};
use super::encoder::EncoderSpec;
use super::error::ConfigError;
use super::planner::{plan_fly_scan, plan_interlaced_scan, ScanPlan};

/// Acquisition mode selecting which kind of plan the planner builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    Fly,
    Interlaced,
}

/// Structure representing a scan request. Contains the rotation range, the
/// detector timing and geometry, the encoder resolution, and the interlacing
/// parameters. Configs are serializable and deserializable to YAML using
/// serde and serde_yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub rotation_start: f64,
    pub rotation_step: f64,
    pub num_angles: usize,
    pub sensor_width_px: f64,
    pub exposure_time: f64,
    /// Frame rate (Hz) measured at zero exposure time; its inverse is the
    /// per-frame readout overhead
    pub frame_rate_zero_exposure: f64,
    pub max_blur_px: f64,
    pub counts_per_rotation: f64,
    /// Rotation-stage acceleration time (s), used for the taxi distance
    pub accel_time: f64,
    pub mode: ScanMode,
    pub per_rotation_count: usize,
    pub radix: u32,
    pub continuous_angle: bool,
}

impl Default for ScanConfig {
    /// Generate a new ScanConfig with the beamline's usual detector and
    /// stage parameters
    fn default() -> Self {
        Self {
            rotation_start: 0.0,
            rotation_step: 0.12,
            num_angles: 1500,
            sensor_width_px: 2048.0,
            exposure_time: 0.1,
            frame_rate_zero_exposure: 160.0,
            max_blur_px: 1.0,
            counts_per_rotation: 7_200_000.0,
            accel_time: 3.0,
            mode: ScanMode::Fly,
            per_rotation_count: 10,
            radix: 2,
            continuous_angle: false,
        }
    }
}

impl ScanConfig {
    /// Read the configuration in a YAML file
    /// Returns a ScanConfig if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    pub fn geometry(&self) -> DetectorGeometry {
        DetectorGeometry::from_sensor_width_px(self.sensor_width_px)
    }

    pub fn timing(&self) -> TimingParameters {
        TimingParameters::from_frame_rate(self.exposure_time, self.frame_rate_zero_exposure)
    }

    pub fn blur(&self) -> BlurTolerance {
        BlurTolerance {
            max_blur_px: self.max_blur_px,
        }
    }

    pub fn encoder(&self) -> EncoderSpec {
        EncoderSpec {
            counts_per_rotation: self.counts_per_rotation,
        }
    }

    /// Build the scan plan this configuration describes
    pub fn plan(&self) -> Result<ScanPlan, ConfigError> {
        let plan = match self.mode {
            ScanMode::Fly => plan_fly_scan(
                self.rotation_start,
                self.rotation_step,
                self.num_angles,
                &self.encoder(),
                &self.timing(),
                &self.geometry(),
                &self.blur(),
            )?,
            ScanMode::Interlaced => plan_interlaced_scan(
                self.rotation_start,
                self.num_angles,
                self.per_rotation_count,
                self.radix,
                self.continuous_angle,
                &self.encoder(),
                &self.timing(),
                &self.geometry(),
                &self.blur(),
            )?,
        };
        Ok(plan)
    }
}
