use clap::{Arg, Command};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use libflyscan::blur::trigger_pattern;
use libflyscan::config::ScanConfig;
use libflyscan::planner::{compute_senses, fly_scan_angles, taxi_distance_deg, MotionPlan};

fn make_template_config(path: &Path) {
    let config = ScanConfig::default();
    let yaml_str = serde_yaml::to_string(&config).unwrap();
    let mut file = File::create(path).expect("Could create template config file!");
    file.write_all(yaml_str.as_bytes())
        .expect("Failed to write yaml data to file!");
}

fn main() {
    // Create a cli
    let matches = Command::new("flyscan_cli")
        .arg_required_else_help(true)
        .subcommand(Command::new("new").about("Make a template scan configuration yaml file"))
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Path to the scan configuration file"),
        )
        .get_matches();

    // Initialize feedback
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("Could not create logging!");

    // Parse the cli
    let config_path = PathBuf::from(matches.get_one::<String>("path").expect("We require args"));

    if let Some(("new", _)) = matches.subcommand() {
        log::info!(
            "Making a template config at {}...",
            config_path.to_string_lossy()
        );

        make_template_config(&config_path);
        log::info!("Done.");
        return;
    }

    // Load our config
    log::info!("Loading config from {}...", config_path.to_string_lossy());
    let config = match ScanConfig::read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    log::info!("Config successfully loaded.");
    log::info!(
        "Rotation Start: {} deg Step: {} deg Angles: {}",
        config.rotation_start,
        config.rotation_step,
        config.num_angles
    );
    log::info!(
        "Exposure: {} s Frame Rate at Zero Exposure: {} Hz",
        config.exposure_time,
        config.frame_rate_zero_exposure
    );
    log::info!(
        "Sensor Width: {} px Max Blur: {} px Encoder: {} counts/rotation",
        config.sensor_width_px,
        config.max_blur_px,
        config.counts_per_rotation
    );

    // Plan the scan
    let plan = match config.plan() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Planning failed: {e}");
            return;
        }
    };

    let timing = config.timing();
    log::info!(
        "Corrected step: {} deg ({} encoder counts)",
        plan.step.corrected_step_deg,
        plan.step.encoder_counts_per_step
    );
    log::info!(
        "Rotation stop: {} deg Motor speed: {:.4} deg/s",
        plan.rotation_stop_deg,
        plan.motor_speed_deg_s(&timing)
    );

    let sense = compute_senses(
        plan.rotation_start_deg,
        plan.rotation_stop_deg,
        true,
        plan.step.encoder_counts_per_step,
    );
    match taxi_distance_deg(
        config.accel_time,
        plan.motor_speed_deg_s(&timing),
        plan.step.corrected_step_deg,
    ) {
        Ok(taxi) => log::info!(
            "Taxi distance: {taxi:.4} deg (start taxi at {} deg)",
            plan.rotation_start_deg - taxi * sense.user_direction as f64
        ),
        Err(e) => log::warn!("No taxi distance: {e}"),
    }

    match &plan.motion {
        MotionPlan::Fly(profile) => {
            log::info!(
                "Blur-limited speed: {:.4} deg/s ({:.4} deg per exposure)",
                profile.max_angular_speed_deg_s,
                profile.theta_max_deg
            );
            log::info!(
                "Frames per 180 deg at the limit: {:.1} Sweep time: {:.1} s",
                profile.frames_per_180deg,
                profile.sweep_time_s()
            );
            match trigger_pattern(profile.max_angular_speed_deg_s, &timing) {
                Ok(pattern) => log::info!(
                    "Trigger spacing at the limit: {:.4} deg ({} frames in 180 deg)",
                    pattern.spacing_deg,
                    pattern.frames_in_180
                ),
                Err(e) => log::warn!("{e}"),
            }
            let angles = fly_scan_angles(
                plan.rotation_start_deg,
                plan.step.corrected_step_deg,
                config.num_angles,
                sense.user_direction,
            );
            let preview: Vec<f64> = angles.iter().take(8).copied().collect();
            log::info!("First angles: {preview:?}");
        }
        MotionPlan::Interlaced(seq) => {
            log::info!(
                "Interlaced sequence: {} angles, {} per rotation, radix {}",
                seq.len(),
                seq.per_rotation_count,
                seq.radix
            );
            let preview: Vec<f64> = seq.angles.iter().take(8).copied().collect();
            log::info!("First angles: {preview:?}");
        }
    }

    log::info!("Done.");
}
