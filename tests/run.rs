//! Integration tests for the `run` command.
use adorb::cli::{RunOpts, handle_run_command};
use adorb::settings::Settings;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Get the path to the example variant.
fn get_variant_dir() -> PathBuf {
    PathBuf::from("demos/simple")
}

/// An integration test for the `run` command.
#[test]
fn test_handle_run_command() {
    unsafe { std::env::set_var("ADORB_LOG_LEVEL", "off") };

    {
        // Save results to non-existent directory to check that directory creation works
        let tempdir = tempdir().unwrap();
        let output_dir = tempdir.path().join("results");
        let opts = RunOpts {
            output_dir: Some(output_dir.clone()),
            debug_model: true,
            ..Default::default()
        };
        handle_run_command(&get_variant_dir(), &opts, Some(Settings::default())).unwrap();

        // Header plus one row per analysis year
        let costs = fs::read_to_string(output_dir.join("adorb_costs.csv")).unwrap();
        assert_eq!(costs.lines().count(), 31);
        let metadata: toml::Table =
            toml::from_str(&fs::read_to_string(output_dir.join("metadata.toml")).unwrap())
                .unwrap();
        assert_eq!(metadata["variant"]["analysis_duration"].as_integer(), Some(30));
        assert!(output_dir.join("debug_maintenance_events.csv").is_file());
        assert!(output_dir.join("debug_electric_co2.csv").is_file());
    }

    // Second time will fail because the logging is already initialised
    let tempdir = tempdir().unwrap();
    let opts = RunOpts {
        output_dir: Some(tempdir.path().to_path_buf()),
        ..Default::default()
    };
    assert_eq!(
        handle_run_command(&get_variant_dir(), &opts, Some(Settings::default()))
            .unwrap_err()
            .chain()
            .next()
            .unwrap()
            .to_string(),
        "Failed to initialise logging."
    );
}
