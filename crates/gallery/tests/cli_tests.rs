//! End-to-end tests for the gallery command line.
//!
//! Only the headless subcommands are exercised; the interactive session
//! needs a real terminal.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a Command for the gallery binary with a clean environment.
#[allow(deprecated)]
fn gallery_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gallery").unwrap();
    cmd.env_remove("GALLERY_SEED")
        .env_remove("GALLERY_TODAY")
        .env_remove("GALLERY_WEEK_START")
        .env_remove("GALLERY_CONFIG")
        .env_remove("GALLERY_LOG_FILE")
        .env_remove("GALLERY_NO_ALT_SCREEN")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

mod list {
    use super::*;

    #[test]
    fn test_list_prints_every_page() {
        gallery_cmd()
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("dual-slider"))
            .stdout(predicate::str::contains("Headphone Manager"))
            .stdout(predicate::str::contains("heatmap"))
            .stdout(predicate::str::contains("Image Translate"))
            .stdout(predicate::str::contains("unit-curve"));
    }
}

mod render {
    use super::*;

    #[test]
    fn test_render_heatmap_with_fixed_date() {
        gallery_cmd()
            .args(["--seed", "7", "--today", "2025-08-07", "render", "heatmap"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("HeatMap"))
            .stdout(predicate::str::contains(
                "2025-06-22 to 2025-08-09, weeks start Sun",
            ));
    }

    #[test]
    fn test_render_heatmap_monday_weeks() {
        gallery_cmd()
            .args([
                "--seed",
                "7",
                "--today",
                "2025-08-07",
                "--week-start",
                "mon",
                "render",
                "heatmap",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "2025-06-23 to 2025-08-10, weeks start Mon",
            ));
    }

    #[test]
    fn test_render_is_deterministic_with_seed() {
        let run = || {
            gallery_cmd()
                .args(["--seed", "99", "--today", "2025-01-15", "render", "heatmap"])
                .output()
                .unwrap()
                .stdout
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_render_all_pages() {
        gallery_cmd()
            .args(["--seed", "1", "--today", "2025-08-07", "render"])
            .assert()
            .success()
            .stdout(predicate::str::contains("DualSlider"))
            .stdout(predicate::str::contains("Unit Curve"))
            .stdout(predicate::str::contains("Menu of the day"));
    }

    #[test]
    fn test_render_without_color_has_no_escapes() {
        gallery_cmd()
            .args(["render", "dual-slider"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\u{1b}[").not());
    }

    #[test]
    fn test_render_unknown_page_fails() {
        gallery_cmd()
            .args(["render", "wifi"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown page 'wifi'"));
    }
}

mod config {
    use super::*;

    #[test]
    fn test_diagnostics_reflects_flags() {
        gallery_cmd()
            .args(["--seed", "5", "--today", "2025-08-07", "diagnostics"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Seed: Some(5)"))
            .stdout(predicate::str::contains("Today: 2025-08-07"))
            .stdout(predicate::str::contains("Heat map: 7x7"));
    }

    #[test]
    fn test_config_file_is_used() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "heatmap": {{ "columns": 4, "rows": 7 }} }}"#).unwrap();

        gallery_cmd()
            .arg("--config")
            .arg(file.path())
            .arg("diagnostics")
            .assert()
            .success()
            .stdout(predicate::str::contains("Heat map: 4x7"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "heatmap": {{ "columns": 0 }} }}"#).unwrap();

        gallery_cmd()
            .arg("--config")
            .arg(file.path())
            .arg("list")
            .assert()
            .failure()
            .stderr(predicate::str::contains("not usable"));
    }

    #[test]
    fn test_missing_config_file() {
        gallery_cmd()
            .args(["--config", "/definitely/not/here.json", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Config file not found"));
    }

    #[test]
    fn test_env_seed_fallback() {
        gallery_cmd()
            .env("GALLERY_SEED", "11")
            .arg("diagnostics")
            .assert()
            .success()
            .stdout(predicate::str::contains("Seed: Some(11)"));
    }

    #[test]
    fn test_log_file_receives_logs() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("gallery.log");
        gallery_cmd()
            .arg("-vv")
            .arg("--log-file")
            .arg(&log)
            .arg("list")
            .assert()
            .success();
        let text = std::fs::read_to_string(&log).unwrap();
        assert!(text.contains("logging initialized"));
    }

    #[test]
    fn test_env_log_file_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("from-env.log");
        gallery_cmd()
            .env("GALLERY_LOG_FILE", &log)
            .arg("-vv")
            .arg("list")
            .assert()
            .success();
        assert!(log.exists());
    }
}
