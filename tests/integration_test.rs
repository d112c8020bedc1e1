use image::Rgba;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs `badge-gen -o <dir>` with the defaults and checks the full icon set, the pixels of
/// one icon and `manifest.json`.
#[test]
fn test_default_icon_set_with_manifest() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let output = run_badge_gen(&output_dir, &[]);
    assert_success(&output, "badge-gen with defaults");

    for state in ["enabled", "disabled"] {
        for size in [16, 48, 128] {
            let icon_path = output_dir.join(state).join(format!("icon{size}.png"));
            assert!(
                icon_path.exists(),
                "Icon should exist at: {}",
                icon_path.display()
            );

            let icon = image::open(&icon_path).expect("Failed to load generated icon");
            assert_eq!(icon.width(), size);
            assert_eq!(icon.height(), size);
        }
    }

    let enabled48 = image::open(output_dir.join("enabled").join("icon48.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(*enabled48.get_pixel(24, 8), Rgba([255, 255, 255, 255]));
    assert_eq!(*enabled48.get_pixel(1, 1), Rgba([0, 0, 0, 0]));
    assert_eq!(*enabled48.get_pixel(24, 3), Rgba([76, 175, 80, 255]));

    let disabled16 = image::open(output_dir.join("disabled").join("icon16.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(*disabled16.get_pixel(2, 2), Rgba([158, 158, 158, 255]));

    // Read and verify that manifest.json is valid JSON
    let manifest_content = std::fs::read_to_string(output_dir.join("manifest.json"))
        .expect("Failed to read manifest.json");
    let parsed: serde_json::Value =
        serde_json::from_str(&manifest_content).expect("manifest.json should contain valid JSON");

    assert_eq!(parsed["states"]["enabled"]["16"], "enabled/icon16.png");
    assert_eq!(parsed["states"]["disabled"]["128"], "disabled/icon128.png");
    assert_eq!(parsed["info"]["version"], 1);
    assert_eq!(parsed["info"]["author"], "badge-gen");
}

#[test]
fn test_cli_overrides_sizes_and_states() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");

    let output = run_badge_gen(
        &output_dir,
        &[
            "--sizes",
            "32,64",
            "--state",
            "busy=#ff0000",
            "--no-manifest",
            "--sequential",
        ],
    );
    assert_success(&output, "badge-gen with overrides");

    assert!(output_dir.join("busy").join("icon32.png").exists());
    assert!(output_dir.join("busy").join("icon64.png").exists());
    assert!(!output_dir.join("enabled").exists());
    assert!(!output_dir.join("manifest.json").exists());

    let busy32 = image::open(output_dir.join("busy").join("icon32.png"))
        .unwrap()
        .to_rgba8();
    // 32: radius 4, padding 4, so (16, 2) is badge above the glyph
    assert_eq!(*busy32.get_pixel(16, 2), Rgba([255, 0, 0, 255]));
}

#[test]
fn test_config_file_and_clean() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let stale = output_dir.join("on").join("stale.png");
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, b"old").unwrap();
    let unrelated = output_dir.join("README.txt");
    std::fs::write(&unrelated, b"keep me").unwrap();

    let config_path = temp_dir.path().join("badges.toml");
    std::fs::write(
        &config_path,
        r#"
sizes = [24]

[[states]]
name = "on"
color = "0, 128, 255"

[[states]]
name = "off"
color = "rgb(40, 40, 40)"
"#,
    )
    .unwrap();

    let config_arg = config_path.to_str().expect("temp path should be UTF-8");
    let output = run_badge_gen(&output_dir, &["--config", config_arg, "--clean"]);
    assert_success(&output, "badge-gen with config file");

    assert!(!stale.exists(), "--clean should remove old state icons");
    assert!(unrelated.exists(), "--clean should only touch state directories");
    assert!(output_dir.join("on").join("icon24.png").exists());
    assert!(output_dir.join("off").join("icon24.png").exists());

    let on24 = image::open(output_dir.join("on").join("icon24.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(*on24.get_pixel(12, 1), Rgba([0, 128, 255, 255]));
}

#[test]
fn test_invalid_size_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let output = run_badge_gen(&output_dir, &["--sizes", "16,2"]);

    assert!(!output.status.success(), "size 2 should be rejected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid icon size 2"), "stderr: {stderr}");
    assert!(!output_dir.join("enabled").exists());
}

#[test]
fn test_rust_log_controls_crate_log_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = run_badge_gen(&temp_dir.path().join("info"), &["--sizes", "16"]);
    assert_success(&output, "badge-gen at info");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated"), "stdout: {stdout}");

    let quiet_dir = temp_dir.path().join("warn");
    let output = run_badge_gen_with_log(&quiet_dir, &["--sizes", "16"], "badge_gen=warn");
    assert_success(&output, "badge-gen at warn");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stdout.contains("Generated"), "stdout: {stdout}");
    assert!(!stderr.contains("Generated"), "stderr: {stderr}");
    assert!(quiet_dir.join("enabled").join("icon16.png").exists());
}

#[test]
fn test_verify_badge_accepts_generated_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let output = run_badge_gen(&output_dir, &[]);
    assert_success(&output, "badge-gen with defaults");

    let icon = output_dir.join("enabled").join("icon128.png");
    let output = Command::new(verify_binary_path())
        .arg(&icon)
        .arg("#4caf50")
        .output()
        .expect("Failed to run verify_badge");
    assert_success(&output, "verify_badge");
    assert!(String::from_utf8_lossy(&output.stdout).contains("✓ Badge matches"));

    let output = Command::new(verify_binary_path())
        .arg(&icon)
        .arg("#9e9e9e")
        .output()
        .expect("Failed to run verify_badge");
    assert!(!output.status.success(), "wrong color should be reported");
}

fn run_badge_gen(output_dir: &Path, args: &[&str]) -> Output {
    run_badge_gen_with_log(output_dir, args, "badge_gen=info")
}

fn run_badge_gen_with_log(output_dir: &Path, args: &[&str], rust_log: &str) -> Output {
    Command::new(badge_gen_binary_path())
        .arg("-o")
        .arg(output_dir)
        .args(args)
        .env("RUST_LOG", rust_log)
        .output()
        .expect("Failed to run badge-gen command")
}

fn assert_success(output: &Output, what: &str) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("{what} failed");
    }
}

fn badge_gen_binary_path() -> PathBuf {
    Path::new(env!("CARGO_BIN_EXE_badge-gen")).to_path_buf()
}

fn verify_binary_path() -> PathBuf {
    Path::new(env!("CARGO_BIN_EXE_verify_badge")).to_path_buf()
}
