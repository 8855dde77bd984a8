use std::{path::PathBuf, process::Command};

use stencilcheck::{CheckConfig, ImageRGBA, Rgba8};

const BACKGROUND: Rgba8 = [0x99, 0xD9, 0xEA, 255];
const BLACK: Rgba8 = [0, 0, 0, 255];

fn solid(width: u32, height: u32, px: Rgba8) -> ImageRGBA {
    let mut img = ImageRGBA::blank(width, height);
    for chunk in img.data.chunks_exact_mut(4) {
        chunk.copy_from_slice(&px);
    }
    img
}

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stencilcheck"))
}

fn scratch(case: &str) -> (PathBuf, PathBuf) {
    let dir = PathBuf::from("target").join("cli_smoke").join(case);
    std::fs::create_dir_all(&dir).unwrap();

    let template_path = dir.join("template.png");
    solid(6, 6, BACKGROUND).save_png(&template_path).unwrap();

    let cfg = CheckConfig {
        template_path,
        report_dir: dir.join("reports"),
        ..CheckConfig::default()
    };
    let cfg_path = dir.join("config.json");
    std::fs::write(&cfg_path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();

    (dir, cfg_path)
}

#[test]
fn check_writes_report_and_annotated_png() {
    let (dir, cfg_path) = scratch("pass");
    let sub_path = dir.join("cat_sitting_Smoke.png");
    solid(6, 6, BACKGROUND).save_png(&sub_path).unwrap();

    let status = bin()
        .args(["check", "--config"])
        .arg(&cfg_path)
        .arg(&sub_path)
        .status()
        .unwrap();
    assert!(status.success());

    let report_path = dir
        .join("reports")
        .join("Smoke_preliminary_check_report.md");
    let report = std::fs::read_to_string(report_path).unwrap();
    assert!(report.contains("### Preliminary Checks Report - `Smoke`"));
    assert_eq!(report.matches(":white_check_mark:").count(), 4);

    let changes = ImageRGBA::load(&dir.join("reports").join("Smoke_changes.png")).unwrap();
    assert_eq!(changes.dimensions(), (6, 6));
}

#[test]
fn check_still_writes_artifacts_on_violation() {
    let (dir, cfg_path) = scratch("violation");
    let mut submission = solid(6, 6, BACKGROUND);
    submission.set_pixel(3, 3, BLACK);
    let sub_path = dir.join("cat_sitting_Rowdy.png");
    submission.save_png(&sub_path).unwrap();

    let status = bin()
        .args(["check", "--config"])
        .arg(&cfg_path)
        .arg(&sub_path)
        .status()
        .unwrap();
    assert!(status.success());

    let report = std::fs::read_to_string(
        dir.join("reports").join("Rowdy_preliminary_check_report.md"),
    )
    .unwrap();
    assert_eq!(report.matches(":x:").count(), 1);
    assert!(dir.join("reports").join("Rowdy_changes.png").exists());
}

#[test]
fn check_without_a_name_reports_unavailable_instead_of_writing() {
    let (dir, cfg_path) = scratch("no_name");
    let sub_path = dir.join("wrong_prefix.png");
    solid(6, 6, BACKGROUND).save_png(&sub_path).unwrap();

    let output = bin()
        .args(["check", "--config"])
        .arg(&cfg_path)
        .arg(&sub_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("report unavailable"));
    assert!(!dir.join("reports").exists());
}

#[test]
fn gallery_prints_a_table() {
    let dir = PathBuf::from("target").join("cli_smoke").join("gallery");
    std::fs::create_dir_all(&dir).unwrap();
    for name in ["cat_sitting_A.png", "cat_sitting_B.png"] {
        solid(2, 2, BACKGROUND).save_png(&dir.join(name)).unwrap();
    }

    let output = bin().arg("gallery").arg(&dir).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("<img ").count(), 2);
    assert!(stdout.contains("[A](gallery/cat_sitting_A.png)"));
    assert!(stdout.contains("|:--:|:--:|"));
}
