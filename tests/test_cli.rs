#![cfg(unix)]

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::*;

fn platescan(image: &Path, tesseract: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_platescan"))
        .arg("--image")
        .arg(image)
        .arg("--no-gui")
        .arg("--tesseract")
        .arg(tesseract)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run platescan")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn prints_plate_number_and_exits_zero() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let engine = fake_tesseract(dir.path(), "MH12DE1433\n", 0);
    let photo = save_png(&synthetic_car());

    let output = platescan(photo.path(), &engine);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "\nLicense Plate Recognition\nDetected license plate number: MH12DE1433\n"
    );
    Ok(())
}

#[test]
fn unreadable_plate_still_exits_zero() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let engine = fake_tesseract(dir.path(), "", 0);
    let photo = save_png(&synthetic_car());

    let output = platescan(photo.path(), &engine);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("Detected license plate number: Not readable\n"));
    Ok(())
}

#[test]
fn no_plate_exits_one() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let engine = fake_tesseract(dir.path(), "SHOULD NOT RUN", 0);
    let photo = save_png(&uniform_image(640, 480));

    let output = platescan(photo.path(), &engine);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "License plate contour not detected.\n");
    Ok(())
}

#[test]
fn missing_image_prints_error_line() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let engine = fake_tesseract(dir.path(), "", 0);
    let missing = dir.path().join("nope.jpg");

    let output = platescan(&missing, &engine);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.starts_with(" Error: Image not found:"), "{text}");
    assert!(text.trim_end().ends_with("nope.jpg"));
    Ok(())
}

#[test]
fn missing_engine_prints_error_line() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let photo = save_png(&synthetic_car());

    let output = platescan(photo.path(), &dir.path().join("no-tesseract-here"));
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with(" Error: OCR engine unavailable"));
    Ok(())
}

#[test]
fn headless_runs_are_repeatable() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let engine = fake_tesseract(dir.path(), "KA01AB1234", 0);
    let photo = save_png(&synthetic_car());

    let first = platescan(photo.path(), &engine);
    let second = platescan(photo.path(), &engine);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
    Ok(())
}
