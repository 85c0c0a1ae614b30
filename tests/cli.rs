use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn renders_an_image_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("mandel.png");
    Command::cargo_bin("tilebrot")
        .unwrap()
        .args(&["-o", output.to_str().unwrap(), "-s", "64x48", "-i", "64", "-T", "16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tiles: 4x3 (16x16)"));
    let image = image::open(&output).unwrap().to_luma();
    assert_eq!(image.dimensions(), (64, 48));
}

#[test]
fn prints_a_preview() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("mandel.pgm");
    Command::cargo_bin("tilebrot")
        .unwrap()
        .args(&["-o", output.to_str().unwrap(), "-s", "80x40", "-p"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@"));
    assert!(output.exists());
}

#[test]
fn inverted_viewport_is_refused() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("never.png");
    Command::cargo_bin("tilebrot")
        .unwrap()
        .args(&["-o", output.to_str().unwrap(), "-l", "1.0,1.0", "-r", "-1.0,-1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid viewport"));
    assert!(!output.exists());
}

#[test]
fn empty_image_is_refused() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("never.png");
    Command::cargo_bin("tilebrot")
        .unwrap()
        .args(&["-o", output.to_str().unwrap(), "-s", "0x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid resolution"));
}

#[test]
fn output_is_required() {
    Command::cargo_bin("tilebrot").unwrap().assert().failure();
}
