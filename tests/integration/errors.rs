//! Failure reporting: messages on stderr and exit code 1.

use crate::payqr;
use payqr::test_utils::TemplateFixture;
use predicates::prelude::*;

#[test]
fn test_malformed_template_fails() {
    let fixture = TemplateFixture::standard().unwrap();
    fixture.write_template("broken", "[Amount\nkey = ").unwrap();
    let out = fixture.root().join("qr.png");

    payqr(&fixture)
        .arg("--template")
        .arg(fixture.template_path("broken"))
        .arg("--out")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load document"))
        .stderr(predicate::str::contains("suggestion"));

    assert!(!out.exists());
}

#[test]
fn test_missing_config_fails() {
    let fixture = TemplateFixture::standard().unwrap();
    std::fs::remove_file(fixture.config_path()).unwrap();

    payqr(&fixture)
        .arg("render")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn test_invalid_override_fails() {
    let fixture = TemplateFixture::standard().unwrap();

    payqr(&fixture)
        .args(["render", "--set", "no-equals-sign"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid override 'no-equals-sign'"));
}

#[test]
fn test_invalid_size_fails() {
    let fixture = TemplateFixture::standard().unwrap();

    payqr(&fixture)
        .arg("--out")
        .arg(fixture.root().join("qr.png"))
        .args(["--size", "huge"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid image size 'huge'"));
}

#[test]
fn test_unsupported_image_extension_fails() {
    let fixture = TemplateFixture::standard().unwrap();

    payqr(&fixture)
        .arg("--out")
        .arg(fixture.root().join("qr.notanimage"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("QR encoder failed"));
}

#[test]
fn test_missing_out_is_a_usage_error() {
    let fixture = TemplateFixture::standard().unwrap();

    payqr(&fixture).assert().failure().stderr(predicate::str::contains("--out"));
}

#[test]
fn test_invalid_global_settings_fail() {
    let fixture = TemplateFixture::standard().unwrap();
    std::fs::write(fixture.root().join("payqr.toml"), "[qr]\nerror_correction = \"Z\"\n").unwrap();

    payqr(&fixture)
        .arg("render")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse global config"));
}

#[test]
fn test_oversized_border_fails() {
    let fixture = TemplateFixture::standard().unwrap();
    let out = fixture.root().join("qr.png");

    payqr(&fixture)
        .arg("--out")
        .arg(&out)
        .args(["--border", "4294967295"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("QR encoder failed"));

    assert!(!out.exists());
}
