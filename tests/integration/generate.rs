//! Image generation through the default action.

use crate::{is_png, payqr};
use payqr::test_utils::TemplateFixture;
use predicates::prelude::*;

#[test]
fn test_generate_default_template() {
    let fixture = TemplateFixture::standard().unwrap();
    let out = fixture.root().join("qr.png");

    payqr(&fixture)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved QR to"))
        .stdout(predicate::str::contains("qr.png"));

    assert!(is_png(&out));
}

#[test]
fn test_generate_with_overrides_and_qr_options() {
    let fixture = TemplateFixture::standard().unwrap();
    fixture.write_template("rent", "[Amount]\nkey = \"I\"\nvalue = \"RSD1,00\"\n").unwrap();
    let out = fixture.root().join("rent.png");

    payqr(&fixture)
        .arg("--template")
        .arg(fixture.template_path("rent"))
        .args(["--set", "I=RSD15000,00", "--set", "S=Rent"])
        .args(["--ec", "h", "--module-size", "3", "--border", "1", "--size", "200x200"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    assert!(is_png(&out));
}

#[test]
fn test_generate_uses_global_settings() {
    let fixture = TemplateFixture::standard().unwrap();
    std::fs::write(fixture.root().join("payqr.toml"), "[qr]\nerror_correction = \"M\"\nsize = [64, 64]\n")
        .unwrap();
    let out = fixture.root().join("small.png");

    payqr(&fixture).arg("--out").arg(&out).assert().success();

    assert!(is_png(&out));
}

#[test]
fn test_generate_bundled_install_root() {
    let temp = tempfile::TempDir::new().unwrap();
    let out = temp.path().join("bundled.png");

    assert_cmd::Command::cargo_bin("payqr")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("--install-root")
        .arg(env!("CARGO_MANIFEST_DIR"))
        .arg("--config")
        .arg(temp.path().join("payqr.toml"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Saved QR to"));

    assert!(is_png(&out));
}
