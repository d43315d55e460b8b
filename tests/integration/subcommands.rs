//! The `render`, `fields`, `templates` and `edit` subcommands.

use crate::payqr;
use payqr::test_utils::TemplateFixture;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_render_prints_payload() {
    let fixture = TemplateFixture::standard().unwrap();

    payqr(&fixture)
        .args(["render", "--set", "I=RSD1,00", "--set", "X=1"])
        .assert()
        .success()
        .stdout("K:PR|V:01|C:1|R:845000000040484987|N:JKP Beograd|I:RSD1,00|SF:189|X:1\n");
}

#[test]
fn test_render_without_extras() {
    let fixture = TemplateFixture::standard().unwrap();

    payqr(&fixture)
        .args(["render", "--set", "X=1", "--no-extras"])
        .assert()
        .success()
        .stdout(predicate::str::contains("X:1").not());
}

#[test]
fn test_fields_text() {
    let fixture = TemplateFixture::standard().unwrap();

    payqr(&fixture)
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("Identification Code (K):"))
        .stdout(predicate::str::contains("Payee Name (N):"))
        .stdout(predicate::str::contains("JKP Beograd"));
}

#[test]
fn test_fields_json() {
    let fixture = TemplateFixture::standard().unwrap();

    let output = payqr(&fixture).args(["fields", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let fields: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let fields = fields.as_array().unwrap();
    assert_eq!(fields.len(), 8);
    assert_eq!(fields[0]["key"], "K");
    assert_eq!(fields[0]["label"], "IdentificationCode");
    assert_eq!(fields[0]["fixed"], true);
    assert_eq!(fields[3]["key"], "R");
    assert_eq!(fields[3]["required"], true);
    assert_eq!(fields[3]["fixed"], false);
    assert!(fields[4].get("required").is_none());
}

#[test]
fn test_templates_bootstraps_and_lists() {
    let fixture = TemplateFixture::standard().unwrap();
    fixture.write_template("donation", "[Amount]\nkey = \"I\"\nvalue = \"RSD1,00\"\n").unwrap();
    let user_dir = fixture.root().join("user");

    payqr(&fixture)
        .arg("templates")
        .arg("--templates-dir")
        .arg(&user_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("default"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("donation"));

    assert!(user_dir.join("default.toml").exists());
    assert!(!user_dir.join("config.toml").exists());
}

#[test]
fn test_templates_from_global_settings() {
    let fixture = TemplateFixture::standard().unwrap();
    let user_dir = fixture.root().join("configured");
    fs::write(
        fixture.root().join("payqr.toml"),
        format!("templates_dir = {:?}\n", user_dir.to_string_lossy()),
    )
    .unwrap();

    payqr(&fixture).arg("templates").assert().success();

    assert!(user_dir.join("default.toml").exists());
}

#[test]
fn test_edit_save_as_creates_template() {
    let fixture = TemplateFixture::standard().unwrap();
    let user_dir = fixture.root().join("user");

    payqr(&fixture)
        .args(["edit", "default", "--set", "N=Landlord", "--amount", "25000,00", "--save-as", "my rent"])
        .arg("--templates-dir")
        .arg(&user_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("my_rent"));

    let saved = fs::read_to_string(user_dir.join("my_rent.toml")).unwrap();
    assert!(saved.contains("Landlord"));
    assert!(saved.contains("RSD25000,00"));
    assert!(!saved.contains("IdentificationCode"));

    // Default stays untouched
    let default = fs::read_to_string(user_dir.join("default.toml")).unwrap();
    assert!(default.contains("JKP Beograd"));

    payqr(&fixture)
        .args(["render", "--template"])
        .arg(user_dir.join("my_rent.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("N:Landlord|I:RSD25000,00"));
}

#[test]
fn test_edit_default_in_place_is_refused() {
    let fixture = TemplateFixture::standard().unwrap();
    let user_dir = fixture.root().join("user");

    payqr(&fixture)
        .args(["edit", "default", "--set", "N=Other"])
        .arg("--templates-dir")
        .arg(&user_dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("read-only"))
        .stderr(predicate::str::contains("--save-as"));
}

#[test]
fn test_edit_fixed_field_is_refused() {
    let fixture = TemplateFixture::standard().unwrap();
    let user_dir = fixture.root().join("user");

    payqr(&fixture)
        .args(["edit", "default", "--set", "K=XX", "--save-as", "other"])
        .arg("--templates-dir")
        .arg(&user_dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is fixed"));

    assert!(!user_dir.join("other.toml").exists());
}

#[test]
fn test_edit_without_changes() {
    let fixture = TemplateFixture::standard().unwrap();
    let user_dir = fixture.root().join("user");

    payqr(&fixture)
        .args(["edit", "default", "--set", "N=JKP Beograd"])
        .arg("--templates-dir")
        .arg(&user_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes to save"));
}
