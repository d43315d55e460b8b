//! Template catalog against the bundled templates and temporary directories.

use payqr::catalog::{bootstrap, sanitize_name, InstallRoot, TemplateCatalog};
use payqr::core::PayqrError;
use payqr::test_utils::TemplateFixture;
use std::fs;

#[test]
fn bootstrap_from_bundled_templates() {
    let root = InstallRoot::new(env!("CARGO_MANIFEST_DIR"));
    let user = tempfile::TempDir::new().unwrap();
    let user_dir = user.path().join("templates");

    let copied = bootstrap(&root.bundled_dir(), &user_dir).unwrap();
    assert!(copied.contains(&"default.toml".to_string()));
    assert!(!copied.contains(&"config.toml".to_string()));

    let catalog = TemplateCatalog::discover(&user_dir).unwrap();
    assert_eq!(catalog.default_name(), "default");
    assert!(catalog.contains("donation"));
}

#[test]
fn bootstrap_leaves_populated_directory_alone() {
    let fixture = TemplateFixture::standard().unwrap();
    let user_dir = fixture.subdir("user").unwrap();
    fs::write(user_dir.join("mine.toml"), "[A]\nkey = \"A\"\nvalue = \"1\"\n").unwrap();

    let copied = bootstrap(&fixture.templates_dir(), &user_dir).unwrap();
    assert!(copied.is_empty());

    let catalog = TemplateCatalog::discover(&user_dir).unwrap();
    assert_eq!(catalog.names(), ["mine"]);
    assert_eq!(catalog.default_name(), "mine");
}

#[test]
fn bundled_directory_lists_templates_but_not_config() {
    let fixture = TemplateFixture::standard().unwrap();
    fixture.write_template("rent", "").unwrap();

    let catalog = TemplateCatalog::discover(&fixture.templates_dir()).unwrap();
    assert_eq!(catalog.names(), ["default", "rent"]);
    assert_eq!(catalog.path_for("rent").unwrap(), fixture.template_path("rent"));
}

#[test]
fn missing_directory_has_no_templates() {
    let fixture = TemplateFixture::standard().unwrap();
    let err = TemplateCatalog::discover(&fixture.root().join("nowhere")).unwrap_err();
    assert!(matches!(err, PayqrError::NoTemplatesFound { .. }));
}

#[test]
fn install_root_found_from_nested_path() {
    let fixture = TemplateFixture::standard().unwrap();
    let nested = fixture.subdir("target/release").unwrap();

    let root = InstallRoot::find_from(&nested).unwrap();
    assert_eq!(root.config_path(), fixture.config_path());
}

#[test]
fn sanitized_names_are_file_safe() {
    for raw in ["rent 2024", "a/b", "x.y", "čačak"] {
        let name = sanitize_name(raw).unwrap();
        assert!(
            name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "{raw} -> {name}"
        );
    }
}
