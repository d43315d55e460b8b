//! End-to-end rendering scenarios through `TemplateManager`.

use payqr::template::{get_fields, parse_document, MergedTemplate, Overrides, TemplateManager};
use payqr::test_utils::{init_test_logging, TemplateFixture};

const CONFIG: &str = "[IdentificationCode]\nkey = \"K\"\nvalue = \"PR\"\n";
const TEMPLATE: &str = "[Amount]\nkey = \"RSD\"\nvalue = \"RSD9000,00\"\n";

fn manager() -> TemplateManager {
    init_test_logging(None);
    let fixture = TemplateFixture::with_config(CONFIG).unwrap();
    let template = fixture.write_template("default", TEMPLATE).unwrap();
    TemplateManager::load(&fixture.config_path(), &template).unwrap()
}

#[test]
fn renders_config_then_template_with_default_separators() {
    assert_eq!(manager().render_payload(&Overrides::new()), "K:PR|RSD:RSD9000,00");
}

#[test]
fn empty_override_drops_the_segment() {
    let overrides: Overrides = [("RSD", "")].into_iter().collect();
    assert_eq!(manager().render_payload(&overrides), "K:PR");
}

#[test]
fn unknown_override_key_is_appended() {
    let overrides: Overrides = [("X", "1")].into_iter().collect();
    assert_eq!(manager().render_payload(&overrides), "K:PR|RSD:RSD9000,00|X:1");
    assert_eq!(manager().render_payload_with(&overrides, false), "K:PR|RSD:RSD9000,00");
}

#[test]
fn empty_fields_array_yields_no_fields() {
    let config = parse_document(CONFIG).unwrap();
    let template = parse_document("fields = []\n\n[Amount]\nkey = \"I\"\nvalue = \"1\"\n").unwrap();

    let merged = MergedTemplate::merge(&config, &template);
    assert!(get_fields(&merged).is_empty());
    assert_eq!(TemplateManager::from_documents(&config, &template).render_payload(&Overrides::new()), "");
}

#[test]
fn bundled_templates_render() {
    let root = env!("CARGO_MANIFEST_DIR");
    let config = std::path::Path::new(root).join("templates/config.toml");

    for name in ["default", "donation"] {
        let template = std::path::Path::new(root).join(format!("templates/{name}.toml"));
        let manager = TemplateManager::load(&config, &template).unwrap();
        let payload = manager.render_payload(&Overrides::new());
        assert!(payload.starts_with("K:PR|V:01|C:1|"), "{name}: {payload}");
        assert!(manager.variable_fields().count() > 0);
    }
}
