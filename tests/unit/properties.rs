//! Properties of merge, normalization and rendering.

use payqr::template::{
    get_fields, parse_document, render, FieldRecord, MergedTemplate, Overrides, RenderSettings,
    TemplateManager,
};
use toml::Table;

const CONFIG: &str = r#"
separator = "|"
kv_sep = ":"
trim_empty = true

[IdentificationCode]
key = "K"
value = "PR"

[Version]
key = "V"
value = "01"

[CodeSet]
key = "C"
value = "1"
"#;

const TEMPLATE: &str = r#"
[PayeeName]
key = "N"
value = "JKP"

[Amount]
key = "I"
value = "RSD10,00"

[PayerName]
key = "P"
value = ""

[Purpose]
key = "S"
value = "Rent"
"#;

fn doc(content: &str) -> Table {
    parse_document(content).unwrap()
}

fn labels(fields: &[FieldRecord]) -> Vec<&str> {
    fields.iter().map(|f| f.label.as_str()).collect()
}

#[test]
fn config_fields_come_before_template_fields_in_declaration_order() {
    let fields = get_fields(&MergedTemplate::merge(&doc(CONFIG), &doc(TEMPLATE)));
    assert_eq!(
        labels(&fields),
        vec![
            "IdentificationCode",
            "Version",
            "CodeSet",
            "PayeeName",
            "Amount",
            "PayerName",
            "Purpose",
        ]
    );
}

#[test]
fn ordering_holds_for_reversed_declaration() {
    let template = doc("[Zeta]\nkey = \"Z\"\nvalue = \"1\"\n\n[Alpha]\nkey = \"A\"\nvalue = \"2\"\n");
    let fields = get_fields(&MergedTemplate::merge(&doc(CONFIG), &template));
    assert_eq!(&labels(&fields)[3..], ["Zeta", "Alpha"]);
}

#[test]
fn template_field_replaces_config_field_in_place() {
    let template = doc("[Version]\nkey = \"V\"\nvalue = \"02\"\n\n[Amount]\nkey = \"I\"\nvalue = \"RSD1,00\"\n");
    let manager = TemplateManager::from_documents(&doc(CONFIG), &template);
    assert_eq!(manager.render_payload(&Overrides::new()), "K:PR|V:02|C:1|I:RSD1,00");
}

#[test]
fn trimmed_render_never_contains_empty_segments() {
    let manager = TemplateManager::from_documents(&doc(CONFIG), &doc(TEMPLATE));

    let mut overrides = Overrides::new();
    overrides.insert("N", "");
    overrides.insert("EXTRA", "");
    let payload = manager.render_payload(&overrides);

    assert_eq!(payload, "K:PR|V:01|C:1|I:RSD10,00|S:Rent");
    for segment in payload.split('|') {
        let (_, value) = segment.split_once(':').unwrap();
        assert!(!value.is_empty(), "empty segment in {payload}");
    }
}

#[test]
fn overriding_with_own_defaults_changes_nothing() {
    let manager = TemplateManager::from_documents(&doc(CONFIG), &doc(TEMPLATE));
    let defaults: Overrides =
        manager.fields().iter().map(|f| (f.key.as_str(), f.value.as_str())).collect();

    assert_eq!(manager.render_payload(&Overrides::new()), manager.render_payload(&defaults));
}

#[test]
fn override_value_wins_over_default() {
    let manager = TemplateManager::from_documents(&doc(CONFIG), &doc(TEMPLATE));
    for field in manager.fields() {
        let overrides: Overrides = [(field.key.as_str(), "OVERRIDDEN")].into_iter().collect();
        let payload = manager.render_payload(&overrides);
        assert!(
            payload.contains(&format!("{}:OVERRIDDEN", field.key)),
            "{payload} should use the override for {}",
            field.key
        );
    }
}

#[test]
fn all_three_shapes_normalize_to_the_same_fields() {
    let flat = doc(TEMPLATE);
    let grouped = doc(
        r#"
[fields.PayeeName]
key = "N"
value = "JKP"

[fields.Amount]
key = "I"
value = "RSD10,00"

[fields.PayerName]
key = "P"
value = ""

[fields.Purpose]
key = "S"
value = "Rent"
"#,
    );
    let array = doc(
        r#"
[[fields]]
key = "N"
value = "JKP"
label = "PayeeName"

[[fields]]
key = "I"
value = "RSD10,00"
label = "Amount"

[[fields]]
key = "P"
value = ""
label = "PayerName"

[[fields]]
key = "S"
value = "Rent"
label = "Purpose"
"#,
    );

    let empty = Table::new();
    let from_flat = get_fields(&MergedTemplate::merge(&empty, &flat));
    let from_grouped = get_fields(&MergedTemplate::merge(&empty, &grouped));
    let from_array = get_fields(&MergedTemplate::merge(&empty, &array));

    assert_eq!(from_flat.len(), 4);
    assert_eq!(from_flat, from_grouped);
    assert_eq!(from_flat, from_array);
}

#[test]
fn grouped_config_and_template_combine_config_first() {
    let config = doc("[fields.IdentificationCode]\nkey = \"K\"\nvalue = \"PR\"\n");
    let template = doc("[fields.Amount]\nkey = \"I\"\nvalue = \"RSD1,00\"\n");

    let payload = render(
        &get_fields(&MergedTemplate::merge(&config, &template)),
        &RenderSettings::default(),
        &Overrides::new(),
        true,
    );
    assert_eq!(payload, "K:PR|I:RSD1,00");
}

#[test]
fn array_config_and_template_concatenate() {
    let config = doc("[[fields]]\nkey = \"K\"\nvalue = \"PR\"\n");
    let template = doc("[[fields]]\nkey = \"I\"\nvalue = \"RSD1,00\"\n");

    let fields = get_fields(&MergedTemplate::merge(&config, &template));
    let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["K", "I"]);
    // No label given: the key doubles as label
    assert_eq!(fields[0].label, "K");
}

#[test]
fn template_settings_are_ignored() {
    let template = doc("separator = \";\"\n\n[Amount]\nkey = \"I\"\nvalue = \"RSD1,00\"\n");
    let manager = TemplateManager::from_documents(&doc(CONFIG), &template);
    assert_eq!(manager.settings().separator, "|");
    assert_eq!(manager.render_payload(&Overrides::new()), "K:PR|V:01|C:1|I:RSD1,00");
}

#[test]
fn non_string_values_are_rendered_as_text() {
    let template = doc("[Count]\nkey = \"N\"\nvalue = 42\n\n[Flag]\nkey = \"F\"\nvalue = true\n");
    let manager = TemplateManager::from_documents(&Table::new(), &template);
    assert_eq!(manager.render_payload(&Overrides::new()), "N:42|F:true");
}
