//! Saved templates reload to the same variable fields.

use payqr::template::writer::save_template;
use payqr::template::TemplateManager;
use payqr::test_utils::TemplateFixture;

#[test]
fn saved_variable_fields_reload_unchanged() {
    let fixture = TemplateFixture::standard().unwrap();
    let original =
        TemplateManager::load(&fixture.config_path(), &fixture.template_path("default")).unwrap();
    let variable: Vec<_> = original.variable_fields().cloned().collect();

    let copy = fixture.template_path("copy");
    save_template(&copy, &variable).unwrap();

    let reloaded = TemplateManager::load(&fixture.config_path(), &copy).unwrap();
    let reloaded_variable: Vec<_> = reloaded.variable_fields().cloned().collect();

    assert_eq!(reloaded_variable, variable);
    assert_eq!(reloaded.fields(), original.fields());
    assert!(reloaded_variable[0].is_required());
}
