use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use scaffold::answers::AnswersMap;
use scaffold::config::TemplateType;
use scaffold::error::ScaffoldError;
use scaffold::path::LocationIssue;
use scaffold::template::{list_templates_for, BuiltinStore, FsStore, MemoryStore};
use scaffold::validate::IdentifierViolation;
use scaffold::{generate, plan_generation, GenerateOptions};

fn fixture_store() -> FsStore {
    FsStore::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/templates"))
}

fn answers(pairs: &[(&str, &str)]) -> AnswersMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn options(kind: TemplateType, answers: AnswersMap, cwd: &Path) -> GenerateOptions {
    GenerateOptions {
        kind,
        answers,
        cwd: cwd.to_path_buf(),
        default_api_version: None,
        force: false,
    }
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

#[test]
fn lightning_app_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let aura = tmp.path().join("aura");
    let raw = answers(&[("appname", "myapp"), ("outputdir", aura.to_str().unwrap())]);

    let output = generate(&BuiltinStore, options(TemplateType::LightningApp, raw, tmp.path()))
        .unwrap();

    assert_eq!(output.output_dir, aura.display().to_string());
    assert_eq!(output.created, vec!["myapp.app", "myapp.app-meta.xml"]);
    assert_eq!(
        output.raw_output,
        "create myapp.app\ncreate myapp.app-meta.xml\n"
    );

    let meta = std::fs::read_to_string(aura.join("myapp.app-meta.xml")).unwrap();
    assert!(meta.contains("<apiVersion>45.0</apiVersion>"));
}

#[test]
fn every_builtin_default_generates() {
    let tmp = tempfile::tempdir().unwrap();

    for kind in TemplateType::ALL {
        let rule = kind.rule();
        let mut dir = tmp.path().join(kind.as_str());
        if let Some(ancestor) = rule.required_ancestor {
            dir = dir.join(ancestor);
        }

        let mut raw = answers(&[
            (rule.name_key, "Sample"),
            ("outputdir", dir.to_str().unwrap()),
        ]);
        for key in rule.required_text {
            raw.insert(key.to_string(), "Sample Label".to_string());
        }

        let output = generate(&BuiltinStore, options(kind, raw, tmp.path()))
            .unwrap_or_else(|e| panic!("{kind}: {e}"));
        assert!(!output.created.is_empty(), "{kind} created nothing");
        assert_eq!(files_under(&dir).len(), output.created.len(), "{kind}");
    }
}

#[test]
fn bundles_are_only_found_for_their_own_type() {
    let store = fixture_store();
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[("classname", "Foo"), ("template", "Greeting")]);

    let err = generate(&store, options(TemplateType::ApexClass, raw, tmp.path())).unwrap_err();

    match err {
        ScaffoldError::TemplateNotFound { kind, name, available } => {
            assert_eq!(kind, TemplateType::ApexClass);
            assert_eq!(name, "Greeting");
            assert_eq!(available, vec!["DefaultApexClass", "NeedsOwner"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn fixture_store_lists_by_type() {
    let store = fixture_store();
    assert_eq!(
        list_templates_for(&store, TemplateType::LightningApp).unwrap(),
        vec!["DefaultLightningApp", "Greeting"]
    );
    assert!(list_templates_for(&store, TemplateType::ApexTrigger)
        .unwrap()
        .is_empty());
}

#[test]
fn invalid_identifier_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("classes");
    let raw = answers(&[("classname", "9Lives"), ("outputdir", out.to_str().unwrap())]);

    let err = generate(&fixture_store(), options(TemplateType::ApexClass, raw, tmp.path()))
        .unwrap_err();

    match err {
        ScaffoldError::InvalidIdentifier {
            field,
            value,
            violation,
        } => {
            assert_eq!(field, "classname");
            assert_eq!(value, "9Lives");
            assert_eq!(violation, IdentifierViolation::LeadingDigit);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!out.exists());
}

#[test]
fn name_answer_flows_into_paths_and_contents() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[("name", "Foo"), ("outputdir", "classes")]);

    let output = generate(&fixture_store(), options(TemplateType::ApexClass, raw, tmp.path()))
        .unwrap();

    assert_eq!(output.created, vec!["Foo.cls"]);
    let written = std::fs::read_to_string(tmp.path().join("classes/Foo.cls")).unwrap();
    assert_eq!(written, "public class Foo {\n}\n");
}

#[test]
fn second_run_collides_and_keeps_first_output() {
    let tmp = tempfile::tempdir().unwrap();
    let aura = tmp.path().join("aura");
    let raw = answers(&[("appname", "myapp"), ("outputdir", "aura")]);

    generate(
        &fixture_store(),
        options(TemplateType::LightningApp, raw.clone(), tmp.path()),
    )
    .unwrap();
    std::fs::write(aura.join("myapp.app"), "edited").unwrap();

    let err = generate(
        &fixture_store(),
        options(TemplateType::LightningApp, raw, tmp.path()),
    )
    .unwrap_err();

    match err {
        ScaffoldError::FileCollision { path, written } => {
            assert_eq!(path, aura.join("myapp.app"));
            assert!(written.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        std::fs::read_to_string(aura.join("myapp.app")).unwrap(),
        "edited"
    );
}

#[test]
fn force_replaces_existing_output() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[("appname", "myapp"), ("outputdir", "aura")]);

    generate(
        &fixture_store(),
        options(TemplateType::LightningApp, raw.clone(), tmp.path()),
    )
    .unwrap();

    let mut forced = options(TemplateType::LightningApp, raw, tmp.path());
    forced.force = true;
    let output = generate(&fixture_store(), forced).unwrap();

    assert_eq!(
        output.raw_output,
        "force myapp.app\nforce myapp.app-meta.xml\n"
    );
}

#[test]
fn lightning_output_outside_aura_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[("appname", "myapp"), ("outputdir", "src/apps")]);

    let err = generate(
        &fixture_store(),
        options(TemplateType::LightningApp, raw, tmp.path()),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ScaffoldError::InvalidOutputLocation {
            issue: LocationIssue::MissingAncestor("aura"),
            ..
        }
    ));
    assert!(files_under(tmp.path()).is_empty());
}

#[test]
fn unanswered_placeholder_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[
        ("classname", "Foo"),
        ("template", "NeedsOwner"),
        ("outputdir", "classes"),
    ]);

    let err = generate(&fixture_store(), options(TemplateType::ApexClass, raw, tmp.path()))
        .unwrap_err();

    match err {
        ScaffoldError::MissingAnswer { token, file } => {
            assert_eq!(token, "owner");
            assert_eq!(file, "{{classname}}.cls");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!tmp.path().join("classes").exists());
}

#[test]
fn extra_answers_fill_bundle_placeholders() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[
        ("classname", "Foo"),
        ("template", "NeedsOwner"),
        ("owner", "Platform Team"),
    ]);

    generate(&fixture_store(), options(TemplateType::ApexClass, raw, tmp.path())).unwrap();

    let written = std::fs::read_to_string(tmp.path().join("Foo.cls")).unwrap();
    assert!(written.starts_with("// Owned by Platform Team\n"));
}

#[test]
fn plan_does_not_touch_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[("appname", "myapp"), ("outputdir", "aura")]);

    let plan = plan_generation(
        &fixture_store(),
        options(TemplateType::LightningApp, raw, tmp.path()),
    )
    .unwrap();

    assert_eq!(plan.template, "DefaultLightningApp");
    assert_eq!(plan.render_plan.files().count(), 2);
    assert!(!tmp.path().join("aura").exists());
}

#[test]
fn configured_api_version_is_the_fallback() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[("appname", "myapp"), ("outputdir", "aura")]);
    let mut opts = options(TemplateType::LightningApp, raw, tmp.path());
    opts.default_api_version = Some("58.0".to_string());

    generate(&fixture_store(), opts).unwrap();

    let meta = std::fs::read_to_string(tmp.path().join("aura/myapp.app-meta.xml")).unwrap();
    assert!(meta.contains("<apiVersion>58.0</apiVersion>"));
}

#[test]
fn memory_store_supports_nested_bundles() {
    let store = MemoryStore::new().with_file(
        TemplateType::LightningComponent,
        "DefaultLightningCmp",
        "{{componentname}}/{{componentname}}.cmp",
        "<aura:component description=\"{{componentname}}\"/>",
    );
    let tmp = tempfile::tempdir().unwrap();
    let raw: BTreeMap<_, _> = answers(&[("componentname", "card"), ("outputdir", "aura")]);

    let output = generate(
        &store,
        options(TemplateType::LightningComponent, raw, tmp.path()),
    )
    .unwrap();

    assert_eq!(output.created, vec!["card/card.cmp"]);
}

#[test]
fn unanswered_condition_token_writes_nothing() {
    let store = MemoryStore::new().with_file(
        TemplateType::ApexClass,
        "DefaultApexClass",
        "{{classname}}.cls",
        "{% if owner %}// {{ owner }}{% endif %}\nclass {{classname}} {}",
    );
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[("classname", "Foo"), ("outputdir", "classes")]);

    let err = generate(&store, options(TemplateType::ApexClass, raw, tmp.path())).unwrap_err();

    assert!(matches!(
        err,
        ScaffoldError::MissingAnswer { ref token, .. } if token == "owner"
    ));
    assert!(!tmp.path().join("classes").exists());
}

#[test]
fn raw_blocks_emit_literal_placeholders() {
    let store = MemoryStore::new().with_file(
        TemplateType::LightningComponent,
        "DefaultLightningCmp",
        "{{componentname}}.cmp",
        "<aura:component>{% raw %}{{ v.title }}{% endraw %}</aura:component>",
    );
    let tmp = tempfile::tempdir().unwrap();
    let raw = answers(&[("componentname", "card"), ("outputdir", "aura")]);

    generate(&store, options(TemplateType::LightningComponent, raw, tmp.path())).unwrap();

    let written = std::fs::read_to_string(tmp.path().join("aura/card.cmp")).unwrap();
    assert_eq!(written, "<aura:component>{{ v.title }}</aura:component>");
}
