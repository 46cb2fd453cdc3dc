use std::fs;
use std::path::Path;

use abnfc_compiler::{Builtin, Error};

use super::CommandError;
use super::loader::{Content, InputSpec, InputType, LoadError, build_grammar, load_inputs};

fn spec(kind: InputType, path: &Path) -> InputSpec {
    InputSpec::new(kind, path.display().to_string())
}

#[test]
fn builtin_names_resolve_under_auto() {
    let inputs = load_inputs(&[
        InputSpec::new(InputType::Auto, "core"),
        InputSpec::new(InputType::Auto, "ABNF"),
        InputSpec::new(InputType::Builtin, "Core"),
    ])
    .unwrap();

    let origins: Vec<_> = inputs.iter().map(|i| i.origin.as_str()).collect();
    assert_eq!(origins, ["RFC2234 Core", "RFC2234 ABNF", "RFC2234 Core"]);
    assert!(matches!(inputs[1].content, Content::Builtin(Builtin::Abnf)));
    assert!(inputs.iter().all(|i| i.text().is_none()));
}

#[test]
fn auto_falls_back_to_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("greeting.abnf");
    fs::write(&path, "greeting = \"hi\"\n").unwrap();

    let inputs = load_inputs(&[spec(InputType::Auto, &path)]).unwrap();

    assert_eq!(inputs[0].origin, path.display().to_string());
    assert!(matches!(inputs[0].content, Content::Abnf(_)));
    assert_eq!(inputs[0].text(), Some("greeting = \"hi\"\n"));
}

#[test]
fn self_type_keeps_the_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.rs");
    fs::write(&path, "next").unwrap();

    let inputs = load_inputs(&[spec(InputType::SelfRules, &path)]).unwrap();

    assert!(matches!(&inputs[0].content, Content::SelfRules(text) if text == "next"));
}

#[test]
fn file_type_never_means_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("core");

    let err = load_inputs(&[spec(InputType::File, &missing)]).unwrap_err();

    let LoadError::Read { path, .. } = &err else {
        panic!("expected a read error, got {err:?}");
    };
    assert_eq!(*path, missing.display().to_string());
    assert!(err.to_string().starts_with("failed to read '"));
}

#[test]
fn unknown_builtin_is_an_error() {
    let err = load_inputs(&[InputSpec::new(InputType::Builtin, "http")]).unwrap_err();

    assert!(matches!(
        &err,
        LoadError::Builtin(Error::UnknownBuiltin(name)) if name == "http"
    ));
    insta::assert_snapshot!(err.to_string(), @"unknown built-in rule list `http`");
}

#[test]
fn loading_stops_at_the_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("missing-1.abnf");
    let second = dir.path().join("missing-2.abnf");

    let err = load_inputs(&[spec(InputType::File, &first), spec(InputType::File, &second)])
        .unwrap_err();

    assert!(matches!(&err, LoadError::Read { path, .. } if *path == first.display().to_string()));
}

#[test]
fn grammar_merges_inputs_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("word.abnf");
    fs::write(&path, "word = 1*ALPHA\n").unwrap();

    let inputs = load_inputs(&[
        spec(InputType::Auto, &path),
        InputSpec::new(InputType::Auto, "core"),
    ])
    .unwrap();
    let grammar = build_grammar(&inputs, false).unwrap();

    assert!(grammar.is_valid());
    assert_eq!(
        grammar.sources(),
        [path.display().to_string(), "RFC2234 Core".to_owned()]
    );
    assert_eq!(grammar.rules().iter().next().unwrap().name, "word");
}

#[test]
fn parse_errors_render_against_their_input() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.abnf");
    let bad = dir.path().join("bad.abnf");
    fs::write(&good, "a = %x41\n").unwrap();
    fs::write(&bad, "b = (\n").unwrap();

    let inputs = load_inputs(&[spec(InputType::File, &good), spec(InputType::File, &bad)]).unwrap();
    let err = build_grammar(&inputs, false).unwrap_err();

    let CommandError::Input(rendered) = &err else {
        panic!("expected an input error, got {err:?}");
    };
    assert!(rendered.contains("expected an element"), "{rendered}");
    assert!(rendered.contains("bad.abnf"), "{rendered}");
    assert!(!rendered.contains("good.abnf"), "{rendered}");
    assert_eq!(err.exit_code(), super::EXIT_INPUT);
}
