use keyslip::layout::{HandSplit, KeyGrid, LayoutFile, LayoutRegistry};
use keyslip::layout::Hand;
use keyslip::TypoError;

fn grid(rows: &[&str]) -> KeyGrid {
    KeyGrid::from_rows(rows).expect("grid should have keys")
}

#[test]
fn builtin_registry_lists_languages_in_name_order() {
    let registry = LayoutRegistry::builtin();
    let languages = registry.supported_languages();

    assert_eq!(
        languages,
        vec![
            ("english".to_string(), "en".to_string()),
            ("german".to_string(), "de".to_string()),
            ("polish".to_string(), "pl".to_string()),
        ]
    );
}

#[test]
fn lookup_of_unknown_language_lists_available_ones() {
    let registry = LayoutRegistry::builtin();
    let err = registry.lookup("klingon").unwrap_err();

    match &err {
        TypoError::UnknownLanguage {
            language,
            available,
        } => {
            assert_eq!(language, "klingon");
            assert!(available.contains(&"polish".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("english"), "{err}");
}

#[test]
fn registering_a_language_under_another_code_fails() {
    let mut registry = LayoutRegistry::builtin();
    let err = registry
        .register("english", "en-custom", grid(&["abc"]), None, None)
        .unwrap_err();

    assert_eq!(
        err,
        TypoError::DuplicateLanguage {
            language: "english".to_string(),
            existing: "en".to_string(),
        }
    );
    // The original layout is untouched.
    assert!(registry.lookup("english").unwrap().grid().contains('q'));
}

#[test]
fn re_registering_same_code_overrides_grid_and_keeps_hands_and_ignore_set() {
    let mut registry = LayoutRegistry::builtin();
    registry
        .register("english", "en", grid(&["qaz"]), None, None)
        .expect("same code may be overridden");

    let layout = registry.lookup("english").unwrap();
    assert_eq!(layout.grid().rows(), 1);
    assert_eq!(layout.hand_of('q'), Some(Hand::Left));
    assert!(layout.is_ignored("seven"));
    assert!(layout.alt_grid().is_none());
}

#[test]
fn new_language_without_hands_or_ignore_starts_empty() {
    let mut registry = LayoutRegistry::default();
    registry
        .register("tiny", "tn", grid(&["ab", "cd"]), None, None)
        .unwrap();

    let layout = registry.lookup("tiny").unwrap();
    assert_eq!(layout.hand_of('a'), None);
    assert!(layout.ignore_set().is_empty());
    assert!(!layout.is_ignored("anything"));
}

#[test]
fn explicit_hands_and_ignore_set_are_stored_lowercased() {
    let mut registry = LayoutRegistry::default();
    registry
        .register(
            "tiny",
            "tn",
            grid(&["ab"]),
            Some(HandSplit::new("a".chars(), "b".chars())),
            Some(vec!["ONE".to_string()]),
        )
        .unwrap();

    let layout = registry.lookup("tiny").unwrap();
    assert_eq!(layout.hand_of('b'), Some(Hand::Right));
    assert!(layout.is_ignored("Someone"));
}

#[test]
fn ignore_set_matches_substrings_case_insensitively() {
    let layout = LayoutRegistry::builtin().lookup("polish").unwrap();

    assert!(layout.is_ignored("Dwa"));
    assert!(layout.is_ignored("rok2024"));
    // Substring match: "sto" is a number word.
    assert!(layout.is_ignored("stopień"));
    assert!(!layout.is_ignored("kot"));
}

#[test]
fn empty_grid_is_rejected() {
    let err = KeyGrid::from_rows(&["   ", ""]).unwrap_err();
    assert!(matches!(err, TypoError::InvalidLayout(_)));
}

#[test]
fn layout_file_registers_alt_grid_and_hands() {
    let json = r#"{
        "language": "mini-polish",
        "code": "pl-mini",
        "rows": ["qwe", "asd"],
        "alt_rows": ["qwę", "ąśd"],
        "alt_base": {"ą": "a", "ę": "e", "ś": "s"},
        "left": "qwasę",
        "right": "edś",
        "ignore": ["dwa"]
    }"#;

    let file: LayoutFile = serde_json::from_str(json).expect("layout JSON should parse");
    let mut registry = LayoutRegistry::default();
    file.register_into(&mut registry).expect("layout should register");

    let layout = registry.lookup("mini-polish").unwrap();
    let alt = layout.alt_grid().expect("alt grid should be kept");
    assert_eq!(alt.base.get(&'ą'), Some(&'a'));
    assert!(layout.grid_for('ą').contains('ą'));
    assert!(!layout.grid_for('a').contains('ą'));
    assert_eq!(layout.hand_of('ś'), Some(Hand::Right));
    assert!(layout.is_ignored("dwa"));
    assert_eq!(registry.code_of("mini-polish"), Some("pl-mini"));
}

#[test]
fn layout_file_with_one_sided_hands_is_rejected() {
    let json = r#"{"language": "x", "code": "x", "rows": ["ab"], "left": "a"}"#;
    let file: LayoutFile = serde_json::from_str(json).unwrap();

    let err = file.register_into(&mut LayoutRegistry::default()).unwrap_err();
    assert!(err.to_string().contains("left and right"), "{err}");
}
