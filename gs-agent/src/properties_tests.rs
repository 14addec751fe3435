use crate::properties::{Properties, PropertyError};

#[test]
fn defaults_then_overrides() {
    let p = Properties::parse("name=unknown role=unknown", "name=mcts N=1000");
    assert_eq!(p.name(), "mcts");
    assert_eq!(p.role(), "unknown");
    assert_eq!(p.get_parsed::<u32>("N"), Some(1000));
}

#[test]
fn unknown_keys_are_retained() {
    let p = Properties::parse("name=x role=player", "frobnicate=3 shadow=deep");
    assert_eq!(p.get("frobnicate"), Some("3"));
    assert_eq!(p.get("shadow"), Some("deep"));
}

#[test]
fn flag_without_value_is_present_and_empty() {
    let p = Properties::parse("name=x role=player", "init");
    assert!(p.contains("init"));
    assert_eq!(p.get("init"), Some(""));
}

#[test]
fn unparsable_numeric_yields_none() {
    let p = Properties::parse("", "N=lots");
    assert_eq!(p.get_parsed::<u32>("N"), None);
}

#[test]
fn notify_overrides_in_place() {
    let mut p = Properties::parse("name=x role=player", "");
    p.notify("role=black");
    assert_eq!(p.role(), "black");
}

#[test]
fn reserved_punctuation_in_name_is_rejected() {
    for bad in ["a[b", "a]b", "a(b", "a)b", "a:b", "a;b"] {
        let p = Properties::parse("role=player", &format!("name={bad}"));
        assert!(matches!(
            p.validate_name(),
            Err(PropertyError::InvalidName { .. })
        ));
    }
}

#[test]
fn plain_name_passes_validation() {
    let p = Properties::parse("name=expectimax role=player", "");
    assert!(p.validate_name().is_ok());
}
