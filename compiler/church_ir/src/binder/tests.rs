use super::*;

#[test]
fn test_fresh_binders_are_distinct() {
    let x = Name::intern("x");
    let a = BinderId::fresh(x);
    let b = BinderId::fresh(x);
    assert_ne!(a, b);
    assert_eq!(a.name(), b.name());
}

#[test]
fn test_renamed_keeps_display_name() {
    let f = BinderId::fresh(Name::intern("f"));
    let g = f.renamed();
    assert_ne!(f, g);
    assert_eq!(g.name().as_str(), "f");
    assert!(g.serial() > f.serial());
}

#[test]
fn test_copy_is_same_binder() {
    let a = BinderId::fresh(Name::intern("n"));
    let b = a;
    assert_eq!(a, b);
}

#[test]
fn test_debug_shows_name_and_serial() {
    let a = BinderId::fresh(Name::intern("m"));
    assert_eq!(format!("{a:?}"), format!("m#{}", a.serial()));
}

#[test]
fn test_detached_never_minted() {
    let a = BinderId::fresh(Name::EMPTY);
    assert_ne!(a, BinderId::DETACHED);
}
