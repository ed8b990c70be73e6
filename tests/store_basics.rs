use tinker::construct::{Tweak, TweakCluster, TweakIdentity, TweakStore};
use tinker::datatype::TweakValue;
use tinker::error::TinkerError;
use tinker::persist::PersistenceMode;

fn shadow_opacity() -> Tweak {
    Tweak::new("Visuals", "Shadows", "Opacity", 0.5f32)
        .unwrap()
        .with_bounds(0.0f32, 1.0f32)
        .unwrap()
}

#[test]
fn current_value_is_the_default_after_construction() {
    let tweak = shadow_opacity();
    let identity = tweak.identity().clone();
    let store = TweakStore::new(vec![tweak.into()], PersistenceMode::InMemory).unwrap();
    assert_eq!(
        store.current_value(&identity).unwrap(),
        TweakValue::Float(0.5)
    );
}

#[test]
fn duplicate_identities_fail_construction() {
    let a = Tweak::new("A", "G", "x", 1i64).unwrap();
    let b = Tweak::new("A", "G", "x", true).unwrap();
    let result = TweakStore::new(vec![a.into(), b.into()], PersistenceMode::InMemory);
    assert!(
        matches!(result, Err(TinkerError::Config(_))),
        "two declarations sharing an identity are a configuration mistake"
    );
}

#[test]
fn unknown_identities_fail_loudly() {
    let store = TweakStore::new(vec![shadow_opacity().into()], PersistenceMode::InMemory).unwrap();
    let unknown = TweakIdentity::new("Visuals", "Shadows", "Radius").unwrap();
    assert!(matches!(
        store.current_value(&unknown),
        Err(TinkerError::NotFound(_))
    ));
    assert!(matches!(
        store.set(&unknown, 1.0f32),
        Err(TinkerError::NotFound(_))
    ));
    assert!(matches!(store.reset(&unknown), Err(TinkerError::NotFound(_))));
    assert!(!store.contains(&unknown));
}

#[test]
fn sibling_tweaks_are_independent() {
    let x = Tweak::new("A", "G", "x", 1i64).unwrap();
    let y = Tweak::new("A", "G", "y", 1i64).unwrap();
    let ix = x.identity().clone();
    let iy = y.identity().clone();
    let cluster = TweakCluster::new("pair", vec![x, y]).unwrap();
    let store = TweakStore::new(vec![cluster], PersistenceMode::InMemory).unwrap();
    store.set(&ix, 42i64).unwrap();
    assert_eq!(store.current::<i64>(&ix).unwrap(), 42);
    assert_eq!(
        store.current::<i64>(&iy).unwrap(),
        1,
        "setting one tweak must not affect its sibling"
    );
}

#[test]
fn enumeration_keeps_declaration_order() {
    let declarations = [
        ("Visuals", "Shadows", "Opacity"),
        ("Visuals", "Shadows", "Radius"),
        ("Visuals", "Colors", "Tint"),
        ("Audio", "Mix", "Volume"),
    ];
    let clusters: Vec<TweakCluster> = declarations
        .iter()
        .map(|(c, g, n)| Tweak::new(*c, *g, *n, 1i64).unwrap().into())
        .collect();
    let store = TweakStore::new(clusters, PersistenceMode::InMemory).unwrap();

    let names: Vec<&str> = store.all_tweaks().map(|t| t.tweak_name()).collect();
    assert_eq!(names, vec!["Opacity", "Radius", "Tint", "Volume"]);
    assert_eq!(
        store.collection_names(),
        vec!["Visuals", "Audio"],
        "collections come in declaration order, never sorted"
    );
    assert_eq!(store.group_names("Visuals"), vec!["Shadows", "Colors"]);
    let shadow_names: Vec<&str> = store
        .tweaks_in_group("Visuals", "Shadows")
        .map(|t| t.tweak_name())
        .collect();
    assert_eq!(shadow_names, vec!["Opacity", "Radius"]);
    assert_eq!(store.tweaks_in_collection("Visuals").count(), 3);
    assert_eq!(store.len(), 4);
}

#[test]
fn enumeration_is_restartable() {
    let clusters: Vec<TweakCluster> = (0..3)
        .map(|i| {
            Tweak::new("A", "G", format!("t{}", i), 1i64)
                .unwrap()
                .into()
        })
        .collect();
    let store = TweakStore::new(clusters, PersistenceMode::InMemory).unwrap();
    assert_eq!(store.all_tweaks().count(), 3);
    assert_eq!(
        store.all_tweaks().count(),
        3,
        "iteration must be repeatable from the start"
    );
}
