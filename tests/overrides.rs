use tinker::construct::{Tweak, TweakIdentity, TweakStore};
use tinker::datatype::TweakValue;
use tinker::error::TinkerError;
use tinker::persist::PersistenceMode;

fn single_store(tweak: Tweak) -> (TweakStore, TweakIdentity) {
    let identity = tweak.identity().clone();
    let store = TweakStore::new(vec![tweak.into()], PersistenceMode::InMemory).unwrap();
    (store, identity)
}

#[test]
fn writes_clamp_into_declared_bounds() {
    // a shadow opacity tweak defaulting to 0.5 in [0, 1]
    let tweak = Tweak::new("Visuals", "Shadows", "Opacity", 0.5f32)
        .unwrap()
        .with_bounds(0.0f32, 1.0f32)
        .unwrap();
    let (store, identity) = single_store(tweak);
    assert_eq!(store.current::<f32>(&identity).unwrap(), 0.5);
    let stored = store.set(&identity, 1.5f32).unwrap();
    assert_eq!(
        stored,
        TweakValue::Float(1.0),
        "writes above max clamp to max"
    );
    assert_eq!(store.current::<f32>(&identity).unwrap(), 1.0);
    store.set(&identity, -2.0f32).unwrap();
    assert_eq!(
        store.current::<f32>(&identity).unwrap(),
        0.0,
        "writes below min clamp to min"
    );
    store.reset(&identity).unwrap();
    assert_eq!(store.current::<f32>(&identity).unwrap(), 0.5);
}

#[test]
fn unbounded_tweaks_accept_any_magnitude() {
    let (store, identity) = single_store(Tweak::new("A", "G", "n", 0i64).unwrap());
    store.set(&identity, i64::MAX).unwrap();
    assert_eq!(store.current::<i64>(&identity).unwrap(), i64::MAX);
    store.set(&identity, i64::MIN).unwrap();
    assert_eq!(store.current::<i64>(&identity).unwrap(), i64::MIN);
}

#[test]
fn floats_round_to_nearest_with_ties_away_from_zero() {
    let (store, identity) = single_store(Tweak::new("A", "G", "count", 0i64).unwrap());
    assert_eq!(
        store.set_value(&identity, TweakValue::Double(2.5)).unwrap(),
        TweakValue::Integer(3)
    );
    assert_eq!(
        store.set_value(&identity, TweakValue::Double(-2.5)).unwrap(),
        TweakValue::Integer(-3)
    );
    assert_eq!(
        store.set_value(&identity, TweakValue::Float(1.4)).unwrap(),
        TweakValue::Integer(1)
    );
}

#[test]
fn integers_coerce_into_float_tweaks() {
    let (store, identity) = single_store(Tweak::new("A", "G", "gain", 0.0f64).unwrap());
    assert_eq!(
        store.set_value(&identity, TweakValue::Integer(2)).unwrap(),
        TweakValue::Double(2.0)
    );
    assert_eq!(
        store.set_value(&identity, TweakValue::Float(0.25)).unwrap(),
        TweakValue::Double(0.25)
    );
}

#[test]
fn mismatched_types_are_rejected() {
    let (store, identity) = single_store(Tweak::new("A", "G", "flag", true).unwrap());
    let result = store.set(&identity, String::from("yes"));
    assert!(matches!(result, Err(TinkerError::TypeMismatch(_))));
    assert!(
        store.current::<bool>(&identity).unwrap(),
        "a rejected write must leave the current value untouched"
    );
}

#[test]
fn non_finite_values_are_rejected() {
    let (store, identity) = single_store(Tweak::new("A", "G", "gain", 0.0f32).unwrap());
    assert!(store.set(&identity, f32::NAN).is_err());
    assert!(store.set(&identity, f32::INFINITY).is_err());
    assert_eq!(store.current::<f32>(&identity).unwrap(), 0.0);
}

#[test]
fn writes_are_idempotent() {
    let tweak = Tweak::new("A", "G", "gain", 0.0f64)
        .unwrap()
        .with_bounds(0.0f64, 1.0f64)
        .unwrap();
    let (store, identity) = single_store(tweak);
    store.set(&identity, 0.25f64).unwrap();
    store.set(&identity, 0.25f64).unwrap();
    assert_eq!(store.current::<f64>(&identity).unwrap(), 0.25);
    store.reset(&identity).unwrap();
    assert_eq!(
        store.current::<f64>(&identity).unwrap(),
        0.0,
        "one reset undoes any number of identical writes"
    );
}

#[test]
fn reset_all_and_reset_collection() {
    let a1 = Tweak::new("A", "G", "x", 1i64).unwrap();
    let a2 = Tweak::new("A", "H", "y", 1i64).unwrap();
    let b1 = Tweak::new("B", "G", "z", 1i64).unwrap();
    let ia1 = a1.identity().clone();
    let ia2 = a2.identity().clone();
    let ib1 = b1.identity().clone();
    let store = TweakStore::new(
        vec![a1.into(), a2.into(), b1.into()],
        PersistenceMode::InMemory,
    )
    .unwrap();
    store.set(&ia1, 10i64).unwrap();
    store.set(&ia2, 20i64).unwrap();
    store.set(&ib1, 30i64).unwrap();

    store.reset_collection("A").unwrap();
    assert_eq!(store.current::<i64>(&ia1).unwrap(), 1);
    assert_eq!(store.current::<i64>(&ia2).unwrap(), 1);
    assert_eq!(
        store.current::<i64>(&ib1).unwrap(),
        30,
        "a scoped reset must not touch other collections"
    );

    store.reset_all().unwrap();
    assert_eq!(store.current::<i64>(&ib1).unwrap(), 1);
}

#[test]
fn concurrent_reads_and_writes_serialize() {
    use std::sync::Arc;
    use std::thread;

    let tweak = Tweak::new("A", "G", "gain", 0.5f64)
        .unwrap()
        .with_bounds(0.0f64, 1.0f64)
        .unwrap();
    let identity = tweak.identity().clone();
    let store = Arc::new(TweakStore::new(vec![tweak.into()], PersistenceMode::InMemory).unwrap());

    let mut handles = Vec::new();
    for i in 0..4 {
        let store = Arc::clone(&store);
        let identity = identity.clone();
        handles.push(thread::spawn(move || {
            for j in 0..50 {
                let value = (i * 50 + j) as f64 / 200.0;
                store.set(&identity, value).unwrap();
                let current = store.current::<f64>(&identity).unwrap();
                assert!((0.0..=1.0).contains(&current), "reads must always see a clamped value");
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}
