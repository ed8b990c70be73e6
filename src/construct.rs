use std::sync::{Arc, Mutex, MutexGuard};

// keepers use HashMaps with a fast hashing algo, since keys are short strings
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

// used to print out readable forms of a construct
use std::fmt;
// used so type-erased tweaks can serve as set and map keys
use std::hash::{Hash, Hasher};

use tracing::{info, warn};

// our own stuff that we need
use crate::datatype::{
    Color, NumericEditStyle, NumericMetadata, TweakData, TweakValue, TweakValueType,
};
use crate::error::{Result, TinkerError};
use crate::persist::{PersistenceMode, Persistor};

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

// ------------- Identity -------------
/// Joins collection, group and name into the derived identifier used as the
/// persistence key. Reserved: none of the three parts may contain it, which
/// is checked at declaration time so two distinct tweaks can never collide
/// into one key.
pub const IDENTIFIER_SEPARATOR: char = '|';

/// The unique (collection, group, name) triple of a tweak. Fixed at
/// declaration time and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TweakIdentity {
    collection_name: String,
    group_name: String,
    tweak_name: String,
}

impl TweakIdentity {
    pub fn new(
        collection_name: impl Into<String>,
        group_name: impl Into<String>,
        tweak_name: impl Into<String>,
    ) -> Result<Self> {
        let collection_name = collection_name.into();
        let group_name = group_name.into();
        let tweak_name = tweak_name.into();
        for part in [&collection_name, &group_name, &tweak_name] {
            if part.contains(IDENTIFIER_SEPARATOR) {
                return Err(TinkerError::Config(format!(
                    "'{}' must not contain the reserved separator '{}'",
                    part, IDENTIFIER_SEPARATOR
                )));
            }
        }
        Ok(Self {
            collection_name,
            group_name,
            tweak_name,
        })
    }
    // It's intentional to encapsulate the parts in the struct and only
    // expose them using "getters", because this yields true immutability
    // for identities after creation.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }
    pub fn group_name(&self) -> &str {
        &self.group_name
    }
    pub fn tweak_name(&self) -> &str {
        &self.tweak_name
    }
    pub fn identifier(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.collection_name,
            self.group_name,
            self.tweak_name,
            sep = IDENTIFIER_SEPARATOR
        )
    }
}

impl fmt::Display for TweakIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

// ------------- Default data -------------
/// The declaration-time payload of a tweak: the default value plus, for
/// numeric variants, optional bounds and step size. One variant per
/// [`TweakValueType`] is what erases the concrete value type.
#[derive(Debug, Clone, PartialEq)]
pub enum TweakDefaultData {
    Boolean {
        default: bool,
    },
    Integer {
        default: i64,
        min: Option<i64>,
        max: Option<i64>,
        step: Option<i64>,
    },
    Float {
        default: f32,
        min: Option<f32>,
        max: Option<f32>,
        step: Option<f32>,
    },
    Double {
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Color {
        default: Color,
    },
    Text {
        default: String,
    },
}

fn clamp_partial<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> T {
    let value = match min {
        Some(lo) if value < lo => lo,
        _ => value,
    };
    match max {
        Some(hi) if value > hi => hi,
        _ => value,
    }
}

// nearest integer with ties away from zero; saturates at the i64 range
fn round_to_integer(value: f64) -> Option<i64> {
    if value.is_finite() {
        Some(value.round() as i64)
    } else {
        None
    }
}

fn mismatch(value: &TweakValue, declared: TweakValueType) -> TinkerError {
    TinkerError::TypeMismatch(format!(
        "cannot assign a {} value to a {} tweak",
        value.value_type(),
        declared
    ))
}

fn non_finite() -> TinkerError {
    TinkerError::TypeMismatch(String::from("non-finite values cannot be stored"))
}

impl TweakDefaultData {
    pub fn value_type(&self) -> TweakValueType {
        match self {
            TweakDefaultData::Boolean { .. } => TweakValueType::Boolean,
            TweakDefaultData::Integer { .. } => TweakValueType::Integer,
            TweakDefaultData::Float { .. } => TweakValueType::Float,
            TweakDefaultData::Double { .. } => TweakValueType::Double,
            TweakDefaultData::Color { .. } => TweakValueType::Color,
            TweakDefaultData::Text { .. } => TweakValueType::Text,
        }
    }
    pub fn default_value(&self) -> TweakValue {
        match self {
            TweakDefaultData::Boolean { default } => TweakValue::Boolean(*default),
            TweakDefaultData::Integer { default, .. } => TweakValue::Integer(*default),
            TweakDefaultData::Float { default, .. } => TweakValue::Float(*default),
            TweakDefaultData::Double { default, .. } => TweakValue::Double(*default),
            TweakDefaultData::Color { default } => TweakValue::Color(*default),
            TweakDefaultData::Text { default } => TweakValue::Text(default.clone()),
        }
    }
    /// The step size an editor should use, falling back to the numeric
    /// type's default when the declaration omits one. None for non-numeric
    /// tweaks.
    pub fn effective_step(&self) -> Option<TweakValue> {
        match self {
            TweakDefaultData::Integer { step, .. } => {
                Some(TweakValue::Integer(step.unwrap_or(i64::DEFAULT_STEP)))
            }
            TweakDefaultData::Float { step, .. } => {
                Some(TweakValue::Float(step.unwrap_or(f32::DEFAULT_STEP)))
            }
            TweakDefaultData::Double { step, .. } => {
                Some(TweakValue::Double(step.unwrap_or(f64::DEFAULT_STEP)))
            }
            _ => None,
        }
    }
    /// The range an editor should display. Declared bounds win, otherwise
    /// the numeric type's default range. Only declared bounds ever clamp a
    /// write.
    pub fn display_range(&self) -> Option<(TweakValue, TweakValue)> {
        match self {
            TweakDefaultData::Integer { min, max, .. } => Some((
                TweakValue::Integer(min.unwrap_or(i64::DEFAULT_MIN)),
                TweakValue::Integer(max.unwrap_or(i64::DEFAULT_MAX)),
            )),
            TweakDefaultData::Float { min, max, .. } => Some((
                TweakValue::Float(min.unwrap_or(f32::DEFAULT_MIN)),
                TweakValue::Float(max.unwrap_or(f32::DEFAULT_MAX)),
            )),
            TweakDefaultData::Double { min, max, .. } => Some((
                TweakValue::Double(min.unwrap_or(f64::DEFAULT_MIN)),
                TweakValue::Double(max.unwrap_or(f64::DEFAULT_MAX)),
            )),
            _ => None,
        }
    }
    /// Checks an incoming value against the declared type, coercing between
    /// the numeric representations, and clamps numerics into the declared
    /// bounds. Clamping is not an error.
    pub(crate) fn coerce_and_clamp(&self, value: TweakValue) -> Result<TweakValue> {
        match self {
            TweakDefaultData::Boolean { .. } => match value {
                TweakValue::Boolean(v) => Ok(TweakValue::Boolean(v)),
                other => Err(mismatch(&other, TweakValueType::Boolean)),
            },
            TweakDefaultData::Integer { min, max, .. } => {
                let v = match value {
                    TweakValue::Integer(v) => v,
                    TweakValue::Float(v) => round_to_integer(f64::from(v)).ok_or_else(non_finite)?,
                    TweakValue::Double(v) => round_to_integer(v).ok_or_else(non_finite)?,
                    other => return Err(mismatch(&other, TweakValueType::Integer)),
                };
                Ok(TweakValue::Integer(clamp_partial(v, *min, *max)))
            }
            TweakDefaultData::Float { min, max, .. } => {
                let v = match value {
                    TweakValue::Float(v) => v,
                    TweakValue::Double(v) => v as f32,
                    TweakValue::Integer(v) => v as f32,
                    other => return Err(mismatch(&other, TweakValueType::Float)),
                };
                if !v.is_finite() {
                    return Err(non_finite());
                }
                Ok(TweakValue::Float(clamp_partial(v, *min, *max)))
            }
            TweakDefaultData::Double { min, max, .. } => {
                let v = match value {
                    TweakValue::Double(v) => v,
                    TweakValue::Float(v) => f64::from(v),
                    TweakValue::Integer(v) => v as f64,
                    other => return Err(mismatch(&other, TweakValueType::Double)),
                };
                if !v.is_finite() {
                    return Err(non_finite());
                }
                Ok(TweakValue::Double(clamp_partial(v, *min, *max)))
            }
            TweakDefaultData::Color { .. } => match value {
                TweakValue::Color(v) => Ok(TweakValue::Color(v)),
                other => Err(mismatch(&other, TweakValueType::Color)),
            },
            TweakDefaultData::Text { .. } => match value {
                TweakValue::Text(v) => Ok(TweakValue::Text(v)),
                other => Err(mismatch(&other, TweakValueType::Text)),
            },
        }
    }
}

// ------------- Tweak -------------
/// A single named, typed, adjustable parameter with a default value. This is
/// already the type-erased form: the concrete value type lives in the
/// [`TweakDefaultData`] variant, so heterogeneous tweaks share one
/// collection, keyed by their derived identifier.
#[derive(Debug, Clone)]
pub struct Tweak {
    identity: TweakIdentity,
    default_data: TweakDefaultData,
    edit_style: Option<NumericEditStyle>,
}

impl Tweak {
    pub fn new<T: TweakData>(
        collection_name: impl Into<String>,
        group_name: impl Into<String>,
        tweak_name: impl Into<String>,
        default: T,
    ) -> Result<Tweak> {
        let identity = TweakIdentity::new(collection_name, group_name, tweak_name)?;
        let default_data = match default.erase() {
            TweakValue::Boolean(default) => TweakDefaultData::Boolean { default },
            TweakValue::Integer(default) => TweakDefaultData::Integer {
                default,
                min: None,
                max: None,
                step: None,
            },
            TweakValue::Float(default) => TweakDefaultData::Float {
                default,
                min: None,
                max: None,
                step: None,
            },
            TweakValue::Double(default) => TweakDefaultData::Double {
                default,
                min: None,
                max: None,
                step: None,
            },
            TweakValue::Color(default) => TweakDefaultData::Color { default },
            TweakValue::Text(default) => TweakDefaultData::Text { default },
        };
        Ok(Tweak {
            identity,
            default_data,
            edit_style: None,
        })
    }
    /// Declares bounds on a numeric tweak. A declaration with `min > max`
    /// can never be satisfied and is rejected outright. A default lying
    /// outside the bounds is a caller error that is left alone here and
    /// only corrected once a write happens.
    pub fn with_bounds<T: TweakData>(mut self, min: T, max: T) -> Result<Tweak> {
        let identifier = self.identity.identifier();
        let declared = self.default_data.value_type();
        match (&mut self.default_data, min.erase(), max.erase()) {
            (
                TweakDefaultData::Integer { min: lo, max: hi, .. },
                TweakValue::Integer(a),
                TweakValue::Integer(b),
            ) => {
                if a > b {
                    return Err(TinkerError::Config(format!(
                        "invalid bounds for {}: {} > {}",
                        identifier, a, b
                    )));
                }
                *lo = Some(a);
                *hi = Some(b);
            }
            (
                TweakDefaultData::Float { min: lo, max: hi, .. },
                TweakValue::Float(a),
                TweakValue::Float(b),
            ) => {
                if a > b {
                    return Err(TinkerError::Config(format!(
                        "invalid bounds for {}: {} > {}",
                        identifier, a, b
                    )));
                }
                *lo = Some(a);
                *hi = Some(b);
            }
            (
                TweakDefaultData::Double { min: lo, max: hi, .. },
                TweakValue::Double(a),
                TweakValue::Double(b),
            ) => {
                if a > b {
                    return Err(TinkerError::Config(format!(
                        "invalid bounds for {}: {} > {}",
                        identifier, a, b
                    )));
                }
                *lo = Some(a);
                *hi = Some(b);
            }
            _ => {
                return Err(TinkerError::TypeMismatch(format!(
                    "bounds of type {} do not apply to {} ({})",
                    T::VALUE_TYPE,
                    identifier,
                    declared
                )));
            }
        }
        Ok(self)
    }
    pub fn with_step<T: TweakData>(mut self, step: T) -> Result<Tweak> {
        let identifier = self.identity.identifier();
        let declared = self.default_data.value_type();
        match (&mut self.default_data, step.erase()) {
            (TweakDefaultData::Integer { step: s, .. }, TweakValue::Integer(v)) => *s = Some(v),
            (TweakDefaultData::Float { step: s, .. }, TweakValue::Float(v)) => *s = Some(v),
            (TweakDefaultData::Double { step: s, .. }, TweakValue::Double(v)) => *s = Some(v),
            _ => {
                return Err(TinkerError::TypeMismatch(format!(
                    "a step of type {} does not apply to {} ({})",
                    T::VALUE_TYPE,
                    identifier,
                    declared
                )));
            }
        }
        Ok(self)
    }
    pub fn with_edit_style(mut self, edit_style: NumericEditStyle) -> Tweak {
        self.edit_style = Some(edit_style);
        self
    }
    pub fn identity(&self) -> &TweakIdentity {
        &self.identity
    }
    pub fn collection_name(&self) -> &str {
        self.identity.collection_name()
    }
    pub fn group_name(&self) -> &str {
        self.identity.group_name()
    }
    pub fn tweak_name(&self) -> &str {
        self.identity.tweak_name()
    }
    pub fn identifier(&self) -> String {
        self.identity.identifier()
    }
    pub fn value_type(&self) -> TweakValueType {
        self.default_data.value_type()
    }
    pub fn default_data(&self) -> &TweakDefaultData {
        &self.default_data
    }
    pub fn default_value(&self) -> TweakValue {
        self.default_data.default_value()
    }
    pub fn edit_style(&self) -> Option<NumericEditStyle> {
        self.edit_style
    }
    /// Callers that special-case color editing check this instead of
    /// downcasting.
    pub fn is_color(&self) -> bool {
        self.value_type() == TweakValueType::Color
    }
}

// Equality and hashing go by identity alone, never by default data, so that
// a re-declaration with a different default still resolves to the same
// persisted override.
impl PartialEq for Tweak {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}
impl Eq for Tweak {}
impl Hash for Tweak {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}
impl fmt::Display for Tweak {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} [{}::<{}>]",
            self.identifier(),
            self.default_value(),
            self.value_type()
        )
    }
}

// ------------- Cluster -------------
/// A named, ordered, non-empty sequence of tweaks that are declared and
/// displayed together, such as a min/max pair. The order matters for
/// display grouping only, not for identity. Nothing here enforces
/// cross-tweak relations between siblings; that is left to the editing
/// layer.
#[derive(Debug, Clone)]
pub struct TweakCluster {
    name: String,
    tweaks: Vec<Tweak>,
}

impl TweakCluster {
    pub fn new(name: impl Into<String>, tweaks: Vec<Tweak>) -> Result<TweakCluster> {
        let name = name.into();
        if tweaks.is_empty() {
            return Err(TinkerError::Config(format!(
                "cluster '{}' must contain at least one tweak",
                name
            )));
        }
        Ok(TweakCluster { name, tweaks })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn tweaks(&self) -> &[Tweak] {
        &self.tweaks
    }
    pub fn len(&self) -> usize {
        self.tweaks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tweaks.is_empty()
    }
    fn into_tweaks(self) -> Vec<Tweak> {
        self.tweaks
    }
}

// a single tweak is a degenerate cluster of one
impl From<Tweak> for TweakCluster {
    fn from(tweak: Tweak) -> TweakCluster {
        TweakCluster {
            name: tweak.tweak_name().to_owned(),
            tweaks: vec![tweak],
        }
    }
}

// ------------- TweakKeeper -------------
/// Owns every registered tweak, guaranteeing identity uniqueness. Double
/// indexing: a vector preserves declaration order for enumeration while the
/// map serves identifier lookups.
#[derive(Debug)]
pub struct TweakKeeper {
    kept: Vec<Arc<Tweak>>,
    lookup: HashMap<String, Arc<Tweak>, OtherHasher>,
}

impl TweakKeeper {
    pub fn new() -> Self {
        Self {
            kept: Vec::new(),
            lookup: HashMap::default(),
        }
    }
    pub fn keep(&mut self, tweak: Tweak) -> Result<Arc<Tweak>> {
        match self.lookup.entry(tweak.identifier()) {
            Entry::Vacant(entry) => {
                let kept = Arc::new(tweak);
                entry.insert(Arc::clone(&kept));
                self.kept.push(Arc::clone(&kept));
                Ok(kept)
            }
            Entry::Occupied(entry) => Err(TinkerError::Config(format!(
                "duplicate tweak identity: {}",
                entry.key()
            ))),
        }
    }
    pub fn get(&self, identifier: &str) -> Option<Arc<Tweak>> {
        self.lookup.get(identifier).map(Arc::clone)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Tweak>> {
        self.kept.iter()
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

// ------------- OverrideKeeper -------------
/// The in-memory mirror of the persisted overrides. Entries are absent
/// until the first write and removing one reverts the tweak to its default.
#[derive(Debug)]
pub struct OverrideKeeper {
    kept: HashMap<String, TweakValue, OtherHasher>,
}

impl OverrideKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
    pub fn set(&mut self, identifier: String, value: TweakValue) {
        self.kept.insert(identifier, value);
    }
    pub fn get(&self, identifier: &str) -> Option<&TweakValue> {
        self.kept.get(identifier)
    }
    pub fn remove(&mut self, identifier: &str) -> Option<TweakValue> {
        self.kept.remove(identifier)
    }
    pub fn remove_all(&mut self) {
        self.kept.clear();
    }
    pub fn remove_all_with_prefix(&mut self, prefix: &str) {
        self.kept.retain(|identifier, _| !identifier.starts_with(prefix));
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

// ------------- TweakStore -------------
// This sets up the store with the necessary structures
pub struct TweakStore {
    // read-only after construction, so enumeration needs no locking
    tweak_keeper: TweakKeeper,
    // the override state is the only mutable shared resource
    override_keeper: Arc<Mutex<OverrideKeeper>>,
    // responsible for the persistence layer
    pub persistor: Arc<Mutex<Persistor>>,
}

impl TweakStore {
    /// Flattens the given clusters into the index and restores any
    /// persisted overrides. Construction fails on a duplicate identity,
    /// since that reflects a mistake in the declarations rather than a
    /// runtime condition.
    pub fn new(clusters: Vec<TweakCluster>, mode: PersistenceMode) -> Result<TweakStore> {
        let mut persistor = Persistor::new(&mode)?;
        let mut tweak_keeper = TweakKeeper::new();
        for cluster in clusters {
            for tweak in cluster.into_tweaks() {
                tweak_keeper.keep(tweak)?;
            }
        }

        // Restore the existing overrides. A failed restore degrades to the
        // declared defaults; stale rows are skipped, out-of-bounds numerics
        // are clamped into the currently declared bounds.
        let restored = match persistor.restore_overrides() {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, "could not restore persisted overrides");
                Vec::new()
            }
        };
        let mut override_keeper = OverrideKeeper::new();
        for (identifier, value) in restored {
            match tweak_keeper.get(&identifier) {
                Some(tweak) => match tweak.default_data().coerce_and_clamp(value) {
                    Ok(value) => override_keeper.set(identifier, value),
                    Err(err) => {
                        warn!(identifier = %identifier, error = %err, "dropping persisted override of the wrong type");
                    }
                },
                None => {
                    warn!(identifier = %identifier, "ignoring persisted override for an undeclared tweak");
                }
            }
        }

        info!(
            tweaks = tweak_keeper.len(),
            overrides = override_keeper.len(),
            "tweak store constructed"
        );
        Ok(TweakStore {
            tweak_keeper,
            override_keeper: Arc::new(Mutex::new(override_keeper)),
            persistor: Arc::new(Mutex::new(persistor)),
        })
    }

    fn overrides(&self) -> Result<MutexGuard<'_, OverrideKeeper>> {
        self.override_keeper
            .lock()
            .map_err(|e| TinkerError::Lock(e.to_string()))
    }

    // the in-memory value is authoritative for the session; persistence is
    // best effort and failures are logged, never surfaced
    fn persist<F>(&self, key: &str, operation: F)
    where
        F: FnOnce(&mut Persistor) -> Result<()>,
    {
        match self.persistor.lock() {
            Ok(mut persistor) => {
                if let Err(err) = operation(&mut persistor) {
                    warn!(key = %key, error = %err, "persistence write failed");
                }
            }
            Err(err) => {
                warn!(key = %key, error = %err, "persistor lock poisoned, persistence write skipped");
            }
        }
    }

    /// Looks up the registered tweak for an identity. Asking about an
    /// identity that was never declared is a programming error and fails
    /// loudly instead of inventing a default.
    pub fn tweak(&self, identity: &TweakIdentity) -> Result<Arc<Tweak>> {
        self.tweak_keeper
            .get(&identity.identifier())
            .ok_or_else(|| TinkerError::NotFound(identity.identifier()))
    }

    pub fn contains(&self, identity: &TweakIdentity) -> bool {
        self.tweak_keeper.get(&identity.identifier()).is_some()
    }

    pub fn len(&self) -> usize {
        self.tweak_keeper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweak_keeper.is_empty()
    }

    /// The persisted override if one exists, else the declared default.
    pub fn current_value(&self, identity: &TweakIdentity) -> Result<TweakValue> {
        let tweak = self.tweak(identity)?;
        let overrides = self.overrides()?;
        Ok(overrides
            .get(&tweak.identifier())
            .cloned()
            .unwrap_or_else(|| tweak.default_value()))
    }

    /// Typed variant of [`current_value`](Self::current_value), for callers
    /// that know the declared type.
    pub fn current<T: TweakData>(&self, identity: &TweakIdentity) -> Result<T> {
        let value = self.current_value(identity)?;
        T::convert(&value).ok_or_else(|| {
            TinkerError::TypeMismatch(format!(
                "{} holds a {} value, not a {}",
                identity,
                value.value_type(),
                T::VALUE_TYPE
            ))
        })
    }

    /// Stores a new override. The value is checked against the declared
    /// type (integer/float representations coerce into each other) and
    /// clamped into the declared bounds; the value actually stored is
    /// returned. Persistence happens after the in-memory update and its
    /// failures are logged, never propagated.
    pub fn set_value(&self, identity: &TweakIdentity, value: TweakValue) -> Result<TweakValue> {
        let tweak = self.tweak(identity)?;
        let identifier = tweak.identifier();
        let stored = tweak
            .default_data()
            .coerce_and_clamp(value)
            .map_err(|err| match err {
                TinkerError::TypeMismatch(message) => {
                    TinkerError::TypeMismatch(format!("{}: {}", identifier, message))
                }
                other => other,
            })?;
        self.overrides()?.set(identifier.clone(), stored.clone());
        self.persist(&identifier, |persistor| persistor.set(&identifier, &stored));
        Ok(stored)
    }

    /// Typed variant of [`set_value`](Self::set_value).
    pub fn set<T: TweakData>(&self, identity: &TweakIdentity, value: T) -> Result<TweakValue> {
        self.set_value(identity, value.erase())
    }

    /// Removes the override so the tweak reads as its default again.
    pub fn reset(&self, identity: &TweakIdentity) -> Result<()> {
        let tweak = self.tweak(identity)?;
        let identifier = tweak.identifier();
        self.overrides()?.remove(&identifier);
        self.persist(&identifier, |persistor| persistor.remove(&identifier));
        Ok(())
    }

    /// Removes every override in the store.
    pub fn reset_all(&self) -> Result<()> {
        self.overrides()?.remove_all();
        self.persist("*", |persistor| persistor.remove_all());
        Ok(())
    }

    /// Removes every override under one collection.
    pub fn reset_collection(&self, collection_name: &str) -> Result<()> {
        let prefix = format!("{}{}", collection_name, IDENTIFIER_SEPARATOR);
        self.overrides()?.remove_all_with_prefix(&prefix);
        self.persist(&prefix, |persistor| {
            persistor.remove_all_with_prefix(&prefix)
        });
        Ok(())
    }

    // enumeration keeps declaration order, since consumers rely on the
    // author-chosen grouping
    pub fn all_tweaks(&self) -> impl Iterator<Item = &Arc<Tweak>> {
        self.tweak_keeper.iter()
    }

    pub fn tweaks_in_collection<'a>(
        &'a self,
        collection_name: &'a str,
    ) -> impl Iterator<Item = &'a Arc<Tweak>> + 'a {
        self.tweak_keeper
            .iter()
            .filter(move |tweak| tweak.collection_name() == collection_name)
    }

    pub fn tweaks_in_group<'a>(
        &'a self,
        collection_name: &'a str,
        group_name: &'a str,
    ) -> impl Iterator<Item = &'a Arc<Tweak>> + 'a {
        self.tweak_keeper.iter().filter(move |tweak| {
            tweak.collection_name() == collection_name && tweak.group_name() == group_name
        })
    }

    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for tweak in self.tweak_keeper.iter() {
            let name = tweak.collection_name();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn group_names(&self, collection_name: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for tweak in self.tweak_keeper.iter() {
            if tweak.collection_name() != collection_name {
                continue;
            }
            let name = tweak.group_name();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl fmt::Debug for TweakStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TweakStore {{ tweaks: {} }}", self.tweak_keeper.len())
    }
}
