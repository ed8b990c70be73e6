//! Tinker – an in-app developer-tweaks core.
//!
//! Tinker centers on the *tweak* concept: a single named, typed, adjustable
//! runtime parameter with a compiled-in default, where:
//! * A [`construct::TweakIdentity`] is the unique (collection, group, name)
//!   triple a tweak lives under, joined into a derived identifier string.
//! * A [`construct::Tweak`] is a type-erased declaration: identity, value
//!   type, default value and optional numeric bounds/step/edit style.
//! * A [`construct::TweakCluster`] is a named, ordered, non-empty group of
//!   tweaks declared and displayed together; a single tweak converts into a
//!   degenerate cluster of one.
//! * A [`construct::TweakStore`] indexes all declared tweaks, holds the
//!   persisted-override state, and resolves current values by falling back
//!   to the declared defaults.
//!
//! The registered tweaks are owned and deduplicated by "keeper" structures
//! (see the `construct` module) enabling canonical sharing through `Arc`
//! while the store serves enumeration in declaration order.
//!
//! ## Modules
//! * [`construct`] – Identity, declaration, cluster and store building
//!   blocks plus their keepers.
//! * [`datatype`] – The closed set of value types ([`datatype::TweakValue`],
//!   [`datatype::Color`]), the [`datatype::TweakData`] trait bridging
//!   concrete Rust types onto it, and per-numeric-type metadata defaults.
//! * [`persist`] – SQLite persistence and restoration of overrides.
//! * [`error`] – The crate error taxonomy and `Result` alias.
//!
//! ## Value resolution
//! Reads consult the override state first and fall back to the declared
//! default. Writes are type-checked against the declaration (integer and
//! float representations coerce into each other, float→integer rounds to
//! nearest with ties away from zero), clamped into declared bounds, stored
//! in memory, and then mirrored to the persistence layer fire-and-forget.
//! The in-memory value stays authoritative for the session; a failed disk
//! write is logged, never raised.
//!
//! ## Persistence
//! The [`persist::Persistor`] encapsulates SQLite schema creation and
//! durable storage of overrides keyed by derived identifier. The
//! [`construct::TweakStore`] wires a persistor together with the in-memory
//! keepers and restores prior overrides on startup.
//!
//! ## Quick Start
//! ```
//! use tinker::construct::{Tweak, TweakStore};
//! use tinker::persist::PersistenceMode;
//!
//! let opacity = Tweak::new("Visuals", "Shadows", "Opacity", 0.5f32)
//!     .unwrap()
//!     .with_bounds(0.0f32, 1.0f32)
//!     .unwrap();
//! let identity = opacity.identity().clone();
//! let store = TweakStore::new(vec![opacity.into()], PersistenceMode::InMemory).unwrap();
//! assert_eq!(store.current::<f32>(&identity).unwrap(), 0.5);
//! // writes clamp into the declared bounds, sliders cannot leave their track
//! store.set(&identity, 1.5f32).unwrap();
//! assert_eq!(store.current::<f32>(&identity).unwrap(), 1.0);
//! store.reset(&identity).unwrap();
//! assert_eq!(store.current::<f32>(&identity).unwrap(), 0.5);
//! ```

pub mod construct;
pub mod datatype;
pub mod error;
pub mod persist;
