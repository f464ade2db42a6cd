//! Carrier API adapters
//!
//! One module per carrier, each implementing the core `CarrierClient` port.
//! Wire DTOs stay private to their module; only the shared carrier-native
//! record shapes from the domain crate cross this boundary.

pub mod ups;
pub mod usps;

use serde::Deserialize;

/// UPS collapses a one-element list to a bare object in several places
/// (`Package`, `Activity`); both wire shapes must parse.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    /// A single bare object.
    One(T),
    /// A JSON array of objects.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}
