//! Macromeasures API response types.
//!
//! All types model the JSON returned by `/{provider}/users.json`. The API
//! wraps every lookup in a `{"complete": .., "error": .., "message": ..}`
//! envelope with the per-user results under `labels`, keyed by the queried
//! username or ID. Attributes the API has no data for arrive as `null`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Top-level envelope for a `users.json` lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserResponse {
    /// `false` while inference is still running server-side.
    #[serde(default, deserialize_with = "null_as_default")]
    pub complete: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: bool,
    #[serde(default, rename = "message", deserialize_with = "null_as_default")]
    pub error_message: String,
    /// One entry per queried value, keyed exactly as it was sent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, User>,
}

/// The inferred attributes of a single account.
///
/// `valid` is `false` when the queried value could not be resolved to an
/// account (for example a username passed to an ID lookup).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub valid: bool,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub interests: Option<Interests>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default, rename = "type")]
    pub account_type: Option<AccountType>,
}

// ---------------------------------------------------------------------------
// interests
// ---------------------------------------------------------------------------

/// Psychographic tags organised as a multi-parent hierarchy.
///
/// The hierarchy is stored flat: `all` maps interest IDs to nodes and each
/// node names its parents by ID. See the lookup helpers in [`crate::users`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interests {
    #[serde(default, deserialize_with = "null_as_default")]
    pub all: BTreeMap<String, Interest>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmed: bool,
    #[serde(default)]
    pub updated: Timestamp,
}

/// One node of the interest hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display: String,
    /// Depth of the node in the hierarchy, as sent by the API.
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parents: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub useful: bool,
}

// ---------------------------------------------------------------------------
// type / gender
// ---------------------------------------------------------------------------

/// Whether the account is classified as personal.
///
/// Gender, location and interests are never returned for non-personal
/// accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountType {
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub personal: bool,
    #[serde(default)]
    pub updated: Timestamp,
}

/// Inferred gender. `label` is `"M"`, `"F"` or `"?"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gender {
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default)]
    pub updated: Timestamp,
}

// ---------------------------------------------------------------------------
// platform
// ---------------------------------------------------------------------------

/// Devices the account posts from (microblogging provider only).
///
/// `recent` is sorted most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmed: bool,
    #[serde(default)]
    pub updated: Timestamp,
    #[serde(default)]
    pub primary: Option<Device>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent: Vec<Device>,
}

/// A posting device such as `"iPhone"` or `"Android Tablet"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmed: bool,
    #[serde(default)]
    pub updated: Timestamp,
    #[serde(default)]
    pub primary: Option<Place>,
}

/// The primary location at the finest granularity the API could infer:
/// `"city"`, `"subdivision"`, `"country"` or `"unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default)]
    pub country: Option<Region>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub granularity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(default)]
    pub subdivision: Option<Region>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

// ---------------------------------------------------------------------------
// language
// ---------------------------------------------------------------------------

/// Languages detected in recent posts. `recent` is sorted most recent first
/// and is empty for protected or inactive accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmed: bool,
    #[serde(default)]
    pub updated: Timestamp,
    #[serde(default)]
    pub primary: Option<Tongue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent: Vec<Tongue>,
}

/// A language with its ISO 639-1 code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tongue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub iso_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// domain records
// ---------------------------------------------------------------------------

/// A user flattened out of a [`UserResponse`], with its interests as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroUser {
    pub id: String,
    pub valid: bool,
    pub gender: Option<Gender>,
    pub interests: Vec<InterestEntry>,
    pub language: Option<Language>,
    pub location: Option<Location>,
    pub platform: Option<Platform>,
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
}

/// An [`Interest`] tagged with its own ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestEntry {
    pub id: String,
    #[serde(flatten)]
    pub interest: Interest,
}

/// The API sends `null` for empty maps, lists and some scalars; they decode
/// to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
