//! Serialized profile documents
//!
//! A profile document holds one or more profiles, each with a scope and a
//! table of values:
//!
//! ```toml
//! [[profiles]]
//! name = "payment-staging"
//! scope = { type = "composite", of = [
//!     { type = "api", value = "payment" },
//!     { type = "environment", value = "staging" },
//! ] }
//!
//! [profiles.values]
//! timeout = { duration = "2m" }
//! retries = 5
//! mode = "strict"
//! ```
//!
//! Plain scalars map to strings, integers, floats and booleans; durations are
//! written as `{ duration = "<literal>" }`.

use std::collections::BTreeMap;
use std::sync::Arc;

use profile_core::scope::{Composite, Global, Tag};
use profile_core::{ConfigKey, ConfigValue, Profile, ScopeRef, ScopeRegistry};
use serde::{Deserialize, Serialize};

use crate::duration::parse_duration;
use crate::{Error, Result};

/// Top-level document: a list of profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSetDocument {
    #[serde(default)]
    pub profiles: Vec<ProfileDocument>,
}

impl ProfileSetDocument {
    /// Build every profile in the document.
    pub fn build(&self, registry: &ScopeRegistry) -> Result<Vec<Profile>> {
        self.profiles
            .iter()
            .map(|document| document.build(registry))
            .collect()
    }
}

/// One serialized profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    /// Optional label, used in error messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub scope: ScopeSpec,

    #[serde(default)]
    pub values: BTreeMap<String, RawValue>,
}

impl ProfileDocument {
    /// Build the scope and validate every key and value.
    ///
    /// Two raw keys that normalize to the same key are rejected.
    pub fn build(&self, registry: &ScopeRegistry) -> Result<Profile> {
        let scope = self.scope.build(registry).map_err(|e| self.contextualize(e))?;

        let mut values: BTreeMap<ConfigKey, ConfigValue> = BTreeMap::new();
        for (raw_key, raw_value) in &self.values {
            let key = ConfigKey::new(raw_key).map_err(|e| self.contextualize(e.into()))?;
            let value = raw_value
                .to_config_value()
                .map_err(|e| self.contextualize(e))?;
            if values.insert(key.clone(), value).is_some() {
                return Err(self.contextualize(Error::invalid_document(format!(
                    "duplicate key {key} after normalization"
                ))));
            }
        }

        Ok(Profile::new(scope, values))
    }

    fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("profile {name:?}"),
            None => format!("profile for scope {}", self.scope),
        }
    }

    /// Prefix document errors with the profile they came from.
    fn contextualize(&self, error: Error) -> Error {
        match error {
            Error::InvalidDocument { message } => {
                Error::invalid_document(format!("{}: {message}", self.label()))
            }
            Error::InvalidDuration { literal } => Error::invalid_document(format!(
                "{}: invalid duration literal {literal:?}",
                self.label()
            )),
            Error::Core(source) => Error::InvalidProfile {
                profile: self.label(),
                source,
            },
            other => other,
        }
    }
}

/// Serialized scope.
///
/// `type = "global"` and `type = "composite"` (with exactly two entries in
/// `of`) are structural; `type = "tag"` may carry a `precedence`; every other
/// type is built through the [`ScopeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSpec {
    #[serde(rename = "type")]
    pub scope_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precedence: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub of: Vec<ScopeSpec>,
}

impl ScopeSpec {
    /// Entry for a registry-built scope such as `api:payment`.
    pub fn named(scope_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            scope_type: scope_type.into(),
            value: Some(value.into()),
            precedence: None,
            of: Vec::new(),
        }
    }

    pub fn build(&self, registry: &ScopeRegistry) -> Result<ScopeRef> {
        match self.scope_type.as_str() {
            Global::TYPE => {
                if self.value.is_some() || self.precedence.is_some() || !self.of.is_empty() {
                    return Err(Error::invalid_document(
                        "global scope takes no value, precedence or components",
                    ));
                }
                Ok(Arc::new(Global))
            }
            Composite::TYPE => {
                if self.value.is_some() || self.precedence.is_some() {
                    return Err(Error::invalid_document(
                        "composite scope precedence and value are derived from its components",
                    ));
                }
                let [first, second] = self.of.as_slice() else {
                    return Err(Error::invalid_document(format!(
                        "composite scope needs exactly 2 components, got {}",
                        self.of.len()
                    )));
                };
                Ok(Arc::new(Composite::new(
                    first.build(registry)?,
                    second.build(registry)?,
                )))
            }
            scope_type => {
                if !self.of.is_empty() {
                    return Err(Error::invalid_document(format!(
                        "{scope_type} scope does not take components"
                    )));
                }
                let value = self.value.as_deref().ok_or_else(|| {
                    Error::invalid_document(format!("{scope_type} scope needs a value"))
                })?;

                match (scope_type, self.precedence) {
                    (Tag::TYPE, Some(precedence)) => {
                        Ok(Arc::new(Tag::with_precedence(value, precedence)?))
                    }
                    (_, Some(_)) => Err(Error::invalid_document(format!(
                        "{scope_type} scope has a fixed precedence"
                    ))),
                    (_, None) => Ok(registry.resolve(scope_type, value)?),
                }
            }
        }
    }
}

impl std::fmt::Display for ScopeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.of.is_empty() {
            let parts: Vec<String> = self.of.iter().map(ToString::to_string).collect();
            return write!(f, "{}({})", self.scope_type, parts.join("+"));
        }
        match &self.value {
            Some(value) => write!(f, "{}:{value}", self.scope_type),
            None => f.write_str(&self.scope_type),
        }
    }
}

/// A value as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Duration { duration: String },
}

impl RawValue {
    pub fn to_config_value(&self) -> Result<ConfigValue> {
        Ok(match self {
            RawValue::Boolean(b) => ConfigValue::Boolean(*b),
            RawValue::Integer(i) => ConfigValue::Integer(*i),
            RawValue::Float(f) => ConfigValue::Float(*f),
            RawValue::String(s) => ConfigValue::String(s.clone()),
            RawValue::Duration { duration } => ConfigValue::Duration(parse_duration(duration)?),
        })
    }
}
