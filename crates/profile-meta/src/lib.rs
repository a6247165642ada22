//! Profile documents and scope selectors for the profile resolver.
//!
//! This crate turns serialized configuration into the inputs of
//! [`profile_core::ProfileResolver`]: profile documents (TOML, JSON or YAML)
//! become [`Profile`](profile_core::Profile)s, and selector strings such as
//! `api:payment+environment:staging` become requested scopes. Scopes are
//! built through a caller-supplied [`ScopeRegistry`](profile_core::ScopeRegistry),
//! so custom scope types work the same way as the built-in ones.

pub mod config;
pub mod duration;
pub mod error;
pub mod loader;
pub mod schema;
pub mod selector;

pub use config::LoaderConfig;
pub use error::{Error, Result};
pub use loader::{DocumentFormat, ProfileLoader};
pub use schema::{ProfileDocument, ProfileSetDocument, RawValue, ScopeSpec};
pub use selector::parse_selector;
