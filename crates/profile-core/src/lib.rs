//! Scoped configuration profile resolution
//!
//! This crate merges scoped configuration fragments ("profiles") into a single
//! configuration for a requested context:
//!
//! - **Scopes**: an open set of context dimensions (global, API, environment,
//!   tag, composite, custom) ranked by an integer precedence
//! - **Profiles**: immutable `key -> value` fragments tied to one scope
//! - **Conflict detection**: equally-specific matching profiles that disagree
//!   fail the resolution instead of being tie-broken
//! - **Resolution**: per-key precedence merge with an audit trail of every
//!   contributing scope
//!
//! # Architecture
//!
//! ```text
//!        loaders (profile-meta, ...)        rule evaluators / reports
//!                    |                                ^
//!                    v                                |
//!   Profile[] + requested Scope --> ProfileResolver --> ResolvedProfile
//!                                        |
//!                                 ConflictHandler
//! ```
//!
//! Resolution is deterministic: the order of the input profiles never affects
//! the result, and repeated calls give equal results.
//!
//! # Example
//!
//! ```
//! use profile_core::{Profile, ProfileResolver, scope::{Api, Global}};
//!
//! let profiles = vec![
//!     Profile::builder(Global).set("retries", 1_i64).unwrap().build(),
//!     Profile::builder(Api::new("payment").unwrap()).set("retries", 5_i64).unwrap().build(),
//! ];
//!
//! let resolved = ProfileResolver::new()
//!     .resolve(&profiles, &Api::new("payment").unwrap())
//!     .unwrap();
//! assert_eq!(resolved.get("retries").and_then(|v| v.as_integer()), Some(5));
//! ```

pub mod conflict;
pub mod error;
pub mod key;
pub mod profile;
pub mod registry;
pub mod resolved;
pub mod resolver;
pub mod scope;
pub mod value;

pub use conflict::{Conflict, ConflictError, ConflictHandler, Contribution};
pub use error::{Error, Result};
pub use key::ConfigKey;
pub use profile::{Profile, ProfileBuilder};
pub use registry::{ScopeFactory, ScopeRegistry};
pub use resolved::{ReportEntry, ResolutionReport, ResolvedProfile};
pub use resolver::ProfileResolver;
pub use scope::{Scope, ScopeDescriptor, ScopeRef};
pub use value::ConfigValue;
