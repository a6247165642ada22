//! Precedence bands for the built-in scopes
//!
//! Higher values are more specific. The Tag default and the composite bump
//! are conventions; custom scopes that need to sit between built-ins can pick
//! any value, but by convention start at [`CUSTOM_MIN`].

/// Precedence of [`Global`](super::Global).
pub const GLOBAL: u32 = 0;

/// Precedence of [`Api`](super::Api).
pub const API: u32 = 10;

/// Precedence of [`Environment`](super::Environment).
pub const ENVIRONMENT: u32 = 15;

/// Default precedence of [`Tag`](super::Tag) when none is given.
pub const TAG_DEFAULT: u32 = 20;

/// Added to the highest component precedence of a [`Composite`](super::Composite).
pub const COMPOSITE_BUMP: u32 = 5;

/// Lowest precedence conventionally used by custom scopes.
pub const CUSTOM_MIN: u32 = 25;
