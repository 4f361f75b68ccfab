//! Build errors for machine definition builders.

use thiserror::Error;

/// Errors that can occur while declaring states and transitions or
/// freezing a definition.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("state '{name}' is already declared")]
    DuplicateState { name: String },

    #[error("state '{state}' already binds operation '{operation}'")]
    ConflictingTransition { state: String, operation: String },

    #[error("build() has already been called on this builder")]
    AlreadyBuilt,

    #[error("state handle was created by a different builder")]
    ForeignState,
}
