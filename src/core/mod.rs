//! Core declaration types.
//!
//! This module contains the pure vocabulary of a machine definition:
//! - Operation identifiers via the `Operation` trait
//! - Opaque state handles returned by declaration
//! - Immutable dispatch history tracking
//!
//! Nothing here performs dispatch; the runtime lives in `crate::machine`.

mod history;
mod operation;
mod state;

pub use history::{DispatchLog, DispatchRecord};
pub use operation::Operation;
pub use state::StateHandle;

pub(crate) use state::DefinitionId;
