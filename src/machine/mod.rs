//! Runtime surface: frozen tables, instance factories, live machines.
//!
//! This module is the imperative shell around the declaration core.
//! Dispatch resolves the current (state, operation) pair in the frozen
//! table, runs the bound handler, and commits the state change together
//! with the handler's side effects only on success.

mod factory;
mod instance;
mod transition;

pub use factory::InstanceFactory;
pub use instance::TypeMachine;
pub use transition::{DispatchError, Handler};

pub(crate) use transition::{TableEntry, TransitionTable};
