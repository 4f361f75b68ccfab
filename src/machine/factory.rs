//! Factory that manufactures live machine instances.

use crate::core::{Operation, StateHandle};
use crate::machine::instance::TypeMachine;
use crate::machine::transition::TransitionTable;
use std::sync::Arc;

/// Manufactures machine instances over one frozen transition table.
///
/// Cloning a factory is cheap; every clone and every instance share the
/// same immutable table.
pub struct InstanceFactory<Op: Operation, C, D, I, R, E> {
    pub(crate) table: Arc<TransitionTable<Op, C, D, I, R, E>>,
}

impl<Op, C, D, I, R, E> InstanceFactory<Op, C, D, I, R, E>
where
    Op: Operation,
    C: Clone + Send + Sync + 'static,
    D: Clone + Send + Sync + 'static,
    I: 'static,
    R: 'static,
    E: 'static,
{
    /// Create a live instance in the frozen initial state.
    ///
    /// Never fails: all validation happened at build time. The controller
    /// and device bundle are moved into the instance and handed to
    /// handlers by `&mut` on each dispatch.
    pub fn create(&self, controller: C, devices: D) -> TypeMachine<Op, C, D, I, R, E> {
        TypeMachine::new(Arc::clone(&self.table), controller, devices)
    }

    /// Handle of the state every new instance starts in.
    pub fn initial_state(&self) -> StateHandle {
        StateHandle {
            definition: self.table.definition,
            index: self.table.initial,
        }
    }
}

impl<Op: Operation, C, D, I, R, E> Clone for InstanceFactory<Op, C, D, I, R, E> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}
