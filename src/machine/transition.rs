//! Frozen transition table and dispatch-time errors.

use crate::core::{DefinitionId, Operation};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Caller-supplied side-effecting handler bound to a transition.
///
/// Receives the controller, the device bundle, and the dispatch input.
/// The handler's side effects and the state change commit as one unit,
/// only if the handler returns `Ok`.
pub type Handler<C, D, I, R, E> = Arc<dyn Fn(&mut C, &mut D, I) -> Result<R, E> + Send + Sync>;

/// One slot of the frozen table: the target state plus the handler that
/// must complete before the move commits.
pub(crate) struct TableEntry<C, D, I, R, E> {
    pub(crate) target: u32,
    pub(crate) handler: Handler<C, D, I, R, E>,
}

/// Immutable (state, operation) -> (target, handler) mapping, shared
/// read-only by every instance spawned from one factory.
pub(crate) struct TransitionTable<Op: Operation, C, D, I, R, E> {
    pub(crate) definition: DefinitionId,
    pub(crate) initial: u32,
    pub(crate) states: Vec<String>,
    pub(crate) entries: HashMap<(u32, Op), TableEntry<C, D, I, R, E>>,
}

impl<Op: Operation, C, D, I, R, E> TransitionTable<Op, C, D, I, R, E> {
    pub(crate) fn state_name(&self, index: u32) -> &str {
        &self.states[index as usize]
    }
}

/// Errors surfaced by [`TypeMachine::dispatch`](crate::machine::TypeMachine::dispatch).
#[derive(Debug, Error)]
pub enum DispatchError<E> {
    /// No transition is registered for the current (state, operation)
    /// pair. The state did not change; no handler ran.
    #[error("no transition from state '{state}' for operation '{operation}'")]
    NoTransition { state: String, operation: String },

    /// A handler invoked dispatch on the instance that was already
    /// mid-dispatch on this thread.
    #[error("re-entrant dispatch of operation '{operation}'")]
    ReentrantDispatch { operation: String },

    /// The handler failed. Passed through untranslated; nothing committed.
    #[error(transparent)]
    Handler(E),
}
