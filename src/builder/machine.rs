//! Builder for declaring machine definitions.

use crate::builder::error::BuildError;
use crate::core::{DefinitionId, Operation, StateHandle};
use crate::machine::{InstanceFactory, TableEntry, TransitionTable};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Accumulates state and transition declarations for one machine
/// definition, then freezes them into an [`InstanceFactory`].
///
/// States are declared by name and addressed through the returned
/// [`StateHandle`]s. Each (state, operation) pair binds at most one
/// transition; a loop declared with [`declare_loop`](Self::declare_loop)
/// occupies the same slot as an ordinary transition for the pair.
///
/// Coverage is deliberately not validated: a pair left undeclared is legal
/// and surfaces at dispatch time as
/// [`DispatchError::NoTransition`](crate::machine::DispatchError).
pub struct TypeMachineBuilder<Op: Operation, C, D, I, R, E> {
    definition: DefinitionId,
    states: Vec<String>,
    transitions: HashMap<(u32, Op), TableEntry<C, D, I, R, E>>,
    built: bool,
}

impl<Op, C, D, I, R, E> TypeMachineBuilder<Op, C, D, I, R, E>
where
    Op: Operation,
    C: Clone + Send + Sync + 'static,
    D: Clone + Send + Sync + 'static,
    I: 'static,
    R: 'static,
    E: 'static,
{
    /// Create a new builder with a fresh definition identity.
    pub fn new() -> Self {
        Self {
            definition: DefinitionId::new(),
            states: Vec::new(),
            transitions: HashMap::new(),
            built: false,
        }
    }

    /// Register a new named state.
    ///
    /// Fails with [`BuildError::DuplicateState`] if the name is taken, or
    /// [`BuildError::AlreadyBuilt`] once the definition is frozen.
    pub fn declare_state(&mut self, name: impl Into<String>) -> Result<StateHandle, BuildError> {
        if self.built {
            return Err(BuildError::AlreadyBuilt);
        }
        let name = name.into();
        if self.states.contains(&name) {
            return Err(BuildError::DuplicateState { name });
        }
        let index = self.states.len() as u32;
        self.states.push(name);
        Ok(StateHandle {
            definition: self.definition,
            index,
        })
    }

    /// Bind `operation` in `source` to a transition into `target`, running
    /// `handler` before the move commits.
    ///
    /// Fails with [`BuildError::ConflictingTransition`] if the
    /// (source, operation) slot is already bound, loop or otherwise.
    pub fn declare_transition<H>(
        &mut self,
        source: StateHandle,
        operation: Op,
        target: StateHandle,
        handler: H,
    ) -> Result<(), BuildError>
    where
        H: Fn(&mut C, &mut D, I) -> Result<R, E> + Send + Sync + 'static,
    {
        if self.built {
            return Err(BuildError::AlreadyBuilt);
        }
        let source_ix = self.resolve(source)?;
        let target_ix = self.resolve(target)?;
        let key = (source_ix, operation);
        if self.transitions.contains_key(&key) {
            return Err(BuildError::ConflictingTransition {
                state: self.states[source_ix as usize].clone(),
                operation: key.1.name().to_string(),
            });
        }
        self.transitions.insert(
            key,
            TableEntry {
                target: target_ix,
                handler: Arc::new(handler),
            },
        );
        Ok(())
    }

    /// Bind `operation` in `source` to a self-transition: the handler runs
    /// and its value is returned, but the state does not change.
    pub fn declare_loop<H>(
        &mut self,
        source: StateHandle,
        operation: Op,
        handler: H,
    ) -> Result<(), BuildError>
    where
        H: Fn(&mut C, &mut D, I) -> Result<R, E> + Send + Sync + 'static,
    {
        self.declare_transition(source, operation, source, handler)
    }

    /// Freeze the definition and produce the factory.
    ///
    /// Fails only with [`BuildError::AlreadyBuilt`] on a second call, or
    /// [`BuildError::ForeignState`] for a handle from another builder.
    pub fn build(
        &mut self,
        initial: StateHandle,
    ) -> Result<InstanceFactory<Op, C, D, I, R, E>, BuildError> {
        if self.built {
            return Err(BuildError::AlreadyBuilt);
        }
        let initial_ix = self.resolve(initial)?;
        self.built = true;

        let table = TransitionTable {
            definition: self.definition,
            initial: initial_ix,
            states: std::mem::take(&mut self.states),
            entries: std::mem::take(&mut self.transitions),
        };
        debug!(
            states = table.states.len(),
            transitions = table.entries.len(),
            initial = %table.states[initial_ix as usize],
            "machine definition frozen"
        );
        Ok(InstanceFactory {
            table: Arc::new(table),
        })
    }

    fn resolve(&self, handle: StateHandle) -> Result<u32, BuildError> {
        if handle.definition != self.definition {
            return Err(BuildError::ForeignState);
        }
        Ok(handle.index)
    }
}

impl<Op, C, D, I, R, E> Default for TypeMachineBuilder<Op, C, D, I, R, E>
where
    Op: Operation,
    C: Clone + Send + Sync + 'static,
    D: Clone + Send + Sync + 'static,
    I: 'static,
    R: 'static,
    E: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::DispatchError;

    crate::operation_enum! {
        enum LampOp {
            TurnOn,
            TurnOff,
            Status,
        }
    }

    #[derive(Clone, Debug, Default)]
    struct Lamp {
        lit: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("filament burned out")]
    struct Burnout;

    type LampBuilder = TypeMachineBuilder<LampOp, Lamp, (), (), bool, Burnout>;

    #[test]
    fn duplicate_state_is_rejected() {
        let mut builder = LampBuilder::new();
        builder.declare_state("off").unwrap();

        let result = builder.declare_state("off");

        assert!(matches!(result, Err(BuildError::DuplicateState { name }) if name == "off"));
    }

    #[test]
    fn conflicting_transition_is_rejected() {
        let mut builder = LampBuilder::new();
        let off = builder.declare_state("off").unwrap();
        let on = builder.declare_state("on").unwrap();
        builder
            .declare_transition(off, LampOp::TurnOn, on, |lamp, _devices, ()| {
                lamp.lit = true;
                Ok(true)
            })
            .unwrap();

        let result = builder.declare_transition(off, LampOp::TurnOn, off, |_lamp, _devices, ()| {
            Ok(false)
        });

        assert!(matches!(
            result,
            Err(BuildError::ConflictingTransition { state, operation })
                if state == "off" && operation == "TurnOn"
        ));
    }

    #[test]
    fn loop_and_transition_exclude_each_other() {
        let mut builder = LampBuilder::new();
        let off = builder.declare_state("off").unwrap();
        let on = builder.declare_state("on").unwrap();
        builder
            .declare_loop(off, LampOp::Status, |lamp, _devices, ()| Ok(lamp.lit))
            .unwrap();

        let result =
            builder.declare_transition(off, LampOp::Status, on, |_lamp, _devices, ()| Ok(true));

        assert!(matches!(
            result,
            Err(BuildError::ConflictingTransition { .. })
        ));
    }

    #[test]
    fn build_twice_is_rejected() {
        let mut builder = LampBuilder::new();
        let off = builder.declare_state("off").unwrap();
        builder
            .declare_loop(off, LampOp::Status, |lamp, _devices, ()| Ok(lamp.lit))
            .unwrap();

        builder.build(off).unwrap();
        let result = builder.build(off);

        assert!(matches!(result, Err(BuildError::AlreadyBuilt)));
    }

    #[test]
    fn declarations_after_build_are_rejected() {
        let mut builder = LampBuilder::new();
        let off = builder.declare_state("off").unwrap();
        builder.build(off).unwrap();

        assert!(matches!(
            builder.declare_state("on"),
            Err(BuildError::AlreadyBuilt)
        ));
        assert!(matches!(
            builder.declare_loop(off, LampOp::Status, |lamp, _devices, ()| Ok(lamp.lit)),
            Err(BuildError::AlreadyBuilt)
        ));
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let mut first = LampBuilder::new();
        let mut second = LampBuilder::new();
        let off = first.declare_state("off").unwrap();
        let other = second.declare_state("off").unwrap();

        let result =
            first.declare_transition(off, LampOp::TurnOn, other, |_lamp, _devices, ()| Ok(true));

        assert!(matches!(result, Err(BuildError::ForeignState)));
        assert!(matches!(first.build(other), Err(BuildError::ForeignState)));
    }

    #[test]
    fn incomplete_coverage_still_builds() {
        let mut builder = LampBuilder::new();
        let off = builder.declare_state("off").unwrap();
        let on = builder.declare_state("on").unwrap();
        builder
            .declare_transition(off, LampOp::TurnOn, on, |lamp, _devices, ()| {
                lamp.lit = true;
                Ok(true)
            })
            .unwrap();

        let factory = builder.build(off).unwrap();
        let machine = factory.create(Lamp::default(), ());

        let result = machine.dispatch(LampOp::TurnOff, ());
        assert!(matches!(
            result,
            Err(DispatchError::NoTransition { state, operation })
                if state == "off" && operation == "TurnOff"
        ));
    }

    #[test]
    fn factory_reports_initial_state() {
        let mut builder = LampBuilder::new();
        let off = builder.declare_state("off").unwrap();
        let _on = builder.declare_state("on").unwrap();

        let factory = builder.build(off).unwrap();

        assert_eq!(factory.initial_state(), off);
        assert_eq!(factory.initial_state().index(), 0);
    }
}
