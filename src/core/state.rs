//! State handles and definition identity.
//!
//! States are interned by name when declared on a builder. Callers never
//! see the interned index directly; they hold opaque handles that are only
//! meaningful to the definition that produced them.

use uuid::Uuid;

/// Identity of one machine definition.
///
/// Every handle carries the id of the builder that produced it, so a
/// handle from one definition cannot silently index into another's table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct DefinitionId(Uuid);

impl DefinitionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Opaque handle to a state declared on a builder.
///
/// Handles are cheap `Copy` values returned by
/// [`declare_state`](crate::builder::TypeMachineBuilder::declare_state) and
/// passed back when declaring transitions and the initial state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StateHandle {
    pub(crate) definition: DefinitionId,
    pub(crate) index: u32,
}

impl StateHandle {
    /// Position of the state in declaration order.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}
