//! Typemachine: a typed finite-state-machine runtime builder.
//!
//! A machine definition is declared against a capability interface: a set
//! of named operations that live instances expose. The builder interns
//! named states, binds at most one transition per (state, operation) pair
//! to a side-effecting handler, and freezes the result into an instance
//! factory. Every instance created by the factory routes operation calls
//! through the frozen table: look up the current state, run the bound
//! handler, and commit the state change only if the handler succeeds.
//!
//! # Core Concepts
//!
//! - **State**: interned by name at declaration time, addressed through
//!   opaque [`StateHandle`]s
//! - **Operation**: a capability-interface identifier via the
//!   [`Operation`] trait, usually generated with
//!   [`operation_enum!`](crate::operation_enum)
//! - **Transactional dispatch**: a handler runs against a working copy of
//!   the controller and device bundle; the copy and the state change
//!   commit as one unit, so a failed handler leaves the instance exactly
//!   as it was
//!
//! The capability interface itself stays an ordinary Rust trait: implement
//! it for the machine type with one method per operation, each delegating
//! to [`TypeMachine::dispatch`].
//!
//! # Example
//!
//! ```rust
//! use typemachine::{operation_enum, TypeMachineBuilder};
//!
//! operation_enum! {
//!     enum DoorOp {
//!         Open,
//!         Close,
//!     }
//! }
//!
//! #[derive(Clone, Default)]
//! struct Hinge {
//!     cycles: u32,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder: TypeMachineBuilder<DoorOp, Hinge, (), (), u32, std::convert::Infallible> =
//!     TypeMachineBuilder::new();
//! let closed = builder.declare_state("closed")?;
//! let open = builder.declare_state("open")?;
//! builder.declare_transition(closed, DoorOp::Open, open, |hinge, _devices, ()| {
//!     hinge.cycles += 1;
//!     Ok(hinge.cycles)
//! })?;
//! builder.declare_transition(open, DoorOp::Close, closed, |hinge, _devices, ()| {
//!     hinge.cycles += 1;
//!     Ok(hinge.cycles)
//! })?;
//!
//! let factory = builder.build(closed)?;
//! let door = factory.create(Hinge::default(), ());
//!
//! assert_eq!(door.dispatch(DoorOp::Open, ())?, 1);
//! assert_eq!(door.state_name(), "open");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, TypeMachineBuilder};
pub use core::{DispatchLog, DispatchRecord, Operation, StateHandle};
pub use machine::{DispatchError, Handler, InstanceFactory, TypeMachine};
