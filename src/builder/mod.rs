//! Declaration API for machine definitions.
//!
//! A definition is declared in normal control flow against an explicit
//! builder value - no module-level registration, no decorator sugar. The
//! builder interns states, binds transitions, and freezes everything into
//! an instance factory on `build`.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::TypeMachineBuilder;
