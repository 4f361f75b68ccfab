//! Operation identifiers for capability interfaces.
//!
//! A machine's externally invokable surface is a set of named operations.
//! The crate never defines what an operation means; it only routes a call
//! to the handler bound for the current (state, operation) pair.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for operation identifiers.
///
/// Implemented by fieldless enums that identify the operations of a
/// capability interface. Values are used as transition-table keys, so they
/// must be cheap to clone, hashable, and comparable.
///
/// The [`operation_enum!`](crate::operation_enum) macro generates an enum
/// together with this impl.
///
/// # Example
///
/// ```rust
/// use typemachine::core::Operation;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum TurnstileOp {
///     Push,
///     Coin,
/// }
///
/// impl Operation for TurnstileOp {
///     fn name(&self) -> &str {
///         match self {
///             Self::Push => "Push",
///             Self::Coin => "Coin",
///         }
///     }
/// }
///
/// assert_eq!(TurnstileOp::Coin.name(), "Coin");
/// ```
pub trait Operation: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the operation's name for diagnostics and logging.
    fn name(&self) -> &str;
}
