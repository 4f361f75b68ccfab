//! Live machine instances and the dispatch routine.

use crate::core::{DispatchLog, DispatchRecord, Operation, StateHandle};
use crate::machine::transition::{DispatchError, TransitionTable};
use chrono::Utc;
use parking_lot::Mutex;
use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static IN_FLIGHT: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// RAII marker for a dispatch in progress on this thread.
///
/// Registered after the instance lock is taken, checked before it is
/// taken: same-thread re-entry from inside a handler fails fast instead
/// of deadlocking, while other threads still block and serialize.
struct DispatchGuard {
    instance: u64,
}

impl DispatchGuard {
    fn held(instance: u64) -> bool {
        IN_FLIGHT.with(|set| set.borrow().contains(&instance))
    }

    fn enter(instance: u64) -> Self {
        IN_FLIGHT.with(|set| set.borrow_mut().push(instance));
        Self { instance }
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        IN_FLIGHT.with(|set| {
            let mut set = set.borrow_mut();
            if let Some(at) = set.iter().rposition(|id| *id == self.instance) {
                set.remove(at);
            }
        });
    }
}

struct Cell<C, D> {
    state: u32,
    controller: C,
    devices: D,
    log: DispatchLog,
}

/// A live machine instance.
///
/// Holds the current state, the controller, and the device bundle behind
/// one mutex; [`dispatch`](Self::dispatch) is the only mutator. Instances
/// spawned from one factory share the frozen transition table and nothing
/// else.
pub struct TypeMachine<Op: Operation, C, D, I, R, E> {
    table: Arc<TransitionTable<Op, C, D, I, R, E>>,
    instance: u64,
    cell: Mutex<Cell<C, D>>,
}

impl<Op, C, D, I, R, E> TypeMachine<Op, C, D, I, R, E>
where
    Op: Operation,
    C: Clone + Send + Sync + 'static,
    D: Clone + Send + Sync + 'static,
    I: 'static,
    R: 'static,
    E: 'static,
{
    pub(crate) fn new(
        table: Arc<TransitionTable<Op, C, D, I, R, E>>,
        controller: C,
        devices: D,
    ) -> Self {
        let state = table.initial;
        Self {
            table,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            cell: Mutex::new(Cell {
                state,
                controller,
                devices,
                log: DispatchLog::new(),
            }),
        }
    }

    /// Dispatch `operation` with `input` through the transition table.
    ///
    /// Looks up the current (state, operation) pair and runs the bound
    /// handler against a working copy of the controller and device bundle.
    /// The copy and the state change commit together, only if the handler
    /// returns `Ok`; a failed or panicking handler leaves the instance
    /// exactly as it was, and the handler's error is passed back
    /// untranslated.
    ///
    /// An undeclared pair yields [`DispatchError::NoTransition`]. A
    /// handler calling back into the same instance yields
    /// [`DispatchError::ReentrantDispatch`] for the nested call.
    pub fn dispatch(&self, operation: Op, input: I) -> Result<R, DispatchError<E>> {
        if DispatchGuard::held(self.instance) {
            return Err(DispatchError::ReentrantDispatch {
                operation: operation.name().to_string(),
            });
        }
        let mut cell = self.cell.lock();
        let _guard = DispatchGuard::enter(self.instance);

        let key = (cell.state, operation);
        let Some(entry) = self.table.entries.get(&key) else {
            let state = self.table.state_name(cell.state).to_string();
            let operation = key.1.name().to_string();
            debug!(%state, %operation, "no transition registered");
            return Err(DispatchError::NoTransition { state, operation });
        };

        let mut controller = cell.controller.clone();
        let mut devices = cell.devices.clone();
        let value =
            (entry.handler)(&mut controller, &mut devices, input).map_err(DispatchError::Handler)?;

        let record = DispatchRecord {
            from: self.table.state_name(cell.state).to_string(),
            operation: key.1.name().to_string(),
            to: self.table.state_name(entry.target).to_string(),
            timestamp: Utc::now(),
        };
        trace!(from = %record.from, operation = %record.operation, to = %record.to, "transition committed");
        let log = cell.log.record(record);
        cell.controller = controller;
        cell.devices = devices;
        cell.log = log;
        cell.state = entry.target;
        Ok(value)
    }

    /// Handle of the state the instance is currently in.
    pub fn current_state(&self) -> StateHandle {
        StateHandle {
            definition: self.table.definition,
            index: self.cell.lock().state,
        }
    }

    /// Name of the current state.
    pub fn state_name(&self) -> String {
        self.table.state_name(self.cell.lock().state).to_string()
    }

    /// Snapshot of the dispatches committed so far.
    pub fn log(&self) -> DispatchLog {
        self.cell.lock().log.clone()
    }
}
