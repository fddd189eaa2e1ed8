//! The host I/O bridge.
//!
//! Programs reach the host through the `II` instruction, which invokes one
//! of up to [`IO_TABLE_SIZE`](crate::config::IO_TABLE_SIZE) host-supplied
//! callback slots by index. The table is deliberately forgiving at the
//! boundary: an out-of-range id or an empty slot is a no-op, never a fault.

use tracing::trace;

use crate::config::IO_TABLE_SIZE;
use crate::snapshot::IoTableSnapshot;

/// A host callback reachable from the `II` instruction.
///
/// `run` performs the host-side effect; `description` labels the slot in
/// snapshots. Implementations exchange data with the program through the
/// memory I/O window rather than through arguments.
pub trait IoCallback {
    /// Performs the I/O operation.
    fn run(&mut self);

    /// A short human-readable label for snapshot display.
    fn description(&self) -> String;
}

/// The fixed array of host callback slots.
#[derive(Default)]
pub struct IoTable {
    slots: [Option<Box<dyn IoCallback>>; IO_TABLE_SIZE],
}

impl IoTable {
    /// Creates a table with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Creates a table from a full slot array.
    pub fn from_slots(slots: [Option<Box<dyn IoCallback>>; IO_TABLE_SIZE]) -> Self {
        Self { slots }
    }

    /// Installs `callback` in slot `id`, replacing any previous occupant.
    /// Out-of-range ids are ignored.
    pub fn register(&mut self, id: usize, callback: Box<dyn IoCallback>) {
        if id < IO_TABLE_SIZE {
            self.slots[id] = Some(callback);
        }
    }

    /// Invokes the callback in slot `id`. A no-op when the id is out of
    /// range or the slot is empty.
    pub fn call(&mut self, id: usize) {
        if id >= IO_TABLE_SIZE {
            return;
        }
        if let Some(callback) = self.slots[id].as_mut() {
            trace!(id, "io callback invoked");
            callback.run();
        }
    }

    /// One description per slot; empty slots report a placeholder.
    pub fn snapshot(&self) -> IoTableSnapshot {
        IoTableSnapshot {
            descriptions: self
                .slots
                .iter()
                .map(|slot| match slot {
                    Some(callback) => callback.description(),
                    None => "(empty)".to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CountingCallback {
        hits: Rc<RefCell<usize>>,
    }

    impl IoCallback for CountingCallback {
        fn run(&mut self) {
            *self.hits.borrow_mut() += 1;
        }

        fn description(&self) -> String {
            "counting".to_string()
        }
    }

    #[test]
    fn test_call_invokes_registered_slot() {
        let hits = Rc::new(RefCell::new(0));
        let mut table = IoTable::new();
        table.register(3, Box::new(CountingCallback { hits: hits.clone() }));

        table.call(3);
        table.call(3);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_call_is_noop_for_empty_or_out_of_range() {
        let mut table = IoTable::new();
        // Nothing to assert beyond "does not panic".
        table.call(0);
        table.call(IO_TABLE_SIZE);
        table.call(usize::MAX);
    }

    #[test]
    fn test_register_ignores_out_of_range_id() {
        let hits = Rc::new(RefCell::new(0));
        let mut table = IoTable::new();
        table.register(
            IO_TABLE_SIZE,
            Box::new(CountingCallback { hits: hits.clone() }),
        );
        table.call(IO_TABLE_SIZE);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_from_slots() {
        let hits = Rc::new(RefCell::new(0));
        let mut slots: [Option<Box<dyn IoCallback>>; IO_TABLE_SIZE] =
            std::array::from_fn(|_| None);
        slots[0] = Some(Box::new(CountingCallback { hits: hits.clone() }));

        let mut table = IoTable::from_slots(slots);
        table.call(0);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_snapshot_descriptions() {
        let hits = Rc::new(RefCell::new(0));
        let mut table = IoTable::new();
        table.register(1, Box::new(CountingCallback { hits }));

        let snapshot = table.snapshot();
        assert_eq!(snapshot.descriptions.len(), IO_TABLE_SIZE);
        assert_eq!(snapshot.descriptions[0], "(empty)");
        assert_eq!(snapshot.descriptions[1], "counting");
    }
}
