//! The interrupt vector table.
//!
//! Maps interrupt ids to handler addresses. Entries default to the zero
//! cell; triggering an unset interrupt would vector to address 0, which is
//! a program-defined location like any other.

use crate::cell::Cell;
use crate::config::INTERRUPT_TABLE_SIZE;
use crate::error::{VmError, VmResult};
use crate::snapshot::InterruptTableSnapshot;

/// Interrupt id to handler-address mapping.
#[derive(Clone)]
pub struct InterruptTable {
    arr: [Cell; INTERRUPT_TABLE_SIZE],
}

impl InterruptTable {
    /// Creates a table with every handler address zeroed.
    pub fn new() -> Self {
        Self {
            arr: [Cell::default(); INTERRUPT_TABLE_SIZE],
        }
    }

    /// Returns the handler address for interrupt `id`.
    pub fn get(&self, id: usize) -> VmResult<Cell> {
        if id >= INTERRUPT_TABLE_SIZE {
            return Err(VmError::IllegalInterruptId { id });
        }
        Ok(self.arr[id])
    }

    /// Sets the handler address for interrupt `id`.
    pub fn set(&mut self, id: usize, addr: Cell) -> VmResult<()> {
        if id >= INTERRUPT_TABLE_SIZE {
            return Err(VmError::IllegalInterruptId { id });
        }
        self.arr[id] = addr;
        Ok(())
    }

    /// Zeroes every handler address.
    pub fn clear(&mut self) {
        self.arr = [Cell::default(); INTERRUPT_TABLE_SIZE];
    }

    /// Copies the handler address array out for inspection.
    pub fn snapshot(&self) -> InterruptTableSnapshot {
        InterruptTableSnapshot {
            handlers: self.arr.to_vec(),
        }
    }
}

impl Default for InterruptTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_round_trip() {
        let mut table = InterruptTable::new();
        table.set(7, Cell::from(0x1234u32)).unwrap();
        assert_eq!(table.get(7), Ok(Cell::from(0x1234u32)));
        assert_eq!(table.get(8), Ok(Cell::default()));
    }

    #[test]
    fn test_out_of_range_id_is_rejected() {
        let mut table = InterruptTable::new();
        assert_eq!(
            table.get(INTERRUPT_TABLE_SIZE),
            Err(VmError::IllegalInterruptId {
                id: INTERRUPT_TABLE_SIZE
            })
        );
        assert_eq!(
            table.set(INTERRUPT_TABLE_SIZE, Cell::default()),
            Err(VmError::IllegalInterruptId {
                id: INTERRUPT_TABLE_SIZE
            })
        );
    }

    #[test]
    fn test_clear_and_snapshot() {
        let mut table = InterruptTable::new();
        table.set(0, Cell::from(1u32)).unwrap();
        table.set(INTERRUPT_TABLE_SIZE - 1, Cell::from(2u32)).unwrap();

        let snapshot = table.snapshot();
        assert_eq!(snapshot.handlers.len(), INTERRUPT_TABLE_SIZE);
        assert_eq!(snapshot.handlers[0], Cell::from(1u32));

        table.clear();
        assert_eq!(table.get(0), Ok(Cell::default()));
    }
}
