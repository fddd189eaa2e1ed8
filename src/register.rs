//! The per-core register bank.

use crate::cell::Cell;
use crate::config::REGISTER_BANK_SIZE;
use crate::error::{VmError, VmResult};
use crate::snapshot::RegisterBankSnapshot;

/// A fixed bank of cells addressed by register id.
#[derive(Clone)]
pub struct RegisterBank {
    arr: [Cell; REGISTER_BANK_SIZE],
}

impl RegisterBank {
    /// Creates a bank with every register zeroed.
    pub fn new() -> Self {
        Self {
            arr: [Cell::default(); REGISTER_BANK_SIZE],
        }
    }

    /// Reads register `id`, or [`VmError::IllegalRegisterId`] when the id
    /// is out of range.
    pub fn read(&self, id: usize) -> VmResult<Cell> {
        if id >= REGISTER_BANK_SIZE {
            return Err(VmError::IllegalRegisterId { id });
        }
        Ok(self.arr[id])
    }

    /// Writes register `id`, or [`VmError::IllegalRegisterId`] when the id
    /// is out of range.
    pub fn write(&mut self, id: usize, value: Cell) -> VmResult<()> {
        if id >= REGISTER_BANK_SIZE {
            return Err(VmError::IllegalRegisterId { id });
        }
        self.arr[id] = value;
        Ok(())
    }

    /// Zeroes every register.
    pub fn clear(&mut self) {
        self.arr = [Cell::default(); REGISTER_BANK_SIZE];
    }

    /// Copies the bank out for inspection.
    pub fn snapshot(&self) -> RegisterBankSnapshot {
        RegisterBankSnapshot {
            cells: self.arr.to_vec(),
        }
    }
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_round_trip() {
        let mut bank = RegisterBank::new();
        for id in 0..REGISTER_BANK_SIZE {
            bank.write(id, Cell::from(id as u32)).unwrap();
        }
        for id in 0..REGISTER_BANK_SIZE {
            assert_eq!(bank.read(id), Ok(Cell::from(id as u32)));
        }
    }

    #[test]
    fn test_out_of_range_id_is_rejected() {
        let mut bank = RegisterBank::new();
        assert_eq!(
            bank.read(REGISTER_BANK_SIZE),
            Err(VmError::IllegalRegisterId {
                id: REGISTER_BANK_SIZE
            })
        );
        assert_eq!(
            bank.write(REGISTER_BANK_SIZE, Cell::from(1u32)),
            Err(VmError::IllegalRegisterId {
                id: REGISTER_BANK_SIZE
            })
        );
    }

    #[test]
    fn test_clear_zeroes_every_slot() {
        let mut bank = RegisterBank::new();
        for id in 0..REGISTER_BANK_SIZE {
            bank.write(id, Cell::from(0xFFFF_FFFFu32)).unwrap();
        }
        bank.clear();
        for id in 0..REGISTER_BANK_SIZE {
            assert_eq!(bank.read(id), Ok(Cell::default()));
        }
    }

    #[test]
    fn test_snapshot_copies_all_registers() {
        let mut bank = RegisterBank::new();
        bank.write(3, Cell::from(42u32)).unwrap();
        let snapshot = bank.snapshot();
        assert_eq!(snapshot.cells.len(), REGISTER_BANK_SIZE);
        assert_eq!(snapshot.cells[3], Cell::from(42u32));
    }
}
