//! The shared byte-addressed memory image.
//!
//! All cores read and write the same image. Typed access moves 1, 2, or 4
//! little-endian bytes between memory and a [`Cell`]; narrower reads
//! zero-extend and narrower writes leave the high bytes of memory alone.
//! Opcode fetches past the end of the image report [`VmError::SystemHalt`],
//! which is how a program that runs off its last instruction terminates
//! cleanly.

use tracing::debug;

use crate::cell::Cell;
use crate::config::{IO_MEMORY_ADDRESS_BEGIN, IO_MEMORY_ADDRESS_END, MEMORY_SIZE};
use crate::error::{VmError, VmResult};
use crate::snapshot::MemorySnapshot;

/// The memory image, zero-initialised.
#[derive(Clone)]
pub struct Memory {
    arr: Vec<u8>,
}

impl Memory {
    /// Creates a zeroed memory image.
    pub fn new() -> Self {
        Self {
            arr: vec![0; MEMORY_SIZE],
        }
    }

    /// Fetches the opcode byte at `addr`.
    ///
    /// Returns [`VmError::SystemHalt`] when `addr` is past the image; an
    /// instruction pointer overrunning the image is the primary normal
    /// termination mechanism.
    pub fn fetch_opcode(&self, addr: usize) -> VmResult<u8> {
        if addr >= MEMORY_SIZE {
            return Err(VmError::SystemHalt);
        }
        Ok(self.arr[addr])
    }

    /// Reads `N` bytes at `addr` into a cell, zero-extending the high
    /// bytes when `N < 4`.
    pub fn read_bytes<const N: usize>(&self, addr: usize) -> VmResult<Cell> {
        if addr + N > MEMORY_SIZE {
            return Err(VmError::IllegalMemoryAddress { addr });
        }
        let mut bytes = [0u8; 4];
        bytes[..N].copy_from_slice(&self.arr[addr..addr + N]);
        Ok(Cell::from(bytes))
    }

    /// Writes the low `N` bytes of `value` to `addr`; the remaining cell
    /// bytes are not written.
    pub fn write_bytes<const N: usize>(&mut self, addr: usize, value: Cell) -> VmResult<()> {
        if addr + N > MEMORY_SIZE {
            return Err(VmError::IllegalMemoryAddress { addr });
        }
        self.arr[addr..addr + N].copy_from_slice(&value.to_bytes()[..N]);
        Ok(())
    }

    /// Compares `len` bytes at `dst` against `len` bytes at `orig`.
    ///
    /// The result is a boolean cell: true iff the ranges are byte-equal.
    pub fn compare_block(&self, len: usize, dst: usize, orig: usize) -> VmResult<Cell> {
        if dst + len > MEMORY_SIZE {
            return Err(VmError::IllegalMemoryAddress { addr: dst });
        }
        if orig + len > MEMORY_SIZE {
            return Err(VmError::IllegalMemoryAddress { addr: orig });
        }
        Ok(Cell::from(self.arr[dst..dst + len] == self.arr[orig..orig + len]))
    }

    /// Copies `len` bytes from `orig` to `dst`. Overlapping ranges are
    /// handled as a single move.
    pub fn copy_block(&mut self, len: usize, dst: usize, orig: usize) -> VmResult<()> {
        if dst + len > MEMORY_SIZE {
            return Err(VmError::IllegalMemoryAddress { addr: dst });
        }
        if orig + len > MEMORY_SIZE {
            return Err(VmError::IllegalMemoryAddress { addr: orig });
        }
        self.arr.copy_within(orig..orig + len, dst);
        Ok(())
    }

    /// Copies a program image to address 0.
    pub fn load_program(&mut self, prg: &[u8]) -> VmResult<()> {
        if prg.len() > MEMORY_SIZE {
            return Err(VmError::IllegalMemoryAddress { addr: prg.len() });
        }
        self.arr[..prg.len()].copy_from_slice(prg);
        debug!(len = prg.len(), "program loaded");
        Ok(())
    }

    /// Writes a byte through the host I/O window.
    ///
    /// Addresses outside `[IO_MEMORY_ADDRESS_BEGIN, IO_MEMORY_ADDRESS_END)`
    /// are rejected with [`VmError::IllegalMemoryAddress`].
    pub fn write_io_byte(&mut self, addr: usize, byte: u8) -> VmResult<()> {
        if !(IO_MEMORY_ADDRESS_BEGIN..IO_MEMORY_ADDRESS_END).contains(&addr) {
            return Err(VmError::IllegalMemoryAddress { addr });
        }
        self.arr[addr] = byte;
        Ok(())
    }

    /// Reads a byte through the host I/O window.
    pub fn read_io_byte(&self, addr: usize) -> VmResult<u8> {
        if !(IO_MEMORY_ADDRESS_BEGIN..IO_MEMORY_ADDRESS_END).contains(&addr) {
            return Err(VmError::IllegalMemoryAddress { addr });
        }
        Ok(self.arr[addr])
    }

    /// Zeroes the whole image.
    pub fn clear(&mut self) {
        self.arr.fill(0);
    }

    /// Copies the whole image out for inspection.
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            bytes: self.arr.clone(),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_zeroed() {
        let mem = Memory::new();
        assert_eq!(mem.fetch_opcode(0), Ok(0));
        assert_eq!(mem.read_bytes::<4>(MEMORY_SIZE - 4), Ok(Cell::default()));
    }

    #[test]
    fn test_fetch_opcode_past_image_halts() {
        let mem = Memory::new();
        assert_eq!(mem.fetch_opcode(MEMORY_SIZE), Err(VmError::SystemHalt));
    }

    #[test]
    fn test_word_round_trip() {
        let mut mem = Memory::new();
        mem.write_bytes::<4>(100, Cell::from(0xAABBCCDDu32)).unwrap();
        assert_eq!(mem.read_bytes::<4>(100), Ok(Cell::from(0xAABBCCDDu32)));
    }

    #[test]
    fn test_narrow_writes_leave_high_bytes() {
        let mut mem = Memory::new();
        mem.write_bytes::<4>(10, Cell::from(0xFFFF_FFFFu32)).unwrap();
        mem.write_bytes::<1>(10, Cell::from(0xAABB_CC11u32)).unwrap();
        // Only the low byte of the cell lands; bytes 11..14 keep 0xFF.
        assert_eq!(mem.read_bytes::<4>(10), Ok(Cell::from(0xFFFF_FF11u32)));
    }

    #[test]
    fn test_narrow_reads_zero_extend() {
        let mut mem = Memory::new();
        mem.write_bytes::<2>(20, Cell::from(0xAABB_CCDDu32)).unwrap();
        assert_eq!(mem.read_bytes::<2>(20), Ok(Cell::from(0x0000_CCDDu32)));
        assert_eq!(mem.read_bytes::<1>(20), Ok(Cell::from(0x0000_00DDu32)));
    }

    #[test]
    fn test_out_of_range_access_is_rejected() {
        let mut mem = Memory::new();
        assert!(matches!(
            mem.read_bytes::<4>(MEMORY_SIZE - 3),
            Err(VmError::IllegalMemoryAddress { .. })
        ));
        assert!(matches!(
            mem.write_bytes::<2>(MEMORY_SIZE - 1, Cell::default()),
            Err(VmError::IllegalMemoryAddress { .. })
        ));
    }

    #[test]
    fn test_compare_block() {
        let mut mem = Memory::new();
        mem.write_bytes::<4>(0, Cell::from(0x01020304u32)).unwrap();
        mem.write_bytes::<4>(8, Cell::from(0x01020304u32)).unwrap();
        assert!(mem.compare_block(4, 0, 8).unwrap().to_bool());

        mem.write_bytes::<1>(8, Cell::from(0xFFu32)).unwrap();
        assert!(!mem.compare_block(4, 0, 8).unwrap().to_bool());
    }

    #[test]
    fn test_copy_block_handles_overlap() {
        let mut mem = Memory::new();
        for (i, b) in [1u8, 2, 3, 4].iter().enumerate() {
            mem.write_bytes::<1>(200 + i, Cell::from(*b as u32)).unwrap();
        }
        mem.copy_block(4, 202, 200).unwrap();
        assert_eq!(mem.read_bytes::<4>(202).unwrap().to_bytes(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_load_program() {
        let mut mem = Memory::new();
        mem.load_program(&[0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(mem.fetch_opcode(0), Ok(0xAA));
        assert_eq!(mem.fetch_opcode(2), Ok(0xCC));
        assert_eq!(mem.fetch_opcode(3), Ok(0));

        let too_big = vec![0u8; MEMORY_SIZE + 1];
        assert!(mem.load_program(&too_big).is_err());
    }

    #[test]
    fn test_io_window_bounds() {
        let mut mem = Memory::new();
        mem.write_io_byte(0, 0x55).unwrap();
        assert_eq!(mem.read_io_byte(0), Ok(0x55));
        mem.write_io_byte(IO_MEMORY_ADDRESS_END - 1, 0x66).unwrap();
        assert_eq!(mem.read_io_byte(IO_MEMORY_ADDRESS_END - 1), Ok(0x66));

        assert!(matches!(
            mem.write_io_byte(IO_MEMORY_ADDRESS_END, 0),
            Err(VmError::IllegalMemoryAddress { .. })
        ));
        assert!(matches!(
            mem.read_io_byte(IO_MEMORY_ADDRESS_END),
            Err(VmError::IllegalMemoryAddress { .. })
        ));
    }

    #[test]
    fn test_clear_and_snapshot() {
        let mut mem = Memory::new();
        mem.write_bytes::<4>(0, Cell::from(0xDEADBEEFu32)).unwrap();
        let snapshot = mem.snapshot();
        assert_eq!(snapshot.bytes.len(), MEMORY_SIZE);
        assert_eq!(&snapshot.bytes[..4], &[0xEF, 0xBE, 0xAD, 0xDE]);

        mem.clear();
        assert_eq!(mem.read_bytes::<4>(0), Ok(Cell::default()));
    }
}
