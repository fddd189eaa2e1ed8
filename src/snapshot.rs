//! Immutable inspection snapshots.
//!
//! Every component exports an owned, value-only copy of its state; nothing
//! here borrows engine internals. The types serialize so hosts can ship a
//! machine state across a process boundary or into a log.

use serde::Serialize;

use crate::cell::Cell;
use crate::mode::{AddressMode, OpMode};

/// Copy of a data stack: the live cells in insertion order plus the top
/// count.
#[derive(Debug, Clone, Serialize)]
pub struct DataStackSnapshot {
    /// Live cells, bottom first.
    pub cells: Vec<Cell>,

    /// Number of live cells.
    pub top: usize,
}

/// Copy of an address stack.
#[derive(Debug, Clone, Serialize)]
pub struct AddressStackSnapshot {
    /// Live cells, bottom first.
    pub cells: Vec<Cell>,

    /// Number of live cells.
    pub top: usize,
}

/// Copy of a register bank.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterBankSnapshot {
    /// Every register, in id order.
    pub cells: Vec<Cell>,
}

/// Copy of the whole memory image.
#[derive(Debug, Clone, Serialize)]
pub struct MemorySnapshot {
    /// All memory bytes.
    pub bytes: Vec<u8>,
}

/// Copy of the interrupt table.
#[derive(Debug, Clone, Serialize)]
pub struct InterruptTableSnapshot {
    /// Handler address per interrupt id.
    pub handlers: Vec<Cell>,
}

/// Descriptions of the I/O table slots.
#[derive(Debug, Clone, Serialize)]
pub struct IoTableSnapshot {
    /// One description per slot; empty slots report a placeholder.
    pub descriptions: Vec<String>,
}

/// Copy of one core's state.
#[derive(Debug, Clone, Serialize)]
pub struct CoreSnapshot {
    /// The instruction pointer.
    pub ip: u32,

    /// Whether the scheduler may select this core.
    pub active: bool,

    /// The operation mode in effect.
    pub op_mode: OpMode,

    /// The address mode in effect.
    pub addr_mode: AddressMode,

    /// The operand stack.
    pub data: DataStackSnapshot,

    /// The return-address stack.
    pub addrs: AddressStackSnapshot,

    /// The register bank.
    pub regs: RegisterBankSnapshot,
}

/// Full machine state for host inspection.
#[derive(Debug, Clone, Serialize)]
pub struct VmSnapshot {
    /// The memory image.
    pub memory: MemorySnapshot,

    /// The interrupt table.
    pub interrupts: InterruptTableSnapshot,

    /// The I/O slot descriptions.
    pub io: IoTableSnapshot,

    /// Every core, in id order.
    pub cores: Vec<CoreSnapshot>,

    /// The core the scheduler ran last.
    pub cur_core: usize,

    /// Whether interrupts are enabled.
    pub int_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = DataStackSnapshot {
            cells: vec![Cell::from(1u32), Cell::from(2u32)],
            top: 2,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["top"], 2);
        assert_eq!(json["cells"].as_array().unwrap().len(), 2);
    }
}
