//! Build-time size configuration of the virtual machine.
//!
//! These are design constants, baked per build. Changing one changes the
//! machine; nothing here is read from the environment at runtime.

/// Capacity of the per-core data stack, in cells.
pub const DATA_STACK_SIZE: usize = 32;

/// Capacity of the per-core address stack, in cells.
pub const ADDRESS_STACK_SIZE: usize = 128;

/// Number of registers in the per-core register bank.
pub const REGISTER_BANK_SIZE: usize = 24;

/// Size of the shared memory image, in bytes.
pub const MEMORY_SIZE: usize = 65_535;

/// Number of entries in the interrupt table.
pub const INTERRUPT_TABLE_SIZE: usize = 128;

/// Number of host callback slots in the I/O table.
pub const IO_TABLE_SIZE: usize = 16;

/// First memory address of the host I/O window (inclusive).
pub const IO_MEMORY_ADDRESS_BEGIN: usize = 0;

/// Last memory address of the host I/O window (exclusive).
pub const IO_MEMORY_ADDRESS_END: usize = 192;

/// Number of virtual cores.
pub const CORE_COUNT: usize = 2;
