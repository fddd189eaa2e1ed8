//! Error types for the VM crate.
//!
//! Every fallible operation reports its outcome through [`VmResult`]; there
//! is no unwinding out of the interpreter hot path. [`VmError::SystemHalt`]
//! is the normal termination status, produced by the `HS` instruction and by
//! fetching an opcode past the end of the memory image.

use thiserror::Error;

/// Statuses that stop the current interpreting flow.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    /// The system halted normally.
    #[error("system halt")]
    SystemHalt,

    /// A division or remainder was attempted with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// A bitwise shift was attempted while the core was in float mode.
    #[error("invalid float operation")]
    InvalidFloatOperation,

    /// Reserved: not enough memory was available.
    #[error("out of memory")]
    OutOfMemory,

    /// Not enough free space on the data stack for the declared pushes.
    #[error("data stack overflow")]
    DataStackOverflow,

    /// Not enough elements on the data stack for the declared pops.
    #[error("data stack underflow")]
    DataStackUnderflow,

    /// The address stack is full.
    #[error("address stack overflow")]
    AddressStackOverflow,

    /// The address stack is empty.
    #[error("address stack underflow")]
    AddressStackUnderflow,

    /// A register id outside the register bank was used.
    #[error("illegal register id {id}")]
    IllegalRegisterId {
        /// The offending register id.
        id: usize,
    },

    /// A memory access escaped the legal address range.
    #[error("illegal memory address {addr:#06x}")]
    IllegalMemoryAddress {
        /// The first offending address of the access.
        addr: usize,
    },

    /// An interrupt id outside the interrupt table was used.
    #[error("illegal interrupt id {id}")]
    IllegalInterruptId {
        /// The offending interrupt id.
        id: usize,
    },
}

impl VmError {
    /// Returns `true` when this status is the normal termination path.
    pub fn is_halt(self) -> bool {
        matches!(self, VmError::SystemHalt)
    }

    /// Returns `true` when this status indicates a program-level fault
    /// rather than a clean halt.
    pub fn is_fault(self) -> bool {
        !self.is_halt()
    }
}

/// Result type for VM operations.
pub type VmResult<T> = std::result::Result<T, VmError>;
