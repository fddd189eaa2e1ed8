//! An embeddable multi-core stack-machine bytecode VM.
//!
//! The machine loads a flat little-endian program image and executes a
//! compact 55-opcode instruction set across cooperative virtual cores. Its
//! uniform value is the 4-byte [`Cell`], reinterpreted on demand as signed,
//! unsigned, or float by the per-core operation mode. Each core carries a
//! guarded operand stack, a checked return-address stack, and a private
//! register bank; memory, the interrupt table, and the host I/O callbacks
//! are shared.
//!
//! Execution is single-threaded and fully deterministic: the scheduler
//! rotates one instruction per active core per tick, and the first
//! non-success status ends the run. Hosts inspect the machine through
//! owned [`VmSnapshot`] copies and exchange bytes through a reserved
//! memory I/O window plus callback slots invoked by the `II` instruction.

pub mod cell;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod interop;
pub mod interrupt;
pub mod jump_table;
pub mod memory;
pub mod mode;
pub mod op_code;
pub mod register;
pub mod snapshot;
pub mod stack;

pub use cell::Cell;
pub use engine::Vm;
pub use error::{VmError, VmResult};
pub use interop::{IoCallback, IoTable};
pub use interrupt::InterruptTable;
pub use jump_table::{InstructionHandler, JumpTable};
pub use memory::Memory;
pub use mode::{AddressMode, OpMode};
pub use op_code::{OpCode, OP_CODE_COUNT};
pub use register::RegisterBank;
pub use self::core::Core;
pub use snapshot::{
    AddressStackSnapshot, CoreSnapshot, DataStackSnapshot, InterruptTableSnapshot,
    IoTableSnapshot, MemorySnapshot, RegisterBankSnapshot, VmSnapshot,
};
pub use stack::{AddressStack, DataStack};
