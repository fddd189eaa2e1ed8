//! Instruction dispatch for the virtual machine.
//!
//! A [`JumpTable`] maps every opcode to its handler function. The handlers
//! live in category modules and are installed through each module's
//! `register_handlers`; the engine dispatches by indexing the table with
//! the fetched opcode.
//!
//! Handler contract: guard the data stack first with the exact pop/push
//! counts, perform the mutations, then advance the instruction pointer by
//! the encoded length (or jump). Control-flow handlers reset the address
//! mode; the operation-mode reset is the dispatch loop's shared epilogue.

pub mod control;
pub mod numeric;
pub mod stack;
pub mod system;

use crate::engine::Vm;
use crate::error::{VmError, VmResult};
use crate::op_code::{OpCode, OP_CODE_COUNT};

/// A function that executes one instruction against the engine.
pub type InstructionHandler = fn(&mut Vm) -> VmResult<()>;

/// The opcode-indexed table of instruction handlers.
pub struct JumpTable {
    handlers: [InstructionHandler; OP_CODE_COUNT],
}

impl JumpTable {
    /// Creates a table with every defined opcode bound to its handler.
    pub fn new() -> Self {
        let mut table = Self {
            handlers: [unbound; OP_CODE_COUNT],
        };
        stack::register_handlers(&mut table);
        numeric::register_handlers(&mut table);
        control::register_handlers(&mut table);
        system::register_handlers(&mut table);
        table
    }

    /// Binds `handler` to `op`, replacing the previous binding.
    pub fn register(&mut self, op: OpCode, handler: InstructionHandler) {
        self.handlers[op as usize] = handler;
    }

    /// Returns the handler bound to `op`.
    pub fn handler(&self, op: OpCode) -> InstructionHandler {
        self.handlers[op as usize]
    }
}

impl Default for JumpTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Construction placeholder; every defined opcode is registered over it.
fn unbound(_vm: &mut Vm) -> VmResult<()> {
    Err(VmError::SystemHalt)
}
