//! One virtual execution context.
//!
//! A core carries everything private to a strand of execution: the
//! instruction pointer, the activity flag the scheduler honours, both
//! transient modes, the two stacks, and the register bank. Memory, the
//! interrupt table, and the I/O table are shared across cores and live on
//! the engine.

use crate::mode::{AddressMode, OpMode};
use crate::register::RegisterBank;
use crate::snapshot::CoreSnapshot;
use crate::stack::{AddressStack, DataStack};

/// Per-core state.
#[derive(Clone, Default)]
pub struct Core {
    /// The instruction pointer.
    pub ip: u32,

    /// Whether the scheduler may select this core.
    pub active: bool,

    /// The operation mode in effect for the next computing instruction.
    pub op_mode: OpMode,

    /// The address mode in effect for the next control-flow instruction.
    pub addr_mode: AddressMode,

    /// The operand stack.
    pub data: DataStack,

    /// The subroutine return-address stack.
    pub addrs: AddressStack,

    /// The private register bank.
    pub regs: RegisterBank,
}

impl Core {
    /// Creates a core in its default state: ip 0, inactive, signed/direct,
    /// empty stacks, zeroed registers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the core to the default state with `ip` as its instruction
    /// pointer. The core is left inactive; activation is a separate step.
    pub fn init(&mut self, ip: u32) {
        self.ip = ip;
        self.active = false;
        self.op_mode = OpMode::Signed;
        self.addr_mode = AddressMode::Direct;
        self.data.clear();
        self.addrs.clear();
        self.regs.clear();
    }

    /// Copies the core state out for inspection.
    pub fn snapshot(&self) -> CoreSnapshot {
        CoreSnapshot {
            ip: self.ip,
            active: self.active,
            op_mode: self.op_mode,
            addr_mode: self.addr_mode,
            data: self.data.snapshot(),
            addrs: self.addrs.snapshot(),
            regs: self.regs.snapshot(),
        }
    }
}
