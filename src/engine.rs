//! The execution engine.
//!
//! The engine owns every component: the shared memory image, the interrupt
//! table, the I/O table, and the virtual cores. Execution is cooperative
//! round-robin on a single thread: one instruction per core per tick, in
//! rotating order starting after the previously executed core. A core
//! yields implicitly after every instruction; there is no preemption.
//!
//! Given the same program and core activation pattern, execution is fully
//! reproducible.

use tracing::{debug, trace, warn};

use crate::config::CORE_COUNT;
use crate::core::Core;
use crate::error::{VmError, VmResult};
use crate::interop::IoTable;
use crate::interrupt::InterruptTable;
use crate::jump_table::JumpTable;
use crate::memory::Memory;
use crate::mode::OpMode;
use crate::op_code::OpCode;
use crate::snapshot::VmSnapshot;

/// The virtual machine.
pub struct Vm {
    pub(crate) mem: Memory,
    pub(crate) interrupts: InterruptTable,
    pub(crate) cores: [Core; CORE_COUNT],
    pub(crate) io: IoTable,
    pub(crate) cur_core: usize,
    pub(crate) int_enabled: bool,
    jump_table: JumpTable,
}

impl Vm {
    /// Creates a machine with an empty I/O table. Core 0 starts active;
    /// the other cores wait for `IC`/`AC`.
    pub fn new() -> Self {
        Self::with_io_table(IoTable::new())
    }

    /// Creates a machine with the given I/O table.
    pub fn with_io_table(io: IoTable) -> Self {
        let mut cores: [Core; CORE_COUNT] = std::array::from_fn(|_| Core::new());
        cores[0].active = true;
        Self {
            mem: Memory::new(),
            interrupts: InterruptTable::new(),
            cores,
            io,
            cur_core: 0,
            int_enabled: false,
            jump_table: JumpTable::new(),
        }
    }

    /// Copies a program image to address 0.
    pub fn load_program(&mut self, prg: &[u8]) -> VmResult<()> {
        self.mem.load_program(prg)
    }

    /// Host-side read of a byte in the memory I/O window.
    pub fn io_read_byte(&self, addr: usize) -> VmResult<u8> {
        self.mem.read_io_byte(addr)
    }

    /// Host-side write of a byte in the memory I/O window.
    pub fn io_write_byte(&mut self, addr: usize, byte: u8) -> VmResult<()> {
        self.mem.write_io_byte(addr, byte)
    }

    /// Executes until the program halts or faults and returns the terminal
    /// status. [`VmError::SystemHalt`] is the normal exit.
    pub fn execute(&mut self) -> VmError {
        // Start behind core 0 so the first scheduler tick selects it.
        self.cur_core = CORE_COUNT - 1;

        loop {
            self.sel_next_core();

            let ip = self.cores[self.cur_core].ip as usize;
            let byte = match self.mem.fetch_opcode(ip) {
                Ok(byte) => byte,
                Err(status) => return status,
            };
            let Some(op) = OpCode::from_byte(byte) else {
                // A byte past the instruction encoding terminates the same
                // way as running off the image.
                return VmError::SystemHalt;
            };
            trace!(core = self.cur_core, ip, op = op.mnemonic(), "dispatch");

            let handler = self.jump_table.handler(op);
            if let Err(status) = handler(self) {
                return status;
            }

            // The operation mode decays to signed after every instruction
            // except its setters.
            if !op.is_mode_setter() {
                self.cores[self.cur_core].op_mode = OpMode::Signed;
            }
        }
    }

    /// Executes until the program halts or faults, discarding the status.
    pub fn run(&mut self) {
        let status = self.execute();
        if status.is_halt() {
            debug!(%status, "execution finished");
        } else {
            warn!(%status, "execution faulted");
        }
    }

    /// Copies the full machine state out for inspection.
    pub fn snapshot(&self) -> VmSnapshot {
        VmSnapshot {
            memory: self.mem.snapshot(),
            interrupts: self.interrupts.snapshot(),
            io: self.io.snapshot(),
            cores: self.cores.iter().map(Core::snapshot).collect(),
            cur_core: self.cur_core,
            int_enabled: self.int_enabled,
        }
    }

    /// Advances `cur_core` to the next active core: a circular scan from
    /// `cur_core + 1` in which the first active core wins. The current
    /// core stays selected when it is the only active one; when no core is
    /// active the selection is unchanged.
    fn sel_next_core(&mut self) {
        for offset in 1..=CORE_COUNT {
            let next = (self.cur_core + offset) % CORE_COUNT;
            if self.cores[next].active {
                self.cur_core = next;
                return;
            }
        }
    }

    /// The core the scheduler selected for this tick.
    pub(crate) fn cur_core_mut(&mut self) -> &mut Core {
        &mut self.cores[self.cur_core]
    }

    /// The selected core and the memory image, borrowed together.
    pub(crate) fn core_and_memory(&mut self) -> (&mut Core, &mut Memory) {
        (&mut self.cores[self.cur_core], &mut self.mem)
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
