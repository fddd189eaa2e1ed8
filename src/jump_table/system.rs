//! Interrupt, I/O, core-management, register, memory-block, and
//! operation-mode handlers.

use crate::config::CORE_COUNT;
use crate::engine::Vm;
use crate::error::VmResult;
use crate::jump_table::JumpTable;
use crate::mode::OpMode;
use crate::op_code::OpCode;

/// Registers the system handlers.
pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::SV, set_interrupt);
    jump_table.register(OpCode::HI, halt_interrupts);
    jump_table.register(OpCode::SI, start_interrupts);
    jump_table.register(OpCode::TI, trigger_interrupt);
    jump_table.register(OpCode::II, invoke_io);
    jump_table.register(OpCode::IC, init_core);
    jump_table.register(OpCode::AC, activate_core);
    jump_table.register(OpCode::PC, pause_core);
    jump_table.register(OpCode::SC, suspend_current_core);
    jump_table.register(OpCode::RR, read_register);
    jump_table.register(OpCode::WR, write_register);
    jump_table.register(OpCode::CP, copy_block);
    jump_table.register(OpCode::BC, compare_block);
    jump_table.register(OpCode::UU, unsigned_mode);
    jump_table.register(OpCode::FF, float_mode);
}

/// Implements the SV operation.
fn set_interrupt(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(2, 0)?;

    let id = core.data.pop();
    let addr = core.data.pop();
    vm.interrupts.set(id.to_size(), addr)?;

    vm.cur_core_mut().ip += 1;
    Ok(())
}

/// Implements the HI operation.
fn halt_interrupts(vm: &mut Vm) -> VmResult<()> {
    vm.int_enabled = false;
    vm.cur_core_mut().ip += 1;
    Ok(())
}

/// Implements the SI operation.
fn start_interrupts(vm: &mut Vm) -> VmResult<()> {
    vm.int_enabled = true;
    vm.cur_core_mut().ip += 1;
    Ok(())
}

/// Implements the TI operation.
///
/// Reserved: the id is consumed but nothing is vectored yet.
fn trigger_interrupt(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 0)?;

    let _id = core.data.pop();
    if vm.int_enabled {
        // TODO: save the core state and vector through the interrupt table.
    }

    vm.cur_core_mut().ip += 1;
    Ok(())
}

/// Implements the II operation.
fn invoke_io(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 0)?;

    let id = core.data.pop().to_size();
    vm.io.call(id);

    vm.cur_core_mut().ip += 1;
    Ok(())
}

/// Implements the IC operation.
///
/// An out-of-range core id performs the pops and the advance but touches
/// no core.
fn init_core(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(2, 0)?;

    let id = core.data.pop().to_size();
    let addr = core.data.pop().to_u32();
    if id < CORE_COUNT {
        vm.cores[id].init(addr);
    }

    vm.cur_core_mut().ip += 1;
    Ok(())
}

/// Implements the AC operation.
fn activate_core(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 0)?;

    let id = core.data.pop().to_size();
    if id < CORE_COUNT {
        vm.cores[id].active = true;
    }

    vm.cur_core_mut().ip += 1;
    Ok(())
}

/// Implements the PC operation.
fn pause_core(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 0)?;

    let id = core.data.pop().to_size();
    if id < CORE_COUNT {
        vm.cores[id].active = false;
    }

    vm.cur_core_mut().ip += 1;
    Ok(())
}

/// Implements the SC operation.
fn suspend_current_core(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.active = false;
    core.ip += 1;
    Ok(())
}

/// Implements the RR operation.
fn read_register(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 1)?;

    let id = core.data.pop().to_size();
    let value = core.regs.read(id)?;
    core.data.push(value);

    core.ip += 1;
    Ok(())
}

/// Implements the WR operation.
fn write_register(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(2, 0)?;

    let id = core.data.pop().to_size();
    let value = core.data.pop();
    core.regs.write(id, value)?;

    core.ip += 1;
    Ok(())
}

/// Implements the CP operation.
fn copy_block(vm: &mut Vm) -> VmResult<()> {
    let (core, mem) = vm.core_and_memory();
    core.data.guard(3, 0)?;

    let len = core.data.pop().to_size();
    let dst = core.data.pop().to_size();
    let orig = core.data.pop().to_size();
    mem.copy_block(len, dst, orig)?;

    core.ip += 1;
    Ok(())
}

/// Implements the BC operation.
fn compare_block(vm: &mut Vm) -> VmResult<()> {
    let (core, mem) = vm.core_and_memory();
    core.data.guard(3, 1)?;

    let len = core.data.pop().to_size();
    let dst = core.data.pop().to_size();
    let orig = core.data.pop().to_size();
    let result = mem.compare_block(len, dst, orig)?;
    core.data.push(result);

    core.ip += 1;
    Ok(())
}

/// Implements the UU operation. The mode lasts for exactly the next
/// computing instruction.
fn unsigned_mode(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.op_mode = OpMode::Unsigned;
    core.ip += 1;
    Ok(())
}

/// Implements the FF operation. The mode lasts for exactly the next
/// computing instruction.
fn float_mode(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.op_mode = OpMode::Float;
    core.ip += 1;
    Ok(())
}
