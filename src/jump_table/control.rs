//! Addressing-mode, call, jump, return, and halt handlers.
//!
//! Control-flow targets are popped from the data stack and interpreted
//! under the core's address mode: absolute when direct, added to the
//! instruction's own address when relative. Every handler here that
//! consumes a target (and the returns, which share the discipline) resets
//! the address mode to direct on the way out.
//!
//! Calls push `ip + 4` as the return address: one byte for the call opcode
//! plus the three-byte inline slot a word-immediate encoding reserves.

use crate::cell::Cell;
use crate::core::Core;
use crate::engine::Vm;
use crate::error::{VmError, VmResult};
use crate::jump_table::JumpTable;
use crate::mode::AddressMode;
use crate::op_code::OpCode;

/// Registers the control-flow handlers.
pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::NO, nop);
    jump_table.register(OpCode::RL, relative);
    jump_table.register(OpCode::CA, call);
    jump_table.register(OpCode::CC, conditional_call);
    jump_table.register(OpCode::JU, jump);
    jump_table.register(OpCode::CJ, conditional_jump);
    jump_table.register(OpCode::RE, return_from_call);
    jump_table.register(OpCode::CR, conditional_return);
    jump_table.register(OpCode::HS, halt_system);
}

/// Resolves `target` against the core's address mode. The instruction
/// pointer still holds the control-flow instruction's own address.
fn resolve_target(core: &Core, target: Cell) -> u32 {
    match core.addr_mode {
        AddressMode::Direct => target.to_u32(),
        AddressMode::Relative => target.to_u32().wrapping_add(core.ip),
    }
}

/// Implements the NO operation.
fn nop(vm: &mut Vm) -> VmResult<()> {
    vm.cur_core_mut().ip += 1;
    Ok(())
}

/// Implements the RL operation.
fn relative(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.addr_mode = AddressMode::Relative;
    core.ip += 1;
    Ok(())
}

/// Implements the CA operation.
fn call(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 0)?;

    core.addrs.push(Cell::from(core.ip.wrapping_add(4)))?;
    let target = core.data.pop();
    core.ip = resolve_target(core, target);

    core.addr_mode = AddressMode::Direct;
    Ok(())
}

/// Implements the CC operation.
fn conditional_call(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(2, 0)?;

    let target = core.data.pop();
    let cond = core.data.pop();
    if cond.to_bool() {
        core.addrs.push(Cell::from(core.ip.wrapping_add(4)))?;
        core.ip = resolve_target(core, target);
    } else {
        core.ip += 1;
    }

    core.addr_mode = AddressMode::Direct;
    Ok(())
}

/// Implements the JU operation.
fn jump(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 0)?;

    let target = core.data.pop();
    core.ip = resolve_target(core, target);

    core.addr_mode = AddressMode::Direct;
    Ok(())
}

/// Implements the CJ operation.
fn conditional_jump(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(2, 0)?;

    let target = core.data.pop();
    let cond = core.data.pop();
    if cond.to_bool() {
        core.ip = resolve_target(core, target);
    } else {
        core.ip += 4;
    }

    core.addr_mode = AddressMode::Direct;
    Ok(())
}

/// Implements the RE operation.
fn return_from_call(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();

    let ret = core.addrs.pop()?;
    core.ip = ret.to_u32();

    core.addr_mode = AddressMode::Direct;
    Ok(())
}

/// Implements the CR operation.
fn conditional_return(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 0)?;

    let cond = core.data.pop();
    if cond.to_bool() {
        let ret = core.addrs.pop()?;
        core.ip = ret.to_u32();
    } else {
        core.ip += 4;
    }

    core.addr_mode = AddressMode::Direct;
    Ok(())
}

/// Implements the HS operation. The instruction pointer is left in place.
fn halt_system(_vm: &mut Vm) -> VmResult<()> {
    Err(VmError::SystemHalt)
}
