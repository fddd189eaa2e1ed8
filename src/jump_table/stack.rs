//! Load, store, and stack-manipulation handlers.

use crate::cell::Cell;
use crate::engine::Vm;
use crate::error::VmResult;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;

/// Registers the load, store, and stack-manipulation handlers.
pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::LW, load_word);
    jump_table.register(OpCode::LH, load_half);
    jump_table.register(OpCode::LB, load_byte);
    jump_table.register(OpCode::FW, fetch_word);
    jump_table.register(OpCode::FH, fetch_half);
    jump_table.register(OpCode::FB, fetch_byte);
    jump_table.register(OpCode::SW, store_word);
    jump_table.register(OpCode::SH, store_half);
    jump_table.register(OpCode::SB, store_byte);
    jump_table.register(OpCode::DU, dup);
    jump_table.register(OpCode::DR, drop_top);
    jump_table.register(OpCode::SP, swap);
    jump_table.register(OpCode::PU, push_address);
    jump_table.register(OpCode::PO, pop_address);
    jump_table.register(OpCode::PA, pack_bytes);
    jump_table.register(OpCode::UN, unpack_bytes);
}

/// Pushes the `N`-byte immediate at `ip + imm_offset` and advances the
/// instruction pointer by the encoded length.
fn load<const N: usize>(vm: &mut Vm, imm_offset: u32, len: u32) -> VmResult<()> {
    let (core, mem) = vm.core_and_memory();
    core.data.guard(0, 1)?;

    let addr = core.ip as usize + imm_offset as usize;
    let cell = mem.read_bytes::<N>(addr)?;
    core.data.push(cell);

    core.ip += len;
    Ok(())
}

/// Implements the LW operation.
fn load_word(vm: &mut Vm) -> VmResult<()> {
    load::<4>(vm, 4, 8)
}

/// Implements the LH operation.
fn load_half(vm: &mut Vm) -> VmResult<()> {
    load::<2>(vm, 1, 3)
}

/// Implements the LB operation.
fn load_byte(vm: &mut Vm) -> VmResult<()> {
    load::<1>(vm, 1, 2)
}

/// Pops an address and pushes the `N`-byte value stored there.
fn fetch<const N: usize>(vm: &mut Vm) -> VmResult<()> {
    let (core, mem) = vm.core_and_memory();
    core.data.guard(1, 1)?;

    let addr = core.data.pop().to_size();
    let cell = mem.read_bytes::<N>(addr)?;
    core.data.push(cell);

    core.ip += 1;
    Ok(())
}

/// Implements the FW operation.
fn fetch_word(vm: &mut Vm) -> VmResult<()> {
    fetch::<4>(vm)
}

/// Implements the FH operation.
fn fetch_half(vm: &mut Vm) -> VmResult<()> {
    fetch::<2>(vm)
}

/// Implements the FB operation.
fn fetch_byte(vm: &mut Vm) -> VmResult<()> {
    fetch::<1>(vm)
}

/// Pops an address and a value and stores the value's low `N` bytes there.
fn store<const N: usize>(vm: &mut Vm) -> VmResult<()> {
    let (core, mem) = vm.core_and_memory();
    core.data.guard(2, 0)?;

    let addr = core.data.pop().to_size();
    let value = core.data.pop();
    mem.write_bytes::<N>(addr, value)?;

    core.ip += 1;
    Ok(())
}

/// Implements the SW operation.
fn store_word(vm: &mut Vm) -> VmResult<()> {
    store::<4>(vm)
}

/// Implements the SH operation.
fn store_half(vm: &mut Vm) -> VmResult<()> {
    store::<2>(vm)
}

/// Implements the SB operation.
fn store_byte(vm: &mut Vm) -> VmResult<()> {
    store::<1>(vm)
}

/// Implements the DU operation.
fn dup(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 2)?;

    let value = core.data.pop();
    core.data.push(value);
    core.data.push(value);

    core.ip += 1;
    Ok(())
}

/// Implements the DR operation.
fn drop_top(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 0)?;

    core.data.pop();

    core.ip += 1;
    Ok(())
}

/// Implements the SP operation.
fn swap(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(2, 2)?;

    let right = core.data.pop();
    let left = core.data.pop();
    core.data.push(right);
    core.data.push(left);

    core.ip += 1;
    Ok(())
}

/// Implements the PU operation.
fn push_address(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 0)?;

    let addr = core.data.pop();
    core.addrs.push(addr)?;

    core.ip += 1;
    Ok(())
}

/// Implements the PO operation.
fn pop_address(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(0, 1)?;

    let addr = core.addrs.pop()?;
    core.data.push(addr);

    core.ip += 1;
    Ok(())
}

/// Implements the PA operation.
fn pack_bytes(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(4, 1)?;

    let d = core.data.pop();
    let c = core.data.pop();
    let b = core.data.pop();
    let a = core.data.pop();
    core.data.push(Cell::from_parts(
        d.to_byte(),
        c.to_byte(),
        b.to_byte(),
        a.to_byte(),
    ));

    core.ip += 1;
    Ok(())
}

/// Implements the UN operation.
fn unpack_bytes(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 4)?;

    let bytes = core.data.pop().to_bytes();
    core.data.push(Cell::from(bytes[3] as u32));
    core.data.push(Cell::from(bytes[2] as u32));
    core.data.push(Cell::from(bytes[1] as u32));
    core.data.push(Cell::from(bytes[0] as u32));

    core.ip += 1;
    Ok(())
}
