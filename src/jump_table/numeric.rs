//! Comparison, arithmetic, and bitwise handlers.
//!
//! The binary operations share one body: guard for two pops and one push,
//! pop right then left, compute under the core's operation mode, push the
//! result. The mode itself decays back to signed in the dispatch loop's
//! epilogue, so a preceding `UU` or `FF` colours exactly one of these.

use crate::cell::Cell;
use crate::engine::Vm;
use crate::error::VmResult;
use crate::jump_table::JumpTable;
use crate::mode::OpMode;
use crate::op_code::OpCode;

/// Registers the comparison, arithmetic, and bitwise handlers.
pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::EQ, equal);
    jump_table.register(OpCode::NE, not_equal);
    jump_table.register(OpCode::LT, less_than);
    jump_table.register(OpCode::GT, greater_than);
    jump_table.register(OpCode::AD, add);
    jump_table.register(OpCode::SU, subtract);
    jump_table.register(OpCode::MU, multiply);
    jump_table.register(OpCode::DM, divide_remainder);
    jump_table.register(OpCode::MD, multiply_divide_remainder);
    jump_table.register(OpCode::AN, and);
    jump_table.register(OpCode::OR, or);
    jump_table.register(OpCode::XO, xor);
    jump_table.register(OpCode::NT, not);
    jump_table.register(OpCode::SL, shift_left);
    jump_table.register(OpCode::SR, shift_right);
}

/// Pops right then left, computes `op`, and pushes the result.
fn binary_op(
    vm: &mut Vm,
    op: impl FnOnce(Cell, Cell, OpMode) -> VmResult<Cell>,
) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(2, 1)?;

    let right = core.data.pop();
    let left = core.data.pop();
    let result = op(left, right, core.op_mode)?;
    core.data.push(result);

    core.ip += 1;
    Ok(())
}

/// Implements the EQ operation.
fn equal(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, _| Ok(left.equal(right)))
}

/// Implements the NE operation.
fn not_equal(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, _| Ok(left.not_equal(right)))
}

/// Implements the LT operation.
fn less_than(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, mode| Ok(left.less_than(right, mode)))
}

/// Implements the GT operation.
fn greater_than(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, mode| Ok(left.greater_than(right, mode)))
}

/// Implements the AD operation.
fn add(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, mode| Ok(left.add(right, mode)))
}

/// Implements the SU operation.
fn subtract(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, mode| Ok(left.subtract(right, mode)))
}

/// Implements the MU operation.
fn multiply(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, mode| Ok(left.multiply(right, mode)))
}

/// Implements the DM operation.
fn divide_remainder(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(2, 2)?;

    let right = core.data.pop();
    let left = core.data.pop();
    let (modulo, quotient) = left.divide_remainder(right, core.op_mode)?;
    core.data.push(modulo);
    core.data.push(quotient);

    core.ip += 1;
    Ok(())
}

/// Implements the MD operation.
fn multiply_divide_remainder(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(3, 2)?;

    let right = core.data.pop();
    let mul = core.data.pop();
    let left = core.data.pop();
    let (modulo, quotient) = left.multiply_divide_remainder(mul, right, core.op_mode)?;
    core.data.push(modulo);
    core.data.push(quotient);

    core.ip += 1;
    Ok(())
}

/// Implements the AN operation.
fn and(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, _| Ok(left.bitwise_and(right)))
}

/// Implements the OR operation.
fn or(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, _| Ok(left.bitwise_or(right)))
}

/// Implements the XO operation.
fn xor(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, _| Ok(left.bitwise_xor(right)))
}

/// Implements the NT operation.
fn not(vm: &mut Vm) -> VmResult<()> {
    let core = vm.cur_core_mut();
    core.data.guard(1, 1)?;

    let value = core.data.pop();
    core.data.push(value.bitwise_not());

    core.ip += 1;
    Ok(())
}

/// Implements the SL operation.
fn shift_left(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, mode| left.shift_left(right, mode))
}

/// Implements the SR operation.
fn shift_right(vm: &mut Vm) -> VmResult<()> {
    binary_op(vm, |left, right, mode| left.shift_right(right, mode))
}
