//! The uniform 32-bit value of the virtual machine.
//!
//! A [`Cell`] is four raw little-endian bytes; there is no variant tag. The
//! interpretation of those bytes is chosen on demand by the accessor or by
//! the [`OpMode`] passed to a mode-polymorphic operation, so the same cell
//! can be read as a signed integer one instruction and a float the next.

use std::fmt;

use serde::Serialize;

use crate::error::{VmError, VmResult};
use crate::mode::OpMode;

/// A 4-byte little-endian word, reinterpretable as `i32`, `u32`, `f32`,
/// `bool`, or raw bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cell([u8; 4]);

impl Cell {
    /// Builds a cell from its four bytes, least significant first.
    pub fn from_parts(b0: u8, b1: u8, b2: u8, b3: u8) -> Self {
        Cell([b0, b1, b2, b3])
    }

    /// The signed-integer view of the cell.
    pub fn to_i32(self) -> i32 {
        i32::from_le_bytes(self.0)
    }

    /// The unsigned-integer view of the cell.
    pub fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// The float view of the cell.
    pub fn to_f32(self) -> f32 {
        f32::from_le_bytes(self.0)
    }

    /// The cell as a memory address or element count.
    pub fn to_size(self) -> usize {
        self.to_u32() as usize
    }

    /// The boolean view: `true` iff every byte is `0xFF`.
    pub fn to_bool(self) -> bool {
        self.0.iter().all(|&b| b == 0xFF)
    }

    /// The low byte of the cell.
    pub fn to_byte(self) -> u8 {
        self.0[0]
    }

    /// The four raw bytes, least significant first.
    pub fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// Equality over the raw encoding; the result is a boolean cell.
    pub fn equal(self, rhs: Cell) -> Cell {
        Cell::from(self.to_u32() == rhs.to_u32())
    }

    /// Inequality over the raw encoding; the result is a boolean cell.
    pub fn not_equal(self, rhs: Cell) -> Cell {
        Cell::from(self.to_u32() != rhs.to_u32())
    }

    /// Ordered comparison under `op_mode`; the result is a boolean cell.
    pub fn less_than(self, rhs: Cell, op_mode: OpMode) -> Cell {
        match op_mode {
            OpMode::Signed => Cell::from(self.to_i32() < rhs.to_i32()),
            OpMode::Unsigned => Cell::from(self.to_u32() < rhs.to_u32()),
            OpMode::Float => Cell::from(self.to_f32() < rhs.to_f32()),
        }
    }

    /// Ordered comparison under `op_mode`; the result is a boolean cell.
    pub fn greater_than(self, rhs: Cell, op_mode: OpMode) -> Cell {
        match op_mode {
            OpMode::Signed => Cell::from(self.to_i32() > rhs.to_i32()),
            OpMode::Unsigned => Cell::from(self.to_u32() > rhs.to_u32()),
            OpMode::Float => Cell::from(self.to_f32() > rhs.to_f32()),
        }
    }

    /// Addition under `op_mode`. Integer modes wrap on overflow.
    pub fn add(self, rhs: Cell, op_mode: OpMode) -> Cell {
        match op_mode {
            OpMode::Signed => Cell::from(self.to_i32().wrapping_add(rhs.to_i32())),
            OpMode::Unsigned => Cell::from(self.to_u32().wrapping_add(rhs.to_u32())),
            OpMode::Float => Cell::from(self.to_f32() + rhs.to_f32()),
        }
    }

    /// Subtraction under `op_mode`. Integer modes wrap on overflow.
    pub fn subtract(self, rhs: Cell, op_mode: OpMode) -> Cell {
        match op_mode {
            OpMode::Signed => Cell::from(self.to_i32().wrapping_sub(rhs.to_i32())),
            OpMode::Unsigned => Cell::from(self.to_u32().wrapping_sub(rhs.to_u32())),
            OpMode::Float => Cell::from(self.to_f32() - rhs.to_f32()),
        }
    }

    /// Multiplication under `op_mode`. Integer modes wrap on overflow.
    pub fn multiply(self, rhs: Cell, op_mode: OpMode) -> Cell {
        match op_mode {
            OpMode::Signed => Cell::from(self.to_i32().wrapping_mul(rhs.to_i32())),
            OpMode::Unsigned => Cell::from(self.to_u32().wrapping_mul(rhs.to_u32())),
            OpMode::Float => Cell::from(self.to_f32() * rhs.to_f32()),
        }
    }

    /// Division with remainder under `op_mode`.
    ///
    /// Returns `(modulo, quotient)`, or [`VmError::DivisionByZero`] when the
    /// divisor is zero in the active interpretation. In float mode the
    /// modulo is the IEEE remainder of `self` by `rhs`.
    pub fn divide_remainder(self, rhs: Cell, op_mode: OpMode) -> VmResult<(Cell, Cell)> {
        match op_mode {
            OpMode::Signed => {
                let divisor = rhs.to_i32();
                if divisor == 0 {
                    return Err(VmError::DivisionByZero);
                }
                let left = self.to_i32();
                Ok((
                    Cell::from(left.wrapping_rem(divisor)),
                    Cell::from(left.wrapping_div(divisor)),
                ))
            }
            OpMode::Unsigned => {
                let divisor = rhs.to_u32();
                if divisor == 0 {
                    return Err(VmError::DivisionByZero);
                }
                let left = self.to_u32();
                Ok((Cell::from(left % divisor), Cell::from(left / divisor)))
            }
            OpMode::Float => {
                let divisor = rhs.to_f32();
                if divisor == 0.0 {
                    return Err(VmError::DivisionByZero);
                }
                let left = self.to_f32();
                Ok((Cell::from(left % divisor), Cell::from(left / divisor)))
            }
        }
    }

    /// Multiply, then divide with remainder: `(self * mul) / rhs`.
    ///
    /// Returns `(modulo, quotient)` with the same zero-divisor discipline
    /// as [`Cell::divide_remainder`].
    pub fn multiply_divide_remainder(
        self,
        mul: Cell,
        rhs: Cell,
        op_mode: OpMode,
    ) -> VmResult<(Cell, Cell)> {
        match op_mode {
            OpMode::Signed => {
                let divisor = rhs.to_i32();
                if divisor == 0 {
                    return Err(VmError::DivisionByZero);
                }
                let product = self.to_i32().wrapping_mul(mul.to_i32());
                Ok((
                    Cell::from(product.wrapping_rem(divisor)),
                    Cell::from(product.wrapping_div(divisor)),
                ))
            }
            OpMode::Unsigned => {
                let divisor = rhs.to_u32();
                if divisor == 0 {
                    return Err(VmError::DivisionByZero);
                }
                let product = self.to_u32().wrapping_mul(mul.to_u32());
                Ok((Cell::from(product % divisor), Cell::from(product / divisor)))
            }
            OpMode::Float => {
                let divisor = rhs.to_f32();
                if divisor == 0.0 {
                    return Err(VmError::DivisionByZero);
                }
                let product = self.to_f32() * mul.to_f32();
                Ok((Cell::from(product % divisor), Cell::from(product / divisor)))
            }
        }
    }

    /// Bitwise AND over the raw encoding.
    pub fn bitwise_and(self, rhs: Cell) -> Cell {
        Cell::from(self.to_u32() & rhs.to_u32())
    }

    /// Bitwise OR over the raw encoding.
    pub fn bitwise_or(self, rhs: Cell) -> Cell {
        Cell::from(self.to_u32() | rhs.to_u32())
    }

    /// Bitwise XOR over the raw encoding.
    pub fn bitwise_xor(self, rhs: Cell) -> Cell {
        Cell::from(self.to_u32() ^ rhs.to_u32())
    }

    /// Bitwise NOT over the raw encoding.
    pub fn bitwise_not(self) -> Cell {
        Cell::from(!self.to_u32())
    }

    /// Left shift by `rhs` under `op_mode`. The shift amount is masked
    /// modulo 32. [`VmError::InvalidFloatOperation`] in float mode.
    pub fn shift_left(self, rhs: Cell, op_mode: OpMode) -> VmResult<Cell> {
        match op_mode {
            OpMode::Signed => Ok(Cell::from(self.to_i32().wrapping_shl(rhs.to_u32()))),
            OpMode::Unsigned => Ok(Cell::from(self.to_u32().wrapping_shl(rhs.to_u32()))),
            OpMode::Float => Err(VmError::InvalidFloatOperation),
        }
    }

    /// Right shift by `rhs` under `op_mode`: arithmetic when signed,
    /// logical when unsigned. [`VmError::InvalidFloatOperation`] in float
    /// mode.
    pub fn shift_right(self, rhs: Cell, op_mode: OpMode) -> VmResult<Cell> {
        match op_mode {
            OpMode::Signed => Ok(Cell::from(self.to_i32().wrapping_shr(rhs.to_u32()))),
            OpMode::Unsigned => Ok(Cell::from(self.to_u32().wrapping_shr(rhs.to_u32()))),
            OpMode::Float => Err(VmError::InvalidFloatOperation),
        }
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell(value.to_le_bytes())
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell(value.to_le_bytes())
    }
}

impl From<f32> for Cell {
    fn from(value: f32) -> Self {
        Cell(value.to_le_bytes())
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell(if value { [0xFF; 4] } else { [0x00; 4] })
    }
}

impl From<[u8; 4]> for Cell {
    fn from(bytes: [u8; 4]) -> Self {
        Cell(bytes)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell(0x{})", hex::encode(self.to_u32().to_be_bytes()))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_u32().to_be_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_representation_is_source_of_truth() {
        let cell = Cell::from(0xAABBCCDDu32);
        assert_eq!(cell.to_bytes(), [0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(cell.to_byte(), 0xDD);
        assert_eq!(Cell::from_parts(0xDD, 0xCC, 0xBB, 0xAA), cell);
        assert_eq!(cell.to_size(), 0xAABBCCDD);
    }

    #[test]
    fn test_bool_encoding() {
        assert_eq!(Cell::from(true).to_u32(), 0xFFFF_FFFF);
        assert_eq!(Cell::from(false).to_u32(), 0);
        assert!(Cell::from(true).to_bool());
        assert!(!Cell::from(false).to_bool());
        // A value that is non-zero but not all-ones is not true.
        assert!(!Cell::from(1u32).to_bool());
    }

    #[test]
    fn test_signed_arithmetic_wraps() {
        let max = Cell::from(i32::MAX);
        let one = Cell::from(1i32);
        assert_eq!(max.add(one, OpMode::Signed).to_i32(), i32::MIN);
        assert_eq!(
            Cell::from(i32::MIN).subtract(one, OpMode::Signed).to_i32(),
            i32::MAX
        );
    }

    #[test]
    fn test_unsigned_arithmetic_wraps() {
        let max = Cell::from(u32::MAX);
        let one = Cell::from(1u32);
        assert_eq!(max.add(one, OpMode::Unsigned).to_u32(), 0);
        assert_eq!(
            Cell::from(0u32).subtract(one, OpMode::Unsigned).to_u32(),
            u32::MAX
        );
    }

    #[test]
    fn test_float_arithmetic() {
        let a = Cell::from(1.5f32);
        let b = Cell::from(2.25f32);
        assert_eq!(a.add(b, OpMode::Float).to_f32(), 3.75);
        assert_eq!(a.multiply(b, OpMode::Float).to_f32(), 3.375);
    }

    #[test]
    fn test_comparison_modes() {
        // -1 as unsigned is u32::MAX, so the mode flips the ordering.
        let minus_one = Cell::from(-1i32);
        let one = Cell::from(1i32);
        assert!(minus_one.less_than(one, OpMode::Signed).to_bool());
        assert!(minus_one.greater_than(one, OpMode::Unsigned).to_bool());
        assert!(Cell::from(0.5f32)
            .less_than(Cell::from(1.0f32), OpMode::Float)
            .to_bool());
    }

    #[test]
    fn test_equality_is_mode_independent() {
        let a = Cell::from(7u32);
        assert!(a.equal(Cell::from(7i32)).to_bool());
        assert!(a.not_equal(Cell::from(8u32)).to_bool());
        assert!(!a.not_equal(Cell::from(7u32)).to_bool());
    }

    #[test]
    fn test_divide_remainder() {
        let (modulo, quotient) = Cell::from(255i32)
            .divide_remainder(Cell::from(8i32), OpMode::Signed)
            .unwrap();
        assert_eq!(modulo.to_i32(), 7);
        assert_eq!(quotient.to_i32(), 31);
    }

    #[test]
    fn test_divide_by_zero() {
        for mode in [OpMode::Signed, OpMode::Unsigned, OpMode::Float] {
            let err = Cell::from(1i32)
                .divide_remainder(Cell::from(0i32), mode)
                .unwrap_err();
            assert_eq!(err, VmError::DivisionByZero);
        }
    }

    #[test]
    fn test_signed_division_wraps_at_min() {
        let (modulo, quotient) = Cell::from(i32::MIN)
            .divide_remainder(Cell::from(-1i32), OpMode::Signed)
            .unwrap();
        assert_eq!(quotient.to_i32(), i32::MIN);
        assert_eq!(modulo.to_i32(), 0);
    }

    #[test]
    fn test_multiply_divide_remainder() {
        let (modulo, quotient) = Cell::from(10i32)
            .multiply_divide_remainder(Cell::from(7i32), Cell::from(4i32), OpMode::Signed)
            .unwrap();
        assert_eq!(quotient.to_i32(), 17);
        assert_eq!(modulo.to_i32(), 2);

        let err = Cell::from(10i32)
            .multiply_divide_remainder(Cell::from(7i32), Cell::from(0i32), OpMode::Signed)
            .unwrap_err();
        assert_eq!(err, VmError::DivisionByZero);
    }

    #[test]
    fn test_float_remainder() {
        let (modulo, quotient) = Cell::from(7.5f32)
            .divide_remainder(Cell::from(2.0f32), OpMode::Float)
            .unwrap();
        assert_eq!(modulo.to_f32(), 1.5);
        assert_eq!(quotient.to_f32(), 3.75);
    }

    #[test]
    fn test_bitwise_ops() {
        let a = Cell::from(0b1100u32);
        let b = Cell::from(0b1010u32);
        assert_eq!(a.bitwise_and(b).to_u32(), 0b1000);
        assert_eq!(a.bitwise_or(b).to_u32(), 0b1110);
        assert_eq!(a.bitwise_xor(b).to_u32(), 0b0110);
        assert_eq!(Cell::from(0u32).bitwise_not().to_u32(), u32::MAX);
    }

    #[test]
    fn test_shifts() {
        let one = Cell::from(1u32);
        let four = Cell::from(4u32);
        assert_eq!(one.shift_left(four, OpMode::Unsigned).unwrap().to_u32(), 16);
        assert_eq!(
            Cell::from(16u32)
                .shift_right(four, OpMode::Unsigned)
                .unwrap()
                .to_u32(),
            1
        );
        // Signed right shift is arithmetic.
        assert_eq!(
            Cell::from(-16i32)
                .shift_right(Cell::from(2u32), OpMode::Signed)
                .unwrap()
                .to_i32(),
            -4
        );
    }

    #[test]
    fn test_shift_rejects_float_mode() {
        let err = Cell::from(1u32)
            .shift_left(Cell::from(1u32), OpMode::Float)
            .unwrap_err();
        assert_eq!(err, VmError::InvalidFloatOperation);
        let err = Cell::from(1u32)
            .shift_right(Cell::from(1u32), OpMode::Float)
            .unwrap_err();
        assert_eq!(err, VmError::InvalidFloatOperation);
    }

    #[test]
    fn test_debug_rendering() {
        assert_eq!(format!("{:?}", Cell::from(0xAABBCCDDu32)), "Cell(0xaabbccdd)");
        assert_eq!(format!("{}", Cell::from(0x0000_1337u32)), "0x00001337");
    }
}
