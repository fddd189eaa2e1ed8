//! The instruction set.
//!
//! Every instruction is a single opcode byte; only the three load
//! instructions carry an inline immediate. `LW` pads three bytes between
//! the opcode and its word immediate so the immediate sits at
//! `opcode_addr + 4`, which is also why call return addresses are
//! `ip + 4`.

/// Number of defined opcodes.
pub const OP_CODE_COUNT: usize = 55;

/// The opcode of an instruction.
///
/// Opcodes are organised into categories: loads and stores, stack
/// manipulation, comparison, arithmetic, bitwise, addressing and control
/// flow, interrupts and I/O, core management, and operation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    // ==================== Loads and stores ====================
    /// No operation.
    NO = 0x00,
    /// Push the word immediate at `ip + 4` (3 padding bytes follow the opcode).
    LW = 0x01,
    /// Push the half-word immediate at `ip + 1`, zero-extended.
    LH = 0x02,
    /// Push the byte immediate at `ip + 1`, zero-extended.
    LB = 0x03,
    /// Pop an address; push the word at that address.
    FW = 0x04,
    /// Pop an address; push the half-word at that address, zero-extended.
    FH = 0x05,
    /// Pop an address; push the byte at that address, zero-extended.
    FB = 0x06,
    /// Pop an address, pop a value; store the value's word there.
    SW = 0x07,
    /// Pop an address, pop a value; store the value's low half-word there.
    SH = 0x08,
    /// Pop an address, pop a value; store the value's low byte there.
    SB = 0x09,

    // ==================== Stack manipulation ====================
    /// Duplicate the top of the data stack.
    DU = 0x0A,
    /// Drop the top of the data stack.
    DR = 0x0B,
    /// Swap the top two cells of the data stack.
    SP = 0x0C,
    /// Pop the data stack; push onto the address stack.
    PU = 0x0D,
    /// Pop the address stack; push onto the data stack.
    PO = 0x0E,

    // ==================== Comparison ====================
    /// Pop right, left; push raw-encoding equality.
    EQ = 0x0F,
    /// Pop right, left; push raw-encoding inequality.
    NE = 0x10,
    /// Pop right, left; push `left < right` under the operation mode.
    LT = 0x11,
    /// Pop right, left; push `left > right` under the operation mode.
    GT = 0x12,

    // ==================== Arithmetic ====================
    /// Pop right, left; push `left + right` under the operation mode.
    AD = 0x13,
    /// Pop right, left; push `left - right` under the operation mode.
    SU = 0x14,
    /// Pop right, left; push `left * right` under the operation mode.
    MU = 0x15,
    /// Pop right, left; push the modulo, then the quotient of `left / right`.
    DM = 0x16,
    /// Pop right, mul, left; push the modulo, then the quotient of `(left * mul) / right`.
    MD = 0x17,

    // ==================== Bitwise ====================
    /// Pop right, left; push `left & right`.
    AN = 0x18,
    /// Pop right, left; push `left | right`.
    OR = 0x19,
    /// Pop right, left; push `left ^ right`.
    XO = 0x1A,
    /// Pop a value; push its bitwise complement.
    NT = 0x1B,
    /// Pop right, left; push `left << right`. Rejected in float mode.
    SL = 0x1C,
    /// Pop right, left; push `left >> right`. Rejected in float mode.
    SR = 0x1D,

    // ==================== Byte packing ====================
    /// Pop d, c, b, a; push the cell with bytes `(d, c, b, a)`.
    PA = 0x1E,
    /// Pop a cell; push its bytes `[3]`, `[2]`, `[1]`, `[0]`.
    UN = 0x1F,

    // ==================== Addressing and control flow ====================
    /// Make the next control-flow target IP-relative.
    RL = 0x20,
    /// Pop a target; push `ip + 4` on the address stack and jump.
    CA = 0x21,
    /// Pop a target, pop a condition; call when the condition is true.
    CC = 0x22,
    /// Pop a target; jump.
    JU = 0x23,
    /// Pop a target, pop a condition; jump when the condition is true.
    CJ = 0x24,
    /// Pop the address stack; jump to that address.
    RE = 0x25,
    /// Pop a condition; return when it is true.
    CR = 0x26,

    // ==================== Interrupts and I/O ====================
    /// Pop an interrupt id, pop a handler address; bind them.
    SV = 0x27,
    /// Disable interrupt processing.
    HI = 0x28,
    /// Enable interrupt processing.
    SI = 0x29,
    /// Pop an interrupt id; trigger it when interrupts are enabled.
    TI = 0x2A,
    /// Pop an I/O id; invoke that host callback slot.
    II = 0x2B,
    /// Halt the system.
    HS = 0x2C,

    // ==================== Core management ====================
    /// Pop a core id, pop an address; reset that core with the address as IP.
    IC = 0x2D,
    /// Pop a core id; activate that core.
    AC = 0x2E,
    /// Pop a core id; pause that core.
    PC = 0x2F,
    /// Pause the current core.
    SC = 0x30,

    // ==================== Registers and memory blocks ====================
    /// Pop a register id; push that register's value.
    RR = 0x31,
    /// Pop a register id, pop a value; write the register.
    WR = 0x32,
    /// Pop a length, a destination, an origin; copy the block.
    CP = 0x33,
    /// Pop a length, a destination, an origin; push the block equality.
    BC = 0x34,

    // ==================== Operation modes ====================
    /// Unsigned mode for the next computing instruction.
    UU = 0x35,
    /// Float mode for the next computing instruction.
    FF = 0x36,
}

impl OpCode {
    /// Decodes an opcode byte. Returns `None` for bytes outside the
    /// instruction encoding.
    pub fn from_byte(byte: u8) -> Option<Self> {
        use OpCode::*;
        Some(match byte {
            0x00 => NO,
            0x01 => LW,
            0x02 => LH,
            0x03 => LB,
            0x04 => FW,
            0x05 => FH,
            0x06 => FB,
            0x07 => SW,
            0x08 => SH,
            0x09 => SB,
            0x0A => DU,
            0x0B => DR,
            0x0C => SP,
            0x0D => PU,
            0x0E => PO,
            0x0F => EQ,
            0x10 => NE,
            0x11 => LT,
            0x12 => GT,
            0x13 => AD,
            0x14 => SU,
            0x15 => MU,
            0x16 => DM,
            0x17 => MD,
            0x18 => AN,
            0x19 => OR,
            0x1A => XO,
            0x1B => NT,
            0x1C => SL,
            0x1D => SR,
            0x1E => PA,
            0x1F => UN,
            0x20 => RL,
            0x21 => CA,
            0x22 => CC,
            0x23 => JU,
            0x24 => CJ,
            0x25 => RE,
            0x26 => CR,
            0x27 => SV,
            0x28 => HI,
            0x29 => SI,
            0x2A => TI,
            0x2B => II,
            0x2C => HS,
            0x2D => IC,
            0x2E => AC,
            0x2F => PC,
            0x30 => SC,
            0x31 => RR,
            0x32 => WR,
            0x33 => CP,
            0x34 => BC,
            0x35 => UU,
            0x36 => FF,
            _ => return None,
        })
    }

    /// The assembly mnemonic of the opcode.
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::NO => "NO",
            OpCode::LW => "LW",
            OpCode::LH => "LH",
            OpCode::LB => "LB",
            OpCode::FW => "FW",
            OpCode::FH => "FH",
            OpCode::FB => "FB",
            OpCode::SW => "SW",
            OpCode::SH => "SH",
            OpCode::SB => "SB",
            OpCode::DU => "DU",
            OpCode::DR => "DR",
            OpCode::SP => "SP",
            OpCode::PU => "PU",
            OpCode::PO => "PO",
            OpCode::EQ => "EQ",
            OpCode::NE => "NE",
            OpCode::LT => "LT",
            OpCode::GT => "GT",
            OpCode::AD => "AD",
            OpCode::SU => "SU",
            OpCode::MU => "MU",
            OpCode::DM => "DM",
            OpCode::MD => "MD",
            OpCode::AN => "AN",
            OpCode::OR => "OR",
            OpCode::XO => "XO",
            OpCode::NT => "NT",
            OpCode::SL => "SL",
            OpCode::SR => "SR",
            OpCode::PA => "PA",
            OpCode::UN => "UN",
            OpCode::RL => "RL",
            OpCode::CA => "CA",
            OpCode::CC => "CC",
            OpCode::JU => "JU",
            OpCode::CJ => "CJ",
            OpCode::RE => "RE",
            OpCode::CR => "CR",
            OpCode::SV => "SV",
            OpCode::HI => "HI",
            OpCode::SI => "SI",
            OpCode::TI => "TI",
            OpCode::II => "II",
            OpCode::HS => "HS",
            OpCode::IC => "IC",
            OpCode::AC => "AC",
            OpCode::PC => "PC",
            OpCode::SC => "SC",
            OpCode::RR => "RR",
            OpCode::WR => "WR",
            OpCode::CP => "CP",
            OpCode::BC => "BC",
            OpCode::UU => "UU",
            OpCode::FF => "FF",
        }
    }

    /// The encoded length of the instruction in bytes: the opcode byte
    /// plus any inline immediate and padding.
    pub fn encoded_len(self) -> usize {
        match self {
            OpCode::LW => 8,
            OpCode::LH => 3,
            OpCode::LB => 2,
            _ => 1,
        }
    }

    /// Whether this opcode sets the operation mode (and therefore skips
    /// the signed-mode reset that follows every other instruction).
    pub fn is_mode_setter(self) -> bool {
        matches!(self, OpCode::UU | OpCode::FF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_round_trip() {
        for byte in 0x00..=0x36u8 {
            let op = OpCode::from_byte(byte).expect("defined opcode");
            assert_eq!(op as u8, byte);
        }
    }

    #[test]
    fn test_bytes_past_the_table_are_undefined() {
        assert_eq!(OpCode::from_byte(0x37), None);
        assert_eq!(OpCode::from_byte(0xFF), None);
    }

    #[test]
    fn test_encoded_lengths() {
        assert_eq!(OpCode::LW.encoded_len(), 8);
        assert_eq!(OpCode::LH.encoded_len(), 3);
        assert_eq!(OpCode::LB.encoded_len(), 2);
        assert_eq!(OpCode::AD.encoded_len(), 1);
        assert_eq!(OpCode::HS.encoded_len(), 1);
    }

    #[test]
    fn test_mode_setters() {
        assert!(OpCode::UU.is_mode_setter());
        assert!(OpCode::FF.is_mode_setter());
        assert!(!OpCode::RL.is_mode_setter());
        assert!(!OpCode::NO.is_mode_setter());
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(OpCode::NO.mnemonic(), "NO");
        assert_eq!(OpCode::FF.mnemonic(), "FF");
    }
}
