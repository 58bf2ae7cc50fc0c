use std::fmt;

use crate::util::bit_splitter::BitSplitter;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

impl Addr {
    /// The address, reduced to 12 bits.
    pub fn masked(self) -> u16 {
        self.0 & 0xFFF
    }
}

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

impl Reg {
    /// The register number, reduced to 0..=0xF.
    pub fn index(self) -> usize {
        (self.0 & 0xF) as usize
    }
}

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    CallLegacy(Addr), // 0NNN
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg) // FX65
}

impl Instruction {

    /// Decode an instruction word, or `None` if it is not a supported opcode.
    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(BitSplitter::from_u16(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Instruction::decode(BitSplitter::new(left, right))
    }

    fn decode(opcode: BitSplitter) -> Option<Instruction> {
        let nnn = Addr(opcode.address12());
        let nn = Const(opcode.immediate_byte());
        let instruction = match opcode.as_four_u8() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (0, _, _, _) => Instruction::CallLegacy(nnn),
            (1, _, _, _) => Instruction::Goto(nnn),
            (2, _, _, _) => Instruction::Call(nnn),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), nn),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), nn),
            (5, x, y, 0) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), nn),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), nn),
            (8, x, y, 0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (8, x, y, 1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (8, x, y, 2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (8, x, y, 3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (8, x, y, 4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (8, x, y, 5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (8, x, _, 6) => Instruction::BitshiftRight(Reg(x)),
            (8, x, y, 7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (8, x, _, 0xE) => Instruction::BitshiftLeft(Reg(x)),
            (9, x, y, 0) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(nnn),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(nnn),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), nn),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 9, 0xE) => Instruction::IfKeyEqVx(Reg(x)),
            (0xE, x, 0xA, 1) => Instruction::IfKeyNeqVx(Reg(x)),
            (0xF, x, 0, 7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0, 0xA) => Instruction::SetRegToGetKey(Reg(x)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 2, 9) => Instruction::SetIToSpriteAddrVx(Reg(x)),
            (0xF, x, 3, 3) => Instruction::SetIToBcdOfReg(Reg(x)),
            (0xF, x, 5, 5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 6, 5) => Instruction::RegLoad(Reg(x)),
            _ => return None,
        };
        Some(instruction)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            CallLegacy(Addr(a)) => write!(f, "SYS {:#05x}", a),
            Goto(Addr(a)) => write!(f, "JP {:#05x}", a),
            Call(Addr(a)) => write!(f, "CALL {:#05x}", a),
            IfRegEqConst(Reg(x), Const(n)) => write!(f, "SE V{:X}, {:#04x}", x, n),
            IfRegNeqConst(Reg(x), Const(n)) => write!(f, "SNE V{:X}, {:#04x}", x, n),
            IfRegEqReg(Reg(x), Reg(y)) => write!(f, "SE V{:X}, V{:X}", x, y),
            SetRegToConst(Reg(x), Const(n)) => write!(f, "LD V{:X}, {:#04x}", x, n),
            IncRegByConst(Reg(x), Const(n)) => write!(f, "ADD V{:X}, {:#04x}", x, n),
            SetRegToReg(Reg(x), Reg(y)) => write!(f, "LD V{:X}, V{:X}", x, y),
            BitwiseOr(Reg(x), Reg(y)) => write!(f, "OR V{:X}, V{:X}", x, y),
            BitwiseAnd(Reg(x), Reg(y)) => write!(f, "AND V{:X}, V{:X}", x, y),
            BitwiseXor(Reg(x), Reg(y)) => write!(f, "XOR V{:X}, V{:X}", x, y),
            IncRegByReg(Reg(x), Reg(y)) => write!(f, "ADD V{:X}, V{:X}", x, y),
            DecRegByReg(Reg(x), Reg(y)) => write!(f, "SUB V{:X}, V{:X}", x, y),
            BitshiftRight(Reg(x)) => write!(f, "SHR V{:X}", x),
            SetVxVyMinusVx(Reg(x), Reg(y)) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            BitshiftLeft(Reg(x)) => write!(f, "SHL V{:X}", x),
            IfRegNeqReg(Reg(x), Reg(y)) => write!(f, "SNE V{:X}, V{:X}", x, y),
            SetI(Addr(a)) => write!(f, "LD I, {:#05x}", a),
            SetPcToV0PlusAddr(Addr(a)) => write!(f, "JP V0, {:#05x}", a),
            SetVxRand(Reg(x), Const(n)) => write!(f, "RND V{:X}, {:#04x}", x, n),
            Draw(Reg(x), Reg(y), Const(n)) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            IfKeyEqVx(Reg(x)) => write!(f, "SKP V{:X}", x),
            IfKeyNeqVx(Reg(x)) => write!(f, "SKNP V{:X}", x),
            SetRegToDelayTimer(Reg(x)) => write!(f, "LD V{:X}, DT", x),
            SetRegToGetKey(Reg(x)) => write!(f, "LD V{:X}, K", x),
            SetDelayTimerToReg(Reg(x)) => write!(f, "LD DT, V{:X}", x),
            SetSoundTimerToReg(Reg(x)) => write!(f, "LD ST, V{:X}", x),
            AddRegToI(Reg(x)) => write!(f, "ADD I, V{:X}", x),
            SetIToSpriteAddrVx(Reg(x)) => write!(f, "LD F, V{:X}", x),
            SetIToBcdOfReg(Reg(x)) => write!(f, "LD B, V{:X}", x),
            RegDump(Reg(x)) => write!(f, "LD [I], V{:X}", x),
            RegLoad(Reg(x)) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use test_case::test_case;

    #[test_case(0x00E0 => Some(Instruction::ClearScreen))]
    #[test_case(0x00EE => Some(Instruction::Return))]
    #[test_case(0x0123 => Some(Instruction::CallLegacy(Addr(0x123))))]
    #[test_case(0x1025 => Some(Instruction::Goto(Addr(0x25))))]
    #[test_case(0x2037 => Some(Instruction::Call(Addr(0x37))))]
    #[test_case(0x3A08 => Some(Instruction::IfRegEqConst(Reg(0xA), Const(8))))]
    #[test_case(0x4A08 => Some(Instruction::IfRegNeqConst(Reg(0xA), Const(8))))]
    #[test_case(0x5AB0 => Some(Instruction::IfRegEqReg(Reg(0xA), Reg(0xB))))]
    #[test_case(0x6B23 => Some(Instruction::SetRegToConst(Reg(0xB), Const(0x23))))]
    #[test_case(0x7CA1 => Some(Instruction::IncRegByConst(Reg(0xC), Const(0xA1))))]
    #[test_case(0x8AB0 => Some(Instruction::SetRegToReg(Reg(0xA), Reg(0xB))))]
    #[test_case(0x8DE1 => Some(Instruction::BitwiseOr(Reg(0xD), Reg(0xE))))]
    #[test_case(0x8DE2 => Some(Instruction::BitwiseAnd(Reg(0xD), Reg(0xE))))]
    #[test_case(0x8DE3 => Some(Instruction::BitwiseXor(Reg(0xD), Reg(0xE))))]
    #[test_case(0x8AB4 => Some(Instruction::IncRegByReg(Reg(0xA), Reg(0xB))))]
    #[test_case(0x8AB5 => Some(Instruction::DecRegByReg(Reg(0xA), Reg(0xB))))]
    #[test_case(0x8AB6 => Some(Instruction::BitshiftRight(Reg(0xA))))]
    #[test_case(0x8AB7 => Some(Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB))))]
    #[test_case(0x8A0E => Some(Instruction::BitshiftLeft(Reg(0xA))))]
    #[test_case(0x9AB0 => Some(Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB))))]
    #[test_case(0xA025 => Some(Instruction::SetI(Addr(0x25))))]
    #[test_case(0xB025 => Some(Instruction::SetPcToV0PlusAddr(Addr(0x25))))]
    #[test_case(0xCA23 => Some(Instruction::SetVxRand(Reg(0xA), Const(0x23))))]
    #[test_case(0xDABC => Some(Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC))))]
    #[test_case(0xEA9E => Some(Instruction::IfKeyEqVx(Reg(0xA))))]
    #[test_case(0xEAA1 => Some(Instruction::IfKeyNeqVx(Reg(0xA))))]
    #[test_case(0xFA07 => Some(Instruction::SetRegToDelayTimer(Reg(0xA))))]
    #[test_case(0xFA0A => Some(Instruction::SetRegToGetKey(Reg(0xA))))]
    #[test_case(0xFA15 => Some(Instruction::SetDelayTimerToReg(Reg(0xA))))]
    #[test_case(0xFA18 => Some(Instruction::SetSoundTimerToReg(Reg(0xA))))]
    #[test_case(0xFA1E => Some(Instruction::AddRegToI(Reg(0xA))))]
    #[test_case(0xFA29 => Some(Instruction::SetIToSpriteAddrVx(Reg(0xA))))]
    #[test_case(0xFA33 => Some(Instruction::SetIToBcdOfReg(Reg(0xA))))]
    #[test_case(0xFA55 => Some(Instruction::RegDump(Reg(0xA))))]
    #[test_case(0xFA65 => Some(Instruction::RegLoad(Reg(0xA))))]
    fn opcodes_are_parsed_correctly(word: u16) -> Option<Instruction> {
        Instruction::from_u16(word)
    }

    #[test_case(0x5AB1 ; "register skip with low nibble")]
    #[test_case(0x9AB8 ; "register not equal skip with low nibble")]
    #[test_case(0x8AB8 ; "unknown alu operation")]
    #[test_case(0xE1FF ; "unknown key operation")]
    #[test_case(0xF1FF ; "unknown misc operation")]
    fn unsupported_opcodes_decode_to_none(word: u16) {
        assert_eq!(Instruction::from_u16(word), None);
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0x10, 0x20), Instruction::from_u16(0x1020));
    }

    #[test]
    fn mnemonics() {
        assert_eq!(Instruction::Draw(Reg(1), Reg(2), Const(5)).to_string(), "DRW V1, V2, 5");
        assert_eq!(Instruction::Goto(Addr(0x200)).to_string(), "JP 0x200");
        assert_eq!(Instruction::SetRegToConst(Reg(0xA), Const(0x0F)).to_string(), "LD VA, 0x0f");
    }
}
