/// A structure for splitting an instruction word
/// into the operand fields used by the instruction set.
///
/// Every 16-bit value splits into some set of fields; whether
/// those fields form a meaningful instruction is decided elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {

    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    /// Left-shift the first u8-component 8 bits,
    /// then take bitwise or with the second component
    /// in order to store the components in a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// The four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.op_class(), self.reg_x(), self.reg_y(), self.immediate_nibble())
    }

    /// Top 4 bits, selecting the major instruction group.
    pub fn op_class(&self) -> u8 {
        self.0 >> 4
    }

    /// Bits 8-11.
    pub fn reg_x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// Bits 4-7.
    pub fn reg_y(&self) -> u8 {
        self.1 >> 4
    }

    pub fn immediate_byte(&self) -> u8 {
        self.1
    }

    pub fn immediate_nibble(&self) -> u8 {
        self.1 & 0x0F
    }

    pub fn address12(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}

impl From<u16> for BitSplitter {
    fn from(value: u16) -> Self {
        BitSplitter::from_u16(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn get_components() {
        let word = BitSplitter::from_u16(0xABCD);
        assert_eq!(0xA, word.op_class());
        assert_eq!(0xB, word.reg_x());
        assert_eq!(0xC, word.reg_y());
        assert_eq!(0xD, word.immediate_nibble());
        assert_eq!(0xCD, word.immediate_byte());
        assert_eq!(0xBCD, word.address12());
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(BitSplitter::new(0x12, 0x34), BitSplitter::from_u16(0x1234));
        assert_eq!(BitSplitter::new(0xFF, 0x00), BitSplitter::from_u16(0xFF00));
        assert_eq!(BitSplitter::new(0x00, 0x00), BitSplitter::from(0x0000u16));
    }

    #[test]
    fn four_nibbles() {
        assert_eq!((0xF, 0x0, 0xF, 0x0), BitSplitter::from_u16(0xF0F0).as_four_u8());
        assert_eq!((0x0, 0x0, 0xE, 0xE), BitSplitter::from_u16(0x00EE).as_four_u8());
    }

    proptest! {
        #[test]
        fn fields_reassemble_the_word(word in any::<u16>()) {
            let split = BitSplitter::from_u16(word);
            prop_assert_eq!(split.as_u16(), word);
            prop_assert_eq!(((split.op_class() as u16) << 12) | split.address12(), word);
            prop_assert_eq!(
                ((split.reg_x() as u16) << 8) | split.immediate_byte() as u16,
                split.address12()
            );
            prop_assert_eq!((split.reg_y() << 4) | split.immediate_nibble(), split.immediate_byte());
        }
    }
}
