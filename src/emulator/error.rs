use thiserror::Error;

/// Conditions that end an emulation session.
///
/// Unsupported opcodes are not in here, they are reported
/// through [`Step::Unsupported`](super::emulator::Step) instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmulatorError {
    #[error("call stack overflow at {pc:#05x}: all {depth} frames in use")]
    StackOverflow { pc: u16, depth: usize },

    #[error("call stack underflow at {pc:#05x}: return without a saved frame")]
    StackUnderflow { pc: u16 },

    #[error("address {address:#06x} out of range at {pc:#05x}")]
    AddressOutOfRange { address: usize, pc: u16 },

    #[error("sprite pixel ({x}, {y}) is outside the screen")]
    SpriteOutOfBounds { x: usize, y: usize },

    #[error("program is {size} bytes, at most {max} bytes fit in memory")]
    RomTooLarge { size: usize, max: usize },
}
