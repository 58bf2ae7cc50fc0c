//! The complete mutable state of a CHIP-8 machine.

use super::display::Framebuffer;
use super::error::EmulatorError;
use super::input::Keypad;

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const PC_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PC_START as usize;
/// The flag register.
pub const VF: usize = 0xF;

pub const FONT_GLYPH_SIZE: u16 = 5;
#[rustfmt::skip]
const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[derive(Debug, Clone)]
pub struct State {
    pub memory: [u8; MEM_SIZE],
    pub registers: [u8; NUM_REGISTERS],
    pub index: u16,
    pub program_counter: u16,
    pub stack: Vec<u16>,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub keys: Keypad,
    pub framebuffer: Framebuffer,
    /// Target register of a pending wait-for-key.
    pub awaiting_key: Option<usize>,
}

impl State {
    /// A zeroed machine with the program counter at the load offset.
    pub fn new() -> State {
        State {
            memory: [0; MEM_SIZE],
            registers: [0; NUM_REGISTERS],
            index: 0,
            program_counter: PC_START,
            stack: Vec::with_capacity(STACK_SIZE),
            delay_timer: 0,
            sound_timer: 0,
            keys: Keypad::new(),
            framebuffer: Framebuffer::new(),
            awaiting_key: None,
        }
    }

    /// A zeroed machine with the hexadecimal font at address 0.
    pub fn with_font() -> State {
        let mut state = State::new();
        state.memory[..FONT.len()].copy_from_slice(&FONT);
        state
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), EmulatorError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(EmulatorError::RomTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PC_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// The `len` bytes starting at `address`, if they are all inside memory.
    pub fn memory_range(&self, address: usize, len: usize) -> Result<&[u8], EmulatorError> {
        self.check_range(address, len)?;
        Ok(&self.memory[address..address + len])
    }

    pub fn memory_range_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8], EmulatorError> {
        self.check_range(address, len)?;
        Ok(&mut self.memory[address..address + len])
    }

    fn check_range(&self, address: usize, len: usize) -> Result<(), EmulatorError> {
        if address + len > MEM_SIZE {
            return Err(EmulatorError::AddressOutOfRange {
                address: address.max(MEM_SIZE),
                pc: self.program_counter,
            });
        }
        Ok(())
    }

    /// The big-endian instruction word at the program counter.
    pub fn fetch(&self) -> Result<u16, EmulatorError> {
        let bytes = self.memory_range(self.program_counter as usize, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Decrement both timers if they are above zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_state_is_zeroed() {
        let state = State::new();
        assert!(state.memory.iter().all(|b| *b == 0));
        assert_eq!(state.registers, [0; NUM_REGISTERS]);
        assert_eq!(state.program_counter, PC_START);
        assert!(state.stack.is_empty());
        assert!(state.framebuffer.is_blank());
        assert_eq!(state.awaiting_key, None);
    }

    #[test]
    fn font_glyphs_are_five_bytes_apart() {
        let state = State::with_font();
        let f = (0xF * FONT_GLYPH_SIZE) as usize;
        assert_eq!(&state.memory[f..f + 5], &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert_eq!(state.memory[FONT.len()], 0);
    }

    #[test]
    fn load_copies_program_at_start() {
        let mut state = State::new();
        state.load(&[0x60, 0x05, 0x61, 0x03]).unwrap();
        assert_eq!(&state.memory[0x200..0x205], &[0x60, 0x05, 0x61, 0x03, 0x00]);
        assert_eq!(state.fetch(), Ok(0x6005));
    }

    #[test]
    fn load_accepts_a_program_filling_memory() {
        let mut state = State::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        state.load(&program).unwrap();
        assert_eq!(state.memory[MEM_SIZE - 1], 0xAB);
    }

    #[test]
    fn load_rejects_oversized_program() {
        let mut state = State::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE + 1];
        assert_eq!(
            state.load(&program),
            Err(EmulatorError::RomTooLarge { size: MAX_PROGRAM_SIZE + 1, max: MAX_PROGRAM_SIZE })
        );
        assert_eq!(state.memory[PC_START as usize], 0);
    }

    #[test]
    fn fetch_past_memory_is_out_of_range() {
        let mut state = State::new();
        state.program_counter = 0xFFF;
        assert_eq!(
            state.fetch(),
            Err(EmulatorError::AddressOutOfRange { address: MEM_SIZE, pc: 0xFFF })
        );
    }

    #[test]
    fn timers_stop_at_zero() {
        let mut state = State::new();
        state.delay_timer = 2;
        state.sound_timer = 1;
        state.tick_timers();
        state.tick_timers();
        state.tick_timers();
        assert_eq!((state.delay_timer, state.sound_timer), (0, 0));
    }
}
