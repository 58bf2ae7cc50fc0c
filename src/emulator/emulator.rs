//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use super::config::Config;
use super::display::Framebuffer;
use super::error::EmulatorError;
use super::input::{DummyInput, EmulatorInput, Keypad};
use super::instruction::*;
use super::output::{DummyOutput, EmulatorOutput};
use super::state::{State, FONT_GLYPH_SIZE, STACK_SIZE, VF};

const MAX_ADDRESS: u16 = 0xFFF;
const MAX_SPRITE_HEIGHT: usize = 15;

/// The outcome of a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction ran to completion.
    Executed,
    /// A wait-for-key is pending, the program counter has not moved.
    AwaitingKey,
    /// The word at `pc` is not a supported instruction and was skipped.
    Unsupported { opcode: u16, pc: u16 },
}

/// Counts of what happened during [`Emulator::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub executed: usize,
    pub awaiting: usize,
    pub unsupported: usize,
}

impl Summary {
    /// Count one cycle's outcome.
    pub fn record(&mut self, step: Step) {
        match step {
            Step::Executed => self.executed += 1,
            Step::AwaitingKey => self.awaiting += 1,
            Step::Unsupported { .. } => self.unsupported += 1,
        }
    }

    pub fn cycles(&self) -> usize {
        self.executed + self.awaiting + self.unsupported
    }
}

pub struct Emulator<I: EmulatorInput, O: EmulatorOutput> {
    state: State,
    config: Config,
    screen_changed: bool,
    sounding: bool,

    input: I,
    output: O
}

impl Emulator<DummyInput, DummyOutput> {
    /// Create a new emulator with dummy input and output
    pub fn new() -> Emulator<DummyInput, DummyOutput> {
        Emulator::with_io(DummyInput, DummyOutput::new())
    }
}

impl Default for Emulator<DummyInput, DummyOutput> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EmulatorInput, O: EmulatorOutput> Emulator<I, O> {

    /// Create a new emulator with input and output
    pub fn with_io(input: I, output: O) -> Emulator<I, O> {
        Emulator::with_config(Config::default(), input, output)
    }

    pub fn with_config(config: Config, input: I, output: O) -> Emulator<I, O> {
        let state = if config.load_font { State::with_font() } else { State::new() };
        Emulator {
            state,
            config,
            screen_changed: false,
            sounding: false,

            input,
            output
        }
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), EmulatorError> {
        self.state.load(program)?;
        log::info!("Loaded {} byte program", program.len());
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn registers(&self) -> &[u8] {
        &self.state.registers
    }

    pub fn index(&self) -> u16 {
        self.state.index
    }

    pub fn program_counter(&self) -> u16 {
        self.state.program_counter
    }

    pub fn stack_depth(&self) -> usize {
        self.state.stack.len()
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.state.framebuffer
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.state.awaiting_key.is_some()
    }

    pub fn keys_mut(&mut self) -> &mut Keypad {
        &mut self.state.keys
    }

    pub fn set_keys(&mut self, keys: [bool; 16]) {
        self.state.keys.set_all(keys);
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Decrement the delay and sound timers.
    /// Must only be called between cycles.
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
        self.update_sound();
    }

    /// Perform a single cycle: refresh the keys,
    /// then load an instruction and execute it.
    pub fn step(&mut self) -> Result<Step, EmulatorError> {
        self.input.poll(&mut self.state.keys);

        let result = match self.state.awaiting_key {
            Some(x) => Ok(self.resume_key_wait(x)),
            None => self.fetch_and_execute(),
        };

        self.flush_screen();
        self.update_sound();

        result.map_err(|e| {
            log::error!("{}", e);
            e
        })
    }

    /// Run up to `cycles` cycles, stopping at the first fatal error.
    pub fn run(&mut self, cycles: usize) -> Result<Summary, EmulatorError> {
        let mut summary = Summary::default();
        for _ in 0..cycles {
            summary.record(self.step()?);
        }
        log::debug!("Ran {:?}", summary);
        Ok(summary)
    }

    fn fetch_and_execute(&mut self) -> Result<Step, EmulatorError> {
        // Each opcode is two bytes
        let pc = self.state.program_counter;
        let opcode = self.state.fetch()?;

        match Instruction::from_u16(opcode) {
            Some(instruction) => {
                log::trace!("{:#05x}: {}", pc, instruction);
                self.execute_single(instruction)
            }
            None => {
                log::warn!("Unsupported opcode {:#06x} at {:#05x}", opcode, pc);
                self.state.program_counter += 2;
                Ok(Step::Unsupported { opcode, pc })
            }
        }
    }

    fn resume_key_wait(&mut self, x: usize) -> Step {
        match self.state.keys.first_pressed() {
            Some(key) => {
                log::debug!("Key {:X} pressed, resuming", key);
                self.state.registers[x] = key as u8;
                self.state.awaiting_key = None;
                self.state.program_counter += 2;
                Step::Executed
            }
            None => Step::AwaitingKey,
        }
    }

    fn flush_screen(&mut self) {
        if self.screen_changed {
            self.screen_changed = false;
            self.output.refresh(&self.state.framebuffer);
        }
    }

    fn update_sound(&mut self) {
        let active = self.state.sound_timer > 0;
        if active != self.sounding {
            self.sounding = active;
            self.output.sound(active);
        }
    }

    fn next(&mut self) -> Result<Step, EmulatorError> {
        self.skip_if(false)
    }

    fn skip_if(&mut self, condition: bool) -> Result<Step, EmulatorError> {
        self.state.program_counter += if condition { 4 } else { 2 };
        Ok(Step::Executed)
    }

    /// Execute instructions in order, as if they were stored back to back.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), EmulatorError> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Execute a single instruction, including its program counter update.
    /// The output is refreshed if the instruction changed the screen.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<Step, EmulatorError> {
        let result = self.dispatch(instruction);
        self.flush_screen();
        result
    }

    fn dispatch(&mut self, instruction: Instruction) -> Result<Step, EmulatorError> {
        let pc = self.state.program_counter;
        let v = &mut self.state.registers;

        match instruction {

            // Clear the screen
            Instruction::ClearScreen => {
                self.state.framebuffer.clear();
                self.screen_changed = true;
                self.next()
            }

            // Return to the previous call site via the stack.
            Instruction::Return => {
                let call_site = self.state.stack.pop().ok_or(EmulatorError::StackUnderflow { pc })?;
                self.state.program_counter = call_site + 2;
                Ok(Step::Executed)
            }

            // Machine code routines do not exist here
            Instruction::CallLegacy(Addr(addr)) => {
                log::debug!("Ignoring machine code call to {:#05x}", addr);
                self.next()
            }

            // Go to a specific memory address
            Instruction::Goto(addr) => {
                self.state.program_counter = addr.masked();
                Ok(Step::Executed)
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(addr) => {
                if self.state.stack.len() >= STACK_SIZE {
                    return Err(EmulatorError::StackOverflow { pc, depth: STACK_SIZE });
                }
                self.state.stack.push(pc);
                self.state.program_counter = addr.masked();
                Ok(Step::Executed)
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(x, Const(n)) => {
                let condition = v[x.index()] == n;
                self.skip_if(condition)
            }

            Instruction::IfRegNeqConst(x, Const(n)) => {
                let condition = v[x.index()] != n;
                self.skip_if(condition)
            }

            Instruction::IfRegEqReg(x, y) => {
                let condition = v[x.index()] == v[y.index()];
                self.skip_if(condition)
            }

            Instruction::SetRegToConst(x, Const(n)) => {
                v[x.index()] = n;
                self.next()
            }

            // Wraps around, VF is untouched
            Instruction::IncRegByConst(x, Const(n)) => {
                v[x.index()] = v[x.index()].wrapping_add(n);
                self.next()
            }

            Instruction::SetRegToReg(x, y) => {
                v[x.index()] = v[y.index()];
                self.next()
            }

            Instruction::BitwiseOr(x, y) => {
                v[x.index()] |= v[y.index()];
                self.next()
            }

            Instruction::BitwiseAnd(x, y) => {
                v[x.index()] &= v[y.index()];
                self.next()
            }

            Instruction::BitwiseXor(x, y) => {
                v[x.index()] ^= v[y.index()];
                self.next()
            }

            // VF is 1 on carry. The flag is written last.
            Instruction::IncRegByReg(x, y) => {
                let (sum, carry) = v[x.index()].overflowing_add(v[y.index()]);
                v[x.index()] = sum;
                v[VF] = carry as u8;
                self.next()
            }

            // VF is 0 on borrow, 1 otherwise
            Instruction::DecRegByReg(x, y) => {
                let (difference, borrow) = v[x.index()].overflowing_sub(v[y.index()]);
                v[x.index()] = difference;
                v[VF] = !borrow as u8;
                self.next()
            }

            Instruction::BitshiftRight(x) => {
                let lsb = v[x.index()] & 1;
                v[x.index()] >>= 1;
                v[VF] = lsb;
                self.next()
            }

            Instruction::SetVxVyMinusVx(x, y) => {
                let (difference, borrow) = v[y.index()].overflowing_sub(v[x.index()]);
                v[x.index()] = difference;
                v[VF] = !borrow as u8;
                self.next()
            }

            Instruction::BitshiftLeft(x) => {
                let msb = v[x.index()] >> 7;
                v[x.index()] <<= 1;
                v[VF] = msb;
                self.next()
            }

            Instruction::IfRegNeqReg(x, y) => {
                let condition = v[x.index()] != v[y.index()];
                self.skip_if(condition)
            }

            Instruction::SetI(addr) => {
                self.state.index = addr.masked();
                self.next()
            }

            Instruction::SetPcToV0PlusAddr(addr) => {
                let target = addr.masked() + v[0] as u16;
                if target > MAX_ADDRESS {
                    return Err(EmulatorError::AddressOutOfRange { address: target as usize, pc });
                }
                self.state.program_counter = target;
                Ok(Step::Executed)
            }

            Instruction::SetVxRand(x, Const(n)) => {
                v[x.index()] = rand::random::<u8>() & n;
                self.next()
            }

            Instruction::Draw(x, y, Const(sprite_height)) => {

                // Get coordinates
                let x_coord = v[x.index()] as usize;
                let y_coord = v[y.index()] as usize;

                // Get sprite, each row is 8 bits
                let height = (sprite_height as usize).min(MAX_SPRITE_HEIGHT);
                let mut sprite = [0u8; MAX_SPRITE_HEIGHT];
                sprite[..height].copy_from_slice(self.state.memory_range(self.state.index as usize, height)?);

                let collision = self.state.framebuffer.draw_sprite(
                    x_coord,
                    y_coord,
                    &sprite[..height],
                    self.config.sprite_edges,
                )?;
                self.screen_changed = true;

                // Set VF collision flag
                self.state.registers[VF] = collision as u8;
                self.next()
            }

            // Skip if the key in Vx is pressed
            Instruction::IfKeyEqVx(x) => {
                let condition = self.state.keys.is_pressed(v[x.index()] as usize);
                self.skip_if(condition)
            }

            // Skip if the key in Vx isn't pressed
            Instruction::IfKeyNeqVx(x) => {
                let condition = !self.state.keys.is_pressed(v[x.index()] as usize);
                self.skip_if(condition)
            }

            Instruction::SetRegToDelayTimer(x) => {
                v[x.index()] = self.state.delay_timer;
                self.next()
            }

            // Get a key press. Without one, stay on this instruction
            // until the cycle driver sees a key.
            Instruction::SetRegToGetKey(x) => match self.state.keys.first_pressed() {
                Some(key) => {
                    v[x.index()] = key as u8;
                    self.next()
                }
                None => {
                    log::debug!("Waiting for key into V{:X}", x.index());
                    self.state.awaiting_key = Some(x.index());
                    Ok(Step::AwaitingKey)
                }
            },

            Instruction::SetDelayTimerToReg(x) => {
                self.state.delay_timer = v[x.index()];
                self.next()
            }

            Instruction::SetSoundTimerToReg(x) => {
                self.state.sound_timer = v[x.index()];
                self.next()
            }

            Instruction::AddRegToI(x) => {
                let address = self.state.index + v[x.index()] as u16;
                if address > MAX_ADDRESS {
                    return Err(EmulatorError::AddressOutOfRange { address: address as usize, pc });
                }
                self.state.index = address;
                self.next()
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(x) => {
                self.state.index = FONT_GLYPH_SIZE * v[x.index()] as u16;
                self.next()
            }

            Instruction::SetIToBcdOfReg(x) => {
                let value = v[x.index()];
                let digits = self.state.memory_range_mut(self.state.index as usize, 3)?;
                digits[0] = value / 100;
                digits[1] = value / 10 % 10;
                digits[2] = value % 10;
                self.next()
            }

            // Dump register values up to Vx
            Instruction::RegDump(x) => {
                let registers = *v;
                let count = x.index() + 1;
                self.state
                    .memory_range_mut(self.state.index as usize, count)?
                    .copy_from_slice(&registers[..count]);
                self.next()
            }

            // Load register values up to Vx
            Instruction::RegLoad(x) => {
                let count = x.index() + 1;
                let mut values = [0u8; 16];
                values[..count].copy_from_slice(self.state.memory_range(self.state.index as usize, count)?);
                self.state.registers[..count].copy_from_slice(&values[..count]);
                self.next()
            }
        }
    }
}
