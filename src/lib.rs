/*!

A CHIP-8 interpreter core as specified at https://en.wikipedia.org/wiki/CHIP-8.

The crate models the machine (memory, registers, call stack, timers, keypad
and a 64x32 framebuffer) and the fetch-decode-execute cycle over it.
Rendering, audio and keyboard polling are left to the caller.

# Library

If you are not interested in handling input (key presses and such),
then you can use `Emulator::new()` to get an emulator to work with.

The main way of running a program is to load instructions as bytes.

```rust
use chip8_vm::emulator::{Emulator, Step};

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let program = [
    0x60, 0x05, // V0 = 5
    0x61, 0x03, // V1 = 3
    0x80, 0x14, // V0 += V1
    0x51, 0x21, // not an instruction
];
emulator.load(&program)?;
emulator.run(3)?;
assert_eq!(emulator.registers()[0], 8);

// Unknown words are reported and skipped
assert_eq!(emulator.step()?, Step::Unsupported { opcode: 0x5121, pc: 0x206 });
assert_eq!(emulator.program_counter(), 0x208);
# Ok::<(), chip8_vm::emulator::EmulatorError>(())
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen)?;

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
])?;
assert_eq!(emulator.registers()[0xB], 35);
assert_eq!(emulator.program_counter(), 0x254);
# Ok::<(), chip8_vm::emulator::EmulatorError>(())
```

## Errors

Stack overflow and underflow, and memory accesses outside the 4 KiB address
space, end the session with an [`EmulatorError`](emulator::EmulatorError).
Unsupported opcodes do not: they come back as
[`Step::Unsupported`](emulator::Step) and the program counter moves on.

## Custom input and output

To get keypresses, you must implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get keyboard input from and a screen respectively.
The input is polled before every cycle, and the output is handed the framebuffer
after every cycle that changed it.

```ignore
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::with_io(MyInput::new(), MyOutput::new());
```

Timers are not ticked by the emulator itself. Call `tick_timers` at 60 Hz
between cycles.
*/

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod emulator;
pub mod util;
