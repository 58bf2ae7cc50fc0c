pub const NUM_KEYS: usize = 16;

/// The state of the 16-key hexadecimal keypad.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad([bool; NUM_KEYS]);

impl Keypad {
    pub fn new() -> Keypad {
        Keypad([false; NUM_KEYS])
    }

    /// Whether `key` is held. Keys outside 0..0xF are never pressed.
    pub fn is_pressed(&self, key: usize) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    pub fn press(&mut self, key: usize) {
        if let Some(k) = self.0.get_mut(key) {
            *k = true;
        }
    }

    pub fn release(&mut self, key: usize) {
        if let Some(k) = self.0.get_mut(key) {
            *k = false;
        }
    }

    pub fn set_all(&mut self, keys: [bool; NUM_KEYS]) {
        self.0 = keys;
    }

    /// The lowest-numbered key currently held.
    pub fn first_pressed(&self) -> Option<usize> {
        self.0.iter().position(|k| *k)
    }
}

/// Represents an input device that refreshes the keypad before each cycle.
pub trait EmulatorInput {
    fn poll(&mut self, keys: &mut Keypad);
}

/// An input device that never changes the keypad.
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self, _: &mut Keypad) {}
}
