use super::display::Framebuffer;

/// Represents an output device: a screen and a buzzer.
pub trait EmulatorOutput {
    /// Called after a cycle that changed the framebuffer.
    fn refresh(&mut self, frame: &Framebuffer);
    /// Called when the sound timer starts or stops running.
    fn sound(&mut self, active: bool);
}

/// A simple output device that keeps track of what it was told.
#[derive(Debug, Default)]
pub struct DummyOutput {
    pub refreshes: usize,
    pub sounding: bool,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput::default()
    }
}

impl EmulatorOutput for DummyOutput {
    fn refresh(&mut self, _: &Framebuffer) {
        self.refreshes += 1;
    }
    fn sound(&mut self, active: bool) {
        self.sounding = active;
    }
}
