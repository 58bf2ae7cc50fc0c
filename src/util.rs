//! Small helpers that are not tied to the machine state.

pub mod bit_splitter;
