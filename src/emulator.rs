pub mod config;
pub mod display;
#[allow(clippy::module_inception)]
pub mod emulator;
pub mod error;
pub mod input;
pub mod instruction;
pub mod output;
pub mod state;

pub use self::config::{Config, SpriteEdges};
pub use self::emulator::{Emulator, Step, Summary};
pub use self::error::EmulatorError;
