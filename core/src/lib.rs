pub use chip8::Chip8;
pub use config::{Config, Quirks};
pub use error::{Chip8Error, Result};
pub use frame_buffer::FrameBuffer;
pub use keypad::Keypad;
pub use scheduler::{Scheduler, Tick};
pub use state::State;

mod chip8;
pub mod config;
pub mod constants;
mod error;
pub mod frame_buffer;
mod instruction;
pub mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
mod scheduler;
pub mod stack;
pub mod state;
pub mod timers;
