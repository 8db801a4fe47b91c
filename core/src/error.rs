use std::io;

use thiserror::Error;

/// Conditions that halt the machine.
///
/// Unrecognized opcodes are not errors; they are skipped.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("call stack overflow: subroutines nested deeper than {depth} calls")]
    StackOverflow { depth: usize },

    #[error("call stack underflow: returned from a subroutine with an empty call stack")]
    StackUnderflow,

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read ROM: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
