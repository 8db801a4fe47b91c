use crate::constants::STACK_SIZE;
use crate::error::{Chip8Error, Result};

/// # Call Stack
/// Return addresses pushed by 2NNN and popped by 00EE.
///
/// `sp` counts the occupied slots, so `frames[sp - 1]` is the top.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CallStack {
    frames: [u16; STACK_SIZE],
    sp: u8,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.is_full() {
            return Err(Chip8Error::StackOverflow { depth: STACK_SIZE });
        }
        self.frames[self.sp as usize] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.is_empty() {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.frames[self.sp as usize])
    }

    pub fn top(&self) -> Option<u16> {
        self.as_slice().last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    pub fn is_full(&self) -> bool {
        self.sp as usize == STACK_SIZE
    }

    /// The stack pointer
    pub fn len(&self) -> usize {
        self.sp as usize
    }

    /// Occupied frames, oldest first
    pub fn as_slice(&self) -> &[u16] {
        &self.frames[..self.sp as usize]
    }
}
