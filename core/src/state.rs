use std::fmt;

use crate::constants::PROGRAM_START;
use crate::frame_buffer::FrameBuffer;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::stack::CallStack;
use crate::timers::Timers;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// - `registers`: V0..VF and the address register I
/// - `pc`: a 16-bit program counter, starting at 0x200
/// - `stack`: up to 16 return addresses and the stack pointer
/// - `timers`: the delay and sound timers
///
/// ## Memory
/// - 4096 bytes of addressable memory, sprite sheet at 0x000
/// - a 64x32 frame buffer holding the contents of the next frame to be drawn
///
/// States are plain values: instructions map one state to the next, so a failing
/// instruction leaves the previous state untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub memory: Memory,
    pub registers: Registers,
    pub pc: u16,
    pub stack: CallStack,
    pub frame_buffer: FrameBuffer,
    pub timers: Timers,
}

impl State {
    pub fn new() -> Self {
        State {
            memory: Memory::new(),
            registers: Registers::new(),
            pc: PROGRAM_START,
            stack: CallStack::new(),
            frame_buffer: FrameBuffer::new(),
            timers: Timers::default(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Register dump for trace output
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (x, v) in self.registers.v.iter().enumerate() {
            if x > 0 {
                write!(f, " ")?;
            }
            write!(f, "V{:X}={:02X}", x, v)?;
        }
        write!(
            f,
            " | PC={:03X} I={:03X} SP={:X} DT={:02X} ST={:02X}",
            self.pc,
            self.registers.i,
            self.stack.len(),
            self.timers.delay.get(),
            self.timers.sound.get()
        )
    }
}
