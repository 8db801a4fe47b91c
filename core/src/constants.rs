/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// 0x000 - 0x050 is reserved for the sprite sheet
pub const SPRITE_SHEET_ADDR: u16 = 0x000;

/// Bytes per glyph in the sprite sheet
pub const SPRITE_HEIGHT: u16 = 5;

/// 0x200 is where ROMs are loaded into memory
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Maximum depth of nested subroutine calls
pub const STACK_SIZE: usize = 16;

pub const NUM_REGISTERS: usize = 16;
pub const NUM_KEYS: usize = 16;

/// VF doubles as the carry, borrow, and collision flag
pub const FLAG_REGISTER: u8 = 0xF;

/// Default instruction rate in Hz
pub const CLOCK_SPEED: u32 = 500;

/// Default presentation rate in Hz
pub const FRAME_RATE: u32 = 60;

/// The delay and sound timers always count down at 60Hz
pub const TIMER_RATE: u32 = 60;

/// Upper bound accepted for a configured clock speed
pub const MAX_CLOCK_SPEED: u32 = 1_000_000;

/// # Sprite Sheet
/// The hexadecimal digits 0..F, each 4 pixels wide and 5 rows tall.
/// Only the high nibble of each row is drawn.
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
