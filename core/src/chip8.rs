use std::io::Read;

use log::{debug, info, trace};

use crate::config::Quirks;
use crate::error::Result;
use crate::frame_buffer::FrameBuffer;
use crate::instruction;
use crate::keypad::Keypad;
use crate::operations::Env;
use crate::registers::Registers;
use crate::stack::CallStack;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `keypad` with public interfaces for manipulating it
///  - the `quirks` it was configured with
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
///
/// Each machine owns all of its state, so any number can run side by side.
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    quirks: Quirks,
    cycles: u64,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        Chip8 {
            state: State::new(),
            keypad: Keypad::new(),
            quirks,
            cycles: 0,
        }
    }

    /// Returns to the power-on state, dropping any loaded ROM; quirks are kept
    pub fn reset(&mut self) {
        info!("resetting machine");
        *self = Self::with_quirks(self.quirks);
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader positioned at the start of a raw ROM image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_program(&rom)
    }

    /// Copies a program into memory at 0x200
    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        self.state.memory.load_program(rom)?;
        info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    pub fn release_all_keys(&mut self) {
        self.keypad.release_all();
    }

    /// Gets the opcode currently pointed at by the pc without advancing it.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16> {
        self.state.memory.word(self.state.pc as usize)
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode at pc and moves pc past it
    /// - executes it, or skips it if it isn't a known instruction
    ///
    /// An instruction either completes or, on error, leaves the machine as it was.
    pub fn step(&mut self) -> Result<()> {
        let op = self.fetch()?;
        let next = State {
            pc: self.state.pc.wrapping_add(0x2),
            ..self.state
        };
        let env = Env {
            keypad: self.keypad,
            quirks: self.quirks,
        };

        self.state = match instruction::from_op(&op) {
            Some(operation) => {
                trace!("{:04X} {}", op, self.state);
                operation(&op, &next, &env)?
            }
            None => {
                debug!("skipping unrecognized opcode {:04X} at {:03X}", op, self.state.pc);
                next
            }
        };
        self.cycles += 1;
        Ok(())
    }

    /// Counts both timers down by one; the scheduler calls this at 60Hz
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// The frame as of the last completed instruction
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// A tone should play while the sound timer is running
    pub fn is_beeping(&self) -> bool {
        self.state.timers.sound.is_active()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn index(&self) -> u16 {
        self.state.registers.i
    }

    pub fn stack(&self) -> &CallStack {
        &self.state.stack
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Instructions executed since the last reset, including skipped ones
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_ROM_SIZE, SPRITE_SHEET};
    use crate::error::Chip8Error;

    fn with_program(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new();
        chip8.load_program(program).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_fetches_big_endian() {
        let chip8 = with_program(&[0xAA, 0xBB]);
        assert_eq!(chip8.fetch().unwrap(), 0xAABB);
        assert_eq!(chip8.pc(), 0x200);
    }

    #[test]
    fn test_new_machine_is_reset() {
        let chip8 = Chip8::new();
        let state = chip8.state();
        assert_eq!(state.memory.slice(0x000, 0x050).unwrap(), &SPRITE_SHEET[..]);
        assert_eq!(chip8.pc(), 0x200);
        assert!(chip8.stack().is_empty());
        assert_eq!(chip8.registers(), &Registers::new());
        assert_eq!(chip8.index(), 0);
        assert_eq!(state.timers.delay.get(), 0);
        assert!(!chip8.is_beeping());
        assert_eq!(chip8.frame().lit_pixels(), 0);
    }

    #[test]
    fn test_step_advances_pc() {
        // insert a cls opcode so we have something to execute
        let mut chip8 = with_program(&[0x00, 0xE0]);
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x202);
        assert_eq!(chip8.cycles(), 1);
    }

    #[test]
    fn test_step_skips_unrecognized_opcode() {
        let mut chip8 = with_program(&[0x81, 0x2F, 0x61, 0x05]);
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x202);
        assert_eq!(chip8.registers(), &Registers::new());
        chip8.step().unwrap();
        assert_eq!(chip8.registers().v[0x1], 0x05);
    }

    #[test]
    fn test_failed_step_leaves_state() {
        // 6105: V1 = 5, then 00EE with nothing to return to
        let mut chip8 = with_program(&[0x61, 0x05, 0x00, 0xEE]);
        chip8.step().unwrap();
        let before = *chip8.state();
        assert!(matches!(chip8.step(), Err(Chip8Error::StackUnderflow)));
        assert_eq!(chip8.state(), &before);
        assert_eq!(chip8.cycles(), 1);
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        // 1FFF: jump to the last byte, where a full opcode can't be read
        let mut chip8 = with_program(&[0x1F, 0xFF]);
        chip8.step().unwrap();
        assert!(matches!(
            chip8.step(),
            Err(Chip8Error::MemoryOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_waits_for_key_press() {
        // F30A: V3 = key
        let mut chip8 = with_program(&[0xF3, 0x0A]);
        for _ in 0..5 {
            chip8.step().unwrap();
            assert_eq!(chip8.pc(), 0x200);
        }
        chip8.key_press(0x7);
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x202);
        assert_eq!(chip8.registers().v[0x3], 0x7);
    }

    #[test]
    fn test_key_release() {
        let mut chip8 = Chip8::new();
        chip8.key_press(0x2);
        chip8.key_press(0x3);
        chip8.key_release(0x2);
        assert!(!chip8.keypad().is_pressed(0x2));
        chip8.release_all_keys();
        assert_eq!(chip8.keypad(), &Keypad::new());
    }

    #[test]
    fn test_timers_count_down() {
        // 6A0A FA15 FA18: DT = ST = 10
        let mut chip8 = with_program(&[0x6A, 0x0A, 0xFA, 0x15, 0xFA, 0x18]);
        for _ in 0..3 {
            chip8.step().unwrap();
        }
        assert!(chip8.is_beeping());
        for _ in 0..10 {
            chip8.tick_timers();
        }
        assert_eq!(chip8.state().timers.delay.get(), 0);
        assert!(!chip8.is_beeping());
        chip8.tick_timers();
        assert_eq!(chip8.state().timers.delay.get(), 0);
    }

    #[test]
    fn test_legacy_shift_quirk() {
        // 6203 8126: V2 = 3; V1 = V2 >> 1
        let program = [0x62, 0x03, 0x81, 0x26];
        let mut chip8 = Chip8::with_quirks(Quirks { legacy_shift: true });
        chip8.load_program(&program).unwrap();
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.registers().v[0x1], 0x1);
        assert_eq!(chip8.registers().v[0xF], 0x1);
    }

    #[test]
    fn test_reset_keeps_quirks_and_clears_state() {
        let mut chip8 = Chip8::with_quirks(Quirks { legacy_shift: true });
        chip8.load_program(&[0x61, 0x05]).unwrap();
        chip8.key_press(0x1);
        chip8.step().unwrap();
        chip8.reset();
        assert_eq!(chip8.state(), &State::new());
        assert_eq!(chip8.keypad(), &Keypad::new());
        assert_eq!(chip8.cycles(), 0);
        assert!(chip8.quirks().legacy_shift);
    }

    #[test]
    fn test_machines_are_independent() {
        let mut a = with_program(&[0x61, 0x05]);
        let b = with_program(&[0x61, 0x05]);
        a.step().unwrap();
        assert_eq!(a.registers().v[0x1], 0x05);
        assert_eq!(b.registers().v[0x1], 0x00);
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut chip8 = Chip8::new();
        let mut rom: &[u8] = &[0x00, 0xE0];
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.fetch().unwrap(), 0x00E0);
    }

    #[test]
    fn test_load_rom_rejects_oversized() {
        let mut chip8 = Chip8::new();
        let big = vec![0u8; MAX_ROM_SIZE + 1];
        let mut rom: &[u8] = &big;
        assert!(matches!(
            chip8.load_rom(&mut rom),
            Err(Chip8Error::RomTooLarge { .. })
        ));
    }

    #[test]
    fn test_draws_font_glyph() {
        // 6A0F FA29 D005: draw the F glyph at 0,0
        let mut chip8 = with_program(&[0x6A, 0x0F, 0xFA, 0x29, 0xD0, 0x05]);
        for _ in 0..3 {
            chip8.step().unwrap();
        }
        let frame = chip8.frame();
        assert!(frame.pixel(0, 0) && frame.pixel(3, 0));
        assert!(frame.pixel(0, 4) && !frame.pixel(1, 4));
    }
}
