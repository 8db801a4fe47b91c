use std::fmt;

use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, SPRITE_SHEET_ADDR};
use crate::error::{Chip8Error, Result};

// NB. addresses are u16 as per the chip-8 but arithmetic on them is done in usize so that
//     I + x can run past the end of memory without wrapping back to the sprite sheet

/// # Memory
/// 4096 bytes of flat addressable memory.
///
/// ```text
/// 0x000-0x04F  sprite sheet
/// 0x050-0x1FF  unused (interpreter area on the original hardware)
/// 0x200-0xFFF  program
/// ```
///
/// Every access is bounds checked; reaching past 0xFFF is fatal.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet baked in
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let start = SPRITE_SHEET_ADDR as usize;
        bytes[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, addr: usize) -> Result<u8> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfBounds { address: addr })
    }

    pub fn write(&mut self, addr: usize, value: u8) -> Result<()> {
        match self.bytes.get_mut(addr) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(Chip8Error::MemoryOutOfBounds { address: addr }),
        }
    }

    /// Reads the big-endian word at `[addr, addr + 1]`
    pub fn word(&self, addr: usize) -> Result<u16> {
        let word = self.slice(addr, 2)?;
        Ok(u16::from_be_bytes([word[0], word[1]]))
    }

    /// A read-only view of `len` bytes starting at `addr`
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        let end = Self::end_of(addr, len)?;
        Ok(&self.bytes[addr..end])
    }

    /// A writable view of `len` bytes starting at `addr`
    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        let end = Self::end_of(addr, len)?;
        Ok(&mut self.bytes[addr..end])
    }

    /// Copies a ROM into memory at `PROGRAM_START`, rejecting anything that would not fit
    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        self.slice_mut(PROGRAM_START as usize, rom.len())?
            .copy_from_slice(rom);
        Ok(())
    }

    fn end_of(addr: usize, len: usize) -> Result<usize> {
        let end = addr.saturating_add(len);
        if end > MEMORY_SIZE {
            // report the first byte that doesn't exist
            let address = addr.max(MEMORY_SIZE);
            return Err(Chip8Error::MemoryOutOfBounds { address });
        }
        Ok(end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = self.bytes.iter().filter(|b| **b != 0).count();
        write!(f, "Memory {{ {} bytes, {} non-zero }}", MEMORY_SIZE, used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_has_sprite_sheet() {
        let m = Memory::new();
        assert_eq!(m.slice(0x000, 80).unwrap(), &SPRITE_SHEET[..]);
    }

    #[test]
    fn test_memory_zeroed_after_sprite_sheet() {
        let m = Memory::new();
        assert!(m.slice(0x050, MEMORY_SIZE - 0x050).unwrap().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_read_word() {
        let mut m = Memory::new();
        m.slice_mut(0x300, 4).unwrap().copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(m.word(0x301).unwrap(), 0x0203);
    }

    #[test]
    fn test_write_then_read() {
        let mut m = Memory::new();
        m.write(0xFFF, 0xAB).unwrap();
        assert_eq!(m.read(0xFFF).unwrap(), 0xAB);
    }

    #[test]
    fn test_read_out_of_bounds() {
        let m = Memory::new();
        assert!(matches!(
            m.read(0x1000),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        ));
    }

    #[test]
    fn test_word_straddling_end_of_memory() {
        let m = Memory::new();
        assert!(matches!(
            m.word(0xFFF),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        ));
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let mut m = Memory::new();
        assert!(m.slice(0xFFE, 3).is_err());
        assert!(m.slice_mut(0xFFE, 2).is_ok());
    }

    #[test]
    fn test_program_load_ok() {
        let mut m = Memory::new();
        m.load_program(&[0x00, 0xE0]).unwrap();
        assert_eq!(m.slice(0x200, 2).unwrap(), &[0x00, 0xE0]);
    }

    #[test]
    fn test_program_load_fills_memory() {
        let mut m = Memory::new();
        m.load_program(&[0xAA; MAX_ROM_SIZE]).unwrap();
        assert_eq!(m.read(0xFFF).unwrap(), 0xAA);
    }

    #[test]
    fn test_program_load_rejects_oversized_rom() {
        let mut m = Memory::new();
        let result = m.load_program(&[0; MAX_ROM_SIZE + 1]);
        assert!(matches!(
            result,
            Err(Chip8Error::RomTooLarge {
                size: 3585,
                max_size: 3584
            })
        ));
        // nothing was written
        assert_eq!(m.read(0x200).unwrap(), 0);
    }
}
