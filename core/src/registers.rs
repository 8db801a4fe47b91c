use crate::constants::{FLAG_REGISTER, NUM_REGISTERS};

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; NUM_REGISTERS],
    pub i: u16,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of Vx; only the low nibble of `x` is used
    pub fn get(&self, x: u8) -> u8 {
        self.v[(x & 0xF) as usize]
    }

    pub fn set(&mut self, x: u8, value: u8) {
        self.v[(x & 0xF) as usize] = value;
    }

    pub fn flag(&self) -> u8 {
        self.get(FLAG_REGISTER)
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.set(FLAG_REGISTER, flag as u8);
    }
}
