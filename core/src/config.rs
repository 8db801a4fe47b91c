use crate::constants::{CLOCK_SPEED, FRAME_RATE, MAX_CLOCK_SPEED};
use crate::error::{Chip8Error, Result};

/// Behaviours that differ between historical interpreters
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6 and 8XYE copy Vy into Vx before shifting, as the COSMAC VIP did
    pub legacy_shift: bool,
}

/// # Config
/// Knobs the host may turn before starting a machine.
///
/// The timers are not configurable; they always run at `TIMER_RATE`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second
    pub clock_speed: u32,
    /// Frames handed to the display per second
    pub frame_rate: u32,
    pub quirks: Quirks,
}

impl Config {
    pub fn with_clock_speed(self, clock_speed: u32) -> Self {
        Config {
            clock_speed,
            ..self
        }
    }

    pub fn with_frame_rate(self, frame_rate: u32) -> Self {
        Config { frame_rate, ..self }
    }

    pub fn with_quirks(self, quirks: Quirks) -> Self {
        Config { quirks, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        if self.clock_speed == 0 || self.clock_speed > MAX_CLOCK_SPEED {
            return Err(Chip8Error::InvalidConfig(format!(
                "clock speed must be between 1 and {} Hz, got {}",
                MAX_CLOCK_SPEED, self.clock_speed
            )));
        }
        if self.frame_rate == 0 {
            return Err(Chip8Error::InvalidConfig(
                "frame rate must be at least 1 Hz".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: CLOCK_SPEED,
            frame_rate: FRAME_RATE,
            quirks: Quirks::default(),
        }
    }
}
