/// An 8-bit countdown that stops at zero
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer(u8);

impl Timer {
    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn set(&mut self, value: u8) {
        self.0 = value;
    }

    pub fn decrement_if_positive(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.0 > 0
    }
}

/// # Timers
/// - delay: read and written by the program
/// - sound: a tone plays while it's non-zero
///
/// Both count down once per timer tick, which the scheduler issues at 60Hz
/// regardless of how many instructions ran in between.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: Timer,
    pub sound: Timer,
}

impl Timers {
    pub fn tick(&mut self) {
        self.delay.decrement_if_positive();
        self.sound.decrement_if_positive();
    }
}
