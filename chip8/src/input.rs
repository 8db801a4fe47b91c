use std::time::{Duration, Instant};

use vip8_core::constants::NUM_KEYS;

/// How long a key counts as held after the terminal last reported it
pub const KEY_HOLD: Duration = Duration::from_millis(120);

/// Most terminals report key presses (and auto-repeats) but never releases.
/// A press is therefore latched until `hold` passes without another report for that key.
pub struct KeyLatch {
    hold: Duration,
    held_until: [Option<Instant>; NUM_KEYS],
}

impl KeyLatch {
    pub fn new(hold: Duration) -> Self {
        KeyLatch {
            hold,
            held_until: [None; NUM_KEYS],
        }
    }

    pub fn press(&mut self, key: u8, now: Instant) {
        if let Some(slot) = self.held_until.get_mut(key as usize) {
            *slot = Some(now + self.hold);
        }
    }

    /// For terminals that do report releases
    pub fn release(&mut self, key: u8) {
        if let Some(slot) = self.held_until.get_mut(key as usize) {
            *slot = None;
        }
    }

    /// Keys whose hold ran out; they stop being tracked
    pub fn expired(&mut self, now: Instant) -> Vec<u8> {
        let mut keys = vec![];
        for (key, slot) in self.held_until.iter_mut().enumerate() {
            if matches!(slot, Some(deadline) if *deadline <= now) {
                *slot = None;
                keys.push(key as u8);
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_expires_after_hold() {
        let start = Instant::now();
        let mut latch = KeyLatch::new(Duration::from_millis(100));
        latch.press(0x5, start);
        assert!(latch.expired(start + Duration::from_millis(50)).is_empty());
        assert_eq!(latch.expired(start + Duration::from_millis(100)), vec![0x5]);
        // only reported once
        assert!(latch.expired(start + Duration::from_millis(200)).is_empty());
    }

    #[test]
    fn test_repeat_extends_hold() {
        let start = Instant::now();
        let mut latch = KeyLatch::new(Duration::from_millis(100));
        latch.press(0xA, start);
        latch.press(0xA, start + Duration::from_millis(80));
        assert!(latch.expired(start + Duration::from_millis(150)).is_empty());
        assert_eq!(latch.expired(start + Duration::from_millis(180)), vec![0xA]);
    }

    #[test]
    fn test_explicit_release_stops_tracking() {
        let start = Instant::now();
        let mut latch = KeyLatch::new(Duration::from_millis(100));
        latch.press(0x1, start);
        latch.release(0x1);
        assert!(latch.expired(start + Duration::from_secs(1)).is_empty());
    }
}
