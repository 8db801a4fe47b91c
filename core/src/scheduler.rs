use std::time::{Duration, Instant};

use log::warn;

use crate::chip8::Chip8;
use crate::config::Config;
use crate::constants::TIMER_RATE;
use crate::error::Result;

/// Backlogs longer than this get a warning; they are still worked off in full
const STALL_WARNING: Duration = Duration::from_millis(250);

/// Converts a rate into the length of one tick
fn period(hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(hz.max(1)))
}

/// Elapsed time not yet converted into ticks
#[derive(Copy, Clone, Debug)]
struct Accumulator {
    period: Duration,
    pending: Duration,
}

impl Accumulator {
    fn new(hz: u32) -> Self {
        Accumulator {
            period: period(hz),
            pending: Duration::ZERO,
        }
    }

    fn add(&mut self, elapsed: Duration) {
        self.pending += elapsed;
    }

    /// Consumes one period if a whole one is pending
    fn take(&mut self) -> bool {
        if self.pending >= self.period {
            self.pending -= self.period;
            true
        } else {
            false
        }
    }
}

/// How much work one scheduler update did
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    pub cycles: u32,
    pub timer_ticks: u32,
    pub frames: u32,
}

impl Tick {
    /// Whether the current frame should be handed to the display.
    /// Missed frames aren't replayed; showing the latest one is enough.
    pub fn should_render(&self) -> bool {
        self.frames > 0
    }
}

/// # Scheduler
/// Turns wall-clock time into three independent streams of work:
/// - instructions at the configured clock speed
/// - timer decrements at 60Hz
/// - frames at the configured frame rate
///
/// Elapsed time is added to all three accumulators, and each is drained one period
/// at a time. A host loop that wakes late therefore still runs every instruction and
/// timer tick it owes, in order.
#[derive(Debug)]
pub struct Scheduler {
    cpu: Accumulator,
    timers: Accumulator,
    frames: Accumulator,
    last_update: Option<Instant>,
}

impl Scheduler {
    pub fn new(config: &Config) -> Self {
        Scheduler {
            cpu: Accumulator::new(config.clock_speed),
            timers: Accumulator::new(TIMER_RATE),
            frames: Accumulator::new(config.frame_rate),
            last_update: None,
        }
    }

    /// Advances by the time since the previous call; the first call only starts the clock
    pub fn update(&mut self, chip8: &mut Chip8, now: Instant) -> Result<Tick> {
        let elapsed = match self.last_update {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last_update = Some(now);
        self.advance(chip8, elapsed)
    }

    /// Runs the instructions, timer ticks, and frames that `elapsed` accounts for.
    ///
    /// A fatal instruction error stops the update immediately and is returned.
    pub fn advance(&mut self, chip8: &mut Chip8, elapsed: Duration) -> Result<Tick> {
        if elapsed > STALL_WARNING {
            warn!("catching up on {:?} of emulation", elapsed);
        }
        self.cpu.add(elapsed);
        self.timers.add(elapsed);
        self.frames.add(elapsed);

        let mut tick = Tick::default();
        while self.cpu.take() {
            chip8.step()?;
            tick.cycles += 1;
        }
        while self.timers.take() {
            chip8.tick_timers();
            tick.timer_ticks += 1;
        }
        while self.frames.take() {
            tick.frames += 1;
        }
        Ok(tick)
    }

    /// Forgets pending time, e.g. after the host was paused
    pub fn reset_clock(&mut self) {
        self.cpu.pending = Duration::ZERO;
        self.timers.pending = Duration::ZERO;
        self.frames.pending = Duration::ZERO;
        self.last_update = None;
    }
}
