use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{error, info};

use vip8_core::{Chip8, Config, Scheduler};
use vip8_display::Display;

use crate::input::{KeyLatch, KEY_HOLD};
use crate::keymap::keymap;

/// Sleep between host loop iterations; the scheduler makes up for however long it really was
const IDLE: Duration = Duration::from_millis(1);

pub fn run(rom: &Path, config: Config) -> anyhow::Result<()> {
    config.validate()?;
    let mut chip8 = Chip8::with_quirks(config.quirks);

    // Load ROM
    let file = File::open(rom).with_context(|| format!("unable to open {}", rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", rom.display()))?;
    info!(
        "running {} at {} Hz, {} fps, {:?}",
        rom.display(),
        config.clock_speed,
        config.frame_rate,
        config.quirks
    );

    let mut display = Display::new().context("unable to set up the terminal")?;
    let mut latch = KeyLatch::new(KEY_HOLD);
    let mut scheduler = Scheduler::new(&config);

    'event: loop {
        let now = Instant::now();

        // Handle input
        while event::poll(Duration::ZERO)? {
            let (code, modifiers, kind) = match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) => (code, modifiers, kind),
                _ => continue,
            };
            match (code, keymap(code)) {
                (KeyCode::Esc, _) => break 'event,
                (KeyCode::Char('c'), _) if modifiers.contains(KeyModifiers::CONTROL) => {
                    break 'event
                }
                (_, Some(key)) if kind == KeyEventKind::Release => {
                    latch.release(key);
                    chip8.key_release(key);
                }
                (_, Some(key)) => {
                    latch.press(key, now);
                    chip8.key_press(key);
                }
                _ => continue,
            }
        }
        for key in latch.expired(now) {
            chip8.key_release(key);
        }

        // Update state
        let tick = match scheduler.update(&mut chip8, now) {
            Ok(tick) => tick,
            Err(e) => {
                error!("machine halted: {} [{}]", e, chip8.state());
                return Err(e.into());
            }
        };

        // If a frame is due, render the current frame
        if tick.should_render() {
            display.render(chip8.frame(), chip8.is_beeping())?;
        }

        std::thread::sleep(IDLE);
    }

    info!("stopped after {} instructions", chip8.cycles());
    Ok(())
}
