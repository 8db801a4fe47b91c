use std::path::PathBuf;

use clap::Parser;

use vip8_core::constants::{CLOCK_SPEED, FRAME_RATE};
use vip8_core::{Config, Quirks};

mod input;
mod keymap;
mod run;

/// Runs a CHIP-8 ROM in the terminal.
///
/// Keys 1-4, Q-R, A-F, Z-V stand in for the hex keypad; Esc quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = CLOCK_SPEED)]
    clock_speed: u32,

    /// Frames drawn per second
    #[arg(short, long, default_value_t = FRAME_RATE)]
    frame_rate: u32,

    /// Shift Vy rather than Vx in 8XY6/8XYE, like the COSMAC VIP
    #[arg(long)]
    legacy_shift: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config::default()
            .with_clock_speed(self.clock_speed)
            .with_frame_rate(self.frame_rate)
            .with_quirks(Quirks {
                legacy_shift: self.legacy_shift,
            })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args.rom, args.config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["vip8", "pong.ch8"]).unwrap();
        assert_eq!(args.rom, PathBuf::from("pong.ch8"));
        assert_eq!(args.config(), Config::default());
    }

    #[test]
    fn test_flags_map_onto_config() {
        let args = Args::try_parse_from([
            "vip8",
            "--clock-speed",
            "700",
            "--frame-rate",
            "30",
            "--legacy-shift",
            "pong.ch8",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.clock_speed, 700);
        assert_eq!(config.frame_rate, 30);
        assert!(config.quirks.legacy_shift);
    }

    #[test]
    fn test_requires_rom() {
        assert!(Args::try_parse_from(["vip8"]).is_err());
    }
}
