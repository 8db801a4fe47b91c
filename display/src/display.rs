use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{self, ClearType},
};

use vip8_core::FrameBuffer;

const TITLE: &str = "VIP-8";

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// It is drawn into the terminal with half-block characters, two pixel rows per line,
/// so the whole frame fits in 64x16 cells plus a border.
/// The display only gets a call to `render` when the scheduler says a frame is due.
///
/// Creating a Display takes over the terminal (raw mode, alternate screen);
/// dropping it gives the terminal back.
pub struct Display {
    out: Stdout,
    last_frame: Option<Vec<String>>,
    last_beeping: bool,
}

impl Display {
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Display {
            out,
            last_frame: None,
            last_beeping: false,
        })
    }

    /// Formats a Chip-8 FrameBuffer as lines of terminal text.
    ///
    /// Each pair of pixel rows becomes one line where every cell is one of
    /// ` ` (both off), `▀` (top on), `▄` (bottom on), or `█` (both on).
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn frame_to_lines(frame: &FrameBuffer) -> Vec<String> {
        let rows: Vec<_> = frame.rows().collect();
        rows.chunks(2)
            .map(|pair| {
                let top = pair[0];
                let bottom = pair.get(1);
                (0..frame.width())
                    .map(|x| match (top[x], bottom.map_or(false, |row| row[x])) {
                        (false, false) => ' ',
                        (true, false) => '▀',
                        (false, true) => '▄',
                        (true, true) => '█',
                    })
                    .collect()
            })
            .collect()
    }

    /// Draws the frame inside a border. Unchanged frames are not redrawn.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `beeping` whether the sound timer is running; shown in the title bar
    pub fn render(&mut self, frame: &FrameBuffer, beeping: bool) -> io::Result<()> {
        let lines = Display::frame_to_lines(frame);
        if self.last_frame.as_ref() == Some(&lines) && self.last_beeping == beeping {
            return Ok(());
        }

        let width = frame.width();
        let title = if beeping {
            format!("{} ♪", TITLE)
        } else {
            TITLE.to_string()
        };
        let header = format!("┌{:─<width$}┐", title, width = width);
        let footer = format!("└{}┘", "─".repeat(width));

        queue!(self.out, cursor::MoveTo(0, 0), Print(header))?;
        for (row, line) in lines.iter().enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(0, row as u16 + 1),
                Print(format!("│{}│", line))
            )?;
        }
        queue!(
            self.out,
            cursor::MoveTo(0, lines.len() as u16 + 1),
            Print(footer)
        )?;
        self.out.flush()?;

        self.last_frame = Some(lines);
        self.last_beeping = beeping;
        Ok(())
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // nothing sensible to do if the terminal can't be restored
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
