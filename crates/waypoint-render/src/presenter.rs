#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter writes only the cells that changed since the previous
//! frame, tracking the current style and cursor so it emits an SGR or a
//! cursor move only when needed. Output is buffered and flushed once per
//! frame inside a synchronized-output bracket.

use std::io::{self, BufWriter, Write};

use crate::buffer::Buffer;
use crate::cell::{Cell, CellFlags, PackedRgba};

const BUFFER_CAPACITY: usize = 64 * 1024;
const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";
const SYNC_END: &[u8] = b"\x1b[?2026l";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    flags: CellFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            flags: cell.flags,
        }
    }
}

/// Counts for one presented frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentStats {
    pub cells_changed: usize,
    pub cursor_moves: usize,
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    current_style: Option<CellStyle>,
    cursor: Option<(u16, u16)>,
    sync_output: bool,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            current_style: None,
            cursor: None,
            sync_output: true,
        }
    }

    /// Disable the DEC 2026 synchronized-output bracket.
    #[must_use]
    pub fn without_sync_output(mut self) -> Self {
        self.sync_output = false;
        self
    }

    /// Present `next`, emitting only cells that differ from `prev`.
    /// With no previous buffer every cell is written.
    pub fn present(&mut self, next: &Buffer, prev: Option<&Buffer>) -> io::Result<PresentStats> {
        let _span = tracing::trace_span!("present", w = next.width(), h = next.height()).entered();

        let changed = match prev {
            Some(prev) => next.diff(prev),
            None => (0..next.height())
                .flat_map(|y| (0..next.width()).map(move |x| (x, y)))
                .collect(),
        };
        let mut stats = PresentStats {
            cells_changed: changed.len(),
            cursor_moves: 0,
        };
        if changed.is_empty() {
            return Ok(stats);
        }

        if self.sync_output {
            self.writer.write_all(SYNC_BEGIN)?;
        }
        for (x, y) in changed {
            let Some(cell) = next.get(x, y) else { continue };
            if cell.is_continuation() {
                continue;
            }
            if self.cursor != Some((x, y)) {
                write!(self.writer, "\x1b[{};{}H", y + 1, x + 1)?;
                stats.cursor_moves += 1;
            }
            self.emit_style(cell)?;
            let mut utf8 = [0u8; 4];
            self.writer
                .write_all(cell.symbol.encode_utf8(&mut utf8).as_bytes())?;
            let width = unicode_width::UnicodeWidthChar::width(cell.symbol).unwrap_or(1) as u16;
            self.cursor = Some((x.saturating_add(width.max(1)), y));
        }
        self.writer.write_all(b"\x1b[0m")?;
        self.current_style = None;
        if self.sync_output {
            self.writer.write_all(SYNC_END)?;
        }
        self.writer.flush()?;
        tracing::trace!(cells = stats.cells_changed, moves = stats.cursor_moves, "frame presented");
        Ok(stats)
    }

    fn emit_style(&mut self, cell: &Cell) -> io::Result<()> {
        let style = CellStyle::from_cell(cell);
        if self.current_style == Some(style) {
            return Ok(());
        }
        // Reset then apply: simpler than incremental SGR updates.
        self.writer.write_all(b"\x1b[0m")?;
        if !style.fg.is_transparent() {
            write!(
                self.writer,
                "\x1b[38;2;{};{};{}m",
                style.fg.r(),
                style.fg.g(),
                style.fg.b()
            )?;
        }
        if !style.bg.is_transparent() {
            write!(
                self.writer,
                "\x1b[48;2;{};{};{}m",
                style.bg.r(),
                style.bg.g(),
                style.bg.b()
            )?;
        }
        for (flag, code) in [
            (CellFlags::BOLD, 1),
            (CellFlags::DIM, 2),
            (CellFlags::ITALIC, 3),
            (CellFlags::UNDERLINE, 4),
            (CellFlags::REVERSE, 7),
        ] {
            if style.flags.contains(flag) {
                write!(self.writer, "\x1b[{code}m")?;
            }
        }
        self.current_style = Some(style);
        Ok(())
    }

    /// Clear the screen and forget tracked state. Call after a resize.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\x1b[2J\x1b[H")?;
        self.reset();
        self.writer.flush()
    }

    pub fn reset(&mut self) {
        self.current_style = None;
        self.cursor = None;
    }

    /// Flush and return the inner writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(presenter: Presenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner().expect("flush")).expect("utf8")
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let buf = Buffer::new(4, 2);
        let mut presenter = Presenter::new(Vec::new());
        let stats = presenter.present(&buf, Some(&buf)).expect("present");
        assert_eq!(stats.cells_changed, 0);
        assert!(output(presenter).is_empty());
    }

    #[test]
    fn changed_cell_emits_move_color_and_symbol() {
        let prev = Buffer::new(4, 2);
        let mut next = prev.clone();
        next.set(
            2,
            1,
            Cell::from_char('A').with_fg(PackedRgba::rgb(255, 0, 0)),
        );
        let mut presenter = Presenter::new(Vec::new()).without_sync_output();
        let stats = presenter.present(&next, Some(&prev)).expect("present");
        assert_eq!(stats.cells_changed, 1);
        let out = output(presenter);
        assert!(out.contains("\x1b[2;3H"));
        assert!(out.contains("\x1b[38;2;255;0;0m"));
        assert!(out.contains('A'));
    }

    #[test]
    fn adjacent_cells_share_one_cursor_move() {
        let mut next = Buffer::new(6, 1);
        next.set_string(0, 0, "abc", Cell::default(), 6);
        let mut presenter = Presenter::new(Vec::new());
        let stats = presenter.present(&next, None).expect("present");
        assert_eq!(stats.cursor_moves, 1);
        let out = output(presenter);
        assert!(out.starts_with("\x1b[?2026h"));
        assert!(out.ends_with("\x1b[?2026l"));
    }
}
