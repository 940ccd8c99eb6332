/// Crossterm display sink and surface size query
use crossterm::{
    cursor::MoveTo,
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use glyph3d_core::{ColorTag, DisplaySink, Frame, SurfaceSize};
use std::collections::HashMap;
use std::io::{self, Write};

/// Writes frames to a terminal (or any writer) with crossterm commands
pub struct TerminalSink<W: Write> {
    writer: W,
    palette: HashMap<ColorTag, Color>,
    default_color: Color,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            palette: HashMap::new(),
            default_color: Color::Reset,
        }
    }

    /// Register the foreground colour used for each tag. Tags without an
    /// entry are drawn in the terminal's default colour.
    pub fn register_palette(&mut self, entries: &[(ColorTag, Color)]) {
        self.palette.extend(entries.iter().copied());
    }

    pub fn color_for(&self, tag: ColorTag) -> Color {
        self.palette.get(&tag).copied().unwrap_or(self.default_color)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn flush(&mut self, frame: &Frame) -> io::Result<()> {
        let mut current: Option<Color> = None;

        for (y, row) in frame.rows().enumerate() {
            // Raw mode has no implicit carriage return, so position each row
            self.writer.queue(MoveTo(0, y as u16))?;
            for cell in row {
                let color = self.color_for(cell.color);
                if current != Some(color) {
                    self.writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                self.writer.queue(Print(cell.ch))?;
            }
        }

        self.writer.queue(ResetColor)?;
        self.writer.flush()
    }
}

/// Current terminal size in cells
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSize;

impl SurfaceSize for TerminalSize {
    fn surface_size(&self) -> io::Result<(usize, usize)> {
        let (width, height) = terminal::size()?;
        Ok((width as usize, height as usize))
    }
}

/// Keys that stop the renderer: Ctrl-C, `q` and Esc
pub fn is_interrupt(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph3d_core::{Camera, FrameBuffer};

    fn sample_frame() -> Frame {
        let mut fb = FrameBuffer::new(3, 2);
        fb.plot(0, 0, 1.0, 1);
        fb.plot(2, 1, 65.0, 2);
        fb.resolve(&Camera::default())
    }

    #[test]
    fn test_flush_writes_every_cell() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.register_palette(&[(1, Color::Cyan), (2, Color::Yellow)]);
        sink.flush(&sample_frame()).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains('@'));
        assert!(output.contains('~'));
        // Two row moves plus colour changes, never a bare newline
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_palette_lookup() {
        let mut sink = TerminalSink::new(io::sink());
        sink.register_palette(&[(3, Color::Green)]);
        assert_eq!(sink.color_for(3), Color::Green);
        assert_eq!(sink.color_for(0), Color::Reset);
        assert_eq!(sink.color_for(9), Color::Reset);
    }

    #[test]
    fn test_interrupt_keys() {
        assert!(is_interrupt(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(is_interrupt(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_interrupt(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_interrupt(&KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE)));
    }
}
