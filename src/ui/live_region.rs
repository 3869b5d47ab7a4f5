use std::io::{self, Write};

use crossterm::{cursor, terminal, QueueableCommand};

/// One terminal line that is redrawn in place until it is finished.
#[derive(Debug, Default)]
pub struct LiveRegion {
    drawn: bool,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    /// Replace the current line without moving to the next one.
    pub fn update(&mut self, out: &mut impl Write, content: &str) -> io::Result<()> {
        self.erase(out)?;
        out.write_all(content.as_bytes())?;
        out.flush()?;
        self.drawn = true;
        Ok(())
    }

    /// Replace the current line and leave it behind.
    pub fn finish(&mut self, out: &mut impl Write, content: &str) -> io::Result<()> {
        self.erase(out)?;
        out.write_all(content.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        self.drawn = false;
        Ok(())
    }

    pub fn clear(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.erase(out)?;
        out.flush()?;
        self.drawn = false;
        Ok(())
    }

    fn erase(&self, out: &mut impl Write) -> io::Result<()> {
        if self.drawn {
            out.queue(cursor::MoveToColumn(0))?;
            out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        }
        Ok(())
    }
}
