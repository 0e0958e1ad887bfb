//! Core utilities shared by the command-line front end

use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter collecting output into a minus pager
///
/// Diff output of whole documents easily runs past one screen. When stdout is a terminal the
/// session writes into this adapter and hands the pager over with [`PagedOutput::show`] once
/// the command is done.
///
/// ```ignore
/// let mut output = PagedOutput::new();
/// writeln!(output, "{}", markup)?;
/// output.show()?;
/// ```
#[derive(Clone)]
pub struct PagedOutput {
    pager: Pager,
}

impl PagedOutput {
    pub fn new() -> Self {
        Self {
            pager: Pager::new(),
        }
    }

    pub fn show(self) -> anyhow::Result<()> {
        minus::page_all(self.pager)?;
        Ok(())
    }
}

impl Default for PagedOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for PagedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
