//! Line buffer: the in-memory copy of a backing text file.
//!
//! All positional bookkeeping in the stores is expressed in 0-based line
//! numbers of this buffer. The buffer remembers the file's line terminator
//! and whether the last line was terminated, so a write reproduces every
//! untouched byte.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, SpawnError};

/// Line terminator detected on load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(pos) if pos > 0 && text.as_bytes()[pos - 1] == b'\r' => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    ending: LineEnding,
    final_newline: bool,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            ending: LineEnding::Lf,
            final_newline: true,
        }
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file into a buffer. A missing file is `SpawnError::NotFound`.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::from_text(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SpawnError::NotFound(path.to_path_buf())),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let ending = LineEnding::detect(text);
        let final_newline = text.is_empty() || text.ends_with('\n');
        let lines = text
            .split_inclusive('\n')
            .map(|line| {
                let line = line.strip_suffix('\n').unwrap_or(line);
                line.strip_suffix('\r').unwrap_or(line).to_string()
            })
            .collect();
        Self {
            lines,
            ending,
            final_newline,
        }
    }

    /// Same lines, written with `ending`.
    pub fn with_ending(mut self, ending: LineEnding) -> Self {
        self.ending = ending;
        self
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn ending(&self) -> LineEnding {
        self.ending
    }

    /// Overwrite a single line in place.
    pub fn set_line(&mut self, index: usize, text: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = text.into();
        }
    }

    /// Replace the inclusive range `[start, end]` and return the change in
    /// line count.
    pub fn replace_range(&mut self, start: usize, end: usize, new_lines: Vec<String>) -> isize {
        let old_count = end + 1 - start;
        let new_count = new_lines.len();
        self.lines.splice(start..=end, new_lines);
        new_count as isize - old_count as isize
    }

    /// Insert lines so the first one lands at `pos`.
    pub fn insert_at(&mut self, pos: usize, new_lines: Vec<String>) -> usize {
        let count = new_lines.len();
        self.lines.splice(pos..pos, new_lines);
        count
    }

    /// Remove the inclusive range `[start, end]` and return how many lines
    /// went.
    pub fn remove_range(&mut self, start: usize, end: usize) -> usize {
        self.lines.drain(start..=end).count()
    }

    /// Lines joined with `\n`, as handed to a whole-document parser.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// File content with the original line terminator.
    pub fn render(&self) -> String {
        let sep = self.ending.as_str();
        let mut out = self.lines.join(sep);
        if self.final_newline && !self.lines.is_empty() {
            out.push_str(sep);
        }
        out
    }

    /// Overwrite `path` with the buffer content.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}
