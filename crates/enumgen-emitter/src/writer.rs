//! Indentation-aware string builder used by the sinks.

use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SourceWriter {
    output: String,
    indent_level: u32,
    indent_str: String,
}

impl SourceWriter {
    pub fn new(indent_str: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: indent_str.into(),
        }
    }

    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub fn write_i64(&mut self, value: i64) {
        let _ = write!(self.output, "{value}");
    }

    /// Write `s` as the body of a C string literal.
    pub fn write_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                // Three-digit octal, so a following hex-looking char stays literal.
                c if (c as u32) < 0x20 || c == '\x7F' => {
                    let _ = write!(self.output, "\\{:03o}", c as u32);
                }
                _ => self.output.push(c),
            }
        }
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_str);
        }
    }

    pub const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn finish(self) -> String {
        self.output
    }
}
