//! Marker-delimited replacement of generated code.
//!
//! Target files carry two sentinel comment lines:
//!
//! ```cpp
//! // #BEGIN# generated code. Do not remove this marker.
//! // #END# generated code. Do not remove this marker.
//! ```
//!
//! Everything up to and including the first begin line, and everything from
//! the first end line after it, is kept byte for byte. The lines in between are
//! replaced wholesale. No file I/O happens here.

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("no `#BEGIN#` marker line found")]
    MissingBegin,
    #[error("no `#END#` marker line after the `#BEGIN#` marker on line {begin_line}")]
    MissingEnd { begin_line: usize },
    #[error("generated text contains a marker line: {line:?}")]
    FragmentContainsMarker { line: String },
}

/// A buffer split around its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRegions<'a> {
    /// Start of the buffer through the begin line, including its line ending.
    pub prefix: &'a str,
    /// Lines strictly between the two markers.
    pub generated: &'a str,
    /// End line through the end of the buffer.
    pub suffix: &'a str,
    /// 1-based line numbers of the two markers.
    pub begin_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone)]
pub struct MarkerPatcher {
    begin: Regex,
    end: Regex,
}

impl MarkerPatcher {
    /// Build a patcher for markers written after `comment_token` (`//` for C++).
    pub fn new(comment_token: &str) -> Result<Self, regex::Error> {
        let token = regex::escape(comment_token.trim());
        Ok(Self {
            begin: Regex::new(&format!(r"^\s*{token}\s*#BEGIN#"))?,
            end: Regex::new(&format!(r"^\s*{token}\s*#END#"))?,
        })
    }

    pub fn is_begin_marker(&self, line: &str) -> bool {
        self.begin.is_match(line)
    }

    pub fn is_end_marker(&self, line: &str) -> bool {
        self.end.is_match(line)
    }

    /// Locate the first begin marker and the first end marker after it.
    pub fn split<'a>(&self, buffer: &'a str) -> Result<MarkerRegions<'a>, MarkerError> {
        let mut offset = 0;
        let mut begin: Option<(usize, usize)> = None;

        for (index, line) in buffer.split_inclusive('\n').enumerate() {
            let line_start = offset;
            offset += line.len();
            match begin {
                None if self.is_begin_marker(line) => begin = Some((index + 1, offset)),
                Some((begin_line, prefix_end)) if self.is_end_marker(line) => {
                    return Ok(MarkerRegions {
                        prefix: &buffer[..prefix_end],
                        generated: &buffer[prefix_end..line_start],
                        suffix: &buffer[line_start..],
                        begin_line,
                        end_line: index + 1,
                    });
                }
                _ => {}
            }
        }

        match begin {
            None => Err(MarkerError::MissingBegin),
            Some((begin_line, _)) => Err(MarkerError::MissingEnd { begin_line }),
        }
    }

    /// Replace the region between the markers with `fragment`.
    ///
    /// A non-empty `fragment` is terminated with a newline if it lacks one, so
    /// the end marker always starts its own line.
    pub fn patch(&self, buffer: &str, fragment: &str) -> Result<String, MarkerError> {
        let regions = self.split(buffer)?;

        if let Some(line) = fragment
            .lines()
            .find(|l| self.is_begin_marker(l) || self.is_end_marker(l))
        {
            return Err(MarkerError::FragmentContainsMarker {
                line: line.to_string(),
            });
        }

        let mut out =
            String::with_capacity(regions.prefix.len() + fragment.len() + regions.suffix.len() + 1);
        out.push_str(regions.prefix);
        out.push_str(fragment);
        if !fragment.is_empty() && !fragment.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(regions.suffix);

        tracing::trace!(
            begin_line = regions.begin_line,
            end_line = regions.end_line,
            replaced_bytes = regions.generated.len(),
            inserted_bytes = fragment.len(),
            "patched marker region"
        );
        Ok(out)
    }
}
