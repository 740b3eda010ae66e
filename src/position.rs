use std::fmt;
use std::rc::Rc;

use anyhow::anyhow;

/// A cursor into a [`Source`], advanced only by successful matches.
///
/// Positions are cheap to clone; the derivation chain behind `parent` is
/// shared. A failed match never produces a position at all, so there is
/// nothing to roll back on the caller's side.
#[derive(Clone)]
pub struct Position<'s> {
    pub source: &'s dyn Source,
    /// Byte offset into the source.
    pub byte_offset: usize,
    /// Number of line breaks preceding this point.
    pub line_number: usize,
    /// Bytes since the last line break.
    pub line_offset: usize,
    /// The position this one was derived from, if any. Kept for
    /// diagnostics; matching never consults it.
    pub parent: Option<Rc<Position<'s>>>,
}

impl<'s> Position<'s> {
    /// A position at the very beginning of a source.
    pub fn start(source: &'s dyn Source) -> Position<'s> {
        Position {
            source,
            byte_offset: 0,
            line_number: 0,
            line_offset: 0,
            parent: None,
        }
    }

    /// Check whether `literal` occurs at this position, delegating to the
    /// source. Returns the position just past the literal on success.
    pub fn matches(&self, literal: &str) -> Option<Position<'s>> {
        self.source.match_at(self, literal)
    }

    /// Move forward within the current line.
    pub fn advance(&mut self, bytes: usize) {
        self.byte_offset += bytes;
        self.line_offset += bytes;
    }

    /// Move forward past a line break.
    pub fn newline(&mut self) {
        self.byte_offset += 1;
        self.line_number += 1;
        self.line_offset = 0;
    }
}

impl<'s> fmt::Debug for Position<'s> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Position")
            .field("source", &self.source.name())
            .field("byte_offset", &self.byte_offset)
            .field("line_number", &self.line_number)
            .field("line_offset", &self.line_offset)
            .finish()
    }
}

/// Something text can be matched against. The engine needs exactly one
/// capability: does `literal` occur at `at`, and if so what position
/// follows it.
pub trait Source {
    /// A label for this source, used in diagnostics only.
    fn name(&self) -> &str;

    /// Check if `literal` occurs at `at`. On success the returned position
    /// is advanced past the literal, with line bookkeeping updated from
    /// the consumed bytes. Zero-length literals never match; comparison is
    /// byte for byte, no normalization.
    fn match_at<'s>(&self, at: &Position<'s>, literal: &str) -> Option<Position<'s>>;
}

/// The simplest possible source: a named blob of text held in memory.
#[derive(Debug)]
pub struct MemorySource {
    name: String,
    data: String,
}

impl MemorySource {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, data: D) -> MemorySource {
        MemorySource {
            name: name.into(),
            data: data.into(),
        }
    }

    /// A position at the beginning of this source.
    pub fn start(&self) -> Position<'_> {
        Position::start(self)
    }

    /// A position at an arbitrary byte offset, ensuring that `offset` is
    /// within bounds. Line bookkeeping is computed by scanning the prefix.
    pub fn position_at(&self, offset: usize) -> Result<Position<'_>, anyhow::Error> {
        if offset > self.data.len() {
            return Err(anyhow!(
                "offset beyond end of input, offset: {}, len: {}, source: {}",
                offset,
                self.data.len(),
                self.name
            ));
        }
        let mut pos = Position::start(self);
        for &b in &self.data.as_bytes()[..offset] {
            if b == b'\n' {
                pos.newline();
            } else {
                pos.advance(1);
            }
        }
        Ok(pos)
    }
}

impl Source for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn match_at<'s>(&self, at: &Position<'s>, literal: &str) -> Option<Position<'s>> {
        if literal.is_empty() {
            // Zero-width acceptance would loop forever upstream.
            return None;
        }
        let end = at.byte_offset.checked_add(literal.len())?;
        if self.data.get(at.byte_offset..end) != Some(literal) {
            return None;
        }
        let mut after = Position {
            source: at.source,
            byte_offset: at.byte_offset,
            line_number: at.line_number,
            line_offset: at.line_offset,
            parent: Some(Rc::new(at.clone())),
        };
        for b in literal.bytes() {
            if b == b'\n' {
                after.newline();
            } else {
                after.advance(1);
            }
        }
        Some(after)
    }
}
