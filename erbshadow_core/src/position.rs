//! Byte-offset location model shared by every component.
//!
//! All offsets, paddings, and lengths in this crate are **byte** counts.
//! The shadow document must be byte-length-identical to the template, so
//! character-based indexing would silently break on multi-byte content.

/// A half-open byte range `[start, end)` into the original template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
	/// Absolute byte offset of the first byte.
	pub start: usize,
	/// Absolute byte offset one past the last byte.
	pub end: usize,
}

impl Span {
	pub fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}

	/// Byte length of the span.
	pub fn len(&self) -> usize {
		self.end.saturating_sub(self.start)
	}

	pub fn is_empty(&self) -> bool {
		self.end <= self.start
	}
}

/// A line/column pair. Lines are 1-based; columns are 0-based **byte**
/// columns within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
	pub line: usize,
	pub column: usize,
}

impl LineCol {
	pub fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}
}

impl Default for LineCol {
	fn default() -> Self {
		Self { line: 1, column: 0 }
	}
}

/// Start/end line-column positions of one AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
	pub start: LineCol,
	pub end: LineCol,
}

impl Location {
	pub fn new(start: LineCol, end: LineCol) -> Self {
		Self { start, end }
	}
}
