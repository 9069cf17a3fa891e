//! Block placeholder synthesis.
//!
//! A block whose body is pure markup contributes no fragments, and the
//! guest-language linter would flag the resulting empty body. When a
//! closing scope holds exactly one fragment (the opener itself), a neutral
//! filler statement is synthesized into the markup-only gap.

use crate::fragment::Fragment;
use crate::node::Node;

/// The minimal "discard a null value" statement.
pub const PLACEHOLDER_CONTENT: &str = "_ = nil;";

/// Synthesizes placeholder fragments from the raw template bytes.
#[derive(Debug)]
pub struct PlaceholderBuilder<'a> {
	source: &'a [u8],
}

impl<'a> PlaceholderBuilder<'a> {
	pub fn new(source: &'a [u8]) -> Self {
		Self { source }
	}

	/// Build a placeholder between the rendered end of `opener` and the
	/// opening delimiter of `closing`, or `None` when the gap cannot hold
	/// one.
	///
	/// The placeholder is line-anchored: the gap is advanced past its first
	/// line break if any, then the run of bytes up to the next line break
	/// (or gap end) must be at least as long as the placeholder text. The
	/// filler is space-padded to cover the run exactly.
	pub fn build(&self, opener: &Fragment<'a>, closing: &'a Node) -> Option<Fragment<'a>> {
		let start = opener.end_position();
		let end = closing.opening_offset();
		let gap = self.source.get(start..end)?;

		let offset = match gap.iter().position(|&b| b == b'\n') {
			Some(newline) => newline + 1,
			None => 0,
		};

		// A CR before the next LF also ends the run: padding must never
		// overwrite a line-break byte.
		let run = &gap[offset..];
		let available = run
			.iter()
			.position(|&b| matches!(b, b'\n' | b'\r'))
			.unwrap_or(run.len());

		if available < PLACEHOLDER_CONTENT.len() {
			return None;
		}

		let mut content = String::with_capacity(available);
		content.push_str(PLACEHOLDER_CONTENT);
		content.extend(std::iter::repeat_n(' ', available - PLACEHOLDER_CONTENT.len()));

		Some(Fragment {
			position: start + offset,
			tag_opening: "",
			tag_closing: "",
			prefix: String::new(),
			content,
			location: opener.location,
			origin: None,
		})
	}
}
