//! Markup tag rewriting.
//!
//! Converts one markup tag's raw bytes into guest-syntax-valid replacement
//! bytes of identical byte length, so every later absolute-offset placement
//! stays valid. Attribute values are erased rather than preserved: exact
//! values are never needed downstream, and erasure prevents arbitrary user
//! text from parsing as guest syntax.
//!
//!   Opening tag (no attrs):  `<div>`            → ` div;`
//!   Opening tag (attrs):     `<div id="x">`     → ` div id=""; `
//!   Reserved attr name:      `<div class="y">`  → ` div;          `
//!   Closing tag:             `</div>`           → ` div1;` (counter rotates 1-0)

use std::sync::LazyLock;

use regex::Regex;

use crate::QuoteStyle;
use crate::ShadowError;
use crate::ShadowResult;
use crate::fragment::Fragment;
use crate::node::Node;

/// Fixed open-tag grammar: `<`, tag name, optional whitespace, attribute
/// text without a nested `>`, then `>`. Anything else yields no fragment.
static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\A<([a-zA-Z0-9]+)(\s*)([^>]*)>\z").unwrap_or_else(|_| unreachable!())
});

static CLOSE_TAG: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\A</([a-zA-Z0-9]+)>\z").unwrap_or_else(|_| unreachable!()));

/// `name="value"` / `name='value'` attribute pairs inside the attribute
/// text. Unquoted and boolean attributes are left to the blank fill.
static VALUED_ATTR: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"([a-zA-Z0-9_:.-]+)=("[^"]*"|'[^']*')"#).unwrap_or_else(|_| unreachable!())
});

/// Identifiers reserved by the guest language. An attribute with one of
/// these names cannot survive as `name=...` without producing guest syntax
/// errors, so the whole pair is blanked.
const RESERVED_WORDS: [&str; 41] = [
	"BEGIN", "END", "alias", "and", "begin", "break", "case", "class", "def", "defined?", "do",
	"else", "elsif", "end", "ensure", "false", "for", "if", "in", "module", "next", "nil", "not",
	"or", "redo", "rescue", "retry", "return", "self", "super", "then", "true", "undef", "unless",
	"until", "when", "while", "yield", "__FILE__", "__LINE__", "__ENCODING__",
];

fn is_reserved(name: &str) -> bool {
	RESERVED_WORDS.contains(&name)
}

/// Rewrites markup open/close tags into byte-length-identical guest
/// statements.
///
/// The close-tag counter is per-instance state: consecutive sibling closers
/// must not be textually identical (duplicate-statement false positives
/// downstream), so one transformer instance must process a whole document
/// and must not be shared across documents.
#[derive(Debug)]
pub struct MarkupTagTransformer {
	quote_style: QuoteStyle,
	close_counter: u8,
}

impl MarkupTagTransformer {
	pub fn new(quote_style: QuoteStyle) -> Self {
		Self {
			quote_style,
			close_counter: 0,
		}
	}

	/// Transform one opening markup tag. Returns `None` for raw text that
	/// does not match the fixed open-tag grammar.
	pub fn transform_open_tag<'a>(&self, node: &'a Node) -> ShadowResult<Option<Fragment<'a>>> {
		let Some(lexeme) = node.content.as_ref() else {
			return Ok(None);
		};

		let Some(content) = self.open_tag_content(&lexeme.value) else {
			return Ok(None);
		};

		self.build_fragment(content, node, lexeme.span.start, lexeme.value.len())
	}

	/// Transform one closing markup tag, advancing the rotation counter.
	pub fn transform_close_tag<'a>(&mut self, node: &'a Node) -> ShadowResult<Option<Fragment<'a>>> {
		let Some(lexeme) = node.content.as_ref() else {
			return Ok(None);
		};

		let Some(caps) = CLOSE_TAG.captures(&lexeme.value) else {
			return Ok(None);
		};

		let digit = self.next_close_tag_count();
		let content = format!(" {}{digit};", &caps[1]);
		self.build_fragment(content, node, lexeme.span.start, lexeme.value.len())
	}

	fn build_fragment<'a>(
		&self,
		content: String,
		node: &'a Node,
		position: usize,
		expected: usize,
	) -> ShadowResult<Option<Fragment<'a>>> {
		if content.len() != expected {
			return Err(ShadowError::LengthMismatch {
				expected,
				actual: content.len(),
				position,
			});
		}

		Ok(Some(Fragment {
			position,
			tag_opening: "",
			tag_closing: "",
			prefix: String::new(),
			content,
			location: node.location,
			origin: None,
		}))
	}

	fn next_close_tag_count(&mut self) -> u8 {
		self.close_counter = (self.close_counter + 1) % 10;
		self.close_counter
	}

	/// Build the replacement text for an open tag, or `None` when the raw
	/// bytes do not match the grammar.
	fn open_tag_content(&self, raw: &str) -> Option<String> {
		let caps = OPEN_TAG.captures(raw)?;
		let name = caps.get(1).unwrap_or_else(|| unreachable!());
		let attrs = caps.get(3).unwrap_or_else(|| unreachable!());

		// Start from an all-blank buffer that keeps line breaks where they
		// are; every rewritten piece lands at its original byte offset.
		let mut out: Vec<u8> = raw
			.bytes()
			.map(|b| if matches!(b, b'\n' | b'\r') { b } else { b' ' })
			.collect();

		out[name.start()..name.end()].copy_from_slice(name.as_str().as_bytes());

		let mut rewritten_end: Option<usize> = None;
		for pair in VALUED_ATTR.captures_iter(attrs.as_str()) {
			let attr_name = pair.get(1).unwrap_or_else(|| unreachable!());
			if is_reserved(attr_name.as_str()) {
				continue;
			}

			// `name=` + empty quoted literal, in place. The closing quote
			// lands on the first byte of the erased value; if that byte is a
			// line break the pair is blanked instead.
			let start = attrs.start() + attr_name.start();
			let equals_at = start + attr_name.len();
			if matches!(out[equals_at + 2], b'\n' | b'\r') {
				continue;
			}

			out[start..equals_at].copy_from_slice(attr_name.as_str().as_bytes());
			out[equals_at] = b'=';
			out[equals_at + 1] = self.quote_style.as_byte();
			out[equals_at + 2] = self.quote_style.as_byte();
			rewritten_end = Some(equals_at + 3);
		}

		let terminator_at = match rewritten_end {
			Some(end) => end,
			// Every attribute was reserved (or there were no pairs at all):
			// the terminator sits right after the tag name, except for a
			// bare tag where it takes the `>` slot.
			None if attrs.as_str().is_empty() => raw.len() - 1,
			None => name.end(),
		};
		place_terminator(&mut out, terminator_at);

		// Blanking and in-place rewrites never change the byte count; the
		// caller re-asserts against the node's span.
		debug_assert_eq!(out.len(), raw.len());
		String::from_utf8(out).ok()
	}
}

/// Write `;` at `from`, or at the next byte that is not a line break.
/// The final `>` slot is always available.
fn place_terminator(out: &mut [u8], from: usize) {
	let mut at = from.min(out.len() - 1);
	while at < out.len() - 1 && matches!(out[at], b'\n' | b'\r') {
		at += 1;
	}
	out[at] = b';';
}
