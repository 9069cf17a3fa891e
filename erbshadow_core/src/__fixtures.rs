//! Test-only template parsing.
//!
//! The production engine consumes an externally parsed AST, so the tests
//! need a way to build byte-accurate [`Node`] trees from literal template
//! strings. This parser covers the shapes the suite exercises — ERB-style
//! code tags, markup open/close tags, plain text — and nothing more. Node
//! kinds are classified the way the upstream parser would classify them,
//! from the leading keyword of the tag content.

use crate::node::Lexeme;
use crate::node::Node;
use crate::node::NodeKind;
use crate::position::LineCol;
use crate::position::Location;
use crate::position::Span;

/// Parse a template into a flat `Document` node. Traversal order is all
/// the engine depends on, so body nodes sit as siblings between their
/// opener and closer exactly as the scanner encounters them.
pub fn parse_template(source: &str) -> Node {
	let bytes = source.as_bytes();
	let mut children = Vec::new();
	let mut offset = 0;

	while offset < bytes.len() {
		let rest = &source[offset..];

		if rest.starts_with("<%") {
			let (node, next) = scan_code_tag(source, offset);
			children.push(node);
			offset = next;
		} else if rest.starts_with("</") {
			let (node, next) = scan_markup_tag(source, offset, NodeKind::CloseTag);
			children.push(node);
			offset = next;
		} else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphanumeric())
		{
			let (node, next) = scan_markup_tag(source, offset, NodeKind::OpenTag);
			children.push(node);
			offset = next;
		} else {
			let (node, next) = scan_text(source, offset);
			children.push(node);
			offset = next;
		}
	}

	Node {
		kind: NodeKind::Document,
		tag_opening: None,
		tag_closing: None,
		content: None,
		location: location_of(source, 0, source.len()),
		children,
	}
}

/// Convenience wrapper: parse and extract in one step with a config.
pub fn shadow_of(source: &str, config: &crate::ShadowConfig) -> crate::ShadowDocument {
	let document = parse_template(source);
	crate::extract_shadow(source.as_bytes(), &document, config).expect("extraction failed")
}

/// Convenience wrapper with the default config, returning the shadow as a
/// string for readable assertions.
pub fn shadow_text(source: &str) -> String {
	let shadow = shadow_of(source, &crate::ShadowConfig::default());
	shadow.to_str().expect("shadow is not UTF-8").to_string()
}

/// Parse and run only the fragment-collection half of the pipeline.
pub fn fragments_of(source: &str) -> Vec<OwnedFragment> {
	let document = parse_template(source);
	let extractor = crate::Extractor::new(source.as_bytes(), &crate::ShadowConfig::default());
	extractor
		.extract(&document)
		.expect("extraction failed")
		.iter()
		.map(OwnedFragment::from)
		.collect()
}

/// A fragment snapshot that outlives the node tree it borrowed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedFragment {
	pub position: usize,
	pub code: String,
	pub is_comment: bool,
	pub is_output: bool,
	pub origin_offset: Option<usize>,
}

impl From<&crate::Fragment<'_>> for OwnedFragment {
	fn from(fragment: &crate::Fragment<'_>) -> Self {
		Self {
			position: fragment.position,
			code: fragment.code(),
			is_comment: fragment.is_comment(),
			is_output: fragment.is_output(),
			origin_offset: fragment.origin.map(Node::opening_offset),
		}
	}
}

fn scan_code_tag(source: &str, start: usize) -> (Node, usize) {
	let close_rel = source[start..].find("%>").expect("unterminated code tag");
	let mut closing_start = start + close_rel;
	let end = closing_start + 2;

	// `-%>` is a single closing lexeme.
	if source.as_bytes()[closing_start - 1] == b'-' {
		closing_start -= 1;
	}

	let opening_len = match source.as_bytes().get(start + 2) {
		Some(b'=' | b'#' | b'-') => 3,
		_ => 2,
	};
	let opening_end = start + opening_len;

	let tag_opening = Lexeme::new(&source[start..opening_end], Span::new(start, opening_end));
	let tag_closing = Lexeme::new(&source[closing_start..end], Span::new(closing_start, end));
	let content = Lexeme::new(
		&source[opening_end..closing_start],
		Span::new(opening_end, closing_start),
	);

	let kind = guest_kind(&tag_opening.value, &content.value);
	let node = Node {
		kind,
		tag_opening: Some(tag_opening),
		tag_closing: Some(tag_closing),
		content: Some(content),
		location: location_of(source, start, end),
		children: Vec::new(),
	};

	(node, end)
}

fn scan_markup_tag(source: &str, start: usize, kind: NodeKind) -> (Node, usize) {
	let close_rel = source[start..].find('>').expect("unterminated markup tag");
	let end = start + close_rel + 1;

	let node = Node {
		kind,
		tag_opening: None,
		tag_closing: None,
		content: Some(Lexeme::new(&source[start..end], Span::new(start, end))),
		location: location_of(source, start, end),
		children: Vec::new(),
	};

	(node, end)
}

fn scan_text(source: &str, start: usize) -> (Node, usize) {
	// Byte search: `start + 1` may sit inside a multi-byte character.
	let end = source.as_bytes()[start + 1..]
		.iter()
		.position(|&byte| byte == b'<')
		.map_or(source.len(), |rel| start + 1 + rel);

	let node = Node {
		kind: NodeKind::Text,
		tag_opening: None,
		tag_closing: None,
		content: Some(Lexeme::new(&source[start..end], Span::new(start, end))),
		location: location_of(source, start, end),
		children: Vec::new(),
	};

	(node, end)
}

/// Classify a code tag the way the upstream parser does: output and
/// comment tags are always leaf content; statement tags are classified by
/// their leading keyword, with trailing `do` opening a generic block.
fn guest_kind(tag_opening: &str, content: &str) -> NodeKind {
	if matches!(tag_opening, "<%=" | "<%#") {
		return NodeKind::Content;
	}

	let trimmed = content.trim();
	match trimmed.split_whitespace().next().unwrap_or("") {
		"if" | "elsif" => NodeKind::If,
		"unless" => NodeKind::Unless,
		"case" => NodeKind::Case,
		"while" => NodeKind::While,
		"until" => NodeKind::Until,
		"for" => NodeKind::For,
		"begin" => NodeKind::Begin,
		"end" => NodeKind::End,
		"else" => NodeKind::Else,
		"when" => NodeKind::When,
		"in" => NodeKind::In,
		"rescue" => NodeKind::Rescue,
		"ensure" => NodeKind::Ensure,
		_ => {
			let opens_block = trimmed == "do"
				|| trimmed.ends_with(" do")
				|| (trimmed.contains(" do |") && trimmed.ends_with('|'));
			if opens_block {
				NodeKind::Block
			} else {
				NodeKind::Content
			}
		}
	}
}

fn location_of(source: &str, start: usize, end: usize) -> Location {
	Location::new(linecol_at(source, start), linecol_at(source, end))
}

/// Line/byte-column of an absolute byte offset. O(n), which is fine for
/// fixtures.
fn linecol_at(source: &str, offset: usize) -> LineCol {
	let mut line = 1;
	let mut column = 0;

	for &byte in &source.as_bytes()[..offset] {
		if byte == b'\n' {
			line += 1;
			column = 0;
		} else {
			column += 1;
		}
	}

	LineCol::new(line, column)
}
