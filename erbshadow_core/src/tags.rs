//! Tag-opening classification.
//!
//! Classification is by exact opening lexeme: `<%=` is an output tag and
//! `<%#` is a comment tag. Everything else — `<%`, `<%-`, and friends — is
//! a statement tag. `<%- # note -%>` is a statement whose content happens
//! to be a guest comment, not a comment tag.

/// The three behavioral classes of a tag-delimited code fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
	/// `<%# ... %>` — never evaluated, becomes a guest comment.
	Comment,
	/// `<%= ... %>` — expression whose value is emitted into the markup.
	Output,
	/// `<% ... %>` — statement evaluated for effect.
	Statement,
}

/// Classify a tag-opening lexeme.
pub fn classify(tag_opening: &str) -> TagKind {
	match tag_opening {
		"<%=" => TagKind::Output,
		"<%#" => TagKind::Comment,
		_ => TagKind::Statement,
	}
}

pub fn is_output(tag_opening: &str) -> bool {
	classify(tag_opening) == TagKind::Output
}

pub fn is_comment(tag_opening: &str) -> bool {
	classify(tag_opening) == TagKind::Comment
}
