//! Borrowed AST node model.
//!
//! The engine never parses template text itself — an external markup+guest
//! parser produces this tree with byte-accurate ranges, and the engine only
//! slices ranges it is handed. Nodes are owned by the caller and borrowed
//! read-only for the duration of one traversal.

use crate::position::Location;
use crate::position::Span;

/// One lexeme reported by the upstream parser: its text and the byte range
/// it occupies in the original template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
	pub value: String,
	pub span: Span,
}

impl Lexeme {
	pub fn new(value: impl Into<String>, span: Span) -> Self {
		Self {
			value: value.into(),
			span,
		}
	}
}

/// The kind tag of an AST node, consumed via exhaustive matching in the
/// traversal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NodeKind {
	/// Leaf code node: `<% .. %>`, `<%= .. %>`, or `<%# .. %>`.
	Content,
	/// Generic `do`-block opener.
	Block,
	If,
	Unless,
	Case,
	While,
	Until,
	For,
	Begin,
	/// Terminal block closer.
	End,
	/// Branch separators. Each closes the previous branch scope and opens
	/// its own.
	Else,
	When,
	In,
	Rescue,
	Ensure,
	/// Markup opening tag, e.g. `<div id="x">`.
	OpenTag,
	/// Markup closing tag, e.g. `</div>`.
	CloseTag,
	/// Plain markup text. Carries no guest code; never rewritten.
	Text,
	/// Document root.
	Document,
}

impl NodeKind {
	/// True for nodes holding guest code (as opposed to markup).
	pub fn is_code(self) -> bool {
		matches!(
			self,
			Self::Content
				| Self::Block
				| Self::If
				| Self::Unless
				| Self::Case
				| Self::While
				| Self::Until
				| Self::For
				| Self::Begin
				| Self::End
				| Self::Else
				| Self::When
				| Self::In
				| Self::Rescue
				| Self::Ensure
		)
	}

	/// True for nodes that open a new scope on the block stack.
	pub fn opens_scope(self) -> bool {
		matches!(
			self,
			Self::Block
				| Self::If
				| Self::Unless
				| Self::Case
				| Self::While
				| Self::Until
				| Self::For
				| Self::Begin
		)
	}

	/// True for branch separators: closers that immediately reopen a scope.
	pub fn is_branch_separator(self) -> bool {
		matches!(
			self,
			Self::Else | Self::When | Self::In | Self::Rescue | Self::Ensure
		)
	}
}

/// One element of the externally parsed template tree.
///
/// `tag_opening`/`tag_closing` are the tag delimiter lexemes for code
/// nodes (`<%`, `%>`). For markup tags, `content` holds the raw tag text
/// spanning the whole tag (`<div id="x">`). Markup text nodes carry only
/// a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
	pub kind: NodeKind,
	pub tag_opening: Option<Lexeme>,
	pub tag_closing: Option<Lexeme>,
	pub content: Option<Lexeme>,
	pub location: Location,
	pub children: Vec<Node>,
}

impl Node {
	/// The opening-lexeme text, or `""` for nodes without one.
	pub fn tag_opening_value(&self) -> &str {
		self.tag_opening.as_ref().map_or("", |l| l.value.as_str())
	}

	/// The closing-lexeme text, or `""` for nodes without one.
	pub fn tag_closing_value(&self) -> &str {
		self.tag_closing.as_ref().map_or("", |l| l.value.as_str())
	}

	/// The content text, or `""` for nodes without content.
	pub fn content_value(&self) -> &str {
		self.content.as_ref().map_or("", |l| l.value.as_str())
	}

	/// Absolute byte offset of the opening delimiter, falling back to the
	/// content span for nodes without delimiters.
	pub fn opening_offset(&self) -> usize {
		self
			.tag_opening
			.as_ref()
			.map_or_else(|| self.content.as_ref().map_or(0, |l| l.span.start), |l| l.span.start)
	}

	/// An `if` node whose content opens with the `elsif` keyword closes the
	/// previous branch before opening its own.
	pub fn is_elsif(&self) -> bool {
		self.kind == NodeKind::If && self.content_value().trim_start().starts_with("elsif")
	}

	/// Whether this subtree contains any guest code node. Used to decide if
	/// a markup open tag can be rewritten wholesale: a tag with guest code
	/// in attribute position must be left blank so the embedded fragments
	/// can occupy their own spans.
	pub fn contains_code(&self) -> bool {
		self.kind.is_code() || self.children.iter().any(Node::contains_code)
	}
}
