//! Fragments and the block stack that accumulates them.

use crate::ShadowError;
use crate::ShadowResult;
use crate::node::Node;
use crate::position::Location;
use crate::tags;

/// An immutable byte-range replacement record. `prefix + content` is the
/// text overlaid onto the shadow document starting at `position`.
///
/// A fragment is created once by a transformer, pushed into a scope,
/// possibly spliced into the parent scope on block close, and rewritten at
/// most once (the last-output prefix adjustment). `origin` is `None` for
/// synthetic placeholders and markup rewrites.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment<'a> {
	/// Absolute byte offset where `prefix` begins.
	pub position: usize,
	/// Opening lexeme of the originating tag, `""` when synthetic.
	pub tag_opening: &'a str,
	/// Closing lexeme of the originating tag, `""` when synthetic.
	pub tag_closing: &'a str,
	/// Transformed prefix filling the opening delimiter's slot.
	pub prefix: String,
	/// Terminated guest-language content.
	pub content: String,
	/// Line/column range, used for same-line comment suppression.
	pub location: Location,
	/// The originating AST node, if any.
	pub origin: Option<&'a Node>,
}

impl Fragment<'_> {
	/// The full replacement text.
	pub fn code(&self) -> String {
		format!("{}{}", self.prefix, self.content)
	}

	/// Byte length of the replacement text.
	pub fn byte_len(&self) -> usize {
		self.prefix.len() + self.content.len()
	}

	/// Absolute byte offset one past the replacement text.
	pub fn end_position(&self) -> usize {
		self.position + self.byte_len()
	}

	pub fn is_output(&self) -> bool {
		tags::is_output(self.tag_opening)
	}

	pub fn is_comment(&self) -> bool {
		tags::is_comment(self.tag_opening)
	}

	/// Whether `other` starts on the line this fragment ends on. Assumes
	/// `self` precedes `other` in document order.
	pub fn same_line(&self, other: &Fragment<'_>) -> bool {
		self.location.end.line == other.location.start.line
	}
}

/// Fragments accumulated for one currently-open block.
pub type Scope<'a> = Vec<Fragment<'a>>;

/// An explicit, heap-owned stack of scopes. Index 0 is the root scope and
/// can never be popped; it becomes the final fragment list when traversal
/// ends.
#[derive(Debug)]
pub struct BlockStack<'a> {
	scopes: Vec<Scope<'a>>,
}

impl<'a> BlockStack<'a> {
	pub fn new() -> Self {
		Self {
			scopes: vec![Scope::new()],
		}
	}

	/// The scope fragments are currently appended to.
	pub fn current(&self) -> &Scope<'a> {
		// A scope always exists: the root is never popped.
		self.scopes.last().unwrap_or_else(|| unreachable!())
	}

	pub fn current_mut(&mut self) -> &mut Scope<'a> {
		self.scopes.last_mut().unwrap_or_else(|| unreachable!())
	}

	/// Open a new scope for a block body.
	pub fn push_scope(&mut self) {
		self.scopes.push(Scope::new());
	}

	/// Close the innermost scope and return its fragments. Popping the root
	/// scope is a fatal invariant violation.
	pub fn pop_scope(&mut self) -> ShadowResult<Scope<'a>> {
		if self.scopes.len() <= 1 {
			return Err(ShadowError::RootScopePop);
		}

		Ok(self.scopes.pop().unwrap_or_else(|| unreachable!()))
	}

	/// Append a fragment to the current scope.
	pub fn push_fragment(&mut self, fragment: Fragment<'a>) {
		self.current_mut().push(fragment);
	}

	/// Number of open scopes, root included.
	pub fn depth(&self) -> usize {
		self.scopes.len()
	}

	/// Tear down the stack, yielding the root scope. Remaining unclosed
	/// scopes are spliced into their parents in order, mirroring what a
	/// well-formed close sequence would have produced.
	pub fn into_fragments(mut self) -> Vec<Fragment<'a>> {
		while self.scopes.len() > 1 {
			let scope = self.scopes.pop().unwrap_or_else(|| unreachable!());
			self.current_mut().extend(scope);
		}

		self.scopes.pop().unwrap_or_else(|| unreachable!())
	}
}

impl Default for BlockStack<'_> {
	fn default() -> Self {
		Self::new()
	}
}
