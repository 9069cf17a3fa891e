//! Traversal and assembly.
//!
//! Walks the externally parsed AST depth-first with an explicit work stack
//! (pathologically nested templates must not exhaust the call stack),
//! maintains the block stack, invokes the fragment transformers, and runs
//! the end-of-scope and end-of-document housekeeping.

use tracing::debug;
use tracing::trace;

use crate::ShadowConfig;
use crate::ShadowResult;
use crate::comment;
use crate::fragment::BlockStack;
use crate::fragment::Fragment;
use crate::markup::MarkupTagTransformer;
use crate::node::Node;
use crate::node::NodeKind;
use crate::placeholder::PlaceholderBuilder;
use crate::shadow::ShadowDocument;
use crate::statement;
use crate::tags;
use crate::tags::TagKind;

/// One traversal over one document.
///
/// An extractor is consumed by [`Extractor::extract`]: the close-tag
/// rotation counter is per-instance state, so reusing an instance across
/// documents (or re-running one) would leak state between them. Move
/// semantics make both impossible.
#[derive(Debug)]
pub struct Extractor<'a> {
	source: &'a [u8],
	stack: BlockStack<'a>,
	markup: MarkupTagTransformer,
	placeholders: PlaceholderBuilder<'a>,
}

impl<'a> Extractor<'a> {
	pub fn new(source: &'a [u8], config: &ShadowConfig) -> Self {
		Self {
			source,
			stack: BlockStack::new(),
			markup: MarkupTagTransformer::new(config.quote_style),
			placeholders: PlaceholderBuilder::new(source),
		}
	}

	/// Walk the document and return the ordered fragment list.
	///
	/// This never fails for input the upstream parser accepted; the error
	/// paths are internal-invariant violations (corrupt byte ranges) that
	/// abort the whole document.
	pub fn extract(mut self, document: &'a Node) -> ShadowResult<Vec<Fragment<'a>>> {
		debug!(bytes = self.source.len(), "extracting shadow fragments");

		let mut work: Vec<&'a Node> = document.children.iter().rev().collect();

		while let Some(node) = work.pop() {
			let descend = self.visit(node)?;
			if descend {
				work.extend(node.children.iter().rev());
			}
		}

		self.finalize()
	}

	/// Dispatch one node. Returns whether the walk descends into children.
	fn visit(&mut self, node: &'a Node) -> ShadowResult<bool> {
		match node.kind {
			NodeKind::Content => {
				self.visit_content(node);
				Ok(false)
			}
			NodeKind::Block
			| NodeKind::If
			| NodeKind::Unless
			| NodeKind::Case
			| NodeKind::While
			| NodeKind::Until
			| NodeKind::For
			| NodeKind::Begin => {
				// An elsif is spelled as an `if` node: close the previous
				// branch, then open its own.
				if node.is_elsif() {
					self.close_scope(node)?;
				}

				self.stack.push_scope();
				self.push_statement_fragment(node);
				Ok(true)
			}
			NodeKind::End => {
				self.close_scope(node)?;
				self.push_statement_fragment(node);
				Ok(false)
			}
			NodeKind::Else | NodeKind::When | NodeKind::In | NodeKind::Rescue | NodeKind::Ensure => {
				self.close_scope(node)?;
				self.stack.push_scope();
				self.push_statement_fragment(node);
				Ok(true)
			}
			NodeKind::OpenTag => {
				// A tag with guest code in attribute position cannot be
				// rewritten wholesale; its embedded fragments claim their
				// own spans instead.
				if node.contains_code() {
					return Ok(true);
				}

				if let Some(fragment) = self.markup.transform_open_tag(node)? {
					self.push_fragment(fragment);
				}
				Ok(false)
			}
			NodeKind::CloseTag => {
				if let Some(fragment) = self.markup.transform_close_tag(node)? {
					self.push_fragment(fragment);
				}
				Ok(false)
			}
			NodeKind::Text => Ok(false),
			NodeKind::Document => Ok(true),
		}
	}

	fn visit_content(&mut self, node: &'a Node) {
		let tag_opening = node.tag_opening_value();

		match tags::classify(tag_opening) {
			TagKind::Comment => {
				let Some(content) = comment::transform(node) else {
					return;
				};

				self.push_fragment(Fragment {
					position: node.opening_offset(),
					tag_opening: node.tag_opening_value(),
					tag_closing: node.tag_closing_value(),
					prefix: "  #".into(),
					content,
					location: node.location,
					origin: Some(node),
				});
			}
			TagKind::Output => {
				// Discard-assignment, so a bare expression statement does
				// not trip unused-value diagnostics. The final output of a
				// scope is neutralized again on close.
				self.push_fragment(Fragment {
					position: node.opening_offset(),
					tag_opening: node.tag_opening_value(),
					tag_closing: node.tag_closing_value(),
					prefix: "_ =".into(),
					content: statement::terminate(node.content_value()),
					location: node.location,
					origin: Some(node),
				});
			}
			TagKind::Statement => self.push_statement_fragment(node),
		}
	}

	/// Append a statement-shaped fragment: spaces matching the opening
	/// lexeme's width, then the terminated content.
	fn push_statement_fragment(&mut self, node: &'a Node) {
		self.push_fragment(Fragment {
			position: node.opening_offset(),
			tag_opening: node.tag_opening_value(),
			tag_closing: node.tag_closing_value(),
			prefix: " ".repeat(node.tag_opening_value().len()),
			content: statement::terminate(node.content_value()),
			location: node.location,
			origin: Some(node),
		});
	}

	fn push_fragment(&mut self, fragment: Fragment<'a>) {
		trace!(
			position = fragment.position,
			code = %fragment.code(),
			"collected fragment"
		);
		self.stack.push_fragment(fragment);
	}

	/// End-of-scope housekeeping: neutralize a trailing output fragment,
	/// pop the scope, splice its fragments into the parent, and synthesize
	/// a placeholder when the body was markup-only.
	fn close_scope(&mut self, closing: &'a Node) -> ShadowResult<()> {
		self.adjust_last_output_prefix();

		let scope = self.stack.pop_scope()?;
		let placeholder = match scope.as_slice() {
			// A lone `case` header legitimately has nothing before its
			// first branch; filling that gap would corrupt the construct.
			[only] if !is_case_header(only) => self.placeholders.build(only, closing),
			_ => None,
		};

		self.stack.current_mut().extend(scope);

		if let Some(fragment) = placeholder {
			self.push_fragment(fragment);
		}

		Ok(())
	}

	/// Only a non-final output expression inside a block needs the
	/// discard-assignment; the final expression of a block may legitimately
	/// be non-void. Rewrites the prefix to an equal-width neutral one.
	fn adjust_last_output_prefix(&mut self) {
		if let Some(last) = self.stack.current_mut().last_mut() {
			if last.is_output() {
				last.prefix = " ".repeat(last.prefix.len());
			}
		}
	}

	/// End-of-document housekeeping: one more output adjustment (covers an
	/// output fragment that is the very last thing in the document), then
	/// drop comments sharing their end line with later code.
	fn finalize(mut self) -> ShadowResult<Vec<Fragment<'a>>> {
		self.adjust_last_output_prefix();

		let mut fragments = self.stack.into_fragments();
		filter_same_line_comments(&mut fragments);

		debug!(count = fragments.len(), "extraction complete");
		Ok(fragments)
	}
}

/// Run the whole pipeline for one document: traverse the AST, collect
/// fragments, and render the shadow buffer.
///
/// `source` must be the exact byte content the upstream parser consumed;
/// every node range is an absolute offset into it. Zero collected
/// fragments (a template without embedded code) renders an all-blank
/// shadow of identical length — "nothing to analyze" is not an error.
pub fn extract_shadow(
	source: &[u8],
	document: &Node,
	config: &ShadowConfig,
) -> ShadowResult<ShadowDocument> {
	let fragments = Extractor::new(source, config).extract(document)?;
	ShadowDocument::render(source, &fragments)
}

fn is_case_header(fragment: &Fragment<'_>) -> bool {
	fragment.origin.is_some_and(|node| node.kind == NodeKind::Case)
}

/// Drop any comment fragment that shares its end line with a later
/// non-comment fragment: the comment marker would comment out that code.
fn filter_same_line_comments(fragments: &mut Vec<Fragment<'_>>) {
	let mut keep = vec![true; fragments.len()];

	for (index, fragment) in fragments.iter().enumerate() {
		if !fragment.is_comment() {
			continue;
		}

		let followed_by_code = fragments[index + 1..]
			.iter()
			.any(|other| fragment.same_line(other) && !other.is_comment());

		if followed_by_code {
			keep[index] = false;
		}
	}

	let mut index = 0;
	fragments.retain(|_| {
		let kept = keep[index];
		index += 1;
		kept
	});
}
