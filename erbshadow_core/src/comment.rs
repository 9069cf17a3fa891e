//! Comment fragment transformation.
//!
//! A comment tag's content is already inert text; the transformer only has
//! to make every continuation line parse as a guest comment without moving
//! a single byte. Line 0 sits behind the fragment prefix (`  #`) and is
//! kept verbatim.

use crate::node::Node;

/// Marker byte that turns a line into a guest comment.
const MARKER: u8 = b'#';

/// Rewrite a comment node's content into guest-comment text, or `None`
/// when the comment cannot be re-punctuated without changing byte lengths.
///
/// For each continuation line, with `target = tag start column + 2`:
/// a line with at least `target` leading spaces gets the marker written at
/// byte `target`; a line with at least one leading space gets it at byte 0;
/// a line with no leading whitespace makes the whole comment unsafe and
/// the node contributes nothing.
pub fn transform(node: &Node) -> Option<String> {
	let content = node.content_value();
	let target = node.location.start.column + 2;

	let mut lines: Vec<Vec<u8>> = Vec::new();
	for (index, line) in content.split('\n').enumerate() {
		if index == 0 {
			lines.push(line.as_bytes().to_vec());
			continue;
		}

		let mut bytes = line.as_bytes().to_vec();
		let leading = bytes.iter().take_while(|&&b| b == b' ').count();

		if leading >= target && bytes.len() > target {
			bytes[target] = MARKER;
		} else if leading >= 1 {
			bytes[0] = MARKER;
		} else {
			return None;
		}

		lines.push(bytes);
	}

	let joined = lines.join(&b'\n');

	// The marker may have landed on the first byte of a multi-byte
	// character; re-punctuating such a comment would emit invalid UTF-8.
	String::from_utf8(joined).ok()
}
