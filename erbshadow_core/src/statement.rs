//! Code fragment termination.

/// Rewrite one code node's content into a terminated guest statement
/// without changing where its bytes sit.
///
/// Content that ends in whitespace has its first trailing space overwritten
/// with `;`, so `" foo "` becomes `" foo;"` at identical length. Content
/// without a trailing space gets `;` appended; the appended byte lands on
/// the closing delimiter's slot, which the tag grammar guarantees is at
/// least two bytes wide.
pub fn terminate(content: &str) -> String {
	let bytes = content.as_bytes();
	let trailing = bytes.iter().rev().take_while(|&&b| b == b' ').count();

	if trailing == 0 {
		return format!("{content};");
	}

	let boundary = bytes.len() - trailing;
	let mut result = String::with_capacity(bytes.len());
	result.push_str(&content[..boundary]);
	result.push(';');
	result.push_str(&content[boundary + 1..]);
	result
}
