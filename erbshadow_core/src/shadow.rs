//! Shadow document synthesis.

use derive_more::Deref;
use derive_more::DerefMut;

use crate::ShadowError;
use crate::ShadowResult;
use crate::fragment::Fragment;

/// The synthesized guest-language-only buffer, byte-length-identical to
/// the original template. Any diagnostic position reported against it is
/// valid, unmodified, against the template.
#[derive(Debug, Clone, PartialEq, Eq, Deref, DerefMut)]
pub struct ShadowDocument(Vec<u8>);

impl ShadowDocument {
	/// Render the shadow buffer: blank every original byte except line
	/// breaks, then overlay each fragment at its absolute position.
	///
	/// Well-formed input never produces overlapping fragments; a fragment
	/// extending past the buffer means an upstream offset is corrupt and
	/// the whole transformation is aborted.
	pub fn render(source: &[u8], fragments: &[Fragment<'_>]) -> ShadowResult<Self> {
		let mut buffer: Vec<u8> = source
			.iter()
			.map(|&b| if matches!(b, b'\n' | b'\r') { b } else { b' ' })
			.collect();

		for fragment in fragments {
			let start = fragment.position;
			let end = fragment.end_position();

			let Some(slot) = buffer.get_mut(start..end) else {
				return Err(ShadowError::FragmentOutOfBounds {
					position: start,
					length: end - start,
					document_length: source.len(),
				});
			};

			slot[..fragment.prefix.len()].copy_from_slice(fragment.prefix.as_bytes());
			slot[fragment.prefix.len()..].copy_from_slice(fragment.content.as_bytes());
		}

		Ok(Self(buffer))
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.0
	}

	/// View the buffer as text. Fails only when the original template was
	/// not valid UTF-8: every rewrite either copies whole characters or
	/// replaces whole characters with ASCII.
	pub fn to_str(&self) -> Option<&str> {
		std::str::from_utf8(&self.0).ok()
	}
}
