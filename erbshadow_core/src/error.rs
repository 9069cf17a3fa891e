use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ShadowError {
	#[error(transparent)]
	#[diagnostic(code(erbshadow::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(erbshadow::config_parse),
		help("check that erbshadow.toml is valid TOML; the only recognized key is `quote_style`")
	)]
	ConfigParse(String),

	#[error("transformed fragment is {actual} bytes but the source span at byte {position} is {expected} bytes")]
	#[diagnostic(
		code(erbshadow::length_mismatch),
		help(
			"a length mismatch corrupts every later absolute-offset placement; the shadow document \
			 for this template cannot be produced"
		)
	)]
	LengthMismatch {
		expected: usize,
		actual: usize,
		position: usize,
	},

	#[error("attempted to pop the root scope of the block stack")]
	#[diagnostic(
		code(erbshadow::root_scope_pop),
		help("the upstream parser produced a closing node without a matching opener")
	)]
	RootScopePop,

	#[error("fragment at byte {position} ({length} bytes) extends past the end of the {document_length}-byte document")]
	#[diagnostic(code(erbshadow::fragment_out_of_bounds))]
	FragmentOutOfBounds {
		position: usize,
		length: usize,
		document_length: usize,
	},
}

pub type ShadowResult<T> = Result<T, ShadowError>;
