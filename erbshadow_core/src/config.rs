use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::ShadowError;
use crate::ShadowResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["erbshadow.toml", ".erbshadow.toml"];

/// The quote character used when markup attribute values are rewritten as
/// empty guest string literals.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
	#[default]
	Double,
	Single,
}

impl QuoteStyle {
	/// The quote character as a raw byte.
	pub fn as_byte(self) -> u8 {
		match self {
			Self::Double => b'"',
			Self::Single => b'\'',
		}
	}
}

/// Configuration consumed by the extraction engine.
///
/// ```toml
/// quote_style = "single"
/// ```
///
/// The core does not own configuration discovery — an embedder normally
/// passes a ready-made value — but [`ShadowConfig::load`] and
/// [`ShadowConfig::discover`] cover the standalone case.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ShadowConfig {
	/// Preferred quote style for rewritten attribute literals. Defaults to
	/// double quotes when absent.
	#[serde(default)]
	pub quote_style: QuoteStyle,
}

impl ShadowConfig {
	/// Parse a config from TOML text.
	pub fn from_toml_str(content: &str) -> ShadowResult<Self> {
		toml::from_str(content).map_err(|e| ShadowError::ConfigParse(e.to_string()))
	}

	/// Load a config file from an explicit path.
	pub fn load(path: impl AsRef<Path>) -> ShadowResult<Self> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	/// Search `root` for a config file using [`CONFIG_FILE_CANDIDATES`].
	/// Returns the default config when none exists.
	pub fn discover(root: impl AsRef<Path>) -> ShadowResult<Self> {
		let root = root.as_ref();

		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if path.is_file() {
				return Self::load(path);
			}
		}

		Ok(Self::default())
	}
}
