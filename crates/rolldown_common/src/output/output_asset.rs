use crate::StrOrBytes;

#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub file_name: String,
  /// The name the asset was emitted with, if any.
  pub name: Option<String>,
  pub source: StrOrBytes,
}
