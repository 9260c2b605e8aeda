use std::collections::BTreeMap;

use rolldown_common::ModuleId;
use sugar_path::SugarPath;

/// A module as handed over by the chunking stage: already linked, tree-shaken and
/// transformed. `code` is what ends up in the chunk.
#[derive(Debug, Clone)]
pub struct Module {
  pub id: ModuleId,
  pub code: String,
  /// Length of the source before tree-shaking. Falls back to the length of `code`.
  pub original_length: Option<usize>,
  /// exported name -> local variable name
  pub exports: BTreeMap<String, String>,
  /// Exports that tree-shaking removed.
  pub removed_exports: Vec<String>,
  /// Entries given by the user and chunks emitted by plugins.
  pub is_entry_point: bool,
  pub is_user_defined_entry_point: bool,
  pub chunk_name: Option<String>,
}

impl Module {
  pub fn new(id: impl Into<ModuleId>, code: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      code: code.into(),
      original_length: None,
      exports: Default::default(),
      removed_exports: vec![],
      is_entry_point: false,
      is_user_defined_entry_point: false,
      chunk_name: None,
    }
  }

  /// Marks the module as an entry given by the user.
  pub fn as_entry(mut self) -> Self {
    self.is_entry_point = true;
    self.is_user_defined_entry_point = true;
    self
  }

  /// Marks the module as the entry of a chunk emitted by a plugin.
  pub fn as_emitted_entry(mut self) -> Self {
    self.is_entry_point = true;
    self
  }

  pub fn with_export(mut self, exported: impl Into<String>, local: impl Into<String>) -> Self {
    self.exports.insert(exported.into(), local.into());
    self
  }

  pub fn with_removed_export(mut self, exported: impl Into<String>) -> Self {
    self.removed_exports.push(exported.into());
    self
  }

  pub fn with_chunk_name(mut self, chunk_name: impl Into<String>) -> Self {
    self.chunk_name = Some(chunk_name.into());
    self
  }

  pub fn with_original_length(mut self, original_length: usize) -> Self {
    self.original_length = Some(original_length);
    self
  }

  /// File name without extension, `main` for `/src/main.js`.
  pub fn file_stem(&self) -> Option<String> {
    self
      .id
      .id()
      .as_path()
      .file_stem()
      .map(|stem| stem.to_string_lossy().to_string())
  }
}
