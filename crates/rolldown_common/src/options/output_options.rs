use derivative::Derivative;

use crate::{ExportMode, FileNameTemplate, ModuleFormat};

pub const DEFAULT_ASSET_FILE_NAMES: &str = "assets/[name]-[hash][extname]";

#[derive(Derivative)]
#[derivative(Debug)]
pub struct OutputOptions {
  /// Single output file. Only valid when a single chunk is generated.
  pub file: Option<String>,
  pub format: ModuleFormat,
  pub export_mode: ExportMode,
  pub entry_file_names: FileNameTemplate,
  pub chunk_file_names: FileNameTemplate,
  /// Falls back to [DEFAULT_ASSET_FILE_NAMES].
  pub asset_file_names: Option<FileNameTemplate>,
  pub banner: Option<String>,
  pub footer: Option<String>,
  pub intro: Option<String>,
  pub outro: Option<String>,
  pub sourcemap: bool,
  pub sourcemap_file: Option<String>,
  /// Global variable name for `iife` and `umd` outputs.
  pub name: Option<String>,
  /// Deprecated. Superseded by the `renderDynamicImport` plugin hook.
  pub dynamic_import_function: Option<String>,
}

impl OutputOptions {
  pub fn asset_file_names(&self) -> FileNameTemplate {
    self
      .asset_file_names
      .clone()
      .unwrap_or_else(|| FileNameTemplate::from(DEFAULT_ASSET_FILE_NAMES))
  }
}

impl Default for OutputOptions {
  fn default() -> Self {
    Self {
      file: None,
      format: ModuleFormat::Esm,
      export_mode: ExportMode::Auto,
      entry_file_names: FileNameTemplate::from("[name].js".to_string()),
      chunk_file_names: FileNameTemplate::from("[name]-[hash].js".to_string()),
      asset_file_names: None,
      banner: None,
      footer: None,
      intro: None,
      outro: None,
      sourcemap: false,
      sourcemap_file: None,
      name: None,
      dynamic_import_function: None,
    }
  }
}
