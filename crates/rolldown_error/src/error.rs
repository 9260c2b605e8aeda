use std::fmt::Display;

use crate::{ErrorKind, StaticStr};

#[derive(Debug)]
pub struct Error {
  contexts: Vec<String>,
  pub kind: ErrorKind,
}

impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    self.kind.to_string().eq(&other.kind.to_string())
  }
}

impl Eq for Error {}

impl PartialOrd for Error {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Error {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    self.kind.to_string().cmp(&other.kind.to_string())
  }
}

impl Error {
  fn with_kind(kind: ErrorKind) -> Self {
    Self {
      contexts: vec![],
      kind,
    }
  }

  pub fn context(mut self, context: String) -> Self {
    self.contexts.push(context);
    self
  }

  pub fn code(&self) -> &'static str {
    self.kind.code()
  }

  // --- Aligned with rollup
  pub fn invalid_format_for_code_splitting(format: &str) -> Self {
    Self::with_kind(ErrorKind::InvalidOption {
      option: "output.format",
      explanation: format!(
        "\"{format}\" output format is not supported for code-splitting builds, UMD and IIFE outputs must consist of a single chunk."
      )
      .into(),
    })
  }

  pub fn file_option_for_code_splitting() -> Self {
    Self::with_kind(ErrorKind::InvalidOption {
      option: "output.file",
      explanation: "when building multiple chunks, the \"output.dir\" option must be used, not \"output.file\". To inline dynamic imports, set the \"inlineDynamicImports\" option.".into(),
    })
  }

  pub fn sourcemap_file_for_code_splitting() -> Self {
    Self::with_kind(ErrorKind::InvalidOption {
      option: "output.sourcemapFile",
      explanation: "\"output.sourcemapFile\" is only supported for single-file builds.".into(),
    })
  }

  pub fn invalid_export_option_value(value: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::InvalidExportOptionValue(value.into()))
  }

  pub fn incompatible_export_option_value(
    option_value: &'static str,
    exported_keys: Vec<String>,
    entry_module: impl Into<StaticStr>,
  ) -> Self {
    Self::with_kind(ErrorKind::IncompatibleExportOptionValue {
      option_value,
      exported_keys: exported_keys.into_iter().map(Into::into).collect(),
      entry_module: entry_module.into(),
    })
  }

  pub fn mixed_exports(entry_module: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::MixedExports {
      entry_module: entry_module.into(),
    })
  }

  pub fn deprecation(message: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::Deprecation(message.into()))
  }

  pub fn addon_error(hook: &'static str, plugin: impl Into<StaticStr>, source: Error) -> Self {
    Self::with_kind(ErrorKind::AddonError {
      hook,
      plugin: plugin.into(),
      source: Box::new(source),
    })
  }

  pub fn invalid_pattern(pattern: impl Into<StaticStr>, pattern_name: &'static str) -> Self {
    Self::with_kind(ErrorKind::InvalidPattern {
      pattern: pattern.into(),
      pattern_name,
    })
  }

  pub fn invalid_pattern_placeholder(
    pattern_name: &'static str,
    placeholder: impl Into<StaticStr>,
  ) -> Self {
    Self::with_kind(ErrorKind::InvalidPatternReplacement {
      pattern_name,
      placeholder: placeholder.into(),
      replacement: None,
    })
  }

  pub fn invalid_pattern_replacement(
    pattern_name: &'static str,
    placeholder: impl Into<StaticStr>,
    replacement: impl Into<StaticStr>,
  ) -> Self {
    Self::with_kind(ErrorKind::InvalidPatternReplacement {
      pattern_name,
      placeholder: placeholder.into(),
      replacement: Some(replacement.into()),
    })
  }

  pub fn empty_chunk(chunk_name: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::EmptyChunk {
      chunk_name: chunk_name.into(),
    })
  }

  pub fn asset_source_missing(name: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::AssetSourceMissing { name: name.into() })
  }

  pub fn asset_source_already_set(name: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::AssetSourceAlreadySet { name: name.into() })
  }

  pub fn asset_not_finalised(name: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::AssetNotFinalised { name: name.into() })
  }

  pub fn file_reference_id_not_found(id: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::FileReferenceIdNotFound(id.into()))
  }

  pub fn invalid_emitted_file_name(file_name: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::InvalidEmittedFileName(file_name.into()))
  }

  pub fn file_name_conflict(file_name: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::FileNameConflict(file_name.into()))
  }

  pub fn sourcemap_broken(plugin: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::SourcemapBroken {
      plugin: plugin.into(),
    })
  }

  pub fn missing_name_option_for_iife_export() -> Self {
    Self::with_kind(ErrorKind::MissingNameOptionForIifeExport)
  }

  pub fn missing_name_option_for_umd_export() -> Self {
    Self::with_kind(ErrorKind::MissingNameOptionForUmdExport)
  }

  // --- rolldown special

  pub fn panic(msg: impl Into<String>) -> Self {
    let msg: String = msg.into();
    anyhow::format_err!(msg).into()
  }
}

impl std::convert::From<anyhow::Error> for Error {
  fn from(value: anyhow::Error) -> Self {
    Self::with_kind(ErrorKind::Panic { source: value })
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match &self.kind {
      ErrorKind::Panic { source, .. } => Some(source.as_ref()),
      ErrorKind::AddonError { source, .. } => Some(&**source),
      _ => None,
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for ctx in self.contexts.iter().rev() {
      writeln!(f, "{}: {}", ansi_term::Color::Yellow.paint("context"), ctx)?;
    }

    self.kind.fmt(f)
  }
}
