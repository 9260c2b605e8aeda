use std::{borrow::Cow, fmt::Display};

use crate::utils::format_quoted_strings;

pub mod error_code;

pub type StaticStr = Cow<'static, str>;

#[derive(Debug)]
pub enum ErrorKind {
  // --- Aligned with rollup
  InvalidOption {
    option: &'static str,
    explanation: StaticStr,
  },
  InvalidExportOptionValue(StaticStr),
  IncompatibleExportOptionValue {
    option_value: &'static str,
    exported_keys: Vec<StaticStr>,
    entry_module: StaticStr,
  },
  MixedExports {
    entry_module: StaticStr,
  },
  Deprecation(StaticStr),
  AddonError {
    hook: &'static str,
    plugin: StaticStr,
    source: Box<crate::Error>,
  },
  InvalidPattern {
    pattern: StaticStr,
    pattern_name: &'static str,
  },
  InvalidPatternReplacement {
    pattern_name: &'static str,
    placeholder: StaticStr,
    replacement: Option<StaticStr>,
  },
  EmptyChunk {
    chunk_name: StaticStr,
  },
  AssetSourceMissing {
    name: StaticStr,
  },
  AssetSourceAlreadySet {
    name: StaticStr,
  },
  AssetNotFinalised {
    name: StaticStr,
  },
  FileReferenceIdNotFound(StaticStr),
  InvalidEmittedFileName(StaticStr),
  FileNameConflict(StaticStr),
  SourcemapBroken {
    plugin: StaticStr,
  },
  MissingNameOptionForIifeExport,
  MissingNameOptionForUmdExport,

  /// This error means that rolldown panics because unrecoverable error happens.
  ///
  /// Plugins report their own failures this way, e.g. `Error::panic("Errored")`.
  Panic {
    source: anyhow::Error,
  },
}

impl Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      // Aligned with rollup
      ErrorKind::InvalidOption { option, explanation } => write!(f, r#"Invalid value for option "{option}" - {explanation}"#),
      ErrorKind::InvalidExportOptionValue(value) =>  write!(f, r#""output.exports" must be "default", "named", "none", "auto", or left unspecified (defaults to "auto"), received "{value}"."#),
      ErrorKind::IncompatibleExportOptionValue { option_value, exported_keys, entry_module } => {
        let mut exported_keys = exported_keys.iter().collect::<Vec<_>>();
        exported_keys.sort();
        if exported_keys.is_empty() {
          write!(f, r#""{option_value}" was specified for "output.exports", but entry module "{entry_module}" has no exports"#)
        } else {
          write!(f, r#""{option_value}" was specified for "output.exports", but entry module "{entry_module}" has the following exports: {}"#, format_quoted_strings(&exported_keys))
        }
      }
      ErrorKind::MixedExports { entry_module } => write!(f, r#"Entry module "{entry_module}" is using named and default exports together. Consumers of your bundle will have to use `chunk["default"]` to access the default export, which may not be what you want. Use `output.exports: "named"` to disable this warning."#),
      ErrorKind::Deprecation(message) => message.fmt(f),
      ErrorKind::AddonError { hook, plugin, source } => write!(f, "Could not retrieve \"{hook}\". Check configuration of plugin \"{plugin}\".\n\tError Message: {source}"),
      ErrorKind::InvalidPattern { pattern, pattern_name } => write!(f, r#"Invalid pattern "{pattern}" for "{pattern_name}", patterns can be neither absolute nor relative paths and must not contain invalid characters."#),
      ErrorKind::InvalidPatternReplacement { pattern_name, placeholder, replacement: None } => write!(f, r#""[{placeholder}]" is not a valid placeholder in "{pattern_name}" pattern."#),
      ErrorKind::InvalidPatternReplacement { pattern_name, placeholder, replacement: Some(replacement) } => write!(f, r#"Invalid substitution "{replacement}" for placeholder "[{placeholder}]" in "{pattern_name}" pattern, can be neither absolute nor relative path."#),
      ErrorKind::EmptyChunk { chunk_name } => write!(f, r#"Generated an empty chunk: "{chunk_name}"."#),
      ErrorKind::AssetSourceMissing { name } => write!(f, r#"Plugin error creating asset "{name}" - no asset source set."#),
      ErrorKind::AssetSourceAlreadySet { name } => write!(f, r#"Unable to set the source for asset "{name}", source already set."#),
      ErrorKind::AssetNotFinalised { name } => write!(f, r#"Plugin error - Unable to get file name for asset "{name}". Ensure that the source is set and that generate is called first."#),
      ErrorKind::FileReferenceIdNotFound(id) => write!(f, r#"Plugin error - Unable to get file name for unknown file "{id}"."#),
      ErrorKind::InvalidEmittedFileName(file_name) => write!(f, r#"The "fileName" or "name" properties of emitted files must be strings that are neither absolute nor relative paths, received "{file_name}"."#),
      ErrorKind::FileNameConflict(file_name) => write!(f, r#"The output file "{file_name}" would be emitted more than once. Output file names must be unique."#),
      ErrorKind::SourcemapBroken { plugin } => write!(f, r#"Sourcemap is likely to be incorrect: a plugin ("{plugin}") was used to transform files, but didn't generate a sourcemap for the transformation."#),
      ErrorKind::MissingNameOptionForIifeExport => write!(f, r#"If you do not supply "output.name", you may not be able to access the exports of an IIFE bundle."#),
      ErrorKind::MissingNameOptionForUmdExport => write!(f, r#"You must supply "output.name" for UMD bundles that have exports so that the exports are accessible in environments without a module loader."#),
      // Rolldown specific
      ErrorKind::Panic { source } => source.fmt(f),
    }
  }
}

impl ErrorKind {
  pub fn code(&self) -> &'static str {
    match self {
      // Aligned with rollup
      ErrorKind::InvalidOption { .. } => error_code::INVALID_OPTION,
      ErrorKind::InvalidExportOptionValue(_) => error_code::INVALID_EXPORT_OPTION,
      ErrorKind::IncompatibleExportOptionValue { .. } => error_code::INVALID_EXPORT_OPTION,
      ErrorKind::MixedExports { .. } => error_code::MIXED_EXPORTS,
      ErrorKind::Deprecation(_) => error_code::DEPRECATED_FEATURE,
      ErrorKind::AddonError { .. } => error_code::ADDON_ERROR,
      ErrorKind::InvalidPattern { .. } => error_code::INVALID_PATTERN,
      ErrorKind::InvalidPatternReplacement { .. } => error_code::INVALID_PATTERN_REPLACEMENT,
      ErrorKind::EmptyChunk { .. } => error_code::EMPTY_BUNDLE,
      ErrorKind::AssetSourceMissing { .. } => error_code::ASSET_SOURCE_MISSING,
      ErrorKind::AssetSourceAlreadySet { .. } => error_code::ASSET_SOURCE_ALREADY_SET,
      ErrorKind::AssetNotFinalised { .. } => error_code::ASSET_NOT_FINALISED,
      ErrorKind::FileReferenceIdNotFound(_) => error_code::FILE_NOT_FOUND,
      ErrorKind::InvalidEmittedFileName(_) => error_code::VALIDATION_ERROR,
      ErrorKind::FileNameConflict(_) => error_code::FILE_NAME_CONFLICT,
      ErrorKind::SourcemapBroken { .. } => error_code::SOURCEMAP_BROKEN,
      ErrorKind::MissingNameOptionForIifeExport => error_code::MISSING_NAME_OPTION_FOR_IIFE_EXPORT,
      ErrorKind::MissingNameOptionForUmdExport => error_code::MISSING_NAME_OPTION_FOR_UMD_EXPORT,
      // Rolldown specific
      ErrorKind::Panic { .. } => error_code::PANIC,
    }
  }
}
