use std::{fmt::Display, sync::Arc};

use parking_lot::Mutex;
use rolldown_common::{
  content_hash, extname, is_path_fragment, make_unique, sanitize_file_name, FileNameTemplate,
  Output, OutputAsset, OutputBundle, RenderOptions, StrOrBytes, DEFAULT_ASSET_FILE_NAMES,
};
use rolldown_error::Error;

const ASSET_HASH_LENGTH: usize = 8;
const DEFAULT_ASSET_NAME: &str = "asset";

/// Handle to a file emitted through [FileEmitter::emit_asset].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmittedFileRef(usize);

impl EmittedFileRef {
  /// Rebuilds a handle from its reference id. The emitter validates it on use.
  pub fn from_reference_id(reference_id: usize) -> Self {
    Self(reference_id)
  }

  pub fn reference_id(&self) -> usize {
    self.0
  }
}

impl Display for EmittedFileRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Default, Clone)]
pub struct EmittedAsset {
  pub name: Option<String>,
  /// Used as is instead of rendering `output.assetFileNames`.
  pub file_name: Option<String>,
  /// Can be set later with [FileEmitter::set_asset_source].
  pub source: Option<StrOrBytes>,
}

#[derive(Debug)]
struct ConsumedAsset {
  name: Option<String>,
  file_name: Option<String>,
  source: Option<StrOrBytes>,
  /// Set once the asset is written into the bundle.
  final_file_name: Option<String>,
}

impl ConsumedAsset {
  fn display_name(&self) -> String {
    self
      .name
      .clone()
      .or_else(|| self.file_name.clone())
      .unwrap_or_else(|| DEFAULT_ASSET_NAME.to_string())
  }
}

#[derive(Debug)]
struct FileEmitterState {
  files: Vec<ConsumedAsset>,
  asset_file_names: FileNameTemplate,
}

impl Default for FileEmitterState {
  fn default() -> Self {
    Self {
      files: vec![],
      asset_file_names: FileNameTemplate::from(DEFAULT_ASSET_FILE_NAMES),
    }
  }
}

/// Keeps track of files emitted by plugins during one generation run.
///
/// Assets are only written into the [OutputBundle] by the pipeline, through
/// [FileEmitter::emit_ready_assets] and [FileEmitter::finalize_assets].
#[derive(Debug, Default)]
pub struct FileEmitter {
  state: Mutex<FileEmitterState>,
}

pub type SharedFileEmitter = Arc<FileEmitter>;

impl FileEmitter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn into_shared(self) -> SharedFileEmitter {
    Arc::new(self)
  }

  /// Starts a new run. Files emitted by previous runs are forgotten.
  pub fn set_output_bundle(&self, asset_file_names: FileNameTemplate) {
    let mut state = self.state.lock();
    state.files.clear();
    state.asset_file_names = asset_file_names;
  }

  pub fn emit_asset(&self, asset: EmittedAsset) -> rolldown_error::Result<EmittedFileRef> {
    for name in asset.name.iter().chain(asset.file_name.iter()) {
      if is_path_fragment(name) {
        return Err(Error::invalid_emitted_file_name(name.clone()));
      }
    }
    let mut state = self.state.lock();
    state.files.push(ConsumedAsset {
      name: asset.name,
      file_name: asset.file_name,
      source: asset.source,
      final_file_name: None,
    });
    Ok(EmittedFileRef(state.files.len() - 1))
  }

  pub fn set_asset_source(
    &self,
    file_ref: EmittedFileRef,
    source: impl Into<StrOrBytes>,
  ) -> rolldown_error::Result<()> {
    let mut state = self.state.lock();
    let asset = state
      .files
      .get_mut(file_ref.0)
      .ok_or_else(|| Error::file_reference_id_not_found(file_ref.to_string()))?;
    if asset.source.is_some() {
      return Err(Error::asset_source_already_set(asset.display_name()));
    }
    asset.source = Some(source.into());
    Ok(())
  }

  pub fn get_file_name(&self, file_ref: EmittedFileRef) -> rolldown_error::Result<String> {
    let state = self.state.lock();
    let asset = state
      .files
      .get(file_ref.0)
      .ok_or_else(|| Error::file_reference_id_not_found(file_ref.to_string()))?;
    asset
      .final_file_name
      .clone()
      .ok_or_else(|| Error::asset_not_finalised(asset.display_name()))
  }

  /// Writes every asset whose source is known into `bundle`.
  pub fn emit_ready_assets(&self, bundle: &mut OutputBundle) -> rolldown_error::Result<()> {
    let mut state = self.state.lock();
    let FileEmitterState {
      files,
      asset_file_names,
    } = &mut *state;
    for asset in files
      .iter_mut()
      .filter(|asset| asset.final_file_name.is_none() && asset.source.is_some())
    {
      finalize_asset(asset, asset_file_names, bundle)?;
    }
    Ok(())
  }

  /// Writes all remaining assets into `bundle`. Every asset must have a source by now.
  pub fn finalize_assets(&self, bundle: &mut OutputBundle) -> rolldown_error::Result<()> {
    let mut state = self.state.lock();
    let FileEmitterState {
      files,
      asset_file_names,
    } = &mut *state;
    for asset in files
      .iter_mut()
      .filter(|asset| asset.final_file_name.is_none())
    {
      if asset.source.is_none() {
        return Err(Error::asset_source_missing(asset.display_name()));
      }
      finalize_asset(asset, asset_file_names, bundle)?;
    }
    Ok(())
  }
}

fn finalize_asset(
  asset: &mut ConsumedAsset,
  asset_file_names: &FileNameTemplate,
  bundle: &mut OutputBundle,
) -> rolldown_error::Result<()> {
  let Some(source) = asset.source.clone() else {
    return Err(Error::asset_source_missing(asset.display_name()));
  };
  let file_name = match &asset.file_name {
    Some(file_name) => file_name.clone(),
    None => generate_asset_file_name(
      asset.name.as_deref(),
      &source,
      asset_file_names,
      bundle,
    )?,
  };
  if let Some(existing) = bundle.get(&file_name) {
    // The same file emitted twice is fine, different contents under one name are not.
    let same_source = existing
      .as_asset()
      .map_or(false, |existing| existing.source == source);
    if !same_source {
      return Err(Error::file_name_conflict(file_name));
    }
  } else {
    bundle.insert(Output::Asset(Box::new(OutputAsset {
      file_name: file_name.clone(),
      name: asset.name.clone(),
      source,
    })));
  }
  asset.final_file_name = Some(file_name);
  Ok(())
}

fn generate_asset_file_name(
  name: Option<&str>,
  source: &StrOrBytes,
  asset_file_names: &FileNameTemplate,
  bundle: &OutputBundle,
) -> rolldown_error::Result<String> {
  let name = sanitize_file_name(name.unwrap_or(DEFAULT_ASSET_NAME));
  let extname = extname(&name);
  let stem = &name[..name.len() - extname.len()];
  let hash = content_hash(source.as_bytes());
  let file_name = asset_file_names.render(
    "output.assetFileNames",
    RenderOptions {
      name: Some(stem),
      hash: Some(&hash[..ASSET_HASH_LENGTH]),
      ext: Some(extname.trim_start_matches('.')),
      extname: Some(extname),
      format: None,
    },
  )?;
  Ok(make_unique(&file_name, &bundle.lowercase_file_names()))
}
