use std::{
  collections::{BTreeMap, BTreeSet},
  path::Path,
  sync::Arc,
};

use hashlink::LinkedHashMap;
use rolldown_common::{
  sanitize_file_name, ExportMode, ModuleId, OutputChunk, OutputOptions, RenderedModule,
};
use rolldown_error::Error;
use sugar_path::SugarPath;

use crate::{BundleResult, Module, PluginDriver};

mod code_builder;
pub(crate) use code_builder::*;
mod render;
pub(crate) use render::*;

const DEFAULT_CHUNK_NAME: &str = "chunk";

/// Position of a chunk in the list handed to the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkIdx(pub usize);

/// Variables a chunk reads from another chunk.
#[derive(Debug, Clone)]
pub struct ChunkImport {
  pub chunk: ChunkIdx,
  /// Local names of the variables in the imported chunk. The importing chunk refers to them
  /// under the same names.
  pub variables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkFileName {
  Final(String),
  /// `file_name` contains `placeholder`, which is replaced by a content hash once all
  /// chunks are rendered.
  Placeholder {
    file_name: String,
    placeholder: String,
  },
}

impl ChunkFileName {
  pub fn file_name(&self) -> &str {
    match self {
      ChunkFileName::Final(file_name) => file_name,
      ChunkFileName::Placeholder { file_name, .. } => file_name,
    }
  }

  pub fn placeholder(&self) -> Option<&str> {
    match self {
      ChunkFileName::Final(_) => None,
      ChunkFileName::Placeholder { placeholder, .. } => Some(placeholder),
    }
  }
}

#[derive(Debug, Default)]
pub(crate) struct PreRenderedChunk {
  /// Index into `Chunk::modules` and the trimmed code of every module that renders
  /// something.
  pub sources: Vec<(usize, String)>,
  /// Name of each entry of `sources` in the source map.
  pub source_names: Vec<String>,
  pub rendered_modules: LinkedHashMap<ModuleId, RenderedModule>,
}

/// A chunk created by the chunking stage. The bundle only changes its identity and export
/// mode.
#[derive(Debug)]
pub struct Chunk {
  /// Name given to the chunk explicitly, e.g. by manual chunks.
  pub name: Option<String>,
  /// In execution order.
  pub modules: Vec<Arc<Module>>,
  pub facade_module: Option<Arc<Module>>,
  pub entry_modules: Vec<Arc<Module>>,
  pub is_dynamic_entry: bool,
  /// Local variables other chunks import from this chunk.
  pub exposed_variables: BTreeSet<String>,
  pub imports: Vec<ChunkImport>,
  pub dynamic_imports: Vec<ChunkIdx>,
  /// exported name -> local name
  pub(crate) exports: BTreeMap<String, String>,
  pub(crate) export_mode: ExportMode,
  pub(crate) file_name: Option<ChunkFileName>,
  pub(crate) pre_rendered: Option<PreRenderedChunk>,
}

impl Chunk {
  pub fn new(modules: Vec<Arc<Module>>) -> Self {
    Self {
      name: None,
      modules,
      facade_module: None,
      entry_modules: vec![],
      is_dynamic_entry: false,
      exposed_variables: Default::default(),
      imports: vec![],
      dynamic_imports: vec![],
      exports: Default::default(),
      export_mode: ExportMode::Named,
      file_name: None,
      pre_rendered: None,
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Makes `module` the facade of the chunk. It also becomes one of its entry modules.
  pub fn with_facade(mut self, module: Arc<Module>) -> Self {
    if !self.entry_modules.iter().any(|m| m.id == module.id) {
      self.entry_modules.push(module.clone());
    }
    self.facade_module = Some(module);
    self
  }

  pub fn with_entry_module(mut self, module: Arc<Module>) -> Self {
    self.entry_modules.push(module);
    self
  }

  pub fn as_dynamic_entry(mut self) -> Self {
    self.is_dynamic_entry = true;
    self
  }

  pub fn expose(mut self, variable: impl Into<String>) -> Self {
    self.exposed_variables.insert(variable.into());
    self
  }

  pub fn import_from<S: Into<String>>(
    mut self,
    chunk: ChunkIdx,
    variables: impl IntoIterator<Item = S>,
  ) -> Self {
    self.imports.push(ChunkImport {
      chunk,
      variables: variables.into_iter().map(Into::into).collect(),
    });
    self
  }

  pub fn dynamic_import(mut self, chunk: ChunkIdx) -> Self {
    self.dynamic_imports.push(chunk);
    self
  }

  pub fn file_name(&self) -> Option<&ChunkFileName> {
    self.file_name.as_ref()
  }

  pub fn export_mode(&self) -> ExportMode {
    self.export_mode
  }

  /// Sorted exported names.
  pub fn get_export_names(&self) -> Vec<&str> {
    self.exports.keys().map(String::as_str).collect()
  }

  pub(crate) fn is_user_defined_entry(&self) -> bool {
    self
      .facade_module
      .as_ref()
      .map_or(false, |module| module.is_user_defined_entry_point)
  }

  pub(crate) fn is_entry(&self) -> bool {
    self
      .facade_module
      .as_ref()
      .map_or(false, |module| module.is_entry_point)
  }

  /// The exported name under which `variable` is reachable from other chunks.
  pub(crate) fn export_name_of(&self, variable: &str) -> Option<&str> {
    self
      .exports
      .iter()
      .find(|(_, local)| local.as_str() == variable)
      .map(|(exported, _)| exported.as_str())
  }

  /// Exports of the facade module plus every variable other chunks depend on.
  pub(crate) fn generate_exports(&mut self) {
    let mut exports = BTreeMap::new();
    if let Some(facade) = &self.facade_module {
      exports.extend(
        facade
          .exports
          .iter()
          .map(|(exported, local)| (exported.clone(), local.clone())),
      );
    }
    for variable in &self.exposed_variables {
      if exports.values().any(|local| local == variable) {
        continue;
      }
      let mut exported = variable.clone();
      let mut index = 0;
      while exports.contains_key(&exported) {
        index += 1;
        exported = format!("{variable}${index}");
      }
      exports.insert(exported, variable.clone());
    }
    self.exports = exports;
  }

  /// explicit name -> facade chunk name -> facade file name -> first module with a chunk name
  pub(crate) fn get_chunk_name(&self) -> String {
    let name = self
      .name
      .clone()
      .or_else(|| {
        self
          .facade_module
          .as_ref()
          .and_then(|facade| facade.chunk_name.clone().or_else(|| facade.file_stem()))
      })
      .or_else(|| {
        self
          .modules
          .iter()
          .find_map(|module| module.chunk_name.clone())
      })
      .unwrap_or_else(|| DEFAULT_CHUNK_NAME.to_string());
    sanitize_file_name(&name)
  }

  fn chunk_at(chunks: &[Chunk], idx: ChunkIdx) -> BundleResult<&Chunk> {
    chunks
      .get(idx.0)
      .ok_or_else(|| Error::panic(format!("Chunk #{} does not exist", idx.0)))
  }

  pub(crate) fn file_name_or_err(&self) -> BundleResult<&str> {
    self
      .file_name
      .as_ref()
      .map(ChunkFileName::file_name)
      .ok_or_else(|| Error::panic(format!("Chunk \"{}\" has no file name yet", self.get_chunk_name())))
  }

  pub(crate) fn get_import_ids(&self, chunks: &[Chunk]) -> BundleResult<Vec<String>> {
    self
      .imports
      .iter()
      .map(|import| Ok(Self::chunk_at(chunks, import.chunk)?.file_name_or_err()?.to_string()))
      .collect()
  }

  pub(crate) fn get_dynamic_import_ids(&self, chunks: &[Chunk]) -> BundleResult<Vec<String>> {
    self
      .dynamic_imports
      .iter()
      .map(|idx| Ok(Self::chunk_at(chunks, *idx)?.file_name_or_err()?.to_string()))
      .collect()
  }

  /// Collects what every module contributes to the chunk.
  pub(crate) fn pre_render(
    &mut self,
    output_options: &OutputOptions,
    input_base: &Path,
    plugin_driver: &PluginDriver,
  ) {
    let mut pre_rendered = PreRenderedChunk::default();
    for (idx, module) in self.modules.iter().enumerate() {
      let rendered = module.code.trim();
      pre_rendered.rendered_modules.insert(
        module.id.clone(),
        RenderedModule {
          original_length: module.original_length.unwrap_or(module.code.len()),
          rendered_length: rendered.len(),
          rendered_exports: module.exports.keys().cloned().collect(),
          removed_exports: module.removed_exports.clone(),
        },
      );
      if rendered.is_empty() {
        continue;
      }
      if output_options.sourcemap {
        let source_name = if module.id.is_absolute() {
          module
            .id
            .id()
            .as_path()
            .relative(input_base)
            .to_string_lossy()
            .replace('\\', "/")
        } else {
          module.id.id().to_string()
        };
        pre_rendered.source_names.push(source_name);
      }
      pre_rendered.sources.push((idx, rendered.to_string()));
    }

    if pre_rendered.sources.is_empty() && self.exports.is_empty() && self.imports.is_empty() {
      plugin_driver.warn(Error::empty_chunk(self.get_chunk_name()));
    }
    tracing::trace!(
      "pre-rendered chunk {} with {} non-empty modules",
      self.get_chunk_name(),
      pre_rendered.sources.len()
    );
    self.pre_rendered = Some(pre_rendered);
  }

  /// The manifest entry of the chunk, without code.
  pub(crate) fn to_output_chunk(&self, chunks: &[Chunk]) -> BundleResult<OutputChunk> {
    Ok(OutputChunk {
      code: None,
      map: None,
      dynamic_imports: self.get_dynamic_import_ids(chunks)?,
      exports: self.exports.keys().cloned().collect(),
      facade_module_id: self.facade_module.as_ref().map(|module| module.id.clone()),
      file_name: self.file_name_or_err()?.to_string(),
      imports: self.get_import_ids(chunks)?,
      is_dynamic_entry: self.is_dynamic_entry,
      is_entry: self.is_entry(),
      modules: self
        .pre_rendered
        .as_ref()
        .map(|pre_rendered| pre_rendered.rendered_modules.clone())
        .unwrap_or_default(),
      name: self.get_chunk_name(),
    })
  }
}
