use hashlink::LinkedHashMap;
use rolldown_error::Error;
use rustc_hash::FxHashSet;

use crate::{Output, OutputAsset, OutputChunk, StrOrBytes};

/// The output manifest: file name -> [Output], in insertion order.
///
/// While generating, file names of chunks may still contain hash placeholders. They are
/// replaced with real hashes before the bundle is handed back to the caller.
#[derive(Debug, Default)]
pub struct OutputBundle {
  outputs: LinkedHashMap<String, Output>,
  /// Entries added through [OutputBundle::insert_untagged]. They only live here until the
  /// bundle gets normalized after the `generateBundle` hook.
  untagged: LinkedHashMap<String, StrOrBytes>,
}

impl OutputBundle {
  pub fn len(&self) -> usize {
    self.outputs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.outputs.is_empty()
  }

  pub fn get(&self, file_name: &str) -> Option<&Output> {
    self.outputs.get(file_name)
  }

  pub fn get_mut(&mut self, file_name: &str) -> Option<&mut Output> {
    self.outputs.get_mut(file_name)
  }

  pub fn contains_key(&self, file_name: &str) -> bool {
    self.outputs.contains_key(file_name)
  }

  pub fn keys(&self) -> impl Iterator<Item = &String> {
    self.outputs.keys()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Output)> {
    self.outputs.iter()
  }

  pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Output> {
    self.outputs.values_mut()
  }

  pub fn chunks(&self) -> impl Iterator<Item = &OutputChunk> {
    self.outputs.values().filter_map(Output::as_chunk)
  }

  pub fn assets(&self) -> impl Iterator<Item = &OutputAsset> {
    self.outputs.values().filter_map(Output::as_asset)
  }

  /// Inserts `output` under its file name and returns the entry it replaced.
  pub fn insert(&mut self, output: Output) -> Option<Output> {
    self.outputs.insert(output.file_name().to_string(), output)
  }

  /// Like [OutputBundle::insert], but refuses to overwrite an existing entry.
  pub fn insert_unique(&mut self, output: Output) -> rolldown_error::Result<()> {
    if self.outputs.contains_key(output.file_name()) {
      return Err(Error::file_name_conflict(output.file_name().to_string()));
    }
    self.insert(output);
    Ok(())
  }

  pub fn remove(&mut self, file_name: &str) -> Option<Output> {
    self.outputs.remove(file_name)
  }

  /// Removes every entry, keeping the order they were inserted in.
  pub fn drain(&mut self) -> impl Iterator<Item = Output> {
    std::mem::take(&mut self.outputs)
      .into_iter()
      .map(|(_, output)| output)
  }

  /// Lowercased file names of all entries, for case-insensitive deconflicting.
  pub fn lowercase_file_names(&self) -> FxHashSet<String> {
    self
      .outputs
      .keys()
      .chain(self.untagged.keys())
      .map(|file_name| file_name.to_lowercase())
      .collect()
  }

  /// Adds a file without saying whether it is a chunk or an asset.
  ///
  /// Deprecated: emit assets through the plugin context instead. Untagged entries are turned
  /// into assets once the `generateBundle` hook finished, with a deprecation warning.
  pub fn insert_untagged(&mut self, file_name: impl Into<String>, source: impl Into<StrOrBytes>) {
    self.untagged.insert(file_name.into(), source.into());
  }

  pub fn has_untagged(&self) -> bool {
    !self.untagged.is_empty()
  }

  /// Turns every untagged entry into an [OutputAsset] and returns how many there were.
  pub fn normalize_untagged(&mut self) -> usize {
    let untagged = std::mem::take(&mut self.untagged);
    let count = untagged.len();
    for (file_name, source) in untagged {
      self.insert(Output::Asset(Box::new(OutputAsset {
        file_name,
        name: None,
        source,
      })));
    }
    count
  }
}
