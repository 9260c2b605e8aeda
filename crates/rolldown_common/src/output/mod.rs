mod output_asset;
pub use output_asset::*;
mod output_bundle;
pub use output_bundle::*;
mod output_chunk;
pub use output_chunk::*;
mod rendered_module;
pub use rendered_module::*;
mod rendered_source_map;
pub use rendered_source_map::*;

/// An entry of the [OutputBundle].
#[derive(Debug)]
pub enum Output {
  Chunk(Box<OutputChunk>),
  Asset(Box<OutputAsset>),
}

impl Output {
  pub fn file_name(&self) -> &str {
    match self {
      Output::Chunk(chunk) => &chunk.file_name,
      Output::Asset(asset) => &asset.file_name,
    }
  }

  /// `"chunk"` or `"asset"`, the value of rollup's `type` field.
  pub fn type_name(&self) -> &'static str {
    match self {
      Output::Chunk(_) => "chunk",
      Output::Asset(_) => "asset",
    }
  }

  pub fn as_chunk(&self) -> Option<&OutputChunk> {
    match self {
      Output::Chunk(chunk) => Some(&**chunk),
      Output::Asset(_) => None,
    }
  }

  pub fn as_chunk_mut(&mut self) -> Option<&mut OutputChunk> {
    match self {
      Output::Chunk(chunk) => Some(&mut **chunk),
      Output::Asset(_) => None,
    }
  }

  pub fn as_asset(&self) -> Option<&OutputAsset> {
    match self {
      Output::Asset(asset) => Some(&**asset),
      Output::Chunk(_) => None,
    }
  }
}
