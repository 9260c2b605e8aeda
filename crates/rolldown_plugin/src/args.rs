use rolldown_common::{InputOptions, OutputBundle, OutputChunk, OutputOptions};
use rolldown_error::Error;

#[derive(Debug, Clone, Copy)]
pub struct RenderStartArgs<'a> {
  pub output_options: &'a OutputOptions,
  pub input_options: &'a InputOptions,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderChunkArgs<'a> {
  /// Code produced by the previous plugin, or by the renderer for the first one.
  pub code: &'a str,
  /// The manifest entry of the chunk being rendered. Its `code` is not set yet.
  pub chunk: &'a OutputChunk,
  pub output_options: &'a OutputOptions,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderErrorArgs<'a> {
  pub error: &'a Error,
}

#[derive(Debug)]
pub struct GenerateBundleArgs<'a> {
  pub output_options: &'a OutputOptions,
  pub bundle: &'a mut OutputBundle,
  pub is_write: bool,
}
