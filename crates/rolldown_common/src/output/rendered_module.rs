/// Per-module summary of a rendered chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedModule {
  pub original_length: usize,
  pub rendered_length: usize,
  pub rendered_exports: Vec<String>,
  pub removed_exports: Vec<String>,
}
