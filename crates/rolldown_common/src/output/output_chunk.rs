use hashlink::LinkedHashMap;

use crate::{ModuleId, RenderedModule, RenderedSourceMap};

#[derive(Debug)]
pub struct OutputChunk {
  /// `None` until the chunk is rendered.
  pub code: Option<String>,
  pub map: Option<RenderedSourceMap>,
  pub dynamic_imports: Vec<String>,
  pub exports: Vec<String>,
  pub facade_module_id: Option<ModuleId>,
  pub file_name: String,
  pub imports: Vec<String>,
  pub is_dynamic_entry: bool,
  pub is_entry: bool,
  pub modules: LinkedHashMap<ModuleId, RenderedModule>,
  pub name: String,
}

impl OutputChunk {
  pub fn code(&self) -> &str {
    self.code.as_deref().unwrap_or_default()
  }
}
