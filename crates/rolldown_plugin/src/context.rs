use rolldown_common::{StrOrBytes, WarningHandler};
use rolldown_error::Error;

use crate::{EmittedAsset, EmittedFileRef, SharedFileEmitter};

/// The `this` of rollup plugins. Every plugin gets its own context.
#[derive(Clone)]
pub struct PluginContext {
  plugin_name: String,
  file_emitter: SharedFileEmitter,
  on_warn: WarningHandler,
}

impl std::fmt::Debug for PluginContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PluginContext")
      .field("plugin_name", &self.plugin_name)
      .finish()
  }
}

impl PluginContext {
  pub fn new(
    plugin_name: impl Into<String>,
    file_emitter: SharedFileEmitter,
    on_warn: WarningHandler,
  ) -> Self {
    Self {
      plugin_name: plugin_name.into(),
      file_emitter,
      on_warn,
    }
  }

  pub fn plugin_name(&self) -> &str {
    &self.plugin_name
  }

  pub fn emit_asset(&self, asset: EmittedAsset) -> rolldown_error::Result<EmittedFileRef> {
    self.file_emitter.emit_asset(asset)
  }

  pub fn set_asset_source(
    &self,
    file_ref: EmittedFileRef,
    source: impl Into<StrOrBytes>,
  ) -> rolldown_error::Result<()> {
    self.file_emitter.set_asset_source(file_ref, source)
  }

  pub fn get_file_name(&self, file_ref: EmittedFileRef) -> rolldown_error::Result<String> {
    self.file_emitter.get_file_name(file_ref)
  }

  pub fn warn(&self, warning: Error) {
    (self.on_warn)(warning.context(format!("plugin \"{}\"", self.plugin_name)));
  }
}
