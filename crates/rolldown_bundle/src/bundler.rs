use std::sync::Arc;

use rolldown_common::{InputOptions, OutputBundle, OutputOptions};
use rolldown_plugin::Plugin;
use tracing::instrument;

use crate::{Bundle, BundleResult, Chunk, PluginDriver, SharedPluginDriver};

pub struct Bundler {
  input_options: Arc<InputOptions>,
  plugin_driver: SharedPluginDriver,
}

impl Bundler {
  pub fn new(input_options: InputOptions) -> Self {
    Self::with_plugins(input_options, vec![])
  }

  pub fn with_plugins(input_options: InputOptions, plugins: Vec<Box<dyn Plugin>>) -> Self {
    rolldown_tracing::enable_tracing_on_demand();
    let plugin_driver = PluginDriver::new(&input_options, plugins).into_shared();
    Self {
      input_options: Arc::new(input_options),
      plugin_driver,
    }
  }

  /// Renders `chunks` into an output bundle without writing anything.
  #[instrument(skip_all)]
  pub async fn generate(
    &mut self,
    output_options: OutputOptions,
    chunks: Vec<Chunk>,
  ) -> BundleResult<OutputBundle> {
    self.bundle(output_options, chunks, false).await
  }

  /// Like [Bundler::generate], but tells plugins the output is going to be written.
  #[instrument(skip_all)]
  pub async fn write(
    &mut self,
    output_options: OutputOptions,
    chunks: Vec<Chunk>,
  ) -> BundleResult<OutputBundle> {
    self.bundle(output_options, chunks, true).await
  }

  async fn bundle(
    &mut self,
    output_options: OutputOptions,
    chunks: Vec<Chunk>,
    is_write: bool,
  ) -> BundleResult<OutputBundle> {
    tracing::debug!("{:#?}", self.input_options);
    tracing::debug!("{:#?}", output_options);
    let mut bundle = Bundle::new(
      &self.input_options,
      &output_options,
      self.plugin_driver.clone(),
      chunks,
    );
    bundle.generate(is_write).await
  }
}
