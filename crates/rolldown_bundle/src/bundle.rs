use std::path::Path;

use futures::future::try_join_all;
use rolldown_common::{InputOptions, Output, OutputBundle, OutputOptions};
use rolldown_error::Error;
use rolldown_plugin::{GenerateBundleArgs, RenderErrorArgs, RenderStartArgs};
use tracing::instrument;

use crate::{
  assign_chunk_ids, commondir, create_addons, finalize_hashes, get_export_mode, BundleResult,
  Chunk, RenderContext, SharedPluginDriver,
};

/// One generation run: turns linked chunks into the output bundle.
#[derive(Debug)]
pub struct Bundle<'a> {
  input_options: &'a InputOptions,
  output_options: &'a OutputOptions,
  plugin_driver: SharedPluginDriver,
  chunks: Vec<Chunk>,
}

impl<'a> Bundle<'a> {
  pub fn new(
    input_options: &'a InputOptions,
    output_options: &'a OutputOptions,
    plugin_driver: SharedPluginDriver,
    chunks: Vec<Chunk>,
  ) -> Self {
    Self {
      input_options,
      output_options,
      plugin_driver,
      chunks,
    }
  }

  pub fn chunks(&self) -> &[Chunk] {
    &self.chunks
  }

  #[instrument(skip_all)]
  pub async fn generate(&mut self, is_write: bool) -> BundleResult<OutputBundle> {
    if self.output_options.dynamic_import_function.is_some() {
      self.plugin_driver.warn_deprecation(
        r#"The "output.dynamicImportFunction" option is deprecated. Use the "renderDynamicImport" plugin hook instead."#,
      )?;
    }

    let input_base = commondir(
      self
        .chunks
        .iter()
        .flat_map(|chunk| chunk.entry_modules.iter())
        .filter(|module| module.id.is_absolute())
        .map(|module| module.id.id()),
    );
    tracing::debug!("input base: {}", input_base.display());

    let mut output_bundle = OutputBundle::default();
    self
      .plugin_driver
      .set_output_bundle(self.output_options.asset_file_names());

    self.validate_options_for_multi_chunk_output()?;

    if let Err(err) = self.render(&input_base, &mut output_bundle).await {
      if let Err(hook_err) = self
        .plugin_driver
        .render_error(&RenderErrorArgs { error: &err })
        .await
      {
        tracing::error!("renderError hook failed: {hook_err}");
      }
      return Err(err);
    }

    self.plugin_driver.emit_ready_assets(&mut output_bundle)?;
    tracing::debug!("running generateBundle hooks");
    self
      .plugin_driver
      .generate_bundle(&mut GenerateBundleArgs {
        output_options: self.output_options,
        bundle: &mut output_bundle,
        is_write,
      })
      .await?;

    self.finalize(&mut output_bundle)?;
    Ok(output_bundle)
  }

  /// Everything that reports failures to `renderError`.
  async fn render(&mut self, input_base: &Path, output_bundle: &mut OutputBundle) -> BundleResult<()> {
    self
      .plugin_driver
      .render_start(&RenderStartArgs {
        output_options: self.output_options,
        input_options: self.input_options,
      })
      .await?;

    let addons = create_addons(self.output_options, &self.plugin_driver).await?;

    self.generate_export_modes()?;

    tracing::debug!("pre-rendering {} chunks", self.chunks.len());
    for chunk in &mut self.chunks {
      chunk.pre_render(self.output_options, input_base, &self.plugin_driver);
    }

    assign_chunk_ids(
      &mut self.chunks,
      self.input_options,
      self.output_options,
      input_base,
      output_bundle,
    )?;
    self.assign_chunks_to_bundle(output_bundle)?;

    tracing::debug!("rendering {} chunks", self.chunks.len());
    let ctx = RenderContext {
      output_options: self.output_options,
      addons: &addons,
      chunks: &self.chunks,
      plugin_driver: &self.plugin_driver,
    };
    let manifest: &OutputBundle = output_bundle;
    let rendered = try_join_all(self.chunks.iter().map(|chunk| {
      let ctx = &ctx;
      async move {
        let file_name = chunk.file_name_or_err()?;
        let output_chunk = manifest
          .get(file_name)
          .and_then(Output::as_chunk)
          .ok_or_else(|| Error::panic(format!("Chunk \"{file_name}\" is missing in the bundle")))?;
        let rendered = chunk.render(ctx, output_chunk).await?;
        BundleResult::Ok((file_name.to_string(), rendered))
      }
    }))
    .await?;

    for (file_name, rendered) in rendered {
      if let Some(output_chunk) = output_bundle
        .get_mut(&file_name)
        .and_then(Output::as_chunk_mut)
      {
        output_chunk.code = Some(rendered.code);
        output_chunk.map = rendered.map;
      }
    }
    Ok(())
  }

  fn generate_export_modes(&mut self) -> BundleResult<()> {
    let plugin_driver = &self.plugin_driver;
    for chunk in &mut self.chunks {
      chunk.generate_exports();
      let facade_module_id = chunk
        .facade_module
        .as_ref()
        .filter(|facade| self.input_options.preserve_modules || facade.is_entry_point)
        .map(|facade| facade.id.clone());
      if let Some(facade_module_id) = facade_module_id {
        chunk.export_mode = get_export_mode(
          chunk,
          self.output_options,
          &facade_module_id,
          |warning| plugin_driver.warn(warning),
        )?;
      }
    }
    Ok(())
  }

  fn assign_chunks_to_bundle(&self, output_bundle: &mut OutputBundle) -> BundleResult<()> {
    for chunk in &self.chunks {
      let output_chunk = chunk.to_output_chunk(&self.chunks)?;
      output_bundle.insert_unique(Output::Chunk(Box::new(output_chunk)))?;
    }
    Ok(())
  }

  fn validate_options_for_multi_chunk_output(&self) -> BundleResult<()> {
    if self.chunks.len() <= 1 {
      return Ok(());
    }
    let format = self.output_options.format;
    if !format.supports_code_splitting() {
      return Err(Error::invalid_format_for_code_splitting(format.as_str()));
    }
    if self.output_options.file.is_some() {
      return Err(Error::file_option_for_code_splitting());
    }
    if self.output_options.sourcemap_file.is_some() {
      return Err(Error::sourcemap_file_for_code_splitting());
    }
    Ok(())
  }

  fn finalize(&self, output_bundle: &mut OutputBundle) -> BundleResult<()> {
    if output_bundle.normalize_untagged() > 0 {
      self.plugin_driver.warn_deprecation(
        r#"A plugin is directly adding properties to the bundle object in the "generateBundle" hook. This is deprecated and will be removed in a future version, please use "this.emitFile" instead."#,
      )?;
    }
    self.plugin_driver.finalize_assets(output_bundle)?;
    finalize_hashes(output_bundle)
  }
}
