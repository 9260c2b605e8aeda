use std::sync::Arc;

use futures::future::{join_all, BoxFuture};
use rolldown_common::{
  FileNameTemplate, InputOptions, OutputBundle, OutputChunk, OutputOptions, RenderedSourceMap,
  WarningHandler,
};
use rolldown_error::Error;
use rolldown_plugin::{
  DispatchMode, FileEmitter, GenerateBundleArgs, HookKind, HookNoopReturn, Plugin,
  PluginContext, RenderChunkArgs, RenderErrorArgs, RenderStartArgs, SharedFileEmitter,
};
use rustc_hash::FxHashMap;

use crate::BundleResult;

pub type SharedPluginDriver = Arc<PluginDriver>;

#[derive(Debug)]
struct PluginEntry {
  plugin: Box<dyn Plugin>,
  ctx: PluginContext,
}

/// Calls plugin hooks. Each [HookKind] has a fixed [DispatchMode] and an ordered list of
/// listening plugins.
pub struct PluginDriver {
  plugins: Vec<PluginEntry>,
  listeners: FxHashMap<HookKind, Vec<usize>>,
  file_emitter: SharedFileEmitter,
  on_warn: WarningHandler,
  strict_deprecations: bool,
}

impl std::fmt::Debug for PluginDriver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PluginDriver")
      .field("plugins", &self.plugins)
      .field("listeners", &self.listeners)
      .finish()
  }
}

impl PluginDriver {
  pub fn new(input_options: &InputOptions, plugins: Vec<Box<dyn Plugin>>) -> Self {
    let file_emitter = FileEmitter::new().into_shared();
    let mut listeners: FxHashMap<HookKind, Vec<usize>> = FxHashMap::default();
    let plugins = plugins
      .into_iter()
      .enumerate()
      .map(|(idx, plugin)| {
        let mut hooks = plugin.hooks();
        hooks.dedup();
        for kind in hooks {
          listeners.entry(kind).or_default().push(idx);
        }
        let ctx = PluginContext::new(
          plugin.name().to_string(),
          file_emitter.clone(),
          input_options.on_warn.clone(),
        );
        PluginEntry { plugin, ctx }
      })
      .collect();
    Self {
      plugins,
      listeners,
      file_emitter,
      on_warn: input_options.on_warn.clone(),
      strict_deprecations: input_options.strict_deprecations,
    }
  }

  pub fn into_shared(self) -> SharedPluginDriver {
    Arc::new(self)
  }

  fn listeners(&self, kind: HookKind) -> impl Iterator<Item = &PluginEntry> {
    self
      .listeners
      .get(&kind)
      .into_iter()
      .flatten()
      .filter_map(|idx| self.plugins.get(*idx))
  }

  async fn run_parallel<'a, F>(&'a self, kind: HookKind, call: F) -> BundleResult<()>
  where
    F: Fn(&'a dyn Plugin, &'a PluginContext) -> BoxFuture<'a, HookNoopReturn>,
  {
    debug_assert_eq!(kind.dispatch_mode(), DispatchMode::Parallel);
    let results = join_all(self.listeners(kind).map(|entry| {
      let fut = call(entry.plugin.as_ref(), &entry.ctx);
      async move {
        fut
          .await
          .map_err(|err| with_hook_context(err, kind, &entry.ctx))
      }
    }))
    .await;
    // Every listener has settled, report the first failure in registration order.
    results.into_iter().collect()
  }

  pub async fn render_start(&self, args: &RenderStartArgs<'_>) -> BundleResult<()> {
    self
      .run_parallel(HookKind::RenderStart, |plugin, ctx| {
        plugin.render_start(ctx, args)
      })
      .await
  }

  pub async fn render_error(&self, args: &RenderErrorArgs<'_>) -> BundleResult<()> {
    self
      .run_parallel(HookKind::RenderError, |plugin, ctx| {
        plugin.render_error(ctx, args)
      })
      .await
  }

  /// Non-empty results of an addon hook, in registration order.
  pub async fn addon(&self, kind: HookKind) -> BundleResult<Vec<String>> {
    debug_assert!(kind.is_addon());
    let mut outputs = vec![];
    for entry in self.listeners(kind) {
      let output = match kind {
        HookKind::Banner => entry.plugin.banner(&entry.ctx).await,
        HookKind::Footer => entry.plugin.footer(&entry.ctx).await,
        HookKind::Intro => entry.plugin.intro(&entry.ctx).await,
        HookKind::Outro => entry.plugin.outro(&entry.ctx).await,
        _ => Ok(None),
      }
      .map_err(|err| Error::addon_error(kind.as_str(), entry.ctx.plugin_name().to_string(), err))?;
      if let Some(output) = output.filter(|output| !output.is_empty()) {
        outputs.push(output);
      }
    }
    Ok(outputs)
  }

  /// Passes the rendered code through every `renderChunk` listener.
  pub async fn render_chunk(
    &self,
    mut code: String,
    mut map: Option<RenderedSourceMap>,
    chunk: &OutputChunk,
    output_options: &OutputOptions,
  ) -> BundleResult<(String, Option<RenderedSourceMap>)> {
    for entry in self.listeners(HookKind::RenderChunk) {
      let output = entry
        .plugin
        .render_chunk(
          &entry.ctx,
          &RenderChunkArgs {
            code: &code,
            chunk,
            output_options,
          },
        )
        .await
        .map_err(|err| with_hook_context(err, HookKind::RenderChunk, &entry.ctx))?;
      let Some(output) = output else {
        continue;
      };
      code = output.code;
      match output.map {
        Some(new_map) => map = Some(new_map),
        None if map.is_some() => {
          map = None;
          self.warn(Error::sourcemap_broken(entry.ctx.plugin_name().to_string()));
        }
        None => {}
      }
    }
    Ok((code, map))
  }

  pub async fn generate_bundle(&self, args: &mut GenerateBundleArgs<'_>) -> BundleResult<()> {
    for entry in self.listeners(HookKind::GenerateBundle) {
      entry
        .plugin
        .generate_bundle(&entry.ctx, args)
        .await
        .map_err(|err| with_hook_context(err, HookKind::GenerateBundle, &entry.ctx))?;
    }
    Ok(())
  }

  pub fn set_output_bundle(&self, asset_file_names: FileNameTemplate) {
    self.file_emitter.set_output_bundle(asset_file_names);
  }

  pub fn emit_ready_assets(&self, bundle: &mut OutputBundle) -> BundleResult<()> {
    self.file_emitter.emit_ready_assets(bundle)
  }

  pub fn finalize_assets(&self, bundle: &mut OutputBundle) -> BundleResult<()> {
    self.file_emitter.finalize_assets(bundle)
  }

  pub fn warn(&self, warning: Error) {
    (self.on_warn)(warning);
  }

  /// Warns, or fails when deprecations are strict.
  pub fn warn_deprecation(&self, message: impl Into<String>) -> BundleResult<()> {
    let deprecation = Error::deprecation(message.into());
    if self.strict_deprecations {
      return Err(deprecation);
    }
    self.warn(deprecation);
    Ok(())
  }
}

fn with_hook_context(err: Error, kind: HookKind, ctx: &PluginContext) -> Error {
  err.context(format!(
    "\"{kind}\" hook of plugin \"{}\"",
    ctx.plugin_name()
  ))
}
