#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use rolldown_bundle::{
  BundleError, Chunk, ChunkIdx, GenerateBundleArgs, HookNoopReturn, HookRenderChunkOutput,
  InputOptions, Module, OutputBundle, Plugin, PluginContext, PluginName, RenderChunkArgs,
  RenderErrorArgs, RenderStartArgs, WarningHandler,
};

/// Collects warnings passed to `on_warn`.
#[derive(Clone, Default)]
pub struct Warnings(Arc<Mutex<Vec<BundleError>>>);

impl Warnings {
  pub fn handler(&self) -> WarningHandler {
    let warnings = self.0.clone();
    Arc::new(move |warning| warnings.lock().push(warning))
  }

  pub fn codes(&self) -> Vec<&'static str> {
    self.0.lock().iter().map(BundleError::code).collect()
  }

  pub fn messages(&self) -> Vec<String> {
    self.0.lock().iter().map(ToString::to_string).collect()
  }
}

pub fn input_options(warnings: &Warnings) -> InputOptions {
  InputOptions {
    on_warn: warnings.handler(),
    ..Default::default()
  }
}

/// Hook calls in the order they happened, shared by all plugins of a test.
#[derive(Debug, Clone, Default)]
pub struct Events(Arc<Mutex<Vec<String>>>);

impl Events {
  pub fn push(&self, event: impl Into<String>) {
    self.0.lock().push(event.into());
  }

  pub fn all(&self) -> Vec<String> {
    self.0.lock().clone()
  }

  pub fn matching(&self, hook: &str) -> Vec<String> {
    self
      .all()
      .into_iter()
      .filter(|event| event.contains(hook))
      .collect()
  }
}

#[derive(Debug)]
pub struct RecordingPlugin {
  pub name: &'static str,
  pub events: Events,
  /// Delays `renderStart` to make a missing barrier visible.
  pub render_start_delay: Option<Duration>,
  pub fail_render_chunk: bool,
}

impl RecordingPlugin {
  pub fn new(name: &'static str, events: &Events) -> Self {
    Self {
      name,
      events: events.clone(),
      render_start_delay: None,
      fail_render_chunk: false,
    }
  }

  pub fn boxed(self) -> Box<dyn Plugin> {
    Box::new(self)
  }
}

#[async_trait::async_trait]
impl Plugin for RecordingPlugin {
  fn name(&self) -> PluginName {
    self.name.into()
  }

  async fn render_start(&self, _ctx: &PluginContext, _args: &RenderStartArgs) -> HookNoopReturn {
    if let Some(delay) = self.render_start_delay {
      tokio::time::sleep(delay).await;
    }
    self.events.push(format!("{}:renderStart", self.name));
    Ok(())
  }

  async fn render_chunk(
    &self,
    _ctx: &PluginContext,
    args: &RenderChunkArgs,
  ) -> HookRenderChunkOutput {
    self
      .events
      .push(format!("{}:renderChunk:{}", self.name, args.chunk.name));
    if self.fail_render_chunk {
      return Err(BundleError::panic(format!("{} cannot render", self.name)));
    }
    Ok(None)
  }

  async fn render_error(&self, _ctx: &PluginContext, args: &RenderErrorArgs) -> HookNoopReturn {
    self
      .events
      .push(format!("{}:renderError:{}", self.name, args.error.code()));
    Ok(())
  }

  async fn generate_bundle(
    &self,
    _ctx: &PluginContext,
    _args: &mut GenerateBundleArgs,
  ) -> HookNoopReturn {
    self.events.push(format!("{}:generateBundle", self.name));
    Ok(())
  }
}

pub fn chunk_keys(bundle: &OutputBundle) -> Vec<String> {
  bundle.keys().cloned().collect()
}

/// `main` (entry) imports `shared` from a second, shared chunk.
pub fn two_chunks() -> Vec<Chunk> {
  let main = Arc::new(Module::new("/project/src/main.js", "console.log(shared);\n").as_entry());
  let shared = Arc::new(Module::new(
    "/project/src/shared.js",
    "const shared = 'shared';",
  ));
  vec![
    Chunk::new(vec![main.clone()])
      .with_facade(main)
      .import_from(ChunkIdx(1), ["shared"]),
    Chunk::new(vec![shared]).with_name("shared").expose("shared"),
  ]
}

/// A single entry chunk whose module exports `answer` as default.
pub fn single_chunk() -> Vec<Chunk> {
  let main = Arc::new(
    Module::new("/project/src/main.js", "const answer = 42;")
      .as_entry()
      .with_export("default", "answer"),
  );
  vec![Chunk::new(vec![main.clone()]).with_facade(main)]
}
