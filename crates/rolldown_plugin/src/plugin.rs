use std::{borrow::Cow, fmt::Debug};

use rolldown_common::RenderedSourceMap;

use crate::{
  GenerateBundleArgs, HookKind, PluginContext, RenderChunkArgs, RenderErrorArgs,
  RenderStartArgs,
};

#[derive(Debug)]
pub struct RenderChunkOutput {
  pub code: String,
  /// Leaving this empty while source maps are enabled drops the chunk's map.
  pub map: Option<RenderedSourceMap>,
}

pub type HookNoopReturn = rolldown_error::Result<()>;
pub type HookAddonOutput = rolldown_error::Result<Option<String>>;
pub type HookRenderChunkOutput = rolldown_error::Result<Option<RenderChunkOutput>>;
pub type PluginName<'a> = Cow<'a, str>;

#[async_trait::async_trait]
pub trait Plugin: Debug + Send + Sync {
  fn name(&self) -> PluginName;

  /// Hooks the plugin wants to be called for. Hooks not listed here are never dispatched
  /// to the plugin.
  fn hooks(&self) -> Vec<HookKind> {
    HookKind::ALL.to_vec()
  }

  async fn render_start(&self, _ctx: &PluginContext, _args: &RenderStartArgs) -> HookNoopReturn {
    Ok(())
  }

  async fn banner(&self, _ctx: &PluginContext) -> HookAddonOutput {
    Ok(None)
  }

  async fn footer(&self, _ctx: &PluginContext) -> HookAddonOutput {
    Ok(None)
  }

  async fn intro(&self, _ctx: &PluginContext) -> HookAddonOutput {
    Ok(None)
  }

  async fn outro(&self, _ctx: &PluginContext) -> HookAddonOutput {
    Ok(None)
  }

  async fn render_chunk(
    &self,
    _ctx: &PluginContext,
    _args: &RenderChunkArgs,
  ) -> HookRenderChunkOutput {
    Ok(None)
  }

  async fn render_error(&self, _ctx: &PluginContext, _args: &RenderErrorArgs) -> HookNoopReturn {
    Ok(())
  }

  async fn generate_bundle(
    &self,
    _ctx: &PluginContext,
    _args: &mut GenerateBundleArgs,
  ) -> HookNoopReturn {
    Ok(())
  }
}
