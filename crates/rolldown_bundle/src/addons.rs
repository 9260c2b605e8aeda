use rolldown_common::OutputOptions;
use rolldown_plugin::HookKind;

use crate::{BundleResult, PluginDriver};

/// Banner, footer, intro and outro of a run. Empty when there is nothing to add.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Addons {
  pub banner: String,
  pub footer: String,
  pub intro: String,
  pub outro: String,
}

async fn create_addon(
  option: Option<&str>,
  kind: HookKind,
  plugin_driver: &PluginDriver,
) -> BundleResult<String> {
  let mut parts = option
    .filter(|option| !option.is_empty())
    .map(ToString::to_string)
    .into_iter()
    .collect::<Vec<_>>();
  parts.extend(plugin_driver.addon(kind).await?);
  Ok(parts.join("\n"))
}

pub(crate) async fn create_addons(
  output_options: &OutputOptions,
  plugin_driver: &PluginDriver,
) -> BundleResult<Addons> {
  let (banner, footer, intro, outro) = futures::try_join!(
    create_addon(output_options.banner.as_deref(), HookKind::Banner, plugin_driver),
    create_addon(output_options.footer.as_deref(), HookKind::Footer, plugin_driver),
    create_addon(output_options.intro.as_deref(), HookKind::Intro, plugin_driver),
    create_addon(output_options.outro.as_deref(), HookKind::Outro, plugin_driver),
  )?;
  Ok(Addons {
    banner,
    footer,
    intro,
    outro,
  })
}
