use std::path::Path;

use rolldown_common::{ExportMode, ModuleFormat, OutputChunk, OutputOptions, RenderedSourceMap};
use rolldown_error::Error;

use crate::{import_path, Addons, BundleResult, Chunk, CodeBuilder, PluginDriver};

pub(crate) struct RenderContext<'a> {
  pub output_options: &'a OutputOptions,
  pub addons: &'a Addons,
  /// All chunks of the run, to look up the file names and exports of imported chunks.
  pub chunks: &'a [Chunk],
  pub plugin_driver: &'a PluginDriver,
}

#[derive(Debug)]
pub(crate) struct RenderedChunk {
  pub code: String,
  pub map: Option<RenderedSourceMap>,
}

/// Writes blocks separated by an empty line.
struct BlockWriter<'a> {
  builder: &'a mut CodeBuilder,
  has_content: bool,
}

impl<'a> BlockWriter<'a> {
  fn new(builder: &'a mut CodeBuilder) -> Self {
    Self {
      builder,
      has_content: false,
    }
  }

  fn separate(&mut self) {
    if self.has_content {
      self.builder.push_str("\n\n");
    }
    self.has_content = true;
  }

  fn text(&mut self, text: &str) {
    if text.is_empty() {
      return;
    }
    self.separate();
    self.builder.push_str(text);
  }

  fn lines(&mut self, lines: &[String]) {
    self.text(&lines.join("\n"));
  }

  fn source(&mut self, source: u32, code: &str) {
    self.separate();
    self.builder.push_source(source, code);
  }

  fn finish(self) {
    if self.has_content {
      self.builder.push_str("\n");
    }
  }
}

struct Wrapper {
  header: String,
  footer: String,
}

impl Chunk {
  pub(crate) async fn render(
    &self,
    ctx: &RenderContext<'_>,
    output_chunk: &OutputChunk,
  ) -> BundleResult<RenderedChunk> {
    let output_options = ctx.output_options;
    let addons = ctx.addons;
    let pre_rendered = self.pre_rendered.as_ref().ok_or_else(|| {
      Error::panic(format!(
        "Chunk \"{}\" is rendered before it was pre-rendered",
        self.get_chunk_name()
      ))
    })?;
    let file_name = self.file_name_or_err()?;
    tracing::trace!("rendering chunk {file_name}");

    let wrapper = self.wrapper(output_options, ctx.plugin_driver)?;

    let mut builder = CodeBuilder::default();
    if !addons.banner.is_empty() {
      builder.push_line(&addons.banner);
    }
    if let Some(wrapper) = &wrapper {
      builder.push_line(&wrapper.header);
    }

    let mut blocks = BlockWriter::new(&mut builder);
    match output_options.format {
      ModuleFormat::Esm => {
        blocks.lines(&self.render_esm_imports(file_name, ctx.chunks)?);
      }
      ModuleFormat::Cjs => {
        blocks.text("'use strict';");
        if self.export_mode.is_named() && !self.exports.is_empty() {
          blocks.text("Object.defineProperty(exports, '__esModule', { value: true });");
        }
        blocks.lines(&self.render_cjs_imports(file_name, ctx.chunks)?);
      }
      ModuleFormat::Iife | ModuleFormat::Umd => {
        blocks.text("'use strict';");
      }
    }
    blocks.text(&addons.intro);
    for (source, (_, code)) in pre_rendered.sources.iter().enumerate() {
      blocks.source(source as u32, code);
    }
    blocks.lines(&self.render_exports(output_options.format));
    blocks.text(&addons.outro);
    if output_options.format == ModuleFormat::Iife && self.has_named_exports() {
      blocks.text("return exports;");
    }
    blocks.finish();

    if let Some(wrapper) = &wrapper {
      builder.push_line(&wrapper.footer);
    }
    if !addons.footer.is_empty() {
      builder.push_line(&addons.footer);
    }

    let (code, map) = if output_options.sourcemap {
      let sources = pre_rendered
        .source_names
        .iter()
        .zip(pre_rendered.sources.iter())
        .map(|(name, (_, code))| (name.as_str(), code.as_str()))
        .collect::<Vec<_>>();
      let map_file = output_options
        .sourcemap_file
        .as_deref()
        .unwrap_or(file_name);
      let map_file = Path::new(map_file)
        .file_name()
        .map(|name| name.to_string_lossy().to_string());
      let (code, map) = builder.into_code_and_map(&sources, map_file.as_deref());
      (code, Some(RenderedSourceMap::from_source_map(&map)?))
    } else {
      (builder.into_code(), None)
    };

    let (code, map) = ctx
      .plugin_driver
      .render_chunk(code, map, output_chunk, output_options)
      .await?;
    Ok(RenderedChunk { code, map })
  }

  /// `(imported chunk path, [(exported name, local name)])` for every import.
  fn resolve_imports<'a>(
    &'a self,
    file_name: &str,
    chunks: &'a [Chunk],
  ) -> BundleResult<Vec<(String, Vec<(&'a str, &'a str)>)>> {
    self
      .imports
      .iter()
      .map(|import| {
        let target = chunks
          .get(import.chunk.0)
          .ok_or_else(|| Error::panic(format!("Chunk #{} does not exist", import.chunk.0)))?;
        let bindings = import
          .variables
          .iter()
          .map(|variable| {
            let exported = target.export_name_of(variable).ok_or_else(|| {
              Error::panic(format!(
                "Chunk \"{}\" does not expose \"{variable}\"",
                target.get_chunk_name()
              ))
            })?;
            Ok((exported, variable.as_str()))
          })
          .collect::<BundleResult<Vec<_>>>()?;
        Ok((import_path(file_name, target.file_name_or_err()?), bindings))
      })
      .collect()
  }

  fn render_esm_imports(&self, file_name: &str, chunks: &[Chunk]) -> BundleResult<Vec<String>> {
    Ok(
      self
        .resolve_imports(file_name, chunks)?
        .into_iter()
        .map(|(path, bindings)| {
          if bindings.is_empty() {
            return format!("import '{path}';");
          }
          let specifiers = bindings
            .iter()
            .map(|(exported, local)| {
              if exported == local {
                local.to_string()
              } else {
                format!("{exported} as {local}")
              }
            })
            .collect::<Vec<_>>()
            .join(", ");
          format!("import {{ {specifiers} }} from '{path}';")
        })
        .collect(),
    )
  }

  fn render_cjs_imports(&self, file_name: &str, chunks: &[Chunk]) -> BundleResult<Vec<String>> {
    Ok(
      self
        .resolve_imports(file_name, chunks)?
        .into_iter()
        .map(|(path, bindings)| {
          if bindings.is_empty() {
            return format!("require('{path}');");
          }
          let properties = bindings
            .iter()
            .map(|(exported, local)| {
              if exported == local {
                local.to_string()
              } else {
                format!("{exported}: {local}")
              }
            })
            .collect::<Vec<_>>()
            .join(", ");
          format!("var {{ {properties} }} = require('{path}');")
        })
        .collect(),
    )
  }

  fn render_exports(&self, format: ModuleFormat) -> Vec<String> {
    if self.exports.is_empty() {
      return vec![];
    }
    if format == ModuleFormat::Esm {
      let specifiers = self
        .exports
        .iter()
        .map(|(exported, local)| {
          if exported == local {
            local.clone()
          } else {
            format!("{local} as {exported}")
          }
        })
        .collect::<Vec<_>>()
        .join(", ");
      return vec![format!("export {{ {specifiers} }};")];
    }
    match self.export_mode {
      ExportMode::None => vec![],
      ExportMode::Default => {
        let local = self
          .exports
          .get("default")
          .or_else(|| self.exports.values().next());
        match (format, local) {
          (_, None) => vec![],
          (ModuleFormat::Cjs, Some(local)) => vec![format!("module.exports = {local};")],
          (_, Some(local)) => vec![format!("return {local};")],
        }
      }
      ExportMode::Named | ExportMode::Auto => self
        .exports
        .iter()
        .map(|(exported, local)| format!("exports.{exported} = {local};"))
        .collect(),
    }
  }

  fn has_exports(&self) -> bool {
    !self.export_mode.is_none() && !self.exports.is_empty()
  }

  fn has_named_exports(&self) -> bool {
    self.has_exports() && !self.export_mode.is_default()
  }

  /// The function wrapper of single-file formats.
  fn wrapper(
    &self,
    output_options: &OutputOptions,
    plugin_driver: &PluginDriver,
  ) -> BundleResult<Option<Wrapper>> {
    let has_exports = self.has_exports();
    let named = self.has_named_exports();
    let name = output_options.name.as_deref();
    match output_options.format {
      ModuleFormat::Esm | ModuleFormat::Cjs => Ok(None),
      ModuleFormat::Iife => {
        if has_exports && name.is_none() {
          plugin_driver.warn(Error::missing_name_option_for_iife_export());
        }
        let assignment = match name {
          Some(name) if has_exports => format!("var {name} = "),
          _ => String::new(),
        };
        Ok(Some(if named {
          Wrapper {
            header: format!("{assignment}(function (exports) {{"),
            footer: "})({});".to_string(),
          }
        } else {
          Wrapper {
            header: format!("{assignment}(function () {{"),
            footer: "})();".to_string(),
          }
        }))
      }
      ModuleFormat::Umd => {
        if !has_exports {
          return Ok(Some(Wrapper {
            header: [
              "(function (factory) {",
              "  typeof define === 'function' && define.amd ? define(factory) :",
              "  factory();",
              "})((function () {",
            ]
            .join("\n"),
            footer: "}));".to_string(),
          }));
        }
        let Some(name) = name else {
          return Err(Error::missing_name_option_for_umd_export());
        };
        let (cjs, amd, global, factory_params) = if named {
          (
            "factory(exports)".to_string(),
            "define(['exports'], factory)".to_string(),
            format!("factory(global.{name} = {{}})"),
            "exports",
          )
        } else {
          (
            "module.exports = factory()".to_string(),
            "define(factory)".to_string(),
            format!("global.{name} = factory()"),
            "",
          )
        };
        Ok(Some(Wrapper {
          header: [
            "(function (global, factory) {".to_string(),
            format!("  typeof exports === 'object' && typeof module !== 'undefined' ? {cjs} :"),
            format!("  typeof define === 'function' && define.amd ? {amd} :"),
            format!(
              "  (global = typeof globalThis !== 'undefined' ? globalThis : global || self, {global});"
            ),
            format!("}})(this, (function ({factory_params}) {{"),
          ]
          .join("\n"),
          footer: "}));".to_string(),
        }))
      }
    }
  }
}
