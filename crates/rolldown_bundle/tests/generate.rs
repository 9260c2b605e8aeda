mod common;

use std::{sync::Arc, time::Duration};

use common::{chunk_keys, input_options, single_chunk, two_chunks, Events, RecordingPlugin, Warnings};
use parking_lot::Mutex;
use rolldown_bundle::{
  Bundler, Chunk, ChunkIdx, EmittedAsset, EmittedFileRef, GenerateBundleArgs, HookAddonOutput,
  HookNoopReturn, HookRenderChunkOutput, InputOptions, Module, ModuleFormat, OutputOptions,
  Plugin, PluginContext, PluginName, RenderChunkArgs, RenderChunkOutput, RenderStartArgs,
};

fn output_options(format: ModuleFormat) -> OutputOptions {
  OutputOptions {
    format,
    ..Default::default()
  }
}

#[tokio::test]
async fn splitting_formats_reject_multiple_chunks() {
  for format in [ModuleFormat::Iife, ModuleFormat::Umd] {
    let events = Events::default();
    let warnings = Warnings::default();
    let mut bundler = Bundler::with_plugins(
      input_options(&warnings),
      vec![RecordingPlugin::new("recorder", &events).boxed()],
    );
    let err = bundler
      .generate(output_options(format), two_chunks())
      .await
      .unwrap_err();
    assert_eq!(err.code(), "INVALID_OPTION");
    assert!(err.to_string().contains(format.as_str()));
    assert!(events.all().is_empty());
  }
}

#[tokio::test]
async fn file_option_rejects_multiple_chunks_before_any_hook() {
  let events = Events::default();
  let warnings = Warnings::default();
  let mut bundler = Bundler::with_plugins(
    input_options(&warnings),
    vec![RecordingPlugin::new("recorder", &events).boxed()],
  );
  let err = bundler
    .generate(
      OutputOptions {
        file: Some("dist/bundle.js".to_string()),
        ..Default::default()
      },
      two_chunks(),
    )
    .await
    .unwrap_err();
  assert_eq!(err.code(), "INVALID_OPTION");
  assert!(events.all().is_empty());

  let err = bundler
    .generate(
      OutputOptions {
        sourcemap: true,
        sourcemap_file: Some("dist/bundle.js.map".to_string()),
        ..Default::default()
      },
      two_chunks(),
    )
    .await
    .unwrap_err();
  assert_eq!(err.code(), "INVALID_OPTION");
  assert!(events.all().is_empty());
}

#[tokio::test]
async fn single_chunk_skips_multi_chunk_validation() {
  let warnings = Warnings::default();
  let mut bundler = Bundler::new(input_options(&warnings));
  let bundle = bundler
    .generate(
      OutputOptions {
        format: ModuleFormat::Iife,
        file: Some("dist/bundle.js".to_string()),
        name: Some("bundle".to_string()),
        ..Default::default()
      },
      single_chunk(),
    )
    .await
    .unwrap();
  assert_eq!(chunk_keys(&bundle), vec!["bundle.js"]);
}

#[tokio::test]
async fn render_start_settles_before_chunks_render() {
  let events = Events::default();
  let warnings = Warnings::default();
  let mut slow = RecordingPlugin::new("slow", &events);
  slow.render_start_delay = Some(Duration::from_millis(20));
  let mut bundler = Bundler::with_plugins(
    input_options(&warnings),
    vec![slow.boxed(), RecordingPlugin::new("fast", &events).boxed()],
  );
  bundler
    .generate(OutputOptions::default(), two_chunks())
    .await
    .unwrap();

  let events = events.all();
  let last_start = events
    .iter()
    .rposition(|event| event.ends_with(":renderStart"))
    .unwrap();
  let first_render = events
    .iter()
    .position(|event| event.contains(":renderChunk:"))
    .unwrap();
  assert_eq!(events.iter().filter(|e| e.ends_with(":renderStart")).count(), 2);
  assert!(last_start < first_render);
  // Both chunks pass through both plugins.
  assert_eq!(events.iter().filter(|e| e.contains(":renderChunk:")).count(), 4);
}

#[tokio::test]
async fn render_failure_reaches_render_error_once() {
  let events = Events::default();
  let warnings = Warnings::default();
  let mut failing = RecordingPlugin::new("failing", &events);
  failing.fail_render_chunk = true;
  let mut bundler = Bundler::with_plugins(
    input_options(&warnings),
    vec![failing.boxed(), RecordingPlugin::new("observer", &events).boxed()],
  );
  let err = bundler
    .generate(OutputOptions::default(), single_chunk())
    .await
    .unwrap_err();

  assert_eq!(err.code(), "PANIC");
  assert!(err.to_string().contains("failing cannot render"));
  assert_eq!(
    events.matching("renderError"),
    vec!["failing:renderError:PANIC", "observer:renderError:PANIC"]
  );
  assert!(events.matching("generateBundle").is_empty());
}

#[tokio::test]
async fn missing_umd_name_fails_through_render_error() {
  let events = Events::default();
  let warnings = Warnings::default();
  let mut bundler = Bundler::with_plugins(
    input_options(&warnings),
    vec![RecordingPlugin::new("recorder", &events).boxed()],
  );
  let err = bundler
    .generate(output_options(ModuleFormat::Umd), single_chunk())
    .await
    .unwrap_err();
  assert_eq!(err.code(), "MISSING_NAME_OPTION_FOR_UMD_EXPORT");
  assert_eq!(
    events.matching("renderError"),
    vec!["recorder:renderError:MISSING_NAME_OPTION_FOR_UMD_EXPORT"]
  );
}

#[tokio::test]
async fn generate_bundle_runs_in_registration_order() {
  let events = Events::default();
  let warnings = Warnings::default();
  let mut bundler = Bundler::with_plugins(
    input_options(&warnings),
    vec![
      RecordingPlugin::new("first", &events).boxed(),
      RecordingPlugin::new("second", &events).boxed(),
      RecordingPlugin::new("third", &events).boxed(),
    ],
  );
  bundler
    .generate(OutputOptions::default(), two_chunks())
    .await
    .unwrap();
  assert_eq!(
    events.matching("generateBundle"),
    vec![
      "first:generateBundle",
      "second:generateBundle",
      "third:generateBundle"
    ]
  );
}

#[derive(Debug)]
struct UntaggedPlugin;

#[async_trait::async_trait]
impl Plugin for UntaggedPlugin {
  fn name(&self) -> PluginName {
    "untagged".into()
  }

  async fn generate_bundle(
    &self,
    _ctx: &PluginContext,
    args: &mut GenerateBundleArgs,
  ) -> HookNoopReturn {
    args.bundle.insert_untagged("legacy.txt", "legacy");
    args.bundle.insert_untagged("legacy.bin", vec![0u8, 1, 2]);
    Ok(())
  }
}

#[tokio::test]
async fn untagged_entries_become_assets_with_one_deprecation() {
  let warnings = Warnings::default();
  let mut bundler = Bundler::with_plugins(input_options(&warnings), vec![Box::new(UntaggedPlugin)]);
  let bundle = bundler
    .generate(OutputOptions::default(), single_chunk())
    .await
    .unwrap();

  let legacy = bundle.get("legacy.txt").unwrap();
  assert_eq!(legacy.type_name(), "asset");
  assert_eq!(legacy.as_asset().unwrap().source.as_str(), Some("legacy"));
  assert_eq!(bundle.get("legacy.bin").unwrap().type_name(), "asset");
  assert!(!bundle.has_untagged());
  assert_eq!(
    warnings
      .codes()
      .iter()
      .filter(|code| **code == "DEPRECATED_FEATURE")
      .count(),
    1
  );
}

#[tokio::test]
async fn untagged_entries_fail_with_strict_deprecations() {
  let warnings = Warnings::default();
  let mut bundler = Bundler::with_plugins(
    InputOptions {
      strict_deprecations: true,
      ..input_options(&warnings)
    },
    vec![Box::new(UntaggedPlugin)],
  );
  let err = bundler
    .generate(OutputOptions::default(), single_chunk())
    .await
    .unwrap_err();
  assert_eq!(err.code(), "DEPRECATED_FEATURE");
}

#[tokio::test]
async fn dynamic_import_function_is_deprecated() {
  let warnings = Warnings::default();
  let options = || OutputOptions {
    dynamic_import_function: Some("__import__".to_string()),
    ..Default::default()
  };
  Bundler::new(input_options(&warnings))
    .generate(options(), single_chunk())
    .await
    .unwrap();
  assert_eq!(warnings.codes(), vec!["DEPRECATED_FEATURE"]);
  assert!(warnings.messages()[0].contains("renderDynamicImport"));

  let events = Events::default();
  let err = Bundler::with_plugins(
    InputOptions {
      strict_deprecations: true,
      ..input_options(&warnings)
    },
    vec![RecordingPlugin::new("recorder", &events).boxed()],
  )
  .generate(options(), single_chunk())
  .await
  .unwrap_err();
  assert_eq!(err.code(), "DEPRECATED_FEATURE");
  assert!(events.all().is_empty());
}

type ChunkSummary = (String, Vec<String>, Vec<String>, String);

async fn hashed_two_chunk_summary() -> Vec<ChunkSummary> {
  let warnings = Warnings::default();
  let bundle = Bundler::new(input_options(&warnings))
    .generate(
      OutputOptions {
        entry_file_names: "[name]-[hash].js".into(),
        ..Default::default()
      },
      two_chunks(),
    )
    .await
    .unwrap();
  bundle
    .chunks()
    .map(|chunk| {
      (
        chunk.file_name.clone(),
        chunk.exports.clone(),
        chunk.imports.clone(),
        chunk.code().to_string(),
      )
    })
    .collect()
}

#[tokio::test]
async fn generation_is_deterministic() {
  let first = hashed_two_chunk_summary().await;
  assert_eq!(first, hashed_two_chunk_summary().await);
  assert!(first.iter().all(|(file_name, ..)| !file_name.contains("!~{")));
}

#[tokio::test]
async fn esm_code_splitting() {
  let warnings = Warnings::default();
  let bundle = Bundler::new(input_options(&warnings))
    .generate(OutputOptions::default(), two_chunks())
    .await
    .unwrap();

  let keys = chunk_keys(&bundle);
  assert_eq!(keys.len(), 2);
  assert_eq!(keys[0], "main.js");
  let shared_file = &keys[1];
  assert!(shared_file.starts_with("shared-") && shared_file.ends_with(".js"));
  assert_eq!(shared_file.len(), "shared-!~{000}~.js".len());

  let main = bundle.get("main.js").unwrap().as_chunk().unwrap();
  assert!(main.is_entry);
  assert_eq!(main.imports, vec![shared_file.clone()]);
  assert!(main.exports.is_empty());
  assert_eq!(
    main.facade_module_id.as_ref().map(|id| id.id()),
    Some("/project/src/main.js")
  );
  insta::assert_snapshot!(main.code().replace(shared_file.as_str(), "shared-[hash].js"), @r###"
import { shared } from './shared-[hash].js';

console.log(shared);
"###);

  let shared = bundle.get(shared_file).unwrap().as_chunk().unwrap();
  assert!(!shared.is_entry);
  assert!(shared.facade_module_id.is_none());
  assert_eq!(shared.exports, vec!["shared"]);
  insta::assert_snapshot!(shared.code(), @r###"
const shared = 'shared';

export { shared };
"###);
  assert!(warnings.codes().is_empty());
}

#[tokio::test]
async fn umd_single_file() {
  let warnings = Warnings::default();
  let bundle = Bundler::new(input_options(&warnings))
    .generate(
      OutputOptions {
        format: ModuleFormat::Umd,
        file: Some("dist/bundle.js".to_string()),
        name: Some("myBundle".to_string()),
        ..Default::default()
      },
      single_chunk(),
    )
    .await
    .unwrap();

  assert_eq!(chunk_keys(&bundle), vec!["bundle.js"]);
  let chunk = bundle.get("bundle.js").unwrap().as_chunk().unwrap();
  assert_eq!(chunk.exports, vec!["default"]);
  insta::assert_snapshot!(chunk.code(), @r###"
(function (global, factory) {
  typeof exports === 'object' && typeof module !== 'undefined' ? module.exports = factory() :
  typeof define === 'function' && define.amd ? define(factory) :
  (global = typeof globalThis !== 'undefined' ? globalThis : global || self, global.myBundle = factory());
})(this, (function () {
'use strict';

const answer = 42;

return answer;
}));
"###);
}

#[tokio::test]
async fn iife_with_named_exports() {
  let warnings = Warnings::default();
  let lib = Arc::new(
    Module::new("/project/src/lib.js", "const foo = 1;")
      .as_entry()
      .with_export("foo", "foo"),
  );
  let bundle = Bundler::new(input_options(&warnings))
    .generate(
      OutputOptions {
        format: ModuleFormat::Iife,
        name: Some("lib".to_string()),
        ..Default::default()
      },
      vec![Chunk::new(vec![lib.clone()]).with_facade(lib)],
    )
    .await
    .unwrap();
  let chunk = bundle.get("lib.js").unwrap().as_chunk().unwrap();
  insta::assert_snapshot!(chunk.code(), @r###"
var lib = (function (exports) {
'use strict';

const foo = 1;

exports.foo = foo;

return exports;
})({});
"###);
}

#[tokio::test]
async fn iife_without_name_only_warns() {
  let warnings = Warnings::default();
  let bundle = Bundler::new(input_options(&warnings))
    .generate(output_options(ModuleFormat::Iife), single_chunk())
    .await
    .unwrap();
  assert_eq!(warnings.codes(), vec!["MISSING_NAME_OPTION_FOR_IIFE_EXPORT"]);
  assert!(bundle
    .get("main.js")
    .unwrap()
    .as_chunk()
    .unwrap()
    .code()
    .starts_with("(function () {"));
}

#[tokio::test]
async fn cjs_mixed_exports() {
  let warnings = Warnings::default();
  let main = Arc::new(
    Module::new("/project/src/main.js", "const answer = 42;")
      .as_entry()
      .with_export("default", "answer")
      .with_export("named", "answer"),
  );
  let bundle = Bundler::new(input_options(&warnings))
    .generate(
      output_options(ModuleFormat::Cjs),
      vec![Chunk::new(vec![main.clone()]).with_facade(main)],
    )
    .await
    .unwrap();
  assert_eq!(warnings.codes(), vec!["MIXED_EXPORTS"]);
  let chunk = bundle.get("main.js").unwrap().as_chunk().unwrap();
  insta::assert_snapshot!(chunk.code(), @r###"
'use strict';

Object.defineProperty(exports, '__esModule', { value: true });

const answer = 42;

exports.default = answer;
exports.named = answer;
"###);
}

#[tokio::test]
async fn empty_chunk_warns() {
  let warnings = Warnings::default();
  let empty = Arc::new(Module::new("/project/src/empty.js", "  \n").as_entry());
  let bundle = Bundler::new(input_options(&warnings))
    .generate(
      OutputOptions::default(),
      vec![Chunk::new(vec![empty.clone()]).with_facade(empty)],
    )
    .await
    .unwrap();
  assert_eq!(warnings.codes(), vec!["EMPTY_BUNDLE"]);
  assert!(warnings.messages()[0].contains("\"empty\""));
  let chunk = bundle.get("empty.js").unwrap().as_chunk().unwrap();
  assert_eq!(chunk.code(), "");
  assert_eq!(
    chunk.modules.values().next().map(|module| module.rendered_length),
    Some(0)
  );
}

#[tokio::test]
async fn preserve_modules_mirrors_the_source_tree() {
  let warnings = Warnings::default();
  let main = Arc::new(Module::new("/project/src/main.js", "helper();").as_entry());
  let util = Arc::new(Module::new("/project/src/lib/util.js", "function helper() {}"));
  let chunks = vec![
    Chunk::new(vec![main.clone()])
      .with_facade(main)
      .import_from(ChunkIdx(1), ["helper"]),
    Chunk::new(vec![util.clone()])
      .with_facade(util)
      .expose("helper"),
  ];
  let bundle = Bundler::new(InputOptions {
    preserve_modules: true,
    ..input_options(&warnings)
  })
  .generate(OutputOptions::default(), chunks)
  .await
  .unwrap();

  assert_eq!(chunk_keys(&bundle), vec!["main.js", "lib/util.js"]);
  let main = bundle.get("main.js").unwrap().as_chunk().unwrap();
  insta::assert_snapshot!(main.code(), @r###"
import { helper } from './lib/util.js';

helper();
"###);
}

#[derive(Debug, Default)]
struct AssetPlugin {
  early: Mutex<Option<EmittedFileRef>>,
}

#[async_trait::async_trait]
impl Plugin for AssetPlugin {
  fn name(&self) -> PluginName {
    "assets".into()
  }

  async fn render_start(&self, ctx: &PluginContext, _args: &RenderStartArgs) -> HookNoopReturn {
    let file_ref = ctx.emit_asset(EmittedAsset {
      name: Some("style.css".to_string()),
      source: Some("body {}".into()),
      ..Default::default()
    })?;
    *self.early.lock() = Some(file_ref);
    Ok(())
  }

  async fn generate_bundle(
    &self,
    ctx: &PluginContext,
    args: &mut GenerateBundleArgs,
  ) -> HookNoopReturn {
    let early = *self.early.lock();
    if let Some(early) = early {
      let file_name = ctx.get_file_name(early)?;
      assert!(args.bundle.contains_key(&file_name));
    }
    let late = ctx.emit_asset(EmittedAsset {
      file_name: Some("manifest.json".to_string()),
      ..Default::default()
    })?;
    assert_eq!(ctx.get_file_name(late).unwrap_err().code(), "ASSET_NOT_FINALISED");
    ctx.set_asset_source(late, "{}")?;
    Ok(())
  }
}

#[tokio::test]
async fn emitted_assets_are_written() {
  let warnings = Warnings::default();
  let mut bundler = Bundler::with_plugins(
    input_options(&warnings),
    vec![Box::new(AssetPlugin::default())],
  );
  let bundle = bundler
    .generate(OutputOptions::default(), single_chunk())
    .await
    .unwrap();

  let assets = bundle
    .assets()
    .map(|asset| asset.file_name.clone())
    .collect::<Vec<_>>();
  assert_eq!(assets.len(), 2);
  assert!(assets[0].starts_with("assets/style-") && assets[0].ends_with(".css"));
  assert_eq!(assets[1], "manifest.json");
  assert_eq!(
    bundle.get("manifest.json").unwrap().as_asset().unwrap().source.as_str(),
    Some("{}")
  );
}

#[derive(Debug)]
struct AddonPlugin {
  banner: Option<&'static str>,
}

#[async_trait::async_trait]
impl Plugin for AddonPlugin {
  fn name(&self) -> PluginName {
    "addons".into()
  }

  async fn banner(&self, _ctx: &PluginContext) -> HookAddonOutput {
    match self.banner {
      Some(banner) => Ok(Some(banner.to_string())),
      None => Err(rolldown_bundle::BundleError::panic("no banner today")),
    }
  }

  async fn outro(&self, _ctx: &PluginContext) -> HookAddonOutput {
    Ok(Some("// outro".to_string()))
  }
}

#[tokio::test]
async fn addons_wrap_the_chunk() {
  let warnings = Warnings::default();
  let bundle = Bundler::with_plugins(
    input_options(&warnings),
    vec![Box::new(AddonPlugin {
      banner: Some("/* plugin */"),
    })],
  )
  .generate(
    OutputOptions {
      banner: Some("/* option */".to_string()),
      footer: Some("/* footer */".to_string()),
      ..Default::default()
    },
    single_chunk(),
  )
  .await
  .unwrap();
  let chunk = bundle.get("main.js").unwrap().as_chunk().unwrap();
  insta::assert_snapshot!(chunk.code(), @r###"
/* option */
/* plugin */
const answer = 42;

export { answer as default };

// outro
/* footer */
"###);
}

#[tokio::test]
async fn failing_addon_is_reported() {
  let events = Events::default();
  let warnings = Warnings::default();
  let err = Bundler::with_plugins(
    input_options(&warnings),
    vec![
      Box::new(AddonPlugin { banner: None }),
      RecordingPlugin::new("recorder", &events).boxed(),
    ],
  )
  .generate(OutputOptions::default(), single_chunk())
  .await
  .unwrap_err();
  assert_eq!(err.code(), "ADDON_ERROR");
  assert!(err.to_string().contains(r#"Could not retrieve "banner""#));
  assert_eq!(
    events.matching("renderError"),
    vec!["recorder:renderError:ADDON_ERROR"]
  );
}

#[tokio::test]
async fn sourcemaps_point_back_to_modules() {
  let warnings = Warnings::default();
  let bundle = Bundler::new(input_options(&warnings))
    .generate(
      OutputOptions {
        sourcemap: true,
        banner: Some("/* banner */".to_string()),
        ..Default::default()
      },
      single_chunk(),
    )
    .await
    .unwrap();
  let chunk = bundle.get("main.js").unwrap().as_chunk().unwrap();
  let map = chunk.map.as_ref().unwrap().to_source_map().unwrap();
  assert_eq!(map.get_file(), Some("main.js"));
  let token = map.lookup_token(1, 0).unwrap();
  assert_eq!(token.get_source(), Some("main.js"));
  assert_eq!(token.get_src_line(), 0);
}

#[derive(Debug)]
struct UppercasePlugin;

#[async_trait::async_trait]
impl Plugin for UppercasePlugin {
  fn name(&self) -> PluginName {
    "uppercase".into()
  }

  async fn render_chunk(
    &self,
    _ctx: &PluginContext,
    args: &RenderChunkArgs,
  ) -> HookRenderChunkOutput {
    Ok(Some(RenderChunkOutput {
      code: args.code.to_uppercase(),
      map: None,
    }))
  }
}

#[tokio::test]
async fn render_chunk_without_map_breaks_sourcemap() {
  let warnings = Warnings::default();
  let bundle = Bundler::with_plugins(input_options(&warnings), vec![Box::new(UppercasePlugin)])
    .generate(
      OutputOptions {
        sourcemap: true,
        ..Default::default()
      },
      single_chunk(),
    )
    .await
    .unwrap();
  let chunk = bundle.get("main.js").unwrap().as_chunk().unwrap();
  assert!(chunk.code().starts_with("CONST ANSWER = 42;"));
  assert!(chunk.map.is_none());
  assert_eq!(warnings.codes(), vec!["SOURCEMAP_BROKEN"]);
}

#[tokio::test]
async fn hashes_follow_dependencies() {
  let generate = |shared_code: &'static str| async move {
    let warnings = Warnings::default();
    let main = Arc::new(Module::new("/project/src/main.js", "console.log(shared);").as_entry());
    let shared = Arc::new(Module::new("/project/src/shared.js", shared_code));
    let chunks = vec![
      Chunk::new(vec![main.clone()])
        .with_facade(main)
        .import_from(ChunkIdx(1), ["shared"]),
      Chunk::new(vec![shared]).with_name("shared").expose("shared"),
    ];
    let bundle = Bundler::new(input_options(&warnings))
      .generate(
        OutputOptions {
          entry_file_names: "[name]-[hash].js".into(),
          ..Default::default()
        },
        chunks,
      )
      .await
      .unwrap();
    chunk_keys(&bundle)
  };
  let one = generate("const shared = 1;").await;
  let two = generate("const shared = 2;").await;
  assert!(one[0].starts_with("main-"));
  assert_ne!(one[0], two[0]);
  assert_ne!(one[1], two[1]);
}

#[tokio::test]
async fn write_and_generate_produce_the_same_bundle() {
  let warnings = Warnings::default();
  let mut bundler = Bundler::new(input_options(&warnings));
  let generated = bundler
    .generate(OutputOptions::default(), two_chunks())
    .await
    .unwrap();
  let written = bundler
    .write(OutputOptions::default(), two_chunks())
    .await
    .unwrap();
  assert_eq!(chunk_keys(&generated), chunk_keys(&written));
}

#[tokio::test]
async fn hashed_chunks_get_final_source_map_files() {
  let warnings = Warnings::default();
  let bundle = Bundler::new(input_options(&warnings))
    .generate(
      OutputOptions {
        sourcemap: true,
        ..Default::default()
      },
      two_chunks(),
    )
    .await
    .unwrap();

  let keys = chunk_keys(&bundle);
  assert!(!keys[1].contains("!~{"));
  for chunk in bundle.chunks() {
    let map = chunk.map.as_ref().unwrap();
    assert!(!map.as_json().contains("!~{"));
    assert_eq!(map.file().unwrap(), Some(chunk.file_name.clone()));
  }
}

/// Reads the manifest entry in `renderChunk` and edits chunks in `generateBundle`.
#[derive(Debug, Default)]
struct ManifestEditor {
  seen_imports: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

#[async_trait::async_trait]
impl Plugin for ManifestEditor {
  fn name(&self) -> PluginName {
    "manifest-editor".into()
  }

  async fn render_chunk(
    &self,
    _ctx: &PluginContext,
    args: &RenderChunkArgs,
  ) -> HookRenderChunkOutput {
    tokio::task::yield_now().await;
    self
      .seen_imports
      .lock()
      .push((args.chunk.name.clone(), args.chunk.imports.clone()));
    Ok(None)
  }

  async fn generate_bundle(
    &self,
    _ctx: &PluginContext,
    args: &mut GenerateBundleArgs,
  ) -> HookNoopReturn {
    tokio::task::yield_now().await;
    for output in args.bundle.values_mut() {
      if let Some(chunk) = output.as_chunk_mut() {
        assert!(chunk.map.is_some());
        let code = format!("{}// edited\n", chunk.code());
        chunk.code = Some(code);
      }
    }
    Ok(())
  }
}

#[tokio::test]
async fn plugins_read_and_edit_the_manifest() {
  let warnings = Warnings::default();
  let editor = ManifestEditor::default();
  let seen_imports = editor.seen_imports.clone();
  let bundle = Bundler::with_plugins(input_options(&warnings), vec![Box::new(editor)])
    .generate(
      OutputOptions {
        sourcemap: true,
        ..Default::default()
      },
      two_chunks(),
    )
    .await
    .unwrap();

  let mut seen = seen_imports.lock().clone();
  seen.sort();
  assert_eq!(seen.len(), 2);
  assert_eq!(seen[0].0, "main");
  assert_eq!(seen[0].1.len(), 1);
  assert_eq!(seen[1], ("shared".to_string(), vec![]));
  assert!(bundle
    .chunks()
    .all(|chunk| chunk.code().ends_with("// edited\n")));
}
