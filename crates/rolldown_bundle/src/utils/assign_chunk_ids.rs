use std::path::Path;

use rolldown_common::{
  extname, make_unique, sanitize_file_name, InputOptions, OutputBundle, OutputOptions,
  RenderOptions,
};
use rustc_hash::FxHashSet;
use sugar_path::SugarPath;

use crate::{BundleResult, Chunk, ChunkFileName, HashPlaceholderGenerator};

/// Gives every chunk its file name. Names of entry chunks are assigned first so they win
/// over other chunks when names clash.
pub(crate) fn assign_chunk_ids(
  chunks: &mut [Chunk],
  input_options: &InputOptions,
  output_options: &OutputOptions,
  input_base: &Path,
  bundle: &OutputBundle,
) -> BundleResult<()> {
  let mut used_names = bundle.lowercase_file_names();
  let mut placeholders = HashPlaceholderGenerator::default();

  let mut order = (0..chunks.len()).collect::<Vec<_>>();
  order.sort_by_key(|idx| !chunks[*idx].is_user_defined_entry());

  for idx in order {
    let chunk = &mut chunks[idx];
    let file_name = if let Some(file) = &output_options.file {
      let base_name = Path::new(file)
        .file_name()
        .map_or_else(|| file.clone(), |name| name.to_string_lossy().to_string());
      ChunkFileName::Final(base_name)
    } else if input_options.preserve_modules && chunk.facade_module.is_some() {
      ChunkFileName::Final(generate_id_preserve_modules(
        chunk,
        output_options,
        input_base,
        &used_names,
      )?)
    } else {
      generate_id(chunk, output_options, &mut placeholders, &used_names)?
    };
    tracing::trace!(
      "chunk {} is named {}",
      chunk.get_chunk_name(),
      file_name.file_name()
    );
    used_names.insert(file_name.file_name().to_lowercase());
    chunk.file_name = Some(file_name);
  }
  Ok(())
}

fn generate_id(
  chunk: &Chunk,
  output_options: &OutputOptions,
  placeholders: &mut HashPlaceholderGenerator,
  used_names: &FxHashSet<String>,
) -> BundleResult<ChunkFileName> {
  let (pattern, pattern_name) = if chunk.is_user_defined_entry() {
    (&output_options.entry_file_names, "output.entryFileNames")
  } else {
    (&output_options.chunk_file_names, "output.chunkFileNames")
  };
  let name = chunk.get_chunk_name();
  let placeholder = pattern.has_hash_pattern().then(|| placeholders.generate());
  let file_name = pattern.render(
    pattern_name,
    RenderOptions {
      name: Some(&name),
      hash: placeholder.as_deref(),
      format: Some(output_options.format.as_str()),
      ..Default::default()
    },
  )?;
  let file_name = make_unique(&file_name, used_names);
  Ok(match placeholder {
    Some(placeholder) => ChunkFileName::Placeholder {
      file_name,
      placeholder,
    },
    None => ChunkFileName::Final(file_name),
  })
}

/// `src/lib/util.js` stays `lib/util.js` relative to the common base directory of all
/// entries. Modules without an absolute path go to `_virtual/`.
fn generate_id_preserve_modules(
  chunk: &Chunk,
  output_options: &OutputOptions,
  input_base: &Path,
  used_names: &FxHashSet<String>,
) -> BundleResult<String> {
  let Some(facade) = &chunk.facade_module else {
    return Ok(make_unique(&chunk.get_chunk_name(), used_names));
  };
  let sanitized_id = sanitize_file_name(facade.id.id());
  let path = if facade.id.is_absolute() {
    let extension = extname(facade.id.id());
    let file_name = output_options.entry_file_names.render(
      "output.entryFileNames",
      RenderOptions {
        name: Some(&chunk.get_chunk_name()),
        ext: Some(extension.trim_start_matches('.')),
        extname: Some(extension),
        format: Some(output_options.format.as_str()),
        hash: None,
      },
    )?;
    let current_dir = sanitized_id
      .as_path()
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_default();
    current_dir
      .join(file_name)
      .relative(input_base)
      .to_string_lossy()
      .replace('\\', "/")
  } else {
    let base_name = sanitized_id
      .as_path()
      .file_name()
      .map_or_else(|| sanitized_id.clone(), |name| name.to_string_lossy().to_string());
    format!("_virtual/{base_name}")
  };
  Ok(make_unique(&path, used_names))
}
