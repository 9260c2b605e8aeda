use std::borrow::Cow;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use rolldown_common::{content_hash, Output, OutputBundle};
use rolldown_error::Error;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::BundleResult;

static HASH_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"!~\{\d{3,}\}~").unwrap());

/// Attempts to find a hash that gives a file name nobody else uses.
const MAX_REHASH: usize = 16;

/// Hands out `!~{000}~`, `!~{001}~`, ... in assignment order.
#[derive(Debug, Default)]
pub(crate) struct HashPlaceholderGenerator {
  next_index: usize,
}

impl HashPlaceholderGenerator {
  pub fn generate(&mut self) -> String {
    let placeholder = format!("!~{{{:03}}}~", self.next_index);
    self.next_index += 1;
    placeholder
  }
}

pub(crate) fn replace_placeholders<'a>(
  text: &'a str,
  hashes: &FxHashMap<String, String>,
) -> Cow<'a, str> {
  HASH_PLACEHOLDER.replace_all(text, |caps: &regex::Captures| {
    let placeholder = &caps[0];
    hashes
      .get(placeholder)
      .cloned()
      .unwrap_or_else(|| placeholder.to_string())
  })
}

#[derive(Debug)]
struct HashInput {
  placeholder: String,
  file_name: String,
  content_hash: String,
  dependencies: Vec<String>,
}

/// Replaces every hash placeholder in the bundle with the content hash of its chunk.
///
/// The hash of a chunk also covers all chunks it reaches through placeholders in its code,
/// so a change in a dependency changes the file names of its importers.
pub(crate) fn finalize_hashes(bundle: &mut OutputBundle) -> BundleResult<()> {
  let mut inputs = bundle
    .chunks()
    .filter_map(|chunk| {
      let placeholder = HASH_PLACEHOLDER.find(&chunk.file_name)?.as_str().to_string();
      Some((placeholder, chunk.file_name.as_str(), chunk.code()))
    })
    .collect::<Vec<_>>()
    .into_par_iter()
    .map(|(placeholder, file_name, code)| {
      let dependencies = HASH_PLACEHOLDER
        .find_iter(code)
        .map(|found| found.as_str().to_string())
        .filter(|found| found != &placeholder)
        .collect::<FxHashSet<_>>()
        .into_iter()
        .collect();
      HashInput {
        file_name: file_name.to_string(),
        content_hash: content_hash(code.as_bytes()),
        placeholder,
        dependencies,
      }
    })
    .collect::<Vec<_>>();
  if inputs.is_empty() {
    return Ok(());
  }
  inputs.sort_by(|a, b| a.placeholder.cmp(&b.placeholder));
  tracing::debug!("finalizing {} hash placeholders", inputs.len());

  let by_placeholder = inputs
    .iter()
    .map(|input| (input.placeholder.as_str(), input))
    .collect::<FxHashMap<_, _>>();

  let mut used_names = bundle
    .keys()
    .filter(|file_name| !HASH_PLACEHOLDER.is_match(file_name))
    .map(|file_name| file_name.to_lowercase())
    .collect::<FxHashSet<_>>();

  let mut hashes: FxHashMap<String, String> = FxHashMap::default();
  for input in &inputs {
    let mut combined = input.content_hash.clone();
    for dependency in transitive_dependencies(input, &by_placeholder) {
      if let Some(dependency) = by_placeholder.get(dependency) {
        combined.push_str(&dependency.content_hash);
      }
    }
    let hash_len = input.placeholder.len();
    let mut hash = content_hash(combined.as_bytes());
    let mut attempts = 0;
    let file_name = loop {
      let file_name = input.file_name.replace(&input.placeholder, &hash[..hash_len]);
      if !used_names.contains(&file_name.to_lowercase()) {
        break file_name;
      }
      attempts += 1;
      if attempts > MAX_REHASH {
        return Err(Error::file_name_conflict(file_name));
      }
      hash = content_hash(hash.as_bytes());
    };
    used_names.insert(file_name.to_lowercase());
    hashes.insert(input.placeholder.clone(), hash[..hash_len].to_string());
  }

  let outputs = bundle.drain().collect::<Vec<_>>();
  for mut output in outputs {
    if let Output::Chunk(chunk) = &mut output {
      chunk.file_name = replace_placeholders(&chunk.file_name, &hashes).into_owned();
      for import in chunk.imports.iter_mut().chain(chunk.dynamic_imports.iter_mut()) {
        *import = replace_placeholders(import, &hashes).into_owned();
      }
      if let Some(code) = &mut chunk.code {
        let replaced = replace_placeholders(code, &hashes).into_owned();
        *code = replaced;
      }
      if let Some(map) = &mut chunk.map {
        if let Some(file) = map.file()?.filter(|file| HASH_PLACEHOLDER.is_match(file)) {
          map.set_file(&replace_placeholders(&file, &hashes))?;
        }
      }
    }
    bundle.insert_unique(output)?;
  }
  Ok(())
}

/// Placeholders reachable from `input`, sorted.
fn transitive_dependencies<'a>(
  input: &'a HashInput,
  by_placeholder: &FxHashMap<&str, &'a HashInput>,
) -> Vec<&'a str> {
  let mut seen = FxHashSet::default();
  seen.insert(input.placeholder.as_str());
  let mut stack = input
    .dependencies
    .iter()
    .map(String::as_str)
    .collect::<Vec<_>>();
  let mut found = vec![];
  while let Some(placeholder) = stack.pop() {
    if !seen.insert(placeholder) {
      continue;
    }
    found.push(placeholder);
    if let Some(dependency) = by_placeholder.get(placeholder) {
      stack.extend(dependency.dependencies.iter().map(String::as_str));
    }
  }
  found.sort_unstable();
  found
}
