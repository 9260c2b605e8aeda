use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use sha2::{Digest, Sha256};

static INVALID_FILE_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00?*]").unwrap());

/// Replaces characters that are not allowed in file names on common platforms.
pub fn sanitize_file_name(name: &str) -> String {
  INVALID_FILE_NAME_CHARS.replace_all(name, "_").into_owned()
}

/// Whether `name` would escape the output directory or contain invalid characters.
pub fn is_path_fragment(name: &str) -> bool {
  name.starts_with('/')
    || name.starts_with("./")
    || name.starts_with("../")
    || sanitize_file_name(name) != name
    || Path::new(name).is_absolute()
}

/// Returns `name` unchanged if no existing name matches it case-insensitively, otherwise
/// inserts a counter before the extension: `main.js` -> `main2.js` -> `main3.js`.
///
/// `existing_lowercase` must contain lowercased names.
pub fn make_unique(name: &str, existing_lowercase: &FxHashSet<String>) -> String {
  if !existing_lowercase.contains(&name.to_lowercase()) {
    return name.to_string();
  }
  let ext = extname(name);
  let stem = &name[..name.len() - ext.len()];
  let mut unique_index = 1;
  loop {
    unique_index += 1;
    let unique_name = format!("{stem}{unique_index}{ext}");
    if !existing_lowercase.contains(&unique_name.to_lowercase()) {
      return unique_name;
    }
  }
}

/// The extension of the last path segment, including the leading dot. Empty if there is none.
pub fn extname(name: &str) -> &str {
  let base_start = name.rfind('/').map_or(0, |idx| idx + 1);
  let base = &name[base_start..];
  match base.rfind('.') {
    Some(0) | None => "",
    Some(idx) => &base[idx..],
  }
}

/// Hex encoded SHA-256 of `content`.
pub fn content_hash(content: &[u8]) -> String {
  let mut hasher = Sha256::new();
  hasher.update(content);
  format!("{:x}", hasher.finalize())
}
