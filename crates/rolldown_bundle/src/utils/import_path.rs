use std::path::Path;

use sugar_path::SugarPath;

/// Specifier used inside chunk `from` to import chunk `to`. Both are file names relative to
/// the output directory.
pub(crate) fn import_path(from: &str, to: &str) -> String {
  let root = Path::new("/");
  let from_dir = root
    .join(from)
    .parent()
    .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
  let relative = root
    .join(to)
    .relative(from_dir)
    .to_string_lossy()
    .replace('\\', "/");
  if relative.starts_with("../") {
    relative
  } else {
    format!("./{relative}")
  }
}
