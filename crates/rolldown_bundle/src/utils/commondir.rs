use std::path::{Component, Path, PathBuf};

/// The deepest directory containing all of `files`.
///
/// `/` without any file and the parent directory with a single one.
pub(crate) fn commondir<'a>(files: impl IntoIterator<Item = &'a str>) -> PathBuf {
  let mut common: Option<Vec<Component>> = None;
  for file in files {
    let dir = Path::new(file).parent().unwrap_or_else(|| Path::new("/"));
    let components = dir.components().collect::<Vec<_>>();
    common = Some(match common {
      None => components,
      Some(common) => common
        .into_iter()
        .zip(components)
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a)
        .collect(),
    });
  }
  match common {
    Some(components) if !components.is_empty() => components.iter().collect(),
    _ => PathBuf::from("/"),
  }
}
