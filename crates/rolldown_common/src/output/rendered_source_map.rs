use rolldown_error::Error;
use sourcemap::SourceMap;

/// A source map kept as its JSON text.
///
/// [SourceMap] is neither `Send` nor `Sync`, so chunks and plugin hooks carry this instead and
/// parse it where tokens are needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSourceMap {
  json: String,
}

impl RenderedSourceMap {
  pub fn from_json(json: impl Into<String>) -> Self {
    Self { json: json.into() }
  }

  pub fn from_source_map(map: &SourceMap) -> rolldown_error::Result<Self> {
    let mut json = vec![];
    map.to_writer(&mut json).map_err(broken)?;
    let json = String::from_utf8(json).map_err(|err| Error::panic(err.to_string()))?;
    Ok(Self { json })
  }

  pub fn to_source_map(&self) -> rolldown_error::Result<SourceMap> {
    SourceMap::from_slice(self.json.as_bytes()).map_err(broken)
  }

  pub fn as_json(&self) -> &str {
    &self.json
  }

  pub fn file(&self) -> rolldown_error::Result<Option<String>> {
    Ok(self.to_source_map()?.get_file().map(ToString::to_string))
  }

  pub fn set_file(&mut self, file: &str) -> rolldown_error::Result<()> {
    let mut map = self.to_source_map()?;
    map.set_file(Some(file));
    *self = Self::from_source_map(&map)?;
    Ok(())
  }
}

fn broken(err: sourcemap::Error) -> Error {
  Error::panic(format!("Invalid source map: {err}"))
}
