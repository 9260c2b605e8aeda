use std::fmt::Display;

mod options;
pub use options::*;
mod output;
pub use output::*;
mod str_or_bytes;
pub use str_or_bytes::*;
mod utils;
pub use utils::*;

pub use rolldown_error::StaticStr;

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct ModuleId {
  value: String,
}

impl Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.value)
  }
}

impl ModuleId {
  pub fn new(value: impl Into<String>) -> Self {
    Self {
      value: value.into(),
    }
  }

  pub fn id(&self) -> &str {
    &self.value
  }

  pub fn is_absolute(&self) -> bool {
    std::path::Path::new(&self.value).is_absolute()
  }
}

impl From<&str> for ModuleId {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

impl From<String> for ModuleId {
  fn from(value: String) -> Self {
    Self::new(value)
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    &self.value
  }
}
