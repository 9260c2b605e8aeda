/// Source of an emitted asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrOrBytes {
  Str(String),
  Bytes(Vec<u8>),
}

impl StrOrBytes {
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      StrOrBytes::Str(s) => s.as_bytes(),
      StrOrBytes::Bytes(b) => b,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      StrOrBytes::Str(s) => Some(s),
      StrOrBytes::Bytes(b) => std::str::from_utf8(b).ok(),
    }
  }
}

impl From<String> for StrOrBytes {
  fn from(value: String) -> Self {
    Self::Str(value)
  }
}

impl From<&str> for StrOrBytes {
  fn from(value: &str) -> Self {
    Self::Str(value.to_string())
  }
}

impl From<Vec<u8>> for StrOrBytes {
  fn from(value: Vec<u8>) -> Self {
    Self::Bytes(value)
  }
}
