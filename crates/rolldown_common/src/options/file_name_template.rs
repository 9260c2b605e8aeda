use once_cell::sync::Lazy;
use regex::Regex;
use rolldown_error::Error;

use crate::is_path_fragment;

static PATTERN_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\w+)\]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameTemplate {
  template: String,
}

impl FileNameTemplate {
  pub fn new(template: String) -> Self {
    Self { template }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn has_hash_pattern(&self) -> bool {
    self.template.contains("[hash]")
  }
}

impl From<String> for FileNameTemplate {
  fn from(template: String) -> Self {
    Self { template }
  }
}

impl From<&str> for FileNameTemplate {
  fn from(template: &str) -> Self {
    Self {
      template: template.to_string(),
    }
  }
}

/// Values for the placeholders of a pattern. A placeholder without a value is invalid for
/// the pattern being rendered.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderOptions<'me> {
  pub name: Option<&'me str>,
  pub hash: Option<&'me str>,
  pub format: Option<&'me str>,
  pub ext: Option<&'me str>,
  pub extname: Option<&'me str>,
}

impl<'me> RenderOptions<'me> {
  fn get(&self, placeholder: &str) -> Option<&'me str> {
    match placeholder {
      "name" => self.name,
      "hash" => self.hash,
      "format" => self.format,
      "ext" => self.ext,
      "extname" => self.extname,
      _ => None,
    }
  }
}

impl FileNameTemplate {
  /// `pattern_name` is the option the template came from, e.g. `output.entryFileNames`.
  pub fn render(
    &self,
    pattern_name: &'static str,
    options: RenderOptions,
  ) -> rolldown_error::Result<String> {
    if is_path_fragment(&self.template) {
      return Err(Error::invalid_pattern(self.template.clone(), pattern_name));
    }
    let mut rendered = String::with_capacity(self.template.len());
    let mut last_end = 0;
    for caps in PATTERN_PLACEHOLDER.captures_iter(&self.template) {
      let (Some(whole), Some(placeholder)) = (caps.get(0), caps.get(1)) else {
        continue;
      };
      let replacement = options.get(placeholder.as_str()).ok_or_else(|| {
        Error::invalid_pattern_placeholder(pattern_name, placeholder.as_str().to_string())
      })?;
      if is_path_fragment(replacement) {
        return Err(Error::invalid_pattern_replacement(
          pattern_name,
          placeholder.as_str().to_string(),
          replacement.to_string(),
        ));
      }
      rendered.push_str(&self.template[last_end..whole.start()]);
      rendered.push_str(replacement);
      last_end = whole.end();
    }
    rendered.push_str(&self.template[last_end..]);
    Ok(rendered)
  }
}
