use sourcemap::{SourceMap, SourceMapBuilder};

#[derive(Debug)]
struct LineMapping {
  dst_line: u32,
  source: u32,
  src_line: u32,
}

/// Concatenates generated code and module sources while remembering where each line of a
/// module ended up.
#[derive(Debug, Default)]
pub(crate) struct CodeBuilder {
  code: String,
  line: u32,
  mappings: Vec<LineMapping>,
}

impl CodeBuilder {
  pub fn push_str(&mut self, text: &str) {
    self.line += text.matches('\n').count() as u32;
    self.code.push_str(text);
  }

  pub fn push_line(&mut self, text: &str) {
    self.push_str(text);
    self.push_str("\n");
  }

  /// Appends `code` of source `source`. Must be called at the start of a line.
  pub fn push_source(&mut self, source: u32, code: &str) {
    for (src_line, line) in code.split('\n').enumerate() {
      if src_line > 0 {
        self.code.push('\n');
        self.line += 1;
      }
      self.mappings.push(LineMapping {
        dst_line: self.line,
        source,
        src_line: src_line as u32,
      });
      self.code.push_str(line);
    }
  }

  pub fn into_code(self) -> String {
    self.code
  }

  /// `sources` are `(name, content)` pairs, indexed by the `source` given to
  /// [CodeBuilder::push_source].
  pub fn into_code_and_map(self, sources: &[(&str, &str)], file: Option<&str>) -> (String, SourceMap) {
    let mut builder = SourceMapBuilder::new(file);
    for (name, content) in sources {
      let source_id = builder.add_source(name);
      builder.set_source_contents(source_id, Some(*content));
    }
    for mapping in &self.mappings {
      builder.add_raw(
        mapping.dst_line,
        0,
        mapping.src_line,
        0,
        Some(mapping.source),
        None,
      );
    }
    (self.code, builder.into_sourcemap())
  }
}
