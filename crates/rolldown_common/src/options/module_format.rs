use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModuleFormat {
  Esm,
  Cjs,
  Iife,
  Umd,
}

impl ModuleFormat {
  pub fn is_es(self) -> bool {
    self == ModuleFormat::Esm
  }

  pub fn is_cjs(self) -> bool {
    self == ModuleFormat::Cjs
  }

  /// IIFE and UMD outputs are single self-contained files.
  pub fn supports_code_splitting(self) -> bool {
    !matches!(self, ModuleFormat::Iife | ModuleFormat::Umd)
  }

  /// The value substituted for `[format]` in file name patterns.
  pub fn as_str(self) -> &'static str {
    match self {
      ModuleFormat::Esm => "esm",
      ModuleFormat::Cjs => "cjs",
      ModuleFormat::Iife => "iife",
      ModuleFormat::Umd => "umd",
    }
  }
}

impl FromStr for ModuleFormat {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "es" | "esm" | "module" => Ok(ModuleFormat::Esm),
      "cjs" | "commonjs" => Ok(ModuleFormat::Cjs),
      "iife" => Ok(ModuleFormat::Iife),
      "umd" => Ok(ModuleFormat::Umd),
      _ => Err(format!("Invalid module format: {value}")),
    }
  }
}
