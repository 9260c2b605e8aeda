use std::sync::Arc;

use derivative::Derivative;
use rolldown_error::Error;

pub type WarningHandler = Arc<dyn Fn(Error) + Send + Sync>;

pub fn default_warning_handler() -> WarningHandler {
  Arc::new(|err| {
    eprintln!("({}) {}", err.code(), err);
  })
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct InputOptions {
  /// Emit one chunk per module and name it after the module's path.
  pub preserve_modules: bool,
  /// Turn deprecation warnings into errors.
  pub strict_deprecations: bool,
  #[derivative(Debug = "ignore")]
  pub on_warn: WarningHandler,
}

impl Default for InputOptions {
  fn default() -> Self {
    Self {
      preserve_modules: false,
      strict_deprecations: false,
      on_warn: default_warning_handler(),
    }
  }
}
