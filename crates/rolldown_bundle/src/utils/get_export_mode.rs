use rolldown_common::{ExportMode, ModuleFormat, ModuleId, OutputOptions};
use rolldown_error::Error;

use crate::{BundleResult, Chunk};

/// Resolves `output.exports` for a facade chunk. Warnings go to `warn`.
pub(crate) fn get_export_mode(
  chunk: &Chunk,
  output_options: &OutputOptions,
  facade_module_id: &ModuleId,
  warn: impl Fn(Error),
) -> BundleResult<ExportMode> {
  let export_keys = chunk.get_export_names();
  let exported_keys = || export_keys.iter().map(ToString::to_string).collect::<Vec<_>>();
  let has_only_default = export_keys.len() == 1 && export_keys[0] == "default";

  match output_options.export_mode {
    ExportMode::Default => {
      if !has_only_default {
        return Err(Error::incompatible_export_option_value(
          "default",
          exported_keys(),
          facade_module_id.to_string(),
        ));
      }
      Ok(ExportMode::Default)
    }
    ExportMode::None => {
      if !export_keys.is_empty() {
        return Err(Error::incompatible_export_option_value(
          "none",
          exported_keys(),
          facade_module_id.to_string(),
        ));
      }
      Ok(ExportMode::None)
    }
    ExportMode::Named => Ok(ExportMode::Named),
    ExportMode::Auto => {
      if export_keys.is_empty() {
        Ok(ExportMode::None)
      } else if has_only_default {
        Ok(ExportMode::Default)
      } else {
        if output_options.format != ModuleFormat::Esm && export_keys.contains(&"default") {
          warn(Error::mixed_exports(facade_module_id.to_string()));
        }
        Ok(ExportMode::Named)
      }
    }
  }
}
