mod export_mode;
pub use export_mode::*;
mod file_name_template;
pub use file_name_template::*;
mod input_options;
pub use input_options::*;
mod module_format;
pub use module_format::*;
mod output_options;
pub use output_options::*;
