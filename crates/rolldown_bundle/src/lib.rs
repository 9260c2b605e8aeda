mod addons;
pub(crate) use addons::*;
mod bundle;
pub use bundle::*;
mod bundler;
pub use bundler::*;
mod chunk;
pub use chunk::*;
mod module;
pub use module::*;
mod plugin_driver;
pub use plugin_driver::*;
mod utils;
pub(crate) use utils::*;

pub use rolldown_common::*;
pub use rolldown_plugin::*;

pub type BundleResult<T> = rolldown_error::Result<T>;
pub type BundleError = rolldown_error::Error;
