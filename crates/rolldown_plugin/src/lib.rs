mod args;
pub use args::*;
mod context;
pub use context::*;
mod file_emitter;
pub use file_emitter::*;
mod hook_kind;
pub use hook_kind::*;
mod plugin;
pub use plugin::*;
