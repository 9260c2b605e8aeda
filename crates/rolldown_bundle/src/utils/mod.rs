mod assign_chunk_ids;
pub(crate) use assign_chunk_ids::*;
mod commondir;
pub(crate) use commondir::*;
mod get_export_mode;
pub(crate) use get_export_mode::*;
mod hash_placeholder;
pub(crate) use hash_placeholder::*;
mod import_path;
pub(crate) use import_path::*;
