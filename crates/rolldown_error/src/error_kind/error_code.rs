// --- Aligned with rollup
pub const INVALID_OPTION: &str = "INVALID_OPTION";
pub const INVALID_EXPORT_OPTION: &str = "INVALID_EXPORT_OPTION";
pub const MIXED_EXPORTS: &str = "MIXED_EXPORTS";
pub const DEPRECATED_FEATURE: &str = "DEPRECATED_FEATURE";
pub const ADDON_ERROR: &str = "ADDON_ERROR";
pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
pub const INVALID_PATTERN_REPLACEMENT: &str = "INVALID_PATTERN_REPLACEMENT";
pub const EMPTY_BUNDLE: &str = "EMPTY_BUNDLE";
pub const ASSET_SOURCE_MISSING: &str = "ASSET_SOURCE_MISSING";
pub const ASSET_SOURCE_ALREADY_SET: &str = "ASSET_SOURCE_ALREADY_SET";
pub const ASSET_NOT_FINALISED: &str = "ASSET_NOT_FINALISED";
pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const FILE_NAME_CONFLICT: &str = "FILE_NAME_CONFLICT";
pub const SOURCEMAP_BROKEN: &str = "SOURCEMAP_BROKEN";
pub const MISSING_NAME_OPTION_FOR_IIFE_EXPORT: &str = "MISSING_NAME_OPTION_FOR_IIFE_EXPORT";
pub const MISSING_NAME_OPTION_FOR_UMD_EXPORT: &str = "MISSING_NAME_OPTION_FOR_UMD_EXPORT";

// --- Rolldown specific
pub const PANIC: &str = "PANIC";
