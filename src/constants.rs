pub const DEFAULT_MAX_SIZE_MB: f64 = 1.0;
pub const DEFAULT_MAX_WIDTH_OR_HEIGHT: u32 = 1024;
pub const MIN_WIDTH_OR_HEIGHT: u32 = 128;

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Maximum input file size in bytes (100MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

pub const INITIAL_QUALITY: u8 = 90;
pub const MIN_QUALITY: u8 = 10;
pub const QUALITY_STEP: u8 = 10;
pub const SCALE_STEP: f64 = 0.9;
pub const MAX_ITERATIONS: u32 = 10;

pub const OXIPNG_PRESET: u8 = 2;
pub const LIBDEFLATER_LEVEL: u8 = 12;

pub const PROGRESS_DECODED: f64 = 10.0;
pub const PROGRESS_RESIZED: f64 = 20.0;
pub const PROGRESS_DONE: f64 = 100.0;

pub const PROGRESS_BAR_WIDTH: usize = 40;
pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}";

pub const COMPRESSED_SUFFIX: &str = "-compressed";
pub const PREVIEW_URL_PREFIX: &str = "blob:img-compressor/";

// Form control names
pub const FIELD_MAX_SIZE_MB: &str = "maxSizeMB";
pub const FIELD_MAX_WIDTH_OR_HEIGHT: &str = "maxWidthOrHeight";
pub const FIELD_FILE: &str = "file";

// Common output message prefixes
pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Source image size:";
pub const COMPRESSED_SIZE_PREFIX: &str = "📈 Compressed image size:";
pub const COMPRESSION_RATIO_PREFIX: &str = "🎯 Compression ratio:";
pub const ERROR_PREFIX: &str = "❌";
pub const DOWNLOAD_PREFIX: &str = "💾";
