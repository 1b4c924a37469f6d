//! Display helpers for sizes and filenames
//!
//! These are pure functions shared by the view and the command line front end.

use crate::constants::{BYTES_PER_MB, COMPRESSED_SUFFIX};

/// Format a byte count as megabytes with two decimals
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Size string such as "1.00 MB"
///
/// # Example
/// ```
/// use img_compressor::utils::print_data_size;
///
/// assert_eq!(print_data_size(1_048_576), "1.00 MB");
/// assert_eq!(print_data_size(0), "0.00 MB");
/// ```
pub fn print_data_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

/// Split a trailing `.ext` off a filename
///
/// The extension is a dot followed by one or more ASCII alphanumerics at the
/// very end of the name, compared case-insensitively.
fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rfind('.') {
        Some(dot) => {
            let ext = &filename[dot + 1..];
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                (&filename[..dot], Some(&filename[dot..]))
            } else {
                (filename, None)
            }
        }
        None => (filename, None),
    }
}

/// Derive the download name for a compressed copy
///
/// `photo.png` becomes `photo-compressed.png`. A name without an extension
/// just gets the suffix appended.
///
/// # Example
/// ```
/// use img_compressor::utils::compressed_filename;
///
/// assert_eq!(compressed_filename("photo.png"), "photo-compressed.png");
/// assert_eq!(compressed_filename("README"), "README-compressed");
/// ```
pub fn compressed_filename(filename: &str) -> String {
    let (stem, ext) = split_extension(filename);
    format!("{}{}{}", stem, COMPRESSED_SUFFIX, ext.unwrap_or(""))
}

/// Calculate compression ratio as a percentage
///
/// # Arguments
/// * `original_size` - Original file size in bytes
/// * `compressed_size` - Compressed file size in bytes
///
/// # Returns
/// * Compression ratio as percentage (positive means reduction, negative means increase)
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}
