use crate::constants::{
    INITIAL_QUALITY, LIBDEFLATER_LEVEL, MAX_IMAGE_DIMENSION, MAX_ITERATIONS, MIN_QUALITY,
    OXIPNG_PRESET, PROGRESS_DECODED, PROGRESS_DONE, PROGRESS_RESIZED, QUALITY_STEP, SCALE_STEP,
};
use crate::error::{CompressionError, Result};
use crate::form::CompressionOptions;
use crate::source::{CompressedFile, SourceFile};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use oxipng::{Deflaters, Options};
use std::io::Cursor;
use tracing::debug;

/// The compression routine behind the form.
///
/// Implementations report percent complete through `on_progress`, any number
/// of times, before returning.
pub trait Compressor: Send + Sync {
    fn compress(
        &self,
        file: &SourceFile,
        options: &CompressionOptions,
        on_progress: &mut dyn FnMut(f64),
    ) -> Result<CompressedFile>;
}

/// Native compressor: downscale to the dimension budget, then re-encode in
/// the input's format until the output fits the size budget.
#[derive(Debug, Clone, Default)]
pub struct ImageCompressor;

impl ImageCompressor {
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for ImageCompressor {
    fn compress(
        &self,
        file: &SourceFile,
        options: &CompressionOptions,
        on_progress: &mut dyn FnMut(f64),
    ) -> Result<CompressedFile> {
        let (mut img, format) = load_image(file.bytes())?;
        on_progress(PROGRESS_DECODED);

        let resized = resize_image(&mut img, options.max_width_or_height);
        on_progress(PROGRESS_RESIZED);

        let target_bytes = options.max_size_bytes();
        if !resized && file.size() <= target_bytes {
            debug!(size = file.size(), target_bytes, "already within budget");
            on_progress(PROGRESS_DONE);
            return Ok(CompressedFile::new(file.shared_bytes(), format));
        }

        let mut quality = INITIAL_QUALITY;
        let mut encoded = encode_image(&img, format, quality)?;
        debug!(size = encoded.len(), target_bytes, quality, "initial encode");

        let mut iteration = 0;
        while encoded.len() as u64 > target_bytes && iteration < MAX_ITERATIONS {
            iteration += 1;
            if format == ImageFormat::Jpeg && quality > MIN_QUALITY {
                quality = quality.saturating_sub(QUALITY_STEP).max(MIN_QUALITY);
            } else if !shrink_image(&mut img) {
                break;
            }
            encoded = encode_image(&img, format, quality)?;
            debug!(iteration, size = encoded.len(), quality, "re-encoded");
            on_progress(
                PROGRESS_RESIZED
                    + (PROGRESS_DONE - PROGRESS_RESIZED) * iteration as f64 / MAX_ITERATIONS as f64,
            );
        }

        on_progress(PROGRESS_DONE);

        if !resized && encoded.len() as u64 >= file.size() {
            debug!("re-encoding did not help, keeping original bytes");
            return Ok(CompressedFile::new(file.shared_bytes(), format));
        }
        Ok(CompressedFile::new(encoded, format))
    }
}

/// Decodes an image from memory, sniffing its format.
///
/// # Returns
/// * `Ok((image, format))` - The decoded image and its detected format
/// * `Err(CompressionError::UnsupportedFormat)` - If the bytes are not a known image format
/// * `Err(CompressionError::InvalidDimensions)` - If either side exceeds `MAX_IMAGE_DIMENSION`
pub fn load_image(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(CompressionError::UnsupportedFormat)?;
    let img = reader.decode()?;

    let (width, height) = img.dimensions();
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(CompressionError::InvalidDimensions(
            width,
            height,
            MAX_IMAGE_DIMENSION,
        ));
    }

    Ok((img, format))
}

/// Fits the image's longer side within `max_width_or_height`, keeping the
/// aspect ratio. Returns whether it resized.
pub fn resize_image(img: &mut DynamicImage, max_width_or_height: u32) -> bool {
    if img.width() <= max_width_or_height && img.height() <= max_width_or_height {
        return false;
    }
    debug!(
        from_width = img.width(),
        from_height = img.height(),
        max_width_or_height,
        "resizing"
    );
    *img = img.resize(max_width_or_height, max_width_or_height, FilterType::Lanczos3);
    true
}

/// Scales both sides by `SCALE_STEP`. Returns `false` once the image is too
/// small to shrink further.
fn shrink_image(img: &mut DynamicImage) -> bool {
    let width = (img.width() as f64 * SCALE_STEP) as u32;
    let height = (img.height() as f64 * SCALE_STEP) as u32;
    if width == 0 || height == 0 {
        return false;
    }
    *img = img.resize_exact(width, height, FilterType::Lanczos3);
    true
}

/// Encodes `img` in `format`. `quality` applies to JPEG only.
pub fn encode_image(img: &DynamicImage, format: ImageFormat, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
        }
        ImageFormat::Png => {
            img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
            buf = optimize_png(&buf)?;
        }
        ImageFormat::WebP => {
            DynamicImage::ImageRgba8(img.to_rgba8())
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP)?;
        }
        other => {
            img.write_to(&mut Cursor::new(&mut buf), other)?;
        }
    }
    Ok(buf)
}

fn optimize_png(data: &[u8]) -> Result<Vec<u8>> {
    let mut options = Options::from_preset(OXIPNG_PRESET);
    options.deflate = Deflaters::Libdeflater {
        compression: LIBDEFLATER_LEVEL,
    };
    oxipng::optimize_from_memory(data, &options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}
