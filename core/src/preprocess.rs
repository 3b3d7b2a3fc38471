use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use palmist_common::config::AnalysisSettings;
use palmist_common::error::InputError;
use palmist_common::image::{Dimensions, ImageFormat, MAX_IMAGE_BYTES, PalmImage, PreparedImage};
use tracing::debug;

const FALLBACK_QUALITY: f32 = 0.8;

/// Validates an upload, scales it to fit `maxImageSize` and re-encodes it
/// as JPEG at the configured quality.
pub fn prepare(image: &PalmImage, settings: &AnalysisSettings) -> Result<PreparedImage, InputError> {
    if image.is_empty() {
        return Err(InputError::EmptyImage);
    }
    if image.len() > MAX_IMAGE_BYTES {
        return Err(InputError::ImageTooLarge {
            size: image.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    let source_format = ImageFormat::detect(image.bytes()).ok_or(InputError::UnsupportedFormat)?;
    let decoded = image::load_from_memory_with_format(image.bytes(), codec_format(source_format))
        .map_err(|e| InputError::Unprocessable(e.to_string()))?;

    let original = Dimensions::new(decoded.width(), decoded.height());
    let target = original.fit_within(settings.max_image_size);
    let scaled = if target == original {
        decoded
    } else {
        decoded.resize_exact(target.width, target.height, FilterType::Triangle)
    };
    let bytes = encode_jpeg(&scaled, settings.quality)?;

    debug!(
        ?source_format,
        ?original,
        ?target,
        uploaded = image.len(),
        encoded = bytes.len(),
        "image prepared"
    );
    Ok(PreparedImage {
        source_format,
        original,
        target,
        quality: settings.quality,
        bytes,
    })
}

fn codec_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Gif => image::ImageFormat::Gif,
        ImageFormat::Webp => image::ImageFormat::WebP,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
    }
}

/// Maps a `0..=1` quality onto the encoder's `1..=100` scale.
fn jpeg_quality(quality: f32) -> u8 {
    let quality = if quality.is_finite() { quality } else { FALLBACK_QUALITY };
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn encode_jpeg(image: &DynamicImage, quality: f32) -> Result<Vec<u8>, InputError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, jpeg_quality(quality))
        .encode_image(&image.to_rgb8())
        .map_err(|e| InputError::Unprocessable(e.to_string()))?;
    Ok(bytes)
}
