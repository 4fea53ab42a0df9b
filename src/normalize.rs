/// Image normalization before upload
///
/// The inference model expects a fixed 256x256 input, so every source image
/// is re-encoded to exactly that size before it leaves the machine. The
/// resize is `resize_exact`: aspect ratio is intentionally not preserved,
/// matching the model's fixed input geometry.
use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::ImageReader;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Side length of the normalized upload image (square)
pub const UPLOAD_SIZE: u32 = 256;

/// JPEG quality used for the re-encode
pub const JPEG_QUALITY: u8 = 95;

/// Errors that can stop an image from being normalized
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Could not read the image: {0}")]
    Read(#[from] std::io::Error),
    #[error("Could not decode the image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Get the upload cache directory
/// Returns ~/.cache/leaf-scan/uploads on Linux
pub fn upload_cache_dir() -> PathBuf {
    let mut path = dirs_next::cache_dir()
        .or_else(dirs_next::home_dir)
        .expect("Could not determine cache directory");

    path.push("leaf-scan");
    path.push("uploads");

    // Ensure the directory exists
    fs::create_dir_all(&path).expect("Failed to create upload cache directory");

    path
}

/// Normalize a source image into a fresh 256x256 JPEG in the upload cache.
///
/// Returns the path of the written file. The file name carries a millisecond
/// timestamp, so repeated runs accumulate in the cache rather than
/// overwriting each other.
pub fn normalize_image(source: &Path) -> Result<PathBuf, NormalizeError> {
    let img = ImageReader::open(source)?.with_guessed_format()?.decode()?;

    let resized = img.resize_exact(UPLOAD_SIZE, UPLOAD_SIZE, FilterType::Triangle);

    let target = upload_cache_dir().join(format!("plant_{}.jpg", Utc::now().timestamp_millis()));
    let mut out = File::create(&target)?;
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    resized.to_rgb8().write_with_encoder(encoder)?;

    println!(
        "🖼️  Normalized {} -> {}",
        source.display(),
        target.display()
    );

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn temp_source(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("leaf-scan-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn normalized_output_is_256x256_jpeg() {
        let src = temp_source("wide.png");
        RgbImage::from_pixel(640, 200, Rgb([10, 120, 30]))
            .save(&src)
            .unwrap();

        let out = normalize_image(&src).unwrap();
        let bytes = fs::read(&out).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (UPLOAD_SIZE, UPLOAD_SIZE));

        fs::remove_file(src).ok();
        fs::remove_file(out).ok();
    }

    #[test]
    fn tall_sources_are_squashed_to_square() {
        // Aspect ratio is not preserved on purpose
        let src = temp_source("tall.png");
        RgbImage::from_pixel(100, 900, Rgb([200, 40, 40]))
            .save(&src)
            .unwrap();

        let out = normalize_image(&src).unwrap();
        let decoded = image::load_from_memory(&fs::read(&out).unwrap()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (UPLOAD_SIZE, UPLOAD_SIZE));

        fs::remove_file(src).ok();
        fs::remove_file(out).ok();
    }

    #[test]
    fn missing_source_is_a_read_error() {
        let err = normalize_image(Path::new("/nonexistent/leaf.jpg")).unwrap_err();
        assert!(matches!(err, NormalizeError::Read(_)));
    }

    #[test]
    fn corrupt_source_is_a_decode_error() {
        let src = temp_source("corrupt.jpg");
        fs::write(&src, b"definitely not an image").unwrap();

        let err = normalize_image(&src).unwrap_err();
        assert!(matches!(err, NormalizeError::Decode(_)));

        fs::remove_file(src).ok();
    }
}
