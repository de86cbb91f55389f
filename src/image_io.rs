//! PNG loading and bounding box scaling

use std::path::Path;

use image::imageops::FilterType;

/// Longer edge of displayed images
pub const MAX_IMAGE_SIZE: u32 = 460;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to decode {path}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("{0} is an empty image")]
    Empty(String),
}
type Result<T> = std::result::Result<T, ImageError>;

/// A decoded and scaled RGBA bitmap
#[derive(Debug, Clone)]
pub struct ScaledImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row-wise
    pub rgba: Vec<u8>,
}
impl ScaledImage {
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

/// Bounding box of an image scaled so that its longer edge is `max`
///
/// Wider images are scaled by the width, all the others by the height.
/// The shorter edge is rounded down and never less than 1 pixel.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let (w, h, m) = (width.max(1) as u64, height.max(1) as u64, max as u64);
    if w > h {
        (max, (m * h / w).max(1) as u32)
    } else {
        ((m * w / h).max(1) as u32, max)
    }
}

/// Loads the image at `path` and scales it into a `max` × `max` box
pub fn load_scaled<P: AsRef<Path>>(path: P, max: u32) -> Result<ScaledImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| ImageError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    if img.width() == 0 || img.height() == 0 {
        return Err(ImageError::Empty(path.display().to_string()));
    }
    let (width, height) = fit_within(img.width(), img.height(), max);
    log::debug!(
        "scaling {:?} from {}x{} to {}x{}",
        path,
        img.width(),
        img.height(),
        width,
        height
    );
    let rgba = img
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgba8()
        .into_raw();
    Ok(ScaledImage {
        width,
        height,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn landscape() {
        assert_eq!(fit_within(614, 460, MAX_IMAGE_SIZE), (460, 344));
        assert_eq!(fit_within(1000, 10, MAX_IMAGE_SIZE), (460, 4));
    }

    #[test]
    fn portrait_and_square() {
        assert_eq!(fit_within(200, 400, MAX_IMAGE_SIZE), (230, 460));
        assert_eq!(fit_within(37, 37, MAX_IMAGE_SIZE), (460, 460));
        assert_eq!(fit_within(1, 5000, MAX_IMAGE_SIZE), (1, 460));
    }

    #[test]
    fn aspect_ratio_preserved() {
        for width in (1..2000).step_by(37) {
            for height in (1..2000).step_by(41) {
                let (w, h) = fit_within(width, height, MAX_IMAGE_SIZE);
                assert_eq!(w.max(h), MAX_IMAGE_SIZE);
                let ratio = width as f64 / height as f64;
                // rounding down the shorter edge loses at most one pixel
                if width > height {
                    assert!((w as f64 / ratio - h as f64) < 1. + 1e-9 || h == 1);
                } else {
                    assert!((h as f64 * ratio - w as f64) < 1. + 1e-9 || w == 1);
                }
            }
        }
    }

    #[test]
    fn png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round_trip.png");
        RgbImage::from_pixel(300, 200, Rgb([10, 200, 30]))
            .save(&path)
            .unwrap();
        let img = load_scaled(&path, MAX_IMAGE_SIZE).unwrap();
        assert_eq!((img.width, img.height), (460, 306));
        assert_eq!(img.rgba.len(), 460 * 306 * 4);
        assert_eq!(&img.rgba[..4], &[10, 200, 30, 255]);
        let img = load_scaled(&path, 300).unwrap();
        assert_eq!((img.width, img.height), (300, 200));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_scaled(dir.path().join("missing.png"), MAX_IMAGE_SIZE),
            Err(ImageError::Decode { .. })
        ));
    }

    #[test]
    fn not_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.png");
        std::fs::write(&path, "not an image").unwrap();
        assert!(load_scaled(&path, MAX_IMAGE_SIZE).is_err());
    }
}
