use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};

use crate::core::{Frame, FrameError, PixelLayout};
use crate::io::{ConfigError, LocateConfig};
use crate::locator::{Located, Locator};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Borrow an `image::GrayImage` as a grayscale frame.
pub fn frame_from_gray(img: &GrayImage) -> Result<Frame<'_>, FrameError> {
    Frame::gray(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Borrow an `image::RgbImage` as an RGB frame.
pub fn frame_from_rgb(img: &RgbImage) -> Result<Frame<'_>, FrameError> {
    Frame::rgb(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Wrap a raw interleaved buffer, validating its length.
pub fn frame_from_slice(
    width: u32,
    height: u32,
    layout: PixelLayout,
    pixels: &[u8],
) -> Result<Frame<'_>, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(FrameError::DimensionOverflow {
            width: width as usize,
            height: height as usize,
            channels: layout.channels(),
        }
        .into());
    };
    Ok(Frame::new(w, h, layout, pixels)?)
}

/// Decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, DetectError> {
    Ok(image::open(path)?)
}

/// Run the configured locator on a decoded image.
///
/// Grayscale images are passed through as-is; everything else is converted
/// to 8-bit RGB first.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, config),
        fields(width = img.width(), height = img.height(), mode = ?config.mode)
    )
)]
pub fn locate_in_image(img: &DynamicImage, config: &LocateConfig) -> Result<Located, DetectError> {
    let locator = Locator::new(config);
    let located = match img {
        DynamicImage::ImageLuma8(gray) => locator.locate(&frame_from_gray(gray)?)?,
        other => {
            let rgb = other.to_rgb8();
            locator.locate(&frame_from_rgb(&rgb)?)?
        }
    };
    Ok(located)
}

/// Load a config file and an image, then locate.
pub fn locate_file(
    image_path: impl AsRef<Path>,
    config_path: impl AsRef<Path>,
) -> Result<Located, DetectError> {
    let config = LocateConfig::load_json(config_path)?;
    let img = load_image(image_path)?;
    locate_in_image(&img, &config)
}
