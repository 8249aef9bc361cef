use sa_core::{Image, ImageView, Point2i};

use crate::error::{ConfigError, Error};

/// Remaining darkness still to be explained by chords.
///
/// Built as `1 - image`, so dark input pixels start near `1.0`. The only
/// mutation is a multiplicative discount along a chord path.
#[derive(Debug, Clone)]
pub struct ResidualBuffer {
    img: Image<f32>,
}

impl ResidualBuffer {
    /// `image` must hold finite intensities in `[0, 1]`, `1.0` being white.
    pub fn from_image(image: &ImageView<'_, f32>) -> Result<Self, Error> {
        if image.width() == 0 || image.height() == 0 {
            return Err(sa_core::Error::TooSmall {
                width: image.width(),
                height: image.height(),
            }
            .into());
        }

        for y in 0..image.height() {
            for (x, &value) in image.row(y).iter().enumerate() {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::InvalidPixel { x, y, value }.into());
                }
            }
        }

        let data = image.data().iter().map(|&v| 1.0 - v).collect();
        let img = Image::from_vec(image.width(), image.height(), data)?;
        Ok(Self { img })
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    pub fn view(&self) -> ImageView<'_, f32> {
        self.img.as_view()
    }

    /// Multiplies every pixel on `path` by `factor`.
    ///
    /// A pixel repeated in consecutive samples is attenuated once. The whole
    /// path is bounds-checked before any pixel changes.
    pub fn discount(&mut self, path: &[Point2i], factor: f32) -> Result<(), sa_core::Error> {
        let (w, h) = (self.width(), self.height());
        if path.iter().any(|p| p.to_index(w, h).is_none()) {
            return Err(sa_core::Error::OutOfBounds);
        }

        let mut view = self.img.as_view_mut();
        let mut prev = None;
        for &p in path {
            if prev == Some(p) {
                continue;
            }
            *view.at_mut(p)? *= factor;
            prev = Some(p);
        }
        Ok(())
    }
}

/// Arithmetic mean of `view` over every sample of `path`, repeats included.
///
/// An empty path has mean `0.0`.
pub fn path_mean(view: &ImageView<'_, f32>, path: &[Point2i]) -> Result<f32, sa_core::Error> {
    if path.is_empty() {
        return Ok(0.0);
    }

    let mut sum = 0.0f32;
    for &p in path {
        sum += *view.at(p)?;
    }
    Ok(sum / path.len() as f32)
}
