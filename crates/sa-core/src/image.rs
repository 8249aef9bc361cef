use crate::Error;
use crate::geom::Point2i;

/// Owned row-major image buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> ImageViewMut<'_, T> {
        ImageViewMut {
            width: self.width,
            height: self.height,
            data: &mut self.data,
        }
    }

    /// Applies `f` to every pixel, producing an image of the same size.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Image<U> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(width: usize, height: usize, data: &'a [T]) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &'a [T] {
        self.data
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Bounds-checked lookup by signed pixel coordinate.
    pub fn at(&self, p: Point2i) -> Result<&'a T, Error> {
        let (x, y) = p
            .to_index(self.width, self.height)
            .ok_or(Error::OutOfBounds)?;
        Ok(&self.data[y * self.width + x])
    }

    pub fn to_image(&self) -> Image<T>
    where
        T: Clone,
    {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

#[derive(Debug)]
pub struct ImageViewMut<'a, T> {
    width: usize,
    height: usize,
    data: &'a mut [T],
}

impl<T> ImageViewMut<'_, T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    /// Bounds-checked mutable lookup by signed pixel coordinate.
    pub fn at_mut(&mut self, p: Point2i) -> Result<&mut T, Error> {
        let (x, y) = p
            .to_index(self.width, self.height)
            .ok_or(Error::OutOfBounds)?;
        Ok(&mut self.data[y * self.width + x])
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            data: self.data,
        }
    }
}

/// Converts 8-bit luminance to `[0, 1]` intensities.
pub fn to_unit_f32(img: &ImageView<'_, u8>) -> Image<f32> {
    let data = img.data().iter().map(|&px| px as f32 / 255.0).collect();

    Image {
        width: img.width(),
        height: img.height(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView, to_unit_f32};
    use crate::{Error, Point2i};

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(3, 2, vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn view_indexing_row_major() {
        let data = vec![1u8, 2, 3, 4, 5, 6];
        let view = ImageView::from_slice(3, 2, &data).expect("valid view");

        assert_eq!(view.row(0), &[1, 2, 3]);
        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.get(0, 1), Some(&4));
        assert_eq!(view.get(3, 1), None);
        assert_eq!(view.at(Point2i::new(2, 1)), Ok(&6));
        assert_eq!(view.at(Point2i::new(-1, 0)), Err(Error::OutOfBounds));
        assert_eq!(view.at(Point2i::new(0, 2)), Err(Error::OutOfBounds));
    }

    #[test]
    fn mutable_access_writes_through() {
        let mut img = Image::new_fill(2, 2, 0.5f32);
        {
            let mut view = img.as_view_mut();
            *view.at_mut(Point2i::new(1, 0)).expect("in bounds") = 0.25;
            *view.get_mut(0, 1).expect("in bounds") = 1.0;
            view.row_mut(1)[1] = 0.0;
            assert!(view.at_mut(Point2i::new(2, 0)).is_err());
        }
        assert_eq!(img.data(), &[0.5, 0.25, 1.0, 0.0]);
    }

    #[test]
    fn map_and_unit_conversion() {
        let img8 = Image::from_vec(2, 2, vec![0u8, 51, 204, 255]).expect("valid image");
        let unit = to_unit_f32(&img8.as_view());
        let expected = [0.0, 0.2, 0.8, 1.0];
        for (a, b) in unit.data().iter().zip(expected) {
            assert!((a - b).abs() < 1e-6);
        }

        let inverted = unit.map(|v| 1.0 - v);
        assert!((inverted.data()[1] - 0.8).abs() < 1e-6);
        assert_eq!(inverted.width(), 2);
    }
}
