//! Tiling several images into one.

use tracing::debug;

use super::image::Image;
use crate::error::StudioError;

/// An ordered collection of images laid out row-major into a grid.
#[derive(Clone, Debug, Default)]
pub struct ImageGrid {
    images: Vec<Image>,
}

impl ImageGrid {
    pub fn new(images: Vec<Image>) -> Self {
        Self { images }
    }

    pub fn push(&mut self, image: Image) {
        self.images.push(image);
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Concatenates the images into a `columns` x `rows` grid.
    ///
    /// Cells left over after the last image are filled with zeroed images
    /// the size and color space of the first one. All images must share
    /// that size and color space.
    pub fn concat_to_image(&self, columns: usize, rows: usize) -> Result<Image, StudioError> {
        let first = self
            .images
            .first()
            .ok_or_else(|| StudioError::InvalidArguments("no images to concatenate".to_string()))?;

        let slots = columns.saturating_mul(rows);
        if slots == 0 || self.images.len() > slots {
            return Err(StudioError::InvalidArguments(format!(
                "{} images do not fit a {}x{} grid",
                self.images.len(),
                columns,
                rows
            )));
        }

        let mut filler = Image::create_blank(first.height(), first.width(), first.channels())?;
        if filler.color_space() != first.color_space() {
            filler = Image::from_raw(
                first.width(),
                first.height(),
                first.color_space(),
                filler.into_bytes(),
            )?;
        }

        debug!(columns, rows, images = self.images.len(), "concatenating grid");
        let mut cells = self.images.iter().chain(std::iter::repeat(&filler));

        let mut grid: Option<Image> = None;
        for _ in 0..rows {
            let mut row: Option<Image> = None;
            for cell in cells.by_ref().take(columns) {
                row = Some(match row.take() {
                    Some(mut row) => {
                        row.concat_horizontal(cell)?;
                        row
                    }
                    None => cell.clone(),
                });
            }

            if let Some(row) = row {
                grid = Some(match grid.take() {
                    Some(mut grid) => {
                        grid.concat_vertical(&row)?;
                        grid
                    }
                    None => row,
                });
            }
        }

        grid.ok_or_else(|| StudioError::InvalidArguments("empty grid".to_string()))
    }
}

impl From<Vec<Image>> for ImageGrid {
    fn from(images: Vec<Image>) -> Self {
        Self::new(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::ColorSpace;

    fn filled(value: u8) -> Image {
        Image::from_raw(2, 2, ColorSpace::Rgb, vec![value; 12]).unwrap()
    }

    #[test]
    fn test_grid_pads_with_blanks() {
        let grid = ImageGrid::new(vec![filled(1), filled(2), filled(3)]);
        let image = grid.concat_to_image(2, 2).unwrap();

        assert_eq!((image.width(), image.height()), (4, 4));
        assert_eq!(image.color_space(), ColorSpace::Rgb);
        assert_eq!(image.pixel(0, 0).unwrap(), &[1, 1, 1]);
        assert_eq!(image.pixel(2, 0).unwrap(), &[2, 2, 2]);
        assert_eq!(image.pixel(0, 2).unwrap(), &[3, 3, 3]);
        assert_eq!(image.pixel(3, 3).unwrap(), &[0, 0, 0]);
    }

    #[test]
    fn test_grid_single_row() {
        let grid = ImageGrid::new(vec![filled(7), filled(8)]);
        let image = grid.concat_to_image(2, 1).unwrap();
        assert_eq!((image.width(), image.height()), (4, 2));
    }

    #[test]
    fn test_grid_rejects_bad_shapes() {
        assert!(matches!(
            ImageGrid::default().concat_to_image(1, 1),
            Err(StudioError::InvalidArguments(_))
        ));

        let grid = ImageGrid::new(vec![filled(1), filled(2), filled(3)]);
        assert!(matches!(
            grid.concat_to_image(1, 2),
            Err(StudioError::InvalidArguments(_))
        ));
        assert!(grid.concat_to_image(0, 5).is_err());
    }

    #[test]
    fn test_grid_mismatched_sizes() {
        let small = Image::from_raw(1, 2, ColorSpace::Rgb, vec![0; 6]).unwrap();
        let grid = ImageGrid::new(vec![filled(1), small]);
        assert!(matches!(
            grid.concat_to_image(1, 2),
            Err(StudioError::IncompatibleImages(_))
        ));
    }
}
