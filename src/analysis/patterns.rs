//! Image decoding and colour quantization into symbol grids

use image::RgbaImage;
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

use crate::io::error::{CollapseError, Result};
use crate::spatial::Symbol;

/// Converts images to symbol-labelled grids
///
/// Every distinct RGBA colour becomes one symbol, numbered in the order the
/// colours are first met in a row-major scan.
pub struct ImageProcessor {
    source_data: Array2<Symbol>,
    color_mapping: Vec<[u8; 4]>,
}

impl ImageProcessor {
    /// Load and process an image from a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    /// - The image has no pixels
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| CollapseError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        Self::from_rgba(&img.to_rgba8())
    }

    /// Quantize an in-memory RGBA image
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels.
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        if width == 0 || height == 0 {
            return Err(CollapseError::InvalidSourceData {
                reason: "Source image has no pixels".to_string(),
            });
        }

        let mut lookup: HashMap<[u8; 4], Symbol> = HashMap::new();
        let mut color_mapping = Vec::new();
        let mut source_data = Array2::zeros((height, width));

        for (x, y, pixel) in image.enumerate_pixels() {
            let symbol = *lookup.entry(pixel.0).or_insert_with(|| {
                color_mapping.push(pixel.0);
                color_mapping.len() - 1
            });
            if let Some(cell) = source_data.get_mut((y as usize, x as usize)) {
                *cell = symbol;
            }
        }

        Ok(Self {
            source_data,
            color_mapping,
        })
    }

    /// Get the symbol grid, shaped `(rows, cols)`
    pub const fn source_data(&self) -> &Array2<Symbol> {
        &self.source_data
    }

    /// Number of distinct colours (symbols)
    pub fn unique_symbol_count(&self) -> usize {
        self.color_mapping.len()
    }

    /// RGBA colour of each symbol, indexed by symbol
    pub fn color_mapping(&self) -> &[[u8; 4]] {
        &self.color_mapping
    }

    /// Consume the processor and return the grid and colour table
    pub fn into_parts(self) -> (Array2<Symbol>, Vec<[u8; 4]>) {
        (self.source_data, self.color_mapping)
    }
}
