//! Tests for image decoding and colour quantization into symbol grids

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use wavecollapse::CollapseError;
    use wavecollapse::analysis::patterns::ImageProcessor;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn image_from_rows(rows: &[&[[u8; 4]]]) -> RgbaImage {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len()) as u32;
        let mut img = RgbaImage::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                img.put_pixel(x as u32, y as u32, Rgba(color));
            }
        }
        img
    }

    // Tests symbols are numbered by first appearance in row-major order
    // Verified by scanning columns before rows
    #[test]
    fn test_symbols_numbered_by_first_appearance() {
        let img = image_from_rows(&[&[GREEN, RED], &[BLUE, GREEN]]);
        let processor = ImageProcessor::from_rgba(&img).expect("Failed to process image");

        assert_eq!(processor.unique_symbol_count(), 3);
        assert_eq!(processor.color_mapping(), &[GREEN, RED, BLUE]);
        assert_eq!(processor.source_data().dim(), (2, 2));
        assert_eq!(processor.source_data().get((0, 1)), Some(&1));
        assert_eq!(processor.source_data().get((1, 0)), Some(&2));
        assert_eq!(processor.source_data().get((1, 1)), Some(&0));
    }

    // Tests colours differing only in alpha are distinct symbols
    // Verified by keying the lookup on RGB only
    #[test]
    fn test_alpha_distinguishes_symbols() {
        let translucent = [255, 0, 0, 128];
        let img = image_from_rows(&[&[RED, translucent]]);
        let processor = ImageProcessor::from_rgba(&img).expect("Failed to process image");
        assert_eq!(processor.unique_symbol_count(), 2);
    }

    // Tests non-square images keep their (rows, cols) shape
    // Verified by swapping width and height in the grid allocation
    #[test]
    fn test_shape_is_rows_by_cols() {
        let img = image_from_rows(&[&[RED, RED, GREEN]]);
        let (grid, colors) = ImageProcessor::from_rgba(&img)
            .expect("Failed to process image")
            .into_parts();
        assert_eq!(grid.dim(), (1, 3));
        assert_eq!(colors.len(), 2);
    }

    // Tests an image without pixels is rejected
    // Verified by removing the empty image check
    #[test]
    fn test_empty_image_rejected() {
        let result = ImageProcessor::from_rgba(&RgbaImage::new(0, 0));
        assert!(matches!(result, Err(CollapseError::InvalidSourceData { .. })));
    }

    // Tests PNG files round through disk into the same symbols
    // Verified by decoding a different file than the one written
    #[test]
    fn test_from_png_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("exemplar.png");
        image_from_rows(&[&[RED, GREEN], &[GREEN, RED]])
            .save(&path)
            .expect("Failed to save image");

        let processor = ImageProcessor::from_png_file(&path).expect("Failed to load image");
        assert_eq!(processor.unique_symbol_count(), 2);
        assert_eq!(processor.source_data().get((1, 1)), Some(&0));
    }

    // Tests a missing file reports an image load error
    // Verified by mapping load failures to file system errors
    #[test]
    fn test_missing_file() {
        let result = ImageProcessor::from_png_file("/nonexistent/exemplar.png");
        assert!(matches!(result, Err(CollapseError::ImageLoad { .. })));
    }
}
