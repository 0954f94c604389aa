//! Rendering waves to RGBA images and PNG export
//!
//! A cell's colour is the sum of its candidate colours divided by the square
//! root of the domain size, clamped to 255. Decided cells show their exact
//! colour, undecided cells blend toward a brighter average, and contradictions
//! render black.

use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::analysis::adjacency::AdjacencyModel;
use crate::analysis::similarity::FoldedGrid;
use crate::io::error::{CollapseError, Result};
use crate::spatial::{Position, Symbol, Wave};

/// Maps a symbol to a displayable RGB colour
pub trait Coloring {
    /// Colour of `symbol`
    fn color(&self, symbol: Symbol) -> [u8; 3];
}

impl<F> Coloring for F
where
    F: Fn(Symbol) -> [u8; 3],
{
    fn color(&self, symbol: Symbol) -> [u8; 3] {
        self(symbol)
    }
}

/// Colour table for quantized symbols
///
/// Lookups can go through a model's slot table and then a fold table before
/// reaching the colours.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<[u8; 4]>,
    fold_origin: Option<Vec<Symbol>>,
    model_alphabet: Option<Vec<Symbol>>,
}

impl Palette {
    /// Palette indexed directly by symbol
    pub const fn new(colors: Vec<[u8; 4]>) -> Self {
        Self {
            colors,
            fold_origin: None,
            model_alphabet: None,
        }
    }

    /// Palette for folded symbols, coloured by their original symbol
    #[must_use]
    pub fn through_fold(mut self, folded: &FoldedGrid) -> Self {
        self.fold_origin = Some(folded.origin.clone());
        self
    }

    /// Palette for waves built on `model`, whose domains hold slots
    #[must_use]
    pub fn through_model(mut self, model: &AdjacencyModel) -> Self {
        self.model_alphabet = Some(model.alphabet().to_vec());
        self
    }

    /// Number of base colours
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colours
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Coloring for Palette {
    fn color(&self, symbol: Symbol) -> [u8; 3] {
        let symbol = match &self.model_alphabet {
            Some(alphabet) => alphabet.get(symbol).copied(),
            None => Some(symbol),
        };
        let base = match &self.fold_origin {
            Some(origin) => symbol.and_then(|s| origin.get(s).copied()),
            None => symbol,
        };
        base.and_then(|s| self.colors.get(s))
            .map_or([0, 0, 0], |&[r, g, b, _]| [r, g, b])
    }
}

/// Colour of one cell from its domain
pub fn blend_domain<C: Coloring + ?Sized>(domain: impl Iterator<Item = Symbol>, coloring: &C) -> [u8; 4] {
    let mut sums = [0.0_f64; 3];
    let mut count = 0usize;
    for symbol in domain {
        let rgb = coloring.color(symbol);
        for (sum, channel) in sums.iter_mut().zip(rgb) {
            *sum += f64::from(channel);
        }
        count += 1;
    }

    if count == 0 {
        return [0, 0, 0, 255];
    }
    let norm = (count as f64).sqrt();
    let [r, g, b] = sums.map(|sum| (sum / norm).min(255.0) as u8);
    [r, g, b, 255]
}

/// Render every position of a wave, including partial states
pub fn render_wave<C: Coloring + ?Sized>(wave: &Wave, coloring: &C) -> RgbaImage {
    let mut img = RgbaImage::new(wave.width() as u32, wave.height() as u32);
    for y in 0..wave.height() {
        for x in 0..wave.width() {
            let domain = wave.domain(Position::new(x, y));
            let color = blend_domain(domain.iter(), coloring);
            img.put_pixel(x as u32, y as u32, Rgba(color));
        }
    }
    img
}

/// Render a wave and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_wave_as_png<C: Coloring + ?Sized>(
    wave: &Wave,
    coloring: &C,
    output_path: &Path,
) -> Result<()> {
    let img = render_wave(wave, coloring);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CollapseError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| CollapseError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
