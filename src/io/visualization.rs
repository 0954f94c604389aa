//! Frame capture and GIF generation for watching a run unfold

use crate::algorithm::executor::{StepEvent, StepOutcome};
use crate::io::configuration::FINAL_FRAME_HOLD;
use crate::io::error::{CollapseError, Result};
use crate::io::image::{Coloring, render_wave};
use crate::spatial::Wave;
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Renders a frame every few steps for later GIF export
///
/// Intended to be fed from a run observer. Rendering happens inline but never
/// touches the engine's state.
pub struct AnimationCapture<C: Coloring> {
    frames: Vec<RgbaImage>,
    coloring: C,
    frame_every: usize,
}

impl<C: Coloring> AnimationCapture<C> {
    /// Capture one frame every `frame_every` steps (at least every step)
    pub fn new(coloring: C, frame_every: usize) -> Self {
        Self {
            frames: Vec::new(),
            coloring,
            frame_every: frame_every.max(1),
        }
    }

    /// Observer hook: capture the wave when the step number is due
    ///
    /// The completing step is always captured so the animation ends on the
    /// finished grid.
    pub fn observe(&mut self, event: &StepEvent<'_>) {
        if event.step % self.frame_every == 0 || event.outcome == StepOutcome::Complete {
            self.capture(event.wave);
        }
    }

    /// Render the wave as the next frame
    pub fn capture(&mut self, wave: &Wave) {
        self.frames.push(render_wave(wave, &self.coloring));
    }

    /// Captured frames so far
    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// Number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF
    ///
    /// The last frame is held longer so the final state stays readable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(CollapseError::InvalidSourceData {
                reason: "No frames captured for animation".to_string(),
            });
        }

        let last = self.frames.len() - 1;
        let frames = self.frames.iter().enumerate().map(|(index, img)| {
            let delay = if index == last {
                frame_delay_ms * FINAL_FRAME_HOLD
            } else {
                frame_delay_ms
            };
            Frame::from_parts(img.clone(), 0, 0, Delay::from_numer_denom_ms(delay, 1))
        });

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CollapseError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| CollapseError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| CollapseError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
