//! Command-line interface for batch processing PNG exemplars

use crate::algorithm::executor::{CollapseConfig, CollapseDriver, RunStatus, StepEvent};
use crate::algorithm::selection::{Heuristic, SelectionPolicy, StartPolicy};
use crate::analysis::adjacency::AdjacencyModel;
use crate::analysis::patterns::ImageProcessor;
use crate::analysis::similarity::{EdgePolicy, fold_self_similar};
use crate::io::configuration::{
    ANIMATION_SUFFIX, DEFAULT_FRAME_EVERY, DEFAULT_OUTPUT_SIZE, DEFAULT_SEED, ENTROPY_JITTER,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, SELECTION_JITTER,
};
use crate::io::error::{Result, path_error};
use crate::io::image::{Palette, export_wave_as_png};
use crate::io::progress::ProgressManager;
use crate::io::visualization::AnimationCapture;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "wavecollapse")]
#[command(
    author,
    version,
    about = "Generate images whose neighbourhoods follow an exemplar's adjacency rules"
)]
/// Command-line arguments for the generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output width in cells (implies square if height not specified)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output height in cells
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Fold cells with identical cardinal neighbours into new symbols before learning rules
    #[arg(long)]
    pub self_similar: bool,

    /// How neighbour reads past the exemplar border behave when folding
    #[arg(long, value_enum, default_value_t = EdgePolicy::Absent)]
    pub edge: EdgePolicy,

    /// Heuristic used to pick the next cell
    #[arg(long, value_enum, default_value_t = Heuristic::MinimumRemainingValues)]
    pub heuristic: Heuristic,

    /// Start collapsing at the centre of the grid
    #[arg(long)]
    pub center_start: bool,

    /// Write an animated GIF of the run
    #[arg(short, long)]
    pub animate: bool,

    /// Steps between animation frames
    #[arg(long, default_value_t = DEFAULT_FRAME_EVERY)]
    pub frame_every: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Output `(width, height)`; a single given dimension makes a square
    pub const fn dimensions(&self) -> (usize, usize) {
        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(s), None) | (None, Some(s)) => (s, s),
            (None, None) => (DEFAULT_OUTPUT_SIZE, DEFAULT_OUTPUT_SIZE),
        }
    }

    /// Selection parameters implied by the flags
    pub const fn selection_policy(&self) -> SelectionPolicy {
        let jitter = match self.heuristic {
            Heuristic::MinimumRemainingValues => SELECTION_JITTER,
            Heuristic::WeightedEntropy => ENTROPY_JITTER,
        };
        let start = if self.center_start {
            StartPolicy::Center
        } else {
            StartPolicy::Random
        };
        SelectionPolicy {
            heuristic: self.heuristic,
            jitter,
            start,
        }
    }

    /// Full run configuration implied by the flags
    pub const fn collapse_config(&self) -> CollapseConfig {
        let (width, height) = self.dimensions();
        CollapseConfig {
            width,
            height,
            seed: self.seed,
            selection: self.selection_policy(),
        }
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// Returns the number of files whose run ended in success.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, configuration or file processing fails
    pub fn process(&mut self) -> Result<usize> {
        self.cli.collapse_config().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            info!(path = %self.cli.target.display(), "nothing to process");
            return Ok(0);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut succeeded = 0;
        for (index, file) in files.iter().enumerate() {
            if self.process_file(file, index)? == RunStatus::Success {
                succeeded += 1;
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(succeeded)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_png(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(path_error(target, "Target file must be a PNG image"))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_png(&path) && !is_generated(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(path_error(target, "Target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if Self::get_output_path(input_path).exists() {
            info!(input = %input_path.display(), "skipping: output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<RunStatus> {
        let start_time = Instant::now();
        let config = self.cli.collapse_config();

        let (source, colors) = ImageProcessor::from_png_file(input_path)?.into_parts();
        let (model, palette) = if self.cli.self_similar {
            let folded = fold_self_similar(&source, self.cli.edge);
            info!(
                original = colors.len(),
                folded = folded.symbol_count(),
                "folded exemplar by neighbour signature"
            );
            let model = AdjacencyModel::from_exemplar(&folded.grid)?;
            let palette = Palette::new(colors).through_fold(&folded).through_model(&model);
            (model, palette)
        } else {
            let model = AdjacencyModel::from_exemplar(&source)?;
            let palette = Palette::new(colors).through_model(&model);
            (model, palette)
        };

        let mut driver = CollapseDriver::new(&model, config)?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, driver.wave().area());
        }

        let mut animation = self
            .cli
            .animate
            .then(|| AnimationCapture::new(palette.clone(), self.cli.frame_every));
        if let Some(ref mut capture) = animation {
            capture.capture(driver.wave());
        }

        let progress_manager = &mut self.progress_manager;
        let status = driver.run_with_observer(|event: &StepEvent<'_>| {
            if let Some(pm) = progress_manager.as_mut() {
                pm.update_collapse(index, event.wave.collapsed_count(), event.rollbacks_remaining);
            }
            if let Some(capture) = animation.as_mut() {
                capture.observe(event);
            }
        });
        let outcome = driver.into_outcome();

        let output_path = Self::get_output_path(input_path);
        export_wave_as_png(&outcome.wave, &palette, &output_path)?;

        if let Some(ref capture) = animation {
            let animation_path = Self::get_animation_path(input_path);
            capture.export_gif(&animation_path, GIF_FRAME_DELAY_MS)?;
            info!(
                output = %animation_path.display(),
                frames = capture.frame_count(),
                "wrote animation"
            );
        }

        let stats = outcome.statistics;
        match status {
            RunStatus::Success => info!(
                input = %input_path.display(),
                output = %output_path.display(),
                symbols = model.symbol_count(),
                steps = stats.steps,
                rollbacks = stats.rollbacks,
                elapsed_ms = start_time.elapsed().as_millis(),
                "generated"
            ),
            _ => warn!(
                input = %input_path.display(),
                output = %output_path.display(),
                steps = stats.steps,
                rollbacks = stats.rollbacks,
                "gave up; wrote partial result"
            ),
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, status == RunStatus::Success);
        }

        Ok(status)
    }

    /// Path of the PNG written for `input_path`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, OUTPUT_SUFFIX, "png")
    }

    /// Path of the GIF written for `input_path`
    pub fn get_animation_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, ANIMATION_SUFFIX, "gif")
    }
}

fn sibling_with_suffix(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
