//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};
    use wavecollapse::algorithm::selection::{Heuristic, StartPolicy};
    use wavecollapse::analysis::similarity::EdgePolicy;
    use wavecollapse::io::cli::{Cli, FileProcessor};
    use wavecollapse::io::configuration::{
        DEFAULT_FRAME_EVERY, DEFAULT_OUTPUT_SIZE, DEFAULT_SEED, ENTROPY_JITTER, SELECTION_JITTER,
    };

    fn write_checkerboard(path: &Path, size: u32) {
        let img = RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        img.save(path).expect("Failed to write exemplar");
    }

    // Tests CLI parsing with only required target file argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "test.png"]);

        assert_eq!(cli.target, PathBuf::from("test.png"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.dimensions(), (DEFAULT_OUTPUT_SIZE, DEFAULT_OUTPUT_SIZE));
        assert_eq!(cli.edge, EdgePolicy::Absent);
        assert_eq!(cli.heuristic, Heuristic::MinimumRemainingValues);
        assert_eq!(cli.frame_every, DEFAULT_FRAME_EVERY);
        assert!(!cli.quiet);
        assert!(!cli.self_similar);
    }

    // Tests CLI parsing with all available arguments
    // Verified by renaming the value enum variants
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "input.png",
            "--seed",
            "123",
            "-w",
            "20",
            "-H",
            "10",
            "--self-similar",
            "--edge",
            "wrap",
            "--heuristic",
            "entropy",
            "--center-start",
            "--animate",
            "--frame-every",
            "3",
            "--quiet",
            "--no-skip",
        ]);

        assert_eq!(cli.seed, 123);
        assert_eq!(cli.dimensions(), (20, 10));
        assert!(cli.self_similar);
        assert_eq!(cli.edge, EdgePolicy::Wrap);
        assert_eq!(cli.heuristic, Heuristic::WeightedEntropy);
        assert!(cli.animate);
        assert_eq!(cli.frame_every, 3);
        assert!(cli.quiet);
        assert!(!cli.skip_existing());
    }

    // Tests a single given dimension makes a square output
    // Verified by falling back to the default for the missing side
    #[test]
    fn test_single_dimension_is_square() {
        assert_eq!(Cli::parse_from(["p", "t.png", "-w", "7"]).dimensions(), (7, 7));
        assert_eq!(Cli::parse_from(["p", "t.png", "-H", "9"]).dimensions(), (9, 9));
    }

    // Tests the selection policy follows heuristic and start flags
    // Verified by keeping the size jitter under the entropy heuristic
    #[test]
    fn test_selection_policy() {
        let default = Cli::parse_from(["p", "t.png"]).selection_policy();
        assert!((default.jitter - SELECTION_JITTER).abs() < f64::EPSILON);
        assert_eq!(default.start, StartPolicy::Random);

        let entropy =
            Cli::parse_from(["p", "t.png", "--heuristic", "entropy", "--center-start"]).selection_policy();
        assert!((entropy.jitter - ENTROPY_JITTER).abs() < f64::EPSILON);
        assert_eq!(entropy.start, StartPolicy::Center);
        assert_eq!(Cli::parse_from(["p", "t.png", "-s", "5"]).collapse_config().seed, 5);
    }

    // Tests output naming next to the input
    // Verified by dropping the suffix from the output name
    #[test]
    fn test_output_paths() {
        let input = Path::new("dir/tiles.png");
        assert_eq!(FileProcessor::get_output_path(input), PathBuf::from("dir/tiles_result.png"));
        assert_eq!(
            FileProcessor::get_animation_path(input),
            PathBuf::from("dir/tiles_animation.gif")
        );
    }

    // Tests a full run writes the result and skips it next time
    // Verified by ignoring existing outputs when collecting files
    #[test]
    fn test_process_file_and_skip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("board.png");
        write_checkerboard(&input, 4);
        let target = input.to_string_lossy().to_string();

        let cli = Cli::parse_from(["p", target.as_str(), "-w", "6", "--quiet"]);
        let succeeded = FileProcessor::new(cli).process().expect("Failed to process");
        assert_eq!(succeeded, 1);

        let output = image::open(FileProcessor::get_output_path(&input))
            .expect("Failed to open result")
            .to_rgba8();
        assert_eq!(output.dimensions(), (6, 6));
        assert_ne!(output.get_pixel(0, 0), output.get_pixel(1, 0));

        let cli = Cli::parse_from(["p", target.as_str(), "-w", "6", "--quiet"]);
        assert_eq!(FileProcessor::new(cli).process().expect("Failed to process"), 0);
    }

    // Tests directory targets with folding and animation
    // Verified by writing the animation only when no frames were taken
    #[test]
    fn test_process_directory_with_animation() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("board.png");
        write_checkerboard(&input, 4);
        let target = dir.path().to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "p",
            target.as_str(),
            "-w",
            "5",
            "--self-similar",
            "--edge",
            "wrap",
            "--animate",
            "--frame-every",
            "2",
            "--quiet",
        ]);
        let succeeded = FileProcessor::new(cli).process().expect("Failed to process");

        assert_eq!(succeeded, 1);
        assert!(FileProcessor::get_output_path(&input).exists());
        assert!(FileProcessor::get_animation_path(&input).exists());
    }

    // Tests non-PNG targets and missing paths are rejected
    // Verified by accepting any existing file
    #[test]
    fn test_invalid_targets() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "not an image").expect("Failed to write file");

        let text_arg = text.to_string_lossy().to_string();
        let cli = Cli::parse_from(["p", text_arg.as_str(), "--quiet"]);
        assert!(FileProcessor::new(cli).process().is_err());

        let missing = dir.path().join("missing.png").to_string_lossy().to_string();
        let cli = Cli::parse_from(["p", missing.as_str(), "--quiet"]);
        assert!(FileProcessor::new(cli).process().is_err());
    }

    // Tests invalid dimensions fail before any file is touched
    // Verified by validating the configuration after loading images
    #[test]
    fn test_invalid_dimensions() {
        let cli = Cli::parse_from(["p", "whatever.png", "-w", "0", "--quiet"]);
        assert!(FileProcessor::new(cli).process().is_err());
    }
}
