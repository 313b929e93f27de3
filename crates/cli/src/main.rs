use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use revive_core::pipeline::infrastructure::sequential_pipeline_executor::SequentialPipelineExecutor;
use revive_core::pipeline::process_video_use_case::ProcessVideoUseCase;
use revive_core::shared::constants::{
    ENHANCE_OUTPUT_PREFIX, VIDEO_EXTENSIONS, WATERMARK_OUTPUT_PREFIX,
};
use revive_core::shared::work_dirs::{is_supported_video, WorkDirs};
use revive_core::stages::infrastructure::{enhancement_chain, watermark_chain};
use revive_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use revive_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;

/// Watermark removal and quality enhancement for video files.
#[derive(Parser)]
#[command(name = "revive")]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Output video file (default: <output-dir>/<prefix><input name>).
    output: Option<PathBuf>,

    /// What to do with each frame.
    #[arg(long, value_enum, default_value = "enhance")]
    mode: Mode,

    /// Directory for derived outputs when no output path is given.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Strip the watermark (currently a frame-exact copy).
    RemoveWatermark,
    /// Denoise, equalize local contrast, and sharpen.
    Enhance,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let output = match &cli.output {
        Some(path) => path.clone(),
        None => derived_output(&cli)?,
    };

    let progress: Box<dyn Fn(usize, usize) + Send> = Box::new(|current, total| {
        if total > 0 {
            eprint!("\rProcessing frame {current}/{total}");
        } else {
            eprint!("\rProcessing frame {current}");
        }
    });

    let stages = match cli.mode {
        Mode::RemoveWatermark => watermark_chain(),
        Mode::Enhance => enhancement_chain(),
    };

    let mut use_case = ProcessVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(FfmpegWriter::new()),
        stages,
        Box::new(SequentialPipelineExecutor::new()),
        Some(progress),
    );

    let report = use_case.execute(&cli.input, &output)?;
    eprintln!();

    if report.frames_read == 0 {
        log::warn!("{} contained no frames", cli.input.display());
    }
    log::info!(
        "Wrote {} frames to {}",
        report.frames_written,
        output.display()
    );
    println!("{}", output.display());
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_supported_video(&cli.input) {
        return Err(format!(
            "Unsupported file type: {} (expected one of: {})",
            cli.input.display(),
            VIDEO_EXTENSIONS.join(", ")
        )
        .into());
    }
    Ok(())
}

fn derived_output(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let upload_dir = cli
        .input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let dirs = WorkDirs::new(upload_dir, &cli.output_dir);
    dirs.ensure()?;

    let prefix = match cli.mode {
        Mode::RemoveWatermark => WATERMARK_OUTPUT_PREFIX,
        Mode::Enhance => ENHANCE_OUTPUT_PREFIX,
    };
    Ok(dirs.derived_output(&cli.input, prefix))
}
