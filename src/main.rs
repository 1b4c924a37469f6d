use anyhow::{bail, Context, Result};
use clap::Parser;
use img_compressor::cli::{Args, Commands};
use img_compressor::constants::PROGRESS_BAR_TEMPLATE;
use img_compressor::{
    logger, App, AppConfig, ConcurrencyPolicy, FormChange, ImageCompressor, SourceFile,
    SubmitOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose, args.quiet);

    match args.command {
        Commands::Compress {
            input,
            max_size_mb,
            max_width_or_height,
            output_dir,
            config,
            allow_concurrent,
        } => {
            let mut config = match config {
                Some(path) => AppConfig::load(&path)
                    .with_context(|| format!("failed to load config {:?}", path))?,
                None => AppConfig::default(),
            };
            if allow_concurrent {
                config.concurrency = ConcurrencyPolicy::Concurrent;
            }

            let output_dir = output_dir.unwrap_or_else(|| default_output_dir(&input));
            compress(
                &input,
                max_size_mb,
                max_width_or_height,
                &output_dir,
                config,
                args.quiet,
            )
            .await?;
        }
    }

    Ok(())
}

fn default_output_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("Compressing...");
    pb
}

async fn compress(
    input: &Path,
    max_size_mb: Option<String>,
    max_width_or_height: Option<String>,
    output_dir: &Path,
    config: AppConfig,
    quiet: bool,
) -> Result<()> {
    let file =
        SourceFile::open(input).with_context(|| format!("failed to read {:?}", input))?;

    let mut app = App::new(Arc::new(ImageCompressor::new()), config);
    app.change(FormChange::Files(vec![file]));
    if let Some(value) = max_size_mb {
        app.change(FormChange::MaxSizeMb(value));
    }
    if let Some(value) = max_width_or_height {
        app.change(FormChange::MaxWidthOrHeight(value));
    }

    let pb = progress_bar(quiet);
    let listener_pb = pb.clone();
    app.subscribe(move |status| {
        if let Some(percent) = status.progress {
            listener_pb.set_position(percent.clamp(0.0, 100.0).round() as u64);
        }
    });

    let outcome = app.submit().await;
    pb.finish_and_clear();

    if !quiet {
        print!("{}", app.view());
    }

    match outcome {
        SubmitOutcome::Compressed { .. } => {
            let path = app.download(output_dir)?;
            if !quiet {
                println!("✅ Saved to {}", path.display());
            }
            Ok(())
        }
        SubmitOutcome::Failed(message) => bail!(message),
        SubmitOutcome::NoFile | SubmitOutcome::Busy => bail!("nothing was compressed"),
    }
}
