//! Pure rendering of the form and the result panel
//!
//! [`render`] turns the current state into a [`View`]. Every section is
//! decided on its own, from the field it displays. `Display` draws the view
//! for a terminal.

use crate::constants::{
    COMPRESSED_SIZE_PREFIX, COMPRESSION_RATIO_PREFIX, DOWNLOAD_PREFIX, ERROR_PREFIX,
    ORIGINAL_SIZE_PREFIX, PROGRESS_BAR_WIDTH,
};
use crate::form::FormState;
use crate::preview::PreviewUrl;
use crate::status::CompressionStatus;
use crate::utils::{calculate_compression_ratio, compressed_filename, print_data_size};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub input: InputPanel,
    pub progress: Option<f64>,
    pub error: Option<String>,
    pub output: OutputPanel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputPanel {
    pub selected: Option<SelectedPreview>,
    pub max_size_mb: String,
    pub max_width_or_height: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPreview {
    pub name: String,
    pub url: Option<PreviewUrl>,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputPanel {
    pub input_size: Option<String>,
    pub output_size: Option<String>,
    pub ratio: Option<f64>,
    pub download: Option<Download>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub url: PreviewUrl,
    pub filename: String,
}

pub fn render(
    form: &FormState,
    status: &CompressionStatus,
    input_preview: Option<&PreviewUrl>,
) -> View {
    let selected = form.file.as_ref().map(|file| SelectedPreview {
        name: file.name().to_string(),
        url: input_preview.cloned(),
        size: print_data_size(file.size()),
    });

    let ratio = match (status.input_size, status.output_size) {
        (Some(input), Some(output)) => Some(calculate_compression_ratio(input, output)),
        _ => None,
    };

    let download = status.output_url.as_ref().map(|url| Download {
        url: url.clone(),
        filename: compressed_filename(status.filename.as_deref().unwrap_or_default()),
    });

    View {
        input: InputPanel {
            selected,
            max_size_mb: form.max_size_mb.clone(),
            max_width_or_height: form.max_width_or_height.clone(),
        },
        progress: status.progress,
        error: status.has_error().then(|| status.error_message.clone()),
        output: OutputPanel {
            input_size: status.input_size.map(print_data_size),
            output_size: status.output_size.map(print_data_size),
            ratio,
            download,
        },
    }
}

fn progress_bar(percent: f64) -> String {
    let clamped = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((clamped / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        clamped
    )
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input")?;
        if let Some(selected) = &self.input.selected {
            match &selected.url {
                Some(url) => writeln!(f, "  🖼  {} ({})", selected.name, url)?,
                None => writeln!(f, "  🖼  {}", selected.name)?,
            }
            writeln!(f, "  {} {}", ORIGINAL_SIZE_PREFIX, selected.size)?;
        }
        writeln!(f, "  Max size (MB): {}", self.input.max_size_mb)?;
        writeln!(f, "  Max width or height: {}", self.input.max_width_or_height)?;
        if let Some(percent) = self.progress {
            writeln!(f, "  {}", progress_bar(percent))?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "  {} {}", ERROR_PREFIX, error)?;
        }

        writeln!(f, "Output")?;
        if let Some(size) = &self.output.input_size {
            writeln!(f, "  {} {}", ORIGINAL_SIZE_PREFIX, size)?;
        }
        if let Some(size) = &self.output.output_size {
            writeln!(f, "  {} {}", COMPRESSED_SIZE_PREFIX, size)?;
        }
        if let Some(ratio) = self.output.ratio {
            writeln!(f, "  {} {:.1}%", COMPRESSION_RATIO_PREFIX, ratio)?;
        }
        if let Some(download) = &self.output.download {
            writeln!(f, "  🖼  Compressed image ({})", download.url)?;
            writeln!(f, "  {} Download: {}", DOWNLOAD_PREFIX, download.filename)?;
        }
        Ok(())
    }
}
