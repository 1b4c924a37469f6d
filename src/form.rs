use crate::constants::{
    BYTES_PER_MB, DEFAULT_MAX_SIZE_MB, DEFAULT_MAX_WIDTH_OR_HEIGHT, FIELD_FILE, FIELD_MAX_SIZE_MB,
    FIELD_MAX_WIDTH_OR_HEIGHT, MIN_WIDTH_OR_HEIGHT,
};
use crate::error::{CompressionError, Result};
use crate::source::SourceFile;

/// The user's current input selections.
///
/// Numeric fields keep the raw text of their input control. They are parsed
/// at submit time by [`CompressionOptions::from_form`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub max_size_mb: String,
    pub max_width_or_height: String,
    pub file: Option<SourceFile>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB.to_string(),
            max_width_or_height: DEFAULT_MAX_WIDTH_OR_HEIGHT.to_string(),
            file: None,
        }
    }
}

/// A change event coming from one form control
#[derive(Debug, Clone, PartialEq)]
pub enum FormChange {
    MaxSizeMb(String),
    MaxWidthOrHeight(String),
    Files(Vec<SourceFile>),
}

impl FormChange {
    /// Maps a raw control event onto a typed change.
    ///
    /// `files` is `Some` when the event came from a file-selection control;
    /// the raw `value` is then ignored.
    pub fn from_input(name: &str, value: &str, files: Option<Vec<SourceFile>>) -> Result<Self> {
        if let Some(files) = files {
            return Ok(FormChange::Files(files));
        }
        match name {
            FIELD_MAX_SIZE_MB => Ok(FormChange::MaxSizeMb(value.to_string())),
            FIELD_MAX_WIDTH_OR_HEIGHT => Ok(FormChange::MaxWidthOrHeight(value.to_string())),
            FIELD_FILE => Ok(FormChange::Files(Vec::new())),
            other => Err(CompressionError::UnknownField(other.to_string())),
        }
    }
}

impl FormState {
    /// Replaces the one field named by `change`.
    pub fn update(&mut self, change: FormChange) {
        match change {
            FormChange::MaxSizeMb(value) => self.max_size_mb = value,
            FormChange::MaxWidthOrHeight(value) => self.max_width_or_height = value,
            FormChange::Files(files) => self.file = files.into_iter().next(),
        }
    }
}

/// Parameters handed to a [`Compressor`](crate::processing::Compressor)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionOptions {
    pub max_size_mb: f64,
    pub max_width_or_height: u32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_width_or_height: DEFAULT_MAX_WIDTH_OR_HEIGHT,
        }
    }
}

impl CompressionOptions {
    pub fn new(max_size_mb: f64, max_width_or_height: u32) -> Result<Self> {
        if !max_size_mb.is_finite() || max_size_mb <= 0.0 {
            return Err(CompressionError::InvalidMaxSize(max_size_mb.to_string()));
        }
        if max_width_or_height < MIN_WIDTH_OR_HEIGHT {
            return Err(CompressionError::InvalidMaxWidthOrHeight(
                max_width_or_height.to_string(),
                MIN_WIDTH_OR_HEIGHT,
            ));
        }
        Ok(Self {
            max_size_mb,
            max_width_or_height,
        })
    }

    /// Coerces the raw form text into validated options.
    pub fn from_form(form: &FormState) -> Result<Self> {
        let raw_size = form.max_size_mb.trim();
        let max_size_mb = raw_size
            .parse::<f64>()
            .map_err(|_| CompressionError::InvalidMaxSize(raw_size.to_string()))?;

        let raw_dim = form.max_width_or_height.trim();
        let max_width_or_height = raw_dim.parse::<u32>().map_err(|_| {
            CompressionError::InvalidMaxWidthOrHeight(raw_dim.to_string(), MIN_WIDTH_OR_HEIGHT)
        })?;

        Self::new(max_size_mb, max_width_or_height)
    }

    pub fn max_size_bytes(&self) -> u64 {
        (self.max_size_mb * BYTES_PER_MB) as u64
    }
}
