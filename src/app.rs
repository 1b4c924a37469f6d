//! Controller owning the form, the compression status and preview references
//!
//! [`App`] is the root of one form-filling session. Field changes go through
//! [`App::change`], submissions through [`App::submit`], and the current
//! screen is produced by [`App::view`].

use crate::config::{AppConfig, ConcurrencyPolicy};
use crate::error::{CompressionError, Result};
use crate::form::{CompressionOptions, FormChange, FormState};
use crate::preview::{PreviewRegistry, PreviewUrl};
use crate::processing::Compressor;
use crate::source::{CompressedFile, SourceFile};
use crate::status::{Change, CompressionStatus, StatusPatch, StatusStore};
use crate::utils::compressed_filename;
use crate::view::{self, View};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a call to [`App::submit`] ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// No file selected; nothing happened
    NoFile,
    /// Another submission is still running and the policy is single-flight
    Busy,
    Compressed { input_size: u64, output_size: u64 },
    Failed(String),
}

pub struct App {
    config: AppConfig,
    form: FormState,
    input_preview: Option<PreviewUrl>,
    status: Arc<StatusStore>,
    previews: Arc<PreviewRegistry>,
    compressor: Arc<dyn Compressor>,
    in_flight: AtomicUsize,
}

impl App {
    pub fn new(compressor: Arc<dyn Compressor>, config: AppConfig) -> Self {
        let form = FormState {
            max_size_mb: config.max_size_mb.to_string(),
            max_width_or_height: config.max_width_or_height.to_string(),
            file: None,
        };
        Self {
            config,
            form,
            input_preview: None,
            status: Arc::new(StatusStore::new()),
            previews: Arc::new(PreviewRegistry::new()),
            compressor,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> CompressionStatus {
        self.status.snapshot()
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Registers a re-render hook, called after every status merge.
    ///
    /// The hook must not subscribe again from inside the callback.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&CompressionStatus) + Send + Sync + 'static,
    {
        self.status.subscribe(listener);
    }

    /// Applies one control's change to the form.
    ///
    /// Selecting a file also refreshes the live preview of the input.
    pub fn change(&mut self, change: FormChange) {
        let is_file = matches!(change, FormChange::Files(_));
        self.form.update(change);

        if is_file {
            if let Some(old) = self.input_preview.take() {
                self.previews.revoke(&old);
            }
            self.input_preview = self.form.file.as_ref().map(|file| {
                self.previews
                    .create_object_url(file.shared_bytes(), file.mime_type())
            });
            debug!(file = ?self.form.file, "file selection changed");
        }
    }

    pub fn view(&self) -> View {
        view::render(&self.form, &self.status(), self.input_preview.as_ref())
    }

    /// Runs one compression attempt with the current form values.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(input) = self.form.file.clone() else {
            return SubmitOutcome::NoFile;
        };

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);
        if running > 0 && self.config.concurrency == ConcurrencyPolicy::SingleFlight {
            warn!(file = input.name(), "compression already running, submission ignored");
            return SubmitOutcome::Busy;
        }

        let result = match CompressionOptions::from_form(&self.form) {
            Ok(options) => self.run_compressor(input.clone(), options).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(output) => {
                let patch = StatusPatch {
                    filename: Change::Set(input.name().to_string()),
                    output_size: Change::Set(output.size()),
                    output_url: Change::Set(
                        self.previews
                            .create_object_url(output.shared_bytes(), output.mime_type()),
                    ),
                    input_size: Change::Set(input.size()),
                    input_url: Change::Set(
                        self.previews
                            .create_object_url(input.shared_bytes(), input.mime_type()),
                    ),
                    error_message: Some(String::new()),
                    progress: Change::Clear,
                };
                self.merge(patch);
                info!(
                    file = input.name(),
                    input_size = input.size(),
                    output_size = output.size(),
                    "compression finished"
                );
                SubmitOutcome::Compressed {
                    input_size: input.size(),
                    output_size: output.size(),
                }
            }
            Err(e) => {
                let message = e.to_string();
                warn!(file = input.name(), error = %message, "compression failed");
                let mut patch = StatusPatch::error(message.clone());
                if self.config.clear_progress_on_failure {
                    patch = patch.clear_progress();
                }
                self.merge(patch);
                SubmitOutcome::Failed(message)
            }
        }
    }

    async fn run_compressor(
        &self,
        input: SourceFile,
        options: CompressionOptions,
    ) -> Result<CompressedFile> {
        info!(
            file = input.name(),
            max_size_mb = options.max_size_mb,
            max_width_or_height = options.max_width_or_height,
            "compressing"
        );

        let compressor = Arc::clone(&self.compressor);
        let status = Arc::clone(&self.status);

        tokio::task::spawn_blocking(move || {
            compressor.compress(&input, &options, &mut |percent| {
                debug!(percent, "compression progress");
                status.merge(StatusPatch::progress(percent));
            })
        })
        .await
        .map_err(|e| CompressionError::Task(e.to_string()))?
    }

    fn merge(&self, patch: StatusPatch) {
        for url in self.status.merge(patch) {
            self.previews.revoke(&url);
        }
    }

    /// Performs the download action: writes the compressed image into `dir`
    /// under its derived name.
    pub fn download(&self, dir: &Path) -> Result<PathBuf> {
        let status = self.status();
        let url = status.output_url.as_ref().ok_or(CompressionError::NoOutput)?;
        let (bytes, _mime) = self.previews.resolve(url).ok_or(CompressionError::NoOutput)?;

        fs::create_dir_all(dir)?;
        let path = dir.join(compressed_filename(
            status.filename.as_deref().unwrap_or_default(),
        ));
        fs::write(&path, &bytes)?;
        info!(path = %path.display(), size = bytes.len(), "saved compressed image");
        Ok(path)
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    struct Halve;

    impl Compressor for Halve {
        fn compress(
            &self,
            file: &SourceFile,
            _options: &CompressionOptions,
            on_progress: &mut dyn FnMut(f64),
        ) -> Result<CompressedFile> {
            on_progress(50.0);
            Ok(CompressedFile::new(
                file.bytes()[..file.bytes().len() / 2].to_vec(),
                ImageFormat::Png,
            ))
        }
    }

    fn app() -> App {
        App::new(Arc::new(Halve), AppConfig::default())
    }

    #[test]
    fn test_new_uses_config_defaults() {
        let config = AppConfig {
            max_size_mb: 0.5,
            max_width_or_height: 2048,
            ..Default::default()
        };
        let app = App::new(Arc::new(Halve), config);
        assert_eq!(app.form().max_size_mb, "0.5");
        assert_eq!(app.form().max_width_or_height, "2048");
        assert_eq!(app.status(), CompressionStatus::default());
    }

    #[test]
    fn test_file_change_replaces_input_preview() {
        let mut app = app();
        app.change(FormChange::Files(vec![SourceFile::new("a.png", vec![1u8; 8])]));
        let first = app.view().input.selected.unwrap().url.unwrap();

        app.change(FormChange::Files(vec![SourceFile::new("b.png", vec![2u8; 8])]));
        let second = app.view().input.selected.unwrap().url.unwrap();

        assert_ne!(first, second);
        assert!(app.previews().resolve(&first).is_none());
        assert_eq!(app.previews().len(), 1);

        app.change(FormChange::Files(Vec::new()));
        assert!(app.view().input.selected.is_none());
        assert!(app.previews().is_empty());
    }

    #[tokio::test]
    async fn test_resubmit_releases_previous_previews() {
        let mut app = app();
        app.change(FormChange::Files(vec![SourceFile::new("a.png", vec![1u8; 8])]));

        app.submit().await;
        let first = app.status();
        app.submit().await;
        let second = app.status();

        assert_ne!(first.output_url, second.output_url);
        assert!(app.previews().resolve(first.output_url.as_ref().unwrap()).is_none());
        assert!(app.previews().resolve(first.input_url.as_ref().unwrap()).is_none());
        // input preview plus one input/output pair
        assert_eq!(app.previews().len(), 3);
    }

    #[tokio::test]
    async fn test_download_without_output() {
        let app = app();
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(app.download(dir.path()), Err(CompressionError::NoOutput)));
    }

    #[tokio::test]
    async fn test_download_writes_compressed_name() {
        let mut app = app();
        app.change(FormChange::Files(vec![SourceFile::new("photo.png", vec![7u8; 10])]));
        app.submit().await;

        let dir = tempfile::TempDir::new().unwrap();
        let path = app.download(&dir.path().join("out")).unwrap();
        assert_eq!(path.file_name().unwrap(), "photo-compressed.png");
        assert_eq!(fs::read(&path).unwrap(), vec![7u8; 5]);
    }
}
