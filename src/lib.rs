pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod logger;
pub mod preview;
pub mod processing;
pub mod source;
pub mod status;
pub mod utils;
pub mod view;

pub use app::{App, SubmitOutcome};
pub use config::{AppConfig, ConcurrencyPolicy};
pub use error::{CompressionError, Result};
pub use form::{CompressionOptions, FormChange, FormState};
pub use preview::{PreviewRegistry, PreviewUrl};
pub use processing::{Compressor, ImageCompressor};
pub use source::{CompressedFile, SourceFile};
pub use status::{Change, CompressionStatus, StatusPatch, StatusStore};
pub use utils::{compressed_filename, print_data_size};
pub use view::{render, View};
