use crate::preview::PreviewUrl;
use std::sync::{Mutex, MutexGuard};

/// Outcome of the most recent compression attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionStatus {
    pub progress: Option<f64>,
    pub filename: Option<String>,
    pub input_size: Option<u64>,
    pub output_size: Option<u64>,
    pub input_url: Option<PreviewUrl>,
    pub output_url: Option<PreviewUrl>,
    pub error_message: String,
}

/// One field of a [`StatusPatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Change<T> {
    Keep,
    Set(T),
    Clear,
}

impl<T> Default for Change<T> {
    fn default() -> Self {
        Change::Keep
    }
}

impl<T> Change<T> {
    fn apply_to(self, slot: &mut Option<T>) -> Option<T> {
        match self {
            Change::Keep => None,
            Change::Set(value) => slot.replace(value),
            Change::Clear => slot.take(),
        }
    }
}

/// A partial update. Fields left at `Keep` are not touched by a merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusPatch {
    pub progress: Change<f64>,
    pub filename: Change<String>,
    pub input_size: Change<u64>,
    pub output_size: Change<u64>,
    pub input_url: Change<PreviewUrl>,
    pub output_url: Change<PreviewUrl>,
    pub error_message: Option<String>,
}

impl StatusPatch {
    pub fn progress(percent: f64) -> Self {
        Self {
            progress: Change::Set(percent),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn clear_progress(mut self) -> Self {
        self.progress = Change::Clear;
        self
    }
}

impl CompressionStatus {
    /// Shallow-merges `patch`, the patch taking precedence.
    ///
    /// Returns the preview references that were displaced, so the caller can
    /// release them.
    pub fn apply(&mut self, patch: StatusPatch) -> Vec<PreviewUrl> {
        patch.progress.apply_to(&mut self.progress);
        patch.filename.apply_to(&mut self.filename);
        patch.input_size.apply_to(&mut self.input_size);
        patch.output_size.apply_to(&mut self.output_size);
        if let Some(message) = patch.error_message {
            self.error_message = message;
        }

        let mut displaced = Vec::new();
        for old in [
            patch.input_url.apply_to(&mut self.input_url),
            patch.output_url.apply_to(&mut self.output_url),
        ]
        .into_iter()
        .flatten()
        {
            if Some(&old) != self.input_url.as_ref() && Some(&old) != self.output_url.as_ref() {
                displaced.push(old);
            }
        }
        displaced
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

type Listener = Box<dyn Fn(&CompressionStatus) + Send + Sync>;

/// Shared status container with change listeners.
#[derive(Default)]
pub struct StatusStore {
    status: Mutex<CompressionStatus>,
    listeners: Mutex<Vec<Listener>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn status(&self) -> MutexGuard<'_, CompressionStatus> {
        self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> CompressionStatus {
        self.status().clone()
    }

    /// Registers a callback run after every merge, in merge order.
    ///
    /// Listeners run with the listener list locked, so they must not call
    /// [`subscribe`](Self::subscribe) or [`merge`](Self::merge) themselves.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&CompressionStatus) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(listener));
    }

    /// Applies `patch` and notifies listeners with the merged status.
    pub fn merge(&self, patch: StatusPatch) -> Vec<PreviewUrl> {
        let mut status = self.status();
        let displaced = status.apply(patch);
        let current = status.clone();

        // Listener list is locked before the status is released, so
        // notifications come out in the same order the merges were applied.
        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        drop(status);
        for listener in listeners.iter() {
            listener(&current);
        }
        displaced
    }
}
