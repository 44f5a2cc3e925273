use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{CsvFile, TransactionApi, load::lock};

/// Shown when the backend did not accept an upload.
pub const UPLOAD_ERROR_MESSAGE: &str = "Failed to upload CSV";

/// Where the upload form is in its cycle.
///
/// ```text
/// Idle -> Uploading -> Succeeded -> (after the reset delay) Idle
///                   -> Failed -> (next upload) Uploading
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadStatus {
    /// Waiting for a file.
    #[default]
    Idle,
    /// The file is being sent to the backend.
    Uploading {
        /// The name of the file being uploaded.
        file_name: String,
    },
    /// The backend accepted the file. The form stays disabled until the reset
    /// delay has passed.
    Succeeded {
        /// The name of the uploaded file.
        file_name: String,
        /// The number of transactions the backend created.
        created: usize,
    },
    /// The backend did not accept the file.
    Failed,
}

impl UploadStatus {
    /// Whether the form accepts a new file.
    pub fn is_enabled(&self) -> bool {
        matches!(self, UploadStatus::Idle | UploadStatus::Failed)
    }

    /// The error message to show, if any.
    pub fn error(&self) -> Option<&'static str> {
        match self {
            UploadStatus::Failed => Some(UPLOAD_ERROR_MESSAGE),
            _ => None,
        }
    }

    /// The name of the file shown next to the file input, if any.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            UploadStatus::Uploading { file_name } | UploadStatus::Succeeded { file_name, .. } => {
                Some(file_name.as_str())
            }
            UploadStatus::Idle | UploadStatus::Failed => None,
        }
    }
}

/// What happened to a call to [UploadController::upload].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No file was given, nothing happened.
    NoFile,
    /// Another upload has not finished its cycle, nothing happened.
    Busy,
    /// The backend created `created` transactions from the file.
    Uploaded {
        /// The number of transactions created.
        created: usize,
    },
    /// The backend did not accept the file.
    Failed,
}

#[derive(Debug, Default)]
struct UploadState {
    status: UploadStatus,
    cycle: u64,
}

/// Runs the upload cycle for the CSV upload form.
///
/// At most one upload is in flight at any time.
pub struct UploadController<A> {
    api: Arc<A>,
    state: Arc<Mutex<UploadState>>,
    reset_after: Duration,
}

impl<A> Clone for UploadController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            reset_after: self.reset_after,
        }
    }
}

impl<A: TransactionApi> UploadController<A> {
    /// Create a controller whose form re-enables `reset_after` a successful upload.
    pub fn new(api: Arc<A>, reset_after: Duration) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(UploadState::default())),
            reset_after,
        }
    }

    /// Upload `file` to the backend.
    ///
    /// Does nothing if `file` is `None` or the form is disabled. Failures are
    /// recorded in the status and reported as [UploadOutcome::Failed].
    ///
    /// Must be called from within a tokio runtime: a successful upload spawns
    /// the task that resets the form.
    pub async fn upload(&self, file: Option<CsvFile>) -> UploadOutcome {
        let Some(file) = file else {
            tracing::debug!("No file selected, ignoring upload");
            return UploadOutcome::NoFile;
        };

        let cycle = {
            let mut state = lock(&self.state);

            if !state.status.is_enabled() {
                tracing::warn!(
                    "Ignoring upload of {} while another upload is in progress",
                    file.file_name
                );
                return UploadOutcome::Busy;
            }

            state.cycle += 1;
            state.status = UploadStatus::Uploading {
                file_name: file.file_name.clone(),
            };
            state.cycle
        };

        let cycle_guard = CycleGuard {
            state: Arc::clone(&self.state),
            cycle,
            armed: true,
        };

        let file_name = file.file_name.clone();
        tracing::info!("Uploading {file_name}");

        let result = self.api.upload_csv(file).await;
        cycle_guard.disarm();

        match result {
            Ok(result) => {
                let created = result.created_count();
                tracing::info!("Uploaded {file_name}: {created} transactions created");

                lock(&self.state).status = UploadStatus::Succeeded { file_name, created };
                self.schedule_reset(cycle);

                UploadOutcome::Uploaded { created }
            }
            Err(error) => {
                tracing::error!("Could not upload {file_name}: {error}");
                lock(&self.state).status = UploadStatus::Failed;

                UploadOutcome::Failed
            }
        }
    }

    fn schedule_reset(&self, cycle: u64) {
        let state = Arc::clone(&self.state);
        let reset_after = self.reset_after;

        tokio::spawn(async move {
            tokio::time::sleep(reset_after).await;

            let mut state = lock(&state);
            if state.cycle == cycle && matches!(state.status, UploadStatus::Succeeded { .. }) {
                state.status = UploadStatus::Idle;
                tracing::debug!("Upload form reset");
            }
        });
    }

    /// The current status.
    pub fn status(&self) -> UploadStatus {
        lock(&self.state).status.clone()
    }

    /// The delay after a successful upload before the form re-enables.
    pub fn reset_after(&self) -> Duration {
        self.reset_after
    }
}

/// Reopens the form if an upload is dropped before the backend answers.
struct CycleGuard {
    state: Arc<Mutex<UploadState>>,
    cycle: u64,
    armed: bool,
}

impl CycleGuard {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut state = lock(&self.state);
        if state.cycle == self.cycle && matches!(state.status, UploadStatus::Uploading { .. }) {
            tracing::warn!("Upload cancelled before the backend answered");
            state.status = UploadStatus::Idle;
        }
    }
}
