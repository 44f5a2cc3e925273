use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::load::lock;

/// A transient success message shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The text to display.
    pub message: String,
}

impl Notice {
    /// The notice shown after the backend created `created` transactions from an upload.
    pub fn uploaded(created: usize) -> Self {
        Self {
            message: format!("{created} transactions uploaded successfully"),
        }
    }
}

#[derive(Debug, Default)]
struct NoticeSlot {
    notice: Option<Notice>,
    generation: u64,
}

/// Holds the dashboard notice and clears it once its time is up.
#[derive(Debug, Clone, Default)]
pub(crate) struct NoticeBoard {
    slot: Arc<Mutex<NoticeSlot>>,
}

impl NoticeBoard {
    /// Show `notice` for `duration`, replacing any notice already shown.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn show(&self, notice: Notice, duration: Duration) {
        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.notice = Some(notice);
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;

            let mut slot = lock(&slot);
            // A newer notice restarts the clock.
            if slot.generation == generation {
                slot.notice = None;
            }
        });
    }

    /// The notice currently shown, if any.
    pub(crate) fn current(&self) -> Option<Notice> {
        lock(&self.slot).notice.clone()
    }
}
