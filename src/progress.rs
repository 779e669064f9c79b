/// Run progress and the periodic status notification

use std::cell::RefCell;

use log::debug;

use crate::error::UniqError;
use crate::host::{Clock, Messages, Notifier};

pub const KEY_NAME: &str = "name";
pub const KEY_CLOSING: &str = "closing";
pub const KEY_PROGRESS: &str = "progress";
pub const KEY_SUCCESS_MESSAGE: &str = "successMessage";
pub const KEY_FAILURE_MESSAGE: &str = "failureMessage";

pub const DEFAULT_NOTIFICATION_INTERVAL: u32 = 10_000;

/// Counters of one run. `done <= target <= all` at all times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    /// Tabs in the snapshot
    pub all: usize,
    /// Tabs scheduled for removal
    pub target: usize,
    /// Tabs removed so far
    pub done: usize,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub error: Option<String>,
}

impl Progress {
    pub fn is_finished(&self) -> bool {
        self.end.is_some() || self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Pending,
    Running { seconds: f64, percentage: usize },
    Succeeded { seconds: f64, all: usize, done: usize },
    Failed { error: String },
}

impl Status {
    pub fn of(progress: &Progress, now: f64) -> Status {
        if let Some(error) = &progress.error {
            return Status::Failed {
                error: error.clone(),
            };
        }
        match (progress.start, progress.end) {
            (Some(start), Some(end)) => Status::Succeeded {
                seconds: (end - start) / 1000.0,
                all: progress.all,
                done: progress.done,
            },
            (Some(start), None) if progress.target > 0 => Status::Running {
                seconds: (now - start) / 1000.0,
                percentage: progress.done * 100 / progress.target,
            },
            _ => Status::Pending,
        }
    }

    pub fn message_key(&self) -> &'static str {
        match self {
            Status::Pending => KEY_CLOSING,
            Status::Running { .. } => KEY_PROGRESS,
            Status::Succeeded { .. } => KEY_SUCCESS_MESSAGE,
            Status::Failed { .. } => KEY_FAILURE_MESSAGE,
        }
    }

    pub fn message_args(&self) -> Vec<String> {
        match self {
            Status::Pending => Vec::new(),
            Status::Running {
                seconds,
                percentage,
            } => vec![seconds.to_string(), percentage.to_string()],
            Status::Succeeded { seconds, all, done } => {
                vec![seconds.to_string(), all.to_string(), done.to_string()]
            }
            Status::Failed { error } => vec![error.clone()],
        }
    }

    pub fn render(&self, messages: &impl Messages) -> String {
        messages.message(self.message_key(), &self.message_args())
    }
}

/// Show the current status. Failures are logged and swallowed.
pub async fn notify<H>(host: &H, progress: &RefCell<Progress>)
where
    H: Notifier + Messages + Clock,
{
    let status = Status::of(&progress.borrow(), host.now_ms());
    let message = status.render(host);
    let id = host.message(KEY_NAME, &[]);

    if let Err(source) = host.show_notification(&id, &id, &message).await {
        UniqError::Notification { source }.log();
    }
}

/// Emit a status every `interval_ms` until the run ends or fails
pub async fn report_progress<H>(host: &H, progress: &RefCell<Progress>, interval_ms: u32)
where
    H: Notifier + Messages + Clock,
{
    loop {
        host.sleep(interval_ms).await;
        if progress.borrow().is_finished() {
            break;
        }
        notify(host, progress).await;
    }
    debug!("Progress reporter stopped");
}
