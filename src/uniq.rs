/// De-duplication run: snapshot, select, close, report

use std::cell::RefCell;

use futures::future;
use log::{debug, info};

use crate::config::UniqConfig;
use crate::error::UniqError;
use crate::guard::{rescue_active, Rescue};
use crate::host::{Host, TabHost};
use crate::operations::{select_survivors, DedupPolicy};
use crate::progress::{notify, report_progress, Progress};
use crate::remover::{BatchRemover, RemovalOrder};
use crate::tab_data::{KeyType, TabSnapshot, WindowId};

/// Parameters of a single run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub key_type: KeyType,
    pub close_pinned: bool,
    pub notification: bool,
    pub batch_size: usize,
    pub order: RemovalOrder,
    pub notification_interval: u32,
}

impl RunOptions {
    pub fn from_config(config: &UniqConfig, key_type: KeyType) -> RunOptions {
        RunOptions {
            key_type,
            close_pinned: config.close_pinned,
            notification: config.notification,
            batch_size: config.batch_size,
            order: config.removal_order,
            notification_interval: config.notification_interval,
        }
    }

    fn policy(&self) -> DedupPolicy {
        DedupPolicy {
            close_pinned: self.close_pinned,
        }
    }
}

/// Close the duplicate tabs of `window_id`
pub async fn run<H: TabHost>(
    host: &H,
    window_id: WindowId,
    options: &RunOptions,
    progress: &RefCell<Progress>,
) -> Result<(), UniqError> {
    let tabs = host
        .query_tabs(window_id)
        .await
        .map_err(|source| UniqError::Query { window_id, source })?;
    let snapshot = TabSnapshot::new(tabs);
    progress.borrow_mut().all = snapshot.len();

    let policy = options.policy();
    let mut selection = select_survivors(&snapshot, options.key_type, policy);
    match rescue_active(&mut selection, policy) {
        Rescue::Swapped { kept, closed } => {
            debug!("Keeping active tab {}, closing tab {} instead", kept, closed)
        }
        Rescue::Refocus => debug!("Active tab has a pinned twin and will be closed"),
        Rescue::NotNeeded => {}
    }

    let ids = selection.removal_ids();
    progress.borrow_mut().target = ids.len();
    debug!(
        "{} of {} tabs are duplicates by {}",
        ids.len(),
        snapshot.len(),
        options.key_type
    );

    BatchRemover::new(options.batch_size, options.order)
        .remove_all(host, &snapshot, &ids, progress)
        .await
}

/// [`run`] wrapped with notifications and error reporting.
///
/// Errors are logged and, when notifications are on, shown to the user
/// before being returned.
pub async fn run_with_status<H: Host>(
    host: &H,
    window_id: WindowId,
    options: &RunOptions,
) -> Result<Progress, UniqError> {
    let progress = RefCell::new(Progress::default());

    let result = if options.notification {
        notify(host, &progress).await;
        progress.borrow_mut().start = Some(host.now_ms());

        let work = async {
            let result = run(host, window_id, options, &progress).await;
            match &result {
                Ok(()) => progress.borrow_mut().end = Some(host.now_ms()),
                Err(err) => progress.borrow_mut().error = Some(err.to_string()),
            }
            notify(host, &progress).await;
            result
        };
        let reporter = report_progress(host, &progress, options.notification_interval);

        future::join(work, reporter).await.0
    } else {
        let result = run(host, window_id, options, &progress).await;
        if result.is_ok() {
            progress.borrow_mut().end = Some(host.now_ms());
        }
        result
    };

    match result {
        Ok(()) => {
            let progress = progress.into_inner();
            info!(
                "Finished: closed {} of {} tabs in window {}",
                progress.done, progress.all, window_id
            );
            Ok(progress)
        }
        Err(err) => {
            err.log();
            Err(err)
        }
    }
}
