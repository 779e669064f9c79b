/// Closing scheduled tabs in small batches

use std::cell::RefCell;
use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::UniqError;
use crate::guard::{plan_refocus, Refocus};
use crate::host::TabHost;
use crate::progress::Progress;
use crate::tab_data::{TabId, TabSnapshot};

/// Faster than one by one, but larger batches freeze the browser
pub const DEFAULT_BATCH_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalOrder {
    /// Lowest index first
    #[default]
    Forward,
    /// Highest index first
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRemover {
    batch_size: usize,
    order: RemovalOrder,
}

impl Default for BatchRemover {
    fn default() -> Self {
        BatchRemover::new(DEFAULT_BATCH_SIZE, RemovalOrder::Forward)
    }
}

impl BatchRemover {
    pub fn new(batch_size: usize, order: RemovalOrder) -> BatchRemover {
        BatchRemover {
            batch_size: batch_size.max(1),
            order,
        }
    }

    pub fn batches(&self, ids: &[TabId]) -> Vec<Vec<TabId>> {
        let mut ordered = ids.to_vec();
        if self.order == RemovalOrder::Reverse {
            ordered.reverse();
        }
        ordered
            .chunks(self.batch_size)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    /// Close `ids` batch by batch, advancing `progress.done`.
    ///
    /// Before the batch holding the active tab is sent, focus is moved to a
    /// tab that stays open. The first failing batch stops the run; batches
    /// already closed stay closed.
    pub async fn remove_all<H: TabHost>(
        &self,
        host: &H,
        snapshot: &TabSnapshot,
        ids: &[TabId],
        progress: &RefCell<Progress>,
    ) -> Result<(), UniqError> {
        let scheduled: HashSet<TabId> = ids.iter().copied().collect();
        let mut active = snapshot
            .active()
            .map(|tab| tab.id)
            .filter(|id| scheduled.contains(id));

        for batch in self.batches(ids) {
            if let Some(active_id) = active.filter(|id| batch.contains(id)) {
                refocus(host, snapshot, active_id, &scheduled).await;
                active = None;
            }

            host.remove_tabs(&batch)
                .await
                .map_err(|source| UniqError::Removal {
                    ids: batch.clone(),
                    source,
                })?;

            let mut progress = progress.borrow_mut();
            progress.done += batch.len();
            debug!("Removed {}/{} tabs", progress.done, progress.target);
        }

        Ok(())
    }
}

async fn refocus<H: TabHost>(
    host: &H,
    snapshot: &TabSnapshot,
    active: TabId,
    scheduled: &HashSet<TabId>,
) {
    match plan_refocus(snapshot, active, scheduled) {
        Refocus::Activate(target) => match host.activate_tab(target).await {
            Ok(()) => debug!("Moved focus from tab {} to tab {}", active, target),
            Err(source) => UniqError::Refocus {
                tab_id: target,
                source,
            }
            .log(),
        },
        Refocus::Automatic => debug!("Browser moves focus from tab {} by itself", active),
        Refocus::OnlyTab => debug!("No tab left to focus instead of tab {}", active),
    }
}
