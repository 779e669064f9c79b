/// Survivor selection: which duplicate tabs stay open and which are closed

use std::collections::HashMap;

use crate::tab_data::{ComparisonKey, KeyType, TabId, TabSnapshot};

/// How two pinned tabs with the same key are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupPolicy {
    /// When false both pinned tabs survive. When true only the first one does.
    pub close_pinned: bool,
}

/// Survivors and removal candidates of one snapshot.
///
/// Tabs are referred to by their position in the snapshot, so every
/// iteration below is in tab index order.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    snapshot: &'a TabSnapshot,
    key_type: KeyType,
    survivors: HashMap<ComparisonKey<'a>, usize>,
    removals: Vec<usize>,
}

impl<'a> Selection<'a> {
    pub fn snapshot(&self) -> &'a TabSnapshot {
        self.snapshot
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The RemovalSet, in tab index order
    pub fn removal_ids(&self) -> Vec<TabId> {
        self.removals
            .iter()
            .map(|&pos| self.snapshot.tabs()[pos].id)
            .collect()
    }

    pub fn survivor(&self, key: ComparisonKey<'_>) -> Option<TabId> {
        self.survivors
            .get(&key)
            .map(|&pos| self.snapshot.tabs()[pos].id)
    }

    pub(crate) fn survivor_position(&self, key: ComparisonKey<'_>) -> Option<usize> {
        self.survivors.get(&key).copied()
    }

    /// One survivor per key, in tab index order
    pub fn survivor_ids(&self) -> Vec<TabId> {
        let mut positions: Vec<usize> = self.survivors.values().copied().collect();
        positions.sort_unstable();
        positions
            .into_iter()
            .map(|pos| self.snapshot.tabs()[pos].id)
            .collect()
    }

    pub fn is_removed(&self, pos: usize) -> bool {
        self.removals.binary_search(&pos).is_ok()
    }

    /// Make the tab at `removed` the survivor of its key and schedule the
    /// current survivor in its place.
    pub(crate) fn swap_survivor(&mut self, removed: usize) -> Option<usize> {
        let snapshot = self.snapshot;
        let key = self.key_type.key(&snapshot.tabs()[removed]);
        let rival = self.survivors.insert(key, removed)?;
        let slot = self.removals.binary_search(&removed).ok()?;
        self.removals.remove(slot);
        if let Err(slot) = self.removals.binary_search(&rival) {
            self.removals.insert(slot, rival);
        }
        Some(rival)
    }
}

/// Single pass over the snapshot in index order.
///
/// - The first tab seen for a key survives, later unpinned ones are removed.
/// - A later pinned tab takes over from an unpinned survivor, which is removed.
/// - A later pinned tab next to a pinned survivor is kept, unless
///   `close_pinned` is set.
pub fn select_survivors(
    snapshot: &TabSnapshot,
    key_type: KeyType,
    policy: DedupPolicy,
) -> Selection<'_> {
    let tabs = snapshot.tabs();
    let mut survivors: HashMap<ComparisonKey<'_>, usize> = HashMap::with_capacity(tabs.len());
    let mut removals = Vec::new();

    for (pos, tab) in tabs.iter().enumerate() {
        let key = key_type.key(tab);
        let Some(&rival) = survivors.get(&key) else {
            survivors.insert(key, pos);
            continue;
        };

        if !tab.pinned {
            removals.push(pos);
            continue;
        }

        if tabs[rival].pinned {
            if policy.close_pinned {
                removals.push(pos);
            }
            continue;
        }

        // Pinned beats unpinned regardless of order
        survivors.insert(key, pos);
        removals.push(rival);
    }

    removals.sort_unstable();

    Selection {
        snapshot,
        key_type,
        survivors,
        removals,
    }
}
