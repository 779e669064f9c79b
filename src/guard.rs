/// Protection of the focused tab while duplicates are being closed

use std::collections::HashSet;

use crate::operations::{DedupPolicy, Selection};
use crate::tab_data::{TabId, TabSnapshot};

/// What happened to the active tab before removal started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rescue {
    /// No active tab, or it was not a removal candidate
    NotNeeded,
    /// The active tab now survives and its former rival is closed instead
    Swapped { kept: TabId, closed: TabId },
    /// The rival is a protected pinned tab; the active tab will be closed
    /// and focus has to move first
    Refocus,
}

/// Swap survivorship when the focused tab would otherwise be closed and
/// its rival may be closed in its place: the rival is unpinned, or both are
/// pinned and `close_pinned` is set. A pinned rival always beats an unpinned
/// active tab.
pub fn rescue_active(selection: &mut Selection<'_>, policy: DedupPolicy) -> Rescue {
    let snapshot = selection.snapshot();
    let Some(active_pos) = snapshot.active_position() else {
        return Rescue::NotNeeded;
    };
    if !selection.is_removed(active_pos) {
        return Rescue::NotNeeded;
    }

    let active = &snapshot.tabs()[active_pos];
    let key = selection.key_type().key(active);
    let Some(rival_pos) = selection.survivor_position(key) else {
        return Rescue::Refocus;
    };
    let rival = &snapshot.tabs()[rival_pos];
    if rival.pinned && !(active.pinned && policy.close_pinned) {
        return Rescue::Refocus;
    }

    match selection.swap_survivor(active_pos) {
        Some(rival_pos) => Rescue::Swapped {
            kept: active.id,
            closed: snapshot.tabs()[rival_pos].id,
        },
        None => Rescue::Refocus,
    }
}

/// Where focus goes before the active tab is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refocus {
    Activate(TabId),
    /// The browser will focus the replacement by itself
    Automatic,
    /// Every other tab is scheduled too
    OnlyTab,
}

/// Prefer the nearest kept tab after the active one, then the nearest kept
/// tab before it, then the last tab of the window.
pub fn plan_refocus(
    snapshot: &TabSnapshot,
    active: TabId,
    scheduled: &HashSet<TabId>,
) -> Refocus {
    let tabs = snapshot.tabs();
    let Some(active_pos) = snapshot.position_of(active) else {
        return Refocus::Automatic;
    };
    let kept = |pos: &usize| !scheduled.contains(&tabs[*pos].id);

    let target = (active_pos + 1..tabs.len())
        .find(kept)
        .or_else(|| (0..active_pos).rev().find(kept))
        .unwrap_or(tabs.len() - 1);

    if target == active_pos {
        return Refocus::OnlyTab;
    }

    // Closing a tab focuses its right neighbour, or the left one at the end
    let is_last = active_pos + 1 == tabs.len();
    if target == active_pos + 1 || (is_last && target + 1 == active_pos) {
        return Refocus::Automatic;
    }

    Refocus::Activate(tabs[target].id)
}
