//! Dashboard view state and its transitions.
//!
//! The whole operator view (both incident collections, the selection, the
//! scrubber time, and which collection is shown) lives in one
//! [`DashboardState`] value. [`update`] consumes a state and an action and
//! returns the next state together with the notice to show, if any. Nothing
//! else mutates the state, so every transition is testable without a UI.

use serde::Serialize;

use crate::timeline::{ScrubUpdate, TimelineEntry};
use crate::types::{DbId, Timestamp};

/// An incident as the dashboard sees it.
pub trait DashboardIncident: TimelineEntry + Clone {
    fn is_resolved(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState<I> {
    pub unresolved: Vec<I>,
    pub resolved: Vec<I>,
    pub selected: Option<DbId>,
    pub current_time: Timestamp,
    pub show_resolved: bool,
}

impl<I: DashboardIncident> DashboardState<I> {
    /// An empty dashboard showing active incidents.
    pub fn new(current_time: Timestamp) -> Self {
        Self {
            unresolved: Vec::new(),
            resolved: Vec::new(),
            selected: None,
            current_time,
            show_resolved: false,
        }
    }

    /// The collection currently listed.
    pub fn visible(&self) -> &[I] {
        if self.show_resolved {
            &self.resolved
        } else {
            &self.unresolved
        }
    }

    pub fn selected_incident(&self) -> Option<&I> {
        self.selected.and_then(|id| self.find(id))
    }

    pub fn find(&self, id: DbId) -> Option<&I> {
        self.unresolved
            .iter()
            .chain(self.resolved.iter())
            .find(|i| i.entry_id() == id)
    }

    /// Every incident, unresolved first, in the order the timeline scans
    /// them when snapping.
    pub fn timeline_incidents(&self) -> Vec<&I> {
        self.unresolved.iter().chain(self.resolved.iter()).collect()
    }
}

/// Why a toggle request did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleFailure {
    /// The server answered with an error status (unknown id, conflict, 5xx).
    Rejected,
    /// The request never produced a response.
    Transient,
}

#[derive(Debug, Clone)]
pub enum DashboardAction<I> {
    Loaded { unresolved: Vec<I>, resolved: Vec<I> },
    ToggleView,
    Select(DbId),
    /// Selection made on the timeline: also moves the scrubber time.
    TimelineSelect(DbId),
    TimeChanged(Timestamp),
    Scrubbed(ScrubUpdate),
    ToggleRequested(DbId),
    ToggleSucceeded(I),
    ToggleFailed(ToggleFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Loading,
    Success,
    Error,
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: &'static str,
}

impl Notice {
    const PROCESSING: Notice = Notice {
        level: NoticeLevel::Loading,
        message: "Processing incident...",
    };
    const RESOLVED: Notice = Notice {
        level: NoticeLevel::Success,
        message: "Incident resolved successfully!",
    };
    const REOPENED: Notice = Notice {
        level: NoticeLevel::Success,
        message: "Incident reopened successfully!",
    };
    const REJECTED: Notice = Notice {
        level: NoticeLevel::Error,
        message: "Failed to update incident. Please try again.",
    };
    const TRANSIENT: Notice = Notice {
        level: NoticeLevel::Error,
        message: "An error occurred. Please try again.",
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition<I> {
    pub state: DashboardState<I>,
    pub notice: Option<Notice>,
}

impl<I> Transition<I> {
    fn quiet(state: DashboardState<I>) -> Self {
        Self { state, notice: None }
    }

    fn with(state: DashboardState<I>, notice: Notice) -> Self {
        Self {
            state,
            notice: Some(notice),
        }
    }
}

/// Apply one action to the dashboard.
pub fn update<I: DashboardIncident>(
    mut state: DashboardState<I>,
    action: DashboardAction<I>,
) -> Transition<I> {
    match action {
        DashboardAction::Loaded {
            unresolved,
            resolved,
        } => {
            state.unresolved = unresolved;
            state.resolved = resolved;
            if !state.show_resolved {
                if let Some(first) = state.unresolved.first() {
                    state.selected = Some(first.entry_id());
                }
            }
            Transition::quiet(state)
        }

        DashboardAction::ToggleView => {
            state.show_resolved = !state.show_resolved;
            state.selected = state.visible().first().map(TimelineEntry::entry_id);
            Transition::quiet(state)
        }

        DashboardAction::Select(id) => {
            if state.find(id).is_some() {
                state.selected = Some(id);
            }
            Transition::quiet(state)
        }

        DashboardAction::TimelineSelect(id) => {
            if let Some(started_at) = state.find(id).map(TimelineEntry::started_at) {
                state.selected = Some(id);
                state.current_time = started_at;
            }
            Transition::quiet(state)
        }

        DashboardAction::TimeChanged(t) => {
            state.current_time = t;
            Transition::quiet(state)
        }

        DashboardAction::Scrubbed(scrub) => {
            if let Some(id) = scrub.selected {
                if state.find(id).is_some() {
                    state.selected = Some(id);
                }
            }
            state.current_time = scrub.time;
            Transition::quiet(state)
        }

        DashboardAction::ToggleRequested(_) => Transition::with(state, Notice::PROCESSING),

        DashboardAction::ToggleSucceeded(incident) => apply_toggle(state, incident),

        DashboardAction::ToggleFailed(failure) => {
            let notice = match failure {
                ToggleFailure::Rejected => Notice::REJECTED,
                ToggleFailure::Transient => Notice::TRANSIENT,
            };
            Transition::with(state, notice)
        }
    }
}

/// Move a toggled incident into the collection its new flag names.
///
/// If the selected incident just left the visible collection, the first
/// remaining visible incident (or nothing) becomes the selection.
fn apply_toggle<I: DashboardIncident>(mut state: DashboardState<I>, incident: I) -> Transition<I> {
    let id = incident.entry_id();
    state.unresolved.retain(|i| i.entry_id() != id);
    state.resolved.retain(|i| i.entry_id() != id);

    let now_resolved = incident.is_resolved();
    let notice = if now_resolved {
        state.resolved.push(incident);
        Notice::RESOLVED
    } else {
        state.unresolved.push(incident);
        Notice::REOPENED
    };

    let left_view = now_resolved != state.show_resolved;
    if state.selected == Some(id) && left_view {
        state.selected = state.visible().first().map(TimelineEntry::entry_id);
    }

    Transition::with(state, notice)
}
