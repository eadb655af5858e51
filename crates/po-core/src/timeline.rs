//! Status timeline markers for the purchase order detail page.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::StatusHistory;
use crate::enums::PoStatus;

/// Marker for one step of the linear progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepMarker {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub status: PoStatus,
    pub marker: StepMarker,
    /// Last time the order entered this status, if history records it.
    pub reached_at: Option<DateTime<Utc>>,
}

/// What the status timeline should draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Timeline {
    /// Linear progression with one marker per canonical status.
    Progress { steps: Vec<TimelineStep> },
    /// Terminal cancellation marker, replacing the progression.
    #[serde(rename_all = "camelCase")]
    Cancelled {
        last_reached: Option<PoStatus>,
        cancelled_at: Option<DateTime<Utc>>,
    },
}

impl Timeline {
    /// Build the timeline for `current`, taking step times from `history`.
    #[must_use]
    pub fn build(current: PoStatus, history: &StatusHistory) -> Self {
        let Some(current_ordinal) = current.ordinal() else {
            return Self::Cancelled {
                last_reached: history
                    .iter()
                    .rev()
                    .map(|entry| entry.status)
                    .find(|status| *status != PoStatus::Cancelled),
                cancelled_at: history
                    .last_entered(PoStatus::Cancelled)
                    .map(|entry| entry.changed_at),
            };
        };

        let steps = PoStatus::PROGRESSION
            .into_iter()
            .enumerate()
            .map(|(ordinal, status)| TimelineStep {
                status,
                marker: marker_for(ordinal, current_ordinal),
                reached_at: history.last_entered(status).map(|entry| entry.changed_at),
            })
            .collect();

        Self::Progress { steps }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Steps of a progress timeline; empty when cancelled.
    #[must_use]
    pub fn steps(&self) -> &[TimelineStep] {
        match self {
            Self::Progress { steps } => steps,
            Self::Cancelled { .. } => &[],
        }
    }
}

const fn marker_for(ordinal: usize, current: usize) -> StepMarker {
    if ordinal < current {
        StepMarker::Completed
    } else if ordinal == current {
        StepMarker::Current
    } else {
        StepMarker::Upcoming
    }
}
