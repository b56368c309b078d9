//! Confirmation of a date across consecutive frames.
//!
//! A single OCR frame can misread a digit, so the frame sampler only acts on a
//! date once it has been extracted from several sampled frames in a row.

use serde::Serialize;

use crate::extraction::ResolvedDate;

/// Where the tracker is in confirming a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConfirmState {
    Searching,
    Candidate { date: ResolvedDate, seen: u32 },
    Confirmed { date: ResolvedDate },
}

impl ConfirmState {
    pub fn confirmed(&self) -> Option<ResolvedDate> {
        match self {
            ConfirmState::Confirmed { date } => Some(*date),
            _ => None,
        }
    }
}

/// Small state machine fed with one extraction outcome per sampled frame.
///
/// - A date moves `Searching` to `Candidate` with one sighting.
/// - The same date again increments the count; reaching `required`
///   sightings confirms it.
/// - A different date restarts the candidate.
/// - A frame without a date leaves the state as it is.
/// - `Confirmed` only changes on [`ConfirmationTracker::reset`].
#[derive(Debug, Clone)]
pub struct ConfirmationTracker {
    required: u32,
    state: ConfirmState,
}

impl ConfirmationTracker {
    pub fn new(required: u32) -> Self {
        Self {
            required: required.max(1),
            state: ConfirmState::Searching,
        }
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn observe(&mut self, outcome: Option<ResolvedDate>) -> ConfirmState {
        let Some(date) = outcome else {
            return self.state;
        };

        let seen = match self.state {
            ConfirmState::Confirmed { .. } => return self.state,
            ConfirmState::Candidate { date: current, seen } if current == date => seen + 1,
            _ => 1,
        };

        self.state = if seen >= self.required {
            ConfirmState::Confirmed { date }
        } else {
            ConfirmState::Candidate { date, seen }
        };
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ConfirmState::Searching;
    }
}
