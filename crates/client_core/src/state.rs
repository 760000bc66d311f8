//! Explicit UI state plus a pure transition function, so tests can drive the
//! vote and leaderboard workflows without a rendering environment.

use chrono::{DateTime, Utc};
use shared::{domain::Vote, protocol::LeaderboardEntry};

use crate::validation::{validate_draft, VoteDraft};

pub const VOTE_SUBMITTED_TEXT: &str = "Vote submitted successfully!";
pub const SUBMIT_FAILED_TEXT: &str = "Failed to submit vote";
pub const FETCH_FAILED_TEXT: &str = "Failed to fetch leaderboard";

/// Vote-workflow status. `Submitting` doubles as the gate that keeps at most
/// one submission in flight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Leaderboard-workflow status, independent of the vote workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// The single user-visible status line shown with the vote form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub kind: BannerKind,
    pub text: String,
}

impl StatusBanner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }
}

/// Everything a front end renders: form fields, both workflow statuses, the
/// cached standings and the status banner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub draft: VoteDraft,
    pub submission: SubmissionStatus,
    pub fetch: FetchStatus,
    pub standings: Vec<LeaderboardEntry>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub banner: Option<StatusBanner>,
}

/// One observable occurrence fed through the reducer: a user action or the
/// outcome of a network operation.
#[derive(Debug, Clone)]
pub enum Input {
    DraftEdited(VoteDraft),
    SubmitPressed,
    SubmitSucceeded,
    SubmitFailed(String),
    RefreshRequested,
    RefreshSucceeded {
        entries: Vec<LeaderboardEntry>,
        fetched_at: DateTime<Utc>,
    },
    RefreshFailed(String),
}

/// Network work the driver must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubmitVote(Vote),
    FetchLeaderboard,
}

/// Applies one input to the state and returns the effects it demands. Pure
/// apart from the `state` mutation; no suspension points.
pub fn apply(state: &mut AppState, input: Input) -> Vec<Effect> {
    match input {
        Input::DraftEdited(draft) => {
            state.draft = draft;
            Vec::new()
        }
        Input::SubmitPressed => {
            // At most one submission in flight; a repeat press is a no-op.
            if state.submission == SubmissionStatus::Submitting {
                return Vec::new();
            }
            match validate_draft(&state.draft) {
                Ok(vote) => {
                    state.submission = SubmissionStatus::Submitting;
                    state.banner = None;
                    vec![Effect::SubmitVote(vote)]
                }
                Err(reason) => {
                    // Rejections never reach the network and leave the
                    // workflow status where it was.
                    state.banner = Some(StatusBanner::error(reason.to_string()));
                    Vec::new()
                }
            }
        }
        Input::SubmitSucceeded => {
            state.submission = SubmissionStatus::Succeeded;
            state.draft = VoteDraft::default();
            state.banner = Some(StatusBanner::success(VOTE_SUBMITTED_TEXT));
            apply(state, Input::RefreshRequested)
        }
        Input::SubmitFailed(message) => {
            // Draft stays on screen so the user can correct and retry.
            state.banner = Some(StatusBanner::error(message.clone()));
            state.submission = SubmissionStatus::Failed(message);
            Vec::new()
        }
        Input::RefreshRequested => {
            state.fetch = FetchStatus::Loading;
            vec![Effect::FetchLeaderboard]
        }
        Input::RefreshSucceeded {
            entries,
            fetched_at,
        } => {
            // Wholesale replacement in response order; never merged, never
            // re-sorted.
            state.standings = entries;
            state.fetched_at = Some(fetched_at);
            state.fetch = FetchStatus::Loaded;
            Vec::new()
        }
        Input::RefreshFailed(message) => {
            // Previously loaded rows stay visible; only the status and
            // banner record the failure.
            state.banner = Some(StatusBanner::error(message.clone()));
            state.fetch = FetchStatus::Failed(message);
            Vec::new()
        }
    }
}
