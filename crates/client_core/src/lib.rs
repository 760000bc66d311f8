use std::{collections::VecDeque, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use shared::{
    domain::Vote,
    protocol::{LeaderboardEntry, VoteRequest},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod state;
pub mod validation;

pub use state::{
    apply, AppState, BannerKind, Effect, FetchStatus, Input, StatusBanner, SubmissionStatus,
    FETCH_FAILED_TEXT, SUBMIT_FAILED_TEXT, VOTE_SUBMITTED_TEXT,
};
pub use validation::{validate_draft, ValidationError, VoteDraft, MAX_SCORE, MIN_SCORE};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Seam to the remote scoring service. The service aggregates and ranks; the
/// client only submits votes and reads back the ordered standings.
#[async_trait]
pub trait ScoreService: Send + Sync {
    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>>;
    async fn submit_vote(&self, vote: &Vote) -> Result<()>;
}

/// HTTP implementation of the scoring contract: one request per call, no
/// retries, no client-side timeout beyond the transport default.
pub struct HttpScoreService {
    http: Client,
    server_url: String,
}

impl HttpScoreService {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }
}

#[async_trait]
impl ScoreService for HttpScoreService {
    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let res = self
            .http
            .get(format!("{}/leaderboard", self.server_url))
            .send()
            .await?
            .error_for_status()?;
        let entries: Vec<LeaderboardEntry> = res.json().await?;
        Ok(entries)
    }

    async fn submit_vote(&self, vote: &Vote) -> Result<()> {
        // Acceptance is the 2xx status alone; the response body is not
        // consumed.
        self.http
            .post(format!("{}/vote", self.server_url))
            .json(&VoteRequest::from(vote))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// State-change notifications for front ends.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    StandingsUpdated(Vec<LeaderboardEntry>),
    SubmissionChanged(SubmissionStatus),
    BannerShown(StatusBanner),
}

/// Drives the vote and leaderboard workflows: feeds inputs through the pure
/// reducer and executes the resulting effects against the scoring service,
/// in order, until none remain. The post-ack leaderboard refresh therefore
/// always starts after the vote acknowledgment has been processed.
pub struct VoteboardClient {
    service: Arc<dyn ScoreService>,
    inner: Mutex<AppState>,
    events: broadcast::Sender<ClientEvent>,
}

impl VoteboardClient {
    pub fn new(service: Arc<dyn ScoreService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            service,
            inner: Mutex::new(AppState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> AppState {
        self.inner.lock().await.clone()
    }

    /// Replaces the draft fields with what the user has typed so far.
    pub async fn edit_draft(&self, draft: VoteDraft) {
        self.dispatch(Input::DraftEdited(draft)).await;
    }

    /// Submits the current draft. Invalid drafts surface a banner without
    /// any network traffic; a submission already in flight makes this a
    /// no-op.
    pub async fn submit(&self) {
        self.dispatch(Input::SubmitPressed).await;
    }

    /// Fetches the standings, replacing the cached rows wholesale on
    /// success. Used on mount and available for manual re-fetch after a
    /// failure.
    pub async fn refresh(&self) {
        self.dispatch(Input::RefreshRequested).await;
    }

    async fn dispatch(&self, input: Input) {
        let mut queue = VecDeque::from([input]);
        while let Some(input) = queue.pop_front() {
            let effects = self.transition(input).await;
            for effect in effects {
                match effect {
                    Effect::SubmitVote(vote) => match self.service.submit_vote(&vote).await {
                        Ok(()) => {
                            info!(participant_id = %vote.participant_id, "vote accepted");
                            queue.push_back(Input::SubmitSucceeded);
                        }
                        Err(err) => {
                            warn!(error = %err, "vote submission failed");
                            queue.push_back(Input::SubmitFailed(SUBMIT_FAILED_TEXT.to_string()));
                        }
                    },
                    Effect::FetchLeaderboard => match self.service.fetch_leaderboard().await {
                        Ok(entries) => {
                            debug!(rows = entries.len(), "leaderboard refreshed");
                            queue.push_back(Input::RefreshSucceeded {
                                entries,
                                fetched_at: Utc::now(),
                            });
                        }
                        Err(err) => {
                            warn!(error = %err, "leaderboard fetch failed");
                            queue.push_back(Input::RefreshFailed(FETCH_FAILED_TEXT.to_string()));
                        }
                    },
                }
            }
        }
    }

    /// Runs one reducer step under the state lock and publishes what
    /// changed. The lock is released before any effect executes, so reading
    /// a snapshot or pressing submit again never waits on the network.
    async fn transition(&self, input: Input) -> Vec<Effect> {
        let mut state = self.inner.lock().await;
        let before = state.clone();
        let effects = state::apply(&mut state, input);

        if state.standings != before.standings {
            let _ = self
                .events
                .send(ClientEvent::StandingsUpdated(state.standings.clone()));
        }
        if state.submission != before.submission {
            let _ = self
                .events
                .send(ClientEvent::SubmissionChanged(state.submission.clone()));
        }
        if state.banner != before.banner {
            if let Some(banner) = &state.banner {
                let _ = self.events.send(ClientEvent::BannerShown(banner.clone()));
            }
        }

        effects
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
