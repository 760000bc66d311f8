use serde::{Deserialize, Serialize};

use crate::domain::{ParticipantId, Vote, VoterId};

/// Wire form of a vote submission; the scoring service expects camelCase keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub voter_id: VoterId,
    pub participant_id: ParticipantId,
    pub score: i64,
}

impl From<&Vote> for VoteRequest {
    fn from(vote: &Vote) -> Self {
        Self {
            voter_id: vote.voter_id.clone(),
            participant_id: vote.participant_id.clone(),
            score: vote.score,
        }
    }
}

/// One row of the ranked standings, exactly as returned by the scoring
/// service. Rank order is the service's; clients render it as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub participant: String,
    pub score: f64,
}
