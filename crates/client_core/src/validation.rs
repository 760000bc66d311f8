use shared::domain::{ParticipantId, Vote, VoterId};
use thiserror::Error;

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 100;

/// In-progress form fields, exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteDraft {
    pub voter_id: String,
    pub participant_id: String,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An id is blank after trimming, or the score field does not parse as
    /// an integer (an unparsed numeric field behaves as absent).
    #[error("Please enter all fields")]
    MissingFields,
    #[error("Score must be between 1 and 100")]
    ScoreOutOfRange,
}

/// Checks a draft before any network traffic. Rules run in order and the
/// first failure wins. On success returns the vote with trimmed ids.
pub fn validate_draft(draft: &VoteDraft) -> Result<Vote, ValidationError> {
    let voter_id = draft.voter_id.trim();
    if voter_id.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let participant_id = draft.participant_id.trim();
    if participant_id.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let score: i64 = draft
        .score
        .trim()
        .parse()
        .map_err(|_| ValidationError::MissingFields)?;
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ValidationError::ScoreOutOfRange);
    }

    Ok(Vote {
        voter_id: VoterId(voter_id.to_string()),
        participant_id: ParticipantId(participant_id.to_string()),
        score,
    })
}
