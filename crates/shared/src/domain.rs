use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(VoterId);
id_newtype!(ParticipantId);

/// A validated vote: ids trimmed and non-empty, score within range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub voter_id: VoterId,
    pub participant_id: ParticipantId,
    pub score: i64,
}
