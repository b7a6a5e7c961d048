//! Video registry storage.

use crate::StoreError;
use pulse_types::{BoundedText, ChallengeId, Principal, VideoId};
use serde::{Deserialize, Serialize};

/// A video submitted to a challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: VideoId,
    pub challenge_id: ChallengeId,
    pub title: BoundedText,
    pub submitter: Principal,
    /// Only field that changes after submission.
    pub vote_count: u64,
}

/// Trait for video registry reads.
pub trait VideoStore {
    fn get_video(&self, id: VideoId) -> Result<Option<VideoRecord>, StoreError>;

    /// All videos in id order.
    fn iter_videos(&self) -> Result<Vec<VideoRecord>, StoreError>;
}
