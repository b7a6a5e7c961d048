//! Video submission and voting calls.

use pulse_types::{ChallengeId, VideoId};
use serde::{Deserialize, Serialize};

/// Submit a video to an open challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitVideoCall {
    pub title: String,
    pub challenge_id: ChallengeId,
}

/// Cast one vote for a video.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteVideoCall {
    pub video_id: VideoId,
}
