//! Video submission and voting.

use pulse_store::{Counter, LedgerStore, StoreError, VideoRecord, WriteBatch};
use pulse_transactions::validation::validate_title;
use pulse_types::{ChallengeId, Principal, VideoId};
use tracing::debug;

use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::leaderboard::credit_vote;
use crate::ledger::PulseLedger;

impl<S: LedgerStore> PulseLedger<S> {
    /// Enter a video into an open challenge. Returns its sequential id.
    ///
    /// The submitter's leaderboard entry is untouched until a vote arrives.
    pub fn submit_video(
        &mut self,
        caller: &Principal,
        title: &str,
        challenge_id: ChallengeId,
    ) -> Result<VideoId, LedgerError> {
        let title = validate_title(&self.params, title)?;
        let challenge = self.require_challenge(challenge_id)?;
        if !challenge.is_open() {
            return Err(LedgerError::ChallengeCompleted(challenge_id));
        }

        let id = VideoId::new(self.store.get_counter(Counter::NextVideoId)?);
        let next = id.next().ok_or(LedgerError::Overflow("video id"))?;

        let mut batch = WriteBatch::new();
        batch.put_video(VideoRecord {
            id,
            challenge_id,
            title,
            submitter: caller.clone(),
            vote_count: 0,
        });
        batch.put_counter(Counter::NextVideoId, next.value());
        self.commit(
            batch,
            &[LedgerEvent::VideoSubmitted {
                video_id: id,
                challenge_id,
                submitter: caller.clone(),
            }],
        )?;

        debug!(%id, %challenge_id, submitter = %caller, "video submitted");
        Ok(id)
    }

    /// Count one vote for a video and credit its submitter.
    ///
    /// Self-votes and repeat votes are accepted.
    pub fn vote_video(&mut self, caller: &Principal, video_id: VideoId) -> Result<(), LedgerError> {
        let mut video = self.require_video(video_id)?;
        let challenge = self
            .store
            .get_challenge(video.challenge_id)?
            .ok_or_else(|| {
                StoreError::Corruption(format!(
                    "{video_id} references missing {}",
                    video.challenge_id
                ))
            })?;
        if !challenge.is_open() {
            return Err(LedgerError::ChallengeCompleted(challenge.id));
        }

        video.vote_count = video
            .vote_count
            .checked_add(1)
            .ok_or(LedgerError::Overflow("vote count"))?;
        let entry = credit_vote(self.entry_or_default(&video.submitter)?)?;

        let submitter = video.submitter.clone();
        let vote_count = video.vote_count;
        let mut batch = WriteBatch::new();
        batch.put_video(video);
        batch.put_leaderboard_entry(submitter.clone(), entry);
        self.commit(
            batch,
            &[LedgerEvent::VoteCast {
                video_id,
                voter: caller.clone(),
                submitter: submitter.clone(),
                vote_count,
            }],
        )?;

        debug!(%video_id, voter = %caller, %submitter, vote_count, "vote cast");
        Ok(())
    }
}
