//! Leaderboard arithmetic. Every increment is checked.

use pulse_store::LeaderboardEntry;

use crate::error::LedgerError;

/// One more vote received.
pub(crate) fn credit_vote(entry: LeaderboardEntry) -> Result<LeaderboardEntry, LedgerError> {
    Ok(LeaderboardEntry {
        total_votes_received: entry
            .total_votes_received
            .checked_add(1)
            .ok_or(LedgerError::Overflow("total votes received"))?,
        ..entry
    })
}

/// One more win, and the reward token that comes with it.
pub(crate) fn credit_win(entry: LeaderboardEntry) -> Result<LeaderboardEntry, LedgerError> {
    Ok(LeaderboardEntry {
        challenges_won: entry
            .challenges_won
            .checked_add(1)
            .ok_or(LedgerError::Overflow("challenges won"))?,
        nfts_earned: entry
            .nfts_earned
            .checked_add(1)
            .ok_or(LedgerError::Overflow("nfts earned"))?,
        ..entry
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_credit_leaves_wins_alone() {
        let entry = credit_vote(LeaderboardEntry::default()).unwrap();
        assert_eq!(
            entry,
            LeaderboardEntry {
                total_votes_received: 1,
                challenges_won: 0,
                nfts_earned: 0
            }
        );
    }

    #[test]
    fn win_credit_moves_both_counters() {
        let entry = credit_win(credit_win(LeaderboardEntry::default()).unwrap()).unwrap();
        assert_eq!(entry.challenges_won, 2);
        assert_eq!(entry.nfts_earned, 2);
        assert_eq!(entry.total_votes_received, 0);
    }

    #[test]
    fn saturated_counters_overflow() {
        let full = LeaderboardEntry {
            total_votes_received: u64::MAX,
            challenges_won: 0,
            nfts_earned: u64::MAX,
        };
        assert!(matches!(credit_vote(full), Err(LedgerError::Overflow(_))));
        assert!(matches!(credit_win(full), Err(LedgerError::Overflow("nfts earned"))));
    }
}
