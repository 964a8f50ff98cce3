//! Module for leaderboard related logic

use self::models::*;
use super::retriever::Retriever;
use log::error;
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

pub mod models;

/// Service producing the ranked leaderboard the podium and the JSON
/// API render. The computed group is cached until it expires.
pub struct Leaderboard {
    /// The cached leaderboard contents
    group: Mutex<Arc<LeaderboardGroup>>,
    /// Client for the upstream feeds, absent when no upstream
    /// is configured
    retriever: Option<Retriever>,
}

impl Leaderboard {
    pub fn new(retriever: Option<Retriever>) -> Self {
        Self {
            group: Mutex::new(Arc::new(LeaderboardGroup::dummy())),
            retriever,
        }
    }

    /// Creates a leaderboard with a pre-computed group, used to seed
    /// route tests without an upstream
    #[cfg(test)]
    pub fn with_entries(values: Box<[MergedEntry]>) -> Self {
        Self {
            group: Mutex::new(Arc::new(LeaderboardGroup::new(values))),
            retriever: None,
        }
    }

    /// Obtains the current leaderboard group, recomputing it when the
    /// cached group has expired. Recomputation happens outside the
    /// lock; concurrent recomputes are last-writer-wins.
    pub async fn query(&self) -> Arc<LeaderboardGroup> {
        {
            let group = self.group.lock();
            if !group.is_expired() {
                return group.clone();
            }
        }

        let values = self.compute().await;
        let group = Arc::new(LeaderboardGroup::new(values));
        *self.group.lock() = group.clone();
        group
    }

    /// Computes the ranked entries by merging the upstream profile and
    /// race statistic feeds. Upstream failures degrade to an empty
    /// leaderboard so the podium renders placeholders.
    async fn compute(&self) -> Box<[MergedEntry]> {
        let retriever = match &self.retriever {
            Some(value) => value,
            None => return Box::new([]),
        };

        let profiles = match retriever.profiles().await {
            Ok(value) => value,
            Err(err) => {
                error!("Unable to load leaderboard profiles: {err:?}");
                return Box::new([]);
            }
        };

        let races = match retriever.races().await {
            Ok(value) => value,
            Err(err) => {
                error!("Unable to load leaderboard race stats: {err:?}");
                return Box::new([]);
            }
        };

        merge_entries(profiles, races)
    }
}

/// Joins the profile and race statistic feeds on user ID, sorts the
/// merged entries by win count descending and assigns ranks starting
/// at 1. Ties are broken by username so recomputed boards keep a
/// stable order. Profiles without statistics rank last with no races.
fn merge_entries(profiles: Vec<UserProfile>, races: Vec<RaceStats>) -> Box<[MergedEntry]> {
    let mut stats: HashMap<UserId, RaceStats> = races
        .into_iter()
        .map(|value| (value.user_id, value))
        .collect();

    let mut values: Vec<MergedEntry> = profiles
        .into_iter()
        .map(|profile| {
            let (races, races_completed) = match stats.remove(&profile.user_id) {
                Some(stats) => (stats.races, stats.races_completed),
                None => (Vec::new(), None),
            };

            MergedEntry {
                user_id: profile.user_id,
                user: profile,
                races,
                races_completed,
                // Rank is not computed yet at this stage
                rank: 0,
            }
        })
        .collect();

    values.sort_by(|a, b| {
        b.wins()
            .cmp(&a.wins())
            .then_with(|| a.user.username.cmp(&b.user.username))
    });

    // Apply the new rank order to the rank values
    let mut rank = 1;
    for value in &mut values {
        value.rank = rank;
        rank += 1;
    }

    values.into_boxed_slice()
}

#[cfg(test)]
mod test {
    use super::{merge_entries, models::*, Leaderboard};

    fn profile(user_id: UserId, username: &str) -> UserProfile {
        UserProfile {
            user_id,
            username: Box::from(username),
            country_code: Some(Box::from("us")),
        }
    }

    fn stats(user_id: UserId, races: u32, races_completed: Option<u32>) -> RaceStats {
        RaceStats {
            user_id,
            races: (0..races).collect(),
            races_completed,
        }
    }

    #[test]
    fn test_merge_sorts_and_ranks() {
        let profiles = vec![profile(1, "amber"), profile(2, "buggy"), profile(3, "crash")];
        let races = vec![
            stats(1, 4, Some(2)),
            stats(2, 3, None),
            stats(3, 10, Some(9)),
        ];

        let merged = merge_entries(profiles, races);

        // Sorted by wins descending with ranks assigned from 1
        let order: Vec<(UserId, usize, u32)> = merged
            .iter()
            .map(|entry| (entry.user_id, entry.rank, entry.wins()))
            .collect();
        assert_eq!(order, vec![(3, 1, 9), (2, 2, 3), (1, 3, 2)]);
    }

    #[test]
    fn test_merge_missing_stats() {
        let profiles = vec![profile(1, "amber"), profile(2, "buggy")];
        let races = vec![stats(1, 2, None)];

        let merged = merge_entries(profiles, races);

        // The profile without statistics ranks last with no races
        let last = merged.last().expect("Missing merged entry");
        assert_eq!(last.user_id, 2);
        assert_eq!(last.rank, 2);
        assert!(last.races.is_empty());
        assert_eq!(last.wins(), 0);
    }

    #[test]
    fn test_merge_tie_break() {
        let profiles = vec![profile(2, "buggy"), profile(1, "amber")];
        let races = vec![stats(1, 5, None), stats(2, 5, None)];

        let merged = merge_entries(profiles, races);

        // Equal win counts fall back to username order
        assert_eq!(merged[0].user.username.as_ref(), "amber");
        assert_eq!(merged[1].user.username.as_ref(), "buggy");
    }

    #[tokio::test]
    async fn test_query_without_upstream() {
        // No retriever configured degrades to an empty group
        let leaderboard = Leaderboard::new(None);
        let group = leaderboard.query().await;
        assert!(group.values.is_empty());
    }
}
