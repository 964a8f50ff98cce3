use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// Type alias for user identifiers in the leaderboard feeds
pub type UserId = u32;
/// Type alias for race identifiers in the race statistics feed
pub type RaceId = u32;

/// Identity and profile fields for a user as supplied by the
/// upstream profile feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// The ID of the user this profile is for
    pub user_id: UserId,
    /// Display name shown on the podium
    pub username: Box<str>,
    /// Two letter country code, unset profiles render the globe
    #[serde(default)]
    pub country_code: Option<Box<str>>,
}

/// Per-user race statistics as supplied by the upstream stats feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceStats {
    /// The ID of the user these statistics are for
    pub user_id: UserId,
    /// The races the user entered
    #[serde(default)]
    pub races: Vec<RaceId>,
    /// Completed race count once the upstream has finished scoring
    #[serde(default)]
    pub races_completed: Option<u32>,
}

/// A leaderboard record combining a user's identity and profile
/// fields with race statistics for display ranking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedEntry {
    /// The ID of the user this entry is for
    pub user_id: UserId,
    /// The profile merged into this entry
    pub user: UserProfile,
    /// The races the user entered
    pub races: Vec<RaceId>,
    /// Completed race count when present in the stats feed
    pub races_completed: Option<u32>,
    /// The ranking of this entry (Position in the leaderboard)
    pub rank: usize,
}

impl MergedEntry {
    /// Win count shown next to the entry. Falls back to the number
    /// of races entered while the upstream has no completed count.
    pub fn wins(&self) -> u32 {
        self.races_completed.unwrap_or(self.races.len() as u32)
    }
}

/// Structure for a group of leaderboard entries ranked based on
/// their win counts. The expires time indicates when the group will
/// no longer be considered valid.
pub struct LeaderboardGroup {
    /// The values stored in this entity group
    pub values: Box<[MergedEntry]>,
    /// The time at which this entity group will become expired
    pub expires: SystemTime,
}

impl LeaderboardGroup {
    /// Leaderboard contents are cached for 1 hour
    const LIFETIME: Duration = Duration::from_secs(60 * 60);

    /// Creates a new leaderboard group which has an expiry time set
    /// to the LIFETIME and uses the provided values
    pub fn new(values: Box<[MergedEntry]>) -> Self {
        let expires = SystemTime::now() + Self::LIFETIME;
        Self { expires, values }
    }

    /// Creates a dummy leaderboard group which has no values and
    /// is already considered to be expired
    pub fn dummy() -> Self {
        Self {
            expires: SystemTime::UNIX_EPOCH,
            values: Box::new([]),
        }
    }

    /// Checks whether this group is expired
    pub fn is_expired(&self) -> bool {
        let now = SystemTime::now();
        now.ge(&self.expires)
    }

    /// Gets a collection of leaderboard entries at the start offset of
    /// the provided count. Returns the slice of entries as well as
    /// whether there are more entries after the requested window, or
    /// None when the offset is outside the leaderboard entirely.
    pub fn get_normal(&self, start: usize, count: usize) -> Option<(&[MergedEntry], bool)> {
        let length = self.values.len();
        let end_index = (start + count).min(length);
        let more = end_index < length;
        self.values
            .get(start..end_index)
            .map(|entries| (entries, more))
    }

    /// Gets a leaderboard entry for the provided user ID if one is present
    pub fn get_entry(&self, user_id: UserId) -> Option<&MergedEntry> {
        self.values.iter().find(|value| value.user_id == user_id)
    }
}

/// Number of top podium slots
pub const PODIUM_SLOTS: usize = 3;
/// Number of runner-up rows below the podium (positions 4 through 11)
pub const RUNNER_UP_SLOTS: usize = 8;

/// Fixed-size display slots sliced from a ranked entry list. Always
/// exactly 3 top slots and 8 runner-up slots regardless of how many
/// entries exist; missing slots are None and render placeholders.
pub struct Podium<'a> {
    /// The top three entries in rank order
    top: [Option<&'a MergedEntry>; PODIUM_SLOTS],
    /// Entries ranked 4 through 11, padded out with None
    runner_ups: [Option<&'a MergedEntry>; RUNNER_UP_SLOTS],
}

impl<'a> Podium<'a> {
    /// Slices the ranked entries into display slots. Entries past the
    /// eleventh are not shown.
    pub fn new(entries: &'a [MergedEntry]) -> Podium<'a> {
        let mut top = [None; PODIUM_SLOTS];
        for (slot, entry) in top.iter_mut().zip(entries.iter()) {
            *slot = Some(entry);
        }

        let mut runner_ups = [None; RUNNER_UP_SLOTS];
        for (slot, entry) in runner_ups
            .iter_mut()
            .zip(entries.iter().skip(PODIUM_SLOTS))
        {
            *slot = Some(entry);
        }

        Podium { top, runner_ups }
    }

    /// The top row in display order: second place, first place, third
    /// place, each slot paired with its position number
    pub fn display_order(&self) -> [(usize, Option<&'a MergedEntry>); PODIUM_SLOTS] {
        let [first, second, third] = self.top;
        [(2, second), (1, first), (3, third)]
    }

    /// Runner-up rows paired with their positions (4 through 11)
    pub fn runner_ups(&self) -> impl Iterator<Item = (usize, Option<&'a MergedEntry>)> + '_ {
        self.runner_ups
            .iter()
            .enumerate()
            .map(|(index, entry)| (index + PODIUM_SLOTS + 1, *entry))
    }
}

/// Picks the shield icon asset for a position. Positions outside the
/// podium use the winner shield (the runner-up rows all carry it).
pub fn shield_icon(position: usize) -> &'static str {
    match position {
        2 => "/assets/silver.svg",
        3 => "/assets/bronze.svg",
        _ => "/assets/winner.svg",
    }
}
