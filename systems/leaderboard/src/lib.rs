#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure leaderboard aggregation over persisted score records.
//!
//! Every function takes an immutable snapshot of records and computes a
//! derived view from scratch; nothing is cached or mutated, so repeated
//! invocations are idempotent. Ordering is fully deterministic: scores sort
//! descending and ties break toward the earlier timestamp, so the first
//! player to reach a score outranks later arrivals at the same score.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use snake_arcade_core::{Difficulty, PlayerId, ScoreRecord};

/// Derived pairing of a player with their best persisted record.
///
/// Entries are recomputed per aggregation pass and never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Identifier of the ranked player.
    pub player: PlayerId,
    /// Best score record seen for that player.
    pub best: ScoreRecord,
}

/// Descending score order with earlier-timestamp tie-break.
fn ranking_order(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.timestamp_ms.cmp(&b.timestamp_ms))
}

/// Top records within a difficulty bucket.
///
/// Filters the snapshot to the bucket, sorts descending by score with the
/// earlier timestamp ranking higher on ties, and truncates to `limit`.
#[must_use]
pub fn per_difficulty(
    records: &[ScoreRecord],
    difficulty: Difficulty,
    limit: usize,
) -> Vec<ScoreRecord> {
    let mut filtered: Vec<ScoreRecord> = records
        .iter()
        .filter(|record| record.difficulty == difficulty)
        .cloned()
        .collect();
    filtered.sort_by(ranking_order);
    filtered.truncate(limit);
    filtered
}

/// Cross-difficulty leaderboard with one entry per player.
///
/// Sorts the whole snapshot descending, then reduces to each player's first
/// (and therefore highest) record before truncating. Deduplicating ahead of
/// the truncation guarantees a player's single best score competes for a
/// slot, never several of their records.
#[must_use]
pub fn global(records: &[ScoreRecord], limit: usize) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&ScoreRecord> = records.iter().collect();
    sorted.sort_by(|a, b| ranking_order(a, b));

    let mut seen: HashSet<&PlayerId> = HashSet::with_capacity(sorted.len());
    let mut entries = Vec::new();
    for record in sorted {
        if !seen.insert(&record.player) {
            continue;
        }
        entries.push(LeaderboardEntry {
            player: record.player.clone(),
            best: record.clone(),
        });
        if entries.len() == limit {
            break;
        }
    }
    entries
}

/// Dense rank of a player within a difficulty bucket.
///
/// Returns `None` when the player has no record in the bucket. Otherwise the
/// rank is one plus the number of distinct best-score values other players
/// hold strictly above the player's own best: tied bests share a rank, and
/// the next distinct score below them increments the rank by exactly one.
#[must_use]
pub fn rank_of(player: &PlayerId, difficulty: Difficulty, records: &[ScoreRecord]) -> Option<u32> {
    let in_bucket = |record: &&ScoreRecord| record.difficulty == difficulty;

    let own_best = records
        .iter()
        .filter(in_bucket)
        .filter(|record| &record.player == player)
        .map(|record| record.score)
        .max()?;

    // Only each rival's best competes; their lesser records never widen the
    // gap, and rivals sharing a best collapse into one score value.
    let mut best_by_player: HashMap<&PlayerId, u32> = HashMap::new();
    for record in records.iter().filter(in_bucket) {
        if &record.player == player {
            continue;
        }
        let best = best_by_player.entry(&record.player).or_insert(record.score);
        *best = (*best).max(record.score);
    }

    let higher: HashSet<u32> = best_by_player
        .into_values()
        .filter(|score| *score > own_best)
        .collect();
    Some(1 + higher.len() as u32)
}

/// Records persisted for a single player, best first.
#[must_use]
pub fn player_history(player: &PlayerId, records: &[ScoreRecord], limit: usize) -> Vec<ScoreRecord> {
    let mut own: Vec<ScoreRecord> = records
        .iter()
        .filter(|record| &record.player == player)
        .cloned()
        .collect();
    own.sort_by(ranking_order);
    own.truncate(limit);
    own
}
