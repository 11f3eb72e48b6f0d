//! Dashboard statistics computed over the full record set.
//!
//! A single O(n) pass over the records produces totals, grouped counts, and
//! the most recent submissions. Group orderings are deterministic: counts
//! descend, ties break alphabetically.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::officer::{OfficerRecord, Rank, RecordStatus, ServiceNumber};

/// How many recent submissions the snapshot carries.
pub const RECENT_SUBMISSION_COUNT: usize = 10;

/// A grouped count, e.g. officers per rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount {
    /// Group key (rank title or command name).
    pub key: String,
    /// Number of records in the group.
    pub count: u64,
}

/// Summary line for one recent submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmission {
    /// Record identifier.
    pub id: Uuid,
    /// Service number.
    pub service_number: ServiceNumber,
    /// Display name, "SURNAME FIRST MIDDLE".
    pub full_name: String,
    /// Rank at submission.
    pub rank: Rank,
    /// Command at submission.
    pub command: String,
    /// When the submission was accepted.
    pub submitted_at: DateTime<Utc>,
}

/// Aggregated dashboard statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    /// Total number of records.
    pub total_officers: u64,
    /// Records still pending review.
    pub pending_approvals: u64,
    /// Records approved so far.
    pub approved_officers: u64,
    /// Officers per rank, descending by count.
    pub officers_by_rank: Vec<GroupCount>,
    /// Officers per command, descending by count.
    pub officers_by_command: Vec<GroupCount>,
    /// The most recent submissions, newest first.
    pub recent_submissions: Vec<RecentSubmission>,
}

impl StatisticsSnapshot {
    /// Aggregate the full record set in one pass.
    pub fn from_records(records: &[OfficerRecord]) -> Self {
        let mut pending = 0_u64;
        let mut approved = 0_u64;
        let mut by_rank: BTreeMap<String, u64> = BTreeMap::new();
        let mut by_command: BTreeMap<String, u64> = BTreeMap::new();
        // Bounded insertion sort keeps the recent list without sorting the
        // whole record set.
        let mut recent: Vec<&OfficerRecord> = Vec::with_capacity(RECENT_SUBMISSION_COUNT + 1);

        for record in records {
            match record.status {
                RecordStatus::Pending => pending += 1,
                RecordStatus::Approved => approved += 1,
                RecordStatus::Rejected | RecordStatus::Updated => {}
            }

            *by_rank
                .entry(record.details.service.rank.title().to_owned())
                .or_insert(0) += 1;
            *by_command
                .entry(record.details.service.command.clone())
                .or_insert(0) += 1;

            let position = recent
                .partition_point(|kept| kept.submitted_at >= record.submitted_at);
            if position < RECENT_SUBMISSION_COUNT {
                recent.insert(position, record);
                recent.truncate(RECENT_SUBMISSION_COUNT);
            }
        }

        Self {
            total_officers: records.len() as u64,
            pending_approvals: pending,
            approved_officers: approved,
            officers_by_rank: into_sorted_groups(by_rank),
            officers_by_command: into_sorted_groups(by_command),
            recent_submissions: recent
                .into_iter()
                .map(|record| RecentSubmission {
                    id: record.id,
                    service_number: record.details.service.service_number.clone(),
                    full_name: record.full_name(),
                    rank: record.details.service.rank,
                    command: record.details.service.command.clone(),
                    submitted_at: record.submitted_at,
                })
                .collect(),
        }
    }
}

/// Flatten a key->count map into groups sorted by descending count. The map
/// iterates alphabetically, and the stable sort preserves that order among
/// equal counts.
fn into_sorted_groups(map: BTreeMap<String, u64>) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = map
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
