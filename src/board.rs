//! Pipeline Board Core
//!
//! Pure logic behind the deals board: stage buckets, per-stage value
//! aggregation, the drag-transition state machine, and the dashboard
//! metrics derived from the same caches. Everything here is synchronous;
//! the pages own the signals and the gateway calls.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Activity, Deal, Stage};

/// Deals currently in `stage`. Buckets are derived from the full cache on
/// every call; the board keeps no per-bucket storage, so they cannot
/// diverge from the cache.
pub fn bucket_for(deals: &[Deal], stage: Stage) -> Vec<&Deal> {
    deals.iter().filter(|d| d.stage == stage).collect()
}

/// Sum of deal values in `stage`. Missing or non-numeric values count as
/// zero here without touching the stored records.
pub fn stage_value(deals: &[Deal], stage: Stage) -> f64 {
    bucket_for(deals, stage)
        .iter()
        .map(|d| match d.value {
            Some(v) if v.is_finite() => v,
            _ => 0.0,
        })
        .sum()
}

// ========================
// Drag-transition protocol
// ========================

/// Phase of the single in-flight drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging { deal_id: u32 },
    Committing { deal_id: u32 },
}

impl DragPhase {
    pub fn is_committing(self) -> bool {
        matches!(self, DragPhase::Committing { .. })
    }
}

/// What a drop should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPlan {
    /// Same column, or the deal is gone: no mutation, no gateway call.
    Cancel,
    /// Different stage: optimistic local update plus a gateway update.
    Commit { from: Stage, to: Stage },
}

pub fn plan_drop(deals: &[Deal], deal_id: u32, target: Stage) -> DropPlan {
    match deals.iter().find(|d| d.id == deal_id) {
        Some(deal) if deal.stage != target => DropPlan::Commit { from: deal.stage, to: target },
        _ => DropPlan::Cancel,
    }
}

/// Pre-drag state retained while a commit is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSnapshot {
    pub stage: Stage,
    pub updated_at: DateTime<Utc>,
}

/// Rewrite the deal's stage and `updated_at` in place, before the backend
/// has confirmed anything. Returns the snapshot needed to roll back, or
/// `None` if the deal is no longer in the cache.
pub fn apply_optimistic(
    deals: &mut [Deal],
    deal_id: u32,
    to: Stage,
    now: DateTime<Utc>,
) -> Option<StageSnapshot> {
    let deal = deals.iter_mut().find(|d| d.id == deal_id)?;
    let snapshot = StageSnapshot {
        stage: deal.stage,
        updated_at: deal.updated_at,
    };
    deal.stage = to;
    // updated_at must strictly increase even if the clock hasn't ticked
    // since the last write.
    deal.updated_at = if now > snapshot.updated_at {
        now
    } else {
        snapshot.updated_at + Duration::milliseconds(1)
    };
    Some(snapshot)
}

/// Restore the pre-drag stage after a failed or timed-out commit.
pub fn apply_rollback(deals: &mut [Deal], deal_id: u32, snapshot: StageSnapshot) {
    if let Some(deal) = deals.iter_mut().find(|d| d.id == deal_id) {
        deal.stage = snapshot.stage;
        deal.updated_at = snapshot.updated_at;
    }
}

/// Success toast for a completed stage move, naming the deal and the
/// destination. Terminal transitions get their own wording.
pub fn move_message(title: &str, to: Stage) -> String {
    if to.is_terminal() {
        format!("Deal \"{title}\" {}! Moved to {to} status.", to.as_str().to_lowercase())
    } else {
        format!("Deal \"{title}\" moved to {to}")
    }
}

// ========================
// Dashboard aggregation
// ========================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardMetrics {
    pub total_deals: usize,
    pub pipeline_value: f64,
    pub won_deals: usize,
    pub activity_count: usize,
}

/// Pure function of the deal/activity caches; no mutation, no error
/// states of its own.
pub fn dashboard_metrics(deals: &[Deal], activities: &[Activity]) -> DashboardMetrics {
    DashboardMetrics {
        total_deals: deals.len(),
        pipeline_value: deals
            .iter()
            .map(|d| match d.value {
                Some(v) if v.is_finite() => v,
                _ => 0.0,
            })
            .sum(),
        won_deals: deals.iter().filter(|d| d.stage == Stage::Won).count(),
        activity_count: activities.len(),
    }
}

/// Deal counts per stage in pipeline order, omitting empty stages.
pub fn stage_histogram(deals: &[Deal]) -> Vec<(Stage, usize)> {
    Stage::ALL
        .into_iter()
        .map(|stage| (stage, deals.iter().filter(|d| d.stage == stage).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Most recent activities first, capped at `limit`.
pub fn recent_activities(activities: &[Activity], limit: usize) -> Vec<Activity> {
    let mut sorted: Vec<Activity> = activities.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityKind;
    use chrono::NaiveDate;

    fn make_deal(id: u32, stage: Stage, value: Option<f64>) -> Deal {
        Deal {
            id,
            title: format!("Deal {id}"),
            value,
            stage,
            expected_close_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            contact_id: None,
            company_id: None,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_activity(id: u32, date: DateTime<Utc>) -> Activity {
        Activity {
            id,
            kind: ActivityKind::Call,
            description: format!("Activity {id}"),
            date,
            deal_id: None,
            contact_id: None,
            company_id: None,
            created_at: date,
        }
    }

    #[test]
    fn buckets_partition_the_active_deal_set() {
        let deals = vec![
            make_deal(1, Stage::LeadIn, Some(100.0)),
            make_deal(2, Stage::ContactMade, Some(200.0)),
            make_deal(3, Stage::LeadIn, Some(300.0)),
            make_deal(4, Stage::Negotiation, Some(400.0)),
            make_deal(5, Stage::Won, Some(500.0)),
            make_deal(6, Stage::Lost, None),
        ];

        let mut bucketed: Vec<u32> = Stage::ACTIVE
            .into_iter()
            .flat_map(|s| bucket_for(&deals, s).into_iter().map(|d| d.id))
            .collect();
        bucketed.sort();

        let mut active: Vec<u32> = deals
            .iter()
            .filter(|d| !d.stage.is_terminal())
            .map(|d| d.id)
            .collect();
        active.sort();

        assert_eq!(bucketed, active);
        // No duplicates across buckets
        let len_before = bucketed.len();
        bucketed.dedup();
        assert_eq!(bucketed.len(), len_before);
    }

    #[test]
    fn stage_value_sums_the_bucket() {
        let deals = vec![
            make_deal(1, Stage::LeadIn, Some(1000.0)),
            make_deal(2, Stage::LeadIn, Some(2500.0)),
            make_deal(3, Stage::Negotiation, Some(9999.0)),
        ];
        assert_eq!(stage_value(&deals, Stage::LeadIn), 3500.0);
    }

    #[test]
    fn stage_value_treats_missing_values_as_zero() {
        let deals = vec![
            make_deal(1, Stage::LeadIn, Some(1000.0)),
            make_deal(2, Stage::LeadIn, None),
            make_deal(3, Stage::LeadIn, Some(f64::NAN)),
        ];
        assert_eq!(stage_value(&deals, Stage::LeadIn), 1000.0);
        // The stored values are untouched
        assert_eq!(deals[1].value, None);
    }

    #[test]
    fn dropping_on_the_source_column_cancels() {
        let deals = vec![make_deal(1, Stage::LeadIn, Some(100.0))];
        assert_eq!(plan_drop(&deals, 1, Stage::LeadIn), DropPlan::Cancel);
        // Unknown deal also cancels
        assert_eq!(plan_drop(&deals, 42, Stage::Won), DropPlan::Cancel);
    }

    #[test]
    fn dropping_on_another_column_commits() {
        let deals = vec![make_deal(1, Stage::LeadIn, Some(100.0))];
        assert_eq!(
            plan_drop(&deals, 1, Stage::Won),
            DropPlan::Commit { from: Stage::LeadIn, to: Stage::Won }
        );
    }

    #[test]
    fn optimistic_update_moves_stage_and_bumps_updated_at() {
        let mut deals = vec![make_deal(1, Stage::LeadIn, Some(100.0))];
        let before = deals[0].updated_at;

        let snapshot = apply_optimistic(&mut deals, 1, Stage::Won, Utc::now()).unwrap();

        assert_eq!(deals[0].stage, Stage::Won);
        assert!(deals[0].updated_at > before);
        assert_eq!(snapshot.stage, Stage::LeadIn);
        assert_eq!(snapshot.updated_at, before);
    }

    #[test]
    fn updated_at_increases_even_without_clock_progress() {
        let mut deals = vec![make_deal(1, Stage::LeadIn, Some(100.0))];
        let frozen = deals[0].updated_at;

        apply_optimistic(&mut deals, 1, Stage::ContactMade, frozen).unwrap();
        assert!(deals[0].updated_at > frozen);
    }

    #[test]
    fn rollback_restores_the_pre_drag_snapshot() {
        let mut deals = vec![make_deal(1, Stage::LeadIn, Some(100.0))];
        let before = deals[0].clone();

        let snapshot = apply_optimistic(&mut deals, 1, Stage::Won, Utc::now()).unwrap();
        assert_eq!(deals[0].stage, Stage::Won);

        apply_rollback(&mut deals, 1, snapshot);
        assert_eq!(deals[0], before);
    }

    #[test]
    fn terminal_moves_get_their_own_message() {
        assert_eq!(
            move_message("Acme", Stage::Won),
            "Deal \"Acme\" won! Moved to Won status."
        );
        assert_eq!(
            move_message("Acme", Stage::Lost),
            "Deal \"Acme\" lost! Moved to Lost status."
        );
        assert_eq!(
            move_message("Acme", Stage::Negotiation),
            "Deal \"Acme\" moved to Negotiation"
        );
    }

    #[test]
    fn dashboard_metrics_over_a_mixed_fixture() {
        let deals = vec![
            make_deal(1, Stage::LeadIn, Some(1000.0)),
            make_deal(2, Stage::Won, Some(5000.0)),
            make_deal(3, Stage::Won, None),
            make_deal(4, Stage::Lost, Some(700.0)),
        ];
        let base = Utc::now();
        let activities = vec![make_activity(1, base), make_activity(2, base)];

        let metrics = dashboard_metrics(&deals, &activities);
        assert_eq!(metrics.total_deals, 4);
        assert_eq!(metrics.pipeline_value, 6700.0);
        assert_eq!(metrics.won_deals, 2);
        assert_eq!(metrics.activity_count, 2);

        let histogram = stage_histogram(&deals);
        assert_eq!(
            histogram,
            vec![(Stage::LeadIn, 1), (Stage::Won, 2), (Stage::Lost, 1)]
        );
    }

    #[test]
    fn recent_activities_sorts_newest_first() {
        let base = Utc::now();
        let activities = vec![
            make_activity(1, base - Duration::hours(2)),
            make_activity(2, base),
            make_activity(3, base - Duration::hours(1)),
        ];
        let recent = recent_activities(&activities, 2);
        assert_eq!(recent.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 3]);
    }
}
