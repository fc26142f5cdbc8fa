use chrono::{Duration, NaiveDate, TimeZone};
use civic_desk_api::ComplaintStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::ComplaintModel;

/// Number of daily buckets in the trend, ending today
pub const TREND_DAYS: usize = 30;

pub fn count_by_category<'a, I>(complaints: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a ComplaintModel>,
{
    count_by(complaints, |c| c.category.to_string())
}

pub fn count_by_city<'a, I>(complaints: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a ComplaintModel>,
{
    count_by(complaints, |c| c.city.to_string())
}

/// Only statuses that occur are present
pub fn count_by_status<'a, I>(complaints: I) -> BTreeMap<ComplaintStatus, usize>
where
    I: IntoIterator<Item = &'a ComplaintModel>,
{
    count_by(complaints, |c| c.status)
}

fn count_by<'a, I, K, F>(complaints: I, key: F) -> BTreeMap<K, usize>
where
    I: IntoIterator<Item = &'a ComplaintModel>,
    K: Ord,
    F: Fn(&ComplaintModel) -> K,
{
    let mut counts = BTreeMap::new();
    for complaint in complaints {
        *counts.entry(key(complaint)).or_insert(0) += 1;
    }
    counts
}

/// Headline counters for the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    /// Resolved and closed complaints together
    pub resolved: usize,
}

impl DashboardSummary {
    pub fn from_complaints<'a, I>(complaints: I) -> Self
    where
        I: IntoIterator<Item = &'a ComplaintModel>,
    {
        let mut summary = Self::default();
        for complaint in complaints {
            summary.total += 1;
            match complaint.status {
                ComplaintStatus::Open => summary.open += 1,
                ComplaintStatus::InProgress => summary.in_progress += 1,
                ComplaintStatus::Resolved | ComplaintStatus::Closed => summary.resolved += 1,
                ComplaintStatus::Rejected => {}
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendBucket {
    pub date: NaiveDate,
    pub count: usize,
}

/// Complaints created per calendar day for the last [`TREND_DAYS`] days.
///
/// Buckets run oldest first from `today - 29` to `today`. Creation times are
/// converted to `tz` before taking the date; complaints outside the window
/// are not counted.
pub fn daily_trend<'a, I, Tz>(complaints: I, today: NaiveDate, tz: &Tz) -> Vec<TrendBucket>
where
    I: IntoIterator<Item = &'a ComplaintModel>,
    Tz: TimeZone,
{
    let first_day = today - Duration::days(TREND_DAYS as i64 - 1);
    let mut buckets: Vec<TrendBucket> = first_day
        .iter_days()
        .take(TREND_DAYS)
        .map(|date| TrendBucket { date, count: 0 })
        .collect();

    for complaint in complaints {
        let day = complaint.created_at.with_timezone(tz).date_naive();
        if day < first_day || day > today {
            continue;
        }
        let index = (day - first_day).num_days() as usize;
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.count += 1;
        }
    }
    buckets
}
