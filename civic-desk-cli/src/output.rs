use civic_desk_api::ComplaintStatus;
use civic_desk_db::models::{ComplaintModel, DepartmentModel};
use civic_desk_db::service::ComplaintDetail;
use civic_desk_db::views::{
    count_by_category, count_by_city, count_by_status, daily_trend, DashboardSummary, TrendBucket,
};
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Aggregates printed by `civic-desk report`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub summary: DashboardSummary,
    pub by_category: BTreeMap<String, usize>,
    pub by_city: BTreeMap<String, usize>,
    pub by_status: BTreeMap<ComplaintStatus, usize>,
    pub trend: Vec<TrendBucket>,
}

impl Report {
    pub fn build<Tz: TimeZone>(complaints: &[&ComplaintModel], today: NaiveDate, tz: &Tz) -> Self {
        Self {
            summary: DashboardSummary::from_complaints(complaints.iter().copied()),
            by_category: count_by_category(complaints.iter().copied()),
            by_city: count_by_city(complaints.iter().copied()),
            by_status: count_by_status(complaints.iter().copied()),
            trend: daily_trend(complaints.iter().copied(), today, tz),
        }
    }
}

pub fn complaint_line(complaint: &ComplaintModel) -> String {
    format!(
        "{}  {:<11}  {:<6}  {} / {}  {}, {}  {}",
        complaint.id,
        complaint.status.label(),
        complaint.priority.label(),
        complaint.category,
        complaint.sub_category,
        complaint.area,
        complaint.city,
        complaint.created_at.format("%Y-%m-%d %H:%M"),
    )
}

pub fn complaint_list(complaints: &[&ComplaintModel]) -> String {
    if complaints.is_empty() {
        return "No complaints found.\n".to_string();
    }
    let mut out = String::new();
    for complaint in complaints {
        out.push_str(&complaint_line(complaint));
        out.push('\n');
    }
    let _ = writeln!(out, "{} complaint(s)", complaints.len());
    out
}

pub fn complaint_detail(detail: &ComplaintDetail) -> String {
    let c = &detail.complaint;
    let mut out = String::new();
    let _ = writeln!(out, "Complaint   {}", c.id);
    let _ = writeln!(out, "Status      {}", c.status.label());
    let _ = writeln!(out, "Priority    {}", c.priority.label());
    let _ = writeln!(out, "Category    {} / {}", c.category, c.sub_category);
    let _ = writeln!(out, "Location    {}, {}", c.area, c.city);
    let _ = writeln!(out, "Filed by    {}", c.user_id);
    let _ = writeln!(out, "Department  {}", optional_id(c.assigned_department_id));
    let _ = writeln!(out, "Officer     {}", optional_id(c.assigned_officer_id));
    if let Some(url) = &c.image_url {
        let _ = writeln!(out, "Image       {url}");
    }
    let _ = writeln!(out, "Created     {}", c.created_at.to_rfc3339());
    let _ = writeln!(out, "Updated     {}", c.updated_at.to_rfc3339());
    let _ = writeln!(out, "\n{}\n", c.description);

    if detail.history.is_empty() {
        out.push_str("No status changes yet.\n");
        return out;
    }
    out.push_str("History:\n");
    for entry in &detail.history {
        let from = entry.old_status.map(|s| s.label()).unwrap_or("-");
        let _ = write!(
            out,
            "  {}  {} -> {}  by {}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            from,
            entry.new_status.label(),
            entry.changed_by,
        );
        if let Some(notes) = &entry.notes {
            let _ = write!(out, "  ({notes})");
        }
        out.push('\n');
    }
    out
}

pub fn department_list(departments: &[DepartmentModel]) -> String {
    let mut out = String::new();
    for department in departments {
        let _ = writeln!(out, "{}  {}", department.id, department.name);
    }
    out
}

pub fn report(report: &Report) -> String {
    let s = &report.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total {}  Open {}  In progress {}  Resolved {}",
        s.total, s.open, s.in_progress, s.resolved
    );

    section(&mut out, "By category", report.by_category.iter().map(|(k, v)| (k.as_str(), *v)));
    section(&mut out, "By city", report.by_city.iter().map(|(k, v)| (k.as_str(), *v)));
    section(&mut out, "By status", report.by_status.iter().map(|(k, v)| (k.label(), *v)));

    out.push_str("\nLast 30 days:\n");
    for bucket in &report.trend {
        let _ = writeln!(out, "  {}  {:>3}  {}", bucket.date, bucket.count, "#".repeat(bucket.count));
    }
    out
}

fn section<'a>(out: &mut String, title: &str, rows: impl Iterator<Item = (&'a str, usize)>) {
    let _ = writeln!(out, "\n{title}:");
    for (key, count) in rows {
        let _ = writeln!(out, "  {key:<20} {count}");
    }
}

fn optional_id(id: Option<uuid::Uuid>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "unassigned".to_string())
}
