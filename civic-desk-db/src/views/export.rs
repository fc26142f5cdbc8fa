use chrono::SecondsFormat;

use crate::models::ComplaintModel;

pub const CSV_HEADER: &str = "ID,Category,SubCategory,Status,Priority,City,Area,Created";

/// Renders complaints as CSV, one line per complaint in iteration order.
///
/// Status and priority use their wire names and `Created` is RFC 3339.
pub fn export_csv<'a, I>(complaints: I) -> String
where
    I: IntoIterator<Item = &'a ComplaintModel>,
{
    let mut out = String::with_capacity(CSV_HEADER.len() + 1);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for complaint in complaints {
        let created = complaint
            .created_at
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let id = complaint.id.to_string();
        let fields = [
            id.as_str(),
            complaint.category.as_str(),
            complaint.sub_category.as_str(),
            complaint.status.as_str(),
            complaint.priority.as_str(),
            complaint.city.as_str(),
            complaint.area.as_str(),
            created.as_str(),
        ];
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_field(&mut out, field);
        }
        out.push('\n');
    }
    out
}

fn push_field(out: &mut String, field: &str) {
    if !field.contains([',', '"', '\r', '\n']) {
        out.push_str(field);
        return;
    }
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}
