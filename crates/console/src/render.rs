//! Table rendering for console output.

use domain::models::{ReferenceDataCache, ReferenceKind, UserRecord, ViolationSeverity};
use domain::services::{DerivedStatistics, LabelCounts};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Shown when users are loaded but none pass the filters.
pub const NO_MATCHES: &str = "No users match the current filters.";

/// Shown when the loaded collection is empty.
pub const NO_USERS: &str = "No users found.";

#[derive(Tabled)]
struct CompactRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Last Name")]
    lastname: String,
    #[tabled(rename = "Email")]
    email: String,
}

#[derive(Tabled)]
struct ExpandedRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Last Name")]
    lastname: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Employment Type")]
    employment_type: String,
    #[tabled(rename = "Directorate")]
    directorate: String,
    #[tabled(rename = "Deputy Ministry")]
    deputy: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Device Limit")]
    device_limit: String,
    #[tabled(rename = "Device Type")]
    device_type: String,
    #[tabled(rename = "Group Type")]
    group_type: String,
    #[tabled(rename = "MAC Address")]
    mac_address: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Violations Count")]
    violations_count: String,
    #[tabled(rename = "Violation Type")]
    violation_type: String,
    #[tabled(rename = "Comment")]
    comment: String,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Users")]
    count: usize,
}

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn with_card(text: &str, record: &UserRecord) -> String {
    match record.violation_severity() {
        ViolationSeverity::None => text.to_string(),
        severity => format!("{} [{} card]", text, severity),
    }
}

/// Name with the card marker, as shown in both table modes.
pub fn name_cell(record: &UserRecord) -> String {
    with_card(&record.name, record)
}

/// Violations count with its card marker.
pub fn violations_cell(record: &UserRecord) -> String {
    with_card(&record.violations_count, record)
}

impl From<&UserRecord> for CompactRow {
    fn from(r: &UserRecord) -> Self {
        Self {
            id: r.id.to_string(),
            name: name_cell(r),
            username: r.username.clone(),
            lastname: r.lastname.clone(),
            email: r.email.clone(),
        }
    }
}

impl From<&UserRecord> for ExpandedRow {
    fn from(r: &UserRecord) -> Self {
        Self {
            id: r.id.to_string(),
            name: name_cell(r),
            username: r.username.clone(),
            lastname: r.lastname.clone(),
            email: r.email.clone(),
            phone: r.phone.clone(),
            employment_type: or_dash(r.employment_type.as_deref()),
            directorate: r.directorate.clone(),
            deputy: r.deputy.clone(),
            position: r.position.clone(),
            device_limit: r.device_limit.clone(),
            device_type: r.device_type.clone(),
            group_type: r.group_type.clone(),
            mac_address: r.mac_address.clone(),
            status: r.status_label().to_string(),
            violations_count: violations_cell(r),
            violation_type: or_dash(r.violation_type.as_deref()),
            comment: or_dash(r.comment.as_deref()),
        }
    }
}

fn styled(mut table: Table) -> String {
    table.with(Style::sharp());
    table.to_string()
}

fn counts_table(counts: &LabelCounts) -> String {
    styled(Table::new(counts.iter().map(|(label, count)| CountRow {
        label: label.to_string(),
        count,
    })))
}

/// Summary counts followed by the two breakdowns.
pub fn statistics(stats: &DerivedStatistics) -> String {
    let summary = styled(Table::new([
        CountRow {
            label: "Total".into(),
            count: stats.total,
        },
        CountRow {
            label: "Active".into(),
            count: stats.active,
        },
        CountRow {
            label: "Deactive".into(),
            count: stats.inactive,
        },
    ]));

    format!(
        "Users\n{}\n\nBy employment type\n{}\n\nBy deputy ministry\n{}\n",
        summary,
        counts_table(&stats.by_employment_type),
        counts_table(&stats.by_deputy_ministry),
    )
}

/// Users table in compact or expanded form.
pub fn users(rows: &[&UserRecord], expanded: bool) -> String {
    if rows.is_empty() {
        return format!("{}\n", NO_MATCHES);
    }
    let table = if expanded {
        styled(Table::new(rows.iter().map(|r| ExpandedRow::from(*r))))
    } else {
        styled(Table::new(rows.iter().map(|r| CompactRow::from(*r))))
    };
    format!("{}\n{} user(s) shown\n", table, rows.len())
}

/// Filter options per reference list.
pub fn options(references: &ReferenceDataCache) -> String {
    let mut out = String::new();
    for (title, kind) in [
        ("Deputy ministries", ReferenceKind::DeputyMinistry),
        ("Directorates", ReferenceKind::Directorate),
        ("Employment types", ReferenceKind::EmploymentType),
    ] {
        let entries = references.options(kind);
        out.push_str(title);
        out.push('\n');
        if entries.is_empty() {
            out.push_str("(none)\n\n");
            continue;
        }
        out.push_str(&styled(Table::new(entries.into_iter().map(|e| OptionRow {
            id: e.id,
            name: e.name.clone(),
        }))));
        out.push_str("\n\n");
    }
    out
}

/// All fields of one record.
pub fn record(r: &UserRecord) -> String {
    let rows = vec![
        FieldRow {
            field: "Id",
            value: r.id.to_string(),
        },
        FieldRow {
            field: "Name",
            value: r.name.clone(),
        },
        FieldRow {
            field: "Username",
            value: r.username.clone(),
        },
        FieldRow {
            field: "Last Name",
            value: r.lastname.clone(),
        },
        FieldRow {
            field: "Email",
            value: r.email.clone(),
        },
        FieldRow {
            field: "Phone",
            value: r.phone.clone(),
        },
        FieldRow {
            field: "Employment Type",
            value: or_dash(r.employment_type.as_deref()),
        },
        FieldRow {
            field: "Directorate",
            value: r.directorate.clone(),
        },
        FieldRow {
            field: "Deputy Ministry",
            value: r.deputy.clone(),
        },
        FieldRow {
            field: "Position",
            value: r.position.clone(),
        },
        FieldRow {
            field: "Device Limit",
            value: r.device_limit.clone(),
        },
        FieldRow {
            field: "Device Type",
            value: r.device_type.clone(),
        },
        FieldRow {
            field: "Group Type",
            value: r.group_type.clone(),
        },
        FieldRow {
            field: "MAC Address",
            value: r.mac_address.clone(),
        },
        FieldRow {
            field: "Status",
            value: r.status_label().to_string(),
        },
        FieldRow {
            field: "Violations Count",
            value: violations_cell(r),
        },
        FieldRow {
            field: "Violation Type",
            value: or_dash(r.violation_type.as_deref()),
        },
        FieldRow {
            field: "Comment",
            value: or_dash(r.comment.as_deref()),
        },
    ];
    format!("{}\n", styled(Table::new(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::ReferenceEntry;

    fn ana() -> UserRecord {
        let mut r = UserRecord::new(1, "Ana");
        r.username = "ana.k".into();
        r.lastname = "Kovac".into();
        r.email = "ana@example.org".into();
        r.status = Some(1);
        r.violations_count = "2".into();
        r
    }

    #[test]
    fn test_compact_headers() {
        let a = ana();
        let out = users(&[&a], false);
        for header in ["Id", "Name", "Username", "Last Name", "Email"] {
            assert!(out.contains(header), "missing {}", header);
        }
        assert!(!out.contains("MAC Address"));
        assert!(out.contains("ana.k"));
    }

    #[test]
    fn test_compact_row_carries_id_and_card() {
        let row = CompactRow::from(&ana());
        assert_eq!(row.id, "1");
        assert_eq!(row.name, "Ana [red card]");

        let mut plain = ana();
        plain.violations_count = "0".into();
        assert_eq!(CompactRow::from(&plain).name, "Ana");
    }

    #[test]
    fn test_expanded_row_values() {
        let a = ana();
        let out = users(&[&a], true);
        assert!(out.contains("MAC Address"));
        assert!(out.contains("active"));
        assert!(out.contains("2 [red card]"));
        assert!(out.contains("Ana [red card]"));
        assert_eq!(ExpandedRow::from(&a).id, "1");
    }

    #[test]
    fn test_missing_comment_and_status_render_dash() {
        let r = UserRecord::new(5, "Zed");
        let row = ExpandedRow::from(&r);
        assert_eq!(row.comment, "-");
        assert_eq!(row.status, "-");
        assert_eq!(row.employment_type, "-");
    }

    #[test]
    fn test_violation_markers() {
        let mut r = UserRecord::new(1, "A");
        r.violations_count = "1".into();
        assert_eq!(violations_cell(&r), "1 [yellow card]");
        r.violations_count = "0".into();
        assert_eq!(violations_cell(&r), "0");
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(users(&[], false), format!("{}\n", NO_MATCHES));
    }

    #[test]
    fn test_statistics_sections() {
        let a = ana();
        let stats = DerivedStatistics::compute([&a]);
        let out = statistics(&stats);
        assert!(out.contains("Total"));
        assert!(out.contains("By employment type"));
        assert!(out.contains("Unknown"));
    }

    #[test]
    fn test_options_restrict_deputies() {
        let refs = ReferenceDataCache::new(
            vec![ReferenceEntry::new(7, "Legal")],
            vec![ReferenceEntry::new(2, "Policy"), ReferenceEntry::new(7, "Legal")],
            vec![],
        );
        let out = options(&refs);
        let deputies = out.split("Directorates").next().unwrap();
        assert!(deputies.contains("Policy"));
        assert!(!deputies.contains("Legal"));
        assert!(out.contains("(none)"));
    }

    #[test]
    fn test_record_view() {
        let out = record(&ana());
        assert!(out.contains("Violations Count"));
        assert!(out.contains("Kovac"));
    }
}
