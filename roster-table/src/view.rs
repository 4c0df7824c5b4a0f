//! Table rows for the presentation layer
//!
//! Pure read side: rows are derived from a [`TableSnapshot`] and never feed
//! back into state.

use serde::Serialize;
use shared::EmployeeId;

use crate::table::TableSnapshot;

const HEADERS: [&str; 6] = [
    "Employee ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Status",
];

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub status_label: &'static str,
    /// Status switch position
    pub switch_on: bool,
    /// Menu button enabled (active records only)
    pub menu_enabled: bool,
    /// Row shown greyed out (inactive records)
    pub dimmed: bool,
    /// Menu or modal currently targets this row
    pub selected: bool,
}

pub fn rows(snapshot: &TableSnapshot) -> Vec<TableRow> {
    let selected = snapshot.modal.selected();
    snapshot
        .records
        .iter()
        .map(|r| {
            let active = r.status.is_active();
            TableRow {
                employee_id: r.employee_id.clone(),
                first_name: r.first_name.clone(),
                last_name: r.last_name.clone(),
                email: r.email.clone(),
                phone: r.phone_or_empty().to_string(),
                status_label: r.status.label(),
                switch_on: active,
                menu_enabled: active,
                dimmed: !active,
                selected: selected == Some(&r.employee_id),
            }
        })
        .collect()
}

/// Plain-text table with aligned columns; dimmed rows are marked with `~`
pub fn render_text(rows: &[TableRow]) -> String {
    let cells: Vec<[&str; 6]> = rows
        .iter()
        .map(|r| {
            [
                r.employee_id.as_str(),
                r.first_name.as_str(),
                r.last_name.as_str(),
                r.email.as_str(),
                r.phone.as_str(),
                r.status_label,
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |marker: char, row: &[&str; 6]| {
        let mut out = String::new();
        out.push(marker);
        for (cell, w) in row.iter().zip(widths) {
            out.push(' ');
            out.push_str(cell);
            out.extend(std::iter::repeat_n(' ', w - cell.chars().count()));
            out.push_str(" |");
        }
        out.trim_end_matches(['|', ' ']).to_string()
    };

    let mut out = line(' ', &HEADERS);
    out.push('\n');
    for (row, cell) in rows.iter().zip(&cells) {
        out.push_str(&line(if row.dimmed { '~' } else { ' ' }, cell));
        out.push('\n');
    }
    out
}
