use std::fmt::Write as _;

use products_hr::{Employee, EmployeeField, ReferenceData, SortDirection, ViewSummary};

const ID_HEADER: &str = "Id";
const NO_DATA: &str = "No employee data found";

/// Column header with the active sort marker, e.g. `Start Date ▼`.
fn header(field: EmployeeField, active: Option<(EmployeeField, SortDirection)>) -> String {
    let marker = match active {
        Some((sorted, SortDirection::Ascending)) if sorted == field => "▲",
        Some((sorted, SortDirection::Descending)) if sorted == field => "▼",
        _ => return field.label(),
    };
    format!("{} {marker}", field.label())
}

/// Render rows as an aligned plain-text table followed by the summary line.
pub fn table(
    rows: &[Employee],
    summary: ViewSummary,
    active: Option<(EmployeeField, SortDirection)>,
) -> String {
    if rows.is_empty() {
        return format!("{NO_DATA}\n");
    }

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    grid.push(
        std::iter::once(ID_HEADER.to_string())
            .chain(EmployeeField::ALL.into_iter().map(|field| header(field, active)))
            .collect(),
    );
    for row in rows {
        grid.push(
            std::iter::once(row.id.to_string())
                .chain(row.fields.iter().map(|(_, value)| value.to_string()))
                .collect(),
        );
    }

    let columns = grid[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            grid.iter()
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in &grid {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    let _ = writeln!(out, "{summary}");
    out
}

pub fn reference(data: &ReferenceData) -> String {
    let mut out = String::from("States:\n");
    for state in &data.states {
        let _ = writeln!(out, "  {}  {}", state.abbreviation, state.name);
    }
    out.push_str("Departments:\n");
    for department in &data.departments {
        let _ = writeln!(out, "  {department}");
    }
    out
}
