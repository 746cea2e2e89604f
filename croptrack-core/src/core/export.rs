//! Export transforms: CSV text and the printable plain-text report.
//!
//! Both are pure transforms over a record collection; the caller owns the
//! file-save mechanism and the filename.

use crate::core::format::{format_currency, format_date, format_number, DATE_DISPLAY};
use crate::core::stats::aggregate;
use crate::{Record, Result};

/// Column headers of the CSV export, in output order.
pub const CSV_HEADERS: [&str; 8] = [
    "Crop Name",
    "Date Planted",
    "Acreage",
    "Expenses (₦)",
    "Confirmed",
    "Notes",
    "Created",
    "Updated",
];

/// Serializes the collection to CSV text, header row first.
///
/// Acreage and expenses are written as plain numbers; the confirmation flag
/// becomes a `Yes`/`No` token and the bookkeeping timestamps are rendered as
/// display dates. Quoting and escaping follow RFC 4180 (fields containing
/// the delimiter, quotes or newlines are quoted, embedded quotes doubled).
///
/// # Errors
///
/// Returns [`crate::CropTrackError::Csv`] if the writer fails; this cannot
/// happen for in-memory output in practice.
pub fn to_csv(records: &[Record]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for record in records {
        let row = [
            record.name.clone(),
            record.date_planted.to_string(),
            record.acreage.to_string(),
            record.expenses.to_string(),
            if record.confirmed { "Yes" } else { "No" }.to_string(),
            record.notes.clone(),
            record.created_at.format(DATE_DISPLAY).to_string(),
            record.updated_at.format(DATE_DISPLAY).to_string(),
        ];
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Renders the printable "Crop Yield & Expense Report" as plain text:
/// generation date, the four summary statistics, then a detail table.
///
/// `generated_on` is passed in rather than read from the clock so the
/// transform stays deterministic.
#[must_use]
pub fn to_report(records: &[Record], generated_on: chrono::NaiveDate) -> String {
    let stats = aggregate(records);

    let mut out = String::new();
    out.push_str("Crop Yield & Expense Report\n");
    out.push_str(&format!(
        "Generated on {}\n\n",
        generated_on.format("%A, %-d %B %Y")
    ));

    out.push_str("Summary Statistics\n");
    out.push_str(&format!("  Total Crops:      {}\n", stats.total_count));
    out.push_str(&format!(
        "  Total Acres:      {}\n",
        format_number(stats.total_acreage)
    ));
    out.push_str(&format!(
        "  Total Expenses:   {}\n",
        format_currency(stats.total_expenses)
    ));
    out.push_str(&format!("  Confirmed Crops:  {}\n\n", stats.confirmed_count));

    out.push_str("Crop Details\n");
    if records.is_empty() {
        out.push_str("  No crop records found.\n");
    } else {
        let headers = ["Crop", "Date Planted", "Acreage", "Expenses", "Status", "Notes"];
        let rows: Vec<[String; 6]> = records
            .iter()
            .map(|record| {
                [
                    record.name.clone(),
                    format_date(&record.date_planted.to_string()),
                    format!("{} acres", format_number(record.acreage)),
                    format_currency(record.expenses),
                    if record.confirmed { "Confirmed" } else { "Pending" }.to_string(),
                    if record.notes.is_empty() {
                        "-".to_string()
                    } else {
                        record.notes.clone()
                    },
                ]
            })
            .collect();

        let mut widths: [usize; 6] = headers.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        out.push_str(&render_row(&headers.map(String::from), &widths));
        let rule_len = widths.iter().sum::<usize>() + 3 * (widths.len() - 1) + 4;
        out.push_str(&format!("  {}\n", "-".repeat(rule_len - 2)));
        for row in &rows {
            out.push_str(&render_row(row, &widths));
        }
    }

    out.push_str("\nGenerated by Crop Yield & Expense Tracker\n");
    out
}

fn render_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    let mut line = String::from(" ");
    for (cell, width) in cells.iter().zip(widths.iter()) {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(width - cell.chars().count()));
        line.push_str("  ");
    }
    let trimmed = line.trim_end().to_string();
    format!("{trimmed}\n")
}
