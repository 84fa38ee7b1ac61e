//! Output formatting for solve summaries, iteration logs and settings.

use std::io;

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use rootfind_math::diagnostics::IterationRecord;

use crate::cli::OutputFormat;

/// One iteration as a table row.
#[derive(Debug, Tabled)]
pub struct IterationRow {
    #[tabled(rename = "Iter")]
    pub iter: u32,
    #[tabled(rename = "x_prev", display_with = "display_float")]
    pub x_prev: f64,
    #[tabled(rename = "x_curr", display_with = "display_float")]
    pub x_curr: f64,
    #[tabled(rename = "x_next", display_with = "display_float")]
    pub x_next: f64,
    #[tabled(rename = "f(x)", display_with = "display_sci")]
    pub f_next: f64,
}

impl From<&IterationRecord> for IterationRow {
    fn from(record: &IterationRecord) -> Self {
        Self {
            iter: record.iter,
            x_prev: record.x_prev,
            x_curr: record.x_curr,
            x_next: record.x_next,
            f_next: record.f_next,
        }
    }
}

fn display_float(value: &f64) -> String {
    format!("{value:.12}")
}

fn display_sci(value: &f64) -> String {
    format_sci(*value)
}

/// A labelled value in a two-column table.
#[derive(Debug, Clone, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints an iteration log in the requested format.
///
/// CSV and JSON use the record field names (`iter,x_prev,x_curr,x_next,f(x)`);
/// minimal prints `iter x_next f(x)` per line.
pub fn print_iterations(records: &[IterationRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<IterationRow> = records.iter().map(IterationRow::from).collect();
            print_header("Iterations");
            print_table(&rows);
        }
        OutputFormat::Json => print_json(records)?,
        OutputFormat::Csv => print_csv(records)?,
        OutputFormat::Minimal => {
            for record in records {
                println!("{} {} {:e}", record.iter, record.x_next, record.f_next);
            }
        }
    }
    Ok(())
}

/// Prints rows as a rounded table with a left-aligned first column.
pub fn print_table<T: Tabled>(rows: &[T]) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();
    println!("{table}");
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints values as CSV rows under one header.
pub fn print_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a float in scientific notation.
pub fn format_sci(value: f64) -> String {
    format!("{value:.6e}")
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
