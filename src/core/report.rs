use crate::domain::model::{Report, StatusRow, NOT_AVAILABLE};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

const DESCRIPTION_WRAP: usize = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub include_description: bool,
}

pub fn render_report<W: Write>(report: &Report, options: RenderOptions, out: &mut W) -> Result<()> {
    match options.format {
        OutputFormat::Table => write_table(report, options.include_description, out),
        OutputFormat::Csv => write_csv(report, options.include_description, out),
        OutputFormat::Json => write_json(report, out),
    }
}

fn headers(include_description: bool) -> Vec<&'static str> {
    let mut headers = vec!["Receipt Number", "Form", "Summary", "Last Update"];
    if include_description {
        headers.push("Description");
    }
    headers
}

/// Summary cell of a row; failed lookups get a visible marker instead.
fn summary_cell(row: &StatusRow) -> String {
    match &row.outcome {
        Ok(status) => status.summary.clone(),
        Err(e) => format!("ERROR ({}): {}", e.kind(), e),
    }
}

fn cells(row: &StatusRow, include_description: bool) -> Vec<String> {
    let (form, last_update, description) = match &row.outcome {
        Ok(status) => (
            status.form_or_na().to_string(),
            status.last_update_or_na().to_string(),
            status.description.clone(),
        ),
        Err(_) => (
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            String::new(),
        ),
    };

    let mut cells = vec![row.receipt_number.clone(), form, summary_cell(row), last_update];
    if include_description {
        cells.push(description);
    }
    cells
}

fn write_csv<W: Write>(report: &Report, include_description: bool, out: &mut W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(headers(include_description))?;
    for row in &report.rows {
        writer.write_record(cells(row, include_description))?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonRow<'a> {
    receipt_number: &'a str,
    form: Option<&'a str>,
    last_update: Option<&'a str>,
    summary: Option<&'a str>,
    description: Option<&'a str>,
    error: Option<JsonError>,
}

#[derive(Serialize)]
struct JsonError {
    kind: &'static str,
    message: String,
}

fn write_json<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    let rows: Vec<JsonRow<'_>> = report
        .rows
        .iter()
        .map(|row| match &row.outcome {
            Ok(status) => JsonRow {
                receipt_number: &row.receipt_number,
                form: status.form.as_deref(),
                last_update: status.last_update.as_deref(),
                summary: Some(status.summary.as_str()),
                description: Some(status.description.as_str()),
                error: None,
            },
            Err(e) => JsonRow {
                receipt_number: &row.receipt_number,
                form: None,
                last_update: None,
                summary: None,
                description: None,
                error: Some(JsonError {
                    kind: e.kind(),
                    message: e.to_string(),
                }),
            },
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}

/// Box-drawn grid in the style of tabulate's `fancy_grid`.
fn write_table<W: Write>(report: &Report, include_description: bool, out: &mut W) -> Result<()> {
    let headers = headers(include_description);
    let body: Vec<Vec<Vec<String>>> = report
        .rows
        .iter()
        .map(|row| {
            cells(row, include_description)
                .into_iter()
                .enumerate()
                .map(|(col, cell)| {
                    if col == 4 {
                        wrap(&cell, DESCRIPTION_WRAP)
                    } else {
                        vec![cell]
                    }
                })
                .collect()
        })
        .collect();

    // Widths count chars, which matches display columns only for single-width text.
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (col, lines) in row.iter().enumerate() {
            for line in lines {
                widths[col] = widths[col].max(line.chars().count());
            }
        }
    }

    writeln!(out, "{}", rule(&widths, '╒', '═', '╤', '╕'))?;
    let header_cells: Vec<Vec<String>> = headers.iter().map(|h| vec![h.to_string()]).collect();
    write_table_row(&header_cells, &widths, out)?;
    writeln!(out, "{}", rule(&widths, '╞', '═', '╪', '╡'))?;

    for (i, row) in body.iter().enumerate() {
        if i > 0 {
            writeln!(out, "{}", rule(&widths, '├', '─', '┼', '┤'))?;
        }
        write_table_row(row, &widths, out)?;
    }

    writeln!(out, "{}", rule(&widths, '╘', '═', '╧', '╛'))?;
    Ok(())
}

fn rule(widths: &[usize], left: char, fill: char, joint: char, right: char) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|w| fill.to_string().repeat(w + 2))
        .collect();
    format!("{}{}{}", left, segments.join(joint.to_string().as_str()), right)
}

fn write_table_row<W: Write>(row: &[Vec<String>], widths: &[usize], out: &mut W) -> Result<()> {
    let height = row.iter().map(Vec::len).max().unwrap_or(1).max(1);
    for line in 0..height {
        let rendered: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(lines, width)| {
                let text = lines.get(line).map(String::as_str).unwrap_or("");
                let pad = width - text.chars().count();
                format!(" {}{} ", text, " ".repeat(pad))
            })
            .collect();
        writeln!(out, "│{}│", rendered.join("│"))?;
    }
    Ok(())
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
