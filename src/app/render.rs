use crate::adapters::http::image_url;
use crate::core::search::SearchState;
use crate::core::sorter::{parse_date, parse_number, ManifestTable};
use crate::domain::model::{Column, Direction, Layout, ResultIndex, TableRow};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Write;
use url::Url;

const TABLE_HEADER: [&str; 4] = ["part_number", "description", "price", "date"];
const CAROUSEL_HEADER: [&str; 3] = ["part_number", "description", "image"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
    Tsv,
}

/// A carousel with its image references resolved to full URLs.
#[derive(Serialize)]
struct Card<'a> {
    description: &'a str,
    images: Vec<String>,
}

/// Writes `state`. `layout` decides the shape of an empty result so that
/// JSON and delimited output stay machine-readable.
pub fn render_state<W: Write>(
    state: &SearchState,
    image_base: &Url,
    layout: Layout,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match state {
        SearchState::Idle => Ok(()),
        SearchState::Loading => {
            writeln!(out, "Loading...")?;
            Ok(())
        }
        SearchState::NoResults => render_empty(layout, format, out),
        SearchState::Carousels(index) => render_carousels(index, image_base, format, out),
        SearchState::Table(table) => render_table(table, format, out),
    }
}

fn render_empty<W: Write>(layout: Layout, format: OutputFormat, out: &mut W) -> Result<()> {
    match (format, layout) {
        (OutputFormat::Text, _) => writeln!(out, "No results")?,
        (OutputFormat::Json, Layout::Carousel) => writeln!(out, "{{}}")?,
        (OutputFormat::Json, Layout::Table) => writeln!(out, "[]")?,
        (OutputFormat::Csv | OutputFormat::Tsv, layout) => {
            let mut writer = delimited_writer(format, &mut *out);
            match layout {
                Layout::Carousel => writer.write_record(CAROUSEL_HEADER)?,
                Layout::Table => writer.write_record(TABLE_HEADER)?,
            }
            writer.flush()?;
        }
    }
    Ok(())
}

pub fn render_carousels<W: Write>(
    index: &ResultIndex,
    image_base: &Url,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    // 保持 part number 首次出现的顺序
    let cards: IndexMap<&str, Card<'_>> = index
        .iter()
        .map(|(part_number, group)| {
            let card = Card {
                description: &group.description,
                images: group
                    .images
                    .iter()
                    .map(|image| image_url(image_base, image))
                    .collect(),
            };
            (part_number.as_str(), card)
        })
        .collect();

    match format {
        OutputFormat::Text => {
            for (part_number, card) in &cards {
                writeln!(out, "{}  {}", part_number, card.description)?;
                let total = card.images.len();
                for (i, image) in card.images.iter().enumerate() {
                    writeln!(out, "  [{}/{}] {}", i + 1, total, image)?;
                }
                writeln!(out)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &cards)?;
            writeln!(out)?;
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let mut writer = delimited_writer(format, &mut *out);
            writer.write_record(CAROUSEL_HEADER)?;
            for (part_number, card) in &cards {
                for image in &card.images {
                    writer.write_record([*part_number, card.description, image.as_str()])?;
                }
            }
            writer.flush()?;
        }
    }
    Ok(())
}

pub fn render_table<W: Write>(table: &ManifestTable, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => render_text_table(table, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, table.rows())?;
            writeln!(out)?;
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let mut writer = delimited_writer(format, &mut *out);
            writer.write_record(TABLE_HEADER)?;
            for row in table.rows() {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn render_text_table<W: Write>(table: &ManifestTable, out: &mut W) -> Result<()> {
    let directive = table.directive();
    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|column| {
            let marker = match (directive.column, directive.direction) {
                (Some(c), Direction::Ascending) if c == *column => " ^",
                (Some(c), Direction::Descending) if c == *column => " v",
                _ => "",
            };
            format!("{}{}", column.name(), marker)
        })
        .collect();

    let rows: Vec<Vec<String>> = table.rows().iter().map(display_cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells: Vec<&str> = headers.iter().map(String::as_str).collect();
    writeln!(out, "{}", pad_line(&header_cells, &widths))?;
    for cells in &rows {
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        writeln!(out, "{}", pad_line(&cells, &widths))?;
    }
    Ok(())
}

/// Human-facing cells: prices get a `$`, dates are shown as dd/mm/yyyy.
/// Values that do not parse are shown as received.
fn display_cells(row: &TableRow) -> Vec<String> {
    Column::ALL
        .iter()
        .map(|column| match column {
            Column::Price => display_price(&row.price),
            Column::Date => display_date(&row.date),
            other => other.value(row).to_string(),
        })
        .collect()
}

fn display_price(price: &str) -> String {
    match parse_number(price) {
        Some(_) => format!("${}", price.trim()),
        None => price.to_string(),
    }
}

fn display_date(date: &str) -> String {
    parse_date(date)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|instant| instant.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| date.to_string())
}

fn pad_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn delimited_writer<W: Write>(format: OutputFormat, out: W) -> csv::Writer<W> {
    let delimiter = match format {
        OutputFormat::Tsv => b'\t',
        _ => b',',
    };
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(out)
}
