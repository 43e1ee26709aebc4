use crate::domain::model::{CatalogEntry, ComparisonEntry};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub value_precision: usize,
    pub price_precision: usize,
    pub currency: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            value_precision: 3,
            price_precision: 2,
            currency: "$".to_string(),
        }
    }
}

impl DisplayOptions {
    pub fn from_config(config: &impl ConfigProvider) -> Self {
        Self {
            value_precision: config.value_precision(),
            price_precision: config.price_precision(),
            currency: config.currency().to_string(),
        }
    }

    pub fn format_price(&self, price: f64) -> String {
        format!("{}{:.*}", self.currency, self.price_precision, price)
    }

    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}", self.value_precision, value)
    }
}

const HEADERS: [&str; 6] = ["#", "ID", "GPU", "Score", "Price", "Value"];

pub fn render_table(entries: &[ComparisonEntry], display: &DisplayOptions) -> String {
    if entries.is_empty() {
        return "No GPUs added yet.\n".to_string();
    }

    let rows: Vec<[String; 6]> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            [
                (index + 1).to_string(),
                entry.id.short().to_string(),
                entry.name.clone(),
                entry.score.to_string(),
                display.format_price(entry.price),
                display.format_value(entry.value),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let mut line = String::new();
    for (column, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if column > 0 {
            line.push_str("  ");
        }
        // Text columns left aligned, numbers right aligned.
        let padded = match column {
            1 | 2 => format!("{:<width$}", cell, width = width),
            _ => format!("{:>width$}", cell, width = width),
        };
        line.push_str(&padded);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn render_models(models: &[&CatalogEntry]) -> String {
    if models.is_empty() {
        return "No matching models.\n".to_string();
    }
    let width = models
        .iter()
        .map(|entry| entry.model.chars().count())
        .max()
        .unwrap_or(0);
    models
        .iter()
        .map(|entry| format!("{:<width$}  {}\n", entry.model, entry.score, width = width))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(format!("unsupported export format '{}', use csv or tsv", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("csv"),
            ExportFormat::Tsv => f.write_str("tsv"),
        }
    }
}

/// Writes `id,name,score,price,value` rows with a header line.
pub fn export<W: Write>(entries: &[ComparisonEntry], format: ExportFormat, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(writer);
    for entry in entries {
        csv_writer.serialize(entry)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EntryId;

    fn entry(id: &str, name: &str, score: f64, price: f64) -> ComparisonEntry {
        ComparisonEntry {
            id: EntryId::from(id),
            name: name.to_string(),
            score,
            price,
            value: ComparisonEntry::value_of(score, price),
        }
    }

    #[test]
    fn test_display_formats() {
        let display = DisplayOptions::default();
        assert_eq!(display.format_price(150.0), "$150.00");
        assert_eq!(display.format_value(100.0 / 150.0 * 100.0), "66.667");
    }

    #[test]
    fn test_render_table() {
        let entries = vec![entry("0123456789", "RTX 3060", 100.0, 150.0)];
        let table = render_table(&entries, &DisplayOptions::default());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('#'));
        assert!(lines[2].contains("01234567"));
        assert!(!lines[2].contains("0123456789"));
        assert!(lines[2].contains("RTX 3060"));
        assert!(lines[2].contains("$150.00"));
        assert!(lines[2].ends_with("66.667"));
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(
            render_table(&[], &DisplayOptions::default()),
            "No GPUs added yet.\n"
        );
    }

    #[test]
    fn test_render_models() {
        let a = CatalogEntry {
            model: "RTX 3060".to_string(),
            score: 110.0,
        };
        let out = render_models(&[&a]);
        assert_eq!(out, "RTX 3060  110\n");
        assert_eq!(render_models(&[]), "No matching models.\n");
    }

    #[test]
    fn test_export_csv_and_tsv() {
        let entries = vec![entry("a", "RTX 3060", 100.0, 150.0)];

        let mut csv_out = Vec::new();
        export(&entries, ExportFormat::Csv, &mut csv_out).unwrap();
        let csv_text = String::from_utf8(csv_out).unwrap();
        assert!(csv_text.starts_with("id,name,score,price,value\n"));
        assert!(csv_text.contains("a,RTX 3060,100.0,150.0,"));

        let mut tsv_out = Vec::new();
        export(&entries, ExportFormat::Tsv, &mut tsv_out).unwrap();
        let tsv_text = String::from_utf8(tsv_out).unwrap();
        assert!(tsv_text.starts_with("id\tname\tscore\tprice\tvalue\n"));
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("tsv".parse::<ExportFormat>(), Ok(ExportFormat::Tsv));
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
