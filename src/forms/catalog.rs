//! Parsing of catalog files fed to the `load_data` importer.

use std::io::Cursor;
use std::path::Path;

use csv::{StringRecord, Trim};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ingredient::NewIngredient;
use crate::domain::tag::NewTag;
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for catalog names and units.
const NAME_MAX_LEN: usize = 200;

/// Result type returned by the catalog parsers.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unsupported catalog format `{0}`, expected .json or .csv")]
    UnsupportedFormat(String),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("upload is missing the required `{0}` header")]
    MissingHeader(&'static str),
    #[error("entry {row} is missing `{field}`")]
    MissingField { row: usize, field: &'static str },
    #[error("entry {row} has `{field}` that is too long")]
    TooLong { row: usize, field: &'static str },
    #[error("entry {row} has invalid color `{value}`, expected #RRGGBB")]
    InvalidColor { row: usize, value: String },
    #[error("entry {row} has invalid slug `{value}`")]
    InvalidSlug { row: usize, value: String },
    #[error("catalog contains no entries")]
    Empty,
}

/// File encodings understood by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "json" => Ok(CatalogFormat::Json),
            "csv" => Ok(CatalogFormat::Csv),
            _ => Err(CatalogError::UnsupportedFormat(extension)),
        }
    }
}

/// Raw catalog file contents waiting to be parsed.
#[derive(Debug)]
pub struct CatalogUpload {
    pub format: CatalogFormat,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct IngredientEntry {
    name: String,
    measurement_unit: String,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
    color: String,
    slug: String,
}

impl CatalogUpload {
    pub fn new(format: CatalogFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// Parse `[{"name", "measurement_unit"}]` JSON or a two-column CSV.
    ///
    /// CSV files may omit the header row, in which case the first column is
    /// the name and the second the unit.
    pub fn into_new_ingredients(self) -> CatalogResult<Vec<NewIngredient>> {
        let entries = match self.format {
            CatalogFormat::Json => serde_json::from_slice::<Vec<IngredientEntry>>(&self.bytes)?,
            CatalogFormat::Csv => parse_ingredient_rows(self.bytes)?,
        };

        let mut ingredients = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let row = index + 1;
            let name = required_text(&entry.name, row, "name")?;
            let unit = required_text(&entry.measurement_unit, row, "measurement_unit")?;
            ingredients.push(NewIngredient::new(name, unit));
        }

        if ingredients.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(ingredients)
    }

    /// Parse `[{"name", "color", "slug"}]` JSON or a CSV with those headers.
    pub fn into_new_tags(self) -> CatalogResult<Vec<NewTag>> {
        let entries = match self.format {
            CatalogFormat::Json => serde_json::from_slice::<Vec<TagEntry>>(&self.bytes)?,
            CatalogFormat::Csv => parse_tag_rows(self.bytes)?,
        };

        let mut tags = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let row = index + 1;
            let name = required_text(&entry.name, row, "name")?;

            let color = entry.color.trim().to_ascii_uppercase();
            if !is_hex_color(&color) {
                return Err(CatalogError::InvalidColor { row, value: color });
            }

            let slug = entry.slug.trim().to_string();
            if !is_slug(&slug) {
                return Err(CatalogError::InvalidSlug { row, value: slug });
            }

            tags.push(NewTag::new(name, color, slug));
        }

        if tags.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(tags)
    }
}

fn parse_ingredient_rows(bytes: Vec<u8>) -> CatalogResult<Vec<IngredientEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(Cursor::new(bytes));

    let mut records = reader.records();
    let Some(first) = records.next().transpose()? else {
        return Ok(Vec::new());
    };

    let (name_index, unit_index, header_row) = match (
        locate_header(&first, "name"),
        locate_header(&first, "measurement_unit"),
    ) {
        (Some(name), Some(unit)) => (name, unit, true),
        (Some(_), None) => return Err(CatalogError::MissingHeader("measurement_unit")),
        _ => (0, 1, false),
    };

    let mut entries = Vec::new();
    if !header_row {
        entries.push(ingredient_from_record(&first, name_index, unit_index));
    }
    for record in records {
        entries.push(ingredient_from_record(&record?, name_index, unit_index));
    }

    Ok(entries)
}

fn ingredient_from_record(
    record: &StringRecord,
    name_index: usize,
    unit_index: usize,
) -> IngredientEntry {
    IngredientEntry {
        name: record.get(name_index).unwrap_or_default().to_string(),
        measurement_unit: record.get(unit_index).unwrap_or_default().to_string(),
    }
}

fn parse_tag_rows(bytes: Vec<u8>) -> CatalogResult<Vec<TagEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(Cursor::new(bytes));

    let headers = reader.headers()?.clone();
    let name_index = locate_header(&headers, "name").ok_or(CatalogError::MissingHeader("name"))?;
    let color_index =
        locate_header(&headers, "color").ok_or(CatalogError::MissingHeader("color"))?;
    let slug_index = locate_header(&headers, "slug").ok_or(CatalogError::MissingHeader("slug"))?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        entries.push(TagEntry {
            name: record.get(name_index).unwrap_or_default().to_string(),
            color: record.get(color_index).unwrap_or_default().to_string(),
            slug: record.get(slug_index).unwrap_or_default().to_string(),
        });
    }

    Ok(entries)
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(expected))
}

fn required_text(value: &str, row: usize, field: &'static str) -> CatalogResult<String> {
    let sanitized = sanitize_inline_text(value);
    if sanitized.is_empty() {
        return Err(CatalogError::MissingField { row, field });
    }
    if sanitized.chars().count() > NAME_MAX_LEN {
        return Err(CatalogError::TooLong { row, field });
    }
    Ok(sanitized)
}

/// `#` followed by exactly six hex digits.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|ch| ch.is_ascii_hexdigit())
}

/// Non-empty run of ASCII letters, digits, `-` and `_`, at most 200 characters.
pub fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= NAME_MAX_LEN
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}
