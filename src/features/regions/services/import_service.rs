use std::path::Path;

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::regions::models::RegionLevel;
use crate::shared::constants::IMPORT_CHUNK_SIZE;
use crate::shared::validation::REGION_CODE_REGEX;

/// Dataset files in parent-before-child order so the self-referencing
/// foreign key is satisfied during insertion
const DATASET_FILES: [&str; 4] = [
    "provinces.csv",
    "regencies.csv",
    "districts.csv",
    "villages.csv",
];

/// One parsed dataset row, level and parent derived from the code
#[derive(Debug, Clone, PartialEq)]
struct RegionRecord {
    code: String,
    name: String,
    level: RegionLevel,
    parent_id: Option<String>,
    postal_code: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Row counts per level for one completed import
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportSummary {
    pub provinces: u64,
    pub cities: u64,
    pub districts: u64,
    pub villages: u64,
}

impl ImportSummary {
    pub fn total(&self) -> u64 {
        self.provinces + self.cities + self.districts + self.villages
    }

    fn record(&mut self, level: RegionLevel) {
        match level {
            RegionLevel::Province => self.provinces += 1,
            RegionLevel::City => self.cities += 1,
            RegionLevel::District => self.districts += 1,
            RegionLevel::Village => self.villages += 1,
        }
    }
}

/// Bulk importer for the external geographic dataset.
///
/// The import is a destructive full reload: the table is truncated and
/// repopulated inside a single transaction, so a failed import leaves the
/// previous dataset in place.
pub struct RegionImportService {
    pool: PgPool,
}

impl RegionImportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Import the four dataset files from a directory
    pub async fn import_dir(&self, dir: &Path) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin import transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("TRUNCATE TABLE regions")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to truncate regions: {:?}", e);
                AppError::Database(e)
            })?;

        for file in DATASET_FILES {
            let path = dir.join(file);
            let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
                AppError::Validation(format!("Cannot read {}: {}", path.display(), e))
            })?;

            let (records, skipped) = parse_dataset(&contents);
            if skipped > 0 {
                tracing::warn!("Skipped {} malformed rows in {}", skipped, file);
            }

            for chunk in records.chunks(IMPORT_CHUNK_SIZE) {
                let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                    "INSERT INTO regions (id, name, level, parent_id, postal_code, latitude, longitude) ",
                );
                builder.push_values(chunk, |mut row, record| {
                    row.push_bind(&record.code)
                        .push_bind(&record.name)
                        .push_bind(record.level)
                        .push_bind(&record.parent_id)
                        .push_bind(&record.postal_code)
                        .push_bind(record.latitude)
                        .push_bind(record.longitude);
                });

                builder.build().execute(&mut *tx).await.map_err(|e| {
                    tracing::error!("Failed to insert rows from {}: {:?}", file, e);
                    AppError::Database(e)
                })?;
            }

            for record in &records {
                summary.record(record.level);
            }
            tracing::info!("Imported {} rows from {}", records.len(), file);
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit import transaction: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(summary)
    }
}

/// Parse a whole dataset file, returning the valid records and the number
/// of skipped rows. The header line is skipped silently.
fn parse_dataset(contents: &str) -> (Vec<RegionRecord>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_record(line) {
            Some(record) => records.push(record),
            None if index == 0 => {} // header
            None => skipped += 1,
        }
    }

    (records, skipped)
}

/// Parse one `code,name[,postal_code[,latitude,longitude]]` row. Names may
/// be double-quoted and contain commas. Rows whose code does not match the
/// dotted format are rejected.
fn parse_record(line: &str) -> Option<RegionRecord> {
    let fields = split_csv_line(line);
    if fields.len() < 2 {
        return None;
    }

    let code = fields[0].trim();
    let name = fields[1].trim();
    if name.is_empty() {
        return None;
    }
    let level = level_for_code(code)?;

    let postal_code = fields
        .get(2)
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string);
    let latitude = fields.get(3).and_then(|f| f.trim().parse().ok());
    let longitude = fields.get(4).and_then(|f| f.trim().parse().ok());

    Some(RegionRecord {
        code: code.to_string(),
        name: name.to_string(),
        level,
        parent_id: parent_code(code),
        postal_code,
        latitude,
        longitude,
    })
}

/// Derive the level from the code's segment count (2-digit segments for
/// province/city/district, a 4-digit segment for villages)
fn level_for_code(code: &str) -> Option<RegionLevel> {
    if !REGION_CODE_REGEX.is_match(code) {
        return None;
    }

    match code.split('.').count() {
        1 => Some(RegionLevel::Province),
        2 => Some(RegionLevel::City),
        3 => Some(RegionLevel::District),
        4 => Some(RegionLevel::Village),
        _ => None,
    }
}

/// Parent code by truncating the last segment, None for provinces
fn parent_code(code: &str) -> Option<String> {
    code.rsplit_once('.').map(|(parent, _)| parent.to_string())
}

/// Split one CSV line on commas outside double quotes
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_code_by_segment_count() {
        assert_eq!(level_for_code("35"), Some(RegionLevel::Province));
        assert_eq!(level_for_code("35.14"), Some(RegionLevel::City));
        assert_eq!(level_for_code("35.14.18"), Some(RegionLevel::District));
        assert_eq!(level_for_code("35.14.18.2007"), Some(RegionLevel::Village));
        assert_eq!(level_for_code("kode"), None);
        assert_eq!(level_for_code(""), None);
    }

    #[test]
    fn test_parent_code_truncates_last_segment() {
        assert_eq!(parent_code("35"), None);
        assert_eq!(parent_code("35.14"), Some("35".to_string()));
        assert_eq!(parent_code("35.14.18.2007"), Some("35.14.18".to_string()));
    }

    #[test]
    fn test_parse_record_simple_row() {
        let record = parse_record("35.14,Pasuruan").unwrap();
        assert_eq!(record.code, "35.14");
        assert_eq!(record.name, "Pasuruan");
        assert_eq!(record.level, RegionLevel::City);
        assert_eq!(record.parent_id.as_deref(), Some("35"));
        assert_eq!(record.postal_code, None);
    }

    #[test]
    fn test_parse_record_quoted_name_with_comma() {
        let record = parse_record("\"35.14.18\",\"Gondangwetan, Timur\"").unwrap();
        assert_eq!(record.code, "35.14.18");
        assert_eq!(record.name, "Gondangwetan, Timur");
        assert_eq!(record.level, RegionLevel::District);
    }

    #[test]
    fn test_parse_record_village_with_optional_columns() {
        let record = parse_record("35.14.18.2007,Wonosari,67174,-7.6461,112.9812").unwrap();
        assert_eq!(record.level, RegionLevel::Village);
        assert_eq!(record.postal_code.as_deref(), Some("67174"));
        assert_eq!(record.latitude, Some(-7.6461));
        assert_eq!(record.longitude, Some(112.9812));
    }

    #[test]
    fn test_parse_record_rejects_invalid_code() {
        assert!(parse_record("kode,nama").is_none());
        assert!(parse_record("35.1,Short Segment").is_none());
        assert!(parse_record("35.14").is_none());
    }

    #[test]
    fn test_parse_dataset_skips_header_and_counts_malformed() {
        let contents = "kode,nama\n35,Jawa Timur\n\nnot-a-code,Broken\n35.14,Pasuruan\n";
        let (records, skipped) = parse_dataset(contents);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Jawa Timur");
        assert_eq!(records[1].name, "Pasuruan");
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_import_summary_total() {
        let mut summary = ImportSummary::default();
        summary.record(RegionLevel::Province);
        summary.record(RegionLevel::City);
        summary.record(RegionLevel::Village);
        summary.record(RegionLevel::Village);

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.villages, 2);
    }
}
