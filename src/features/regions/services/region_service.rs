use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::regions::dtos::RegionStatsDto;
use crate::features::regions::models::{Region, RegionHierarchy, RegionLevel, RegionWithAncestors};
use crate::shared::constants::{MIN_KEYWORD_LEN, SEARCH_CANDIDATE_CAP};

/// One candidate row from the search query: the region itself plus the
/// names of up to three resolved ancestors
#[derive(Debug, FromRow)]
struct SearchCandidateRow {
    #[sqlx(flatten)]
    region: Region,
    parent_name: Option<String>,
    grandparent_name: Option<String>,
    great_grandparent_name: Option<String>,
}

impl From<SearchCandidateRow> for RegionHierarchy {
    fn from(row: SearchCandidateRow) -> Self {
        let ancestor_names = [
            row.parent_name,
            row.grandparent_name,
            row.great_grandparent_name,
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            region: row.region,
            ancestor_names,
        }
    }
}

/// Read service over the administrative region tree
pub struct RegionService {
    pool: PgPool,
}

impl RegionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Search villages and districts by multiple keywords (autocomplete style)
    ///
    /// Examples:
    /// - "wonosari" matches every region named Wonosari
    /// - "wonosari gond" narrows to Wonosari inside Gondangwetan (partial match)
    /// - "wonosari pasuruan" narrows by a distant ancestor name
    ///
    /// The first keyword bounds a broad candidate fetch in the database; the
    /// remaining keywords are applied in memory with AND semantics over the
    /// region's own name and its ancestor names. Queries shorter than two
    /// characters yield an empty list, never an error.
    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<RegionHierarchy>> {
        let keywords = Self::parse_keywords(query);
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let primary_pattern = format!("%{}%", keywords[0]);
        let rows = sqlx::query_as::<_, SearchCandidateRow>(
            r#"
            SELECT r.id, r.name, r.level, r.parent_id, r.postal_code,
                   r.latitude, r.longitude, r.created_at, r.updated_at,
                   p1.name AS parent_name,
                   p2.name AS grandparent_name,
                   p3.name AS great_grandparent_name
            FROM regions r
            LEFT JOIN regions p1 ON p1.id = r.parent_id
            LEFT JOIN regions p2 ON p2.id = p1.parent_id
            LEFT JOIN regions p3 ON p3.id = p2.parent_id
            WHERE r.level IN ('DISTRICT', 'VILLAGE')
              AND (r.name ILIKE $1
                   OR p1.name ILIKE $1
                   OR p2.name ILIKE $1
                   OR p3.name ILIKE $1)
            ORDER BY r.name ASC
            LIMIT $2
            "#,
        )
        .bind(&primary_pattern)
        .bind(SEARCH_CANDIDATE_CAP)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch search candidates: {:?}", e);
            AppError::Database(e)
        })?;

        if rows.len() as i64 >= SEARCH_CANDIDATE_CAP {
            tracing::warn!(
                "Search for {:?} hit the {}-row candidate cap; results may be incomplete",
                query,
                SEARCH_CANDIDATE_CAP
            );
        }

        let candidates = rows.into_iter().map(RegionHierarchy::from).collect();
        Ok(Self::filter_candidates(candidates, &keywords, limit))
    }

    /// Split a query into lower-cased keywords, dropping the ones too short
    /// to be meaningful. An empty result means "return no matches".
    fn parse_keywords(query: &str) -> Vec<String> {
        if query.len() < MIN_KEYWORD_LEN {
            return Vec::new();
        }

        query
            .to_lowercase()
            .split_whitespace()
            .filter(|keyword| keyword.len() >= MIN_KEYWORD_LEN)
            .map(str::to_string)
            .collect()
    }

    /// Keep candidates matching ALL keywords, truncated to the limit
    fn filter_candidates(
        candidates: Vec<RegionHierarchy>,
        keywords: &[String],
        limit: i64,
    ) -> Vec<RegionHierarchy> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.matches_keywords(keywords))
            .take(limit.max(0) as usize)
            .collect()
    }

    /// Get a region by id with its full ancestor chain resolved
    ///
    /// The chain is walked with an explicit loop: the hierarchy is exactly
    /// four levels deep, so at most three hops reach the province.
    pub async fn find_with_ancestors(&self, id: &str) -> Result<RegionWithAncestors> {
        let region = self
            .find_region(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Region '{}' not found", id)))?;

        let mut ancestors = Vec::with_capacity(3);
        let mut next_parent = region.parent_id.clone();
        for _ in 0..3 {
            let Some(parent_id) = next_parent else { break };
            match self.find_region(&parent_id).await? {
                Some(parent) => {
                    next_parent = parent.parent_id.clone();
                    ancestors.push(parent);
                }
                None => {
                    tracing::warn!("Region {} references missing parent {}", region.id, parent_id);
                    break;
                }
            }
        }

        Ok(RegionWithAncestors { region, ancestors })
    }

    async fn find_region(&self, id: &str) -> Result<Option<Region>> {
        sqlx::query_as::<_, Region>(
            r#"
            SELECT id, name, level, parent_id, postal_code, latitude, longitude,
                   created_at, updated_at
            FROM regions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch region {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    /// All provinces ordered by name, the root set for drill-down UIs
    pub async fn list_provinces(&self) -> Result<Vec<Region>> {
        sqlx::query_as::<_, Region>(
            r#"
            SELECT id, name, level, parent_id, postal_code, latitude, longitude,
                   created_at, updated_at
            FROM regions
            WHERE level = 'PROVINCE'
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch provinces: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Direct children of a region ordered by name; unknown or leaf ids
    /// yield an empty list
    pub async fn list_children(&self, parent_id: &str) -> Result<Vec<Region>> {
        sqlx::query_as::<_, Region>(
            r#"
            SELECT id, name, level, parent_id, postal_code, latitude, longitude,
                   created_at, updated_at
            FROM regions
            WHERE parent_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch children of region {}: {:?}", parent_id, e);
            AppError::Database(e)
        })
    }

    /// Per-level region counts plus their total, issued as four independent
    /// queries run concurrently
    pub async fn stats(&self) -> Result<RegionStatsDto> {
        let (provinces, cities, districts, villages) = futures::try_join!(
            self.count_level(RegionLevel::Province),
            self.count_level(RegionLevel::City),
            self.count_level(RegionLevel::District),
            self.count_level(RegionLevel::Village),
        )?;

        Ok(RegionStatsDto::new(provinces, cities, districts, villages))
    }

    async fn count_level(&self, level: RegionLevel) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM regions WHERE level = $1")
            .bind(level)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count {:?} regions: {:?}", level, e);
                AppError::Database(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::regions::dtos::RegionSearchResultDto;
    use chrono::Utc;

    fn hierarchy(name: &str, level: RegionLevel, ancestors: &[&str]) -> RegionHierarchy {
        RegionHierarchy {
            region: Region {
                id: "35.14.18.2007".to_string(),
                name: name.to_string(),
                level,
                parent_id: None,
                postal_code: None,
                latitude: None,
                longitude: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            ancestor_names: ancestors.iter().map(|n| n.to_string()).collect(),
        }
    }

    fn fixture() -> Vec<RegionHierarchy> {
        vec![
            hierarchy(
                "Wonosari",
                RegionLevel::Village,
                &["Gondangwetan", "Pasuruan", "Jawa Timur"],
            ),
            hierarchy(
                "Wonosari",
                RegionLevel::Village,
                &["Wonosari", "Gunungkidul", "DI Yogyakarta"],
            ),
            hierarchy(
                "Wonosari",
                RegionLevel::District,
                &["Gunungkidul", "DI Yogyakarta"],
            ),
            hierarchy("Menteng", RegionLevel::District, &["Jakarta Pusat", "DKI Jakarta"]),
        ]
    }

    #[test]
    fn test_parse_keywords_rejects_empty_and_single_char() {
        assert!(RegionService::parse_keywords("").is_empty());
        assert!(RegionService::parse_keywords("a").is_empty());
        // Only single-char tokens survive the split, so nothing remains
        assert!(RegionService::parse_keywords("a b c").is_empty());
    }

    #[test]
    fn test_parse_keywords_lowercases_and_drops_short_tokens() {
        assert_eq!(
            RegionService::parse_keywords("Wonosari  GOND x"),
            vec!["wonosari".to_string(), "gond".to_string()]
        );
    }

    #[test]
    fn test_filter_requires_every_keyword() {
        let broad = RegionService::filter_candidates(
            fixture(),
            &["wonosari".to_string()],
            10,
        );
        assert_eq!(broad.len(), 3);

        let narrowed = RegionService::filter_candidates(
            fixture(),
            &["wonosari".to_string(), "pasuruan".to_string()],
            10,
        );
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].ancestor_names[0], "Gondangwetan");
    }

    #[test]
    fn test_adding_a_keyword_never_grows_the_result_set() {
        let broad = RegionService::filter_candidates(fixture(), &["wonosari".to_string()], 10);
        let narrowed = RegionService::filter_candidates(
            fixture(),
            &["wonosari".to_string(), "gunungkidul".to_string()],
            10,
        );

        assert!(narrowed.len() <= broad.len());
        for candidate in &narrowed {
            assert!(broad.iter().any(|b| b.full_name() == candidate.full_name()));
        }
    }

    #[test]
    fn test_filter_truncates_to_limit() {
        let limited = RegionService::filter_candidates(fixture(), &["wonosari".to_string()], 2);
        assert_eq!(limited.len(), 2);

        let none = RegionService::filter_candidates(fixture(), &["wonosari".to_string()], 0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_multi_keyword_example_yields_single_full_name() {
        // "wonosari gond" must single out the Pasuruan village and render
        // its complete chain
        let keywords = RegionService::parse_keywords("wonosari gond");
        let results = RegionService::filter_candidates(fixture(), &keywords, 10);

        assert_eq!(results.len(), 1);
        let dto = RegionSearchResultDto::from(results.into_iter().next().unwrap());
        assert_eq!(dto.full_name, "Wonosari, Gondangwetan, Pasuruan, Jawa Timur");
    }

    #[test]
    fn test_candidate_row_flattens_missing_ancestors() {
        let row = SearchCandidateRow {
            region: hierarchy("Gondangwetan", RegionLevel::District, &[]).region,
            parent_name: Some("Pasuruan".to_string()),
            grandparent_name: Some("Jawa Timur".to_string()),
            great_grandparent_name: None,
        };

        let converted = RegionHierarchy::from(row);
        assert_eq!(converted.ancestor_names, vec!["Pasuruan", "Jawa Timur"]);
    }
}
