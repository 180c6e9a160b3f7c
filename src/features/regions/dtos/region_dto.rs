use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::regions::models::{Region, RegionHierarchy, RegionLevel};

/// Query parameters for the autocomplete search endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RegionSearchQuery {
    /// Free-text query; whitespace-separated keywords are AND-combined
    /// across a region's own name and its ancestor names
    #[param(example = "wonosari pasuruan")]
    pub q: Option<String>,

    /// Maximum number of results (default: 10, max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
}

/// Response DTO for a bare region row (provinces list, children drill-down)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionResponseDto {
    pub id: String,
    pub name: String,
    pub level: RegionLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl From<Region> for RegionResponseDto {
    fn from(region: Region) -> Self {
        Self {
            id: region.id,
            name: region.name,
            level: region.level,
            parent_id: region.parent_id,
            postal_code: region.postal_code,
            latitude: region.latitude,
            longitude: region.longitude,
        }
    }
}

/// Response DTO for a region with its ancestor chain rendered, as returned
/// by search and point lookup. The per-level name fields are populated
/// according to the region's own level: a village fills all four, a
/// district fills district/city/province, a province only province.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionSearchResultDto {
    pub id: String,
    /// Comma-joined names from the region itself up to its province,
    /// e.g. "Wonosari, Gondangwetan, Pasuruan, Jawa Timur"
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl From<RegionHierarchy> for RegionSearchResultDto {
    fn from(hierarchy: RegionHierarchy) -> Self {
        let full_name = hierarchy.full_name();

        // Walk names upward, assigning each to the slot its level dictates
        let mut village = None;
        let mut district = None;
        let mut city = None;
        let mut province = None;
        let mut slot = Some(hierarchy.region.level);
        for name in hierarchy.names() {
            match slot {
                Some(RegionLevel::Village) => village = Some(name.to_string()),
                Some(RegionLevel::District) => district = Some(name.to_string()),
                Some(RegionLevel::City) => city = Some(name.to_string()),
                Some(RegionLevel::Province) => province = Some(name.to_string()),
                None => break,
            }
            slot = slot.and_then(RegionLevel::parent);
        }

        Self {
            id: hierarchy.region.id,
            full_name,
            village,
            district,
            city,
            province,
            postal_code: hierarchy.region.postal_code,
            latitude: hierarchy.region.latitude,
            longitude: hierarchy.region.longitude,
        }
    }
}

/// Per-level region counts; total is always the sum of the four levels
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionStatsDto {
    pub provinces: i64,
    pub cities: i64,
    pub districts: i64,
    pub villages: i64,
    pub total: i64,
}

impl RegionStatsDto {
    pub fn new(provinces: i64, cities: i64, districts: i64, villages: i64) -> Self {
        Self {
            provinces,
            cities,
            districts,
            villages,
            total: provinces + cities + districts + villages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn region(id: &str, name: &str, level: RegionLevel) -> Region {
        Region {
            id: id.to_string(),
            name: name.to_string(),
            level,
            parent_id: None,
            postal_code: None,
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_village_result_populates_all_four_levels() {
        let dto = RegionSearchResultDto::from(RegionHierarchy {
            region: region("35.14.18.2007", "Wonosari", RegionLevel::Village),
            ancestor_names: vec![
                "Gondangwetan".to_string(),
                "Pasuruan".to_string(),
                "Jawa Timur".to_string(),
            ],
        });

        assert_eq!(dto.full_name, "Wonosari, Gondangwetan, Pasuruan, Jawa Timur");
        assert_eq!(dto.village.as_deref(), Some("Wonosari"));
        assert_eq!(dto.district.as_deref(), Some("Gondangwetan"));
        assert_eq!(dto.city.as_deref(), Some("Pasuruan"));
        assert_eq!(dto.province.as_deref(), Some("Jawa Timur"));
    }

    #[test]
    fn test_district_result_skips_village_slot() {
        let dto = RegionSearchResultDto::from(RegionHierarchy {
            region: region("35.14.18", "Gondangwetan", RegionLevel::District),
            ancestor_names: vec!["Pasuruan".to_string(), "Jawa Timur".to_string()],
        });

        assert_eq!(dto.village, None);
        assert_eq!(dto.district.as_deref(), Some("Gondangwetan"));
        assert_eq!(dto.city.as_deref(), Some("Pasuruan"));
        assert_eq!(dto.province.as_deref(), Some("Jawa Timur"));
    }

    #[test]
    fn test_province_result_populates_only_province() {
        let dto = RegionSearchResultDto::from(RegionHierarchy {
            region: region("35", "Jawa Timur", RegionLevel::Province),
            ancestor_names: vec![],
        });

        assert_eq!(dto.village, None);
        assert_eq!(dto.district, None);
        assert_eq!(dto.city, None);
        assert_eq!(dto.province.as_deref(), Some("Jawa Timur"));
        assert_eq!(dto.full_name, "Jawa Timur");
    }

    #[test]
    fn test_search_result_serialization_skips_absent_levels() {
        let dto = RegionSearchResultDto::from(RegionHierarchy {
            region: region("35", "Jawa Timur", RegionLevel::Province),
            ancestor_names: vec![],
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["fullName"], "Jawa Timur");
        assert!(json.get("village").is_none());
        assert!(json.get("postalCode").is_none());
    }

    #[test]
    fn test_stats_total_is_sum_of_levels() {
        let stats = RegionStatsDto::new(37, 514, 7257, 82830);
        assert_eq!(stats.total, 37 + 514 + 7257 + 82830);
    }
}
