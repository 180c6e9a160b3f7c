use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Administrative level of a region, strict 4-tier hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "region_level", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RegionLevel {
    Province,
    City,
    District,
    Village,
}

impl RegionLevel {
    /// The level one step up the hierarchy, None for provinces
    pub fn parent(self) -> Option<RegionLevel> {
        match self {
            RegionLevel::Province => None,
            RegionLevel::City => Some(RegionLevel::Province),
            RegionLevel::District => Some(RegionLevel::City),
            RegionLevel::Village => Some(RegionLevel::District),
        }
    }
}

/// Region model representing one node of the Indonesian administrative
/// hierarchy (provinsi, kota/kabupaten, kecamatan, kelurahan/desa).
///
/// The id is the dotted national code; its segment count encodes the level
/// and truncating the last segment yields the parent id. Postal code and
/// coordinates are only present on village rows in practice.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub level: RegionLevel,
    pub parent_id: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parent_chain_terminates_at_province() {
        let mut level = Some(RegionLevel::Village);
        let mut hops = 0;
        while let Some(current) = level {
            level = current.parent();
            if level.is_some() {
                hops += 1;
            }
        }
        // VILLAGE -> DISTRICT -> CITY -> PROVINCE
        assert_eq!(hops, 3);
        assert_eq!(RegionLevel::Province.parent(), None);
    }
}
