use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::regions::dtos::{
    RegionResponseDto, RegionSearchQuery, RegionSearchResultDto, RegionStatsDto,
};
use crate::features::regions::models::RegionHierarchy;
use crate::features::regions::services::RegionService;
use crate::shared::constants::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::shared::types::{ApiResponse, Meta};

/// Search regions by keywords (autocomplete)
///
/// Returns matching villages and districts with their full ancestor chain.
/// Queries shorter than two characters return an empty list.
#[utoipa::path(
    get,
    path = "/api/regions/search",
    params(RegionSearchQuery),
    responses(
        (status = 200, description = "List of matching regions", body = ApiResponse<Vec<RegionSearchResultDto>>)
    ),
    tag = "regions"
)]
pub async fn search_regions(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<RegionSearchQuery>,
) -> Result<Json<ApiResponse<Vec<RegionSearchResultDto>>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let results = service
        .search(query.q.as_deref().unwrap_or(""), limit)
        .await?;
    let dtos: Vec<RegionSearchResultDto> = results.into_iter().map(Into::into).collect();
    let meta = Meta {
        total: dtos.len() as i64,
    };

    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get a region by id with its full ancestor chain
#[utoipa::path(
    get,
    path = "/api/regions/{id}",
    params(
        ("id" = String, Path, description = "Region code (e.g. 35.14.18.2007)")
    ),
    responses(
        (status = 200, description = "Region with resolved hierarchy", body = ApiResponse<RegionSearchResultDto>),
        (status = 404, description = "Region not found")
    ),
    tag = "regions"
)]
pub async fn get_region(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RegionSearchResultDto>>> {
    let resolved = service.find_with_ancestors(&id).await?;
    let dto: RegionSearchResultDto = RegionHierarchy::from(resolved).into();

    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// List all provinces
#[utoipa::path(
    get,
    path = "/api/regions/list/provinces",
    responses(
        (status = 200, description = "All provinces ordered by name", body = ApiResponse<Vec<RegionResponseDto>>)
    ),
    tag = "regions"
)]
pub async fn list_provinces(
    State(service): State<Arc<RegionService>>,
) -> Result<Json<ApiResponse<Vec<RegionResponseDto>>>> {
    let provinces = service.list_provinces().await?;
    let dtos: Vec<RegionResponseDto> = provinces.into_iter().map(Into::into).collect();
    let meta = Meta {
        total: dtos.len() as i64,
    };

    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// List direct children of a region (drill-down)
#[utoipa::path(
    get,
    path = "/api/regions/children/{parent_id}",
    params(
        ("parent_id" = String, Path, description = "Parent region code")
    ),
    responses(
        (status = 200, description = "Direct children ordered by name", body = ApiResponse<Vec<RegionResponseDto>>)
    ),
    tag = "regions"
)]
pub async fn list_children(
    State(service): State<Arc<RegionService>>,
    Path(parent_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<RegionResponseDto>>>> {
    let children = service.list_children(&parent_id).await?;
    let dtos: Vec<RegionResponseDto> = children.into_iter().map(Into::into).collect();
    let meta = Meta {
        total: dtos.len() as i64,
    };

    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get per-level region counts
#[utoipa::path(
    get,
    path = "/api/regions/list/stats",
    responses(
        (status = 200, description = "Region counts per level", body = ApiResponse<RegionStatsDto>)
    ),
    tag = "regions"
)]
pub async fn get_stats(
    State(service): State<Arc<RegionService>>,
) -> Result<Json<ApiResponse<RegionStatsDto>>> {
    let stats = service.stats().await?;

    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
