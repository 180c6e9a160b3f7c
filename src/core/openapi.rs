use utoipa::{Modify, OpenApi};

use crate::features::regions::{
    dtos as regions_dtos, handlers as regions_handlers, models as regions_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Regions
        regions_handlers::search_regions,
        regions_handlers::get_region,
        regions_handlers::list_provinces,
        regions_handlers::list_children,
        regions_handlers::get_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Regions
            regions_models::RegionLevel,
            regions_dtos::RegionResponseDto,
            regions_dtos::RegionSearchResultDto,
            regions_dtos::RegionStatsDto,
            ApiResponse<Vec<regions_dtos::RegionSearchResultDto>>,
            ApiResponse<regions_dtos::RegionSearchResultDto>,
            ApiResponse<Vec<regions_dtos::RegionResponseDto>>,
            ApiResponse<regions_dtos::RegionStatsDto>,
        )
    ),
    tags(
        (name = "regions", description = "Indonesian administrative regions (provinces, cities, districts, villages)"),
    ),
    info(
        title = "Wilayah API",
        version = "0.1.0",
        description = "Indonesian administrative region directory and autocomplete API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
