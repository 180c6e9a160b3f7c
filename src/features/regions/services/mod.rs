mod import_service;
mod region_service;

pub use import_service::{ImportSummary, RegionImportService};
pub use region_service::RegionService;
