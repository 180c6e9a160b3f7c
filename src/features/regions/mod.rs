//! Indonesian administrative regions (wilayah) feature.
//!
//! A read-mostly directory of the 4-level administrative hierarchy with
//! hierarchy-aware autocomplete. The table is populated by the bulk import
//! subcommand and only read afterwards.
//!
//! ## Data Hierarchy
//!
//! - Level 1: Provinces (Provinsi)
//! - Level 2: Cities/Regencies (Kota/Kabupaten)
//! - Level 3: Districts (Kecamatan)
//! - Level 4: Villages (Kelurahan/Desa)
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/regions/search?q=&limit=` | Multi-keyword autocomplete over villages and districts |
//! | GET | `/api/regions/{id}` | Region by code with full ancestor chain |
//! | GET | `/api/regions/list/provinces` | All provinces |
//! | GET | `/api/regions/children/{parent_id}` | Direct children of a region |
//! | GET | `/api/regions/list/stats` | Row counts per level |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{RegionImportService, RegionService};
