pub mod region_handler;

pub use region_handler::{
    __path_get_region, __path_get_stats, __path_list_children, __path_list_provinces,
    __path_search_regions, get_region, get_stats, list_children, list_provinces, search_regions,
};
