/// Default number of search results returned when the client does not ask
/// for a specific limit
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Maximum number of search results a single request may ask for
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Cap on the candidate rows fetched for one autocomplete query before the
/// in-memory keyword filter runs.
///
/// Known limitation: the candidate fetch is an unindexed substring match
/// ordered by name, so a very common primary keyword can push true matches
/// beyond this cap and they will be missed. The search service logs a
/// warning whenever a query hits the cap.
pub const SEARCH_CANDIDATE_CAP: i64 = 500;

/// Keywords shorter than this are discarded from search queries
pub const MIN_KEYWORD_LEN: usize = 2;

/// Rows per INSERT statement during bulk region import
pub const IMPORT_CHUNK_SIZE: usize = 1000;
