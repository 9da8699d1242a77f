use std::sync::atomic::{AtomicUsize, Ordering};

/// Default ceiling on terms collected by a single query rewrite.
pub const DEFAULT_TERMS_PER_QUERY_LIMIT: usize = 1024;

static TERMS_PER_QUERY_LIMIT: AtomicUsize = AtomicUsize::new(DEFAULT_TERMS_PER_QUERY_LIMIT);

/// Current terms-per-query limit. 0 means unlimited.
///
/// The value is read once at the start of each rewrite, so changing it
/// does not affect rewrites already in flight.
pub fn terms_per_query_limit() -> usize {
    TERMS_PER_QUERY_LIMIT.load(Ordering::Relaxed)
}

/// Set the process-wide terms-per-query limit. 0 removes the ceiling.
pub fn set_terms_per_query_limit(limit: usize) {
    TERMS_PER_QUERY_LIMIT.store(limit, Ordering::Relaxed);
}
