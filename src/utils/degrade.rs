use std::fmt::Display;

/// Screen-boundary policy for reads: log the failure and show nothing.
pub fn or_empty<T, E: Display>(result: Result<Vec<T>, E>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Error fetching {}: {}", what, e);
            Vec::new()
        }
    }
}
