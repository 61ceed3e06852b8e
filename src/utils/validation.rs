//! Centralized validation and helper functions.

/// Largest cutoff for which exhaustive path search stays tractable
pub const MAX_EXHAUSTIVE_CUTOFF: usize = 25;

/// Maximum number of segment rows accepted from a single input (DOS protection)
pub const MAX_ROWS: usize = 10_000_000;

/// Check a configured cutoff against the exhaustive-search bound.
///
/// Exhaustive search is exponential in the number of segments per hit and
/// cannot be interrupted. A cutoff above [`MAX_EXHAUSTIVE_CUTOFF`] is allowed,
/// but reported so the caller can surface the risk.
///
/// # Examples
///
/// ```
/// use besthits::utils::validation::check_cutoff;
///
/// assert!(check_cutoff(20).is_none());
/// assert!(check_cutoff(40).is_some());
/// ```
#[must_use]
pub fn check_cutoff(cutoff: usize) -> Option<String> {
    if cutoff > MAX_EXHAUSTIVE_CUTOFF {
        Some(format!(
            "Cutoff {cutoff} exceeds {MAX_EXHAUSTIVE_CUTOFF}: exact path search on hits with up to \
             {cutoff} segments may not finish in reasonable time"
        ))
    } else {
        None
    }
}

/// Check if adding another row would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new row.
#[must_use]
pub fn check_row_limit(count: usize) -> Option<String> {
    if count >= MAX_ROWS {
        Some(format!(
            "Too many rows: adding another would exceed maximum of {MAX_ROWS}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_cutoff() {
        assert!(check_cutoff(0).is_none());
        assert!(check_cutoff(MAX_EXHAUSTIVE_CUTOFF).is_none());

        let message = check_cutoff(MAX_EXHAUSTIVE_CUTOFF + 1).unwrap();
        assert!(message.contains("26"));
    }

    #[test]
    fn test_check_row_limit() {
        assert!(check_row_limit(0).is_none());
        assert!(check_row_limit(MAX_ROWS - 1).is_none());
        assert!(check_row_limit(MAX_ROWS).is_some());
    }
}
