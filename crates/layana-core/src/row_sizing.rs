//! How many table rows fit the visible container.

/// `max(min_rows, floor((container - header) / row))`.
///
/// Measurements that are not finite or not positive fall back to `min_rows`.
pub fn rows_that_fit(container_height: f64, header_height: f64, row_height: f64, min_rows: u32) -> u32 {
    if !container_height.is_finite() || !header_height.is_finite() || !row_height.is_finite() {
        return min_rows;
    }
    if container_height <= 0.0 || row_height <= 0.0 {
        return min_rows;
    }
    let available = container_height - header_height.max(0.0);
    if available <= 0.0 {
        return min_rows;
    }
    let rows = (available / row_height).floor();
    if rows >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    (rows as u32).max(min_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_that_fit() {
        assert_eq!(rows_that_fit(568.0, 48.0, 52.0, 5), 10);
        assert_eq!(rows_that_fit(600.0, 48.0, 52.0, 5), 10);
        assert_eq!(rows_that_fit(1100.0, 48.0, 52.0, 5), 20);
    }

    #[test]
    fn test_small_container_uses_minimum() {
        assert_eq!(rows_that_fit(100.0, 48.0, 52.0, 5), 5);
        assert_eq!(rows_that_fit(40.0, 48.0, 52.0, 5), 5);
    }

    #[test]
    fn test_bad_measurements_fall_back() {
        assert_eq!(rows_that_fit(f64::NAN, 48.0, 52.0, 5), 5);
        assert_eq!(rows_that_fit(600.0, 48.0, 0.0, 5), 5);
        assert_eq!(rows_that_fit(f64::INFINITY, 48.0, 52.0, 5), 5);
        assert_eq!(rows_that_fit(-3.0, 48.0, 52.0, 5), 5);
    }
}
