/// Largest size with the same aspect ratio whose sides are at most `max_dimension`.
/// Sizes already within the limit come back unchanged.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension || max_dimension == 0 {
        return (width, height);
    }
    let scale = max_dimension as f64 / longest as f64;
    let shrink = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_dimension);
    (shrink(width), shrink(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_limit_is_unchanged() {
        assert_eq!(fit_within(8192, 4096, 8192), (8192, 4096));
        assert_eq!(fit_within(1, 1, 8192), (1, 1));
    }

    #[test]
    fn test_equirect_halves_to_limit() {
        assert_eq!(fit_within(16384, 8192, 8192), (8192, 4096));
    }

    #[test]
    fn test_tall_image_keeps_aspect() {
        assert_eq!(fit_within(3000, 12000, 4000), (1000, 4000));
    }

    #[test]
    fn test_thin_side_never_collapses() {
        assert_eq!(fit_within(100_000, 2, 1000), (1000, 1));
    }
}
