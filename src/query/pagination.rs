//! Page arithmetic for the listing.

/// Number of pages needed for `total` rows, 0 when there are none
pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 || total == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a requested page into `1..=page_count` (page 1 when there are no pages)
pub fn clamp_page(page: u32, page_count: u32) -> u32 {
    page.clamp(1, page_count.max(1))
}

/// The page control is only worth showing when results overflow one page
pub fn shows_pagination(total: u64, page_size: u32) -> bool {
    total > u64::from(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 5), 0);
        assert_eq!(page_count(1, 5), 1);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(6, 5), 2);
        assert_eq!(page_count(12, 5), 3);
        assert_eq!(page_count(12, 0), 0);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let pages = page_count(12, 5);
        assert_eq!(clamp_page(4, pages), 3);
        assert_eq!(clamp_page(0, pages), 1);
        assert_eq!(clamp_page(2, pages), 2);
        assert_eq!(clamp_page(7, 0), 1);
    }

    #[test]
    fn test_pagination_visibility() {
        assert!(!shows_pagination(0, 5));
        assert!(!shows_pagination(5, 5));
        assert!(shows_pagination(6, 5));
    }
}
