/// Fixed page size for question listings.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// 1-indexed slice of an ordered result set. Pages outside the range, page 0
/// included, come back empty; callers decide what an empty page means.
pub fn paginate<T>(items: Vec<T>, page: u32) -> Vec<T> {
    let Some(start) = (page as usize)
        .checked_sub(1)
        .map(|page| page * QUESTIONS_PER_PAGE)
    else {
        return Vec::new();
    };
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}
