pub const QUESTIONS_PER_PAGE: usize = 10;

/// Items of the 1-indexed `page`. Pages below 1 and pages past the end are empty.
pub fn paginate<T>(page: i64, items: &[T]) -> &[T] {
    let Some(index) = usize::try_from(page).ok().and_then(|p| p.checked_sub(1)) else {
        return &[];
    };
    let Some(start) = index.checked_mul(QUESTIONS_PER_PAGE) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
