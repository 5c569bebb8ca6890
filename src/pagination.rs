/// Returns page `page` of `records`, `page_size` entries per page.
///
/// No clamping happens here; a page that starts at or past the end is empty.
pub fn paginate<T>(records: Vec<T>, page: usize, page_size: usize) -> Vec<T> {
    let Some(start) = page.checked_mul(page_size) else {
        return Vec::new();
    };
    if start >= records.len() {
        return Vec::new();
    }
    records.into_iter().skip(start).take(page_size).collect()
}
