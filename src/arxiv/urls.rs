// URL layout for the arXiv listing and PDF endpoints.

/// Listing page URL for a category.
///
/// Page 0 has no `skip` parameter; page `n` skips `n * page_size` entries.
pub fn listing_url(base_url: &str, category: &str, page_index: usize, page_size: usize) -> String {
    let base_url = base_url.trim_end_matches('/');
    let mut url = format!("{base_url}/list/{category}/recent");
    if page_index > 0 {
        url.push_str(&format!("?skip={}", page_index * page_size));
    }
    url
}

/// PDF URL for a paper identifier.
pub fn pdf_url(base_url: &str, id: &str) -> String {
    format!("{}/pdf/{id}.pdf", base_url.trim_end_matches('/'))
}
