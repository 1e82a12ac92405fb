use crate::model::PageReference;

/// Deep link to the first referenced page of a product's source PDF.
///
/// The link is `{storage_url}/{file_path}#page={n}`; `file_path` is used
/// verbatim. Returns `None` when the reference has no page numbers.
pub fn pdf_page_link(storage_url: &str, page_ref: &PageReference) -> Option<String> {
    let page = page_ref.first_page()?;
    Some(format!(
        "{}/{}#page={}",
        storage_url.trim_end_matches('/'),
        page_ref.file_path,
        page
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_uses_first_page_only() {
        let r = PageReference {
            file_path: "catalogs/minotti.pdf".into(),
            page_numbers: vec![12, 13, 14],
        };
        assert_eq!(
            pdf_page_link("https://cdn.example.com/bucket/", &r).as_deref(),
            Some("https://cdn.example.com/bucket/catalogs/minotti.pdf#page=12")
        );
    }

    #[test]
    fn test_file_path_is_not_rewritten() {
        let r = PageReference {
            file_path: "/uploads/Kartell 2024.pdf".into(),
            page_numbers: vec![5],
        };
        assert_eq!(
            pdf_page_link("https://cdn.example.com", &r).as_deref(),
            Some("https://cdn.example.com//uploads/Kartell 2024.pdf#page=5")
        );
    }

    #[test]
    fn test_no_pages_no_link() {
        let r = PageReference {
            file_path: "catalogs/minotti.pdf".into(),
            page_numbers: vec![],
        };
        assert_eq!(pdf_page_link("https://cdn.example.com", &r), None);
    }
}
