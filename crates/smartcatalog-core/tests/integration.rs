//! Integration tests for the library and BOQ flows.
//!
//! Uses a MockBackend that serves canned responses and records every call,
//! so these tests run without a catalog server.

use smartcatalog_core::api::{CatalogBackend, SearchQuery};
use smartcatalog_core::boq::{BoqState, BoqSummary, FailReason};
use smartcatalog_core::error::CatalogError;
use smartcatalog_core::library::{LibraryView, CLEAR_FAILED, SEARCH_FAILED};
use smartcatalog_core::model::{BoqLineItem, BoqResult, MatchStatus, PageReference, Product};
use smartcatalog_core::notice::{Notice, NoticeLevel};
use smartcatalog_core::{
    apply_filters, derive_facet_options, import_products, upload_catalog, BoqSession,
    DefaultSelection, Facet, FilterState,
};
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

#[derive(Default)]
struct MockBackend {
    products: Vec<Product>,
    boq_results: Vec<BoqResult>,
    fail_with: Option<(u16, &'static str)>,
    calls: RefCell<Vec<String>>,
}

impl MockBackend {
    fn record(&self, call: &str) -> Result<(), CatalogError> {
        self.calls.borrow_mut().push(call.to_string());
        match self.fail_with {
            Some((status, detail)) => Err(CatalogError::Backend {
                status,
                detail: detail.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CatalogBackend for MockBackend {
    fn search(&self, query: &SearchQuery) -> Result<Vec<Product>, CatalogError> {
        self.record(&format!("search:{}", query.query))?;
        let q = query.query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| p.name().is_some_and(|n| n.to_lowercase().contains(&q)))
            .cloned()
            .collect())
    }

    fn product(&self, id: i64) -> Result<Option<Product>, CatalogError> {
        self.record(&format!("product:{id}"))?;
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.record("all_products")?;
        Ok(self.products.clone())
    }

    fn clear_products(&self) -> Result<String, CatalogError> {
        self.record("clear_products")?;
        Ok("All products cleared successfully".into())
    }

    fn upload_pdf(&self, path: &Path) -> Result<String, CatalogError> {
        self.record("upload_pdf")?;
        Ok(format!("Processed 0 products from {}", path.display()))
    }

    fn import_json(&self, _path: &Path) -> Result<String, CatalogError> {
        self.record("import_json")?;
        Ok("imported".into())
    }

    fn process_boq_file(&self, _path: &Path) -> Result<Vec<BoqResult>, CatalogError> {
        self.record("process_boq_file")?;
        Ok(self.boq_results.clone())
    }

    fn process_boq_text(&self, items: &[BoqLineItem]) -> Result<Vec<BoqResult>, CatalogError> {
        self.record(&format!("process_boq_text:{}", items.len()))?;
        Ok(self.boq_results.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn product(id: i64, name: &str, brand: &str, kind: &str, colors: &[&str], pdf: Option<&str>) -> Product {
    Product {
        id,
        product_name: Some(name.into()),
        brand_name: Some(brand.into()),
        type_of_product: Some(kind.into()),
        all_colors: colors.iter().map(|c| c.to_string()).collect(),
        page_reference: pdf.map(|f| PageReference {
            file_path: f.into(),
            page_numbers: vec![3],
        }),
        ..Default::default()
    }
}

fn catalog() -> Vec<Product> {
    vec![
        product(10, "Butterfly Keramik", "Cattelan Italia", "tavolo", &["white"], Some("cattelan.pdf")),
        product(11, "Pattie", "Minotti", "poltrona", &["red", "blue"], Some("minotti.pdf")),
        product(12, "Componibili", "Kartell", "contenitore", &["red"], None),
        product(13, "Hamilton", "Minotti", "divano", &["grey"], Some("minotti.pdf")),
        product(14, "Tiffany", "Cattelan Italia", "tavolo", &["black", "white"], Some("cattelan.pdf")),
    ]
}

fn boq_result(name: &str, matches: Vec<Product>) -> BoqResult {
    BoqResult {
        status: if matches.is_empty() {
            MatchStatus::NotFound
        } else {
            MatchStatus::Found
        },
        boq_item: BoqLineItem {
            name: name.into(),
            brand: "Minotti".into(),
            product_type: "poltrona".into(),
        },
        message: None,
        matches,
        selected_match: None,
    }
}

fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.id).collect()
}

// ---------------------------------------------------------------------------
// Filter engine over a fetched snapshot
// ---------------------------------------------------------------------------
#[test]
fn brand_filter_keeps_snapshot_order() {
    let snapshot = catalog();
    let options = derive_facet_options(&snapshot);
    assert!(options.brand_names.contains(&"Minotti".to_string()));

    let filters = FilterState {
        brand_names: vec!["Minotti".into()],
        designers: vec![],
        types: vec![],
        colors: vec![],
        pdfs: vec![],
    };
    assert_eq!(ids(&apply_filters(&snapshot, &filters)), vec![11, 13]);
}

#[test]
fn facet_options_from_catalog() {
    let options = derive_facet_options(&catalog());
    assert_eq!(
        options.for_facet(Facet::Brand),
        ["Cattelan Italia", "Kartell", "Minotti"].map(String::from)
    );
    assert_eq!(
        options.for_facet(Facet::Color),
        ["black", "blue", "grey", "red", "white"].map(String::from)
    );
    assert_eq!(
        options.for_facet(Facet::Pdf),
        ["cattelan.pdf", "minotti.pdf"].map(String::from)
    );
}

// ---------------------------------------------------------------------------
// Library view flows
// ---------------------------------------------------------------------------
#[test]
fn load_all_then_filter() {
    let backend = MockBackend {
        products: catalog(),
        ..Default::default()
    };
    let mut view = LibraryView::new();
    let notice = view.load_all(&backend).unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(view.snapshot().len(), 5);

    view.apply(
        FilterState::default()
            .with(Facet::Type, ["tavolo"])
            .with(Facet::Color, ["black"]),
    );
    assert_eq!(ids(&view.visible()), vec![14]);

    view.clear_filters();
    assert_eq!(view.visible().len(), 5);
}

#[test]
fn empty_search_is_informational() {
    let backend = MockBackend {
        products: catalog(),
        ..Default::default()
    };
    let mut view = LibraryView::new();
    let notice = view.search(&backend, &SearchQuery::new("chandelier")).unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.title, "No results");
    assert!(view.snapshot().is_empty());
}

#[test]
fn failed_search_keeps_previous_snapshot() {
    let mut view = LibraryView::new();
    view.set_products(catalog());
    view.apply(FilterState::default().with(Facet::Brand, ["Minotti"]));

    let failing = MockBackend {
        fail_with: Some((500, "search index unavailable")),
        ..Default::default()
    };
    let err = view
        .search(&failing, &SearchQuery::new("pattie"))
        .unwrap_err();
    let notice = Notice::from_error(&err, SEARCH_FAILED);
    assert!(notice.is_error());
    assert_eq!(notice.description, "search index unavailable");
    assert_eq!(view.snapshot().len(), 5);
    assert_eq!(ids(&view.visible()), vec![11, 13]);
}

#[test]
fn filters_survive_successful_reload() {
    let backend = MockBackend {
        products: catalog(),
        ..Default::default()
    };
    let mut view = LibraryView::new();
    view.apply(FilterState::default().with(Facet::Brand, ["Minotti"]));

    view.load_all(&backend).unwrap();
    assert_eq!(view.filters().values(Facet::Brand), ["Minotti".to_string()]);
    assert_eq!(ids(&view.visible()), vec![11, 13]);

    view.search(&backend, &SearchQuery::new("t")).unwrap();
    assert_eq!(ids(view.snapshot().products()), vec![10, 11, 13, 14]);
    assert_eq!(view.filters().values(Facet::Brand), ["Minotti".to_string()]);
    assert_eq!(ids(&view.visible()), vec![11, 13]);
}

#[test]
fn clear_catalog_empties_only_on_success() {
    let mut view = LibraryView::new();
    view.set_products(catalog());

    let failing = MockBackend {
        fail_with: Some((500, "locked")),
        ..Default::default()
    };
    let err = view.clear_catalog(&failing).unwrap_err();
    assert_eq!(Notice::from_error(&err, CLEAR_FAILED).description, "locked");
    assert_eq!(view.snapshot().len(), 5);

    let ok = MockBackend::default();
    assert_eq!(view.clear_catalog(&ok).unwrap().level, NoticeLevel::Success);
    assert!(view.snapshot().is_empty());
    assert!(view.facet_options().is_empty());
}

#[test]
fn upload_rejects_non_pdf_without_calling_backend() {
    let backend = MockBackend::default();
    let err = upload_catalog(&backend, Path::new("catalog.docx")).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedFile { .. }));
    assert!(backend.calls().is_empty());

    let msg = upload_catalog(&backend, Path::new("catalogs/Minotti.PDF")).unwrap();
    assert!(msg.starts_with("Processed"));
    assert_eq!(backend.calls(), vec!["upload_pdf"]);
}

#[test]
fn import_rejects_non_json_without_calling_backend() {
    let backend = MockBackend::default();
    let err = import_products(&backend, Path::new("products.csv")).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedFile { .. }));
    assert!(err.is_validation());
    assert!(backend.calls().is_empty());

    assert_eq!(import_products(&backend, Path::new("export/Products.JSON")).unwrap(), "imported");
    assert_eq!(backend.calls(), vec!["import_json"]);
}

// ---------------------------------------------------------------------------
// BOQ session
// ---------------------------------------------------------------------------
#[test]
fn malformed_boq_never_reaches_backend() {
    let backend = MockBackend::default();
    let mut session = BoqSession::new();

    let err = session
        .submit_text(&backend, "OnlyOneField", DefaultSelection::Unset)
        .unwrap_err();
    assert!(matches!(err, CatalogError::MalformedLine { line: 1, .. }));
    assert!(matches!(
        session.state(),
        BoqState::Failed(FailReason::MalformedInput(_))
    ));
    assert!(backend.calls().is_empty());
    assert!(session.can_submit());
}

#[test]
fn successful_submission_replaces_results() {
    let catalog = catalog();
    let backend = MockBackend {
        boq_results: vec![
            boq_result("Butterfly Keramik", vec![catalog[0].clone(), catalog[4].clone()]),
            boq_result("Pattie", vec![catalog[1].clone()]),
        ],
        ..Default::default()
    };
    let mut session = BoqSession::new();
    let results = session
        .submit_text(
            &backend,
            "Butterfly Keramik, Cattelan Italia, tavolo\nPattie, Minotti, poltrona",
            DefaultSelection::Unset,
        )
        .unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.selected_match.is_none()));
    assert_eq!(session.state(), &BoqState::Succeeded);
    assert_eq!(backend.calls(), vec!["process_boq_text:2"]);

    session.select(0, 14);
    session.select(1, 999_999);
    assert_eq!(
        session.results()[0].selected_match.as_ref().map(|p| p.id),
        Some(14)
    );
    assert!(session.results()[1].selected_match.is_none());

    let second = MockBackend {
        boq_results: vec![boq_result("Hamilton", vec![catalog[3].clone()])],
        ..Default::default()
    };
    session
        .submit_text(&second, "Hamilton, Minotti, divano", DefaultSelection::FirstCandidate)
        .unwrap();
    assert_eq!(session.results().len(), 1);
    assert_eq!(
        session.results()[0].selected_match.as_ref().map(|p| p.id),
        Some(13)
    );
}

#[test]
fn failed_submission_keeps_previous_results() {
    let catalog = catalog();
    let ok = MockBackend {
        boq_results: vec![boq_result("Pattie", vec![catalog[1].clone()]), boq_result("Unknown", vec![])],
        ..Default::default()
    };
    let mut session = BoqSession::new();
    session
        .submit_text(&ok, "Pattie, Minotti, poltrona\nUnknown, Nobody, sedia", DefaultSelection::FirstCandidate)
        .unwrap();
    let before = session.results().to_vec();
    let summary = BoqSummary::of(&before);
    assert_eq!(summary.not_found, 1);
    assert_eq!(summary.selected, 1);

    let failing = MockBackend {
        fail_with: Some((500, "matcher crashed")),
        ..Default::default()
    };
    let err = session
        .submit_text(&failing, "Pattie, Minotti, poltrona", DefaultSelection::Unset)
        .unwrap_err();
    assert_eq!(err.detail(), Some("matcher crashed"));
    assert!(matches!(
        session.state(),
        BoqState::Failed(FailReason::Backend(_))
    ));
    assert_eq!(session.results(), before.as_slice());
}

#[test]
fn boq_text_file_is_parsed_then_submitted() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Pattie, Minotti, poltrona").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "Tiffany, Cattelan Italia, tavolo").unwrap();

    let catalog = catalog();
    let backend = MockBackend {
        boq_results: vec![
            boq_result("Pattie", vec![catalog[1].clone()]),
            boq_result("Tiffany", vec![catalog[4].clone()]),
        ],
        ..Default::default()
    };
    let mut session = BoqSession::new();
    let results = session
        .submit_text_file(&backend, file.path(), DefaultSelection::Unset)
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(backend.calls(), vec!["process_boq_text:2"]);
}

#[test]
fn malformed_boq_file_never_reaches_backend() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Pattie, Minotti").unwrap();

    let backend = MockBackend::default();
    let mut session = BoqSession::new();
    let err = session
        .submit_text_file(&backend, file.path(), DefaultSelection::Unset)
        .unwrap_err();
    assert!(matches!(err, CatalogError::MalformedLine { line: 1, .. }));

    let missing = file.path().with_extension("missing");
    assert!(matches!(
        session.submit_text_file(&backend, &missing, DefaultSelection::Unset),
        Err(CatalogError::Io(_))
    ));
    assert!(backend.calls().is_empty());
    assert!(matches!(
        session.state(),
        BoqState::Failed(FailReason::MalformedInput(_))
    ));
}

#[test]
fn backend_selection_outside_candidates_is_not_kept() {
    let catalog = catalog();
    let mut stray = boq_result("Pattie", vec![catalog[1].clone()]);
    stray.selected_match = Some(catalog[3].clone());
    let backend = MockBackend {
        boq_results: vec![stray],
        ..Default::default()
    };
    let mut session = BoqSession::new();
    session
        .submit_text(&backend, "Pattie, Minotti, poltrona", DefaultSelection::Unset)
        .unwrap();
    assert!(session.results()[0].selected_match.is_none());
    assert_eq!(BoqSummary::of(session.results()).selected, 0);
}

#[test]
fn boq_results_from_backend_json() {
    let json = r#"[
        {
            "status": "found",
            "boqItem": { "name": "Pattie", "brand": "Minotti", "type": "poltrona" },
            "matches": [
                { "id": 11, "product_name": "Pattie", "brand_name": "Minotti",
                  "page_reference": { "file_path": "minotti.pdf", "page_numbers": [3] } }
            ]
        },
        {
            "status": "not_found",
            "boqItem": { "name": "Ghost", "brand": "Kartell", "type": "sedia" },
            "message": "No matching products found",
            "matches": []
        }
    ]"#;
    let results: Vec<BoqResult> = serde_json::from_str(json).unwrap();
    let summary = BoqSummary::of(&results);
    assert_eq!(summary.found, 1);
    assert_eq!(summary.not_found, 1);
}
