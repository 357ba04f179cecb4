//! Catalog listings through the real client.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::json;

use stitchhouse_api::{Applied, ApiError, CatalogBackend, DesignSort, LogoDesignFilters, Notices};
use stitchhouse_core::Price;
use stitchhouse_integration_tests::FakeBackend;
use stitchhouse_storefront::{LogoDesignPage, ProductCatalog};

fn product(id: usize) -> serde_json::Value {
    json!({"_id": format!("p{id}"), "name": format!("Cap {id}"), "price": 25, "image": "/uploads/cap.png"})
}

#[tokio::test]
async fn test_products_wrapped_shape() {
    let backend = FakeBackend::start().await.unwrap();
    backend.stub("GET", "/api/products", 200, &json!({"products": [product(1), product(2)]}));

    let items = backend.client().unwrap().products(8).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Cap 1");
    let request = &backend.requests_to("GET /api/products")[0];
    assert_eq!(request.query.as_deref(), Some("limit=8"));
}

#[tokio::test]
async fn test_products_bare_array_shape() {
    let backend = FakeBackend::start().await.unwrap();
    backend.stub("GET", "/api/products", 200, &json!([product(1)]));

    let items = backend.client().unwrap().products(50).await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_products_unexpected_shape_is_malformed() {
    let backend = FakeBackend::start().await.unwrap();
    backend.stub("GET", "/api/products", 200, &json!({"items": [product(1)]}));

    let err = backend.client().unwrap().products(8).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let backend = FakeBackend::start().await.unwrap();
    backend.stub_raw("GET", "/api/products", 200, "<html>maintenance</html>");

    let err = backend.client().unwrap().products(8).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_upload_paths_resolved_against_origin() {
    let backend = FakeBackend::start().await.unwrap();
    backend.stub(
        "GET",
        "/api/products",
        200,
        &json!({"products": [
            product(1),
            {"id": "p2", "title": "Tote", "price": "18.50", "images": ["https://cdn.example.com/tote.png"]}
        ]}),
    );

    let items = backend.client().unwrap().products(8).await.unwrap();

    let expected = format!("{}uploads/cap.png", backend.origin());
    assert_eq!(items[0].primary_image(), Some(expected.as_str()));
    assert_eq!(items[1].primary_image(), Some("https://cdn.example.com/tote.png"));
    assert_eq!(items[1].price, "18.50".parse::<Price>().unwrap());
}

#[tokio::test]
async fn test_catalog_page_failure_clears_and_notifies() {
    let backend = FakeBackend::start().await.unwrap();
    let api = backend.client().unwrap();
    let mut notices = Notices::new();
    let mut catalog = ProductCatalog::new(20);

    backend.stub(
        "GET",
        "/api/products",
        200,
        &json!({"products": (1..=10).map(product).collect::<Vec<_>>()}),
    );
    assert_eq!(catalog.load(&api, &mut notices).await, Applied::Replaced(10));
    assert_eq!(catalog.visible().len(), 8);

    backend.stub("GET", "/api/products", 500, &json!({"message": "db down"}));
    assert_eq!(catalog.load(&api, &mut notices).await, Applied::Cleared);
    assert!(catalog.all().is_empty());
    assert_eq!(notices.last().unwrap().message, "Failed to load products");
}

#[tokio::test]
async fn test_logo_design_filters_in_query_string() {
    let backend = FakeBackend::start().await.unwrap();
    backend.stub("GET", "/api/custom-logo-designs", 200, &json!({"data": []}));
    let api = backend.client().unwrap();

    let filters = LogoDesignFilters {
        category: Some("modern".to_string()),
        min_price: Some(Price::from_dollars(1000)),
        max_price: Some(Price::from_dollars(2500)),
        ..LogoDesignFilters::default()
    };
    api.logo_designs(&filters).await.unwrap();

    let request = &backend.requests_to("GET /api/custom-logo-designs")[0];
    assert_eq!(
        request.query.as_deref(),
        Some("category=modern&minPrice=1000&maxPrice=2500")
    );
}

#[tokio::test]
async fn test_logo_designs_without_filters_send_no_query() {
    let backend = FakeBackend::start().await.unwrap();
    backend.stub(
        "GET",
        "/api/custom-logo-designs",
        200,
        &json!({"success": true, "data": [{"_id": "d1", "title": "Crest", "price": 1200}]}),
    );

    let items = backend
        .client()
        .unwrap()
        .logo_designs(&LogoDesignFilters::default())
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(backend.requests()[0].query, None);
}

#[tokio::test]
async fn test_logo_design_page_every_change_fetches() {
    let backend = FakeBackend::start().await.unwrap();
    backend.stub("GET", "/api/custom-logo-designs", 200, &json!({"data": []}));
    let api = backend.client().unwrap();
    let mut notices = Notices::new();
    let mut page = LogoDesignPage::new();

    for query in ["c", "co", "cof"] {
        let pending = page.set_search(query);
        let _ = page.fetch(pending, &api, &mut notices).await;
    }
    let pending = page.set_sort(Some(DesignSort::Newest));
    let _ = page.fetch(pending, &api, &mut notices).await;

    let queries: Vec<_> = backend
        .requests()
        .into_iter()
        .map(|r| r.query.unwrap_or_default())
        .collect();
    assert_eq!(
        queries,
        ["search=c", "search=co", "search=cof", "search=cof&sortBy=newest"]
    );
}

#[tokio::test]
async fn test_backend_message_surfaces() {
    let backend = FakeBackend::start().await.unwrap();
    backend.stub(
        "GET",
        "/api/custom-logo-designs",
        400,
        &json!({"success": false, "message": "Invalid price range"}),
    );

    let err = backend
        .client()
        .unwrap()
        .logo_designs(&LogoDesignFilters::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("fallback"), "Invalid price range");
}
