use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path};

use shared_config::AppConfig;
use shared_models::ui::{Layout, Route};
use shared_utils::image::{ImageStage, SPECIALTY_DEFAULT_IMAGE};
use shared_utils::loader::{LoadOutcome, LoadState};
use shared_utils::session::SessionContext;
use shared_utils::test_utils::{MockApiResponses, RecordingNavigator, TestConfig, TestUser};
use specialty_cell::{CatalogBody, SpecialtiesPage};

fn create_test_config(server: &MockServer) -> AppConfig {
    TestConfig::with_api_url(server.uri()).to_app_config()
}

fn create_page(server: &MockServer, session: SessionContext) -> (SpecialtiesPage, Arc<RecordingNavigator>) {
    let navigator = RecordingNavigator::new();
    let page = SpecialtiesPage::new(&create_test_config(server), session, navigator.clone());
    (page, navigator)
}

#[tokio::test]
async fn test_skeleton_before_first_load() {
    let mock_server = MockServer::start().await;
    let (page, _) = create_page(&mock_server, SessionContext::in_memory());

    let view = page.view();
    assert_eq!(view.body, CatalogBody::Skeleton { count: 6 });
    assert_eq!(view.layout, Layout::Public);
}

#[tokio::test]
async fn test_empty_catalog_shows_empty_state_not_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let (page, _) = create_page(&mock_server, SessionContext::in_memory());
    assert_eq!(page.load().await, LoadOutcome::Applied);

    assert_eq!(page.view().body, CatalogBody::empty());
    assert_matches!(&page.view().body, CatalogBody::Empty { action_label, .. } if action_label == "Actualizar");
}

#[tokio::test]
async fn test_non_array_response_is_treated_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "unexpected" })))
        .mount(&mock_server)
        .await;

    let (page, _) = create_page(&mock_server, SessionContext::in_memory());
    page.load().await;

    assert_eq!(page.view().body, CatalogBody::empty());
}

#[tokio::test]
async fn test_server_error_shows_retry_then_retry_recovers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialidades"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/especialidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::specialty(1, "Cardiología", None)
        ])))
        .mount(&mock_server)
        .await;

    let (page, _) = create_page(&mock_server, SessionContext::in_memory());
    page.load().await;

    assert_eq!(page.view().body, CatalogBody::retry());
    assert!(page.state().error().is_some());
    assert!(page.state().data().is_none());

    page.retry().await;
    assert_matches!(page.view().body, CatalogBody::Grid(cards) if cards.len() == 1);
    assert_eq!(page.state().error(), None);
}

#[tokio::test]
async fn test_grid_cards_resolve_images_and_routes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::specialty(1, "Cardiología", Some("cardio.png")),
            MockApiResponses::specialty(2, "Medicina Interna", None),
        ])))
        .mount(&mock_server)
        .await;

    let (page, _) = create_page(&mock_server, TestUser::logged_in());
    page.load().await;

    let view = page.view();
    assert_eq!(view.layout, Layout::Cliente);

    let cards = match view.body {
        CatalogBody::Grid(cards) => cards,
        other => panic!("expected grid, got {:?}", other),
    };

    assert_eq!(cards[0].name, "Cardiología");
    assert_eq!(cards[0].image.url, format!("{}/images/especialidades/cardio.png", mock_server.uri()));
    assert_eq!(cards[0].image.stage, ImageStage::Primary);
    assert_eq!(cards[0].route.path(), "/turnos/Cardiolog%C3%ADa");
    assert_eq!(cards[0].action_label, "Ver doctores disponibles");

    assert_eq!(cards[1].image.url, SPECIALTY_DEFAULT_IMAGE);
    assert_eq!(cards[1].description, "Atención especializada en Medicina Interna");
}

#[tokio::test]
async fn test_image_errors_walk_the_fallback_chain_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::specialty(7, "Pediatría", Some("pedia.png")),
        ])))
        .mount(&mock_server)
        .await;

    let (page, _) = create_page(&mock_server, SessionContext::in_memory());
    page.load().await;

    let curated = page.report_image_error(7).unwrap();
    assert!(curated.contains("photo-1582750433449"));

    assert_eq!(page.report_image_error(7).as_deref(), Some(SPECIALTY_DEFAULT_IMAGE));
    assert_eq!(page.report_image_error(7), None);

    assert_matches!(page.view().body, CatalogBody::Grid(cards) if cards[0].image.stage == ImageStage::Default);
    assert_eq!(page.report_image_error(999), None);
}

#[tokio::test]
async fn test_open_specialty_navigates_with_encoded_name() {
    let mock_server = MockServer::start().await;
    let (page, navigator) = create_page(&mock_server, SessionContext::in_memory());

    let route = page.open_specialty("Medicina General");

    assert_eq!(route.path(), "/turnos/Medicina%20General");
    assert_eq!(navigator.last(), Some(Route::turnos("Medicina General")));
}

#[tokio::test]
async fn test_subscribers_see_loading_then_ready() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::specialty(1, "Dermatología", None),
        ])))
        .mount(&mock_server)
        .await;

    let (page, _) = create_page(&mock_server, SessionContext::in_memory());
    let watcher = page.subscribe();

    page.load().await;

    let snapshot = watcher.borrow().clone();
    assert_eq!(snapshot.generation, 1);
    assert_matches!(snapshot.state, LoadState::Ready(items) if items.len() == 1);
}
