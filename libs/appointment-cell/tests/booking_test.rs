use assert_matches::assert_matches;
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_json, header, method, path};

use appointment_cell::{BookingError, BookingRequest, BookingService};
use shared_models::error::ApiError;
use shared_utils::test_utils::{MockApiResponses, TestConfig};

fn create_service(server: &MockServer) -> BookingService {
    BookingService::new(&TestConfig::with_api_url(server.uri()).to_app_config())
}

#[tokio::test]
async fn test_book_posts_request_with_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/citas"))
        .and(header("Authorization", "Bearer abc123"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "date": "2025-04-01",
            "description": "Cita con Dra. Soto",
            "doctorId": 2
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockApiResponses::booking_confirmation(7)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_service(&mock_server);
    let request = BookingRequest::for_slot("2025-04-01", Some("Dra. Soto"), 2);

    let confirmation = service.book(&request, "abc123").await.unwrap();
    assert_eq!(confirmation.body["estado"], "CONFIRMADA");
}

#[tokio::test]
async fn test_book_conflict_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/citas"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(MockApiResponses::error_response("Horario ocupado")),
        )
        .mount(&mock_server)
        .await;

    let service = create_service(&mock_server);
    let request = BookingRequest::for_slot("2025-04-01", None, 2);

    let err = service.book(&request, "abc123").await.unwrap_err();
    assert!(err.is_conflict());
    assert_matches!(err, BookingError::Rejected(ApiError::Conflict(_)));
}

#[tokio::test]
async fn test_book_expired_token_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/citas"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let service = create_service(&mock_server);
    let request = BookingRequest::for_slot("2025-04-01", None, 2);

    let err = service.book(&request, "expired").await.unwrap_err();
    assert!(!err.is_conflict());
    assert_matches!(err, BookingError::Rejected(ApiError::Auth(_)));
}
