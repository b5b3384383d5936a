use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path};

use assert_matches::assert_matches;
use doctor_cell::services::{DoctorService, ScheduleService};
use shared_config::AppConfig;
use shared_models::error::ApiError;
use shared_utils::test_utils::{MockApiResponses, TestConfig};

fn create_test_config(server: &MockServer) -> AppConfig {
    TestConfig::with_api_url(server.uri()).to_app_config()
}

#[tokio::test]
async fn test_doctors_for_specialty_filters_client_side() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::doctor(1, "Dr. Pérez", "Cardiología"),
            MockApiResponses::doctor(2, "Dra. Soto", "Pediatría"),
            MockApiResponses::doctor(3, "Dr. Lima", " cardiología "),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&create_test_config(&mock_server));
    let doctors = service.doctors_for_specialty("Cardiología").await.unwrap();

    let ids: Vec<i64> = doctors.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_doctors_failure_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctores"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&create_test_config(&mock_server));
    let result = service.doctors_for_specialty("Cardiología").await;

    assert_matches!(result, Err(ApiError::Server { status: 503, .. }));
}

#[tokio::test]
async fn test_slots_are_scoped_to_the_requested_doctor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/horarios/doctor/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::slot(10, 5, "2025-03-07", "09:00", "09:30"),
            MockApiResponses::slot(11, 6, "2025-03-07", "10:00", "10:30"),
            { "idHorario": 12, "fecha": "2025-03-08", "horaInicio": "11:00", "horaFin": "11:30" },
        ])))
        .mount(&mock_server)
        .await;

    let service = ScheduleService::new(&create_test_config(&mock_server));
    let slots = service.slots_for_doctor(5).await.unwrap();

    let ids: Vec<i64> = slots.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![10, 12]);
}

#[tokio::test]
async fn test_slots_non_array_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/horarios/doctor/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "horarios": [] })))
        .mount(&mock_server)
        .await;

    let service = ScheduleService::new(&create_test_config(&mock_server));
    assert!(service.slots_for_doctor(5).await.unwrap().is_empty());
}
