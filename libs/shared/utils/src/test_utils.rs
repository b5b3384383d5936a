use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::{Session, UserIdentity};
use shared_models::ui::{Navigator, Notice, NoticeLevel, Notifier, Route};

use crate::session::SessionContext;

pub struct TestConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub skeleton_count: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            session_file: std::env::temp_dir().join("turnos-test-session.json"),
            skeleton_count: 6,
        }
    }
}

impl TestConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig::new(self.api_url.clone(), self.session_file.clone())
            .with_skeleton_count(self.skeleton_count)
    }
}

pub struct TestUser;

impl TestUser {
    pub fn patient_session() -> Session {
        Session::new(
            UserIdentity {
                id: Some(42),
                name: Some("Lucía Gómez".to_string()),
                email: Some("lucia@example.com".to_string()),
            },
            "test-bearer-token",
        )
    }

    /// In-memory session context with a logged-in patient.
    pub fn logged_in() -> SessionContext {
        let context = SessionContext::in_memory();
        // The in-memory store cannot fail.
        let _ = context.login(&Self::patient_session());
        context
    }
}

pub struct MockApiResponses;

impl MockApiResponses {
    pub fn specialty(id: i64, name: &str, image: Option<&str>) -> Value {
        json!({
            "idEspecialidad": id,
            "nombre": name,
            "descripcion": format!("Atención especializada en {}", name),
            "imagen": image
        })
    }

    pub fn doctor(id: i64, name: &str, specialty: &str) -> Value {
        json!({
            "idDoctor": id,
            "nombre": name,
            "especialidad": specialty,
            "cupoPacientes": 10,
            "imagen": null
        })
    }

    pub fn slot(id: i64, doctor_id: i64, date: &str, start: &str, end: &str) -> Value {
        json!({
            "idHorario": id,
            "idDoctor": doctor_id,
            "fecha": date,
            "horaInicio": start,
            "horaFin": end
        })
    }

    pub fn booking_confirmation(id: i64) -> Value {
        json!({
            "idCita": id,
            "estado": "CONFIRMADA"
        })
    }

    pub fn error_response(message: &str) -> Value {
        json!({ "error": message })
    }
}

/// Notifier that keeps every notice for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    pub fn count(&self, level: NoticeLevel) -> usize {
        self.notices().iter().filter(|n| n.level == level).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).push(notice);
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).push(route);
    }
}
