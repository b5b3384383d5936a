use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

// ==============================================================================
// NAVIGATION
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Specialties,
    Turnos { specialty: String },
    Login,
}

impl Route {
    pub fn turnos(specialty: impl Into<String>) -> Self {
        Route::Turnos {
            specialty: specialty.into(),
        }
    }

    /// Path form of the route; the specialty segment is URL-encoded.
    pub fn path(&self) -> String {
        match self {
            Route::Specialties => "/especialidades".to_string(),
            Route::Turnos { specialty } => format!("/turnos/{}", encode_param(specialty)),
            Route::Login => "/login".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "/especialidades" => Some(Route::Specialties),
            "/login" => Some(Route::Login),
            _ => trimmed
                .strip_prefix("/turnos/")
                .filter(|segment| !segment.is_empty() && !segment.contains('/'))
                .map(|segment| Route::turnos(decode_param(segment))),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub fn encode_param(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Decodes a route parameter. Invalid escapes leave the raw text in place.
pub fn decode_param(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            warn!("Route parameter {:?} is not valid UTF-8 once decoded: {}", raw, e);
            raw.to_string()
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

// ==============================================================================
// NOTIFICATIONS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: Some(title.into()),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: Some(title.into()),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: None,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

// ==============================================================================
// PAGE CHROME
// ==============================================================================

/// Page chrome: the patient layout when a session is stored, the public one otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    Cliente,
    Public,
}

impl Layout {
    pub fn for_session(has_session: bool) -> Self {
        if has_session {
            Layout::Cliente
        } else {
            Layout::Public
        }
    }
}
