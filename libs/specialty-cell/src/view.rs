use serde::{Deserialize, Serialize};

use shared_models::ui::{Layout, Route};
use shared_utils::image::ImageState;

pub const PAGE_TITLE: &str = "Especialidades Médicas";
pub const PAGE_SUBTITLE: &str = "Consulta las especialidades médicas disponibles y reserva tu cita.";

pub const LOAD_ERROR_TITLE: &str = "Error al cargar especialidades";
pub const LOAD_ERROR_DESCRIPTION: &str =
    "No se pudieron obtener las especialidades médicas. Verifica tu conexión.";
pub const RETRY_LABEL: &str = "Reintentar";

pub const EMPTY_ICON: &str = "fas fa-stethoscope";
pub const EMPTY_TITLE: &str = "No hay especialidades disponibles";
pub const EMPTY_DESCRIPTION: &str = "Actualmente no contamos con especialidades médicas registradas.";
pub const REFRESH_LABEL: &str = "Actualizar";

pub const VIEW_DOCTORS_LABEL: &str = "Ver doctores disponibles";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtiesView {
    pub layout: Layout,
    pub title: String,
    pub subtitle: String,
    pub body: CatalogBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogBody {
    Skeleton {
        count: usize,
    },
    Retry {
        error: String,
        description: String,
        action_label: String,
    },
    Empty {
        icon: String,
        title: String,
        description: String,
        action_label: String,
    },
    Grid(Vec<SpecialtyCard>),
}

impl CatalogBody {
    pub fn retry() -> Self {
        CatalogBody::Retry {
            error: LOAD_ERROR_TITLE.to_string(),
            description: LOAD_ERROR_DESCRIPTION.to_string(),
            action_label: RETRY_LABEL.to_string(),
        }
    }

    pub fn empty() -> Self {
        CatalogBody::Empty {
            icon: EMPTY_ICON.to_string(),
            title: EMPTY_TITLE.to_string(),
            description: EMPTY_DESCRIPTION.to_string(),
            action_label: REFRESH_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyCard {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: ImageState,
    pub route: Route,
    pub action_label: String,
}
