use serde::{Deserialize, Serialize};

use shared_models::ui::Layout;
use shared_utils::image::ImageState;

pub const SESSION_REQUIRED_MESSAGE: &str = "Debes iniciar sesión para agendar una cita.";
pub const SESSION_REQUIRED_TITLE: &str = "Sesión requerida";
pub const SLOT_NOT_FOUND_MESSAGE: &str = "Horario no encontrado";
pub const BOOKED_MESSAGE: &str = "Cita reservada exitosamente";
pub const BOOKED_TITLE: &str = "¡Éxito!";
pub const BOOKING_FAILED_MESSAGE: &str = "Ocurrió un error al intentar reservar la cita.";

pub const NO_DOCTORS_MESSAGE: &str = "No hay doctores disponibles para esta especialidad.";
pub const DOCTORS_UNAVAILABLE_MESSAGE: &str =
    "No se pudieron cargar los doctores. Intenta nuevamente más tarde.";
pub const NO_SLOTS_MESSAGE: &str = "No hay horarios disponibles para este doctor.";
pub const SLOTS_UNAVAILABLE_MESSAGE: &str = "No se pudieron cargar los horarios de este doctor.";

pub const VIEW_SLOTS_LABEL: &str = "Ver Horarios";
pub const BOOK_LABEL: &str = "Reservar Cita";
pub const BOOKING_LABEL: &str = "Reservando...";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnosView {
    pub layout: Layout,
    pub heading: String,
    pub loading: bool,
    pub doctors: DoctorsSection,
    pub schedule: Option<ScheduleSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DoctorsSection {
    Loading,
    Cards(Vec<DoctorCard>),
    Empty { message: String },
    /// The list could not be fetched. Rendered as a notice; the page stays usable.
    Unavailable { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorCard {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub quota_label: String,
    pub image: ImageState,
    pub selected: bool,
    pub action_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSection {
    pub doctor_id: i64,
    pub heading: String,
    pub body: SlotsBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotsBody {
    Loading,
    Slots(Vec<SlotCard>),
    Empty { message: String },
    Unavailable { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotCard {
    pub id: i64,
    pub date_label: String,
    pub time_range: String,
    pub action_label: String,
    pub action_disabled: bool,
}
