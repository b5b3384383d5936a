use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "idDoctor")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Free-text specialty name, matched loosely against the route parameter.
    #[serde(rename = "especialidad", default)]
    pub specialty: String,
    #[serde(rename = "cupoPacientes", default)]
    pub patient_quota: Option<i64>,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
}

impl Doctor {
    pub fn matches_specialty(&self, specialty: &str) -> bool {
        normalize_specialty(&self.specialty) == normalize_specialty(specialty)
    }

    pub fn quota_label(&self) -> String {
        match self.patient_quota {
            Some(quota) => format!("Cupo disponible: {}", quota),
            None => "Cupo disponible: -".to_string(),
        }
    }
}

/// Case- and surrounding-whitespace-insensitive form of a specialty name.
pub fn normalize_specialty(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    #[serde(rename = "idHorario")]
    pub id: i64,
    #[serde(rename = "idDoctor", default)]
    pub doctor_id: Option<i64>,
    /// Date exactly as the backend sent it; it is echoed back when booking.
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "horaInicio")]
    pub start_time: String,
    #[serde(rename = "horaFin")]
    pub end_time: String,
}

impl ScheduleSlot {
    /// Accepts `YYYY-MM-DD` with or without a time suffix.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    pub fn date_label(&self) -> String {
        self.calendar_date()
            .map(|date| date.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| self.date.clone())
    }

    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}
