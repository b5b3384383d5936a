use tracing::{debug, warn};

use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::error::ApiError;

use crate::models::ScheduleSlot;

pub struct ScheduleService {
    api: ApiClient,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// Bookable slots of one doctor. The backend already filters by doctor and
    /// availability; slots tagged with another doctor are dropped.
    pub async fn slots_for_doctor(&self, doctor_id: i64) -> Result<Vec<ScheduleSlot>, ApiError> {
        let path = format!("/horarios/doctor/{}", doctor_id);
        let slots: Vec<ScheduleSlot> = self.api.get_list(&path).await?;
        let total = slots.len();

        let slots: Vec<ScheduleSlot> = slots
            .into_iter()
            .filter(|slot| slot.doctor_id.map_or(true, |owner| owner == doctor_id))
            .collect();

        if slots.len() != total {
            warn!(
                "Dropped {} slots not owned by doctor {}",
                total - slots.len(),
                doctor_id
            );
        }

        debug!("Fetched {} slots for doctor {}", slots.len(), doctor_id);
        Ok(slots)
    }
}
