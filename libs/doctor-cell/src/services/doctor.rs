use tracing::debug;

use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::error::ApiError;

use crate::models::Doctor;

pub struct DoctorService {
    api: ApiClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every doctor the backend knows about, in server order.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.api.get_list("/doctores").await
    }

    /// Doctors whose specialty matches `specialty`. The backend has no
    /// specialty filter, so the match happens here.
    pub async fn doctors_for_specialty(&self, specialty: &str) -> Result<Vec<Doctor>, ApiError> {
        let doctors = self.list_doctors().await?;
        let total = doctors.len();
        let filtered = Self::filter_by_specialty(doctors, specialty);

        debug!("{} of {} doctors match specialty {:?}", filtered.len(), total, specialty);
        Ok(filtered)
    }

    pub fn filter_by_specialty(doctors: Vec<Doctor>, specialty: &str) -> Vec<Doctor> {
        doctors
            .into_iter()
            .filter(|doctor| doctor.matches_specialty(specialty))
            .collect()
    }
}
