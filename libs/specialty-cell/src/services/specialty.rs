use tracing::debug;

use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::error::ApiError;

use crate::models::Specialty;

pub struct SpecialtyService {
    api: ApiClient,
}

impl SpecialtyService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// All specialties in server order.
    pub async fn list_specialties(&self) -> Result<Vec<Specialty>, ApiError> {
        let specialties: Vec<Specialty> = self.api.get_list("/especialidades").await?;
        debug!("Fetched {} specialties", specialties.len());
        Ok(specialties)
    }
}
