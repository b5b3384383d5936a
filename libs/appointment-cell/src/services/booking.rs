use tracing::{debug, info};

use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::error::ApiError;

use crate::models::{BookingConfirmation, BookingError, BookingRequest};

pub struct BookingService {
    api: ApiClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submits one booking with the caller's bearer token.
    pub async fn book(
        &self,
        request: &BookingRequest,
        auth_token: &str,
    ) -> Result<BookingConfirmation, BookingError> {
        debug!("Booking {} for doctor {}", request.date, request.doctor_id);

        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.api.post_json("/citas", body, auth_token).await?;

        info!("Booking accepted for doctor {} on {}", request.doctor_id, request.date);
        Ok(BookingConfirmation { body: response })
    }
}
