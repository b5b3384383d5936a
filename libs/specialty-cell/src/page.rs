use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{error, info};

use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::ui::{Layout, Navigator, Route};
use shared_utils::image::{ImageKind, ImageResolver, ImageState};
use shared_utils::loader::{AsyncLoader, LoadOutcome, LoadState, LoaderSnapshot};
use shared_utils::session::SessionContext;

use crate::models::Specialty;
use crate::services::SpecialtyService;
use crate::view::{CatalogBody, SpecialtiesView, SpecialtyCard, PAGE_SUBTITLE, PAGE_TITLE, VIEW_DOCTORS_LABEL};

/// Catalog of specialties. Each one links to its doctors page.
pub struct SpecialtiesPage {
    service: SpecialtyService,
    loader: AsyncLoader<Vec<Specialty>>,
    images: ImageResolver,
    image_states: Mutex<HashMap<i64, ImageState>>,
    session: SessionContext,
    navigator: Arc<dyn Navigator>,
    skeleton_count: usize,
}

impl SpecialtiesPage {
    pub fn new(config: &AppConfig, session: SessionContext, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_client(ApiClient::new(config), config, session, navigator)
    }

    pub fn with_client(
        api: ApiClient,
        config: &AppConfig,
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            service: SpecialtyService::with_client(api),
            loader: AsyncLoader::new(),
            images: ImageResolver::new(config),
            image_states: Mutex::new(HashMap::new()),
            session,
            navigator,
            skeleton_count: config.skeleton_count,
        }
    }

    /// Fetches the catalog. Used on mount, by the retry action and by the
    /// empty-state refresh action.
    pub async fn load(&self) -> LoadOutcome {
        self.image_states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        let service = &self.service;
        let result = self
            .loader
            .execute(|| async move { Ok::<_, anyhow::Error>(service.list_specialties().await?) })
            .await;

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error al obtener las especialidades: {}", e);
                LoadOutcome::Applied
            }
        }
    }

    pub async fn retry(&self) -> LoadOutcome {
        self.load().await
    }

    pub fn state(&self) -> LoadState<Vec<Specialty>> {
        self.loader.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoaderSnapshot<Vec<Specialty>>> {
        self.loader.subscribe()
    }

    pub fn view(&self) -> SpecialtiesView {
        let body = match self.loader.state() {
            LoadState::Idle | LoadState::Loading => CatalogBody::Skeleton {
                count: self.skeleton_count,
            },
            LoadState::Failed(_) => CatalogBody::retry(),
            LoadState::Ready(specialties) if specialties.is_empty() => CatalogBody::empty(),
            LoadState::Ready(specialties) => {
                CatalogBody::Grid(specialties.iter().map(|s| self.card(s)).collect())
            }
        };

        SpecialtiesView {
            layout: Layout::for_session(self.session.has_stored_session()),
            title: PAGE_TITLE.to_string(),
            subtitle: PAGE_SUBTITLE.to_string(),
            body,
        }
    }

    fn card(&self, specialty: &Specialty) -> SpecialtyCard {
        SpecialtyCard {
            id: specialty.id,
            name: specialty.name.clone(),
            description: specialty.description.clone().unwrap_or_default(),
            image: self.image_for(specialty),
            route: Route::turnos(specialty.name.clone()),
            action_label: VIEW_DOCTORS_LABEL.to_string(),
        }
    }

    fn image_for(&self, specialty: &Specialty) -> ImageState {
        let mut states = self.image_states.lock().unwrap_or_else(PoisonError::into_inner);
        states
            .entry(specialty.id)
            .or_insert_with(|| {
                self.images
                    .resolve(ImageKind::Specialty, &specialty.name, specialty.image.as_deref())
            })
            .clone()
    }

    /// The card image for `id` failed to load. Returns the next URL to try,
    /// or `None` once the default image is showing.
    pub fn report_image_error(&self, id: i64) -> Option<String> {
        let specialty = self
            .loader
            .state()
            .data()
            .and_then(|items| items.iter().find(|s| s.id == id).cloned())?;

        let mut states = self.image_states.lock().unwrap_or_else(PoisonError::into_inner);
        let state = states.entry(id).or_insert_with(|| {
            self.images
                .resolve(ImageKind::Specialty, &specialty.name, specialty.image.as_deref())
        });
        state.on_load_error().map(str::to_string)
    }

    /// Navigates to the doctors page of a specialty.
    pub fn open_specialty(&self, name: &str) -> Route {
        let route = Route::turnos(name);
        info!("Opening {}", route);
        self.navigator.navigate(route.clone());
        route
    }
}
