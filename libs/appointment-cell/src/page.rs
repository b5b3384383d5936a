use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use doctor_cell::models::{Doctor, ScheduleSlot};
use doctor_cell::services::{DoctorService, ScheduleService};
use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::list::ListState;
use shared_models::ui::{decode_param, Layout, Navigator, Notice, Notifier, Route};
use shared_utils::image::{ImageKind, ImageResolver, ImageState};
use shared_utils::loader::LoadOutcome;
use shared_utils::session::SessionContext;

use crate::models::{BookingConfirmation, BookingError, BookingRequest};
use crate::services::BookingService;
use crate::view::*;

/// Everything the doctors/schedule page shows. Subscribers receive a new
/// value on every change.
#[derive(Debug, Clone, Default)]
pub struct TurnosState {
    pub doctors: ListState<Doctor>,
    pub doctors_loading: bool,
    pub selected_doctor: Option<i64>,
    /// Slots of `selected_doctor` only.
    pub slots: ListState<ScheduleSlot>,
    pub slots_loading: bool,
    pub booking: bool,
    doctors_generation: u64,
    slots_generation: u64,
    doctor_images: HashMap<i64, ImageState>,
}

impl TurnosState {
    pub fn is_loading(&self) -> bool {
        self.doctors_loading || self.slots_loading || self.booking
    }

    pub fn doctor(&self, doctor_id: i64) -> Option<&Doctor> {
        self.doctors.items().iter().find(|d| d.id == doctor_id)
    }

    pub fn selected(&self) -> Option<&Doctor> {
        self.selected_doctor.and_then(|id| self.doctor(id))
    }
}

/// Doctors of one specialty, the schedule of the selected doctor, and booking.
pub struct TurnosPage {
    specialty: String,
    doctors: DoctorService,
    schedules: ScheduleService,
    booking: BookingService,
    images: ImageResolver,
    session: SessionContext,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<TurnosState>,
}

impl TurnosPage {
    /// `specialty_param` is the raw route segment; it is URL-decoded here.
    pub fn new(
        config: &AppConfig,
        specialty_param: &str,
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_client(ApiClient::new(config), config, specialty_param, session, navigator, notifier)
    }

    pub fn with_client(
        api: ApiClient,
        config: &AppConfig,
        specialty_param: &str,
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _rx) = watch::channel(TurnosState::default());

        Self {
            specialty: decode_param(specialty_param),
            doctors: DoctorService::with_client(api.clone()),
            schedules: ScheduleService::with_client(api.clone()),
            booking: BookingService::with_client(api),
            images: ImageResolver::new(config),
            session,
            navigator,
            notifier,
            state,
        }
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn state(&self) -> TurnosState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TurnosState> {
        self.state.subscribe()
    }

    /// Loads the doctors of the page's specialty. A failed fetch leaves the
    /// list tagged `Failed`; it never blocks the rest of the page.
    pub async fn mount(&self) -> LoadOutcome {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.doctors_generation += 1;
            generation = s.doctors_generation;
            s.doctors_loading = true;
        });

        let result = self.doctors.doctors_for_specialty(&self.specialty).await;
        if let Err(e) = &result {
            error!("Error al cargar doctores: {}", e);
        }
        let doctors = ListState::from_result(result);

        let applied = self.state.send_if_modified(|s| {
            if s.doctors_generation != generation {
                return false;
            }
            s.doctors = doctors;
            s.doctors_loading = false;
            s.doctor_images.clear();
            true
        });

        outcome("doctors", generation, applied)
    }

    /// Selects a doctor and loads their slots. The previous doctor's slots are
    /// cleared immediately, before the new ones arrive.
    ///
    /// Only doctors listed for this page's specialty can be selected; any other
    /// id is `Rejected` and the current selection is kept.
    pub async fn select_doctor(&self, doctor_id: i64) -> LoadOutcome {
        let mut generation = None;
        self.state.send_if_modified(|s| {
            if s.doctor(doctor_id).is_none() {
                return false;
            }
            s.slots_generation += 1;
            generation = Some(s.slots_generation);
            s.selected_doctor = Some(doctor_id);
            s.slots = ListState::Pending;
            s.slots_loading = true;
            true
        });

        let Some(generation) = generation else {
            warn!("Doctor {} is not listed for {}, selection ignored", doctor_id, self.specialty);
            return LoadOutcome::Rejected;
        };

        let result = self.schedules.slots_for_doctor(doctor_id).await;
        if let Err(e) = &result {
            error!("Error al cargar horarios: {}", e);
        }
        let slots = ListState::from_result(result);

        let applied = self.state.send_if_modified(|s| {
            if s.slots_generation != generation {
                return false;
            }
            s.slots = slots;
            s.slots_loading = false;
            true
        });

        outcome("slots", generation, applied)
    }

    /// Books one of the loaded slots of the selected doctor.
    ///
    /// Without a stored bearer token nothing is sent: the user is warned and
    /// sent to the login page. Only one booking runs at a time. Every rejection
    /// shows the same generic notice. After a successful booking the slot list
    /// is fetched again.
    pub async fn book(&self, slot_id: i64) -> Result<BookingConfirmation, BookingError> {
        let Some(token) = self.session.bearer_token() else {
            warn!("Booking of slot {} attempted without a session", slot_id);
            self.notifier
                .notify(Notice::warning(SESSION_REQUIRED_MESSAGE, SESSION_REQUIRED_TITLE));
            self.navigator.navigate(Route::Login);
            return Err(BookingError::LoginRequired);
        };

        let Some(request) = self.booking_request(slot_id) else {
            self.notifier.notify(Notice::error(SLOT_NOT_FOUND_MESSAGE));
            return Err(BookingError::SlotNotFound(slot_id));
        };

        let started = self.state.send_if_modified(|s| {
            if s.booking {
                return false;
            }
            s.booking = true;
            true
        });
        if !started {
            warn!("Booking of slot {} ignored, another booking is in flight", slot_id);
            return Err(BookingError::InProgress);
        }

        let result = self.booking.book(&request, &token).await;
        self.state.send_modify(|s| s.booking = false);

        match result {
            Ok(confirmation) => {
                info!("Slot {} booked with doctor {}", slot_id, request.doctor_id);
                self.notifier.notify(Notice::success(BOOKED_MESSAGE, BOOKED_TITLE));
                self.select_doctor(request.doctor_id).await;
                Ok(confirmation)
            }
            Err(e) => {
                if e.is_conflict() {
                    warn!("Slot {} was taken before it could be booked: {}", slot_id, e);
                } else {
                    error!("Error al reservar cita: {}", e);
                }
                self.notifier.notify(Notice::error(BOOKING_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    fn booking_request(&self, slot_id: i64) -> Option<BookingRequest> {
        let state = self.state.borrow();
        let doctor_id = state.selected_doctor?;
        let doctor = state.doctor(doctor_id)?;
        let slot = state.slots.items().iter().find(|s| s.id == slot_id)?;

        let request = BookingRequest::for_slot(slot.date.clone(), Some(&doctor.name), doctor_id);
        Some(request)
    }

    /// The photo of doctor `doctor_id` failed to load. Returns the next URL to
    /// try, or `None` once the default photo is showing.
    pub fn report_image_error(&self, doctor_id: i64) -> Option<String> {
        let mut next = None;
        self.state.send_if_modified(|s| {
            let Some(doctor) = s.doctor(doctor_id).cloned() else {
                return false;
            };
            let image = s
                .doctor_images
                .entry(doctor_id)
                .or_insert_with(|| self.resolve_image(&doctor));
            next = image.on_load_error().map(str::to_string);
            next.is_some()
        });
        next
    }

    fn resolve_image(&self, doctor: &Doctor) -> ImageState {
        self.images
            .resolve(ImageKind::Doctor, &doctor.name, doctor.image.as_deref())
    }

    pub fn view(&self) -> TurnosView {
        let state = self.state();
        let busy = state.is_loading();

        let doctors = match &state.doctors {
            ListState::Pending => DoctorsSection::Loading,
            ListState::Empty => DoctorsSection::Empty {
                message: NO_DOCTORS_MESSAGE.to_string(),
            },
            ListState::Failed(_) => DoctorsSection::Unavailable {
                message: DOCTORS_UNAVAILABLE_MESSAGE.to_string(),
            },
            ListState::Loaded(doctors) => DoctorsSection::Cards(
                doctors
                    .iter()
                    .map(|doctor| DoctorCard {
                        id: doctor.id,
                        name: doctor.name.clone(),
                        specialty: doctor.specialty.clone(),
                        quota_label: doctor.quota_label(),
                        image: state
                            .doctor_images
                            .get(&doctor.id)
                            .cloned()
                            .unwrap_or_else(|| self.resolve_image(doctor)),
                        selected: state.selected_doctor == Some(doctor.id),
                        action_label: VIEW_SLOTS_LABEL.to_string(),
                    })
                    .collect(),
            ),
        };

        let schedule = state.selected_doctor.map(|doctor_id| {
            let name = state.doctor(doctor_id).map_or("Doctor", |d| d.name.as_str());

            let body = match &state.slots {
                ListState::Pending => SlotsBody::Loading,
                ListState::Empty => SlotsBody::Empty {
                    message: NO_SLOTS_MESSAGE.to_string(),
                },
                ListState::Failed(_) => SlotsBody::Unavailable {
                    message: SLOTS_UNAVAILABLE_MESSAGE.to_string(),
                },
                ListState::Loaded(slots) => SlotsBody::Slots(
                    slots
                        .iter()
                        .map(|slot| SlotCard {
                            id: slot.id,
                            date_label: slot.date_label(),
                            time_range: slot.time_range(),
                            action_label: (if busy { BOOKING_LABEL } else { BOOK_LABEL }).to_string(),
                            action_disabled: busy,
                        })
                        .collect(),
                ),
            };

            ScheduleSection {
                doctor_id,
                heading: format!("Horarios disponibles de {}", name),
                body,
            }
        });

        TurnosView {
            layout: Layout::for_session(self.session.has_stored_session()),
            heading: format!("Doctores de {}", self.specialty),
            loading: busy,
            doctors,
            schedule,
        }
    }
}

fn outcome(list: &str, generation: u64, applied: bool) -> LoadOutcome {
    if applied {
        LoadOutcome::Applied
    } else {
        debug!("Dropping stale {} result #{}", list, generation);
        LoadOutcome::Superseded
    }
}
