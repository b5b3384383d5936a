pub mod models;
pub mod page;
pub mod services;
pub mod view;

pub use models::{BookingConfirmation, BookingError, BookingRequest};
pub use page::{TurnosPage, TurnosState};
pub use services::BookingService;
pub use view::{DoctorCard, DoctorsSection, ScheduleSection, SlotCard, SlotsBody, TurnosView};
