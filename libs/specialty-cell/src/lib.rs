pub mod models;
pub mod page;
pub mod services;
pub mod view;

pub use models::Specialty;
pub use page::SpecialtiesPage;
pub use services::SpecialtyService;
pub use view::{CatalogBody, SpecialtiesView, SpecialtyCard};
