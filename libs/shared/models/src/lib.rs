pub mod auth;
pub mod error;
pub mod list;
pub mod ui;

pub use auth::{Session, UserIdentity, SESSION_KEY};
pub use error::ApiError;
pub use list::ListState;
pub use ui::{Layout, Navigator, Notice, NoticeLevel, Notifier, Route};
