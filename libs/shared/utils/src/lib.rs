pub mod image;
pub mod loader;
pub mod session;
pub mod test_utils;

pub use image::{ImageKind, ImageResolver, ImageStage, ImageState};
pub use loader::{AsyncLoader, LoadOutcome, LoadState};
pub use session::{FileStore, KeyValueStore, MemoryStore, SessionContext, SessionError};
