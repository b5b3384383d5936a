use serde::{Deserialize, Serialize};
use tracing::debug;

use shared_config::AppConfig;

pub const SPECIALTY_DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=300&fit=crop&crop=center";
pub const DOCTOR_DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?w=200&h=250&fit=crop&crop=center";

const CURATED_SPECIALTY_IMAGES: &[(&str, &str)] = &[
    ("Medicina General", "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=300&fit=crop&crop=center"),
    ("Cardiología", "https://images.unsplash.com/photo-1629909613654-28e377c37b09?w=400&h=300&fit=crop&crop=center"),
    ("Neurología", "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=300&fit=crop&crop=center"),
    ("Pediatría", "https://images.unsplash.com/photo-1582750433449-648ed127bb54?w=400&h=300&fit=crop&crop=center"),
    ("Ginecología", "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=300&fit=crop&crop=center"),
    ("Dermatología", "https://images.unsplash.com/photo-1576091160399-112ba8d25d1f?w=400&h=300&fit=crop&crop=center"),
    ("Oftalmología", "https://images.unsplash.com/photo-1584464491033-06628f3a6b7b?w=400&h=300&fit=crop&crop=center"),
    ("Traumatología", "https://images.unsplash.com/photo-1559757175-0eb30cd8c063?w=400&h=300&fit=crop&crop=center"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageKind {
    Specialty,
    Doctor,
}

impl ImageKind {
    fn backend_prefix(&self) -> &'static str {
        match self {
            ImageKind::Specialty => "/images/especialidades",
            ImageKind::Doctor => "/doctores/imagen",
        }
    }

    pub fn default_url(&self) -> &'static str {
        match self {
            ImageKind::Specialty => SPECIALTY_DEFAULT_IMAGE,
            ImageKind::Doctor => DOCTOR_DEFAULT_IMAGE,
        }
    }

    /// Curated stock photo for an exact name. Doctors have no curated table.
    pub fn curated_url(&self, name: &str) -> Option<&'static str> {
        match self {
            ImageKind::Specialty => CURATED_SPECIALTY_IMAGES
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, url)| *url),
            ImageKind::Doctor => None,
        }
    }
}

/// Which source the current URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageStage {
    Primary,
    Curated,
    Default,
}

/// Per-item image state: the URL to show and how far down the fallback
/// chain it already is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageState {
    pub url: String,
    pub stage: ImageStage,
    curated: Option<String>,
    default: String,
}

impl ImageState {
    /// Advances after the current URL failed to load. Returns the next URL to
    /// try, or `None` once the default image has been reached.
    pub fn on_load_error(&mut self) -> Option<&str> {
        let next = match self.stage {
            ImageStage::Primary => match &self.curated {
                Some(curated) => (ImageStage::Curated, curated.clone()),
                None => (ImageStage::Default, self.default.clone()),
            },
            ImageStage::Curated => (ImageStage::Default, self.default.clone()),
            ImageStage::Default => return None,
        };

        debug!("Image {} failed, falling back to {:?}", self.url, next.0);
        self.stage = next.0;
        self.url = next.1;
        Some(&self.url)
    }

    pub fn is_terminal(&self) -> bool {
        self.stage == ImageStage::Default
    }
}

#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_url: String,
}

impl ImageResolver {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base_url(&config.api_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn backend_url(&self, kind: ImageKind, filename: &str) -> String {
        format!("{}{}/{}", self.base_url, kind.backend_prefix(), filename)
    }

    /// First URL to attempt for an item, with its fallback chain attached.
    pub fn resolve(&self, kind: ImageKind, name: &str, filename: Option<&str>) -> ImageState {
        let curated = kind.curated_url(name).map(str::to_string);
        let default = kind.default_url().to_string();

        match filename.map(str::trim).filter(|f| !f.is_empty()) {
            Some(filename) => ImageState {
                url: self.backend_url(kind, filename),
                stage: ImageStage::Primary,
                curated,
                default,
            },
            None => match curated {
                Some(url) => ImageState {
                    url: url.clone(),
                    stage: ImageStage::Curated,
                    curated: Some(url),
                    default,
                },
                None => ImageState {
                    url: default.clone(),
                    stage: ImageStage::Default,
                    curated: None,
                    default,
                },
            },
        }
    }
}
