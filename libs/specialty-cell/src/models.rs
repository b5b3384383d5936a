use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    #[serde(rename = "idEspecialidad")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// Filename served by the backend under `/images/especialidades/`.
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
}
