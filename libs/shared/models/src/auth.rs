use serde::{Deserialize, Serialize};

/// Key under which the session object is persisted.
pub const SESSION_KEY: &str = "usuario";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default, rename = "idUsuario", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The stored login: who the user is plus the bearer credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(flatten)]
    pub user: UserIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn new(user: UserIdentity, token: impl Into<String>) -> Self {
        Self {
            user,
            token: Some(token.into()),
        }
    }

    /// A session without a non-empty token cannot book.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.user
            .name
            .as_deref()
            .or(self.user.email.as_deref())
            .unwrap_or("usuario")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_reads_flat_user_object() {
        let session: Session = serde_json::from_value(json!({
            "idUsuario": 7,
            "nombre": "Ana",
            "email": "ana@example.com",
            "token": "abc"
        }))
        .unwrap();

        assert_eq!(session.user.id, Some(7));
        assert_eq!(session.display_name(), "Ana");
        assert_eq!(session.bearer_token(), Some("abc"));
    }

    #[test]
    fn test_blank_token_is_not_a_credential() {
        let session: Session = serde_json::from_value(json!({ "nombre": "Ana", "token": "  " })).unwrap();
        assert_eq!(session.bearer_token(), None);

        let session: Session = serde_json::from_value(json!({ "nombre": "Ana" })).unwrap();
        assert_eq!(session.bearer_token(), None);
    }
}
