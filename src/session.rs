//! The signed-in session, read from local storage once at start and cleared
//! at logout.

use crate::{error::Error, model::User};

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: User,
    /// Bearer token for mutating requests. Reads work without it.
    pub token: Option<String>,
}

impl Session {
    /// Build a session from the raw persisted values.
    ///
    /// Returns `Ok(None)` when no user record is stored, and an error when the
    /// stored record cannot be decoded.
    pub fn from_stored(user_json: Option<String>, token: Option<String>) -> Result<Option<Self>, Error> {
        let Some(raw) = user_json.filter(|raw| !raw.trim().is_empty() && raw.trim() != "null") else {
            return Ok(None);
        };

        let user = serde_json::from_str::<User>(&raw)
            .map_err(|e| Error::Storage(format!("malformed user record: {}", e)))?;
        let token = token.filter(|token| !token.is_empty());

        Ok(Some(Self { user, token }))
    }

    /// Read the session persisted by the login page.
    pub fn load() -> Result<Option<Self>, Error> {
        let storage = local_storage()?;
        let user = storage
            .get_item(USER_KEY)
            .map_err(|_| Error::Storage("could not read the user record".to_string()))?;
        let token = storage
            .get_item(TOKEN_KEY)
            .map_err(|_| Error::Storage("could not read the token".to_string()))?;

        Self::from_stored(user, token)
    }

    /// Remove the persisted session so the entry page starts signed out.
    pub fn clear_persisted() -> Result<(), Error> {
        let storage = local_storage()?;
        for key in [TOKEN_KEY, USER_KEY] {
            storage
                .remove_item(key)
                .map_err(|_| Error::Storage(format!("could not remove \"{}\"", key)))?;
        }
        Ok(())
    }
}

fn local_storage() -> Result<web_sys::Storage, Error> {
    web_sys::window()
        .ok_or_else(|| Error::Storage("no window".to_string()))?
        .local_storage()
        .ok()
        .flatten()
        .ok_or_else(|| Error::Storage("local storage is unavailable".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = r#"{"id":"64f1","fullName":"Grace Hopper","monthlyBudget":"800","preferredCurrency":"USD"}"#;

    #[test]
    fn no_stored_user_means_no_session() {
        assert_eq!(Session::from_stored(None, Some("abc".to_string())), Ok(None));
        assert_eq!(Session::from_stored(Some("null".to_string()), None), Ok(None));
    }

    #[test]
    fn stored_user_and_token_make_a_session() {
        let session = Session::from_stored(Some(USER.to_string()), Some("tok".to_string()))
            .unwrap()
            .unwrap();

        assert_eq!(session.user.id, "64f1");
        assert_eq!(session.user.monthly_budget, Some(800.0));
        assert_eq!(session.token.as_deref(), Some("tok"));
    }

    #[test]
    fn empty_token_is_treated_as_missing() {
        let session = Session::from_stored(Some(USER.to_string()), Some(String::new()))
            .unwrap()
            .unwrap();

        assert_eq!(session.token, None);
    }

    #[test]
    fn malformed_user_record_is_a_storage_error() {
        let result = Session::from_stored(Some("{not json".to_string()), None);

        assert!(matches!(result, Err(Error::Storage(_))));
    }
}
