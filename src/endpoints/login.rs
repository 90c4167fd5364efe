use crate::{transport::Transport, Error};
use serde_derive::{Deserialize, Serialize};

const RESOURCE: &str = crate::transport::LOGIN_RESOURCE;

/// Send the username and password to the server. Any session cookie it hands
/// back is kept by the [`Transport`].
pub(crate) async fn login(
    transport: &mut Transport,
    username: &str,
    password: &str,
) -> Result<LoginData, Error> {
    let data = Data { username, password };
    let body = transport.post(RESOURCE, &data).await?;

    let login: LoginData = super::decode_data(RESOURCE, &body)?;
    log::trace!("Parsed response: {:#?}", login);

    Ok(login)
}

/// What the server says about a successful login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub status: Option<String>,
    pub message: Option<String>,
    pub person_id: u64,
    /// Where a browser would be redirected next.
    pub location: Option<String>,
}

#[derive(Copy, Clone, Serialize)]
struct Data<'a> {
    username: &'a str,
    password: &'a str,
}

// the payload gets logged, so keep the password out of it
impl std::fmt::Debug for Data<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::decode_data;

    #[test]
    fn parse_minimal_login_response() {
        let src = r#"{"data": {"status": "ok", "personId": 42}}"#;
        let should_be = LoginData {
            status: Some(String::from("ok")),
            message: None,
            person_id: 42,
            location: None,
        };

        let got: LoginData = decode_data(RESOURCE, src.as_bytes()).unwrap();

        assert_eq!(got, should_be);
    }

    #[test]
    fn parse_full_login_response() {
        let src = include_str!("login_response_okay.json");
        let should_be = LoginData {
            status: Some(String::from("success")),
            message: Some(String::from("Login erfolgreich.")),
            person_id: 7,
            location: Some(String::from("/?q=home")),
        };

        let got: LoginData = decode_data(RESOURCE, src.as_bytes()).unwrap();

        assert_eq!(got, should_be);
    }

    #[test]
    fn login_without_a_person_is_a_decode_error() {
        let src = r#"{"message": "Benutzername oder Passwort falsch", "errors": []}"#;

        let got = decode_data::<LoginData>(RESOURCE, src.as_bytes());

        assert!(matches!(got, Err(Error::Decode { .. })));
    }

    #[test]
    fn the_password_never_reaches_the_logs() {
        let data = Data {
            username: "alice",
            password: "hunter2",
        };

        let got = format!("{:#?}", data);

        assert!(!got.contains("hunter2"));
    }

    #[test]
    fn payload_uses_the_expected_keys() {
        let data = Data {
            username: "alice",
            password: "hunter2",
        };

        let got = serde_json::to_value(&data).unwrap();

        assert_eq!(
            got,
            serde_json::json!({"username": "alice", "password": "hunter2"})
        );
    }
}
