//! Username/password authentication against the farm backend.
//!
//! `AuthClient` drives the account endpoints and moves the issued bearer token
//! in and out of the shared [`Session`].

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiMessage};
use crate::error::{Error, Result};
use crate::models::required_text;
use crate::session::{Session, SessionToken};

const USERNAME_TAKEN: &str = "Username already exists. Please choose another one.";

/// Recovery questions offered at registration, with their wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityQuestion {
    Pet,
    MaidenName,
    School,
}

impl SecurityQuestion {
    pub const ALL: [Self; 3] = [Self::Pet, Self::MaidenName, Self::School];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pet => "pet",
            Self::MaidenName => "maiden_name",
            Self::School => "school",
        }
    }

    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Pet => "What is your pet's name?",
            Self::MaidenName => "What is your mother's maiden name?",
            Self::School => "What was your first school?",
        }
    }
}

impl fmt::Display for SecurityQuestion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SecurityQuestion {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|question| question.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| Error::validation("security_question", "Please select a security question"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub security_question: Option<SecurityQuestion>,
    pub security_answer: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    security_question: SecurityQuestion,
    security_answer: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
    session: Session,
}

impl AuthClient {
    pub const fn new(api: ApiClient, session: Session) -> Self {
        Self { api, session }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Signs in and starts the session with the issued token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        const MISSING: &str = "Please enter both username and password";
        let username = required_text("username", username, MISSING)?;
        // Passwords are sent as typed; only blank input is rejected.
        if password.trim().is_empty() {
            return Err(Error::validation("password", MISSING));
        }

        let request = self
            .api
            .request(Method::POST, &["login"])?
            .json(&serde_json::json!({ "username": username, "password": password }));
        let response: LoginResponse = self.api.fetch(request, "Failed to log in").await?;

        let token = response
            .token
            .ok_or_else(|| Error::Remote {
                status: 200,
                message: "Login response did not include a token".to_string(),
            })
            .and_then(SessionToken::new)?;
        self.session.begin(token)?;
        tracing::info!(%username, "Signed in");

        Ok(ApiMessage {
            message: response.message,
        }
        .or_fallback("Login successful"))
    }

    /// Creates an account. Does not sign in.
    pub async fn register(&self, form: &RegisterForm) -> Result<String> {
        const MISSING: &str = "All fields are required";
        let username = required_text("username", &form.username, MISSING)?;
        if form.password.trim().is_empty() {
            return Err(Error::validation("password", MISSING));
        }
        if form.confirm_password.trim().is_empty() {
            return Err(Error::validation("confirm_password", MISSING));
        }
        let security_question = form
            .security_question
            .ok_or_else(|| Error::validation("security_question", MISSING))?;
        let security_answer = required_text("security_answer", &form.security_answer, MISSING)?;
        if form.password != form.confirm_password {
            return Err(Error::validation("confirm_password", "Passwords do not match"));
        }

        let request = self.api.request(Method::POST, &["register"])?.json(&RegisterRequest {
            username: &username,
            password: &form.password,
            security_question,
            security_answer: &security_answer,
        });
        let ack = match self.api.submit(request, "Registration failed").await {
            Err(Error::Remote { status: 409, .. }) => {
                return Err(Error::Remote {
                    status: 409,
                    message: USERNAME_TAKEN.to_string(),
                })
            }
            other => other?,
        };
        tracing::info!(%username, "Registered account");
        Ok(ack.or_fallback("Registration successful"))
    }

    /// Resets a password using the account's security answer.
    pub async fn forgot_password(
        &self,
        username: &str,
        security_answer: &str,
        new_password: &str,
    ) -> Result<String> {
        const MISSING: &str = "Please fill all fields";
        let username = required_text("username", username, MISSING)?;
        let security_answer = required_text("security_answer", security_answer, MISSING)?;
        if new_password.trim().is_empty() {
            return Err(Error::validation("new_password", MISSING));
        }

        let request = self
            .api
            .request(Method::POST, &["forgot-password"])?
            .json(&serde_json::json!({
                "username": username,
                "security_answer": security_answer,
                "new_password": new_password,
            }));
        let ack = self.api.submit(request, "Failed to reset password").await?;
        Ok(ack.or_fallback("Password reset successful"))
    }

    /// Revokes the token server-side and ends the session.
    ///
    /// The token is kept when the server fails for any reason other than
    /// rejecting the token itself.
    pub async fn logout(&self) -> Result<String> {
        let request = self.api.authorized(&self.session, Method::POST, &["logout"])?;
        let message = match self.api.submit(request, "Failed to logout").await {
            Ok(ack) => ack.or_fallback("Logout successful"),
            Err(Error::Remote { status: 401, .. }) => {
                tracing::debug!("Server no longer accepts the token; clearing it");
                "Logout successful".to_string()
            }
            Err(error) => return Err(error),
        };
        self.session.end()?;
        tracing::info!("Signed out");
        Ok(message)
    }
}
