use super::Role;
use crate::macros::setter;
use crate::request::{ApiRequest, Method, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
}

// Requests

#[derive(Clone, Serialize)]
pub struct Login {
    email: String,
    password: String,
}

impl Login {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ApiRequest for Login {
    type Data = Self;
    type Response = AuthResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/login".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    email: String,
    password: String,
    full_name: String,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl Register {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            full_name: full_name.into(),
            role: Role::Client,
            phone: None,
        }
    }

    setter!(role: Role);
    setter!(opt phone: String);
}

impl std::fmt::Debug for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Register")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish()
    }
}

impl ApiRequest for Register {
    type Data = Self;
    type Response = AuthResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/register".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Default, Debug, Clone)]
pub struct CurrentUser;

impl ApiRequest for CurrentUser {
    type Data = ();
    type Response = User;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/me".into()
    }
}

// Responses

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("access_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}
