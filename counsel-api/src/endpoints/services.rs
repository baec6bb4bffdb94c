use crate::macros::setter;
use crate::request::{ApiRequest, EmptyResponse, Method, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

/// A service a lawyer offers, e.g. a one-hour contract review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalService {
    pub id: Uuid,
    pub lawyer_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub duration_minutes: u32,
}

// Requests

#[derive(Debug, Clone)]
pub struct ListServices {
    lawyer_id: Uuid,
}

impl ListServices {
    pub fn new(lawyer_id: Uuid) -> Self {
        Self { lawyer_id }
    }
}

impl ApiRequest for ListServices {
    type Data = ();
    type Response = Vec<LegalService>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/lawyers/{}/services", self.lawyer_id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    price: u64,
    duration_minutes: u32,
}

impl CreateService {
    pub fn new(name: impl Into<String>, price: u64, duration_minutes: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            duration_minutes,
        }
    }

    setter!(opt description: String);
}

impl ApiRequest for CreateService {
    type Data = Self;
    type Response = LegalService;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/services".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// Partial update; only the fields that were set are sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateService {
    #[serde(skip)]
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_minutes: Option<u32>,
}

impl UpdateService {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            description: None,
            price: None,
            duration_minutes: None,
        }
    }

    setter!(opt name: String);
    setter!(opt description: String);
    setter!(opt price: u64);
    setter!(opt duration_minutes: u32);
}

impl ApiRequest for UpdateService {
    type Data = Self;
    type Response = LegalService;
    const METHOD: Method = Method::PATCH;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/services/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteService {
    id: Uuid,
}

impl DeleteService {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl ApiRequest for DeleteService {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/services/{}", self.id).into()
    }
}
