use super::Paginated;
use crate::macros::setter;
use crate::request::{ApiRequest, Method, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ConsultationStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: Uuid,
    pub lawyer_id: Uuid,
    pub client_id: Uuid,
    pub slot_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub topic: String,
    pub description: Option<String>,
    pub status: ConsultationStatus,
    pub created_at: DateTime<Utc>,
}

// Requests

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConsultation {
    lawyer_id: Uuid,
    topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    slot_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl RequestConsultation {
    pub fn new(lawyer_id: Uuid, topic: impl Into<String>) -> Self {
        Self {
            lawyer_id,
            topic: topic.into(),
            slot_id: None,
            service_id: None,
            description: None,
        }
    }

    setter!(opt slot_id: Uuid);
    setter!(opt service_id: Uuid);
    setter!(opt description: String);
}

impl ApiRequest for RequestConsultation {
    type Data = Self;
    type Response = Consultation;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/consultations".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// The signed-in user's consultations, as client or as lawyer.
#[derive(Default, Debug, Clone, Serialize)]
pub struct ListConsultations {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<ConsultationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl ListConsultations {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt status: ConsultationStatus);
    setter!(opt page: u32);
    setter!(opt limit: u32);
}

impl ApiRequest for ListConsultations {
    type Data = Self;
    type Response = Paginated<Consultation>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/consultations/me".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelConsultation {
    #[serde(skip)]
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl CancelConsultation {
    pub fn new(id: Uuid) -> Self {
        Self { id, reason: None }
    }

    setter!(opt reason: String);
}

impl ApiRequest for CancelConsultation {
    type Data = Self;
    type Response = Consultation;
    const METHOD: Method = Method::PATCH;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/consultations/{}/cancel", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}
