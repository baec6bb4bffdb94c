use super::Paginated;
use crate::macros::setter;
use crate::request::{ApiRequest, Method, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub answer_count: u32,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: Uuid,
    pub question_id: Uuid,
    pub lawyer_id: Uuid,
    pub lawyer_name: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListQuestions {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl ListQuestions {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt category: String);
    setter!(opt search: String);
    setter!(opt page: u32);
    setter!(opt limit: u32);
}

impl ApiRequest for ListQuestions {
    type Data = Self;
    type Response = Paginated<Question>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/questions".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone)]
pub struct GetQuestion {
    id: Uuid,
}

impl GetQuestion {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl ApiRequest for GetQuestion {
    type Data = ();
    type Response = Question;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/questions/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AskQuestion {
    title: String,
    body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl AskQuestion {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category: None,
        }
    }

    setter!(opt category: String);
}

impl ApiRequest for AskQuestion {
    type Data = Self;
    type Response = Question;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/questions".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// Lawyers only; the server rejects answers from client accounts.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerQuestion {
    #[serde(skip)]
    question_id: Uuid,
    body: String,
}

impl AnswerQuestion {
    pub fn new(question_id: Uuid, body: impl Into<String>) -> Self {
        Self {
            question_id,
            body: body.into(),
        }
    }
}

impl ApiRequest for AnswerQuestion {
    type Data = Self;
    type Response = Answer;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/questions/{}/answers", self.question_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}
