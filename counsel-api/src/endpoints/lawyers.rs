use super::Paginated;
use crate::macros::setter;
use crate::request::{ApiRequest, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lawyer {
    pub id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub years_of_experience: u32,
    pub hourly_rate: Option<u64>,
    #[serde(default)]
    pub is_vip: bool,
    /// Lower ranks are featured first.
    pub vip_rank: Option<u32>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

impl Lawyer {
    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.specialties
            .iter()
            .any(|s| s.eq_ignore_ascii_case(specialty))
    }
}

/// VIP lawyers in featured order: by VIP rank (unranked last), then
/// rating, then review count, both descending.
pub fn vip_lawyers(lawyers: &[Lawyer]) -> Vec<&Lawyer> {
    let mut vip: Vec<&Lawyer> = lawyers.iter().filter(|l| l.is_vip).collect();
    vip.sort_by(|a, b| compare_featured(a, b));
    vip
}

fn compare_featured(a: &Lawyer, b: &Lawyer) -> Ordering {
    let rank = |l: &Lawyer| l.vip_rank.unwrap_or(u32::MAX);
    rank(a)
        .cmp(&rank(b))
        .then_with(|| b.rating.total_cmp(&a.rating))
        .then_with(|| b.review_count.cmp(&a.review_count))
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLawyers {
    #[serde(skip_serializing_if = "Option::is_none")]
    specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vip_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl ListLawyers {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt specialty: String);
    setter!(opt city: String);
    setter!(opt search: String);
    setter!(opt vip_only: bool);
    setter!(opt page: u32);
    setter!(opt limit: u32);
}

impl ApiRequest for ListLawyers {
    type Data = Self;
    type Response = Paginated<Lawyer>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/lawyers".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone)]
pub struct GetLawyer {
    id: Uuid,
}

impl GetLawyer {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl ApiRequest for GetLawyer {
    type Data = ();
    type Response = Lawyer;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/lawyers/{}", self.id).into()
    }
}
