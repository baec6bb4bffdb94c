use crate::macros::setter;
use crate::request::{ApiRequest, EmptyResponse, Method, RequestData};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub lawyer_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub is_booked: bool,
}

impl TimeSlot {
    pub fn duration(&self) -> chrono::Duration {
        self.end_at - self.start_at
    }
}

/// Groups slots by the calendar day they start on in `tz`.
///
/// Days come out ascending and each day's slots are ordered by start time.
/// With `available_only`, booked slots are dropped and days left empty are
/// omitted.
pub fn group_slots_by_day<Tz>(
    slots: &[TimeSlot],
    tz: &Tz,
    available_only: bool,
) -> BTreeMap<NaiveDate, Vec<TimeSlot>>
where
    Tz: TimeZone,
{
    let mut days: BTreeMap<NaiveDate, Vec<TimeSlot>> = BTreeMap::new();
    for slot in slots.iter().filter(|s| !(available_only && s.is_booked)) {
        let day = slot.start_at.with_timezone(tz).date_naive();
        days.entry(day).or_default().push(slot.clone());
    }
    for day in days.values_mut() {
        day.sort_by_key(|s| (s.start_at, s.end_at));
    }
    days
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct GetSchedule {
    #[serde(skip)]
    lawyer_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<NaiveDate>,
}

impl GetSchedule {
    pub fn new(lawyer_id: Uuid) -> Self {
        Self {
            lawyer_id,
            from: None,
            to: None,
        }
    }

    setter!(opt from: NaiveDate);
    setter!(opt to: NaiveDate);
}

impl ApiRequest for GetSchedule {
    type Data = Self;
    type Response = Vec<TimeSlot>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/lawyers/{}/schedule", self.lawyer_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlot {
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
}

impl CreateTimeSlot {
    pub fn new(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self { start_at, end_at }
    }
}

impl ApiRequest for CreateTimeSlot {
    type Data = Self;
    type Response = TimeSlot;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/schedule/slots".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteTimeSlot {
    id: Uuid,
}

impl DeleteTimeSlot {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl ApiRequest for DeleteTimeSlot {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/schedule/slots/{}", self.id).into()
    }
}
