use serde::de::{Deserialize, DeserializeOwned, Deserializer, IgnoredAny};
use serde::Serialize;
use std::borrow::Cow;

pub use reqwest::Method;

/// What a request sends besides its path.
#[derive(Debug, Clone, Copy)]
pub enum RequestData<T> {
    Empty,
    Query(T),
    Json(T),
}

/// A typed API call: where it goes, what it sends and what comes back.
pub trait ApiRequest {
    type Data: Serialize;
    type Response: DeserializeOwned;
    const METHOD: Method = Method::GET;

    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

/// Response type for calls whose body is irrelevant (204s, acknowledgements).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyResponse;

impl<'de> Deserialize<'de> for EmptyResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer).map(|_| EmptyResponse)
    }
}
