mod client;
pub mod endpoints;
mod error;
mod macros;
pub mod repositories;
mod request;
mod session;

pub use crate::client::{CallOptions, Client, ClientConfig, DEFAULT_BASE_URL};
pub use crate::error::{
    ApiError, Failure, TransportCode, UNAUTHENTICATED_CODE, UNKNOWN_ERROR_CODE,
    UnknownTransportCode, normalize,
};
pub use crate::request::{ApiRequest, EmptyResponse, Method, RequestData};
pub use crate::session::{RequestContext, SessionHandle, SessionListener, SessionStatus};
pub use tokio_util::sync::CancellationToken;
use repositories::*;

pub struct Request;

impl Request {
    pub fn auth() -> AuthRepository {
        AuthRepository::new()
    }

    pub fn lawyers() -> LawyerRepository {
        LawyerRepository::new()
    }

    pub fn schedule() -> ScheduleRepository {
        ScheduleRepository::new()
    }

    pub fn services() -> ServiceRepository {
        ServiceRepository::new()
    }

    pub fn consultations() -> ConsultationRepository {
        ConsultationRepository::new()
    }

    pub fn questions() -> QuestionRepository {
        QuestionRepository::new()
    }
}
