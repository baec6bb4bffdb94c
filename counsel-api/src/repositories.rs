use crate::endpoints::{
    auth::{CurrentUser, Login, Register},
    consultations::{CancelConsultation, ListConsultations, RequestConsultation},
    lawyers::{GetLawyer, ListLawyers},
    questions::{AnswerQuestion, AskQuestion, GetQuestion, ListQuestions},
    schedule::{CreateTimeSlot, DeleteTimeSlot, GetSchedule},
    services::{CreateService, DeleteService, ListServices, UpdateService},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub struct AuthRepository;

impl AuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) -> Login {
        Login::new(email, password)
    }

    pub fn register(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Register {
        Register::new(email, password, full_name)
    }

    pub fn me(&self) -> CurrentUser {
        CurrentUser
    }
}

pub struct LawyerRepository;

impl LawyerRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListLawyers {
        ListLawyers::new()
    }

    pub fn get(&self, id: Uuid) -> GetLawyer {
        GetLawyer::new(id)
    }
}

#[derive(Default)]
pub struct ScheduleRepository {
    lawyer_id: Uuid,
}

impl ScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lawyer(mut self, lawyer_id: Uuid) -> Self {
        self.lawyer_id = lawyer_id;
        self
    }

    pub fn get(&self) -> GetSchedule {
        GetSchedule::new(self.lawyer_id)
    }

    pub fn create_slot(&self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> CreateTimeSlot {
        CreateTimeSlot::new(start_at, end_at)
    }

    pub fn delete_slot(&self, slot_id: Uuid) -> DeleteTimeSlot {
        DeleteTimeSlot::new(slot_id)
    }
}

#[derive(Default)]
pub struct ServiceRepository {
    lawyer_id: Uuid,
}

impl ServiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lawyer(mut self, lawyer_id: Uuid) -> Self {
        self.lawyer_id = lawyer_id;
        self
    }

    pub fn list(&self) -> ListServices {
        ListServices::new(self.lawyer_id)
    }

    pub fn create(
        &self,
        name: impl Into<String>,
        price: u64,
        duration_minutes: u32,
    ) -> CreateService {
        CreateService::new(name, price, duration_minutes)
    }

    pub fn update(&self, service_id: Uuid) -> UpdateService {
        UpdateService::new(service_id)
    }

    pub fn delete(&self, service_id: Uuid) -> DeleteService {
        DeleteService::new(service_id)
    }
}

pub struct ConsultationRepository;

impl ConsultationRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn request(&self, lawyer_id: Uuid, topic: impl Into<String>) -> RequestConsultation {
        RequestConsultation::new(lawyer_id, topic)
    }

    pub fn mine(&self) -> ListConsultations {
        ListConsultations::new()
    }

    pub fn cancel(&self, consultation_id: Uuid) -> CancelConsultation {
        CancelConsultation::new(consultation_id)
    }
}

pub struct QuestionRepository;

impl QuestionRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListQuestions {
        ListQuestions::new()
    }

    pub fn get(&self, id: Uuid) -> GetQuestion {
        GetQuestion::new(id)
    }

    pub fn ask(&self, title: impl Into<String>, body: impl Into<String>) -> AskQuestion {
        AskQuestion::new(title, body)
    }

    pub fn answer(&self, question_id: Uuid, body: impl Into<String>) -> AnswerQuestion {
        AnswerQuestion::new(question_id, body)
    }
}
