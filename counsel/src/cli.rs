use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use counsel_api::endpoints::consultations::ConsultationStatus;
use std::path::PathBuf;
use uuid::Uuid;

/// Find lawyers, book consultations and ask legal questions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lists lawyers
    Lawyers {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Only featured VIP lawyers, in featured order
        #[arg(long)]
        vip: bool,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Shows a lawyer's profile and services
    Lawyer { id: Uuid },
    /// Shows a lawyer's time slots grouped by day
    Schedule {
        lawyer_id: Uuid,
        /// Hide booked slots
        #[arg(long)]
        available: bool,
    },
    /// Signs in and saves the access token
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forgets the saved access token
    Logout,
    /// Shows the signed-in account
    Whoami,
    /// Requests a consultation with a lawyer
    Consult {
        lawyer_id: Uuid,
        topic: String,
        #[arg(long)]
        slot: Option<Uuid>,
        #[arg(long)]
        service: Option<Uuid>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Lists your consultations
    Consultations {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Cancels a consultation
    Cancel {
        id: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Lists public legal questions
    Questions {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Shows a question with its answers
    Question { id: Uuid },
    /// Posts a legal question
    Ask {
        title: String,
        body: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Answers a question (lawyer accounts)
    Answer { question_id: Uuid, body: String },
    /// Adds a time slot to your schedule (lawyer accounts)
    AddSlot {
        /// RFC 3339 start, e.g. 2024-05-01T09:00:00Z
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Removes a time slot from your schedule
    RemoveSlot { id: Uuid },
    /// Adds a service you offer (lawyer accounts)
    AddService {
        name: String,
        price: u64,
        minutes: u32,
        #[arg(long)]
        description: Option<String>,
    },
    /// Removes one of your services
    RemoveService { id: Uuid },
    /// Uploads a new profile picture
    Avatar { path: PathBuf },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl From<StatusArg> for ConsultationStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => ConsultationStatus::Pending,
            StatusArg::Confirmed => ConsultationStatus::Confirmed,
            StatusArg::Completed => ConsultationStatus::Completed,
            StatusArg::Cancelled => ConsultationStatus::Cancelled,
        }
    }
}
