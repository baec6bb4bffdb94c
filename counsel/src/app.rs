use anyhow::{Context, Result};
use chrono::{FixedOffset, Local};
use counsel_api::endpoints::lawyers::vip_lawyers;
use counsel_api::endpoints::schedule::group_slots_by_day;
use counsel_api::endpoints::uploads::{UploadFile, UploadedFile, AVATAR_PATH};
use counsel_api::{ApiRequest, CallOptions, Request};
use counsel_auth::AuthManager;
use std::io::Write;
use std::path::Path;

use crate::cli::Command;
use crate::format;

pub struct App {
    auth: AuthManager,
    offset: FixedOffset,
}

impl App {
    pub fn new(auth: AuthManager) -> Self {
        Self {
            auth,
            offset: *Local::now().offset(),
        }
    }

    /// Render times in `offset` instead of the local time zone.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Lawyers {
                city,
                specialty,
                search,
                vip,
                page,
                limit,
            } => {
                let mut req = Request::lawyers().list().page(page).limit(limit);
                if let Some(city) = city {
                    req = req.city(city);
                }
                if let Some(specialty) = specialty {
                    req = req.specialty(specialty);
                }
                if let Some(search) = search {
                    req = req.search(search);
                }
                if vip {
                    req = req.vip_only(true);
                }

                let lawyers = self.public(req).await?;
                let shown = if vip {
                    vip_lawyers(&lawyers.items)
                } else {
                    lawyers.items.iter().collect()
                };
                for lawyer in &shown {
                    writeln!(out, "{}", format::lawyer_line(lawyer))?;
                }
                writeln!(
                    out,
                    "Page {} ({} of {} lawyers)",
                    lawyers.page,
                    shown.len(),
                    lawyers.total
                )?;
            }
            Command::Lawyer { id } => {
                let lawyer = self.public(Request::lawyers().get(id)).await?;
                let services = self
                    .public(Request::services().with_lawyer(id).list())
                    .await?;
                write_lines(out, format::lawyer_profile(&lawyer, &services))?;
            }
            Command::Schedule {
                lawyer_id,
                available,
            } => {
                let slots = self
                    .public(Request::schedule().with_lawyer(lawyer_id).get())
                    .await?;
                let days = group_slots_by_day(&slots, &self.offset, available);
                if days.is_empty() {
                    writeln!(out, "No time slots")?;
                }
                write_lines(out, format::schedule(&days, &self.offset))?;
            }
            Command::Login { email, password } => {
                let user = self.auth.login(&email, &password).await?;
                writeln!(out, "Logged in as {} ({})", user.full_name, user.role)?;
            }
            Command::Logout => {
                self.auth.logout()?;
                writeln!(out, "Logged out")?;
            }
            Command::Whoami => {
                let user = self.authenticated(Request::auth().me()).await?;
                writeln!(out, "{} <{}> ({})", user.full_name, user.email, user.role)?;
            }
            Command::Consult {
                lawyer_id,
                topic,
                slot,
                service,
                description,
            } => {
                let mut req = Request::consultations().request(lawyer_id, topic);
                if let Some(slot) = slot {
                    req = req.slot_id(slot);
                }
                if let Some(service) = service {
                    req = req.service_id(service);
                }
                if let Some(description) = description {
                    req = req.description(description);
                }
                let consultation = self.authenticated(req).await?;
                writeln!(out, "Requested {}", format::consultation_line(&consultation))?;
            }
            Command::Consultations { status } => {
                let mut req = Request::consultations().mine();
                if let Some(status) = status {
                    req = req.status(status);
                }
                let consultations = self.authenticated(req).await?;
                for consultation in &consultations.items {
                    writeln!(out, "{}", format::consultation_line(consultation))?;
                }
            }
            Command::Cancel { id, reason } => {
                let mut req = Request::consultations().cancel(id);
                if let Some(reason) = reason {
                    req = req.reason(reason);
                }
                let consultation = self.authenticated(req).await?;
                writeln!(out, "Cancelled {}", format::consultation_line(&consultation))?;
            }
            Command::Questions {
                category,
                search,
                page,
            } => {
                let mut req = Request::questions().list().page(page);
                if let Some(category) = category {
                    req = req.category(category);
                }
                if let Some(search) = search {
                    req = req.search(search);
                }
                let questions = self.public(req).await?;
                for question in &questions.items {
                    writeln!(out, "{}", format::question_line(question))?;
                }
            }
            Command::Question { id } => {
                let question = self.public(Request::questions().get(id)).await?;
                write_lines(out, format::question_detail(&question))?;
            }
            Command::Ask {
                title,
                body,
                category,
            } => {
                let mut req = Request::questions().ask(title, body);
                if let Some(category) = category {
                    req = req.category(category);
                }
                let question = self.authenticated(req).await?;
                writeln!(out, "Posted {}", format::question_line(&question))?;
            }
            Command::Answer { question_id, body } => {
                let answer = self
                    .authenticated(Request::questions().answer(question_id, body))
                    .await?;
                writeln!(out, "Answered {} ({})", answer.question_id, answer.id)?;
            }
            Command::AddSlot { start, end } => {
                anyhow::ensure!(end > start, "slot must end after it starts");
                let slot = self
                    .authenticated(Request::schedule().create_slot(start, end))
                    .await?;
                writeln!(out, "Added slot {}", slot.id)?;
            }
            Command::RemoveSlot { id } => {
                self.authenticated(Request::schedule().delete_slot(id))
                    .await?;
                writeln!(out, "Removed slot {}", id)?;
            }
            Command::AddService {
                name,
                price,
                minutes,
                description,
            } => {
                let mut req = Request::services().create(name, price, minutes);
                if let Some(description) = description {
                    req = req.description(description);
                }
                let service = self.authenticated(req).await?;
                writeln!(out, "Added{}", format::service_line(&service))?;
            }
            Command::RemoveService { id } => {
                self.authenticated(Request::services().delete(id)).await?;
                writeln!(out, "Removed service {}", id)?;
            }
            Command::Avatar { path } => {
                let file = read_upload(&path).await?;
                let uploaded: UploadedFile = self
                    .auth
                    .client()
                    .upload(&self.auth.context(), AVATAR_PATH, file, CallOptions::new())
                    .await?;
                writeln!(out, "Avatar uploaded: {}", uploaded.url)?;
            }
        }

        Ok(())
    }

    async fn public<R: ApiRequest>(&self, request: R) -> Result<R::Response> {
        Ok(self
            .auth
            .client()
            .public_call(request, CallOptions::new())
            .await?)
    }

    async fn authenticated<R: ApiRequest>(&self, request: R) -> Result<R::Response> {
        Ok(self
            .auth
            .client()
            .authenticated_call(&self.auth.context(), request, CallOptions::new())
            .await?)
    }
}

fn write_lines<W: Write>(out: &mut W, lines: Vec<String>) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();

    let mut file = UploadFile::new(file_name, bytes);
    if let Some(mime_type) = mime_type(path) {
        file = file.mime_type(mime_type);
    }
    Ok(file)
}

fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
