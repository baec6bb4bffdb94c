use chrono::{FixedOffset, NaiveDate};
use counsel_api::endpoints::{
    consultations::{Consultation, ConsultationStatus},
    lawyers::Lawyer,
    questions::Question,
    schedule::TimeSlot,
    services::LegalService,
};
use std::collections::BTreeMap;

/// 1234567 -> "1,234,567"
pub fn price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn lawyer_line(lawyer: &Lawyer) -> String {
    let vip = if lawyer.is_vip { " [VIP]" } else { "" };
    let city = lawyer.city.as_deref().unwrap_or("-");
    let rate = lawyer
        .hourly_rate
        .map(|r| format!("{}/h", price(r)))
        .unwrap_or_else(|| "rate on request".to_string());
    format!(
        "{}  {}{}  {}  ★{:.1} ({} reviews)  {}",
        lawyer.id, lawyer.full_name, vip, city, lawyer.rating, lawyer.review_count, rate
    )
}

pub fn lawyer_profile(lawyer: &Lawyer, services: &[LegalService]) -> Vec<String> {
    let mut lines = vec![lawyer_line(lawyer)];
    if !lawyer.specialties.is_empty() {
        lines.push(format!("Specialties: {}", lawyer.specialties.join(", ")));
    }
    lines.push(format!("Experience: {} years", lawyer.years_of_experience));
    if let Some(bio) = &lawyer.bio {
        lines.push(bio.clone());
    }
    if !services.is_empty() {
        lines.push("Services:".to_string());
        lines.extend(services.iter().map(service_line));
    }
    lines
}

pub fn service_line(service: &LegalService) -> String {
    format!(
        "  {}  {}  {} ({} min)",
        service.id,
        service.name,
        price(service.price),
        service.duration_minutes
    )
}

pub fn schedule(days: &BTreeMap<NaiveDate, Vec<TimeSlot>>, tz: &FixedOffset) -> Vec<String> {
    let mut lines = Vec::new();
    for (day, slots) in days {
        lines.push(day.format("%a %d %b %Y").to_string());
        for slot in slots {
            let state = if slot.is_booked { "booked" } else { "free" };
            lines.push(format!(
                "  {}-{}  {}  {}",
                slot.start_at.with_timezone(tz).format("%H:%M"),
                slot.end_at.with_timezone(tz).format("%H:%M"),
                state,
                slot.id
            ));
        }
    }
    lines
}

pub fn consultation_line(consultation: &Consultation) -> String {
    format!(
        "{}  {}  {}  {}",
        consultation.id,
        status(consultation.status),
        consultation.created_at.format("%Y-%m-%d"),
        consultation.topic
    )
}

fn status(status: ConsultationStatus) -> &'static str {
    match status {
        ConsultationStatus::Pending => "pending",
        ConsultationStatus::Confirmed => "confirmed",
        ConsultationStatus::Completed => "completed",
        ConsultationStatus::Cancelled => "cancelled",
    }
}

pub fn question_line(question: &Question) -> String {
    format!(
        "{}  {}  ({} answers)",
        question.id, question.title, question.answer_count
    )
}

pub fn question_detail(question: &Question) -> Vec<String> {
    let mut lines = vec![question.title.clone(), question.body.clone()];
    for answer in &question.answers {
        let by = answer.lawyer_name.as_deref().unwrap_or("Lawyer");
        lines.push(format!("-- {}: {}", by, answer.body));
    }
    lines
}
