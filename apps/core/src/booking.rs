//! Counselor directory and simulated appointment booking.
//!
//! A booking starts `Pending` and a confirmation continuation flips it to
//! `Confirmed` after the configured delay, unless it was cancelled first.

use chrono::{DateTime, NaiveDate, Utc};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::content::ContentProvider;
use crate::error::AppError;
use crate::locale::Locale;
use crate::scheduler::TaskScheduler;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`, exclusive
    pub end: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounselorStatus {
    Approved,
    Pending,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counselor {
    pub id: String,
    pub name: String,
    pub qualification: String,
    pub specialization: Vec<String>,
    pub languages: Vec<Locale>,
    pub institution_id: Option<String>,
    pub status: CounselorStatus,
    /// Keyed by lowercase weekday name
    pub availability: HashMap<String, Availability>,
    pub bio: String,
}

impl Counselor {
    /// Half-hour slots on `date` according to the weekday availability.
    pub fn available_slots(&self, date: NaiveDate) -> Vec<String> {
        let weekday = date.format("%A").to_string().to_lowercase();
        let Some(window) = self.availability.get(&weekday) else {
            return Vec::new();
        };

        let (Some(start), Some(end)) = (parse_hour(&window.start), parse_hour(&window.end)) else {
            warn!(counselor = %self.id, weekday, "unparseable availability window");
            return Vec::new();
        };

        (start..end)
            .flat_map(|hour| [format!("{:02}:00", hour), format!("{:02}:30", hour)])
            .collect()
    }
}

fn parse_hour(time: &str) -> Option<u32> {
    time.split(':').next()?.trim().parse().ok()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Affiliation {
    #[default]
    All,
    Institution,
    Independent,
}

/// Directory filters. Only approved counselors are ever listed.
#[derive(Debug, Clone, Default)]
pub struct CounselorFilter {
    pub search: String,
    pub specialization: Option<String>,
    pub affiliation: Affiliation,
}

impl CounselorFilter {
    pub fn matches(&self, counselor: &Counselor) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = counselor.name.to_lowercase().contains(&needle)
            || counselor
                .specialization
                .iter()
                .any(|spec| spec.to_lowercase().contains(&needle));
        let matches_specialization = self
            .specialization
            .as_ref()
            .map_or(true, |wanted| counselor.specialization.contains(wanted));
        let matches_affiliation = match self.affiliation {
            Affiliation::All => true,
            Affiliation::Institution => counselor.institution_id.is_some(),
            Affiliation::Independent => counselor.institution_id.is_none(),
        };

        matches_search
            && matches_specialization
            && matches_affiliation
            && counselor.status == CounselorStatus::Approved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionType {
    Video,
    InPerson,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(length(min = 1))]
    pub counselor_id: String,
    pub date: NaiveDate,
    #[validate(length(equal = 5))]
    pub time: String,
    pub session_type: SessionType,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub counselor_id: String,
    pub counselor_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub session_type: SessionType,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct BookingDesk {
    content: Arc<dyn ContentProvider>,
    appointments: Arc<Mutex<Vec<Appointment>>>,
    scheduler: Arc<dyn TaskScheduler>,
    confirmation_delay: Duration,
}

impl BookingDesk {
    pub fn new(
        content: Arc<dyn ContentProvider>,
        scheduler: Arc<dyn TaskScheduler>,
        confirmation_delay: Duration,
    ) -> Self {
        Self {
            content,
            appointments: Arc::new(Mutex::new(Vec::new())),
            scheduler,
            confirmation_delay,
        }
    }

    pub fn counselors(&self, filter: &CounselorFilter) -> Vec<&Counselor> {
        self.content
            .counselors()
            .iter()
            .filter(|c| filter.matches(c))
            .collect()
    }

    /// Distinct specializations across the directory, in first-seen order.
    pub fn specializations(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for spec in self
            .content
            .counselors()
            .iter()
            .flat_map(|c| c.specialization.iter())
        {
            if !seen.contains(&spec.as_str()) {
                seen.push(spec);
            }
        }
        seen
    }

    fn approved_counselor(&self, id: &str) -> Result<&Counselor, AppError> {
        self.content
            .counselors()
            .iter()
            .find(|c| c.id == id && c.status == CounselorStatus::Approved)
            .ok_or_else(|| AppError::NotFound(format!("counselor {}", id)))
    }

    /// Creates a pending appointment and schedules its confirmation.
    #[instrument(skip(self, request), fields(counselor = %request.counselor_id))]
    pub async fn book(&self, request: BookingRequest) -> Result<Appointment, AppError> {
        request.validate()?;
        let counselor = self.approved_counselor(&request.counselor_id)?;

        if request.date < Utc::now().date_naive() {
            return Err(AppError::InvalidInput(format!(
                "{} is in the past",
                request.date
            )));
        }
        if !counselor.available_slots(request.date).contains(&request.time) {
            return Err(AppError::InvalidInput(format!(
                "{} {} is not an available slot",
                request.date, request.time
            )));
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            counselor_id: counselor.id.clone(),
            counselor_name: counselor.name.clone(),
            date: request.date,
            time: request.time,
            session_type: request.session_type,
            status: AppointmentStatus::Pending,
            notes: request.notes,
            created_at: Utc::now(),
        };
        self.appointments.lock().await.push(appointment.clone());
        info!(appointment = %appointment.id, "appointment requested");

        let appointments = Arc::clone(&self.appointments);
        let id = appointment.id;
        self.scheduler.schedule(
            self.confirmation_delay,
            async move {
                let mut appointments = appointments.lock().await;
                if let Some(apt) = appointments.iter_mut().find(|apt| apt.id == id) {
                    if apt.status == AppointmentStatus::Pending {
                        apt.status = AppointmentStatus::Confirmed;
                        info!(appointment = %id, "appointment confirmed");
                    }
                }
            }
            .boxed(),
        );

        Ok(appointment)
    }

    pub async fn cancel(&self, id: Uuid) -> Result<Appointment, AppError> {
        let mut appointments = self.appointments.lock().await;
        let apt = appointments
            .iter_mut()
            .find(|apt| apt.id == id)
            .ok_or_else(|| AppError::NotFound(format!("appointment {}", id)))?;
        apt.status = AppointmentStatus::Cancelled;
        info!(appointment = %id, "appointment cancelled");
        Ok(apt.clone())
    }

    pub async fn appointments(&self) -> Vec<Appointment> {
        self.appointments.lock().await.clone()
    }
}
