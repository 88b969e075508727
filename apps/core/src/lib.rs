//! MindCare core: the testable logic behind the student support client.
//!
//! PHQ-9 scoring and severity banding, crisis-aware scripted chat, a
//! role-gated view table, counselor booking and the session value, all fed
//! by static, localized content.

pub mod assessment;
pub mod auth;
pub mod booking;
pub mod chat;
pub mod config;
pub mod content;
pub mod error;
pub mod locale;
pub mod resources;
pub mod routing;
pub mod scheduler;
pub mod storage;
pub mod telemetry;

pub use error::AppError;
pub use locale::{Locale, Localized};

#[cfg(test)]
mod tests;
