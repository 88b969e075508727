//! Test Module
//!
//! Cross-module test suite for the MindCare core.
//!
//! ## Test Categories
//! - `assessment_tests`: Scoring properties, banding, recommendations, submit/retake flow
//! - `chat_tests`: Crisis detection, reply selection, conversation actor
//! - `auth_tests`: Login, logout and session restore against a real store
//! - `storage_tests`: SQLite key/value store on disk
//! - `routing_tests`: Role × tab view table and menus
//! - `booking_tests`: Counselor directory, slots, confirmation and cancellation

pub mod assessment_tests;
pub mod chat_tests;
