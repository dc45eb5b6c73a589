//! Motivation Profile - Motivational Profile Scoring Engine
//!
//! This crate scores a fixed questionnaire of forced-choice and self-report
//! questions into a ranked profile of motivational factors, with a
//! consistency check over repeated questions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
