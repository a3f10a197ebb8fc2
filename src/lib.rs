//! Command-line client for the Innovo intelligent document processing
//! backend: uploads documents, drives the upload/extract workflow, and
//! derives the dashboard and ROI figures from the analytics feed.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
