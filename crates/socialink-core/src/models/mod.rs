//! Data models for document extraction and configuration.

pub mod config;
pub mod document;
