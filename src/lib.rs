//! Quill Settings Porter Library
//!
//! This module exports the core components for testing and integration.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod porter;
pub mod selection;
pub mod tree;
