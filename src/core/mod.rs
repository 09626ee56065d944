//! Core library components.
//!
//! This module contains the reusable logic for locating secret files,
//! fetching the key, transforming files, and wiring the shell alias.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod lifecycle;
pub mod locator;
pub mod marker;
pub mod provider;
pub mod runner;
pub mod shell;
pub mod transform;
