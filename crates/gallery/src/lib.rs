#![forbid(unsafe_code)]

//! # Widget Gallery
//!
//! A terminal gallery of small interactive widget demos built on
//! [`gallery_core`]: an activity heat map, a two-handle range slider, a
//! timing-curve editor, translated-text overlays and a headphone sensor
//! readout.
//!
//! ## Public Modules
//!
//! - [`app`] - Navigation, routing and frame rendering
//! - [`cli`] - Command-line arguments
//! - [`config`] - Runtime configuration
//! - [`data`] - Seeded demo data and simulated sensors
//! - [`logging`] - Tracing subscriber setup
//! - [`messages`] - Keys and page identifiers
//! - [`pages`] - One model per demo page
//! - [`program`] - Terminal event loop
//! - [`theme`] - Colors and style helpers

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod messages;
pub mod pages;
pub mod program;
pub mod theme;
