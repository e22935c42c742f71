//! Eye Care Library
//!
//! This library provides the core functionality of the 20-20-20 break
//! reminder. It includes:
//! - Break cycle controller driving the work/break countdown
//! - Tone cues synthesized with rodio
//! - Media play/pause toggling (Windows only)
//! - Status window and full-screen break overlay built on egui
//! - Startup platform check

pub mod cycle;
pub mod media;
pub mod platform;
pub mod sound;
pub mod types;
pub mod ui;
