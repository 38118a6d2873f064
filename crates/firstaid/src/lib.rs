//! `firstaid` - Step-by-step first-aid guidance with bilingual narration
//!
//! This library provides the guidance core of a touchscreen first-aid kiosk:
//! view routing with an idle timeout and a panic shortcut to CPR, linear
//! step flows with countdowns, the CPR age gate and compression rhythm,
//! English/Arabic content, spoken narration and a persisted kit inventory.
//!
//! The core is synchronous and clock-driven. A host feeds input events and a
//! millisecond clock into [`NavigationController`] and renders its
//! [`AppSnapshot`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod flow;
pub mod kit;
pub mod logging;
pub mod narration;
pub mod navigation;
pub mod runtime;
pub mod schedule;
pub mod storage;

pub use config::Config;
pub use content::{get_content, ContentBundle, FlowKind, GuideStep, Language, TextDirection};
pub use error::{Error, Result};
pub use flow::{AgeGroup, CprFlowEngine, StepFlowEngine};
pub use kit::{KitInventory, KitItem, KitStatus, KitStore};
pub use logging::init_logging;
pub use narration::{SpeechCapability, VoiceNarrator};
pub use navigation::{AppSnapshot, InputEvent, NavigationController, Transition, View};
pub use storage::{Storage, StorageStats};
