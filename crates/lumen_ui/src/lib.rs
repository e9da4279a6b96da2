//! # LUMEN UI
//!
//! The menu's transient informational screens: welcome, help topics,
//! controls, asset extraction and achievement descriptions.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      DialogController                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  push_pending → push → (display list) → iterate per frame    │
//! │                              ↓                               │
//! │   HelpTextProvider  InputBindings  ConfigStore  Achievements │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Philosophy
//!
//! - One dialog at a time, idle is the terminal state
//! - Callers supply the time, so a recorded frame sequence replays exactly
//! - Text never overflows its buffer, it is truncated instead

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod dialog;
pub mod displaylist;
pub mod error;
pub mod help;
pub mod input;
pub mod services;
pub mod text;
pub mod timer;

pub use config::{ConfigFlag, MenuSettings, SharedSettings};
pub use dialog::{
    DialogBehavior, DialogConfig, DialogController, DialogKind, DialogServices, DialogState,
};
pub use displaylist::{DisplayListKind, DisplayListRequest, NavigationStack};
pub use error::{UiError, UiResult};
pub use help::{HelpCatalog, HelpTopic};
pub use input::{BindingTable, InputBind, JoypadInput, Key, MenuAction};
pub use services::{
    AchievementDescriptions, ConfigStore, DisplayListEnqueuer, HelpTextProvider, InputBindings,
};
pub use text::TextBuffer;
pub use timer::CountdownTimer;
