//! # LUMEN
//!
//! The menu crate, integrating the region heaps and the dialog controller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            MenuLoop                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────────────┐          ┌──────────────────────────┐ │
//! │  │   lumen_core         │          │   lumen_ui               │ │
//! │  │                      │          │                          │ │
//! │  │  • MEM1 / bucket     │          │  • DialogController      │ │
//! │  │  • MEM2 (system)     │          │  • Help, bindings        │ │
//! │  │  • Frame heap states │          │  • Settings (TOML)       │ │
//! │  └──────────────────────┘          └──────────────────────────┘ │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `menu_loop`: Startup dialogs and per-frame dialog servicing
//! - `error`: Errors surfaced by the loop

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod menu_loop;

// Re-export the layers
pub use lumen_core as core;
pub use lumen_ui as ui;

pub use error::{LumenError, LumenResult};
pub use menu_loop::{FrameReport, MenuLoop, MenuLoopConfig, TARGET_FRAME_TIME};
