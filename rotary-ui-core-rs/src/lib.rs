//! Rotary encoder + push button UI for an addressable-LED controller.
//!
//! Turning the encoder edits one lighting parameter at a time; clicking
//! the button moves to the next parameter. Effects and palettes are
//! browsed alphabetically even though the engine addresses them by their
//! position in its unsorted name tables.
//!
//! ```text
//!  name tables ──► NameTable ──► AlphaIndex ──► Selections
//!                                                   │
//!  pins ──► InputPoller ──► MenuController ──► ParameterAdjusters ──► Engine
//!                                                   │
//!                                                   └──► Display (optional)
//! ```
//!
//! The host supplies three collaborators: an [`Engine`], a [`PinManager`]
//! and optionally a [`Display`]. [`RotaryEncoderUi`] ties them to the
//! host's `setup` / `loop` / config hooks.
//!
//! # Quick Start
//!
//! ```ignore
//! use rotary_ui::{RotaryEncoderUi, CONFIG_SECTION};
//!
//! let mut ui = RotaryEncoderUi::new(engine, pin_manager);
//! ui.read_from_config(stored.get(CONFIG_SECTION), millis());
//! ui.setup(millis())?;
//!
//! loop {
//!     ui.poll(millis());
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`].
//! - **`task`** — [`task::poll_loop`], an Embassy ticker driving the UI.

#![no_std]

pub mod adjust;
pub mod color;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod input;
pub mod menu;
pub mod name_table;
pub mod pins;
pub mod selection;
#[cfg(feature = "task")]
pub mod task;
pub mod ui;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use adjust::{ParameterAdjusters, PresetRange};
pub use config::{RotaryConfig, Settings, CONFIG_SECTION};
pub use display::{Display, Field, Glyph, Mark, NoDisplay};
pub use engine::{Change, Engine, SegmentUpdate};
pub use error::SetupError;
pub use input::{ButtonEvent, Direction, InputPoller};
pub use menu::{MenuController, Mode};
pub use name_table::{AlphaIndex, NameTable, NameTableError};
pub use pins::{PinConfig, PinManager, PinOwner};
pub use selection::{Reconciled, SelectionState, Selections};
pub use ui::RotaryEncoderUi;
