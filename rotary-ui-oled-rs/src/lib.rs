//! Four-line SSD1306 (128×64) status screen for the rotary encoder UI.
//!
//! [`FourLineScreen`] implements [`rotary_ui::Display`]: it keeps the
//! brightness/speed/intensity line, the palette and effect names, the edit
//! marker, timed overlays and an idle timer. [`render_screen`] draws it
//! with `embedded-graphics` and [`OledDriver`] pushes the frame to the
//! panel.
//!
//! # Quick Start
//!
//! ```ignore
//! use rotary_ui_oled::{display_task::{screen_refresh_task, ScreenHandle, SharedScreen}, *};
//!
//! static SCREEN: StaticCell<SharedScreen> = StaticCell::new();
//! let config = ScreenConfig::default();
//! let screen = SCREEN.init(Mutex::new(RefCell::new(FourLineScreen::new(&config))));
//!
//! let ui = RotaryEncoderUi::with_display(engine, pins, Some(ScreenHandle::new(screen)));
//! spawner.spawn(oled_task(OledDriver::new(i2c, 0x3C), screen, config)).unwrap();
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`].
//! - **`task`** — the shared screen handle and the Embassy refresh loop.

#![no_std]

#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod layout;
pub mod screen;

// ── Re-exports for convenience ───────────────────────────────────────────

#[cfg(feature = "task")]
pub use display_task::{screen_refresh_task, ScreenHandle, SharedScreen};
pub use driver::OledDriver;
pub use error::OledError;
pub use layout::{render_screen, ScreenConfig, ScreenState, ValueLines};
pub use screen::FourLineScreen;
