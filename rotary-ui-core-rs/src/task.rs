//! Async polling loop for Embassy hosts.

use embassy_time::{Duration, Instant, Ticker};

use crate::display::Display;
use crate::engine::Engine;
use crate::input::POLL_INTERVAL_MS;
use crate::pins::PinManager;
use crate::ui::RotaryEncoderUi;

/// Run setup, then poll the UI every [`POLL_INTERVAL_MS`] forever.
///
/// This is a plain `async fn`, not an Embassy `#[task]`. Wrap it in a
/// concrete task on the host since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn encoder_task(ui: RotaryEncoderUi<MyEngine, MyPins, SharedScreen>) {
///     rotary_ui::task::poll_loop(ui).await;
/// }
/// ```
///
/// Load the stored configuration with
/// [`RotaryEncoderUi::read_from_config`] before handing the UI over. If
/// setup fails the error is logged and the loop keeps ticking with the
/// module disabled.
pub async fn poll_loop<E, P, D>(mut ui: RotaryEncoderUi<E, P, D>) -> !
where
    E: Engine,
    P: PinManager,
    D: Display,
{
    if let Err(_e) = ui.setup(now_ms()) {
        #[cfg(feature = "defmt")]
        defmt::error!("encoder setup failed: {}", _e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS as u64));
    loop {
        ticker.next().await;
        ui.poll(now_ms());
    }
}

/// Milliseconds since boot, truncated to the wrapping `u32` clock the UI
/// runs on.
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}
