//! Screen geometry, frame snapshots and rendering.
//!
//! The 128×64 panel is split into four text lines:
//!
//! ```text
//! ┌───────────────────────────┐
//! │ network name              │  line 0
//! │▸128 ▸ 64 ▸200             │  line 1: brightness, speed, intensity
//! │▸Party                     │  line 2: palette
//! │▸Android                   │  line 3: effect
//! └───────────────────────────┘
//! ```
//!
//! `▸` marks the value the encoder edits; only one is drawn at a time.
//! Overlays replace the whole frame.

use core::fmt::Write;

use embedded_graphics::{
    image::{Image, ImageRaw},
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Triangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use heapless::String;
use rotary_ui::{Glyph, Mark};

/// Characters per line with `FONT_6X10` on a 128 px panel.
pub const LINE_CHARS: usize = 21;

/// One line of text.
pub type Line = String<LINE_CHARS>;

/// Copy `text` into a [`Line`], dropping whatever does not fit.
pub fn fit(text: &str) -> Line {
    let mut line = Line::new();
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}

// ── ScreenConfig ─────────────────────────────────────────────────────────

/// Layout geometry, refresh rate and idle timeout.
///
/// There are no layout constants elsewhere in the crate; every dimension
/// comes from here.
#[derive(Debug, Clone, Copy)]
pub struct ScreenConfig {
    /// Refresh rate of [`screen_refresh_task`](crate::display_task::screen_refresh_task).
    /// Default: 30.
    pub update_frequency_hz: u32,
    /// Default: 128.
    pub display_width: u32,
    /// Default: 64.
    pub display_height: u32,
    /// Height of each of the four lines. Default: 16.
    pub line_height: u32,
    /// Width of one character cell; must match the font. Default: 6.
    pub char_width: u32,
    /// Idle time before the screen goes dark. `0` never sleeps.
    /// Default: 60 s.
    pub sleep_timeout_ms: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 30,
            display_width: 128,
            display_height: 64,
            line_height: 16,
            char_width: 6,
            sleep_timeout_ms: 60_000,
        }
    }
}

impl ScreenConfig {
    pub fn update_period_ms(&self) -> u64 {
        1000 / self.update_frequency_hz.max(1) as u64
    }

    /// Top of the text in `line`, centred vertically in the line.
    fn text_top(&self, line: u8) -> i32 {
        let font_height = FONT_6X10.character_size.height;
        (line as u32 * self.line_height + self.line_height.saturating_sub(font_height) / 2) as i32
    }

    fn column_x(&self, column: u8) -> i32 {
        (column as u32 * self.char_width) as i32
    }
}

// ── ScreenState ──────────────────────────────────────────────────────────

/// The normal four-line view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueLines {
    pub header: Line,
    pub brightness: u8,
    pub speed: u8,
    pub intensity: u8,
    pub palette: Line,
    pub effect: Line,
    pub mark: Option<Mark>,
}

/// Everything needed to draw one frame. Two equal states draw the same
/// pixels, so an unchanged state is not flushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScreenState {
    /// Asleep; nothing drawn.
    #[default]
    Blank,
    Values(ValueLines),
    /// Mode announcement.
    Label { text: Line, glyph: Option<Glyph> },
    Network { title: Line, ssid: Line, address: Line },
}

// ── Glyphs ───────────────────────────────────────────────────────────────

/// 8×8 bitmaps, one byte per row, MSB on the left.
fn glyph_bitmap(glyph: Glyph) -> &'static [u8; 8] {
    match glyph {
        Glyph::Sun => &[0x10, 0x54, 0x38, 0xFE, 0x38, 0x54, 0x10, 0x00],
        Glyph::SkipForward => &[0x89, 0xCD, 0xEF, 0xFF, 0xEF, 0xCD, 0x89, 0x00],
        Glyph::Fire => &[0x10, 0x18, 0x38, 0x3C, 0x7E, 0x66, 0x24, 0x18],
        Glyph::CustomPalette => &[0x7E, 0x81, 0xB5, 0x81, 0xAD, 0x83, 0x7C, 0x00],
        Glyph::PuzzlePiece => &[0x18, 0x18, 0x7E, 0x66, 0xE7, 0x7E, 0x7E, 0x00],
        Glyph::Brush => &[0x01, 0x02, 0x04, 0x08, 0x10, 0x60, 0xE0, 0xC0],
        Glyph::Contrast => &[0x3C, 0x4E, 0x8F, 0x8F, 0x8F, 0x8F, 0x4E, 0x3C],
        Glyph::Star => &[0x10, 0x10, 0x38, 0xFE, 0x38, 0x6C, 0x44, 0x00],
        Glyph::Heart => &[0x00, 0x66, 0xFF, 0xFF, 0x7E, 0x3C, 0x18, 0x00],
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Draw `state` into `display`. The caller clears the buffer first.
pub fn render_screen<D>(display: &mut D, state: &ScreenState, config: &ScreenConfig) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let centre_x = config.display_width as i32 / 2;

    match state {
        ScreenState::Blank => {}

        ScreenState::Values(lines) => {
            cell_text(&lines.header, 0, 0, config).draw(display)?;

            for (column, value) in [(0, lines.brightness), (4, lines.speed), (8, lines.intensity)] {
                let mut buf: String<3> = String::new();
                let _ = write!(buf, "{:>3}", value);
                cell_text(&buf, column + 1, 1, config).draw(display)?;
            }

            cell_text(&lines.palette, 1, 2, config).draw(display)?;
            cell_text(&lines.effect, 1, 3, config).draw(display)?;

            if let Some(mark) = lines.mark {
                draw_mark(display, mark, config)?;
            }
        }

        ScreenState::Label { text, glyph } => {
            if let Some(glyph) = glyph {
                let raw = ImageRaw::<BinaryColor>::new(glyph_bitmap(*glyph), 8);
                Image::new(&raw, Point::new(centre_x - 4, config.line_height as i32)).draw(display)?;
            }
            centred_text(text, 2, config).draw(display)?;
        }

        ScreenState::Network { title, ssid, address } => {
            centred_text(title, 0, config).draw(display)?;
            cell_text(ssid, 0, 2, config).draw(display)?;
            cell_text(address, 0, 3, config).draw(display)?;
        }
    }

    Ok(())
}

fn font() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On)
}

/// Text starting at character cell (`line`, `column`).
fn cell_text<'a>(
    text: &'a str,
    column: u8,
    line: u8,
    config: &ScreenConfig,
) -> Text<'a, MonoTextStyle<'static, BinaryColor>> {
    Text::with_baseline(
        text,
        Point::new(config.column_x(column), config.text_top(line)),
        font(),
        Baseline::Top,
    )
}

fn centred_text<'a>(text: &'a str, line: u8, config: &ScreenConfig) -> Text<'a, MonoTextStyle<'static, BinaryColor>> {
    let layout = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(
        text,
        Point::new(config.display_width as i32 / 2, config.text_top(line)),
        font(),
        layout,
    )
}

/// Small right-pointing triangle filling one character cell.
fn draw_mark<D>(display: &mut D, mark: Mark, config: &ScreenConfig) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let x = config.column_x(mark.column);
    let top = config.text_top(mark.line) + 1;
    let tip = (config.char_width as i32 - 2).max(1);
    Triangle::new(Point::new(x, top), Point::new(x, top + 8), Point::new(x + tip, top + 4))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// In-memory 128×64 monochrome target.
    struct Frame {
        pixels: [[bool; 128]; 64],
    }

    impl Frame {
        fn new() -> Self {
            Self {
                pixels: [[false; 128]; 64],
            }
        }

        /// Lit pixels with `x0 <= x < x1`, `y0 <= y < y1`.
        fn lit(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> usize {
            self.pixels[y0..y1]
                .iter()
                .map(|row| row[x0..x1].iter().filter(|&&p| p).count())
                .sum()
        }

        fn total(&self) -> usize {
            self.lit(0, 128, 0, 64)
        }
    }

    impl OriginDimensions for Frame {
        fn size(&self) -> Size {
            Size::new(128, 64)
        }
    }

    impl DrawTarget for Frame {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..128).contains(&point.x) && (0..64).contains(&point.y) {
                    self.pixels[point.y as usize][point.x as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    fn render(state: &ScreenState) -> Frame {
        let mut frame = Frame::new();
        render_screen(&mut frame, state, &ScreenConfig::default()).unwrap();
        frame
    }

    fn values(mark: Option<Mark>) -> ScreenState {
        ScreenState::Values(ValueLines {
            header: fit("HomeNet"),
            brightness: 128,
            speed: 64,
            intensity: 200,
            palette: fit("Party"),
            effect: fit("Android"),
            mark,
        })
    }

    #[test]
    fn blank_draws_nothing() {
        assert_eq!(render(&ScreenState::Blank).total(), 0);
    }

    #[test]
    fn values_fill_all_four_lines() {
        let frame = render(&values(None));
        for line in 0..4 {
            assert!(frame.lit(0, 128, line * 16, line * 16 + 16) > 0, "line {}", line);
        }
    }

    #[test]
    fn mark_drawn_in_its_cell_only() {
        let without = render(&values(None));
        assert_eq!(without.lit(0, 6, 16, 32), 0);

        let with = render(&values(Some(Mark::new(1, 0))));
        assert!(with.lit(0, 6, 16, 32) > 0);
        assert_eq!(with.lit(0, 6, 32, 64), 0);
    }

    #[test]
    fn label_overlay_draws_glyph() {
        let glyph_area = |f: &Frame| f.lit(60, 68, 16, 24);

        let plain = render(&ScreenState::Label {
            text: fit("Speed"),
            glyph: None,
        });
        assert_eq!(glyph_area(&plain), 0);

        let with_glyph = render(&ScreenState::Label {
            text: fit("Speed"),
            glyph: Some(Glyph::SkipForward),
        });
        assert!(glyph_area(&with_glyph) > 0);
        assert!(with_glyph.lit(0, 128, 32, 48) > 0);
    }

    #[test]
    fn network_overlay_lines() {
        let frame = render(&ScreenState::Network {
            title: fit("NETWORK INFO"),
            ssid: fit("HomeNet"),
            address: fit("192.168.1.20"),
        });
        assert!(frame.lit(0, 128, 0, 16) > 0);
        assert_eq!(frame.lit(0, 128, 16, 32), 0);
        assert!(frame.lit(0, 128, 48, 64) > 0);
    }

    #[test]
    fn fit_truncates_to_line() {
        assert_eq!(fit("* Random Cycle and then some").as_str(), "* Random Cycle and th");
        assert_eq!(fit("").as_str(), "");
    }

    #[test]
    fn default_config_values() {
        let c = ScreenConfig::default();
        assert_eq!(c.display_width, 128);
        assert_eq!(c.line_height, 16);
        assert_eq!(c.sleep_timeout_ms, 60_000);
        assert_eq!(c.update_period_ms(), 33);
    }
}
