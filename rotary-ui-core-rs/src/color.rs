//! Hue/saturation to RGB for the "Main Color" and "Saturation" modes.

use rgb::RGB8;

/// Convert an 8-bit hue and saturation (full value) to RGB.
///
/// The hue is scaled by 256 to a 16-bit wheel position and split into six
/// sectors; all arithmetic is integer.
///
/// ```
/// use rotary_ui::color::hue_sat_to_rgb;
///
/// assert_eq!(hue_sat_to_rgb(0, 255), rgb::RGB8::new(255, 0, 0));
/// assert_eq!(hue_sat_to_rgb(200, 0), rgb::RGB8::new(255, 255, 255));
/// ```
pub fn hue_sat_to_rgb(hue: u8, saturation: u8) -> RGB8 {
    let wheel = hue as u32 * 256 * 6;
    let sector = wheel / 65536;
    let frac = (wheel % 65536) >> 8;
    let s = saturation as u32;

    let p = (255 - s) as u8;
    let q = (255 - s * frac / 255) as u8;
    let t = (255 - s * (255 - frac) / 255) as u8;

    match sector {
        0 => RGB8::new(255, t, p),
        1 => RGB8::new(q, 255, p),
        2 => RGB8::new(p, 255, t),
        3 => RGB8::new(p, q, 255),
        4 => RGB8::new(t, p, 255),
        _ => RGB8::new(255, p, q),
    }
}
