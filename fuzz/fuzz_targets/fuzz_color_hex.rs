//! Fuzz target for color hex parsing.
//!
//! `Rgba::from_hex` and `str::parse::<Rgba>` must reject arbitrary strings
//! without panicking, and accepted colors must survive a display round trip.

#![no_main]

use impro_scoreboard::color::Rgba;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Some(color) = Rgba::from_hex(data) {
        let shown = color.to_string();
        assert_eq!(Rgba::from_hex(&shown).map(|c| c.to_rgba_u8()), Some(color.to_rgba_u8()));
    }
    let _ = data.parse::<Rgba>();

    if !data.starts_with('#') {
        let _ = Rgba::from_hex(&format!("#{data}"));
    }

    for i in 0..data.len().min(10) {
        if let Some(tail) = data.get(i..) {
            let _ = Rgba::from_hex(tail);
        }
    }
});
