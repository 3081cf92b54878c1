//! Colors and fonts shared by the recipes.

use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontDesc, IntoFont, Palette, Palette99, RGBAColor, RGBColor, TextStyle};

const FONT_FAMILY: &str = "sans-serif";

pub(crate) fn title_font() -> FontDesc<'static> {
    (FONT_FAMILY, 24).into_font()
}

pub(crate) fn caption_font() -> FontDesc<'static> {
    (FONT_FAMILY, 16).into_font()
}

pub(crate) fn label_font() -> FontDesc<'static> {
    (FONT_FAMILY, 13).into_font()
}

/// Label style anchored at its center.
pub(crate) fn centered(font: FontDesc<'static>) -> TextStyle<'static> {
    TextStyle::from(font).pos(Pos::new(HPos::Center, VPos::Center))
}

pub(crate) fn anchored(font: FontDesc<'static>, h: HPos, v: VPos) -> TextStyle<'static> {
    TextStyle::from(font).pos(Pos::new(h, v))
}

/// Color of the `idx`-th series.
pub(crate) fn series_color(idx: usize) -> RGBAColor {
    Palette99::pick(idx).to_rgba()
}

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);
const UNDEFINED: RGBColor = RGBColor(160, 160, 160);

/// Diverging blue-grey-red scale over `[-1, 1]`; `None` is grey.
pub(crate) fn coolwarm(value: Option<f64>) -> RGBColor {
    let Some(v) = value else {
        return UNDEFINED;
    };
    let v = v.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (NEUTRAL, COOL, -v)
    } else {
        (NEUTRAL, WARM, v)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}
