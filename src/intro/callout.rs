use crate::foundation::core::{DurationMs, Point, Vec2, Viewport};

/// Number of characters typed `elapsed` after the callout appeared.
pub fn typed_chars(text: &str, elapsed: DurationMs, interval: DurationMs) -> usize {
    let len = text.chars().count();
    if interval.0 == 0 {
        return len;
    }
    usize::try_from(elapsed.0 / interval.0).map_or(len, |n| n.min(len))
}

/// First `count` characters of `text`.
pub fn typed_prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// The caret blinks only while typing is in progress.
pub fn caret_visible(count: usize, len: usize) -> bool {
    count > 0 && count < len
}

/// Where the callout is anchored, in viewport coordinates.
///
/// `cursor` is the cursor's resting position relative to the subject container at `origin`. The
/// anchor sits at the cursor hotspot, lifted by `lift`. Mobile viewports center it horizontally.
pub fn callout_anchor(
    origin: Point,
    cursor: Point,
    hotspot: Vec2,
    lift: f64,
    viewport: &Viewport,
) -> Point {
    let tip = origin + cursor.to_vec2() + hotspot;
    let x = if viewport.is_mobile() {
        viewport.width / 2.0
    } else {
        tip.x
    };
    Point::new(x, tip.y - lift)
}
