//! Topic color palette.
//!
//! Known topic ids map through an explicit table; anything else gets the
//! documented default (the brand blue) and a debug log, so a typo in a
//! topic id shows up in the log instead of silently blending in.

use crate::catalog::Topic;

/// Default color for unknown topic ids (`#004c96`).
pub const DEFAULT_COLOR: [f32; 4] = [0.0, 0.298, 0.588, 1.0];

/// Enumerated topic-id → color mapping, from the shipped theme.
const TOPIC_COLORS: &[(&str, [f32; 4])] = &[
    ("medidores", [0.0, 0.298, 0.588, 1.0]),        // #004c96
    ("protocolos", [0.0, 0.682, 0.310, 1.0]),       // #00ae4f
    ("caracteristicas", [0.0, 0.4, 0.8, 1.0]),      // #0066cc
    ("mdcs", [0.0, 0.298, 0.588, 1.0]),             // #004c96
    ("tipo_integracao", [0.0, 0.682, 0.310, 1.0]),  // #00ae4f
    ("hemera", [0.0, 0.6, 1.0, 1.0]),               // #0099ff
    ("comunicacao", [0.0, 0.8, 0.4, 1.0]),          // #00cc66
    ("mobii", [0.0, 0.298, 0.588, 1.0]),            // #004c96
    ("tipo_medicao", [0.969, 0.718, 0.192, 1.0]),   // #f7b731
    ("nics", [0.992, 0.475, 0.659, 1.0]),           // #fd79a8
    ("remotas", [1.0, 0.42, 0.42, 1.0]),            // #ff6b6b
];

/// Look up the palette color for a topic id.
pub fn color_for(id: &str) -> [f32; 4] {
    match TOPIC_COLORS.iter().find(|(key, _)| *key == id) {
        Some((_, color)) => *color,
        None => {
            log::debug!("no palette entry for topic id {id:?}, using default");
            DEFAULT_COLOR
        }
    }
}

/// Resolve a topic's display color: an explicit hex color on the record
/// wins, then the palette, then the default.
pub fn topic_color(topic: &Topic) -> [f32; 4] {
    topic
        .color
        .as_deref()
        .and_then(parse_hex)
        .unwrap_or_else(|| color_for(&topic.id))
}

/// Parse `#RGB` or `#RRGGBB` into normalized RGBA.
pub fn parse_hex(s: &str) -> Option<[f32; 4]> {
    let hex = s.strip_prefix('#')?;
    let (r, g, b) = match hex.len() {
        3 => {
            let digit = |i| u8::from_str_radix(&hex[i..i + 1], 16).ok();
            let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
            (r << 4 | r, g << 4 | g, b << 4 | b)
        }
        6 => (
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        ),
        _ => return None,
    };
    Some([
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        1.0,
    ])
}
