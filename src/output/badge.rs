//! SVG coverage badge rendering.
//!
//! Produces a flat shields-style badge; publishing the bytes anywhere is
//! the caller's concern.

use std::fmt::Write;

const LABEL: &str = "coverage";
const LABEL_WIDTH: u32 = 61;
const VALUE_WIDTH: u32 = 43;
const HEIGHT: u32 = 20;

/// Renders a coverage badge for the given percentage.
#[must_use]
pub fn render_badge(percentage: u32) -> String {
    let width = LABEL_WIDTH + VALUE_WIDTH;
    let color = badge_color(percentage);
    let value = format!("{percentage}%");

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{HEIGHT}" role="img" aria-label="{LABEL}: {value}">"#
    );
    let _ = writeln!(svg, "    <title>{LABEL}: {value}</title>");
    let _ = writeln!(
        svg,
        r##"    <rect width="{LABEL_WIDTH}" height="{HEIGHT}" fill="#555"/>"##
    );
    let _ = writeln!(
        svg,
        r#"    <rect x="{LABEL_WIDTH}" width="{VALUE_WIDTH}" height="{HEIGHT}" fill="{color}"/>"#
    );
    let _ = writeln!(
        svg,
        r##"    <g fill="#fff" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" font-size="11">"##
    );
    let _ = writeln!(
        svg,
        r#"        <text x="{}" y="14">{LABEL}</text>"#,
        LABEL_WIDTH / 2
    );
    let _ = writeln!(
        svg,
        r#"        <text x="{}" y="14">{value}</text>"#,
        LABEL_WIDTH + VALUE_WIDTH / 2
    );
    let _ = writeln!(svg, "    </g>");
    svg.push_str("</svg>");
    svg
}

const fn badge_color(percentage: u32) -> &'static str {
    match percentage {
        90..=100 => "#4c1",
        80..=89 => "#97ca00",
        70..=79 => "#a4a61d",
        60..=69 => "#dfb317",
        50..=59 => "#fe7d37",
        _ => "#e05d44",
    }
}

#[cfg(test)]
#[path = "badge_tests.rs"]
mod tests;
