use super::*;

#[test]
fn badge_is_svg_with_percentage_text() {
    let svg = render_badge(87);

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(">87%</text>"));
    assert!(svg.contains("coverage"));
}

#[test]
fn color_scales_with_percentage() {
    assert_eq!(badge_color(100), "#4c1");
    assert_eq!(badge_color(90), "#4c1");
    assert_eq!(badge_color(89), "#97ca00");
    assert_eq!(badge_color(75), "#a4a61d");
    assert_eq!(badge_color(65), "#dfb317");
    assert_eq!(badge_color(55), "#fe7d37");
    assert_eq!(badge_color(49), "#e05d44");
    assert_eq!(badge_color(0), "#e05d44");
}

#[test]
fn badge_embeds_the_scale_color() {
    assert!(render_badge(95).contains("#4c1"));
    assert!(render_badge(10).contains("#e05d44"));
}

#[test]
fn badge_text_group_is_white_on_both_panels() {
    let svg = render_badge(50);
    assert!(svg.contains(r##"<g fill="#fff""##));
    assert!(svg.contains(r##"fill="#555""##));
}

#[test]
fn badge_has_accessible_label() {
    let svg = render_badge(42);
    assert!(svg.contains(r#"aria-label="coverage: 42%""#));
    assert!(svg.contains("<title>coverage: 42%</title>"));
}
