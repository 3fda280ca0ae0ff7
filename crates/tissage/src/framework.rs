//! The built-in stylesheet every generated page ships with.
//!
//! Covers reset, grid, buttons, forms, alerts, cards, modals, badges,
//! progress bars and spacing utilities, plus two responsive breakpoints.

use crate::css::{Css, Rule, Stylesheet};

/// (variant, background, border, text colour, hover background)
const BUTTON_VARIANTS: &[(&str, &str, &str, &str, &str)] = &[
    ("primary", "#007bff", "#007bff", "#fff", "#0056b3"),
    ("secondary", "#6c757d", "#6c757d", "#fff", "#545b62"),
    ("success", "#28a745", "#28a745", "#fff", "#1e7e34"),
    ("danger", "#dc3545", "#dc3545", "#fff", "#c82333"),
    ("warning", "#ffc107", "#ffc107", "#212529", "#e0a800"),
    ("info", "#17a2b8", "#17a2b8", "#fff", "#138496"),
];

/// (variant, background, border, text colour)
const ALERT_VARIANTS: &[(&str, &str, &str, &str)] = &[
    ("success", "#d4edda", "#c3e6cb", "#155724"),
    ("info", "#d1ecf1", "#bee5eb", "#0c5460"),
    ("warning", "#fff3cd", "#ffeaa7", "#856404"),
    ("danger", "#f8d7da", "#f5c6cb", "#721c24"),
];

/// (variant, background, text colour)
const BADGE_VARIANTS: &[(&str, &str, &str)] = &[
    ("primary", "#007bff", "#fff"),
    ("secondary", "#6c757d", "#fff"),
    ("success", "#28a745", "#fff"),
    ("danger", "#dc3545", "#fff"),
    ("warning", "#ffc107", "#212529"),
    ("info", "#17a2b8", "#fff"),
    ("gold", "#ffd700", "#212529"),
];

/// Spacing utility prefixes and the property each one sets.
const SPACING: &[(&str, &str)] = &[
    ("m", "margin"),
    ("p", "padding"),
    ("mt", "margin_top"),
    ("mb", "margin_bottom"),
    ("pt", "padding_top"),
    ("pb", "padding_bottom"),
];

/// The framework stylesheet as a rendered CSS string.
pub fn framework_css() -> String {
    framework_stylesheet().to_css()
}

pub fn framework_stylesheet() -> Stylesheet {
    let mut sheet = Stylesheet::new()
        .rule(Css::selector("*").props([
            ("margin", "0"),
            ("padding", "0"),
            ("box_sizing", "border-box"),
        ]))
        .rule(Css::element("body").props([
            (
                "font_family",
                "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif",
            ),
            ("line_height", "1.6"),
            ("color", "#333"),
            ("background_color", "#fff"),
        ]))
        .rules(grid())
        .rule(Css::class("btn").props([
            ("display", "inline-block"),
            ("padding", "0.5rem 1rem"),
            ("margin_bottom", "0"),
            ("font_size", "1rem"),
            ("font_weight", "400"),
            ("line_height", "1.5"),
            ("text_align", "center"),
            ("text_decoration", "none"),
            ("vertical_align", "middle"),
            ("cursor", "pointer"),
            ("border", "1px solid transparent"),
            ("border_radius", "0.375rem"),
            ("transition", "all 0.15s ease-in-out"),
            ("background_color", "transparent"),
        ]));

    for (variant, bg, border, color, hover) in BUTTON_VARIANTS {
        sheet.push_rule(Css::class(&format!("btn-{variant}")).props([
            ("background_color", *bg),
            ("border_color", *border),
            ("color", *color),
        ]));
        sheet.push_rule(Css::selector(&format!(".btn-{variant}:hover")).props([
            ("background_color", *hover),
            ("border_color", *hover),
            ("transform", "translateY(-1px)"),
            ("box_shadow", "0 4px 8px rgba(0,0,0,0.1)"),
        ]));
    }

    sheet = sheet.rules(forms()).rule(Css::class("alert").props([
        ("padding", "0.75rem 1rem"),
        ("margin_bottom", "1rem"),
        ("border", "1px solid transparent"),
        ("border_radius", "0.375rem"),
        ("position", "relative"),
    ]));

    for (variant, bg, border, color) in ALERT_VARIANTS {
        sheet.push_rule(Css::class(&format!("alert-{variant}")).props([
            ("background_color", *bg),
            ("border_color", *border),
            ("color", *color),
        ]));
    }

    sheet = sheet
        .rules(cards())
        .rules(modals())
        .rule(Css::class("badge").props([
            ("display", "inline-block"),
            ("padding", "0.25em 0.4em"),
            ("font_size", "0.75em"),
            ("font_weight", "700"),
            ("line_height", "1"),
            ("text_align", "center"),
            ("white_space", "nowrap"),
            ("vertical_align", "baseline"),
            ("border_radius", "0.375rem"),
        ]));

    for (variant, bg, color) in BADGE_VARIANTS {
        sheet.push_rule(
            Css::class(&format!("badge-{variant}"))
                .props([("background_color", *bg), ("color", *color)]),
        );
    }

    sheet = sheet
        .rule(Css::class("progress").props([
            ("display", "flex"),
            ("height", "1rem"),
            ("background_color", "#e9ecef"),
            ("border_radius", "0.375rem"),
            ("overflow", "hidden"),
        ]))
        .rule(Css::class("progress-bar").props([
            ("display", "flex"),
            ("flex_direction", "column"),
            ("justify_content", "center"),
            ("color", "#fff"),
            ("text_align", "center"),
            ("white_space", "nowrap"),
            ("background_color", "#007bff"),
            ("transition", "width 0.6s ease"),
        ]))
        .rule(Css::class("text-center").prop("text_align", "center"))
        .rule(Css::class("text-left").prop("text_align", "left"))
        .rule(Css::class("text-right").prop("text_align", "right"));

    for step in 0..6u32 {
        // Debug formatting keeps the trailing `.0` ("0.0rem", "1.0rem")
        let size = format!("{:?}rem", f64::from(step) * 0.25);
        for (prefix, property) in SPACING {
            sheet.push_rule(Css::class(&format!("{prefix}-{step}")).prop(property, size.as_str()));
        }
    }

    let all_cols = (1..=12)
        .map(|i| format!(".col-{i}"))
        .collect::<Vec<_>>()
        .join(", ");

    sheet
        .media(
            Css::media("max-width: 768px")
                .rule(Css::class("container").prop("padding", "0 10px"))
                .rule(
                    Css::selector(&all_cols)
                        .props([("flex", "0 0 100%"), ("max_width", "100%")]),
                ),
        )
        .media(
            Css::media("min-width: 769px and max-width: 1024px")
                .rule(Css::class("container").prop("max_width", "750px")),
        )
}

fn grid() -> Vec<Rule> {
    let mut rules = vec![
        Css::class("container").props([
            ("max_width", "1200px"),
            ("margin", "0 auto"),
            ("padding", "0 15px"),
            ("width", "100%"),
        ]),
        Css::class("container-fluid").props([("width", "100%"), ("padding", "0 15px")]),
        Css::class("row").props([
            ("display", "flex"),
            ("flex_wrap", "wrap"),
            ("margin", "0 -15px"),
        ]),
        Css::class("col").props([("flex", "1"), ("padding", "0 15px")]),
    ];
    for i in 1..=12u32 {
        let width = format!("{:.6}%", f64::from(i) / 12.0 * 100.0);
        rules.push(
            Css::class(&format!("col-{i}"))
                .prop("flex", format!("0 0 {width}"))
                .prop("max_width", width.as_str())
                .prop("padding", "0 15px"),
        );
    }
    rules
}

fn forms() -> Vec<Rule> {
    vec![
        Css::class("form-control").props([
            ("display", "block"),
            ("width", "100%"),
            ("padding", "0.5rem 0.75rem"),
            ("font_size", "1rem"),
            ("line_height", "1.5"),
            ("color", "#495057"),
            ("background_color", "#fff"),
            ("border", "1px solid #ced4da"),
            ("border_radius", "0.375rem"),
            (
                "transition",
                "border-color 0.15s ease-in-out, box-shadow 0.15s ease-in-out",
            ),
        ]),
        Css::selector(".form-control:focus").props([
            ("border_color", "#80bdff"),
            ("outline", "0"),
            ("box_shadow", "0 0 0 0.2rem rgba(0, 123, 255, 0.25)"),
        ]),
        Css::class("form-group").prop("margin_bottom", "1rem"),
        Css::class("form-label").props([
            ("display", "block"),
            ("margin_bottom", "0.5rem"),
            ("font_weight", "500"),
            ("color", "#212529"),
        ]),
    ]
}

fn cards() -> Vec<Rule> {
    vec![
        Css::class("card").props([
            ("background_color", "#fff"),
            ("border", "1px solid rgba(0,0,0,0.125)"),
            ("border_radius", "0.375rem"),
            ("box_shadow", "0 0.125rem 0.25rem rgba(0,0,0,0.075)"),
            ("margin_bottom", "1rem"),
        ]),
        Css::class("card-header").props([
            ("padding", "0.75rem 1rem"),
            ("background_color", "rgba(0,0,0,0.03)"),
            ("border_bottom", "1px solid rgba(0,0,0,0.125)"),
            ("border_radius", "0.375rem 0.375rem 0 0"),
        ]),
        Css::class("card-body").prop("padding", "1rem"),
        Css::class("card-title").props([
            ("margin_bottom", "0.5rem"),
            ("font_size", "1.25rem"),
            ("font_weight", "500"),
        ]),
        Css::class("card-footer").props([
            ("padding", "0.75rem 1rem"),
            ("background_color", "rgba(0,0,0,0.03)"),
            ("border_top", "1px solid rgba(0,0,0,0.125)"),
            ("border_radius", "0 0 0.375rem 0.375rem"),
        ]),
    ]
}

fn modals() -> Vec<Rule> {
    vec![
        Css::class("modal").props([
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("z_index", "1050"),
            ("width", "100%"),
            ("height", "100%"),
            ("background_color", "rgba(0,0,0,0.5)"),
            ("display", "none"),
        ]),
        Css::selector(".modal.show").props([
            ("display", "flex"),
            ("align_items", "center"),
            ("justify_content", "center"),
        ]),
        Css::class("modal-dialog").props([
            ("max_width", "500px"),
            ("width", "90%"),
            ("margin", "auto"),
        ]),
        Css::class("modal-content").props([
            ("background_color", "#fff"),
            ("border_radius", "0.375rem"),
            ("box_shadow", "0 0.5rem 1rem rgba(0,0,0,0.15)"),
        ]),
        Css::class("modal-header").props([
            ("display", "flex"),
            ("align_items", "center"),
            ("justify_content", "space-between"),
            ("padding", "1rem"),
            ("border_bottom", "1px solid #dee2e6"),
            ("border_radius", "0.375rem 0.375rem 0 0"),
        ]),
        Css::class("modal-body").prop("padding", "1rem"),
        Css::class("modal-footer").props([
            ("display", "flex"),
            ("align_items", "center"),
            ("justify_content", "flex-end"),
            ("padding", "1rem"),
            ("border_top", "1px solid #dee2e6"),
            ("gap", "0.5rem"),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_widths() {
        let css = framework_css();
        assert!(css.contains(".col-6 {\n  flex: 0 0 50.000000%; max-width: 50.000000%; padding: 0 15px;\n}"));
        assert!(css.contains("max-width: 8.333333%"));
    }

    #[test]
    fn test_spacing_steps() {
        let css = framework_css();
        assert!(css.contains(".m-0 {\n  margin: 0.0rem;\n}"));
        assert!(css.contains(".pb-5 {\n  padding-bottom: 1.25rem;\n}"));
        assert!(css.contains(".mt-4 {\n  margin-top: 1.0rem;\n}"));
    }

    #[test]
    fn test_variants_and_breakpoints() {
        let css = framework_css();
        assert!(css.contains(".btn-warning:hover {"));
        assert!(css.contains(".badge-gold {\n  background-color: #ffd700; color: #212529;\n}"));
        assert!(css.contains("@media (max-width: 768px) {\n  .container {\n    padding: 0 10px;\n  }"));
        assert!(css.ends_with("@media (min-width: 769px and max-width: 1024px) {\n  .container {\n    max-width: 750px;\n  }\n}"));
    }

    #[test]
    fn test_starts_with_reset() {
        assert!(framework_css().starts_with("* {\n  margin: 0; padding: 0; box-sizing: border-box;\n}\n\n"));
    }
}
