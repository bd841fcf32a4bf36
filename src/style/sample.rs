use super::{ListStyleType, Style};
use crate::Pt;

/// Name of the root style every other sample style descends from
pub const NORMAL: &str = "normal";

/// The built-in stylesheet that sits beneath every template's own styles.
///
/// `normal` is the root and the headings `h1`..`h6` hang straight off it, with
/// `heading1`..`heading6` as long-form names for them. `italic`, `bu` and `df` descend
/// from `body`. The list styles `ul` and `ol` descend from `p`, so list
/// items pick up paragraph text attributes.
///
/// `normal` names no font family, so every style uses the registry's default family
/// unless it declares its own.
pub fn sample_stylesheet() -> Vec<Style> {
    let mut styles = vec![
        Style::new(NORMAL).font_size(Pt(10.0)).leading(Pt(12.0)),
        Style::new("body").parent(NORMAL).space_before(Pt(6.0)),
        Style::new("italic").parent("body").italic(true),
        Style::new("h1")
            .parent(NORMAL)
            .bold(true)
            .font_size(Pt(18.0))
            .leading(Pt(22.0))
            .space_after(Pt(6.0)),
        Style::new("h2")
            .parent(NORMAL)
            .bold(true)
            .font_size(Pt(14.0))
            .leading(Pt(18.0))
            .space_before(Pt(12.0))
            .space_after(Pt(6.0)),
        Style::new("h3")
            .parent(NORMAL)
            .bold(true)
            .italic(true)
            .font_size(Pt(12.0))
            .leading(Pt(14.0))
            .space_before(Pt(12.0))
            .space_after(Pt(6.0)),
        Style::new("h4")
            .parent(NORMAL)
            .bold(true)
            .italic(true)
            .font_size(Pt(10.0))
            .leading(Pt(12.0))
            .space_before(Pt(10.0))
            .space_after(Pt(4.0)),
        Style::new("h5")
            .parent(NORMAL)
            .bold(true)
            .font_size(Pt(9.0))
            .leading(Pt(11.0))
            .space_before(Pt(8.0))
            .space_after(Pt(3.0)),
        Style::new("h6")
            .parent(NORMAL)
            .italic(true)
            .font_size(Pt(9.0))
            .leading(Pt(11.0))
            .space_before(Pt(6.0))
            .space_after(Pt(3.0)),
        Style::new("p").parent(NORMAL).space_after(Pt(6.0)),
        Style::new("bu").parent("body").space_before(Pt(3.0)),
        Style::new("df").parent("body").left_indent(Pt(36.0)),
        Style::new("code")
            .parent(NORMAL)
            .font_family("Courier")
            .font_size(Pt(8.0))
            .leading(Pt(8.8))
            .left_indent(Pt(36.0)),
        Style::new("ul")
            .parent("p")
            .space_after(Pt(2.0))
            .list_style(ListStyleType::Bullet),
        Style::new("ol")
            .parent("p")
            .space_after(Pt(2.0))
            .list_style(ListStyleType::Decimal),
        Style::new("hr")
            .parent(NORMAL)
            .colour(crate::colours::GREY)
            .space_before(Pt(6.0))
            .space_after(Pt(6.0)),
    ];
    styles.extend((1..=6).map(|n| Style::new(format!("heading{n}")).parent(format!("h{n}"))));
    styles
}
