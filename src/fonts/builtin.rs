//! The PDF "standard 14" fonts that every viewer provides. These are never embedded;
//! only their metrics live here so that text can be measured for layout.

use crate::{
    render::refs::{ObjectReferences, RefType},
    Pt,
};
use pdf_writer::{Name, Pdf};

/// A standard font that can be referenced without embedding any font data
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

// advance widths in 1/1000 em for the printable ASCII range (0x20..=0x7e)
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

impl BuiltinFont {
    /// The four variants of a built-in family, in normal / bold / italic / bold-italic order
    pub fn family(name: &str) -> Option<[BuiltinFont; 4]> {
        match name {
            "Helvetica" => Some([
                BuiltinFont::Helvetica,
                BuiltinFont::HelveticaBold,
                BuiltinFont::HelveticaOblique,
                BuiltinFont::HelveticaBoldOblique,
            ]),
            "Courier" => Some([
                BuiltinFont::Courier,
                BuiltinFont::CourierBold,
                BuiltinFont::CourierOblique,
                BuiltinFont::CourierBoldOblique,
            ]),
            _ => None,
        }
    }

    /// The PostScript name viewers know this font by
    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::CourierBold => "Courier-Bold",
            BuiltinFont::CourierOblique => "Courier-Oblique",
            BuiltinFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    fn is_courier(&self) -> bool {
        matches!(
            self,
            BuiltinFont::Courier
                | BuiltinFont::CourierBold
                | BuiltinFont::CourierOblique
                | BuiltinFont::CourierBoldOblique
        )
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique
        )
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        let units: f32 = if self.is_courier() { 629.0 } else { 718.0 };
        size * (units / 1000.0)
    }

    pub fn descent(&self, size: Pt) -> Pt {
        let units: f32 = if self.is_courier() { -157.0 } else { -207.0 };
        size * (units / 1000.0)
    }

    /// Advance width of a WinAnsi code in 1/1000 em
    fn advance(&self, code: u8) -> u16 {
        if self.is_courier() {
            return 600;
        }
        let table = if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        match code {
            0x20..=0x7e => table[(code - 0x20) as usize],
            0x91 | 0x92 if self.is_bold() => 278,
            0x91 | 0x92 => 222,
            0x93 | 0x94 if self.is_bold() => 500,
            0x93 | 0x94 => 333,
            0x95 => 350,
            0x85 | 0x97 => 1000,
            _ => 556,
        }
    }

    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = text
            .chars()
            .map(|ch| self.advance(win_ansi(ch)) as u32)
            .sum();
        size * (units as f32 / 1000.0)
    }

    /// Encode text as hex WinAnsi bytes, suitable for a `Tj` operator
    pub fn encode(&self, text: &str) -> String {
        text.chars()
            .map(|ch| format!("{:02x}", win_ansi(ch)))
            .collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Font(font_index));
        let mut font = writer.type1_font(id);
        font.base_font(Name(self.base_font().as_bytes()));
        font.encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// Map a character onto the WinAnsi code page, substituting `?` for anything it lacks
fn win_ansi(ch: char) -> u8 {
    match ch {
        ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ListStyleType;

    #[test]
    fn measures_helvetica() {
        // "Hello" = H(722) e(556) l(222) l(222) o(556) = 2278
        let width = BuiltinFont::Helvetica.width_of_text("Hello", Pt(10.0));
        assert!((width.0 - 22.78).abs() < 0.001);

        let bold = BuiltinFont::HelveticaBold.width_of_text("Hello", Pt(10.0));
        assert!(bold > width);
    }

    #[test]
    fn courier_is_monospaced() {
        let a = BuiltinFont::Courier.width_of_text("iiii", Pt(12.0));
        let b = BuiltinFont::CourierBold.width_of_text("WWWW", Pt(12.0));
        assert_eq!(a, b);
        assert!((a.0 - 28.8).abs() < 0.001);
    }

    #[test]
    fn encodes_win_ansi() {
        assert_eq!(BuiltinFont::Helvetica.encode("Hi!"), "486921");
        assert_eq!(BuiltinFont::Helvetica.encode("•é"), "95e9");
        // no WinAnsi code for CJK, substitute a question mark
        assert_eq!(BuiltinFont::Helvetica.encode("中"), "3f");
    }

    #[test]
    fn every_list_glyph_has_a_code() {
        for style in [
            ListStyleType::Bullet,
            ListStyleType::Asterisk,
            ListStyleType::Chevron,
            ListStyleType::Dash,
        ] {
            let encoded = BuiltinFont::Helvetica.encode(&style.marker(0));
            assert_ne!(encoded, "3f", "{style:?} falls back to a question mark");
            assert_eq!(encoded.len(), 2);
        }
        assert_eq!(BuiltinFont::Courier.encode(&ListStyleType::Chevron.marker(0)), "bb");
    }

    #[test]
    fn knows_its_families() {
        assert_eq!(
            BuiltinFont::family("Courier").map(|f| f[1]),
            Some(BuiltinFont::CourierBold)
        );
        assert!(BuiltinFont::family("Comic Sans").is_none());
        assert_eq!(
            BuiltinFont::HelveticaBoldOblique.base_font(),
            "Helvetica-BoldOblique"
        );
    }
}
