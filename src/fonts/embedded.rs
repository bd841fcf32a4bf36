use crate::{
    render::refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::{collections::HashMap, path::Path};

/// A parsed TrueType / OpenType font. The font is embedded in its entirety in the
/// generated PDF, so large fonts may dramatically increase the size of the output.
///
/// Fonts are registered with a [`FontRegistry`](crate::FontRegistry) under a family name
/// and variant and are referred to by their registry id from then on.
pub struct Font {
    pub face: OwnedFace,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font").field("name", &self.name()).finish()
    }
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Read and parse a font file from disk
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Font, PDFError> {
        let bytes = std::fs::read(path.as_ref())?;
        log::debug!(
            "loaded {} bytes of font data from {}",
            bytes.len(),
            path.as_ref().display()
        );
        Font::load(bytes)
    }

    fn name_record(&self, name_id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the full name of the font, or `"Unnamed"` if the font doesn't carry one
    pub fn name(&self) -> String {
        self.name_record(owned_ttf_parser::name_id::FULL_NAME)
            .unwrap_or_else(|| "Unnamed".to_string())
    }

    /// Obtain the family name of the font, falling back to the full name
    pub fn family(&self) -> String {
        self.name_record(owned_ttf_parser::name_id::FAMILY)
            .unwrap_or_else(|| self.name())
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given
    /// font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the
    /// given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Calculate the width of a given string of text at the given font size. Characters
    /// without a glyph are measured as the replacement glyph
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .map(|ch| {
                scaling
                    * self
                        .face
                        .as_face_ref()
                        .glyph_hor_advance(GlyphId(self.glyph_or_replacement(ch)))
                        .unwrap_or_default() as f32
            })
            .sum()
    }

    /// Encode text as a hex string of 2-byte glyph ids, suitable for a `Tj` operator
    /// with the `Identity-H` encoding
    pub fn encode(&self, text: &str) -> String {
        text.chars()
            .map(|ch| format!("{:04x}", self.glyph_or_replacement(ch)))
            .collect()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face.as_face_ref().glyph_index('\u{FFFD}').map(|i| i.0)
    }

    fn glyph_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            // glyph 0 is always .notdef
            .unwrap_or(0)
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(pdf_writer::types::CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let ids = self.glyph_ids();
        let ids_augmented = self.glyphs_sizing(&ids);

        let scaling = 1000.0 / self.face.as_face_ref().units_per_em() as f32;

        // find the most popular width to use as the default
        // <width, count>
        let mut widths_counts: HashMap<u16, usize> = HashMap::new();
        for (_, (_, (width, _))) in ids_augmented.iter() {
            *widths_counts.entry(*width).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|&(&sz, &count)| (count, sz))
            .map(|(&sz, _)| sz as f32 * scaling)
            .unwrap_or(1000.0);

        let mut id_widths: Vec<(u16, f32)> = ids_augmented
            .iter()
            .map(|(&cid, &(_, (width, _)))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);

        // runs of consecutive glyph ids share one entry
        let mut run: Option<(u16, Vec<f32>)> = None;
        for (cid, width) in id_widths.into_iter() {
            let extends_run = matches!(
                &run,
                Some((start, current)) if (cid - *start) as usize == current.len()
            );
            if extends_run {
                if let Some((_, current)) = run.as_mut() {
                    current.push(width);
                }
            } else {
                if let Some((start, current)) = run.take() {
                    widths.consecutive(start, current);
                }
                run = Some((cid, vec![width]));
            }
        }
        if let Some((start, current)) = run {
            widths.consecutive(start, current);
        }

        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let gids = self.glyph_ids();
        let gids_augmented = self.glyphs_sizing(&gids);

        let max_width = gids_augmented
            .values()
            .map(|&(_, (w, _))| w)
            .max()
            .unwrap_or_default();
        let max_height = gids_augmented
            .values()
            .map(|&(_, (_, h))| h)
            .max()
            .unwrap_or_default();
        let sum_width: usize = gids_augmented.values().map(|&(_, (w, _))| w as usize).sum();
        let avg_width = sum_width as f32 / gids_augmented.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));

        let face = self.face.as_face_ref();
        let name = self.name();
        let family = self.family();
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags: FontFlags = FontFlags::empty();
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let scaling = 1000.0 / face.units_per_em() as f32;
        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: 0.0,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .unwrap_or_else(|| face.capital_height().unwrap_or_default()) as f32
                * scaling,
        );
        // TODO: derive the stem width from the font's OS/2 weight class
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    fn glyph_ids(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();

        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    fn glyphs_sizing(&self, ids: &HashMap<u16, char>) -> HashMap<u16, (char, (u16, i16))> {
        let face = self.face.as_face_ref();
        let mut ids_augmented: HashMap<u16, (char, (u16, i16))> = HashMap::new();
        for (&id, &ch) in ids.iter() {
            if let Some(gid) = face.glyph_index(ch) {
                if let Some(h_advance) = face.glyph_hor_advance(gid) {
                    let height = face
                        .glyph_bounding_box(gid)
                        .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                        .unwrap_or(1000);
                    ids_augmented.insert(id, (ch, (h_advance, height)));
                }
            }
        }
        ids_augmented
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
        .replace("\r\n", "\n");

        let ids = self.glyph_ids();
        let mut ids: Vec<(u16, char)> = ids.into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // segment the cmap into blocks of at most 100 entries sharing a high byte
        let mut cmap_blocks: Vec<Vec<(u16, char)>> = Vec::new();
        let mut current_block: Vec<(u16, char)> = Vec::new();
        let mut high_byte: u8 = 0;
        for (id, ch) in ids.iter() {
            if (id >> 8) as u8 != high_byte || current_block.len() >= 100 {
                if !current_block.is_empty() {
                    cmap_blocks.push(std::mem::take(&mut current_block));
                }
                high_byte = (id >> 8) as u8;
            }

            current_block.push((*id, *ch));
        }
        if !current_block.is_empty() {
            cmap_blocks.push(current_block);
        }

        for block in cmap_blocks.into_iter() {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block.into_iter() {
                let ch: u32 = ch.into();
                map.push_str(&format!("<{id:04x}> <{:04x}>\n", ch));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_data_that_isnt_a_font() {
        let result = Font::load(b"definitely not a font".to_vec());
        assert!(matches!(result, Err(PDFError::FaceParsingError(_))));
    }

    #[test]
    fn reports_missing_files() {
        let result = Font::load_file("/this/path/does/not/exist.ttf");
        assert!(matches!(result, Err(PDFError::Io(_))));
    }
}
