//! Chord symbols and fretboard diagrams

use crate::model::element::{ElementType, EngravingItem};
use crate::model::harmony::{FretDiagram, FretDotType, FretMarkerType, HDegree, Harmony, NoteCaseType};
use crate::model::property::Pid;
use crate::xml::XmlReader;

use super::context::ReadContext;
use super::item::read_item_properties;
use super::property::{read_property, read_property_tag};
use super::text::read_text_properties;

const HARMONY_PIDS: &[Pid] = &[
    Pid::PosAbove,
    Pid::HarmonyType,
    Pid::Play,
    Pid::HarmonyVoiceLiteral,
    Pid::HarmonyVoicing,
    Pid::HarmonyDuration,
];

fn read_degree(h: &mut Harmony, xml: &mut XmlReader<'_, '_>) {
    let mut value = 0;
    let mut alter = 0;
    let mut kind = String::new();
    while xml.read_next_start_element() {
        match xml.name() {
            "degree-value" => value = xml.read_int(),
            "degree-alter" => alter = xml.read_int(),
            "degree-type" => kind = xml.read_text(),
            _ => xml.unknown(),
        }
    }
    match HDegree::checked(value, alter, kind.trim()) {
        Some(degree) => h.degrees.push(degree),
        None => log::debug!("incorrect degree: value={} alter={} type={:?}", value, alter, kind),
    }
}

pub fn read_harmony(h: &mut Harmony, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "base" => h.base_tpc = xml.read_int(),
            "baseCase" => h.base_case = NoteCaseType::from_int(xml.read_int()),
            "extension" => h.id = xml.read_int(),
            "name" => h.text_name = xml.read_text(),
            "root" => h.root_tpc = xml.read_int(),
            "rootCase" => h.root_case = NoteCaseType::from_int(xml.read_int()),
            "function" => h.function = xml.read_text(),
            "degree" => read_degree(h, xml),
            "leftParen" => {
                h.left_paren = true;
                xml.skip_current_element();
            }
            "rightParen" => {
                h.right_paren = true;
                xml.skip_current_element();
            }
            _ => {
                if HARMONY_PIDS
                    .iter()
                    .any(|&pid| read_property_tag(&mut h.text.item, tag, xml, ctx, pid))
                {
                    continue;
                }
                if !read_text_properties(&mut h.text, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    h.after_read();
}

// ============================================================================
// Fret diagrams
// ============================================================================

/// `<fretDiagram>` block of current files
fn read_fret_diagram_block(d: &mut FretDiagram, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "string" => {
                let no = xml.int_attribute("no", 0);
                while xml.read_next_start_element() {
                    match xml.name() {
                        "dot" => {
                            let fret = xml.int_attribute("fret", 0);
                            let dtype = FretDotType::from_name(&xml.read_text());
                            d.set_dot(no, fret, true, dtype);
                        }
                        "marker" => {
                            let marker = FretMarkerType::from_name(&xml.read_text());
                            d.set_marker(no, marker);
                        }
                        "fingering" => xml.skip_current_element(),
                        _ => xml.unknown(),
                    }
                }
            }
            "barre" => {
                let start = xml.int_attribute("start", -1);
                let end = xml.int_attribute("end", -1);
                let fret = xml.read_int();
                d.set_barre(start, end, fret);
            }
            _ => {
                if !read_item_properties(&mut d.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

/// Flat per-string layout of older files
fn read_legacy_string(d: &mut FretDiagram, xml: &mut XmlReader<'_, '_>) {
    let no = xml.int_attribute("no", 0);
    while xml.read_next_start_element() {
        match xml.name() {
            "dot" => {
                let fret = xml.read_int();
                d.set_dot(no, fret, false, FretDotType::Normal);
            }
            "marker" => {
                // Stored as a character code
                let marker = if xml.read_int() == 'X' as i32 {
                    FretMarkerType::Cross
                } else {
                    FretMarkerType::Circle
                };
                d.set_marker(no, marker);
            }
            _ => xml.unknown(),
        }
    }
}

pub fn read_fret_diagram(d: &mut FretDiagram, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    let mut has_barre = false;
    let mut have_read_new = false;
    while xml.read_next_start_element() {
        // Nothing after a new-format block belongs to the legacy layout
        if have_read_new {
            xml.skip_current_element();
            continue;
        }
        match xml.name() {
            "fretDiagram" => {
                read_fret_diagram_block(d, xml, ctx);
                have_read_new = true;
            }
            "showNut" => read_property(&mut d.item, xml, ctx, Pid::FretNut),
            "orientation" => read_property(&mut d.item, xml, ctx, Pid::Orientation),
            "strings" => read_property(&mut d.item, xml, ctx, Pid::FretStrings),
            "frets" => read_property(&mut d.item, xml, ctx, Pid::FretFrets),
            "fretOffset" => read_property(&mut d.item, xml, ctx, Pid::FretOffset),
            "mag" => read_property(&mut d.item, xml, ctx, Pid::Mag),
            "string" => read_legacy_string(d, xml),
            "barre" => has_barre = xml.read_bool(),
            "Harmony" => {
                let mut h = Harmony::create(ElementType::Harmony);
                h.text.item.track = d.item.track;
                read_harmony(&mut h, xml, ctx);
                d.harmony = Some(Box::new(h));
            }
            _ => {
                if !read_item_properties(&mut d.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }

    if has_barre {
        convert_legacy_barre(d);
    }
}

/// Barre over the first string that has a dot, at that dot's fret
fn convert_legacy_barre(d: &mut FretDiagram) {
    let first = (0..d.strings()).find_map(|s| d.dot(s).iter().find(|dot| dot.exists()).map(|dot| (s, dot.fret)));
    if let Some((string, fret)) = first {
        d.set_barre(string, -1, fret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::score::MscVersion;
    use crate::model::types::TPC_INVALID;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    fn ctx() -> ReadContext {
        ReadContext::new(MscVersion::CURRENT, ReadSettings::default())
    }

    #[test]
    fn test_harmony_drops_bad_degrees() {
        let src = r#"<Harmony>
            <root>14</root>
            <name>7</name>
            <degree><degree-value>9</degree-value><degree-alter>-1</degree-alter><degree-type>add</degree-type></degree>
            <degree><degree-value>15</degree-value><degree-alter>0</degree-alter><degree-type>add</degree-type></degree>
            <degree><degree-value>5</degree-value><degree-alter>0</degree-alter><degree-type>swap</degree-type></degree>
            <leftParen/>
        </Harmony>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ctx();
        let mut h = Harmony::create(ElementType::Harmony);
        read_harmony(&mut h, &mut xml, &mut ctx);
        assert_eq!(h.degrees.len(), 1);
        assert_eq!(h.degrees[0].value, 9);
        assert!(h.left_paren);
        assert_eq!(h.base_tpc, TPC_INVALID);
        assert_eq!(h.harmony_name, "(C7addb9");
        assert!(xml.is_exhausted());
    }

    #[test]
    fn test_legacy_barre_uses_first_dotted_string() {
        let src = r#"<FretDiagram>
            <strings>6</strings>
            <string no="2"><dot>5</dot></string>
            <string no="4"><dot>3</dot></string>
            <string no="0"><marker>88</marker></string>
            <barre>1</barre>
        </FretDiagram>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ctx();
        let mut d = FretDiagram::create(ElementType::FretDiagram);
        read_fret_diagram(&mut d, &mut xml, &mut ctx);
        assert_eq!(d.markers.get(&0), Some(&FretMarkerType::Cross));
        let barre = d.barres.get(&5).unwrap();
        assert_eq!((barre.start_string, barre.end_string), (2, -1));
        assert_eq!(d.barres.len(), 1);
    }

    #[test]
    fn test_new_block_ends_legacy_reading() {
        let src = r#"<FretDiagram>
            <fretDiagram>
                <string no="1"><dot fret="2">triangle</dot></string>
                <barre start="0" end="5">1</barre>
            </fretDiagram>
            <string no="3"><dot>7</dot></string>
            <barre>1</barre>
        </FretDiagram>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ctx();
        let mut d = FretDiagram::create(ElementType::FretDiagram);
        read_fret_diagram(&mut d, &mut xml, &mut ctx);
        assert_eq!(d.dot(1)[0].dtype, FretDotType::Triangle);
        assert!(d.dot(3).is_empty());
        assert_eq!(d.barres.len(), 1);
        assert_eq!(d.barres.get(&1).map(|b| b.end_string), Some(5));
        assert!(xml.skipped_elements().is_empty());
    }
}
