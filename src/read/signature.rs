//! Key signatures, time signatures and clefs

use crate::model::signature::{Clef, ClefType, CustDef, GroupNode, Groups, KeyMode, KeySig, KeySigEvent, TimeSig, TimeSigType};
use crate::model::style::Sid;
use crate::model::sym::SymId;
use crate::xml::XmlReader;

use super::compat;
use super::context::ReadContext;
use super::item::read_item_properties;

// ============================================================================
// Key signatures
// ============================================================================

fn read_cust_def_sym(text: &str, ctx: &ReadContext) -> SymId {
    let text = text.trim();
    let old = compat::uses_1x_encoding(ctx.version());
    match text.parse::<i32>() {
        Ok(id) if old => compat::convert_from_old_id(id),
        Ok(id) => {
            log::debug!("numeric key signature symbol {} in a {} file", id, ctx.version());
            SymId::NoSym
        }
        Err(_) if old => match SymId::from_old_name(text) {
            SymId::NoSym => SymId::from_name(text),
            sym => sym,
        },
        Err(_) => SymId::from_name(text),
    }
}

/// Placement from an absolute position, as written before degrees were stored
fn cust_def_from_pos(cd: &mut CustDef, previous: &[CustDef], xml: &XmlReader<'_, '_>, ctx: &ReadContext) {
    let gap = ctx.style().style_s(Sid::KeysigAccidentalDistance);
    let prevx: f64 = previous.iter().map(|d| d.sym.width() + gap + d.xalt).sum();
    cd.xalt = xml.double_attribute("x", prevx) - prevx;

    // Middle line when y is missing
    let mut line = (xml.double_attribute("y", 2.0) * 2.0) as i32;
    cd.degree = (3 - line).rem_euclid(7);
    // Topmost treble position is G# for sharps and Eb for flats
    line += if cd.sym.is_flat() { -1 } else { 1 };
    cd.oct_alt = (line - if line >= 0 { 0 } else { 6 }) / 7;
}

fn read_cust_def(sig: &KeySigEvent, xml: &mut XmlReader<'_, '_>, ctx: &ReadContext) -> CustDef {
    let mut cd = CustDef::default();
    while xml.read_next_start_element() {
        match xml.name() {
            "sym" => {
                let text = xml.read_text();
                cd.sym = read_cust_def_sym(&text, ctx);
            }
            "def" => {
                cd.degree = xml.int_attribute("degree", 0);
                cd.oct_alt = xml.int_attribute("octAlt", 0);
                cd.xalt = xml.double_attribute("xAlt", 0.0);
                xml.skip_current_element();
            }
            "pos" => {
                cust_def_from_pos(&mut cd, &sig.custom_defs, xml, ctx);
                xml.skip_current_element();
            }
            _ => xml.unknown(),
        }
    }
    cd
}

pub fn read_key_sig(s: &mut KeySig, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    let mut sig = KeySigEvent::default();
    let mut subtype = 0;
    while xml.read_next_start_element() {
        match xml.name() {
            "CustDef" | "KeySym" => {
                let cd = read_cust_def(&sig, xml, ctx);
                sig.custom_defs.push(cd);
            }
            "showCourtesySig" => s.show_courtesy = xml.read_bool(),
            "showNaturals" | "natural" => xml.skip_current_element(),
            "accidental" => sig.key = Some(xml.read_int()),
            "custom" => {
                xml.skip_current_element();
                sig.custom = true;
            }
            "mode" => sig.mode = KeyMode::from_xml(&xml.read_text()),
            "subtype" => subtype = xml.read_int(),
            "forInstrumentChange" => s.for_instrument_change = xml.read_bool(),
            _ => {
                if !read_item_properties(&mut s.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    if !sig.is_valid() {
        sig.init_from_subtype(subtype);
    }
    if sig.custom && sig.custom_defs.is_empty() {
        sig.mode = KeyMode::None;
    }
    s.sig = sig;
}

// ============================================================================
// Time signatures
// ============================================================================

pub fn read_groups(g: &mut Groups, xml: &mut XmlReader<'_, '_>) {
    while xml.read_next_start_element() {
        if xml.name() == "Node" {
            g.nodes.push(GroupNode {
                pos: xml.int_attribute("pos", 0),
                action: xml.int_attribute("action", 0),
            });
            xml.skip_current_element();
        } else {
            xml.unknown();
        }
    }
}

pub fn read_time_sig(ts: &mut TimeSig, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "sigN" => ts.sig_n = xml.read_int(),
            "sigD" => ts.sig_d = xml.read_int(),
            "stretchN" => ts.stretch_n = xml.read_int(),
            "stretchD" => ts.stretch_d = xml.read_int(),
            "subtype" => ts.time_sig_type = TimeSigType::from_int(xml.read_int()),
            "textN" => ts.numerator_string = xml.read_text(),
            "textD" => ts.denominator_string = xml.read_text(),
            "Groups" => read_groups(&mut ts.groups, xml),
            "showCourtesySig" => ts.show_courtesy = xml.read_bool(),
            "largeParentheses" => ts.large_parentheses = xml.read_bool(),
            _ => {
                if !read_item_properties(&mut ts.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    if ts.stretch_n <= 0 || ts.stretch_d <= 0 {
        log::debug!("time signature stretch {}/{} reset", ts.stretch_n, ts.stretch_d);
        ts.stretch_n = 1;
        ts.stretch_d = 1;
    }
}

// ============================================================================
// Clefs
// ============================================================================

fn clef_type(text: &str) -> ClefType {
    ClefType::from_xml(text).unwrap_or_else(|| {
        log::debug!("unknown clef {:?}", text);
        ClefType::G
    })
}

pub fn read_clef(c: &mut Clef, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "concertClefType" => c.concert_clef = clef_type(&xml.read_text()),
            "transposingClefType" => c.transposing_clef = clef_type(&xml.read_text()),
            "showCourtesyClef" => c.show_courtesy = xml.read_bool(),
            "forInstrumentChange" => c.for_instrument_change = xml.read_bool(),
            _ => {
                if !read_item_properties(&mut c.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    if c.clef_type() == ClefType::Invalid {
        c.set_clef_type(ClefType::G);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::{ElementType, EngravingItem};
    use crate::model::score::MscVersion;
    use crate::model::types::Fraction;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    fn read_key(src: &str, version: MscVersion) -> KeySig {
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(version, ReadSettings::default());
        let mut k = KeySig::create(ElementType::KeySig);
        read_key_sig(&mut k, &mut xml, &mut ctx);
        assert!(xml.is_exhausted());
        k
    }

    #[test]
    fn test_key_sig_accidental_and_mode() {
        let k = read_key("<KeySig><accidental>-3</accidental><mode>minor</mode></KeySig>", MscVersion::CURRENT);
        assert_eq!(k.sig.key, Some(-3));
        assert_eq!(k.sig.mode, KeyMode::Minor);
    }

    #[test]
    fn test_key_sig_subtype_fallback() {
        let k = read_key("<KeySig><subtype>2</subtype><showNaturals>1</showNaturals></KeySig>", MscVersion(114));
        assert_eq!(k.sig.key, Some(2));
    }

    #[test]
    fn test_custom_without_defs_has_no_mode() {
        let k = read_key(
            "<KeySig><accidental>0</accidental><custom>1</custom><mode>major</mode></KeySig>",
            MscVersion::CURRENT,
        );
        assert!(k.sig.custom);
        assert_eq!(k.sig.mode, KeyMode::None);
    }

    #[test]
    fn test_cust_def_forms() {
        let src = r#"<KeySig>
            <accidental>0</accidental>
            <custom>1</custom>
            <CustDef><sym>accidentalSharp</sym><def degree="3" octAlt="0" xAlt="0.5"/></CustDef>
            <KeySym><sym>accidentalFlat</sym><pos y="-1"/></KeySym>
        </KeySig>"#;
        let k = read_key(src, MscVersion(301));
        let defs = &k.sig.custom_defs;
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].degree, 3);
        assert_eq!(defs[0].xalt, 0.5);
        assert_eq!(defs[1].sym, SymId::AccidentalFlat);
        // line -2: degree (3 + 2) mod 7, octave from line -3
        assert_eq!(defs[1].degree, 5);
        assert_eq!(defs[1].oct_alt, -1);
        assert_eq!(k.sig.mode, KeyMode::Unknown);
    }

    #[test]
    fn test_time_sig_with_groups() {
        let src = r#"<TimeSig>
            <sigN>6</sigN><sigD>8</sigD>
            <Groups><Node pos="3" action="1"/><Node pos="6" action="2"/></Groups>
        </TimeSig>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut ts = TimeSig::create(ElementType::TimeSig);
        read_time_sig(&mut ts, &mut xml, &mut ctx);
        assert_eq!(ts.sig(), Fraction::new(6, 8));
        assert_eq!(ts.groups.nodes, vec![GroupNode { pos: 3, action: 1 }, GroupNode { pos: 6, action: 2 }]);
    }

    #[test]
    fn test_clef_defaults_to_treble() {
        let doc = Document::parse("<Clef><showCourtesyClef>0</showCourtesyClef></Clef>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut c = Clef::create(ElementType::Clef);
        read_clef(&mut c, &mut xml, &mut ctx);
        assert_eq!(c.concert_clef, ClefType::G);
        assert_eq!(c.transposing_clef, ClefType::G);
        assert!(!c.show_courtesy);
    }
}
