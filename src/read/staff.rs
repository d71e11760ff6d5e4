//! Staff-level elements and instrument definitions

use crate::model::chord::{Accidental, Articulation};
use crate::model::element::{Element, ElementType, EngravingItem};
use crate::model::property::Pid;
use crate::model::score::Audio;
use crate::model::staff::{
    Ambitus, BagpipeEmbellishment, BarLine, BarLineType, Bracket, BracketType, Channel, Instrument, StaffState,
    StaffStateType, StaffTypeChange,
};
use crate::model::symbol::{Image, Symbol};
use crate::xml::XmlReader;

use super::chord::{read_accidental, read_articulation};
use super::compat;
use super::context::ReadContext;
use super::item::read_item_properties;
use super::property::read_property_tag;
use super::symbol::{read_image, read_symbol};

// ============================================================================
// Instruments
// ============================================================================

fn read_channel(channel: &mut Channel, xml: &mut XmlReader<'_, '_>) {
    channel.name = xml.attribute("name").unwrap_or("normal").to_string();
    while xml.read_next_start_element() {
        match xml.name() {
            "program" => {
                channel.program = xml.int_attribute("value", 0);
                xml.skip_current_element();
            }
            "controller" => {
                let value = xml.int_attribute("value", 0);
                match xml.int_attribute("ctrl", -1) {
                    0 => channel.bank = value,
                    7 => channel.volume = value,
                    10 => channel.pan = value,
                    _ => {}
                }
                xml.skip_current_element();
            }
            "synti" | "mute" | "solo" | "midiPort" | "midiChannel" => xml.skip_current_element(),
            _ => xml.unknown(),
        }
    }
}

pub fn read_instrument(instr: &mut Instrument, xml: &mut XmlReader<'_, '_>, _ctx: &mut ReadContext) {
    if let Some(id) = xml.attribute("id") {
        instr.id = id.to_string();
    }
    while xml.read_next_start_element() {
        match xml.name() {
            "longName" => instr.long_name = xml.read_text(),
            "shortName" => instr.short_name = xml.read_text(),
            "trackName" => instr.track_name = xml.read_text(),
            "instrumentId" => instr.id = xml.read_text(),
            "transposeDiatonic" => instr.transpose.diatonic = xml.read_int(),
            "transposeChromatic" => instr.transpose.chromatic = xml.read_int(),
            "minPitchP" => instr.min_pitch_p = xml.read_int(),
            "maxPitchP" => instr.max_pitch_p = xml.read_int(),
            "minPitchA" => instr.min_pitch_a = xml.read_int(),
            "maxPitchA" => instr.max_pitch_a = xml.read_int(),
            "useDrumset" => instr.use_drumset = xml.read_bool(),
            "Channel" | "channel" => {
                let mut channel = Channel::default();
                read_channel(&mut channel, xml);
                instr.channels.push(channel);
            }
            // Playback and tablature data the reader does not model
            "Articulation" | "StringData" | "Drum" | "clef" | "singleNoteDynamics" => xml.skip_current_element(),
            _ => xml.unknown(),
        }
    }
}

pub fn read_staff_state(s: &mut StaffState, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "subtype" => s.state_type = StaffStateType::from_int(xml.read_int()),
            "Instrument" => read_instrument(&mut s.instrument, xml, ctx),
            _ => {
                if !read_item_properties(&mut s.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_audio(audio: &mut Audio, xml: &mut XmlReader<'_, '_>) {
    while xml.read_next_start_element() {
        match xml.name() {
            "path" => audio.path = xml.read_text(),
            _ => xml.unknown(),
        }
    }
}

// ============================================================================
// Bar lines and brackets
// ============================================================================

pub fn read_bar_line(b: &mut BarLine, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    b.reset_span();
    while xml.read_next_start_element() {
        match xml.name() {
            "subtype" => {
                let text = xml.read_text();
                b.bar_line_type = BarLineType::from_xml(&text).unwrap_or_else(|| {
                    log::debug!("unknown bar line type {:?}", text);
                    BarLineType::Normal
                });
            }
            "span" => b.span_staff = xml.read_bool(),
            "spanFromOffset" => b.span_from = xml.read_int(),
            "spanToOffset" => b.span_to = xml.read_int(),
            "Articulation" => {
                let mut a = Articulation::create(ElementType::Articulation);
                a.item.track = b.item.track;
                read_articulation(&mut a, xml, ctx);
                b.el.push(Element::Articulation(Box::new(a)));
            }
            "Symbol" => {
                let mut s = Symbol::create(ElementType::Symbol);
                s.base.item.track = b.item.track;
                read_symbol(&mut s, xml, ctx);
                b.el.push(Element::Symbol(Box::new(s)));
            }
            "Image" => {
                if ctx.settings().no_images {
                    xml.skip_current_element();
                } else {
                    let mut image = Image::create(ElementType::Image);
                    image.base.item.track = b.item.track;
                    read_image(&mut image, xml, ctx);
                    b.el.push(Element::Image(Box::new(image)));
                }
            }
            _ => {
                if !read_item_properties(&mut b.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_bracket(b: &mut Bracket, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    b.bracket_type = xml
        .attribute("type")
        .and_then(BracketType::from_xml)
        .unwrap_or(BracketType::Normal);
    while xml.read_next_start_element() {
        match xml.name() {
            "level" => b.column = xml.read_int(),
            _ => {
                if !read_item_properties(&mut b.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

// ============================================================================
// Ambitus
// ============================================================================

/// Accidental wrapped in `topAccidental`/`bottomAccidental`
fn read_ambitus_accidental(acc: &mut Accidental, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        if xml.name() == "Accidental" {
            if compat::accidentals_use_206_encoding(ctx.version()) {
                compat::read_accidental_206(acc, xml, ctx);
            } else {
                read_accidental(acc, xml, ctx);
            }
        } else {
            xml.skip_current_element();
        }
    }
}

pub fn read_ambitus(a: &mut Ambitus, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        let tag = xml.name();
        if read_property_tag(&mut a.item, tag, xml, ctx, Pid::HeadGroup)
            || read_property_tag(&mut a.item, tag, xml, ctx, Pid::HeadType)
            || read_property_tag(&mut a.item, tag, xml, ctx, Pid::MirrorHead)
            || read_property_tag(&mut a.item, tag, xml, ctx, Pid::LineWidthSpatium)
        {
            continue;
        }
        match tag {
            "hasLine" => a.has_line = xml.read_bool(),
            "topPitch" => a.top_pitch = xml.read_int(),
            "bottomPitch" => a.bottom_pitch = xml.read_int(),
            "topTpc" => a.top_tpc = xml.read_int(),
            "bottomTpc" => a.bottom_tpc = xml.read_int(),
            "topAccidental" => read_ambitus_accidental(&mut a.top_accidental, xml, ctx),
            "bottomAccidental" => read_ambitus_accidental(&mut a.bottom_accidental, xml, ctx),
            _ => {
                if !read_item_properties(&mut a.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_bagpipe_embellishment(b: &mut BagpipeEmbellishment, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "subtype" => b.embel_type = xml.read_text(),
            _ => {
                if !read_item_properties(&mut b.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

// ============================================================================
// Staff type changes
// ============================================================================

fn read_staff_type(stc: &mut StaffTypeChange, xml: &mut XmlReader<'_, '_>) {
    stc.group = xml.attribute_or_empty("group");
    while xml.read_next_start_element() {
        match xml.name() {
            "lines" => stc.lines = Some(xml.read_int()),
            "lineDistance" => stc.line_distance = Some(xml.read_double()),
            "stepOffset" => stc.step_offset = Some(xml.read_int()),
            "invisible" => stc.invisible = Some(xml.read_bool()),
            // Presentation details of the staff type that do not change its identity
            _ => xml.skip_current_element(),
        }
    }
}

pub fn read_staff_type_change(stc: &mut StaffTypeChange, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "StaffType" => read_staff_type(stc, xml),
            _ => {
                if !read_item_properties(&mut stc.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::score::MscVersion;
    use crate::model::sym::SymId;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    #[test]
    fn test_instrument() {
        let src = r#"<Instrument id="violin">
            <longName>Violin</longName>
            <transposeChromatic>-2</transposeChromatic>
            <Channel name="arco"><program value="40"/><controller ctrl="7" value="90"/></Channel>
        </Instrument>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut instr = Instrument::default();
        read_instrument(&mut instr, &mut xml, &mut ctx);
        assert_eq!(instr.id, "violin");
        assert_eq!(instr.long_name, "Violin");
        assert_eq!(instr.transpose.chromatic, -2);
        assert_eq!(instr.channels[0].name, "arco");
        assert_eq!(instr.channels[0].program, 40);
        assert_eq!(instr.channels[0].volume, 90);
    }

    #[test]
    fn test_ambitus_old_accidental() {
        let src = r#"<Ambitus>
            <topPitch>72</topPitch>
            <topAccidental><Accidental><subtype>2</subtype></Accidental></topAccidental>
        </Ambitus>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion(206), ReadSettings::default());
        let mut a = Ambitus::create(ElementType::Ambitus);
        read_ambitus(&mut a, &mut xml, &mut ctx);
        assert_eq!(a.top_pitch, 72);
        assert_eq!(a.top_accidental.sym, SymId::AccidentalFlat);
        assert!(xml.is_exhausted());
    }

    #[test]
    fn test_bar_line_skips_images_when_asked() {
        let src = r#"<BarLine><subtype>end</subtype><Image><path>a.png</path></Image></BarLine>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let settings = ReadSettings {
            no_images: true,
            ..Default::default()
        };
        let mut ctx = ReadContext::new(MscVersion::CURRENT, settings);
        let mut b = BarLine::create(ElementType::BarLine);
        read_bar_line(&mut b, &mut xml, &mut ctx);
        assert_eq!(b.bar_line_type, BarLineType::End);
        assert!(b.el.is_empty());
    }
}
