//! Text-like elements
//!
//! Everything here falls back to [`read_text_properties`], which in turn
//! falls back to the styled-property table and the item base.

use crate::model::element::EngravingItem;
use crate::model::property::Pid;
use crate::model::style::Sid;
use crate::model::text::{
    Dynamic, DynamicRange, DynamicSpeed, FiguredBass, FiguredBassItem, InstrumentChange, Jump, Lyrics, LyricsSyllabic,
    Marker, MarkerType, PlayTechAnnotation, StaffTextBase, SwingParameters, TempoText, TextBase, TextStyleType,
};
use crate::model::types::{fraction_from_ticks, DurationType, Placement, DIVISION, VOICES};
use crate::xml::XmlReader;

use super::compat;
use super::context::ReadContext;
use super::item::read_item_properties;
use super::property::{read_property_tag, read_styled_property};
use super::staff::read_instrument;

/// Text formatting slots shared by all text kinds
const TEXT_PIDS: &[Pid] = &[
    Pid::FontFace,
    Pid::FontSize,
    Pid::FontStyle,
    Pid::Align,
    Pid::FrameType,
    Pid::FrameWidth,
    Pid::FramePadding,
    Pid::FrameRound,
    Pid::FrameFgColor,
    Pid::FrameBgColor,
    Pid::SizeSpatiumDependent,
];

// ============================================================================
// Plain text
// ============================================================================

pub fn read_text_properties(text: &mut TextBase, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> bool {
    let tag = xml.name();
    match tag {
        "text" => text.xml_text = xml.read_xml(),
        "style" => {
            let name = xml.read_text();
            text.text_style = TextStyleType::from_xml(&name);
            if text.text_style.is_none() {
                log::debug!("unknown text style {:?}", name);
            }
        }
        "bold" => text.set_bold(xml.read_bool()),
        "italic" => text.set_italic(xml.read_bool()),
        "underline" => text.set_underline(xml.read_bool()),
        "strike" => text.set_strike(xml.read_bool()),
        _ => {
            for &pid in TEXT_PIDS {
                if read_property_tag(&mut text.item, tag, xml, ctx, pid) {
                    return true;
                }
            }
            return read_styled_property(&mut text.item, tag, xml, ctx) || read_item_properties(&mut text.item, xml, ctx);
        }
    }
    true
}

/// Decoder for Text, Sticking, RehearsalMark, MeasureNumber, MMRestRange and Fingering
pub fn read_text(text: &mut TextBase, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        if !read_text_properties(text, xml, ctx) {
            xml.unknown();
        }
    }
}

// ============================================================================
// Tempo
// ============================================================================

pub fn read_tempo_text(t: &mut TempoText, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "tempo" => t.tempo = xml.read_double(),
            "followText" => t.follow_text = xml.read_bool(),
            _ => {
                if !read_text_properties(&mut t.text, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    // A bare tempo only drives playback
    if t.text.is_empty() {
        t.text.xml_text = format!("<sym>metNoteQuarterUp</sym> = {}", t.tempo_bpm().round_ties_even() as i32);
        t.item_mut().visible = false;
    }
}

// ============================================================================
// Staff and system text
// ============================================================================

pub fn read_staff_text_properties(st: &mut StaffTextBase, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> bool {
    match xml.name() {
        "MidiAction" => {
            let channel = xml.int_attribute("channel", 0);
            let name = xml.attribute_or_empty("name");
            st.add_midi_action(channel, name);
            xml.skip_current_element();
        }
        "channelSwitch" | "articulationChange" => {
            let voice = xml.int_attribute("voice", -1);
            let name = xml.attribute_or_empty("name");
            if (0..VOICES as i32).contains(&voice) {
                st.channel_names[voice as usize] = name;
            } else if voice == -1 {
                // No voice given: every voice switches
                for slot in st.channel_names.iter_mut() {
                    slot.clone_from(&name);
                }
            }
            xml.skip_current_element();
        }
        "aeolus" => {
            let group = xml.int_attribute("group", -1);
            if (0..4).contains(&group) {
                st.aeolus_stops[group as usize] = xml.read_int();
            } else {
                xml.skip_current_element();
            }
            st.set_aeolus_stops = true;
        }
        "swing" => {
            let unit = xml.attribute("unit").and_then(DurationType::from_xml);
            let swing_unit = match unit {
                Some(DurationType::Eighth) => DIVISION / 2,
                Some(DurationType::D16th) => DIVISION / 4,
                _ => 0,
            };
            st.swing = true;
            st.swing_parameters = SwingParameters {
                swing_unit,
                swing_ratio: xml.int_attribute("ratio", 60),
            };
            xml.skip_current_element();
        }
        "capo" => {
            let fret = xml.int_attribute("fretId", 0);
            if fret != 0 {
                st.capo = fret;
            }
            xml.skip_current_element();
        }
        _ => return read_text_properties(&mut st.text, xml, ctx),
    }
    true
}

/// Decoder for StaffText and SystemText
pub fn read_staff_text(st: &mut StaffTextBase, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    st.clear();
    while xml.read_next_start_element() {
        if !read_staff_text_properties(st, xml, ctx) {
            xml.unknown();
        }
    }
}

pub fn read_play_tech_annotation(a: &mut PlayTechAnnotation, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    a.base.clear();
    while xml.read_next_start_element() {
        let tag = xml.name();
        if read_property_tag(&mut a.base.text.item, tag, xml, ctx, Pid::PlayTechType) {
            continue;
        }
        if !read_staff_text_properties(&mut a.base, xml, ctx) {
            xml.unknown();
        }
    }
}

// ============================================================================
// Dynamics and instrument changes
// ============================================================================

pub fn read_dynamic(d: &mut Dynamic, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "subtype" => d.dynamic_type = xml.read_text().trim().to_string(),
            "velocity" => d.velocity = xml.read_int(),
            "dynType" => {
                let text = xml.read_text();
                d.dyn_range = DynamicRange::from_xml(&text).unwrap_or(DynamicRange::Staff);
            }
            "veloChange" => d.change_in_velocity = xml.read_int(),
            "veloChangeSpeed" => {
                let text = xml.read_text();
                d.velo_change_speed = DynamicSpeed::from_xml(&text).unwrap_or_default();
            }
            _ => {
                if !read_text_properties(&mut d.text, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_instrument_change(ic: &mut InstrumentChange, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "Instrument" => read_instrument(&mut ic.instrument, xml, ctx),
            "init" => ic.init = xml.read_bool(),
            _ => {
                if !read_text_properties(&mut ic.text, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    if compat::instrument_change_inherits_transposition(ctx.version()) {
        let track = ic.item().track;
        let ntracks = i32::try_from(ctx.nstaves() * VOICES).unwrap_or(i32::MAX);
        let on_staff = (0..ntracks).contains(&track);
        let info = if on_staff { ctx.staff_info(ic.item().staff_idx()) } else { None };
        ic.instrument.transpose = info.map(|info| info.transpose).unwrap_or_default();
        if !on_staff {
            log::debug!("instrument change on track {} outside {} tracks, moved to track 0", track, ntracks);
            ic.item_mut().track = 0;
        }
    }
}

// ============================================================================
// Figured bass
// ============================================================================

fn read_figured_bass_item(item: &mut FiguredBassItem, xml: &mut XmlReader<'_, '_>) {
    for (i, slot) in item.parenth.iter_mut().enumerate() {
        *slot = xml.int_attribute(&format!("b{}", i), 0);
    }
    while xml.read_next_start_element() {
        match xml.name() {
            "brackets" => {
                for (i, slot) in item.parenth.iter_mut().enumerate() {
                    *slot = xml.int_attribute(&format!("b{}", i), 0);
                }
                xml.skip_current_element();
            }
            "prefix" => item.prefix = xml.read_int(),
            "digit" => item.digit = xml.read_int(),
            "suffix" => item.suffix = xml.read_int(),
            "continuationLine" => item.continuation_line = xml.read_int(),
            _ => xml.unknown(),
        }
    }
}

pub fn read_figured_bass(fb: &mut FiguredBass, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "ticks" => fb.ticks = xml.read_fraction(),
            "onNote" => fb.on_note = xml.read_bool(),
            "FiguredBassItem" => {
                let mut item = FiguredBassItem::default();
                read_figured_bass_item(&mut item, xml);
                fb.items.push(item);
            }
            _ => {
                if !read_text_properties(&mut fb.text, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    if !fb.items.is_empty() {
        fb.text.xml_text = fb
            .items
            .iter()
            .map(FiguredBassItem::normalized_text)
            .collect::<Vec<_>>()
            .join("\n");
    }
}

// ============================================================================
// Repeats and jumps
// ============================================================================

pub fn read_marker(m: &mut Marker, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "label" => {
                m.label = xml.read_text();
                m.marker_type = MarkerType::from_xml(&m.label).unwrap_or(MarkerType::User);
            }
            _ => {
                if !read_text_properties(&mut m.text, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_jump(j: &mut Jump, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "jumpTo" => j.jump_to = xml.read_text(),
            "playUntil" => j.play_until = xml.read_text(),
            "continueAt" => j.continue_at = xml.read_text(),
            "playRepeats" => j.play_repeats = xml.read_bool(),
            _ => {
                if !read_text_properties(&mut j.text, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

// ============================================================================
// Lyrics
// ============================================================================

pub fn read_lyrics(l: &mut Lyrics, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "no" => l.no = xml.read_int(),
            "syllabic" => {
                let text = xml.read_text();
                l.syllabic = LyricsSyllabic::from_xml(&text).unwrap_or_default();
            }
            "ticks" => l.ticks = fraction_from_ticks(xml.read_int()),
            "ticks_f" => l.ticks = xml.read_fraction(),
            _ => {
                if read_property_tag(&mut l.text.item, tag, xml, ctx, Pid::Placement) {
                    continue;
                }
                if !read_text_properties(&mut l.text, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    reproject_lyrics_offset(l, ctx);
}

/// Old autoplace stored an offset that now duplicates the style default
fn reproject_lyrics_offset(l: &mut Lyrics, ctx: &ReadContext) {
    let item = l.item();
    if item.is_styled(Pid::Offset) || ctx.paste_mode() {
        return;
    }
    if !item.autoplace || !compat::lyrics_offset_needs_reprojection(ctx.app_version()) {
        return;
    }
    let above = item.property(Pid::Placement, ctx.style()).and_then(|v| v.as_placement()) == Some(Placement::Above);
    let sid = if above { Sid::LyricsPosAbove } else { Sid::LyricsPosBelow };
    let default = ctx.style().value(sid).as_point().unwrap_or_default().scaled(ctx.spatium());
    l.item_mut().offset.y = default.y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::ElementType;
    use crate::model::score::{AppVersion, MscVersion};
    use crate::model::types::Interval;
    use crate::read::context::StaffInfo;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    fn ctx() -> ReadContext {
        ReadContext::new(MscVersion::CURRENT, ReadSettings::default())
    }

    #[test]
    fn test_tempo_without_text_is_hidden() {
        let doc = Document::parse("<Tempo><tempo>2</tempo></Tempo>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut t = TempoText::create(ElementType::TempoText);
        read_tempo_text(&mut t, &mut xml, &mut ctx());
        assert_eq!(t.text.xml_text, "<sym>metNoteQuarterUp</sym> = 120");
        assert!(!t.item().visible);
    }

    #[test]
    fn test_tempo_half_bpm_rounds_to_even() {
        for (tempo, bpm) in [("2.375", 142), ("0.875", 52), ("1.125", 68)] {
            let src = format!("<Tempo><tempo>{}</tempo></Tempo>", tempo);
            let doc = Document::parse(&src).unwrap();
            let mut xml = XmlReader::new(&doc);
            let mut t = TempoText::create(ElementType::TempoText);
            read_tempo_text(&mut t, &mut xml, &mut ctx());
            assert_eq!(t.text.xml_text, format!("<sym>metNoteQuarterUp</sym> = {}", bpm));
        }
    }

    fn read_old_instrument_change(src: &str, ctx: &mut ReadContext) -> InstrumentChange {
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ic = InstrumentChange::create(ElementType::InstrumentChange);
        read_instrument_change(&mut ic, &mut xml, ctx);
        ic
    }

    #[test]
    fn test_old_instrument_change_inherits_staff_transposition() {
        let mut ctx = ReadContext::new(MscVersion(205), ReadSettings::default());
        ctx.set_staves(vec![StaffInfo {
            transpose: Interval { diatonic: -1, chromatic: -2 },
            ..StaffInfo::default()
        }]);
        let ic = read_old_instrument_change(
            "<InstrumentChange><track>2</track><Instrument><transposeChromatic>-3</transposeChromatic></Instrument></InstrumentChange>",
            &mut ctx,
        );
        assert_eq!(ic.instrument.transpose, Interval { diatonic: -1, chromatic: -2 });
        assert_eq!(ic.item().track, 2);
    }

    #[test]
    fn test_old_instrument_change_without_staff_is_untransposed() {
        let mut ctx = ReadContext::new(MscVersion(205), ReadSettings::default());
        let ic = read_old_instrument_change(
            "<InstrumentChange><Instrument><transposeChromatic>-3</transposeChromatic></Instrument></InstrumentChange>",
            &mut ctx,
        );
        assert_eq!(ic.instrument.transpose, Interval::default());
    }

    #[test]
    fn test_old_instrument_change_off_the_staves_moves_to_track_zero() {
        let mut ctx = ReadContext::new(MscVersion(205), ReadSettings::default());
        ctx.set_staves(vec![StaffInfo {
            transpose: Interval { diatonic: -1, chromatic: -2 },
            ..StaffInfo::default()
        }]);
        let ic = read_old_instrument_change(
            "<InstrumentChange><track>9</track><Instrument><transposeChromatic>-3</transposeChromatic></Instrument></InstrumentChange>",
            &mut ctx,
        );
        assert_eq!(ic.item().track, 0);
        assert_eq!(ic.instrument.transpose, Interval::default());

        let current = read_old_instrument_change(
            "<InstrumentChange><track>9</track><Instrument><transposeChromatic>-3</transposeChromatic></Instrument></InstrumentChange>",
            &mut ReadContext::new(MscVersion::CURRENT, ReadSettings::default()),
        );
        assert_eq!(current.item().track, 9);
        assert_eq!(current.instrument.transpose.chromatic, -3);
    }

    #[test]
    fn test_staff_text_channels_and_swing() {
        let src = r#"<StaffText>
            <MidiAction channel="1" name="pizz"/>
            <MidiAction channel="1" name="mute"/>
            <channelSwitch name="arco"/>
            <channelSwitch voice="2" name="tremolo"/>
            <swing unit="eighth" ratio="66"/>
            <text>pizz.</text>
        </StaffText>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut st = StaffTextBase::create(ElementType::StaffText);
        read_staff_text(&mut st, &mut xml, &mut ctx());
        assert_eq!(st.channel_actions.len(), 1);
        assert_eq!(st.channel_actions[0].midi_action_names, vec!["pizz", "mute"]);
        assert_eq!(st.channel_names[0], "arco");
        assert_eq!(st.channel_names[2], "tremolo");
        assert_eq!(st.swing_parameters.swing_unit, 240);
        assert_eq!(st.swing_parameters.swing_ratio, 66);
        assert_eq!(st.text.xml_text, "pizz.");
    }

    #[test]
    fn test_marker_label_fallback() {
        let doc = Document::parse("<Marker><label>myLabel</label></Marker>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut m = Marker::create(ElementType::Marker);
        read_marker(&mut m, &mut xml, &mut ctx());
        assert_eq!(m.marker_type, MarkerType::User);
    }

    #[test]
    fn test_old_lyrics_offset_is_reprojected() {
        let doc = Document::parse(r#"<Lyrics><offset x="0" y="1"/><text>la</text></Lyrics>"#).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion(301), ReadSettings::default())
            .with_app_version(AppVersion::parse("3.0.2"));
        let mut l = Lyrics::create(ElementType::Lyrics);
        read_lyrics(&mut l, &mut xml, &mut ctx);
        assert!((l.item().offset.y - 3.0 * ctx.spatium()).abs() < 1e-9);
    }
}
