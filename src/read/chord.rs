//! Chords, rests, notes and everything attached to them

use crate::model::chord::{
    Accidental, AccidentalBracket, AccidentalRole, Arpeggio, ArpeggioType, Articulation, ArticulationTextType,
    BeamMode, Bend, Breath, Chord, ChordLine, ChordLineType, ChordRest, Fermata, Note, NoteDot, NoteEvent, NoteType,
    PathElement, PitchValue, PlayEventType, Rest, Stem, StemSlash, Tremolo, TremoloBar, TremoloType,
};
use crate::model::beam::BeamFragment;
use crate::model::element::{Element, ElementType, EngravingItem};
use crate::model::property::{Pid, PropertyFlags};
use crate::model::sym::SymId;
use crate::model::symbol::{Image, Symbol};
use crate::model::text::{Lyrics, TextBase};
use crate::model::types::{
    fraction_from_ticks, pitch_to_tpc, DirectionV, DurationType, Fraction, PointF, TDuration, TPC_INVALID,
};
use crate::xml::XmlReader;

use super::compat;
use super::context::ReadContext;
use super::item::{read_item, read_item_properties};
use super::property::{read_property, read_property_tag, read_styled_property};
use super::spanner::read_spanner;
use super::symbol::{read_image, read_symbol};
use super::text::{read_lyrics, read_text};

// ============================================================================
// ChordRest
// ============================================================================

fn read_duration_type(cr: &mut ChordRest, is_rest: bool, xml: &mut XmlReader<'_, '_>, ctx: &ReadContext) {
    let text = xml.read_text();
    cr.duration_type.kind = DurationType::from_xml(&text).unwrap_or(DurationType::Quarter);
    if cr.duration_type.kind != DurationType::Measure {
        let version = ctx.version();
        // Rests start out one measure long; a whole rest that fits is a measure rest
        if is_rest
            && compat::whole_rest_fills_measure(version)
            && *cr.ticks.numer() != 0
            && cr.duration_type.kind == DurationType::Whole
            && cr.ticks <= Fraction::new(4, 4)
        {
            cr.duration_type = TDuration::new(DurationType::Measure);
        } else {
            cr.ticks = cr.duration_type.fraction();
        }
    } else if compat::uses_1x_encoding(ctx.version()) {
        cr.ticks = ctx.time_sig();
    }
}

pub fn read_chord_rest_properties(
    cr: &mut ChordRest,
    is_rest: bool,
    xml: &mut XmlReader<'_, '_>,
    ctx: &mut ReadContext,
) -> bool {
    match xml.name() {
        "durationType" => read_duration_type(cr, is_rest, xml, ctx),
        "BeamMode" => {
            let text = xml.read_text();
            cr.beam_mode = BeamMode::from_xml(&text).unwrap_or_default();
        }
        "Articulation" => {
            let mut a = Articulation::create(ElementType::Articulation);
            a.item.track = cr.item.track;
            read_articulation(&mut a, xml, ctx);
            cr.articulations.push(a);
        }
        "leadingSpace" | "trailingSpace" => {
            log::debug!("ignoring obsolete <{}>", xml.name());
            xml.skip_current_element();
        }
        "small" => cr.small = xml.read_bool(),
        "duration" => cr.ticks = xml.read_fraction(),
        "ticklen" => {
            // 1.3: tick length, 0 meaning the whole measure
            let measure_ticks = ctx.time_sig();
            let ticks = match xml.read_int() {
                0 => measure_ticks,
                n => fraction_from_ticks(n),
            };
            if is_rest && ticks == measure_ticks {
                cr.duration_type = TDuration::new(DurationType::Measure);
                cr.ticks = ticks;
            } else {
                cr.ticks = ticks;
                cr.duration_type = TDuration::from_fraction(ticks);
            }
        }
        "dots" => cr.duration_type.dots = xml.read_int(),
        "staffMove" => {
            cr.staff_move = xml.read_int();
            if let Some(info) = ctx.staff_info(cr.item.staff_idx()) {
                let target = cr.item.staff_idx() + cr.staff_move;
                let first = info.part_first_staff as i32;
                let last = first + info.part_nstaves as i32 - 1;
                if target < first || target > last {
                    cr.staff_move = 0;
                }
            }
        }
        "Spanner" => read_spanner(xml, ctx),
        "Lyrics" => {
            let mut l = Lyrics::create(ElementType::Lyrics);
            l.text.item.track = ctx.track();
            read_lyrics(&mut l, xml, ctx);
            cr.lyrics.push(l);
        }
        "pos" => cr.item.offset = xml.read_point().scaled(ctx.spatium()),
        "Tuplet" => cr.tuplet = Some(xml.read_int()),
        "Beam" => cr.beam = Some(xml.read_int()),
        _ => return read_item_properties(&mut cr.item, xml, ctx),
    }
    true
}

pub fn read_rest(r: &mut Rest, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        if !read_chord_rest_properties(&mut r.cr, true, xml, ctx) {
            xml.unknown();
        }
    }
}

// ============================================================================
// Chord
// ============================================================================

pub fn read_chord(c: &mut Chord, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        let tag = xml.name();
        let track = c.cr.item.track;
        match tag {
            "Note" => {
                let mut note = Note::create(ElementType::Note);
                note.item.track = track;
                read_note(&mut note, xml, ctx, Some(&mut *c));
                c.notes.push(note);
            }
            "Stem" => {
                let mut stem = Stem::create(ElementType::Stem);
                stem.item.track = track;
                read_stem(&mut stem, xml, ctx);
                c.stem = Some(stem);
            }
            "Hook" => {
                let mut hook = Symbol::create(ElementType::Hook);
                hook.base.item.track = track;
                read_symbol(&mut hook, xml, ctx);
                c.hook = Some(hook);
            }
            "StemSlash" => {
                let mut slash = StemSlash::create(ElementType::StemSlash);
                slash.item.track = track;
                read_item(&mut slash.item, xml, ctx);
                c.stem_slash = Some(slash);
            }
            "noStem" => c.no_stem = xml.read_bool(),
            "Arpeggio" => {
                let mut a = Arpeggio::create(ElementType::Arpeggio);
                a.item.track = track;
                read_arpeggio(&mut a, xml, ctx);
                c.arpeggio = Some(a);
            }
            "Tremolo" => {
                let mut t = Tremolo::create(ElementType::Tremolo);
                t.item.track = track;
                t.duration_type = c.cr.duration_type;
                read_tremolo(&mut t, xml, ctx);
                c.tremolo = Some(t);
            }
            "tickOffset" => xml.skip_current_element(),
            "ChordLine" => {
                let mut line = ChordLine::create(ElementType::ChordLine);
                line.item.track = track;
                read_chord_line(&mut line, xml, ctx);
                c.chord_lines.push(line);
            }
            _ => {
                if let Some(note_type) = NoteType::from_tag(tag) {
                    c.note_type = note_type;
                    xml.skip_current_element();
                    continue;
                }
                if !read_property_tag(&mut c.cr.item, tag, xml, ctx, Pid::StemDirection)
                    && !read_chord_rest_properties(&mut c.cr, false, xml, ctx)
                {
                    xml.unknown();
                }
            }
        }
    }
    if c.is_grace() && compat::ignores_old_offsets(ctx.version()) {
        c.cr.item.offset.x = 0.0;
    }
}

// ============================================================================
// Note
// ============================================================================

const NOTE_PIDS: &[Pid] = &[
    Pid::MirrorHead,
    Pid::DotPosition,
    Pid::HeadScheme,
    Pid::HeadGroup,
    Pid::HeadType,
    Pid::VeloType,
];

fn read_note_event(xml: &mut XmlReader<'_, '_>) -> NoteEvent {
    let mut ev = NoteEvent::default();
    while xml.read_next_start_element() {
        match xml.name() {
            "pitch" => ev.pitch = xml.read_int(),
            "ontime" => ev.ontime = xml.read_int(),
            "len" => ev.len = xml.read_int(),
            _ => xml.unknown(),
        }
    }
    ev
}

/// Read a note; `chord` is the owner when there is one
pub fn read_note(n: &mut Note, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext, mut chord: Option<&mut Chord>) {
    n.tpc1 = TPC_INVALID;
    n.tpc2 = TPC_INVALID;
    while xml.read_next_start_element() {
        let tag = xml.name();
        let track = n.item.track;
        match tag {
            "pitch" => n.pitch = xml.read_int().clamp(0, 127),
            "tpc" => {
                n.tpc1 = xml.read_int();
                n.tpc2 = n.tpc1;
            }
            "tpc2" => n.tpc2 = xml.read_int(),
            "small" => n.small = xml.read_bool(),
            "Accidental" => {
                let mut a = Accidental::create(ElementType::Accidental);
                a.item.track = track;
                read_accidental(&mut a, xml, ctx);
                n.accidental = Some(a);
            }
            "Spanner" => read_spanner(xml, ctx),
            "fixed" => n.fixed = xml.read_bool(),
            "fixedLine" => n.fixed_line = xml.read_int(),
            "velocity" => n.user_velocity = xml.read_int(),
            "play" => n.play = xml.read_bool(),
            "tuning" => n.tuning = xml.read_double(),
            "fret" => n.fret = xml.read_int(),
            "string" => n.string = xml.read_int(),
            "ghost" => n.ghost = xml.read_bool(),
            "dead" => n.dead = xml.read_bool(),
            "line" => n.line = Some(xml.read_int()),
            "Fingering" => {
                let mut f = TextBase::create(ElementType::Fingering);
                f.item.track = track;
                read_text(&mut f, xml, ctx);
                n.el.push(Element::Fingering(Box::new(f)));
            }
            "Symbol" => {
                let mut s = Symbol::create(ElementType::Symbol);
                s.base.item.track = track;
                read_symbol(&mut s, xml, ctx);
                n.el.push(Element::Symbol(Box::new(s)));
            }
            "Image" => {
                if ctx.settings().no_images {
                    xml.skip_current_element();
                } else {
                    let mut image = Image::create(ElementType::Image);
                    image.base.item.track = track;
                    read_image(&mut image, xml, ctx);
                    n.el.push(Element::Image(Box::new(image)));
                }
            }
            "Bend" => {
                let mut b = Bend::create(ElementType::Bend);
                b.item.track = track;
                read_bend(&mut b, xml, ctx);
                n.el.push(Element::Bend(Box::new(b)));
            }
            "NoteDot" => {
                let mut dot = NoteDot::create(ElementType::NoteDot);
                dot.item.track = track;
                read_note_dot(&mut dot, xml, ctx);
                n.dots.push(dot);
            }
            "Events" => {
                n.play_events.clear();
                while xml.read_next_start_element() {
                    if xml.name() == "Event" {
                        n.play_events.push(read_note_event(xml));
                    } else {
                        xml.unknown();
                    }
                }
                if !n.play_events.is_empty() {
                    if let Some(c) = chord.as_deref_mut() {
                        c.play_event_type = PlayEventType::User;
                    }
                }
            }
            "ChordLine" => match chord.as_deref_mut() {
                Some(c) => {
                    let mut line = ChordLine::create(ElementType::ChordLine);
                    line.item.track = track;
                    read_chord_line(&mut line, xml, ctx);
                    line.note = Some(c.notes.len());
                    c.chord_lines.push(line);
                }
                None => xml.skip_current_element(),
            },
            _ => {
                if NOTE_PIDS.iter().any(|&pid| read_property_tag(&mut n.item, tag, xml, ctx, pid)) {
                    continue;
                }
                if !read_item_properties(&mut n.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    if n.tpc1 == TPC_INVALID {
        n.tpc1 = pitch_to_tpc(n.pitch);
    }
    if n.tpc2 == TPC_INVALID {
        n.tpc2 = n.tpc1;
    }
}

pub fn read_note_dot(dot: &mut NoteDot, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "name" | "subtype" => xml.skip_current_element(),
            _ => {
                if !read_item_properties(&mut dot.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_accidental(a: &mut Accidental, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "bracket" => {
                a.bracket = match xml.read_int() {
                    0 => AccidentalBracket::None,
                    1 => AccidentalBracket::Parenthesis,
                    2 => AccidentalBracket::Bracket,
                    other => {
                        log::debug!("accidental bracket {} out of range", other);
                        a.bracket
                    }
                };
            }
            "subtype" => {
                let text = xml.read_text();
                a.sym = SymId::from_name(&text);
            }
            "role" => {
                let text = xml.read_text();
                if let Some(role) = AccidentalRole::from_xml(&text) {
                    a.role = role;
                }
            }
            "small" => a.small = xml.read_bool(),
            _ => {
                if !read_item_properties(&mut a.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

// ============================================================================
// Stem, arpeggio, tremolo, chord line
// ============================================================================

pub fn read_stem(s: &mut Stem, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        let tag = xml.name();
        if read_property_tag(&mut s.item, tag, xml, ctx, Pid::UserLen)
            || read_styled_property(&mut s.item, tag, xml, ctx)
            || read_item_properties(&mut s.item, xml, ctx)
        {
            continue;
        }
        xml.unknown();
    }
}

pub fn read_arpeggio(a: &mut Arpeggio, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "subtype" => {
                let text = xml.read_text();
                a.arpeggio_type = ArpeggioType::from_xml(&text).unwrap_or_default();
            }
            "userLen1" => a.user_len1 = xml.read_double() * ctx.spatium(),
            "userLen2" => a.user_len2 = xml.read_double() * ctx.spatium(),
            "span" => a.span = xml.read_int(),
            "play" => a.play = xml.read_bool(),
            "timeStretch" => a.stretch = xml.read_double(),
            _ => {
                if !read_item_properties(&mut a.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_tremolo(t: &mut Tremolo, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "subtype" => {
                let text = xml.read_text();
                t.tremolo_type = TremoloType::from_xml(&text).unwrap_or_default();
            }
            "strokeStyle" => {
                t.style = xml.read_int();
                t.item.set_property_flags(Pid::TremoloStyle, PropertyFlags::Unstyled);
            }
            "Fragment" => {
                let direction = t.item.props.get(Pid::Direction).and_then(|v| v.as_direction());
                let idx = match direction {
                    None | Some(DirectionV::Auto) | Some(DirectionV::Down) => 0,
                    Some(DirectionV::Up) => 1,
                };
                t.user_modified[idx] = true;
                let spatium = ctx.spatium();
                let mut fragment = BeamFragment::default();
                while xml.read_next_start_element() {
                    match xml.name() {
                        "y1" => fragment.py1[idx] = xml.read_double() * spatium,
                        "y2" => fragment.py2[idx] = xml.read_double() * spatium,
                        _ => xml.unknown(),
                    }
                }
                t.fragment = Some(fragment);
            }
            _ => {
                if read_property_tag(&mut t.item, tag, xml, ctx, Pid::Direction)
                    || read_styled_property(&mut t.item, tag, xml, ctx)
                    || read_item_properties(&mut t.item, xml, ctx)
                {
                    continue;
                }
                xml.unknown();
            }
        }
    }
}

fn read_path(xml: &mut XmlReader<'_, '_>) -> Vec<PathElement> {
    let mut path = Vec::new();
    let mut curve_to = PointF::default();
    let mut c1 = PointF::default();
    let mut state = 0;
    while xml.read_next_start_element() {
        if xml.name() != "Element" {
            xml.unknown();
            continue;
        }
        let p = PointF::new(xml.double_attribute("x", 0.0), xml.double_attribute("y", 0.0));
        match xml.int_attribute("type", -1) {
            0 => path.push(PathElement::MoveTo(p)),
            1 => path.push(PathElement::LineTo(p)),
            2 => {
                curve_to = p;
                state = 1;
            }
            3 if state == 1 => {
                c1 = p;
                state = 2;
            }
            3 if state == 2 => {
                path.push(PathElement::CubicTo(curve_to, c1, p));
                state = 0;
            }
            _ => {}
        }
        xml.skip_current_element();
    }
    path
}

pub fn read_chord_line(l: &mut ChordLine, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    l.path.clear();
    while xml.read_next_start_element() {
        match xml.name() {
            "Path" => {
                l.path = read_path(xml);
                l.modified = true;
            }
            "subtype" => {
                let text = xml.read_text();
                l.chord_line_type = ChordLineType::from_xml(&text).unwrap_or_default();
            }
            "straight" => l.straight = xml.read_bool(),
            "wavy" => l.wavy = xml.read_bool(),
            "lengthX" => l.length_x = xml.read_int() as f64,
            "lengthY" => l.length_y = xml.read_int() as f64,
            "offset" if compat::ignores_old_offsets(ctx.version()) => xml.skip_current_element(),
            _ => {
                if !read_item_properties(&mut l.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

// ============================================================================
// Articulations and ornaments
// ============================================================================

fn articulation_sym(name: &str, ctx: &ReadContext) -> SymId {
    let mut sym = SymId::from_name(name);
    if sym == SymId::NoSym {
        sym = compat::articulation_name_206(name);
    }
    if sym == SymId::NoSym || name == "ornamentMordentInverted" {
        sym = SymId::OrnamentMordent;
    }
    if compat::mordent_means_short_trill(ctx.app_version()) && name == "ornamentMordent" {
        sym = SymId::OrnamentShortTrill;
    }
    sym
}

pub fn read_articulation_properties(a: &mut Articulation, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> bool {
    let tag = xml.name();
    match tag {
        "subtype" => {
            let text = xml.read_text();
            let name = text.trim();
            match ArticulationTextType::from_xml(name) {
                Some(text_type) => a.text_type = text_type,
                None => a.sym = articulation_sym(name, ctx),
            }
        }
        "channel" => {
            a.channel_name = xml.attribute_or_empty("name");
            xml.skip_current_element();
        }
        "direction" => read_property(&mut a.item, xml, ctx, Pid::Direction),
        "ornamentStyle" => read_property(&mut a.item, xml, ctx, Pid::OrnamentStyle),
        "play" => a.play = xml.read_bool(),
        "offset" if compat::ignores_old_offsets(ctx.version()) => xml.skip_current_element(),
        _ => {
            return read_property_tag(&mut a.item, tag, xml, ctx, Pid::ArticulationAnchor)
                || read_item_properties(&mut a.item, xml, ctx);
        }
    }
    true
}

pub fn read_articulation(a: &mut Articulation, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        if !read_articulation_properties(a, xml, ctx) {
            xml.unknown();
        }
    }
}

pub fn read_fermata(f: &mut Fermata, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "subtype" => {
                let text = xml.read_text();
                let sym = SymId::from_name(&text);
                if sym == SymId::NoSym {
                    log::debug!("unknown fermata {:?}", text);
                } else {
                    f.sym = sym;
                }
            }
            "play" => f.play = xml.read_bool(),
            "timeStretch" => f.time_stretch = xml.read_double(),
            "offset" if compat::uses_1x_encoding(ctx.version()) => xml.skip_current_element(),
            _ => {
                if !read_item_properties(&mut f.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_breath(b: &mut Breath, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            // Obsolete numeric subtype
            "subtype" => {
                b.sym = match xml.read_int() {
                    0 | 1 => SymId::BreathMarkComma,
                    2 => SymId::CaesuraCurved,
                    3 => SymId::Caesura,
                    _ => SymId::NoSym,
                };
            }
            "symbol" => {
                let text = xml.read_text();
                b.sym = SymId::from_name(&text);
            }
            "pause" => b.pause = xml.read_double(),
            _ => {
                if !read_item_properties(&mut b.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

// ============================================================================
// Bends
// ============================================================================

fn read_pitch_value(xml: &mut XmlReader<'_, '_>) -> PitchValue {
    let pv = PitchValue {
        time: xml.int_attribute("time", 0),
        pitch: xml.int_attribute("pitch", 0),
        vibrato: xml.int_attribute("vibrato", 0) != 0,
    };
    xml.skip_current_element();
    pv
}

pub fn read_bend(b: &mut Bend, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "point" => b.points.push(read_pitch_value(xml)),
            "play" => b.play = xml.read_bool(),
            _ => {
                if !read_styled_property(&mut b.item, tag, xml, ctx) && !read_item_properties(&mut b.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_tremolo_bar(t: &mut TremoloBar, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "point" => t.points.push(read_pitch_value(xml)),
            "mag" => t.user_mag = xml.read_double_in(0.1, 10.0),
            "play" => t.play = xml.read_bool(),
            _ => {
                if read_styled_property(&mut t.item, tag, xml, ctx)
                    || read_property_tag(&mut t.item, tag, xml, ctx, Pid::LineWidth)
                    || read_item_properties(&mut t.item, xml, ctx)
                {
                    continue;
                }
                xml.unknown();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::score::{AppVersion, MscVersion};
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    fn read_chord_src(src: &str, ctx: &mut ReadContext) -> Chord {
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut c = Chord::create(ElementType::Chord);
        read_chord(&mut c, &mut xml, ctx);
        assert!(xml.is_exhausted());
        c
    }

    #[test]
    fn test_note_pitch_and_tpc() {
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let c = read_chord_src(
            "<Chord><durationType>eighth</durationType><Note><pitch>200</pitch><tpc>16</tpc></Note><Note><pitch>62</pitch></Note></Chord>",
            &mut ctx,
        );
        assert_eq!(c.cr.ticks, Fraction::new(1, 8));
        assert_eq!(c.notes[0].pitch, 127);
        assert_eq!((c.notes[0].tpc1, c.notes[0].tpc2), (16, 16));
        assert_eq!(c.notes[1].tpc1, pitch_to_tpc(62));
    }

    #[test]
    fn test_note_events_mark_chord() {
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let c = read_chord_src(
            "<Chord><Note><pitch>60</pitch><Events><Event><len>500</len></Event></Events></Note></Chord>",
            &mut ctx,
        );
        assert_eq!(c.play_event_type, PlayEventType::User);
        assert_eq!(c.notes[0].play_events[0].len, 500);
    }

    #[test]
    fn test_grace_offset_reset_before_400() {
        let mut ctx = ReadContext::new(MscVersion(302), ReadSettings::default());
        let c = read_chord_src(r#"<Chord><acciaccatura/><offset x="2" y="1"/></Chord>"#, &mut ctx);
        assert!(c.is_grace());
        assert_eq!(c.cr.item.offset.x, 0.0);
        assert!(c.cr.item.offset.y > 0.0);
    }

    #[test]
    fn test_dotted_duration() {
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let c = read_chord_src("<Chord><dots>1</dots><durationType>quarter</durationType></Chord>", &mut ctx);
        assert_eq!(c.cr.ticks, Fraction::new(3, 8));
    }

    #[test]
    fn test_old_whole_rest_becomes_measure_rest() {
        let doc = Document::parse("<Rest><durationType>whole</durationType></Rest>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion(111), ReadSettings::default());
        let mut r = Rest::create(ElementType::Rest);
        r.cr.ticks = Fraction::new(3, 4);
        read_rest(&mut r, &mut xml, &mut ctx);
        assert_eq!(r.cr.duration_type.kind, DurationType::Measure);
        assert_eq!(r.cr.ticks, Fraction::new(3, 4));
    }

    #[test]
    fn test_chord_line_path() {
        let src = r#"<ChordLine><subtype>fall</subtype><Path>
            <Element type="0" x="0" y="0"/>
            <Element type="2" x="1" y="1"/>
            <Element type="3" x="2" y="2"/>
            <Element type="3" x="3" y="3"/>
            <Element type="1" x="4" y="4"/>
        </Path><offset x="5" y="5"/></ChordLine>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion(302), ReadSettings::default());
        let mut l = ChordLine::create(ElementType::ChordLine);
        read_chord_line(&mut l, &mut xml, &mut ctx);
        assert_eq!(l.chord_line_type, ChordLineType::Fall);
        assert!(l.modified);
        assert_eq!(l.path.len(), 3);
        assert_eq!(
            l.path[1],
            PathElement::CubicTo(PointF::new(1.0, 1.0), PointF::new(2.0, 2.0), PointF::new(3.0, 3.0))
        );
        assert_eq!(l.item.offset, PointF::default());
    }

    fn read_articulation_src(src: &str, app: &str) -> Articulation {
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default()).with_app_version(AppVersion::parse(app));
        let mut a = Articulation::create(ElementType::Articulation);
        read_articulation(&mut a, &mut xml, &mut ctx);
        a
    }

    #[test]
    fn test_articulation_symbol_fallbacks() {
        let a = read_articulation_src("<Articulation><subtype>articulationStaccatoAbove</subtype></Articulation>", "4.0");
        assert_eq!(a.sym, SymId::ArticulationStaccatoAbove);
        let a = read_articulation_src("<Articulation><subtype>sforzato</subtype></Articulation>", "3.0");
        assert_eq!(a.sym, SymId::ArticulationAccentAbove);
        let a = read_articulation_src("<Articulation><subtype>ornamentMordentInverted</subtype></Articulation>", "4.0");
        assert_eq!(a.sym, SymId::OrnamentMordent);
        let a = read_articulation_src("<Articulation><subtype>ornamentMordent</subtype></Articulation>", "3.5");
        assert_eq!(a.sym, SymId::OrnamentShortTrill);
        let a = read_articulation_src("<Articulation><subtype>ornamentMordent</subtype></Articulation>", "");
        assert_eq!(a.sym, SymId::OrnamentMordent);
        let a = read_articulation_src("<Articulation><subtype>tap</subtype></Articulation>", "");
        assert_eq!(a.text_type, ArticulationTextType::Tap);
    }

    #[test]
    fn test_breath_obsolete_subtype() {
        let doc = Document::parse("<Breath><subtype>3</subtype><pause>1.5</pause></Breath>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut b = Breath::create(ElementType::Breath);
        read_breath(&mut b, &mut xml, &mut ctx);
        assert_eq!(b.sym, SymId::Caesura);
        assert_eq!(b.pause, 1.5);
    }
}
