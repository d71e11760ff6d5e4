//! Route an element to its decoder

use crate::error::ReadError;
use crate::model::element::{Element, ElementType};
use crate::xml::XmlReader;

use super::beam::{read_beam, read_tuplet};
use super::boxes::{read_box, read_layout_break, read_tbox};
use super::chord::{
    read_accidental, read_arpeggio, read_articulation, read_bend, read_breath, read_chord, read_chord_line,
    read_fermata, read_note, read_note_dot, read_rest, read_stem, read_tremolo, read_tremolo_bar,
};
use super::context::ReadContext;
use super::harmony::{read_fret_diagram, read_harmony};
use super::item::read_item;
use super::line::{read_glissando, read_gradual_tempo_change, read_hairpin, read_text_line};
use super::signature::{read_clef, read_key_sig, read_time_sig};
use super::staff::{
    read_ambitus, read_bagpipe_embellishment, read_bar_line, read_bracket, read_staff_state, read_staff_type_change,
};
use super::symbol::{read_action_icon, read_fsymbol, read_image, read_symbol, read_system_divider};
use super::text::{
    read_dynamic, read_figured_bass, read_instrument_change, read_jump, read_lyrics, read_marker,
    read_play_tech_annotation, read_staff_text, read_tempo_text, read_text,
};

/// Decode the element under the cursor into `element`.
///
/// Every kind that can appear on its own in a score has a decoder. Kinds that
/// only exist inside their owner (see [`ElementType::is_owned_part`]) are an
/// error here; the measure walker reports them as unknown before they get this far.
pub fn read_element(element: &mut Element, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> Result<(), ReadError> {
    match element {
        Element::Text(t)
        | Element::Sticking(t)
        | Element::RehearsalMark(t)
        | Element::MeasureNumber(t)
        | Element::MMRestRange(t)
        | Element::Fingering(t) => read_text(t, xml, ctx),
        Element::TempoText(t) => read_tempo_text(t, xml, ctx),
        Element::StaffText(t) | Element::SystemText(t) => read_staff_text(t, xml, ctx),
        Element::PlayTechAnnotation(a) => read_play_tech_annotation(a, xml, ctx),
        Element::InstrumentChange(ic) => read_instrument_change(ic, xml, ctx),
        Element::Dynamic(d) => read_dynamic(d, xml, ctx),
        Element::Harmony(h) => read_harmony(h, xml, ctx),
        Element::FiguredBass(fb) => read_figured_bass(fb, xml, ctx),
        Element::Marker(m) => read_marker(m, xml, ctx),
        Element::Jump(j) => read_jump(j, xml, ctx),
        Element::Lyrics(l) => read_lyrics(l, xml, ctx),

        Element::Symbol(s) | Element::Hook(s) => read_symbol(s, xml, ctx),
        Element::FSymbol(s) => read_fsymbol(s, xml, ctx),
        Element::Image(i) => read_image(i, xml, ctx),
        Element::SystemDivider(d) => read_system_divider(d, xml, ctx),
        Element::ActionIcon(i) => read_action_icon(i, xml, ctx),

        Element::Chord(c) => read_chord(c, xml, ctx),
        Element::Rest(r) => read_rest(r, xml, ctx),
        Element::Note(n) => read_note(n, xml, ctx, None),
        Element::NoteDot(d) => read_note_dot(d, xml, ctx),
        Element::Accidental(a) => read_accidental(a, xml, ctx),
        Element::Stem(s) => read_stem(s, xml, ctx),
        Element::StemSlash(s) => read_item(&mut s.item, xml, ctx),
        Element::Arpeggio(a) => read_arpeggio(a, xml, ctx),
        Element::Tremolo(t) => read_tremolo(t, xml, ctx),
        Element::ChordLine(l) => read_chord_line(l, xml, ctx),
        Element::Articulation(a) => read_articulation(a, xml, ctx),
        Element::Fermata(f) => read_fermata(f, xml, ctx),
        Element::Breath(b) => read_breath(b, xml, ctx),
        Element::Bend(b) => read_bend(b, xml, ctx),
        Element::TremoloBar(t) => read_tremolo_bar(t, xml, ctx),

        Element::Beam(b) => read_beam(b, xml, ctx),
        Element::Tuplet(t) => read_tuplet(t, xml, ctx),

        Element::Hairpin(h) => read_hairpin(h, xml, ctx),
        Element::Glissando(g) => read_glissando(g, xml, ctx),
        Element::GradualTempoChange(c) => read_gradual_tempo_change(c, xml, ctx),
        Element::TextLine(t) => read_text_line(t, xml, ctx),
        Element::LineSegment(_) => return Err(ReadError::NoDecoder(ElementType::LineSegment)),

        Element::FretDiagram(d) => read_fret_diagram(d, xml, ctx),
        Element::KeySig(k) => read_key_sig(k, xml, ctx),
        Element::TimeSig(t) => read_time_sig(t, xml, ctx),
        Element::Clef(c) => read_clef(c, xml, ctx),
        Element::StaffState(s) => read_staff_state(s, xml, ctx),
        Element::Ambitus(a) => read_ambitus(a, xml, ctx),
        Element::BarLine(b) => read_bar_line(b, xml, ctx),
        Element::Bracket(b) => read_bracket(b, xml, ctx),
        Element::BagpipeEmbellishment(b) => read_bagpipe_embellishment(b, xml, ctx),
        Element::StaffTypeChange(s) => read_staff_type_change(s, xml, ctx),

        Element::LayoutBreak(lb) => read_layout_break(lb, xml, ctx),
        Element::HBox(b) | Element::VBox(b) | Element::FBox(b) => read_box(b, xml, ctx),
        Element::TBox(b) => read_tbox(b, xml, ctx),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::score::MscVersion;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    #[test]
    fn test_dispatch_by_variant() {
        let doc = Document::parse("<Dynamic><subtype>ff</subtype><velocity>112</velocity></Dynamic>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut el = Element::create(ElementType::Dynamic).unwrap();
        read_element(&mut el, &mut xml, &mut ctx).unwrap();
        match el {
            Element::Dynamic(d) => assert_eq!(d.velocity, 112),
            other => panic!("unexpected {:?}", other.element_type()),
        }
        assert!(xml.is_exhausted());
    }

    #[test]
    fn test_line_segment_has_no_decoder() {
        let doc = Document::parse("<LineSegment/>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut el = Element::create(ElementType::LineSegment).unwrap();
        let err = read_element(&mut el, &mut xml, &mut ctx).unwrap_err();
        assert!(matches!(err, ReadError::NoDecoder(ElementType::LineSegment)));
    }
}
