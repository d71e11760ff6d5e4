//! Spanner references and relative locations
//!
//! Current files wrap each spanner in `<Spanner type="...">` at its start
//! point; a `<next><location>` child gives the distance to the end, and the
//! matching `<Spanner>` at the end point only holds a `<prev>` marker.
//! Older files write the body inline with an `id` attribute and close it with
//! `<endSpanner id="..."/>`.

use crate::model::element::{Element, ElementType};
use crate::model::types::{checked_add, checked_mul, Fraction, VOICES};
use crate::xml::XmlReader;

use super::context::ReadContext;
use super::line::{read_glissando, read_gradual_tempo_change, read_hairpin, read_text_line};

/// Relative position as written in `<location>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub measures: i32,
    pub fractions: Fraction,
    pub staves: i32,
    pub voices: i32,
}

impl Default for Location {
    fn default() -> Self {
        Location {
            measures: 0,
            fractions: Fraction::from_integer(0),
            staves: 0,
            voices: 0,
        }
    }
}

impl Location {
    /// Distance in whole notes, counting whole measures at `measure_len`;
    /// `None` when it does not fit a fraction
    pub fn frac(&self, measure_len: Fraction) -> Option<Fraction> {
        checked_add(checked_mul(measure_len, Fraction::from_integer(self.measures))?, self.fractions)
    }

    pub fn track_offset(&self) -> i32 {
        self.staves.saturating_mul(VOICES as i32).saturating_add(self.voices)
    }
}

pub fn read_location(xml: &mut XmlReader<'_, '_>) -> Location {
    let mut loc = Location::default();
    while xml.read_next_start_element() {
        match xml.name() {
            "measures" => loc.measures = xml.read_int(),
            "fractions" => loc.fractions = xml.read_fraction(),
            "staves" => loc.staves = xml.read_int(),
            "voices" => loc.voices = xml.read_int(),
            // Grace and note indices only matter for note-anchored lines
            "grace" | "notes" => xml.skip_current_element(),
            _ => xml.unknown(),
        }
    }
    loc
}

/// `<next>` or `<prev>` wrapper around a location
fn read_link(xml: &mut XmlReader<'_, '_>) -> Option<Location> {
    let mut loc = None;
    while xml.read_next_start_element() {
        if xml.name() == "location" {
            loc = Some(read_location(xml));
        } else {
            xml.unknown();
        }
    }
    loc
}

/// Decode a line body into an element created for its kind
pub fn read_line_body(element: &mut Element, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    match element {
        Element::Hairpin(h) => read_hairpin(h, xml, ctx),
        Element::Glissando(g) => read_glissando(g, xml, ctx),
        Element::GradualTempoChange(c) => read_gradual_tempo_change(c, xml, ctx),
        Element::TextLine(t) => read_text_line(t, xml, ctx),
        other => {
            log::debug!("{} is not a line", other.element_type().name());
            xml.skip_current_element();
        }
    }
}

pub fn read_spanner(xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    let type_name = xml.attribute("type").unwrap_or_default();
    let kind = ElementType::from_name(type_name).filter(|t| t.is_spanner());
    if kind.is_none() {
        log::debug!("unsupported spanner type {:?}", type_name);
    }

    let mut body: Option<Element> = None;
    let mut next: Option<Location> = None;
    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "next" => next = read_link(xml),
            // The start point already knows where the spanner ends
            "prev" => xml.skip_current_element(),
            _ => match kind.filter(|k| ElementType::from_name(tag) == Some(*k)).and_then(Element::create) {
                Some(mut element) => {
                    element.set_track(ctx.track());
                    read_line_body(&mut element, xml, ctx);
                    body = Some(element);
                }
                None => xml.unknown(),
            },
        }
    }

    let Some(mut element) = body else {
        return;
    };
    let (tick, track, measure_len) = (ctx.tick(), ctx.track(), ctx.measure_len());
    if let (Some(loc), Some(data)) = (next, element.spanner_mut()) {
        let start = *data.tick.get_or_insert(tick);
        match loc.frac(measure_len).and_then(|len| checked_add(start, len)) {
            Some(end) => data.set_end(end, track.saturating_add(loc.track_offset())),
            None => log::warn!("spanner end at {} measures from {} overflows, left open", loc.measures, start),
        }
    }
    ctx.add_spanner(element);
}

/// `<endSpanner id="n"/>` of id-paired files
pub fn read_end_spanner(xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    let id = xml.int_attribute("id", -1);
    xml.skip_current_element();
    ctx.end_spanner(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::score::MscVersion;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    #[test]
    fn test_location_frac() {
        let loc = Location {
            measures: 2,
            fractions: Fraction::new(1, 4),
            ..Default::default()
        };
        assert_eq!(loc.frac(Fraction::new(3, 4)), Some(Fraction::new(7, 4)));
        let far = Location {
            measures: i32::MAX,
            ..Default::default()
        };
        assert_eq!(far.frac(Fraction::new(3, 4)), None);
    }

    #[test]
    fn test_modern_spanner_end_from_location() {
        let src = r#"<Chord><Spanner type="HairPin">
            <HairPin><subtype>0</subtype></HairPin>
            <next><location><measures>1</measures><fractions>1/2</fractions></location></next>
        </Spanner></Chord>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        ctx.set_tick(Fraction::new(1, 4));
        ctx.set_track(4);
        assert!(xml.read_next_start_element());
        read_spanner(&mut xml, &mut ctx);
        let spanners = ctx.take_spanners();
        assert_eq!(spanners.len(), 1);
        let data = spanners[0].spanner().unwrap();
        assert_eq!(data.tick, Some(Fraction::new(1, 4)));
        assert_eq!(data.ticks, Fraction::new(3, 2));
        assert_eq!(data.track2, Some(4));
        assert!(data.resolved);
        assert_eq!(spanners[0].track(), 4);
    }

    #[test]
    fn test_prev_marker_is_consumed() {
        let src = r#"<Chord><Spanner type="Glissando"><prev><location><fractions>-1/4</fractions></location></prev></Spanner><x/></Chord>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        assert!(xml.read_next_start_element());
        read_spanner(&mut xml, &mut ctx);
        assert!(ctx.take_spanners().is_empty());
        assert!(xml.read_next_start_element());
        assert_eq!(xml.name(), "x");
        assert!(xml.skipped_elements().is_empty());
    }

    #[test]
    fn test_end_spanner_closes_legacy_line() {
        let src = r#"<Measure><TextLine id="7"/><endSpanner id="7"/></Measure>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion(206), ReadSettings::default());
        assert!(xml.read_next_start_element());
        let mut line = Element::create(ElementType::TextLine).unwrap();
        read_line_body(&mut line, &mut xml, &mut ctx);
        ctx.add_spanner(line);
        assert!(ctx.has_pending_spanners());
        ctx.set_tick(Fraction::new(2, 1));
        assert!(xml.read_next_start_element());
        read_end_spanner(&mut xml, &mut ctx);
        assert!(!ctx.has_pending_spanners());
        assert_eq!(ctx.take_spanners()[0].spanner().unwrap().ticks, Fraction::new(2, 1));
    }
}
