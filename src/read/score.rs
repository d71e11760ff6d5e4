//! Whole-document reading
//!
//! Walks `<museScore>` from the top: version header, style sheet, parts and
//! then the per-staff measure lists. Measures of the first staff create the
//! measure list; later staves add their elements to the measure at the same
//! position. While walking, the context tracks the current tick and track so
//! element decoders and spanner references see the right position.

use crate::error::ReadError;
use crate::model::chord::ChordRest;
use crate::model::element::{Element, ElementType, EngravingItem};
use crate::model::measure::{Measure, MeasureElement};
use crate::model::property::{PropertyType, PropertyValue};
use crate::model::score::{AppVersion, Audio, MscVersion, MeasureNode, Part, Score, Staff};
use crate::model::signature::ClefType;
use crate::model::staff::{Bracket, BracketType};
use crate::model::style::{Sid, Style};
use crate::model::types::{checked_mul, fraction_from_ticks, DurationType, Fraction, DPMM, VOICES};
use crate::settings::ReadSettings;
use crate::xml::{parse_fraction, SkippedElement, XmlReader};
use roxmltree::Document;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::boxes::read_measure_base_properties;
use super::context::{LayoutNotify, ReadContext, StaffInfo};
use super::dispatch::read_element;
use super::property::read_property_value;
use super::spanner::{read_end_spanner, read_line_body, read_location, read_spanner};
use super::staff::{read_audio, read_instrument};

/// Everything a read produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadResult {
    pub score: Score,
    /// Elements the reader did not understand, in document order
    pub skipped_elements: Vec<SkippedElement>,
    /// Ids of legacy spanners whose end was never found; they are not in the score
    pub unresolved_spanners: Vec<i32>,
}

impl ReadResult {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn read_score(text: &str) -> Result<ReadResult, ReadError> {
    read_document(text, ReadSettings::default(), None)
}

pub fn read_score_with_settings(text: &str, settings: ReadSettings) -> Result<ReadResult, ReadError> {
    read_document(text, settings, None)
}

/// Read with an observer that is told about elements that affect layout
pub fn read_score_with_layout_notify(
    text: &str,
    settings: ReadSettings,
    observer: Box<dyn LayoutNotify>,
) -> Result<ReadResult, ReadError> {
    read_document(text, settings, Some(observer))
}

pub fn read_score_file(path: impl AsRef<Path>) -> Result<ReadResult, ReadError> {
    let path = path.as_ref();
    log::debug!("reading {}", path.display());
    let text = std::fs::read_to_string(path)?;
    read_score(&text)
}

fn read_document(
    text: &str,
    settings: ReadSettings,
    observer: Option<Box<dyn LayoutNotify>>,
) -> Result<ReadResult, ReadError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    let root_name = root.tag_name().name();
    if root_name != "museScore" {
        return Err(ReadError::NotAScore(root_name.to_string()));
    }

    let version_text = root.attribute("version").unwrap_or_default();
    let version = MscVersion::parse(version_text).unwrap_or_else(|| {
        log::warn!("unreadable version {:?}, assuming {}", version_text, MscVersion::CURRENT);
        MscVersion::CURRENT
    });
    log::debug!("score version {}", version);

    let mut xml = XmlReader::new(&doc);
    let mut app_version = AppVersion::default();
    let mut program_revision = String::new();
    let mut result: Option<(Score, Vec<i32>)> = None;
    let mut observer = observer;

    while xml.read_next_start_element() {
        match xml.name() {
            "programVersion" => app_version = AppVersion::parse(&xml.read_text()),
            "programRevision" => program_revision = xml.read_text(),
            "Score" if result.is_none() => {
                let mut ctx = ReadContext::new(version, settings.clone()).with_app_version(app_version);
                if let Some(observer) = observer.take() {
                    ctx.set_layout_notify(observer);
                }
                let mut score = Score {
                    msc_version: version,
                    app_version,
                    program_revision: program_revision.clone(),
                    ..Score::default()
                };
                read_score_content(&mut score, &mut xml, &mut ctx)?;
                let unresolved = ctx.drain_unresolved_spanners();
                score.spanners = ctx.take_spanners();
                result = Some((score, unresolved));
            }
            // Excerpts repeat the score structure; only the main score is read
            "Score" | "Revision" | "LastEID" => xml.skip_current_element(),
            _ => xml.unknown(),
        }
    }

    let (score, unresolved_spanners) = result.ok_or_else(|| ReadError::MissingElement("Score".to_string()))?;
    Ok(ReadResult {
        score,
        skipped_elements: xml.take_skipped_elements(),
        unresolved_spanners,
    })
}

// ============================================================================
// Score header
// ============================================================================

fn value_type(value: &PropertyValue) -> PropertyType {
    match value {
        PropertyValue::Bool(_) => PropertyType::Bool,
        PropertyValue::Int(_) => PropertyType::Int,
        PropertyValue::Real(_) => PropertyType::Real,
        PropertyValue::Spatium(_) => PropertyType::Spatium,
        PropertyValue::Millimetre(_) => PropertyType::Millimetre,
        PropertyValue::Point(_) => PropertyType::Point,
        PropertyValue::Size(_) => PropertyType::Size,
        PropertyValue::String(_) => PropertyType::String,
        PropertyValue::Color(_) => PropertyType::Color,
        PropertyValue::Direction(_) => PropertyType::Direction,
        PropertyValue::DirectionH(_) => PropertyType::DirectionH,
        PropertyValue::Placement(_) => PropertyType::Placement,
        PropertyValue::Align(_) => PropertyType::Align,
        PropertyValue::LineType(_) => PropertyType::LineType,
    }
}

/// `<Style>`: entries the reader has defaults for; the rest is ignored
fn read_style(style: &mut Style, xml: &mut XmlReader<'_, '_>, ctx: &ReadContext) {
    while xml.read_next_start_element() {
        let Some(sid) = Sid::from_name(xml.name()) else {
            xml.skip_current_element();
            continue;
        };
        match sid {
            // Written in millimetres
            Sid::Spatium => style.set_spatium(xml.read_double() * DPMM),
            _ => match value_type(&style.value(sid)) {
                // Style sheet positions stay in spatium units
                PropertyType::Point => style.set(sid, PropertyValue::Point(xml.read_point())),
                ty => {
                    if let Some(value) = read_property_value(xml, ctx, ty) {
                        style.set(sid, value);
                    }
                }
            },
        }
    }
}

fn read_staff_type(staff: &mut Staff, xml: &mut XmlReader<'_, '_>) {
    while xml.read_next_start_element() {
        match xml.name() {
            "lines" => staff.lines = xml.read_int(),
            "small" => staff.small = xml.read_bool(),
            "invisible" => staff.invisible = xml.read_bool(),
            _ => xml.skip_current_element(),
        }
    }
}

/// Staff definition inside `<Part>`
fn read_staff_definition(staff: &mut Staff, xml: &mut XmlReader<'_, '_>) {
    while xml.read_next_start_element() {
        match xml.name() {
            "StaffType" => read_staff_type(staff, xml),
            "bracket" => {
                let bracket_type = xml
                    .attribute("type")
                    .and_then(BracketType::from_xml)
                    .unwrap_or(BracketType::Normal);
                let column = xml.int_attribute("col", 0);
                xml.skip_current_element();
                let mut bracket = Bracket::create(ElementType::Bracket);
                bracket.bracket_type = bracket_type;
                bracket.column = column;
                staff.brackets.push(bracket);
            }
            "defaultClef" | "defaultConcertClef" => {
                let text = xml.read_text();
                staff.default_clef = ClefType::from_xml(&text);
            }
            "small" => staff.small = xml.read_bool(),
            "invisible" => staff.invisible = xml.read_bool(),
            "linkedTo" | "color" | "barLineSpan" | "barLineSpanFrom" | "barLineSpanTo" | "hideWhenEmpty"
            | "cutaway" | "showIfSystemEmpty" | "hideSystemBarLine" | "mergeMatchingRests" | "defaultTransposingClef"
            | "userDist" | "distOffset" | "isLinked" => xml.skip_current_element(),
            _ => xml.unknown(),
        }
    }
}

fn read_part(score: &mut Score, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    let part_idx = score.parts.len();
    let mut part = Part {
        id: xml.attribute_or_empty("id"),
        ..Part::default()
    };
    while xml.read_next_start_element() {
        match xml.name() {
            "Staff" => {
                let mut staff = Staff {
                    id: xml.int_attribute("id", score.staves.len() as i32 + 1),
                    part: part_idx,
                    ..Staff::default()
                };
                read_staff_definition(&mut staff, xml);
                part.staves.push(score.staves.len());
                score.staves.push(staff);
            }
            "trackName" | "name" => part.name = xml.read_text(),
            "show" => part.show = xml.read_bool(),
            "Instrument" => read_instrument(&mut part.instrument, xml, ctx),
            "color" | "preferSharpFlat" | "soloist" => xml.skip_current_element(),
            _ => xml.unknown(),
        }
    }
    score.parts.push(part);
    ctx.set_staves(staff_infos(score));
}

fn staff_infos(score: &Score) -> Vec<StaffInfo> {
    score
        .staves
        .iter()
        .map(|staff| match score.parts.get(staff.part) {
            Some(part) => StaffInfo {
                part_first_staff: part.staves.first().copied().unwrap_or(0),
                part_nstaves: part.staves.len(),
                transpose: part.instrument.transpose,
            },
            None => StaffInfo::default(),
        })
        .collect()
}

fn read_score_content(score: &mut Score, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> Result<(), ReadError> {
    while xml.read_next_start_element() {
        match xml.name() {
            "Style" => {
                let mut style = ctx.style().clone();
                read_style(&mut style, xml, ctx);
                ctx.set_style(style.clone());
                score.style = style;
            }
            "Spatium" => {
                let mut style = ctx.style().clone();
                style.set_spatium(xml.read_double() * DPMM);
                ctx.set_style(style.clone());
                score.style = style;
            }
            "metaTag" => {
                let name = xml.attribute_or_empty("name");
                let value = xml.read_text();
                score.meta_tags.insert(name, value);
            }
            "Audio" => {
                let mut audio = Audio::default();
                read_audio(&mut audio, xml);
                score.audio = Some(audio);
            }
            "Part" => read_part(score, xml, ctx),
            "Staff" => {
                let staff_idx = xml.int_attribute("id", 1).saturating_sub(1).max(0);
                if staff_idx.checked_mul(VOICES as i32).is_none() {
                    log::warn!("staff id {} out of range, staff skipped", staff_idx + 1);
                    xml.skip_current_element();
                    continue;
                }
                read_staff_content(score, staff_idx, xml, ctx)?;
            }
            "Division" => {
                let division = xml.read_int();
                if division != 480 {
                    log::warn!("unexpected division {}, ticks are read as 480 per quarter", division);
                }
            }
            // Editor and view state
            "Synthesizer" | "Order" | "SystemObjects" | "showInvisible" | "showUnprintable" | "showFrames"
            | "showMargins" | "open" | "markIrregularMeasures" | "layoutMode" | "LayerTag" | "currentLayer"
            | "PageList" | "name" | "isOpen" | "excerpt" | "Excerpt" => xml.skip_current_element(),
            _ => xml.unknown(),
        }
    }
    Ok(())
}

// ============================================================================
// Measures
// ============================================================================

/// Position of the `n`th measure (frames excluded) in the measure list
fn measure_position(score: &Score, n: usize) -> Option<usize> {
    score
        .measures
        .iter()
        .enumerate()
        .filter(|(_, node)| matches!(node, MeasureNode::Measure(_)))
        .nth(n)
        .map(|(pos, _)| pos)
}

fn read_staff_content(
    score: &mut Score,
    staff_idx: i32,
    xml: &mut XmlReader<'_, '_>,
    ctx: &mut ReadContext,
) -> Result<(), ReadError> {
    ctx.set_tick(Fraction::from_integer(0));
    ctx.set_time_sig(Fraction::new(4, 4));
    ctx.set_track(staff_idx * VOICES as i32);
    let first_staff = staff_idx == 0;
    let mut measure_no = 0;

    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "Measure" => {
                let pos = match measure_position(score, measure_no) {
                    Some(pos) => pos,
                    None => {
                        let measure = Measure {
                            tick: ctx.tick(),
                            ..Measure::default()
                        };
                        score.measures.push(MeasureNode::Measure(Box::new(measure)));
                        score.measures.len() - 1
                    }
                };
                if let Some(MeasureNode::Measure(measure)) = score.measures.get_mut(pos) {
                    read_measure(measure, staff_idx, xml, ctx)?;
                    ctx.set_tick(measure.tick);
                    ctx.inc_tick(measure.len);
                }
                measure_no += 1;
            }
            "HBox" | "VBox" | "TBox" | "FBox" if first_staff => {
                let element_type = ElementType::from_name(tag).unwrap_or(ElementType::VBox);
                match Element::create(element_type) {
                    Some(mut frame) => {
                        frame.set_track(ctx.track());
                        read_element(&mut frame, xml, ctx)?;
                        score.measures.push(MeasureNode::Frame(frame));
                    }
                    None => xml.unknown(),
                }
            }
            "HBox" | "VBox" | "TBox" | "FBox" => {
                log::debug!("frame outside the first staff ignored");
                xml.skip_current_element();
            }
            _ => xml.unknown(),
        }
    }
    Ok(())
}

/// Measure length and repeat flags written as attributes by older files
fn read_measure_attributes(m: &mut Measure, xml: &XmlReader<'_, '_>, ctx: &ReadContext, first_staff: bool) {
    if first_staff {
        m.tick = ctx.tick();
        m.timesig = ctx.time_sig();
        m.len = match xml.attribute("len").and_then(parse_fraction) {
            Some(len) => {
                m.irregular = true;
                len
            }
            None => ctx.time_sig(),
        };
    }
    if let Some(count) = xml.attribute("endRepeat").and_then(|v| v.trim().parse().ok()) {
        m.repeat_end = true;
        m.repeat_count = count;
    }
    if xml.has_attribute("startRepeat") {
        m.repeat_start = true;
    }
}

fn read_measure(m: &mut Measure, staff_idx: i32, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> Result<(), ReadError> {
    read_measure_attributes(m, xml, ctx, staff_idx == 0);
    ctx.set_measure_len(m.len);
    let first_track = staff_idx * VOICES as i32;
    ctx.set_tick(m.tick);
    ctx.set_track(first_track);

    let mut tuplets: BTreeMap<i32, Fraction> = BTreeMap::new();
    let mut voice = 0;
    while xml.read_next_start_element() {
        match xml.name() {
            "voice" => {
                ctx.set_tick(m.tick);
                ctx.set_track(first_track.saturating_add(voice));
                while xml.read_next_start_element() {
                    if !read_voice_element(m, &mut tuplets, xml, ctx)? {
                        xml.unknown();
                    }
                }
                voice += 1;
            }
            "startRepeat" => {
                m.repeat_start = true;
                xml.skip_current_element();
            }
            "endRepeat" => {
                m.repeat_end = true;
                m.repeat_count = xml.read_int();
            }
            "irregular" => {
                m.irregular = true;
                xml.skip_current_element();
            }
            "LayoutBreak" | "StaffTypeChange" => {
                read_measure_base_properties(&mut m.base, xml, ctx);
            }
            "breakMultiMeasureRest" | "stretch" | "noOffset" | "measureNumberMode" | "vspacerUp" | "vspacerDown"
            | "vspacerFixed" | "MeasureNumber" | "MMRestRange" | "visible" | "slashStyle" => xml.skip_current_element(),
            // Files without voice blocks put elements straight into the measure
            _ => {
                if !read_voice_element(m, &mut tuplets, xml, ctx)? {
                    xml.unknown();
                }
            }
        }
    }
    Ok(())
}

/// Actual length of a chord or rest
fn chord_rest_ticks(cr: &ChordRest, tuplets: &BTreeMap<i32, Fraction>, ctx: &ReadContext) -> Fraction {
    let ticks = if cr.duration_type.kind == DurationType::Measure {
        ctx.measure_len()
    } else {
        cr.ticks
    };
    match cr.tuplet.and_then(|id| tuplets.get(&id)) {
        Some(ratio) => checked_mul(ticks, ratio.recip()).unwrap_or_else(|| {
            log::warn!("{} scaled by tuplet {} overflows, unscaled length used", ticks, ratio);
            ticks
        }),
        None => ticks,
    }
}

/// Record an element at the current position and advance past chords and rests
fn place_element(m: &mut Measure, element: Element, tuplets: &BTreeMap<i32, Fraction>, ctx: &mut ReadContext) {
    let advance = match &element {
        Element::Chord(c) if !c.is_grace() => Some(chord_rest_ticks(&c.cr, tuplets, ctx)),
        Element::Rest(r) => Some(chord_rest_ticks(&r.cr, tuplets, ctx)),
        _ => None,
    };
    m.elements.push(MeasureElement {
        tick: ctx.tick(),
        track: element.track(),
        element,
    });
    if let Some(ticks) = advance {
        ctx.inc_tick(ticks);
    }
}

/// One element of a voice; `false` when the tag is not a score element
fn read_voice_element(
    m: &mut Measure,
    tuplets: &mut BTreeMap<i32, Fraction>,
    xml: &mut XmlReader<'_, '_>,
    ctx: &mut ReadContext,
) -> Result<bool, ReadError> {
    let tag = xml.name();
    match tag {
        // Absolute position in files before 3.0
        "tick" => ctx.set_tick(fraction_from_ticks(xml.read_int())),
        "location" => {
            let loc = read_location(xml);
            match loc.frac(ctx.measure_len()) {
                Some(by) => ctx.inc_tick(by),
                None => log::warn!("location {} measures ahead overflows, position kept", loc.measures),
            }
        }
        "Spanner" => read_spanner(xml, ctx),
        "endSpanner" => read_end_spanner(xml, ctx),
        "Image" if ctx.settings().no_images => xml.skip_current_element(),
        _ => {
            let Some(element_type) = ElementType::from_name(tag) else {
                return Ok(false);
            };
            // Kinds that only exist inside their owner are reported as unknown
            if element_type.is_owned_part() {
                return Ok(false);
            }
            let Some(mut element) = Element::create(element_type) else {
                return Ok(false);
            };
            element.set_track(ctx.track());
            // Whole rests of old files compare their length against the bar
            if let Element::Rest(r) = &mut element {
                r.cr.ticks = ctx.measure_len();
            }
            if element_type.is_spanner() {
                read_line_body(&mut element, xml, ctx);
                ctx.add_spanner(element);
                return Ok(true);
            }
            read_element(&mut element, xml, ctx)?;
            match &element {
                Element::Tuplet(t) => {
                    tuplets.insert(t.id, t.ratio());
                }
                Element::TimeSig(ts) if ctx.tick() == m.tick => {
                    let sig = ts.sig();
                    ctx.set_time_sig(sig);
                    m.timesig = sig;
                    if !m.irregular {
                        m.len = sig;
                        ctx.set_measure_len(sig);
                    }
                }
                _ => {}
            }
            place_element(m, element, tuplets, ctx);
        }
    }
    Ok(true)
}
