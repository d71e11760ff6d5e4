//! Lines: hairpins, glissandi, tempo changes and text lines

use crate::model::element::{ElementType, EngravingItem};
use crate::model::line::{
    ChangeMethod, Glissando, GlissandoType, GradualTempoChange, Hairpin, HairpinType, LineAnchor, LineSegment, SLine,
    TextLineBase,
};
use crate::model::property::{Pid, PropertyFlags, PropertyValue};
use crate::model::text::DynamicRange;
use crate::model::types::fraction_from_ticks;
use crate::xml::XmlReader;

use super::compat;
use super::context::ReadContext;
use super::item::read_item_properties;
use super::property::{read_property, read_property_tag, read_styled_property};

/// Older files pair a line with its `endSpanner` through an id attribute
pub fn read_legacy_id(line: &mut SLine, xml: &XmlReader<'_, '_>, ctx: &ReadContext) {
    if compat::spanners_paired_by_id(ctx.version()) {
        line.spanner.legacy_id = xml.attribute("id").and_then(|v| v.trim().parse().ok());
    }
}

fn read_line_segment(s: &mut LineSegment, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "subtype" => s.segment_type = xml.read_int(),
            "off2" => s.off2 = xml.read_point().scaled(ctx.spatium()),
            _ => {
                if !read_item_properties(&mut s.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_sline_properties(l: &mut SLine, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> bool {
    let tag = xml.name();
    match tag {
        "tick2" => {
            let start = *l.spanner.tick.get_or_insert(ctx.tick());
            let tick2 = fraction_from_ticks(xml.read_int());
            l.spanner.ticks = tick2 - start;
        }
        "tick" => l.spanner.tick = Some(fraction_from_ticks(xml.read_int())),
        "ticks" => l.spanner.ticks = fraction_from_ticks(xml.read_int()),
        "ticks_f" if ctx.paste_mode() => l.spanner.ticks = xml.read_fraction(),
        "Segment" => {
            let mut s = LineSegment::create(ElementType::LineSegment);
            s.item.track = l.item.track;
            read_line_segment(&mut s, xml, ctx);
            s.item.visible = l.item.visible;
            l.segments.push(s);
        }
        "length" => l.len = xml.read_double(),
        "diagonal" => l.diagonal = xml.read_bool(),
        "anchor" => l.anchor = LineAnchor::from_int(xml.read_int()),
        "lineWidth" => {
            let width = xml.read_double() * ctx.spatium();
            l.item.props.set(Pid::LineWidth, PropertyValue::Millimetre(width));
        }
        "dashLineLength" => l.dash_line_len = xml.read_double(),
        "dashGapLength" => l.dash_gap_len = xml.read_double(),
        "lineColor" | "color" => l.line_color = xml.read_color(),
        _ => {
            return read_property_tag(&mut l.item, tag, xml, ctx, Pid::LineStyle)
                || read_item_properties(&mut l.item, xml, ctx);
        }
    }
    true
}

const TEXT_LINE_PIDS: &[Pid] = &[
    Pid::LineVisible,
    Pid::BeginHookType,
    Pid::BeginHookHeight,
    Pid::EndHookType,
    Pid::EndHookHeight,
    Pid::GapBetweenTextAndLine,
    Pid::BeginText,
    Pid::BeginTextPlace,
    Pid::BeginFontFace,
    Pid::BeginFontSize,
    Pid::BeginFontStyle,
    Pid::BeginTextOffset,
    Pid::ContinueText,
    Pid::ContinueTextPlace,
    Pid::EndText,
    Pid::EndTextPlace,
];

pub fn read_text_line_base_properties(b: &mut TextLineBase, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> bool {
    let tag = xml.name();
    for &pid in TEXT_LINE_PIDS {
        if read_property_tag(&mut b.line.item, tag, xml, ctx, pid) {
            b.line.item.set_property_flags(pid, PropertyFlags::Unstyled);
            return true;
        }
    }
    read_sline_properties(&mut b.line, xml, ctx)
}

pub fn read_text_line(b: &mut TextLineBase, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    read_legacy_id(&mut b.line, xml, ctx);
    while xml.read_next_start_element() {
        let tag = xml.name();
        if !read_styled_property(&mut b.line.item, tag, xml, ctx) && !read_text_line_base_properties(b, xml, ctx) {
            xml.unknown();
        }
    }
}

// ============================================================================
// Hairpins
// ============================================================================

pub fn read_hairpin(h: &mut Hairpin, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    h.base.line.segments.clear();
    read_legacy_id(&mut h.base.line, xml, ctx);
    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "subtype" => h.hairpin_type = HairpinType::from_int(xml.read_int()),
            "hairpinCircledTip" => h.circled_tip = xml.read_bool(),
            "veloChange" => h.velo_change = xml.read_int(),
            "dynType" => h.dyn_range = DynamicRange::from_xml(&xml.read_text()).unwrap_or(DynamicRange::Staff),
            // Obsolete: the line variants replaced the flag
            "useTextLine" => {
                xml.skip_current_element();
                h.hairpin_type = match h.hairpin_type {
                    HairpinType::CrescHairpin => HairpinType::CrescLine,
                    HairpinType::DecrescHairpin => HairpinType::DecrescLine,
                    other => other,
                };
            }
            "singleNoteDynamics" => h.single_note_dynamics = xml.read_bool(),
            "veloChangeMethod" => {
                h.velo_change_method = ChangeMethod::from_xml(&xml.read_text()).unwrap_or_default();
            }
            _ => {
                if !read_styled_property(&mut h.base.line.item, tag, xml, ctx)
                    && !read_text_line_base_properties(&mut h.base, xml, ctx)
                {
                    xml.unknown();
                }
            }
        }
    }
    let track = h.item().track;
    ctx.notify_layout(ElementType::Hairpin, track);
}

// ============================================================================
// Glissandi and tempo changes
// ============================================================================

pub fn read_glissando(g: &mut Glissando, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    g.line.segments.clear();
    read_legacy_id(&mut g.line, xml, ctx);
    g.show_text = false;
    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "text" => {
                g.show_text = true;
                read_property(&mut g.line.item, xml, ctx, Pid::GlissText);
            }
            "subtype" => g.gliss_type = GlissandoType::from_xml(&xml.read_text()),
            "glissandoStyle" => read_property(&mut g.line.item, xml, ctx, Pid::GlissStyle),
            "easeInSpin" => g.ease_in = xml.read_int(),
            "easeOutSpin" => g.ease_out = xml.read_int(),
            "play" => g.play = xml.read_bool(),
            _ => {
                if !read_styled_property(&mut g.line.item, tag, xml, ctx) && !read_sline_properties(&mut g.line, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_gradual_tempo_change(c: &mut GradualTempoChange, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    read_legacy_id(&mut c.base.line, xml, ctx);
    while xml.read_next_start_element() {
        let tag = xml.name();
        let item = &mut c.base.line.item;
        if read_property_tag(item, tag, xml, ctx, Pid::LineWidth) {
            item.set_property_flags(Pid::LineWidth, PropertyFlags::Unstyled);
            continue;
        }
        if read_property_tag(item, tag, xml, ctx, Pid::TempoChangeType)
            || read_property_tag(item, tag, xml, ctx, Pid::TempoEasingMethod)
            || read_property_tag(item, tag, xml, ctx, Pid::TempoChangeFactor)
        {
            continue;
        }
        if !read_text_line_base_properties(&mut c.base, xml, ctx) {
            xml.unknown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::score::MscVersion;
    use crate::model::types::Fraction;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    #[test]
    fn test_hairpin_text_line_remap() {
        let src = r#"<HairPin>
            <subtype>1</subtype>
            <useTextLine>1</useTextLine>
            <dynType>bogus</dynType>
            <beginText>dim.</beginText>
            <ticks>960</ticks>
            <Segment><subtype>0</subtype><off2 x="1" y="0"/></Segment>
        </HairPin>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut h = Hairpin::create(ElementType::Hairpin);
        read_hairpin(&mut h, &mut xml, &mut ctx);
        assert_eq!(h.hairpin_type, HairpinType::DecrescLine);
        assert_eq!(h.dyn_range, DynamicRange::Staff);
        assert_eq!(h.base.begin_text(), "dim.");
        assert!(!h.base.line.item.is_styled(Pid::BeginText));
        assert_eq!(h.base.line.spanner.ticks, Fraction::new(1, 2));
        assert_eq!(h.base.line.segments.len(), 1);
        assert!(xml.is_exhausted());
    }

    #[test]
    fn test_legacy_id_only_for_old_files() {
        let src = r#"<Glissando id="4"><subtype>wavy</subtype></Glissando>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion(206), ReadSettings::default());
        let mut g = Glissando::create(ElementType::Glissando);
        read_glissando(&mut g, &mut xml, &mut ctx);
        assert_eq!(g.line.spanner.legacy_id, Some(4));
        assert_eq!(g.gliss_type, GlissandoType::Wavy);
        assert!(!g.show_text);

        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut g = Glissando::create(ElementType::Glissando);
        read_glissando(&mut g, &mut xml, &mut ctx);
        assert_eq!(g.line.spanner.legacy_id, None);
    }

    #[test]
    fn test_tempo_change_line_width_unstyled() {
        let src = r#"<GradualTempoChange>
            <lineWidth>0.2</lineWidth>
            <tempoChangeType>rallentando</tempoChangeType>
            <tempoChangeFactor>0.75</tempoChangeFactor>
        </GradualTempoChange>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut c = GradualTempoChange::create(ElementType::GradualTempoChange);
        read_gradual_tempo_change(&mut c, &mut xml, &mut ctx);
        assert!(!c.base.line.item.is_styled(Pid::LineWidth));
        assert_eq!(c.tempo_change_factor(), Some(0.75));
        assert!(xml.skipped_elements().is_empty());
    }
}
