//! Beams and tuplets

use crate::model::beam::{Beam, BeamFragment, Tuplet};
use crate::model::element::{ElementType, EngravingItem};
use crate::model::property::{Pid, PropertyFlags};
use crate::model::text::{TextBase, TextStyleType};
use crate::model::types::{DirectionV, DurationType, TDuration};
use crate::xml::XmlReader;

use super::compat;
use super::context::ReadContext;
use super::item::read_item_properties;
use super::property::{read_property, read_styled_property};
use super::text::read_text;

pub fn read_beam(b: &mut Beam, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    if compat::spanners_paired_by_id(ctx.version()) {
        b.id = Some(xml.int_attribute("id", 0));
    }
    while xml.read_next_start_element() {
        let tag = xml.name();
        match tag {
            "StemDirection" => read_property(&mut b.item, xml, ctx, Pid::StemDirection),
            "distribute" => xml.skip_current_element(),
            "growLeft" => b.grow_left = xml.read_double(),
            "growRight" => b.grow_right = xml.read_double(),
            "Fragment" => {
                let direction = b.item.props.get(Pid::StemDirection).and_then(|v| v.as_direction());
                let idx = match direction.unwrap_or_default() {
                    DirectionV::Auto | DirectionV::Down => 0,
                    DirectionV::Up => 1,
                };
                b.user_modified[idx] = true;
                let spatium = ctx.spatium();
                let mut f = BeamFragment::default();
                while xml.read_next_start_element() {
                    match xml.name() {
                        "y1" => f.py1[idx] = xml.read_double() * spatium,
                        "y2" => f.py2[idx] = xml.read_double() * spatium,
                        _ => xml.unknown(),
                    }
                }
                b.fragments.push(f);
            }
            // Obsolete geometry
            "l1" | "l2" | "subtype" | "y1" | "y2" => xml.skip_current_element(),
            _ => {
                if !read_styled_property(&mut b.item, tag, xml, ctx) && !read_item_properties(&mut b.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

// ============================================================================
// Tuplets
// ============================================================================

const NUMBER_FONT_PIDS: [Pid; 4] = [Pid::FontFace, Pid::FontSize, Pid::FontStyle, Pid::Align];

fn read_tuplet_number(t: &mut Tuplet, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    let mut number = TextBase::create(ElementType::Text);
    number.text_style = Some(TextStyleType::Tuplet);
    read_text(&mut number, xml, ctx);
    number.item.visible = t.item.visible;
    number.item.track = t.item.track;
    for pid in NUMBER_FONT_PIDS {
        t.item.set_property_flags(pid, number.item.props.flags(pid));
    }
    t.number = Some(number);
}

/// Font toggles apply to the number when it was read already
fn set_number_style(t: &mut Tuplet, on: bool, apply: fn(&mut TextBase, bool)) {
    if let Some(number) = t.number.as_mut() {
        apply(number, on);
    }
    if t.item.is_styled(Pid::FontStyle) {
        t.item.set_property_flags(Pid::FontStyle, PropertyFlags::Unstyled);
    }
}

pub fn read_tuplet(t: &mut Tuplet, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    t.id = xml.int_attribute("id", 0);
    let mut base_len = TDuration::invalid();
    while xml.read_next_start_element() {
        let tag = xml.name();
        if read_styled_property(&mut t.item, tag, xml, ctx) {
            continue;
        }
        match tag {
            "bold" => set_number_style(t, xml.read_bool(), TextBase::set_bold),
            "italic" => set_number_style(t, xml.read_bool(), TextBase::set_italic),
            "underline" => set_number_style(t, xml.read_bool(), TextBase::set_underline),
            "strike" => set_number_style(t, xml.read_bool(), TextBase::set_strike),
            "normalNotes" => t.denominator = xml.read_int(),
            "actualNotes" => t.numerator = xml.read_int(),
            "p1" => t.p1 = xml.read_point().scaled(ctx.spatium()),
            "p2" => t.p2 = xml.read_point().scaled(ctx.spatium()),
            "baseNote" => {
                let text = xml.read_text();
                base_len.kind = DurationType::from_xml(&text).unwrap_or(DurationType::Invalid);
            }
            "baseDots" => base_len.dots = xml.read_int(),
            "Number" => read_tuplet_number(t, xml, ctx),
            "Tuplet" => t.tuplet = Some(xml.read_int()),
            _ => {
                if !read_item_properties(&mut t.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    t.base_len = base_len;
    t.compute_ticks();
}
