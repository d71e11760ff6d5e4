//! Property read engine
//!
//! Maps a tag onto a typed property slot. Values read here are explicit, so a
//! slot that followed the style sheet becomes an override.

use crate::model::element::ItemBase;
use crate::model::property::{Pid, PropertyType, PropertyValue};
use crate::model::style::styled_properties;
use crate::model::types::{Align, DirectionH, DirectionV, LineType, Placement};
use crate::xml::XmlReader;

use super::context::ReadContext;

/// Decode the current element as a value of `ty`; consumes the element either way
pub fn read_property_value(xml: &mut XmlReader<'_, '_>, ctx: &ReadContext, ty: PropertyType) -> Option<PropertyValue> {
    use PropertyValue as V;
    let value = match ty {
        PropertyType::Bool => V::Bool(xml.read_bool()),
        PropertyType::Int => V::Int(xml.read_int()),
        PropertyType::Real => V::Real(xml.read_double()),
        PropertyType::Spatium => V::Spatium(xml.read_double()),
        PropertyType::Millimetre => V::Millimetre(xml.read_double() * ctx.spatium()),
        PropertyType::Point => V::Point(xml.read_point().scaled(ctx.spatium())),
        PropertyType::Size => V::Size(xml.read_size()),
        PropertyType::String => V::String(xml.read_text()),
        PropertyType::Color => V::Color(xml.read_color()),
        PropertyType::Direction => V::Direction(parse_enum(xml, DirectionV::from_xml)?),
        PropertyType::DirectionH => V::DirectionH(parse_enum(xml, DirectionH::from_xml)?),
        PropertyType::Placement => V::Placement(parse_enum(xml, Placement::from_xml)?),
        PropertyType::Align => V::Align(parse_enum(xml, Align::from_xml)?),
        PropertyType::LineType => V::LineType(parse_enum(xml, LineType::from_xml)?),
    };
    Some(value)
}

fn parse_enum<T>(xml: &mut XmlReader<'_, '_>, parse: fn(&str) -> Option<T>) -> Option<T> {
    let text = xml.read_text();
    let value = parse(&text);
    if value.is_none() {
        log::debug!("unrecognized property value {:?}", text);
    }
    value
}

/// Read the current element into `pid`
pub fn read_property(item: &mut ItemBase, xml: &mut XmlReader<'_, '_>, ctx: &ReadContext, pid: Pid) {
    if let Some(value) = read_property_value(xml, ctx, pid.property_type()) {
        item.props.set(pid, value);
    }
}

/// Read into `pid` if `tag` is the tag the property is written under
pub fn read_property_tag(
    item: &mut ItemBase,
    tag: &str,
    xml: &mut XmlReader<'_, '_>,
    ctx: &ReadContext,
    pid: Pid,
) -> bool {
    if tag != pid.tag() {
        return false;
    }
    read_property(item, xml, ctx, pid);
    true
}

/// Try every styled slot of the item's kind, matching on the slot's tag
pub fn read_styled_property(item: &mut ItemBase, tag: &str, xml: &mut XmlReader<'_, '_>, ctx: &ReadContext) -> bool {
    let slots = styled_properties(item.element_type);
    match slots.iter().find(|(pid, _)| pid.tag() == tag) {
        Some((pid, _)) => {
            read_property(item, xml, ctx, *pid);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::ElementType;
    use crate::model::property::PropertyFlags;
    use crate::model::score::MscVersion;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    fn with_reader(src: &str, f: impl FnOnce(&mut XmlReader<'_, '_>)) {
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        assert!(xml.read_next_start_element());
        f(&mut xml);
    }

    #[test]
    fn test_styled_lookup_marks_override() {
        let ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut item = ItemBase::new(ElementType::Hairpin);
        with_reader("<HairPin><hairpinHeight>2.5</hairpinHeight></HairPin>", |xml| {
            let tag = xml.name();
            assert!(read_styled_property(&mut item, tag, xml, &ctx));
        });
        assert_eq!(item.props.get(Pid::HairpinHeight), Some(&PropertyValue::Spatium(2.5)));
        assert_eq!(item.props.flags(Pid::HairpinHeight), PropertyFlags::Unstyled);
    }

    #[test]
    fn test_millimetre_scales_by_spatium() {
        let ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut item = ItemBase::new(ElementType::Stem);
        with_reader("<Stem><userLen>2</userLen></Stem>", |xml| {
            assert!(read_property_tag(&mut item, "userLen", xml, &ctx, Pid::UserLen));
        });
        let len = item.props.get(Pid::UserLen).and_then(|v| v.as_real()).unwrap();
        assert!((len - 2.0 * ctx.spatium()).abs() < 1e-9);
    }

    #[test]
    fn test_tag_mismatch_leaves_cursor() {
        let ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut item = ItemBase::new(ElementType::Stem);
        with_reader("<Stem><foo>1</foo></Stem>", |xml| {
            assert!(!read_property_tag(&mut item, "foo", xml, &ctx, Pid::UserLen));
            assert_eq!(xml.name(), "foo");
        });
    }
}
