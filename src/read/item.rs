//! Tags every element understands

use crate::model::element::ItemBase;
use crate::model::property::{Pid, PropertyValue};
use crate::xml::XmlReader;

use super::context::ReadContext;
use super::property::read_property;

/// Last step of every fallback chain; returns false for tags it does not know
pub fn read_item_properties(item: &mut ItemBase, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> bool {
    match xml.name() {
        "track" => item.track = xml.read_int().saturating_add(ctx.settings().track_offset),
        "visible" => item.visible = xml.read_bool(),
        "color" => item.color = xml.read_color(),
        "offset" => {
            let offset = xml.read_point().scaled(ctx.spatium());
            item.offset = offset;
            item.props.set(Pid::Offset, PropertyValue::Point(offset));
        }
        "autoplace" => item.autoplace = xml.read_bool(),
        "eid" => item.eid = Some(xml.read_text()),
        "placement" => read_property(item, xml, ctx, Pid::Placement),
        "minDistance" => read_property(item, xml, ctx, Pid::MinDistance),
        "z" => read_property(item, xml, ctx, Pid::Z),
        // Excerpt links are rebuilt when parts are generated
        "linked" | "linkedMain" | "lid" => xml.skip_current_element(),
        _ => return false,
    }
    true
}

/// Decoder for elements that have nothing beyond the item base
pub fn read_item(item: &mut ItemBase, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        if !read_item_properties(item, xml, ctx) {
            xml.unknown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::ElementType;
    use crate::model::score::MscVersion;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    #[test]
    fn test_track_offset_applies_to_explicit_track() {
        let doc = Document::parse("<NoteDot><track>5</track><visible>0</visible><bogus/></NoteDot>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let settings = ReadSettings {
            track_offset: 4,
            ..Default::default()
        };
        let mut ctx = ReadContext::new(MscVersion::CURRENT, settings);
        let mut item = ItemBase::new(ElementType::NoteDot);
        read_item(&mut item, &mut xml, &mut ctx);
        assert_eq!(item.track, 9);
        assert!(!item.visible);
        assert_eq!(xml.skipped_elements().len(), 1);
        assert!(xml.is_exhausted());
    }
}
