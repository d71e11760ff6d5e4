//! Frames and the properties measures share with them

use crate::model::element::{Element, ElementType, EngravingItem};
use crate::model::harmony::FretDiagram;
use crate::model::measure::{BoxElement, LayoutBreak, MeasureBase, TBox};
use crate::model::property::{Pid, PropertyFlags, PropertyValue};
use crate::model::staff::StaffTypeChange;
use crate::model::symbol::{Image, Symbol};
use crate::model::text::TextBase;
use crate::xml::XmlReader;

use super::compat;
use super::context::ReadContext;
use super::harmony::read_fret_diagram;
use super::item::read_item_properties;
use super::property::read_property;
use super::staff::read_staff_type_change;
use super::symbol::{read_image, read_symbol};
use super::text::read_text;

// ============================================================================
// Layout breaks
// ============================================================================

pub fn read_layout_break(lb: &mut LayoutBreak, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "subtype" => read_property(&mut lb.item, xml, ctx, Pid::LayoutBreak),
            "pause" => read_property(&mut lb.item, xml, ctx, Pid::Pause),
            "startWithLongNames" => read_property(&mut lb.item, xml, ctx, Pid::StartWithLongNames),
            "startWithMeasureOne" => read_property(&mut lb.item, xml, ctx, Pid::StartWithMeasureOne),
            // Files before 4.0 misspell the tag
            "firstSystemIndentation" | "firstSystemIdentation" => {
                read_property(&mut lb.item, xml, ctx, Pid::FirstSystemIndentation)
            }
            _ => {
                if !read_item_properties(&mut lb.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    let track = lb.item.track;
    ctx.notify_layout(ElementType::LayoutBreak, track);
}

/// Layout breaks and staff type changes, then the item base
pub fn read_measure_base_properties(b: &mut MeasureBase, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> bool {
    match xml.name() {
        "LayoutBreak" => {
            let mut lb = LayoutBreak::create(ElementType::LayoutBreak);
            read_layout_break(&mut lb, xml, ctx);
            if !b.add_layout_break(lb) {
                log::debug!("duplicate layout break dropped");
            }
        }
        "StaffTypeChange" => {
            let mut stc = StaffTypeChange::create(ElementType::StaffTypeChange);
            stc.item.track = ctx.track();
            read_staff_type_change(&mut stc, xml, ctx);
            b.el.push(Element::StaffTypeChange(Box::new(stc)));
        }
        _ => return read_item_properties(&mut b.item, xml, ctx),
    }
    true
}

// ============================================================================
// Frames
// ============================================================================

fn read_gap(b: &mut BoxElement, xml: &mut XmlReader<'_, '_>, ctx: &ReadContext, pid: Pid) {
    let mut gap = xml.read_double();
    if !compat::gaps_are_absolute(ctx.version()) {
        gap *= ctx.spatium();
    }
    b.base.item.props.set(pid, PropertyValue::Millimetre(gap));
    b.base.item.set_property_flags(pid, PropertyFlags::Unstyled);
}

fn read_nested_box(element_type: ElementType, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> BoxElement {
    let mut nested = BoxElement::create(element_type);
    read_box(&mut nested, xml, ctx);
    nested
}

pub fn read_box_properties(b: &mut BoxElement, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> bool {
    match xml.name() {
        "height" => b.box_height = xml.read_double(),
        "width" => b.box_width = xml.read_double(),
        "topGap" => read_gap(b, xml, ctx, Pid::TopGap),
        "bottomGap" => read_gap(b, xml, ctx, Pid::BottomGap),
        "leftMargin" => b.left_margin = xml.read_double(),
        "rightMargin" => b.right_margin = xml.read_double(),
        "topMargin" => b.top_margin = xml.read_double(),
        "bottomMargin" => b.bottom_margin = xml.read_double(),
        "boxAutoSize" => b.auto_size = xml.read_bool(),
        "Text" => {
            let mut t = TextBase::create(ElementType::Text);
            read_text(&mut t, xml, ctx);
            if t.is_empty() {
                log::debug!("empty text in {} dropped", b.base.item.element_type.name());
            } else {
                b.base.el.push(Element::Text(Box::new(t)));
            }
        }
        "Symbol" => {
            let mut s = Symbol::create(ElementType::Symbol);
            read_symbol(&mut s, xml, ctx);
            b.base.el.push(Element::Symbol(Box::new(s)));
        }
        "Image" => {
            if ctx.settings().no_images {
                xml.skip_current_element();
            } else {
                let mut image = Image::create(ElementType::Image);
                image.base.item.track = ctx.track();
                read_image(&mut image, xml, ctx);
                b.base.el.push(Element::Image(Box::new(image)));
            }
        }
        "FretDiagram" => {
            let mut fd = FretDiagram::create(ElementType::FretDiagram);
            read_fret_diagram(&mut fd, xml, ctx);
            b.base.el.push(Element::FretDiagram(Box::new(fd)));
        }
        "HBox" => {
            let nested = read_nested_box(ElementType::HBox, xml, ctx);
            b.base.el.push(Element::HBox(Box::new(nested)));
        }
        "VBox" => {
            let nested = read_nested_box(ElementType::VBox, xml, ctx);
            b.base.el.push(Element::VBox(Box::new(nested)));
        }
        _ => return read_measure_base_properties(&mut b.base, xml, ctx),
    }
    true
}

/// Decoder for HBox, VBox and FBox
pub fn read_box(b: &mut BoxElement, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        if !read_box_properties(b, xml, ctx) {
            xml.unknown();
        }
    }
    if compat::box_auto_size_off(ctx.version()) {
        b.auto_size = false;
    }
}

pub fn read_tbox(b: &mut TBox, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        if xml.name() == "Text" {
            read_text(&mut b.text, xml, ctx);
        } else if !read_box_properties(&mut b.frame, xml, ctx) {
            xml.unknown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::measure::LayoutBreakType;
    use crate::model::score::MscVersion;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    fn read_vbox(src: &str, version: MscVersion) -> (BoxElement, ReadContext) {
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(version, ReadSettings::default());
        let mut b = BoxElement::create(ElementType::VBox);
        read_box(&mut b, &mut xml, &mut ctx);
        assert!(xml.is_exhausted());
        (b, ctx)
    }

    #[test]
    fn test_text_frames_keep_only_non_empty_text() {
        let src = r#"<VBox>
            <height>10</height>
            <Text><style>title</style><text>Sonata</text></Text>
            <Text><style>subtitle</style></Text>
            <LayoutBreak><subtype>page</subtype></LayoutBreak>
            <LayoutBreak><subtype>page</subtype></LayoutBreak>
            <HBox><width>5</width></HBox>
        </VBox>"#;
        let (b, _) = read_vbox(src, MscVersion::CURRENT);
        assert_eq!(b.box_height, 10.0);
        assert!(b.auto_size);
        let texts = b.base.el.iter().filter(|e| e.element_type() == ElementType::Text).count();
        assert_eq!(texts, 1);
        assert_eq!(b.base.layout_breaks().count(), 1);
        assert!(b.base.layout_break(LayoutBreakType::Page).is_some());
        assert!(b.base.el.iter().any(|e| matches!(e, Element::HBox(h) if h.box_width == 5.0)));
    }

    #[test]
    fn test_old_frames_disable_auto_size() {
        let (b, _) = read_vbox("<VBox><boxAutoSize>1</boxAutoSize></VBox>", MscVersion(301));
        assert!(!b.auto_size);
    }

    #[test]
    fn test_misspelled_indentation_tag() {
        let src = "<LayoutBreak><subtype>line</subtype><firstSystemIdentation>0</firstSystemIdentation></LayoutBreak>";
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion(302), ReadSettings::default());
        let mut lb = LayoutBreak::create(ElementType::LayoutBreak);
        read_layout_break(&mut lb, &mut xml, &mut ctx);
        assert_eq!(lb.break_type(), Some(LayoutBreakType::Line));
        assert!(!lb.first_system_indentation());
        assert!(xml.skipped_elements().is_empty());
    }

    #[test]
    fn test_tbox_owns_its_text() {
        let doc = Document::parse("<TBox><Text><text>Notes</text></Text><topMargin>2</topMargin></TBox>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut b = TBox::create(ElementType::TBox);
        read_tbox(&mut b, &mut xml, &mut ctx);
        assert_eq!(b.text.xml_text, "Notes");
        assert_eq!(b.frame.top_margin, 2.0);
        assert!(b.frame.base.el.is_empty());
    }
}
