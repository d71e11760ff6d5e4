//! Symbols, images and icons

use crate::model::element::{Element, ElementType, EngravingItem};
use crate::model::property::Pid;
use crate::model::style::Sid;
use crate::model::sym::SymId;
use crate::model::symbol::{ActionIcon, ActionIconType, BSymbol, DividerType, FSymbol, Image, Symbol, SystemDivider};
use crate::xml::XmlReader;

use super::compat;
use super::context::ReadContext;
use super::item::read_item_properties;
use super::property::read_property_tag;

/// Nested image unless images are suppressed
fn read_child_image(xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext, track: i32) -> Option<Element> {
    if ctx.settings().no_images {
        xml.skip_current_element();
        return None;
    }
    let mut image = Image::create(ElementType::Image);
    image.base.item.track = track;
    read_image(&mut image, xml, ctx);
    Some(Element::Image(Box::new(image)))
}

pub fn read_bsymbol_properties(base: &mut BSymbol, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) -> bool {
    if read_item_properties(&mut base.item, xml, ctx) {
        return true;
    }
    let track = base.item.track;
    match xml.name() {
        "systemFlag" => base.system_flag = xml.read_bool(),
        "Symbol" => {
            let mut s = Symbol::create(ElementType::Symbol);
            s.base.item.track = track;
            read_symbol(&mut s, xml, ctx);
            base.children.push(Element::Symbol(Box::new(s)));
        }
        "FSymbol" => {
            let mut s = FSymbol::create(ElementType::FSymbol);
            s.base.item.track = track;
            read_fsymbol(&mut s, xml, ctx);
            base.children.push(Element::FSymbol(Box::new(s)));
        }
        "Image" => {
            if let Some(image) = read_child_image(xml, ctx, track) {
                base.children.push(image);
            }
        }
        _ => return false,
    }
    true
}

pub fn read_symbol(s: &mut Symbol, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "name" => {
                let name = xml.read_text();
                let mut sym = SymId::from_name(&name);
                if sym == SymId::NoSym && name.trim() != "noSym" {
                    sym = SymId::from_user_name(&name);
                    if sym == SymId::NoSym {
                        log::debug!("unknown symbol {:?}", name);
                    }
                }
                s.sym = sym;
            }
            "font" => {
                let font = xml.read_text();
                ctx.register_font(font.trim());
                s.font = Some(font.trim().to_string());
            }
            "small" | "subtype" => xml.skip_current_element(),
            _ => {
                if !read_bsymbol_properties(&mut s.base, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_fsymbol(s: &mut FSymbol, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "font" => s.font_family = xml.read_text(),
            "fontsize" => s.font_size = xml.read_double(),
            "code" => s.code = xml.read_int(),
            _ => {
                if !read_bsymbol_properties(&mut s.base, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

pub fn read_image(image: &mut Image, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    if compat::uses_1x_encoding(ctx.version()) {
        image.size_is_spatium = false;
    }
    while xml.read_next_start_element() {
        let tag = xml.name();
        if read_property_tag(&mut image.base.item, tag, xml, ctx, Pid::Autoscale)
            || read_property_tag(&mut image.base.item, tag, xml, ctx, Pid::Size)
            || read_property_tag(&mut image.base.item, tag, xml, ctx, Pid::LockAspectRatio)
        {
            continue;
        }
        match tag {
            "sizeIsSpatium" => image.size_is_spatium = xml.read_bool(),
            "path" => image.store_path = xml.read_text(),
            "linkPath" => image.link_path = xml.read_text(),
            "subtype" => xml.skip_current_element(),
            _ => {
                if !read_bsymbol_properties(&mut image.base, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
    let track = image.item().track;
    ctx.notify_layout(ElementType::Image, track);
}

pub fn read_system_divider(d: &mut SystemDivider, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    let (divider_type, sid) = match xml.attribute("type") {
        Some("left") => (DividerType::Left, Sid::DividerLeftSym),
        _ => (DividerType::Right, Sid::DividerRightSym),
    };
    d.divider_type = divider_type;
    d.symbol.sym = SymId::from_name(&ctx.style().style_st(sid));
    read_symbol(&mut d.symbol, xml, ctx);
}

pub fn read_action_icon(icon: &mut ActionIcon, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "action" => icon.action = xml.read_text(),
            "subtype" => icon.action_type = ActionIconType::from_int(xml.read_int()),
            _ => {
                if !read_item_properties(&mut icon.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::score::MscVersion;
    use crate::settings::ReadSettings;
    use roxmltree::Document;

    #[test]
    fn test_symbol_name_fallbacks() {
        let src = r#"<Symbol>
            <name>Caesura</name>
            <font>Bravura</font>
            <Symbol><name>noSym</name></Symbol>
            <small>1</small>
        </Symbol>"#;
        let doc = Document::parse(src).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut s = Symbol::create(ElementType::Symbol);
        read_symbol(&mut s, &mut xml, &mut ctx);
        assert_eq!(s.sym, SymId::Caesura);
        assert_eq!(s.font.as_deref(), Some("Bravura"));
        assert!(ctx.fonts().contains("Bravura"));
        assert_eq!(s.base.children.len(), 1);
        assert!(xml.skipped_elements().is_empty());
    }

    #[test]
    fn test_old_images_use_absolute_size() {
        let doc = Document::parse(r#"<Image><path>logo.png</path><size w="10" h="5"/></Image>"#).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion(114), ReadSettings::default());
        let mut image = Image::create(ElementType::Image);
        read_image(&mut image, &mut xml, &mut ctx);
        assert!(!image.size_is_spatium);
        assert_eq!(image.store_path, "logo.png");
        assert_eq!(image.size().width, 10.0);
    }

    #[test]
    fn test_divider_symbol_from_style() {
        let doc = Document::parse(r#"<SystemDivider type="left"><track>0</track></SystemDivider>"#).unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        let mut d = SystemDivider::create(ElementType::SystemDivider);
        read_system_divider(&mut d, &mut xml, &mut ctx);
        assert_eq!(d.divider_type, DividerType::Left);
        assert_eq!(d.symbol.sym, SymId::SystemDivider);
    }
}
