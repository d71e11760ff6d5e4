//! Measures and frames

use crate::model::element::{Element, ElementType, ItemBase};
use crate::model::property::Pid;
use crate::model::text::TextBase;
use crate::model::types::Fraction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutBreakType {
    Page,
    Line,
    Section,
    NoBreak,
}

impl LayoutBreakType {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "page" => Some(LayoutBreakType::Page),
            "line" => Some(LayoutBreakType::Line),
            "section" => Some(LayoutBreakType::Section),
            "nobreak" => Some(LayoutBreakType::NoBreak),
            _ => None,
        }
    }
}

/// Line, page or section break; all state lives in the property map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutBreak {
    pub item: ItemBase,
}

impl_item!(LayoutBreak, item);

impl LayoutBreak {
    pub fn break_type(&self) -> Option<LayoutBreakType> {
        self.item
            .props
            .get(Pid::LayoutBreak)
            .and_then(|v| v.as_str())
            .and_then(LayoutBreakType::from_xml)
    }

    /// Pause in seconds after a section break
    pub fn pause(&self) -> f64 {
        self.item.props.get(Pid::Pause).and_then(|v| v.as_real()).unwrap_or(0.0)
    }

    pub fn start_with_long_names(&self) -> bool {
        self.flag(Pid::StartWithLongNames)
    }

    pub fn start_with_measure_one(&self) -> bool {
        self.flag(Pid::StartWithMeasureOne)
    }

    pub fn first_system_indentation(&self) -> bool {
        self.flag(Pid::FirstSystemIndentation)
    }

    fn flag(&self, pid: Pid) -> bool {
        self.item.props.get(pid).and_then(|v| v.as_bool()).unwrap_or(true)
    }
}

/// State shared by measures and frames
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasureBase {
    pub item: ItemBase,
    /// Layout breaks, staff type changes and frame content
    pub el: Vec<Element>,
}

impl MeasureBase {
    pub fn layout_break(&self, ty: LayoutBreakType) -> Option<&LayoutBreak> {
        self.el.iter().find_map(|e| match e {
            Element::LayoutBreak(lb) if lb.break_type() == Some(ty) => Some(lb.as_ref()),
            _ => None,
        })
    }

    /// Add a break unless one of the same kind exists; returns whether it was added
    pub fn add_layout_break(&mut self, lb: LayoutBreak) -> bool {
        if let Some(ty) = lb.break_type() {
            if self.layout_break(ty).is_some() {
                return false;
            }
        }
        self.el.push(Element::LayoutBreak(Box::new(lb)));
        true
    }

    pub fn layout_breaks(&self) -> impl Iterator<Item = &LayoutBreak> {
        self.el.iter().filter_map(|e| match e {
            Element::LayoutBreak(lb) => Some(lb.as_ref()),
            _ => None,
        })
    }
}

/// Horizontal, vertical or fretboard frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxElement {
    pub base: MeasureBase,
    /// Spatium units
    pub box_height: f64,
    pub box_width: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub auto_size: bool,
}

impl Default for BoxElement {
    fn default() -> Self {
        BoxElement {
            base: MeasureBase::default(),
            box_height: 0.0,
            box_width: 0.0,
            left_margin: 0.0,
            right_margin: 0.0,
            top_margin: 0.0,
            bottom_margin: 0.0,
            auto_size: true,
        }
    }
}

impl_item!(BoxElement, base.item);

impl BoxElement {
    pub fn top_gap(&self) -> Option<f64> {
        self.base.item.props.get(Pid::TopGap).and_then(|v| v.as_real())
    }

    pub fn bottom_gap(&self) -> Option<f64> {
        self.base.item.props.get(Pid::BottomGap).and_then(|v| v.as_real())
    }

    pub fn is_tbox(&self) -> bool {
        self.base.item.element_type == ElementType::TBox
    }
}

/// Text frame; owns exactly one text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TBox {
    pub frame: BoxElement,
    pub text: TextBase,
}

impl_item!(TBox, frame.base.item);

/// Element placed in a measure at a tick and track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureElement {
    pub tick: Fraction,
    pub track: i32,
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub base: MeasureBase,
    /// Start tick
    pub tick: Fraction,
    /// Actual length
    pub len: Fraction,
    /// Nominal length from the time signature
    pub timesig: Fraction,
    pub repeat_start: bool,
    pub repeat_end: bool,
    pub repeat_count: i32,
    pub irregular: bool,
    pub elements: Vec<MeasureElement>,
}

impl Default for Measure {
    fn default() -> Self {
        Measure {
            base: MeasureBase::default(),
            tick: Fraction::from_integer(0),
            len: Fraction::from_integer(1),
            timesig: Fraction::from_integer(1),
            repeat_start: false,
            repeat_end: false,
            repeat_count: 2,
            irregular: false,
            elements: Vec::new(),
        }
    }
}

impl Measure {
    pub fn elements_of(&self, ty: ElementType) -> impl Iterator<Item = &MeasureElement> {
        self.elements.iter().filter(move |e| e.element.element_type() == ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::EngravingItem;
    use crate::model::property::PropertyValue;

    fn line_break() -> LayoutBreak {
        let mut lb = LayoutBreak::create(ElementType::LayoutBreak);
        lb.item.props.set(Pid::LayoutBreak, PropertyValue::String("line".into()));
        lb
    }

    #[test]
    fn test_one_break_per_kind() {
        let mut mb = MeasureBase::default();
        assert!(mb.add_layout_break(line_break()));
        assert!(!mb.add_layout_break(line_break()));
        let mut page = LayoutBreak::create(ElementType::LayoutBreak);
        page.item.props.set(Pid::LayoutBreak, PropertyValue::String("page".into()));
        assert!(mb.add_layout_break(page));
        assert_eq!(mb.layout_breaks().count(), 2);
    }

    #[test]
    fn test_break_defaults() {
        let lb = line_break();
        assert_eq!(lb.break_type(), Some(LayoutBreakType::Line));
        assert_eq!(lb.pause(), 0.0);
        assert!(lb.start_with_long_names());
    }
}
