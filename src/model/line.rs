//! Lines and other spanners

use crate::model::element::{Element, ItemBase};
use crate::model::property::Pid;
use crate::model::text::DynamicRange;
use crate::model::types::{checked_sub, Color, Fraction, PointF};
use serde::{Deserialize, Serialize};

/// Endpoints of a spanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpannerData {
    /// Start tick; `None` until known
    pub tick: Option<Fraction>,
    /// Length from the start tick
    pub ticks: Fraction,
    /// Track of the end point; `None` means the start track
    pub track2: Option<i32>,
    /// Id used by older files to pair start and end
    pub legacy_id: Option<i32>,
    /// The end point has been set
    pub resolved: bool,
}

impl Default for SpannerData {
    fn default() -> Self {
        SpannerData {
            tick: None,
            ticks: Fraction::from_integer(0),
            track2: None,
            legacy_id: None,
            resolved: false,
        }
    }
}

impl SpannerData {
    pub fn tick2(&self) -> Option<Fraction> {
        self.tick.map(|t| t + self.ticks)
    }

    /// Close the spanner at an absolute tick
    pub fn set_end(&mut self, tick2: Fraction, track2: i32) {
        let start = *self.tick.get_or_insert(tick2);
        self.ticks = if tick2 > start {
            checked_sub(tick2, start).unwrap_or_else(|| Fraction::from_integer(0))
        } else {
            Fraction::from_integer(0)
        };
        self.track2 = Some(track2);
        self.resolved = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineAnchor {
    #[default]
    Segment,
    Measure,
    Chord,
    Note,
}

impl LineAnchor {
    pub fn from_int(v: i32) -> Self {
        match v {
            0 => LineAnchor::Segment,
            1 => LineAnchor::Measure,
            2 => LineAnchor::Chord,
            3 => LineAnchor::Note,
            _ => LineAnchor::Segment,
        }
    }
}

/// Laid-out piece of a line, one per system; only user adjustments are stored
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSegment {
    pub item: ItemBase,
    pub segment_type: i32,
    /// Adjustment of the end point
    pub off2: PointF,
}

impl_item!(LineSegment, item);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SLine {
    pub item: ItemBase,
    pub spanner: SpannerData,
    pub segments: Vec<LineSegment>,
    pub diagonal: bool,
    pub anchor: LineAnchor,
    pub len: f64,
    pub dash_line_len: f64,
    pub dash_gap_len: f64,
    pub line_color: Color,
}

impl Default for SLine {
    fn default() -> Self {
        SLine {
            item: ItemBase::default(),
            spanner: SpannerData::default(),
            segments: Vec::new(),
            diagonal: false,
            anchor: LineAnchor::Segment,
            len: 0.0,
            dash_line_len: 5.0,
            dash_gap_len: 5.0,
            line_color: Color::BLACK,
        }
    }
}

impl_item!(SLine, item);

impl SLine {
    pub fn line_width(&self) -> Option<f64> {
        self.item.props.get(Pid::LineWidth).and_then(|v| v.as_real())
    }
}

/// Line with begin, continue and end texts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextLineBase {
    pub line: SLine,
}

impl_item!(TextLineBase, line.item);

impl TextLineBase {
    pub fn begin_text(&self) -> &str {
        self.line.item.props.get(Pid::BeginText).and_then(|v| v.as_str()).unwrap_or("")
    }

    pub fn end_text(&self) -> &str {
        self.line.item.props.get(Pid::EndText).and_then(|v| v.as_str()).unwrap_or("")
    }
}

#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum HairpinType {
    Invalid = -1,
    #[default]
    CrescHairpin = 0,
    DecrescHairpin = 1,
    CrescLine = 2,
    DecrescLine = 3,
}

impl HairpinType {
    pub fn from_int(v: i32) -> Self {
        match v {
            0 => HairpinType::CrescHairpin,
            1 => HairpinType::DecrescHairpin,
            2 => HairpinType::CrescLine,
            3 => HairpinType::DecrescLine,
            _ => HairpinType::Invalid,
        }
    }

    pub fn is_line(self) -> bool {
        matches!(self, HairpinType::CrescLine | HairpinType::DecrescLine)
    }
}

/// Velocity interpolation curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChangeMethod {
    #[default]
    Normal,
    EaseIn,
    EaseOut,
    EaseInOut,
    Exponential,
}

impl ChangeMethod {
    pub fn from_xml(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "normal" | "0" => ChangeMethod::Normal,
            "ease-in" | "1" => ChangeMethod::EaseIn,
            "ease-out" | "2" => ChangeMethod::EaseOut,
            "ease-in-out" | "3" => ChangeMethod::EaseInOut,
            "exponential" | "4" => ChangeMethod::Exponential,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hairpin {
    pub base: TextLineBase,
    pub hairpin_type: HairpinType,
    pub circled_tip: bool,
    /// Velocity change over the length; 0 means derived from the dynamics
    pub velo_change: i32,
    pub dyn_range: DynamicRange,
    pub single_note_dynamics: bool,
    pub velo_change_method: ChangeMethod,
}

impl Default for Hairpin {
    fn default() -> Self {
        Hairpin {
            base: TextLineBase::default(),
            hairpin_type: HairpinType::CrescHairpin,
            circled_tip: false,
            velo_change: 0,
            dyn_range: DynamicRange::Part,
            single_note_dynamics: true,
            velo_change_method: ChangeMethod::Normal,
        }
    }
}

impl_item!(Hairpin, base.line.item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GlissandoType {
    #[default]
    Straight,
    Wavy,
}

impl GlissandoType {
    pub fn from_xml(s: &str) -> Self {
        match s.trim() {
            "1" | "wavy" => GlissandoType::Wavy,
            _ => GlissandoType::Straight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glissando {
    pub line: SLine,
    pub gliss_type: GlissandoType,
    pub show_text: bool,
    pub ease_in: i32,
    pub ease_out: i32,
    pub play: bool,
}

impl Default for Glissando {
    fn default() -> Self {
        Glissando {
            line: SLine::default(),
            gliss_type: GlissandoType::Straight,
            show_text: true,
            ease_in: 0,
            ease_out: 0,
            play: true,
        }
    }
}

impl_item!(Glissando, line.item);

impl Glissando {
    pub fn text(&self) -> &str {
        self.line.item.props.get(Pid::GlissText).and_then(|v| v.as_str()).unwrap_or("gliss.")
    }
}

/// Accelerando, ritardando and similar
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GradualTempoChange {
    pub base: TextLineBase,
}

impl_item!(GradualTempoChange, base.line.item);

impl GradualTempoChange {
    pub fn tempo_change_factor(&self) -> Option<f64> {
        self.base.line.item.props.get(Pid::TempoChangeFactor).and_then(|v| v.as_real())
    }
}

impl Element {
    /// The line body of spanner elements
    pub fn line(&self) -> Option<&SLine> {
        match self {
            Element::Hairpin(h) => Some(&h.base.line),
            Element::Glissando(g) => Some(&g.line),
            Element::GradualTempoChange(c) => Some(&c.base.line),
            Element::TextLine(t) => Some(&t.line),
            _ => None,
        }
    }

    pub fn line_mut(&mut self) -> Option<&mut SLine> {
        match self {
            Element::Hairpin(h) => Some(&mut h.base.line),
            Element::Glissando(g) => Some(&mut g.line),
            Element::GradualTempoChange(c) => Some(&mut c.base.line),
            Element::TextLine(t) => Some(&mut t.line),
            _ => None,
        }
    }

    pub fn spanner(&self) -> Option<&SpannerData> {
        self.line().map(|l| &l.spanner)
    }

    pub fn spanner_mut(&mut self) -> Option<&mut SpannerData> {
        self.line_mut().map(|l| &mut l.spanner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_end_computes_length() {
        let mut s = SpannerData {
            tick: Some(Fraction::new(1, 4)),
            ..Default::default()
        };
        s.set_end(Fraction::new(5, 4), 4);
        assert!(s.resolved);
        assert_eq!(s.ticks, Fraction::from_integer(1));
        assert_eq!(s.tick2(), Some(Fraction::new(5, 4)));
        assert_eq!(s.track2, Some(4));
    }

    #[test]
    fn test_hairpin_type_ints() {
        assert_eq!(HairpinType::from_int(1), HairpinType::DecrescHairpin);
        assert_eq!(HairpinType::from_int(9), HairpinType::Invalid);
        assert!(HairpinType::CrescLine.is_line());
    }
}
