//! Staff-level items: instruments, bar lines, brackets and staff state

use crate::model::chord::Accidental;
use crate::model::element::{Element, ItemBase};
use crate::model::types::{Interval, TPC_INVALID};
use serde::{Deserialize, Serialize};

/// MIDI channel of an instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub program: i32,
    pub bank: i32,
    pub volume: i32,
    pub pan: i32,
}

impl Default for Channel {
    fn default() -> Self {
        Channel {
            name: "normal".into(),
            program: 0,
            bank: 0,
            volume: 100,
            pan: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub track_name: String,
    pub long_name: String,
    pub short_name: String,
    pub transpose: Interval,
    pub min_pitch_p: i32,
    pub max_pitch_p: i32,
    pub min_pitch_a: i32,
    pub max_pitch_a: i32,
    pub use_drumset: bool,
    pub channels: Vec<Channel>,
}

impl Default for Instrument {
    fn default() -> Self {
        Instrument {
            id: String::new(),
            track_name: String::new(),
            long_name: String::new(),
            short_name: String::new(),
            transpose: Interval::default(),
            min_pitch_p: 0,
            max_pitch_p: 127,
            min_pitch_a: 0,
            max_pitch_a: 127,
            use_drumset: false,
            channels: Vec::new(),
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum StaffStateType {
    #[default]
    Instrument = 0,
    Typeless = 1,
    Visible = 2,
    Invisible = 3,
}

impl StaffStateType {
    pub fn from_int(v: i32) -> Self {
        match v {
            1 => StaffStateType::Typeless,
            2 => StaffStateType::Visible,
            3 => StaffStateType::Invisible,
            _ => StaffStateType::Instrument,
        }
    }
}

/// Staff change marker from very old files
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaffState {
    pub item: ItemBase,
    pub state_type: StaffStateType,
    pub instrument: Instrument,
}

impl_item!(StaffState, item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarLineType {
    #[default]
    Normal,
    Double,
    StartRepeat,
    EndRepeat,
    Dashed,
    End,
    EndStartRepeat,
    Dotted,
    ReverseEnd,
    Heavy,
    DoubleHeavy,
}

impl BarLineType {
    pub fn from_xml(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "normal" => BarLineType::Normal,
            "double" => BarLineType::Double,
            "start-repeat" | "startRepeat" => BarLineType::StartRepeat,
            "end-repeat" | "endRepeat" => BarLineType::EndRepeat,
            "dashed" => BarLineType::Dashed,
            "end" => BarLineType::End,
            "end-start-repeat" | "endStartRepeat" => BarLineType::EndStartRepeat,
            "dotted" => BarLineType::Dotted,
            "reverse-end" => BarLineType::ReverseEnd,
            "heavy" => BarLineType::Heavy,
            "double-heavy" => BarLineType::DoubleHeavy,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarLine {
    pub item: ItemBase,
    pub bar_line_type: BarLineType,
    /// Extends to the next staff
    pub span_staff: bool,
    pub span_from: i32,
    pub span_to: i32,
    /// Articulations, symbols and images attached to the bar line
    pub el: Vec<Element>,
}

impl_item!(BarLine, item);

impl BarLine {
    /// Restore the span to its unset state
    pub fn reset_span(&mut self) {
        self.span_staff = false;
        self.span_from = 0;
        self.span_to = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BracketType {
    #[default]
    Normal,
    Brace,
    Square,
    Line,
    NoBracket,
}

impl BracketType {
    pub fn from_xml(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "Normal" | "normal" => BracketType::Normal,
            "Brace" | "brace" | "Akkolade" => BracketType::Brace,
            "Square" | "square" => BracketType::Square,
            "Line" | "line" => BracketType::Line,
            "NoBracket" | "no" => BracketType::NoBracket,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bracket {
    pub item: ItemBase,
    pub bracket_type: BracketType,
    /// Nesting column, 0 is innermost
    pub column: i32,
}

impl_item!(Bracket, item);

/// Pitch range of a staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ambitus {
    pub item: ItemBase,
    pub has_line: bool,
    pub top_pitch: i32,
    pub bottom_pitch: i32,
    pub top_tpc: i32,
    pub bottom_tpc: i32,
    pub top_accidental: Accidental,
    pub bottom_accidental: Accidental,
}

impl Default for Ambitus {
    fn default() -> Self {
        Ambitus {
            item: ItemBase::default(),
            has_line: true,
            top_pitch: -1,
            bottom_pitch: -1,
            top_tpc: TPC_INVALID,
            bottom_tpc: TPC_INVALID,
            top_accidental: Accidental::default(),
            bottom_accidental: Accidental::default(),
        }
    }
}

impl_item!(Ambitus, item);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BagpipeEmbellishment {
    pub item: ItemBase,
    pub embel_type: String,
}

impl_item!(BagpipeEmbellishment, item);

/// Mid-score change of the staff type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaffTypeChange {
    pub item: ItemBase,
    pub group: String,
    pub lines: Option<i32>,
    pub line_distance: Option<f64>,
    pub step_offset: Option<i32>,
    pub invisible: Option<bool>,
}

impl_item!(StaffTypeChange, item);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_line_names() {
        assert_eq!(BarLineType::from_xml("end-repeat"), Some(BarLineType::EndRepeat));
        assert_eq!(BarLineType::from_xml("startRepeat"), Some(BarLineType::StartRepeat));
        assert_eq!(BarLineType::from_xml("wiggly"), None);
    }

    #[test]
    fn test_reset_span() {
        let mut b = BarLine {
            span_staff: true,
            span_to: 4,
            ..Default::default()
        };
        b.reset_span();
        assert!(!b.span_staff);
        assert_eq!(b.span_to, 0);
    }
}
