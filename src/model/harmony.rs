//! Chord symbols and fretboard diagrams

use crate::model::element::ItemBase;
use crate::model::property::Pid;
use crate::model::text::TextBase;
use crate::model::types::{tpc_to_name, TPC_INVALID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Letter case used when spelling a chord root or bass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoteCaseType {
    #[default]
    Auto,
    Capital,
    Lower,
    Upper,
}

impl NoteCaseType {
    pub fn from_int(v: i32) -> Self {
        match v {
            0 => NoteCaseType::Capital,
            1 => NoteCaseType::Lower,
            2 => NoteCaseType::Upper,
            _ => NoteCaseType::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HDegreeType {
    Add,
    Alter,
    Subtract,
}

impl HDegreeType {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "add" => Some(HDegreeType::Add),
            "alter" => Some(HDegreeType::Alter),
            "subtract" => Some(HDegreeType::Subtract),
            _ => None,
        }
    }
}

/// Added, altered or omitted chord degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HDegree {
    /// Scale degree, 1..=13
    pub value: i32,
    /// Semitone alteration, -2..=2
    pub alter: i32,
    pub kind: HDegreeType,
}

impl HDegree {
    /// Build a degree from raw fields, rejecting anything out of range
    pub fn checked(value: i32, alter: i32, kind: &str) -> Option<HDegree> {
        if !(1..=13).contains(&value) || !(-2..=2).contains(&alter) {
            return None;
        }
        Some(HDegree {
            value,
            alter,
            kind: HDegreeType::from_xml(kind)?,
        })
    }

    fn suffix(&self) -> String {
        let alter = match self.alter {
            -2 => "bb",
            -1 => "b",
            1 => "#",
            2 => "##",
            _ => "",
        };
        match self.kind {
            HDegreeType::Add => format!("add{}{}", alter, self.value),
            HDegreeType::Alter => format!("{}{}", alter, self.value),
            HDegreeType::Subtract => format!("no{}", self.value),
        }
    }
}

/// Chord symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Harmony {
    pub text: TextBase,
    pub root_tpc: i32,
    pub base_tpc: i32,
    pub root_case: NoteCaseType,
    pub base_case: NoteCaseType,
    /// Chord description id; -1 when unknown
    pub id: i32,
    /// Chord quality as written, e.g. `m7`
    pub text_name: String,
    /// Roman numeral or Nashville function
    pub function: String,
    pub degrees: Vec<HDegree>,
    pub left_paren: bool,
    pub right_paren: bool,
    /// Full chord name derived after reading
    pub harmony_name: String,
}

impl Default for Harmony {
    fn default() -> Self {
        Harmony {
            text: TextBase::default(),
            root_tpc: TPC_INVALID,
            base_tpc: TPC_INVALID,
            root_case: NoteCaseType::Auto,
            base_case: NoteCaseType::Auto,
            id: -1,
            text_name: String::new(),
            function: String::new(),
            degrees: Vec::new(),
            left_paren: false,
            right_paren: false,
            harmony_name: String::new(),
        }
    }
}

impl_item!(Harmony, text.item);

impl Harmony {
    fn spell(tpc: i32, case: NoteCaseType) -> String {
        let name = tpc_to_name(tpc);
        match case {
            NoteCaseType::Lower => name.to_lowercase(),
            NoteCaseType::Upper => name.to_uppercase(),
            _ => name,
        }
    }

    /// Derive the chord name and, if the file had no display text, the text
    pub fn after_read(&mut self) {
        let mut name = String::new();
        if self.root_tpc != TPC_INVALID {
            name.push_str(&Self::spell(self.root_tpc, self.root_case));
        }
        name.push_str(&self.text_name);
        for degree in &self.degrees {
            name.push_str(&degree.suffix());
        }
        if self.base_tpc != TPC_INVALID {
            name.push('/');
            name.push_str(&Self::spell(self.base_tpc, self.base_case));
        }
        if self.left_paren {
            name.insert(0, '(');
        }
        if self.right_paren {
            name.push(')');
        }
        self.harmony_name = name;
        if self.text.is_empty() {
            self.text.xml_text = self.harmony_name.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FretDotType {
    #[default]
    Normal,
    Cross,
    Square,
    Triangle,
}

impl FretDotType {
    pub fn from_name(s: &str) -> Self {
        match s.trim() {
            "cross" => FretDotType::Cross,
            "square" => FretDotType::Square,
            "triangle" => FretDotType::Triangle,
            _ => FretDotType::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FretMarkerType {
    #[default]
    None,
    Circle,
    Cross,
}

impl FretMarkerType {
    pub fn from_name(s: &str) -> Self {
        match s.trim() {
            "circle" => FretMarkerType::Circle,
            "cross" => FretMarkerType::Cross,
            _ => FretMarkerType::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FretDot {
    pub fret: i32,
    pub dtype: FretDotType,
}

impl FretDot {
    pub fn exists(&self) -> bool {
        self.fret > 0
    }
}

/// Barre from `start_string` to `end_string`; -1 end means "to the last string"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barre {
    pub start_string: i32,
    pub end_string: i32,
}

/// Fretboard diagram
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FretDiagram {
    pub item: ItemBase,
    /// Dots per string
    pub dots: BTreeMap<i32, Vec<FretDot>>,
    pub markers: BTreeMap<i32, FretMarkerType>,
    /// Barres keyed by fret
    pub barres: BTreeMap<i32, Barre>,
    pub harmony: Option<Box<Harmony>>,
}

impl_item!(FretDiagram, item);

impl FretDiagram {
    fn int_prop(&self, pid: Pid, default: i32) -> i32 {
        self.item.props.get(pid).and_then(|v| v.as_int()).unwrap_or(default)
    }

    pub fn strings(&self) -> i32 {
        self.int_prop(Pid::FretStrings, 6)
    }

    pub fn frets(&self) -> i32 {
        self.int_prop(Pid::FretFrets, 4)
    }

    pub fn fret_offset(&self) -> i32 {
        self.int_prop(Pid::FretOffset, 0)
    }

    pub fn dot(&self, string: i32) -> &[FretDot] {
        self.dots.get(&string).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Place a dot; unless `add`, it replaces the dots already on the string
    pub fn set_dot(&mut self, string: i32, fret: i32, add: bool, dtype: FretDotType) {
        self.markers.remove(&string);
        let dots = self.dots.entry(string).or_default();
        if !add {
            dots.clear();
        }
        dots.push(FretDot { fret, dtype });
    }

    /// Mark a string open or muted; clears its dots
    pub fn set_marker(&mut self, string: i32, marker: FretMarkerType) {
        self.dots.remove(&string);
        self.markers.insert(string, marker);
    }

    pub fn set_barre(&mut self, start_string: i32, end_string: i32, fret: i32) {
        self.barres.insert(fret, Barre { start_string, end_string });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_bounds() {
        assert!(HDegree::checked(9, 1, "add").is_some());
        assert!(HDegree::checked(0, 0, "add").is_none());
        assert!(HDegree::checked(14, 0, "alter").is_none());
        assert!(HDegree::checked(5, 3, "alter").is_none());
        assert!(HDegree::checked(5, -1, "replace").is_none());
    }

    #[test]
    fn test_after_read_builds_name() {
        let mut h = Harmony {
            root_tpc: 12,
            base_tpc: 16,
            text_name: "m7".into(),
            ..Default::default()
        };
        h.degrees.push(HDegree::checked(5, -1, "alter").unwrap());
        h.after_read();
        assert_eq!(h.harmony_name, "Bbm7b5/D");
        assert_eq!(h.text.xml_text, "Bbm7b5/D");
    }

    #[test]
    fn test_marker_and_dot_exclusive() {
        let mut d = FretDiagram::default();
        d.set_dot(2, 3, false, FretDotType::Normal);
        d.set_marker(2, FretMarkerType::Cross);
        assert!(d.dot(2).is_empty());
        d.set_dot(2, 5, false, FretDotType::Normal);
        assert!(!d.markers.contains_key(&2));
        assert_eq!(d.dot(2)[0].fret, 5);
    }
}
