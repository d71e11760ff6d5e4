//! The whole document

use crate::model::element::Element;
use crate::model::measure::Measure;
use crate::model::signature::ClefType;
use crate::model::staff::{Bracket, Instrument};
use crate::model::style::Style;
use crate::model::types::VOICES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// File format version, `"3.02"` is 302
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MscVersion(pub i32);

impl MscVersion {
    pub const CURRENT: MscVersion = MscVersion(400);

    pub fn parse(text: &str) -> Option<MscVersion> {
        let text = text.trim();
        let (major, minor) = text.split_once('.').unwrap_or((text, "0"));
        let major: i32 = major.parse().ok()?;
        let minor: i32 = minor.parse().ok()?;
        if !(0..100).contains(&minor) {
            return None;
        }
        Some(MscVersion(major * 100 + minor))
    }
}

impl Default for MscVersion {
    fn default() -> Self {
        MscVersion::CURRENT
    }
}

impl fmt::Display for MscVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Version of the program that wrote the file; unknown for files that do not say
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppVersion(pub Option<(u32, u32, u32)>);

impl AppVersion {
    pub fn parse(text: &str) -> AppVersion {
        let mut parts = text.trim().split('.').map(|p| p.parse::<u32>());
        let major = match parts.next() {
            Some(Ok(v)) => v,
            _ => return AppVersion(None),
        };
        let minor = parts.next().and_then(Result::ok).unwrap_or(0);
        let patch = parts.next().and_then(Result::ok).unwrap_or(0);
        AppVersion(Some((major, minor, patch)))
    }

    pub fn is_known(&self) -> bool {
        self.0.is_some()
    }

    /// Known and older than `major.minor`
    pub fn is_before(&self, major: u32, minor: u32) -> bool {
        match self.0 {
            Some((ma, mi, _)) => (ma, mi) < (major, minor),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Audio {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    /// 1-based id as written
    pub id: i32,
    /// Index of the owning part
    pub part: usize,
    pub lines: i32,
    pub small: bool,
    pub invisible: bool,
    pub brackets: Vec<Bracket>,
    pub default_clef: Option<ClefType>,
}

impl Default for Staff {
    fn default() -> Self {
        Staff {
            id: 0,
            part: 0,
            lines: 5,
            small: false,
            invisible: false,
            brackets: Vec::new(),
            default_clef: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub name: String,
    pub show: bool,
    /// Indices into the score's staves
    pub staves: Vec<usize>,
    pub instrument: Instrument,
}

impl Default for Part {
    fn default() -> Self {
        Part {
            id: String::new(),
            name: String::new(),
            show: true,
            staves: Vec::new(),
            instrument: Instrument::default(),
        }
    }
}

/// Entry of the measure list: a measure or a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasureNode {
    Measure(Box<Measure>),
    Frame(Element),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Score {
    pub msc_version: MscVersion,
    pub app_version: AppVersion,
    pub program_revision: String,
    pub style: Style,
    pub meta_tags: BTreeMap<String, String>,
    pub audio: Option<Audio>,
    pub parts: Vec<Part>,
    pub staves: Vec<Staff>,
    pub measures: Vec<MeasureNode>,
    pub spanners: Vec<Element>,
}

impl Score {
    pub fn spatium(&self) -> f64 {
        self.style.spatium()
    }

    pub fn nstaves(&self) -> usize {
        self.staves.len()
    }

    pub fn ntracks(&self) -> usize {
        self.staves.len() * VOICES
    }

    pub fn part_of_staff(&self, staff_idx: usize) -> Option<&Part> {
        self.staves.get(staff_idx).and_then(|s| self.parts.get(s.part))
    }

    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.measures.iter().filter_map(|n| match n {
            MeasureNode::Measure(m) => Some(m.as_ref()),
            MeasureNode::Frame(_) => None,
        })
    }

    pub fn frames(&self) -> impl Iterator<Item = &Element> {
        self.measures.iter().filter_map(|n| match n {
            MeasureNode::Frame(e) => Some(e),
            MeasureNode::Measure(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msc_version_parse() {
        assert_eq!(MscVersion::parse("4.00"), Some(MscVersion(400)));
        assert_eq!(MscVersion::parse("2.06"), Some(MscVersion(206)));
        assert_eq!(MscVersion::parse("1.14"), Some(MscVersion(114)));
        assert_eq!(MscVersion::parse("3"), Some(MscVersion(300)));
        assert_eq!(MscVersion::parse("x"), None);
        assert_eq!(MscVersion(302).to_string(), "3.02");
    }

    #[test]
    fn test_app_version_gates() {
        let v = AppVersion::parse("3.0.5");
        assert!(v.is_before(3, 1));
        assert!(v.is_before(3, 6));
        assert!(!AppVersion::parse("3.6.2").is_before(3, 6));
        let unknown = AppVersion::parse("");
        assert!(!unknown.is_known());
        assert!(!unknown.is_before(3, 6));
    }
}
