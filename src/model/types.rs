//! Primitive value types shared by the document model
//!
//! Geometry, colors, durations and the small enumerations that many element
//! kinds store.

use num_rational::{Ratio, Rational32};
use serde::{Deserialize, Serialize};

/// Rational time value in whole notes
pub type Fraction = Rational32;

/// Ticks per quarter note
pub const DIVISION: i32 = 480;

/// Voices per staff; track = staff * VOICES + voice
pub const VOICES: usize = 4;

/// Pixels per inch of the internal coordinate space
pub const DPI: f64 = 360.0;

/// Internal units per millimetre
pub const DPMM: f64 = DPI / 25.4;

/// Default spatium (1.764 mm) in internal units
pub const DEFAULT_SPATIUM: f64 = 1.764 * DPMM;

/// Convert an absolute tick count into a fraction of a whole note
pub fn fraction_from_ticks(ticks: i32) -> Fraction {
    Fraction::new(ticks, DIVISION * 4)
}

/// Convert a fraction of a whole note into ticks
pub fn fraction_to_ticks(f: Fraction) -> i32 {
    (*f.numer() as i64 * (DIVISION as i64 * 4) / *f.denom() as i64) as i32
}

fn widen(f: Fraction) -> Ratio<i64> {
    Ratio::new(*f.numer() as i64, *f.denom() as i64)
}

fn narrow(r: Ratio<i64>) -> Option<Fraction> {
    Some(Fraction::new_raw(i32::try_from(*r.numer()).ok()?, i32::try_from(*r.denom()).ok()?))
}

/// `a + b`, or `None` when the reduced result leaves the `i32` range
pub fn checked_add(a: Fraction, b: Fraction) -> Option<Fraction> {
    narrow(widen(a) + widen(b))
}

/// `a - b`, or `None` when the reduced result leaves the `i32` range
pub fn checked_sub(a: Fraction, b: Fraction) -> Option<Fraction> {
    narrow(widen(a) - widen(b))
}

/// `a * b`, or `None` when the reduced result leaves the `i32` range
pub fn checked_mul(a: Fraction, b: Fraction) -> Option<Fraction> {
    narrow(widen(a) * widen(b))
}

/// Tonal pitch class marking an unset spelling
pub const TPC_INVALID: i32 = -2;

/// Tonal pitch class of C natural
pub const TPC_C: i32 = 14;

/// Default spelling of a MIDI pitch, sharps and flats as in C major
pub fn pitch_to_tpc(pitch: i32) -> i32 {
    const TPCS: [i32; 12] = [14, 21, 16, 11, 18, 13, 20, 15, 10, 17, 12, 19];
    TPCS[pitch.rem_euclid(12) as usize]
}

/// Spelled note name of a tonal pitch class, e.g. `Bb` or `F#`
pub fn tpc_to_name(tpc: i32) -> String {
    const STEPS: [&str; 7] = ["F", "C", "G", "D", "A", "E", "B"];
    let step = STEPS[(tpc + 1).rem_euclid(7) as usize];
    let accidental = match (tpc + 1).div_euclid(7) - 2 {
        -2 => "bb",
        -1 => "b",
        1 => "#",
        2 => "##",
        _ => "",
    };
    format!("{}{}", step, accidental)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub fn new(x: f64, y: f64) -> Self {
        PointF { x, y }
    }

    pub fn scaled(self, factor: f64) -> Self {
        PointF::new(self.x * factor, self.y * factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

impl SizeF {
    pub fn new(width: f64, height: f64) -> Self {
        SizeF { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 255, g: 255, b: 255, a: 0 };
}

/// Transposition interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Interval {
    pub diatonic: i32,
    pub chromatic: i32,
}

/// Vertical direction with an automatic choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectionV {
    #[default]
    Auto,
    Up,
    Down,
}

impl DirectionV {
    /// Accepts both the symbolic and the legacy numeric encoding
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "auto" | "0" => Some(DirectionV::Auto),
            "up" | "1" => Some(DirectionV::Up),
            "down" | "2" => Some(DirectionV::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectionH {
    #[default]
    Auto,
    Left,
    Right,
}

impl DirectionH {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "auto" | "0" => Some(DirectionH::Auto),
            "left" | "1" => Some(DirectionH::Left),
            "right" | "2" => Some(DirectionH::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Placement {
    #[default]
    Above,
    Below,
}

impl Placement {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "above" => Some(Placement::Above),
            "below" => Some(Placement::Below),
            _ => None,
        }
    }
}

/// Horizontal and vertical text alignment, stored as `"left,baseline"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Align {
    pub horizontal: AlignH,
    pub vertical: AlignV,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignH {
    #[default]
    Left,
    HCenter,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignV {
    #[default]
    Top,
    VCenter,
    Bottom,
    Baseline,
}

impl Align {
    pub const CENTER: Align = Align {
        horizontal: AlignH::HCenter,
        vertical: AlignV::VCenter,
    };

    pub fn from_xml(s: &str) -> Option<Self> {
        let mut align = Align::default();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part {
                "left" => align.horizontal = AlignH::Left,
                "center" => align.horizontal = AlignH::HCenter,
                "right" => align.horizontal = AlignH::Right,
                "top" => align.vertical = AlignV::Top,
                "vcenter" => align.vertical = AlignV::VCenter,
                "bottom" => align.vertical = AlignV::Bottom,
                "baseline" => align.vertical = AlignV::Baseline,
                _ => return None,
            }
        }
        Some(align)
    }
}

/// Line style of lines, brackets and frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineType {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineType {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "solid" | "1" => Some(LineType::Solid),
            "dashed" | "2" => Some(LineType::Dashed),
            "dotted" | "3" => Some(LineType::Dotted),
            _ => None,
        }
    }
}

/// Base note values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DurationType {
    Long,
    Breve,
    Whole,
    Half,
    #[default]
    Quarter,
    Eighth,
    D16th,
    D32nd,
    D64th,
    D128th,
    D256th,
    D512th,
    D1024th,
    Zero,
    Measure,
    Invalid,
}

impl DurationType {
    pub fn from_xml(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "long" => DurationType::Long,
            "breve" => DurationType::Breve,
            "whole" => DurationType::Whole,
            "half" => DurationType::Half,
            "quarter" => DurationType::Quarter,
            "eighth" => DurationType::Eighth,
            "16th" => DurationType::D16th,
            "32nd" => DurationType::D32nd,
            "64th" => DurationType::D64th,
            "128th" => DurationType::D128th,
            "256th" => DurationType::D256th,
            "512th" => DurationType::D512th,
            "1024th" => DurationType::D1024th,
            "zero" => DurationType::Zero,
            "measure" => DurationType::Measure,
            _ => return None,
        })
    }

    /// Undotted length in whole notes; zero for non-metric values
    pub fn fraction(self) -> Fraction {
        let (n, d) = match self {
            DurationType::Long => (4, 1),
            DurationType::Breve => (2, 1),
            DurationType::Whole => (1, 1),
            DurationType::Half => (1, 2),
            DurationType::Quarter => (1, 4),
            DurationType::Eighth => (1, 8),
            DurationType::D16th => (1, 16),
            DurationType::D32nd => (1, 32),
            DurationType::D64th => (1, 64),
            DurationType::D128th => (1, 128),
            DurationType::D256th => (1, 256),
            DurationType::D512th => (1, 512),
            DurationType::D1024th => (1, 1024),
            DurationType::Zero | DurationType::Measure | DurationType::Invalid => (0, 1),
        };
        Fraction::new(n, d)
    }
}

/// Note value with augmentation dots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TDuration {
    pub kind: DurationType,
    pub dots: i32,
}

impl TDuration {
    pub fn new(kind: DurationType) -> Self {
        TDuration { kind, dots: 0 }
    }

    pub fn invalid() -> Self {
        TDuration::new(DurationType::Invalid)
    }

    pub fn is_valid(&self) -> bool {
        self.kind != DurationType::Invalid
    }

    /// Length in whole notes including dots
    pub fn fraction(&self) -> Fraction {
        let base = self.kind.fraction();
        let mut total = base;
        let mut add = base;
        for _ in 0..self.dots.clamp(0, 4) {
            add = add / 2;
            total += add;
        }
        total
    }

    /// Best undotted note value for an arbitrary length
    pub fn from_fraction(f: Fraction) -> Self {
        const ORDER: [DurationType; 13] = [
            DurationType::Long,
            DurationType::Breve,
            DurationType::Whole,
            DurationType::Half,
            DurationType::Quarter,
            DurationType::Eighth,
            DurationType::D16th,
            DurationType::D32nd,
            DurationType::D64th,
            DurationType::D128th,
            DurationType::D256th,
            DurationType::D512th,
            DurationType::D1024th,
        ];
        for kind in ORDER {
            let base = kind.fraction();
            if f >= base {
                let mut d = TDuration::new(kind);
                while d.dots < 4 && d.fraction() < f {
                    d.dots += 1;
                }
                if d.fraction() != f {
                    d.dots = 0;
                }
                return d;
            }
        }
        TDuration::invalid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_fraction_arithmetic() {
        assert_eq!(checked_add(Fraction::new(1, 4), Fraction::new(1, 6)), Some(Fraction::new(5, 12)));
        assert_eq!(checked_sub(Fraction::new(1, 4), Fraction::new(1, 2)), Some(Fraction::new(-1, 4)));
        assert_eq!(checked_mul(Fraction::new(3, 4), Fraction::from_integer(2)), Some(Fraction::new(3, 2)));
        let big = Fraction::from_integer(i32::MAX);
        assert_eq!(checked_add(big, Fraction::from_integer(1)), None);
        assert_eq!(checked_sub(Fraction::from_integer(i32::MIN), Fraction::from_integer(1)), None);
        assert_eq!(checked_mul(big, Fraction::from_integer(2)), None);
        assert_eq!(checked_add(Fraction::new(1, i32::MAX), Fraction::new(1, i32::MAX - 1)), None);
    }

    #[test]
    fn test_dotted_durations() {
        let mut d = TDuration::new(DurationType::Quarter);
        assert_eq!(d.fraction(), Fraction::new(1, 4));
        d.dots = 1;
        assert_eq!(d.fraction(), Fraction::new(3, 8));
        d.dots = 2;
        assert_eq!(d.fraction(), Fraction::new(7, 16));
    }

    #[test]
    fn test_from_fraction() {
        let d = TDuration::from_fraction(Fraction::new(3, 8));
        assert_eq!(d.kind, DurationType::Quarter);
        assert_eq!(d.dots, 1);
        assert_eq!(TDuration::from_fraction(Fraction::new(1, 1)).kind, DurationType::Whole);
    }

    #[test]
    fn test_ticks_roundtrip_constants() {
        assert_eq!(fraction_from_ticks(DIVISION), Fraction::new(1, 4));
        assert_eq!(fraction_to_ticks(Fraction::new(3, 4)), 3 * DIVISION);
    }

    #[test]
    fn test_tpc_names() {
        assert_eq!(tpc_to_name(TPC_C), "C");
        assert_eq!(tpc_to_name(12), "Bb");
        assert_eq!(tpc_to_name(20), "F#");
        assert_eq!(tpc_to_name(-1), "Fbb");
        assert_eq!(pitch_to_tpc(61), 21);
        assert_eq!(pitch_to_tpc(60), TPC_C);
    }

    #[test]
    fn test_align_parse() {
        let a = Align::from_xml("center,baseline").unwrap();
        assert_eq!(a.horizontal, AlignH::HCenter);
        assert_eq!(a.vertical, AlignV::Baseline);
        assert!(Align::from_xml("sideways").is_none());
    }
}
