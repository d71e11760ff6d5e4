//! Key signatures, time signatures and clefs

use crate::model::element::ItemBase;
use crate::model::sym::SymId;
use crate::model::types::Fraction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyMode {
    #[default]
    Unknown,
    None,
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Ionian,
    Locrian,
}

impl KeyMode {
    /// Unrecognised names give `Unknown`
    pub fn from_xml(s: &str) -> Self {
        match s.trim() {
            "none" => KeyMode::None,
            "major" => KeyMode::Major,
            "minor" => KeyMode::Minor,
            "dorian" => KeyMode::Dorian,
            "phrygian" => KeyMode::Phrygian,
            "lydian" => KeyMode::Lydian,
            "mixolydian" => KeyMode::Mixolydian,
            "aeolian" => KeyMode::Aeolian,
            "ionian" => KeyMode::Ionian,
            "locrian" => KeyMode::Locrian,
            _ => KeyMode::Unknown,
        }
    }
}

/// One accidental of a custom key signature
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CustDef {
    pub sym: SymId,
    /// Scale degree, 0 = C
    pub degree: i32,
    /// Octave shift from the default placement
    pub oct_alt: i32,
    /// Horizontal shift in spatium units
    pub xalt: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeySigEvent {
    /// Sharps (positive) or flats (negative); `None` until known
    pub key: Option<i32>,
    pub mode: KeyMode,
    pub custom: bool,
    pub custom_defs: Vec<CustDef>,
}

impl KeySigEvent {
    pub fn is_valid(&self) -> bool {
        self.key.is_some()
    }

    /// Decode the packed subtype of very old files
    pub fn init_from_subtype(&mut self, subtype: i32) {
        let low = subtype & 0xf;
        let key = if low & 0x8 != 0 { low - 16 } else { low };
        self.custom = subtype & (1 << 21) != 0;
        self.key = if subtype & (1 << 22) != 0 { None } else { Some(key) };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySig {
    pub item: ItemBase,
    pub sig: KeySigEvent,
    pub show_courtesy: bool,
    pub for_instrument_change: bool,
}

impl Default for KeySig {
    fn default() -> Self {
        KeySig {
            item: ItemBase::default(),
            sig: KeySigEvent::default(),
            show_courtesy: true,
            for_instrument_change: false,
        }
    }
}

impl_item!(KeySig, item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupNode {
    pub pos: i32,
    pub action: i32,
}

/// Beaming groups of a time signature
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Groups {
    pub nodes: Vec<GroupNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeSigType {
    #[default]
    Normal,
    FourFour,
    AllaBreve,
    CutBach,
    CutTriple,
}

impl TimeSigType {
    pub fn from_int(v: i32) -> Self {
        match v {
            1 => TimeSigType::FourFour,
            2 => TimeSigType::AllaBreve,
            3 => TimeSigType::CutBach,
            4 => TimeSigType::CutTriple,
            _ => TimeSigType::Normal,
        }
    }
}

/// Time signature; numerator and denominator are kept apart since 4/4 and 2/2 differ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSig {
    pub item: ItemBase,
    pub sig_n: i32,
    pub sig_d: i32,
    pub stretch_n: i32,
    pub stretch_d: i32,
    pub time_sig_type: TimeSigType,
    pub numerator_string: String,
    pub denominator_string: String,
    pub groups: Groups,
    pub show_courtesy: bool,
    pub large_parentheses: bool,
}

impl Default for TimeSig {
    fn default() -> Self {
        TimeSig {
            item: ItemBase::default(),
            sig_n: 4,
            sig_d: 4,
            stretch_n: 1,
            stretch_d: 1,
            time_sig_type: TimeSigType::Normal,
            numerator_string: String::new(),
            denominator_string: String::new(),
            groups: Groups::default(),
            show_courtesy: true,
            large_parentheses: false,
        }
    }
}

impl_item!(TimeSig, item);

impl TimeSig {
    /// Measure length in whole notes
    pub fn sig(&self) -> Fraction {
        if self.sig_n <= 0 || self.sig_d <= 0 {
            return Fraction::from_integer(1);
        }
        Fraction::new(self.sig_n, self.sig_d)
    }
}

macro_rules! clef_types {
    ($($ty:ident => $name:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
        pub enum ClefType {
            #[default]
            Invalid,
            $($ty,)*
        }

        impl ClefType {
            pub fn from_xml(s: &str) -> Option<ClefType> {
                match s.trim() {
                    $($name => Some(ClefType::$ty),)*
                    _ => None,
                }
            }
        }
    };
}

clef_types! {
    G => "G",
    G15Mb => "G15mb",
    G8Vb => "G8vb",
    G8Va => "G8va",
    G15Ma => "G15ma",
    G8VbO => "G8vbo",
    G8VbP => "G8vbp",
    G1 => "G1",
    C1 => "C1",
    C2 => "C2",
    C3 => "C3",
    C4 => "C4",
    C5 => "C5",
    C4_8Vb => "C4_8vb",
    F => "F",
    F15Mb => "F15mb",
    F8Vb => "F8vb",
    F8Va => "F_8va",
    F15Ma => "F_15ma",
    FB => "F_B",
    FC => "F_C",
    Perc => "PERC",
    Perc2 => "PERC2",
    Tab => "TAB",
    Tab4 => "TAB4",
    TabSerif => "TAB_SERIF",
    Tab4Serif => "TAB4_SERIF",
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clef {
    pub item: ItemBase,
    pub concert_clef: ClefType,
    pub transposing_clef: ClefType,
    pub show_courtesy: bool,
    pub for_instrument_change: bool,
}

impl Default for Clef {
    fn default() -> Self {
        Clef {
            item: ItemBase::default(),
            concert_clef: ClefType::Invalid,
            transposing_clef: ClefType::Invalid,
            show_courtesy: true,
            for_instrument_change: false,
        }
    }
}

impl_item!(Clef, item);

impl Clef {
    pub fn clef_type(&self) -> ClefType {
        self.concert_clef
    }

    /// Set both concert and transposing clef
    pub fn set_clef_type(&mut self, ty: ClefType) {
        self.concert_clef = ty;
        self.transposing_clef = ty;
    }
}
