//! Chords, rests, notes and everything attached to them

use crate::model::beam::BeamFragment;
use crate::model::element::{Element, ItemBase};
use crate::model::property::Pid;
use crate::model::sym::SymId;
use crate::model::symbol::Symbol;
use crate::model::text::Lyrics;
use crate::model::types::{Fraction, PointF, TDuration, TPC_INVALID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BeamMode {
    #[default]
    Auto,
    Begin,
    Mid,
    End,
    NoBeam,
    Begin32,
    Begin64,
}

impl BeamMode {
    pub fn from_xml(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "auto" => BeamMode::Auto,
            "begin" => BeamMode::Begin,
            "mid" => BeamMode::Mid,
            "end" => BeamMode::End,
            "no" => BeamMode::NoBeam,
            "begin32" => BeamMode::Begin32,
            "begin64" => BeamMode::Begin64,
            _ => return None,
        })
    }
}

/// State shared by chords and rests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordRest {
    pub item: ItemBase,
    pub duration_type: TDuration,
    /// Actual length; differs from `duration_type` for measure rests and tuplets
    pub ticks: Fraction,
    pub beam_mode: BeamMode,
    pub small: bool,
    /// Cross-staff move, -1/0/+1
    pub staff_move: i32,
    pub articulations: Vec<Articulation>,
    pub lyrics: Vec<Lyrics>,
    /// Id of the tuplet the chord or rest belongs to
    pub tuplet: Option<i32>,
    /// Legacy beam id
    pub beam: Option<i32>,
}

impl Default for ChordRest {
    fn default() -> Self {
        ChordRest {
            item: ItemBase::default(),
            duration_type: TDuration::default(),
            ticks: Fraction::new(1, 4),
            beam_mode: BeamMode::Auto,
            small: false,
            staff_move: 0,
            articulations: Vec::new(),
            lyrics: Vec::new(),
            tuplet: None,
            beam: None,
        }
    }
}

impl_item!(ChordRest, item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoteType {
    #[default]
    Normal,
    Acciaccatura,
    Appoggiatura,
    Grace4,
    Grace16,
    Grace32,
    Grace8After,
    Grace16After,
    Grace32After,
}

impl NoteType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "acciaccatura" => NoteType::Acciaccatura,
            "appoggiatura" => NoteType::Appoggiatura,
            "grace4" => NoteType::Grace4,
            "grace16" => NoteType::Grace16,
            "grace32" => NoteType::Grace32,
            "grace8after" => NoteType::Grace8After,
            "grace16after" => NoteType::Grace16After,
            "grace32after" => NoteType::Grace32After,
            _ => return None,
        })
    }
}

/// Whether note play events were generated or written by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayEventType {
    #[default]
    Auto,
    User,
    InvalidUser,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Chord {
    pub cr: ChordRest,
    pub notes: Vec<Note>,
    pub stem: Option<Stem>,
    pub hook: Option<Symbol>,
    pub stem_slash: Option<StemSlash>,
    pub arpeggio: Option<Arpeggio>,
    pub tremolo: Option<Tremolo>,
    pub chord_lines: Vec<ChordLine>,
    pub note_type: NoteType,
    pub no_stem: bool,
    pub play_event_type: PlayEventType,
}

impl_item!(Chord, cr.item);

impl Chord {
    pub fn is_grace(&self) -> bool {
        self.note_type != NoteType::Normal
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rest {
    pub cr: ChordRest,
}

impl_item!(Rest, cr.item);

/// Play event of a note, in per-mille of the chord duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch: i32,
    pub ontime: i32,
    pub len: i32,
}

impl Default for NoteEvent {
    fn default() -> Self {
        NoteEvent {
            pitch: 0,
            ontime: 0,
            len: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub item: ItemBase,
    /// MIDI pitch, 0..=127
    pub pitch: i32,
    /// Concert spelling
    pub tpc1: i32,
    /// Transposed spelling
    pub tpc2: i32,
    pub small: bool,
    pub fixed: bool,
    pub fixed_line: i32,
    pub user_velocity: i32,
    pub play: bool,
    /// Tuning offset in cents
    pub tuning: f64,
    pub fret: i32,
    pub string: i32,
    pub ghost: bool,
    pub dead: bool,
    pub line: Option<i32>,
    pub accidental: Option<Accidental>,
    pub dots: Vec<NoteDot>,
    /// Fingerings, symbols, images and bends attached to the note
    pub el: Vec<Element>,
    pub play_events: Vec<NoteEvent>,
}

impl Default for Note {
    fn default() -> Self {
        Note {
            item: ItemBase::default(),
            pitch: 60,
            tpc1: TPC_INVALID,
            tpc2: TPC_INVALID,
            small: false,
            fixed: false,
            fixed_line: 0,
            user_velocity: 0,
            play: true,
            tuning: 0.0,
            fret: -1,
            string: -1,
            ghost: false,
            dead: false,
            line: None,
            accidental: None,
            dots: Vec::new(),
            el: Vec::new(),
            play_events: Vec::new(),
        }
    }
}

impl_item!(Note, item);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NoteDot {
    pub item: ItemBase,
}

impl_item!(NoteDot, item);

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum AccidentalBracket {
    #[default]
    None = 0,
    Parenthesis = 1,
    Bracket = 2,
    Brace = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccidentalRole {
    #[default]
    Auto,
    User,
}

impl AccidentalRole {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "0" | "auto" => Some(AccidentalRole::Auto),
            "1" | "user" => Some(AccidentalRole::User),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Accidental {
    pub item: ItemBase,
    /// Glyph of the accidental; `NoSym` for none
    pub sym: SymId,
    pub bracket: AccidentalBracket,
    pub role: AccidentalRole,
    pub small: bool,
}

impl_item!(Accidental, item);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stem {
    pub item: ItemBase,
}

impl_item!(Stem, item);

impl Stem {
    pub fn user_len(&self) -> f64 {
        self.item.props.get(Pid::UserLen).and_then(|v| v.as_real()).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StemSlash {
    pub item: ItemBase,
}

impl_item!(StemSlash, item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArpeggioType {
    #[default]
    Normal,
    Up,
    Down,
    Bracket,
    UpStraight,
    DownStraight,
}

impl ArpeggioType {
    pub fn from_xml(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "0" | "normal" => ArpeggioType::Normal,
            "1" | "up" => ArpeggioType::Up,
            "2" | "down" => ArpeggioType::Down,
            "3" | "bracket" => ArpeggioType::Bracket,
            "4" | "upStraight" => ArpeggioType::UpStraight,
            "5" | "downStraight" => ArpeggioType::DownStraight,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arpeggio {
    pub item: ItemBase,
    pub arpeggio_type: ArpeggioType,
    pub user_len1: f64,
    pub user_len2: f64,
    /// Number of staves covered
    pub span: i32,
    pub play: bool,
    pub stretch: f64,
}

impl Default for Arpeggio {
    fn default() -> Self {
        Arpeggio {
            item: ItemBase::default(),
            arpeggio_type: ArpeggioType::Normal,
            user_len1: 0.0,
            user_len2: 0.0,
            span: 1,
            play: true,
            stretch: 1.0,
        }
    }
}

impl_item!(Arpeggio, item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TremoloType {
    #[default]
    Invalid,
    R8,
    R16,
    R32,
    R64,
    BuzzRoll,
    C8,
    C16,
    C32,
    C64,
}

impl TremoloType {
    pub fn from_xml(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "r8" => TremoloType::R8,
            "r16" => TremoloType::R16,
            "r32" => TremoloType::R32,
            "r64" => TremoloType::R64,
            "buzzroll" => TremoloType::BuzzRoll,
            "c8" => TremoloType::C8,
            "c16" => TremoloType::C16,
            "c32" => TremoloType::C32,
            "c64" => TremoloType::C64,
            _ => return None,
        })
    }

    /// Two-chord tremolo
    pub fn is_two_note(self) -> bool {
        matches!(self, TremoloType::C8 | TremoloType::C16 | TremoloType::C32 | TremoloType::C64)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tremolo {
    pub item: ItemBase,
    pub tremolo_type: TremoloType,
    pub style: i32,
    pub fragment: Option<BeamFragment>,
    /// Whether the beam fragment was edited, per stem direction
    pub user_modified: [bool; 2],
    pub duration_type: TDuration,
}

impl_item!(Tremolo, item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChordLineType {
    #[default]
    NoType,
    Fall,
    Doit,
    Plop,
    Scoop,
}

impl ChordLineType {
    pub fn from_xml(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "0" | "notype" => ChordLineType::NoType,
            "1" | "fall" => ChordLineType::Fall,
            "2" | "doit" => ChordLineType::Doit,
            "3" | "plop" => ChordLineType::Plop,
            "4" | "scoop" => ChordLineType::Scoop,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathElement {
    MoveTo(PointF),
    LineTo(PointF),
    CubicTo(PointF, PointF, PointF),
}

/// Fall, doit, plop or scoop
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChordLine {
    pub item: ItemBase,
    pub path: Vec<PathElement>,
    pub chord_line_type: ChordLineType,
    pub straight: bool,
    pub wavy: bool,
    pub length_x: f64,
    pub length_y: f64,
    /// The path was edited by hand
    pub modified: bool,
    /// Index of the note the line is attached to
    pub note: Option<usize>,
}

impl_item!(ChordLine, item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArticulationTextType {
    #[default]
    NoText,
    Tap,
    Slap,
    Pop,
}

impl ArticulationTextType {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "tap" | "Tap" => Some(ArticulationTextType::Tap),
            "slap" | "Slap" => Some(ArticulationTextType::Slap),
            "pop" | "Pop" => Some(ArticulationTextType::Pop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Articulation {
    pub item: ItemBase,
    pub sym: SymId,
    pub text_type: ArticulationTextType,
    pub channel_name: String,
    pub play: bool,
}

impl Default for Articulation {
    fn default() -> Self {
        Articulation {
            item: ItemBase::default(),
            sym: SymId::NoSym,
            text_type: ArticulationTextType::NoText,
            channel_name: String::new(),
            play: true,
        }
    }
}

impl_item!(Articulation, item);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fermata {
    pub item: ItemBase,
    pub sym: SymId,
    pub play: bool,
    pub time_stretch: f64,
}

impl Default for Fermata {
    fn default() -> Self {
        Fermata {
            item: ItemBase::default(),
            sym: SymId::FermataAbove,
            play: true,
            time_stretch: 1.0,
        }
    }
}

impl_item!(Fermata, item);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breath {
    pub item: ItemBase,
    pub sym: SymId,
    /// Pause in seconds
    pub pause: f64,
}

impl Default for Breath {
    fn default() -> Self {
        Breath {
            item: ItemBase::default(),
            sym: SymId::BreathMarkComma,
            pause: 0.0,
        }
    }
}

impl_item!(Breath, item);

/// Point of a bend or whammy curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PitchValue {
    pub time: i32,
    pub pitch: i32,
    pub vibrato: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bend {
    pub item: ItemBase,
    pub points: Vec<PitchValue>,
    pub play: bool,
}

impl Default for Bend {
    fn default() -> Self {
        Bend {
            item: ItemBase::default(),
            points: Vec::new(),
            play: true,
        }
    }
}

impl_item!(Bend, item);

/// Whammy bar curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TremoloBar {
    pub item: ItemBase,
    pub points: Vec<PitchValue>,
    pub user_mag: f64,
    pub play: bool,
}

impl Default for TremoloBar {
    fn default() -> Self {
        TremoloBar {
            item: ItemBase::default(),
            points: Vec::new(),
            user_mag: 1.0,
            play: true,
        }
    }
}

impl_item!(TremoloBar, item);
