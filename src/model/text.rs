//! Text-like elements

use crate::model::element::ItemBase;
use crate::model::property::{Pid, PropertyValue};
use crate::model::staff::Instrument;
use crate::model::types::{Fraction, VOICES};
use serde::{Deserialize, Serialize};

pub const FONT_BOLD: i32 = 1;
pub const FONT_ITALIC: i32 = 2;
pub const FONT_UNDERLINE: i32 = 4;
pub const FONT_STRIKE: i32 = 8;

/// Named text style a text element is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextStyleType {
    #[default]
    Default,
    Title,
    Subtitle,
    Composer,
    Lyricist,
    Translator,
    Frame,
    InstrumentExcerpt,
    Tempo,
    Staff,
    System,
    Expression,
    RehearsalMark,
    InstrumentChange,
    Dynamics,
    Harmony,
    FiguredBass,
    RepeatLeft,
    RepeatRight,
    MeasureNumber,
    MmRestRange,
    Fingering,
    LyricsOdd,
    LyricsEven,
    Tuplet,
    Sticking,
    User(u8),
}

impl TextStyleType {
    pub fn from_xml(s: &str) -> Option<Self> {
        use TextStyleType::*;
        Some(match s.trim() {
            "default" | "Default" => Default,
            "title" | "Title" => Title,
            "subtitle" | "Subtitle" => Subtitle,
            "composer" | "Composer" => Composer,
            "lyricist" | "Lyricist" | "Poet" => Lyricist,
            "translator" | "Translator" => Translator,
            "frame" | "Frame" => Frame,
            "instrument_excerpt" | "Instrument Name (Part)" => InstrumentExcerpt,
            "tempo" | "Tempo" => Tempo,
            "staff" | "Staff" => Staff,
            "system" | "System" => System,
            "expression" | "Expression" => Expression,
            "rehearsal_mark" | "Rehearsal Mark" => RehearsalMark,
            "instrument_change" | "Instrument Change" => InstrumentChange,
            "dynamics" | "Dynamics" => Dynamics,
            "harmony_a" | "harmony" | "Chord Symbol" => Harmony,
            "figured_bass" | "Figured Bass" => FiguredBass,
            "repeat_left" | "Repeat Text Left" => RepeatLeft,
            "repeat_right" | "Repeat Text Right" => RepeatRight,
            "measure_number" | "Measure Number" => MeasureNumber,
            "mmrest_range" => MmRestRange,
            "fingering" | "Fingering" => Fingering,
            "lyrics_odd" | "Lyrics Odd Lines" => LyricsOdd,
            "lyrics_even" | "Lyrics Even Lines" => LyricsEven,
            "tuplet" | "Tuplet" => Tuplet,
            "sticking" | "Sticking" => Sticking,
            other => {
                let n: u8 = other.strip_prefix("user")?.parse().ok()?;
                User(n)
            }
        })
    }
}

/// Shared state of every text element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBase {
    pub item: ItemBase,
    /// Text with inline markup as written in the file
    pub xml_text: String,
    /// Explicit text style; `None` means the kind's default style
    pub text_style: Option<TextStyleType>,
}

impl_item!(TextBase, item);

impl TextBase {
    pub fn is_empty(&self) -> bool {
        self.xml_text.is_empty()
    }

    /// Text with inline markup removed
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for c in self.xml_text.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
    }

    pub fn font_style(&self) -> i32 {
        self.item.props.get(Pid::FontStyle).and_then(|v| v.as_int()).unwrap_or(0)
    }

    fn set_font_style_bit(&mut self, bit: i32, on: bool) {
        let style = if on { self.font_style() | bit } else { self.font_style() & !bit };
        self.item.props.set(Pid::FontStyle, PropertyValue::Int(style));
    }

    pub fn set_bold(&mut self, on: bool) {
        self.set_font_style_bit(FONT_BOLD, on);
    }

    pub fn set_italic(&mut self, on: bool) {
        self.set_font_style_bit(FONT_ITALIC, on);
    }

    pub fn set_underline(&mut self, on: bool) {
        self.set_font_style_bit(FONT_UNDERLINE, on);
    }

    pub fn set_strike(&mut self, on: bool) {
        self.set_font_style_bit(FONT_STRIKE, on);
    }
}

/// Tempo marking; `tempo` is in beats per second
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoText {
    pub text: TextBase,
    pub tempo: f64,
    pub follow_text: bool,
}

impl Default for TempoText {
    fn default() -> Self {
        TempoText {
            text: TextBase::default(),
            tempo: 2.0,
            follow_text: false,
        }
    }
}

impl_item!(TempoText, text.item);

impl TempoText {
    pub fn tempo_bpm(&self) -> f64 {
        self.tempo * 60.0
    }
}

/// MIDI actions attached to one output channel
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelActions {
    pub channel: i32,
    pub midi_action_names: Vec<String>,
}

/// Swing unit in ticks plus swing ratio in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwingParameters {
    pub swing_unit: i32,
    pub swing_ratio: i32,
}

/// Staff and system text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaffTextBase {
    pub text: TextBase,
    pub channel_actions: Vec<ChannelActions>,
    /// Channel switch per voice
    pub channel_names: [String; VOICES],
    pub aeolus_stops: [i32; 4],
    pub set_aeolus_stops: bool,
    pub swing: bool,
    pub swing_parameters: SwingParameters,
    pub capo: i32,
}

impl_item!(StaffTextBase, text.item);

impl StaffTextBase {
    /// Reset the playback state
    pub fn clear(&mut self) {
        self.channel_actions.clear();
        for name in self.channel_names.iter_mut() {
            name.clear();
        }
        self.aeolus_stops = [0; 4];
        self.set_aeolus_stops = false;
        self.swing = false;
        self.swing_parameters = SwingParameters::default();
        self.capo = 0;
    }

    /// Add an action name to a channel, merging into an existing entry
    pub fn add_midi_action(&mut self, channel: i32, name: String) {
        match self.channel_actions.iter_mut().find(|a| a.channel == channel) {
            Some(actions) => actions.midi_action_names.push(name),
            None => self.channel_actions.push(ChannelActions {
                channel,
                midi_action_names: vec![name],
            }),
        }
    }
}

/// Playing technique annotation such as "pizz." or "arco"
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayTechAnnotation {
    pub base: StaffTextBase,
}

impl_item!(PlayTechAnnotation, base.text.item);

impl PlayTechAnnotation {
    pub fn tech_type(&self) -> &str {
        self.base
            .text
            .item
            .props
            .get(Pid::PlayTechType)
            .and_then(|v| v.as_str())
            .unwrap_or("normal")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DynamicRange {
    #[default]
    Staff,
    Part,
    System,
}

impl DynamicRange {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "staff" | "0" => Some(DynamicRange::Staff),
            "part" | "1" => Some(DynamicRange::Part),
            "system" | "2" => Some(DynamicRange::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DynamicSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl DynamicSpeed {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "slow" => Some(DynamicSpeed::Slow),
            "normal" => Some(DynamicSpeed::Normal),
            "fast" => Some(DynamicSpeed::Fast),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dynamic {
    pub text: TextBase,
    /// Dynamic name such as `mf` or `sfz`
    pub dynamic_type: String,
    /// MIDI velocity; -1 when not set
    pub velocity: i32,
    pub dyn_range: DynamicRange,
    pub change_in_velocity: i32,
    pub velo_change_speed: DynamicSpeed,
}

impl Default for Dynamic {
    fn default() -> Self {
        Dynamic {
            text: TextBase::default(),
            dynamic_type: String::new(),
            velocity: -1,
            dyn_range: DynamicRange::Part,
            change_in_velocity: 128,
            velo_change_speed: DynamicSpeed::Normal,
        }
    }
}

impl_item!(Dynamic, text.item);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstrumentChange {
    pub text: TextBase,
    pub instrument: Instrument,
    pub init: bool,
}

impl_item!(InstrumentChange, text.item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerType {
    #[default]
    Segno,
    VarSegno,
    Coda,
    VarCoda,
    Codetta,
    Fine,
    ToCoda,
    ToCodaSym,
    DaCoda,
    DaDblCoda,
    User,
}

impl MarkerType {
    pub fn from_xml(s: &str) -> Option<Self> {
        use MarkerType::*;
        Some(match s.trim() {
            "segno" => Segno,
            "varsegno" => VarSegno,
            "codab" => Coda,
            "varcoda" => VarCoda,
            "codetta" => Codetta,
            "fine" => Fine,
            "coda" => ToCoda,
            "tocodasym" => ToCodaSym,
            "dacoda" => DaCoda,
            "danumbercoda" => DaDblCoda,
            "user" => User,
            _ => return None,
        })
    }
}

/// Navigation target such as segno or coda
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Marker {
    pub text: TextBase,
    pub label: String,
    pub marker_type: MarkerType,
}

impl_item!(Marker, text.item);

/// Navigation instruction such as "D.S. al Coda"
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Jump {
    pub text: TextBase,
    pub jump_to: String,
    pub play_until: String,
    pub continue_at: String,
    pub play_repeats: bool,
}

impl_item!(Jump, text.item);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LyricsSyllabic {
    #[default]
    Single,
    Begin,
    End,
    Middle,
}

impl LyricsSyllabic {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "single" => Some(LyricsSyllabic::Single),
            "begin" => Some(LyricsSyllabic::Begin),
            "end" => Some(LyricsSyllabic::End),
            "middle" => Some(LyricsSyllabic::Middle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lyrics {
    pub text: TextBase,
    /// Verse number, 0-based
    pub no: i32,
    pub syllabic: LyricsSyllabic,
    /// Melisma length
    pub ticks: Fraction,
}

impl Default for Lyrics {
    fn default() -> Self {
        Lyrics {
            text: TextBase::default(),
            no: 0,
            syllabic: LyricsSyllabic::Single,
            ticks: Fraction::from_integer(0),
        }
    }
}

impl_item!(Lyrics, text.item);

/// One line of a figured bass stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiguredBassItem {
    pub prefix: i32,
    /// Figure digit; -1 when the line has none
    pub digit: i32,
    pub suffix: i32,
    pub continuation_line: i32,
    pub parenth: [i32; 5],
}

impl Default for FiguredBassItem {
    fn default() -> Self {
        FiguredBassItem {
            prefix: 0,
            digit: -1,
            suffix: 0,
            continuation_line: 0,
            parenth: [0; 5],
        }
    }
}

impl FiguredBassItem {
    fn modifier_text(m: i32) -> &'static str {
        match m {
            1 => "bb",
            2 => "b",
            3 => "h",
            4 => "#",
            5 => "##",
            6 => "+",
            7 => "\\",
            8 => "/",
            _ => "",
        }
    }

    /// Text form used while editing, e.g. `b6` or `#`
    pub fn normalized_text(&self) -> String {
        let mut s = String::from(Self::modifier_text(self.prefix));
        if self.digit >= 0 {
            s.push_str(&self.digit.to_string());
        }
        s.push_str(Self::modifier_text(self.suffix));
        if self.continuation_line > 0 {
            s.push('_');
        }
        s
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiguredBass {
    pub text: TextBase,
    pub ticks: Fraction,
    pub on_note: bool,
    pub items: Vec<FiguredBassItem>,
}

impl Default for FiguredBass {
    fn default() -> Self {
        FiguredBass {
            text: TextBase::default(),
            ticks: Fraction::from_integer(0),
            on_note: true,
            items: Vec::new(),
        }
    }
}

impl_item!(FiguredBass, text.item);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_markup() {
        let t = TextBase {
            xml_text: "<b>Allegro</b> &amp; fast".into(),
            ..Default::default()
        };
        assert_eq!(t.plain_text(), "Allegro & fast");
    }

    #[test]
    fn test_font_style_bits() {
        let mut t = TextBase::default();
        t.set_bold(true);
        t.set_underline(true);
        assert_eq!(t.font_style(), FONT_BOLD | FONT_UNDERLINE);
        t.set_bold(false);
        assert_eq!(t.font_style(), FONT_UNDERLINE);
    }

    #[test]
    fn test_midi_actions_merge_by_channel() {
        let mut st = StaffTextBase::default();
        st.add_midi_action(1, "pizz".into());
        st.add_midi_action(2, "arco".into());
        st.add_midi_action(1, "mute".into());
        assert_eq!(st.channel_actions.len(), 2);
        assert_eq!(st.channel_actions[0].midi_action_names, vec!["pizz", "mute"]);
    }

    #[test]
    fn test_figured_bass_text() {
        let item = FiguredBassItem {
            prefix: 2,
            digit: 6,
            ..Default::default()
        };
        assert_eq!(item.normalized_text(), "b6");
    }

    #[test]
    fn test_text_style_names() {
        assert_eq!(TextStyleType::from_xml("tempo"), Some(TextStyleType::Tempo));
        assert_eq!(TextStyleType::from_xml("user3"), Some(TextStyleType::User(3)));
        assert_eq!(TextStyleType::from_xml("nonsense"), None);
    }
}
