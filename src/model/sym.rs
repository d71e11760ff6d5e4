//! Symbol identifiers and their name tables
//!
//! Covers the glyphs the reader needs to resolve by name: accidentals,
//! articulations, ornaments, breath marks, fermatas and a few structural
//! symbols. Names follow SMuFL; old names and user-facing names are kept as
//! separate lookup tables for legacy files.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

macro_rules! sym_ids {
    ($($id:ident => ($name:literal, $user:literal, $width:literal),)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum SymId {
            #[default]
            NoSym,
            $($id,)*
        }

        const SYMBOLS: &[(SymId, &str, &str, f64)] = &[
            $((SymId::$id, $name, $user, $width),)*
        ];
    };
}

sym_ids! {
    AccidentalSharp => ("accidentalSharp", "Sharp", 0.996),
    AccidentalFlat => ("accidentalFlat", "Flat", 0.904),
    AccidentalNatural => ("accidentalNatural", "Natural", 0.672),
    AccidentalDoubleSharp => ("accidentalDoubleSharp", "Double sharp", 0.988),
    AccidentalDoubleFlat => ("accidentalDoubleFlat", "Double flat", 1.644),
    AccidentalThreeQuarterTonesSharpArrowUp => ("accidentalThreeQuarterTonesSharpArrowUp", "Three-quarter-tones sharp", 1.0),
    AccidentalQuarterToneSharpArrowDown => ("accidentalQuarterToneSharpArrowDown", "Quarter-tone sharp", 1.0),
    AccidentalQuarterToneSharpStein => ("accidentalQuarterToneSharpStein", "Half sharp (quarter-tone sharp) (Stein)", 0.68),
    AccidentalBuyukMucennebSharp => ("accidentalBuyukMucennebSharp", "Büyük mücenneb (sharp)", 1.0),
    AccidentalKomaSharp => ("accidentalKomaSharp", "Koma (sharp)", 1.0),
    AccidentalThreeQuarterTonesSharpStein => ("accidentalThreeQuarterTonesSharpStein", "One and a half sharps (three-quarter-tones sharp) (Stein)", 1.3),
    AccidentalQuarterToneSharpNaturalArrowUp => ("accidentalQuarterToneSharpNaturalArrowUp", "Quarter-tone sharp natural", 0.7),
    AccidentalQuarterToneFlatNaturalArrowDown => ("accidentalQuarterToneFlatNaturalArrowDown", "Quarter-tone flat natural", 0.7),
    AccidentalQuarterToneFlatArrowUp => ("accidentalQuarterToneFlatArrowUp", "Quarter-tone flat", 0.9),
    AccidentalThreeQuarterTonesFlatArrowDown => ("accidentalThreeQuarterTonesFlatArrowDown", "Three-quarter-tones flat", 0.9),
    AccidentalBakiyeFlat => ("accidentalBakiyeFlat", "Bakiye (flat)", 0.9),
    AccidentalBuyukMucennebFlat => ("accidentalBuyukMucennebFlat", "Büyük mücenneb (flat)", 0.9),
    AccidentalThreeQuarterTonesFlatZimmermann => ("accidentalThreeQuarterTonesFlatZimmermann", "Three-quarter-tones flat (Zimmermann)", 1.6),
    AccidentalQuarterToneFlatStein => ("accidentalQuarterToneFlatStein", "Reversed flat (quarter-tone flat) (Stein)", 0.9),
    AccidentalSori => ("accidentalSori", "Sori (quarter-tone sharp)", 1.0),
    AccidentalKoron => ("accidentalKoron", "Koron (quarter-tone flat)", 0.9),

    ArticulationAccentAbove => ("articulationAccentAbove", "Accent above", 1.1),
    ArticulationAccentBelow => ("articulationAccentBelow", "Accent below", 1.1),
    ArticulationStaccatoAbove => ("articulationStaccatoAbove", "Staccato above", 0.4),
    ArticulationStaccatoBelow => ("articulationStaccatoBelow", "Staccato below", 0.4),
    ArticulationStaccatissimoAbove => ("articulationStaccatissimoAbove", "Staccatissimo above", 0.4),
    ArticulationTenutoAbove => ("articulationTenutoAbove", "Tenuto above", 1.3),
    ArticulationTenutoBelow => ("articulationTenutoBelow", "Tenuto below", 1.3),
    ArticulationTenutoStaccatoAbove => ("articulationTenutoStaccatoAbove", "Louré (tenuto-staccato) above", 1.3),
    ArticulationMarcatoAbove => ("articulationMarcatoAbove", "Marcato above", 0.9),
    ArticulationMarcatoBelow => ("articulationMarcatoBelow", "Marcato below", 0.9),

    FermataAbove => ("fermataAbove", "Fermata above", 2.2),
    FermataBelow => ("fermataBelow", "Fermata below", 2.2),
    FermataShortAbove => ("fermataShortAbove", "Short fermata above", 2.0),
    FermataLongAbove => ("fermataLongAbove", "Long fermata above", 2.3),
    FermataVeryLongAbove => ("fermataVeryLongAbove", "Very long fermata above", 2.3),

    OrnamentTrill => ("ornamentTrill", "Trill", 1.6),
    OrnamentTurn => ("ornamentTurn", "Turn", 1.8),
    OrnamentTurnInverted => ("ornamentTurnInverted", "Inverted turn", 1.8),
    OrnamentMordent => ("ornamentMordent", "Mordent", 1.7),
    OrnamentShortTrill => ("ornamentShortTrill", "Short trill", 1.7),
    OrnamentTremblement => ("ornamentTremblement", "Trill (baroque)", 2.5),
    OrnamentPrallMordent => ("ornamentPrallMordent", "Inverted mordent with a slash", 2.5),
    OrnamentUpPrall => ("ornamentUpPrall", "Slide up", 2.5),
    OrnamentDownMordent => ("ornamentDownMordent", "Mordent with release", 2.5),

    BrassMuteClosed => ("brassMuteClosed", "Muted (closed)", 1.0),
    BrassMuteOpen => ("brassMuteOpen", "Open", 1.0),
    StringsUpBow => ("stringsUpBow", "Up bow", 1.0),
    StringsDownBow => ("stringsDownBow", "Down bow", 1.2),
    StringsHarmonic => ("stringsHarmonic", "Harmonic", 0.6),
    GuitarFadeIn => ("guitarFadeIn", "Fade in", 1.5),
    GuitarFadeOut => ("guitarFadeOut", "Fade out", 1.5),
    PluckedSnapPizzicatoAbove => ("pluckedSnapPizzicatoAbove", "Snap pizzicato above", 1.0),

    BreathMarkComma => ("breathMarkComma", "Breath mark (comma)", 0.6),
    Caesura => ("caesura", "Caesura", 1.5),
    CaesuraCurved => ("caesuraCurved", "Curved caesura", 1.5),

    Segno => ("segno", "Segno", 1.6),
    Coda => ("coda", "Coda", 1.9),
    MetNoteQuarterUp => ("metNoteQuarterUp", "Quarter note (crotchet) stem up", 1.2),
    SystemDivider => ("systemDivider", "System divider", 3.5),
    SystemDividerLong => ("systemDividerLong", "Long system divider", 4.5),
    SystemDividerExtraLong => ("systemDividerExtraLong", "Extra long system divider", 5.5),
    KeyboardPedalPed => ("keyboardPedalPed", "Pedal mark", 2.3),
    KeyboardPedalUp => ("keyboardPedalUp", "Pedal up mark", 1.5),
}

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, SymId> = {
        let mut map: HashMap<&'static str, SymId> = SYMBOLS.iter().map(|s| (s.1, s.0)).collect();
        map.insert("noSym", SymId::NoSym);
        map
    };
    static ref BY_USER_NAME: HashMap<&'static str, SymId> = SYMBOLS.iter().map(|s| (s.2, s.0)).collect();
    static ref BY_OLD_NAME: HashMap<&'static str, SymId> = OLD_NAMES.iter().copied().collect();
}

/// Symbol names used by 1.x files
const OLD_NAMES: &[(&str, SymId)] = &[
    ("sharp", SymId::AccidentalSharp),
    ("flat", SymId::AccidentalFlat),
    ("natural", SymId::AccidentalNatural),
    ("sharpsharp", SymId::AccidentalDoubleSharp),
    ("flatflat", SymId::AccidentalDoubleFlat),
    ("mirroredflat", SymId::AccidentalQuarterToneFlatStein),
    ("mirroredflat2", SymId::AccidentalThreeQuarterTonesFlatZimmermann),
    ("sharp-slash", SymId::AccidentalQuarterToneSharpStein),
    ("sharp-slash2", SymId::AccidentalBuyukMucennebSharp),
    ("sharp-slash3", SymId::AccidentalKomaSharp),
    ("sharp-slash4", SymId::AccidentalThreeQuarterTonesSharpStein),
    ("flat-slash", SymId::AccidentalBakiyeFlat),
    ("flat-slash2", SymId::AccidentalBuyukMucennebFlat),
    ("sori", SymId::AccidentalSori),
    ("koron", SymId::AccidentalKoron),
];

impl SymId {
    /// Resolve a SMuFL name; unknown names give `NoSym`
    pub fn from_name(name: &str) -> SymId {
        BY_NAME.get(name.trim()).copied().unwrap_or(SymId::NoSym)
    }

    /// Resolve a user-facing name as shown in palettes
    pub fn from_user_name(name: &str) -> SymId {
        BY_USER_NAME.get(name.trim()).copied().unwrap_or(SymId::NoSym)
    }

    /// Resolve a 1.x symbol name
    pub fn from_old_name(name: &str) -> SymId {
        BY_OLD_NAME.get(name.trim()).copied().unwrap_or(SymId::NoSym)
    }

    pub fn name(self) -> &'static str {
        SYMBOLS
            .iter()
            .find(|s| s.0 == self)
            .map(|s| s.1)
            .unwrap_or("noSym")
    }

    /// Advance width in spatium units
    pub fn width(self) -> f64 {
        SYMBOLS.iter().find(|s| s.0 == self).map(|s| s.3).unwrap_or(0.0)
    }

    pub fn is_flat(self) -> bool {
        self.name().contains("Flat")
    }
}
