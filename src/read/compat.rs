//! Version gates and legacy encodings
//!
//! Every gate is a pure predicate over the version captured when the parse
//! started. Decoders call them inline, next to the field they affect.

use crate::model::chord::{Accidental, AccidentalBracket, AccidentalRole};
use crate::model::score::{AppVersion, MscVersion};
use crate::model::sym::SymId;
use crate::xml::XmlReader;

use super::context::ReadContext;
use super::item::read_item_properties;

// ============================================================================
// Schema version gates
// ============================================================================

/// A whole-note rest no longer than the measure means "fills the measure"
pub fn whole_rest_fills_measure(v: MscVersion) -> bool {
    v.0 < 112
}

/// Symbol ids are the 1.x numeric ids; measure rests carry no length
pub fn uses_1x_encoding(v: MscVersion) -> bool {
    v.0 <= 114
}

/// Frame gaps are absolute rather than spatium units
pub fn gaps_are_absolute(v: MscVersion) -> bool {
    v.0 < 206
}

/// Instrument changes inherit the transposition of the staff's part
pub fn instrument_change_inherits_transposition(v: MscVersion) -> bool {
    v.0 < 206
}

/// Spanners pair start and end through numeric ids
pub fn spanners_paired_by_id(v: MscVersion) -> bool {
    v.0 < 301
}

/// Accidentals inside an ambitus use the 2.x encoding
pub fn accidentals_use_206_encoding(v: MscVersion) -> bool {
    v.0 < 301
}

/// Frames do not size themselves to their content
pub fn box_auto_size_off(v: MscVersion) -> bool {
    v.0 < 302
}

/// Manual offsets of ornaments, chord lines and grace chords predate the
/// current layout and are dropped
pub fn ignores_old_offsets(v: MscVersion) -> bool {
    v.0 < 400
}

// ============================================================================
// Application version gates
// ============================================================================

/// Lyrics offsets were computed by the pre-3.1 autoplace rule
pub fn lyrics_offset_needs_reprojection(app: AppVersion) -> bool {
    app.is_before(3, 1)
}

/// `ornamentMordent` meant the short trill glyph before 3.6
pub fn mordent_means_short_trill(app: AppVersion) -> bool {
    app.is_before(3, 6)
}

// ============================================================================
// Legacy tables
// ============================================================================

/// Accidental symbol from a 1.x numeric id
pub fn convert_from_old_id(val: i32) -> SymId {
    match val {
        32 => SymId::AccidentalSharp,
        33 => SymId::AccidentalThreeQuarterTonesSharpArrowUp,
        34 => SymId::AccidentalQuarterToneSharpArrowDown,
        36 => SymId::AccidentalQuarterToneSharpStein,
        37 => SymId::AccidentalBuyukMucennebSharp,
        38 => SymId::AccidentalKomaSharp,
        39 => SymId::AccidentalThreeQuarterTonesSharpStein,
        40 => SymId::AccidentalNatural,
        41 => SymId::AccidentalQuarterToneSharpNaturalArrowUp,
        42 => SymId::AccidentalQuarterToneFlatNaturalArrowDown,
        44 => SymId::AccidentalFlat,
        45 => SymId::AccidentalQuarterToneFlatArrowUp,
        46 => SymId::AccidentalThreeQuarterTonesFlatArrowDown,
        48 => SymId::AccidentalBakiyeFlat,
        49 => SymId::AccidentalBuyukMucennebFlat,
        50 => SymId::AccidentalThreeQuarterTonesFlatZimmermann,
        51 => SymId::AccidentalQuarterToneFlatStein,
        53 => SymId::AccidentalDoubleFlat,
        55 => SymId::AccidentalDoubleSharp,
        56 => SymId::AccidentalSori,
        57 => SymId::AccidentalKoron,
        _ => {
            log::debug!("1.x symbol id {} has no counterpart", val);
            SymId::NoSym
        }
    }
}

/// Articulation symbol from a 2.x/3.0 articulation name
pub fn articulation_name_206(name: &str) -> SymId {
    match name.trim() {
        "fermata" => SymId::FermataAbove,
        "shortfermata" => SymId::FermataShortAbove,
        "longfermata" => SymId::FermataLongAbove,
        "verylongfermata" => SymId::FermataVeryLongAbove,
        "sforzato" => SymId::ArticulationAccentAbove,
        "staccato" => SymId::ArticulationStaccatoAbove,
        "staccatissimo" => SymId::ArticulationStaccatissimoAbove,
        "tenuto" => SymId::ArticulationTenutoAbove,
        "portato" => SymId::ArticulationTenutoStaccatoAbove,
        "marcato" => SymId::ArticulationMarcatoAbove,
        "fadein" => SymId::GuitarFadeIn,
        "fadeout" => SymId::GuitarFadeOut,
        "ouvert" => SymId::BrassMuteOpen,
        "plusstop" => SymId::BrassMuteClosed,
        "upbow" => SymId::StringsUpBow,
        "downbow" => SymId::StringsDownBow,
        "harmonic" => SymId::StringsHarmonic,
        "snappizzicato" => SymId::PluckedSnapPizzicatoAbove,
        "trill" => SymId::OrnamentTrill,
        "turn" => SymId::OrnamentTurn,
        "reverseturn" => SymId::OrnamentTurnInverted,
        "mordent" => SymId::OrnamentMordent,
        "prall" => SymId::OrnamentShortTrill,
        "prallprall" => SymId::OrnamentTremblement,
        "prallmordent" => SymId::OrnamentPrallMordent,
        "upprall" => SymId::OrnamentUpPrall,
        "downmordent" => SymId::OrnamentDownMordent,
        _ => SymId::NoSym,
    }
}

/// Accidental from a 2.x integer subtype
fn accidental_from_206_int(v: i32) -> SymId {
    match v {
        1 => SymId::AccidentalSharp,
        2 => SymId::AccidentalFlat,
        3 => SymId::AccidentalDoubleSharp,
        4 => SymId::AccidentalDoubleFlat,
        5 => SymId::AccidentalNatural,
        _ => SymId::NoSym,
    }
}

/// Accidental body as written by 2.x
pub fn read_accidental_206(acc: &mut Accidental, xml: &mut XmlReader<'_, '_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        match xml.name() {
            "subtype" => {
                let text = xml.read_text();
                acc.sym = match text.trim().parse::<i32>() {
                    Ok(v) => accidental_from_206_int(v),
                    Err(_) => match SymId::from_old_name(&text) {
                        SymId::NoSym => SymId::from_name(&text),
                        sym => sym,
                    },
                };
            }
            "hasBracket" => {
                acc.bracket = if xml.read_bool() {
                    AccidentalBracket::Parenthesis
                } else {
                    AccidentalBracket::None
                };
            }
            "role" => {
                let text = xml.read_text();
                acc.role = AccidentalRole::from_xml(&text).unwrap_or_default();
            }
            "small" => acc.small = xml.read_bool(),
            _ => {
                if !read_item_properties(&mut acc.item, xml, ctx) {
                    xml.unknown();
                }
            }
        }
    }
}
