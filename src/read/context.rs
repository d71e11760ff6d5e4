//! Per-parse state threaded through every decoder
//!
//! One `ReadContext` lives for exactly one document read. It carries the
//! schema version captured at the start of the parse, the position the walker
//! has reached (tick and track), what the decoders need to know about staves
//! and parts, and the table that pairs legacy spanner starts with their ends.

use crate::model::element::{Element, ElementType};
use crate::model::score::{AppVersion, MscVersion};
use crate::model::style::Style;
use crate::model::types::{checked_add, Fraction, Interval};
use crate::settings::ReadSettings;
use std::collections::{BTreeMap, BTreeSet};

use super::compat;

/// Observer for elements whose reading would trigger layout in an editor
pub trait LayoutNotify {
    fn element_read(&mut self, element_type: ElementType, track: i32);
}

/// What the decoders need to know about one staff
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffInfo {
    /// Index of the first staff of the owning part
    pub part_first_staff: usize,
    /// Number of staves in the owning part
    pub part_nstaves: usize,
    /// Transposition of the owning part's instrument
    pub transpose: Interval,
}

pub struct ReadContext {
    version: MscVersion,
    app_version: AppVersion,
    settings: ReadSettings,
    style: Style,
    tick: Fraction,
    track: i32,
    time_sig: Fraction,
    measure_len: Fraction,
    staves: Vec<StaffInfo>,
    fonts: BTreeSet<String>,
    /// Legacy spanners waiting for their `endSpanner`, keyed by id
    pending_spanners: BTreeMap<i32, Element>,
    spanners: Vec<Element>,
    layout: Option<Box<dyn LayoutNotify>>,
}

impl ReadContext {
    pub fn new(version: MscVersion, settings: ReadSettings) -> Self {
        ReadContext {
            version,
            app_version: AppVersion::default(),
            settings,
            style: Style::default(),
            tick: Fraction::from_integer(0),
            track: 0,
            time_sig: Fraction::new(4, 4),
            measure_len: Fraction::new(4, 4),
            staves: Vec::new(),
            fonts: BTreeSet::new(),
            pending_spanners: BTreeMap::new(),
            spanners: Vec::new(),
            layout: None,
        }
    }

    pub fn with_app_version(mut self, app_version: AppVersion) -> Self {
        self.app_version = app_version;
        self
    }

    pub fn version(&self) -> MscVersion {
        self.version
    }

    pub fn app_version(&self) -> AppVersion {
        self.app_version
    }

    pub fn settings(&self) -> &ReadSettings {
        &self.settings
    }

    pub fn paste_mode(&self) -> bool {
        self.settings.paste_mode
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn spatium(&self) -> f64 {
        self.style.spatium()
    }

    // ------------------------------------------------------------------
    // Position
    // ------------------------------------------------------------------

    pub fn tick(&self) -> Fraction {
        self.tick
    }

    pub fn set_tick(&mut self, tick: Fraction) {
        self.tick = tick;
    }

    /// Advance the current tick; a sum that overflows leaves it unchanged
    pub fn inc_tick(&mut self, by: Fraction) {
        match checked_add(self.tick, by) {
            Some(tick) => self.tick = tick,
            None => log::warn!("tick {} + {} overflows, position kept", self.tick, by),
        }
    }

    pub fn track(&self) -> i32 {
        self.track
    }

    pub fn set_track(&mut self, track: i32) {
        self.track = track;
    }

    /// Nominal measure length of the current time signature
    pub fn time_sig(&self) -> Fraction {
        self.time_sig
    }

    pub fn set_time_sig(&mut self, sig: Fraction) {
        self.time_sig = sig;
    }

    /// Actual length of the measure being read
    pub fn measure_len(&self) -> Fraction {
        self.measure_len
    }

    pub fn set_measure_len(&mut self, len: Fraction) {
        self.measure_len = len;
    }

    // ------------------------------------------------------------------
    // Staves and fonts
    // ------------------------------------------------------------------

    pub fn set_staves(&mut self, staves: Vec<StaffInfo>) {
        self.staves = staves;
    }

    pub fn staff_info(&self, staff_idx: i32) -> Option<&StaffInfo> {
        usize::try_from(staff_idx).ok().and_then(|i| self.staves.get(i))
    }

    pub fn nstaves(&self) -> usize {
        self.staves.len()
    }

    pub fn register_font(&mut self, name: &str) {
        if !name.is_empty() {
            self.fonts.insert(name.to_string());
        }
    }

    /// Engraving fonts referenced by symbols so far
    pub fn fonts(&self) -> &BTreeSet<String> {
        &self.fonts
    }

    // ------------------------------------------------------------------
    // Layout notification
    // ------------------------------------------------------------------

    pub fn set_layout_notify(&mut self, observer: Box<dyn LayoutNotify>) {
        self.layout = Some(observer);
    }

    pub fn take_layout_notify(&mut self) -> Option<Box<dyn LayoutNotify>> {
        self.layout.take()
    }

    pub fn notify_layout(&mut self, element_type: ElementType, track: i32) {
        if let Some(observer) = self.layout.as_mut() {
            observer.element_read(element_type, track);
        }
    }

    // ------------------------------------------------------------------
    // Spanners
    // ------------------------------------------------------------------

    /// Register a decoded spanner.
    ///
    /// The start tick defaults to the current position. Spanners of
    /// id-paired files that carry an id wait in the pending table for their
    /// `endSpanner`; everything else is final.
    pub fn add_spanner(&mut self, mut element: Element) {
        let tick = self.tick;
        let legacy_id = match element.spanner_mut() {
            Some(data) => {
                data.tick.get_or_insert(tick);
                data.legacy_id
            }
            None => {
                log::debug!("{} is not a spanner", element.element_type().name());
                return;
            }
        };
        match legacy_id {
            Some(id) if compat::spanners_paired_by_id(self.version) => {
                if self.pending_spanners.insert(id, element).is_some() {
                    log::warn!("spanner id {} reused before its end was read", id);
                }
            }
            _ => self.spanners.push(element),
        }
    }

    /// Close the pending spanner `id` at the current tick and track
    pub fn end_spanner(&mut self, id: i32) -> bool {
        match self.pending_spanners.remove(&id) {
            Some(mut element) => {
                let (tick, track) = (self.tick, self.track);
                if let Some(data) = element.spanner_mut() {
                    data.set_end(tick, track);
                }
                self.spanners.push(element);
                true
            }
            None => {
                log::warn!("endSpanner {}: no open spanner with this id", id);
                false
            }
        }
    }

    pub fn has_pending_spanners(&self) -> bool {
        !self.pending_spanners.is_empty()
    }

    pub fn take_spanners(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.spanners)
    }

    /// Drop every spanner still waiting for its end; returns their ids
    pub fn drain_unresolved_spanners(&mut self) -> Vec<i32> {
        let pending = std::mem::take(&mut self.pending_spanners);
        pending
            .into_iter()
            .map(|(id, element)| {
                log::warn!(
                    "dropping unresolved {} with id {}",
                    element.element_type().name(),
                    id
                );
                id
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::EngravingItem;
    use crate::model::line::Hairpin;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn legacy_hairpin(id: i32) -> Element {
        let mut h = Hairpin::create(ElementType::Hairpin);
        h.base.line.spanner.legacy_id = Some(id);
        Element::Hairpin(Box::new(h))
    }

    #[test]
    fn test_inc_tick_overflow_keeps_position() {
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        ctx.set_tick(Fraction::from_integer(i32::MAX - 1));
        ctx.inc_tick(Fraction::from_integer(4));
        assert_eq!(ctx.tick(), Fraction::from_integer(i32::MAX - 1));
        ctx.inc_tick(Fraction::from_integer(1));
        assert_eq!(ctx.tick(), Fraction::from_integer(i32::MAX));
    }

    #[test]
    fn test_legacy_pairing() {
        let mut ctx = ReadContext::new(MscVersion(206), ReadSettings::default());
        ctx.set_tick(Fraction::new(1, 4));
        ctx.add_spanner(legacy_hairpin(3));
        assert!(ctx.has_pending_spanners());

        ctx.set_tick(Fraction::new(3, 4));
        ctx.set_track(4);
        assert!(ctx.end_spanner(3));
        assert!(!ctx.end_spanner(3));

        let spanners = ctx.take_spanners();
        assert_eq!(spanners.len(), 1);
        let mut e = spanners.into_iter().next().unwrap();
        let data = e.spanner_mut().unwrap();
        assert_eq!(data.tick, Some(Fraction::new(1, 4)));
        assert_eq!(data.ticks, Fraction::new(1, 2));
        assert_eq!(data.track2, Some(4));
    }

    #[test]
    fn test_modern_files_ignore_ids() {
        let mut ctx = ReadContext::new(MscVersion(400), ReadSettings::default());
        ctx.add_spanner(legacy_hairpin(1));
        assert!(!ctx.has_pending_spanners());
        assert_eq!(ctx.take_spanners().len(), 1);
    }

    #[test]
    fn test_unresolved_are_dropped() {
        let mut ctx = ReadContext::new(MscVersion(114), ReadSettings::default());
        ctx.add_spanner(legacy_hairpin(7));
        ctx.add_spanner(legacy_hairpin(2));
        assert_eq!(ctx.drain_unresolved_spanners(), vec![2, 7]);
        assert!(ctx.take_spanners().is_empty());
    }

    struct Recorder(Rc<RefCell<Vec<ElementType>>>);

    impl LayoutNotify for Recorder {
        fn element_read(&mut self, element_type: ElementType, _track: i32) {
            self.0.borrow_mut().push(element_type);
        }
    }

    #[test]
    fn test_layout_notify() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
        ctx.notify_layout(ElementType::Image, 0);
        ctx.set_layout_notify(Box::new(Recorder(seen.clone())));
        ctx.notify_layout(ElementType::LayoutBreak, 0);
        assert_eq!(*seen.borrow(), vec![ElementType::LayoutBreak]);
    }
}
