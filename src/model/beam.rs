//! Beams and tuplets

use crate::model::element::ItemBase;
use crate::model::text::TextBase;
use crate::model::types::{Fraction, PointF, TDuration};
use serde::{Deserialize, Serialize};

/// Vertical beam offsets for both stem directions; index 0 is down, 1 is up
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamFragment {
    pub py1: [f64; 2],
    pub py2: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub item: ItemBase,
    /// Cross-reference id used by older files
    pub id: Option<i32>,
    pub fragments: Vec<BeamFragment>,
    pub grow_left: f64,
    pub grow_right: f64,
    pub user_modified: [bool; 2],
}

impl Default for Beam {
    fn default() -> Self {
        Beam {
            item: ItemBase::default(),
            id: None,
            fragments: Vec::new(),
            grow_left: 1.0,
            grow_right: 1.0,
            user_modified: [false; 2],
        }
    }
}

impl_item!(Beam, item);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuplet {
    pub item: ItemBase,
    pub id: i32,
    /// Notes played ("actualNotes")
    pub numerator: i32,
    /// Notes they take the time of ("normalNotes")
    pub denominator: i32,
    pub base_len: TDuration,
    /// Total length, `base_len * denominator`
    pub ticks: Fraction,
    /// Bracket start and end adjustments
    pub p1: PointF,
    pub p2: PointF,
    pub number: Option<TextBase>,
    /// Enclosing tuplet id for nested tuplets
    pub tuplet: Option<i32>,
}

impl Default for Tuplet {
    fn default() -> Self {
        Tuplet {
            item: ItemBase::default(),
            id: 0,
            numerator: 1,
            denominator: 1,
            base_len: TDuration::default(),
            ticks: Fraction::from_integer(0),
            p1: PointF::default(),
            p2: PointF::default(),
            number: None,
            tuplet: None,
        }
    }
}

impl_item!(Tuplet, item);

impl Tuplet {
    /// Scale factor applied to member durations
    pub fn ratio(&self) -> Fraction {
        if self.numerator <= 0 || self.denominator <= 0 {
            return Fraction::from_integer(1);
        }
        Fraction::new(self.numerator, self.denominator)
    }

    pub fn compute_ticks(&mut self) {
        self.ticks = self.base_len.fraction() * Fraction::from_integer(self.denominator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::DurationType;

    #[test]
    fn test_triplet_ticks() {
        let mut t = Tuplet {
            numerator: 3,
            denominator: 2,
            base_len: TDuration::new(DurationType::Eighth),
            ..Default::default()
        };
        t.compute_ticks();
        assert_eq!(t.ticks, Fraction::new(1, 4));
        assert_eq!(t.ratio(), Fraction::new(3, 2));
    }
}
