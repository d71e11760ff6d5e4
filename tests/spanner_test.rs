// Pairing of spanner starts and ends in old and current files

use score_reader::model::{ElementType, Fraction};
use score_reader::read::LayoutNotify;
use score_reader::{read_score, read_score_with_layout_notify, ReadSettings};
use std::cell::RefCell;
use std::rc::Rc;

const MODERN: &str = r#"<museScore version="4.00">
  <Score>
    <Staff id="1">
      <Measure>
        <voice>
          <Spanner type="HairPin">
            <HairPin><subtype>0</subtype></HairPin>
            <next><location><fractions>1/2</fractions></location></next>
          </Spanner>
          <Chord><durationType>quarter</durationType><Note><pitch>60</pitch></Note></Chord>
          <Chord><durationType>quarter</durationType><Note><pitch>62</pitch></Note></Chord>
          <Spanner type="HairPin">
            <prev><location><fractions>-1/2</fractions></location></prev>
          </Spanner>
          <Rest><durationType>half</durationType></Rest>
        </voice>
        <LayoutBreak><subtype>line</subtype></LayoutBreak>
      </Measure>
    </Staff>
  </Score>
</museScore>"#;

#[test]
fn test_modern_spanner_gets_end_from_location() {
    let result = read_score(MODERN).unwrap();
    assert!(result.unresolved_spanners.is_empty());
    assert_eq!(result.score.spanners.len(), 1);
    let hairpin = &result.score.spanners[0];
    assert_eq!(hairpin.element_type(), ElementType::Hairpin);
    let data = hairpin.spanner().unwrap();
    assert_eq!(data.tick, Some(Fraction::new(0, 1)));
    assert_eq!(data.ticks, Fraction::new(1, 2));
    assert!(result.skipped_elements.is_empty(), "{:?}", result.skipped_elements);
}

#[test]
fn test_legacy_spanners_pair_by_id() {
    let src = r#"<museScore version="2.06">
  <Score>
    <Staff id="1">
      <Measure>
        <HairPin id="1"><subtype>0</subtype></HairPin>
        <TextLine id="3"><beginText>rit.</beginText></TextLine>
        <Chord><durationType>quarter</durationType><Note><pitch>60</pitch></Note></Chord>
        <endSpanner id="1"/>
        <Chord><durationType>half</durationType><Note><pitch>64</pitch></Note></Chord>
        <endSpanner id="9"/>
      </Measure>
    </Staff>
  </Score>
</museScore>"#;
    let result = read_score(src).unwrap();
    assert_eq!(result.score.spanners.len(), 1);
    let data = result.score.spanners[0].spanner().unwrap();
    assert_eq!(data.ticks, Fraction::new(1, 4));
    assert!(data.resolved);
    assert_eq!(result.unresolved_spanners, vec![3]);
}

struct Recorder(Rc<RefCell<Vec<ElementType>>>);

impl LayoutNotify for Recorder {
    fn element_read(&mut self, element_type: ElementType, _track: i32) {
        self.0.borrow_mut().push(element_type);
    }
}

#[test]
fn test_layout_observer_sees_hairpin_and_break() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let observer = Box::new(Recorder(Rc::clone(&seen)));
    read_score_with_layout_notify(MODERN, ReadSettings::default(), observer).unwrap();
    assert_eq!(*seen.borrow(), vec![ElementType::Hairpin, ElementType::LayoutBreak]);
}
