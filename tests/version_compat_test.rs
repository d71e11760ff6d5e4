// Version-dependent reading of whole documents

use score_reader::model::types::DEFAULT_SPATIUM;
use score_reader::model::{Element, ElementType, MscVersion};
use score_reader::read_score;

fn frame_document(version: &str) -> String {
    format!(
        r#"<museScore version="{version}">
  <Score>
    <Staff id="1">
      <VBox><topGap>5</topGap><boxAutoSize>1</boxAutoSize></VBox>
    </Staff>
  </Score>
</museScore>"#
    )
}

fn top_gap_and_auto_size(version: &str) -> (f64, bool) {
    let result = read_score(&frame_document(version)).expect("frame document should read");
    let x = match result.score.frames().next() {
        Some(Element::VBox(b)) => (b.top_gap().expect("topGap should be set"), b.auto_size),
        other => panic!("expected a VBox, got {:?}", other.map(|e| e.element_type())),
    };
    x
}

#[test]
fn test_gap_before_206_is_absolute() {
    let (gap, _) = top_gap_and_auto_size("2.05");
    assert_eq!(gap, 5.0);
}

#[test]
fn test_gap_from_206_is_in_spatium() {
    let (gap, _) = top_gap_and_auto_size("2.06");
    assert!((gap - 5.0 * DEFAULT_SPATIUM).abs() < 1e-9);
}

#[test]
fn test_auto_size_only_from_302() {
    assert!(!top_gap_and_auto_size("3.01").1);
    assert!(top_gap_and_auto_size("3.02").1);
}

#[test]
fn test_version_and_program_version_are_recorded() {
    let src = r#"<museScore version="3.02"><programVersion>3.6.2</programVersion><Score/></museScore>"#;
    let score = read_score(src).unwrap().score;
    assert_eq!(score.msc_version, MscVersion(302));
    assert!(score.app_version.is_known());
    assert!(!score.app_version.is_before(3, 6));
    assert!(score.app_version.is_before(4, 0));
}

#[test]
fn test_old_whole_rest_becomes_measure_rest() {
    let src = r#"<museScore version="1.10">
  <Score>
    <Staff id="1">
      <Measure><Rest><durationType>whole</durationType></Rest></Measure>
      <Measure><Rest><durationType>quarter</durationType></Rest></Measure>
    </Staff>
  </Score>
</museScore>"#;
    let score = read_score(src).unwrap().score;
    let measures: Vec<_> = score.measures().collect();
    let first = measures[0].elements_of(ElementType::Rest).next().unwrap();
    match &first.element {
        Element::Rest(r) => assert_eq!(r.cr.duration_type.kind, score_reader::model::DurationType::Measure),
        _ => unreachable!(),
    }
    assert_eq!(measures[1].tick, score_reader::model::Fraction::new(1, 1));
}

#[test]
fn test_old_whole_rest_in_long_bar_stays_whole() {
    let src = r#"<museScore version="1.10">
  <Score>
    <Staff id="1">
      <Measure>
        <TimeSig><sigN>6</sigN><sigD>4</sigD></TimeSig>
        <Rest><durationType>whole</durationType></Rest>
        <Rest><durationType>half</durationType></Rest>
      </Measure>
      <Measure><Rest><durationType>quarter</durationType></Rest></Measure>
    </Staff>
  </Score>
</museScore>"#;
    let score = read_score(src).unwrap().score;
    let measures: Vec<_> = score.measures().collect();
    let rests: Vec<_> = measures[0].elements_of(ElementType::Rest).collect();
    match &rests[0].element {
        Element::Rest(r) => {
            assert_eq!(r.cr.duration_type.kind, score_reader::model::DurationType::Whole);
            assert_eq!(r.cr.ticks, score_reader::model::Fraction::new(1, 1));
        }
        _ => unreachable!(),
    }
    assert_eq!(rests[1].tick, score_reader::model::Fraction::new(1, 1));
    assert_eq!(measures[1].tick, score_reader::model::Fraction::new(3, 2));
}
