// Entry points, error reporting and skipped-element bookkeeping

use score_reader::model::{Element, ElementType, Fraction, HDegreeType};
use score_reader::{read_score, read_score_file, read_score_with_settings, ReadError, ReadSettings};
use std::io::Write;

const SCORE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<museScore version="4.20">
  <programVersion>4.2.1</programVersion>
  <Score>
    <metaTag name="composer">Anon</metaTag>
    <Part id="1">
      <Staff id="1"/>
      <Staff id="2"/>
      <trackName>Piano</trackName>
      <Instrument id="piano"><longName>Piano</longName></Instrument>
    </Part>
    <Staff id="1">
      <Measure>
        <voice>
          <Harmony><root>14</root><name>7addb9</name>
            <degree><degree-value>9</degree-value><degree-alter>-1</degree-alter><degree-type>add</degree-type></degree>
            <degree><degree-value>5</degree-value><degree-alter>0</degree-alter><degree-type>subtract</degree-type></degree>
          </Harmony>
          <Chord><durationType>whole</durationType><Note><pitch>60</pitch></Note></Chord>
        </voice>
      </Measure>
    </Staff>
    <Staff id="2">
      <Measure>
        <voice>
          <Image><path>cover.png</path></Image>
          <Rest><durationType>measure</durationType><duration>4/4</duration></Rest>
        </voice>
      </Measure>
    </Staff>
  </Score>
</museScore>
"#;

#[test]
fn test_staves_share_measures() {
    let score = read_score(SCORE).unwrap().score;
    assert_eq!(score.nstaves(), 2);
    assert_eq!(score.part_of_staff(1).map(|p| p.name.as_str()), Some("Piano"));
    let measures: Vec<_> = score.measures().collect();
    assert_eq!(measures.len(), 1);
    let rest = measures[0].elements_of(ElementType::Rest).next().unwrap();
    assert_eq!(rest.track, 4);
    assert_eq!(rest.tick, Fraction::new(0, 1));
}

#[test]
fn test_harmony_keeps_valid_degrees() {
    let score = read_score(SCORE).unwrap().score;
    let measure = score.measures().next().unwrap();
    let harmony = measure.elements_of(ElementType::Harmony).next().unwrap();
    match &harmony.element {
        Element::Harmony(h) => {
            assert_eq!(h.degrees.len(), 2);
            assert_eq!(h.degrees[0].kind, HDegreeType::Add);
            assert_eq!(h.degrees[1].kind, HDegreeType::Subtract);
            assert_eq!(h.harmony_name, "C7addb9no5");
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_images_can_be_skipped() {
    let with_images = read_score(SCORE).unwrap().score;
    let count = |score: &score_reader::model::Score| {
        score.measures().map(|m| m.elements_of(ElementType::Image).count()).sum::<usize>()
    };
    assert_eq!(count(&with_images), 1);

    let settings = ReadSettings {
        no_images: true,
        ..ReadSettings::default()
    };
    let without = read_score_with_settings(SCORE, settings).unwrap().score;
    assert_eq!(count(&without), 0);
}

#[test]
fn test_unknown_elements_are_reported_and_siblings_read() {
    let src = r#"<museScore version="4.00">
<Score>
<Staff id="1">
<Measure>
<voice>
<Bogus><deeper><deepest/></deeper></Bogus>
<Rest><durationType>quarter</durationType><notAProperty>1</notAProperty></Rest>
<Rest><durationType>quarter</durationType></Rest>
</voice>
</Measure>
</Staff>
</Score>
</museScore>"#;
    let result = read_score(src).unwrap();
    let names: Vec<&str> = result.skipped_elements.iter().map(|s| s.element_type.as_str()).collect();
    assert_eq!(names, vec!["Bogus", "notAProperty"]);
    assert_eq!(result.skipped_elements[0].line, 6);
    let measure = result.score.measures().next().unwrap();
    let ticks: Vec<_> = measure.elements_of(ElementType::Rest).map(|e| e.tick).collect();
    assert_eq!(ticks, vec![Fraction::new(0, 1), Fraction::new(1, 4)]);
}

#[test]
fn test_line_segment_outside_its_line_is_skipped() {
    let src = r#"<museScore version="4.00"><Score><Staff id="1"><Measure><voice>
        <LineSegment/>
        <Rest><durationType>quarter</durationType></Rest>
    </voice></Measure></Staff></Score></museScore>"#;
    let result = read_score(src).unwrap();
    let names: Vec<&str> = result.skipped_elements.iter().map(|s| s.element_type.as_str()).collect();
    assert_eq!(names, vec!["LineSegment"]);
    let measure = result.score.measures().next().unwrap();
    assert_eq!(measure.elements_of(ElementType::Rest).count(), 1);
    assert_eq!(measure.elements_of(ElementType::LineSegment).count(), 0);
}

#[test]
fn test_extreme_staff_ids_do_not_abort() {
    let src = r#"<museScore version="4.00"><Score>
<Staff id="2147483647"><Measure><voice><Rest><durationType>quarter</durationType></Rest></voice></Measure></Staff>
<Staff id="-2147483648"><Measure><voice><Rest><durationType>half</durationType></Rest></voice></Measure></Staff>
</Score></museScore>"#;
    let result = read_score(src).unwrap();
    let measure = result.score.measures().next().unwrap();
    let tracks: Vec<i32> = measure.elements_of(ElementType::Rest).map(|e| e.track).collect();
    assert_eq!(tracks, vec![0]);
}

#[test]
fn test_overflowing_durations_keep_position() {
    let src = r#"<museScore version="4.00"><Score><Staff id="1"><Measure><voice>
        <Rest><durationType>breve</durationType><duration>2147483647/1</duration></Rest>
        <Rest><durationType>breve</durationType><duration>2147483647/1</duration></Rest>
        <Rest><durationType>quarter</durationType></Rest>
    </voice></Measure>
    <Measure><voice><Rest><durationType>quarter</durationType></Rest></voice></Measure>
    </Staff></Score></museScore>"#;
    let result = read_score(src).unwrap();
    let measures: Vec<_> = result.score.measures().collect();
    let ticks: Vec<_> = measures[0].elements_of(ElementType::Rest).map(|e| e.tick).collect();
    let end = Fraction::from_integer(i32::MAX);
    assert_eq!(ticks, vec![Fraction::from_integer(0), end, end]);
    assert_eq!(measures[1].tick, Fraction::new(1, 1));
}

#[test]
fn test_read_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCORE.as_bytes()).unwrap();
    let result = read_score_file(file.path()).unwrap();
    assert_eq!(result.score.meta_tags.get("composer").map(String::as_str), Some("Anon"));

    let dir = tempfile::tempdir().unwrap();
    let err = read_score_file(dir.path().join("missing.mscx")).unwrap_err();
    assert!(matches!(err, ReadError::Io(_)));
}

#[test]
fn test_json_output() {
    let json = read_score(SCORE).unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["score"]["parts"][0]["name"], "Piano");
}
