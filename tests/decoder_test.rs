// Decoders used on their own, through the dispatcher

use roxmltree::Document;
use score_reader::model::{Element, ElementType, Fraction, MscVersion};
use score_reader::read::{read_element, ReadContext};
use score_reader::xml::XmlReader;
use score_reader::ReadSettings;

/// Decode `src` as a fresh element of its root tag; returns it with the skipped tag names
fn decode(src: &str) -> (Element, Vec<String>) {
    let doc = Document::parse(src).expect("test markup should be well formed");
    let tag = doc.root_element().tag_name().name();
    let element_type = ElementType::from_name(tag).expect("root tag should name an element");
    let mut element = Element::create(element_type).expect("element should be creatable");
    let mut xml = XmlReader::new(&doc);
    let mut ctx = ReadContext::new(MscVersion::CURRENT, ReadSettings::default());
    read_element(&mut element, &mut xml, &mut ctx).expect("element should have a decoder");
    assert!(xml.is_exhausted(), "decoder left part of <{}> unread", tag);
    let skipped = xml.skipped_elements().iter().map(|s| s.element_type.clone()).collect();
    (element, skipped)
}

#[test]
fn test_unknown_only_subtree_leaves_defaults() {
    for tag in ["Dynamic", "Clef", "Breath", "Bracket", "Stem"] {
        let src = format!("<{tag}><foo><bar>1</bar></foo><baz/></{tag}>");
        let (element, skipped) = decode(&src);
        let fresh = Element::create(element.element_type()).unwrap();
        if tag != "Clef" {
            assert_eq!(element, fresh, "{} changed", tag);
        }
        assert_eq!(skipped, vec!["foo".to_string(), "baz".to_string()]);
    }
}

#[test]
fn test_degree_count_never_exceeds_input() {
    let degrees = [
        (9, -1, "add", true),
        (14, 0, "add", false),
        (0, 0, "alter", false),
        (5, 3, "alter", false),
        (5, -2, "alter", true),
        (3, 0, "subtract", true),
        (7, 0, "remove", false),
    ];
    let body: String = degrees
        .iter()
        .map(|(v, a, k, _)| {
            format!("<degree><degree-value>{v}</degree-value><degree-alter>{a}</degree-alter><degree-type>{k}</degree-type></degree>")
        })
        .collect();
    let (element, _) = decode(&format!("<Harmony><root>14</root>{body}</Harmony>"));
    let Element::Harmony(h) = element else { unreachable!() };
    let valid = degrees.iter().filter(|d| d.3).count();
    assert_eq!(h.degrees.len(), valid);
}

#[test]
fn test_tuplet_ticks_ignore_tag_order() {
    let orders = [
        "<normalNotes>2</normalNotes><actualNotes>3</actualNotes><baseNote>eighth</baseNote>",
        "<baseNote>eighth</baseNote><actualNotes>3</actualNotes><normalNotes>2</normalNotes>",
        "<actualNotes>3</actualNotes><baseNote>eighth</baseNote><normalNotes>2</normalNotes>",
    ];
    for body in orders {
        let (element, _) = decode(&format!("<Tuplet>{body}</Tuplet>"));
        let Element::Tuplet(t) = element else { unreachable!() };
        assert_eq!(t.ticks, Fraction::new(1, 4), "{}", body);
        assert_eq!(t.ratio(), Fraction::new(3, 2));
    }
}

#[test]
fn test_legacy_barre_starts_at_first_dotted_string() {
    let src = r#"<FretDiagram>
        <strings>6</strings>
        <string no="3"><dot>2</dot></string>
        <string no="1"><dot>2</dot></string>
        <barre>1</barre>
    </FretDiagram>"#;
    let (element, skipped) = decode(src);
    let Element::FretDiagram(d) = element else { unreachable!() };
    assert!(skipped.is_empty());
    let barre = d.barres.get(&2).expect("barre at fret 2");
    assert_eq!(barre.start_string, 1);
}
