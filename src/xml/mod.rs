//! Sequential cursor over score markup
//!
//! `XmlReader` walks a parsed `roxmltree` document the way the element
//! decoders expect: one start element at a time, entering children on demand.
//! Every element is consumed exactly once, either by reading its content, by
//! descending into it, or by skipping it, so sibling elements stay reachable no
//! matter how much of a subtree a decoder understood.

use crate::model::types::{Color, Fraction, PointF, SizeF};
use roxmltree::{Children, Document, Node};
use serde::{Deserialize, Serialize};

/// An element that the reader discarded without decoding it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedElement {
    /// Tag name of the discarded element
    pub element_type: String,
    /// 1-based source line of the start tag
    pub line: u32,
    /// 1-based source column of the start tag
    pub column: u32,
}

/// Pull-style cursor over a parsed markup document
pub struct XmlReader<'a, 'input> {
    /// Child iterators of the elements we have descended into
    frames: Vec<Children<'a, 'input>>,
    /// Start element returned by the last `read_next_start_element`, not yet consumed
    current: Option<Node<'a, 'input>>,
    skipped: Vec<SkippedElement>,
}

impl<'a, 'input> XmlReader<'a, 'input> {
    /// Position a reader on the root element of `doc`
    pub fn new(doc: &'a Document<'input>) -> Self {
        Self::at(doc.root_element())
    }

    /// Position a reader on an arbitrary element
    pub fn at(node: Node<'a, 'input>) -> Self {
        XmlReader {
            frames: Vec::new(),
            current: Some(node),
            skipped: Vec::new(),
        }
    }

    /// Advance to the next child start element of the enclosing element.
    ///
    /// If the cursor sits on an unconsumed start element, that element is
    /// entered first. Returns `false` once the enclosing element has no more
    /// children; the enclosing element is then fully consumed.
    pub fn read_next_start_element(&mut self) -> bool {
        if let Some(node) = self.current.take() {
            self.frames.push(node.children());
        }
        let next = match self.frames.last_mut() {
            Some(children) => children.find(|n| n.is_element()),
            None => return false,
        };
        match next {
            Some(node) => {
                self.current = Some(node);
                true
            }
            None => {
                self.frames.pop();
                false
            }
        }
    }

    /// Tag name of the current start element
    pub fn name(&self) -> &'a str {
        self.current.map(|n| n.tag_name().name()).unwrap_or("")
    }

    /// Number of elements entered and not yet closed
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True once everything the reader was positioned on has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.frames.is_empty() && self.current.is_none()
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.current.and_then(|n| n.attribute(name))
    }

    /// Text attribute, empty when absent
    pub fn attribute_or_empty(&self, name: &str) -> String {
        self.attribute(name).unwrap_or_default().to_string()
    }

    pub fn int_attribute(&self, name: &str, default: i32) -> i32 {
        self.attribute(name)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn double_attribute(&self, name: &str, default: f64) -> f64 {
        self.attribute(name)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(default)
    }

    // ------------------------------------------------------------------
    // Element content; each of these consumes the current element
    // ------------------------------------------------------------------

    /// Character data of the current element
    pub fn read_text(&mut self) -> String {
        match self.current.take() {
            Some(node) => node
                .children()
                .filter(|c| c.is_text())
                .filter_map(|c| c.text())
                .collect(),
            None => String::new(),
        }
    }

    /// Inner markup of the current element, child tags included
    pub fn read_xml(&mut self) -> String {
        let mut out = String::new();
        if let Some(node) = self.current.take() {
            for child in node.children() {
                write_node(&mut out, child);
            }
        }
        out
    }

    pub fn read_int(&mut self) -> i32 {
        let text = self.read_text();
        match text.trim().parse::<i32>() {
            Ok(v) => v,
            Err(_) => {
                // Old files occasionally store integers as reals
                text.trim().parse::<f64>().map(|v| v as i32).unwrap_or_else(|_| {
                    log::debug!("expected integer, found {:?}", text);
                    0
                })
            }
        }
    }

    pub fn read_double(&mut self) -> f64 {
        let text = self.read_text();
        text.trim().parse().unwrap_or_else(|_| {
            log::debug!("expected number, found {:?}", text);
            0.0
        })
    }

    /// Number clamped into `[min, max]`
    pub fn read_double_in(&mut self, min: f64, max: f64) -> f64 {
        self.read_double().clamp(min, max)
    }

    /// Boolean written either as `true`/`false` or as an integer
    pub fn read_bool(&mut self) -> bool {
        let text = self.read_text();
        match text.trim() {
            "true" => true,
            "false" | "" => false,
            other => other.parse::<i32>().map(|v| v != 0).unwrap_or(false),
        }
    }

    /// Point stored as `x`/`y` attributes
    pub fn read_point(&mut self) -> PointF {
        let p = PointF::new(self.double_attribute("x", 0.0), self.double_attribute("y", 0.0));
        self.skip_current_element();
        p
    }

    /// Size stored as `w`/`h` attributes
    pub fn read_size(&mut self) -> SizeF {
        let s = SizeF::new(self.double_attribute("w", 0.0), self.double_attribute("h", 0.0));
        self.skip_current_element();
        s
    }

    /// Color stored as `r`/`g`/`b`/`a` attributes
    pub fn read_color(&mut self) -> Color {
        let c = Color {
            r: self.int_attribute("r", 0).clamp(0, 255) as u8,
            g: self.int_attribute("g", 0).clamp(0, 255) as u8,
            b: self.int_attribute("b", 0).clamp(0, 255) as u8,
            a: self.int_attribute("a", 255).clamp(0, 255) as u8,
        };
        self.skip_current_element();
        c
    }

    /// Fraction written as `n/d`; a bare integer is a tick count
    pub fn read_fraction(&mut self) -> Fraction {
        let text = self.read_text();
        parse_fraction(&text).unwrap_or_else(|| {
            log::debug!("expected fraction, found {:?}", text);
            Fraction::from_integer(0)
        })
    }

    /// Consume the current element without looking at it
    pub fn skip_current_element(&mut self) {
        self.current = None;
    }

    /// Report the current element as unrecognized and discard its subtree
    pub fn unknown(&mut self) {
        if let Some(node) = self.current.take() {
            let pos = node.document().text_pos_at(node.range().start);
            log::debug!(
                "unknown tag <{}> at line {} col {}",
                node.tag_name().name(),
                pos.row,
                pos.col
            );
            self.skipped.push(SkippedElement {
                element_type: node.tag_name().name().to_string(),
                line: pos.row,
                column: pos.col,
            });
        }
    }

    /// Elements reported through `unknown`, in document order
    pub fn skipped_elements(&self) -> &[SkippedElement] {
        &self.skipped
    }

    pub fn take_skipped_elements(&mut self) -> Vec<SkippedElement> {
        std::mem::take(&mut self.skipped)
    }
}

/// Parse `n/d` or a plain tick count
pub fn parse_fraction(text: &str) -> Option<Fraction> {
    let text = text.trim();
    match text.split_once('/') {
        Some((n, d)) => {
            let n: i32 = n.trim().parse().ok()?;
            let d: i32 = d.trim().parse().ok()?;
            if d == 0 {
                return None;
            }
            Some(Fraction::new(n, d))
        }
        None => text.parse::<i32>().ok().map(crate::model::types::fraction_from_ticks),
    }
}

fn write_node(out: &mut String, node: Node) {
    if node.is_text() {
        out.push_str(&escape(node.text().unwrap_or_default()));
    } else if node.is_element() {
        out.push('<');
        out.push_str(node.tag_name().name());
        for attr in node.attributes() {
            out.push(' ');
            out.push_str(attr.name());
            out.push_str("=\"");
            out.push_str(&escape(attr.value()));
            out.push('"');
        }
        if node.has_children() {
            out.push('>');
            for child in node.children() {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(node.tag_name().name());
            out.push('>');
        } else {
            out.push_str("/>");
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_loop_consumes_whole_subtree() {
        let doc = Document::parse("<a><b><c>1</c><d/></b><e>2</e></a>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut seen = Vec::new();
        while xml.read_next_start_element() {
            seen.push(xml.name());
            if xml.name() == "b" {
                while xml.read_next_start_element() {
                    seen.push(xml.name());
                    xml.skip_current_element();
                }
            } else {
                assert_eq!(xml.read_int(), 2);
            }
        }
        assert_eq!(seen, vec!["b", "c", "d", "e"]);
        assert!(xml.is_exhausted());
    }

    #[test]
    fn test_unknown_records_position() {
        let doc = Document::parse("<a>\n  <zzz><deep/></zzz>\n  <b>3</b>\n</a>").unwrap();
        let mut xml = XmlReader::new(&doc);
        let mut value = 0;
        while xml.read_next_start_element() {
            if xml.name() == "b" {
                value = xml.read_int();
            } else {
                xml.unknown();
            }
        }
        assert_eq!(value, 3);
        let skipped = xml.skipped_elements();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].element_type, "zzz");
        assert_eq!(skipped[0].line, 2);
    }

    #[test]
    fn test_scalar_readers() {
        let doc = Document::parse(
            r#"<a><i>2.0</i><b>true</b><p x="1.5" y="-2"/><c r="10" g="20" b="30"/><f>3/8</f><t>240</t></a>"#,
        )
        .unwrap();
        let mut xml = XmlReader::new(&doc);
        assert!(xml.read_next_start_element());
        assert_eq!(xml.read_int(), 2);
        assert!(xml.read_next_start_element());
        assert!(xml.read_bool());
        assert!(xml.read_next_start_element());
        assert_eq!(xml.read_point(), PointF::new(1.5, -2.0));
        assert!(xml.read_next_start_element());
        let c = xml.read_color();
        assert_eq!((c.r, c.g, c.b, c.a), (10, 20, 30, 255));
        assert!(xml.read_next_start_element());
        assert_eq!(xml.read_fraction(), Fraction::new(3, 8));
        assert!(xml.read_next_start_element());
        assert_eq!(xml.read_fraction(), Fraction::new(1, 8));
        assert!(!xml.read_next_start_element());
    }

    #[test]
    fn test_read_xml_keeps_inline_markup() {
        let doc = Document::parse("<text><sym>metNoteQuarterUp</sym> = 80 &amp; more</text>").unwrap();
        let mut xml = XmlReader::new(&doc);
        assert_eq!(xml.read_xml(), "<sym>metNoteQuarterUp</sym> = 80 &amp; more");
    }
}
