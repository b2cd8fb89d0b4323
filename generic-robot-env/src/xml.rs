//! Owned XML element tree.
//!
//! Scene descriptions are small, and include expansion splices elements across
//! documents, so every document is read into an owned tree of [`XmlElement`]s.
//! Only elements and attributes are kept; text, comments and processing
//! instructions carry nothing the environment needs.
use crate::error::{Result, RobotEnvError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// An XML element with its attributes and child elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Tag name.
    pub name: String,

    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Value of the attribute `key`, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children with the given tag name.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'n
    where
        'a: 'n,
    {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Pre-order walk over every descendant, in document order.
    ///
    /// `<default>` subtrees hold class defaults rather than declarations and are
    /// not entered.
    pub fn declarations(&self) -> Declarations<'_> {
        Declarations {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Parses a document and returns its root element.
    ///
    /// `path` is only used in error messages.
    pub fn parse_str(xml: &str, path: &Path) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| parse_error(path, e.to_string()))?;
            match event {
                Event::Start(ref e) => stack.push(element_from(e, path)?),
                Event::Empty(ref e) => {
                    let element = element_from(e, path)?;
                    attach(&mut stack, &mut root, element, path)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| parse_error(path, "unexpected closing tag"))?;
                    attach(&mut stack, &mut root, element, path)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(parse_error(path, format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| parse_error(path, "document has no root element"))
    }
}

/// Iterator returned by [`XmlElement::declarations`].
pub struct Declarations<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Declarations<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let element = self.stack.pop()?;
            if element.name == "default" {
                continue;
            }
            self.stack.extend(element.children.iter().rev());
            return Some(element);
        }
    }
}

fn element_from(start: &BytesStart, path: &Path) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| parse_error(path, format!("in <{name}>: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| parse_error(path, format!("in <{name} {key}>: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
    path: &Path,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(parse_error(path, "document has more than one root element"))
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn parse_error(path: &Path, message: impl Into<String>) -> RobotEnvError {
    RobotEnvError::XmlParse {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Parses a whitespace-separated list of numbers, as used by MJCF attributes.
pub fn parse_f64_list(s: &str) -> Option<Vec<f64>> {
    s.split_whitespace().map(|t| t.parse::<f64>().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Result<XmlElement> {
        XmlElement::parse_str(xml, Path::new("test.xml"))
    }

    #[test]
    fn test_parse_tree() {
        let root = parse(
            r#"<?xml version="1.0"?>
            <!-- arm -->
            <mujoco model="arm">
              <worldbody>
                <body name="link1" pos="0 0 0.1">
                  <joint name="j1"/>
                </body>
              </worldbody>
            </mujoco>"#,
        )
        .unwrap();

        assert_eq!(root.name, "mujoco");
        assert_eq!(root.attr("model"), Some("arm"));
        let worldbody = root.children_named("worldbody").next().unwrap();
        let body = &worldbody.children[0];
        assert_eq!(body.attr("pos"), Some("0 0 0.1"));
        assert_eq!(body.children[0].attr("name"), Some("j1"));
    }

    #[test]
    fn test_declarations_skip_defaults() {
        let root = parse(
            r#"<mujoco>
              <default><joint name="not_a_joint" damping="1"/></default>
              <worldbody><body><joint name="a"/><site name="s"/></body></worldbody>
            </mujoco>"#,
        )
        .unwrap();
        let names: Vec<_> = root.declarations().filter_map(|e| e.attr("name")).collect();
        assert_eq!(names, vec!["a", "s"]);
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            parse("<mujoco><worldbody></mujoco>"),
            Err(RobotEnvError::XmlParse { .. })
        ));
        assert!(matches!(parse("<a/><b/>"), Err(RobotEnvError::XmlParse { .. })));
        assert!(matches!(parse("<!-- only a comment -->"), Err(RobotEnvError::XmlParse { .. })));
    }

    #[test]
    fn test_unescaped_attribute() {
        let root = parse(r#"<camera name="top &amp; front"/>"#).unwrap();
        assert_eq!(root.attr("name"), Some("top & front"));
    }

    #[test]
    fn test_parse_f64_list() {
        assert_eq!(parse_f64_list(" 0 0.5\n-1e-2 "), Some(vec![0.0, 0.5, -0.01]));
        assert_eq!(parse_f64_list("0 zero"), None);
        assert_eq!(parse_f64_list(""), Some(vec![]));
    }
}
