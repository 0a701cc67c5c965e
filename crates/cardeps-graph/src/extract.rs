//! Structural reference extraction from configuration documents.
//!
//! A document is classified by the local name of its root element into one of
//! a closed set of shapes, and each shape has exactly one extraction rule.
//! Extracted strings are candidate artifact names; resolving them is the
//! aggregator's job.
//!
//! - `proxy`, `sequence`, `template`, `api`: `call-template/@target`,
//!   `sequence/@key`, `@key` of `schema`, `resource`, `xslt` and `publishWSDL`
//!   (with a `gov:` prefix stripped), and `get-property('..')` calls inside
//!   `property/@expression`.
//! - `task`: `@value` of the `property` whose `@name` is `sequenceName`.
//! - anything else: nothing.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static GET_PROPERTY_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"get-property\('(.+?)'\)").expect("get-property pattern is valid")
});

const RESOURCE_TAGS: [&str; 4] = ["schema", "resource", "xslt", "publishWSDL"];
const GOVERNANCE_PREFIX: &str = "gov:";
const TASK_SEQUENCE_PROPERTY: &str = "sequenceName";

/// Parse a descriptor or configuration document, naming `path` on failure.
pub fn parse_document<'a>(path: &Path, text: &'a str) -> Result<Document<'a>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options).map_err(|e| Error::xml(path, e))
}

/// What a `get-property('<name>')` call contributes as a reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCapture {
    /// The whole call text, `get-property('<name>')`.
    ///
    /// Such a string never names an artifact, so this path yields no edges.
    #[default]
    Call,
    /// Only the quoted `<name>`.
    Name,
}

/// Kind of mediation configuration that carries references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediationKind {
    Proxy,
    Sequence,
    Template,
    Api,
}

/// Recognized document shapes, keyed on the root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentShape {
    Mediation(MediationKind),
    Task,
    /// Any other root element; carries its tag for diagnostics.
    Unrecognized(String),
}

impl DocumentShape {
    pub fn from_root_tag(tag: &str) -> Self {
        match tag {
            "proxy" => Self::Mediation(MediationKind::Proxy),
            "sequence" => Self::Mediation(MediationKind::Sequence),
            "template" => Self::Mediation(MediationKind::Template),
            "api" => Self::Mediation(MediationKind::Api),
            "task" => Self::Task,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn classify(doc: &Document<'_>) -> Self {
        Self::from_root_tag(doc.root_element().tag_name().name())
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Candidate artifact names referenced by `doc`, which must have this shape.
    pub fn extract(&self, doc: &Document<'_>, capture: PropertyCapture) -> Vec<String> {
        match self {
            Self::Mediation(_) => {
                let mut found = template_calls(doc);
                found.extend(sequence_keys(doc));
                found.extend(resource_keys(doc));
                found.extend(property_lookups(doc, capture));
                found
            }
            Self::Task => task_sequence(doc).into_iter().collect(),
            Self::Unrecognized(_) => Vec::new(),
        }
    }
}

/// Classify `doc` and extract its references in one step.
pub fn extract_references(
    doc: &Document<'_>,
    capture: PropertyCapture,
) -> (DocumentShape, Vec<String>) {
    let shape = DocumentShape::classify(doc);
    let found = shape.extract(doc, capture);
    (shape, found)
}

fn elements<'a, 'input: 'a>(
    doc: &'a Document<'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    doc.descendants()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

fn attribute_values(doc: &Document<'_>, tag: &str, attr: &str) -> Vec<String> {
    elements(doc, tag)
        .filter_map(|n| n.attribute(attr))
        .map(str::to_string)
        .collect()
}

fn template_calls(doc: &Document<'_>) -> Vec<String> {
    attribute_values(doc, "call-template", "target")
}

fn sequence_keys(doc: &Document<'_>) -> Vec<String> {
    attribute_values(doc, "sequence", "key")
}

fn resource_keys(doc: &Document<'_>) -> Vec<String> {
    RESOURCE_TAGS
        .iter()
        .flat_map(|tag| attribute_values(doc, tag, "key"))
        .map(|key| match key.strip_prefix(GOVERNANCE_PREFIX) {
            Some(stripped) => stripped.to_string(),
            None => key,
        })
        .collect()
}

fn property_lookups(doc: &Document<'_>, capture: PropertyCapture) -> Vec<String> {
    let mut found = Vec::new();
    for expression in elements(doc, "property").filter_map(|n| n.attribute("expression")) {
        for call in GET_PROPERTY_CALL.captures_iter(expression) {
            let text = match capture {
                PropertyCapture::Call => call.get(0),
                PropertyCapture::Name => call.get(1),
            };
            if let Some(text) = text {
                found.push(text.as_str().to_string());
            }
        }
    }
    found
}

fn task_sequence(doc: &Document<'_>) -> Option<String> {
    elements(doc, "property")
        .find(|n| n.attribute("name") == Some(TASK_SEQUENCE_PROPERTY))
        .and_then(|n| n.attribute("value"))
        .map(str::to_string)
}
