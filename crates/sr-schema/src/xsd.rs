//! # XSD Documents
//!
//! Parses `schema-resume.xsd` with `roxmltree` into an owned
//! [`XsdDocument`] summary. Only declarations in the XML Schema namespace
//! are considered; everything the extractor and linter need is captured
//! here, so the XML text does not outlive parsing.

use roxmltree::{Document, Node};

/// The XML Schema namespace URI.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// A namespace-qualified element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    /// Resolved namespace URI, if any.
    pub namespace: Option<String>,
    /// Local part of the tag.
    pub local: String,
}

impl QualifiedName {
    /// True for `{http://www.w3.org/2001/XMLSchema}<local>`.
    pub fn is_xsd(&self, local: &str) -> bool {
        self.namespace.as_deref() == Some(XSD_NAMESPACE) && self.local == local
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// One `xs:element` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDecl {
    /// The `name` attribute; `ref`-only declarations have none.
    pub name: Option<String>,
    /// The raw `type` attribute, e.g. `xs:string` or `sr:WorkType`.
    pub type_ref: Option<String>,
}

impl ElementDecl {
    /// Namespace prefix of the `type` attribute, when it has one.
    pub fn type_prefix(&self) -> Option<&str> {
        self.type_ref
            .as_deref()
            .and_then(|t| t.split_once(':'))
            .map(|(prefix, _)| prefix)
    }
}

/// One `xs:complexType` definition and every element declared inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexTypeDecl {
    /// The `name` attribute; anonymous types have none.
    pub name: Option<String>,
    /// All descendant element declarations, in document order.
    pub elements: Vec<ElementDecl>,
}

/// Owned summary of a parsed XML Schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdDocument {
    /// The document element's qualified name.
    pub root: QualifiedName,
    /// `targetNamespace` of the document element.
    pub target_namespace: Option<String>,
    /// Every complex type, named or anonymous, in document order.
    pub complex_types: Vec<ComplexTypeDecl>,
    /// Number of `xs:simpleType` definitions.
    pub simple_type_count: usize,
    /// `xs:element` declarations that are direct children of the root.
    pub top_level_elements: Vec<ElementDecl>,
    /// Every `xs:element` declaration anywhere in the document.
    pub elements: Vec<ElementDecl>,
}

impl XsdDocument {
    /// Parse XML Schema text.
    ///
    /// # Errors
    ///
    /// Returns the `roxmltree` error for malformed XML. A well-formed
    /// document that is not an XML Schema parses successfully; the linter
    /// reports the wrong root.
    pub fn parse(text: &str) -> Result<Self, roxmltree::Error> {
        let doc = Document::parse(text)?;
        let root = doc.root_element();

        let complex_types = root
            .descendants()
            .filter(|n| n.id() != root.id() && is_xsd(n, "complexType"))
            .map(|ct| ComplexTypeDecl {
                name: ct.attribute("name").map(str::to_string),
                elements: ct
                    .descendants()
                    .filter(|n| is_xsd(n, "element"))
                    .map(element_decl)
                    .collect(),
            })
            .collect();

        let simple_type_count = root
            .descendants()
            .filter(|n| is_xsd(n, "simpleType"))
            .count();

        let top_level_elements = root
            .children()
            .filter(|n| is_xsd(n, "element"))
            .map(element_decl)
            .collect();

        let elements = root
            .descendants()
            .filter(|n| is_xsd(n, "element"))
            .map(element_decl)
            .collect();

        Ok(Self {
            root: QualifiedName {
                namespace: root.tag_name().namespace().map(str::to_string),
                local: root.tag_name().name().to_string(),
            },
            target_namespace: root.attribute("targetNamespace").map(str::to_string),
            complex_types,
            simple_type_count,
            top_level_elements,
            elements,
        })
    }

    /// Named complex types only.
    pub fn named_complex_types(&self) -> impl Iterator<Item = (&str, &ComplexTypeDecl)> {
        self.complex_types
            .iter()
            .filter_map(|ct| ct.name.as_deref().map(|name| (name, ct)))
    }

    /// Look up a named complex type.
    pub fn complex_type(&self, name: &str) -> Option<&ComplexTypeDecl> {
        self.named_complex_types()
            .find(|(n, _)| *n == name)
            .map(|(_, ct)| ct)
    }
}

fn is_xsd(node: &Node<'_, '_>, local: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(XSD_NAMESPACE)
        && node.tag_name().name() == local
}

fn element_decl(node: Node<'_, '_>) -> ElementDecl {
    ElementDecl {
        name: node.attribute("name").map(str::to_string),
        type_ref: node.attribute("type").map(str::to_string),
    }
}
