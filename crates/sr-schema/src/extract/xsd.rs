//! # XSD Extractor
//!
//! For every named complex type, the section prefix is looked up in the
//! [`XsdTypeMap`] and each named descendant element becomes
//! `prefix.element`. Types absent from the map are skipped and reported
//! once each as [`SourceError::MappingGap`].

use sr_core::{canonicalize, RepresentationId, SourceError};

use super::{Extraction, Extractor};
use crate::inventory::PathSet;
use crate::type_map::XsdTypeMap;
use crate::xsd::XsdDocument;

/// Extracts qualified field paths from an XML Schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XsdExtractor {
    type_map: XsdTypeMap,
}

impl XsdExtractor {
    /// Extractor resolving sections through `type_map`.
    pub fn new(type_map: XsdTypeMap) -> Self {
        Self { type_map }
    }

    /// The map in use.
    pub fn type_map(&self) -> &XsdTypeMap {
        &self.type_map
    }
}

impl Extractor for XsdExtractor {
    type Document = XsdDocument;
    type Fields = PathSet;

    fn representation(&self) -> RepresentationId {
        RepresentationId::Xsd
    }

    fn extract(&self, document: &XsdDocument) -> Extraction<PathSet> {
        let mut paths = PathSet::new();
        let mut issues = Vec::new();

        for (type_name, complex_type) in document.named_complex_types() {
            let named = complex_type.elements.iter().filter_map(|e| e.name.as_deref());
            let Some(section) = self.type_map.section_for(type_name) else {
                let skipped_elements = named.count();
                tracing::warn!(type_name, skipped_elements, "xsd complex type has no section mapping");
                issues.push(SourceError::MappingGap {
                    type_name: type_name.to_string(),
                    skipped_elements,
                });
                continue;
            };
            let prefix = section.as_path();
            for element in named {
                match canonicalize(&prefix, element, false) {
                    Ok(path) => {
                        paths.insert(path);
                    }
                    Err(e) => {
                        tracing::warn!(type_name, element, error = %e, "skipping xsd element");
                    }
                }
            }
        }

        tracing::debug!(paths = paths.len(), gaps = issues.len(), "extracted xsd fields");
        Extraction {
            fields: paths,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_core::CanonicalPath;

    const DOC: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:complexType name="BasicsType">
    <xs:sequence>
      <xs:element name="email" type="xs:string"/>
      <xs:element name="location" type="sr:LocationType"/>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="WorkType">
    <xs:sequence>
      <xs:element name="position" type="xs:string"/>
      <xs:element ref="sr:highlights"/>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="HobbyType">
    <xs:sequence>
      <xs:element name="hobby" type="xs:string"/>
      <xs:element name="since" type="xs:gYear"/>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="ResumeType">
    <xs:sequence>
      <xs:element name="basics" type="sr:BasicsType"/>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#;

    fn rendered(paths: &PathSet) -> Vec<&str> {
        paths.iter().map(CanonicalPath::as_str).collect()
    }

    #[test]
    fn mapped_types_emit_prefixed_paths() {
        let doc = XsdDocument::parse(DOC).unwrap();
        let out = XsdExtractor::default().extract(&doc);
        assert_eq!(
            rendered(&out.fields),
            vec!["basics.email", "basics.location", "work[].position"]
        );
    }

    #[test]
    fn unmapped_types_contribute_nothing_and_report_a_gap() {
        let doc = XsdDocument::parse(DOC).unwrap();
        let out = XsdExtractor::default().extract(&doc);
        assert!(!out.fields.iter().any(|p| p.ends_with_name("hobby")));
        assert_eq!(
            out.issues,
            vec![
                SourceError::MappingGap {
                    type_name: "HobbyType".into(),
                    skipped_elements: 2,
                },
                SourceError::MappingGap {
                    type_name: "ResumeType".into(),
                    skipped_elements: 1,
                },
            ]
        );
    }

    #[test]
    fn root_section_emits_bare_names() {
        let doc = XsdDocument::parse(DOC).unwrap();
        let map = XsdTypeMap::standard_with([("ResumeType", "root")]).unwrap();
        let out = XsdExtractor::new(map).extract(&doc);
        assert!(out.fields.contains(&CanonicalPath::field("basics").unwrap()));
        assert_eq!(out.issues.len(), 1);
    }

    #[test]
    fn empty_map_yields_no_paths() {
        let doc = XsdDocument::parse(DOC).unwrap();
        let map = XsdTypeMap::from_entries(std::iter::empty()).unwrap();
        let out = XsdExtractor::new(map).extract(&doc);
        assert!(out.fields.is_empty());
        assert_eq!(out.issues.len(), 4);
    }
}
