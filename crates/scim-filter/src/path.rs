//! Attribute paths.
//!
//! A path names an attribute or sub-attribute of a resource, for example
//! `name.familyName`, `urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:manager`
//! or `emails[type eq "work"].value`. Only the first element may be qualified
//! by a schema URN.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FilterError, FilterResult};
use crate::filter::Filter;
use crate::parser;

/// One attribute in a [`Path`], optionally narrowed by a value filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathElement {
    attribute: String,
    value_filter: Option<Filter>,
}

impl PathElement {
    pub(crate) fn new(attribute: impl Into<String>, value_filter: Option<Filter>) -> Self {
        Self {
            attribute: attribute.into(),
            value_filter,
        }
    }

    /// The attribute name.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The filter selecting values of a multi-valued attribute, if any.
    pub fn value_filter(&self) -> Option<&Filter> {
        self.value_filter.as_ref()
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.attribute)?;
        if let Some(filter) = &self.value_filter {
            write!(f, "[{filter}]")?;
        }
        Ok(())
    }
}

/// An ordered sequence of path elements, optionally qualified by a schema URN.
///
/// A path with no elements is a root path. A root path that carries a URN
/// addresses a whole schema extension (written `urn:...:` with a trailing
/// colon).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    schema_urn: Option<String>,
    elements: Vec<PathElement>,
}

impl Path {
    /// The root path, with no URN and no elements.
    pub fn root() -> Self {
        Self::default()
    }

    /// The root of a schema extension.
    pub fn extension_root(schema_urn: impl Into<String>) -> Self {
        Self {
            schema_urn: Some(schema_urn.into()),
            elements: Vec::new(),
        }
    }

    /// A single-element path for a core attribute.
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            schema_urn: None,
            elements: vec![PathElement::new(name, None)],
        }
    }

    /// A single-element path for an attribute defined by `schema_urn`.
    pub fn extension_attribute(schema_urn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema_urn: Some(schema_urn.into()),
            elements: vec![PathElement::new(name, None)],
        }
    }

    /// Returns this path extended by a sub-attribute.
    pub fn sub(mut self, name: impl Into<String>) -> Self {
        self.elements.push(PathElement::new(name, None));
        self
    }

    /// Returns this path extended by a sub-attribute narrowed by `value_filter`.
    pub fn sub_filtered(mut self, name: impl Into<String>, value_filter: Filter) -> Self {
        self.elements.push(PathElement::new(name, Some(value_filter)));
        self
    }

    /// Parses a path string.
    ///
    /// # Example
    ///
    /// ```
    /// use scim_filter_rs::Path;
    ///
    /// let path = Path::parse("name.familyName").unwrap();
    /// assert_eq!(path, Path::attribute("name").sub("familyName"));
    /// ```
    pub fn parse(text: &str) -> FilterResult<Self> {
        parser::parse_path(text)
    }

    pub(crate) fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    pub(crate) fn set_schema_urn(&mut self, schema_urn: String) {
        self.schema_urn = Some(schema_urn);
    }

    /// The schema URN qualifying the first element, if any.
    pub fn schema_urn(&self) -> Option<&str> {
        self.schema_urn.as_deref()
    }

    /// The elements in order.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// The last element, if any.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true when the path has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true for the root path and for extension roots.
    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(urn) = &self.schema_urn {
            write!(f, "{urn}:")?;
        }
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Path::parse(&text).map_err(serde::de::Error::custom)
    }
}
