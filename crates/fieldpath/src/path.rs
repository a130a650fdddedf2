use std::fmt;
use std::ops::Deref;

use crate::PathElement;

/// A field path from the object root, as an ordered list of elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(Vec<PathElement>);

impl Path {
    pub fn new() -> Self {
        Path(Vec::new())
    }

    /// Builds a path of plain field names, e.g. `Path::fields(["spec", "replicas"])`.
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path(names.into_iter().map(PathElement::field).collect())
    }

    pub fn push(&mut self, element: PathElement) {
        self.0.push(element);
    }

    pub fn into_elements(self) -> Vec<PathElement> {
        self.0
    }
}

impl Deref for Path {
    type Target = [PathElement];

    fn deref(&self) -> &[PathElement] {
        &self.0
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Path(elements)
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<T: IntoIterator<Item = PathElement>>(iter: T) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.0 {
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_mixes_fields_and_list_items() {
        let mut path = Path::fields(["spec", "containers"]);
        path.push(PathElement::key([("name", &json!("web"))]));
        path.push(PathElement::field("ports"));
        path.push(PathElement::index(0));
        assert_eq!(path.to_string(), r#".spec.containers[name="web"].ports[0]"#);
    }

    #[test]
    fn root_path_is_empty() {
        assert!(Path::new().is_empty());
        assert_eq!(Path::new().to_string(), "");
    }
}
