//! Tree views of parsed filters and paths, as indented text or JSON.

use std::convert::Infallible;

use owo_colors::OwoColorize;
use scim_filter_rs::{
    CombiningFilter, ComparisonFilter, ComplexValueFilter, Filter, FilterVisitor, Path,
    PresentFilter,
};
use serde_json::{json, Value};

const INDENT: usize = 2;

/// Collects one line per filter node, children indented under parents.
struct TextTree {
    lines: Vec<String>,
    use_colors: bool,
}

impl TextTree {
    fn keyword(&self, keyword: &str) -> String {
        if self.use_colors {
            keyword.cyan().bold().to_string()
        } else {
            keyword.to_string()
        }
    }

    fn push(&mut self, depth: usize, text: String) {
        self.lines.push(format!("{:indent$}{text}", "", indent = depth * INDENT));
    }

    fn combined(&mut self, keyword: &str, filter: &CombiningFilter, depth: usize) {
        let keyword = self.keyword(keyword);
        self.push(depth, keyword);
        for operand in filter.operands() {
            self.visit_operand(operand, depth + 1);
        }
    }

    fn visit_operand(&mut self, filter: &Filter, depth: usize) {
        filter
            .visit(self, depth)
            .unwrap_or_else(|never: Infallible| match never {});
    }
}

impl FilterVisitor<usize> for TextTree {
    type Output = ();
    type Error = Infallible;

    fn visit_comparison(&mut self, filter: &ComparisonFilter, depth: usize) -> Result<(), Infallible> {
        let line = format!(
            "{} {} {}",
            filter.attribute_path(),
            self.keyword(filter.operator().keyword()),
            filter.value()
        );
        self.push(depth, line);
        Ok(())
    }

    fn visit_present(&mut self, filter: &PresentFilter, depth: usize) -> Result<(), Infallible> {
        let line = format!("{} {}", filter.attribute_path(), self.keyword("pr"));
        self.push(depth, line);
        Ok(())
    }

    fn visit_and(&mut self, filter: &CombiningFilter, depth: usize) -> Result<(), Infallible> {
        self.combined("and", filter, depth);
        Ok(())
    }

    fn visit_or(&mut self, filter: &CombiningFilter, depth: usize) -> Result<(), Infallible> {
        self.combined("or", filter, depth);
        Ok(())
    }

    fn visit_not(&mut self, inverted: &Filter, depth: usize) -> Result<(), Infallible> {
        let keyword = self.keyword("not");
        self.push(depth, keyword);
        self.visit_operand(inverted, depth + 1);
        Ok(())
    }

    fn visit_complex_value(
        &mut self,
        filter: &ComplexValueFilter,
        depth: usize,
    ) -> Result<(), Infallible> {
        let line = format!("{} {}", self.keyword("complex"), filter.attribute_path());
        self.push(depth, line);
        self.visit_operand(filter.value_filter(), depth + 1);
        Ok(())
    }
}

/// Renders a filter as an indented tree, one node per line.
pub fn filter_tree(filter: &Filter, use_colors: bool) -> String {
    let mut tree = TextTree {
        lines: Vec::new(),
        use_colors,
    };
    tree.visit_operand(filter, 0);
    tree.lines.join("\n")
}

/// Renders a path as one line per element, with value filters indented
/// below their element.
pub fn path_tree(path: &Path, use_colors: bool) -> String {
    let mut tree = TextTree {
        lines: Vec::new(),
        use_colors,
    };
    if let Some(urn) = path.schema_urn() {
        let line = format!("{} {urn}", tree.keyword("schema"));
        tree.push(0, line);
    }
    for element in path.elements() {
        tree.push(0, element.attribute().to_string());
        if let Some(value_filter) = element.value_filter() {
            tree.visit_operand(value_filter, 1);
        }
    }
    tree.lines.join("\n")
}

/// Builds the JSON form of a filter tree.
struct JsonTree;

impl JsonTree {
    fn node(&mut self, filter: &Filter) -> Value {
        filter
            .visit(self, ())
            .unwrap_or_else(|never: Infallible| match never {})
    }

    fn combined(&mut self, keyword: &str, filter: &CombiningFilter) -> Value {
        let filters: Vec<Value> = filter.operands().iter().map(|f| self.node(f)).collect();
        json!({ "type": keyword, "filters": filters })
    }
}

impl FilterVisitor<()> for JsonTree {
    type Output = Value;
    type Error = Infallible;

    fn visit_comparison(&mut self, filter: &ComparisonFilter, _: ()) -> Result<Value, Infallible> {
        Ok(json!({
            "type": filter.operator().keyword(),
            "path": filter.attribute_path().to_string(),
            "value": Value::from(filter.value().clone()),
        }))
    }

    fn visit_present(&mut self, filter: &PresentFilter, _: ()) -> Result<Value, Infallible> {
        Ok(json!({ "type": "pr", "path": filter.attribute_path().to_string() }))
    }

    fn visit_and(&mut self, filter: &CombiningFilter, _: ()) -> Result<Value, Infallible> {
        Ok(self.combined("and", filter))
    }

    fn visit_or(&mut self, filter: &CombiningFilter, _: ()) -> Result<Value, Infallible> {
        Ok(self.combined("or", filter))
    }

    fn visit_not(&mut self, inverted: &Filter, _: ()) -> Result<Value, Infallible> {
        Ok(json!({ "type": "not", "filter": self.node(inverted) }))
    }

    fn visit_complex_value(&mut self, filter: &ComplexValueFilter, _: ()) -> Result<Value, Infallible> {
        Ok(json!({
            "type": "complex",
            "path": filter.attribute_path().to_string(),
            "filter": self.node(filter.value_filter()),
        }))
    }
}

/// The JSON form of a filter tree.
pub fn filter_json(filter: &Filter) -> Value {
    JsonTree.node(filter)
}

/// The JSON form of a path: its schema URN and elements.
pub fn path_json(path: &Path) -> Value {
    let elements: Vec<Value> = path
        .elements()
        .iter()
        .map(|element| {
            json!({
                "attribute": element.attribute(),
                "filter": element.value_filter().map(filter_json),
            })
        })
        .collect();
    json!({ "schema": path.schema_urn(), "elements": elements })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr(name: &str) -> Filter {
        Filter::pr(Path::attribute(name))
    }

    #[test]
    fn test_filter_tree_indents_children() {
        let filter = Filter::or(
            Filter::and(pr("title"), Filter::eq(Path::attribute("userType"), "Employee")),
            Filter::negate(pr("email")),
        );
        assert_eq!(
            filter_tree(&filter, false),
            "or\n  and\n    title pr\n    userType eq \"Employee\"\n  not\n    email pr"
        );
    }

    #[test]
    fn test_filter_tree_complex_value() {
        let filter = Filter::complex_value(
            Path::attribute("emails"),
            Filter::eq(Path::attribute("type"), "work"),
        );
        assert_eq!(
            filter_tree(&filter, false),
            "complex emails\n  type eq \"work\""
        );
    }

    #[test]
    fn test_colored_tree_keeps_text() {
        let tree = filter_tree(&pr("title"), true);
        assert!(tree.starts_with("title "));
        assert!(tree.contains("pr"));
        assert_ne!(tree, "title pr");
    }

    #[test]
    fn test_path_tree() {
        let path = Path::extension_attribute("urn:extension", "manager").sub("displayName");
        assert_eq!(
            path_tree(&path, false),
            "schema urn:extension\nmanager\ndisplayName"
        );
    }

    #[test]
    fn test_filter_json() {
        let filter = Filter::and(pr("title"), Filter::gt(Path::attribute("age"), 21));
        assert_eq!(
            filter_json(&filter),
            json!({
                "type": "and",
                "filters": [
                    { "type": "pr", "path": "title" },
                    { "type": "gt", "path": "age", "value": 21 },
                ]
            })
        );
    }

    #[test]
    fn test_path_json() {
        let path = Path::root()
            .sub_filtered("emails", pr("type"))
            .sub("value");
        assert_eq!(
            path_json(&path),
            json!({
                "schema": null,
                "elements": [
                    { "attribute": "emails", "filter": { "type": "pr", "path": "type" } },
                    { "attribute": "value", "filter": null },
                ]
            })
        );
    }
}
