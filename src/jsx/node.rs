//! Markup tree nodes: elements, fragments and primitive leaves.
//!
//! Equality is structural and recursive. Two elements are equal when their
//! names, attributes and children are equal; children are compared
//! positionally, so swapping two distinct children breaks equality.
//!
//! Rendering never escapes child content. Leaf text is injected as-is, which is
//! how pre-rendered markdown bodies end up inside pages. Callers escape
//! untrusted text before putting it in a tree.

use super::attributes::{Attributes, Value};
use super::escape::escape;
use std::fmt;

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Fragment(Fragment),
    Leaf(Value),
}

/// A named markup node.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

/// An unnamed group of nodes, rendered without wrapping markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>, attributes: Attributes, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            attributes,
            children,
        }
    }
}

impl Fragment {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

impl Node {
    /// Ordered children. Leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Fragment(fragment) => &fragment.children,
            Node::Leaf(_) => &[],
        }
    }

    /// Tag name, for element nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(&element.name),
            _ => None,
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Node::Element(element) => Some(&element.attributes),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// True if `other` equals this node or any node below it.
    pub fn contains(&self, other: &Node) -> bool {
        self == other || self.children().iter().any(|child| child.contains(other))
    }

    /// Every element or fragment in this tree, including `self`, matching
    /// `predicate`. Leaves are never offered to the predicate.
    ///
    /// Traversal is a stack-based pre-order; callers should not depend on the
    /// order of the results.
    pub fn find<P>(&self, predicate: P) -> Vec<&Node>
    where
        P: Fn(&Node) -> bool,
    {
        let mut stack = vec![self];
        let mut found = Vec::new();
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                continue;
            }
            if predicate(node) {
                found.push(node);
            }
            stack.extend(node.children());
        }
        found
    }

    /// Elements with the given tag name.
    pub fn find_by_name(&self, name: &str) -> Vec<&Node> {
        self.find(|node| node.name() == Some(name))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => fmt::Display::fmt(element, f),
            Node::Fragment(fragment) => fmt::Display::fmt(fragment, f),
            Node::Leaf(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = escape(&self.name);
        let attributes = self
            .attributes
            .iter()
            .map(|(name, value)| format!(r#"{}="{}""#, escape(name), escape(&value.to_string())))
            .collect::<Vec<_>>()
            .join(" ");

        match (self.children.is_empty(), attributes.is_empty()) {
            (false, false) => {
                write!(f, "<{} {}>", name, attributes)?;
                render_children(&self.children, f)?;
                write!(f, "</{}>", name)
            }
            (false, true) => {
                write!(f, "<{}>", name)?;
                render_children(&self.children, f)?;
                write!(f, "</{}>", name)
            }
            (true, false) => write!(f, "<{} {} />", name, attributes),
            (true, true) => write!(f, "<{} />", name),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_children(&self.children, f)
    }
}

fn render_children(children: &[Node], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for child in children {
        fmt::Display::fmt(child, f)?;
    }
    Ok(())
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Fragment> for Node {
    fn from(fragment: Fragment) -> Self {
        Node::Fragment(fragment)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Leaf(value)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Leaf(Value::from(text))
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Leaf(Value::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::from(value)
    }

    fn element(name: &str, attributes: Attributes, children: Vec<Node>) -> Node {
        Node::Element(Element::new(name, attributes, children))
    }

    fn languages() -> Node {
        element(
            "ul",
            Attributes::empty(),
            vec![
                element("li", Attributes::empty(), vec![text("Python")]),
                element("li", Attributes::empty(), vec![text("Java")]),
            ],
        )
    }

    #[test]
    fn equal_to_itself() {
        let tree = languages();
        assert_eq!(tree, tree.clone());
    }

    #[test]
    fn contains_itself() {
        let tree = languages();
        assert!(tree.contains(&tree));
    }

    #[test]
    fn child_order_matters() {
        let swapped = element(
            "ul",
            Attributes::empty(),
            vec![
                element("li", Attributes::empty(), vec![text("Java")]),
                element("li", Attributes::empty(), vec![text("Python")]),
            ],
        );
        assert_ne!(languages(), swapped);
    }

    #[test]
    fn child_count_matters() {
        let shorter = element(
            "ul",
            Attributes::empty(),
            vec![element("li", Attributes::empty(), vec![text("Python")])],
        );
        assert_ne!(languages(), shorter);
    }

    #[test]
    fn element_and_fragment_never_equal() {
        let fragment = Node::Fragment(Fragment::new(vec![text("a")]));
        let anchor = element("a", Attributes::empty(), vec![text("a")]);
        assert_ne!(fragment, anchor);
    }

    #[test]
    fn attributes_take_part_in_equality() {
        let plain = element("a", Attributes::empty(), vec![]);
        let linked = element("a", Attributes::from([("href", "/")]), vec![]);
        assert_ne!(plain, linked);
    }

    #[test]
    fn contains_deep_descendants_and_leaves() {
        let tree = element("div", Attributes::empty(), vec![languages()]);
        assert!(tree.contains(&element("li", Attributes::empty(), vec![text("Java")])));
        assert!(tree.contains(&text("Python")));
        assert!(!tree.contains(&text("Rust")));
    }

    #[test]
    fn contains_looks_inside_fragments() {
        let tree = Node::Fragment(Fragment::new(vec![
            text("Hello"),
            Node::Fragment(Fragment::new(vec![text("World")])),
        ]));
        assert!(tree.contains(&text("World")));
    }

    #[test]
    fn find_collects_matching_elements() {
        let tree = element("div", Attributes::empty(), vec![languages(), languages()]);
        let items = tree.find_by_name("li");
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|node| node.name() == Some("li")));
    }

    #[test]
    fn find_includes_root() {
        let tree = languages();
        let found = tree.find(|node| node.name() == Some("ul"));
        assert_eq!(found, vec![&tree]);
    }

    #[test]
    fn find_never_tests_leaves() {
        let tree = languages();
        let found = tree.find(|node| !matches!(node, Node::Element(_)));
        assert!(found.is_empty());
    }

    #[test]
    fn find_visits_fragment_children() {
        let tree = Node::Fragment(Fragment::new(vec![languages()]));
        assert_eq!(tree.find(|_| true).len(), 4);
    }

    #[test]
    fn renders_bare_element() {
        assert_eq!(element("br", Attributes::empty(), vec![]).to_string(), "<br />");
    }

    #[test]
    fn renders_attributes_only() {
        let img = element("img", Attributes::from([("src", "/a.png"), ("alt", "A")]), vec![]);
        assert_eq!(img.to_string(), r#"<img src="/a.png" alt="A" />"#);
    }

    #[test]
    fn renders_children_only() {
        assert_eq!(
            element("p", Attributes::empty(), vec![text("child")]).to_string(),
            "<p>child</p>"
        );
    }

    #[test]
    fn renders_attributes_and_children() {
        let link = element("a", Attributes::from([("href", "/")]), vec![text("Home")]);
        assert_eq!(link.to_string(), r#"<a href="/">Home</a>"#);
    }

    #[test]
    fn escapes_attribute_values() {
        let quote = element("q", Attributes::from([("title", r#"a "b" & c"#)]), vec![]);
        assert_eq!(quote.to_string(), r#"<q title="a &quot;b&quot; &amp; c" />"#);
    }

    #[test]
    fn escapes_tag_names() {
        assert_eq!(
            element("a&b", Attributes::empty(), vec![]).to_string(),
            "<a&amp;b />"
        );
    }

    #[test]
    fn never_escapes_children() {
        let body = element("div", Attributes::empty(), vec![text("<p>raw & ready</p>")]);
        assert_eq!(body.to_string(), "<div><p>raw & ready</p></div>");
    }

    #[test]
    fn renders_number_and_bool_leaves() {
        let span = element(
            "span",
            Attributes::from([("hidden", Value::Bool(false))]),
            vec![Node::Leaf(Value::from(28)), text(" words")],
        );
        assert_eq!(span.to_string(), r#"<span hidden="false">28 words</span>"#);
    }

    #[test]
    fn fragment_renders_children_back_to_back() {
        let fragment = Node::Fragment(Fragment::new(vec![
            text("a"),
            element("b", Attributes::empty(), vec![]),
            text("c"),
        ]));
        assert_eq!(fragment.to_string(), "a<b />c");
    }
}
