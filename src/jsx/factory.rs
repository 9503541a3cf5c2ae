//! The element factory: turns a `(type, props, children)` triple into a node.
//!
//! Dispatch is on an explicit [`ElementType`] rather than on the runtime type
//! of an opaque argument:
//!
//! | `ElementType` | Result |
//! |---------------|--------|
//! | `File` | [`File`] named by the `name` prop, content rendered from its single child |
//! | `Dir` | [`Dir`] named by the `name` prop, holding its File/Dir children |
//! | `Fragment` | [`Fragment`] of the children |
//! | `Tag(name)` | [`Element`] with the props as attributes |
//! | `Component(f)` | whatever `f` returns for `Props { attributes, children }` |
//!
//! Positional children are flattened one level before dispatch. [`Children`]
//! is either a single child or a list, so deeper nesting cannot be expressed.
//!
//! Every error here is a caller error. Nothing is retried or recovered; the
//! build aborts at the construction site.

use super::attributes::{Attributes, Value};
use super::fs::{Content, Dir, Entry, File};
use super::node::{Element, Fragment, Node};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsxError {
    #[error("File names must be strings")]
    UnnamedFile,
    #[error("Directory names must be strings")]
    UnnamedDir,
    #[error("File {0} must have a single child element or string content")]
    FileArity(String),
    #[error("Children of directory {0} must be directory or file elements")]
    DirContent(String),
    #[error("JSX children may not be passed through a named prop")]
    ChildrenProp,
    #[error("Children of {0} must be elements, fragments or text")]
    NodeContent(String),
}

/// Anything the factory can produce or accept as a child.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(Node),
    /// Raw binary payload, only meaningful as the content of a file.
    Bytes(Vec<u8>),
    Entry(Entry),
}

impl Child {
    pub fn into_node(self) -> Option<Node> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_entry(self) -> Option<Entry> {
        match self {
            Child::Entry(entry) => Some(entry),
            _ => None,
        }
    }
}

/// One positional argument: a single child or a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    One(Child),
    Many(Vec<Child>),
}

/// What a component receives: its named props and flattened children.
#[derive(Debug, Clone, Default)]
pub struct Props {
    pub attributes: Attributes,
    pub children: Vec<Child>,
}

/// A component: any function from props to a tree node.
pub type Component<'a> = &'a dyn Fn(Props) -> Result<Child, JsxError>;

/// The `type` half of a factory call.
pub enum ElementType<'a> {
    File,
    Dir,
    Fragment,
    Tag(&'a str),
    Component(Component<'a>),
}

/// Build a node from a type, named props and positional children.
pub fn create_element(
    element_type: ElementType<'_>,
    attributes: Attributes,
    children: Vec<Children>,
) -> Result<Child, JsxError> {
    if attributes.contains_key("children") {
        return Err(JsxError::ChildrenProp);
    }
    let children = flatten(children);

    match element_type {
        ElementType::File => {
            create_file(&attributes, children).map(|file| Entry::File(file).into())
        }
        ElementType::Dir => create_dir(&attributes, children).map(|dir| Entry::Dir(dir).into()),
        ElementType::Fragment => {
            create_fragment(children).map(|fragment| Node::Fragment(fragment).into())
        }
        ElementType::Tag(name) => {
            create_tag(name, attributes, children).map(|element| Node::Element(element).into())
        }
        ElementType::Component(component) => invoke_component(component, attributes, children),
    }
}

/// Collapse one level of list nesting.
pub fn flatten(children: Vec<Children>) -> Vec<Child> {
    let mut flat = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Children::One(child) => flat.push(child),
            Children::Many(many) => flat.extend(many),
        }
    }
    flat
}

/// Build a file from exactly one child.
///
/// Markup children are rendered, with a preamble chosen by extension:
/// `<!DOCTYPE html>` for `.html`, `<?xml version="1.0"?>` for `.xml` and
/// `.rss`. Leaf text and binary payloads are stored verbatim.
pub fn create_file(attributes: &Attributes, children: Vec<Child>) -> Result<File, JsxError> {
    let name = attributes
        .get("name")
        .and_then(Value::as_text)
        .ok_or(JsxError::UnnamedFile)?;

    let mut children = children.into_iter();
    let content = match (children.next(), children.next()) {
        (Some(content), None) => content,
        _ => return Err(JsxError::FileArity(name.to_string())),
    };

    let content = match content {
        Child::Node(Node::Leaf(value)) => Content::Text(value.to_string()),
        Child::Node(node) => Content::Text(format!("{}{}", preamble(name), node)),
        Child::Bytes(bytes) => Content::Binary(bytes),
        Child::Entry(_) => return Err(JsxError::FileArity(name.to_string())),
    };
    Ok(File::new(name, content))
}

fn preamble(file_name: &str) -> &'static str {
    match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
        Some("html") => "<!DOCTYPE html>",
        Some("xml") | Some("rss") => r#"<?xml version="1.0"?>"#,
        _ => "",
    }
}

/// Build a directory. Every child must be a file or directory.
pub fn create_dir(attributes: &Attributes, children: Vec<Child>) -> Result<Dir, JsxError> {
    let name = attributes
        .get("name")
        .and_then(Value::as_text)
        .ok_or(JsxError::UnnamedDir)?;

    let entries = children
        .into_iter()
        .map(|child| child.into_entry().ok_or_else(|| JsxError::DirContent(name.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dir::new(name, entries))
}

pub fn create_fragment(children: Vec<Child>) -> Result<Fragment, JsxError> {
    Ok(Fragment::new(into_nodes(children, "fragment")?))
}

/// Build an element from a bare tag name.
pub fn create_tag(
    name: &str,
    attributes: Attributes,
    children: Vec<Child>,
) -> Result<Element, JsxError> {
    if attributes.contains_key("children") {
        return Err(JsxError::ChildrenProp);
    }
    let children = into_nodes(children, &format!("element {}", name))?;
    Ok(Element::new(name, attributes, children))
}

pub fn invoke_component(
    component: Component<'_>,
    attributes: Attributes,
    children: Vec<Child>,
) -> Result<Child, JsxError> {
    component(Props {
        attributes,
        children,
    })
}

fn into_nodes(children: Vec<Child>, context: &str) -> Result<Vec<Node>, JsxError> {
    children
        .into_iter()
        .map(|child| child.into_node().ok_or_else(|| JsxError::NodeContent(context.to_string())))
        .collect()
}

// ============================================================================
// Shorthands used by page components and the router
// ============================================================================

/// `<name {attributes}>{children}</name>`
pub fn element(
    name: &str,
    attributes: Attributes,
    children: Vec<Children>,
) -> Result<Node, JsxError> {
    create_tag(name, attributes, flatten(children)).map(Node::Element)
}

/// `<>{children}</>`
pub fn fragment(children: Vec<Children>) -> Result<Node, JsxError> {
    create_fragment(flatten(children)).map(Node::Fragment)
}

/// `<Component {attributes}>{children}</Component>`, for components that
/// produce markup.
pub fn component(
    component: Component<'_>,
    attributes: Attributes,
    children: Vec<Children>,
) -> Result<Node, JsxError> {
    create_element(ElementType::Component(component), attributes, children)?
        .into_node()
        .ok_or_else(|| JsxError::NodeContent("component".to_string()))
}

/// `<File name={name}>{children}</File>`
pub fn file(name: &str, children: Vec<Children>) -> Result<Entry, JsxError> {
    create_file(&Attributes::from([("name", name)]), flatten(children)).map(Entry::File)
}

/// `<Dir name={name}>{children}</Dir>`
pub fn dir(name: &str, children: Vec<Children>) -> Result<Entry, JsxError> {
    create_dir(&Attributes::from([("name", name)]), flatten(children)).map(Entry::Dir)
}

// ============================================================================
// Conversions into children
// ============================================================================

macro_rules! child_from {
    ($($ty:ty => |$arg:ident| $body:expr),* $(,)?) => {
        $(
            impl From<$ty> for Child {
                fn from($arg: $ty) -> Self {
                    $body
                }
            }

            impl From<$ty> for Children {
                fn from($arg: $ty) -> Self {
                    Children::One($body)
                }
            }
        )*
    };
}

child_from! {
    Node => |node| Child::Node(node),
    Element => |element| Child::Node(Node::Element(element)),
    Fragment => |fragment| Child::Node(Node::Fragment(fragment)),
    Value => |value| Child::Node(Node::Leaf(value)),
    &str => |text| Child::Node(Node::from(text)),
    String => |text| Child::Node(Node::from(text)),
    Entry => |entry| Child::Entry(entry),
    File => |file| Child::Entry(Entry::File(file)),
    Dir => |dir| Child::Entry(Entry::Dir(dir)),
    Vec<u8> => |bytes| Child::Bytes(bytes),
}

impl From<Child> for Children {
    fn from(child: Child) -> Self {
        Children::One(child)
    }
}

impl From<Vec<Child>> for Children {
    fn from(children: Vec<Child>) -> Self {
        Children::Many(children)
    }
}

impl From<Vec<Node>> for Children {
    fn from(nodes: Vec<Node>) -> Self {
        Children::Many(nodes.into_iter().map(Child::Node).collect())
    }
}

impl From<Vec<Entry>> for Children {
    fn from(entries: Vec<Entry>) -> Self {
        Children::Many(entries.into_iter().map(Child::Entry).collect())
    }
}
