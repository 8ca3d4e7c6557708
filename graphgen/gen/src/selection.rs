//! Selection set synthesis.
//!
//! Builds the nested field selection needed to fetch every reachable leaf of
//! an object type. Two guards keep the tree finite:
//!
//! - **Depth**: nothing is expanded below [`MAX_DEPTH`].
//! - **Ancestor path**: a type already being expanded on the current branch is
//!   not expanded again. The path is copied on every descent, so sibling
//!   branches may expand the same type independently.
//!
//! An object-typed field whose expansion comes back empty still renders with
//! an empty block (`manager {}`) so the document stays well formed.

use std::iter;

use graphgen_define::SchemaModel;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::trace;

/// The deepest level that is still expanded.
pub const MAX_DEPTH: usize = 5;

const INDENT: &str = "    ";

/// How selection sets are laid out in request documents.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SelectionStyle {
    /// Everything on one line, siblings separated by spaces.
    #[default]
    Inline,
    /// One field per line, four spaces per nesting level.
    Indented,
}

/// One selected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SelectionNode {
    /// A scalar, enum or unresolvable field.
    Leaf(String),
    /// An object-typed field with its (possibly empty) nested selection.
    Object {
        name: String,
        children: Vec<SelectionNode>,
    },
}

impl SelectionNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(name) | Self::Object { name, .. } => name,
        }
    }

    fn render_inline(&self, out: &mut String) {
        match self {
            Self::Leaf(name) => out.push_str(name),
            Self::Object { name, children } if children.is_empty() => {
                out.push_str(name);
                out.push_str(" {}");
            }
            Self::Object { name, children } => {
                out.push_str(name);
                out.push_str(" { ");
                render_inline_list(children, out);
                out.push_str(" }");
            }
        }
    }

    fn render_indented(&self, level: usize, lines: &mut Vec<String>) {
        let indent = INDENT.repeat(level);
        match self {
            Self::Leaf(name) => lines.push(format!("{indent}{name}")),
            Self::Object { name, children } if children.is_empty() => {
                lines.push(format!("{indent}{name} {{}}"));
            }
            Self::Object { name, children } => {
                lines.push(format!("{indent}{name} {{"));
                for child in children {
                    child.render_indented(level + 1, lines);
                }
                lines.push(format!("{indent}}}"));
            }
        }
    }
}

fn render_inline_list(nodes: &[SelectionNode], out: &mut String) {
    for (index, node) in nodes.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        node.render_inline(out);
    }
}

/// The synthesized selection for one object type.
///
/// ## Examples
///
/// ```
/// use graphgen_gen::analyzer::analyze;
/// use graphgen_gen::selection::{SelectionSet, SelectionStyle};
///
/// let model = analyze(
///     "type User { id: ID! role: Role manager: User } enum Role { ADMIN }",
/// ).unwrap();
///
/// let selection = SelectionSet::build("User", &model);
/// assert_eq!(selection.render(SelectionStyle::Inline, 1), "id role manager {}");
/// assert_eq!(
///     selection.render(SelectionStyle::Indented, 1),
///     "    id\n    role\n    manager {}"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectionSet {
    pub nodes: Vec<SelectionNode>,
}

impl SelectionSet {
    /// Synthesizes the selection for `type_name`, starting at depth 1.
    ///
    /// Scalars, enums and names without fields yield an empty set.
    pub fn build(type_name: &str, model: &SchemaModel) -> Self {
        Self {
            nodes: build_nodes(type_name, model, 1, &[]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Renders the fields without surrounding braces.
    ///
    /// `level` sets the indentation of the top fields in indented style and
    /// is ignored inline.
    pub fn render(&self, style: SelectionStyle, level: usize) -> String {
        match style {
            SelectionStyle::Inline => {
                let mut out = String::new();
                render_inline_list(&self.nodes, &mut out);
                out
            }
            SelectionStyle::Indented => {
                let mut lines = Vec::new();
                for node in &self.nodes {
                    node.render_indented(level, &mut lines);
                }
                lines.join("\n")
            }
        }
    }

    /// Renders the selection as a block with a leading space.
    ///
    /// An empty set renders as ` {}`. In indented style the fields sit one
    /// level below `level` and the closing brace sits at `level`.
    pub fn render_block(&self, style: SelectionStyle, level: usize) -> String {
        if self.is_empty() {
            return " {}".to_string();
        }
        match style {
            SelectionStyle::Inline => format!(" {{ {} }}", self.render(style, level)),
            SelectionStyle::Indented => format!(
                " {{\n{}\n{}}}",
                self.render(style, level + 1),
                INDENT.repeat(level)
            ),
        }
    }
}

fn build_nodes<'a>(
    type_name: &'a str,
    model: &'a SchemaModel,
    depth: usize,
    ancestors: &[&'a str],
) -> Vec<SelectionNode> {
    if depth > MAX_DEPTH {
        trace!(type_name, depth, "Depth limit reached");
        return Vec::new();
    }
    if ancestors.contains(&type_name) {
        trace!(type_name, depth, "Type already expanded on this branch");
        return Vec::new();
    }
    if model.is_leaf(type_name) {
        return Vec::new();
    }
    let Some(fields) = model.fields_of(type_name) else {
        return Vec::new();
    };

    let path: Vec<&str> = ancestors.iter().copied().chain(iter::once(type_name)).collect();

    fields
        .iter()
        .map(|field| {
            let base = field.ty.base.as_str();
            if model.is_leaf(base) || model.fields_of(base).is_none() {
                trace!(field = field.name.as_str(), base, "Leaf field");
                SelectionNode::Leaf(field.name.clone())
            } else {
                trace!(field = field.name.as_str(), base, depth, "Expanding object field");
                SelectionNode::Object {
                    name: field.name.clone(),
                    children: build_nodes(base, model, depth + 1, &path),
                }
            }
        })
        .collect()
}
