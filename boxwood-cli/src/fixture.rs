//! JSON fixtures: a document, its stylesheets and everything layout needs
//! that a markup parser would normally supply.
//!
//! ```json
//! {
//!   "ua": true,
//!   "config": { "cell_spacing_px": 2 },
//!   "images": { "logo.png": [64, 32] },
//!   "stylesheets": [
//!     [ { "selector": "div", "declarations": { "width": "200px" } } ]
//!   ],
//!   "document": [
//!     { "tag": "div", "attrs": { "id": "main" }, "children": [ { "text": "hello" } ] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use boxwood_common::DiagnosticSink;
use boxwood_css::{LayoutConfig, Rule, Size, Stylesheet, ua_stylesheet};
use boxwood_dom::{DomTree, ElementData, NodeId};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Fixture {
    /// Prepend the built-in display defaults.
    #[serde(default)]
    pub ua: bool,
    #[serde(default)]
    pub config: Option<LayoutConfig>,
    /// Natural image sizes keyed by `src`.
    #[serde(default)]
    pub images: BTreeMap<String, (i32, i32)>,
    #[serde(default)]
    pub stylesheets: Vec<Vec<RuleSpec>>,
    /// Children of the document node.
    #[serde(default)]
    pub document: Vec<NodeSpec>,
}

#[derive(Debug, Deserialize)]
pub struct RuleSpec {
    pub selector: String,
    /// Property names are unique keys, so their order is irrelevant.
    #[serde(default)]
    pub declarations: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Element {
        tag: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<NodeSpec>,
    },
    Text {
        text: String,
    },
    Comment {
        comment: String,
    },
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("fixture is not valid JSON")
    }

    pub fn build_tree(&self) -> DomTree {
        let mut tree = DomTree::new();
        for node in &self.document {
            append_node(&mut tree, NodeId::ROOT, node);
        }
        tree
    }

    /// Parse every rule. A selector that cannot be parsed at all fails the
    /// whole fixture; unsupported-but-parseable ones go to the sink.
    pub fn build_stylesheets(&self, sink: &dyn DiagnosticSink) -> Result<Vec<Stylesheet>> {
        let mut sheets = Vec::with_capacity(self.stylesheets.len() + 1);
        if self.ua {
            sheets.push(ua_stylesheet());
        }
        for (index, rules) in self.stylesheets.iter().enumerate() {
            let mut sheet = Stylesheet::new();
            for spec in rules {
                let declarations = spec
                    .declarations
                    .iter()
                    .map(|(property, value)| (property.as_str(), value.as_str()));
                let rule = Rule::parse(&spec.selector, declarations, sink)
                    .with_context(|| format!("stylesheet {index}: bad rule '{}'", spec.selector))?;
                sheet = sheet.with_rule(rule);
            }
            sheets.push(sheet);
        }
        Ok(sheets)
    }

    pub fn image_size(&self, src: &str) -> Option<Size> {
        self.images.get(src).map(|&(w, h)| Size::new(w, h))
    }
}

fn append_node(tree: &mut DomTree, parent: NodeId, node: &NodeSpec) {
    match node {
        NodeSpec::Element {
            tag,
            attrs,
            children,
        } => {
            let data = attrs
                .iter()
                .fold(ElementData::new(tag), |data, (name, value)| {
                    data.with_attr(name, value)
                });
            let id = tree.append_element(parent, data);
            for child in children {
                append_node(tree, id, child);
            }
        }
        NodeSpec::Text { text } => {
            let _ = tree.append_text(parent, text);
        }
        NodeSpec::Comment { comment } => {
            let _ = tree.append_comment(parent, comment);
        }
    }
}
