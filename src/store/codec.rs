//! External form of the tree
//!
//! The persisted document is a single JSON value nested the way the tree is
//! nested. Parent links are not written: they follow from nesting and are
//! rebuilt on reconstruction.

use crate::error::{FsError, PersistenceError};
use crate::tree::node::{validate_name, Node, NodeId, ROOT_NAME};
use crate::tree::Tree;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::mem;

/// A node in its external form
///
/// Snapshots nest as deep as the tree does, so reading, writing and
/// dropping a `SerializedNode` never recurse on the native stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SerializedNode {
    Directory {
        name: String,
        contents: BTreeMap<String, SerializedNode>,
    },
    File {
        name: String,
        content: String,
    },
}

impl SerializedNode {
    fn take_contents(&mut self) -> BTreeMap<String, SerializedNode> {
        match self {
            SerializedNode::Directory { contents, .. } => mem::take(contents),
            SerializedNode::File { .. } => BTreeMap::new(),
        }
    }
}

impl Drop for SerializedNode {
    fn drop(&mut self) {
        let mut pending: Vec<SerializedNode> = self.take_contents().into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.take_contents().into_values());
        }
    }
}

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum Field {
    Type,
    Name,
    Contents,
    Content,
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Directory,
    File,
}

// Hand-written so nested nodes are read straight from the map instead of
// being buffered first, which keeps every level behind the stack guard.
impl<'de> Deserialize<'de> for SerializedNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = SerializedNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a directory or file node")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SerializedNode, A::Error> {
        let mut kind = None;
        let mut name = None;
        let mut contents = None;
        let mut content = None;
        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Type => kind = Some(map.next_value::<Kind>()?),
                Field::Name => name = Some(map.next_value::<String>()?),
                Field::Contents => {
                    contents = Some(map.next_value::<BTreeMap<String, SerializedNode>>()?)
                }
                Field::Content => content = Some(map.next_value::<String>()?),
                // Older snapshots carry a `parent` name; it is rebuilt from nesting.
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let kind = kind.ok_or_else(|| <A::Error as de::Error>::missing_field("type"))?;
        let name = name.ok_or_else(|| <A::Error as de::Error>::missing_field("name"))?;
        Ok(match kind {
            Kind::Directory => SerializedNode::Directory {
                name,
                contents: contents.unwrap_or_default(),
            },
            Kind::File => SerializedNode::File {
                name,
                content: content.unwrap_or_default(),
            },
        })
    }
}

/// Convert the whole tree into its external form.
///
/// Nodes are built bottom-up from the reverse of a pre-order walk, so each
/// directory finds all of its children already encoded.
pub fn encode(tree: &Tree) -> Result<SerializedNode, PersistenceError> {
    let order: Vec<NodeId> = tree.walk(tree.root_id()).map(|entry| entry.id).collect();

    let mut built: HashMap<NodeId, SerializedNode> = HashMap::with_capacity(order.len());
    for id in order.into_iter().rev() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        let encoded = match node {
            Node::File(file) => SerializedNode::File {
                name: file.name.clone(),
                content: file.content.clone(),
            },
            Node::Directory(dir) => SerializedNode::Directory {
                name: dir.name.clone(),
                contents: dir
                    .contents
                    .iter()
                    .filter_map(|(name, child)| {
                        built.remove(child).map(|encoded| (name.clone(), encoded))
                    })
                    .collect(),
            },
        };
        built.insert(id, encoded);
    }

    built
        .remove(&tree.root_id())
        .ok_or_else(|| PersistenceError::InvalidState("root node is missing".to_string()))
}

/// Rebuild a tree from its external form.
///
/// The top-level value must be the root directory. Every child is attached
/// to the directory it was nested in, which restores the parent links. The
/// new tree's current directory is its root.
pub fn decode(mut document: SerializedNode) -> Result<Tree, PersistenceError> {
    let root_contents = match &mut document {
        SerializedNode::Directory { name, contents } => {
            if name.as_str() != ROOT_NAME {
                return Err(PersistenceError::Malformed(format!(
                    "root directory must be named '/', found '{}'",
                    name
                )));
            }
            mem::take(contents)
        }
        SerializedNode::File { .. } => {
            return Err(PersistenceError::InvalidState(
                "top-level value is not a directory".to_string(),
            ))
        }
    };

    let mut tree = Tree::new();
    let mut pending = vec![(tree.root_id(), root_contents)];
    while let Some((parent, contents)) = pending.pop() {
        for (key, mut child) in contents {
            match &mut child {
                SerializedNode::File { name, content } => {
                    check_entry_name(&key, name)?;
                    tree.insert_child(parent, Node::file(mem::take(name), None, mem::take(content)));
                }
                SerializedNode::Directory { name, contents } => {
                    check_entry_name(&key, name)?;
                    let id = tree.insert_child(parent, Node::directory(mem::take(name), None));
                    pending.push((id, mem::take(contents)));
                }
            }
        }
    }

    tree.verify()?;
    Ok(tree)
}

/// Pretty-printed JSON document for the whole tree
pub fn to_json(tree: &Tree) -> Result<String, PersistenceError> {
    let document = encode(tree)?;
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::pretty(&mut out);
    document.serialize(serde_stacker::Serializer::new(&mut serializer))?;
    String::from_utf8(out).map_err(|e| PersistenceError::InvalidState(e.to_string()))
}

/// Parse a JSON document and rebuild the tree it describes
///
/// Nesting depth is unbounded; the stack grows on demand while parsing.
pub fn from_json(text: &str) -> Result<Tree, PersistenceError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let document = SerializedNode::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    decode(document)
}

fn check_entry_name(key: &str, name: &str) -> Result<(), PersistenceError> {
    if key != name {
        return Err(PersistenceError::Malformed(format!(
            "entry '{}' holds a node named '{}'",
            key, name
        )));
    }
    validate_name(name).map_err(|e| match e {
        FsError::InvalidArgument(msg) => PersistenceError::Malformed(msg),
        other => PersistenceError::Corrupted(other),
    })
}
