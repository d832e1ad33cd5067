//! Huffman tree construction.
//!
//! The builder is deterministic: the same leaf list, in the same order, always yields the same
//! tree. The frequency dictionary format relies on this, since its decoder rebuilds the tree by
//! running the builder again on the stored frequencies.

use crate::huffman::code_table::CodeTable;
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::Result;
use crate::Error;

/// A node of a Huffman tree or of a trie rebuilt from a canonical dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A byte value and how often it occurs.
    Leaf { symbol: u8, frequency: u64 },
    /// A merge point. Reading a 0 bit descends into `zero`, a 1 bit into `one`.
    Internal {
        frequency: u64,
        zero: Box<Node>,
        one: Box<Node>,
    },
    /// A branch that leads to no symbol.
    Vacant,
}

impl Node {
    /// Creates a leaf.
    pub fn leaf(symbol: u8, frequency: u64) -> Self {
        Node::Leaf { symbol, frequency }
    }

    /// Creates an internal node whose frequency is the sum of its children.
    pub fn internal(zero: Node, one: Node) -> Self {
        Node::Internal {
            frequency: zero.frequency().saturating_add(one.frequency()),
            zero: Box::new(zero),
            one: Box::new(one),
        }
    }

    /// Frequency used during construction; 0 for vacant nodes and rebuilt tries.
    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
            Node::Vacant => 0,
        }
    }

    /// Returns true for a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The child reached by `bit`, or `None` if this is not an internal node.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Internal { zero, one, .. } => Some(if bit { &**one } else { &**zero }),
            _ => None,
        }
    }

    /// Number of leaves below and including this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { zero, one, .. } => zero.leaf_count() + one.leaf_count(),
            Node::Vacant => 0,
        }
    }
}

/// Builds a Huffman tree from `leaves` and returns its root.
///
/// Each round stable-sorts the working list by frequency, merges the first two nodes (the first
/// becomes the zero branch) and puts the merged node back at the head of the list. Among equal
/// frequencies, a node that was already ahead stays ahead, and a freshly merged node goes first.
///
/// A single leaf becomes the zero branch of a root whose one branch is [`Node::Vacant`], so the
/// sole symbol gets the one-bit code `0`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `leaves` is empty.
///
/// # Example
///
/// ```
/// use bee_compress::huffman::tree::{build_tree, Node};
///
/// let root = build_tree(vec![Node::leaf(b'a', 3), Node::leaf(b'b', 1)]).unwrap();
/// assert_eq!(root.frequency(), 4);
/// assert_eq!(root.child(false), Some(&Node::leaf(b'b', 1)));
/// ```
pub fn build_tree(leaves: Vec<Node>) -> Result<Node> {
    if leaves.is_empty() {
        return Err(Error::invalid("cannot build a tree without symbols"));
    }

    let mut nodes = leaves;
    if nodes.len() == 1 {
        let leaf = nodes.remove(0);
        return Ok(Node::internal(leaf, Node::Vacant));
    }

    while nodes.len() > 1 {
        nodes.sort_by_key(Node::frequency);
        let zero = nodes.remove(0);
        let one = nodes.remove(0);
        nodes.insert(0, Node::internal(zero, one));
    }
    Ok(nodes.remove(0))
}

/// A complete code tree, either built from frequencies or rebuilt from a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Builds a tree from a leaf list. See [`build_tree`].
    pub fn build(leaves: Vec<Node>) -> Result<Self> {
        let root = build_tree(leaves)?;
        log::debug!(
            "built huffman tree: {} leaves, root frequency {}",
            root.leaf_count(),
            root.frequency()
        );
        Ok(HuffmanTree { root })
    }

    /// Builds a tree from the symbols of a scanned table, in ascending symbol order.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
        Self::build(table.leaves())
    }

    /// Wraps an already assembled root.
    pub(crate) fn from_root(root: Node) -> Self {
        HuffmanTree { root }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Derives the code of every symbol in the tree.
    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(&self.root)
    }
}
