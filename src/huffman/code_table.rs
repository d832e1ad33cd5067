//! Per-symbol code paths derived from a tree.

use crate::huffman::tree::Node;
use bitvec::prelude::*;

/// Branch decisions from the root to a leaf, first decision first.
pub type Code = BitVec<u8, Lsb0>;

/// Maps every byte value to its code. Symbols absent from the tree have an empty code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Code>,
}

impl CodeTable {
    /// Collects the root-to-leaf path of every leaf under `root`.
    ///
    /// Vacant branches contribute nothing.
    pub fn from_tree(root: &Node) -> Self {
        let mut codes = vec![Code::new(); 256];
        let mut stack: Vec<(&Node, Code)> = vec![(root, Code::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    log::trace!("code for {:#04x}: {:?}", symbol, path);
                    codes[*symbol as usize] = path;
                }
                Node::Internal { zero, one, .. } => {
                    let mut one_path = path.clone();
                    one_path.push(true);
                    let mut zero_path = path;
                    zero_path.push(false);
                    stack.push((&**one, one_path));
                    stack.push((&**zero, zero_path));
                }
                Node::Vacant => {}
            }
        }

        CodeTable { codes }
    }

    /// The code for `symbol`, or `None` if it has none.
    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Lsb0>> {
        let code = &self.codes[symbol as usize];
        if code.is_empty() {
            None
        } else {
            Some(code.as_bitslice())
        }
    }

    /// Length of the code for `symbol` in bits, 0 if it has none.
    pub fn code_len(&self, symbol: u8) -> usize {
        self.codes[symbol as usize].len()
    }

    /// `(symbol, code)` for every coded symbol, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Lsb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, code)| !code.is_empty())
            .map(|(symbol, code)| (symbol as u8, code.as_bitslice()))
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all code lengths in bits.
    pub fn total_bits(&self) -> usize {
        self.codes.iter().map(|code| code.len()).sum()
    }

    /// Returns true if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let coded: Vec<_> = self.iter().collect();
        coded.iter().enumerate().all(|(i, (_, a))| {
            coded
                .iter()
                .enumerate()
                .all(|(j, (_, b))| i == j || !b.starts_with(a))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::frequency::FrequencyTable;
    use crate::huffman::tree::HuffmanTree;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn table_for(input: &[u8]) -> CodeTable {
        let mut freq = FrequencyTable::new();
        freq.update(input);
        HuffmanTree::from_frequencies(&freq).unwrap().code_table()
    }

    #[test]
    fn test_two_symbol_scenario() {
        let codes = table_for(&[0x61, 0x62, 0x61, 0x61]);
        assert_eq!(codes.len(), 2);
        assert_eq!(codes.get(0x61).unwrap(), bits![u8, Lsb0; 1]);
        assert_eq!(codes.get(0x62).unwrap(), bits![u8, Lsb0; 0]);
        assert_eq!(codes.get(0x63), None);
        assert_eq!(codes.total_bits(), 2);
    }

    #[test]
    fn test_single_symbol_has_one_bit_code() {
        let codes = table_for(&[0x41; 1000]);
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get(0x41).unwrap(), bits![u8, Lsb0; 0]);
    }

    #[test]
    fn test_codes_follow_tree_paths() {
        let root = Node::internal(
            Node::leaf(b'x', 0),
            Node::internal(Node::Vacant, Node::leaf(b'y', 0)),
        );
        let codes = CodeTable::from_tree(&root);
        assert_eq!(codes.get(b'x').unwrap(), bits![u8, Lsb0; 0]);
        assert_eq!(codes.get(b'y').unwrap(), bits![u8, Lsb0; 1, 1]);
        let symbols: Vec<u8> = codes.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'x', b'y']);
    }

    #[test]
    fn test_random_tables_are_prefix_free() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let len = rng.gen_range(1..4000);
            let alphabet = rng.gen_range(1..=255u8);
            let input: Vec<u8> = (0..len).map(|_| rng.gen_range(0..=alphabet)).collect();
            let codes = table_for(&input);
            assert!(codes.is_prefix_free());
            for &byte in &input {
                assert!(codes.get(byte).is_some());
            }
        }
    }

    #[test]
    fn test_prefix_check_detects_overlap() {
        let root = Node::internal(Node::leaf(b'a', 0), Node::leaf(b'b', 0));
        let mut codes = CodeTable::from_tree(&root);
        assert!(codes.is_prefix_free());
        codes.codes[b'c' as usize] = bitvec![u8, Lsb0; 0, 1];
        assert!(!codes.is_prefix_free());
    }
}
