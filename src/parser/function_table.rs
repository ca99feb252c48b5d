use serde::{Deserialize, Serialize};

use crate::parser::Block;

/// Ordered registry of labeled blocks shared by every nested lexing and execution step
/// of one run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionTable {
    blocks: Vec<Block>,
}

impl FunctionTable {
    /// Creates an empty table
    pub fn new() -> Self {
        FunctionTable { blocks: Vec::new() }
    }

    /// Appends a block; an earlier block with the same label keeps precedence
    pub fn register(&mut self, block: Block) {
        tracing::debug!(
            label = %block.label,
            instructions = block.instructions.len(),
            "registered block"
        );
        self.blocks.push(block);
    }

    /// First block registered under `label`
    pub fn lookup(&self, label: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.label == label)
    }

    /// True if `label` names a registered block
    pub fn contains(&self, label: &str) -> bool {
        self.lookup(label).is_some()
    }

    /// Number of registered blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True if no block has been registered
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }
}
