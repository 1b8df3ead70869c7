use crate::libs::synmap::block::{Block, Key, Side};

/// A named sequence owning a fixed arena of blocks.
///
/// The arena is filled once at construction and never resized, so arena slots
/// stay valid as block addresses for the lifetime of the contig.
#[derive(Debug, Clone)]
pub struct Contig {
    name: String,
    length: u64,
    pub(crate) blocks: Vec<Block>,
    // [Key][Side]: lowest/highest block by start and by stop
    pub(crate) corners: [[Option<usize>; 2]; 2],
}

impl Contig {
    pub(crate) fn new(name: &str, length: u64, blocks: Vec<Block>) -> Self {
        Self {
            name: name.to_string(),
            length,
            blocks,
            corners: [[None; 2]; 2],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn length(&self) -> u64 {
        self.length
    }
    /// Arena size, removed blocks included.
    pub fn size(&self) -> usize {
        self.blocks.len()
    }
    pub fn block(&self, index: usize) -> &Block {
        &self.blocks[index]
    }
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Extremal live block of the `key` ordering at the `side` end.
    pub fn corner(&self, key: Key, side: Side) -> Option<usize> {
        self.corners[key.idx()][side.idx()]
    }

    pub(crate) fn set_corner(&mut self, key: Key, side: Side, link: Option<usize>) {
        self.corners[key.idx()][side.idx()] = link;
    }

    /// Live blocks walking the `key` ordering from the `Lo` end.
    ///
    /// Empty until the corner links have been built.
    pub fn iter(&self, key: Key) -> OrderIter<'_> {
        OrderIter {
            contig: self,
            key,
            cur: self.corner(key, Side::Lo),
        }
    }
}

pub struct OrderIter<'a> {
    contig: &'a Contig,
    key: Key,
    cur: Option<usize>,
}

impl Iterator for OrderIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let i = self.cur?;
        self.cur = self.contig.blocks[i].order(self.key, Side::Hi);
        Some(i)
    }
}

#[derive(Debug, Clone)]
pub struct Genome {
    name: String,
    pub(crate) contigs: Vec<Contig>,
}

impl Genome {
    pub(crate) fn new(name: &str, contigs: Vec<Contig>) -> Self {
        Self {
            name: name.to_string(),
            contigs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn size(&self) -> usize {
        self.contigs.len()
    }
    pub fn contig(&self, index: usize) -> &Contig {
        &self.contigs[index]
    }
    pub fn contigs(&self) -> &[Contig] {
        &self.contigs
    }
}
