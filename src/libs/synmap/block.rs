use std::fmt;
use std::str::FromStr;

use crate::libs::synmap::error::SynmapError;

/// One end of an interval, or one direction along a contig.
///
/// `Lo` points towards smaller coordinates, `Hi` towards larger ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Lo = 0,
    Hi = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Lo, Side::Hi];

    pub fn flip(self) -> Side {
        match self {
            Side::Lo => Side::Hi,
            Side::Hi => Side::Lo,
        }
    }

    pub fn idx(self) -> usize {
        self as usize
    }
}

/// The coordinate an ordering is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Start = 0,
    Stop = 1,
}

impl Key {
    pub const BOTH: [Key; 2] = [Key::Start, Key::Stop];

    pub fn other(self) -> Key {
        match self {
            Key::Start => Key::Stop,
            Key::Stop => Key::Start,
        }
    }

    /// The boundary a block shows to blocks behind it when moving towards `side`.
    ///
    /// Moving up the contig, a block is entered at its start; moving down, at its stop.
    pub fn trailing(side: Side) -> Key {
        match side {
            Side::Hi => Key::Start,
            Side::Lo => Key::Stop,
        }
    }

    pub fn idx(self) -> usize {
        self as usize
    }
}

/// Strand of a target interval relative to its query interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    Plus,
    Minus,
    #[default]
    Unknown,
}

impl Strand {
    pub fn as_char(self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unknown => '.',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Strand {
    type Err = SynmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            "." => Ok(Strand::Unknown),
            _ => Err(SynmapError::Strand(s.to_string())),
        }
    }
}

/// Address of a contig inside a [`Synmap`](super::Synmap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContigId {
    pub genome: usize,
    pub contig: usize,
}

/// Stable address of a block: its contig plus its slot in the contig arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId {
    pub genome: usize,
    pub contig: usize,
    pub index: usize,
}

impl BlockId {
    pub fn contig_id(&self) -> ContigId {
        ContigId {
            genome: self.genome,
            contig: self.contig,
        }
    }

    pub(crate) fn sibling(&self, index: usize) -> BlockId {
        BlockId { index, ..*self }
    }
}

/// One side of an aligned interval pair.
///
/// All relation links except `over` point into the same contig arena and are
/// stored as arena slots.
#[derive(Debug, Clone)]
pub struct Block {
    pos: [u64; 2],
    score: f64,
    strand: Strand,
    parent: ContigId,
    over: BlockId,
    linkid: usize,
    pub(crate) grpid: usize,
    pub(crate) setid: usize,
    // [Key][Side]
    pub(crate) order: [[Option<usize>; 2]; 2],
    pub(crate) adj: [Option<usize>; 2],
    pub(crate) chain: [Option<usize>; 2],
    pub(crate) removed: bool,
}

impl Block {
    pub(crate) fn new(
        start: u64,
        stop: u64,
        score: f64,
        strand: Strand,
        parent: ContigId,
        over: BlockId,
        linkid: usize,
    ) -> Self {
        Self {
            pos: [start, stop],
            score,
            strand,
            parent,
            over,
            linkid,
            grpid: 0,
            setid: 0,
            order: [[None; 2]; 2],
            adj: [None; 2],
            chain: [None; 2],
            removed: false,
        }
    }

    pub fn start(&self) -> u64 {
        self.pos[0]
    }
    pub fn stop(&self) -> u64 {
        self.pos[1]
    }
    pub fn pos(&self, key: Key) -> u64 {
        self.pos[key.idx()]
    }
    pub fn score(&self) -> f64 {
        self.score
    }
    pub fn strand(&self) -> Strand {
        self.strand
    }
    pub fn parent(&self) -> ContigId {
        self.parent
    }
    pub fn over(&self) -> BlockId {
        self.over
    }
    pub fn linkid(&self) -> usize {
        self.linkid
    }
    pub fn grpid(&self) -> usize {
        self.grpid
    }
    pub fn setid(&self) -> usize {
        self.setid
    }
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Neighbor in the `key` ordering on the `side` of this block.
    pub fn order(&self, key: Key, side: Side) -> Option<usize> {
        self.order[key.idx()][side.idx()]
    }

    /// Nearest block on `side` that does not overlap this one.
    pub fn adj(&self, side: Side) -> Option<usize> {
        self.adj[side.idx()]
    }

    /// Previous (`Lo`) or next (`Hi`) block of the same contiguous set.
    pub fn chain(&self, side: Side) -> Option<usize> {
        self.chain[side.idx()]
    }

    pub(crate) fn set_order(&mut self, key: Key, side: Side, link: Option<usize>) {
        self.order[key.idx()][side.idx()] = link;
    }
    pub(crate) fn set_adj(&mut self, side: Side, link: Option<usize>) {
        self.adj[side.idx()] = link;
    }
    pub(crate) fn set_chain(&mut self, side: Side, link: Option<usize>) {
        self.chain[side.idx()] = link;
    }

    /// Closed-interval overlap; blocks that merely touch count as overlapping.
    ///
    /// ```
    /// # use synder::libs::synmap::*;
    /// let links = "\
    /// q1\t0\t100\tt1\t0\t100\t1\t+
    /// q1\t100\t200\tt1\t300\t400\t1\t+
    /// q1\t250\t300\tt1\t500\t600\t1\t+
    /// ";
    /// let links = read_links(links.as_bytes()).unwrap();
    /// let syn = Synmap::from_links(&links, &Default::default(), &Default::default()).unwrap();
    /// let q = syn.contig(ContigId { genome: 0, contig: 0 });
    /// assert!(q.block(0).overlaps(q.block(1)));
    /// assert!(!q.block(0).overlaps(q.block(2)));
    /// ```
    pub fn overlaps(&self, other: &Block) -> bool {
        self.start() <= other.stop() && self.stop() >= other.start()
    }
}
