use std::collections::BTreeMap;
use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::libs::synmap::block::{Block, BlockId, ContigId, Key, Side, Strand};
use crate::libs::synmap::contig::{Contig, Genome};
use crate::libs::synmap::error::SynmapError;
use crate::libs::synmap::links::Link;

pub const QUERY: usize = 0;
pub const TARGET: usize = 1;

/// How far the construction pipeline has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Loaded,
    Cornered,
    Grouped,
    Adjacent,
    Chained,
}

/// Root of a query/target genome pair and all their blocks.
#[derive(Debug, Clone)]
pub struct Synmap {
    pub(crate) genomes: [Genome; 2],
    pub(crate) stage: Stage,
}

impl Synmap {
    /// Builds both genomes from a list of links.
    ///
    /// Each link yields a homolog pair allocated together, so `over` is
    /// symmetric from the start. The query block always carries `+`; the
    /// target block carries the link's strand. Contigs keep first-seen order.
    /// A contig missing from its sizes map takes its largest stop as length.
    pub fn from_links(
        links: &[Link],
        q_sizes: &BTreeMap<String, i32>,
        t_sizes: &BTreeMap<String, i32>,
    ) -> Result<Self, SynmapError> {
        if links.is_empty() {
            return Err(SynmapError::Empty);
        }

        // contig name -> link indices, per genome
        let mut members: [IndexMap<&str, Vec<usize>>; 2] = [IndexMap::new(), IndexMap::new()];
        let mut ids: Vec<[BlockId; 2]> = Vec::with_capacity(links.len());

        for (li, link) in links.iter().enumerate() {
            let mut pair = [BlockId {
                genome: 0,
                contig: 0,
                index: 0,
            }; 2];
            for (g, name) in [link.q_name.as_str(), link.t_name.as_str()]
                .into_iter()
                .enumerate()
            {
                let entry = members[g].entry(name);
                let contig = entry.index();
                let slots = entry.or_default();
                pair[g] = BlockId {
                    genome: g,
                    contig,
                    index: slots.len(),
                };
                slots.push(li);
            }
            ids.push(pair);
        }

        let sizes = [q_sizes, t_sizes];
        let build = |g: usize, genome_name: &str| -> Genome {
            let mut contigs = Vec::with_capacity(members[g].len());
            for (c, (name, lis)) in members[g].iter().enumerate() {
                let parent = ContigId {
                    genome: g,
                    contig: c,
                };
                let blocks: Vec<Block> = lis
                    .iter()
                    .map(|&li| {
                        let link = &links[li];
                        let (start, stop, strand) = if g == QUERY {
                            (link.q_start, link.q_stop, Strand::Plus)
                        } else {
                            (link.t_start, link.t_stop, link.strand)
                        };
                        Block::new(start, stop, link.score, strand, parent, ids[li][1 - g], li)
                    })
                    .collect();

                let length = match sizes[g].get(*name) {
                    Some(&len) if len >= 0 => len as u64,
                    _ => blocks.iter().map(|b| b.stop()).max().unwrap_or(0),
                };
                contigs.push(Contig::new(name, length, blocks));
            }
            Genome::new(genome_name, contigs)
        };
        let genomes = [build(QUERY, "query"), build(TARGET, "target")];

        log::debug!(
            "Loaded {} links onto {} query and {} target contigs",
            links.len(),
            genomes[QUERY].size(),
            genomes[TARGET].size()
        );

        Ok(Self {
            genomes,
            stage: Stage::Loaded,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn advance(&mut self, stage: Stage) {
        self.stage = self.stage.max(stage);
    }

    pub(crate) fn require(&self, stage: Stage, pass: &str) -> Result<(), SynmapError> {
        if self.stage < stage {
            return Err(SynmapError::Precondition(format!(
                "{} needs stage {:?}, synmap is at {:?}",
                pass, stage, self.stage
            )));
        }
        Ok(())
    }

    pub fn query(&self) -> &Genome {
        &self.genomes[QUERY]
    }
    pub fn target(&self) -> &Genome {
        &self.genomes[TARGET]
    }
    pub fn genome(&self, g: usize) -> &Genome {
        &self.genomes[g]
    }

    pub fn contig(&self, id: ContigId) -> &Contig {
        &self.genomes[id.genome].contigs[id.contig]
    }
    pub(crate) fn contig_mut(&mut self, id: ContigId) -> &mut Contig {
        &mut self.genomes[id.genome].contigs[id.contig]
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.genomes[id.genome].contigs[id.contig].blocks[id.index]
    }
    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.genomes[id.genome].contigs[id.contig].blocks[id.index]
    }

    /// Address of the query-side block of link `linkid`.
    pub fn find_link(&self, linkid: usize) -> Option<BlockId> {
        for (c, contig) in self.genomes[QUERY].contigs.iter().enumerate() {
            if let Some(index) = contig.blocks.iter().position(|b| b.linkid() == linkid) {
                return Some(BlockId {
                    genome: QUERY,
                    contig: c,
                    index,
                });
            }
        }
        None
    }

    /// Runs every construction pass in order: corners, overlap groups,
    /// adjacency, then contiguous sets with gap tolerance `k`.
    ///
    /// Returns the number of contiguous sets.
    pub fn link_all(&mut self, k: usize) -> Result<usize, SynmapError> {
        super::link_corners(self);
        super::set_overlap_group(self)?;
        super::link_adjacent_blocks(self)?;
        super::link_contiguous_blocks(self, k)
    }

    /// Multi-line rendering of a homolog pair with every relation link given
    /// as a link id, `-` for none.
    pub fn describe(&self, id: BlockId) -> String {
        let blk = self.block(id);
        let mut out = format!("$ setid={} score={}\n", blk.setid(), blk.score());
        let (q, t) = if id.genome == QUERY {
            (id, blk.over())
        } else {
            (blk.over(), id)
        };
        self.describe_side(&mut out, q, 'Q');
        self.describe_side(&mut out, t, 'T');
        out
    }

    fn describe_side(&self, out: &mut String, id: BlockId, label: char) {
        let blk = self.block(id);
        let contig = self.contig(blk.parent());
        let link = |slot: Option<usize>| match slot {
            Some(i) => contig.block(i).linkid().to_string(),
            None => "-".to_string(),
        };

        let _ = writeln!(
            out,
            "  {}-{} parent={} pos({}, {}, {}) grpid={}{}",
            label,
            blk.linkid(),
            contig.name(),
            blk.start(),
            blk.stop(),
            blk.strand(),
            blk.grpid(),
            if blk.is_removed() { " removed" } else { "" }
        );
        let _ = writeln!(
            out,
            "    * cor=[{},{},{},{}]",
            link(blk.order(Key::Start, Side::Lo)),
            link(blk.order(Key::Start, Side::Hi)),
            link(blk.order(Key::Stop, Side::Lo)),
            link(blk.order(Key::Stop, Side::Hi)),
        );
        let _ = writeln!(
            out,
            "    * adj=[{},{}]",
            link(blk.adj(Side::Lo)),
            link(blk.adj(Side::Hi))
        );
        let _ = writeln!(
            out,
            "    * cnr=[{},{}]",
            link(blk.chain(Side::Lo)),
            link(blk.chain(Side::Hi))
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::libs::synmap::links::read_links;

    pub(crate) fn synmap_from(input: &str) -> Synmap {
        let links = read_links(input.as_bytes()).unwrap();
        Synmap::from_links(&links, &BTreeMap::new(), &BTreeMap::new()).unwrap()
    }

    #[test]
    fn test_from_links_pairs() {
        let syn = synmap_from(
            "\
q1 0 100 t1 0 100 10 +
q2 0 50 t1 200 250 20 -
q1 150 250 t2 10 110 30 +
",
        );
        assert_eq!(syn.query().size(), 2);
        assert_eq!(syn.target().size(), 2);
        assert_eq!(syn.query().contig(0).name(), "q1");
        assert_eq!(syn.query().contig(0).size(), 2);
        assert_eq!(syn.target().contig(0).name(), "t1");
        assert_eq!(syn.target().contig(1).length(), 110);

        for g in [QUERY, TARGET] {
            for (c, contig) in syn.genome(g).contigs().iter().enumerate() {
                for index in 0..contig.size() {
                    let id = BlockId {
                        genome: g,
                        contig: c,
                        index,
                    };
                    let blk = syn.block(id);
                    let over = syn.block(blk.over());
                    assert_eq!(over.over(), id);
                    assert_eq!(over.score(), blk.score());
                    assert_eq!(over.linkid(), blk.linkid());
                }
            }
        }

        let q = syn.find_link(1).unwrap();
        assert_eq!(syn.block(q).strand(), Strand::Plus);
        assert_eq!(syn.block(syn.block(q).over()).strand(), Strand::Minus);
        assert_eq!(syn.stage(), Stage::Loaded);
    }

    #[test]
    fn test_from_links_sizes() {
        let links = read_links("q1 0 100 t1 0 100 10 +\n".as_bytes()).unwrap();
        let mut q_sizes = BTreeMap::new();
        q_sizes.insert("q1".to_string(), 1000);
        let syn = Synmap::from_links(&links, &q_sizes, &BTreeMap::new()).unwrap();
        assert_eq!(syn.query().contig(0).length(), 1000);
        assert_eq!(syn.target().contig(0).length(), 100);

        let err = Synmap::from_links(&[], &q_sizes, &q_sizes).unwrap_err();
        assert!(matches!(err, SynmapError::Empty));
    }

    #[test]
    fn test_describe() {
        let mut syn = synmap_from("q1 0 100 t1 0 100 10 +\nq1 200 300 t1 200 300 10 +\n");
        syn.link_all(2).unwrap();
        let text = syn.describe(syn.find_link(0).unwrap());
        assert!(text.starts_with("$ setid=1 score=10\n"));
        assert!(text.contains("Q-0 parent=q1 pos(0, 100, +)"));
        assert!(text.contains("T-0 parent=t1"));
        assert!(text.contains("* cnr=[-,1]"));
        assert!(text.contains("* adj=[-,1]"));
    }
}
