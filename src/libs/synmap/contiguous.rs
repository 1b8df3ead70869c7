use crate::libs::synmap::block::{BlockId, Key, Side, Strand};
use crate::libs::synmap::error::SynmapError;
use crate::libs::synmap::map::{Stage, Synmap, QUERY};

/// Outcome of testing whether block `b` can extend the set ending at `a`.
struct Extension {
    /// Distance from `a` to `b` in query group space
    qdiff: i64,
    accepted: bool,
}

/// Whether any block strictly between `a` and `b` maps elsewhere into the
/// contig `a` maps to, without overlapping `a` or `b`.
///
/// ```text
///       a            z           b
/// T  <=====>       <===>      <=====>
///       |            |           |
/// Q  <=====>       <===>      <=====>
///              conflict
///
/// Q2               <===>
///       a            |           b
/// T  <=====>       <===>      <=====>
///       |            z           |
/// Q  <=====>                  <=====>
///             no conflict
/// ```
///
/// `a` and `b` sit on one contig. The walk goes up the start ordering when
/// `a` is on the `+` strand and down the stop ordering for `-` or `.`;
/// failing to meet `b` that way is a structural error.
pub fn no_conflict(syn: &Synmap, a: BlockId, b: BlockId) -> Result<bool, SynmapError> {
    if a.contig_id() != b.contig_id() {
        return Err(SynmapError::Precondition(format!(
            "conflict check across contigs: {:?} vs {:?}",
            a, b
        )));
    }

    let contig = syn.contig(a.contig_id());
    let blk_a = contig.block(a.index);
    let blk_b = contig.block(b.index);
    let mapped_to = syn.block(blk_a.over()).parent();
    let (key, side) = match blk_a.strand() {
        Strand::Plus => (Key::Start, Side::Hi),
        _ => (Key::Stop, Side::Lo),
    };

    let mut cur = Some(a.index);
    while let Some(i) = cur {
        if i == b.index {
            return Ok(true);
        }
        let x = contig.block(i);
        if !x.overlaps(blk_a)
            && !x.overlaps(blk_b)
            && syn.block(x.over()).parent() == mapped_to
        {
            return Ok(false);
        }
        cur = x.order(key, side);
    }

    Err(SynmapError::Precondition(format!(
        "walked off contig {} looking for link {} from link {}",
        contig.name(),
        blk_b.linkid(),
        blk_a.linkid()
    )))
}

fn try_extend(syn: &Synmap, a: BlockId, b: BlockId, k: i64) -> Result<Extension, SynmapError> {
    let (aq, bq) = (syn.block(a), syn.block(b));
    let (at, bt) = (syn.block(aq.over()), syn.block(bq.over()));

    // <= -2 apart, -1 adjacent on the reverse strand, 0 overlapping,
    // 1 adjacent, >= 2 apart
    let qdiff = bq.grpid() as i64 - aq.grpid() as i64;
    let tdiff = bt.grpid() as i64 - at.grpid() as i64;
    let demerits = tdiff.abs() + qdiff - 2;

    let accepted = qdiff != 0
        && tdiff != 0
        && bt.strand() == at.strand()
        && aq.parent() == bq.parent()
        && at.parent() == bt.parent()
        && demerits <= k
        && match bt.strand() {
            Strand::Plus => tdiff > 0,
            Strand::Minus => tdiff < 0,
            Strand::Unknown => false,
        }
        && no_conflict(syn, aq.over(), bq.over())?
        && no_conflict(syn, a, b)?;

    Ok(Extension { qdiff, accepted })
}

fn assign_set(syn: &mut Synmap, id: BlockId, setid: usize) {
    let over = syn.block(id).over();
    syn.block_mut(id).setid = setid;
    syn.block_mut(over).setid = setid;
}

/// Chains `a -> b` on both genomes.
fn join(syn: &mut Synmap, a: BlockId, b: BlockId) {
    let setid = syn.block(a).setid();
    assign_set(syn, b, setid);

    let (a_over, b_over) = (syn.block(a).over(), syn.block(b).over());
    for (x, y) in [(a, b), (a_over, b_over)] {
        syn.block_mut(y).set_chain(Side::Lo, Some(x.index));
        syn.block_mut(x).set_chain(Side::Hi, Some(y.index));
    }
}

/// Builds the contiguous sets of one query contig.
///
/// `open` holds the tail of every set that may still grow, searched from the
/// top for each new block. A tail too far behind to ever match again is
/// retired on the way down; the bottom tail is only ever replaced.
fn link_contig(
    syn: &mut Synmap,
    contig: usize,
    k: usize,
    setid: &mut usize,
) -> Result<(), SynmapError> {
    let id = |index: usize| BlockId {
        genome: QUERY,
        contig,
        index,
    };

    let q = &syn.genomes[QUERY].contigs[contig];
    let first = match q.corner(Key::Start, Side::Lo) {
        Some(first) => first,
        None => return Ok(()),
    };
    let rest: Vec<usize> = q.iter(Key::Start).skip(1).collect();
    let k = i64::try_from(k).unwrap_or(i64::MAX);

    *setid += 1;
    assign_set(syn, id(first), *setid);
    let mut open: Vec<BlockId> = vec![id(first)];

    for b in rest.into_iter().map(id) {
        let mut i = 0;
        loop {
            let a = open[i];
            let ext = try_extend(syn, a, b, k)?;
            if ext.accepted {
                join(syn, a, b);
                open[i] = b;
                break;
            } else if i + 1 == open.len() {
                *setid += 1;
                assign_set(syn, b, *setid);
                open.push(b);
                break;
            } else if ext.qdiff - 1 > k {
                open.remove(i);
            } else {
                i += 1;
            }
        }
    }

    Ok(())
}

/// Merges collinear blocks into contiguous sets under gap tolerance `k`.
///
/// Set ids start at 1 and are shared across query contigs. Returns the number
/// of sets.
pub fn link_contiguous_blocks(syn: &mut Synmap, k: usize) -> Result<usize, SynmapError> {
    syn.require(Stage::Grouped, "contiguous set building")?;

    // drop sets from an earlier run
    for genome in syn.genomes.iter_mut() {
        for contig in genome.contigs.iter_mut() {
            for blk in contig.blocks.iter_mut().filter(|b| !b.is_removed()) {
                blk.setid = 0;
                blk.chain = [None; 2];
            }
        }
    }

    let mut setid = 0;
    for contig in 0..syn.query().size() {
        link_contig(syn, contig, k, &mut setid)?;
    }
    syn.advance(Stage::Chained);

    log::debug!("Built {} contiguous sets with k = {}", setid, k);
    Ok(setid)
}

/// Coordinate of the `side` end of the set `id` belongs to, found by walking
/// chain links.
pub fn set_bound(syn: &Synmap, id: BlockId, side: Side) -> u64 {
    let contig = syn.contig(id.contig_id());
    let mut cur = id.index;
    while let Some(next) = contig.block(cur).chain(side) {
        cur = next;
    }
    match side {
        Side::Lo => contig.block(cur).start(),
        Side::Hi => contig.block(cur).stop(),
    }
}

/// One reported synteny block: a contiguous set summarised on both genomes.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntenyBlock {
    pub setid: usize,
    pub q_name: String,
    pub q_start: u64,
    pub q_stop: u64,
    pub t_name: String,
    pub t_start: u64,
    pub t_stop: u64,
    pub score: f64,
    pub strand: Strand,
    /// Number of member links
    pub size: usize,
}

impl std::fmt::Display for SyntenyBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.q_name,
            self.q_start,
            self.q_stop,
            self.t_name,
            self.t_start,
            self.t_stop,
            self.score,
            self.strand,
            self.setid
        )
    }
}

/// Every live contiguous set, in set id order.
pub fn synteny_blocks(syn: &Synmap) -> Vec<SyntenyBlock> {
    let mut sets = Vec::new();
    for (c, q) in syn.query().contigs().iter().enumerate() {
        // set heads only
        for head in q.iter(Key::Start).filter(|&i| q.block(i).chain(Side::Lo).is_none()) {
            let head_id = BlockId {
                genome: QUERY,
                contig: c,
                index: head,
            };
            let blk = q.block(head);
            let t_first = syn.block(blk.over());
            let t = syn.contig(t_first.parent());

            let mut set = SyntenyBlock {
                setid: blk.setid(),
                q_name: q.name().to_string(),
                q_start: set_bound(syn, head_id, Side::Lo),
                q_stop: set_bound(syn, head_id, Side::Hi),
                t_name: t.name().to_string(),
                t_start: t_first.start(),
                t_stop: t_first.stop(),
                score: 0.0,
                strand: t_first.strand(),
                size: 0,
            };

            let mut cur = Some(head);
            while let Some(i) = cur {
                let member = q.block(i);
                let over = syn.block(member.over());
                set.t_start = set.t_start.min(over.start());
                set.t_stop = set.t_stop.max(over.stop());
                set.score += member.score();
                set.size += 1;
                cur = member.chain(Side::Hi);
            }
            sets.push(set);
        }
    }
    sets.sort_by_key(|s| s.setid);
    sets
}
