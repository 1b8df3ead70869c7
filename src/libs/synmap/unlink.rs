use crate::libs::synmap::block::{BlockId, Key, Side};
use crate::libs::synmap::contig::Contig;
use crate::libs::synmap::map::Synmap;

impl Contig {
    /// Detaches everything on the `end` side of block `i` that points at it.
    ///
    /// Covers the contig corners at that end, both orderings, the chain and
    /// every block whose adjacency slot facing `i` names it. Running both ends
    /// leaves no live link to `i`; the block's own links are untouched.
    pub(crate) fn unlink_block_directed(&mut self, i: usize, end: Side) {
        let blk = self.blocks[i].clone();
        let away = end.flip();

        // 1. corners move inwards
        for key in Key::BOTH {
            if self.corner(key, end) == Some(i) {
                self.set_corner(key, end, blk.order(key, away));
            }
        }

        // 2. orderings
        for key in Key::BOTH {
            if let Some(n) = blk.order(key, end) {
                self.blocks[n].set_order(key, away, blk.order(key, away));
            }
        }

        // 3. chain
        if let Some(n) = blk.chain(end) {
            self.blocks[n].set_chain(away, blk.chain(away));
        }

        // 4. adjacency
        //
        // Blocks on the `end` side that see `i` as their nearest neighbor form
        // a run starting at `i`'s own neighbor. Each takes the block next to
        // `i` in the ordering keyed on the boundary facing them, which is the
        // next nearest one clear of them.
        //
        //                    <====>   adj[Hi]: takes prev-by-stop
        // i+1       <=====>           next-by-stop, overlaps adj[Hi]
        // i         <=====>
        // i-1     <====>              prev-by-stop
        let walk = Key::trailing(end);
        let replacement = blk.order(walk.other(), away);
        let mut cur = blk.adj(end);
        while let Some(r) = cur {
            if self.blocks[r].adj(away) != Some(i) {
                break;
            }
            self.blocks[r].set_adj(away, replacement);
            cur = self.blocks[r].order(walk, end);
        }
    }

    pub(crate) fn unlink_block(&mut self, i: usize) {
        self.unlink_block_directed(i, Side::Lo);
        self.unlink_block_directed(i, Side::Hi);

        let blk = &mut self.blocks[i];
        blk.order = [[None; 2]; 2];
        blk.adj = [None; 2];
        blk.chain = [None; 2];
        blk.removed = true;
    }
}

/// Removes a block and its homolog from every linked view.
///
/// Storage persists and the block keeps its contig, positions, group and set
/// ids; it is flagged removed instead. Removing a removed block does nothing.
pub fn remove_block(syn: &mut Synmap, id: BlockId) {
    if syn.block(id).is_removed() {
        return;
    }
    syn.contig_mut(id.contig_id()).unlink_block(id.index);

    let over = syn.block(id).over();
    if !syn.block(over).is_removed() {
        remove_block(syn, over);
    }
    log::debug!("Removed link {}", syn.block(id).linkid());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::synmap::adjacency::link_adjacent_blocks;
    use crate::libs::synmap::map::tests::synmap_from;
    use crate::libs::synmap::validate::validate_synmap;

    const INPUT: &str = "\
q1 0 80 t1 0 80 1 +
q1 100 160 t1 100 160 1 +
q1 110 210 t1 110 210 1 +
q1 200 280 t1 200 280 1 +
q1 300 380 t1 300 380 1 +
q1 390 400 t1 390 400 1 +
q1 50 60 t2 0 10 1 +
";

    fn assert_untouched(contig: &Contig, gone: usize) {
        for key in Key::BOTH {
            for side in Side::BOTH {
                assert_ne!(contig.corner(key, side), Some(gone));
            }
        }
        for (i, b) in contig.blocks().iter().enumerate() {
            if b.is_removed() {
                continue;
            }
            for side in Side::BOTH {
                assert_ne!(b.adj(side), Some(gone), "adj of {}", i);
                assert_ne!(b.chain(side), Some(gone), "chain of {}", i);
                for key in Key::BOTH {
                    assert_ne!(b.order(key, side), Some(gone), "order of {}", i);
                }
            }
        }
    }

    /// Adjacency after removals must equal adjacency rebuilt from scratch.
    fn assert_adjacency_fresh(syn: &Synmap) {
        let mut fresh = syn.clone();
        link_adjacent_blocks(&mut fresh).unwrap();
        for g in 0..2 {
            for (c, contig) in syn.genome(g).contigs().iter().enumerate() {
                for (i, b) in contig.blocks().iter().enumerate() {
                    if b.is_removed() {
                        continue;
                    }
                    let f = fresh.genome(g).contig(c).block(i);
                    for side in Side::BOTH {
                        match (b.adj(side), f.adj(side)) {
                            (Some(x), Some(y)) => assert_eq!(
                                contig.block(x).pos(Key::trailing(side)),
                                contig.block(y).pos(Key::trailing(side)),
                                "genome {} block {} side {:?}",
                                g,
                                i,
                                side
                            ),
                            (x, y) => assert_eq!(x, y, "genome {} block {} side {:?}", g, i, side),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_remove_middle_block() {
        let mut syn = synmap_from(INPUT);
        syn.link_all(3).unwrap();

        let id = syn.find_link(3).unwrap();
        let over = syn.block(id).over();
        remove_block(&mut syn, id);

        assert!(syn.block(id).is_removed());
        assert!(syn.block(over).is_removed());
        assert_eq!(syn.block(id).parent(), id.contig_id());
        assert_untouched(syn.query().contig(0), id.index);
        assert_untouched(syn.target().contig(0), over.index);
        assert_adjacency_fresh(&syn);
        validate_synmap(&syn);

        // second removal of either side is a no-op
        remove_block(&mut syn, over);
        remove_block(&mut syn, id);
        validate_synmap(&syn);
    }

    #[test]
    fn test_remove_corners_and_everything() {
        let mut syn = synmap_from(INPUT);
        syn.link_all(3).unwrap();

        let q = syn.query().contig(0);
        let lowest = q.corner(Key::Start, Side::Lo).unwrap();
        let highest = q.corner(Key::Stop, Side::Hi).unwrap();
        let lowest = BlockId {
            genome: 0,
            contig: 0,
            index: lowest,
        };
        let highest = lowest.sibling(highest);

        remove_block(&mut syn, lowest);
        remove_block(&mut syn, highest);
        assert_adjacency_fresh(&syn);
        validate_synmap(&syn);

        let q = syn.query().contig(0);
        assert_eq!(q.corner(Key::Start, Side::Lo), syn.find_link(6).map(|b| b.index));
        assert_eq!(q.block(q.corner(Key::Stop, Side::Hi).unwrap()).stop(), 380);

        for linkid in 0..7 {
            let id = syn.find_link(linkid).unwrap();
            remove_block(&mut syn, id);
            assert_adjacency_fresh(&syn);
            validate_synmap(&syn);
        }
        for g in 0..2 {
            for contig in syn.genome(g).contigs() {
                for key in Key::BOTH {
                    for side in Side::BOTH {
                        assert_eq!(contig.corner(key, side), None);
                    }
                }
            }
        }
    }

    #[test]
    fn test_remove_splices_chain() {
        let mut syn = synmap_from(
            "\
q1 0 100 t1 0 100 10 +
q1 150 250 t1 150 250 10 +
q1 400 500 t1 300 400 10 +
",
        );
        syn.link_all(1).unwrap();
        let id = syn.find_link(1).unwrap();
        remove_block(&mut syn, id);

        let q = syn.query().contig(0);
        assert_eq!(q.block(0).chain(Side::Hi), Some(2));
        assert_eq!(q.block(2).chain(Side::Lo), Some(0));
        let t = syn.target().contig(0);
        assert_eq!(t.block(0).chain(Side::Hi), Some(2));
        assert_eq!(t.block(2).chain(Side::Lo), Some(0));
        validate_synmap(&syn);
    }

    #[test]
    fn test_remove_from_target_side() {
        let mut syn = synmap_from(INPUT);
        syn.link_all(3).unwrap();
        let t = syn.block(syn.find_link(2).unwrap()).over();
        remove_block(&mut syn, t);
        assert!(syn.block(syn.find_link(2).unwrap()).is_removed());
        assert_adjacency_fresh(&syn);
        validate_synmap(&syn);
    }
}
