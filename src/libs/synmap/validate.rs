use crate::libs::synmap::block::{BlockId, ContigId, Key, Side};
use crate::libs::synmap::contig::Contig;
use crate::libs::synmap::map::{Stage, Synmap};

/// Asserts every structural invariant of `syn`, panicking on the first
/// violation. Read-only; returns the number of live blocks checked.
///
/// Group ids, adjacency and set ids are only checked once the passes that
/// produce them have run. A block stopping past its contig's declared length
/// is logged as a warning, not treated as a violation.
pub fn validate_synmap(syn: &Synmap) -> usize {
    let mut live = 0;
    for g in 0..2 {
        for (c, contig) in syn.genome(g).contigs().iter().enumerate() {
            live += validate_contig(
                syn,
                ContigId {
                    genome: g,
                    contig: c,
                },
                contig,
            );
        }
    }
    live
}

fn validate_contig(syn: &Synmap, cid: ContigId, contig: &Contig) -> usize {
    let expected = contig.blocks().iter().filter(|b| !b.is_removed()).count();
    if syn.stage() < Stage::Cornered {
        return expected;
    }

    for key in Key::BOTH {
        for side in Side::BOTH {
            match contig.corner(key, side) {
                Some(i) => {
                    assert!(!contig.block(i).is_removed());
                    assert!(contig.block(i).order(key, side).is_none());
                }
                None => assert_eq!(expected, 0, "contig {} lost a corner", contig.name()),
            }
        }

        let mut seen = 0;
        let mut last = None;
        for i in contig.iter(key) {
            seen += 1;
            assert!(seen <= contig.size(), "ordering of {} loops", contig.name());
            last = Some(i);
        }
        assert_eq!(seen, expected, "ordering of {} misses blocks", contig.name());
        assert_eq!(last, contig.corner(key, Side::Hi));
    }

    for i in contig.iter(Key::Start) {
        validate_block(syn, cid, contig, i);
    }
    expected
}

fn validate_block(syn: &Synmap, cid: ContigId, contig: &Contig, i: usize) {
    let stage = syn.stage();
    let id = BlockId {
        genome: cid.genome,
        contig: cid.contig,
        index: i,
    };
    let blk = contig.block(i);
    let over = syn.block(blk.over());

    if blk.stop() > contig.length() {
        log::warn!(
            "stop greater than contig length: {} vs {} on {}",
            blk.stop(),
            contig.length(),
            contig.name()
        );
    }

    assert!(!blk.is_removed());
    assert_eq!(blk.parent(), cid);
    assert!(!over.is_removed(), "link {} lost its homolog", blk.linkid());
    assert_eq!(over.over(), id);
    assert_eq!(over.score(), blk.score());
    assert_eq!(over.setid(), blk.setid());
    if stage >= Stage::Grouped {
        assert_ne!(blk.grpid(), 0);
    }
    if stage >= Stage::Chained {
        assert_ne!(blk.setid(), 0);
    }

    if let Some(n) = blk.chain(Side::Hi) {
        let next = contig.block(n);
        assert_ne!(blk.grpid(), next.grpid());
        assert_eq!(blk.setid(), next.setid());
        assert_eq!(next.chain(Side::Lo), Some(i));
        let next_over = syn.block(next.over());
        assert_eq!(next_over.parent(), over.parent());
        assert_eq!(next_over.chain(Side::Lo), Some(blk.over().index));
    }
    if let Some(p) = blk.chain(Side::Lo) {
        assert_eq!(contig.block(p).chain(Side::Hi), Some(i));
    }

    for key in Key::BOTH {
        if let Some(n) = blk.order(key, Side::Hi) {
            assert!(blk.pos(key) <= contig.block(n).pos(key));
            assert_eq!(contig.block(n).order(key, Side::Lo), Some(i));
        }
        if let Some(p) = blk.order(key, Side::Lo) {
            assert_eq!(contig.block(p).order(key, Side::Hi), Some(i));
        }
    }

    if stage >= Stage::Adjacent {
        for side in Side::BOTH {
            if let Some(a) = blk.adj(side) {
                assert!(!contig.block(a).is_removed());
                assert!(!contig.block(a).overlaps(blk));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::synmap::corner::link_corners;
    use crate::libs::synmap::map::tests::synmap_from;

    const INPUT: &str = "\
q1 0 100 t1 0 100 10 +
q1 150 250 t1 150 250 10 +
q1 400 500 t1 300 400 10 +
q1 90 120 t2 500 600 3 -
q2 0 50 t2 0 50 7 +
";

    #[test]
    fn test_validate_each_stage() {
        let mut syn = synmap_from(INPUT);
        assert_eq!(validate_synmap(&syn), 10);
        link_corners(&mut syn);
        assert_eq!(validate_synmap(&syn), 10);
        syn.link_all(2).unwrap();
        assert_eq!(validate_synmap(&syn), 10);
        // no side effects
        assert_eq!(validate_synmap(&syn), 10);
    }

    #[test]
    #[should_panic]
    fn test_validate_catches_broken_homolog() {
        let mut syn = synmap_from(INPUT);
        syn.link_all(2).unwrap();
        let id = syn.find_link(0).unwrap();
        syn.block_mut(id).setid += 100;
        validate_synmap(&syn);
    }

    #[test]
    #[should_panic]
    fn test_validate_catches_broken_ordering() {
        let mut syn = synmap_from(INPUT);
        syn.link_all(2).unwrap();
        let id = syn.find_link(1).unwrap();
        syn.block_mut(id).set_order(Key::Stop, Side::Lo, None);
        validate_synmap(&syn);
    }

    #[test]
    #[should_panic]
    fn test_validate_catches_unset_groups() {
        let mut syn = synmap_from(INPUT);
        syn.link_all(2).unwrap();
        let id = syn.find_link(4).unwrap();
        syn.block_mut(id).grpid = 0;
        validate_synmap(&syn);
    }
}
