use rayon::prelude::*;

use crate::libs::synmap::block::{Key, Side};
use crate::libs::synmap::contig::Contig;
use crate::libs::synmap::map::{Stage, Synmap};

impl Contig {
    /// Threads the start and stop orderings through the arena.
    ///
    /// Ties keep arena order, so the orderings are deterministic. Removed
    /// blocks stay out of both orderings.
    pub(crate) fn link_block_corners(&mut self) {
        let mut ranked: Vec<usize> = (0..self.blocks.len())
            .filter(|&i| !self.blocks[i].is_removed())
            .collect();
        for key in Key::BOTH {
            ranked.sort_by_key(|&i| self.blocks[i].pos(key));
            for (rank, &i) in ranked.iter().enumerate() {
                let prev = rank.checked_sub(1).map(|r| ranked[r]);
                let next = ranked.get(rank + 1).copied();
                self.blocks[i].set_order(key, Side::Lo, prev);
                self.blocks[i].set_order(key, Side::Hi, next);
            }
        }
    }

    /// Finds the four extremal blocks by walking each ordering out from an
    /// arbitrary arena member.
    pub(crate) fn set_contig_corners(&mut self) {
        let seed = match self.blocks.iter().position(|b| !b.is_removed()) {
            Some(i) => i,
            None => {
                self.corners = [[None; 2]; 2];
                return;
            }
        };
        for key in Key::BOTH {
            for side in Side::BOTH {
                let mut cur = seed;
                while let Some(next) = self.blocks[cur].order(key, side) {
                    cur = next;
                }
                self.set_corner(key, side, Some(cur));
            }
        }
    }
}

/// Builds the start and stop orderings of every contig in both genomes.
pub fn link_block_corners(syn: &mut Synmap) {
    syn.genomes
        .par_iter_mut()
        .flat_map(|genome| genome.contigs.par_iter_mut())
        .for_each(|contig| contig.link_block_corners());
}

/// Records each contig's lowest/highest block by start and by stop.
///
/// The orderings must already exist; see [`link_block_corners`].
pub fn set_contig_corners(syn: &mut Synmap) {
    syn.genomes
        .par_iter_mut()
        .flat_map(|genome| genome.contigs.par_iter_mut())
        .for_each(|contig| contig.set_contig_corners());
    syn.advance(Stage::Cornered);
}

/// Both corner passes in order.
pub fn link_corners(syn: &mut Synmap) {
    link_block_corners(syn);
    set_contig_corners(syn);
    log::debug!("Linked block orderings and contig corners");
}
