use rayon::prelude::*;

use crate::libs::synmap::block::{Key, Side};
use crate::libs::synmap::contig::Contig;
use crate::libs::synmap::error::SynmapError;
use crate::libs::synmap::map::{Stage, Synmap};

/// `a` lies strictly before `b` when travelling towards `dir`.
fn behind(a: u64, b: u64, dir: Side) -> bool {
    match dir {
        Side::Hi => a < b,
        Side::Lo => a > b,
    }
}

impl Contig {
    /// Links every block to its nearest non-overlapping neighbor on the side
    /// opposite `dir`, scanning towards `dir`.
    ///
    /// For `dir == Hi`, given
    ///
    /// ```text
    ///  |---a---|
    ///            |--b--|
    ///             |----c----|
    ///                     |---d---|
    ///                               |---e---|
    /// ```
    ///
    /// the `Lo` neighbors are a: none, b: a, c: a, d: b, e: d.
    ///
    /// `hi` walks blocks in order of the boundary they show behind them and is
    /// the block being assigned; `lo` walks the other ordering and stays on the
    /// last block seen strictly behind `hi`.
    pub(crate) fn link_adjacent_blocks(&mut self, dir: Side) -> Result<(), SynmapError> {
        if self.blocks.iter().all(|b| b.is_removed()) {
            return Ok(());
        }

        let back = Key::trailing(dir);
        let front = back.other();

        let (mut hi, mut lo) = match (
            self.corner(back, dir.flip()),
            self.corner(front, dir.flip()),
        ) {
            (Some(hi), Some(lo)) => (Some(hi), lo),
            _ => {
                return Err(SynmapError::Precondition(format!(
                    "contig {} has no corners, link them before adjacency",
                    self.name()
                )))
            }
        };

        while let Some(h) = hi {
            let boundary = self.blocks[h].pos(back);
            let next_h = self.blocks[h].order(back, dir);

            // lo is not behind hi: only happens at the start of the scan
            if !behind(self.blocks[lo].pos(front), boundary, dir) {
                self.blocks[h].set_adj(dir.flip(), None);
                hi = next_h;
                continue;
            }

            match self.blocks[lo].order(front, dir) {
                // a nearer block is still clear of hi
                Some(n) if behind(self.blocks[n].pos(front), boundary, dir) => lo = n,
                _ => {
                    self.blocks[h].set_adj(dir.flip(), Some(lo));
                    hi = next_h;
                }
            }
        }

        Ok(())
    }
}

/// Fills both adjacency slots of every block, contig by contig.
pub fn link_adjacent_blocks(syn: &mut Synmap) -> Result<(), SynmapError> {
    syn.require(Stage::Cornered, "adjacency linking")?;

    syn.genomes
        .par_iter_mut()
        .flat_map(|genome| genome.contigs.par_iter_mut())
        .try_for_each(|contig| {
            contig.link_adjacent_blocks(Side::Hi)?;
            contig.link_adjacent_blocks(Side::Lo)
        })?;
    syn.advance(Stage::Adjacent);

    log::debug!("Linked adjacent blocks");
    Ok(())
}
