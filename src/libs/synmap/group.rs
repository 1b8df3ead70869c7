use crate::libs::synmap::block::{Key, Side};
use crate::libs::synmap::contig::Contig;
use crate::libs::synmap::error::SynmapError;
use crate::libs::synmap::map::{Stage, Synmap};

impl Contig {
    /// Sweeps the start ordering, giving transitively overlapping blocks one
    /// group id. `grpid` is the shared counter and is left at the last id used.
    pub(crate) fn set_overlap_group(&mut self, grpid: &mut usize) {
        let mut maximum_stop = 0;
        let mut cur = self.corner(Key::Start, Side::Lo);
        while let Some(i) = cur {
            let blk = &mut self.blocks[i];
            if blk.start() > maximum_stop {
                *grpid += 1;
            }
            maximum_stop = maximum_stop.max(blk.stop());
            blk.grpid = *grpid;
            cur = blk.order(Key::Start, Side::Hi);
        }
    }
}

/// Assigns overlap group ids across every contig of both genomes.
///
/// The counter is never reset and is bumped once more between contigs, so
/// group ids are unique per run and blocks on different contigs never share one.
/// Returns the last group id handed out.
pub fn set_overlap_group(syn: &mut Synmap) -> Result<usize, SynmapError> {
    syn.require(Stage::Cornered, "overlap grouping")?;

    let mut grpid = 1;
    for genome in syn.genomes.iter_mut() {
        for contig in genome.contigs.iter_mut() {
            contig.set_overlap_group(&mut grpid);
            grpid += 1;
        }
    }
    syn.advance(Stage::Grouped);

    log::debug!("Assigned overlap groups, last id {}", grpid);
    Ok(grpid)
}
