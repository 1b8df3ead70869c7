//! Synteny maps between a query and a target genome.
//!
//! A [`Synmap`] holds both genomes as contigs owning fixed block arenas. The
//! construction passes run in order:
//!
//! 1. [`link_corners`]: start/stop orderings and contig corners
//! 2. [`set_overlap_group`]: overlap group ids
//! 3. [`link_adjacent_blocks`]: nearest non-overlapping neighbors
//! 4. [`link_contiguous_blocks`]: contiguous sets under a gap tolerance
//!
//! [`remove_block`] and [`validate_synmap`] can run any time after step 1.

pub mod adjacency;
pub mod block;
pub mod contig;
pub mod contiguous;
pub mod corner;
pub mod error;
pub mod group;
pub mod links;
pub mod map;
pub mod unlink;
pub mod validate;

pub use adjacency::link_adjacent_blocks;
pub use block::{Block, BlockId, ContigId, Key, Side, Strand};
pub use contig::{Contig, Genome};
pub use contiguous::{link_contiguous_blocks, no_conflict, set_bound, synteny_blocks, SyntenyBlock};
pub use corner::{link_block_corners, link_corners, set_contig_corners};
pub use error::SynmapError;
pub use group::set_overlap_group;
pub use links::{read_links, Link};
pub use map::{Stage, Synmap, QUERY, TARGET};
pub use unlink::remove_block;
pub use validate::validate_synmap;
