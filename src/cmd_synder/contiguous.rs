use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use synder::libs::synmap::{synteny_blocks, validate_synmap};

pub fn make_subcommand() -> Command {
    let cmd = Command::new("contiguous")
        .about("Merge links into contiguous sets (synteny blocks)")
        .after_help(
            r###"
Processing:
  1. Order the blocks of every contig by start and by stop.
  2. Group transitively overlapping blocks; each group gets a fresh id.
  3. Link each block to its nearest non-overlapping neighbors.
  4. Walk each query contig in start order and extend open sets:
     - qdiff/tdiff: group distance between a set's tail and the new block
       on the query/target
     - demerits = |tdiff| + qdiff - 2 must not exceed k
     - both blocks non-overlapping, same target contig and strand, moving the
       way the strand says, and no third mapping into the target contig
       interleaved between them

Output columns:
  qcontig qstart qstop tcontig tstart tstop score strand setid

Examples:
  synder contiguous links.tsv -k 5 -o sets.tsv
"###,
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Validate every structural invariant after building"),
        );
    super::add_synmap_args(cmd)
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let syn = super::build_synmap(args)?;
    if args.get_flag("check") {
        let live = validate_synmap(&syn);
        log::info!("Validated {} blocks", live);
    }

    let mut writer = synder::writer(args.get_one::<String>("outfile").unwrap())?;
    for set in synteny_blocks(&syn) {
        writeln!(writer, "{}", set)?;
    }
    writer.flush()?;

    Ok(())
}
