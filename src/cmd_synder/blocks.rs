use clap::{ArgMatches, Command};
use itertools::Itertools;
use std::io::Write;
use synder::libs::synmap::{BlockId, Key, Side, Synmap, QUERY};

pub fn make_subcommand() -> Command {
    let cmd = Command::new("blocks")
        .about("Annotate every link with its groups, set and neighbors")
        .after_help(
            r###"
Output columns, one line per link in query order:
  linkid qcontig qstart qstop tcontig tstart tstop score strand
  qgrpid tgrpid setid adj

adj lists the link ids of the nearest non-overlapping query neighbors below
and above, `-` for none.

With -vv every link is also dumped to stderr with all of its relation links.

Examples:
  synder blocks links.tsv -k 5
"###,
        );
    super::add_synmap_args(cmd)
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let syn = super::build_synmap(args)?;
    let mut writer = synder::writer(args.get_one::<String>("outfile").unwrap())?;

    for (c, contig) in syn.query().contigs().iter().enumerate() {
        for i in contig.iter(Key::Start) {
            let id = BlockId {
                genome: QUERY,
                contig: c,
                index: i,
            };
            log::debug!("\n{}", syn.describe(id));
            writeln!(writer, "{}", block_line(&syn, id))?;
        }
    }
    writer.flush()?;

    Ok(())
}

fn block_line(syn: &Synmap, id: BlockId) -> String {
    let q = syn.block(id);
    let t = syn.block(q.over());
    let q_contig = syn.contig(q.parent());
    let t_contig = syn.contig(t.parent());

    let adj = Side::BOTH
        .iter()
        .map(|&side| match q.adj(side) {
            Some(i) => q_contig.block(i).linkid().to_string(),
            None => "-".to_string(),
        })
        .join(",");

    [
        q.linkid().to_string(),
        q_contig.name().to_string(),
        q.start().to_string(),
        q.stop().to_string(),
        t_contig.name().to_string(),
        t.start().to_string(),
        t.stop().to_string(),
        q.score().to_string(),
        t.strand().to_string(),
        q.grpid().to_string(),
        t.grpid().to_string(),
        q.setid().to_string(),
        adj,
    ]
    .join("\t")
}
