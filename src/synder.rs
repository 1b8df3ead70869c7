extern crate clap;
use clap::*;

mod cmd_synder;

fn main() -> anyhow::Result<()> {
    let app = Command::new("synder")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`synder` - Synteny maps from pairwise alignment blocks")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Log progress to stderr; repeat for debug output"),
        )
        .subcommand(cmd_synder::contiguous::make_subcommand())
        .subcommand(cmd_synder::blocks::make_subcommand())
        .after_help(
            r###"Subcommands:

* contiguous - Contiguous sets (synteny blocks), one line per set
* blocks     - Every link annotated with groups, sets and neighbors

Input is a link table, one aligned pair per line:
    qcontig qstart qstop tcontig tstart tstop score strand

"###,
        );

    let matches = app.get_matches();

    env_logger::Builder::from_default_env()
        .filter_level(match matches.get_count("verbose") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("contiguous", sub_matches)) => cmd_synder::contiguous::execute(sub_matches),
        Some(("blocks", sub_matches)) => cmd_synder::blocks::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
