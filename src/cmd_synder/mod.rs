//! Subcommand modules for the `synder` binary.

pub mod blocks;
pub mod contiguous;

use clap::{Arg, ArgMatches, Command};
use std::collections::BTreeMap;
use synder::libs::synmap::{read_links, Synmap};

/// Arguments shared by every subcommand that builds a synteny map.
pub fn add_synmap_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("infile")
            .required(true)
            .num_args(1)
            .index(1)
            .help("Link table, [stdin] for screen"),
    )
    .arg(
        Arg::new("k")
            .long("gap")
            .short('k')
            .num_args(1)
            .default_value("10")
            .value_parser(clap::value_parser!(usize))
            .help("Gap tolerance, in non-overlapping groups"),
    )
    .arg(
        Arg::new("qsizes")
            .long("qsizes")
            .num_args(1)
            .help("Query chrom sizes file with lines: <chr> <length>"),
    )
    .arg(
        Arg::new("tsizes")
            .long("tsizes")
            .num_args(1)
            .help("Target chrom sizes file with lines: <chr> <length>"),
    )
    .arg(
        Arg::new("outfile")
            .long("outfile")
            .short('o')
            .num_args(1)
            .default_value("stdout")
            .help("Output filename. [stdout] for screen"),
    )
}

/// Reads the link table and runs every construction pass.
pub fn build_synmap(args: &ArgMatches) -> anyhow::Result<Synmap> {
    let infile = args.get_one::<String>("infile").unwrap();
    let k = *args.get_one::<usize>("k").unwrap();

    let sizes = |name: &str| -> BTreeMap<String, i32> {
        match args.get_one::<String>(name) {
            Some(path) => intspan::read_sizes(path),
            None => BTreeMap::new(),
        }
    };
    let q_sizes = sizes("qsizes");
    let t_sizes = sizes("tsizes");

    let links = read_links(synder::reader(infile)?)?;
    let mut syn = Synmap::from_links(&links, &q_sizes, &t_sizes)?;
    let n_sets = syn.link_all(k)?;

    log::info!(
        "{} links, {} contiguous sets with k = {}",
        links.len(),
        n_sets,
        k
    );
    Ok(syn)
}
