extern crate clap;
use clap::*;

mod cmd_nwalign;

fn main() -> anyhow::Result<()> {
    let app = Command::new("nwalign")
        .version(crate_version!())
        .about("`nwalign` - Needleman-Wunsch global alignment")
        .propagate_version(true)
        .arg_required_else_help(true)
        .subcommand_required(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(cmd_nwalign::align::make_subcommand())
        .subcommand(cmd_nwalign::matrix::make_subcommand())
        .after_help(
            r###"Subcommands:

* align  - Globally align paired sequences from two FASTA files
* matrix - Validate and print a substitution matrix

Logging goes to stderr. RUST_LOG is honoured, -v overrides its level.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("align", sub_matches)) => {
            init_logger(sub_matches.get_count("verbose"));
            cmd_nwalign::align::execute(sub_matches)
        }
        Some(("matrix", sub_matches)) => {
            init_logger(sub_matches.get_count("verbose"));
            cmd_nwalign::matrix::execute(sub_matches)
        }
        _ => unreachable!(),
    }?;

    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
