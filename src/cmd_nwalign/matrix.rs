use clap::*;
use nwalign::libs::sub_matrix::SubstitutionMatrix;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("matrix")
        .about("Validates and prints a substitution matrix")
        .after_help(
            r###"
Parses a substitution matrix file and prints every score as a tab-separated
row, column and score, in alphabet order.

Matrix format:
* The first content line lists the alphabet
* Each following line is a row symbol followed by one integer per column
* Blank lines and lines starting with '#' are ignored
* The matrix does not have to be symmetric

Examples:
1. Check a matrix file:
   nwalign matrix dna.mat

2. Save the scores to a file:
   nwalign matrix dna.mat -o scores.tsv

"###,
        )
        .arg(
            Arg::new("matrix")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Substitution matrix file"),
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

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("matrix").unwrap();
    let matrix = SubstitutionMatrix::from_file(infile)?;
    log::info!(
        "{}: alphabet {}",
        infile,
        String::from_utf8_lossy(matrix.alphabet())
    );
    let mut writer = nwalign::writer(args.get_one::<String>("outfile").unwrap())?;

    writer.write_fmt(format_args!("#row\tcol\tscore\n"))?;
    for (row, col, score) in matrix.entries() {
        writer.write_fmt(format_args!("{}\t{}\t{}\n", row as char, col as char, score))?;
    }
    writer.flush()?;

    Ok(())
}
