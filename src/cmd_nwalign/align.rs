use clap::*;
use nwalign::libs::nw::{align_batch, GapPenalty};
use nwalign::libs::sequence::read_sequences;
use nwalign::libs::sub_matrix::SubstitutionMatrix;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("align")
        .about("Globally aligns paired sequences from two FASTA files")
        .after_help(
            r###"
The i-th record of <infile1> is aligned against the i-th record of <infile2>
with the Needleman-Wunsch algorithm. Both files must hold the same number of
non-empty records.

Gap models:
* linear (default): every gap column costs --gap
* --affine: a gap run of length k costs --gap + (k - 1) * --extend

Each pair is reported with its matches, percent identity, indel runs, length
and score, followed by the alignment in blocks of 60 columns.

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* Penalties are added to the score, so they are usually negative

Examples:
1. Linear gap penalty:
   nwalign align a.fa b.fa dna.mat --gap -2

2. Affine gap penalty:
   nwalign align a.fa b.fa blosum62.mat --gap -10 --affine --extend -0.5

"###,
        )
        .arg(
            Arg::new("infile1")
                .required(true)
                .num_args(1)
                .index(1)
                .help("First FASTA file, sequences A"),
        )
        .arg(
            Arg::new("infile2")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Second FASTA file, sequences B"),
        )
        .arg(
            Arg::new("matrix")
                .required(true)
                .num_args(1)
                .index(3)
                .help("Substitution matrix file"),
        )
        .arg(
            Arg::new("gap")
                .long("gap")
                .required(true)
                .num_args(1)
                .allow_negative_numbers(true)
                .value_parser(parse_penalty)
                .help("Gap penalty, or the gap-open penalty with --affine"),
        )
        .arg(
            Arg::new("affine")
                .long("affine")
                .action(ArgAction::SetTrue)
                .help("Use affine gap penalties"),
        )
        .arg(
            Arg::new("extend")
                .long("extend")
                .num_args(1)
                .default_value("-0.1")
                .allow_negative_numbers(true)
                .value_parser(parse_penalty)
                .help("Gap-extension penalty for --affine"),
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

fn parse_penalty(value: &str) -> Result<f64, String> {
    let penalty: f64 = value
        .parse()
        .map_err(|_| format!("{:?} is not a number", value))?;
    if !penalty.is_finite() {
        return Err(format!("penalty must be finite, got {}", value));
    }
    Ok(penalty)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let gap = *args.get_one::<f64>("gap").unwrap();
    let penalty = if args.get_flag("affine") {
        GapPenalty::Affine {
            open: gap,
            extend: *args.get_one::<f64>("extend").unwrap(),
        }
    } else {
        GapPenalty::Linear { gap }
    };

    //----------------------------
    // Loading
    //----------------------------
    let seqs1 = read_sequences(args.get_one::<String>("infile1").unwrap())?;
    let seqs2 = read_sequences(args.get_one::<String>("infile2").unwrap())?;
    let matrix = SubstitutionMatrix::from_file(args.get_one::<String>("matrix").unwrap())?;

    //----------------------------
    // Output
    //----------------------------
    let mut writer = nwalign::writer(args.get_one::<String>("outfile").unwrap())?;
    let count = align_batch(&seqs1, &seqs2, &matrix, penalty, &mut writer)?;
    writer.flush()?;
    log::info!("{} alignments written", count);

    Ok(())
}
