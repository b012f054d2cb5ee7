use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rayon::prelude::*;

use fm_search::index::{FmIndex, IndexMeta, IndexOpt, SaAlgorithm, Text};
use fm_search::io::{fasta, fastq::FastqReader};
use fm_search::report::{self, Hit, Strand};
use fm_search::search::{InexactSearcher, Query, SearchOpt};
use fm_search::util::{alphabet::Alphabet, dna};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "fm-search",
    author,
    version,
    about = "FM-index exact and edit-tolerant substring search",
    arg_required_else_help = true
)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build an FM index from a single-sequence FASTA reference
    Index {
        /// Reference FASTA file (exactly one record)
        reference: String,
        /// Output prefix; the index is written to <prefix>.fmi
        #[arg(short, long, default_value = "ref")]
        output: String,
        /// Occ sampling spacing (1 = fully materialized rank table)
        #[arg(long, default_value_t = 32)]
        spacing: usize,
        /// Suffix array construction: naive | doubling | sais
        #[arg(long = "sa", default_value = "sais")]
        sa_algorithm: SaAlgorithm,
        /// Build forward and reverse tables in parallel
        #[arg(long)]
        parallel: bool,
        /// Ordered alphabet, sentinel excluded
        #[arg(long, default_value = "ACGT")]
        alphabet: String,
        /// Sentinel symbol, sorts before every alphabet symbol
        #[arg(long, default_value_t = '$')]
        sentinel: char,
        /// Keep sequence bytes as-is (no upper-casing, no U->T)
        #[arg(long)]
        no_normalize: bool,
    },
    /// Search patterns against an FM index within an edit budget
    Search {
        /// Path to FM index (.fmi)
        #[arg(short = 'i', long = "index")]
        index: String,
        /// Reads FASTQ file
        reads: Option<String>,
        /// Literal pattern(s) to search, may be repeated
        #[arg(short = 'p', long = "pattern")]
        patterns: Vec<String>,
        /// Maximum number of edits (substitutions, insertions, deletions)
        #[arg(short = 'k', long = "max-edits", default_value_t = 1)]
        max_edits: u32,
        /// Also search the reverse complement of every query
        #[arg(long)]
        revcomp: bool,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        /// Output TSV path (stdout if omitted)
        #[arg(short, long)]
        out: Option<String>,
        #[arg(long)]
        no_normalize: bool,
    },
    /// Print index statistics and, for short texts, the BWT and tables
    Inspect {
        #[arg(short = 'i', long = "index")]
        index: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Index { reference, output, spacing, sa_algorithm, parallel, alphabet, sentinel, no_normalize } => {
            let opt = IndexOpt { occ_spacing: spacing, sa_algorithm, parallel };
            let alphabet = parse_alphabet(&alphabet, sentinel)?;
            run_index(&reference, &output, alphabet, &opt, !no_normalize)
        }
        Commands::Search { index, reads, patterns, max_edits, revcomp, threads, out, no_normalize } => {
            let opt = SearchOpt { max_edits, threads };
            run_search(&index, reads.as_deref(), &patterns, out.as_deref(), opt, revcomp, !no_normalize)
        }
        Commands::Inspect { index } => run_inspect(&index),
    }
}

fn init_logger(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Warn,
        (false, 0) => log::LevelFilter::Info,
        (false, 1) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn parse_alphabet(symbols: &str, sentinel: char) -> Result<Alphabet> {
    if !sentinel.is_ascii() || !symbols.is_ascii() {
        bail!("alphabet and sentinel must be ASCII");
    }
    Ok(Alphabet::new(sentinel as u8, symbols.as_bytes())?)
}

fn run_index(reference: &str, output: &str, alphabet: Alphabet, opt: &IndexOpt, normalize: bool) -> Result<()> {
    let fh = File::open(reference).with_context(|| format!("cannot open reference FASTA '{}'", reference))?;
    let rec = fasta::read_single_record(BufReader::new(fh))
        .with_context(|| format!("cannot read reference '{}'", reference))?;
    let body = if normalize { dna::normalize_seq(&rec.seq) } else { rec.seq };
    let text = Text::from_body(&alphabet, &body)
        .with_context(|| format!("sequence '{}' is not a valid text over the alphabet", rec.id))?;

    log::info!("reference: {} ({})", reference, rec.id);
    log::info!("text length: {} (sentinel included)", text.len());

    let mut fm = FmIndex::build(alphabet, &text, opt)?;
    fm.set_meta(IndexMeta {
        reference_file: Some(reference.to_string()),
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });

    let out_path = format!("{}.fmi", output);
    fm.save_to_file(&out_path)
        .with_context(|| format!("cannot write index to '{}'", out_path))?;
    log::info!("FM index saved: {}", out_path);
    Ok(())
}

fn run_search(
    index_path: &str,
    reads_path: Option<&str>,
    patterns: &[String],
    out_path: Option<&str>,
    opt: SearchOpt,
    revcomp: bool,
    normalize: bool,
) -> Result<()> {
    let fm = FmIndex::load_from_file(index_path).with_context(|| format!("cannot load index '{}'", index_path))?;

    let mut queries: Vec<(String, Vec<u8>)> =
        patterns.iter().map(|p| (p.clone(), p.as_bytes().to_vec())).collect();
    if let Some(path) = reads_path {
        let fh = File::open(path).with_context(|| format!("cannot open reads FASTQ '{}'", path))?;
        for rec in FastqReader::new(BufReader::new(fh)) {
            let rec = rec.with_context(|| format!("cannot parse '{}'", path))?;
            queries.push((rec.id, rec.seq));
        }
    }
    if queries.is_empty() {
        bail!("nothing to search: give a reads file or at least one --pattern");
    }
    log::info!("searching {} queries with up to {} edits", queries.len(), opt.max_edits);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(opt.threads.max(1)).build()?;
    let results: Vec<Vec<Hit>> = pool.install(|| {
        queries
            .par_iter()
            .map(|(id, seq)| {
                let seq = if normalize { dna::normalize_seq(seq) } else { seq.clone() };
                let mut hits = search_one(&fm, id, Strand::Forward, &seq, opt.max_edits);
                if revcomp {
                    hits.extend(search_one(&fm, id, Strand::Reverse, &dna::revcomp(&seq), opt.max_edits));
                }
                hits
            })
            .collect()
    });

    let mut out: Box<dyn Write> = match out_path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("cannot create output '{}'", p))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };
    report::write_header(&mut out)?;
    let mut total = 0usize;
    for hits in &results {
        total += hits.len();
        report::write_hits(&mut out, hits)?;
    }
    out.flush()?;
    log::info!("{} hits written", total);
    Ok(())
}

/// 单条查询；符号错误只放弃这一条
fn search_one(fm: &FmIndex, id: &str, strand: Strand, seq: &[u8], max_edits: u32) -> Vec<Hit> {
    let query = match Query::new(fm.alphabet(), seq, max_edits) {
        Ok(q) => q,
        Err(e) => {
            log::warn!("skipping query '{}' ({}): {}", id, strand.as_char(), e);
            return Vec::new();
        }
    };
    let alignments = InexactSearcher::new(fm, &query).alignments();
    report::expand_hits(fm, id, strand, &alignments)
}

fn run_inspect(index_path: &str) -> Result<()> {
    let fm = FmIndex::load_from_file(index_path).with_context(|| format!("cannot load index '{}'", index_path))?;
    let alphabet = fm.alphabet();
    let sigma = alphabet.sigma();
    let opt = fm.opt();
    let meta = fm.meta();

    println!("index:       {}", index_path);
    println!("reference:   {}", meta.reference_file.as_deref().unwrap_or("-"));
    println!("built:       {}", meta.build_timestamp.as_deref().unwrap_or("-"));
    println!("build args:  {}", meta.build_args.as_deref().unwrap_or("-"));
    println!("text length: {}", fm.len());
    println!("alphabet:    {}", String::from_utf8_lossy(&alphabet.decode(&(0..sigma as u8).collect::<Vec<_>>())));
    println!("sa:          {}", opt.sa_algorithm);
    println!("spacing:     {} ({} occ samples)", opt.occ_spacing, fm.occ().sample_count());

    print!("C:          ");
    for code in 0..sigma as u8 {
        print!(" {}={}", alphabet.symbol(code) as char, fm.c_table().get(code));
    }
    println!();

    if fm.len() <= 64 {
        println!("BWT:         {}", String::from_utf8_lossy(&alphabet.decode(fm.bwt())));
        println!("O table:");
        // 第 i 列为 occ(c, i)，BWT[i-1] 标在列头
        print!("{:>4}{:>4}", "", "");
        for &ch in fm.bwt() {
            print!("{:>4}", alphabet.symbol(ch) as char);
        }
        println!();
        for code in 0..sigma as u8 {
            print!("{:>4}", alphabet.symbol(code) as char);
            for v in fm.occ().row(code) {
                print!("{:>4}", v);
            }
            println!();
        }
    }
    Ok(())
}
