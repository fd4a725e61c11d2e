use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

use polyampholyte::io::fasta::for_each_fasta_entry;
use polyampholyte::{
    GroupTable, Mode, PkaScheme, Polyampholyte, PolyampholyteError, ProteinInput, SequenceParsing,
    AMINO_ACID_GROUP_TABLE, DEFAULT_CURVE_POINTS, DEFAULT_PH_RANGE,
};

/// Net charge and isoelectric point of polyampholytes
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cmd {
    /// Group property table (CSV) replacing the embedded one
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// One-letter amino acid sequence of a single chain
    #[arg(short, long)]
    sequence: Option<String>,
    /// Abundances in table order: D N T S E Q G A C V M I L Y F H K R P W Hyp Hyl N_term C_term,
    /// separated by commas, semicolons or spaces
    #[arg(short, long)]
    abundance: Option<String>,
    /// FASTA file, every entry is processed as a single chain
    #[arg(short, long)]
    fasta: Option<PathBuf>,
}

#[derive(Args)]
struct Options {
    /// pKa scheme: bjellqvist, ipc_protein or emboss
    #[arg(long, default_value = "bjellqvist", value_parser = PkaScheme::from_str)]
    scheme: PkaScheme,
    /// Skip sequence characters that aren't residue codes instead of failing
    #[arg(long)]
    lenient: bool,
    /// Lower pH limit
    #[arg(long, default_value_t = DEFAULT_PH_RANGE.0, allow_negative_numbers = true)]
    ph_min: f64,
    /// Upper pH limit
    #[arg(long, default_value_t = DEFAULT_PH_RANGE.1, allow_negative_numbers = true)]
    ph_max: f64,
}

impl Options {
    fn parsing(&self) -> SequenceParsing {
        if self.lenient { SequenceParsing::Lenient } else { SequenceParsing::Strict }
    }

    fn ph_range(&self) -> (f64, f64) { (self.ph_min, self.ph_max) }
}

#[derive(Subcommand)]
enum Commands {
    /// Computes the isoelectric point
    Iep {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        options: Options,
        /// Reports the isoelectric point under every pKa scheme
        #[arg(long)]
        all_schemes: bool,
    },
    /// Writes the charge curve as CSV to stdout
    Curve {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        options: Options,
        /// Number of pH values
        #[arg(long, default_value_t = DEFAULT_CURVE_POINTS)]
        points: usize,
    },
    /// Prints molar masses and nitrogen content together with the isoelectric point
    Props {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        options: Options,
    },
}

#[derive(Serialize)]
struct CurveRow<'a> {
    name: &'a str,
    ph: f64,
    charge: f64,
}

lazy_static! {
    static ref ABUNDANCE_SEPARATOR_REGEX: Regex = Regex::new(r"[,;\s]+").unwrap();
}

fn main() -> Result<()> {
    env_logger::builder()
        .format_timestamp(None)
        .filter_level(log::LevelFilter::Info)
        .init();

    let cmd = Cmd::parse();

    let custom_table;
    let table: &GroupTable = match &cmd.table {
        Some(path) => {
            custom_table = GroupTable::from_csv_path(path)
                .with_context(|| format!("can't load group property table '{}'", path.display()))?;
            info!("loaded {} groups from '{}'", custom_table.len(), path.display());
            &custom_table
        }
        None => &AMINO_ACID_GROUP_TABLE,
    };

    match &cmd.command {
        Commands::Iep { source, options, all_schemes } => {
            command_iep(table, source, options, *all_schemes)?;
        }
        Commands::Curve { source, options, points } => {
            command_curve(table, source, options, *points)?;
        }
        Commands::Props { source, options } => {
            command_props(table, source, options)?;
        }
    }

    Ok(())
}

fn command_iep(table: &GroupTable, source: &Source, options: &Options, all_schemes: bool) -> Result<()> {
    let schemes = if all_schemes { PkaScheme::ALL.to_vec() } else { vec![options.scheme] };

    println!("name\t{}", schemes.iter().join("\t"));

    for (name, input) in collect_inputs(source, options.parsing())? {
        let mut poly = Polyampholyte::with_table(table, Mode::Protein, input, options.scheme)
            .with_context(|| format!("invalid composition for '{}'", name))?;

        let mut ieps = Vec::with_capacity(schemes.len());
        for scheme in &schemes {
            poly.set_pka_scheme(*scheme);
            ieps.push(format_iep(poly.isoelectric_point(options.ph_range())?));
        }

        println!("{}\t{}", name, ieps.iter().join("\t"));
    }

    Ok(())
}

fn command_curve(table: &GroupTable, source: &Source, options: &Options, points: usize) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());

    for (name, input) in collect_inputs(source, options.parsing())? {
        let poly = Polyampholyte::with_table(table, Mode::Protein, input, options.scheme)
            .with_context(|| format!("invalid composition for '{}'", name))?;

        for (ph, charge) in poly.charge_curve(options.ph_range(), points)?.iter() {
            writer.serialize(CurveRow { name: &name, ph, charge })?;
        }
    }

    writer.flush()?;

    Ok(())
}

fn command_props(table: &GroupTable, source: &Source, options: &Options) -> Result<()> {
    println!("name\tresidues\tmolar_mass\tmean_residue_molar_mass\tnitrogen_content\tiep_{}", options.scheme);

    for (name, input) in collect_inputs(source, options.parsing())? {
        let poly = Polyampholyte::with_table(table, Mode::Protein, input, options.scheme)
            .with_context(|| format!("invalid composition for '{}'", name))?;

        println!("{}", format_props_row(&name, &poly, options.ph_range())?);
    }

    Ok(())
}

fn format_props_row(name: &str, poly: &Polyampholyte, ph_range: (f64, f64)) -> Result<String> {
    let residue_count = poly.residue_count().map(|n| n.to_string()).unwrap_or_else(|| "n/a".to_string());
    let molar_mass = match poly.molar_mass() {
        Ok(mass) => format!("{:.2}", mass),
        Err(PolyampholyteError::MissingSequence) => "n/a".to_string(),
        Err(e) => return Err(e.into()),
    };

    Ok(format!(
        "{}\t{}\t{}\t{:.2}\t{:.4}\t{}",
        name,
        residue_count,
        molar_mass,
        poly.mean_residue_molar_mass(),
        poly.nitrogen_content(),
        format_iep(poly.isoelectric_point(ph_range)?)
    ))
}

fn collect_inputs(source: &Source, parsing: SequenceParsing) -> Result<Vec<(String, ProteinInput)>> {
    if let Some(path) = &source.fasta {
        let mut inputs = Vec::new();
        for_each_fasta_entry(path, |entry| {
            let input = ProteinInput::Sequence { sequence: entry.sequence.to_owned(), parsing };
            inputs.push((entry.accession().to_string(), input));
            Ok(())
        })?;

        return Ok(inputs);
    }

    let abundance = source.abundance.as_deref().map(parse_abundance_list).transpose()?;
    let input = ProteinInput::from_parts(abundance, source.sequence.to_owned(), parsing)?;

    Ok(vec![("input".to_string(), input)])
}

fn parse_abundance_list(text: &str) -> Result<Vec<f64>> {
    ABUNDANCE_SEPARATOR_REGEX
        .split(text.trim())
        .filter(|value| !value.is_empty())
        .map(|value| fast_float::parse::<f64, _>(value).map_err(|_| anyhow!("invalid abundance value '{}'", value)))
        .collect()
}

fn format_iep(iep: f64) -> String {
    if iep.is_nan() { "n/a".to_string() } else { format!("{:.2}", iep) }
}
