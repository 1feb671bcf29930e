use std::path::PathBuf;

use anyhow::Result;
use chenpv_eval::ElastancePath;
use clap::{Parser, Subcommand, ValueEnum};

use crate::{batch, extract, fill};

#[derive(Parser, Debug)]
#[command(
    name = "chen-pv",
    version,
    about = "PV loop metrics from clinical measurements and the reference spreadsheet"
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute derived metrics for every row of a CSV file.
    Compute {
        /// CSV with the columns PAS, PAD, VDF, VSF, PET, ET, Ees, V0.
        #[arg(long)]
        input: PathBuf,
        /// Destination CSV; parent directories are created.
        #[arg(long)]
        output: PathBuf,
        /// Elastance used for the ESPVR anchor columns.
        #[arg(long, value_enum, default_value_t = Elastance::Direct)]
        elastance: Elastance,
    },
    /// Export the template's variable table (or its cached values) as JSON.
    Extract {
        #[arg(long)]
        workbook: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Export the schema instead of the cached values.
        #[arg(long)]
        schema: bool,
        /// Worksheet holding the variable table.
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Write one set of inputs into a copy of the template.
    FillTemplate {
        #[arg(long)]
        template: PathBuf,
        /// JSON object keyed by input name, e.g. '{"PAS": 120, "VDF": 67.35}'.
        #[arg(long)]
        row_json: String,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        sheet: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Elastance {
    /// Measured Ees.
    Direct,
    /// Single-beat estimate.
    SingleBeat,
}

impl From<Elastance> for ElastancePath {
    fn from(value: Elastance) -> Self {
        match value {
            Elastance::Direct => ElastancePath::Direct,
            Elastance::SingleBeat => ElastancePath::SingleBeat,
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compute {
            input,
            output,
            elastance,
        } => {
            let summary = batch::compute_csv(&input, &output, elastance.into())?;
            println!(
                "wrote {} rows ({} with loop geometry) to {}",
                summary.rows,
                summary.with_geometry,
                output.display()
            );
        }
        Command::Extract {
            workbook,
            output,
            schema,
            sheet,
        } => {
            let count = extract::export_json(&workbook, &output, schema, sheet)?;
            println!("wrote {count} variables to {}", output.display());
        }
        Command::FillTemplate {
            template,
            row_json,
            output,
            sheet,
        } => {
            let report = fill::fill_from_json(&template, &row_json, &output, sheet)?;
            println!(
                "wrote {} cells to {}",
                report.written.len(),
                report.output.display()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compute_with_single_beat() {
        let cli = Cli::try_parse_from([
            "chen-pv",
            "compute",
            "--input",
            "in.csv",
            "--output",
            "out.csv",
            "--elastance",
            "single-beat",
        ])
        .unwrap();
        match cli.command {
            Command::Compute { elastance, .. } => assert_eq!(elastance, Elastance::SingleBeat),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from([
            "chen-pv", "extract", "--workbook", "t.xlsm", "--output", "o.json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
