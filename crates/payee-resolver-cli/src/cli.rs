use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Extended help shown after `payee-resolver batch --help`.
pub const BATCH_AFTER_HELP: &str = "\
Input layout:
  A CSV file with one header row. The payee column is chosen in this order:
    1. a column headed `0`
    2. a column headed `payee` (any case)
    3. the first column
  Empty cells and NA markers (NA, N/A, NaN, null, None, #N/A, <NA>) are skipped.

Output layout:
  original_payee,real_name,confidence
  7-ELEVEN 23020 SEATTLE WA,7-Eleven,0.95

Confidence by stage:
  0.95       known merchant found in the cleaned payee
  0.80-1.00  close spelling of a known merchant
  0.85       nearest cluster of the training corpus
  0.40       cleaned payee, title-cased
  0.00       nothing left after cleaning
";

#[derive(Debug, Parser)]
#[command(
    name = "payee-resolver",
    version,
    about = "map raw statement payees to real merchant names",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Newline-delimited training corpus for the cluster stage
    /// (overrides PAYEE_RESOLVER_CORPUS)
    #[arg(long, global = true, value_name = "PATH")]
    pub corpus: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a single raw payee string
    Resolve {
        /// Raw payee text as it appears on the statement
        #[arg(allow_hyphen_values = true)]
        payee: String,
        #[arg(long)]
        json: bool,
    },
    /// Resolve every payee in a CSV file and write the results to a new CSV
    #[command(after_long_help = BATCH_AFTER_HELP)]
    Batch {
        /// CSV file with a header row
        input: PathBuf,
        /// Where to write the resolved CSV
        #[arg(long, short = 'o', default_value = "resolved_payees.csv")]
        output: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show the fitted cluster model
    Model {
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn wants_json(&self) -> bool {
        match self {
            Self::Resolve { json, .. } | Self::Batch { json, .. } | Self::Model { json } => *json,
        }
    }
}

pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{Commands, parse_from};

    #[test]
    fn resolve_accepts_payee_and_json_flag() {
        let parsed = parse_from(["payee-resolver", "resolve", "SHELL OIL 12", "--json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(cli.command.wants_json());
            assert!(matches!(
                cli.command,
                Commands::Resolve { ref payee, .. } if payee == "SHELL OIL 12"
            ));
        }
    }

    #[test]
    fn resolve_accepts_empty_and_dash_prefixed_payees() {
        assert!(parse_from(["payee-resolver", "resolve", ""]).is_ok());
        assert!(parse_from(["payee-resolver", "resolve", "-ELEVEN"]).is_ok());
    }

    #[test]
    fn batch_defaults_output_path() {
        let parsed = parse_from(["payee-resolver", "batch", "rows.csv"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            match cli.command {
                Commands::Batch { input, output, json } => {
                    assert_eq!(input, PathBuf::from("rows.csv"));
                    assert_eq!(output, PathBuf::from("resolved_payees.csv"));
                    assert!(!json);
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    #[test]
    fn corpus_flag_is_global() {
        let parsed = parse_from(["payee-resolver", "model", "--corpus", "corpus.txt"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(cli.corpus, Some(PathBuf::from("corpus.txt")));
        }
    }

    #[test]
    fn resolve_requires_a_payee() {
        assert!(parse_from(["payee-resolver", "resolve"]).is_err());
    }
}
