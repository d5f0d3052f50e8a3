use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use json_toolkit::collect::OutputFormat;
use json_toolkit::config::Settings;
use json_toolkit::interactive::{self, Prompter};
use json_toolkit::keywords::KeywordSource;
use json_toolkit::session::{Operation, Session};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "json-toolkit",
    about = "Batch transformations and keyword search over a JSON array of objects"
)]
pub struct Cli {
    /// Path to a JSON settings file (id_field, serial_field, indent)
    #[arg(long, global = true, env = "JSON_TOOLKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive menu (default when no command is given)
    Interactive {
        /// Input JSON file. Asked for when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Number every object 1..n in a field (default `no`)
    Serial {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Remove an attribute from every object
    Delete {
        #[arg(short, long)]
        input: PathBuf,

        /// Attribute to remove
        #[arg(short, long)]
        attribute: String,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the number of objects
    Count {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Write the distinct values of each attribute to `<prefix>_<attribute>.<format>`
    Collect {
        #[arg(short, long)]
        input: PathBuf,

        /// Attribute names, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        attributes: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file prefix
        #[arg(short, long)]
        prefix: String,
    },
    /// Keep the first object for each identifier
    Dedup {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write objects containing any keyword, with optional per-keyword stats
    Search {
        #[arg(short, long)]
        input: PathBuf,

        /// Keyword list file, one keyword per line
        #[arg(long, conflicts_with = "keywords", required_unless_present = "keywords")]
        keywords_file: Option<PathBuf>,

        /// Comma-separated keywords
        #[arg(short, long)]
        keywords: Option<String>,

        /// Output JSON for matched objects
        #[arg(short, long)]
        output: PathBuf,

        /// Output CSV for keyword statistics
        #[arg(long)]
        stats: Option<PathBuf>,
    },
}

impl Commands {
    /// Splits a subcommand into its input file and engine operation.
    fn into_operation(self) -> Option<(PathBuf, Operation)> {
        let pair = match self {
            Self::Interactive { .. } => return None,
            Self::Serial { input, output } => (input, Operation::SerialNumber { output }),
            Self::Delete {
                input,
                attribute,
                output,
            } => (input, Operation::DeleteAttribute { attribute, output }),
            Self::Count { input } => (input, Operation::Count),
            Self::Collect {
                input,
                attributes,
                format,
                prefix,
            } => (
                input,
                Operation::CollectKeys {
                    attributes: attributes
                        .into_iter()
                        .map(|a| a.trim().to_owned())
                        .filter(|a| !a.is_empty())
                        .collect(),
                    format,
                    prefix,
                },
            ),
            Self::Dedup { input, output } => (input, Operation::RemoveDuplicates { output }),
            Self::Search {
                input,
                keywords_file,
                keywords,
                output,
                stats,
            } => {
                let keywords = match (keywords_file, keywords) {
                    (Some(path), _) => KeywordSource::File(path),
                    (None, line) => KeywordSource::Inline(line.unwrap_or_default()),
                };
                (
                    input,
                    Operation::KeywordMatch {
                        keywords,
                        output,
                        stats,
                    },
                )
            }
        };
        Some(pair)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        None => run_interactive(None, settings),
        Some(Commands::Interactive { input }) => run_interactive(input, settings),
        Some(command) => {
            let Some((input, operation)) = command.into_operation() else {
                return Ok(());
            };
            let mut session = Session::open(&input, settings)
                .with_context(|| format!("Failed to load {}", input.display()))?;
            let outcome = session.execute(operation)?;
            println!("{outcome}");
            Ok(())
        }
    }
}

fn run_interactive(input: Option<PathBuf>, settings: Settings) -> Result<()> {
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
    interactive::run(&mut prompter, input.as_deref(), settings)?;
    Ok(())
}
