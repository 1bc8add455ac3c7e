use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use rebate_core::process_statements;
use rebate_ingest::{
    CardFilter, ColumnSelection, LoadOptions, SourceFormat, Table, load_transactions, read_csv,
    read_xlsx,
};
use rebate_report::{Headline, StatementReport, format_results, to_json};
use std::path::{Path, PathBuf};
use tracing::info;

mod config;
mod logging;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "rebate",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("REBATE_BUILD_SHA"), ")"),
    about = "Estimate card reward points for a statement"
)]
struct Cli {
    /// Config file (default: ~/.rebate/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one or more statements (each with its own bonus budget)
    Calc(CalcArgs),

    /// List the columns of a CSV/XLSX statement and the default picks
    Columns {
        file: PathBuf,

        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Rate/keyword configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct CalcArgs {
    /// Statement files (.csv, .xlsx/.xls, or extracted .txt)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Override format detection by extension
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Description column (default: 摘要, else the first column)
    #[arg(long)]
    desc_col: Option<String>,

    /// Amount column (default: 金額, else the second column)
    #[arg(long)]
    amount_col: Option<String>,

    /// Card identifier column, for multi-card spreadsheets
    #[arg(long)]
    card_col: Option<String>,

    /// Only keep transactions of this card (e.g. last four digits)
    #[arg(long, default_value = "")]
    card: String,

    /// Treat every transaction as foreign spend
    #[arg(long)]
    foreign: bool,

    /// Statement year for MM/DD rows in text statements (default: current year)
    #[arg(long)]
    year: Option<i32>,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config (never overwrites)
    Init,
    /// Print the effective config
    Show,
    /// Print the config path
    Path,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Xlsx,
    Text,
}

impl From<FormatArg> for SourceFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => SourceFormat::Csv,
            FormatArg::Xlsx => SourceFormat::Xlsx,
            FormatArg::Text => SourceFormat::Text,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Command::Calc(args) => calc(&args, cli.config.as_deref())?,

        Command::Columns { file, format } => columns(&file, format.map(Into::into))?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => {
                let (p, _) = config::resolve_config_path(cli.config.as_deref())?;
                println!("{}", p.display());
            }
        },
    }

    Ok(())
}

fn calc(args: &CalcArgs, config_path: Option<&Path>) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let schedule = cfg.schedule().context("invalid [rates] in config")?;
    let keywords = cfg.keyword_sets().context("invalid [keywords] in config")?;

    let opts = LoadOptions {
        format: args.format.map(Into::into),
        columns: ColumnSelection {
            description: args.desc_col.clone(),
            amount: args.amount_col.clone(),
            card: args.card_col.clone(),
        },
        statement_year: args.year.unwrap_or_else(|| chrono::Local::now().year()),
        card: CardFilter::new(&args.card),
    };

    let mut statements = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let txns = load_transactions(path, &opts)
            .with_context(|| format!("loading {}", path.display()))?;
        statements.push(txns);
    }

    let runs = process_statements(&statements, &schedule, &keywords, args.foreign);
    let sources: Vec<String> = args.files.iter().map(|p| p.display().to_string()).collect();

    for (source, (_, summary)) in sources.iter().zip(&runs) {
        info!(
            file = %source,
            transactions = summary.transaction_count,
            points = summary.total_points,
            bonus_claimed = %summary.bonus_claimed,
            "scored statement"
        );
    }

    if args.json {
        let reports: Vec<StatementReport<'_>> = sources
            .iter()
            .zip(&runs)
            .map(|(source, (results, summary))| StatementReport {
                source,
                results,
                summary,
                headline: Headline::new(summary, &schedule, args.foreign),
            })
            .collect();
        println!("{}", to_json(&reports)?);
        return Ok(());
    }

    for (source, (results, summary)) in sources.iter().zip(&runs) {
        println!("# {}\n", source);
        if results.is_empty() {
            println!("(no chargeable transactions)\n");
        } else {
            println!("{}\n", format_results(results));
        }
        println!("{}\n", Headline::new(summary, &schedule, args.foreign).render());
    }

    Ok(())
}

fn columns(file: &Path, format: Option<SourceFormat>) -> Result<()> {
    let format = match format.or_else(|| SourceFormat::from_path(file)) {
        Some(f) => f,
        None => bail!("cannot tell the format of {} (pass --format)", file.display()),
    };

    let table: Table = match format {
        SourceFormat::Csv => read_csv(file)?,
        SourceFormat::Xlsx => read_xlsx(file)?,
        SourceFormat::Text => bail!("text statements have no columns"),
    };

    let (desc, amount, _) = table.resolve(&ColumnSelection::default())?;
    for (i, h) in table.headers.iter().enumerate() {
        let mark = if i == desc {
            "  <- description"
        } else if i == amount {
            "  <- amount"
        } else {
            ""
        };
        println!("{:>3}  {}{}", i, h, mark);
    }
    println!("\n{} data rows", table.rows.len());

    Ok(())
}
