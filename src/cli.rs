//! CLI definition and dispatch.

pub mod menu;

use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::ascii_chart::{render_bar_chart, DEFAULT_CHART_WIDTH};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_file_store::JsonFileStore;
use crate::domain::error::FinanceError;
use crate::domain::query::{self, SortKey};
use crate::domain::report::{balance_summary, monthly_spending, BalanceSummary};
use crate::domain::sample::sample_data;
use crate::domain::settings::{AppConfig, DEFAULT_LOG_LEVEL};
use crate::domain::storage::StorageConfig;
use crate::domain::transaction::{
    add_transaction, delete_transaction, parse_amount, parse_date, Transaction, TransactionType,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::TransactionStore;

pub const DEMO_FILE_NAME: &str = "pft_demo.json";

#[derive(Parser, Debug)]
#[command(name = "pftrack", about = "Personal finance tracker")]
pub struct Cli {
    /// JSON file used for save and load (default: <temp dir>/transactions.json)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,
    /// INI settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive menu (default on a terminal)
    Menu,
    /// Non-interactive showcase over sample data (default otherwise)
    Demo,
    /// Write the sample data set to the data file
    Seed,
    /// List transactions
    List {
        /// id, date, amount or category
        #[arg(short, long, default_value = "id")]
        sort: String,
        #[arg(short, long)]
        reverse: bool,
    },
    /// Show one transaction
    Show { id: u64 },
    /// Search category and description
    Search { keyword: String },
    /// Expenses whose magnitude exceeds AMOUNT
    Over {
        #[arg(allow_negative_numbers = true, value_parser = parse_amount)]
        amount: f64,
    },
    /// Transactions in one category
    Category { name: String },
    /// Transactions within an inclusive date range
    Range {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Income, expenses and savings
    Summary,
    /// Monthly spending bar chart
    Chart {
        #[arg(short, long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: usize,
    },
    /// Record a transaction
    Add {
        #[arg(long)]
        date: String,
        #[arg(long, allow_negative_numbers = true, value_parser = parse_amount)]
        amount: f64,
        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        ttype: String,
        #[arg(long, default_value = "Uncategorized")]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a transaction by id
    Delete { id: u64 },
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match cli.config.as_ref().map(load_config).transpose() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let config = match build_app_config(
        cli.file.as_deref(),
        settings.as_ref().map(|s| s as &dyn ConfigPort),
        cli.log_level.as_deref(),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    init_logging(&config.log_level);

    let command = cli.command.unwrap_or_else(|| {
        if io::stdin().is_terminal() {
            Command::Menu
        } else {
            Command::Demo
        }
    });

    let store = JsonFileStore::new(config.storage.clone());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match execute(command, &config, &store, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, FinanceError> {
    FileConfigAdapter::from_file(path).map_err(|e| FinanceError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Merge the settings file and command-line overrides into one config.
///
/// `--file` wins over `[storage] data_file`; either replaces the default
/// `transactions.json` in the temp directory.
pub fn build_app_config(
    file_override: Option<&Path>,
    settings: Option<&dyn ConfigPort>,
    log_level_override: Option<&str>,
) -> Result<AppConfig, FinanceError> {
    let temp_dir = settings
        .and_then(|s| s.get_path("storage", "temp_dir"))
        .unwrap_or_else(std::env::temp_dir);
    let mut storage = StorageConfig::in_dir(temp_dir);

    let data_file = file_override
        .map(Path::to_path_buf)
        .or_else(|| settings.and_then(|s| s.get_path("storage", "data_file")));
    if let Some(path) = data_file {
        storage = storage.with_default_path(path);
    }

    let log_level = log_level_override
        .map(str::to_string)
        .or_else(|| settings.and_then(|s| s.get_string("logging", "level")))
        .map(|l| l.trim().to_lowercase())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    if log_level.parse::<tracing::Level>().is_err() {
        return Err(FinanceError::ConfigInvalid {
            section: "logging".into(),
            key: "level".into(),
            reason: format!("unknown level '{log_level}'"),
        });
    }

    let mut config = AppConfig::new(storage);
    config.log_level = log_level;
    Ok(config)
}

/// Install the stderr subscriber once; later calls are no-ops.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pftrack={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Run one command against `store`, writing its report to `out`.
pub fn execute(
    command: Command,
    config: &AppConfig,
    store: &dyn TransactionStore,
    out: &mut dyn Write,
) -> Result<(), FinanceError> {
    let data_file = config.data_file();
    match command {
        Command::Menu => {
            let stdin = io::stdin();
            menu::run_menu(stdin.lock(), out, store).map(|_| ())
        }
        Command::Demo => run_demo(&config.storage, store, out),
        Command::Seed => {
            let txs = sample_data()?;
            let path = persist(store, &txs, data_file)?;
            writeln!(out, "Saved {} sample transactions to {}", txs.len(), path.display())?;
            Ok(())
        }
        Command::List { sort, reverse } => {
            let key: SortKey = sort.parse()?;
            let txs = store.load(data_file).transactions;
            print_transactions(out, &query::list_sorted(&txs, key, reverse)?)
        }
        Command::Show { id } => {
            let txs = store.load(data_file).transactions;
            let tx = query::find_by_id(&txs, id).ok_or(FinanceError::NotFound { id })?;
            print_transactions(out, &[tx])
        }
        Command::Search { keyword } => {
            let txs = store.load(data_file).transactions;
            print_transactions(out, &query::search(&txs, &keyword))
        }
        Command::Over { amount } => {
            let txs = store.load(data_file).transactions;
            print_transactions(out, &query::filter_expenses_over(&txs, amount))
        }
        Command::Category { name } => {
            let txs = store.load(data_file).transactions;
            print_transactions(out, &query::filter_by_category(&txs, &name))
        }
        Command::Range { start, end } => {
            let start = parse_optional_date(start.as_deref())?;
            let end = parse_optional_date(end.as_deref())?;
            let txs = store.load(data_file).transactions;
            print_transactions(out, &query::filter_by_date_range(&txs, start, end)?)
        }
        Command::Summary => {
            let txs = store.load(data_file).transactions;
            print_summary(out, &balance_summary(&txs))
        }
        Command::Chart { width } => {
            let txs = store.load(data_file).transactions;
            writeln!(out, "Monthly spending chart:\n")?;
            writeln!(out, "{}", render_bar_chart(&monthly_spending(&txs), width))?;
            Ok(())
        }
        Command::Add {
            date,
            amount,
            ttype,
            category,
            description,
        } => {
            let ttype: TransactionType = ttype.parse()?;
            let mut txs = store.load(data_file).transactions;
            let id = add_transaction(&mut txs, &date, amount, &category, ttype, &description)?.id;
            persist(store, &txs, data_file)?;
            writeln!(out, "Added transaction ID {id}")?;
            Ok(())
        }
        Command::Delete { id } => {
            let mut txs = store.load(data_file).transactions;
            delete_transaction(&mut txs, id)?;
            persist(store, &txs, data_file)?;
            writeln!(out, "Deleted transaction {id}")?;
            Ok(())
        }
    }
}

/// Save and turn a failed outcome into an error.
fn persist(
    store: &dyn TransactionStore,
    transactions: &[Transaction],
    path: &Path,
) -> Result<PathBuf, FinanceError> {
    let outcome = store.save(transactions, path);
    if outcome.saved {
        Ok(outcome.path)
    } else {
        Err(FinanceError::SaveFailed {
            path: outcome.path.display().to_string(),
            reason: outcome.diagnostic.unwrap_or_else(|| "unknown error".into()),
        })
    }
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<chrono::NaiveDate>, FinanceError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_date)
        .transpose()
}

pub fn run_demo(
    storage: &StorageConfig,
    store: &dyn TransactionStore,
    out: &mut dyn Write,
) -> Result<(), FinanceError> {
    writeln!(out, "[demo] Running Personal Finance Tracker demo...")?;
    let txs = sample_data()?;

    writeln!(out, "\nAll transactions (by date):")?;
    print_transactions(out, &query::list_sorted(&txs, SortKey::ByDate, false)?)?;

    writeln!(out, "\nExpenses over 100:")?;
    print_transactions(out, &query::filter_expenses_over(&txs, 100.0))?;

    writeln!(out, "\nBalance summary:")?;
    print_summary(out, &balance_summary(&txs))?;

    writeln!(out, "\nMonthly spending chart:\n")?;
    writeln!(
        out,
        "{}",
        render_bar_chart(&monthly_spending(&txs), DEFAULT_CHART_WIDTH)
    )?;

    let demo_path = storage.temp_dir.join(DEMO_FILE_NAME);
    let saved = store.save(&txs, &demo_path);
    if saved.saved {
        let loaded = store.load(&saved.path);
        writeln!(
            out,
            "\n[demo] Round-trip file test: saved {} and loaded {} transactions.",
            txs.len(),
            loaded.transactions.len()
        )?;
    }
    Ok(())
}

pub fn print_transactions(out: &mut dyn Write, transactions: &[&Transaction]) -> Result<(), FinanceError> {
    if transactions.is_empty() {
        writeln!(out, "No transactions found.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:>3}  {:10}  {:7}  {:10}  {:15}  Description",
        "ID", "Date", "Type", "Amount", "Category"
    )?;
    writeln!(out, "{}", "-".repeat(80))?;
    for t in transactions {
        let amount = format!("{:.2}", t.amount);
        writeln!(
            out,
            "{:>3}  {:10}  {:7}  {:10}  {:15.15}  {}",
            t.id,
            t.date,
            t.ttype.as_str(),
            amount,
            t.category,
            t.description
        )?;
    }
    Ok(())
}

pub fn print_summary(out: &mut dyn Write, summary: &BalanceSummary) -> Result<(), FinanceError> {
    writeln!(
        out,
        "Income: {:.2}  Expenses: {:.2}  Net/Savings: {:.2}",
        summary.income, summary.expenses, summary.savings
    )?;
    Ok(())
}
