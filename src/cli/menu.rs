//! Interactive menu and validating prompts.
//!
//! Input and output are injected so the menu can be driven from a script.
//! End of input at any prompt leaves the menu instead of failing.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::{print_summary, print_transactions};
use crate::adapters::ascii_chart::{render_bar_chart, DEFAULT_CHART_WIDTH};
use crate::domain::error::FinanceError;
use crate::domain::query::{self, SortKey};
use crate::domain::report::{balance_summary, monthly_spending};
use crate::domain::sample::sample_data;
use crate::domain::transaction::{
    add_transaction, delete_transaction, parse_amount, parse_date, Transaction, TransactionType,
};
use crate::ports::store_port::TransactionStore;

const MENU: &str = "\nPersonal Finance Tracker: Menu
1) Add transaction
2) List transactions
3) Search transactions (keyword)
4) Filter: expenses over X
5) Filter by category
6) Filter by date range
7) Show balance summary
8) Monthly spending ASCII chart
9) Save transactions
10) Load transactions from file
11) Export to JSON filename
12) Delete transaction by ID
0) Exit";

pub struct Prompter<'a, R> {
    input: R,
    out: &'a mut dyn Write,
}

impl<'a, R: BufRead> Prompter<'a, R> {
    pub fn new(input: R, out: &'a mut dyn Write) -> Self {
        Self { input, out }
    }

    pub fn say(&mut self, line: impl Display) -> Result<(), FinanceError> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>, FinanceError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-prompt until the answer is a valid `YYYY-MM-DD` date.
    pub fn ask_date(&mut self, prompt: &str) -> Result<Option<String>, FinanceError> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if parse_date(&answer).is_ok() {
                return Ok(Some(answer));
            }
            self.say("Please enter a date in YYYY-MM-DD format (e.g. 2025-07-21).")?;
        }
    }

    /// Re-prompt until the answer parses as a number.
    pub fn ask_float(&mut self, prompt: &str) -> Result<Option<f64>, FinanceError> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if let Ok(value) = parse_amount(&answer) {
                return Ok(Some(value));
            }
            self.say("Please enter a valid number (e.g. 123.45).")?;
        }
    }

    /// `Some(true)` only for an explicit `y`.
    pub fn confirm(&mut self, prompt: &str) -> Result<Option<bool>, FinanceError> {
        Ok(self
            .ask(prompt)?
            .map(|answer| answer.eq_ignore_ascii_case("y")))
    }
}

/// Run the menu until the user exits or input ends; returns the final
/// in-memory collection.
pub fn run_menu<R: BufRead>(
    input: R,
    out: &mut dyn Write,
    store: &dyn TransactionStore,
) -> Result<Vec<Transaction>, FinanceError> {
    let default_path = store.default_path().to_path_buf();
    let mut p = Prompter::new(input, out);

    let mut txs = store.load(&default_path).transactions;
    if txs.is_empty() {
        p.say("No saved transactions found. Do you want to load sample data? (y/N)")?;
        if p.confirm("")? == Some(true) {
            txs = sample_data()?;
        }
    }

    loop {
        p.say(MENU)?;
        let Some(choice) = p.ask("Choose an option: ")? else {
            p.say("Input closed; leaving interactive menu.")?;
            break;
        };

        let result = match choice.as_str() {
            "1" => add(&mut p, &mut txs),
            "2" => list(&mut p, &txs),
            "3" => search(&mut p, &txs),
            "4" => over(&mut p, &txs),
            "5" => category(&mut p, &txs),
            "6" => date_range(&mut p, &txs),
            "7" => print_summary(p.out(), &balance_summary(&txs)),
            "8" => chart(&mut p, &txs),
            "9" => save(&mut p, store, &txs, &default_path),
            "10" => load(&mut p, store, &mut txs, &default_path),
            "11" => export(&mut p, store, &txs),
            "12" => delete(&mut p, &mut txs),
            "0" => {
                exit(&mut p, store, &txs, &default_path)?;
                break;
            }
            _ => p.say("Unknown choice, try again."),
        };

        match result {
            Ok(()) => {}
            Err(e @ FinanceError::Console(_)) => return Err(e),
            Err(e) => p.say(format!("error: {e}"))?,
        }
    }

    Ok(txs)
}

fn add<R: BufRead>(p: &mut Prompter<'_, R>, txs: &mut Vec<Transaction>) -> Result<(), FinanceError> {
    let Some(date) = p.ask_date("Date (YYYY-MM-DD): ")? else {
        return Ok(());
    };
    let Some(amount) = p.ask_float("Amount: ")? else {
        return Ok(());
    };
    let Some(ttype) = p.ask("Type (income/expense): ")? else {
        return Ok(());
    };
    let ttype = match ttype.parse::<TransactionType>() {
        Ok(t) => t,
        Err(_) => {
            p.say("Invalid type, defaulting to expense")?;
            TransactionType::Expense
        }
    };
    let Some(category) = p.ask("Category: ")? else {
        return Ok(());
    };
    let category = if category.is_empty() {
        "Uncategorized".to_string()
    } else {
        category
    };
    let Some(description) = p.ask("Description: ")? else {
        return Ok(());
    };

    let id = add_transaction(txs, &date, amount, &category, ttype, &description)?.id;
    p.say(format!("Added transaction ID {id}"))
}

fn list<R: BufRead>(p: &mut Prompter<'_, R>, txs: &[Transaction]) -> Result<(), FinanceError> {
    p.say("Sort by (id/date/amount/category): (press enter for id)")?;
    let Some(key) = p.ask("")? else {
        return Ok(());
    };
    let key: SortKey = key.parse().unwrap_or_default();
    p.say("Reverse order? (y/N)")?;
    let Some(reverse) = p.confirm("")? else {
        return Ok(());
    };
    print_transactions(p.out(), &query::list_sorted(txs, key, reverse)?)
}

fn search<R: BufRead>(p: &mut Prompter<'_, R>, txs: &[Transaction]) -> Result<(), FinanceError> {
    let Some(keyword) = p.ask("Enter keyword to search (category or description): ")? else {
        return Ok(());
    };
    print_transactions(p.out(), &query::search(txs, &keyword))
}

fn over<R: BufRead>(p: &mut Prompter<'_, R>, txs: &[Transaction]) -> Result<(), FinanceError> {
    let Some(threshold) = p.ask_float("Show expenses over: ")? else {
        return Ok(());
    };
    print_transactions(p.out(), &query::filter_expenses_over(txs, threshold))
}

fn category<R: BufRead>(p: &mut Prompter<'_, R>, txs: &[Transaction]) -> Result<(), FinanceError> {
    let Some(name) = p.ask("Category to filter by: ")? else {
        return Ok(());
    };
    print_transactions(p.out(), &query::filter_by_category(txs, &name))
}

fn date_range<R: BufRead>(p: &mut Prompter<'_, R>, txs: &[Transaction]) -> Result<(), FinanceError> {
    let Some(start) = p.ask("Start date (YYYY-MM-DD) or blank: ")? else {
        return Ok(());
    };
    let Some(end) = p.ask("End date (YYYY-MM-DD) or blank: ")? else {
        return Ok(());
    };
    let start = (!start.is_empty()).then(|| parse_date(&start)).transpose()?;
    let end = (!end.is_empty()).then(|| parse_date(&end)).transpose()?;
    print_transactions(p.out(), &query::filter_by_date_range(txs, start, end)?)
}

fn chart<R: BufRead>(p: &mut Prompter<'_, R>, txs: &[Transaction]) -> Result<(), FinanceError> {
    p.say("\nMonthly spending chart:\n")?;
    p.say(render_bar_chart(&monthly_spending(txs), DEFAULT_CHART_WIDTH))
}

fn ask_path<R: BufRead>(
    p: &mut Prompter<'_, R>,
    verb: &str,
    default_path: &Path,
) -> Result<Option<PathBuf>, FinanceError> {
    let prompt = format!("{verb} filename (enter for {}): ", default_path.display());
    Ok(p.ask(&prompt)?.map(|answer| {
        if answer.is_empty() {
            default_path.to_path_buf()
        } else {
            PathBuf::from(answer)
        }
    }))
}

fn save<R: BufRead>(
    p: &mut Prompter<'_, R>,
    store: &dyn TransactionStore,
    txs: &[Transaction],
    default_path: &Path,
) -> Result<(), FinanceError> {
    let Some(path) = ask_path(p, "Save", default_path)? else {
        return Ok(());
    };
    let outcome = store.save(txs, &path);
    if outcome.saved {
        p.say(format!(
            "Saved {} transactions to {}",
            txs.len(),
            outcome.path.display()
        ))
    } else {
        p.say("Save failed; transactions are still in memory.")
    }
}

fn load<R: BufRead>(
    p: &mut Prompter<'_, R>,
    store: &dyn TransactionStore,
    txs: &mut Vec<Transaction>,
    default_path: &Path,
) -> Result<(), FinanceError> {
    let Some(path) = ask_path(p, "Load", default_path)? else {
        return Ok(());
    };
    let outcome = store.load(&path);
    *txs = outcome.transactions;
    let source = outcome.source.unwrap_or(path);
    p.say(format!(
        "Loaded {} transactions from {}",
        txs.len(),
        source.display()
    ))
}

fn export<R: BufRead>(
    p: &mut Prompter<'_, R>,
    store: &dyn TransactionStore,
    txs: &[Transaction],
) -> Result<(), FinanceError> {
    let Some(name) = p.ask("Export JSON filename: ")? else {
        return Ok(());
    };
    if name.is_empty() {
        return p.say("Filename required.");
    }
    let outcome = store.save(txs, Path::new(&name));
    if outcome.saved {
        p.say(format!("Exported to {}", outcome.path.display()))
    } else {
        p.say("Export failed.")
    }
}

fn delete<R: BufRead>(p: &mut Prompter<'_, R>, txs: &mut Vec<Transaction>) -> Result<(), FinanceError> {
    let Some(answer) = p.ask("Enter transaction ID to delete: ")? else {
        return Ok(());
    };
    let Ok(id) = answer.parse::<u64>() else {
        return p.say("Invalid ID");
    };
    match delete_transaction(txs, id) {
        Ok(_) => p.say(format!("Deleted transaction {id}")),
        Err(FinanceError::NotFound { .. }) => p.say("ID not found."),
        Err(e) => Err(e),
    }
}

fn exit<R: BufRead>(
    p: &mut Prompter<'_, R>,
    store: &dyn TransactionStore,
    txs: &[Transaction],
    default_path: &Path,
) -> Result<(), FinanceError> {
    p.say("Exit: do you want to auto-save before quitting? (y/N)")?;
    match p.confirm("")? {
        Some(true) => {
            let outcome = store.save(txs, default_path);
            if outcome.saved {
                p.say(format!("Saved to {}", outcome.path.display()))?;
            }
        }
        Some(false) => {}
        // Input ended mid-question: save rather than lose the session.
        None => {
            let outcome = store.save(txs, default_path);
            if outcome.saved {
                p.say(format!("Auto-saved to {}", outcome.path.display()))?;
            }
        }
    }
    p.say("Goodbye!")
}
