use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::format_amount;
use crate::models::{category, Transaction, TxnKind};
use crate::report::select::{CategoryFilter, TypeFilter};
use crate::report::DATE_FMT;
use crate::store::{SaveMode, Store};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit CashTrack", cmd_quit, r);
    register_command!("quit", "Quit CashTrack", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("today", "Jump to today's date", cmd_today, r);
    register_command!("date", "Set reference date (e.g. :date 2024-03-01)", cmd_date, r);
    register_command!("next-day", "Go to the next day", cmd_next_day, r);
    register_command!("prev-day", "Go to the previous day", cmd_prev_day, r);
    register_command!(
        "filter",
        "Filter list by type (e.g. :filter expense)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter list by type (e.g. :f income)", cmd_filter, r);
    register_command!(
        "category",
        "Filter list by category (e.g. :category food)",
        cmd_category,
        r
    );
    register_command!(
        "add",
        "Add transaction (e.g. :add expense 12.50 food lunch)",
        cmd_add,
        r
    );
    register_command!("a", "Add transaction (e.g. :a income 1000 salary)", cmd_add, r);
    register_command!(
        "edit",
        "Replace selected transaction (same args as :add)",
        cmd_edit,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "export",
        "Export the selected month to CSV (e.g. :export ~/march.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Transaction input parsing ────────────────────────────────

pub(crate) const TXN_USAGE: &str =
    "Usage: <income|expense> <amount> <category> [YYYY-MM-DD] [description]";

/// A validated transaction draft from user input. Amounts must parse and be
/// non-negative, dates must be well-formed; the engines never see raw input.
pub(crate) struct TxnInput {
    pub kind: TxnKind,
    pub amount: Decimal,
    pub category: String,
    pub date: String,
    pub description: String,
}

impl TxnInput {
    pub(crate) fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            date: self.date,
            description: self.description,
        }
    }
}

fn looks_like_date(token: &str) -> bool {
    let b = token.as_bytes();
    b.len() == 10 && b[4] == b'-' && b[7] == b'-'
}

/// Parse `<kind> <amount> <category> [date] [description...]`. The date is
/// optional and defaults to the reference date. Errors are user-facing
/// messages for the status bar.
pub(crate) fn parse_txn_args(args: &str, default_date: NaiveDate) -> Result<TxnInput, String> {
    let mut parts = args.split_whitespace();

    let kind = parts
        .next()
        .and_then(TxnKind::parse)
        .ok_or_else(|| TXN_USAGE.to_string())?;

    let amount_token = parts.next().ok_or_else(|| TXN_USAGE.to_string())?;
    let amount = Decimal::from_str(amount_token)
        .map_err(|_| format!("Invalid amount: {amount_token}"))?;
    if amount < Decimal::ZERO {
        return Err("Amount must not be negative".into());
    }

    let category = parts.next().ok_or_else(|| TXN_USAGE.to_string())?.to_string();

    let rest: Vec<&str> = parts.collect();
    let (date, description) = match rest.split_first() {
        Some((first, tail)) if looks_like_date(first) => {
            let date = NaiveDate::parse_from_str(first, DATE_FMT)
                .map_err(|_| format!("Invalid date: {first}"))?;
            (date.format(DATE_FMT).to_string(), tail.join(" "))
        }
        _ => (default_date.format(DATE_FMT).to_string(), rest.join(" ")),
    };

    Ok(TxnInput {
        kind,
        amount,
        category,
        date,
        description,
    })
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(store);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh_transactions(store);
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_today(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.set_date(store, chrono::Local::now().date_naive());
    app.set_status(format!("Date: {}", app.selected_date.format(DATE_FMT)));
    Ok(())
}

fn cmd_date(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    match NaiveDate::parse_from_str(args, DATE_FMT) {
        Ok(date) => {
            app.set_date(store, date);
            app.set_status(format!("Date: {}", date.format(DATE_FMT)));
        }
        Err(_) => app.set_status("Usage: :date YYYY-MM-DD"),
    }
    Ok(())
}

fn cmd_next_day(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.step_date(store, 1);
    Ok(())
}

fn cmd_prev_day(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.step_date(store, -1);
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    match TypeFilter::parse(args) {
        Some(filter) => {
            app.type_filter = filter;
            app.refresh_transactions(store);
            app.screen = Screen::Transactions;
            app.set_status(format!("Type filter: {filter}"));
        }
        None => app.set_status("Filter must be one of: all, income, expense"),
    }
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let filter = if args == "all" {
        CategoryFilter::All
    } else if category::is_known(args) {
        CategoryFilter::Code(args.to_string())
    } else {
        app.set_status(format!(
            "Unknown category: {args} (see the Categories screen for codes)"
        ));
        return Ok(());
    };
    app.category_filter = filter;
    app.refresh_transactions(store);
    app.screen = Screen::Transactions;
    app.set_status(format!("Category filter: {}", app.category_filter));
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let input = match parse_txn_args(args, app.selected_date) {
        Ok(input) => input,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    let kind = input.kind;
    let amount = input.amount;
    let label = category::label_of(&input.category).to_string();
    store.upsert(input.into_transaction(0), SaveMode::Create)?;
    app.refresh_all(store);
    app.set_status(format!("Added {kind}: {} ({label})", format_amount(amount)));
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some(id) = app.selected_transaction().map(|t| t.id) else {
        app.set_status("No transaction selected");
        return Ok(());
    };
    let input = match parse_txn_args(args, app.selected_date) {
        Ok(input) => input,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    let amount = input.amount;
    store.upsert(input.into_transaction(id), SaveMode::Update)?;
    app.refresh_all(store);
    app.set_status(format!("Updated transaction: {}", format_amount(amount)));
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    let Some(txn) = app.selected_transaction() else {
        app.set_status("No transaction selected");
        return Ok(());
    };
    let description = txn.display_description().to_string();
    let id = txn.id;
    let amount = txn.amount;
    app.confirm_message = format!("Delete '{description}' ({})?", format_amount(amount));
    app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let month = app.selected_date.format("%Y-%m").to_string();
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/cashtrack-{month}.csv")
    } else {
        shellexpand(args)
    };

    match store.export_csv(&path, Some(&month)) {
        Ok(0) => app.set_status(format!("No transactions for {month}")),
        Ok(count) => app.set_status(format!("Exported {count} transactions to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
