use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::models::category;
use crate::report::select::{select_transactions, CategoryFilter, TypeFilter};
use crate::report::{self, DATE_FMT};
use crate::store::{SaveMode, Store};
use crate::ui::commands::{parse_txn_args, shellexpand};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], store: &mut Store) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], store),
        "list" | "ls" => cli_list(&args[2..], store),
        "add" => cli_add(&args[2..], store),
        "delete" | "rm" => cli_delete(&args[2..], store),
        "export" => cli_export(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("cashtrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("CashTrack — local-only daily income/expense tracker");
    println!();
    println!("Usage: cashtrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [YYYY-MM-DD]          Daily/weekly/monthly totals for a date (default: today)");
    println!("  list [YYYY-MM]                List a month's transactions, newest first");
    println!("    --type <income|expense>     Restrict to one transaction type");
    println!("    --category <code>           Restrict to one category code");
    println!("  add <income|expense> <amount> <category> [YYYY-MM-DD] [description]");
    println!("  delete <id>                   Remove a transaction by id");
    println!("  export [path]                 Export transactions to CSV");
    println!("    --month <YYYY-MM>           Restrict the export to one month");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn parse_reference_date(arg: Option<&String>) -> Result<NaiveDate> {
    match arg {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FMT)
            .map_err(|_| anyhow::anyhow!("Invalid date (expected YYYY-MM-DD): {raw}")),
        None => Ok(Local::now().date_naive()),
    }
}

fn cli_summary(args: &[String], store: &mut Store) -> Result<()> {
    let date = parse_reference_date(args.first())?;
    let txns = store.transactions();

    let daily = report::daily_totals(txns, date);
    let weekly = report::weekly_totals(txns, date);
    let monthly = report::monthly_totals(txns, date);

    println!("Summary for {}", date.format(DATE_FMT));
    println!();
    println!(
        "  Today       income {:>14}  expense {:>14}  balance {:>14}",
        format_amount(daily.income),
        format_amount(daily.expense),
        format_amount(daily.balance()),
    );
    println!(
        "  This week   income {:>14}  expense {:>14}  balance {:>14}",
        format_amount(weekly.income_sum()),
        format_amount(weekly.expense_sum()),
        format_amount(weekly.income_sum() - weekly.expense_sum()),
    );
    println!(
        "  This month  income {:>14}  expense {:>14}  balance {:>14}",
        format_amount(monthly.income_sum()),
        format_amount(monthly.expense_sum()),
        format_amount(monthly.income_sum() - monthly.expense_sum()),
    );

    println!();
    println!("  Week of {}:", report::week_start(date).format(DATE_FMT));
    let day_names = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    for (i, name) in day_names.iter().enumerate() {
        println!(
            "    {name}  income {:>14}  expense {:>14}",
            format_amount(weekly.income[i]),
            format_amount(weekly.expense[i]),
        );
    }

    println!();
    println!("  Month {} by week:", date.format("%Y-%m"));
    for i in 0..5 {
        println!(
            "    W{}  income {:>14}  expense {:>14}",
            i + 1,
            format_amount(monthly.income[i]),
            format_amount(monthly.expense[i]),
        );
    }

    Ok(())
}

fn cli_list(args: &[String], store: &mut Store) -> Result<()> {
    // First non-flag argument is the month
    let reference = match args.first().filter(|a| !a.starts_with('-')) {
        Some(raw) => {
            let full = format!("{raw}-01");
            NaiveDate::parse_from_str(&full, DATE_FMT)
                .map_err(|_| anyhow::anyhow!("Invalid month (expected YYYY-MM): {raw}"))?
        }
        None => Local::now().date_naive(),
    };

    let type_filter = match args.windows(2).find(|w| w[0] == "--type") {
        Some(w) => TypeFilter::parse(&w[1])
            .ok_or_else(|| anyhow::anyhow!("--type must be income or expense"))?,
        None => TypeFilter::All,
    };
    let category_filter = match args.windows(2).find(|w| w[0] == "--category") {
        Some(w) if w[1] == "all" => CategoryFilter::All,
        Some(w) if category::is_known(&w[1]) => CategoryFilter::Code(w[1].clone()),
        Some(w) => anyhow::bail!("Unknown category code: {}", w[1]),
        None => CategoryFilter::All,
    };

    let selected =
        select_transactions(store.transactions(), reference, type_filter, &category_filter);
    if selected.is_empty() {
        println!("No transactions for {}", reference.format("%Y-%m"));
        return Ok(());
    }

    println!(
        "{:<16} {:<12} {:<8} {:<16} {:>14}  Description",
        "Id", "Date", "Type", "Category", "Amount"
    );
    for txn in &selected {
        println!(
            "{:<16} {:<12} {:<8} {:<16} {:>14}  {}",
            txn.id,
            txn.date,
            txn.kind,
            category::label_of(&txn.category),
            format_amount(txn.amount),
            txn.display_description(),
        );
    }
    println!();
    println!(
        "{} transactions in {}",
        selected.len(),
        reference.format("%Y-%m")
    );

    Ok(())
}

fn cli_add(args: &[String], store: &mut Store) -> Result<()> {
    let joined = args.join(" ");
    let input = parse_txn_args(&joined, Local::now().date_naive())
        .map_err(|msg| anyhow::anyhow!("{msg}"))?;

    let kind = input.kind;
    let amount = input.amount;
    let date = input.date.clone();
    let id = store.upsert(input.into_transaction(0), SaveMode::Create)?;
    println!("Added {kind} {} on {date} (id {id})", format_amount(amount));
    Ok(())
}

fn cli_delete(args: &[String], store: &mut Store) -> Result<()> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: cashtrack delete <id>"))?;
    let id: i64 = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid transaction id: {raw}"))?;

    if store.remove(id)? {
        println!("Deleted transaction {id}");
    } else {
        println!("No transaction with id {id} (nothing removed)");
    }
    Ok(())
}

fn cli_export(args: &[String], store: &mut Store) -> Result<()> {
    let month = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .map(|w| w[1].clone());

    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            match &month {
                Some(m) => format!("{home}/cashtrack-{m}.csv"),
                None => format!("{home}/cashtrack-export.csv"),
            }
        });

    let count = store.export_csv(&output_path, month.as_deref())?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}
