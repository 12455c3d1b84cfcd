use chrono::{Days, Local, NaiveDate};

use crate::models::Transaction;
use crate::report::select::{select_transactions, CategoryFilter, TypeFilter};
use crate::report::{self, DayTotals, MonthTotals, WeekTotals};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions, Self::Categories]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    /// The user-selected reference date driving all three windows.
    pub(crate) selected_date: NaiveDate,
    pub(crate) type_filter: TypeFilter,
    pub(crate) category_filter: CategoryFilter,

    // Dashboard (recomputed on every mutation and navigation change)
    pub(crate) daily: DayTotals,
    pub(crate) weekly: WeekTotals,
    pub(crate) monthly: MonthTotals,

    // Transactions list (filtered, display-ordered)
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) transaction_count: usize,

    // Categories
    pub(crate) category_index: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            selected_date: Local::now().date_naive(),
            type_filter: TypeFilter::All,
            category_filter: CategoryFilter::All,

            daily: DayTotals::default(),
            weekly: WeekTotals::default(),
            monthly: MonthTotals::default(),

            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,
            transaction_count: 0,

            category_index: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh_dashboard(&mut self, store: &Store) {
        let txns = store.transactions();
        self.daily = report::daily_totals(txns, self.selected_date);
        self.weekly = report::weekly_totals(txns, self.selected_date);
        self.monthly = report::monthly_totals(txns, self.selected_date);
    }

    pub(crate) fn refresh_transactions(&mut self, store: &Store) {
        self.transactions = select_transactions(
            store.transactions(),
            self.selected_date,
            self.type_filter,
            &self.category_filter,
        );
        self.transaction_count = store.len();
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
            self.transaction_scroll = self.transaction_scroll.min(self.transaction_index);
        }
    }

    pub(crate) fn refresh_all(&mut self, store: &Store) {
        self.refresh_dashboard(store);
        self.refresh_transactions(store);
    }

    pub(crate) fn set_date(&mut self, store: &Store, date: NaiveDate) {
        self.selected_date = date;
        self.refresh_all(store);
    }

    /// Step the reference date forward or back by whole days.
    pub(crate) fn step_date(&mut self, store: &Store, days: i64) {
        let stepped = if days >= 0 {
            self.selected_date.checked_add_days(Days::new(days as u64))
        } else {
            self.selected_date
                .checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = stepped {
            self.set_date(store, date);
        }
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
