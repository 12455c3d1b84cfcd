pub(crate) mod category;
mod transaction;

pub(crate) use transaction::{Transaction, TxnKind};
