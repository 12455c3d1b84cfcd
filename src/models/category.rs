/// A registry entry: stable internal code plus the label shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Category {
    pub code: &'static str,
    pub label: &'static str,
}

// Fixed, compiled-in set. Order is display order. The registry does not
// restrict which codes may pair with which transaction kind.
const CATEGORIES: [Category; 10] = [
    Category { code: "food", label: "Food & Dining" },
    Category { code: "transportation", label: "Transportation" },
    Category { code: "utilities", label: "Utilities" },
    Category { code: "entertainment", label: "Entertainment" },
    Category { code: "shopping", label: "Shopping" },
    Category { code: "health", label: "Health" },
    Category { code: "education", label: "Education" },
    Category { code: "salary", label: "Salary" },
    Category { code: "investment", label: "Investment" },
    Category { code: "other", label: "Other" },
];

pub(crate) fn all() -> &'static [Category] {
    &CATEGORIES
}

pub(crate) fn is_known(code: &str) -> bool {
    CATEGORIES.iter().any(|c| c.code == code)
}

/// Label for a category code. Unknown codes are echoed back rather than
/// rejected, so stale data stays displayable.
pub(crate) fn label_of(code: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|c| c.code == code)
        .map_or(code, |c| c.label)
}
