/// Expense category: one of the predefined buckets, or free-form custom text.
///
/// Custom text is stored verbatim (trimmed, original case); display-casing
/// happens only at render time via `display_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Category {
    Food,
    Travel,
    Other,
    Custom(String),
}

impl Category {
    /// Classify a stored value. Comparison against the predefined list is
    /// case-insensitive; anything else is custom, kept verbatim.
    pub(crate) fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "food" => Self::Food,
            "travel" => Self::Travel,
            "other" => Self::Other,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// Build a category from user input. Empty text collapses to `Other`,
    /// stored as the literal token "other".
    pub(crate) fn from_input(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Self::Other
        } else {
            Self::parse(trimmed)
        }
    }

    /// The token persisted to the store.
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Self::Food => "food",
            Self::Travel => "travel",
            Self::Other => "other",
            Self::Custom(s) => s,
        }
    }

    /// Render-time casing: first letter uppercased, rest untouched.
    pub(crate) fn display_name(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
