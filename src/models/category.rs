use serde::{Deserialize, Serialize};

/// The closed set of spending categories. Unknown values are rejected at the
/// API boundary, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Rent,
    Bills,
    Shopping,
    Travel,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Rent,
        Category::Bills,
        Category::Shopping,
        Category::Travel,
        Category::Health,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Travel => "Travel",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    /// Parse a user-supplied category name. Tolerates case and surrounding
    /// whitespace but nothing else.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Category::Food),
            "rent" => Some(Category::Rent),
            "bills" => Some(Category::Bills),
            "shopping" => Some(Category::Shopping),
            "travel" => Some(Category::Travel),
            "health" => Some(Category::Health),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
