use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One image row returned by a product search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatItem {
    pub part_number: String,
    pub description: String,
    pub image: String,
}

/// A product card: first-seen description plus every image in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateGroup {
    pub description: String,
    pub images: Vec<String>,
}

impl AggregateGroup {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            images: Vec::new(),
        }
    }
}

/// Part number to product card, iterated in first-seen key order.
pub type ResultIndex = IndexMap<String, AggregateGroup>;

/// One manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub part_number: String,
    pub description: String,
    pub price: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    PartNumber,
    Description,
    Price,
    Date,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::PartNumber,
        Column::Description,
        Column::Price,
        Column::Date,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::PartNumber => "part_number",
            Column::Description => "description",
            Column::Price => "price",
            Column::Date => "date",
        }
    }

    /// The comparison the manifest table uses when this column header is clicked.
    pub fn natural_kind(&self) -> ComparisonKind {
        match self {
            Column::PartNumber | Column::Description => ComparisonKind::String,
            Column::Price => ComparisonKind::Numeric,
            Column::Date => ComparisonKind::Date,
        }
    }

    pub fn value<'a>(&self, row: &'a TableRow) -> &'a str {
        match self {
            Column::PartNumber => &row.part_number,
            Column::Description => &row.description,
            Column::Price => &row.price,
            Column::Date => &row.date,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "part_number" => Ok(Column::PartNumber),
            "description" => Ok(Column::Description),
            "price" => Ok(Column::Price),
            "date" => Ok(Column::Date),
            other => Err(format!(
                "unknown column '{}', expected one of: part_number, description, price, date",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    String,
    Numeric,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortDirective {
    pub column: Option<Column>,
    pub direction: Direction,
}

impl SortDirective {
    /// Same column while ascending flips to descending; anything else resets
    /// to ascending on the requested column.
    pub fn next(&self, requested: Column) -> SortDirective {
        let direction = match (self.column, self.direction) {
            (Some(current), Direction::Ascending) if current == requested => Direction::Descending,
            _ => Direction::Ascending,
        };
        SortDirective {
            column: Some(requested),
            direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Carousel,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    #[default]
    Costco,
    Amazon,
    CostcoManifest,
}

impl SearchType {
    /// Lower-cased tab name, used as the first path segment of the search URL.
    pub fn path_segment(&self) -> &'static str {
        match self {
            SearchType::Costco => "costco",
            SearchType::Amazon => "amazon",
            SearchType::CostcoManifest => "costco_manifest",
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            SearchType::Costco | SearchType::Amazon => Layout::Carousel,
            SearchType::CostcoManifest => Layout::Table,
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}
