pub mod grouping;
pub mod schema;
pub mod search;
pub mod sorter;

pub use crate::domain::model::{
    AggregateGroup, Column, ComparisonKind, Direction, FlatItem, ResultIndex, SearchType,
    SortDirective, TableRow,
};
pub use crate::domain::ports::{CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
