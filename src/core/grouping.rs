use crate::core::schema::parse_flat_items;
use crate::domain::model::{AggregateGroup, FlatItem, ResultIndex};
use crate::utils::error::Result;

/// Folds flat image rows into one card per part number.
///
/// The first row seen for a part number supplies the description; every
/// row's image is appended in input order, duplicates included.
pub fn group(items: &[FlatItem]) -> ResultIndex {
    let mut index = ResultIndex::new();

    for item in items {
        let group = index
            .entry(item.part_number.clone())
            .or_insert_with(|| AggregateGroup::new(item.description.as_str()));
        if group.description != item.description {
            tracing::trace!(
                "Ignoring later description for {}: {:?}",
                item.part_number,
                item.description
            );
        }
        group.images.push(item.image.clone());
    }

    tracing::debug!("Grouped {} items into {} parts", items.len(), index.len());
    index
}

/// Validates a raw search response and groups it.
pub fn group_values(values: &[serde_json::Value]) -> Result<ResultIndex> {
    let items = parse_flat_items(values)?;
    Ok(group(&items))
}
