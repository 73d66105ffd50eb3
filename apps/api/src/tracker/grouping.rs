use std::collections::HashMap;

use serde::Serialize;

use crate::models::suggestion::Suggestion;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub suggestions: Vec<Suggestion>,
}

/// Groups suggestions by category.
///
/// Categories come out in order of first appearance and each group keeps the
/// input order of its suggestions, so concatenating the groups yields a
/// stable partition of the input.
pub fn group_by_category(suggestions: &[Suggestion]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for suggestion in suggestions {
        match index.get(suggestion.category.as_str()) {
            Some(&slot) => groups[slot].suggestions.push(suggestion.clone()),
            None => {
                index.insert(suggestion.category.as_str(), groups.len());
                groups.push(CategoryGroup {
                    category: suggestion.category.clone(),
                    suggestions: vec![suggestion.clone()],
                });
            }
        }
    }

    groups
}
