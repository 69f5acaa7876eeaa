//! Multi-field case-insensitive substring search

use std::sync::Arc;

use super::Memo;
use crate::domain::{Agent, Repository};

/// Fields a record exposes to text search
pub trait Searchable {
    fn searchable_fields(&self) -> Vec<&str>;
}

impl Searchable for Agent {
    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(3 + self.tags.len() + self.skills.len());
        fields.push(self.name.as_str());
        fields.push(self.description.as_str());
        if let Some(model) = &self.model {
            fields.push(model.as_str());
        }
        fields.extend(self.tags.iter().map(String::as_str));
        fields.extend(self.skills.iter().map(|skill| skill.as_str()));
        fields
    }
}

impl Searchable for Repository {
    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.path.as_str()];
        if let Some(description) = &self.description {
            fields.push(description.as_str());
        }
        if let Some(remote_url) = &self.remote_url {
            fields.push(remote_url.as_str());
        }
        if let Some(tags) = &self.tags {
            fields.extend(tags.iter().map(String::as_str));
        }
        fields
    }
}

#[derive(Debug)]
pub struct SearchResults<T> {
    /// Matches in collection order; the input itself when the query is blank
    pub filtered: Arc<Vec<T>>,
    pub has_results: bool,
    pub result_count: usize,
}

impl<T> Clone for SearchResults<T> {
    fn clone(&self) -> Self {
        Self {
            filtered: Arc::clone(&self.filtered),
            has_results: self.has_results,
            result_count: self.result_count,
        }
    }
}

impl<T> SearchResults<T> {
    fn from_filtered(filtered: Arc<Vec<T>>) -> Self {
        let result_count = filtered.len();
        Self {
            filtered,
            has_results: result_count > 0,
            result_count,
        }
    }
}

/// Keep every item where any field contains `query`, ignoring case
pub fn search_items<T>(items: &Arc<Vec<T>>, query: &str) -> SearchResults<T>
where
    T: Searchable + Clone,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults::from_filtered(Arc::clone(items));
    }

    let filtered: Vec<T> = items
        .iter()
        .filter(|item| {
            item.searchable_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    SearchResults::from_filtered(Arc::new(filtered))
}

/// Memoized search over one collection
#[derive(Debug)]
pub struct SearchView<T> {
    memo: Memo<T, String, SearchResults<T>>,
}

impl<T> Default for SearchView<T> {
    fn default() -> Self {
        Self { memo: Memo::default() }
    }
}

impl<T: Searchable + Clone> SearchView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&mut self, items: &Arc<Vec<T>>, query: &str) -> SearchResults<T> {
        self.memo
            .get_or_compute(items, &query.to_string(), |items, query| {
                search_items(items, query)
            })
    }

    pub fn recomputations(&self) -> u64 {
        self.memo.recomputations()
    }
}

pub type AgentSearch = SearchView<Agent>;
pub type RepositorySearch = SearchView<Repository>;
