use crate::core::grouping::group_values;
use crate::core::schema::parse_table_rows;
use crate::core::sorter::ManifestTable;
use crate::domain::model::{Column, Layout, ResultIndex, SearchType};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{CatalogError, Result};

/// What the page shows. Exactly one of these is active at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    NoResults,
    Carousels(ResultIndex),
    Table(ManifestTable),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    pub fn has_results(&self) -> bool {
        matches!(self, SearchState::Carousels(_) | SearchState::Table(_))
    }
}

/// A query handed out by `SearchSession::begin`, to be passed back to
/// `complete` with the fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub search_type: SearchType,
    pub query: String,
}

/// One search tab: the active search type, the last submitted query and
/// whatever that query produced.
pub struct SearchSession<S: CatalogSource> {
    source: S,
    search_type: SearchType,
    submitted_query: Option<String>,
    state: SearchState,
}

impl<S: CatalogSource> SearchSession<S> {
    pub fn new(source: S, search_type: SearchType) -> Self {
        Self {
            source,
            search_type,
            submitted_query: None,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn submitted_query(&self) -> Option<&str> {
        self.submitted_query.as_deref()
    }

    /// Switching tabs drops the previous tab's results.
    pub fn set_search_type(&mut self, search_type: SearchType) {
        if self.search_type != search_type {
            tracing::debug!("Switching search type {} -> {}", self.search_type, search_type);
            self.search_type = search_type;
            self.submitted_query = None;
            self.state = SearchState::Idle;
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Starts a search: the state becomes `Loading` and prior results are
    /// dropped. A blank query issues no request and returns `None`.
    pub fn begin(&mut self, query: &str) -> Option<SearchRequest> {
        let query = query.trim();
        if query.is_empty() {
            tracing::warn!("Empty search query. Please enter a valid search term.");
            return None;
        }

        tracing::info!("Fetching {} results for: {}", self.search_type, query);
        self.submitted_query = Some(query.to_string());
        self.state = SearchState::Loading;

        Some(SearchRequest {
            search_type: self.search_type,
            query: query.to_string(),
        })
    }

    /// Applies the response to `request`. Fetch failures are absorbed into
    /// `NoResults`; a malformed record also clears the results but is
    /// returned so the caller can report it. Responses to a request that is
    /// no longer the one in flight are dropped.
    pub fn complete(
        &mut self,
        request: &SearchRequest,
        response: Result<Vec<serde_json::Value>>,
    ) -> Result<&SearchState> {
        if !self.is_in_flight(request) {
            tracing::debug!(
                "Discarding stale {} response for: {}",
                request.search_type,
                request.query
            );
            return Ok(&self.state);
        }

        let values = match response {
            Ok(values) => values,
            Err(e) if e.is_fetch_error() => {
                tracing::warn!("Error fetching data: {}", e);
                self.state = SearchState::NoResults;
                return Ok(&self.state);
            }
            Err(e) => {
                self.state = SearchState::NoResults;
                return Err(e);
            }
        };

        match self.build_state(&values) {
            Ok(state) => {
                self.state = state;
                Ok(&self.state)
            }
            Err(e) => {
                tracing::error!("Rejecting {} response: {}", self.search_type, e);
                self.state = SearchState::NoResults;
                Err(e)
            }
        }
    }

    /// `begin`, fetch and `complete` in one call.
    pub async fn submit(&mut self, query: &str) -> Result<&SearchState> {
        let Some(request) = self.begin(query) else {
            return Ok(&self.state);
        };
        let response = self.source.fetch(request.search_type, &request.query).await;
        self.complete(&request, response)
    }

    fn is_in_flight(&self, request: &SearchRequest) -> bool {
        self.state.is_loading()
            && self.search_type == request.search_type
            && self.submitted_query.as_deref() == Some(request.query.as_str())
    }

    /// Re-sorts the manifest table; repeating a column toggles its direction.
    pub fn sort_by(&mut self, column: Column) -> Result<&ManifestTable> {
        match &mut self.state {
            SearchState::Table(table) => {
                table.sort_by(column);
                Ok(table)
            }
            other => Err(CatalogError::InvalidState {
                message: format!("cannot sort by {} while {}", column, describe(other)),
            }),
        }
    }

    fn build_state(&self, values: &[serde_json::Value]) -> Result<SearchState> {
        let state = match self.search_type.layout() {
            Layout::Carousel => {
                let index = group_values(values)?;
                if index.is_empty() {
                    SearchState::NoResults
                } else {
                    SearchState::Carousels(index)
                }
            }
            Layout::Table => {
                let rows = parse_table_rows(values)?;
                if rows.is_empty() {
                    SearchState::NoResults
                } else {
                    SearchState::Table(ManifestTable::new(rows))
                }
            }
        };
        Ok(state)
    }
}

fn describe(state: &SearchState) -> &'static str {
    match state {
        SearchState::Idle => "no search has been run",
        SearchState::Loading => "a search is loading",
        SearchState::NoResults => "there are no results",
        SearchState::Carousels(_) => "showing product carousels",
        SearchState::Table(_) => "showing the manifest table",
    }
}
