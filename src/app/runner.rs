use crate::adapters::http::normalize_base;
use crate::app::render::render_state;
use crate::config::AppConfig;
use crate::core::search::{SearchSession, SearchState};
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use std::io::Write;

/// Runs one configured search against `source` and writes the result.
pub struct SearchRunner<S: CatalogSource> {
    session: SearchSession<S>,
    config: AppConfig,
}

impl<S: CatalogSource> SearchRunner<S> {
    pub fn new(source: S, config: AppConfig) -> Self {
        Self {
            session: SearchSession::new(source, config.search_type),
            config,
        }
    }

    pub async fn run<W: Write>(&mut self, out: &mut W) -> Result<SearchState> {
        let image_base = normalize_base(&self.config.api_base_url)?;
        let layout = self.config.search_type.layout();

        if let Some(request) = self.session.begin(&self.config.query) {
            tracing::info!("Loading {} results...", request.search_type);
            let response = self
                .session
                .source()
                .fetch(request.search_type, &request.query)
                .await;
            self.session.complete(&request, response)?;
        }

        if !self.config.sorts.is_empty() && self.session.state().has_results() {
            for column in &self.config.sorts {
                let table = self.session.sort_by(*column)?;
                tracing::debug!(
                    "Sorted manifest by {} ({:?})",
                    column,
                    table.directive().direction
                );
            }
        }

        let state = self.session.state();
        render_state(state, &image_base, layout, self.config.format, out)?;
        out.flush()?;

        match state {
            SearchState::Carousels(index) => tracing::info!("Found {} parts", index.len()),
            SearchState::Table(table) => tracing::info!("Found {} manifest rows", table.len()),
            _ => tracing::info!("No results"),
        }

        Ok(state.clone())
    }
}
