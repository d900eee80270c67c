//! Articles page: debounced search plus bookmarks.
//!
//! # Invariants
//! - Bookmarks are restored from storage at mount, before the first view.
//! - Saved listings keep catalog order and omit IDs missing from the catalog.

use crate::model::catalog::Article;
use crate::repo::annotation_repo::AnnotationSet;
use crate::service::app_context::AppContext;
use crate::service::search_input::SearchInput;
use crate::service::PageError;
use crate::storage::{Namespace, StorageBackend};
use crate::view::{project, QueryState};
use log::debug;

/// One article in the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleCard<'a> {
    pub article: &'a Article,
    pub bookmarked: bool,
}

pub struct ArticlesPage<'ctx, B: StorageBackend> {
    ctx: &'ctx AppContext<B>,
    namespace: Namespace,
    saved: AnnotationSet,
    search: SearchInput,
}

impl<'ctx, B: StorageBackend> ArticlesPage<'ctx, B> {
    pub fn mount(ctx: &'ctx AppContext<B>) -> Self {
        let namespace = Namespace::saved_articles();
        let saved = ctx.annotations().load(&namespace);
        debug!(
            "event=page_mount module=articles status=ok saved_entries={}",
            saved.len()
        );
        Self {
            ctx,
            namespace,
            saved,
            search: SearchInput::new(QueryState::default(), ctx.search_debounce_ms()),
        }
    }

    pub fn query(&self) -> &QueryState {
        self.search.query()
    }

    /// Records search text; the list updates once input has been quiet long enough.
    pub fn type_search(&mut self, raw: impl Into<String>) {
        self.search.type_text(raw, self.ctx.now_ms());
    }

    /// Fires the debounce timer if due. Returns whether the visible list may have changed.
    pub fn tick(&mut self) -> bool {
        self.search.poll(self.ctx.now_ms())
    }

    /// Articles matching the current query, in catalog order.
    pub fn visible(&self) -> Vec<ArticleCard<'ctx>> {
        project(self.ctx.catalog().articles(), self.search.query())
            .into_iter()
            .map(|article| ArticleCard {
                article,
                bookmarked: self.saved.is_set(&article.id),
            })
            .collect()
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.saved.is_set(id)
    }

    /// Flips the bookmark on a catalog article. Returns the new state.
    pub fn toggle_bookmark(&mut self, id: &str) -> Result<bool, PageError> {
        if self.ctx.catalog().article(id).is_none() {
            return Err(PageError::UnknownItem(id.to_string()));
        }
        Ok(self
            .ctx
            .annotations()
            .toggle_in(&mut self.saved, &self.namespace, id))
    }

    /// Bookmarked catalog articles in catalog order.
    pub fn saved_articles(&self) -> Vec<&'ctx Article> {
        self.ctx
            .catalog()
            .articles()
            .iter()
            .filter(|article| self.saved.is_set(&article.id))
            .collect()
    }

    /// Tears the page down, cancelling any pending search update.
    pub fn unmount(mut self) {
        self.search.teardown();
        debug!("event=page_unmount module=articles status=ok");
    }
}
