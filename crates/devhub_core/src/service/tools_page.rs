//! Tools page: category filter, sort order and debounced search.

use crate::model::catalog::Tool;
use crate::service::app_context::AppContext;
use crate::service::search_input::SearchInput;
use crate::storage::StorageBackend;
use crate::view::{project, CategoryFilter, QueryState, SortKey};
use log::debug;

pub struct ToolsPage<'ctx, B: StorageBackend> {
    ctx: &'ctx AppContext<B>,
    search: SearchInput,
}

impl<'ctx, B: StorageBackend> ToolsPage<'ctx, B> {
    /// Mounts with filter `all` and name sort.
    pub fn mount(ctx: &'ctx AppContext<B>) -> Self {
        debug!("event=page_mount module=tools status=ok");
        Self {
            ctx,
            search: SearchInput::new(
                QueryState::sorted_by(SortKey::Name),
                ctx.search_debounce_ms(),
            ),
        }
    }

    pub fn query(&self) -> &QueryState {
        self.search.query()
    }

    /// Filter control options: distinct catalog categories in first-appearance order.
    pub fn categories(&self) -> Vec<&'ctx str> {
        self.ctx.catalog().tool_categories()
    }

    /// Applies a filter control value (`all` or a category) immediately.
    pub fn select_category(&mut self, value: &str) {
        self.search.query_mut().active_filter = CategoryFilter::parse(value);
    }

    pub fn select_sort(&mut self, sort: SortKey) {
        self.search.query_mut().active_sort = Some(sort);
    }

    pub fn type_search(&mut self, raw: impl Into<String>) {
        self.search.type_text(raw, self.ctx.now_ms());
    }

    pub fn tick(&mut self) -> bool {
        self.search.poll(self.ctx.now_ms())
    }

    pub fn visible(&self) -> Vec<&'ctx Tool> {
        project(self.ctx.catalog().tools(), self.search.query())
    }

    pub fn unmount(mut self) {
        self.search.teardown();
        debug!("event=page_unmount module=tools status=ok");
    }
}
