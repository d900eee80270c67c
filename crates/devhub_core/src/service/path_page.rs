//! Learning-path page: completion tracking and progress summary.
//!
//! # Invariants
//! - Progress counts only steps present in the catalog; dangling stored IDs are ignored.
//! - `percent = round(100 * completed / total)`, and 0 for an empty path.

use crate::model::catalog::PathStep;
use crate::repo::annotation_repo::AnnotationSet;
use crate::service::app_context::AppContext;
use crate::service::PageError;
use crate::storage::{Namespace, StorageBackend};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStepRow<'a> {
    pub step: &'a PathStep,
    pub done: bool,
    pub approx_hours: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

impl PathProgress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percent: rounded_percent(completed, total),
        }
    }
}

fn rounded_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = (200 * completed as u64 + total as u64) / (2 * total as u64);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

pub struct PathPage<'ctx, B: StorageBackend> {
    ctx: &'ctx AppContext<B>,
    namespace: Namespace,
    done: AnnotationSet,
}

impl<'ctx, B: StorageBackend> PathPage<'ctx, B> {
    pub fn mount(ctx: &'ctx AppContext<B>) -> Self {
        let namespace = Namespace::path_progress();
        let done = ctx.annotations().load(&namespace);
        debug!(
            "event=page_mount module=path status=ok stored_entries={}",
            done.len()
        );
        Self {
            ctx,
            namespace,
            done,
        }
    }

    /// Catalog steps in order with their completion state.
    pub fn rows(&self) -> Vec<PathStepRow<'ctx>> {
        self.ctx
            .catalog()
            .path()
            .iter()
            .map(|step| PathStepRow {
                step,
                done: self.done.is_set(&step.id),
                approx_hours: step.approx_hours(),
            })
            .collect()
    }

    pub fn progress(&self) -> PathProgress {
        let steps = self.ctx.catalog().path();
        let completed = self
            .done
            .count_set(steps.iter().map(|step| step.id.as_str()));
        PathProgress::new(completed, steps.len())
    }

    pub fn is_done(&self, id: &str) -> bool {
        self.done.is_set(id)
    }

    /// Flips completion of a catalog step. Returns the new state.
    pub fn toggle_step(&mut self, id: &str) -> Result<bool, PageError> {
        self.ensure_known(id)?;
        Ok(self
            .ctx
            .annotations()
            .toggle_in(&mut self.done, &self.namespace, id))
    }

    /// Sets completion of a catalog step explicitly (checkbox semantics).
    pub fn set_step_done(&mut self, id: &str, done: bool) -> Result<(), PageError> {
        self.ensure_known(id)?;
        self.ctx
            .annotations()
            .set_flag_in(&mut self.done, &self.namespace, id, done);
        Ok(())
    }

    pub fn unmount(self) {
        debug!("event=page_unmount module=path status=ok");
    }

    fn ensure_known(&self, id: &str) -> Result<(), PageError> {
        match self.ctx.catalog().path_step(id) {
            Some(_) => Ok(()),
            None => Err(PageError::UnknownItem(id.to_string())),
        }
    }
}
