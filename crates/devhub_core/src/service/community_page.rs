//! Community page: channel selection and local chat.
//!
//! # Invariants
//! - Only catalog-declared channels can be selected.
//! - Selecting a channel reloads its log from storage; the previous log is dropped.
//! - Blank messages are rejected before any storage access.

use crate::model::catalog::Channel;
use crate::model::message::Message;
use crate::repo::channel_repo::ChannelLog;
use crate::service::app_context::AppContext;
use crate::service::PageError;
use crate::storage::{ChannelName, StorageBackend};
use log::debug;

/// Author recorded on locally sent messages.
pub const LOCAL_AUTHOR: &str = "You";

pub struct CommunityPage<'ctx, B: StorageBackend> {
    ctx: &'ctx AppContext<B>,
    active: Option<ChannelLog>,
}

impl<'ctx, B: StorageBackend> CommunityPage<'ctx, B> {
    /// Mounts with the first catalog channel selected and its log loaded.
    pub fn mount(ctx: &'ctx AppContext<B>) -> Self {
        let active = ctx
            .catalog()
            .channels()
            .first()
            .and_then(|channel| ChannelName::new(channel.name.as_str()).ok())
            .map(|name| ctx.channels().load(&name));
        debug!(
            "event=page_mount module=community status=ok has_channel={}",
            active.is_some()
        );
        Self { ctx, active }
    }

    pub fn channels(&self) -> &'ctx [Channel] {
        self.ctx.catalog().channels()
    }

    pub fn active_channel(&self) -> Option<&ChannelName> {
        self.active.as_ref().map(ChannelLog::channel)
    }

    /// Messages of the active channel in insertion order.
    pub fn messages(&self) -> &[Message] {
        self.active.as_ref().map(ChannelLog::messages).unwrap_or(&[])
    }

    /// Switches to `name`, reloading its log from storage.
    pub fn select_channel(&mut self, name: &str) -> Result<(), PageError> {
        if self.ctx.catalog().channel(name).is_none() {
            return Err(PageError::UnknownChannel(name.to_string()));
        }
        let channel =
            ChannelName::new(name).map_err(|_| PageError::UnknownChannel(name.to_string()))?;
        self.active = Some(self.ctx.channels().load(&channel));
        Ok(())
    }

    /// Sends trimmed `text` as the local author to the active channel.
    pub fn send(&mut self, text: &str) -> Result<Message, PageError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PageError::EmptyMessage);
        }
        let log = self.active.as_mut().ok_or(PageError::NoActiveChannel)?;
        Ok(self.ctx.channels().append(log, LOCAL_AUTHOR, trimmed))
    }

    pub fn unmount(self) {
        debug!("event=page_unmount module=community status=ok");
    }
}
