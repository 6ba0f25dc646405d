//! User-facing clip operations on top of a [`ClipRepository`].

use tracing::{debug, info, warn};

use crate::clip::{self, Clip, ClipId, UNSET_ID};
use crate::clipboard::ClipboardWriter;
use crate::error::{ClipError, Result};
use crate::repository::{ClipRepository, DEFAULT_SORT_KEY};

/// Outcome of copying a clip: the clip after its usage time was recorded and
/// what happened at the clipboard.
#[derive(Debug)]
pub struct CopyReport {
    pub clip: Clip,
    pub clipboard: Result<()>,
}

pub struct ClipService<R> {
    repo: R,
    sort_key: String,
}

impl<R: ClipRepository> ClipService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo, sort_key: DEFAULT_SORT_KEY.to_string() }
    }

    /// Sort key used by [`list_active`](Self::list_active) and
    /// [`list_archived`](Self::list_archived). Unknown keys list unordered.
    pub fn with_sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = key.into();
        self
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn find(&self, id: ClipId) -> Result<Clip> {
        self.repo.find_by_id(id)
    }

    /// Creates a clip when `id` is [`UNSET_ID`], otherwise rewrites the title
    /// and content of an existing one. Both fields must be non-empty.
    pub fn register_or_update(&mut self, id: ClipId, title: &str, content: &str) -> Result<ClipId> {
        validate(title, content)?;
        let now = clip::now();
        if id == UNSET_ID {
            let new_id = self
                .repo
                .create(&Clip::new(title, content, now))
                .map_err(|e| e.context("register", id))?;
            info!(id = new_id, "registered clip");
            return Ok(new_id);
        }

        let mut target = self.repo.find_by_id(id).map_err(|e| e.context("update", id))?;
        target.title = title.to_string();
        target.content = content.to_string();
        target.updated_at = now.max(target.created_at);
        self.repo.update(&target).map_err(|e| e.context("update", id))?;
        info!(id, "updated clip");
        Ok(id)
    }

    pub fn delete(&mut self, id: ClipId) -> Result<()> {
        let target = self.repo.find_by_id(id).map_err(|e| e.context("delete", id))?;
        self.repo.delete(&target).map_err(|e| e.context("delete", id))?;
        info!(id, title = %target.title, "deleted clip");
        Ok(())
    }

    pub fn duplicate(&mut self, id: ClipId) -> Result<ClipId> {
        let new_id = self.repo.duplicate(id).map_err(|e| e.context("duplicate", id))?;
        info!(source = id, id = new_id, "duplicated clip");
        Ok(new_id)
    }

    pub fn activate(&mut self, id: ClipId) -> Result<()> {
        self.set_active(id, true, "restore")
    }

    pub fn deactivate(&mut self, id: ClipId) -> Result<()> {
        self.set_active(id, false, "archive")
    }

    fn set_active(&mut self, id: ClipId, active: bool, op: &'static str) -> Result<()> {
        let mut target = self.repo.find_by_id(id).map_err(|e| e.context(op, id))?;
        if target.is_active == active {
            debug!(id, active, "status unchanged");
        }
        target.is_active = active;
        self.repo.update(&target).map_err(|e| e.context(op, id))?;
        info!(id, active, "changed clip status");
        Ok(())
    }

    /// Records that the clip was just used. Content and `updated_at` stay as they are.
    pub fn touch_last_used(&mut self, id: ClipId) -> Result<Clip> {
        let mut target = self.repo.find_by_id(id).map_err(|e| e.context("touch", id))?;
        target.last_used_at = clip::now();
        self.repo.update(&target).map_err(|e| e.context("touch", id))?;
        debug!(id, "touched last used");
        Ok(target)
    }

    /// Writes the clip to the clipboard, then records the usage. A clipboard
    /// failure lands in the report; the usage is recorded either way.
    pub fn copy_to_clipboard(
        &mut self,
        id: ClipId,
        clipboard: &mut dyn ClipboardWriter,
    ) -> Result<CopyReport> {
        let target = self.repo.find_by_id(id).map_err(|e| e.context("copy", id))?;
        let written = clipboard.write_text(&target.content);
        if let Err(err) = &written {
            warn!(id, error = %err, "clipboard write failed");
        }
        let clip = self.touch_last_used(id)?;
        Ok(CopyReport { clip, clipboard: written })
    }

    pub fn list_active(&self) -> Result<Vec<Clip>> {
        self.list_active_by(&self.sort_key)
    }

    pub fn list_archived(&self) -> Result<Vec<Clip>> {
        self.list_archived_by(&self.sort_key)
    }

    pub fn list_active_by(&self, order_key: &str) -> Result<Vec<Clip>> {
        self.repo.list_by_status(true, order_key)
    }

    pub fn list_archived_by(&self, order_key: &str) -> Result<Vec<Clip>> {
        self.repo.list_by_status(false, order_key)
    }
}

fn validate(title: &str, content: &str) -> Result<()> {
    if title.is_empty() {
        return Err(ClipError::Validation("Title must not be empty".into()));
    }
    if content.is_empty() {
        return Err(ClipError::Validation("Content must not be empty".into()));
    }
    Ok(())
}
