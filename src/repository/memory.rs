use super::{ClipRepository, SortKey};
use crate::clip::{self, Clip, ClipId};
use crate::error::{ClipError, Result};

/// Clips kept in a vector in insertion order. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryClipRepository {
    clips: Vec<Clip>,
    last_id: ClipId,
}

impl MemoryClipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    fn position(&self, id: ClipId) -> Result<usize> {
        self.clips
            .iter()
            .position(|c| c.id == id)
            .ok_or(ClipError::NotFound { id })
    }
}

impl ClipRepository for MemoryClipRepository {
    fn find_by_id(&self, id: ClipId) -> Result<Clip> {
        let idx = self.position(id)?;
        Ok(self.clips[idx].clone())
    }

    fn create(&mut self, clip: &Clip) -> Result<ClipId> {
        self.last_id += 1;
        let mut stored = clip.clone();
        stored.id = self.last_id;
        self.clips.push(stored);
        Ok(self.last_id)
    }

    fn update(&mut self, clip: &Clip) -> Result<()> {
        let idx = self.position(clip.id)?;
        self.clips[idx] = clip.clone();
        Ok(())
    }

    fn delete(&mut self, clip: &Clip) -> Result<()> {
        let idx = self.position(clip.id)?;
        self.clips.remove(idx);
        Ok(())
    }

    fn list_by_status(&self, is_active: bool, order_key: &str) -> Result<Vec<Clip>> {
        let mut clips: Vec<Clip> = self
            .clips
            .iter()
            .filter(|c| c.is_active == is_active)
            .cloned()
            .collect();
        if let Some(sort) = SortKey::parse(order_key) {
            clips.sort_by(|a, b| sort.compare(a, b));
        }
        Ok(clips)
    }

    fn duplicate(&mut self, id: ClipId) -> Result<ClipId> {
        let source = self.find_by_id(id)?;
        self.create(&source.duplicated(clip::now()))
    }
}
