//! Numbered photo resources and their load status.

use crate::error::SceneError;

#[derive(Clone, Debug, PartialEq)]
pub struct PhotoManifest {
    pub count: usize,
    pub dir: String,
    pub prefix: String,
    pub ext: String,
}

impl Default for PhotoManifest {
    fn default() -> Self {
        Self {
            count: 13,
            dir: "photos".into(),
            prefix: "photo".into(),
            ext: "jpg".into(),
        }
    }
}

impl PhotoManifest {
    /// Photos are numbered from 1.
    pub fn numbers(&self) -> impl Iterator<Item = usize> {
        1..=self.count
    }

    pub fn file_name(&self, n: usize) -> String {
        format!("{}{}.{}", self.prefix, n, self.ext)
    }

    pub fn path(&self, n: usize) -> String {
        format!("{}/{}", self.dir, self.file_name(n))
    }

    pub fn alt(&self, n: usize) -> String {
        format!("Memory {n}")
    }

    pub fn placeholder_label(&self, n: usize) -> String {
        format!("Add {}", self.file_name(n))
    }

    /// The original run followed by an identical duplicate run, so the track
    /// can wrap at its midpoint without a visible jump.
    pub fn carousel_items(&self) -> Vec<CarouselItem> {
        let run = |duplicate: bool| {
            self.numbers().map(move |n| CarouselItem {
                key: if duplicate { format!("dup-{n}") } else { n.to_string() },
                number: n,
            })
        };
        run(false).chain(run(true)).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselItem {
    pub key: String,
    pub number: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetStatus {
    #[default]
    Pending,
    Loaded,
    Missing,
}

/// Load status for every photo; a missing photo turns into a text label.
#[derive(Clone, Debug)]
pub struct AssetBoard {
    manifest: PhotoManifest,
    status: Vec<AssetStatus>,
}

impl AssetBoard {
    pub fn new(manifest: PhotoManifest) -> Self {
        let status = vec![AssetStatus::Pending; manifest.count];
        Self { manifest, status }
    }

    pub fn manifest(&self) -> &PhotoManifest {
        &self.manifest
    }

    pub fn status(&self, n: usize) -> Option<AssetStatus> {
        n.checked_sub(1).and_then(|i| self.status.get(i)).copied()
    }

    pub fn mark_loaded(&mut self, n: usize) {
        if let Some(s) = n.checked_sub(1).and_then(|i| self.status.get_mut(i)) {
            *s = AssetStatus::Loaded;
        }
    }

    /// Record a failed load and return the label to show in its place.
    pub fn mark_missing(&mut self, n: usize) -> String {
        if let Some(s) = n.checked_sub(1).and_then(|i| self.status.get_mut(i)) {
            if *s != AssetStatus::Missing {
                log::warn!("{}", SceneError::MissingAsset { index: n });
            }
            *s = AssetStatus::Missing;
        }
        self.manifest.placeholder_label(n)
    }

    pub fn missing_count(&self) -> usize {
        self.status.iter().filter(|s| **s == AssetStatus::Missing).count()
    }
}
