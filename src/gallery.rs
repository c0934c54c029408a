//! In-memory gallery of images and their model-generated captions.
//!
//! The gallery is the single data store both the upload path and the word
//! cloud read from. Entries are kept sorted case-insensitively by file name,
//! matching the order the index page lists thumbnails in.

use serde::{Deserialize, Serialize};

/// One caption prediction from the model, with its confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub caption: String,
    pub probability: f64,
}

/// One gallery image and the predictions returned for it.
///
/// `file_name` is the browser-facing path (e.g. `static/img/images/foo.jpg`),
/// which doubles as the entry's identity.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryEntry {
    pub file_name: String,
    pub predictions: Vec<Prediction>,
}

impl GalleryEntry {
    /// The display caption: the model's top prediction.
    pub fn caption(&self) -> &str {
        self.predictions
            .first()
            .map(|p| p.caption.as_str())
            .unwrap_or("")
    }
}

/// Ordered in-memory collection of gallery entries.
#[derive(Debug, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any existing entry with the same file name.
    /// The sorted order is maintained.
    pub fn insert(&mut self, entry: GalleryEntry) {
        self.entries.retain(|e| e.file_name != entry.file_name);
        self.entries.push(entry);
        self.entries
            .sort_by(|a, b| a.file_name.to_lowercase().cmp(&b.file_name.to_lowercase()));
    }

    /// Look up an entry by its file name.
    pub fn get(&self, file_name: &str) -> Option<&GalleryEntry> {
        self.entries.iter().find(|e| e.file_name == file_name)
    }

    /// All entries in sorted order.
    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Display captions of all entries, in entry order. This is the corpus
    /// the word cloud is computed from.
    pub fn captions(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.caption().to_string())
            .collect()
    }

    /// Remove all entries whose file name starts with `prefix`, returning
    /// the removed file names.
    pub fn remove_with_prefix(&mut self, prefix: &str) -> Vec<String> {
        let (removed, kept): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|e| e.file_name.starts_with(prefix));
        self.entries = kept;
        removed.into_iter().map(|e| e.file_name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file_name: &str, caption: &str) -> GalleryEntry {
        GalleryEntry {
            file_name: file_name.to_string(),
            predictions: vec![Prediction {
                caption: caption.to_string(),
                probability: 0.9,
            }],
        }
    }

    #[test]
    fn insert_keeps_case_insensitive_order() {
        let mut gallery = Gallery::new();
        gallery.insert(entry("static/img/images/Zebra.jpg", "a zebra"));
        gallery.insert(entry("static/img/images/apple.jpg", "an apple"));
        gallery.insert(entry("static/img/images/Mango.jpg", "a mango"));

        let names: Vec<_> = gallery.entries().iter().map(|e| &e.file_name).collect();
        assert_eq!(
            names,
            vec![
                "static/img/images/apple.jpg",
                "static/img/images/Mango.jpg",
                "static/img/images/Zebra.jpg",
            ]
        );
    }

    #[test]
    fn insert_replaces_same_file_name() {
        let mut gallery = Gallery::new();
        gallery.insert(entry("static/img/images/cat.jpg", "a cat"));
        gallery.insert(entry("static/img/images/cat.jpg", "a sleeping cat"));

        assert_eq!(gallery.len(), 1);
        assert_eq!(
            gallery.get("static/img/images/cat.jpg").unwrap().caption(),
            "a sleeping cat"
        );
    }

    #[test]
    fn caption_is_first_prediction() {
        let e = GalleryEntry {
            file_name: "static/img/images/dog.jpg".to_string(),
            predictions: vec![
                Prediction {
                    caption: "a dog".to_string(),
                    probability: 0.8,
                },
                Prediction {
                    caption: "a wolf".to_string(),
                    probability: 0.1,
                },
            ],
        };
        assert_eq!(e.caption(), "a dog");
    }

    #[test]
    fn caption_of_empty_predictions_is_empty() {
        let e = GalleryEntry {
            file_name: "static/img/images/blank.jpg".to_string(),
            predictions: vec![],
        };
        assert_eq!(e.caption(), "");
    }

    #[test]
    fn remove_with_prefix_returns_removed_names() {
        let mut gallery = Gallery::new();
        gallery.insert(entry("static/img/images/seed.jpg", "a seed image"));
        gallery.insert(entry("static/img/images/upload-a.jpg", "first upload"));
        gallery.insert(entry("static/img/images/upload-b.jpg", "second upload"));

        let removed = gallery.remove_with_prefix("static/img/images/upload-");
        assert_eq!(
            removed,
            vec![
                "static/img/images/upload-a.jpg",
                "static/img/images/upload-b.jpg",
            ]
        );
        assert_eq!(gallery.len(), 1);
        assert!(gallery.get("static/img/images/seed.jpg").is_some());
    }
}
