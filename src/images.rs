use std::path::Path;

use crate::error::Error;
use crate::model::{EmbeddedImage, ImageFormat};
use crate::plan::IMAGE_FILES;

/// The sample images, loaded once and shared by slot index for the whole run.
/// A slot is `None` when its file could not be read under the lenient policy.
#[derive(Debug, Default)]
pub struct ImageSet {
    slots: Vec<Option<EmbeddedImage>>,
}

impl ImageSet {
    pub fn get(&self, slot: usize) -> Option<&EmbeddedImage> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub(crate) fn iter_loaded(&self) -> impl Iterator<Item = (usize, &EmbeddedImage)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|img| (i, img)))
    }
}

fn read_image(dir: &Path, file_name: &str) -> Result<EmbeddedImage, Error> {
    let path = dir.join(file_name);
    let data = std::fs::read(&path).map_err(|source| Error::ImageRead {
        path: path.clone(),
        source,
    })?;
    log::debug!("Loaded image {file_name} ({} bytes)", data.len());
    Ok(EmbeddedImage {
        file_name: file_name.to_string(),
        format: ImageFormat::from_path(&path),
        data,
    })
}

/// Read every sample image from `dir`; the first unreadable file aborts the load.
pub fn load_strict(dir: &Path) -> Result<ImageSet, Error> {
    let slots = IMAGE_FILES
        .iter()
        .map(|name| read_image(dir, name).map(Some))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ImageSet { slots })
}

/// Read every sample image from `dir`, leaving unreadable files as empty slots.
pub fn load_lenient(dir: &Path) -> ImageSet {
    let slots = IMAGE_FILES
        .iter()
        .map(|name| match read_image(dir, name) {
            Ok(img) => Some(img),
            Err(e) => {
                log::warn!("Failed to load image {name}: {e}");
                None
            }
        })
        .collect();
    ImageSet { slots }
}
