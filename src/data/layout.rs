// ============================================================
// Layer 4 — On-Disk Layout
// ============================================================
// Where each file of a datapoint lives. `datapoint` is the
// relative name from the datapoint list, `name` its last path
// segment.
//
//   {root}/{datapoint}/{name}_render_front.png
//   {root}/{datapoint}/{name}_render_back.png
//   {root}/{datapoint}/{name}_specification_shifted.json
//   {editing}/{name}/edited_specification.json     (optional)
//   {editing}/{name}/editing_caption.json          (optional)
//   {caption}/{name}/captions.json                 (optional)

use std::path::{Path, PathBuf};

use crate::data::loader::data_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    pub root_dir:    PathBuf,
    pub editing_dir: PathBuf,
    pub caption_dir: PathBuf,
}

impl DatasetLayout {
    pub fn new(
        root_dir:    impl Into<PathBuf>,
        editing_dir: impl Into<PathBuf>,
        caption_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root_dir:    root_dir.into(),
            editing_dir: editing_dir.into(),
            caption_dir: caption_dir.into(),
        }
    }

    fn datapoint_dir(&self, datapoint: &str) -> PathBuf {
        self.root_dir.join(datapoint)
    }

    /// Front and back render paths.
    pub fn render_paths(&self, datapoint: &str) -> [PathBuf; 2] {
        let name = data_name(datapoint);
        let dir  = self.datapoint_dir(datapoint);
        [
            dir.join(format!("{name}_render_front.png")),
            dir.join(format!("{name}_render_back.png")),
        ]
    }

    /// Ground-truth specification.
    pub fn spec_path(&self, datapoint: &str) -> PathBuf {
        let name = data_name(datapoint);
        self.datapoint_dir(datapoint)
            .join(format!("{name}_specification_shifted.json"))
    }

    pub fn edited_spec_path(&self, name: &str) -> PathBuf {
        self.editing_dir.join(name).join("edited_specification.json")
    }

    pub fn editing_caption_path(&self, name: &str) -> PathBuf {
        self.editing_dir.join(name).join("editing_caption.json")
    }

    pub fn caption_path(&self, name: &str) -> PathBuf {
        self.caption_dir.join(name).join("captions.json")
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }
}
