//! Bundle summary files.
//!
//! Every bundle carries a `manifest.json` for tools and an `index.md` for
//! people. Both are written atomically after the documents are copied.

mod model;
mod render;
mod writer;

pub use model::{Manifest, ManifestEntry, RunParams, format_timestamp, round_to};
pub use render::render_index;
pub use writer::{
    BundleOutputs, INDEX_FILE_NAME, MANIFEST_FILE_NAME, emit_manifest_json, write_index,
    write_manifest, write_outputs,
};
