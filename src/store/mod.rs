//! The local template store.
//!
//! Maps a directory tree to and from a
//! [`TemplateModel`](crate::template::TemplateModel). Filesystem mutation
//! is this module's only observable effect; it never touches the network.
//!
//! # Modules
//!
//! - [`layout`] - tree walking and the fixed include/exclude rule set
//! - [`local`] - `load` / `save` with staged atomic promotion

pub mod layout;
pub mod local;

pub use layout::WORK_DIR;
pub use local::{is_template_root, load, save, SaveMode};
