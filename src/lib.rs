//! TDK - Template development kit.
//!
//! TDK is the CLI core for authoring and distributing document
//! templates: it reconciles a template's on-disk representation with a
//! remote registry, validates its internal consistency, and bundles or
//! unbundles it into a portable archive.
//!
//! # Modules
//!
//! - [`archive`] - Deterministic archive packaging and unpackaging
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Registry endpoint configuration
//! - [`error`] - Error types and result aliases
//! - [`registry`] - Registry client interface and implementations
//! - [`store`] - Local directory tree loading and saving
//! - [`sync`] - Local/remote reconciliation and watch mode
//! - [`template`] - The in-memory template model
//! - [`ui`] - Terminal output, spinners, and prompts
//! - [`validate`] - Consistency and schema checks
//!
//! # Example
//!
//! ```
//! use tdk::template::{Metadata, TemplateModel};
//!
//! let mut model = TemplateModel::new(
//!     "org.demo",
//!     "1.0.0",
//!     Metadata {
//!         name: "Demo".into(),
//!         description: "A demo template".into(),
//!         license: None,
//!         allowed_formats: vec!["html".into()],
//!     },
//! );
//! model.add_format("body.html", "html");
//! model.add_file("body.html", b"<p>hello</p>".to_vec()).unwrap();
//!
//! // The archive round-trip preserves content identity.
//! let bytes = tdk::archive::package(&model).unwrap();
//! let restored = tdk::archive::unpackage(&bytes).unwrap();
//! assert_eq!(model.fingerprint(), restored.fingerprint());
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod store;
pub mod sync;
pub mod template;
pub mod ui;
pub mod validate;

pub use error::{Result, TdkError};
