//! Deterministic content identity.
//!
//! The fingerprint is a SHA-256 digest over identifier, version,
//! metadata, the ordered format list, and the sorted file/asset trees.
//! Two models with equal fingerprints are interchangeable; unequal
//! fingerprints at the same identifier+version are a conflict.
//!
//! Every field is fed length-prefixed so adjacent fields cannot alias
//! (`"ab" + "c"` never hashes like `"a" + "bc"`), and the file/asset maps
//! iterate in path order, so insertion order never affects the result.

use sha2::{Digest, Sha256};

use crate::template::model::TemplateModel;

fn feed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

impl TemplateModel {
    /// Compute the hex-encoded fingerprint of this model's exact state.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        feed(&mut hasher, self.identifier.as_bytes());
        feed(&mut hasher, self.version.as_bytes());

        feed(&mut hasher, self.metadata.name.as_bytes());
        feed(&mut hasher, self.metadata.description.as_bytes());
        feed(
            &mut hasher,
            self.metadata.license.as_deref().unwrap_or("").as_bytes(),
        );
        for format in &self.metadata.allowed_formats {
            feed(&mut hasher, format.as_bytes());
        }

        for descriptor in &self.formats {
            feed(&mut hasher, descriptor.file.as_bytes());
            feed(&mut hasher, descriptor.format.as_bytes());
        }

        feed(&mut hasher, b"files");
        for (path, content) in self.files() {
            feed(&mut hasher, path.as_bytes());
            feed(&mut hasher, content);
        }

        feed(&mut hasher, b"assets");
        for (path, content) in self.assets() {
            feed(&mut hasher, path.as_bytes());
            feed(&mut hasher, content);
        }

        hex::encode(hasher.finalize())
    }
}
