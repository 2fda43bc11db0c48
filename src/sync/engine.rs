//! The sync engine.
//!
//! One engine instance drives one logical operation at a time through the
//! states `Idle -> Comparing -> {Fetching | Publishing | Conflicted} ->
//! Idle`. The engine owns no policy: divergent content always surfaces as
//! a `Conflicted` error carrying the diff summary, and the caller decides
//! the direction.

use std::path::Path;

use crate::error::{Result, TdkError};
use crate::registry::client::RegistryClient;
use crate::store::{self, SaveMode};
use crate::sync::diff::{compare, DiffSummary, SyncStatus};
use crate::template::model::TemplateModel;
use crate::validate::{self, Finding};

/// Engine state, visible for observability; every operation returns the
/// engine to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Comparing,
    Fetching,
    Publishing,
    Conflicted,
}

/// Outcome of a `get` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetOutcome {
    /// Remote state was written to the local tree (pruning mode).
    Fetched(TemplateModel),
    /// Local fingerprint already matches remote; nothing was written.
    AlreadyInSync(TemplateModel),
}

/// Outcome of a `put` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    /// The model was published; any advisory findings ride along.
    Published {
        model: TemplateModel,
        warnings: Vec<Finding>,
    },
    /// Validation produced `Error` findings; nothing was published.
    Rejected {
        model: TemplateModel,
        findings: Vec<Finding>,
    },
}

/// Reconciles Local Store state against Registry Client state.
pub struct SyncEngine<'a> {
    registry: &'a dyn RegistryClient,
    state: SyncState,
}

impl<'a> SyncEngine<'a> {
    /// Create an engine bound to one registry client.
    pub fn new(registry: &'a dyn RegistryClient) -> Self {
        Self {
            registry,
            state: SyncState::Idle,
        }
    }

    /// Current engine state.
    pub fn state(&self) -> SyncState {
        self.state
    }

    fn enter(&mut self, state: SyncState) {
        tracing::debug!(from = ?self.state, to = ?state, "sync state transition");
        self.state = state;
    }

    /// Fetch a template from the registry into `root`.
    ///
    /// When local state is absent or empty the remote model is written
    /// directly in pruning mode. When local state differs, the engine
    /// reports `Conflicted` with a diff summary and leaves the tree
    /// untouched, unless `overwrite` is set.
    pub fn get(
        &mut self,
        root: &Path,
        identifier: &str,
        version: &str,
        overwrite: bool,
    ) -> Result<GetOutcome> {
        self.enter(SyncState::Fetching);
        let remote = match self.registry.fetch(identifier, version) {
            Ok(remote) => remote,
            Err(e) => {
                self.enter(SyncState::Idle);
                return Err(e);
            }
        };

        self.enter(SyncState::Comparing);
        let local = if store::is_template_root(root) {
            match store::load(root) {
                Ok(local) => Some(local),
                Err(e) => {
                    self.enter(SyncState::Idle);
                    return Err(e);
                }
            }
        } else {
            None
        };

        let authoritative = overwrite || local.as_ref().is_none_or(TemplateModel::is_empty);
        let status = compare(local.as_ref(), Some(&remote));

        let outcome = match status {
            SyncStatus::InSync if local.is_some() => Ok(GetOutcome::AlreadyInSync(remote)),
            _ if authoritative => {
                store::save(root, &remote, SaveMode::Prune)?;
                Ok(GetOutcome::Fetched(remote))
            }
            _ => {
                self.enter(SyncState::Conflicted);
                let local = local.unwrap_or_else(|| remote.clone());
                Err(TdkError::Conflicted {
                    identifier: identifier.to_string(),
                    version: version.to_string(),
                    diff: DiffSummary::between(&local, &remote),
                })
            }
        };

        self.enter(SyncState::Idle);
        outcome
    }

    /// Validate and publish the template rooted at `root`.
    ///
    /// Any `Error` finding rejects the operation before the registry is
    /// touched. A `VersionConflict` from the registry is surfaced, never
    /// retried.
    pub fn put(&mut self, root: &Path, force: bool) -> Result<PutOutcome> {
        self.enter(SyncState::Comparing);
        let model = match store::load(root) {
            Ok(model) => model,
            Err(e) => {
                self.enter(SyncState::Idle);
                return Err(e);
            }
        };

        let findings = validate::run(&model);
        if validate::has_errors(&findings) {
            self.enter(SyncState::Idle);
            return Ok(PutOutcome::Rejected { model, findings });
        }

        self.enter(SyncState::Publishing);
        let result = self.registry.publish(&model, force);
        if let Err(TdkError::VersionConflict { .. }) = result {
            self.enter(SyncState::Conflicted);
        }
        self.enter(SyncState::Idle);
        result?;

        Ok(PutOutcome::Published {
            model,
            warnings: findings,
        })
    }
}
