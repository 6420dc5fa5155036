//! # sharegate-service
//!
//! Share editing layer for ShareGate. Turns an authoritative share list
//! into an editable draft, reconciles the draft into one atomic commit,
//! and drives the editing session around it.
//!
//! Collaborators (shares API, principal directory, authorizer) are injected
//! as `Arc<dyn Trait>`; in-memory implementations live in [`backend`].

pub mod backend;
pub mod directory;
pub mod share;

pub use backend::{MemoryPrincipalDirectory, MemorySharesBackend};
pub use directory::{DirectoryService, PrincipalDirectory, PrincipalQuery};
pub use share::{
    AddSharesForm, CommitOutcome, PrincipalExclusionResolver, ReconciliationEngine,
    ReconciliationResult, ShareDraftStore, ShareLoader, ShareRecord, ShareSession, SharesApi,
};
