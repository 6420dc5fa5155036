//! Share editing: drafting, reconciliation, the editing session, and the
//! batch loader that feeds it.

pub mod api;
pub mod draft;
pub mod exclusion;
pub mod form;
pub mod loader;
pub mod options;
pub mod panel;
pub mod reconcile;
pub mod record;
pub mod session;

pub use api::SharesApi;
pub use draft::{RemoveOutcome, ShareDraftStore};
pub use exclusion::PrincipalExclusionResolver;
pub use form::AddSharesForm;
pub use loader::{RecordInput, ShareLoader};
pub use options::{PermissionOption, PermissionOptions};
pub use panel::{PanelMode, SharePanel, ShareTrigger};
pub use reconcile::{ReconciliationEngine, ReconciliationResult};
pub use record::{LabeledShare, ShareRecord};
pub use session::{CommitOutcome, ShareSession};
