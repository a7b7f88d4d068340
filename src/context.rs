//! Evaluation context: the collaborator clients for one evaluation run.
//!
//! Clients are constructed once per invocation and passed explicitly into
//! checkpoint probes, never held as ambient module state. Handles are
//! shared read-only across a task's checkpoints; evaluation is a single
//! synchronous pass, so nothing here needs locking.

use anyhow::Result;

use crate::clients::{
    Chat, FileStore, Forge, HttpChat, HttpFileStore, HttpForge, HttpJudge, HttpTracker, Judge,
    Tracker,
};
use crate::config::HarnessConfig;

pub struct EvalContext {
    pub chat: Box<dyn Chat>,
    pub files: Box<dyn FileStore>,
    pub tracker: Box<dyn Tracker>,
    pub forge: Box<dyn Forge>,
    pub judge: Box<dyn Judge>,
}

impl EvalContext {
    /// Build HTTP clients for every collaborator service.
    ///
    /// No network traffic happens here: authentication and probing are
    /// deferred to the graded checkpoint probes, so a total collaborator
    /// outage still yields a (zero-credit) score instead of an aborted
    /// evaluation.
    pub fn connect(config: &HarnessConfig) -> Result<Self> {
        Ok(Self {
            chat: Box::new(HttpChat::new(config.chat.clone())?),
            files: Box::new(HttpFileStore::new(config.files.clone())?),
            tracker: Box::new(HttpTracker::new(config.tracker.clone())?),
            forge: Box::new(HttpForge::new(config.forge.clone())?),
            judge: Box::new(HttpJudge::new(config.judge.clone())?),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::clients::mock::{MockChat, MockFileStore, MockForge, MockJudge, MockTracker};

    /// A context with empty mocks; tests swap in seeded ones per field.
    pub(crate) fn empty_context() -> EvalContext {
        EvalContext {
            chat: Box::new(MockChat::default()),
            files: Box::new(MockFileStore::default()),
            tracker: Box::new(MockTracker::default()),
            forge: Box::new(MockForge::default()),
            judge: Box::new(MockJudge::default()),
        }
    }

    /// A context where every collaborator errors on contact.
    pub(crate) fn outage_context() -> EvalContext {
        EvalContext {
            chat: Box::new(MockChat::failing()),
            files: Box::new(MockFileStore::failing()),
            tracker: Box::new(MockTracker::failing()),
            forge: Box::new(MockForge::failing()),
            judge: Box::new(MockJudge::failing()),
        }
    }
}
