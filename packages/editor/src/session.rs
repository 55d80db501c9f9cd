//! # Host Sessions
//!
//! A [`Session`] is one unit of work against a document host: open it, issue
//! reads and mutations through [`Session::host`], then [`Session::commit`].
//!
//! A session that goes out of scope without being committed (an early `?`
//! return, for example) still syncs the host, so work issued before the
//! failure is never left half-materialized. Sync errors on that path can only
//! be logged.

use docanchor_host::{DocumentHost, HostError};
use tracing::{debug, warn};

/// Scoped unit of work over a document host
pub struct Session<'a, H: DocumentHost> {
    host: &'a mut H,
    label: &'static str,
    committed: bool,
}

impl<'a, H: DocumentHost> Session<'a, H> {
    pub fn open(host: &'a mut H, label: &'static str) -> Self {
        debug!(session = label, "Session opened");
        Self {
            host,
            label,
            committed: false,
        }
    }

    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Sync the host and close the session
    pub fn commit(mut self) -> Result<(), HostError> {
        self.committed = true;
        self.host.sync()?;
        debug!(session = self.label, "Session committed");
        Ok(())
    }
}

impl<H: DocumentHost> Drop for Session<'_, H> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = self.host.sync() {
            warn!(session = self.label, error = %e, "Sync failed while closing abandoned session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docanchor_host::{MemoryHost, NORMAL_STYLE};

    #[test]
    fn test_commit_syncs_host() {
        let mut host = MemoryHost::new();
        let block = host.push_paragraph("a", NORMAL_STYLE);

        let mut session = Session::open(&mut host, "test");
        session.host().set_block_text(block, "b").unwrap();
        session.commit().unwrap();

        assert_eq!(host.revision(), 1);
        assert_eq!(host.uncommitted(), 0);
    }

    #[test]
    fn test_dropped_session_still_syncs() {
        let mut host = MemoryHost::new();
        let block = host.push_paragraph("a", NORMAL_STYLE);

        {
            let mut session = Session::open(&mut host, "test");
            session.host().set_block_text(block, "b").unwrap();
        }

        assert_eq!(host.revision(), 1);
    }

    #[test]
    fn test_commit_reports_rejected_sync() {
        let mut host = MemoryHost::new();
        host.reject_syncs(Some("read-only".into()));

        let session = Session::open(&mut host, "test");
        assert_eq!(
            session.commit(),
            Err(HostError::SyncRejected("read-only".into()))
        );
    }
}
