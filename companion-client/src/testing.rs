//! Shared helpers for unit tests.

use crate::host::HostActions;
use crate::store::Store;
use companion_core::HostAction;
use std::io;
use std::sync::{Arc, Mutex};

/// Records every host action it is asked to perform.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingHost {
    actions: Arc<Mutex<Vec<HostAction>>>,
    store: Option<Store>,
}

impl RecordingHost {
    /// A host that also applies the actions to `store`, the way a real
    /// host's reducers would.
    pub(crate) fn applying_to(store: Store) -> Self {
        Self {
            actions: Arc::default(),
            store: Some(store),
        }
    }

    pub(crate) fn actions(&self) -> Vec<HostAction> {
        self.actions.lock().unwrap().clone()
    }
}

impl HostActions for RecordingHost {
    fn navigate_to(&self, url: Option<&str>) {
        self.actions
            .lock()
            .unwrap()
            .push(HostAction::NavigateTo(url.map(str::to_string)));
        if let Some(store) = &self.store {
            store.update(|s| s.active_resource_url = url.map(str::to_string));
        }
    }

    fn set_muted(&self, muted: bool, ensure_track: bool) {
        self.actions.lock().unwrap().push(HostAction::SetMuted {
            muted,
            ensure_track,
        });
        if let Some(store) = &self.store {
            store.update(|s| s.muted = muted);
        }
    }
}

/// In-memory sink for `tracing` output.
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// A subscriber writing DEBUG and above into this sink.
    pub(crate) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
