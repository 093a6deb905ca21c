use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use eco_vault_flow_core::{Notice, NoticeKind, NotifierPort};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotifierPort for TracingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Info | NoticeKind::Success => info!(?kind, "{message}"),
            NoticeKind::Warning => warn!("{message}"),
            NoticeKind::Error => error!("{message}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut g| std::mem::take(&mut *g))
            .unwrap_or_default()
    }
}

impl NotifierPort for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        if let Ok(mut g) = self.notices.lock() {
            g.push(Notice {
                kind,
                message: message.to_owned(),
            });
        }
    }
}
