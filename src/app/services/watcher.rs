//! Background detection of files modified by other programs.
//!
//! The watcher thread wakes once per period, compares each open file's disk
//! timestamp with the one remembered at its last load or save, and hands any
//! differences to the UI thread as one [`ModifiedDocuments`] batch. It then
//! sleeps until the UI thread calls [`ModificationWatcher::resume`], so a
//! new scan never starts while the previous findings are being resolved.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};

use crate::app::domain::document::DocumentId;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::file_io::modified_time;

/// What the watcher knows about one open file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEntry {
    pub id: DocumentId,
    pub path: PathBuf,
    pub remembered: Option<SystemTime>,
}

/// Documents whose file changed on disk, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifiedDocuments {
    pub ids: Vec<DocumentId>,
}

/// Enumerates the files to check. Called on the watcher thread.
pub type WatchSource = Arc<dyn Fn() -> Vec<WatchEntry> + Send + Sync>;

enum Control {
    Resume,
    Stop,
}

/// Compare disk timestamps against remembered ones.
///
/// Entries with no remembered timestamp, or whose file is gone, are skipped.
pub fn scan(entries: &[WatchEntry]) -> Vec<DocumentId> {
    entries
        .iter()
        .filter(|entry| {
            let Some(remembered) = entry.remembered else {
                return false;
            };
            matches!(modified_time(&entry.path), Some(disk) if disk != remembered)
        })
        .map(|entry| entry.id)
        .collect()
}

pub struct ModificationWatcher {
    findings: Receiver<ModifiedDocuments>,
    control: Sender<Control>,
    handle: Option<JoinHandle<()>>,
    period: Duration,
}

impl ModificationWatcher {
    pub fn spawn(period: Duration, source: WatchSource) -> Result<Self> {
        let (findings_tx, findings_rx) = bounded(1);
        let (control_tx, control_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("modification-watcher".into())
            .spawn(move || run(period, source, findings_tx, control_rx))
            .map_err(AppError::Io)?;

        tracing::debug!("Started modification watcher ({:?} period)", period);
        Ok(Self {
            findings: findings_rx,
            control: control_tx,
            handle: Some(handle),
            period,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Channel carrying findings, for callers that select on it.
    pub fn receiver(&self) -> &Receiver<ModifiedDocuments> {
        &self.findings
    }

    /// Take pending findings without blocking.
    pub fn try_take(&self) -> Option<ModifiedDocuments> {
        self.findings.try_recv().ok()
    }

    /// Let the watcher scan again after findings were handled.
    pub fn resume(&self) {
        let _ = self.control.send(Control::Resume);
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let _ = self.control.send(Control::Stop);
        if handle.join().is_err() {
            tracing::warn!("Modification watcher thread panicked");
        }
        tracing::debug!("Stopped modification watcher");
    }
}

impl Drop for ModificationWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    period: Duration,
    source: WatchSource,
    findings: Sender<ModifiedDocuments>,
    control: Receiver<Control>,
) {
    loop {
        match control.recv_timeout(period) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(Control::Resume) => continue,
            Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => break,
        }

        let ids = scan(&source());
        if ids.is_empty() {
            continue;
        }
        tracing::debug!("{} open file(s) changed on disk", ids.len());
        if findings.send(ModifiedDocuments { ids }).is_err() {
            break;
        }

        // Wait for the UI thread to finish prompting.
        match control.recv() {
            Ok(Control::Resume) => {}
            Ok(Control::Stop) | Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::path::Path;

    fn touch(path: &Path, offset_secs: u64) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(offset_secs))
            .unwrap();
    }

    #[test]
    fn test_scan_reports_only_changed_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let entries = vec![
            WatchEntry {
                id: DocumentId(1),
                path: a.clone(),
                remembered: modified_time(&a),
            },
            WatchEntry {
                id: DocumentId(2),
                path: b.clone(),
                remembered: modified_time(&b),
            },
        ];
        assert!(scan(&entries).is_empty());

        touch(&b, 60);
        assert_eq!(scan(&entries), vec![DocumentId(2)]);
    }

    #[test]
    fn test_scan_skips_unknown_and_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "a").unwrap();

        let entries = vec![
            WatchEntry {
                id: DocumentId(1),
                path: a.clone(),
                remembered: None,
            },
            WatchEntry {
                id: DocumentId(2),
                path: dir.path().join("gone.txt"),
                remembered: Some(SystemTime::UNIX_EPOCH),
            },
        ];
        assert!(scan(&entries).is_empty());
    }

    #[test]
    fn test_thread_waits_for_resume_between_rounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.c");
        fs::write(&path, "int x;").unwrap();
        let entry = WatchEntry {
            id: DocumentId(7),
            path: path.clone(),
            remembered: modified_time(&path),
        };
        touch(&path, 60);

        let source: WatchSource = Arc::new(move || vec![entry.clone()]);
        let mut watcher = ModificationWatcher::spawn(Duration::from_millis(10), source).unwrap();

        let first = watcher.receiver().recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first.ids, vec![DocumentId(7)]);

        // Still changed, but nothing new until resumed.
        assert!(watcher.receiver().recv_timeout(Duration::from_millis(100)).is_err());

        watcher.resume();
        let second = watcher.receiver().recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(second.ids, vec![DocumentId(7)]);

        watcher.stop();
        assert!(watcher.try_take().is_none());
    }

    #[test]
    fn test_idle_when_nothing_changed() {
        let source: WatchSource = Arc::new(Vec::<WatchEntry>::new);
        let watcher = ModificationWatcher::spawn(Duration::from_millis(5), source).unwrap();
        assert!(watcher.receiver().recv_timeout(Duration::from_millis(60)).is_err());
        assert_eq!(watcher.period(), Duration::from_millis(5));
    }
}
