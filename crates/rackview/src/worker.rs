//! Background worker that loads the session without blocking the UI.
//!
//! The UI thread sends one [`LoadRequest::Session`] at startup and polls for
//! responses each frame. Until both the config and the user have arrived the
//! session reports itself as loading.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::data::session_data::{DataConfig, UserRecord};
use crate::data::storage::DataDirectory;

/// Request sent to the background worker
#[derive(Debug)]
pub enum LoadRequest {
    /// Load config.yaml, then the user to sign in as
    Session {
        requested_user: Option<String>,
        /// Artificial latency before each response
        delay: Duration,
    },
    /// Graceful shutdown
    Shutdown,
}

/// Response from the background worker
#[derive(Debug)]
pub enum LoadResponse {
    ConfigLoaded(DataConfig),
    UserLoaded(UserRecord),
    /// Loading failed; the session stays incomplete
    Error(String),
}

pub struct SessionWorker {
    request_tx: Sender<LoadRequest>,
    response_rx: Receiver<LoadResponse>,
    thread: Option<JoinHandle<()>>,
}

impl SessionWorker {
    pub fn new(storage: DataDirectory) -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();

        let thread = thread::spawn(move || {
            run(storage, request_rx, response_tx);
        });

        Self {
            request_tx,
            response_rx,
            thread: Some(thread),
        }
    }

    /// Returns true if the request reached the worker
    pub fn send(&self, request: LoadRequest) -> bool {
        self.request_tx.send(request).is_ok()
    }

    /// Non-blocking receive
    pub fn try_recv(&self) -> Option<LoadResponse> {
        self.response_rx.try_recv().ok()
    }

    pub fn shutdown(&mut self) {
        let _ = self.request_tx.send(LoadRequest::Shutdown);
        if let Some(handle) = self.thread.take()
            && handle.join().is_err()
        {
            tracing::warn!("Session worker panicked");
        }
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(storage: DataDirectory, requests: Receiver<LoadRequest>, responses: Sender<LoadResponse>) {
    while let Ok(request) = requests.recv() {
        match request {
            LoadRequest::Session {
                requested_user,
                delay,
            } => {
                if load_session(&storage, requested_user.as_deref(), delay, &responses).is_err() {
                    // UI side hung up
                    break;
                }
            }
            LoadRequest::Shutdown => break,
        }
    }
    tracing::debug!("Session worker exiting");
}

fn load_session(
    storage: &DataDirectory,
    requested_user: Option<&str>,
    delay: Duration,
    responses: &Sender<LoadResponse>,
) -> Result<(), std::sync::mpsc::SendError<LoadResponse>> {
    thread::sleep(delay);
    let config = match storage.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config");
            return responses.send(LoadResponse::Error(e.to_string()));
        }
    };
    responses.send(LoadResponse::ConfigLoaded(config.clone()))?;

    thread::sleep(delay);
    match storage.resolve_user(requested_user, &config) {
        Ok(user) => {
            tracing::info!(username = %user.username, admin = user.is_admin, "Signed in");
            responses.send(LoadResponse::UserLoaded(user))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load user");
            responses.send(LoadResponse::Error(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn recv_within(worker: &SessionWorker, timeout: Duration) -> Option<LoadResponse> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if let Some(response) = worker.try_recv() {
                return Some(response);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_loads_config_then_user() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = SessionWorker::new(DataDirectory::new(dir.path().to_path_buf()));
        assert!(worker.send(LoadRequest::Session {
            requested_user: None,
            delay: Duration::ZERO,
        }));

        let first = recv_within(&worker, Duration::from_secs(5));
        assert!(matches!(first, Some(LoadResponse::ConfigLoaded(_))));
        let second = recv_within(&worker, Duration::from_secs(5));
        match second {
            Some(LoadResponse::UserLoaded(user)) => assert!(user.is_admin),
            other => panic!("Expected user, got {other:?}"),
        }

        worker.shutdown();
    }

    #[test]
    fn test_unknown_user_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let worker = SessionWorker::new(DataDirectory::new(dir.path().to_path_buf()));
        worker.send(LoadRequest::Session {
            requested_user: Some("ghost".into()),
            delay: Duration::ZERO,
        });

        assert!(matches!(
            recv_within(&worker, Duration::from_secs(5)),
            Some(LoadResponse::ConfigLoaded(_))
        ));
        assert!(matches!(
            recv_within(&worker, Duration::from_secs(5)),
            Some(LoadResponse::Error(_))
        ));
    }
}
