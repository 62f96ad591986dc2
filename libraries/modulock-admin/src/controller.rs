//! The admin page controller.

use crate::messages;
use crate::page::PageContext;
use crate::polling::{PollStep, PollingSession};
use crate::table::UserTable;
use crate::view::{AdminView, MessageKind};
use modulock_core::{AccessBackend, ActionReply, ScanReading};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

/// How often the scanner is polled unless configured otherwise
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Result of [`AdminController::remove_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The operator declined; nothing was sent
    Cancelled,
    /// The backend answered (either way) and the list was refreshed
    Replied(ActionReply),
    /// The request never got an answer
    RequestFailed,
}

/// Result of [`AdminController::register_user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A field was blank; nothing was sent
    MissingFields,
    /// The backend registered the user
    Registered,
    /// The backend refused (duplicate RA/UID, bad parameters, no session)
    Rejected,
    /// The request never got an answer
    RequestFailed,
}

/// Drives one admin page: user list, registration form, door button and
/// the RFID scan poller.
///
/// Every operation is a single request with view updates; nothing is
/// retried. The only state kept between calls is the polling session.
/// Dropping the controller stops polling.
pub struct AdminController<B, V> {
    backend: Arc<B>,
    view: Arc<V>,
    polling: Mutex<PollingSession>,
}

impl<B, V> AdminController<B, V>
where
    B: AccessBackend + 'static,
    V: AdminView + 'static,
{
    /// Controller polling every [`DEFAULT_POLL_INTERVAL`]
    pub fn new(backend: Arc<B>, view: Arc<V>) -> Self {
        Self::with_poll_interval(backend, view, DEFAULT_POLL_INTERVAL)
    }

    /// Controller with a custom poll interval, clamped to
    /// [`MIN_POLL_PERIOD`](crate::MIN_POLL_PERIOD).
    pub fn with_poll_interval(backend: Arc<B>, view: Arc<V>, interval: Duration) -> Self {
        Self {
            backend,
            view,
            polling: Mutex::new(PollingSession::new(interval)),
        }
    }

    /// The view this controller renders into
    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Page-load hook.
    ///
    /// Shows the login error if the page was reached through a failed
    /// login, loads the users table if the page has one, and starts
    /// waiting for a scan if the page shows scan status.
    pub async fn on_load(&self, page: &PageContext) {
        if page.login_failed() && self.view.has_login_error_slot() {
            self.view.show_login_error(messages::INVALID_LOGIN);
        }
        if self.view.has_user_list() {
            self.get_users().await;
        }
        if self.view.has_uid_status() {
            self.start_uid_polling();
        }
    }

    /// Page-unload hook: polling stops unconditionally.
    pub fn on_unload(&self) {
        if self.session().stop() {
            debug!("Polling stopped on unload");
        }
    }

    /// Pulse the door relay and show the controller's reply verbatim.
    pub async fn open_door(&self) -> Option<ActionReply> {
        match self.backend.open_door().await {
            Ok(reply) => {
                info!(status = reply.status, success = reply.success, "Door request answered");
                self.view.notify(&reply.message);
                Some(reply)
            }
            Err(e) => {
                error!(error = %e, "Error (openDoor)");
                self.view.notify(messages::DOOR_FAILED);
                None
            }
        }
    }

    /// Fetch and render the users table.
    pub async fn get_users(&self) -> UserTable {
        let table = match self.backend.get_users().await {
            Ok(listing) => UserTable::from_listing(&listing),
            Err(e) => {
                error!(error = %e, "Error fetching users");
                UserTable::load_failed()
            }
        };

        debug!(rows = table.row_count(), "Rendering users table");
        self.view.render_users(&table);
        table
    }

    /// Remove a user after confirmation, then refresh the table.
    pub async fn remove_user(&self, ra: &str) -> RemoveOutcome {
        if !self.view.confirm(&messages::confirm_removal(ra)) {
            debug!(ra = %ra, "Removal cancelled");
            return RemoveOutcome::Cancelled;
        }

        match self.backend.remove_user(ra).await {
            Ok(reply) => {
                if !reply.success {
                    warn!(ra = %ra, status = reply.status, message = %reply.message, "Removal refused");
                }
                self.view.notify(&reply.message);
                self.get_users().await;
                RemoveOutcome::Replied(reply)
            }
            Err(e) => {
                error!(error = %e, ra = %ra, "Error removing user");
                self.view.notify(messages::REMOVE_FAILED);
                RemoveOutcome::RequestFailed
            }
        }
    }

    /// Submit the registration form.
    ///
    /// On success the inputs are cleared and polling restarts so the next
    /// tag can be enrolled right away.
    pub async fn register_user(&self) -> RegisterOutcome {
        let form = self.view.registration_form();

        if let Err(e) = form.validate() {
            debug!(field = e.field, "Registration form incomplete");
            self.show_message(MessageKind::Error, messages::FIELDS_REQUIRED);
            return RegisterOutcome::MissingFields;
        }

        match self.backend.register_user(&form.trimmed()).await {
            Ok(reply) if reply.success => {
                self.view.clear_registration_form();
                self.start_uid_polling();
                self.show_message(MessageKind::Success, &reply.message);
                RegisterOutcome::Registered
            }
            Ok(reply) => {
                warn!(status = reply.status, message = %reply.message, "Registration refused");
                self.show_message(MessageKind::Error, &reply.message);
                RegisterOutcome::Rejected
            }
            Err(e) => {
                error!(error = %e, "Error registering user");
                self.show_message(MessageKind::Error, messages::REGISTRATION_FAILED);
                RegisterOutcome::RequestFailed
            }
        }
    }

    /// Start waiting for a fresh scan, replacing any poller already
    /// running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_uid_polling(&self) {
        let backend = Arc::clone(&self.backend);
        let view = Arc::clone(&self.view);

        let mut session = self.session();
        session.start(move || {
            let backend = Arc::clone(&backend);
            let view = Arc::clone(&view);
            async move { fetch_last_scanned_uid(backend.as_ref(), view.as_ref()).await }
        });
        info!(interval = ?session.period(), "Polling for RFID scans");
        drop(session);

        if self.view.has_uid_status() {
            self.view.set_uid_status(messages::AWAITING_SCAN);
        }
        self.view.set_uid_field("");
    }

    /// Stop polling if it is running
    pub fn stop_uid_polling(&self) {
        self.session().stop();
    }

    /// Whether a poll timer is ticking
    pub fn is_polling(&self) -> bool {
        self.session().is_active()
    }

    fn session(&self) -> MutexGuard<'_, PollingSession> {
        self.polling.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn show_message(&self, kind: MessageKind, text: &str) {
        if self.view.has_message_slot() {
            self.view.show_message(kind, text);
        }
    }
}

/// One poll tick: a scanned UID fills the form and ends polling.
async fn fetch_last_scanned_uid<B, V>(backend: &B, view: &V) -> PollStep
where
    B: AccessBackend + ?Sized,
    V: AdminView + ?Sized,
{
    match backend.last_scanned_uid().await {
        Ok(ScanReading::Scanned(uid)) => {
            info!(uid = %uid, "RFID tag scanned");
            view.set_uid_field(&uid);
            view.set_uid_status(&messages::uid_scanned(&uid));
            PollStep::Done
        }
        Ok(ScanReading::Pending) => {
            trace!("No fresh scan");
            PollStep::Continue
        }
        Err(e) => {
            error!(error = %e, "Error fetching UID");
            view.set_uid_status(messages::UID_FETCH_FAILED);
            PollStep::Continue
        }
    }
}
