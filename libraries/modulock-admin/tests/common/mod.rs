/// Common test doubles for the admin controller
use async_trait::async_trait;
use modulock_admin::{AdminView, MessageKind, UserTable};
use modulock_core::{
    AccessBackend, AccessError, ActionReply, Registration, Result, ScanReading, UserListing,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Backend answering from scripted responses and counting calls.
#[derive(Default)]
pub struct FakeBackend {
    pub door_reply: Mutex<Option<ActionReply>>,
    pub users: Mutex<Option<UserListing>>,
    pub remove_reply: Mutex<Option<ActionReply>>,
    pub register_reply: Mutex<Option<ActionReply>>,
    pub scans: Mutex<VecDeque<Result<ScanReading>>>,
    pub registered: Mutex<Vec<Registration>>,
    pub removed: Mutex<Vec<String>>,
    door_calls: AtomicUsize,
    users_calls: AtomicUsize,
    scan_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(self, listing: UserListing) -> Self {
        *self.users.lock().unwrap() = Some(listing);
        self
    }

    pub fn with_door_reply(self, reply: ActionReply) -> Self {
        *self.door_reply.lock().unwrap() = Some(reply);
        self
    }

    pub fn with_remove_reply(self, reply: ActionReply) -> Self {
        *self.remove_reply.lock().unwrap() = Some(reply);
        self
    }

    pub fn with_register_reply(self, reply: ActionReply) -> Self {
        *self.register_reply.lock().unwrap() = Some(reply);
        self
    }

    /// Queue poll results; once drained every poll reads `Pending`.
    pub fn with_scans(self, scans: Vec<Result<ScanReading>>) -> Self {
        self.scans.lock().unwrap().extend(scans);
        self
    }

    pub fn door_calls(&self) -> usize {
        self.door_calls.load(Ordering::SeqCst)
    }

    pub fn users_calls(&self) -> usize {
        self.users_calls.load(Ordering::SeqCst)
    }

    pub fn scan_calls(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.registered.lock().unwrap().len()
    }

    pub fn remove_calls(&self) -> usize {
        self.removed.lock().unwrap().len()
    }
}

fn unreachable_error() -> AccessError {
    AccessError::ServerUnreachable("connection refused".to_string())
}

#[async_trait]
impl AccessBackend for FakeBackend {
    async fn open_door(&self) -> Result<ActionReply> {
        self.door_calls.fetch_add(1, Ordering::SeqCst);
        self.door_reply.lock().unwrap().clone().ok_or_else(unreachable_error)
    }

    async fn get_users(&self) -> Result<UserListing> {
        self.users_calls.fetch_add(1, Ordering::SeqCst);
        self.users.lock().unwrap().clone().ok_or_else(unreachable_error)
    }

    async fn remove_user(&self, ra: &str) -> Result<ActionReply> {
        self.removed.lock().unwrap().push(ra.to_string());
        self.remove_reply.lock().unwrap().clone().ok_or_else(unreachable_error)
    }

    async fn register_user(&self, registration: &Registration) -> Result<ActionReply> {
        self.registered.lock().unwrap().push(registration.clone());
        self.register_reply.lock().unwrap().clone().ok_or_else(unreachable_error)
    }

    async fn last_scanned_uid(&self) -> Result<ScanReading> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        self.scans
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ScanReading::Pending))
    }
}

/// View that records everything the controller does to it.
pub struct RecordingView {
    pub has_user_list: bool,
    pub has_uid_status: bool,
    pub has_message_slot: bool,
    pub has_login_error_slot: bool,
    pub confirm_answer: bool,
    pub notifications: Mutex<Vec<String>>,
    pub prompts: Mutex<Vec<String>>,
    pub table: Mutex<Option<UserTable>>,
    pub uid_status: Mutex<String>,
    pub form: Mutex<Registration>,
    pub message: Mutex<Option<(MessageKind, String)>>,
    pub login_error: Mutex<Option<String>>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            has_user_list: true,
            has_uid_status: true,
            has_message_slot: true,
            has_login_error_slot: false,
            confirm_answer: true,
            notifications: Mutex::default(),
            prompts: Mutex::default(),
            table: Mutex::default(),
            uid_status: Mutex::default(),
            form: Mutex::default(),
            message: Mutex::default(),
            login_error: Mutex::default(),
        }
    }
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(self, ra: &str, name: &str, uid: &str) -> Self {
        *self.form.lock().unwrap() = Registration::new(ra, name, uid);
        self
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn table(&self) -> Option<UserTable> {
        self.table.lock().unwrap().clone()
    }

    pub fn uid_status(&self) -> String {
        self.uid_status.lock().unwrap().clone()
    }

    pub fn form(&self) -> Registration {
        self.form.lock().unwrap().clone()
    }

    pub fn message(&self) -> Option<(MessageKind, String)> {
        self.message.lock().unwrap().clone()
    }
}

impl AdminView for RecordingView {
    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.confirm_answer
    }

    fn render_users(&self, table: &UserTable) {
        *self.table.lock().unwrap() = Some(table.clone());
    }

    fn set_uid_status(&self, text: &str) {
        *self.uid_status.lock().unwrap() = text.to_string();
    }

    fn set_uid_field(&self, uid: &str) {
        self.form.lock().unwrap().uid = uid.to_string();
    }

    fn registration_form(&self) -> Registration {
        self.form()
    }

    fn clear_registration_form(&self) {
        *self.form.lock().unwrap() = Registration::default();
    }

    fn show_message(&self, kind: MessageKind, text: &str) {
        *self.message.lock().unwrap() = Some((kind, text.to_string()));
    }

    fn show_login_error(&self, text: &str) {
        *self.login_error.lock().unwrap() = Some(text.to_string());
    }

    fn has_user_list(&self) -> bool {
        self.has_user_list
    }

    fn has_uid_status(&self) -> bool {
        self.has_uid_status
    }

    fn has_message_slot(&self) -> bool {
        self.has_message_slot
    }

    fn has_login_error_slot(&self) -> bool {
        self.has_login_error_slot
    }
}
