//! What each CLI subcommand does with the admin controller.

use crate::terminal::TerminalView;
use anyhow::{bail, Result};
use modulock_admin::{
    messages, AdminController, AdminView, PageContext, RegisterOutcome, RemoveOutcome,
};
use modulock_core::AccessBackend;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Controller rendering to a terminal
pub type TerminalController<B, R, W> = AdminController<B, TerminalView<R, W>>;

/// How often a waiting command checks whether polling has finished
const SCAN_CHECK: Duration = Duration::from_millis(100);

/// Inputs of the `register` command.
#[derive(Debug, Clone, Default)]
pub struct RegisterArgs {
    pub ra: Option<String>,
    pub name: Option<String>,
    pub uid: Option<String>,
    pub continuous: bool,
}

pub async fn open_door<B, R, W>(controller: &TerminalController<B, R, W>) -> Result<()>
where
    B: AccessBackend + 'static,
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    match controller.open_door().await {
        Some(reply) if reply.success => Ok(()),
        Some(reply) => bail!("door controller refused the request (status {})", reply.status),
        None => bail!("door controller unreachable"),
    }
}

pub async fn list_users<B, R, W>(controller: &TerminalController<B, R, W>) -> Result<()>
where
    B: AccessBackend + 'static,
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    let table = controller.get_users().await;
    if table.notice_text() == Some(messages::USERS_FAILED) {
        bail!("could not load users");
    }
    Ok(())
}

pub async fn remove_user<B, R, W>(controller: &TerminalController<B, R, W>, ra: &str) -> Result<()>
where
    B: AccessBackend + 'static,
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    match controller.remove_user(ra).await {
        RemoveOutcome::Cancelled => Ok(()),
        RemoveOutcome::Replied(reply) if reply.success => Ok(()),
        RemoveOutcome::Replied(reply) => {
            bail!("door controller refused the removal (status {})", reply.status)
        }
        RemoveOutcome::RequestFailed => bail!("door controller unreachable"),
    }
}

/// Load the page with its users table.
pub async fn dashboard<B, R, W>(controller: &TerminalController<B, R, W>) -> Result<()>
where
    B: AccessBackend + 'static,
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    controller.on_load(&PageContext::new()).await;
    Ok(())
}

/// Poll until one tag is scanned and report it.
pub async fn watch<B, R, W>(
    controller: &TerminalController<B, R, W>,
    cancel: &CancellationToken,
) -> Result<()>
where
    B: AccessBackend + 'static,
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    controller.start_uid_polling();
    match wait_for_scan(controller, cancel).await {
        Some(uid) => {
            info!(uid = %uid, "Scan received");
            Ok(())
        }
        None => bail!("stopped before a tag was scanned"),
    }
}

/// Enroll one user, or keep enrolling with `continuous`.
///
/// The view must show scan status; loading it starts polling. Without a
/// `--uid` the command waits for a scan, then asks for whatever RA and
/// name were not given on the command line. Cancelling ends the command
/// at once, even while a prompt is waiting for input.
pub async fn register<B, R, W>(
    controller: &TerminalController<B, R, W>,
    args: RegisterArgs,
    cancel: &CancellationToken,
) -> Result<()>
where
    B: AccessBackend + 'static,
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    let view = controller.view();
    controller.on_load(&PageContext::new()).await;

    let mut preset_uid = args.uid;
    let mut preset_ra = args.ra;
    let mut preset_name = args.name;
    let mut enrolled = 0usize;

    loop {
        if let Some(uid) = preset_uid.take() {
            controller.stop_uid_polling();
            view.set_uid_field(&uid);
        } else if wait_for_scan(controller, cancel).await.is_none() {
            break;
        }

        let ra = match preset_ra.take() {
            Some(ra) => Some(ra),
            None => prompt(controller, "RA", cancel).await,
        };
        let Some(ra) = ra else {
            break;
        };
        let name = match preset_name.take() {
            Some(name) => Some(name),
            None => prompt(controller, "Name", cancel).await,
        };
        let Some(name) = name else {
            break;
        };
        view.set_ra(&ra);
        view.set_name(&name);

        match failure_reason(controller.register_user().await) {
            None => enrolled += 1,
            Some(reason) if !args.continuous => {
                controller.on_unload();
                bail!("{reason}");
            }
            Some(_) => controller.start_uid_polling(),
        }

        if !args.continuous {
            break;
        }
    }

    controller.on_unload();
    info!(enrolled, "Registration finished");
    Ok(())
}

/// Why a registration did not go through, for the command's exit error.
pub fn failure_reason(outcome: RegisterOutcome) -> Option<&'static str> {
    match outcome {
        RegisterOutcome::Registered => None,
        RegisterOutcome::MissingFields => Some("registration needs an RA, a name and a UID"),
        RegisterOutcome::Rejected => Some("door controller refused the registration"),
        RegisterOutcome::RequestFailed => Some("door controller unreachable"),
    }
}

/// Read one line on a blocking thread. `None` on end of input, on a read
/// error, or as soon as `cancel` fires.
async fn prompt<B, R, W>(
    controller: &TerminalController<B, R, W>,
    label: &'static str,
    cancel: &CancellationToken,
) -> Option<String>
where
    B: AccessBackend + 'static,
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    let view = Arc::clone(controller.view());
    let read = tokio::task::spawn_blocking(move || view.prompt(label));

    tokio::select! {
        () = cancel.cancelled() => None,
        answer = read => answer.ok().flatten(),
    }
}

/// Wait for the poller to stop. Returns the scanned UID, or `None` when
/// cancelled (polling is stopped then) or when polling ended without one.
pub async fn wait_for_scan<B, R, W>(
    controller: &TerminalController<B, R, W>,
    cancel: &CancellationToken,
) -> Option<String>
where
    B: AccessBackend + 'static,
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    loop {
        if !controller.is_polling() {
            let uid = controller.view().registration_form().uid;
            return (!uid.is_empty()).then_some(uid);
        }

        tokio::select! {
            () = cancel.cancelled() => {
                controller.on_unload();
                return None;
            }
            () = tokio::time::sleep(SCAN_CHECK) => {}
        }
    }
}
