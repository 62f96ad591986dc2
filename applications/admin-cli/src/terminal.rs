//! Terminal rendering of the admin page.

use colored::Colorize;
use modulock_admin::{AdminView, MessageKind, TableRow, UserTable, COLUMNS};
use modulock_core::Registration;
use std::io::{self, BufRead, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Which optional page elements a command shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panels {
    pub user_list: bool,
    pub uid_status: bool,
}

impl Panels {
    pub fn dashboard() -> Self {
        Self {
            user_list: true,
            uid_status: false,
        }
    }

    pub fn registration() -> Self {
        Self {
            user_list: false,
            uid_status: true,
        }
    }
}

/// Admin page drawn as lines of text.
///
/// Prompts and confirmations read lines from `input`; everything else is
/// written to `output`. The registration inputs live here, as they would
/// in the page's form.
pub struct TerminalView<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
    form: Mutex<Registration>,
    panels: Panels,
    assume_yes: bool,
}

impl TerminalView<io::BufReader<io::Stdin>, io::Stdout> {
    pub fn stdio(panels: Panels) -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout(), panels)
    }
}

impl<R, W> TerminalView<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    pub fn new(input: R, output: W, panels: Panels) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
            form: Mutex::new(Registration::default()),
            panels,
            assume_yes: false,
        }
    }

    /// Answer every confirmation with yes.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    pub fn set_ra(&self, ra: &str) {
        lock(&self.form).ra = ra.to_string();
    }

    pub fn set_name(&self, name: &str) {
        lock(&self.form).name = name.to_string();
    }

    /// Ask for one line. `None` on end of input.
    pub fn prompt(&self, label: &str) -> Option<String> {
        self.write(&format!("{label}: "), false);
        let mut line = String::new();
        match lock(&self.input).read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input");
                None
            }
        }
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, text: &str, newline: bool) {
        let mut out = lock(&self.output);
        let result = if newline {
            writeln!(out, "{text}")
        } else {
            write!(out, "{text}").and_then(|()| out.flush())
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<R, W> AdminView for TerminalView<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn notify(&self, message: &str) {
        self.write(&format!("{} {}", "»".bold(), message), true);
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.prompt(&format!("{prompt} [y/N]"))
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    fn render_users(&self, table: &UserTable) {
        self.write(&format_table(table), true);
    }

    fn set_uid_status(&self, text: &str) {
        self.write(&text.cyan().to_string(), true);
    }

    fn set_uid_field(&self, uid: &str) {
        lock(&self.form).uid = uid.to_string();
    }

    fn registration_form(&self) -> Registration {
        lock(&self.form).clone()
    }

    fn clear_registration_form(&self) {
        *lock(&self.form) = Registration::default();
    }

    fn show_message(&self, kind: MessageKind, text: &str) {
        let line = match kind {
            MessageKind::Success => text.green().to_string(),
            MessageKind::Error => text.red().to_string(),
        };
        self.write(&line, true);
    }

    fn show_login_error(&self, text: &str) {
        self.write(&text.red().bold().to_string(), true);
    }

    fn has_user_list(&self) -> bool {
        self.panels.user_list
    }

    fn has_uid_status(&self) -> bool {
        self.panels.uid_status
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lay the table out in aligned columns.
pub fn format_table(table: &UserTable) -> String {
    if let Some(notice) = table.notice_text() {
        return notice.to_string();
    }

    let cells: Vec<[&str; 4]> = table
        .rows()
        .iter()
        .filter_map(|row| match row {
            TableRow::Header => Some(COLUMNS),
            TableRow::User { user, action } => {
                Some([user.ra.as_str(), user.name.as_str(), user.uid.as_str(), action.label()])
            }
            TableRow::Notice(_) => None,
        })
        .collect();

    let mut widths = [0usize; 4];
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    cells
        .iter()
        .map(|row| {
            row.iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
