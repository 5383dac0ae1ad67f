// SPDX-License-Identifier: MIT

//! Desktop notification dispatch.
//!
//! One platform channel is selected at process start; call sites never
//! branch on the platform. A missing or failing mechanism degrades to
//! console output and never raises.

use std::process::Command;

/// The mechanism used to deliver notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyChannel {
    /// macOS notification center via osascript.
    OsaScript,
    /// Linux desktop notifier daemon via notify-send.
    NotifySend,
    /// Windows toast via PowerShell.
    PowerShellToast,
    /// No mechanism available; print to the console.
    Console,
}

/// Notification dispatcher bound to one channel.
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    channel: NotifyChannel,
    enabled: bool,
}

impl Notifier {
    /// Select the channel for this host.
    pub fn detect(enabled: bool) -> Self {
        let channel = if !enabled {
            NotifyChannel::Console
        } else if cfg!(target_os = "macos") && which::which("osascript").is_ok() {
            NotifyChannel::OsaScript
        } else if cfg!(target_os = "linux") && which::which("notify-send").is_ok() {
            NotifyChannel::NotifySend
        } else if cfg!(target_os = "windows") && which::which("powershell").is_ok() {
            NotifyChannel::PowerShellToast
        } else {
            NotifyChannel::Console
        };

        Self { channel, enabled }
    }

    /// The selected channel.
    pub fn channel(&self) -> NotifyChannel {
        self.channel
    }

    /// Deliver one notification. Failures degrade to console output.
    pub fn send(&self, title: &str, body: &str) {
        if !self.enabled || !self.dispatch(title, body) {
            println!("{}: {}", title, body);
        }
    }

    fn dispatch(&self, title: &str, body: &str) -> bool {
        match self.channel {
            NotifyChannel::OsaScript => {
                let script = format!(
                    r#"display notification "{}" with title "{}""#,
                    body.replace('"', "\\\""),
                    title.replace('"', "\\\"")
                );
                run_quiet("osascript", &["-e", &script])
            }
            NotifyChannel::NotifySend => run_quiet("notify-send", &[title, body]),
            NotifyChannel::PowerShellToast => {
                let script = format!(
                    "New-BurntToastNotification -Text \"{}\", \"{}\"",
                    title.replace('"', "`\""),
                    body.replace('"', "`\"")
                );
                run_quiet("powershell", &["-Command", &script])
            }
            NotifyChannel::Console => false,
        }
    }
}

fn run_quiet(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_uses_console() {
        let notifier = Notifier::detect(false);
        assert_eq!(notifier.channel(), NotifyChannel::Console);
    }

    #[test]
    fn test_console_send_never_panics() {
        let notifier = Notifier::detect(false);
        notifier.send("commitgate", "hooks healthy");
    }
}
