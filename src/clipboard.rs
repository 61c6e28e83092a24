//! Clipboard helper.
//!
//! The preferred path is the native clipboard through the `arboard` crate. On
//! some platforms, and in headless sessions, the native clipboard cannot be
//! opened; then the text is piped through a short-lived platform copy utility
//! (`pbcopy`, `clip`, `wl-copy`, `xclip`, `xsel`) instead. One-shot commands
//! use [`Clipboard::oneshot`], which puts the utilities first on X11/Wayland.
//!
//! Failures are never fatal: [`Clipboard::copy`] logs them and returns an
//! error the caller may report as a warning. [`CopiedIndicator`] tracks the
//! transient "copied" confirmation shown after a successful copy.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::error::{Error, Result};

/// How long the "copied" confirmation stays visible.
pub const COPIED_WINDOW: Duration = Duration::from_secs(2);

/// A place text can be copied to.
pub trait ClipboardBackend {
    fn name(&self) -> &'static str;

    /// Whether this backend can be used at all right now.
    fn is_available(&self) -> bool;

    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Native clipboard via `arboard`.
pub struct NativeClipboard {
    inner: Option<arboard::Clipboard>,
}

impl NativeClipboard {
    /// Open the native clipboard. An initialization failure is not an error
    /// here; the backend just reports itself unavailable.
    pub fn new() -> Self {
        match arboard::Clipboard::new() {
            Ok(ctx) => Self { inner: Some(ctx) },
            Err(e) => {
                debug!(error = %e, "native clipboard unavailable");
                Self { inner: None }
            }
        }
    }
}

impl Default for NativeClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardBackend for NativeClipboard {
    fn name(&self) -> &'static str {
        "native"
    }

    fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let ctx = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::Clipboard("clipboard init: unavailable".into()))?;
        ctx.set_text(text.to_owned())
            .map_err(|e| Error::Clipboard(format!("clipboard set: {}", e)))
    }
}

/// A copy utility that reads the text on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

/// Copy commands to try for the current platform, in order.
pub fn platform_copy_commands() -> Vec<CopyCommand> {
    if cfg!(target_os = "macos") {
        vec![CopyCommand {
            program: "pbcopy",
            args: &[],
        }]
    } else if cfg!(windows) {
        vec![CopyCommand {
            program: "clip",
            args: &[],
        }]
    } else {
        vec![
            CopyCommand {
                program: "wl-copy",
                args: &[],
            },
            CopyCommand {
                program: "xclip",
                args: &["-selection", "clipboard"],
            },
            CopyCommand {
                program: "xsel",
                args: &["--clipboard", "--input"],
            },
        ]
    }
}

/// Fallback backend: spawns a copy utility, feeds it the text and waits.
pub struct CommandClipboard {
    commands: Vec<CopyCommand>,
}

impl CommandClipboard {
    pub fn new(commands: Vec<CopyCommand>) -> Self {
        Self { commands }
    }

    fn run(cmd: &CopyCommand, text: &str) -> std::io::Result<std::process::ExitStatus> {
        let mut child = Command::new(cmd.program)
            .args(cmd.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(text.as_bytes())
        {
            drop(stdin);
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
        child.wait()
    }
}

/// Whether `program` resolves to a file on `PATH`.
fn on_path(program: &str) -> bool {
    std::env::var_os("PATH").is_some_and(|paths| {
        std::env::split_paths(&paths).any(|dir| {
            let candidate = dir.join(program);
            candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
        })
    })
}

impl Default for CommandClipboard {
    fn default() -> Self {
        Self::new(platform_copy_commands())
    }
}

impl ClipboardBackend for CommandClipboard {
    fn name(&self) -> &'static str {
        "command"
    }

    fn is_available(&self) -> bool {
        self.commands.iter().any(|cmd| on_path(cmd.program))
    }

    /// Tries each utility in turn; the last failure is returned only when
    /// none of them succeeded.
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut last_err = Error::Clipboard("no copy utility found".into());
        for cmd in &self.commands {
            match Self::run(cmd, text) {
                Ok(status) if status.success() => return Ok(()),
                Ok(status) => {
                    debug!(program = cmd.program, %status, "copy utility failed");
                    last_err = Error::Clipboard(format!("{} exited with {}", cmd.program, status));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(program = cmd.program, "copy utility not installed");
                }
                Err(e) => {
                    debug!(program = cmd.program, error = %e, "copy utility failed");
                    last_err = Error::Clipboard(format!("{}: {}", cmd.program, e));
                }
            }
        }
        Err(last_err)
    }
}

/// Primary backend plus the fallback used when the primary is unavailable.
pub struct Clipboard {
    primary: Box<dyn ClipboardBackend>,
    fallback: Box<dyn ClipboardBackend>,
}

impl Clipboard {
    pub fn new(primary: Box<dyn ClipboardBackend>, fallback: Box<dyn ClipboardBackend>) -> Self {
        Self { primary, fallback }
    }

    /// Native clipboard with the platform copy utilities as fallback.
    pub fn system() -> Self {
        Self::new(
            Box::new(NativeClipboard::new()),
            Box::new(CommandClipboard::default()),
        )
    }

    /// For a process that exits right after copying.
    ///
    /// On X11/Wayland the native clipboard contents vanish with the process
    /// that owns them, so the copy utilities (which keep serving the
    /// selection after we exit) go first there. Elsewhere this is
    /// [`Clipboard::system`].
    pub fn oneshot() -> Self {
        if cfg!(all(unix, not(target_os = "macos"))) {
            Self::new(
                Box::new(CommandClipboard::default()),
                Box::new(NativeClipboard::new()),
            )
        } else {
            Self::system()
        }
    }

    /// Names of the primary and fallback backends.
    pub fn backend_names(&self) -> (&'static str, &'static str) {
        (self.primary.name(), self.fallback.name())
    }

    /// Copy `text`.
    ///
    /// Returns `Ok(false)` without touching any backend when `text` is empty,
    /// `Ok(true)` once the text has been written. Failures are logged at
    /// `error` level before being returned.
    pub fn copy(&mut self, text: &str) -> Result<bool> {
        if text.is_empty() {
            return Ok(false);
        }
        let backend = if self.primary.is_available() {
            &mut self.primary
        } else {
            debug!(
                primary = self.primary.name(),
                fallback = self.fallback.name(),
                "primary clipboard unavailable, using fallback"
            );
            &mut self.fallback
        };
        let name = backend.name();
        match backend.write_text(text) {
            Ok(()) => {
                debug!(backend = name, bytes = text.len(), "copied to clipboard");
                Ok(true)
            }
            Err(e) => {
                error!(backend = name, error = %e, "복사 실패");
                Err(e)
            }
        }
    }
}

/// The transient "copied" confirmation.
///
/// Visibility is derived from the time of the last successful copy, so there
/// is no timer to cancel when the owner goes away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopiedIndicator {
    marked_at: Option<Instant>,
}

impl CopiedIndicator {
    pub fn mark(&mut self, now: Instant) {
        self.marked_at = Some(now);
    }

    /// True for `now` within [`COPIED_WINDOW`] of the last mark.
    pub fn is_shown(&self, now: Instant) -> bool {
        self.marked_at
            .and_then(|at| now.checked_duration_since(at))
            .is_some_and(|elapsed| elapsed < COPIED_WINDOW)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryClipboard;
    use super::*;

    #[test]
    fn clipboard_copy_no_panic() {
        // Best-effort: depends on the platform, we only check it doesn't panic.
        let _ = Clipboard::system().copy("test");
    }

    #[test]
    fn copies_through_primary_when_available() {
        let primary = MemoryClipboard::working("primary");
        let fallback = MemoryClipboard::working("fallback");
        let mut cb = Clipboard::new(Box::new(primary.clone()), Box::new(fallback.clone()));
        assert!(cb.copy("hello").unwrap());
        assert_eq!(primary.text().as_deref(), Some("hello"));
        assert_eq!(fallback.text(), None);
    }

    #[test]
    fn falls_back_when_primary_unavailable() {
        let primary = MemoryClipboard::unavailable("primary");
        let fallback = MemoryClipboard::working("fallback");
        let mut cb = Clipboard::new(Box::new(primary.clone()), Box::new(fallback.clone()));
        assert!(cb.copy("hello").unwrap());
        assert_eq!(primary.text(), None);
        assert_eq!(fallback.text().as_deref(), Some("hello"));
    }

    #[test]
    fn failure_is_returned() {
        let mut cb = Clipboard::new(
            Box::new(MemoryClipboard::failing("primary")),
            Box::new(MemoryClipboard::working("fallback")),
        );
        assert!(matches!(cb.copy("hello"), Err(Error::Clipboard(_))));
    }

    #[test]
    fn empty_text_is_a_no_op() {
        let primary = MemoryClipboard::working("primary");
        let mut cb = Clipboard::new(
            Box::new(primary.clone()),
            Box::new(MemoryClipboard::working("fallback")),
        );
        assert!(!cb.copy("").unwrap());
        assert_eq!(primary.text(), None);
    }

    #[test]
    fn missing_copy_utility_is_an_error() {
        let mut cb = CommandClipboard::new(vec![CopyCommand {
            program: "yanggang-no-such-copy-utility",
            args: &[],
        }]);
        assert!(matches!(cb.write_text("x"), Err(Error::Clipboard(_))));
        assert!(!CommandClipboard::new(Vec::new()).is_available());
    }

    #[cfg(unix)]
    #[test]
    fn failing_copy_utility_moves_on_to_the_next() {
        let mut cb = CommandClipboard::new(vec![
            CopyCommand {
                program: "false",
                args: &[],
            },
            CopyCommand {
                program: "true",
                args: &[],
            },
        ]);
        assert!(cb.write_text("x").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn last_failure_is_reported_when_every_utility_fails() {
        let mut cb = CommandClipboard::new(vec![
            CopyCommand {
                program: "yanggang-no-such-copy-utility",
                args: &[],
            },
            CopyCommand {
                program: "false",
                args: &[],
            },
        ]);
        match cb.write_text("x") {
            Err(Error::Clipboard(msg)) => assert!(msg.starts_with("false exited with")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn utility_that_ignores_stdin_is_reported() {
        // `true` exits without reading, so writing more than a pipe buffer fails.
        let mut cb = CommandClipboard::new(vec![CopyCommand {
            program: "true",
            args: &[],
        }]);
        let text = "x".repeat(1 << 20);
        match cb.write_text(&text) {
            Err(Error::Clipboard(msg)) => assert!(msg.starts_with("true: "), "{}", msg),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn availability_checks_path() {
        let present = CommandClipboard::new(vec![CopyCommand {
            program: "sh",
            args: &[],
        }]);
        assert!(present.is_available());
        let missing = CommandClipboard::new(vec![CopyCommand {
            program: "yanggang-no-such-copy-utility",
            args: &[],
        }]);
        assert!(!missing.is_available());
    }

    #[test]
    fn oneshot_prefers_copy_utilities_on_x11_and_wayland() {
        let names = Clipboard::oneshot().backend_names();
        if cfg!(all(unix, not(target_os = "macos"))) {
            assert_eq!(names, ("command", "native"));
        } else {
            assert_eq!(names, ("native", "command"));
        }
    }

    #[test]
    fn indicator_window() {
        let t0 = Instant::now();
        let mut ind = CopiedIndicator::default();
        assert!(!ind.is_shown(t0));
        ind.mark(t0);
        assert!(ind.is_shown(t0));
        assert!(ind.is_shown(t0 + Duration::from_millis(1999)));
        assert!(!ind.is_shown(t0 + COPIED_WINDOW));
        assert!(!ind.is_shown(t0 + Duration::from_secs(10)));
    }
}
