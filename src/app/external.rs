use crate::domain::host::ExecutionSink;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, BufRead, Write};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Lets a foreground child process own stdin.
///
/// The event reader checks the gate before every read, so nothing it pulls
/// from the terminal is stolen from the child.
#[derive(Debug, Clone, Default)]
pub struct InputGate(Arc<AtomicBool>);

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs command lines in the user's shell with the TUI suspended.
pub struct TerminalShell {
    shell: String,
    gate: InputGate,
}

impl TerminalShell {
    pub fn new(shell: impl Into<String>, gate: InputGate) -> Self {
        Self {
            shell: shell.into(),
            gate,
        }
    }

    fn run(&self, line: &str) -> Result<bool> {
        // 1. Suspend TUI
        terminal::disable_raw_mode()?;
        execute!(
            io::stdout(),
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        )?;

        // 2. Run the line
        println!("$ {line}");
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(line)
            .status()
            .with_context(|| format!("Failed to start {}", self.shell))?;
        info!(shell = %self.shell, code = ?status.code(), "command finished");

        // 3. Hold the output until the user has read it
        print!("\nPress Enter to return to favcmd...");
        io::stdout().flush()?;
        let mut buf = String::new();
        io::stdin().lock().read_line(&mut buf)?;

        Ok(status.success())
    }
}

impl ExecutionSink for TerminalShell {
    fn send(&self, line: &str) -> Result<bool> {
        self.gate.pause();
        let outcome = self.run(line);

        // 4. Resume TUI, even when the run failed
        let restored = terminal::enable_raw_mode().and_then(|()| {
            execute!(
                io::stdout(),
                EnterAlternateScreen,
                EnableMouseCapture,
                cursor::Hide
            )
        });
        self.gate.resume();

        if let Err(e) = &restored {
            warn!(error = %e, "failed to restore terminal");
        }
        let success = outcome?;
        restored?;
        Ok(success)
    }
}
