//! Hands navigation targets to the platform opener

use anyhow::{Context, Result};
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use taab_core::Navigation;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

#[derive(Debug, Clone, Copy)]
pub struct Opener {
    print_only: bool,
}

impl Opener {
    pub fn new(print_only: bool) -> Self {
        Self { print_only }
    }

    /// The system opener decides where the page goes; `new_tab` is only
    /// reported.
    pub fn open(&self, navigation: &Navigation) -> Result<()> {
        if self.print_only {
            println!("{}", describe(navigation));
            return Ok(());
        }

        tracing::info!(url = %navigation.url, new_tab = navigation.new_tab, "Opening");
        launch(OPENER, &navigation.url)
            .with_context(|| format!("{OPENER}: failed to open {}", navigation.url))?;
        Ok(())
    }
}

/// Spawn `program url` and wait for it on a thread of its own, so the child
/// is reaped without blocking the prompt.
fn launch(program: &'static str, url: &str) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = Command::new(program)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(thread::spawn(move || {
        let status = child.wait()?;
        if !status.success() {
            tracing::debug!(program, %status, "Opener exited unsuccessfully");
        }
        Ok(status)
    }))
}

fn describe(navigation: &Navigation) -> String {
    if navigation.new_tab {
        format!("{} (new tab)", navigation.url)
    } else {
        navigation.url.clone()
    }
}
