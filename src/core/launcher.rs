//! Hands files and links to the platform's default opener.

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use log::{debug, info, warn};

fn opener(target: &OsStr) -> Command {
    if cfg!(target_os = "windows") {
        // Not `cmd /C start`: cmd would split URLs on `&`.
        let mut cmd = Command::new("rundll32");
        cmd.arg("url.dll,FileProtocolHandler").arg(target);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    }
}

/// Opens a URL or a local path without waiting for the viewer to exit.
///
/// Output is discarded so the viewer can't scribble over the TUI. The child
/// is reaped on a detached thread.
pub fn open(target: &OsStr) -> io::Result<()> {
    let shown = Path::new(target).display();
    let result = opener(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match result {
        Ok(mut child) => {
            info!("Opened {}", shown);
            thread::spawn(move || match child.wait() {
                Ok(status) => debug!("Opener exited with {}", status),
                Err(e) => debug!("Could not wait for opener: {}", e),
            });
            Ok(())
        }
        Err(e) => {
            warn!("Could not open {}: {}", shown, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_passed_as_one_argument() {
        let url = "https://example.com/search?q=necta&year=2020";
        let cmd = opener(OsStr::new(url));
        let last = cmd.get_args().last().unwrap();
        assert_eq!(last, url);
        assert_ne!(cmd.get_program(), "cmd");
    }
}
