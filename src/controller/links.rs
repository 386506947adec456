//! Opening outbound links in the user's browser

use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use crate::model::{share_url, trailer_url};
use super::AppController;

/// Open a URL in the system browser (cross-platform, fire-and-forget).
///
/// With `browser` set, it is used as the opener command. Otherwise the
/// platform-default opener runs. The child's output is discarded so it
/// cannot scribble over the terminal UI.
pub(crate) fn open_url_in_browser(url: &str, browser: Option<&str>) -> std::io::Result<()> {
    fn spawn(command: &mut Command) -> std::io::Result<()> {
        spawn_reaped(command).map(|_| ())
    }

    if let Some(browser) = browser.filter(|b| !b.is_empty()) {
        return spawn(Command::new(browser).arg(url));
    }

    #[cfg(target_os = "macos")]
    {
        return spawn(Command::new("open").arg(url));
    }

    #[cfg(target_os = "linux")]
    {
        return spawn(Command::new("xdg-open").arg(url));
    }

    #[cfg(target_os = "windows")]
    {
        return spawn(Command::new("cmd").args(["/C", "start", "", url]));
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no browser opener available for this platform",
        ));
    }

    #[allow(unreachable_code)]
    Ok(())
}

/// Start `command` detached from the terminal and wait for it on a
/// background thread so the exited opener does not linger as a zombie.
fn spawn_reaped(command: &mut Command) -> std::io::Result<JoinHandle<()>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => tracing::debug!(%status, "Link opener exited"),
        Err(e) => tracing::warn!(error = %e, "Could not wait for link opener"),
    }))
}

impl AppController {
    /// Open the trailer of the movie on screen
    pub async fn open_trailer(&self) {
        let Some(card) = self.model.current_card().await else {
            return;
        };
        self.open_link(&trailer_url(&card.trailer)).await;
    }

    /// Open a tweet intent linking to the movie on screen
    pub async fn open_share(&self) {
        let Some(card) = self.model.current_card().await else {
            return;
        };
        let route = self.model.current_route().await;
        self.open_link(&share_url(&card.movie.title, &self.model.site_url, &route.path())).await;
    }

    pub async fn open_link(&self, url: &str) {
        tracing::info!(url, "Opening link");
        if let Err(e) = open_url_in_browser(url, self.model.browser.as_deref()) {
            tracing::warn!(url, error = %e, "Could not open browser");
            self.model.set_error(format!("Could not open the browser: {}", e)).await;
        }
    }
}
