use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How often the monitor re-probes the system theme.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Returns whether the system is currently in dark mode.
///
/// Probes the platform setting (registry, user defaults, or desktop
/// portal) on every call; an undeterminable theme counts as light.
pub fn is_night() -> bool {
    matches!(dark_light::detect(), dark_light::Mode::Dark)
}

/// Watches for dark/light transitions on a dedicated thread.
///
/// `changed` runs on the monitor thread with the new dark-mode state at
/// every transition. Dropping the monitor stops the thread promptly.
pub struct ThemeMonitor {
    stop: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

/// Starts a theme monitor.
pub fn monitor(changed: impl Fn(bool) + Send + 'static) -> ThemeMonitor {
    let (stop, stopped) = mpsc::channel::<()>();

    let thread = thread::spawn(move || {
        let mut last = is_night();

        loop {
            match stopped.recv_timeout(POLL_INTERVAL) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                Err(RecvTimeoutError::Timeout) => {}
            }

            let night = is_night();
            if night != last {
                last = night;
                cornice_core::log_debug!("theme changed, night={night}");
                changed(night);
            }
        }
    });

    ThemeMonitor {
        stop,
        thread: Some(thread),
    }
}

impl Drop for ThemeMonitor {
    fn drop(&mut self) {
        let _ = self.stop.send(());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_starts_and_stops_promptly() {
        let monitor = monitor(|_| {});

        // Dropping must interrupt the poll sleep, not ride it out.
        let started = std::time::Instant::now();
        drop(monitor);
        assert!(started.elapsed() < POLL_INTERVAL);
    }
}
