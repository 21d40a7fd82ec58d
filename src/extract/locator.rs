use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Find a working ffmpeg binary by probing an ordered, platform-specific
/// list of candidate locations with `ffmpeg -version`. The first candidate
/// that exits with status zero wins; missing or hung candidates are skipped.
/// No caching: callers invoke this at most once per job plus once at
/// startup for the availability display.
pub fn locate() -> Option<PathBuf> {
    for candidate in candidates() {
        debug!(candidate = %candidate.display(), "probing ffmpeg candidate");
        if probe(&candidate) {
            debug!(ffmpeg = %candidate.display(), "ffmpeg resolved");
            return Some(candidate);
        }
    }
    None
}

/// Platform install guidance shown when no candidate works.
pub fn install_hint() -> &'static str {
    if cfg!(target_os = "windows") {
        "Download ffmpeg.exe and place it next to the program, or install it to C:\\ffmpeg\\bin"
    } else if cfg!(target_os = "macos") {
        "Install it with: brew install ffmpeg"
    } else {
        "Install it with your package manager, e.g.: sudo apt install ffmpeg"
    }
}

#[cfg(target_os = "windows")]
fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("ffmpeg.exe"),
        PathBuf::from(r"C:\ffmpeg\bin\ffmpeg.exe"),
        PathBuf::from(r"C:\Program Files\ffmpeg\bin\ffmpeg.exe"),
        PathBuf::from(r"C:\Program Files (x86)\ffmpeg\bin\ffmpeg.exe"),
    ];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join("ffmpeg").join("ffmpeg.exe"));
    }
    if let Some(exe_dir) = current_exe_dir() {
        paths.push(exe_dir.join("ffmpeg.exe"));
    }
    paths
}

#[cfg(target_os = "macos")]
fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("ffmpeg"),
        PathBuf::from("/opt/homebrew/bin/ffmpeg"), // Apple Silicon
        PathBuf::from("/usr/local/bin/ffmpeg"),    // Intel
        PathBuf::from("/usr/bin/ffmpeg"),
    ];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join("ffmpeg").join("ffmpeg"));
    }
    if let Some(exe_dir) = current_exe_dir() {
        paths.push(exe_dir.join("ffmpeg"));
    }
    paths
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("ffmpeg"),
        PathBuf::from("/usr/bin/ffmpeg"),
        PathBuf::from("/usr/local/bin/ffmpeg"),
        PathBuf::from("/opt/ffmpeg/ffmpeg"),
    ];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join("ffmpeg").join("ffmpeg"));
    }
    if let Some(exe_dir) = current_exe_dir() {
        paths.push(exe_dir.join("ffmpeg"));
    }
    paths
}

fn current_exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
}

/// Run `<candidate> -version` bounded by PROBE_TIMEOUT. A candidate that
/// cannot be spawned or does not exit in time counts as unusable.
fn probe(candidate: &std::path::Path) -> bool {
    let child = Command::new(candidate)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(_) => return false,
    };

    let deadline = Instant::now() + PROBE_TIMEOUT;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return status.success(),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return false;
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(_) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_rejects_missing_binary() {
        assert!(!probe(std::path::Path::new(
            "/nonexistent/definitely-not-ffmpeg"
        )));
    }

    #[cfg(unix)]
    #[test]
    fn probe_accepts_zero_exit() {
        // `true` behaves like a well-mannered `-version` probe target.
        assert!(probe(std::path::Path::new("/bin/true")));
    }

    #[cfg(unix)]
    #[test]
    fn probe_rejects_nonzero_exit() {
        assert!(!probe(std::path::Path::new("/bin/false")));
    }

    #[test]
    fn install_hint_is_not_empty() {
        assert!(!install_hint().is_empty());
    }
}
