/// Camera capture via an external capture tool
///
/// The app never talks to camera hardware itself. It pre-creates a uniquely
/// named destination file and asks whichever capture tool is installed to
/// populate it, the same contract a mobile camera intent would honor.
use chrono::Local;
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task;

/// Capture tools tried in order, each invoked as `tool [args..] <file>`.
/// Tier 1: libcamera (Raspberry Pi / modern Linux)
/// Tier 2: fswebcam (generic V4L2 webcams)
/// Tier 3: imagesnap (macOS)
const CAPTURE_TOOLS: &[&[&str]] = &[
    &["libcamera-still", "-n", "-o"],
    &["fswebcam", "--no-banner", "--save"],
    &["imagesnap", "-q"],
];

/// Monotonic suffix so two captures in the same millisecond never collide
static CAPTURE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Get the app-private pictures directory
/// Returns ~/.local/share/leaf-scan/pictures on Linux
pub fn pictures_dir() -> Result<PathBuf, String> {
    let mut path = dirs_next::data_dir()
        .or_else(dirs_next::home_dir)
        .ok_or_else(|| "Could not determine a pictures directory".to_string())?;

    path.push("leaf-scan");
    path.push("pictures");

    fs::create_dir_all(&path)
        .map_err(|e| format!("Could not create {}: {}", path.display(), e))?;

    Ok(path)
}

/// Pre-create an empty, uniquely named destination file for the camera.
/// The capture tool fills it in as a side effect.
pub fn create_capture_file() -> Result<PathBuf, String> {
    let dir = pictures_dir()?;

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let n = CAPTURE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let target = dir.join(format!("JPEG_{}_{}.jpg", stamp, n));

    File::create(&target).map_err(|e| format!("Could not create a photo file: {}", e))?;

    Ok(target)
}

/// Ask the first available capture tool to photograph into `target`.
/// One attempt; any failure is surfaced to the user as-is.
pub async fn capture_to(target: PathBuf) -> Result<PathBuf, String> {
    // Spawn blocking because the capture tool runs to completion
    task::spawn_blocking(move || capture_blocking(target))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking implementation of camera capture
fn capture_blocking(target: PathBuf) -> Result<PathBuf, String> {
    for tool in CAPTURE_TOOLS {
        let run = Command::new(tool[0]).args(&tool[1..]).arg(&target).status();

        match run {
            // Tool not installed, try the next tier
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(format!("Could not launch the camera: {}", e)),
            Ok(status) if !status.success() => {
                return Err(format!("The camera exited with {}", status));
            }
            Ok(_) => {}
        }

        let written = fs::metadata(&target).map(|m| m.len() > 0).unwrap_or(false);
        if written {
            println!("📷 Captured photo: {}", target.display());
            return Ok(target);
        }
        return Err("The camera did not write a photo".to_string());
    }

    Err("No camera application is available".to_string())
}

/// Startup availability check. Logs what was found and never fails the app;
/// a missing camera only surfaces when the user actually presses Camera.
pub fn probe() {
    match pictures_dir() {
        Ok(dir) => println!("📁 Pictures directory ready: {}", dir.display()),
        Err(e) => eprintln!("⚠️  {}", e),
    }

    let camera = CAPTURE_TOOLS
        .iter()
        .find(|tool| Command::new(tool[0]).arg("--version").output().is_ok());

    match camera {
        Some(tool) => println!("📷 Camera tool found: {}", tool[0]),
        None => println!("⚠️  No camera tool found; gallery picking still works"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_files_are_created_empty_and_uniquely_named() {
        let first = create_capture_file().unwrap();
        let second = create_capture_file().unwrap();

        assert_ne!(first, second);
        for path in [&first, &second] {
            let name = path.file_name().unwrap().to_string_lossy();
            assert!(name.starts_with("JPEG_"));
            assert!(name.ends_with(".jpg"));
            assert_eq!(fs::metadata(path).unwrap().len(), 0);
        }

        fs::remove_file(first).ok();
        fs::remove_file(second).ok();
    }
}
