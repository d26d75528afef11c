use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
static VERBOSITY: Mutex<u8> = Mutex::new(1);
static QUIET: Mutex<bool> = Mutex::new(false);

/// Get the current verbosity level
/// 0 = quiet, 1 = normal, 2 = debug (-v), 3 = trace (-vv)
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(1)
}

fn set_verbosity(verbosity: u8) {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = verbosity;
    }
}

/// Whether normal user-facing output is suppressed
pub fn is_quiet() -> bool {
    QUIET.lock().ok().map(|v| *v).unwrap_or(false)
}

fn set_quiet(quiet: bool) {
    if let Ok(mut v) = QUIET.lock() {
        *v = quiet;
    }
}

/// Map the verbosity level to a `tracing` filter directive
pub fn verbosity_to_filter() -> &'static str {
    match get_verbosity() {
        0 | 1 => "warn",
        2 => "info",
        _ => "debug",
    }
}

/// Initialize the logger.
///
/// `verbose` is the number of `-v` flags; `quiet` wins over it. When
/// `log_file` is set, messages are also appended there with a timestamp.
pub fn init_with_verbosity(
    verbose: u8,
    quiet: bool,
    log_file: Option<PathBuf>,
) -> Result<(), String> {
    set_quiet(quiet);
    set_verbosity(if quiet { 0 } else { verbose.saturating_add(1) });
    set_log_file(log_file)
}

/// Start (or stop, with `None`) mirroring messages to a log file
pub fn set_log_file(log_file: Option<PathBuf>) -> Result<(), String> {
    if let Some(ref path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create log directory: {}", e))?;
        }
    }

    let mut log_file_guard = LOG_FILE
        .lock()
        .map_err(|_| "Logger state is poisoned".to_string())?;
    *log_file_guard = log_file;
    Ok(())
}

/// Write to log file
fn write_to_log(level: &str, message: &str) {
    if let Ok(log_file_guard) = LOG_FILE.lock() {
        if let Some(ref log_path) = *log_file_guard {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_path) {
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "[{}] {} {}", timestamp, level, message);
            }
        }
    }
}

/// Log an informational message (console unless quiet, always to file)
pub fn info(message: &str) {
    write_to_log("INFO", message);
    if get_verbosity() >= 1 {
        eprintln!("{}", message);
    }
}

/// Log a debug message (console with -v, always to file)
pub fn debug(message: &str) {
    write_to_log("DEBUG", message);
    if get_verbosity() >= 2 {
        eprintln!("{} {}", "DEBUG:".blue().bold(), message);
    }
}

/// Log a warning message (to both file and console)
pub fn warn(message: &str) {
    write_to_log("WARN", message);
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Log an error message (to both file and console)
pub fn error(message: &str) {
    write_to_log("ERROR", message);
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Log a success message
pub fn success(message: &str) {
    write_to_log("SUCCESS", message);
    if !is_quiet() {
        let check = "\u{2714}".green().bold();
        eprintln!("{} {}", check, message);
    }
}

/// Log a step message (console with -vv)
pub fn step(message: &str) {
    if get_verbosity() >= 3 {
        eprintln!("TRACE: {}", message);
    }
    write_to_log("STEP", message);
}

/// Get the log file path, if file logging is enabled
pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}
