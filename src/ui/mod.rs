use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod progress;

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed) && !is_quiet()
}

pub fn header(title: &str) {
    if is_quiet() {
        return;
    }
    println!("\n{}", title.bold().underline());
}

pub fn success(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "ℹ".blue().bold(), msg);
}

/// Detail line, only shown with `--verbose`
pub fn verbose(msg: &str) {
    if !is_verbose() {
        return;
    }
    eprintln!("{} {}", "·".dimmed(), msg.dimmed());
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

pub fn separator() {
    if is_quiet() {
        return;
    }
    println!("{}", "─".repeat(60).bright_black());
}

pub fn keyval(key: &str, val: &str) {
    if is_quiet() {
        return;
    }
    println!("{}: {}", key.bold(), val);
}

pub fn indent(msg: &str, level: usize) {
    if is_quiet() {
        return;
    }
    let spaces = " ".repeat(level * 2);
    println!("{}{}", spaces, msg);
}
