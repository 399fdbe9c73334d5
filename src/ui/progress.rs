use crate::ui;
use colored::Colorize;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use terminal_size::{Width, terminal_size};

/// Progress indicator for long-running operations
pub struct ProgressBar {
    total: usize,
    current: usize,
    message: String,
    start_time: Instant,
    width: usize,
    hidden: bool,
}

impl ProgressBar {
    /// Create a new progress bar; hidden in quiet mode
    pub fn new(total: usize, message: &str) -> Self {
        let term_width = terminal_size()
            .map(|(Width(w), _)| w as usize)
            .unwrap_or(80);

        Self {
            total,
            current: 0,
            message: message.to_string(),
            start_time: Instant::now(),
            // Leave room for the message, counters and ETA
            width: term_width.saturating_sub(message.len() + 30).clamp(10, 50),
            hidden: ui::is_quiet(),
        }
    }

    /// Set the current progress
    pub fn set(&mut self, value: usize) {
        self.current = value.min(self.total);
        self.draw();
    }

    /// Finish the progress bar
    pub fn finish(mut self) {
        self.draw();
        if !self.hidden {
            println!();
        }
        self.hidden = true;
    }

    fn draw(&self) {
        if self.hidden {
            return;
        }

        let percent = if self.total > 0 {
            (self.current * 100) / self.total
        } else {
            100
        };

        let filled = if self.total > 0 {
            (self.current * self.width) / self.total
        } else {
            self.width
        };

        let bar = "█".repeat(filled);
        let empty = "░".repeat(self.width.saturating_sub(filled));

        let elapsed_secs = self.start_time.elapsed().as_secs_f64();

        let eta = if self.current > 0 && elapsed_secs > 0.0 {
            let remaining = self.total.saturating_sub(self.current);
            let rate = self.current as f64 / elapsed_secs;
            Duration::from_secs_f64(remaining as f64 / rate)
        } else {
            Duration::ZERO
        };

        let eta_str = if eta.as_secs() > 0 {
            format!("{}s", eta.as_secs())
        } else {
            "--".to_string()
        };

        // Use carriage return to overwrite the line
        print!(
            "\r{} {} [{}{}] {}/{} {}% ETA: {}",
            "▸".dimmed(),
            self.message.cyan(),
            bar.green(),
            empty.dimmed(),
            self.current.to_string().bold(),
            self.total.to_string().dimmed(),
            percent.to_string().bold(),
            eta_str.dimmed()
        );

        io::stdout().flush().unwrap_or(());
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        // Interrupted runs still end the line
        if !self.hidden {
            println!();
        }
    }
}
