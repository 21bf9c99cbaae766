use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar over `len` items, or a hidden one when the tui is disabled.
pub(crate) fn progress(len: usize, msg: String, tui: bool) -> ProgressBar {
    if !tui {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template(
            "{msg} {spinner:.magenta}\n\
            [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {human_pos}/{human_len} \
            [Rate: {per_sec:.magenta}, ETA: {eta:.blue}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    let pb = ProgressBar::new(len as u64).with_style(style);
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a boxed section title, i.e.
///
/// ```text
/// ========================================
///               SEC Tickers
/// ========================================
/// ```
pub fn banner(name: &str) {
    println!("{bar}\n{name:^40}\n{bar}", bar = "=".repeat(40));
}
