use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn init(quiet: bool, verbose: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
    VERBOSE.store(verbose, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {}", "ℹ".blue(), message);
    }
}

pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green().bold(), message.green());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet() {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_header(message: &str) {
    if !is_quiet() {
        println!("\n{}", message.bold().cyan());
        println!("{}", "─".repeat(message.chars().count()).cyan());
    }
}

pub fn print_verbose(message: &str) {
    if is_verbose() && !is_quiet() {
        println!("  {}", message.dimmed());
    }
}

pub fn print_separator() {
    if !is_quiet() {
        println!("{}", "=".repeat(60).dimmed());
    }
}

/// Barra de progresso para consultas em lote; oculta no modo silencioso.
pub fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if is_quiet() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
        return pb;
    }

    // Template fixo; se falhar, fica o estilo padrão
    if let Ok(style) = ProgressStyle::default_bar()
        .template("  [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
