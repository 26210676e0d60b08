//! Colored operator output. Nothing in the pipeline depends on it.

use std::fmt::Display;

use crossterm::style::{Stylize, style};

pub fn header(text: &str) {
    println!("{}", style(text).magenta().bold());
}

pub fn entry(item: impl Display) {
    println!("{}{}", style("]> ").red(), style(item).green());
}

pub fn list<I, T>(items: I)
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    for item in items {
        entry(item);
    }
}

pub fn warning(text: impl Display) {
    println!("{}", style(format!("[WARN] {text}")).yellow());
}

pub fn error(text: impl Display) {
    eprintln!("{}", style(format!("[ERROR] {text}")).red());
}
