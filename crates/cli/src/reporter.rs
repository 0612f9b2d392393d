//! Console reporter - colored demo output on stdout

use colored::Colorize;
use parabench_core::port::Reporter;

pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn heading(&self, text: &str) {
        println!();
        println!("{}", text.cyan().bold());
    }

    fn line(&self, text: &str) {
        println!("{}", text);
    }
}
