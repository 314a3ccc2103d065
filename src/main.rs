#[cfg(all(feature = "line", not(feature = "tui")))]
mod line_mode;
#[cfg(feature = "tui")]
mod tui_mode;

use anyhow::Result;

fn main() -> Result<()> {
    run()
}

#[cfg(feature = "tui")]
fn run() -> Result<()> {
    tui_mode::run_tui()
}

#[cfg(all(feature = "line", not(feature = "tui")))]
fn run() -> Result<()> {
    line_mode::run_line()
}

/// Plain stdin loop when no interactive front-end is compiled in.
#[cfg(not(any(feature = "tui", feature = "line")))]
fn run() -> Result<()> {
    use studycalc::calc_engine::{evaluate_checked, format_for_display, AngleMode};
    use std::io::{self, BufRead, Write};

    println!("studycalc - type an expression, 'deg'/'rad' to switch angle mode, 'quit' to exit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut mode = AngleMode::Degrees;

    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "q" => break,
            "deg" => {
                mode = AngleMode::Degrees;
                println!("angle mode: degrees");
            }
            "rad" => {
                mode = AngleMode::Radians;
                println!("angle mode: radians");
            }
            "" => {}
            _ => match evaluate_checked(input, mode) {
                Ok(value) => println!("{}", format_for_display(value)),
                Err(failure) => println!("error: {failure}"),
            },
        }

        print!("> ");
        stdout.flush()?;
    }

    Ok(())
}
