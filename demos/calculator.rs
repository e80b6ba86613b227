use std::cell::Cell;

use anyhow::{self, Context};
use keymenu::{Menu, SessionEnd};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Actions are plain closures, shared state is borrowed from outside the menu
    // and follow-up input goes through a cloned handle.
    let total = Cell::new(0.0_f64);
    let steps = Cell::new(0_i64);

    let mut menu = Menu::builder()
        .prompt("calc")
        .text_width(60)
        .line_editor()
        .add("s", "show the running total", || {
            println!("total = {} after {} step(s)", total.get(), steps.get())
        })
        .build()
        .context("Failed to create menu")?;
    let handle = menu.handle();

    menu.add_option("add", "add a number to the total", {
        let handle = handle.clone();
        let (total, steps) = (&total, &steps);
        move || match handle.get_float("value: ") {
            Ok(value) => {
                total.set(total.get() + value);
                steps.set(steps.get() + 1);
                println!("total = {}", total.get());
            }
            Err(err) => println!("Error: {}", err),
        }
    })
    .context("Failed to add option")?;

    menu.add_option("mul", "multiply the total by a whole number", {
        let handle = handle.clone();
        let (total, steps) = (&total, &steps);
        move || match handle.get_int("factor: ") {
            Ok(factor) => {
                total.set(total.get() * factor as f64);
                steps.set(steps.get() + 1);
                println!("total = {}", total.get());
            }
            Err(err) => println!("Error: {}", err),
        }
    })
    .context("Failed to add option")?;

    menu.add_option("r", "reset the total to zero, forgetting every step taken so far", || {
        total.set(0.0);
        steps.set(0);
    })
    .context("Failed to add option")?;

    menu.add_option("q", "quit, asking for confirmation first", {
        let handle = handle.clone();
        move || match handle.get_string("really quit? [y/n] ") {
            Ok(answer) if answer.eq_ignore_ascii_case("y") => handle.close(),
            Ok(_) => {}
            Err(err) => println!("Error: {}", err),
        }
    })
    .context("Failed to add option")?;

    match menu.start().context("Menu session failed")? {
        SessionEnd::Interrupted => println!("CTRL-C"),
        SessionEnd::Closed | SessionEnd::EndOfInput => {}
    }
    println!("final total = {}", total.get());

    Ok(())
}
