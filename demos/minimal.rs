use anyhow::{self, Context};
use keymenu::Menu;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let mut menu = Menu::new("main");
    menu.add_option("h", "say hello", || println!("Hello!"))
        .context("Failed to add option")?;
    menu.add_option("w", "say goodbye, world", || println!("Goodbye, world!"))
        .context("Failed to add option")?;

    let end = menu.start().context("Menu session failed")?;
    println!("\nsession ended: {:?}", end);

    Ok(())
}
