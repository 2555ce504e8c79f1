use console::style;
use miette::Result;

use scaffold::check::check_store;
use scaffold::template::TemplateStore;

pub fn run(store: &dyn TemplateStore) -> Result<()> {
    println!(
        "{} {}",
        style("Checking templates in").bold(),
        style(store.describe()).cyan()
    );

    let result = check_store(store)?;
    println!("  Bundles: {}", result.bundle_count);

    if !result.warnings.is_empty() {
        println!("\n{}", style("Warnings:").yellow().bold());
        for w in &result.warnings {
            println!("  {} {}", style("⚠").yellow(), w);
        }
    }

    if !result.errors.is_empty() {
        println!("\n{}", style("Errors:").red().bold());
        for e in &result.errors {
            println!("  {} {}", style("✗").red(), e);
        }
        println!(
            "\n{} Template store has {} error(s)",
            style("✗").red().bold(),
            result.errors.len()
        );
        std::process::exit(1);
    } else {
        println!("\n{} Template store is valid!", style("✓").green().bold());
    }

    Ok(())
}
