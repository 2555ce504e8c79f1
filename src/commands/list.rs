use console::style;
use miette::Result;

use scaffold::config::TemplateType;
use scaffold::template::{list_templates_for, TemplateStore};

pub fn run(store: &dyn TemplateStore, kind: Option<TemplateType>) -> Result<()> {
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => TemplateType::ALL.to_vec(),
    };

    println!(
        "{} ({})",
        style("Available templates").bold(),
        style(store.describe()).dim()
    );

    for kind in kinds {
        let rule = kind.rule();
        let names = list_templates_for(store, kind)?;

        println!("\n{}", style(kind).cyan().bold());
        if names.is_empty() {
            println!("  {}", style("(none)").dim());
        }
        for name in &names {
            if name == rule.default_template {
                println!("  {} {}", name, style("(default)").dim());
            } else {
                println!("  {name}");
            }
        }
    }

    Ok(())
}
