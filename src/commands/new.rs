use console::style;
use miette::{IntoDiagnostic, Result};

use scaffold::answers::AnswersMap;
use scaffold::config::rules::{API_VERSION_KEY, OUTPUT_DIR_KEY, TEMPLATE_KEY};
use scaffold::config::UserConfig;
use scaffold::error::ScaffoldError;
use scaffold::template::TemplateStore;
use scaffold::GenerateOptions;

use crate::cli::NewArgs;

pub fn run(store: &dyn TemplateStore, config: &UserConfig, args: NewArgs) -> Result<()> {
    let mut answers: AnswersMap = args
        .set
        .iter()
        .filter_map(|kv| {
            let (key, value) = kv.split_once('=')?;
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect();

    answers.insert(args.kind.rule().name_key.to_string(), args.name);
    if let Some(dir) = args.outputdir {
        answers.insert(OUTPUT_DIR_KEY.to_string(), dir);
    }
    if let Some(template) = args.template {
        answers.insert(TEMPLATE_KEY.to_string(), template);
    }
    if let Some(version) = args.apiversion {
        answers.insert(API_VERSION_KEY.to_string(), version);
    }

    let cwd = std::env::current_dir().map_err(|e| ScaffoldError::Io {
        context: "getting current directory".into(),
        source: e,
    })?;

    let options = GenerateOptions {
        kind: args.kind,
        answers,
        cwd,
        default_api_version: config.api_version.clone(),
        force: args.force,
    };

    if args.dry_run {
        let plan = scaffold::plan_generation(store, options)?;
        let collisions: Vec<_> = plan.render_plan.collisions(&plan.output_dir).collect();

        println!(
            "\n{} Dry run: {} from '{}' would be generated in {}",
            style("==>").cyan().bold(),
            plan.kind,
            plan.template,
            style(&plan.output_dir).cyan()
        );

        for file in plan.render_plan.files() {
            let exists = collisions.contains(&file.relative_path.as_path());
            let action = match (exists, plan.force) {
                (false, _) => style("create").green(),
                (true, true) => style("force ").yellow(),
                (true, false) => style("exists").red(),
            };
            println!("  {} {}", action, file.relative_path.display());
        }

        if !collisions.is_empty() && !plan.force {
            println!(
                "\n{} {} file(s) already exist; use --force to overwrite",
                style("warning:").yellow().bold(),
                collisions.len()
            );
        }
        println!("\n{} Dry run, no files written.", style("\u{2139}").blue().bold());
        return Ok(());
    }

    let output = scaffold::generate(store, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        return Ok(());
    }

    for line in output.raw_output.lines() {
        let (action, path) = line.split_once(' ').unwrap_or(("create", line));
        let action = if action == "force" {
            style(action).yellow()
        } else {
            style(action).green()
        };
        println!("  {} {}", action, path);
    }
    println!(
        "\n{} {} file(s) created in {}",
        style("✓").green().bold(),
        output.created.len(),
        style(&output.output_dir).cyan()
    );

    Ok(())
}
