use owo_colors::OwoColorize;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use vast::prelude::*;

//
// `let name = expr` binds, `:unset name` unbinds, `:vars` lists bindings,
// anything else is evaluated.
//
fn run_line(input: &str, vars: &mut VariableTable) -> Result<Option<String>, Error> {
    let input = input.trim();

    if let Some(binding) = input.strip_prefix("let ") {
        let Some((name, expr)) = binding.split_once('=') else {
            return Ok(Some(format!("usage: {}", "let <name> = <expr>".cyan())));
        };
        let value = vast::evaluate(expr, vars)?;
        vars.add_variable(name.trim(), value.clone())?;
        return Ok(Some(format!("{} = {value}", name.trim())));
    }

    if let Some(name) = input.strip_prefix(":unset ") {
        return Ok(Some(match vars.remove_variable(name.trim()) {
            Some(var) => format!("unset {} = {}", var.name(), var.value()),
            None => format!("{} is not bound", name.trim()),
        }));
    }

    if input == ":vars" {
        if vars.is_empty() {
            return Ok(Some(format!("{}", "no variables".dimmed())));
        }

        let lines: Vec<String> = vars
            .iter()
            .map(|var| format!("{} = {} ({})", var.name(), var.value(), var.value().kind()))
            .collect();
        return Ok(Some(lines.join("\n")));
    }

    if input.is_empty() {
        return Ok(None);
    }

    let value = vast::evaluate(input, vars)?;
    Ok(Some(format!("{value} {}", format!("({})", value.kind()).dimmed())))
}

fn main() -> Result<(), io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout().lock();
    let mut vars = VariableTable::new();

    loop {
        write!(stdout, "{} ", ">".green())?;
        stdout.flush()?;

        let Some(Ok(input)) = io::stdin().lines().next() else {
            writeln!(stdout, "{}", "exiting...".yellow())?;
            std::process::exit(0);
        };

        match run_line(&input, &mut vars) {
            Ok(Some(output)) => writeln!(stdout, "{output}")?,
            Ok(None) => {}
            Err(e) => writeln!(stdout, "{}", e.red())?,
        }
    }
}
