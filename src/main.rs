use clap::Parser;
use routedsl::cli::Cli;
use routedsl::output::Output;
use routedsl::RoutePattern;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level())
        .with_target(false)
        .init();

    let use_color = !cli.no_color && !cli.json && atty::is(atty::Stream::Stdout);
    let mut output = Output::new(use_color);

    let pattern = match RoutePattern::compile(&cli.pattern) {
        Ok(pattern) => pattern,
        Err(e) => {
            eprintln!("error: invalid route pattern: {}", e);
            std::process::exit(2);
        }
    };

    if cli.show {
        output.print_pattern(&pattern)?;
    }

    let mut matched = 0;
    for path in &cli.paths {
        let result = pattern.eval(path);
        let resolved = match (&cli.resolve, result.values()) {
            (Some(template), Some(values)) => Some(pattern.resolve(values, template)),
            _ => None,
        };
        if result.is_match() {
            matched += 1;
        }

        if cli.json {
            output.print_json_result(path, &result, resolved.as_deref())?;
        } else {
            output.print_result(path, &result, resolved.as_deref())?;
        }
    }

    if !cli.json && cli.paths.len() > 1 {
        output.print_summary(matched, cli.paths.len())?;
    }

    std::process::exit(if matched == cli.paths.len() { 0 } else { 1 });
}
