use clap::Parser;

#[derive(Parser)]
#[command(
    name = "routedsl",
    about = "Compile a route pattern, match paths against it and resolve templates",
    version
)]
pub struct Cli {
    /// Route pattern, e.g. "/users/{{id int}}/{{slug string}}{{ext ext}}"
    pub pattern: String,

    /// Paths to evaluate against the pattern
    pub paths: Vec<String>,

    /// Template to resolve with the values of each matching path
    #[arg(short, long, value_name = "TEMPLATE")]
    pub resolve: Option<String>,

    /// Print the compiled pattern as JSON
    #[arg(short, long)]
    pub show: bool,

    /// Print one JSON object per path instead of colored lines
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log compile and match decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
