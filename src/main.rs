use clap::{CommandFactory, Parser};
use mimematch::config::Config;
use std::path::PathBuf;
use tracing::Level;

/// Find the best matched mimetype for an Accept header.
///
/// The first argument is the comma delimited Accept header, the rest are the
/// content types the server can produce. For example:
///
///     mimetype-match "text/*;q=0.3, text/html;q=0.7, text/html;level=1, text/html;level=2;q=0.4, */*;q=0.5" "text/html" "application/json" "audio/basic"
///
/// tells you that "text/html" is the best choice.
#[derive(Parser)]
#[command(name = "mimetype-match", version, verbatim_doc_comment)]
struct Cli {
    /// Accept header value
    accept: Option<String>,

    /// Content types the server can serve
    served: Vec<String>,

    /// YAML file with `served_types` and an optional `default_accept`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log negotiation decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// What the command prints on success.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// Too few arguments; show the banner and help
    Usage,
    /// The single result line
    Answer(String),
}

const NO_MATCH: &str = "No served type matches the Accept header";

fn resolve(cli: Cli) -> anyhow::Result<Outcome> {
    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let accept = cli.accept.or(cfg.default_accept);
    let mut served = cli.served;
    served.extend(cfg.served_types);

    let Some(accept) = accept.filter(|_| !served.is_empty()) else {
        return Ok(Outcome::Usage);
    };

    let line = match mimematch::get_best_match(accept.as_str(), &served)? {
        Some(best) => format!(
            "The best match is to {} with the mimetype {}",
            best.served_type(),
            best.mime_type()
        ),
        None => NO_MATCH.to_string(),
    };
    Ok(Outcome::Answer(line))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match resolve(cli)? {
        Outcome::Answer(line) => println!("{line}"),
        Outcome::Usage => {
            println!("======================================");
            println!("At least two arguments are required");
            println!("======================================");
            Cli::command().print_long_help()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "text/*;q=0.3, text/html;q=0.7, text/html;level=1, text/html;level=2;q=0.4, */*;q=0.5";

    fn run(args: &[&str]) -> anyhow::Result<Outcome> {
        let cli = Cli::try_parse_from(std::iter::once("mimetype-match").chain(args.iter().copied()))?;
        resolve(cli)
    }

    fn answer(line: &str) -> Outcome {
        Outcome::Answer(line.to_string())
    }

    fn write_config(name: &str, yaml: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "mimetype-match-{}-{}.yaml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        path
    }

    #[test]
    fn prints_best_match_line() {
        let outcome = run(&[HEADER, "text/html", "application/json", "audio/basic"]).unwrap();
        assert_eq!(
            outcome,
            answer("The best match is to text/html with the mimetype text/html")
        );
    }

    #[test]
    fn wildcard_entry_is_reported() {
        let outcome = run(&[HEADER, "text/json", "blah/blah"]).unwrap();
        assert_eq!(
            outcome,
            answer("The best match is to text/json with the mimetype text/*")
        );
    }

    #[test]
    fn too_few_arguments_show_usage() {
        assert_eq!(run(&[]).unwrap(), Outcome::Usage);
        assert_eq!(run(&[HEADER]).unwrap(), Outcome::Usage);
    }

    #[test]
    fn help_flags_are_handled_by_clap() {
        for flag in ["--help", "-h"] {
            let err = Cli::try_parse_from(["mimetype-match", flag]).err().unwrap();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn no_match_notice() {
        let outcome = run(&["text/html", "image/png", "audio/basic"]).unwrap();
        assert_eq!(outcome, answer(NO_MATCH));
    }

    #[test]
    fn malformed_header_is_an_error() {
        let err = run(&["bad", "text/html"]).unwrap_err();
        assert!(err.downcast_ref::<mimematch::InvalidMimeType>().is_some());
    }

    #[test]
    fn config_served_types_follow_arguments() {
        let path = write_config("served", "served_types:\n  - text/plain\n");
        let config = path.to_str().unwrap();

        // equal precedence, so the first served type wins
        let outcome = run(&["--config", config, "text/*", "text/html"]).unwrap();
        assert_eq!(
            outcome,
            answer("The best match is to text/html with the mimetype text/*")
        );

        // only the config supplies served types
        let outcome = run(&["--config", config, "text/*"]).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            outcome,
            answer("The best match is to text/plain with the mimetype text/*")
        );
    }

    #[test]
    fn default_accept_only_without_header_argument() {
        let path = write_config(
            "accept",
            "default_accept: application/json\nserved_types: [application/json, text/html]\n",
        );
        let config = path.to_str().unwrap();

        let from_config = run(&["--config", config]).unwrap();
        let from_args = run(&["--config", config, "text/html"]).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            from_config,
            answer("The best match is to application/json with the mimetype application/json")
        );
        assert_eq!(
            from_args,
            answer("The best match is to text/html with the mimetype text/html")
        );
    }

    #[test]
    fn missing_config_is_an_error() {
        assert!(run(&["--config", "/nonexistent/mimetype-match.yaml", "*/*", "a/b"]).is_err());
    }
}
