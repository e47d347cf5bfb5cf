// oplang: parse an OPLang source file and print its AST

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};

use oplang::config::{FrontendConfig, OutputFormat};
use oplang::parser::token_listing_report;
use oplang::{parse_source_with, CommentPolicy};

struct Options {
    file: PathBuf,
    config: Option<PathBuf>,
    format: Option<OutputFormat>,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} [--tokens | --json] [--config FILE] <file.op>", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tokens         Print the token listing instead of the AST");
    eprintln!("  --json           Print the AST as JSON");
    eprintln!("  --config FILE    Read settings from a JSON configuration file");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace the front end.");
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut file = None;
    let mut config = None;
    let mut format = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tokens" => format = Some(OutputFormat::Tokens),
            "--json" => format = Some(OutputFormat::Json),
            "--config" => match iter.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => bail!("--config needs a file argument"),
            },
            flag if flag.starts_with("--") => bail!("unknown option '{}'", flag),
            path => {
                if file.is_some() {
                    bail!("only one input file may be given");
                }
                file = Some(PathBuf::from(path));
            }
        }
    }

    match file {
        Some(file) => Ok(Options {
            file,
            config,
            format,
        }),
        None => bail!("no input file provided"),
    }
}

fn load_config(path: Option<&Path>) -> Result<FrontendConfig> {
    match path {
        Some(path) => FrontendConfig::load(path)
            .with_context(|| format!("loading configuration '{}'", path.display())),
        None => Ok(FrontendConfig::default()),
    }
}

/// Returns false when the source has a lexical or syntax error
fn run(options: &Options) -> Result<bool> {
    let mut config = load_config(options.config.as_deref())?;
    if let Some(format) = options.format {
        config.output.format = format;
    }

    let source = fs::read_to_string(&options.file)
        .with_context(|| format!("reading '{}'", options.file.display()))?;
    log::info!(
        "processing {} ({} bytes, unterminated comments {})",
        options.file.display(),
        source.len(),
        match config.lexer.unterminated_comment {
            CommentPolicy::Consume => "consumed",
            CommentPolicy::Reject => "rejected",
        }
    );

    if config.output.format == OutputFormat::Tokens {
        let (listing, failure) = token_listing_report(&source, config.lexer);
        println!("{}", listing);
        return Ok(failure.is_none());
    }

    let program = match parse_source_with(&source, &config.lexer) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}", err);
            return Ok(false);
        }
    };

    match config.output.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&program).context("serializing AST")?;
            println!("{}", json);
        }
        _ => println!("{}", program),
    }
    Ok(true)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("oplang");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            usage(program_name);
            process::exit(2);
        }
    };

    match run(&options) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_for(name: &str, source: &str, format: OutputFormat) -> Options {
        let file = std::env::temp_dir().join(format!("oplang-{}-{}.op", name, process::id()));
        fs::write(&file, source).unwrap();
        Options {
            file,
            config: None,
            format: Some(format),
        }
    }

    #[test]
    fn test_token_listing_fails_on_lexical_error() {
        let options = options_for("bad-tokens", "class A { int x := 1 @ }", OutputFormat::Tokens);
        assert!(!run(&options).unwrap());
    }

    #[test]
    fn test_token_listing_succeeds() {
        let options = options_for("good-tokens", "class A { int x := 1; }", OutputFormat::Tokens);
        assert!(run(&options).unwrap());
    }

    #[test]
    fn test_syntax_error_fails() {
        let options = options_for("bad-syntax", "class A { int x }", OutputFormat::Ast);
        assert!(!run(&options).unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let options = Options {
            file: PathBuf::from("does/not/exist.op"),
            config: None,
            format: None,
        };
        assert!(run(&options).is_err());
    }

    #[test]
    fn test_argument_parsing() {
        let args: Vec<String> = ["oplang", "--tokens", "prog.op"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let options = parse_args(&args).unwrap();
        assert_eq!(options.format, Some(OutputFormat::Tokens));
        assert_eq!(options.file, PathBuf::from("prog.op"));

        let args: Vec<String> = ["oplang", "a.op", "b.op"].iter().map(|s| s.to_string()).collect();
        assert!(parse_args(&args).is_err());
    }
}
