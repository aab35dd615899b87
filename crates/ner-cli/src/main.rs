//! NER CLI - Named entity recognition for Spanish text
//!
//! Usage:
//!   ner-cli "María García vive en Madrid"
//!   ner-cli --file noticia.txt --json
//!   echo "Pedro Sánchez visitó Barcelona" | ner-cli
//!
//! Author: hephaex@gmail.com

use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ner_core::config::{AppConfig, Backend};
use ner_core::Entity;
use ner_extractor::NerService;

const USAGE_HINT: &str = "Please provide text as argument or use --file flag";

#[derive(Parser, Debug)]
#[command(name = "ner-cli")]
#[command(about = "Named Entity Recognition CLI for Spanish text")]
#[command(long_about = "A CLI tool to perform Named Entity Recognition on Spanish text using MITIE")]
#[command(version)]
struct Cli {
    /// Text to analyze
    text: Option<String>,

    /// Path to MITIE model file (default: models/ner_model.dat)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Input file path (if not provided, reads the argument or stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long)]
    json: bool,

    /// Extraction backend (mitie or rules)
    #[arg(short, long)]
    backend: Option<Backend>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let stdin = std::io::stdin();
    let piped = !stdin.is_terminal();
    let Some(text) = read_input(&cli, piped.then_some(stdin))? else {
        println!("{USAGE_HINT}");
        return Ok(ExitCode::FAILURE);
    };

    let config = load_config(&cli)?;
    let service = NerService::from_config(&config).context("Failed to initialize NER service")?;

    let entities = service
        .extract_entities(&text)
        .context("Error extracting entities")?;

    if cli.json {
        println!("{}", render_json(&entities)?);
    } else {
        print!("{}", render_plain(&entities));
    }

    Ok(ExitCode::SUCCESS)
}

/// Environment configuration with command-line overrides applied
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if let Some(model) = &cli.model {
        config.model_path = model.clone();
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    Ok(config)
}

/// Text from `--file`, then the positional argument, then piped stdin
fn read_input(cli: &Cli, stdin: Option<impl Read>) -> anyhow::Result<Option<String>> {
    if let Some(path) = &cli.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading file {}", path.display()))?;
        return Ok(Some(text));
    }

    if let Some(text) = &cli.text {
        return Ok(Some(text.clone()));
    }

    match stdin {
        Some(mut reader) => {
            let mut text = String::new();
            reader
                .read_to_string(&mut text)
                .context("Error reading stdin")?;
            Ok((!text.trim().is_empty()).then_some(text))
        }
        None => Ok(None),
    }
}

fn render_plain(entities: &[Entity]) -> String {
    let mut out = format!("Found {} entities:\n\n", entities.len());
    for (i, entity) in entities.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}) - Score: {}\n",
            i + 1,
            entity.label,
            entity.tag,
            entity.score
        ));
    }
    out
}

fn render_json(entities: &[Entity]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(entities).context("Error marshaling JSON")
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use ner_core::EntityCategory;
    use std::io::{Cursor, Write};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ner-cli").chain(args.iter().copied())).unwrap()
    }

    fn no_stdin() -> Option<Cursor<Vec<u8>>> {
        None
    }

    #[test]
    fn test_parse_flags() {
        let cli = parse(&["-m", "/tmp/model.dat", "-j", "--backend", "rules", "hola"]);
        assert_eq!(cli.model, Some(PathBuf::from("/tmp/model.dat")));
        assert!(cli.json);
        assert_eq!(cli.backend, Some(Backend::Rules));
        assert_eq!(cli.text.as_deref(), Some("hola"));
    }

    #[test]
    fn test_invalid_backend_rejected() {
        assert!(Cli::try_parse_from(["ner-cli", "--backend", "spacy"]).is_err());
    }

    #[test]
    fn test_file_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "María García vive en Madrid").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = parse(&["--file", &path, "ignorado"]);
        let text = read_input(&cli, no_stdin()).unwrap();
        assert_eq!(text.as_deref(), Some("María García vive en Madrid"));
    }

    #[test]
    fn test_missing_file_errors() {
        let cli = parse(&["--file", "/nonexistent/texto.txt"]);
        let err = read_input(&cli, no_stdin()).unwrap_err();
        assert!(err.to_string().contains("Error reading file"));
    }

    #[test]
    fn test_argument_then_stdin() {
        let cli = parse(&["Pedro Sánchez"]);
        let stdin = Some(Cursor::new(b"desde stdin".to_vec()));
        assert_eq!(read_input(&cli, stdin).unwrap().as_deref(), Some("Pedro Sánchez"));

        let cli = parse(&[]);
        let stdin = Some(Cursor::new("Telefónica".as_bytes().to_vec()));
        assert_eq!(read_input(&cli, stdin).unwrap().as_deref(), Some("Telefónica"));
    }

    #[test]
    fn test_no_input() {
        let cli = parse(&[]);
        assert_eq!(read_input(&cli, no_stdin()).unwrap(), None);

        let blank = Some(Cursor::new(b"  \n".to_vec()));
        assert_eq!(read_input(&cli, blank).unwrap(), None);
    }

    #[test]
    fn test_model_flag_overrides_config() {
        let cli = parse(&["--model", "/opt/es.dat", "--backend", "rules"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.model_path, PathBuf::from("/opt/es.dat"));
        assert_eq!(config.backend, Backend::Rules);
    }

    #[test]
    fn test_render_plain() {
        let entities = vec![
            Entity::new(EntityCategory::Person, 0.75, "María García"),
            Entity::new(EntityCategory::Location, 0.95, "Madrid"),
        ];
        assert_eq!(
            render_plain(&entities),
            "Found 2 entities:\n\n\
             1. María García (PERSON) - Score: 0.750000\n\
             2. Madrid (LOCATION) - Score: 0.950000\n"
        );
        assert_eq!(render_plain(&[]), "Found 0 entities:\n\n");
    }

    #[test]
    fn test_render_json_indented() {
        let entities = vec![Entity::new(EntityCategory::Organization, 0.9, "Telefónica")];
        let json = render_json(&entities).unwrap();
        assert_eq!(
            json,
            "[\n  {\n    \"tag\": \"ORGANIZATION\",\n    \"score\": \"0.900000\",\n    \"label\": \"Telefónica\"\n  }\n]"
        );
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }
}
