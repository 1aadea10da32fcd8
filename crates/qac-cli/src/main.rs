use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use qac_config::Config;
use qac_engine::{
    Captions, GeneratorOptions, GeneratorRegistry, compile, dump_cst, dump_tokens, parse_file,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

/// Compile a Q&A document into an HTML page or an Anki import file.
#[derive(Debug, Parser)]
#[command(name = "qac", version, about)]
struct Cli {
    /// Document to compile
    #[arg(required_unless_present = "list_generators")]
    input: Option<PathBuf>,

    /// Output generator (see --list-generators)
    #[arg(short, long)]
    generator: Option<String>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the available generators and exit
    #[arg(long)]
    list_generators: bool,

    /// Print the token stream before compiling
    #[arg(long)]
    print_tokens: bool,

    /// Print the concrete syntax tree before compiling
    #[arg(long)]
    print_cst: bool,

    /// Only check that the document parses
    #[arg(long)]
    no_render: bool,

    /// Load MathJax from the local asset path instead of the CDN
    #[arg(long)]
    offline: bool,

    /// Caption word for chapters
    #[arg(long, value_name = "WORD")]
    chapter: Option<String>,

    /// Caption word for sections
    #[arg(long, value_name = "WORD")]
    section: Option<String>,

    /// Caption word for subsections
    #[arg(long, value_name = "WORD")]
    subsection: Option<String>,

    /// Caption word for questions
    #[arg(long, value_name = "WORD")]
    question: Option<String>,

    /// Config file to use instead of ~/.config/qac/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Config values with command-line flags applied on top.
    fn generator_options(&self, config: &Config) -> GeneratorOptions {
        let pick = |flag: &Option<String>, configured: &str| {
            flag.clone().unwrap_or_else(|| configured.to_string())
        };
        GeneratorOptions {
            captions: Captions {
                chapter: pick(&self.chapter, &config.captions.chapter),
                section: pick(&self.section, &config.captions.section),
                subsection: pick(&self.subsection, &config.captions.subsection),
                question: pick(&self.question, &config.captions.question),
            },
            offline: self.offline || config.offline,
            mathjax_path: config.mathjax_path.clone(),
        }
    }

    fn generator_name<'a>(&'a self, config: &'a Config) -> &'a str {
        self.generator.as_deref().unwrap_or(&config.generator)
    }
}

fn init_logging() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    let options = cli.generator_options(&config);

    if cli.list_generators {
        print!("{}", GeneratorRegistry::new(&options).listing());
        return Ok(());
    }

    let input = cli.input.as_deref().context("No input document given")?;

    if cli.print_tokens {
        print!("{}", dump_tokens(input)?);
    }
    if cli.print_cst {
        println!("{}", dump_cst(input)?);
    }
    if cli.no_render {
        parse_file(input)?;
        info!("{} parsed without errors", input.display());
        return Ok(());
    }

    let mut buffer = Vec::new();
    compile(input, cli.generator_name(&config), &options, &mut buffer)?;
    write_output(cli.output.as_deref(), &buffer)
}

fn write_output(output: Option<&Path>, content: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            qac_engine::io::write_file(path, content)?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse_args(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("qac").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_is_required_without_list_generators() {
        assert!(Cli::try_parse_from(["qac"]).is_err());
        assert!(Cli::try_parse_from(["qac", "--list-generators"]).is_ok());
    }

    #[test]
    fn config_values_are_used_when_no_flags_given() {
        let config = Config {
            generator: "anki".to_string(),
            offline: true,
            ..Config::default()
        };
        let cli = parse_args(&["deck.qa"]);

        let options = cli.generator_options(&config);

        assert_eq!(cli.generator_name(&config), "anki");
        assert!(options.offline);
        assert_eq!(options.captions, Captions::default());
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.captions.chapter = "Kapitel".to_string();
        let cli = parse_args(&[
            "deck.qa",
            "-g",
            "anki",
            "--chapter",
            "Teil",
            "--question",
            "Frage",
            "--offline",
        ]);

        let options = cli.generator_options(&config);

        assert_eq!(cli.generator_name(&config), "anki");
        assert_eq!(options.captions.chapter, "Teil");
        assert_eq!(options.captions.section, "Section");
        assert_eq!(options.captions.question, "Frage");
        assert!(options.offline);
        assert_eq!(options.mathjax_path, "MathJax/");
    }
}
