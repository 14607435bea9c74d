//! Quill CLI
//!
//! Dumps CSS tokens, HTML tokens or the parsed DOM tree for a file or an
//! inline string.

use std::fmt::Display;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use quill_common::warning::{clear_warnings, set_warnings_enabled};
use quill_css::CSSTokenizer;
use quill_html::{HTMLParser, HTMLTokenizer, print_tree};
use serde::Serialize;

/// Quill - inspect how CSS and HTML are tokenized and parsed
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the CSS tokens of a stylesheet
    quill css style.css

    # Tokenize inline CSS with unicode-range tokens enabled
    quill css --unicode-ranges --string '@font-face { unicode-range: U+0-7F; }'

    # Print HTML tokens as JSON
    quill html --json index.html

    # Print the DOM tree and every parse error
    quill tree --errors --string '<p>Hello<b>world'
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Silence parse warnings printed while scanning
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the CSS tokens of a stylesheet
    Css {
        #[command(flatten)]
        input: Input,

        /// Recognise unicode-range tokens such as U+0025-00FF
        #[arg(long)]
        unicode_ranges: bool,

        #[command(flatten)]
        output: Output,
    },
    /// Print the HTML tokens of a document
    Html {
        #[command(flatten)]
        input: Input,

        #[command(flatten)]
        output: Output,
    },
    /// Print the DOM tree built from a document
    Tree {
        #[command(flatten)]
        input: Input,

        /// Print tokenizer and tree construction errors after the tree
        #[arg(long)]
        errors: bool,
    },
}

#[derive(Args, Debug)]
struct Input {
    /// Path to the file to read
    #[arg(value_name = "FILE", required_unless_present = "string")]
    path: Option<PathBuf>,

    /// Read the input from this string instead of a file
    #[arg(short, long, value_name = "TEXT", conflicts_with = "path")]
    string: Option<String>,
}

impl Input {
    /// Read the input text and start a fresh warning set for it.
    fn read(&self) -> Result<String> {
        clear_warnings();
        if let Some(ref text) = self.string {
            return Ok(text.clone());
        }
        match self.path {
            Some(ref path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            None => bail!("expected a file path or --string"),
        }
    }
}

#[derive(Args, Debug)]
struct Output {
    /// Print tokens as JSON
    #[arg(long)]
    json: bool,

    /// Print collected parse errors after the tokens
    #[arg(long)]
    errors: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.quiet {
        set_warnings_enabled(false);
    }

    match cli.command {
        Command::Css {
            input,
            unicode_ranges,
            output,
        } => {
            let mut tokenizer =
                CSSTokenizer::new(input.read()?).with_unicode_ranges(unicode_ranges);
            tokenizer.run();
            print_tokens("CSS Tokens", tokenizer.tokens(), tokenizer.errors(), &output)
        }
        Command::Html { input, output } => {
            let mut tokenizer = HTMLTokenizer::new(input.read()?);
            tokenizer.run();
            print_tokens("HTML Tokens", tokenizer.tokens(), tokenizer.errors(), &output)
        }
        Command::Tree { input, errors } => {
            let outcome = HTMLParser::new(input.read()?).run_with_issues();
            println!("{}", "=== DOM Tree ===".bold());
            print_tree(&outcome.tree);
            println!("quirks mode: {}", outcome.tree.quirks_mode());
            if errors {
                print_errors("Tokenizer Errors", &outcome.tokenizer_errors);
                let issues: Vec<String> = outcome
                    .issues
                    .iter()
                    .map(|issue| format!("{} (token {})", issue.message, issue.token_index))
                    .collect();
                print_errors("Tree Construction Errors", &issues);
            }
            Ok(())
        }
    }
}

/// JSON shape of `--json --errors`.
#[derive(Serialize)]
struct TokenDump<'a, T> {
    tokens: &'a [T],
    errors: Vec<String>,
}

/// Print a token stream as text or JSON, optionally followed by its errors.
fn print_tokens<T, E>(title: &str, tokens: &[T], errors: &[E], output: &Output) -> Result<()>
where
    T: Display + Serialize,
    E: Display,
{
    if output.json {
        let text = if output.errors {
            serde_json::to_string_pretty(&TokenDump {
                tokens,
                errors: errors.iter().map(ToString::to_string).collect(),
            })
        } else {
            serde_json::to_string_pretty(tokens)
        }
        .context("failed to serialize tokens")?;
        println!("{text}");
        return Ok(());
    }

    println!("{}", format!("=== {title} ===").bold());
    for token in tokens {
        println!("{token}");
    }
    if output.errors {
        print_errors("Parse Errors", errors);
    }
    Ok(())
}

fn print_errors<E: Display>(title: &str, errors: &[E]) {
    println!("\n{}", format!("=== {title} ({}) ===", errors.len()).bold());
    for error in errors {
        println!("{}", error.red());
    }
}
