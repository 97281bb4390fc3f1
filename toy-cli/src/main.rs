//! Toy CSS CLI - stylesheet and cascade debugging tool
//!
//! Usage:
//!   toy tokens <CSS_FILE>                         Show CSS tokens
//!   toy parse <CSS_FILE> [--json] [--sorted]      Show parsed rules
//!   toy style --css <CSS_FILE> --dom <DOM_JSON>   Show the styled tree

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use toy_common::warning::warn_once;
use toy_css::tokenizer::CSSTokenizer;
use toy_css::{StyledNode, Stylesheet, build_styled_tree, parse, sort_by_specificity};
use toy_dom::{ToyNode, ToyNodeType};

/// Toy CSS - inspect the tokenizer, parser and cascade
#[derive(Parser, Debug)]
#[command(name = "toy")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Show the token stream of a stylesheet
    toy tokens style.css

    # Show parsed rules, in specificity order
    toy parse style.css --sorted

    # Parse inline CSS and dump it as JSON
    toy parse --css-text 'h1, .foo { color: red }' --json

    # Style a document tree
    toy style --css style.css --dom page.json

    # Style an inline tree
    toy style --css-text 'p { color: red }' --dom-text '{"nodeType": {"tagName": "p"}}'
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream of a stylesheet
    Tokens(CssSource),

    /// Parse a stylesheet and print its rules
    Parse {
        #[command(flatten)]
        css: CssSource,

        /// Print the stylesheet as JSON
        #[arg(long)]
        json: bool,

        /// Print one rule per selector, in specificity order
        #[arg(long)]
        sorted: bool,
    },

    /// Build and print the styled tree for a document
    Style {
        /// Path to the stylesheet
        #[arg(long, value_name = "CSS_FILE", required_unless_present = "css_text")]
        css: Option<PathBuf>,

        /// Stylesheet source given inline
        #[arg(long, value_name = "CSS", conflicts_with = "css")]
        css_text: Option<String>,

        /// Path to the document tree as JSON
        #[arg(long, value_name = "DOM_JSON", required_unless_present = "dom_text")]
        dom: Option<PathBuf>,

        /// Document tree JSON given inline
        #[arg(long, value_name = "JSON", conflicts_with = "dom")]
        dom_text: Option<String>,

        /// Print the styled tree as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A stylesheet given as a file or inline.
#[derive(Args, Debug)]
struct CssSource {
    /// Path to the stylesheet
    #[arg(value_name = "CSS_FILE", required_unless_present = "css_text")]
    file: Option<PathBuf>,

    /// Stylesheet source given inline
    #[arg(long, value_name = "CSS", conflicts_with = "file")]
    css_text: Option<String>,
}

impl CssSource {
    fn read(self) -> Result<String> {
        read_source(self.file.as_deref(), self.css_text)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Tokens(css) => print_tokens(&css.read()?),
        Command::Parse { css, json, sorted } => {
            let mut stylesheet = parse_css(&css.read()?)?;
            if sorted {
                stylesheet = sort_by_specificity(&stylesheet);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&stylesheet)?);
            } else {
                print_rules(&stylesheet);
            }
        }
        Command::Style {
            css,
            css_text,
            dom,
            dom_text,
            json,
        } => {
            let stylesheet = parse_css(&read_source(css.as_deref(), css_text)?)?;
            let dom_json = read_source(dom.as_deref(), dom_text)?;
            let root = ToyNode::from_json(&dom_json).context("failed to load document tree")?;

            if stylesheet.rules.is_empty() {
                warn_once("CLI", "stylesheet has no rules; every node will be unstyled");
            }

            let styled = build_styled_tree(&root, &stylesheet);
            if json {
                println!("{}", serde_json::to_string_pretty(&styled)?);
            } else {
                println!(
                    "=== Styled Tree ({} nodes, {} rules) ===",
                    root.node_count(),
                    stylesheet.rules.len()
                );
                print_styled_tree(&styled, 0);
            }
        }
    }

    Ok(())
}

/// Inline text wins over a path; clap rejects giving both.
fn read_source(path: Option<&Path>, inline: Option<String>) -> Result<String> {
    match (path, inline) {
        (_, Some(text)) => Ok(text),
        (Some(path), None) => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        (None, None) => bail!("no input given"),
    }
}

fn parse_css(source: &str) -> Result<Stylesheet> {
    parse(source).context("failed to parse stylesheet")
}

fn print_tokens(source: &str) {
    let mut tokenizer = CSSTokenizer::new(source);
    tokenizer.run();
    let tokens = tokenizer.tokens();

    println!("=== CSS Tokens ({}) ===", tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let at = format!("{}:{}", token.position.line, token.position.column);
        println!("  {i:3}: {:>7}  {}", at.dimmed(), token.token);
    }
}

fn print_rules(stylesheet: &Stylesheet) {
    println!(
        "=== CSS Rules ({}, {} declarations) ===",
        stylesheet.rules.len(),
        stylesheet.declaration_count()
    );
    for (i, rule) in stylesheet.rules.iter().enumerate() {
        let selectors: Vec<String> = rule.selectors.iter().map(ToString::to_string).collect();
        println!(
            "  Rule {i}: {} {{ {} declarations }}",
            selectors.join(", ").cyan(),
            rule.declarations.len()
        );
        for decl in &rule.declarations {
            println!("    {}: {}", decl.name.green(), decl.value);
        }
    }
}

fn print_styled_tree(node: &StyledNode<'_>, depth: usize) {
    let indent = "  ".repeat(depth);

    match node.node() {
        ToyNodeType::Element(data) => {
            let mut attrs = String::new();
            if let Some(id) = data.id() {
                attrs.push_str(" id=\"");
                attrs.push_str(id);
                attrs.push('"');
            }
            if let Some(class) = data.attributes.get("class") {
                attrs.push_str(" class=\"");
                attrs.push_str(class);
                attrs.push('"');
            }
            let tag = format!("<{}{attrs}>", data.tag_name);
            println!("{indent}{} {}", tag.cyan(), format!("[{}]", node.display()).dimmed());

            let mut values: Vec<_> = node.specific_values().iter().collect();
            values.sort_by_key(|(name, _)| *name);
            for (name, value) in values {
                println!("{indent}  {}: {value}", name.green());
            }
        }
        ToyNodeType::Text(text) => {
            let text = text.trim();
            if !text.is_empty() {
                println!("{indent}{text:?}");
            }
        }
    }

    for child in node.children() {
        print_styled_tree(child, depth + 1);
    }
}
