use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value, json};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod catalog;
mod error;
mod input;
mod mcp;
mod output;
mod paragraphs;
mod tools;

use catalog::options::{CategoryRule, ParseOptions};

const DEFAULT_OUTPUT: &str = "tools_output.json";

#[derive(Parser)]
#[command(name = "toolsheet")]
#[command(
    version,
    about = "Turn loosely formatted AI tool directory documents into structured JSON"
)]
struct Cli {
    /// Log parser decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
#[command(
    group(
        clap::ArgGroup::new("input")
            .required(true)
            .multiple(false)
            .args(["path", "base64"])
    )
)]
struct InputArgs {
    /// Path to the source document
    #[arg(long)]
    path: Option<String>,
    /// Base64-encoded document bytes
    #[arg(long)]
    base64: Option<String>,
    /// Input format override
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Auto,
    Docx,
    Hwp,
    Hwpx,
    Text,
}

impl FormatArg {
    fn as_str(self) -> &'static str {
        match self {
            FormatArg::Auto => "auto",
            FormatArg::Docx => "docx",
            FormatArg::Hwp => "hwp",
            FormatArg::Hwpx => "hwpx",
            FormatArg::Text => "text",
        }
    }
}

#[derive(Args, Clone, Default)]
struct OptionArgs {
    /// JSON file with parse options
    #[arg(long)]
    config: Option<PathBuf>,
    /// Product Type used when a record leaves it empty
    #[arg(long)]
    default_product_type: Option<String>,
    /// Category rule as KEYWORD=CATEGORY; repeat to add more, first match wins
    #[arg(long = "category-rule", value_parser = parse_category_rule)]
    category_rules: Vec<CategoryRule>,
    /// Category used when no rule matches
    #[arg(long)]
    fallback_category: Option<String>,
}

#[derive(Args, Clone)]
struct ConvertArgs {
    /// Path to the source document
    #[arg(long)]
    path: String,
    /// Destination JSON file
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: String,
    /// Input format override
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    #[command(flatten)]
    options: OptionArgs,
}

#[derive(Args, Clone)]
struct ParseArgs {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    options: OptionArgs,
    /// Output the parsed tool records as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct ParagraphsArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Parse a document and write the tool records to a JSON file
    Convert(ConvertArgs),
    /// Parse a document and print the tool records
    Parse(ParseArgs),
    /// Print the paragraphs read from a document
    Paragraphs(ParagraphsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server()
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::Convert(args) => run_convert(args),
        Commands::Parse(args) => run_parse(args),
        Commands::Paragraphs(args) => run_paragraphs(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn parse_category_rule(value: &str) -> std::result::Result<CategoryRule, String> {
    CategoryRule::parse(value).ok_or_else(|| format!("expected KEYWORD=CATEGORY, got {value:?}"))
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let mut map = Map::new();
    map.insert("path".to_string(), json!(args.path));
    if let Some(format) = args.format {
        map.insert("format".to_string(), json!(format.as_str()));
    }
    map.insert("output_path".to_string(), json!(args.output));
    map.insert("options".to_string(), build_options(&args.options)?);

    let result = tools::parse_document::call(&Value::Object(map));
    print_tool_result(result, false)
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let mut map = build_input_args(&args.input);
    map.insert("options".to_string(), build_options(&args.options)?);
    let result = tools::parse_document::call(&Value::Object(map));

    if args.json && !is_error(&result) {
        let tools = result
            .get("structuredContent")
            .and_then(|value| value.get("tools"))
            .cloned()
            .unwrap_or_else(|| json!([]));
        let rendered = serde_json::to_string_pretty(&tools).context("failed to render tools")?;
        println!("{rendered}");
        return Ok(());
    }
    print_tool_result(result, false)
}

fn run_paragraphs(args: ParagraphsArgs) -> Result<()> {
    let map = build_input_args(&args.input);
    let result = tools::extract_paragraphs::call(&Value::Object(map));
    print_tool_result(result, args.json)
}

/// Layers flags over the optional config file over the defaults.
fn build_options(args: &OptionArgs) -> Result<Value> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<ParseOptions>(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ParseOptions::default(),
    };

    if let Some(product_type) = &args.default_product_type {
        options.default_product_type = product_type.clone();
    }
    if !args.category_rules.is_empty() {
        options.category_rules = args.category_rules.clone();
    }
    if let Some(fallback) = &args.fallback_category {
        options.fallback_category = fallback.clone();
    }

    serde_json::to_value(options).context("failed to encode parse options")
}

fn build_input_args(input: &InputArgs) -> Map<String, Value> {
    let mut map = Map::new();
    if let Some(path) = &input.path {
        map.insert("path".to_string(), json!(path));
    }
    if let Some(base64) = &input.base64 {
        map.insert("base64".to_string(), json!(base64));
    }
    if let Some(format) = input.format {
        map.insert("format".to_string(), json!(format.as_str()));
    }
    map
}

fn is_error(result: &Value) -> bool {
    result
        .get("isError")
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    if is_error(&result) {
        let message = result
            .get("structuredContent")
            .and_then(|value| value.get("error"))
            .and_then(|value| value.get("message"))
            .and_then(|value| value.as_str())
            .unwrap_or("tool error");
        eprintln!("Error: {message}");
        process::exit(1);
    }

    if json_output {
        let structured = result
            .get("structuredContent")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let output = serde_json::to_string_pretty(&structured)?;
        println!("{output}");
        return Ok(());
    }

    let text = result
        .get("content")
        .and_then(|value| value.as_array())
        .and_then(|arr| arr.first())
        .and_then(|value| value.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or("");
    println!("{text}");
    Ok(())
}

fn run_stdio_server() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock().lines();
    let mut writer = io::BufWriter::new(stdout.lock());

    for line in reader {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: serde_json::Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed request");
                continue;
            }
        };

        let method = request.get("method").and_then(|value| value.as_str());
        let id = request.get("id").cloned();
        let response = match (method, id) {
            (Some("initialize"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": "2025-11-25",
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }
            })),
            (Some("tools/list"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "tools": mcp::tool_definitions()
                }
            })),
            (Some("tools/call"), Some(id)) => {
                let result = handle_tool_call(&request);
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": result
                }))
            }
            _ => None,
        };

        if let Some(response) = response {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    Ok(())
}

fn handle_tool_call(request: &serde_json::Value) -> serde_json::Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return tools::error_result(mcp::errors::INVALID_INPUT, "params must be an object", None);
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return tools::error_result(
            mcp::errors::INVALID_INPUT,
            "params.name must be a string",
            None,
        );
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    tracing::debug!(tool = name, "tools/call");
    match name {
        mcp::contracts::TOOL_PARSE_DOCUMENT => tools::parse_document::call(&args),
        mcp::contracts::TOOL_EXTRACT_PARAGRAPHS => tools::extract_paragraphs::call(&args),
        _ => tools::error_result(
            mcp::errors::INVALID_INPUT,
            format!("tool not implemented: {name}"),
            Some(name),
        ),
    }
}
