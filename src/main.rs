use clap::{Parser, Subcommand, ValueEnum};
use imgpress::config::{self, HandlerOptions};
use imgpress::decode::{self, ParamSource};
use imgpress::engine::ImageEngine;
use imgpress::pipeline;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgpress")]
#[command(about = "Decode compact URL parameters and transform images")]
#[command(long_about = "\
Decode compact URL parameters and transform images

A single path segment packs a whole transform:

  S300x200      resize to 300x200
  Fw            encode as webp (j/p/w/g/t/a/h/r)
  Q90           encoder quality 90
  H15 / W20     height / width individually

Tokens concatenate without separators: S300x200Fw, H15W20Q90.
When a key repeats, the first occurrence wins.

The same parameters can arrive as a flat query map (f=w&q=90); pass
--from query to decode that shape.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Which input shape a params argument carries.
#[derive(Clone, Copy, ValueEnum)]
enum SourceKind {
    /// A compact path-segment string
    Route,
    /// Flat key/value pairs, `k=v` joined by `&`
    Query,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a parameter string and print the transform request as JSON
    Decode {
        /// Parameter string, e.g. "S300x200Fw" or "f=w&q=90"
        params: String,
        /// Input shape of PARAMS
        #[arg(long, value_enum, default_value = "route")]
        from: SourceKind,
    },
    /// Transform one image through the full serving pipeline
    Render {
        /// Image filename, resolved against the configured directory
        image: String,
        /// Parameter string; omit to apply configured defaults only
        params: Option<String>,
        /// Output file for the encoded result
        #[arg(short, long)]
        output: PathBuf,
        /// Handler config file (stock defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Decode { params, from } => {
            let source = match from {
                SourceKind::Route => ParamSource::Route(params),
                SourceKind::Query => ParamSource::Query(parse_query_pairs(&params)),
            };
            let request = decode::decode(&source)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Command::Render {
            image,
            params,
            output,
            config: config_path,
        } => {
            let options = match config_path {
                Some(path) => HandlerOptions::load(&path)?,
                None => HandlerOptions::default(),
            };
            let query = params.as_deref().map(parse_query_pairs).unwrap_or_default();
            let source = options.param_source(params.as_deref(), &query);

            let engine = ImageEngine::new();
            let bytes = pipeline::render(&options, &engine, &image, &source)?;
            std::fs::write(&output, &bytes)?;
            println!("{} -> {} ({} bytes)", image, output.display(), bytes.len());
        }
        Command::GenConfig => {
            print!("{}", config::STOCK_CONFIG);
        }
    }

    Ok(())
}

/// Split a `k=v&k=v` string into ordered pairs. A bare key gets an empty
/// value, matching how query strings surface missing `=`.
fn parse_query_pairs(params: &str) -> Vec<(String, String)> {
    params
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}
