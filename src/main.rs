use clap::{Parser, Subcommand};
use kaodex::ai::{GenerationService, HttpGenerationService};
use kaodex::controller::{GenerationState, GeneratorControl, GeneratorMode, SiteContext};
use kaodex::{catalogue, config, filter, generate, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "kaodex")]
#[command(about = "Static site generator for a kaomoji, emoji, and symbol catalogue")]
#[command(long_about = "\
Static site generator for a kaomoji, emoji, and symbol catalogue

The datasets ship inside the binary; pass --data to override them with
your own TOML files. 'kaodex build' renders the whole site:

  dist/
  ├── index.html                 # Home: search + full catalogue
  ├── category/<slug>/           # One page per top category
  ├── kaomoji/<slug>/            # One page per item, stable slugs
  ├── emoji/  symbol/            # Flat libraries
  ├── how-to-use/
  ├── 404.html
  └── sitemap.xml

The AI subcommands (generate, variations, describe, summary, art) call an
OpenAI-compatible endpoint configured in config.toml; the API key comes
from the environment. Results are printed, never stored.

Run 'kaodex gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory with kaomoji.toml / emoji.toml / symbols.toml overrides
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Site configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the catalogue data and print an inventory
    Check,
    /// Render the full static site
    Build,
    /// Search the catalogue and print matching items as a tree
    Search {
        /// Free-text query, matched against names and values
        query: String,
    },
    /// Look an item up by its slug
    Show {
        /// Item slug, e.g. happy-1n8fk2
        slug: String,
    },
    /// Generate a new kaomoji from a description
    Generate {
        /// e.g. "a happy cat drinking coffee"
        prompt: String,
    },
    /// Generate variations of an existing kaomoji
    Variations {
        /// The kaomoji to riff on
        value: String,
    },
    /// Describe what a kaomoji means and how it's used
    Describe {
        value: String,
    },
    /// Summarize a catalogue category
    Summary {
        /// Category label or slug, e.g. "Happy & Joyful" or happy-joyful
        category: String,
    },
    /// Generate multi-line text art from a description
    Art {
        prompt: String,
        /// Line width in characters
        #[arg(long, default_value_t = 32)]
        width: usize,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let data_dir = cli.data.as_deref();

    match cli.command {
        Command::Check => {
            let dataset = catalogue::load(data_dir)?;
            output::print_check_output(&dataset);
            println!();
            println!("Catalogue is valid");
        }
        Command::Build => {
            let site_config = config::load_config(&cli.config)?;
            let dataset = catalogue::load(data_dir)?;

            println!("==> Loading catalogue");
            output::print_check_output(&dataset);

            println!("==> Generating HTML → {}", cli.output.display());
            let ctx = SiteContext::new(dataset);
            let report = generate::generate(&ctx, &site_config, &cli.output)?;
            output::print_build_output(&report, &cli.output);
        }
        Command::Search { query } => {
            let dataset = catalogue::load(data_dir)?;
            let results = filter::filter_catalogue(&dataset.catalogue, &query);
            output::print_search_results(&results, &query);
        }
        Command::Show { slug } => {
            let dataset = catalogue::load(data_dir)?;
            let ctx = SiteContext::new(dataset);
            match ctx.find_item(&slug) {
                Some(entry) => {
                    println!("{}  {}", entry.item.name, entry.item.value);
                    println!("    Category: {} › {}", entry.top_category, entry.sub_category);
                    println!("    About: {}", entry.sub_category_description);
                    println!("    Route: {}", kaodex::routes::kaomoji_detail(&entry.slug));
                }
                None => {
                    // A lookup miss is a not-found view, not a crash.
                    println!("No kaomoji found for slug {slug:?}");
                    std::process::exit(1);
                }
            }
        }
        Command::Generate { prompt } => {
            let service = ai_service(&cli.config)?;
            let mut control = GeneratorControl::new(GeneratorMode::Full);
            match control.request_generation(&service, &prompt) {
                GenerationState::Success(value) => println!("{value}"),
                GenerationState::Failed(message) => fail_generation(message),
                _ => println!("Nothing to generate: the prompt is empty."),
            }
        }
        Command::Variations { value } => {
            let service = ai_service(&cli.config)?;
            match service.generate_variations(&value) {
                Ok(variations) => {
                    for variation in variations {
                        println!("{variation}");
                    }
                }
                Err(err) => fail_generation(&err.to_string()),
            }
        }
        Command::Describe { value } => {
            let service = ai_service(&cli.config)?;
            match service.generate_description(&value) {
                Ok(description) => println!("{description}"),
                Err(err) => fail_generation(&err.to_string()),
            }
        }
        Command::Summary { category } => {
            let dataset = catalogue::load(data_dir)?;
            let ctx = SiteContext::new(dataset);
            // Resolve through the catalogue first so typos fail fast and
            // the service always sees a real category label.
            let Some((top, _)) = ctx.resolve_category(&category) else {
                println!("No category found for {category:?}");
                std::process::exit(1);
            };
            let service = ai_service(&cli.config)?;
            match service.generate_category_summary(&top.label) {
                Ok(summary) => println!("{summary}"),
                Err(err) => fail_generation(&err.to_string()),
            }
        }
        Command::Art { prompt, width } => {
            let service = ai_service(&cli.config)?;
            match service.generate_art(&prompt, width) {
                Ok(art) => println!("{art}"),
                Err(err) => fail_generation(&err.to_string()),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn ai_service(config_path: &std::path::Path) -> Result<HttpGenerationService, Box<dyn std::error::Error>> {
    let site_config = config::load_config(config_path)?;
    Ok(HttpGenerationService::new(site_config.ai)?)
}

/// Generation failures are user-visible messages with a retry affordance,
/// never stack traces.
fn fail_generation(message: &str) -> ! {
    eprintln!("Generation failed: {message}");
    eprintln!("Nothing was saved. Adjust the prompt or try again.");
    std::process::exit(1);
}
