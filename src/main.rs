use clap::{Args, Parser, Subcommand};
use linktree_schema::{Result, Settings, build_schema, render};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "linktree-schema")]
#[command(about = "Swagger schema generator for routed REST endpoints", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct Input {
    /// Endpoint manifest (views + endpoints).
    #[arg(long)]
    manifest: String,

    /// Swagger settings file.
    #[arg(long)]
    settings: Option<String>,

    #[arg(long)]
    title: Option<String>,

    /// Base URL the API is served under.
    #[arg(long)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the Swagger 2.0 JSON document.
    Generate {
        #[command(flatten)]
        input: Input,

        #[arg(short = 'o', long)]
        out: String,
    },

    /// Write a Swagger UI page with the document embedded.
    Ui {
        #[command(flatten)]
        input: Input,

        #[arg(short = 'o', long)]
        out: String,
    },

    /// Print the settled schema tree.
    Tree {
        #[command(flatten)]
        input: Input,
    },
}

fn load(input: Input) -> Result<(Settings, linktree_schema::SchemaDocument)> {
    let mut settings = Settings::load(input.settings.as_deref())?;
    settings.override_with(input.title, input.url);
    let doc = build_schema(&input.manifest, &settings)?;
    Ok((settings, doc))
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Generate { input, out } => {
            let (settings, doc) = load(input)?;
            let json = render::render_swagger_json(&doc, &settings)?;
            std::fs::write(&out, json)?;
            info!("wrote swagger document to {}", out);
            println!("Wrote {}", out);
        }
        Commands::Ui { input, out } => {
            let (settings, doc) = load(input)?;
            let html = render::render_swagger_ui(&doc, &settings)?;
            std::fs::write(&out, html)?;
            info!("wrote swagger UI page to {}", out);
            println!("Wrote {}", out);
        }
        Commands::Tree { input } => {
            let (_, doc) = load(input)?;
            print!("{}", doc.content.outline());
        }
    }

    Ok(())
}
