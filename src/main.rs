//! tfidf-analyzer: rank the most distinctive terms of a text corpus.

mod normalize;
mod segment;
mod storage;
mod tfidf;
mod web;

use std::fs;
use std::sync::Arc;

use clap::{Parser, Subcommand};

const DEFAULT_UPLOAD_DIR: &str = "uploads";

#[derive(Parser)]
#[command(name = "tfidf-analyzer")]
#[command(about = "Rank the most distinctive terms of a text corpus by TF-IDF")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a local text file and print the ranked terms.
    Analyze {
        /// Path of the UTF-8 text file to analyze.
        #[arg(long, short)]
        file: String,

        /// Print at most this many terms (the ranking itself caps at 50).
        #[arg(long, short, default_value_t = tfidf::TOP_TERMS)]
        top: usize,
    },

    /// Start the upload-and-analyze web UI.
    Serve {
        /// Port to listen on.
        #[arg(long, short, default_value_t = 8080)]
        port: u16,

        /// Directory for uploaded corpora (created if missing).
        #[arg(long, short, default_value = DEFAULT_UPLOAD_DIR)]
        uploads: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze { file, top } => run_analyze(&file, top)?,
        Command::Serve { port, uploads } => run_serve(port, &uploads)?,
    }
    Ok(())
}

fn run_analyze(path: &str, top: usize) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let text = fs::read_to_string(path)?;
    let analysis = tfidf::analyze(&text);
    println!(
        "{} document(s), {} ranked term(s)",
        analysis.total_docs,
        analysis.terms.len()
    );
    println!("{:<24} {:>6} {:>10}", "term", "tf", "idf");
    for score in analysis.terms.iter().take(top) {
        println!("{:<24} {:>6} {:>10.4}", score.term, score.tf, score.idf);
    }
    Ok(())
}

fn run_serve(port: u16, uploads: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let store = storage::UploadStore::open(uploads)?;
    let state: web::AppState = Arc::new(store);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let app = axum::Router::new()
            .route("/", axum::routing::get(web::index_page))
            .route("/analyze", axum::routing::post(web::analyze_handler))
            .route("/documents", axum::routing::get(web::list_documents))
            .route("/documents/:filename", axum::routing::delete(web::delete_file))
            .route("/uploads/:filename", axum::routing::get(web::download_file))
            .layer(axum::extract::DefaultBodyLimit::max(web::MAX_UPLOAD_BYTES))
            .with_state(state);

        let addr = format!("127.0.0.1:{}", port);
        tracing::info!("listening on http://{}", addr);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;
        Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
    })?;
    Ok(())
}
