use anyhow::{Context, Result};
use clap::Parser;
use engine::{remove_duplicates, DocId, DocumentStatus, SearchEngine};
use std::io::{self, BufRead};
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

/// Console front end: reads one line of stop words, a document count, that
/// many document lines, then a query line, and prints the ranked results.
#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Query an in-memory TF-IDF search engine from stdin", long_about = None)]
struct Args {
    /// Maximum number of results to print
    #[arg(long, default_value_t = 5)]
    limit: usize,
    /// Remove bag-of-words duplicate documents before querying
    #[arg(long, default_value_t = false)]
    dedup: bool,
    /// Print results as a JSON array instead of one row per result
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let stop_words = read_line(&mut lines).context("reading stop words")?;
    let mut engine =
        SearchEngine::from_stop_words_text(&stop_words)?.with_max_results(args.limit);

    let document_count: usize = read_line(&mut lines)
        .context("reading document count")?
        .trim()
        .parse()
        .context("parsing document count")?;
    for document_id in 0..document_count {
        let text = read_line(&mut lines)
            .with_context(|| format!("reading document {document_id}"))?;
        // Console documents carry no ratings or status of their own; a
        // single neutral rating satisfies the non-empty precondition.
        engine.add_document(document_id as DocId, &text, DocumentStatus::Actual, &[0])?;
    }

    if args.dedup {
        for document_id in remove_duplicates(&mut engine) {
            tracing::info!(document_id, "found duplicate document");
        }
    }

    let query = read_line(&mut lines).context("reading query")?;
    let start = Instant::now();
    let results = engine.find_top_documents(&query)?;
    tracing::info!(
        results = results.len(),
        took_s = start.elapsed().as_secs_f64(),
        "query complete"
    );

    if args.json {
        println!("{}", serde_json::to_string(&results)?);
    } else {
        for document in &results {
            println!(
                "{{ document_id = {}, relevance = {:.6} }}",
                document.id, document.relevance
            );
        }
    }
    Ok(())
}

fn read_line<B: BufRead>(lines: &mut io::Lines<B>) -> Result<String> {
    lines
        .next()
        .context("unexpected end of input")?
        .context("reading from stdin")
}
