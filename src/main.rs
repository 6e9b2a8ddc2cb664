use clap::Parser;
use colored::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use chatwatch::api::ApiClient;
use chatwatch::cli::{self, Args, Mode};
use chatwatch::feed::{self, FeedEvent};
use chatwatch::render;
use chatwatch::todos::TodoView;
use chatwatch::view::{ChatView, Outcome, Placeholder};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();
    let client = ApiClient::new(args.api_url.trim_end_matches('/').to_string());

    match args.mode.unwrap_or(Mode::Chat) {
        Mode::Chat => run_chat(&args, &client).await,
        Mode::Todos => run_todos(&args, &client).await,
        Mode::Ping => run_ping(&client).await,
    }
}

// -- Chat mode --------------------------------------------------------------

async fn run_chat(args: &Args, client: &ApiClient) {
    let ws_url = cli::resolve_ws_url(&args.api_url, &args.ws_url);
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(feed::run_reader(ws_url, tx));

    let mut view = ChatView::new(args.user_a, args.user_b);
    view.load(client).await;
    let mut shown = None;
    let mut printed = flush_chat(&view, 0, &mut shown);

    // Single handler loop: feed ordering is arrival ordering, and every
    // mutation of the view happens here.
    while let Some(event) = rx.recv().await {
        let FeedEvent::Message(payload) = event else {
            continue;
        };
        match view.handle_feed_event(&payload) {
            Outcome::Appended => {
                printed = flush_chat(&view, printed, &mut shown);
            }
            Outcome::NeedsResync => {
                view.load(client).await;
                printed = flush_chat(&view, printed, &mut shown);
            }
            Outcome::Ignored => {}
        }
    }
}

/// Print everything past `printed` plus any placeholder the view entered,
/// returning the new high-water mark. The terminal is append-only, so this
/// is the whole "scroll to bottom" story. `shown` remembers the placeholder
/// already on screen; repeated flushes against the same failed state print
/// it once, not once per triggering event.
fn flush_chat(view: &ChatView, printed: usize, shown: &mut Option<Placeholder>) -> usize {
    let entries = view.entries();
    let start = printed.min(entries.len());
    for entry in &entries[start..] {
        render::print_entry(entry);
    }
    if entries.len() > start {
        *shown = None;
    } else if let Some(placeholder) = placeholder_due(view.placeholder(), *shown) {
        render::print_placeholder(placeholder.text());
        *shown = Some(placeholder);
    }
    entries.len()
}

/// A placeholder is due for printing only when it differs from the one
/// already on screen.
fn placeholder_due(current: Option<Placeholder>, shown: Option<Placeholder>) -> Option<Placeholder> {
    match current {
        Some(p) if shown != Some(p) => Some(p),
        _ => None,
    }
}

// -- Todos mode -------------------------------------------------------------

async fn run_todos(args: &Args, client: &ApiClient) {
    let ws_url = cli::resolve_ws_url(&args.api_url, &args.ws_url);
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(feed::run_reader(ws_url, tx));

    let mut view = TodoView::new();
    view.apply_load(client.todos().await);
    match view.placeholder() {
        Some(text) => render::print_placeholder(text),
        None => {
            for todo in view.todos() {
                render::print_todo(todo);
            }
        }
    }

    while let Some(event) = rx.recv().await {
        let FeedEvent::Todo(payload) = event else {
            continue;
        };
        if view.ingest(&payload) {
            if let Some(todo) = view.todos().last() {
                render::print_todo(todo);
            }
        }
    }
}

// -- Ping mode --------------------------------------------------------------

async fn run_ping(client: &ApiClient) {
    match client.ping().await {
        Ok((status, body)) => {
            println!("{}", format!("HTTP {status}").green().bold());
            match serde_json::to_string_pretty(&body) {
                Ok(pretty) => println!("{pretty}"),
                Err(_) => println!("{body}"),
            }
        }
        Err(err) => {
            eprintln!("{} {err}", "ping failed:".red().bold());
            std::process::exit(1);
        }
    }
}
