use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use tubefetch::client::util::{build_filename, DEFAULT_DECIMALS};
use tubefetch::client::{
    ApiClient, ApiConfig, ClientError, FormatCategory, Orchestrator, Session,
};

#[derive(Parser, Debug)]
#[command(
    name = "tubefetch",
    version,
    about = "Terminal client for a yt-dlp extraction service"
)]
struct Args {
    /// Video page URL (prompted for when omitted)
    url: Option<String>,

    /// Base URL of the extraction service
    #[arg(long, env = "TUBEFETCH_BACKEND", default_value = "http://127.0.0.1:5000")]
    backend: String,

    /// Directory downloads are saved into (defaults to the system download dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Download a format id directly and skip the picker (e.g. "18" or "137+140")
    #[arg(short, long)]
    format: Option<String>,

    /// SOCKS5/HTTP proxy URL for backend requests
    #[arg(long)]
    proxy: Option<String>,

    /// Decimal places in the size column
    #[arg(long, default_value_t = DEFAULT_DECIMALS)]
    decimals: usize,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ClientError> {
    let api = ApiClient::new(ApiConfig {
        base_url: args.backend.clone(),
        proxy: args.proxy.clone(),
        ..ApiConfig::default()
    })?;
    let output_dir = args
        .output
        .clone()
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let orchestrator = Orchestrator::new(api, output_dir, args.decimals);
    let mut session = Session::default();

    let url = match &args.url {
        Some(url) => url.clone(),
        None => prompt("Video URL: ")?,
    };

    // Already reported here in full; exiting directly avoids a second
    // generic print from main
    if let Err(e) = orchestrator.lookup(&mut session, &url).await {
        println!("Failed to get formats: {}", e);
        std::process::exit(1);
    }
    show_lookup_result(&session);
    if session.catalog().is_empty() {
        return Ok(());
    }

    if let Some(spec) = &args.format {
        // Non-interactive path: resolve the ids against the catalog so the
        // category rules (and the extension inference) still apply
        for id in spec.split('+').filter(|id| !id.is_empty()) {
            session.toggle_id(id)?;
        }
        print_selection(&session);
        match orchestrator.download(&mut session).await {
            Ok(path) => println!("Saved to {}", path.display()),
            Err(e) => {
                report_download_error(&e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    interactive_loop(&orchestrator, &mut session).await
}

async fn interactive_loop(
    orchestrator: &Orchestrator,
    session: &mut Session,
) -> Result<(), ClientError> {
    println!("\nToggle a row by number; 'd' downloads, 'r <url>' looks up a new video, 'q' quits.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let input = line.trim();

        match input {
            "" => continue,
            "q" | "quit" => return Ok(()),
            "d" | "download" => {
                match orchestrator.download(session).await {
                    Ok(path) => println!("Saved to {}", path.display()),
                    Err(e) => report_download_error(&e),
                }
                continue;
            }
            _ => {}
        }

        if let Some(url) = input.strip_prefix("r ") {
            match orchestrator.lookup(session, url).await {
                Ok(()) => show_lookup_result(session),
                Err(e) => println!("Failed to get formats: {}", e),
            }
            continue;
        }

        match input.parse::<usize>() {
            Ok(n) if n >= 1 => {
                if session.toggle_index(n - 1).is_some() {
                    render_catalog(session);
                    print_selection(session);
                } else {
                    println!("No such row: {}", n);
                }
            }
            Ok(n) => println!("No such row: {}", n),
            Err(_) => println!("Unrecognized command: {}", input),
        }
    }
}

fn show_lookup_result(session: &Session) {
    println!("\n{}", session.title());
    if session.catalog().is_empty() {
        println!("No downloadable formats found for this video.");
    } else {
        render_catalog(session);
    }
}

/// One-way projection of the catalog plus selection marks. Redrawn in
/// full after every change; nothing is read back from the terminal.
fn render_catalog(session: &Session) {
    let catalog = session.catalog();
    let selection = session.selection();

    for category in [
        FormatCategory::Combined,
        FormatCategory::VideoOnly,
        FormatCategory::AudioOnly,
    ] {
        println!("\n{}:", category.label());
        let mut any = false;
        for (index, row) in catalog.rows().iter().enumerate() {
            if row.category != category {
                continue;
            }
            any = true;
            let mark = if selection.is_selected(&row.format_id) {
                "x"
            } else {
                " "
            };
            println!(
                "  [{}] {:>3}. {:<5} {:<12} fps {:<5} {:>10}  v:{:<15} a:{:<15} tbr {:<7} abr {:<7} vbr {:<7} {}",
                mark,
                index + 1,
                row.ext,
                row.quality,
                row.fps,
                row.size,
                row.vcodec,
                row.acodec,
                row.tbr,
                row.abr,
                row.vbr,
                row.language,
            );
        }
        if !any {
            println!("  (none)");
        }
    }
}

fn print_selection(session: &Session) {
    match session.selection().format_id() {
        Some(format_id) => {
            let filename = build_filename(
                session.title(),
                session.selection().suggested_extension(),
            );
            println!("Selected format {} -> {}", format_id, filename);
        }
        None => println!("Nothing selected."),
    }
}

fn report_download_error(e: &ClientError) {
    if e.is_validation() {
        println!("{}", e);
    } else {
        println!("Download failed: {}", e);
    }
}

fn prompt(message: &str) -> Result<String, ClientError> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
