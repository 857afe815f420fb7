use std::io::Write;

use mailpool::config::environment::Config;
use mailpool::modules::codes::run_ticker;
use mailpool::modules::emails::model::VerifyMethod;
use mailpool::Liveness;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailpool=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load environment configuration");
    let mut app = mailpool::create_app(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("emails") => {
            match args.get(1) {
                Some(raw) => match raw.parse::<u64>() {
                    Ok(id) => app.controller.load_import(Some(id)).await,
                    Err(_) => {
                        eprintln!("import_id must be a number");
                        std::process::exit(2);
                    }
                },
                None => app.controller.load_all().await,
            }
            print_message(&app.controller);
            print_records(&app.controller);
        }
        Some("imports") => {
            app.controller.list_imports().await;
            print_message(&app.controller);
            for import in app.controller.imports() {
                let created = import
                    .created_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default();
                println!(
                    "{:>6}  {:<32} {:>6} emails  {}",
                    import.id, import.name, import.count, created
                );
            }
        }
        Some("load") => {
            let id = args.get(1).and_then(|s| s.parse::<u64>().ok());
            app.controller.load_import(id).await;
            print_message(&app.controller);
            print_records(&app.controller);
        }
        Some("upload") => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: mailpool upload <file.json>");
                std::process::exit(2);
            };
            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    eprintln!("Cannot read {}: {}", path, err);
                    std::process::exit(1);
                }
            };
            let filename = std::path::Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.clone());
            app.controller.upload(&filename, bytes).await;
            print_message(&app.controller);
            if app.controller.license_prompt_open() {
                println!("A valid license key is required. Run: mailpool check-key <key>");
            }
        }
        Some("check-key") => {
            let Some(key) = args.get(1) else {
                eprintln!("Usage: mailpool check-key <key>");
                std::process::exit(2);
            };
            app.controller.check_license(key).await;
            print_message(&app.controller);
            let license = app.controller.license();
            if license.valid {
                println!(
                    "Key accepted. Quota remaining: {}",
                    license.quota_remaining.unwrap_or(0)
                );
            }
        }
        Some("verify") => {
            let Some(method) = args.get(1).and_then(|m| m.parse::<VerifyMethod>().ok()) else {
                eprintln!("Usage: mailpool verify <smtp|api> [api_key]");
                std::process::exit(2);
            };
            let api_key = args.get(2).map(String::as_str);
            app.controller.load_all().await;
            app.controller.select_all();
            app.controller.verify(method, api_key).await;
            print_message(&app.controller);
            if app.controller.license_prompt_open() {
                println!("A valid license key is required. Run: mailpool check-key <key>");
            }
            print_records(&app.controller);
        }
        Some("totp") => {
            let Some(secret) = args.get(1) else {
                eprintln!("Usage: mailpool totp <secret> [--watch]");
                std::process::exit(2);
            };
            let watch = args.get(2).map(String::as_str) == Some("--watch");
            run_totp(&app, secret, watch).await;
        }
        _ => {
            eprintln!(
                "Usage: mailpool <command>\n\
                 \n\
                 Commands:\n\
                 \x20 emails [import_id]        list cached email records\n\
                 \x20 imports                   list saved import batches\n\
                 \x20 load <import_id>          load one saved batch\n\
                 \x20 upload <file.json>        upload a dataset file\n\
                 \x20 check-key <key>           check and store a license key\n\
                 \x20 verify <smtp|api> [key]   verify all loaded records\n\
                 \x20 totp <secret> [--watch]   show the current 2FA code"
            );
            std::process::exit(2);
        }
    }
}

async fn run_totp(app: &mailpool::App, secret: &str, watch: bool) {
    let now = chrono::Utc::now().timestamp();
    {
        let mut board = app.codes.lock().unwrap();
        board.show(0, secret, now);
        let code = board.code_for(0).unwrap_or_default();
        println!("{}  ({}s left)", code, board.seconds_remaining());
    }
    if !watch {
        return;
    }

    let liveness = Liveness::new();
    let ticker = tokio::spawn(run_ticker(app.codes.clone(), liveness.clone()));

    let codes = app.codes.clone();
    let display = async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        loop {
            interval.tick().await;
            let board = codes.lock().unwrap();
            let code = board.code_for(0).unwrap_or_default().to_string();
            let left = board.seconds_remaining();
            drop(board);
            print!("\r{}  ({:>2}s left) ", code, left);
            let _ = std::io::stdout().flush();
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            liveness.revoke();
            println!();
        }
        _ = display => {}
    }
    let _ = ticker.await;
}

fn print_message(controller: &mailpool::modules::emails::WorkflowController) {
    if let Some(message) = controller.message() {
        println!("{}", message);
    }
}

fn print_records(controller: &mailpool::modules::emails::WorkflowController) {
    for record in controller.records() {
        println!(
            "{:>6}  {:<32} {:<10} deputy={}",
            record.id, record.main, record.status, record.deputy
        );
    }
}
