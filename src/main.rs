#[tokio::main]
async fn main() {
    if let Err(err) = ticket_desk::cli::run().await {
        eprintln!("error: {err:#}");
        std::process::exit(ticket_desk::cli::exit_code_for_error(&err));
    }
}
