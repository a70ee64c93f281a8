use std::{env, process::ExitCode};

use modulbank::{model::OperationHistorySearch, Client, ClientOptions};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: modulbank account-info | balance <account-id> | history <account-id> [records]";

#[derive(Debug, PartialEq)]
enum Command {
    AccountInfo,
    Balance { account_id: String },
    History { account_id: String, records: u32 },
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["account-info"] => Ok(Command::AccountInfo),
        ["balance", account_id] => Ok(Command::Balance {
            account_id: account_id.to_string(),
        }),
        ["history", account_id] => Ok(Command::History {
            account_id: account_id.to_string(),
            records: 0,
        }),
        ["history", account_id, records] => Ok(Command::History {
            account_id: account_id.to_string(),
            records: records
                .parse()
                .map_err(|_| format!("records must be a non-negative number, got {records}"))?,
        }),
        _ => Err(USAGE.to_string()),
    }
}

async fn run(client: &Client, command: Command) -> Result<String, String> {
    let timestamps = client.timestamps();
    let output = match command {
        Command::AccountInfo => {
            let companies = client.account_info().await.map_err(|err| err.to_string())?;
            let records: Vec<_> = companies.iter().map(|c| c.to_wire(timestamps)).collect();
            serde_json::to_string_pretty(&records)
        }
        Command::Balance { account_id } => {
            let balance = client
                .account_balance(&account_id)
                .await
                .map_err(|err| err.to_string())?;
            return Ok(balance.to_string());
        }
        Command::History {
            account_id,
            records,
        } => {
            let search = OperationHistorySearch::default().records(records);
            let operations = client
                .operation_history(&account_id, Some(&search))
                .await
                .map_err(|err| err.to_string())?;
            let records: Vec<_> = operations.iter().map(|o| o.to_wire(timestamps)).collect();
            serde_json::to_string_pretty(&records)
        }
    };
    output.map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };
    let options = match ClientOptions::from_env() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match run(&Client::new(options), command).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
