use colored::*;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use txlens::arguments;
use txlens::endpoints::Cluster;
use txlens::logger::{self, LogTag};
use txlens::transactions::{self, LogKind, TxDetails, TxStatus};

/// Main entry point for txlens
///
/// Looks up a single transaction by signature, normalizes the node response,
/// and renders the summary, account balance deltas, and classified logs.
#[tokio::main]
async fn main() {
    if arguments::is_help_requested() {
        arguments::print_help();
        return;
    }

    let Some(signature) = arguments::get_positional_arg() else {
        eprintln!("{}", "Missing transaction signature".red());
        eprintln!();
        arguments::print_help();
        std::process::exit(2);
    };

    let cluster = match arguments::get_arg_value("--cluster") {
        Some(name) => match name.parse::<Cluster>() {
            Ok(cluster) => cluster,
            Err(e) => {
                logger::error(LogTag::System, &e);
                std::process::exit(2);
            }
        },
        None => Cluster::MainnetBeta,
    };

    if !transactions::is_valid_signature(&signature) {
        logger::error(
            LogTag::System,
            "Signature is not valid base58 (expected 32-100 base58 characters)",
        );
        std::process::exit(2);
    }

    let rpc_url = arguments::get_arg_value("--rpc-url");

    match transactions::get_transaction_details(&signature, cluster, rpc_url.as_deref()).await {
        Ok(Some(details)) => {
            if arguments::has_arg("--json") {
                match serde_json::to_string_pretty(&details) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        logger::error(LogTag::System, &format!("Failed to encode JSON: {}", e));
                        std::process::exit(1);
                    }
                }
            } else {
                render_details(&details);
            }
        }
        Ok(None) => {
            logger::warning(
                LogTag::Transactions,
                "Transaction not found (it may not be confirmed yet, or the signature is unknown to this cluster)",
            );
        }
        Err(e) => {
            logger::error(LogTag::Transactions, &format!("Lookup failed: {}", e));
            std::process::exit(1);
        }
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Row for the account balance delta table
#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Account")]
    pubkey: String,
    #[tabled(rename = "Pre (lamports)")]
    pre: String,
    #[tabled(rename = "Post (lamports)")]
    post: String,
    #[tabled(rename = "Change")]
    change: String,
}

fn render_details(details: &TxDetails) {
    let summary = &details.summary;

    let status = match summary.status {
        TxStatus::Success => "success".green().bold(),
        TxStatus::Fail => "fail".red().bold(),
        TxStatus::Unknown => "unknown".yellow().bold(),
    };

    println!();
    println!("{}  {}", "Signature:".bold(), summary.signature);
    println!("{}     {}", "Status:".bold(), status);
    println!("{}       {}", "Slot:".bold(), summary.slot);
    println!(
        "{} {}",
        "Block time:".bold(),
        summary
            .block_time
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("{}        {} lamports", "Fee:".bold(), summary.fee_lamports);
    println!(
        "{}  {}",
        "Fee payer:".bold(),
        summary.fee_payer.as_deref().unwrap_or("-")
    );

    if details.accounts.is_empty() {
        println!();
        println!("{}", "No account keys resolved from this transaction".dimmed());
    } else {
        let rows: Vec<AccountRow> = details
            .accounts
            .iter()
            .enumerate()
            .map(|(index, delta)| AccountRow {
                index,
                pubkey: delta.pubkey.clone(),
                pre: format_balance(delta.pre_balance_lamports),
                post: format_balance(delta.post_balance_lamports),
                change: format_change(delta.pre_balance_lamports, delta.post_balance_lamports),
            })
            .collect();

        println!();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    if !details.logs.is_empty() {
        println!();
        println!("{}", "Logs:".bold());
        for line in &details.logs {
            match line.level {
                LogKind::Error => println!("  {}", line.text.red()),
                LogKind::Program => println!("  {}", line.text.cyan()),
                LogKind::Info => println!("  {}", line.text.normal()),
            }
        }
    }
}

fn format_balance(balance: Option<u64>) -> String {
    balance.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string())
}

fn format_change(pre: Option<u64>, post: Option<u64>) -> String {
    match (pre, post) {
        (Some(pre), Some(post)) => {
            let change = post as i128 - pre as i128;
            if change > 0 {
                format!("+{}", change)
            } else {
                change.to_string()
            }
        }
        _ => "-".to_string(),
    }
}
