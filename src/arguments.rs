//! Centralized argument handling for txlens
//!
//! Consolidates command-line argument storage and debug flag checking so every
//! module reads flags the same way. Arguments are captured once into a global,
//! which lets tests and binaries override them without touching the process
//! environment.

use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => {
            // Fallback to env::args if mutex is poisoned
            env::args().collect()
        }
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

/// Gets the first positional (non-flag) argument after the program name
pub fn get_positional_arg() -> Option<String> {
    let args = get_cmd_args();
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            // Value-taking flags consume the following argument
            skip_next = matches!(arg.as_str(), "--cluster" | "--rpc-url");
            continue;
        }
        return Some(arg.clone());
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// RPC operations debug mode
pub fn is_debug_rpc_enabled() -> bool {
    has_arg("--debug-rpc")
}

/// Transactions module debug mode
pub fn is_debug_transactions_enabled() -> bool {
    has_arg("--debug-transactions")
}

/// Details cache debug mode
pub fn is_debug_cache_enabled() -> bool {
    has_arg("--debug-cache")
}

/// Checks if any debug mode is enabled
pub fn is_any_debug_enabled() -> bool {
    is_debug_rpc_enabled() || is_debug_transactions_enabled() || is_debug_cache_enabled()
}

/// Help request (either long or short form)
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

// =============================================================================
// HELP SYSTEM
// =============================================================================

/// Displays the help menu with all available flags and their descriptions
pub fn print_help() {
    println!("txlens - Solana transaction inspector");
    println!();
    println!("USAGE:");
    println!("    txlens <SIGNATURE> [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --cluster <NAME>          Cluster to query: mainnet-beta (default), devnet, testnet");
    println!("    --rpc-url <URL>           Explicit RPC endpoint (overrides cluster default)");
    println!("    --json                    Print the normalized transaction as JSON");
    println!("    --help, -h                Show this help message");
    println!();
    println!("DEBUG FLAGS:");
    println!("    --debug-rpc               RPC operations debug mode");
    println!("    --debug-transactions      Transactions module debug mode");
    println!("    --debug-cache             Details cache debug mode");
    println!();
    println!("EXAMPLES:");
    println!("    txlens 5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW");
    println!("    txlens <SIGNATURE> --cluster devnet");
    println!("    txlens <SIGNATURE> --rpc-url https://my-node.example.com --json");
}
