//! Basic usage example for the gitcli crate
//!
//! This example demonstrates the core functionality of the git wrapper:
//! - Checking if git is installed
//! - Listing the remotes of the current directory
//! - Resolving HEAD to a commit hash
//!
//! To run this example:
//! ```sh
//! cd crates/gitcli
//! cargo run --example basic
//! ```

use gitcli::{Git, Result};

fn main() -> Result<()> {
    let git = Git::new(std::env::current_dir()?);

    if !git.is_available() {
        eprintln!("git is not installed or not in PATH.");
        return Ok(());
    }

    println!("\n=== Remotes ===");
    match git.remotes() {
        Ok(remotes) if remotes.is_empty() => println!("No remotes configured."),
        Ok(remotes) => {
            for name in remotes {
                let url = git.remote_url(&name)?;
                println!("{:<12} {}", name, url);
            }
        }
        Err(e) => eprintln!("Failed to list remotes: {}", e),
    }

    println!("\n=== HEAD ===");
    match git.rev_parse("HEAD") {
        Ok(rev) => println!("HEAD is at {}", rev),
        Err(e) => eprintln!("Failed to resolve HEAD: {}", e),
    }

    Ok(())
}
