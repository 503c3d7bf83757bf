//! `bhasha token` -- manage the stored bearer token.
//!
//! # Examples
//!
//! ```text
//! bhasha token set eyJhbGciOi...
//! bhasha token set            # prompts without echo
//! bhasha token show
//! bhasha token status
//! bhasha token clear
//! ```

use std::io::{self, Write};

use bhasha_client::CredentialStore;

/// Store a token, prompting for it when not given on the command line.
pub fn token_set(creds: &CredentialStore, token: Option<String>) -> anyhow::Result<()> {
    let token = match token {
        Some(t) => t,
        None => {
            print!("Authorization token: ");
            io::stdout().flush()?;
            rpassword::read_password().unwrap_or_default()
        }
    };

    creds.set(&token)?;
    println!("Token saved.");
    Ok(())
}

pub fn token_show(creds: &CredentialStore, reveal: bool) {
    let token = creds.token();
    if token.is_empty() {
        println!("No token set.");
    } else if reveal {
        println!("{}", token.expose());
    } else {
        println!("{}", token.masked());
    }
}

pub fn token_clear(creds: &CredentialStore) {
    creds.clear();
    println!("Token cleared.");
}

pub fn token_status(creds: &CredentialStore) {
    if creds.is_set() {
        println!("Token: set");
    } else {
        println!("Token: not set (run `bhasha token set`)");
    }
}
