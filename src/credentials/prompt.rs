use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Prompt for the admin username (stdin) and password (hidden).
/// Returns `(username, password)`.
pub fn prompt_for_login() -> Result<(String, String)> {
    print!("Username: ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut username = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut username)
        .context("Failed to read username")?;
    let username = username.trim().to_string();

    if username.is_empty() {
        anyhow::bail!("Username cannot be empty");
    }

    let password = rpassword::prompt_password("Password: ")
        .context("Failed to read password from stdin")?;

    Ok((username, password))
}
