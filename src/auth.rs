use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

const PASSWORD_ENV: &str = "PWTOKEN_PASSWORD";

pub fn read_password() -> Result<Zeroizing<String>> {
    //  PWTOKEN_PASSWORD="supersecret" pwtoken verify <TOKEN>
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    //  printf "%s\n" "$PW" | pwtoken verify <TOKEN>
    if !io::stdin().is_terminal() {
        let pw = read_stdin_line()?;
        if !pw.is_empty() {
            return Ok(pw);
        }
        bail!("No password provided");
    }

    let pw = Zeroizing::new(rpassword::prompt_password("Password: ")?);
    if pw.is_empty() {
        bail!("No password provided");
    }
    Ok(pw)
}

pub fn read_new_password_with_confirmation() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    if !io::stdin().is_terminal() {
        let pw = read_stdin_line()?;
        if pw.is_empty() {
            bail!("password cannot be empty");
        }
        return Ok(pw);
    }

    let pw1 = Zeroizing::new(rpassword::prompt_password("New password: ")?);
    let pw2 = Zeroizing::new(rpassword::prompt_password("Confirm password: ")?);

    if pw1.is_empty() {
        bail!("password cannot be empty");
    }

    if pw1 != pw2 {
        bail!("passwords do not match");
    }

    Ok(pw1)
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

fn read_stdin_line() -> Result<Zeroizing<String>> {
    let mut buf = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut buf)?;
    trim_newline(&mut buf);
    Ok(buf)
}

// only line endings; surrounding spaces are part of the password
fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
