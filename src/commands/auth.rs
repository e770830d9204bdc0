use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("  Password: ")?),
    }
}

pub fn signup(ctx: &mut Context, email: &str, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let user = ctx.session.signup(email, &password)?;

    println!("{}", format!("  Signed up and logged in as {}", user.email).green());
    Ok(())
}

pub fn login(ctx: &mut Context, email: &str, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let user = ctx.session.login(email, &password)?;

    println!("{}", format!("  Logged in as {}", user.email).green());
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    ctx.session.logout()?;
    println!("  Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    match ctx.session.current_user() {
        Some(user) => println!("  {} {}", user.email, format!("({})", user.id).dimmed()),
        None => println!("{}", "  Not logged in".dimmed()),
    }
    Ok(())
}
