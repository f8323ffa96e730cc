//! Shared page layout.

use super::escape;
use crate::pipeline::context::RequestContext;

pub fn page(ctx: &RequestContext, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Wanderlust</title>
<link rel="stylesheet" href="/public/css/style.css">
</head>
<body>
{nav}
<main class="container">
{flash}
{body}
</main>
<footer class="footer">&copy; Wanderlust Private Limited</footer>
</body>
</html>
"#,
        title = escape(title),
        nav = navbar(ctx),
        flash = flash(ctx),
    )
}

fn navbar(ctx: &RequestContext) -> String {
    let account = match &ctx.current_user {
        Some(user) => format!(
            r#"<a class="nav-link" href="/profile">{}</a>
<a class="nav-link" href="/logout">Log out</a>"#,
            escape(&user.username)
        ),
        None => r#"<a class="nav-link" href="/signup">Sign up</a>
<a class="nav-link" href="/login">Log in</a>"#
            .to_string(),
    };

    format!(
        r#"<nav class="navbar">
<a class="brand" href="/listings">Wanderlust</a>
<a class="nav-link" href="/listings">Explore</a>
<a class="nav-link" href="/listings/new">Airbnb your home</a>
<span class="nav-account">{account}</span>
</nav>"#
    )
}

fn flash(ctx: &RequestContext) -> String {
    let alerts = ctx
        .success
        .iter()
        .map(|msg| ("success", msg))
        .chain(ctx.error.iter().map(|msg| ("error", msg)));

    alerts
        .map(|(class, msg)| {
            format!(
                r#"<div class="alert alert-{class}" role="alert">{}</div>"#,
                escape(msg)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
