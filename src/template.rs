//! Target-name rendering from a placeholder template.
//!
//! Supported placeholders: `{title}`, `{season}`, `{episode}` / `{ep}`,
//! `{ext}`, `{orig}`. The numeric placeholders accept a zero-pad width
//! (`{episode:03}`); `{{` and `}}` render literal braces. Rendering never
//! fails: templates the renderer cannot resolve fall back to literal
//! replacement of the five placeholder names, ignoring any padding
//! directives.

/// Field set available to a naming template.
#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
    pub title: &'a str,
    pub season: i64,
    pub episode: i64,
    pub ext: &'a str,
    pub orig: &'a str,
}

impl<'a> TemplateContext<'a> {
    /// Absent season/episode values substitute as 0 so formatting never
    /// fails on missing numeric data.
    pub fn new(
        title: &'a str,
        season: Option<i64>,
        episode: Option<i64>,
        ext: &'a str,
        orig: &'a str,
    ) -> Self {
        Self {
            title,
            season: season.unwrap_or(0),
            episode: episode.unwrap_or(0),
            ext,
            orig,
        }
    }
}

/// Render a template against a context. Always produces a result.
pub fn format_template(template: &str, ctx: &TemplateContext) -> String {
    match try_format(template, ctx) {
        Some(rendered) => rendered,
        None => fallback_format(template, ctx),
    }
}

fn try_format(template: &str, ctx: &TemplateContext) -> Option<String> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
        } else if tail.starts_with('}') {
            // Unpaired closing brace
            return None;
        } else {
            let body = &tail[1..];
            let close = body.find('}')?;
            let inner = &body[..close];
            if inner.contains('{') {
                return None;
            }
            out.push_str(&render_placeholder(inner, ctx)?);
            rest = &body[close + 1..];
        }
    }

    out.push_str(rest);
    Some(out)
}

fn render_placeholder(inner: &str, ctx: &TemplateContext) -> Option<String> {
    let (name, spec) = match inner.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (inner, None),
    };

    match name {
        "title" => string_field(ctx.title, spec),
        "ext" => string_field(ctx.ext, spec),
        "orig" => string_field(ctx.orig, spec),
        "season" => numeric_field(ctx.season, spec),
        "episode" | "ep" => numeric_field(ctx.episode, spec),
        _ => None,
    }
}

fn string_field(value: &str, spec: Option<&str>) -> Option<String> {
    match spec {
        None | Some("") => Some(value.to_string()),
        // Width directives only apply to numeric fields
        Some(_) => None,
    }
}

fn numeric_field(value: i64, spec: Option<&str>) -> Option<String> {
    let spec = match spec {
        None | Some("") => return Some(value.to_string()),
        Some(spec) => spec,
    };

    let (zero_fill, width_str) = match spec.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => (true, rest),
        _ => (false, spec),
    };
    let width: usize = width_str.parse().ok()?;

    if zero_fill {
        Some(format!("{value:0width$}"))
    } else {
        Some(format!("{value:width$}"))
    }
}

fn fallback_format(template: &str, ctx: &TemplateContext) -> String {
    template
        .replace("{title}", ctx.title)
        .replace("{season}", &ctx.season.to_string())
        .replace("{episode}", &ctx.episode.to_string())
        .replace("{ep}", &ctx.episode.to_string())
        .replace("{ext}", ctx.ext)
        .replace("{orig}", ctx.orig)
}
