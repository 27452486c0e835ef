use crate::RenderableResolution;

pub fn render_markdown(resolution: &RenderableResolution) -> String {
    let mut out = String::new();

    out.push_str("# CSP resolution\n\n");
    out.push_str(&format!(
        "- Header: `{}`\n- Route: `{}`\n- Matched key: `{}`\n",
        resolution.kind.header_name(),
        resolution.route,
        resolution.key
    ));

    if resolution.chain.len() > 1 {
        let chain = resolution
            .chain
            .iter()
            .map(|k| format!("`{k}`"))
            .collect::<Vec<_>>()
            .join(" -> ");
        out.push_str(&format!("- Inheritance: {chain}\n"));
    }

    if resolution.snippets.is_empty() {
        out.push_str("- Snippets: none\n\n");
    } else {
        let snippets = resolution
            .snippets
            .iter()
            .map(|s| format!("`{s}`"))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("- Snippets: {snippets}\n\n"));
    }

    if resolution.directives.is_empty() {
        out.push_str("No directives.\n");
        return out;
    }

    out.push_str("## Directives\n\n");
    out.push_str("| Directive | Sources |\n");
    out.push_str("|---|---|\n");
    for d in &resolution.directives {
        let name = if d.replace {
            format!("`{}` (override)", d.name)
        } else {
            format!("`{}`", d.name)
        };
        let sources = if d.sources.is_empty() {
            "-".to_string()
        } else {
            d.sources
                .iter()
                .map(|s| format!("`{}`", s.replace('|', "\\|")))
                .collect::<Vec<_>>()
                .join(" ")
        };
        out.push_str(&format!("| {} | {} |\n", name, sources));
    }

    out.push_str("\n## Header value\n\n```text\n");
    out.push_str(&resolution.header);
    out.push_str("\n```\n");

    out
}
