const MAX_SLUG_LEN: usize = 100;

/// Builds a URL-safe slug from a poster name, suffixed with `-<id>` when an id
/// is given. Names without any content fall back to `poster-<id>`, or to the
/// current unix time in milliseconds when there is no id either.
pub fn generate_slug(name: Option<&str>, id: Option<i64>) -> String {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        let suffix = id.unwrap_or_else(|| jiff::Timestamp::now().as_millisecond());
        return format!("poster-{suffix}");
    };

    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.to_lowercase().chars() {
        let replacement = match c {
            'æ' => "ae",
            'ø' => "oe",
            'å' => "aa",
            'a'..='z' | '0'..='9' => {
                if pending_dash {
                    slug.push('-');
                    pending_dash = false;
                }
                slug.push(c);
                continue;
            },
            _ => {
                pending_dash = !slug.is_empty();
                continue;
            },
        };
        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }
        slug.push_str(replacement);
    }
    // Everything left is ASCII, so byte truncation is safe.
    slug.truncate(MAX_SLUG_LEN);

    match id {
        Some(id) => format!("{slug}-{id}"),
        None => slug,
    }
}
