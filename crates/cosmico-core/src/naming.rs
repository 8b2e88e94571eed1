//! File names for saved recordings and short labels for the console.

/// Used when a title has no usable characters.
const FALLBACK_SLUG: &str = "webinar";

/// Slugs are cut to this many bytes; leaves room for the extension under NAME_MAX.
const SLUG_MAX: usize = 200;

/// Lowercase ASCII slug of `title`.
///
/// - Latin letters with common accents are folded to their base letter
/// - Every run of other characters becomes a single `-`
/// - Leading/trailing `-` are trimmed, length is bounded
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() {
            let dash = pending_dash && !out.is_empty();
            if out.len() + usize::from(dash) + 1 > SLUG_MAX {
                break;
            }
            if dash {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

/// `<slug>.mp4` for a webinar title.
pub fn video_filename(title: &str) -> String {
    format!("{}.mp4", slugify(title))
}

/// Shorten `s` to at most `max` chars, keeping the start and appending `…`.
pub fn crop_end(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Shorten `s` to at most `max` chars, keeping the end and prefixing `…`.
pub fn crop(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(1);
    let tail: String = s.chars().skip(len - keep).collect();
    format!("…{tail}")
}
