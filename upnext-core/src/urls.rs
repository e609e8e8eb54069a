//! Heuristic URL extraction from free-text event descriptions.
//!
//! This is a best-effort scan, not a strict URL grammar: it matches
//! scheme-prefixed URLs plus bare domain tokens ending in a recognized TLD,
//! skips email addresses, and trims trailing punctuation. Edge-case text can
//! produce false positives or negatives; the test corpus below pins the
//! strings we care about.

use once_cell::sync::Lazy;
use regex::Regex;

/// Domain fragment that marks a URL as a video-meeting link.
pub const MEETING_MARKER: &str = "zoom.us";

/// Top-level domains recognized for bare (scheme-less) domain tokens.
const TLDS: &str = "com|net|org|edu|gov|mil|aero|asia|biz|cat|coop|info|int|jobs|mobi|museum|\
                    name|post|pro|tel|travel|xxx|ac|ad|ae|af|ag|ai|al|am|ao|aq|ar|as|at|au|aw|\
                    ax|az|ba|bb|bd|be|bf|bg|bh|bi|bj|bm|bn|bo|br|bs|bt|bv|bw|by|bz|ca|cc|cd|\
                    cf|cg|ch|ci|ck|cl|cm|cn|co|cr|cu|cv|cx|cy|cz|de|dj|dk|dm|do|dz|ec|ee|eg|\
                    eh|er|es|et|eu|fi|fj|fk|fm|fo|fr|ga|gb|gd|ge|gf|gg|gh|gi|gl|gm|gn|gp|gq|\
                    gr|gs|gt|gu|gw|gy|hk|hm|hn|hr|ht|hu|id|ie|il|im|in|io|iq|ir|is|it|je|jm|\
                    jo|jp|ke|kg|kh|ki|km|kn|kp|kr|kw|ky|kz|la|lb|lc|li|lk|lr|ls|lt|lu|lv|ly|\
                    ma|mc|md|me|mg|mh|mk|ml|mm|mn|mo|mp|mq|mr|ms|mt|mu|mv|mw|mx|my|mz|na|nc|\
                    ne|nf|ng|ni|nl|no|np|nr|nu|nz|om|pa|pe|pf|pg|ph|pk|pl|pm|pn|pr|ps|pt|pw|\
                    py|qa|re|ro|rs|ru|rw|sa|sb|sc|sd|se|sg|sh|si|sj|sk|sl|sm|sn|so|sr|ss|st|\
                    su|sv|sx|sy|sz|tc|td|tf|tg|th|tj|tk|tl|tm|tn|to|tr|tt|tv|tw|tz|ua|ug|uk|\
                    us|uy|uz|va|vc|ve|vg|vi|vn|vu|wf|ws|ye|yt|za|zm|zw";

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)\bhttps?://[^\s<>]+|\b[a-z0-9](?:[a-z0-9.-]*[a-z0-9])?\.(?:{TLDS})\b(?:/[^\s<>]*)?"
    );
    Regex::new(&pattern).expect("valid url regex")
});

/// Extract URL-like substrings from `text`, in order of first appearance.
///
/// Matching is case-insensitive but results keep the original casing.
/// Candidates directly preceded by `@` are email domains, not URLs.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut urls = Vec::new();

    for m in URL_RE.find_iter(text) {
        if text[..m.start()].ends_with('@') {
            continue;
        }

        let trimmed = trim_trailing(m.as_str());
        if !trimmed.is_empty() {
            urls.push(trimmed.to_string());
        }
    }

    urls
}

/// The first extracted URL, but only if it looks like a video-meeting link.
pub fn first_meeting_url(urls: &[String]) -> String {
    match urls.first() {
        Some(url) if url.to_ascii_lowercase().contains(MEETING_MARKER) => url.clone(),
        _ => String::new(),
    }
}

/// Trim trailing punctuation, quotes, and closing brackets that have no
/// matching opener inside the candidate itself.
fn trim_trailing(candidate: &str) -> &str {
    let mut s = candidate;

    loop {
        let Some(last) = s.chars().last() else {
            break;
        };

        let cut = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"' | '`' | '«' | '»' | '“' | '”' | '‘'
            | '’' => true,
            ')' => unbalanced(s, '(', ')'),
            ']' => unbalanced(s, '[', ']'),
            '}' => unbalanced(s, '{', '}'),
            _ => false,
        };

        if !cut {
            break;
        }
        s = &s[..s.len() - last.len_utf8()];
    }

    s
}

fn unbalanced(s: &str, open: char, close: char) -> bool {
    let opens = s.chars().filter(|&c| c == open).count();
    let closes = s.chars().filter(|&c| c == close).count();
    closes > opens
}
