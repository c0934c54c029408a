//! Word-frequency cloud computation over gallery captions.
//!
//! Pure functions with no HTTP or DOM dependencies, so the counting and
//! scaling behavior is unit-testable on its own. The browser-side script
//! only hands the precomputed (word, size, color) list to the layout
//! library and draws the result.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use serde::Serialize;

/// Cloud canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 800;
/// Cloud canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 600;
/// Font family every cloud word is drawn in.
pub const FONT_FAMILY: &str = "Impact";

/// Smallest rendered font size.
pub const FONT_MIN: f64 = 10.0;
/// Largest rendered font size.
pub const FONT_MAX: f64 = 100.0;

/// Tokens shorter than this are dropped before counting.
pub const MIN_TOKEN_LEN: usize = 3;

/// Common English words excluded from counting to reduce visual noise.
const STOPWORDS: &str = "a,about,above,after,again,all,an,and,any,are,as,at,\
be,because,been,before,being,below,between,both,but,by,can,did,do,does,down,\
during,each,few,for,from,further,had,has,have,having,he,her,here,hers,him,\
his,how,i,if,in,into,is,it,its,just,me,more,most,my,no,nor,not,now,of,off,\
on,once,only,or,other,our,out,over,own,same,she,so,some,such,than,that,the,\
their,them,then,there,these,they,this,those,through,to,too,under,until,up,\
very,was,we,were,what,when,where,which,while,who,why,will,with,you,your";

/// Fixed ordinal palette (d3 category10), keyed by draw-order index.
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
    "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// One word of the rendered cloud.
#[derive(Debug, Clone, Serialize)]
pub struct CloudWord {
    pub text: String,
    pub count: usize,
    pub size: f64,
    pub color: &'static str,
}

fn stopword_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.split(',').collect())
}

/// Split captions into lowercase tokens, dropping empty tokens, tokens
/// shorter than [`MIN_TOKEN_LEN`], and stopwords.
pub fn tokenize<'a>(captions: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    captions
        .into_iter()
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .filter(|token| token.len() >= MIN_TOKEN_LEN)
        .filter(|token| !stopword_set().contains(token.as_str()))
        .collect()
}

/// Count occurrences per distinct token, sorted by count descending then
/// token ascending (the draw order).
///
/// A lone distinct word is reported with count 1 no matter how often it
/// occurs, so the font scale's domain never collapses to a single point.
pub fn count_words(tokens: &[String]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    if counts.len() == 1 {
        if let Some((word, _)) = counts.into_iter().next() {
            return vec![(word.to_string(), 1)];
        }
        return Vec::new();
    }

    let mut counted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counted
}

/// Map a count onto a font size: linear over [0, max_count] into
/// [`FONT_MIN`, `FONT_MAX`], clamped at both ends.
pub fn font_size(count: usize, max_count: usize) -> f64 {
    if max_count == 0 {
        return FONT_MIN;
    }
    let t = count as f64 / max_count as f64;
    (FONT_MIN + t * (FONT_MAX - FONT_MIN)).clamp(FONT_MIN, FONT_MAX)
}

/// Compute the full cloud word list for a set of captions.
pub fn build_cloud<'a>(captions: impl IntoIterator<Item = &'a str>) -> Vec<CloudWord> {
    let tokens = tokenize(captions);
    let counted = count_words(&tokens);
    let max_count = counted.iter().map(|(_, count)| *count).max().unwrap_or(0);

    counted
        .into_iter()
        .enumerate()
        .map(|(index, (text, count))| CloudWord {
            text,
            count,
            size: font_size(count, max_count),
            color: PALETTE[index % PALETTE.len()],
        })
        .collect()
}
