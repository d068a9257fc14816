use std::sync::LazyLock;

use tiktoken_rs::CoreBPE;

/// Rough characters-per-token ratio used when the BPE tables cannot be loaded.
const FALLBACK_CHARS_PER_TOKEN: usize = 4;

static CL100K: LazyLock<Option<CoreBPE>> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base()
        .inspect_err(|e| tracing::warn!(error = %e, "cl100k tokenizer unavailable, estimating"))
        .ok()
});

/// Token count of `text` under cl100k, the encoding used to size prompts.
pub fn count_tokens(text: &str) -> usize {
    match CL100K.as_ref() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => text.chars().count().div_ceil(FALLBACK_CHARS_PER_TOKEN),
    }
}

pub fn fits_within(text: &str, max_tokens: usize) -> bool {
    count_tokens(text) <= max_tokens
}
