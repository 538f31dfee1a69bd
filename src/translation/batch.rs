/*!
 * Batch partitioning.
 *
 * Groups an ordered list of sentences into request-sized batches so that one
 * upstream call never exceeds the provider's character budget. Greedy and
 * single-pass; order is preserved and no sentence is ever split or dropped.
 */

/// Group sentences into batches bounded by a cumulative character budget.
///
/// A batch accumulates sentences until adding the next one would push its
/// running byte total past `max_chars`; the batch is then sealed and a new
/// one starts with that sentence. A single sentence longer than `max_chars`
/// forms its own oversized batch rather than being dropped or truncated.
///
/// Empty input yields no batches, and no returned batch is empty.
pub fn group_into_batches(texts: &[String], max_chars: usize) -> Vec<Vec<String>> {
    let mut batches: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_chars = 0usize;

    for text in texts {
        let text_len = text.len();

        if !current.is_empty() && current_chars + text_len > max_chars {
            batches.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        current.push(text.clone());
        current_chars += text_len;
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
