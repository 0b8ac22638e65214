/// The reserved padding / unknown-word index
pub const PAD_TOKEN_ID: usize = 0;

/// Length of the longest sequence (0 when there are none)
pub fn max_length<S: AsRef<[usize]>>(sequences: &[S]) -> usize {
    sequences
        .iter()
        .map(|sequence| sequence.as_ref().len())
        .max()
        .unwrap_or(0)
}

/// Fit a sequence to exactly `length` indices.
///
/// Shorter sequences are left-padded with [`PAD_TOKEN_ID`]. Longer sequences are truncated from
/// the front, keeping their last `length` indices.
pub fn pad_sequence(sequence: &[usize], length: usize) -> Vec<usize> {
    if sequence.len() >= length {
        return sequence[sequence.len() - length..].to_vec();
    }

    let mut padded = vec![PAD_TOKEN_ID; length - sequence.len()];
    padded.extend_from_slice(sequence);

    padded
}

/// Fit every sequence to exactly `length` indices
pub fn pad_sequences<S: AsRef<[usize]>>(sequences: &[S], length: usize) -> Vec<Vec<usize>> {
    sequences
        .iter()
        .map(|sequence| pad_sequence(sequence.as_ref(), length))
        .collect()
}
