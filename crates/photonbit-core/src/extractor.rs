//! Von Neumann extractor.
//!
//! The raw stream is consumed in non-overlapping consecutive pairs. Equal
//! pairs carry no information and are dropped; a differing pair contributes
//! its *first* bit. Emitting the first bit of the pair — not a fixed
//! constant — is the law that cancels first-order bias even when the two
//! symbols have unequal marginal probabilities.

/// Debias a bitstream pairwise.
///
/// A trailing unpaired bit (odd-length input) is ignored entirely. Output
/// length is at most `bits.len() / 2`; expected yield is about a quarter of
/// the input for a near-unbiased stream, lower for heavily biased input.
pub fn von_neumann(bits: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(bits.len() / 4);
    for pair in bits.chunks_exact(2) {
        if pair[0] != pair[1] {
            output.push(pair[0]);
        }
    }
    output
}
