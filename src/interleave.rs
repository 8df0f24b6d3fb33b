//! Symbol interleaving across codewords
//!
//! A frame of depth `d` carries `d` codewords multiplexed byte by byte:
//! frame byte `j + k·d` is symbol `k` of codeword `j`.

/// Copy codeword `index` of an interleaved `frame` into `out`.
///
/// `out` receives `frame.len() / depth` symbols.
pub fn deinterleave(frame: &[u8], depth: usize, index: usize, out: &mut [u8]) {
    debug_assert!(index < depth);
    debug_assert_eq!(frame.len() % depth, 0);
    for (dst, &src) in out.iter_mut().zip(frame.iter().skip(index).step_by(depth)) {
        *dst = src;
    }
}

/// Write `symbols` as codeword `index` of an interleaved `frame`.
pub fn scatter(symbols: &[u8], depth: usize, index: usize, frame: &mut [u8]) {
    debug_assert!(index < depth);
    for (dst, &src) in frame.iter_mut().skip(index).step_by(depth).zip(symbols) {
        *dst = src;
    }
}

/// Interleave equally sized codewords into one frame
pub fn interleave<T: AsRef<[u8]>>(codewords: &[T]) -> Vec<u8> {
    let depth = codewords.len();
    let len = codewords.first().map_or(0, |c| c.as_ref().len());
    debug_assert!(codewords.iter().all(|c| c.as_ref().len() == len));

    let mut frame = vec![0u8; len * depth];
    for (index, codeword) in codewords.iter().enumerate() {
        scatter(codeword.as_ref(), depth, index, &mut frame);
    }
    frame
}
