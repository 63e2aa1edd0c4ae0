//! Range header parsing
//!
//! Single-range `bytes=` parsing. Multi-range requests and non-byte units
//! are ignored and answered with the full body, per RFC 7233's allowance
//! to treat an unsupported Range as absent.

/// A resolved byte range, both ends inclusive and clamped to the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes the range covers, for the Content-Length header
    pub const fn content_length(&self) -> usize {
        self.end - self.start + 1
    }
}

/// How a Range header should be answered
#[derive(Debug)]
pub enum RangeOutcome {
    /// No header, or one we do not support: send the whole file
    Full,
    /// Valid single range: send 206 with this slice
    Partial(ByteRange),
    /// Range lies entirely outside the file: send 416
    Unsatisfiable,
}

/// Parse a Range header against a file of `file_size` bytes
///
/// # Examples
/// ```
/// use spa_server::http::range::{parse_range, RangeOutcome};
///
/// assert!(matches!(parse_range(Some("bytes=0-99"), 1000), RangeOutcome::Partial(_)));
/// assert!(matches!(parse_range(None, 1000), RangeOutcome::Full));
/// ```
pub fn parse_range(header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    // A multi-range spec ("0-9,20-29") fails the numeric parses below and
    // degrades to a full response, same as any other malformed value.
    let Some((start_part, end_part)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_part, end_part) = (start_part.trim(), end_part.trim());

    // Suffix form: "-N" asks for the last N bytes
    if start_part.is_empty() {
        let Ok(suffix) = end_part.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if suffix == 0 || file_size == 0 {
            return RangeOutcome::Unsatisfiable;
        }
        return RangeOutcome::Partial(ByteRange {
            start: file_size.saturating_sub(suffix),
            end: file_size - 1,
        });
    }

    let Ok(start) = start_part.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    // Open form "N-" runs to the end; a closed end is clamped to the file
    let end = if end_part.is_empty() {
        file_size - 1
    } else {
        match end_part.parse::<usize>() {
            Ok(e) => e.min(file_size - 1),
            Err(_) => return RangeOutcome::Full,
        }
    };

    if start > end {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_is_full() {
        assert!(matches!(parse_range(None, 100), RangeOutcome::Full));
    }

    #[test]
    fn closed_range() {
        match parse_range(Some("bytes=0-9"), 100) {
            RangeOutcome::Partial(r) => {
                assert_eq!(r, ByteRange { start: 0, end: 9 });
                assert_eq!(r.content_length(), 10);
            }
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn open_range_runs_to_end() {
        match parse_range(Some("bytes=50-"), 100) {
            RangeOutcome::Partial(r) => {
                assert_eq!(r, ByteRange { start: 50, end: 99 });
                assert_eq!(r.content_length(), 50);
            }
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn suffix_range_takes_last_bytes() {
        match parse_range(Some("bytes=-20"), 100) {
            RangeOutcome::Partial(r) => {
                assert_eq!(r, ByteRange { start: 80, end: 99 });
            }
            other => panic!("expected Partial, got {other:?}"),
        }
        // Suffix larger than the file covers the whole file
        match parse_range(Some("bytes=-500"), 100) {
            RangeOutcome::Partial(r) => {
                assert_eq!(r, ByteRange { start: 0, end: 99 });
            }
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn end_is_clamped_to_file_size() {
        match parse_range(Some("bytes=90-200"), 100) {
            RangeOutcome::Partial(r) => {
                assert_eq!(r, ByteRange { start: 90, end: 99 });
            }
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn out_of_bounds_is_unsatisfiable() {
        assert!(matches!(
            parse_range(Some("bytes=200-"), 100),
            RangeOutcome::Unsatisfiable
        ));
        assert!(matches!(
            parse_range(Some("bytes=-0"), 100),
            RangeOutcome::Unsatisfiable
        ));
        assert!(matches!(
            parse_range(Some("bytes=-5"), 0),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn malformed_degrades_to_full() {
        assert!(matches!(
            parse_range(Some("bytes=a-b"), 100),
            RangeOutcome::Full
        ));
        assert!(matches!(
            parse_range(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Full
        ));
        assert!(matches!(
            parse_range(Some("items=0-9"), 100),
            RangeOutcome::Full
        ));
    }
}
