//! Natural ordering of texts: digit runs compare by numeric value, so
//! `"img2"` sorts before `"img10"`.
//!
//! Whitespace is skipped. A digit run starting with `0` is compared as a
//! fraction (digit by digit, left aligned), so `"1.05"` sorts before `"1.5"`.

use std::cmp::Ordering;

use super::options::CaseSensitivity;

fn skip_whitespace(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
        index += 1;
    }
    index
}

fn digit_run_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    end
}

/// Integer comparison of two digit runs: the longer run wins, otherwise the
/// first differing digit.
fn compare_integral(left: &[u8], right: &[u8]) -> Ordering {
    left.len()
        .cmp(&right.len())
        .then_with(|| left.cmp(right))
}

/// Fractional comparison of two digit runs: the first differing digit wins,
/// otherwise the shorter run.
fn compare_fractional(left: &[u8], right: &[u8]) -> Ordering {
    left.cmp(right)
}

/// Compares two texts in natural order.
pub(crate) fn natural_cmp(left: &str, right: &str, case: CaseSensitivity) -> Ordering {
    let left = left.as_bytes();
    let right = right.as_bytes();
    let (mut left_index, mut right_index) = (0, 0);

    loop {
        left_index = skip_whitespace(left, left_index);
        right_index = skip_whitespace(right, right_index);

        let (Some(&left_byte), Some(&right_byte)) = (left.get(left_index), right.get(right_index))
        else {
            return (left.len() - left_index).cmp(&(right.len() - right_index));
        };

        if left_byte.is_ascii_digit() && right_byte.is_ascii_digit() {
            let left_end = digit_run_end(left, left_index);
            let right_end = digit_run_end(right, right_index);
            let left_run = &left[left_index..left_end];
            let right_run = &right[right_index..right_end];

            let ordering = if left_byte == b'0' || right_byte == b'0' {
                compare_fractional(left_run, right_run)
            } else {
                compare_integral(left_run, right_run)
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
            left_index = left_end;
            right_index = right_end;
            continue;
        }

        let (left_byte, right_byte) = match case {
            CaseSensitivity::Sensitive => (left_byte, right_byte),
            CaseSensitivity::Insensitive => {
                (left_byte.to_ascii_lowercase(), right_byte.to_ascii_lowercase())
            }
        };
        match left_byte.cmp(&right_byte) {
            Ordering::Equal => {
                left_index += 1;
                right_index += 1;
            }
            ordering => return ordering,
        }
    }
}
