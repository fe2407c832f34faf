//! Per-level inbox to outbox transforms.
//!
//! Every transform borrows the inbox and builds a fresh outbox. Preconditions
//! (group sizes, terminators, numeric items) are checked up front and
//! reported as [`InputError`] instead of producing a partial outbox.

use std::sync::Arc;

use crate::core::error::InputError;
use crate::core::item::{Item, Outbox, TileTable};
use crate::core::primes::PrimeFactors;
use crate::core::split::{split_by_sentinel, split_fixed_groups};

pub type TransformResult = Result<Outbox, InputError>;

/// Mail Room, Busy Mail Room.
pub fn copy(inbox: &[Item]) -> TransformResult {
    Ok(inbox.to_vec())
}

/// Copy Floor: the floor spells the answer, the inbox is ignored.
pub fn spell_bug(_inbox: &[Item]) -> TransformResult {
    Ok(vec![Item::Letter('B'), Item::Letter('U'), Item::Letter('G')])
}

/// Scrambler Handler: each pair, larger item first.
pub fn reverse_sort_pairs(inbox: &[Item]) -> TransformResult {
    let mut outbox = Vec::with_capacity(inbox.len());
    for pair in grouped(inbox, 2)? {
        let mut pair = pair.to_vec();
        pair.sort_by(|a, b| b.cmp(a));
        outbox.extend(pair);
    }
    Ok(outbox)
}

pub fn sum_pairs(inbox: &[Item]) -> TransformResult {
    numeric_pairs(inbox)?
        .into_iter()
        .map(|(index, a, b)| checked(a.checked_add(b), index).map(Item::Number))
        .collect()
}

/// Zero Exterminator.
pub fn drop_zeros(inbox: &[Item]) -> TransformResult {
    Ok(inbox
        .iter()
        .copied()
        .filter(|item| !item.is_sentinel())
        .collect())
}

/// Zero Preservation Initiative.
pub fn keep_zeros(inbox: &[Item]) -> TransformResult {
    Ok(inbox
        .iter()
        .copied()
        .filter(|item| item.is_sentinel())
        .collect())
}

/// Multiply every item by `factor` (Tripler Room, Octoplier Suite, Tetracontiplier).
pub fn scale(factor: i64) -> impl Fn(&[Item]) -> TransformResult + Send + Sync + 'static {
    move |inbox: &[Item]| -> TransformResult {
        numbers(inbox)?
            .into_iter()
            .map(|(index, value)| checked(value.checked_mul(factor), index).map(Item::Number))
            .collect()
    }
}

/// Sub Hallway: for each pair `(a, b)` output `b - a` then `a - b`.
pub fn differences_both_ways(inbox: &[Item]) -> TransformResult {
    let mut outbox = Vec::with_capacity(inbox.len());
    for (index, a, b) in numeric_pairs(inbox)? {
        let diff = checked(b.checked_sub(a), index)?;
        outbox.push(Item::Number(diff));
        outbox.push(Item::Number(checked(diff.checked_neg(), index)?));
    }
    Ok(outbox)
}

/// Equalization Room: one copy of each pair whose items are equal.
pub fn equal_pairs(inbox: &[Item]) -> TransformResult {
    Ok(grouped(inbox, 2)?
        .into_iter()
        .filter(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
        .collect())
}

/// Maximization Room.
pub fn max_pairs(inbox: &[Item]) -> TransformResult {
    Ok(numeric_pairs(inbox)?
        .into_iter()
        .map(|(_, a, b)| Item::Number(a.max(b)))
        .collect())
}

/// Absolute Positivity.
pub fn absolute(inbox: &[Item]) -> TransformResult {
    numbers(inbox)?
        .into_iter()
        .map(|(index, value)| checked(value.checked_abs(), index).map(Item::Number))
        .collect()
}

/// Exclusive Lounge: `1` when the pair has opposite signs, else `0`.
pub fn opposite_signs(inbox: &[Item]) -> TransformResult {
    Ok(numeric_pairs(inbox)?
        .into_iter()
        .map(|(_, a, b)| {
            let opposite = (a < 0 && b > 0) || (a > 0 && b < 0);
            Item::Number(i64::from(opposite))
        })
        .collect())
}

/// Countdown: each item counts toward zero, both ends included.
pub fn countdown(inbox: &[Item]) -> TransformResult {
    let mut outbox = Vec::new();
    for (_, value) in numbers(inbox)? {
        if value >= 0 {
            outbox.extend((0..=value).rev().map(Item::Number));
        } else {
            outbox.extend((value..=0).map(Item::Number));
        }
    }
    Ok(outbox)
}

pub fn multiply_pairs(inbox: &[Item]) -> TransformResult {
    numeric_pairs(inbox)?
        .into_iter()
        .map(|(index, a, b)| checked(a.checked_mul(b), index).map(Item::Number))
        .collect()
}

/// Zero Terminated Sum: one sum per string; an empty string sums to 0.
pub fn sum_strings(inbox: &[Item]) -> TransformResult {
    strings(inbox)?
        .into_iter()
        .map(|(start, string)| {
            string
                .iter()
                .enumerate()
                .try_fold(0i64, |sum, (offset, item)| {
                    let index = start + offset;
                    checked(sum.checked_add(number(*item, index)?), index)
                })
                .map(Item::Number)
        })
        .collect()
}

/// Fibonacci Visitor: the sequence 1, 1, 2, 3, ... up to and including the
/// first term greater than the item.
///
/// `0` and negative items yield `[1]`. Terms are only computed once needed,
/// so an item is rejected only when that closing term exceeds `i64`.
pub fn fibonacci_past(inbox: &[Item]) -> TransformResult {
    let mut outbox = Vec::new();
    for (index, limit) in numbers(inbox)? {
        let (mut previous, mut current) = (0i64, 1i64);
        loop {
            outbox.push(Item::Number(current));
            if current > limit {
                break;
            }
            let following = checked(previous.checked_add(current), index)?;
            previous = current;
            current = following;
        }
    }
    Ok(outbox)
}

/// The Littlest Number: the minimum of each string.
pub fn min_strings(inbox: &[Item]) -> TransformResult {
    strings(inbox)?
        .into_iter()
        .map(|(start, string)| {
            string
                .iter()
                .copied()
                .reduce(Item::min)
                .ok_or(InputError::EmptyString { start })
        })
        .collect()
}

/// Mod Module: truncated remainder, the sign follows the dividend.
pub fn remainder_pairs(inbox: &[Item]) -> TransformResult {
    numeric_pairs(inbox)?
        .into_iter()
        .map(|(index, a, b)| {
            if b == 0 {
                return Err(InputError::DivisionByZero { index: index + 1 });
            }
            // `i64::MIN % -1` is 0; only the quotient of that pair overflows.
            Ok(Item::Number(a.wrapping_rem(b)))
        })
        .collect()
}

/// Cumulative Countdown: `n * (n + 1) / 2`.
pub fn triangular(inbox: &[Item]) -> TransformResult {
    numbers(inbox)?
        .into_iter()
        .map(|(index, value)| {
            let wide = i128::from(value);
            let triangle = wide * (wide + 1) / 2;
            i64::try_from(triangle)
                .map(Item::Number)
                .map_err(|_| InputError::Overflow { index })
        })
        .collect()
}

/// Small Divide: quotient rounded toward negative infinity.
pub fn floor_divide_pairs(inbox: &[Item]) -> TransformResult {
    numeric_pairs(inbox)?
        .into_iter()
        .map(|(index, a, b)| {
            if b == 0 {
                return Err(InputError::DivisionByZero { index: index + 1 });
            }
            checked(floor_div(a, b), index).map(Item::Number)
        })
        .collect()
}

/// Three Sort: each triple in ascending order.
pub fn sort_triples(inbox: &[Item]) -> TransformResult {
    let mut outbox = Vec::with_capacity(inbox.len());
    for triple in grouped(inbox, 3)? {
        let mut triple = triple.to_vec();
        triple.sort();
        outbox.extend(triple);
    }
    Ok(outbox)
}

/// Storage Floor: each item addresses a tile of `table`.
pub fn tile_lookup(table: TileTable) -> impl Fn(&[Item]) -> TransformResult + Send + Sync + 'static {
    move |inbox: &[Item]| -> TransformResult {
        numbers(inbox)?
            .into_iter()
            .map(|(index, tile)| {
                let cell = usize::try_from(tile)
                    .ok()
                    .and_then(|slot| table.get(slot).copied())
                    .ok_or(InputError::TileOutOfRange {
                        index,
                        tile,
                        len: table.len(),
                    })?;
                cell.ok_or(InputError::EmptyTile { index, tile })
            })
            .collect()
    }
}

/// String Reverse.
pub fn reverse_strings(inbox: &[Item]) -> TransformResult {
    let mut outbox = Vec::with_capacity(inbox.len());
    for (_, string) in strings(inbox)? {
        outbox.extend(string.iter().rev().copied());
    }
    Ok(outbox)
}

/// Prime Factory: ascending prime factors of each item, concatenated.
pub fn prime_factors(
    provider: Arc<dyn PrimeFactors>,
) -> impl Fn(&[Item]) -> TransformResult + Send + Sync + 'static {
    move |inbox: &[Item]| -> TransformResult {
        let mut outbox = Vec::new();
        for (index, value) in numbers(inbox)? {
            let target = u64::try_from(value)
                .map_err(|_| InputError::NegativeFactorTarget { index, value })?;
            for factor in provider.factors(target) {
                let factor = i64::try_from(factor).map_err(|_| InputError::Overflow { index })?;
                outbox.push(Item::Number(factor));
            }
        }
        Ok(outbox)
    }
}

/// Sorting Floor: each string sorted ascending, strings kept in order.
pub fn sort_strings(inbox: &[Item]) -> TransformResult {
    let mut outbox = Vec::with_capacity(inbox.len());
    for (_, string) in strings(inbox)? {
        let mut string = string.to_vec();
        string.sort();
        outbox.extend(string);
    }
    Ok(outbox)
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        return quotient.checked_sub(1);
    }
    Some(quotient)
}

fn checked(value: Option<i64>, index: usize) -> Result<i64, InputError> {
    value.ok_or(InputError::Overflow { index })
}

fn number(item: Item, index: usize) -> Result<i64, InputError> {
    item.as_number()
        .ok_or(InputError::ExpectedNumber { index, found: item })
}

/// All items as numbers, paired with their inbox index.
fn numbers(inbox: &[Item]) -> Result<Vec<(usize, i64)>, InputError> {
    let mut values = Vec::with_capacity(inbox.len());
    for (index, item) in inbox.iter().enumerate() {
        values.push((index, number(*item, index)?));
    }
    Ok(values)
}

fn grouped(inbox: &[Item], group_size: usize) -> Result<Vec<&[Item]>, InputError> {
    if inbox.len() % group_size != 0 {
        return Err(InputError::UngroupedLength {
            len: inbox.len(),
            group_size,
        });
    }
    Ok(split_fixed_groups(inbox, group_size))
}

/// Numeric pairs as `(index of first item, a, b)`.
fn numeric_pairs(inbox: &[Item]) -> Result<Vec<(usize, i64, i64)>, InputError> {
    let mut pairs = Vec::with_capacity(inbox.len() / 2);
    for (pair, items) in grouped(inbox, 2)?.into_iter().enumerate() {
        let index = pair * 2;
        let a = number(items[0], index)?;
        let b = number(items[1], index + 1)?;
        pairs.push((index, a, b));
    }
    Ok(pairs)
}

/// Zero-terminated strings with the inbox index each one starts at.
fn strings(inbox: &[Item]) -> Result<Vec<(usize, &[Item])>, InputError> {
    let mut start = 0;
    let mut located = Vec::new();
    for string in split_by_sentinel(inbox)? {
        located.push((start, string));
        start += string.len() + 1;
    }
    Ok(located)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primes::TrialDivision;
    use crate::test_support::{letters, nums};
    use proptest::collection::vec;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};

    #[test]
    fn copy_returns_equal_outbox() {
        let inbox = nums(&[4, -2, 0]);
        assert_eq!(copy(&inbox), Ok(inbox.clone()));
    }

    #[test]
    fn copy_floor_ignores_inbox() {
        assert_eq!(spell_bug(&nums(&[1, 2, 3])), Ok(letters("BUG")));
        assert_eq!(spell_bug(&[]), Ok(letters("BUG")));
    }

    #[test]
    fn scrambler_puts_larger_first() {
        let inbox = nums(&[1, 7, 9, 2, 3, 3]);
        assert_eq!(reverse_sort_pairs(&inbox), Ok(nums(&[7, 1, 9, 2, 3, 3])));
        assert_eq!(
            reverse_sort_pairs(&letters("AZYB")),
            Ok(letters("ZAYB"))
        );
    }

    #[test]
    fn pair_arithmetic() {
        let inbox = nums(&[3, 5, -2, 8]);
        assert_eq!(sum_pairs(&inbox), Ok(nums(&[8, 6])));
        assert_eq!(max_pairs(&inbox), Ok(nums(&[5, 8])));
        assert_eq!(multiply_pairs(&inbox), Ok(nums(&[15, -16])));
        assert_eq!(opposite_signs(&inbox), Ok(nums(&[0, 1])));
    }

    #[test]
    fn opposite_signs_treats_zero_as_unsigned() {
        assert_eq!(opposite_signs(&nums(&[0, -4, 5, 0])), Ok(nums(&[0, 0])));
    }

    #[test]
    fn differences_both_ways_per_pair() {
        let inbox = nums(&[3, 5, 9, 2]);
        assert_eq!(differences_both_ways(&inbox), Ok(nums(&[2, -2, -7, 7])));
        assert_eq!(differences_both_ways(&[]), Ok(Vec::new()));
    }

    #[test]
    fn equal_pairs_emit_one_copy() {
        let inbox = nums(&[4, 4, 1, 2, -3, -3]);
        assert_eq!(equal_pairs(&inbox), Ok(nums(&[4, -3])));
    }

    #[test]
    fn scaling_levels() {
        let inbox = nums(&[2, -1, 0]);
        assert_eq!(scale(3)(&inbox), Ok(nums(&[6, -3, 0])));
        assert_eq!(scale(8)(&inbox), Ok(nums(&[16, -8, 0])));
        assert_eq!(scale(40)(&inbox), Ok(nums(&[80, -40, 0])));
    }

    #[test]
    fn countdown_runs_toward_zero() {
        let inbox = nums(&[3, -2, 0]);
        assert_eq!(countdown(&inbox), Ok(nums(&[3, 2, 1, 0, -2, -1, 0, 0])));
    }

    #[test]
    fn zero_terminated_sums() {
        let inbox = nums(&[1, 2, 3, 0, 0, -4, 9, 0]);
        assert_eq!(sum_strings(&inbox), Ok(nums(&[6, 0, 5])));
    }

    #[test]
    fn fibonacci_includes_first_term_past_item() {
        assert_eq!(fibonacci_past(&nums(&[5])), Ok(nums(&[1, 1, 2, 3, 5, 8])));
        assert_eq!(fibonacci_past(&nums(&[7])), Ok(nums(&[1, 1, 2, 3, 5, 8])));
        assert_eq!(fibonacci_past(&nums(&[1])), Ok(nums(&[1, 1, 2])));
        assert_eq!(fibonacci_past(&nums(&[0])), Ok(nums(&[1])));
        assert_eq!(fibonacci_past(&nums(&[-3])), Ok(nums(&[1])));
        assert_eq!(
            fibonacci_past(&nums(&[2, 0])),
            Ok(nums(&[1, 1, 2, 3, 1]))
        );
    }

    #[test]
    fn fibonacci_reaches_largest_i64_term() {
        const LARGEST_TERM: i64 = 7_540_113_804_746_346_429;
        let outbox = fibonacci_past(&nums(&[LARGEST_TERM - 1])).expect("fits in i64");
        assert_eq!(outbox.len(), 92);
        assert_eq!(outbox.last(), Some(&Item::Number(LARGEST_TERM)));
        assert_eq!(
            fibonacci_past(&nums(&[1, i64::MAX])),
            Err(InputError::Overflow { index: 1 })
        );
    }

    #[test]
    fn littlest_number_per_string() {
        let inbox = nums(&[4, -1, 7, 0, 9, 0]);
        assert_eq!(min_strings(&inbox), Ok(nums(&[-1, 9])));
    }

    #[test]
    fn littlest_number_rejects_empty_string() {
        let inbox = nums(&[4, 0, 0]);
        assert_eq!(
            min_strings(&inbox),
            Err(InputError::EmptyString { start: 2 })
        );
    }

    #[test]
    fn remainder_and_floor_division_signs() {
        let inbox = nums(&[7, 2, -7, 2, 7, -2, 6, 3]);
        assert_eq!(remainder_pairs(&inbox), Ok(nums(&[1, -1, 1, 0])));
        assert_eq!(floor_divide_pairs(&inbox), Ok(nums(&[3, -4, -4, 2])));
    }

    #[test]
    fn division_by_zero_points_at_divisor() {
        let inbox = nums(&[4, 2, 5, 0]);
        assert_eq!(
            floor_divide_pairs(&inbox),
            Err(InputError::DivisionByZero { index: 3 })
        );
        assert_eq!(
            remainder_pairs(&inbox),
            Err(InputError::DivisionByZero { index: 3 })
        );
    }

    #[test]
    fn triangular_numbers() {
        let inbox = nums(&[0, 1, 4, 10, -3]);
        assert_eq!(triangular(&inbox), Ok(nums(&[0, 1, 10, 55, 3])));
    }

    #[test]
    fn triangular_handles_intermediate_overflow() {
        assert_eq!(
            triangular(&nums(&[4_000_000_000, -4_000_000_000])),
            Ok(nums(&[8_000_000_002_000_000_000, 7_999_999_998_000_000_000]))
        );
        assert_eq!(
            triangular(&nums(&[5_000_000_000])),
            Err(InputError::Overflow { index: 0 })
        );
    }

    #[test]
    fn remainder_of_min_by_minus_one_is_zero() {
        assert_eq!(
            remainder_pairs(&nums(&[i64::MIN, -1, i64::MIN, 3])),
            Ok(nums(&[0, -2]))
        );
        assert_eq!(
            floor_divide_pairs(&nums(&[i64::MIN, -1])),
            Err(InputError::Overflow { index: 0 })
        );
    }

    #[test]
    fn three_sort_orders_each_triple() {
        let inbox = nums(&[10, 9, 2, 5, 5, -1]);
        assert_eq!(sort_triples(&inbox), Ok(nums(&[2, 9, 10, -1, 5, 5])));
        assert_eq!(sort_triples(&letters("CABZYX")), Ok(letters("ABCXYZ")));
    }

    #[test]
    fn tile_lookup_indexes_floor() {
        let table: TileTable = letters("NKAE").into_iter().map(Some).collect();
        let lookup = tile_lookup(table);
        assert_eq!(lookup(&nums(&[2, 0, 3])), Ok(letters("ANE")));
        assert_eq!(
            lookup(&nums(&[4])),
            Err(InputError::TileOutOfRange {
                index: 0,
                tile: 4,
                len: 4
            })
        );
        assert_eq!(
            lookup(&nums(&[0, -1])),
            Err(InputError::TileOutOfRange {
                index: 1,
                tile: -1,
                len: 4
            })
        );
    }

    #[test]
    fn tile_lookup_rejects_empty_cell() {
        let lookup = tile_lookup(vec![Some(Item::Letter('A')), None]);
        assert_eq!(
            lookup(&nums(&[1])),
            Err(InputError::EmptyTile { index: 0, tile: 1 })
        );
    }

    #[test]
    fn string_reverse_drops_terminators() {
        let mut inbox = letters("BUG");
        inbox.push(Item::Number(0));
        inbox.extend(letters("AB"));
        inbox.push(Item::Number(0));
        let mut expected = letters("GUB");
        expected.extend(letters("BA"));
        assert_eq!(reverse_strings(&inbox), Ok(expected));
    }

    #[test]
    fn prime_factory_concatenates_factors() {
        let factorize = prime_factors(Arc::new(TrialDivision));
        assert_eq!(
            factorize(&nums(&[12, 7, 1, 30])),
            Ok(nums(&[2, 2, 3, 7, 2, 3, 5]))
        );
        assert_eq!(
            factorize(&nums(&[-4])),
            Err(InputError::NegativeFactorTarget {
                index: 0,
                value: -4
            })
        );
    }

    #[test]
    fn sorting_floor_sorts_within_strings() {
        let mut inbox = letters("DAC");
        inbox.push(Item::Number(0));
        inbox.extend(nums(&[30, 4, 12, 0]));
        let mut expected = letters("ACD");
        expected.extend(nums(&[4, 12, 30]));
        assert_eq!(sort_strings(&inbox), Ok(expected));
    }

    #[test]
    fn odd_length_is_rejected_for_pair_levels() {
        let inbox = nums(&[1, 2, 3]);
        let expected = Err(InputError::UngroupedLength {
            len: 3,
            group_size: 2,
        });
        assert_eq!(sum_pairs(&inbox), expected);
        assert_eq!(reverse_sort_pairs(&inbox), expected);
        assert_eq!(equal_pairs(&inbox), expected);
    }

    #[test]
    fn letters_are_rejected_where_arithmetic_is_needed() {
        let inbox = vec![Item::Number(1), Item::Letter('X')];
        assert_eq!(
            sum_pairs(&inbox),
            Err(InputError::ExpectedNumber {
                index: 1,
                found: Item::Letter('X')
            })
        );
        assert_eq!(
            absolute(&inbox),
            Err(InputError::ExpectedNumber {
                index: 1,
                found: Item::Letter('X')
            })
        );
    }

    #[test]
    fn unterminated_strings_are_rejected() {
        let inbox = nums(&[1, 2, 0, 3]);
        assert_eq!(
            sum_strings(&inbox),
            Err(InputError::UnterminatedString { start: 3 })
        );
        assert_eq!(
            reverse_strings(&inbox),
            Err(InputError::UnterminatedString { start: 3 })
        );
    }

    #[test]
    fn overflow_is_reported() {
        let inbox = nums(&[i64::MAX]);
        assert_eq!(scale(3)(&inbox), Err(InputError::Overflow { index: 0 }));
        assert_eq!(
            absolute(&nums(&[i64::MIN])),
            Err(InputError::Overflow { index: 0 })
        );
    }

    proptest! {
        #[test]
        fn drop_zeros_is_idempotent(values in vec(-5i64..5, 0..48)) {
            let inbox = nums(&values);
            let once = drop_zeros(&inbox).expect("filter");
            let twice = drop_zeros(&once).expect("filter");
            prop_assert!(once.iter().all(|item| !item.is_sentinel()));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn absolute_values_are_magnitudes(values in vec(any::<i32>(), 0..48)) {
            let values: Vec<i64> = values.into_iter().map(i64::from).collect();
            let outbox = absolute(&nums(&values)).expect("abs");
            prop_assert_eq!(outbox.len(), values.len());
            for (item, value) in outbox.iter().zip(&values) {
                let magnitude = item.as_number().expect("number");
                prop_assert!(magnitude >= 0);
                prop_assert_eq!(magnitude, value.abs());
            }
        }
    }
}
