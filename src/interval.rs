/// Index of the interval of the ascending array `arr` that brackets `t`,
/// starting the search from `guess`.
///
/// Returns `j` with `arr[j] <= t < arr[j + 1]`, `-1` when `t < arr[0]` and
/// `arr.len() - 1` when `t >= arr[arr.len() - 1]`. Arrays with two or fewer
/// elements form a single interval and always give `0`.
///
/// The search combines a secant step, whose slope is probed over roughly
/// `sqrt(arr.len())` elements, with a shrinking bracket of explored indices.
/// On near uniform arrays it converges in a couple of steps.
///
/// `arr` must be sorted ascending and free of NaN; see [crate::first_nan] and
/// [crate::first_monotonicity_violation]. Violations give a meaningless index
/// but never read out of bounds.
///
/// # Example
/// ```
/// use finitediff::locate_from_guess;
///
/// let arr: Vec<f64> = (0..100).map(|i| i as f64 * 0.1).collect();
/// assert_eq!(42, locate_from_guess(&arr, 4.25, 0));
/// assert_eq!(42, locate_from_guess(&arr, 4.25, 99));
/// assert_eq!(-1, locate_from_guess(&arr, -1.0, 50));
/// ```
pub fn locate_from_guess(arr: &[f64], t: f64, guess: isize) -> isize {
    let size = arr.len();
    if size <= 2 {
        return 0;
    }
    if t < arr[0] {
        return -1;
    }
    let last = size as isize - 1;
    if t >= arr[size - 1] {
        return last;
    }

    // the answer lies strictly between the two bounds
    let mut lower: isize = -1;
    let mut upper: isize = last;
    let probe = (size as f64).sqrt() as isize + 1;
    let mut i = guess.clamp(0, last - 1);

    loop {
        let at = i as usize;
        if t == arr[at + 1] {
            return i + 1;
        }
        let at_or_above = t >= arr[at];
        let below_next = t < arr[at + 1];
        if at_or_above && below_next {
            return i;
        }

        let direction = if at_or_above {
            lower = i;
            1
        } else {
            upper = i;
            -1
        };
        // a NaN node can collapse the bracket to adjacent bounds
        if upper - lower <= 2 {
            return lower + 1;
        }

        let h = step_within(i, direction * probe, direction, lower, upper);
        let slope = (arr[(i + h) as usize] - arr[at]) / h as f64;
        let estimate = ceil_away_from_zero((t - arr[at]) / slope).clamp(-last, last);
        i += step_within(i, estimate, direction, lower, upper);
    }
}

/// Index of the interval of `arr` bracketing `t`, see [locate_from_guess].
///
/// The initial guess is taken from linear interpolation between the first
/// and the last element.
///
/// # Example
/// ```
/// use finitediff::locate;
///
/// assert_eq!(0, locate(&[0.0, 1.0, 2.0, 3.0], 0.5));
/// assert_eq!(-1, locate(&[0.0, 1.0, 2.0], -0.9));
/// ```
pub fn locate(arr: &[f64], t: f64) -> isize {
    let size = arr.len();
    if size <= 2 {
        return 0;
    }
    let first = arr[0];
    let last = arr[size - 1];
    let guess = ((t - first) / (last - first) * size as f64).floor() as isize;
    locate_from_guess(arr, t, guess)
}

/// Halves `offset` until `i + offset` lies strictly inside `(lower, upper)`.
/// When halving reaches zero the step lands next to the bound on the side
/// given by `direction`.
fn step_within(i: isize, mut offset: isize, direction: isize, lower: isize, upper: isize) -> isize {
    while offset != 0 && (i + offset >= upper || i + offset <= lower) {
        offset /= 2;
    }
    if offset == 0 || offset.signum() != direction {
        return if direction > 0 { upper - 1 - i } else { lower + 1 - i };
    }
    offset
}

fn ceil_away_from_zero(value: f64) -> isize {
    if value > 0.0 {
        value.ceil() as isize
    } else {
        value.floor() as isize
    }
}
