//! Assertion Macros
//!
//! Each macro records the call site and the source text of its operands,
//! evaluates one check and returns early from the test with `?` when it
//! fails. Trailing format arguments are printed as an extra diagnostic line,
//! and only formatted when the check failed.

/// Call site of an assertion
#[doc(hidden)]
#[macro_export]
macro_rules! __site {
    ($a:expr) => {
        $crate::Site::new(file!(), line!(), stringify!($a), "")
    };
    ($a:expr, $b:expr) => {
        $crate::Site::new(file!(), line!(), stringify!($a), stringify!($b))
    };
}

/// Finish an outcome, attaching an optional note
#[doc(hidden)]
#[macro_export]
macro_rules! __finish {
    ($ctx:expr, $outcome:expr) => {
        $outcome.finish($ctx)?
    };
    ($ctx:expr, $outcome:expr, $($note:tt)+) => {
        $outcome.note(|| format!($($note)+)).finish($ctx)?
    };
}

/// Every lane of `a` equals `b`
///
/// ```ignore
/// compare!(ctx, x + y, 5);
/// compare!(ctx, v, [1.0, 2.0], "while testing v = {:?}", v);
/// ```
#[macro_export]
macro_rules! compare {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!($ctx, $crate::equal($crate::__site!($a, $b), a, b)),
        }
    };
    ($ctx:expr, $a:expr, $b:expr, $($note:tt)+) => {
        match (&$a, &$b) {
            (a, b) => {
                $crate::__finish!($ctx, $crate::equal($crate::__site!($a, $b), a, b), $($note)+)
            }
        }
    };
}

/// Like [`compare!`], without the operator result in the diagnostic
#[macro_export]
macro_rules! compare_quiet {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!($ctx, $crate::equal_quiet($crate::__site!($a, $b), a, b)),
        }
    };
    ($ctx:expr, $a:expr, $b:expr, $($note:tt)+) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!(
                $ctx,
                $crate::equal_quiet($crate::__site!($a, $b), a, b),
                $($note)+
            ),
        }
    };
}

/// Every lane of `a` differs from `b`
#[macro_export]
macro_rules! compare_ne {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!($ctx, $crate::not_equal($crate::__site!($a, $b), a, b)),
        }
    };
    ($ctx:expr, $a:expr, $b:expr, $($note:tt)+) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!(
                $ctx,
                $crate::not_equal($crate::__site!($a, $b), a, b),
                $($note)+
            ),
        }
    };
}

/// `a` is within the test's ULP tolerance of the reference `b`
///
/// The tolerance is 1 ULP unless the test raised it with
/// [`TestContext::set_fuzziness`](crate::TestContext::set_fuzziness).
#[macro_export]
macro_rules! fuzzy_compare {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => {
                let outcome = $crate::fuzzy(&mut *$ctx, $crate::__site!($a, $b), a, b);
                $crate::__finish!($ctx, outcome)
            }
        }
    };
    ($ctx:expr, $a:expr, $b:expr, $($note:tt)+) => {
        match (&$a, &$b) {
            (a, b) => {
                let outcome = $crate::fuzzy(&mut *$ctx, $crate::__site!($a, $b), a, b);
                $crate::__finish!($ctx, outcome, $($note)+)
            }
        }
    };
}

/// `|a - b| <= error` in every lane
#[macro_export]
macro_rules! compare_abs {
    ($ctx:expr, $a:expr, $b:expr, $error:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!(
                $ctx,
                $crate::absolute_error($crate::__site!($a, $b), a, b, $error)
            ),
        }
    };
    ($ctx:expr, $a:expr, $b:expr, $error:expr, $($note:tt)+) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!(
                $ctx,
                $crate::absolute_error($crate::__site!($a, $b), a, b, $error),
                $($note)+
            ),
        }
    };
}

/// `|a - b| <= error * |b|` in every lane
#[macro_export]
macro_rules! compare_rel {
    ($ctx:expr, $a:expr, $b:expr, $error:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!(
                $ctx,
                $crate::relative_error($crate::__site!($a, $b), a, b, $error)
            ),
        }
    };
    ($ctx:expr, $a:expr, $b:expr, $error:expr, $($note:tt)+) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!(
                $ctx,
                $crate::relative_error($crate::__site!($a, $b), a, b, $error),
                $($note)+
            ),
        }
    };
}

/// `a` and `b` have identical bytes in memory
#[macro_export]
macro_rules! compare_bits {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!($ctx, $crate::bitwise($crate::__site!($a, $b), a, b)),
        }
    };
    ($ctx:expr, $a:expr, $b:expr, $($note:tt)+) => {
        match (&$a, &$b) {
            (a, b) => $crate::__finish!(
                $ctx,
                $crate::bitwise($crate::__site!($a, $b), a, b),
                $($note)+
            ),
        }
    };
}

/// `condition` holds
#[macro_export]
macro_rules! verify {
    ($ctx:expr, $cond:expr $(,)?) => {
        $crate::__finish!($ctx, $crate::verify($crate::__site!($cond), $cond))
    };
    ($ctx:expr, $cond:expr, $($note:tt)+) => {
        $crate::__finish!($ctx, $crate::verify($crate::__site!($cond), $cond), $($note)+)
    };
}

/// Fail the test with a formatted message
#[macro_export]
macro_rules! fail {
    ($ctx:expr, $($msg:tt)+) => {
        $crate::fail($crate::Site::new(file!(), line!(), "", ""), format!($($msg)+))
            .finish($ctx)?
    };
}

/// Skip the rest of the test with a formatted reason
#[macro_export]
macro_rules! skip {
    ($($reason:tt)+) => {
        return $crate::skip(format!($($reason)+))
    };
}

/// `expr` panics
///
/// ```ignore
/// expect_panic!(ctx, checked_div(1, 0).unwrap());
/// ```
#[macro_export]
macro_rules! expect_panic {
    ($ctx:expr, $e:expr $(,)?) => {
        $crate::__finish!(
            $ctx,
            $crate::expect_panic($crate::__site!($e), || {
                let _ = $e;
            })
        )
    };
    ($ctx:expr, $e:expr, $($note:tt)+) => {
        $crate::__finish!(
            $ctx,
            $crate::expect_panic($crate::__site!($e), || {
                let _ = $e;
            }),
            $($note)+
        )
    };
}
