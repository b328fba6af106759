//! Report output.

use twelve_factor_core::{report, CheckResult};

/// Print the validation report to stdout.
pub fn print(result: &CheckResult) {
    print!("{}", report::render(result));
}
