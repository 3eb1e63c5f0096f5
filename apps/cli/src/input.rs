//! Reading and re-prompting on stdin.
//!
//! Every reader here loops until the input validates, printing the error
//! in between. Retry is this layer's policy; the core only ever sees input
//! that already passed the accepted-input contract.
//!
//! End of input (Ctrl-D, closed pipe) surfaces as an [`io::Error`] of kind
//! `UnexpectedEof`, which the session treats as "leave the store".

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use tracing::warn;

use corner_core::pricing::Decisions;
use corner_core::request::{
    parse_date, parse_positive_int, parse_price, parse_purchase_input, parse_yes_no,
    PurchaseRequest,
};
use corner_core::Money;

/// Prints `prompt` without a newline and reads one trimmed line.
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut buffer = String::new();
    let bytes = io::stdin().lock().read_line(&mut buffer)?;
    if bytes == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "end of input",
        ));
    }
    Ok(buffer.trim().to_string())
}

/// Asks `question` until the answer parses as Y/N.
pub fn read_yes_no(question: &str) -> io::Result<bool> {
    loop {
        println!("{question} (Y/N)");
        match parse_yes_no(&read_line("")?) {
            Ok(answer) => return Ok(answer),
            Err(err) => println!("[ERROR] {err}"),
        }
    }
}

/// Asks for a strictly positive integer until one arrives.
pub fn read_positive_int(prompt: &str, field: &str) -> io::Result<u32> {
    loop {
        match parse_positive_int(&read_line(prompt)?, field) {
            Ok(value) => return Ok(value),
            Err(err) => println!("[ERROR] {err}"),
        }
    }
}

/// Asks for a price in whole currency units.
pub fn read_price(prompt: &str) -> io::Result<Money> {
    loop {
        match parse_price(&read_line(prompt)?) {
            Ok(value) => return Ok(value),
            Err(err) => println!("[ERROR] {err}"),
        }
    }
}

/// Asks for a `YYYY-MM-DD` date.
pub fn read_date(prompt: &str) -> io::Result<NaiveDate> {
    loop {
        match parse_date(&read_line(prompt)?) {
            Ok(value) => return Ok(value),
            Err(err) => println!("[ERROR] {err}"),
        }
    }
}

/// Asks for a purchase line in the `[name-quantity]` grammar.
pub fn read_purchase_items() -> io::Result<Vec<PurchaseRequest>> {
    println!("\nEnter the products and quantities to buy. (e.g. [cola-2],[chips-1])");
    loop {
        match parse_purchase_input(&read_line("")?) {
            Ok(requests) => return Ok(requests),
            Err(err) => println!("[ERROR] {err}"),
        }
    }
}

// =============================================================================
// Console Decisions
// =============================================================================

/// The core's decision seam, answered by a human at the keyboard.
///
/// Prompts arrive mid-checkout, after pricing questions are already
/// decided, so a closed stdin cannot abort cleanly here; it declines the
/// offer instead, which is always a safe answer.
#[derive(Debug, Default)]
pub struct ConsoleDecisions;

impl ConsoleDecisions {
    fn ask_or_decline(question: &str) -> bool {
        match read_yes_no(question) {
            Ok(answer) => answer,
            Err(err) => {
                warn!(%err, "input ended mid-checkout, declining");
                false
            }
        }
    }
}

impl Decisions for ConsoleDecisions {
    fn offer_free_item(&mut self, product: &str) -> bool {
        Self::ask_or_decline(&format!(
            "{product} qualifies for a free bonus unit right now. Add it?"
        ))
    }

    fn confirm_full_price(&mut self, product: &str, uncovered: u32) -> bool {
        Self::ask_or_decline(&format!(
            "{uncovered} unit(s) of {product} fall outside the promotion. Buy them at full price?"
        ))
    }

    fn accept_membership_discount(&mut self) -> bool {
        Self::ask_or_decline("Apply the membership discount?")
    }
}
