//! Built-in sample records used to bootstrap an empty store.

use crate::error::Result;
use crate::index::RecordIndex;

/// Sample jokes written into an empty index.
pub const SAMPLE_JOKES: &[&str] = &[
    "Today I made my first money as a programmer. I sold my laptop.",
    "A programmer was arrested for writing unreadable code. He refused to comment.",
    "Why do Java programmers have to wear glasses? Because they don't C#.",
    "When your hammer is C++, everything begins to look like a thumb.",
    "To understand what recursion is, you must first understand recursion.",
    "There are 2 hard problems in computer science: caching, naming, and off-by-1 errors.",
    "How does a programmer confuse a mathematician? x = x + 1",
    "Why does a programmer prefer dark mode? Because light attracts bugs.",
    "My programmer friend said I have a high IQ. He said it's 404",
    "JavaScript. That's the entire joke.",
    "I would make a UDP joke, but you might not get it.",
    "Why did the Python data scientist get arrested at customs? She was caught trying to import pandas!",
    "What's the cutest Linux distribution? UwUbuntu.",
    "When I wrote this code, only me and God knew how it works. Now only God knows...",
    "Give a man a program, frustrate him for a day. Teach a man to program, frustrate him for a lifetime.",
    "Debugging is like being the detective in a crime movie where you're also the murderer.",
    "!false (It's funny because it's true.)",
    "Why do programmers always mix up Christmas and Halloween? Because Dec 25 is Oct 31.",
    "#muscles { display: flex; }",
];

/// Creates every entry of `records` if the index is empty.
///
/// Returns the number of records created: `records.len()` for an empty
/// index, otherwise 0. Stops at the first failure; records created before
/// it stay in place.
///
/// # Errors
///
/// Returns the first error from [`RecordIndex::len`] or [`RecordIndex::create`].
pub fn seed_if_empty(index: &RecordIndex, records: &[&str]) -> Result<usize> {
    if !index.is_empty()? {
        return Ok(0);
    }
    for body in records {
        index.create(body)?;
    }
    log::info!("seeded empty store with {} records", records.len());
    Ok(records.len())
}
