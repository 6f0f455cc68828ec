/*!
 * Built-in Programs
 * Small demonstration programs in assembly source form
 */

use super::assemble;
use crate::core::types::Word;

/// 1 + 1 + 2 + 1, prints 5
pub const FIBONACCI: &str = "
# Fibonacci demo: 1+1+2+1 = 5
LOAD 1
STORE 100
LOAD 1
ADD 100
STORE 100
LOAD 2
ADD 100
STORE 100
LOAD 1
ADD 100
PRINT
HALT
";

/// 5 + 10, prints 15
pub const SUM: &str = "
# Sum: 5 + 10 = 15
LOAD 5
STORE 100
LOAD 10
ADD 100
PRINT
HALT
";

/// 5 * 4, prints 20
pub const MULTIPLY: &str = "
# Multiply: 5 * 4 = 20
LOAD 5
STORE 40
LOAD 4
MUL 40
PRINT
HALT
";

/// Prints the character codes of \"Hi\"
pub const HELLO: &str = "
# ASCII output: H i
LOAD 72
PRINT
LOAD 105
PRINT
HALT
";

/// Names accepted by [`by_name`]
pub const NAMES: [&str; 4] = ["fibonacci", "sum", "multiply", "hello"];

/// Source of a built-in program, case-insensitive
pub fn source(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "fibonacci" | "fib" => Some(FIBONACCI),
        "sum" => Some(SUM),
        "multiply" | "mul" => Some(MULTIPLY),
        "hello" => Some(HELLO),
        _ => None,
    }
}

/// Assembled image of a built-in program
pub fn by_name(name: &str) -> Option<Vec<Word>> {
    source(name).map(assemble)
}
