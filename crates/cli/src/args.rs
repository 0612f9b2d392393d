//! Parsing of `--args` lists
//!
//! Argument sets are separated by commas; a set containing colons is a tuple:
//! `"100,200"` is two scalar sets, `"1:2,3:4"` is two 2-tuples.

use parabench_core::domain::{TaskArgs, Value};

pub fn parse_args_list(input: &str) -> Vec<TaskArgs> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_arg_set)
        .collect()
}

fn parse_arg_set(item: &str) -> TaskArgs {
    if item.contains(':') {
        TaskArgs::tuple(item.split(':').map(parse_value))
    } else {
        TaskArgs::Single(parse_value(item))
    }
}

fn parse_value(raw: &str) -> Value {
    match raw.parse::<Value>() {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
