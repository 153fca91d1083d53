//! Behavioral properties every combinator must keep, checked over a small
//! corpus of inputs.

use rowfilter_combinator::prelude::*;

const INPUTS: &[&str] = &[
    "",
    " ",
    "abc",
    "abc 123",
    "  abc   123   REST",
    "a: 1 b: 22 c: 333",
    "\"quoted \\\" text\" tail",
    "/rx\\/body/ x",
    "123abc",
    "ÿ ümlaut 42",
];

fn grammar() -> Vec<Parser<String>> {
    let word = trim(regex("[a-z]+").unwrap());
    let number = trim(regex(r"\d+").unwrap());
    let quote = trim(regex_capture(r#""((?:\\["\\]|[^"])*)""#, 1).unwrap());
    vec![
        word.clone(),
        number.clone(),
        quote,
        alternation(vec![word.clone(), number.clone()]),
        transform(sequence(vec![word.clone(), number.clone()]), |v| v.concat()),
        transform(one_or_more(word.clone()), |v| v.join(" ")),
        transform(zero_or_more(number.clone()), |v| v.join(" ")),
        transform(optional(number.clone()), |v| v.unwrap_or_default()),
        transform(negate_presence(number.clone()), |_| String::new()),
        all(alternation(vec![word, number])),
    ]
}

#[test]
fn consumed_span_and_remainder_reconstruct_input() {
    for parser in grammar() {
        for input in INPUTS {
            let result = parser.parse(input);
            if let Some(rest) = result.remainder() {
                assert!(
                    input.ends_with(rest),
                    "{} left {:?}, not a suffix of {:?}",
                    parser,
                    rest,
                    input
                );
                let consumed = result.consumed(input).unwrap();
                assert_eq!(format!("{}{}", consumed, rest), *input);
            }
        }
    }
}

#[test]
fn parsing_is_deterministic() {
    for parser in grammar() {
        for input in INPUTS {
            assert_eq!(parser.parse(input), parser.parse(input), "{}", parser);
        }
    }
}

#[test]
fn all_succeeds_iff_inner_consumes_everything() {
    for parser in grammar() {
        let whole = all(parser.clone());
        for input in INPUTS {
            assert_eq!(
                whole.parse(input).is_matched(),
                parser.parse(input).is_complete(),
                "{} on {:?}",
                parser,
                input
            );
        }
    }
}

#[test]
fn one_or_more_succeeds_iff_inner_succeeds_once() {
    for parser in grammar() {
        let many = one_or_more(parser.clone());
        for input in INPUTS {
            let once = parser.parse(input);
            let shrinks = once.remainder().is_some_and(|rest| rest.len() < input.len());
            assert_eq!(many.parse(input).is_matched(), shrinks, "{} on {:?}", parser, input);
        }
    }
}
