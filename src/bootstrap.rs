//! A hard-coded bootstrap grammar for EBNF itself, following the
//! Wikipedia definition:
//!
//! ```text
//! letter = "A" | "B" | ... | "z" ;
//! digit = "0" | "1" | ... | "9" ;
//! symbol = "[" | "]" | "{" | "}" | "(" | ")" | "<" | ">"
//!        | "'" | '"' | "=" | "|" | "." | "," | ";" ;
//! character = letter | digit | symbol | "_" ;
//! whitespace = { "\n" | "\r" | "\t" | " " } ;
//! identifier = letter , { letter | digit | "_" } ;
//! terminal = "'" , character - "'" , "'"
//!          | '"' , character - '"' , '"' ;
//! lhs = identifier ;
//! rhs = identifier | terminal | "[" , rhs , "]" | "{" , rhs , "}"
//!     | "(" , rhs , ")" | rhs , "|" , rhs | rhs , "," , rhs ;
//! rule = lhs , "=" , rhs , ";" ;
//! ```
//!
//! This is pure configuration: a sequence of calls wiring combinators
//! together, with no logic of its own. There is no attempt to be fast,
//! just correct; it is a bootstrap for other parsers, not something to
//! parse anything big with.

use crate::error::Error;
use crate::grammar::{Grammar, NodeId};

fn add_ascii_range(g: &mut Grammar, target: NodeId, first: char, last: char) -> Result<(), Error> {
    for c in first..=last {
        let t = g.terminal(c.to_string())?;
        g.add_member(target, t)?;
    }
    Ok(())
}

fn add_ascii_elements(g: &mut Grammar, target: NodeId, elements: &str) -> Result<(), Error> {
    for c in elements.chars() {
        let t = g.terminal(c.to_string())?;
        g.add_member(target, t)?;
    }
    Ok(())
}

/// Build the bootstrap EBNF grammar. The entry point for a single
/// production is the rule named `"rule"`.
pub fn ebnf_grammar() -> Result<Grammar, Error> {
    let mut g = Grammar::new();

    let letter = g.alternation();
    add_ascii_range(&mut g, letter, 'a', 'z')?;
    add_ascii_range(&mut g, letter, 'A', 'Z')?;
    g.add("letter", letter);

    let digit = g.alternation();
    add_ascii_range(&mut g, digit, '0', '9')?;
    g.add("digit", digit);

    let symbol = g.alternation();
    add_ascii_elements(&mut g, symbol, "[]{}()<>'\"=|.,;")?;
    g.add("symbol", symbol);

    let underscore = g.terminal("_")?;
    let character = g.alternation();
    g.extend(character, &[letter, digit, symbol, underscore])?;
    g.add("character", character);

    let whitespace_character = g.alternation();
    add_ascii_elements(&mut g, whitespace_character, "\n\r\t ")?;
    g.add("whitespace_character", whitespace_character);

    let whitespace = g.repetition(whitespace_character, 0);
    g.add("whitespace", whitespace);

    // identifier = letter , { letter | digit | "_" } ;
    let identifier_alternation = g.alternation();
    g.extend(identifier_alternation, &[letter, digit, underscore])?;
    let identifier_tail = g.repetition(identifier_alternation, 0);
    let identifier = g.concatenation();
    g.extend(identifier, &[letter, identifier_tail])?;
    g.add("identifier", identifier);

    // Quoted terminals, with no escapes.
    let single_quote = g.terminal("'")?;
    let not_single_quote = g.exception(None, single_quote);
    let single_quote_terminal = g.concatenation();
    g.extend(single_quote_terminal, &[single_quote, not_single_quote, single_quote])?;
    g.add("single_quote_terminal", single_quote_terminal);

    let double_quote = g.terminal("\"")?;
    let not_double_quote = g.exception(None, double_quote);
    let double_quote_terminal = g.concatenation();
    g.extend(double_quote_terminal, &[double_quote, not_double_quote, double_quote])?;
    g.add("double_quote_terminal", double_quote_terminal);

    let terminal = g.alternation();
    g.extend(terminal, &[single_quote_terminal, double_quote_terminal])?;
    g.add("terminal", terminal);

    let lhs = g.alternation();
    g.add_member(lhs, identifier)?;
    g.add("lhs", lhs);

    // rhs is recursive, so it has to late bind: take its handle now,
    // populate its members at the end.
    let rhs = g.rule("rhs");

    let optional = g.concatenation();
    let open = g.terminal("[")?;
    let close = g.terminal("]")?;
    g.extend(optional, &[open, rhs, close])?;
    g.add("optional", optional);

    let repetition = g.concatenation();
    let open = g.terminal("{")?;
    let close = g.terminal("}")?;
    g.extend(repetition, &[open, rhs, close])?;
    g.add("repetition", repetition);

    let group = g.concatenation();
    let open = g.terminal("(")?;
    let close = g.terminal(")")?;
    g.extend(group, &[open, rhs, close])?;
    g.add("group", group);

    let alternation = g.concatenation();
    let pipe = g.terminal("|")?;
    g.extend(alternation, &[rhs, pipe, rhs])?;

    let concatenation = g.concatenation();
    let comma = g.terminal(",")?;
    g.extend(concatenation, &[rhs, comma, rhs])?;

    g.extend(
        rhs,
        &[
            identifier,
            terminal,
            optional,
            repetition,
            group,
            alternation,
            concatenation,
        ],
    )?;

    let rule = g.concatenation();
    let eq = g.terminal("=")?;
    let semi = g.terminal(";")?;
    g.extend(rule, &[lhs, whitespace, eq, whitespace, rhs, whitespace, semi])?;
    g.add("rule", rule);

    Ok(g)
}
