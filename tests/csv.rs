//! A very simple csv grammar that acts only on numbers, built
//! programmatically from the engine's combinators.

use anyhow::Result;
use ebnf_engine::{Grammar, MemorySource, ParseTree};

/// Rules for the csv grammar:
///
/// ```text
/// digit = "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" ;
/// field = digit , { digit } ;
/// fields = field , { "," , field } ;
/// record = fields , "\n" ;
/// csv = { record } ;
/// ```
fn csv_grammar() -> Result<Grammar> {
    let mut g = Grammar::new();

    let digit = g.alternation();
    for d in 0..10u32 {
        let t = g.terminal(d.to_string())?;
        g.add_member(digit, t)?;
    }
    g.add("digit", digit);

    let digit_tail = g.repetition(digit, 0);
    let field = g.concatenation();
    g.extend(field, &[digit, digit_tail])?;
    g.add("field", field);

    let comma = g.terminal(",")?;
    let comma_field = g.concatenation();
    g.extend(comma_field, &[comma, field])?;
    let field_tail = g.repetition(comma_field, 0);
    let fields = g.concatenation();
    g.extend(fields, &[field, field_tail])?;
    g.add("fields", fields);

    let newline = g.terminal("\n")?;
    let record = g.concatenation();
    g.extend(record, &[fields, newline])?;
    g.add("record", record);

    let csv = g.repetition(record, 0);
    g.add("csv", csv);

    Ok(g)
}

#[test]
fn parses_two_records() -> Result<()> {
    let g = csv_grammar()?;
    let source = MemorySource::new("input.csv", "10,20\n30,4\n");
    let mut tree = ParseTree::root(source.start());
    assert!(g.parse(&mut tree, "csv")?);

    let csv = &tree.children[0];
    assert_eq!(g.key(csv.owner.unwrap()), Some("csv"));
    assert_eq!(csv.end.byte_offset, 11);
    assert_eq!(csv.children.len(), 2);
    assert_eq!(csv.children[0].end.byte_offset, 6);
    assert_eq!(csv.children[0].end.line_number, 1);
    assert_eq!(csv.children[1].end.byte_offset, 11);
    assert_eq!(csv.children[1].end.line_number, 2);

    // One digit rule match per digit in the input, in input order.
    let digit_ends: Vec<_> = csv
        .iter()
        .filter(|n| n.owner.map(|id| g.key(id)) == Some(Some("digit")))
        .map(|n| n.end.byte_offset)
        .collect();
    assert_eq!(digit_ends, vec![1, 2, 4, 5, 7, 8, 10]);
    Ok(())
}

#[test]
fn empty_input_is_zero_records() -> Result<()> {
    let g = csv_grammar()?;
    let source = MemorySource::new("input.csv", "");
    let mut tree = ParseTree::root(source.start());
    assert!(g.parse(&mut tree, "csv")?);
    let csv = &tree.children[0];
    assert!(csv.children.is_empty());
    assert_eq!(csv.end.byte_offset, 0);
    Ok(())
}

#[test]
fn unterminated_record_matches_zero_records() -> Result<()> {
    // No trailing newline, so the record rule never completes; the csv
    // repetition still succeeds with nothing consumed, and the failed
    // record leaves no trace in the tree.
    let g = csv_grammar()?;
    let source = MemorySource::new("input.csv", "12,3");
    let mut tree = ParseTree::root(source.start());
    assert!(g.parse(&mut tree, "csv")?);
    let csv = &tree.children[0];
    assert!(csv.children.is_empty());
    assert_eq!(csv.end.byte_offset, 0);
    Ok(())
}

#[test]
fn recognizer_agrees_with_parser() -> Result<()> {
    let g = csv_grammar()?;
    let source = MemorySource::new("input.csv", "1,2\nx\n");
    let record = g.get("record").unwrap();

    let after = g.matches(record, &source.start())?.unwrap();
    assert_eq!(after.byte_offset, 4);

    // The second line is not a record.
    assert!(g.matches(record, &source.position_at(4)?)?.is_none());
    Ok(())
}
