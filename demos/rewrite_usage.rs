/// Query rewriting walkthrough
///
/// Builds a small in-memory term dictionary, then expands a range query
/// and a wildcard query into primitive term queries against it.
use Quendrix::{InMemoryIndex, RangeQuery, SearchQuery, Term, WildcardQuery};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Step 1: build the dictionary
    let mut builder = InMemoryIndex::builder();
    for word in ["apple", "apricot", "banana", "cherry", "date", "elderberry"] {
        builder.add_term("fruit", word);
    }
    let mut index = builder.build()?;
    println!("Dictionary holds {} terms\n", index.term_count());

    // Step 2: range query [banana TO date]
    let mut range = RangeQuery::new(
        Some(Term::with_field("banana", "fruit")),
        Some(Term::with_field("date", "fruit")),
        true,
    )?;
    println!("Rewriting {}", range);
    let primitive = range.rewrite(&mut index)?;
    println!("  => {}", primitive);
    for term in range.query_terms()? {
        println!("     matched {}", term);
    }

    // Step 3: wildcard query ap*
    WildcardQuery::set_min_prefix_length(2);
    let mut wildcard = WildcardQuery::new(Term::with_field("ap*", "fruit"));
    println!("\nRewriting {}", wildcard);
    let primitive = wildcard.rewrite(&mut index)?;
    println!("  => {}", primitive);

    // Step 4: rewrite-only shapes reject direct execution
    let err = wildcard.execute(&mut index).unwrap_err();
    println!("\nDirect execution refused: {}", err);

    Ok(())
}
